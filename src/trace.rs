//! Execution traces and the rose-tree zipper they live in.
//!
//! Grounded on the design note's "parent stack + node arena" guidance: an
//! index-based arena avoids `Rc<RefCell<_>>` parent/child cycles while still
//! giving O(1) push-child / ascend / focus.

use crate::error::EvmError;
use crate::expr::{Buf, EAddr};
use crate::numeric::W256;

/// A snapshot of frame-local context embedded in trace nodes and in `End`
/// terminals, reduced to what a report needs to say where an end state came
/// from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TraceContext {
    pub contract: Option<EAddr>,
    pub code_contract: Option<EAddr>,
    pub gas_used: u64,
    pub depth: usize,
}

/// Payload of a single trace node.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceData {
    Event {
        addr: EAddr,
        data: Buf,
        topics: Vec<W256>,
    },
    Frame(TraceContext),
    Error(EvmError),
    Entry(String),
    Return {
        data: Buf,
        ctx: TraceContext,
    },
}

/// A single node: which op index in the contract produced it, which
/// contract was executing, and the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub op_ix: usize,
    pub contract: EAddr,
    pub data: TraceData,
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    trace: Trace,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// A rose tree of `Trace` nodes with a zipper-style focus pointer. Every
/// operation — `push_child`, `go_up`, `focus` — is O(1): the tree is an
/// arena (`Vec<Node>`) addressed by index, not a pointer structure, so there
/// is nothing to rebuild on ascend.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeZipper {
    nodes: Vec<Node>,
    focus: usize,
}

impl TreeZipper {
    /// A zipper rooted at a single node holding `root`.
    pub fn new(root: Trace) -> Self {
        TreeZipper {
            nodes: vec![Node {
                trace: root,
                parent: None,
                children: Vec::new(),
            }],
            focus: 0,
        }
    }

    /// Append `trace` as a new child of the focus and move the focus to it.
    /// Used on frame push: append an `Entry` child and descend.
    pub fn push_child(&mut self, trace: Trace) {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            trace,
            parent: Some(self.focus),
            children: Vec::new(),
        });
        self.nodes[self.focus].children.push(idx);
        self.focus = idx;
    }

    /// Append `trace` as a sibling of the focus (a child of the focus's
    /// parent) without moving the focus. Used to record a terminal event
    /// (`Event`) alongside the current frame.
    pub fn append_sibling(&mut self, trace: Trace) {
        let parent = self.nodes[self.focus].parent;
        let idx = self.nodes.len();
        self.nodes.push(Node {
            trace,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p].children.push(idx),
            None => {
                // Focus is the root: treat as a second root-level child by
                // re-parenting under focus itself rather than losing the node.
                self.nodes[self.focus].children.push(idx);
                self.nodes[idx].parent = Some(self.focus);
            }
        }
    }

    /// Ascend to the parent of the focus. Used on frame pop: append a
    /// `Return` sibling (via `append_sibling` at the call site) and ascend.
    pub fn go_up(&mut self) -> bool {
        match self.nodes[self.focus].parent {
            Some(p) => {
                self.focus = p;
                true
            }
            None => false,
        }
    }

    pub fn focus(&self) -> &Trace {
        &self.nodes[self.focus].trace
    }

    pub fn focus_mut(&mut self) -> &mut Trace {
        &mut self.nodes[self.focus].trace
    }

    pub fn depth(&self) -> usize {
        let mut d = 0;
        let mut cur = self.focus;
        while let Some(p) = self.nodes[cur].parent {
            d += 1;
            cur = p;
        }
        d
    }
}
