//! The VM state machine, parametric in a `Flavor` so concrete and symbolic
//! execution share one source: `VM<Concrete>` and `VM<Symbolic>` differ only
//! in what `Frame`'s `gas` field holds and what `GasOps` realization backs
//! it.

pub mod cache;
pub mod contract;
pub mod env;
pub mod frame;

use std::collections::BTreeMap;

use crate::effect::{Effect, VMResult};
use crate::error::CodeLocation;
use crate::expr::{EAddr, EWord, Log};
use crate::gas::Flavor;
use crate::numeric::Addr;
use crate::prop::Prop;
use crate::trace::{Trace, TraceContext, TraceData, TreeZipper};

pub use cache::Cache;
pub use contract::Contract;
pub use env::{Block, Env, ForkState, RuntimeConfig, Substate, TxState};
pub use frame::{Frame, FrameState, Memory};

/// The full VM state, threaded explicitly through every transition — there
/// is no hidden global state.
#[derive(Debug, Clone, PartialEq)]
pub struct VM<F: Flavor> {
    pub result: Option<VMResult>,
    pub state: FrameState<F>,
    pub frames: Vec<Frame<F>>,
    pub env: Env,
    pub block: Block,
    pub tx: TxState,
    pub logs: Vec<Log>,
    pub traces: TreeZipper,
    pub cache: Cache,
    pub burned: F::Gas,
    pub iterations: BTreeMap<CodeLocation, (i32, Vec<EWord>)>,
    pub constraints: Vec<Prop>,
    pub config: RuntimeConfig,
    pub forks: Vec<ForkState>,
    pub current_fork: i32,
    pub labels: BTreeMap<Addr, String>,
}

impl<F: Flavor> VM<F> {
    /// Build a fresh VM ready to run `state` as its top-level frame.
    pub fn new(state: FrameState<F>, env: Env, block: Block, tx: TxState, gas: F::Gas) -> Self {
        let root = Trace {
            op_ix: 0,
            contract: state.contract.clone(),
            data: TraceData::Frame(TraceContext::default()),
        };
        VM {
            result: None,
            state,
            frames: Vec::new(),
            env,
            block,
            tx,
            logs: Vec::new(),
            traces: TreeZipper::new(root),
            cache: Cache::new(),
            burned: gas,
            iterations: BTreeMap::new(),
            constraints: Vec::new(),
            config: RuntimeConfig::default(),
            forks: Vec::new(),
            current_fork: 0,
            labels: BTreeMap::new(),
        }
    }

    /// Push a new call/create frame: snapshot the storage of every contract
    /// the child touches isn't known up front, so the reversion list starts
    /// empty and grows lazily as writes happen (tracked by the caller of
    /// this method); descend the trace zipper to a fresh `Entry`.
    pub fn push_frame(&mut self, new_state: FrameState<F>) {
        let depth = self.frames.len() + 1;
        tracing::debug!(
            target: "symbex_evm_core::vm",
            contract = %new_state.contract_display(),
            depth,
            "push_frame"
        );
        self.traces.push_child(Trace {
            op_ix: 0,
            contract: new_state.contract.clone(),
            data: TraceData::Entry(format!("call into {}", new_state.contract_display())),
        });
        let old_state = std::mem::replace(&mut self.state, new_state);
        self.frames.push(Frame {
            state: old_state,
            call_reversion: Vec::new(),
        });
    }

    /// Pop the current frame back to its caller. On `success = false`,
    /// every `(addr, storage)` pair recorded in `call_reversion` is
    /// restored into `self.env.contracts` before the frame is discarded.
    /// Appends a `Return` trace sibling and ascends.
    pub fn pop_frame(&mut self, success: bool) -> Option<FrameState<F>> {
        let popped = self.frames.pop()?;
        let depth = self.frames.len();
        tracing::debug!(
            target: "symbex_evm_core::vm",
            contract = %self.state.contract_display(),
            depth,
            success,
            "pop_frame"
        );
        if !success {
            for (addr, storage) in popped.call_reversion {
                if let Some(c) = self.env.contracts.get_mut(&addr) {
                    c.storage = storage;
                }
            }
        }
        let finished = std::mem::replace(&mut self.state, popped.state);
        self.traces.append_sibling(Trace {
            op_ix: 0,
            contract: finished.contract.clone(),
            data: TraceData::Return {
                data: finished.returndata.clone(),
                ctx: TraceContext {
                    contract: Some(finished.contract.clone()),
                    code_contract: Some(finished.code_contract.clone()),
                    gas_used: 0,
                    depth: depth + 1,
                },
            },
        });
        self.traces.go_up();
        Some(finished)
    }

    /// Suspend execution on an `Effect`, recording it in `result` and
    /// logging it for an orchestrator's correlation.
    pub fn emit_effect(&mut self, effect: Effect) {
        tracing::trace!(target: "symbex_evm_core::vm", ?effect, "emit_effect");
        self.result = Some(VMResult::HandleEffect(effect));
    }

    /// Merge another cache into this VM's, e.g. after two symbolic path
    /// explorations reconverge.
    pub fn merge_cache(&mut self, other: Cache) {
        tracing::trace!(target: "symbex_evm_core::vm", "merge_cache");
        self.cache = std::mem::take(&mut self.cache).combine(other);
    }
}

impl<F: Flavor> FrameState<F> {
    fn contract_display(&self) -> String {
        match &self.contract {
            EAddr::LitAddr(a) => a.to_string(),
            EAddr::SymAddr(n) => n.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Buf, ContractCode};
    use crate::gas::{ConcreteGasOps, Concrete};
    use crate::numeric::W256;

    fn dummy_frame(contract: EAddr) -> FrameState<Concrete> {
        FrameState::new(
            contract.clone(),
            ContractCode::Unknown(Box::new(contract.clone())),
            Buf::ConcreteBuf(vec![]),
            EWord::Lit(W256::ZERO),
            contract,
            1000,
            false,
        )
    }

    fn fresh_vm() -> VM<Concrete> {
        let root_addr = EAddr::LitAddr(Addr::ZERO);
        let tx = TxState {
            gasprice: W256::ZERO,
            gaslimit: 1_000_000,
            priority_fee: W256::ZERO,
            origin: root_addr.clone(),
            to_addr: Some(root_addr.clone()),
            value: W256::ZERO,
            substate: Substate::default(),
            is_create: false,
            tx_reversion: BTreeMap::new(),
        };
        VM::new(
            dummy_frame(root_addr),
            Env::new(W256::from_u64(1)),
            Block::new(crate::gas::Schedule::new()),
            tx,
            ConcreteGasOps::new(1_000_000).remaining(),
        )
    }

    #[test]
    fn push_then_pop_restores_caller_frame() {
        let mut vm = fresh_vm();
        let caller = vm.state.contract.clone();
        vm.push_frame(dummy_frame(EAddr::LitAddr(Addr::from_slice(&[9u8; 20]))));
        assert_eq!(vm.frames.len(), 1);
        assert_ne!(vm.state.contract, caller);

        let popped = vm.pop_frame(true).unwrap();
        assert_ne!(popped.contract, caller);
        assert_eq!(vm.state.contract, caller);
        assert!(vm.frames.is_empty());
    }

    #[test]
    fn pop_frame_on_empty_stack_returns_none() {
        let mut vm = fresh_vm();
        assert!(vm.pop_frame(true).is_none());
    }

    #[test]
    fn failed_pop_restores_snapshotted_storage() {
        let mut vm = fresh_vm();
        let child_addr = EAddr::LitAddr(Addr::from_slice(&[7u8; 20]));
        vm.env
            .contracts
            .insert(child_addr.clone(), Contract::unknown(child_addr.clone()));

        vm.push_frame(dummy_frame(child_addr.clone()));
        let original_storage = crate::expr::Storage::empty();
        vm.frames
            .last_mut()
            .unwrap()
            .call_reversion
            .push((child_addr.clone(), original_storage.clone()));
        // simulate a write the child made
        vm.env.contracts.get_mut(&child_addr).unwrap().storage =
            crate::expr::Storage::ConcreteStore(std::collections::BTreeMap::from([(
                W256::ZERO,
                W256::from_u64(1),
            )]));

        vm.pop_frame(false);
        assert_eq!(
            vm.env.contracts.get(&child_addr).unwrap().storage,
            original_storage
        );
    }
}
