//! The mutable, VM-resident `Contract`, distinct from `expr::EContract`:
//! this one additionally carries the op-index map and decoded op stream an
//! interpreter needs to step through code, and an `external` flag
//! distinguishing accounts whose state the orchestrator fetched remotely
//! from ones created during this run.

use crate::expr::{ContractCode, EContract, EWord, RuntimeCode, Storage};
use crate::numeric::W256;
use crate::opcode::Op;

/// A contract as the VM sees it: mutable storage views plus the decoded
/// op-stream needed to execute it.
#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    pub code: ContractCode,
    pub storage: Storage,
    pub transient_storage: Storage,
    /// Snapshot of `storage` taken at transaction start; restored verbatim
    /// on revert.
    pub orig_storage: Storage,
    pub balance: EWord,
    pub nonce: u64,
    pub codehash: W256,
    /// `op_ix_map[i]` is the index into `code_ops` of the instruction
    /// containing byte `i`, giving O(1) PC-to-op lookup.
    pub op_ix_map: Vec<i32>,
    pub code_ops: Vec<(i32, Op)>,
    /// Whether this account's state was fetched from outside this run
    /// (e.g. via `PleaseFetchContract`) rather than created locally.
    pub external: bool,
}

impl Contract {
    /// A fresh, empty contract (the "unknown" default an address resolves
    /// to before anything is known about it).
    pub fn unknown(addr: crate::expr::EAddr) -> Self {
        Contract {
            code: ContractCode::Unknown(Box::new(addr)),
            storage: Storage::empty(),
            transient_storage: Storage::empty(),
            orig_storage: Storage::empty(),
            balance: EWord::Lit(W256::ZERO),
            nonce: 0,
            codehash: W256::ZERO,
            op_ix_map: Vec::new(),
            code_ops: Vec::new(),
            external: false,
        }
    }

    /// A contract with known concrete runtime bytecode and a decoded op
    /// stream, building the `op_ix_map` from each op's byte span.
    pub fn with_runtime_code(bytes: Vec<u8>, ops: Vec<(i32, Op)>) -> Self {
        let mut op_ix_map = vec![0i32; bytes.len()];
        for (ix, (start, _)) in ops.iter().enumerate() {
            let next_start = ops
                .get(ix + 1)
                .map(|(s, _)| *s as usize)
                .unwrap_or(bytes.len());
            for slot in op_ix_map.iter_mut().take(next_start).skip(*start as usize) {
                *slot = ix as i32;
            }
        }
        let codehash = crate::hash::keccak_prime(&bytes);
        Contract {
            code: ContractCode::Runtime(RuntimeCode::Concrete(bytes)),
            storage: Storage::empty(),
            transient_storage: Storage::empty(),
            orig_storage: Storage::empty(),
            balance: EWord::Lit(W256::ZERO),
            nonce: 0,
            codehash,
            op_ix_map,
            code_ops: ops,
            external: false,
        }
    }

    /// Snapshot `storage`/`transient_storage` into `orig_storage` — taken at
    /// tx start and on every frame push.
    pub fn snapshot_orig_storage(&mut self) {
        self.orig_storage = self.storage.clone();
    }

    /// Restore `storage` from the snapshot, e.g. on frame-pop-with-failure.
    pub fn revert_storage(&mut self) {
        self.storage = self.orig_storage.clone();
    }

    /// The reduced `EContract` view shared with the expression IR (e.g. for
    /// `End::Success`'s post-state contract list).
    pub fn to_expr(&self) -> EContract {
        EContract {
            code: self.code.clone(),
            storage: Box::new(self.storage.clone()),
            transient_storage: Box::new(self.transient_storage.clone()),
            balance: Box::new(self.balance.clone()),
            nonce: self.nonce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_ix_map_covers_every_byte_span() {
        let bytes = vec![0x60, 0x01, 0x00]; // PUSH1 0x01; STOP
        let ops = vec![(0, Op::OpPush(vec![1])), (2, Op::OpStop)];
        let c = Contract::with_runtime_code(bytes, ops);
        assert_eq!(c.op_ix_map, vec![0, 0, 1]);
    }

    #[test]
    fn revert_storage_restores_snapshot() {
        let mut c = Contract::unknown(crate::expr::EAddr::LitAddr(crate::numeric::Addr::ZERO));
        c.snapshot_orig_storage();
        c.storage = Storage::ConcreteStore(std::collections::BTreeMap::from([(W256::ZERO, W256::from_u64(1))]));
        c.revert_storage();
        assert_eq!(c.storage, Storage::empty());
    }
}
