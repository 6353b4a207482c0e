//! symbex-evm-core — the symbolic/concrete IR and VM state core of an EVM
//! execution engine: a sort-tagged expression algebra, a path-constraint
//! proposition language, and VM/frame state parametric over a concreteness
//! flavor.
//!
//! The bytecode decoder, opcode interpreter (`exec1`), symbolic simplifier,
//! SMT encoder/solver, RPC fetchers, and CLI are external collaborators —
//! this crate defines the contracts they consume and produce, not their
//! implementations.

pub mod effect;
pub mod error;
pub mod expr;
pub mod gas;
pub mod hash;
pub mod numeric;
pub mod opcode;
pub mod prop;
pub mod trace;
pub mod vm;

pub use error::{EvmError, PartialExec, Result};
pub use expr::{
    Buf, Byte, ContractCode, EAddr, EContract, EWord, GVarId, Log, LogEntry, RuntimeCode,
    SomeExpr, SortTag, Storage,
};
pub use gas::{Concrete, Flavor, GasOps, Schedule, Symbolic};
pub use numeric::{Addr, FunctionSelector, Nibble, W256, W64, Word512};
pub use opcode::{GenericOp, Op};
pub use prop::Prop;
pub use vm::VM;
