//! EVM-level errors and partial-execution markers: the taxonomy of failures
//! a running frame can hit, and the reasons symbolic execution may halt
//! early without reaching a definite end state.

use crate::expr::{Buf, EWord};
use crate::numeric::{Addr, W256};
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EvmError>;

/// A code location: the contract whose code is executing plus the PC within
/// it. Used to key loop-iteration bookkeeping and cached branch decisions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodeLocation {
    pub contract: Addr,
    pub pc: i32,
}

/// Failures that can occur while running EVM bytecode.
#[derive(Debug, Clone, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EvmError {
    #[error("balance too low: have {have:?}, need {need:?}")]
    BalanceTooLow { have: W256, need: W256 },

    #[error("unrecognized opcode: 0x{0:02x}")]
    UnrecognizedOpcode(u8),

    #[error("self destruction")]
    SelfDestruction,

    #[error("stack underrun")]
    StackUnderrun,

    #[error("bad jump destination")]
    BadJumpDestination,

    #[error("execution reverted")]
    Revert(Buf),

    #[error("out of gas: have {have}, need {need}")]
    OutOfGas { have: u64, need: u64 },

    #[error("stack limit exceeded")]
    StackLimitExceeded,

    #[error("illegal overflow")]
    IllegalOverflow,

    #[error("state change attempted in a static call")]
    StateChangeWhileStatic,

    #[error("invalid memory access")]
    InvalidMemoryAccess,

    #[error("call depth limit reached")]
    CallDepthLimitReached,

    #[error("max code size exceeded: limit {limit}, got {got}")]
    MaxCodeSizeExceeded { limit: u64, got: u64 },

    #[error("max init code size exceeded: limit {limit}, got {got}")]
    MaxInitCodeSizeExceeded { limit: u64, got: u64 },

    #[error("invalid format")]
    InvalidFormat,

    #[error("precompile failure")]
    PrecompileFailure,

    #[error("return data out of bounds")]
    ReturnDataOutOfBounds,

    #[error("nonce overflow")]
    NonceOverflow,

    #[error("bad cheat code: selector 0x{0:08x}")]
    BadCheatCode(u32),

    #[error("nonexistent fork: {0}")]
    NonexistentFork(i32),
}

/// Reasons symbolic execution may halt without reaching a definite
/// success/failure end state.
#[derive(Debug, Clone, Error, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PartialExec {
    #[error("unexpected symbolic argument at pc {pc}: {msg}")]
    UnexpectedSymbolicArg {
        pc: i32,
        msg: String,
        args: Vec<EWord>,
    },

    #[error("max iterations reached at pc {pc} in {addr:?}")]
    MaxIterationsReached { pc: i32, addr: Addr },

    #[error("jump into symbolic code at pc {pc}, target {jump_dst}")]
    JumpIntoSymbolicCode { pc: i32, jump_dst: W256 },
}

/// Aborts the process for an internal invariant violation (a sort mismatch,
/// a concrete value left unreduced, or similar) that must never be
/// observable by a caller. These are bugs in this crate or its callers, not
/// recoverable `Result`s.
#[macro_export]
macro_rules! internal_error {
    ($($arg:tt)*) => {{
        let msg = format!($($arg)*);
        tracing::error!(target: "symbex_evm_core::invariant", message = %msg);
        panic!("internal invariant violation: {}", msg);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_carry_their_payload_in_display() {
        let e = EvmError::OutOfGas { have: 10, need: 50 };
        assert_eq!(e.to_string(), "out of gas: have 10, need 50");
    }

    #[test]
    #[should_panic(expected = "internal invariant violation")]
    fn internal_error_panics() {
        internal_error!("sort mismatch: expected {}", "EWord");
    }
}
