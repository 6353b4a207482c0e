//! The effect protocol: suspensions a running frame may emit when it needs
//! information from outside the VM (fetching chain state, consulting an SMT
//! solver, running FFI, or picking a branch side).
//!
//! Continuations are represented as a bounded enum of resume tokens rather
//! than closures: Rust has no first-class heap closure over mutable
//! borrowed VM state without either `Box<dyn FnOnce>` boxing or unsafe
//! aliasing tricks, and a resume token is both cheaper and lets an
//! orchestrator serialize/log/replay a suspension trivially.

use crate::error::EvmError;
use crate::expr::{Buf, EAddr, EWord};
use crate::numeric::{Addr, W256};
use crate::prop::Prop;

/// How execution should continue once an effect is answered by the
/// orchestrator driving the VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectResume {
    /// Resume after a `PleaseFetchContract`/`PleaseFetchSlot` answer by
    /// re-entering the instruction at `pc` in `contract`.
    ReenterAt { contract: EAddr, pc: i32 },
    /// Resume a solver query: `Case(true/false)` pushes a constraint and
    /// continues down one side; `Unknown` requires a further
    /// `PleaseChoosePath`.
    Branch { pc: i32 },
}

/// An answer to an `Effect`, fed back into the VM to produce its next
/// state. `Unknown` covers an SMT timeout or inconclusive result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectAnswer {
    Case(bool),
    Unknown,
    FetchedContract { balance: W256, nonce: u64, code: Vec<u8> },
    FetchedSlot(W256),
    FFIOutput(Vec<u8>),
}

/// A suspension emitted by the VM when it cannot proceed without external
/// input. Each variant carries everything the orchestrator needs to answer
/// it plus the token it should hand back on resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Need a contract's bytecode/balance/nonce fetched (e.g. from a chain
    /// RPC endpoint). `base_state` distinguishes "assume empty" from
    /// "assume pre-populated" worlds for addresses never written.
    PleaseFetchContract {
        addr: Addr,
        base_state: BaseState,
        resume: EffectResume,
    },
    /// Need a single storage slot fetched for `addr`.
    PleaseFetchSlot {
        addr: Addr,
        slot: W256,
        resume: EffectResume,
    },
    /// Ask whether `cond` is forced true/false under path constraints `cs`.
    PleaseAskSMT {
        cond: Box<EWord>,
        constraints: Vec<Prop>,
        resume: EffectResume,
    },
    /// Invoke an external command and feed back its stdout, gated by
    /// `RuntimeConfig::allow_ffi`.
    PleaseDoFFI {
        argv: Vec<String>,
        resume: EffectResume,
    },
    /// Symbolic-only: the solver could not decide `cond`, so a human/driver
    /// picks a side explicitly.
    PleaseChoosePath {
        cond: Box<EWord>,
        resume: EffectResume,
    },
}

/// What an account looks like before it has actually been fetched: either
/// entirely absent, or assumed to have zeroed balance/nonce/code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseState {
    Empty,
    AllOrZero,
}

/// The outcome of running a VM step to completion (or to a suspension
/// point). `Unfinished` is symbolic-only — concrete execution always either
/// fails, succeeds, or emits an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VMResult {
    Unfinished(crate::error::PartialExec),
    VMFailure(EvmError),
    VMSuccess(Buf),
    HandleEffect(Effect),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_carries_its_own_resume_token() {
        let e = Effect::PleaseFetchSlot {
            addr: Addr::ZERO,
            slot: W256::ZERO,
            resume: EffectResume::ReenterAt {
                contract: EAddr::LitAddr(Addr::ZERO),
                pc: 10,
            },
        };
        match e {
            Effect::PleaseFetchSlot { resume, .. } => {
                assert_eq!(
                    resume,
                    EffectResume::ReenterAt {
                        contract: EAddr::LitAddr(Addr::ZERO),
                        pc: 10
                    }
                );
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn vmresult_variants_are_distinguishable() {
        let a = VMResult::VMSuccess(Buf::ConcreteBuf(vec![]));
        let b = VMResult::VMFailure(EvmError::StackUnderrun);
        assert_ne!(a, b);
    }
}
