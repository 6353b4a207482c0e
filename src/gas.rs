//! The gas/cost contract: operations the interpreter uses to charge gas,
//! realized differently for each `Flavor`. Isolating gas behind one trait
//! keeps interpreter logic source-identical across flavors — only the
//! realization of `GasOps` differs.
//!
//! The `Concrete` arm subtracts and errors on underflow, with schedule-driven
//! costs for exponentiation, memory expansion, `SHA3`, logs, and calls. The
//! `Symbolic` arm is entirely no-ops: gas is not tracked while exploring
//! paths symbolically.

use crate::error::{EvmError, Result};
use crate::expr::EWord;
use crate::numeric::W256;

/// Sealed marker trait distinguishing the two VM realizations. Sealed so no
/// downstream crate can add a third flavor the gas/VM machinery doesn't
/// know how to interpret.
pub trait Flavor: private::Sealed + Clone + std::fmt::Debug + 'static {
    /// `u64` for `Concrete`, `()` for `Symbolic`.
    type Gas: Clone + std::fmt::Debug + PartialEq;
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Concrete {}
    impl Sealed for super::Symbolic {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concrete;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbolic;

impl Flavor for Concrete {
    type Gas = u64;
}
impl Flavor for Symbolic {
    type Gas = ();
}

/// An injectable fee table. The *values* a schedule assigns to opcodes are
/// out of scope (an external collaborator's concern); the *slot* the gas
/// contract reads from is not, so the core treats it as an opaque map the
/// caller populates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    costs: std::collections::BTreeMap<String, u64>,
}

impl Schedule {
    pub fn new() -> Self {
        Schedule::default()
    }

    pub fn with_cost(mut self, op: impl Into<String>, cost: u64) -> Self {
        self.costs.insert(op.into(), cost);
        self
    }

    pub fn cost_of(&self, op: &str) -> Option<u64> {
        self.costs.get(op).copied()
    }
}

/// Gas operations polymorphic in `Flavor`.
pub trait GasOps<F: Flavor> {
    fn initial_gas(&self) -> F::Gas;

    /// Subtract `amount` from remaining gas (no-op for `Symbolic`).
    fn burn(&mut self, amount: u64) -> Result<()>;

    /// `50 + 50 * byte_len(exponent)`, the `EXP` cost rule.
    fn burn_exp(&mut self, exponent: W256) -> Result<()> {
        let cost = 50 + 50 * exponent.byte_len() as u64;
        self.burn(cost)
    }

    /// Narrow an `EWord` gas stack argument down to a `u64`, failing if it
    /// is not a concrete literal representable in 64 bits.
    fn gas_try_from(&self, w: &EWord) -> Result<u64>;
}

/// Concrete gas accounting: subtract-and-error-on-underflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteGasOps {
    remaining: u64,
    initial: u64,
}

impl ConcreteGasOps {
    pub fn new(gas_limit: u64) -> Self {
        ConcreteGasOps {
            remaining: gas_limit,
            initial: gas_limit,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn used(&self) -> u64 {
        self.initial - self.remaining
    }
}

impl GasOps<Concrete> for ConcreteGasOps {
    fn initial_gas(&self) -> u64 {
        self.initial
    }

    fn burn(&mut self, amount: u64) -> Result<()> {
        if self.remaining < amount {
            return Err(EvmError::OutOfGas {
                have: self.remaining,
                need: amount,
            });
        }
        self.remaining -= amount;
        Ok(())
    }

    fn gas_try_from(&self, w: &EWord) -> Result<u64> {
        match crate::expr::maybe_lit_word(w) {
            Some(v) => v.try_to_u64().ok_or(EvmError::IllegalOverflow),
            None => Err(EvmError::IllegalOverflow),
        }
    }
}

/// Symbolic gas accounting: every charge is a no-op, since path exploration
/// does not depend on the exact gas value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolicGasOps;

impl GasOps<Symbolic> for SymbolicGasOps {
    fn initial_gas(&self) {}

    fn burn(&mut self, _amount: u64) -> Result<()> {
        Ok(())
    }

    fn gas_try_from(&self, _w: &EWord) -> Result<u64> {
        Ok(0)
    }
}

/// `50 + 50 * byte_len(exponent)`.
pub fn exp_cost(exponent: W256) -> u64 {
    50 + 50 * exponent.byte_len() as u64
}

/// Memory expansion cost for growing from `current_size` to `new_size`
/// bytes, quadratic-memory-cost rule: `words^2/512 + 3*words`.
pub fn memory_expansion_cost(current_size: u64, new_size: u64) -> u64 {
    if new_size <= current_size {
        return 0;
    }
    let words = |n: u64| (n + 31) / 32;
    let cost = |w: u64| w * w / 512 + 3 * w;
    cost(words(new_size)) - cost(words(current_size))
}

/// `SHA3`/`Keccak` cost: a low base plus a per-word charge.
pub fn sha3_cost(data_size: u64) -> u64 {
    30 + 6 * ((data_size + 31) / 32)
}

/// `LOGn` cost: a per-topic base plus a per-byte charge.
pub fn log_cost(topics: u8, data_size: u64) -> Option<u64> {
    let base = match topics {
        0 => 375,
        1 => 750,
        2 => 1125,
        3 => 1500,
        4 => 1875,
        _ => return None,
    };
    Some(base + 8 * data_size)
}

/// Base cost of a `CALL`.
pub const CALL: u64 = 100;
/// Base cost of a `CALLCODE`.
pub const CALLCODE: u64 = 100;

/// `CALL`/`CALLCODE` cost: a base cost plus a surcharge for value transfer.
pub fn call_cost(value: W256, is_call: bool) -> u64 {
    let base = if is_call { CALL } else { CALLCODE };
    if value.is_zero() {
        base
    } else {
        base + 9000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_burn_errors_on_underflow() {
        let mut ops = ConcreteGasOps::new(100);
        assert!(ops.burn(50).is_ok());
        assert_eq!(ops.remaining(), 50);
        let err = ops.burn(200).unwrap_err();
        assert_eq!(err, EvmError::OutOfGas { have: 50, need: 200 });
        assert_eq!(ops.remaining(), 50, "failed burn must not change balance");
    }

    #[test]
    fn symbolic_burn_is_always_ok() {
        let mut ops = SymbolicGasOps;
        assert!(ops.burn(u64::MAX).is_ok());
    }

    #[test]
    fn exp_cost_scales_with_byte_length() {
        assert_eq!(exp_cost(W256::ZERO), 50);
        assert_eq!(exp_cost(W256::from_u64(1)), 100);
        assert_eq!(exp_cost(W256::from_u64(256)), 50 + 50 * 2);
    }

    #[test]
    fn memory_expansion_cost_matches_quadratic_rule() {
        assert_eq!(memory_expansion_cost(100, 50), 0);
        assert_eq!(memory_expansion_cost(0, 32), 3);
        assert_eq!(memory_expansion_cost(0, 64), 6);
    }

    #[test]
    fn log_cost_rejects_invalid_topic_count() {
        assert_eq!(log_cost(0, 0), Some(375));
        assert_eq!(log_cost(5, 0), None);
    }

    #[test]
    fn schedule_is_an_opaque_lookup() {
        let sched = Schedule::new().with_cost("ADD", 3);
        assert_eq!(sched.cost_of("ADD"), Some(3));
        assert_eq!(sched.cost_of("MUL"), None);
    }
}
