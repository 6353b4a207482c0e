//! Environment, block, transaction, and substate records, plus the ambient
//! `RuntimeConfig`/`Schedule` surface. Contracts are keyed by `EAddr`
//! (symbolic-capable) rather than a concrete address, splitting per-call
//! state (`Env`) from per-block state (`Block`).

use std::collections::{BTreeMap, BTreeSet};

use crate::effect::BaseState;
use crate::expr::EAddr;
use crate::gas::Schedule;
use crate::numeric::{Addr, W256};
use crate::vm::contract::Contract;

/// World state plus chain identity and fresh-name counters for symbolic
/// execution (fresh address/gas variables get distinct names).
#[derive(Debug, Clone, PartialEq)]
pub struct Env {
    pub contracts: BTreeMap<EAddr, Contract>,
    pub chain_id: W256,
    pub fresh_addresses: u64,
    pub fresh_gas_vals: u64,
}

impl Env {
    pub fn new(chain_id: W256) -> Self {
        Env {
            contracts: BTreeMap::new(),
            chain_id,
            fresh_addresses: 0,
            fresh_gas_vals: 0,
        }
    }

    /// Allocate and return a fresh symbolic address name, e.g. for the
    /// target of a `CREATE` whose address is not yet concretely known.
    pub fn fresh_address(&mut self) -> EAddr {
        let n = self.fresh_addresses;
        self.fresh_addresses += 1;
        EAddr::SymAddr(format!("freshAddr{n}"))
    }
}

/// Per-block context, carrying an injectable `Schedule` and EIP-3860 size
/// limits.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub coinbase: EAddr,
    pub timestamp: W256,
    pub number: W256,
    pub prev_randao: W256,
    pub gaslimit: u64,
    pub base_fee: W256,
    pub max_code_size: u64,
    pub schedule: Schedule,
}

impl Block {
    pub fn new(schedule: Schedule) -> Self {
        Block {
            coinbase: EAddr::LitAddr(Addr::ZERO),
            timestamp: W256::ZERO,
            number: W256::ZERO,
            prev_randao: W256::ZERO,
            gaslimit: 30_000_000,
            base_fee: W256::ZERO,
            max_code_size: 24576,
            schedule,
        }
    }
}

/// Transaction-scoped state, including the substate accumulator and the
/// reversion snapshot taken at tx start.
#[derive(Debug, Clone, PartialEq)]
pub struct TxState {
    pub gasprice: W256,
    pub gaslimit: u64,
    pub priority_fee: W256,
    pub origin: EAddr,
    pub to_addr: Option<EAddr>,
    pub value: W256,
    pub substate: Substate,
    pub is_create: bool,
    /// Snapshot of every contract touched this tx, restored verbatim if the
    /// whole transaction reverts.
    pub tx_reversion: BTreeMap<EAddr, Contract>,
}

/// Transaction-scoped accumulator of side effects that survive cross-frame
/// boundaries on success and are rolled back on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substate {
    pub selfdestructs: Vec<EAddr>,
    pub touched_accounts: BTreeSet<EAddr>,
    pub accessed_addresses: BTreeSet<EAddr>,
    pub accessed_storage_keys: BTreeSet<(EAddr, W256)>,
    pub refunds: u64,
}

impl Substate {
    pub fn touch(&mut self, addr: EAddr) {
        self.touched_accounts.insert(addr);
    }
}

/// Runtime configuration: injected once, read throughout execution.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub allow_ffi: bool,
    pub override_caller: Option<EAddr>,
    pub reset_caller: bool,
    pub base_state: BaseState,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            allow_ffi: false,
            override_caller: None,
            reset_caller: false,
            base_state: BaseState::Empty,
        }
    }
}

/// A saved fork: its own `Env`/`Block`, selectable via `vm::forks`/`current_fork`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForkState {
    pub env: Env,
    pub block: Block,
}
