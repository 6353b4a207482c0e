//! `EContract` — the reduced contract-view sort embedded in `End::Success`,
//! plus the bytecode representation it and the full VM-side `Contract`
//! (see `vm::contract`) share.

use super::addr::EAddr;
use super::buf::Buf;
use super::byte::Byte;
use super::storage::Storage;
use super::word::EWord;

/// A contract's code, at varying stages of knowledge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractCode {
    /// Code not yet fetched — only its address is known.
    Unknown(Box<EAddr>),
    /// Constructor code plus an abstract data "section" holding ABI-encoded
    /// constructor arguments, which stays symbolic until deployment runs.
    Init(Vec<u8>, Box<Buf>),
    Runtime(RuntimeCode),
}

/// Deployed runtime code. `Symbolic` exists because compiled code may
/// interleave concrete opcodes with symbolic pushdata (Solidity immutables).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuntimeCode {
    Concrete(Vec<u8>),
    Symbolic(Vec<Byte>),
}

/// The reduced view of a contract embedded in a terminal `End::Success`
/// node — just enough to describe post-state, not the full mutable
/// `vm::contract::Contract` the interpreter threads through execution.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EContract {
    pub code: ContractCode,
    pub storage: Box<Storage>,
    pub transient_storage: Box<Storage>,
    pub balance: Box<EWord>,
    pub nonce: u64,
}
