//! The sort-tagged expression algebra `Expr<τ>`.
//!
//! Each sort family is its own tagged union rather than one GADT, per the
//! "sort-indexed ADT" design note: `EWord`, `Byte`, `Buf`, `Storage`, `Log`,
//! `EAddr`, `EContract`, `End` are the eight concrete term types, and
//! `SomeExpr` is the heterogeneous wrapper used wherever code must hold "a
//! term of some sort" (map keys, CSE tables, the `PEq` case of `Prop`).

mod addr;
mod buf;
mod byte;
mod contract;
mod end;
mod log;
mod smart;
mod storage;
mod word;

pub use addr::EAddr;
pub use buf::Buf;
pub use byte::Byte;
pub use contract::{ContractCode, EContract, RuntimeCode};
pub use end::End;
pub use log::{Log, LogEntry};
pub use smart::{maybe_concrete_store, maybe_lit_addr, maybe_lit_byte, maybe_lit_word, keccak};
pub use storage::Storage;
pub use word::EWord;

/// Identifier for a common-subexpression-elimination placeholder
/// (`GVar(k)`), shared by the `Buf` and `Storage` sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GVarId(pub u64);

/// Fixed sort codes used to order `SomeExpr` values across sorts.
/// `Buf=1, Storage=2, Log=3, EWord=4, Byte=5`; the remaining sorts
/// (`EAddr`, `EContract`, `End`) share code `6`, with a stable sub-ordering
/// between them so the overall order stays total.
///
/// Declaration order here is the sort code itself (`Buf` first = code 1,
/// ..., `Byte` = code 5); `EAddr`/`EContract`/`End` all fall under the
/// shared code 6 but still need to compare consistently against each other,
/// so they keep a stable relative order after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortTag {
    Buf,
    Storage,
    Log,
    EWord,
    Byte,
    EAddr,
    EContract,
    End,
}

/// A heterogeneous wrapper over a term of any sort. Two `SomeExpr` values
/// compare equal iff their sorts match and their subterms are structurally
/// equal; `Ord` orders first by the fixed sort code, then structurally
/// within a sort, giving a total, deterministic order usable as a map key.
///
/// Declaration order mirrors the fixed sort codes above so that the derived
/// `Ord` (which compares by discriminant first) reproduces them exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SomeExpr {
    Buf(Buf),
    Storage(Storage),
    Log(Log),
    EWord(EWord),
    Byte(Byte),
    EAddr(EAddr),
    EContract(EContract),
    End(End),
}

impl SomeExpr {
    pub fn sort_tag(&self) -> SortTag {
        match self {
            SomeExpr::Buf(_) => SortTag::Buf,
            SomeExpr::Storage(_) => SortTag::Storage,
            SomeExpr::Log(_) => SortTag::Log,
            SomeExpr::EWord(_) => SortTag::EWord,
            SomeExpr::Byte(_) => SortTag::Byte,
            SomeExpr::EAddr(_) => SortTag::EAddr,
            SomeExpr::EContract(_) => SortTag::EContract,
            SomeExpr::End(_) => SortTag::End,
        }
    }
}
