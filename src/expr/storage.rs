//! `Storage` — the sort of a contract's key/value storage mapping
//! (`W256 -> W256`).

use super::addr::EAddr;
use super::word::EWord;
use super::GVarId;
use crate::numeric::W256;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Storage {
    ConcreteStore(BTreeMap<W256, W256>),
    /// `AbstractStore(addr, logical_id)`: fully symbolic storage for `addr`,
    /// optionally tagged with a logical id distinguishing multiple abstract
    /// stores for the same address across forks.
    AbstractStore(Box<EAddr>, Option<u64>),
    GVar(GVarId),
    /// `SStore(key, val, prev)`.
    SStore(Box<EWord>, Box<EWord>, Box<Storage>),
}

impl Storage {
    pub fn empty() -> Storage {
        Storage::ConcreteStore(BTreeMap::new())
    }
}
