//! `Log` — the sort of a single emitted event log entry. It has exactly one
//! constructor, so it's a struct rather than an enum; `Log` is the sort
//! alias used everywhere else in the crate.

use super::addr::EAddr;
use super::buf::Buf;
use super::word::EWord;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogEntry {
    pub addr: Box<EAddr>,
    pub data: Box<Buf>,
    pub topics: Vec<EWord>,
}

pub type Log = LogEntry;
