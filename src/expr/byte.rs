//! `Byte` — the single-byte sort.

use super::buf::Buf;
use super::word::EWord;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Byte {
    LitByte(u8),
    /// `IndexWord(i, w)`: the `i`-th byte (big-endian, 0 = most significant)
    /// of word `w`.
    IndexWord(Box<EWord>, Box<EWord>),
    /// `ReadByte(idx, buf)`: the byte at `idx` in `buf`.
    ReadByte(Box<EWord>, Box<Buf>),
}
