//! `Buf` — the byte-buffer sort. Logically of size 2²⁵⁶: a `ConcreteBuf`
//! reads zero past its backing `Vec`'s length, an `AbstractBuf` reads fully
//! symbolic bytes everywhere.

use super::byte::Byte;
use super::word::EWord;
use super::GVarId;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Buf {
    ConcreteBuf(Vec<u8>),
    AbstractBuf(String),
    /// Common-subexpression placeholder, substituted back in before solving.
    GVar(GVarId),
    /// `WriteWord(offset, value, prev)`.
    WriteWord(Box<EWord>, Box<EWord>, Box<Buf>),
    /// `WriteByte(offset, value, prev)`.
    WriteByte(Box<EWord>, Box<Byte>, Box<Buf>),
    /// `CopySlice(src_offset, dst_offset, size, src, dst)`.
    CopySlice(Box<EWord>, Box<EWord>, Box<EWord>, Box<Buf>, Box<Buf>),
}

impl Buf {
    /// Read a byte out of a `ConcreteBuf`'s backing storage, or zero past
    /// its end — the semantics `keccak`/length helpers rely on rather than
    /// re-deriving.
    pub fn concrete_byte_at(bytes: &[u8], idx: usize) -> u8 {
        bytes.get(idx).copied().unwrap_or(0)
    }
}
