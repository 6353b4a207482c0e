//! Smart constructors and total pattern-extraction helpers.
//!
//! Only `keccak` is required to canonicalize eagerly — arithmetic and
//! logical reduction is a downstream simplifier's job, which rebuilds terms
//! from the raw constructors exposed on each sort enum directly. `keccak` is
//! the one place the core itself must fold, since the hash witness value is
//! needed by callers (e.g. deployment address computation) independent of
//! whether a simplifier ever runs.

use super::buf::Buf;
use super::byte::Byte;
use super::storage::Storage;
use super::word::EWord;
use super::EAddr;
use crate::hash::keccak_prime;
use crate::numeric::{Addr, W256};
use std::collections::BTreeMap;

/// `keccak(ConcreteBuf(bs)) = Lit(keccak'(bs))`; otherwise `Keccak(buf)`.
pub fn keccak(buf: Buf) -> EWord {
    match &buf {
        Buf::ConcreteBuf(bs) => EWord::Lit(keccak_prime(bs)),
        _ => EWord::Keccak(Box::new(buf)),
    }
}

/// `maybe_lit_byte(Byte) -> Option<u8>`.
pub fn maybe_lit_byte(b: &Byte) -> Option<u8> {
    match b {
        Byte::LitByte(v) => Some(*v),
        _ => None,
    }
}

/// `maybe_lit_word(EWord) -> Option<W256>`: matches `Lit(w)` directly, and
/// `WAddr(LitAddr(a))` by reading the address as a word.
pub fn maybe_lit_word(w: &EWord) -> Option<W256> {
    match w {
        EWord::Lit(v) => Some(*v),
        EWord::WAddr(addr) => match addr.as_ref() {
            EAddr::LitAddr(a) => Some(addr_to_word(*a)),
            EAddr::SymAddr(_) => None,
        },
        _ => None,
    }
}

fn addr_to_word(a: Addr) -> W256 {
    let mut buf = [0u8; 32];
    buf[12..].copy_from_slice(&crate::numeric::word160_bytes(a));
    crate::numeric::word256(&buf)
}

/// `maybe_lit_addr(EAddr) -> Option<Addr>`.
pub fn maybe_lit_addr(a: &EAddr) -> Option<Addr> {
    match a {
        EAddr::LitAddr(addr) => Some(*addr),
        EAddr::SymAddr(_) => None,
    }
}

/// `maybe_concrete_store(Storage) -> Option<Map<W256,W256>>`.
pub fn maybe_concrete_store(s: &Storage) -> Option<BTreeMap<W256, W256>> {
    match s {
        Storage::ConcreteStore(m) => Some(m.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_reduces_concrete_buf() {
        let got = keccak(Buf::ConcreteBuf(b"abc".to_vec()));
        assert!(matches!(got, EWord::Lit(_)));
    }

    #[test]
    fn keccak_leaves_symbolic_buf_unreduced() {
        let got = keccak(Buf::AbstractBuf("x".into()));
        assert!(matches!(got, EWord::Keccak(_)));
    }

    #[test]
    fn maybe_lit_word_matches_waddr_of_litaddr() {
        let a = Addr::from_slice(&[1u8; 20]);
        let w = EWord::WAddr(Box::new(EAddr::LitAddr(a)));
        assert!(maybe_lit_word(&w).is_some());

        let sym = EWord::WAddr(Box::new(EAddr::SymAddr("x".into())));
        assert!(maybe_lit_word(&sym).is_none());
    }

    #[test]
    fn maybe_lit_helpers_are_total() {
        assert_eq!(maybe_lit_byte(&Byte::LitByte(9)), Some(9));
        assert_eq!(
            maybe_lit_byte(&Byte::IndexWord(
                Box::new(EWord::lit_u64(0)),
                Box::new(EWord::lit_u64(0))
            )),
            None
        );
        assert_eq!(maybe_lit_addr(&EAddr::SymAddr("x".into())), None);
        assert_eq!(maybe_concrete_store(&Storage::AbstractStore(Box::new(EAddr::SymAddr("x".into())), None)), None);
    }
}
