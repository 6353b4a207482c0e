//! Keccak-256 over byte strings, interpreted as big-endian `W256`.
//!
//! `Expr::SHA256` exists as an IR node (see `expr::word`) but, like all other
//! hash/arithmetic constructors besides `Keccak` over a concrete buffer, its
//! reduction is the simplifier's job (out of scope here); only `keccak'` is
//! needed by the core's own smart constructor.

use crate::numeric::{word256, W256};
use sha3::{Digest, Keccak256};

/// `keccak'(bs)`: the first 32 bytes of Keccak-256 over `bs`, interpreted
/// big-endian. Keccak-256 already produces a 32-byte digest, so "first 32
/// bytes" is the whole thing.
pub fn keccak_prime(bytes: &[u8]) -> W256 {
    let digest = Keccak256::digest(bytes);
    word256(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_empty_vector() {
        let got = keccak_prime(b"");
        let expected = word256(
            &hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470").unwrap(),
        );
        assert_eq!(got, expected);
    }

    #[test]
    fn keccak_matches_selector_helper() {
        use crate::numeric::FunctionSelector;
        let sel = FunctionSelector::abi_keccak(b"transfer(address,uint256)");
        let full = keccak_prime(b"transfer(address,uint256)");
        let full_bytes = crate::numeric::word256_bytes(full);
        assert_eq!(&full_bytes[..4], &sel.0.to_be_bytes());
    }
}
