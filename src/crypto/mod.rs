//! Cryptographic utilities for the EduChain simulation.
//!
//! Every digest in the system is a lowercase SHA-256 hex string. Keeping
//! hashes in their hex rendering makes the proof-of-work target ("leading
//! zero hex characters") directly visible wherever a hash is printed.

pub mod pow;

pub use pow::*;

use sha2::{Digest, Sha256};

/// Length of a SHA-256 digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute the SHA-256 digest of `data` as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // NIST test vector for SHA-256("abc")
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_length() {
        assert_eq!(sha256_hex(b"").len(), DIGEST_HEX_LEN);
        assert_eq!(sha256_hex(b"some longer input data").len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_determinism() {
        assert_eq!(sha256_hex(b"educhain"), sha256_hex(b"educhain"));
        assert_ne!(sha256_hex(b"educhain"), sha256_hex(b"educhaim"));
    }
}
