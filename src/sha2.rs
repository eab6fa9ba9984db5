//! Module for implementations using [sha2](https://docs.rs/sha2).
use sha2::digest::Digest;

/// An implementation of [`Map`](crate::Map) using SHA-256.
///
/// The 256-bit digest is wide enough for every curve backend shipped with
/// this crate.
#[derive(Clone, Debug)]
pub struct Sha256;

impl crate::Map for Sha256 {
    /// ```
    /// use cksacc::Map;
    /// // Deterministic over its input.
    /// assert_eq!(cksacc::sha2::Sha256::map("abc"), cksacc::sha2::Sha256::map("abc"));
    /// assert_eq!(cksacc::sha2::Sha256::map("abc").len(), 32);
    /// ```
    fn map<V: Into<Vec<u8>>>(v: V) -> Vec<u8> {
        ::sha2::Sha256::digest(<V as Into<Vec<u8>>>::into(v).as_slice()).to_vec()
    }
}
