//! Module for implementations using [blake2](https://docs.rs/blake2).
use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;

/// An implementation of [`Map`](crate::Map) using variable-width BLAKE2b,
/// emitting `B` bits.
///
/// `B` should be at least the bit width of the group order of the curve
/// backend in use.
#[derive(Clone, Debug)]
pub struct Blake2b<const B: usize = 256>;

impl<const B: usize> crate::Map for Blake2b<B> {
    /// ```
    /// use cksacc::Map;
    /// assert_eq!(cksacc::blake2::Blake2b::<256>::map("abc").len(), 32);
    /// ```
    fn map<V: Into<Vec<u8>>>(v: V) -> Vec<u8> {
        let mut hasher = Blake2bVar::new((B + 7) / 8).unwrap();
        hasher.update(<V as Into<Vec<u8>>>::into(v).as_slice());
        let mut buf = vec![0u8; (B + 7) / 8];
        hasher.finalize_variable(&mut buf).unwrap();
        buf
    }
}
