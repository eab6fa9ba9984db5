//! Module for implementations using [`::sha3`].
use sha3::digest::{ExtendableOutput, Update, XofReader};

/// An implementation of [`Map`](crate::Map) using the SHAKE128 extendable
/// output function, emitting `B` bits.
///
/// `B` should be at least the bit width of the group order of the curve
/// backend in use.
#[derive(Clone, Debug)]
pub struct Shake128<const B: usize = 256>;

/// An implementation of [`Map`](crate::Map) using the SHAKE256 extendable
/// output function, emitting `B` bits.
#[derive(Clone, Debug)]
pub struct Shake256<const B: usize = 256>;

impl<const B: usize> crate::Map for Shake128<B> {
    fn map<V: Into<Vec<u8>>>(v: V) -> Vec<u8> {
        let mut hasher = ::sha3::Shake128::default();
        hasher.update(<V as Into<Vec<u8>>>::into(v).as_slice());
        let mut reader = hasher.finalize_xof();
        let mut buf = vec![0u8; (B + 7) / 8];
        reader.read(&mut buf);
        buf
    }
}

impl<const B: usize> crate::Map for Shake256<B> {
    /// ```
    /// use cksacc::Map;
    /// assert_eq!(cksacc::sha3::Shake256::<384>::map("abc").len(), 48);
    /// ```
    fn map<V: Into<Vec<u8>>>(v: V) -> Vec<u8> {
        let mut hasher = ::sha3::Shake256::default();
        hasher.update(<V as Into<Vec<u8>>>::into(v).as_slice());
        let mut reader = hasher.finalize_xof();
        let mut buf = vec![0u8; (B + 7) / 8];
        reader.read(&mut buf);
        buf
    }
}
