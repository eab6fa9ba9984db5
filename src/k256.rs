//! Module for implementations using [`::k256`], the pure Rust secp256k1
//! implementation from the RustCrypto project.
use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::ff::{Field, PrimeField};
use k256::elliptic_curve::ops::Reduce;
use k256::{FieldBytes, ProjectivePoint, Scalar};

impl crate::Scalar for Scalar {

    fn zero() -> Self {
        <Scalar as Field>::ZERO
    }

    fn one() -> Self {
        <Scalar as Field>::ONE
    }

    /// ```
    /// use cksacc::Scalar;
    /// let x = <k256::Scalar as Scalar>::from_bytes_be(&[0x02]);
    /// let y = <k256::Scalar as Scalar>::from_bytes_be(&[0x03]);
    /// assert_eq!(x.add(&y), <k256::Scalar as Scalar>::from_bytes_be(&[0x05]));
    /// ```
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    /// ```
    /// use cksacc::Scalar;
    /// let x = <k256::Scalar as Scalar>::from_bytes_be(&[0x05]);
    /// let y = <k256::Scalar as Scalar>::from_bytes_be(&[0x03]);
    /// assert_eq!(x.sub(&y), <k256::Scalar as Scalar>::from_bytes_be(&[0x02]));
    /// ```
    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    /// ```
    /// use cksacc::Scalar;
    /// let x = <k256::Scalar as Scalar>::from_bytes_be(&[0x02]);
    /// let y = <k256::Scalar as Scalar>::from_bytes_be(&[0x03]);
    /// assert_eq!(x.mul(&y), <k256::Scalar as Scalar>::from_bytes_be(&[0x06]));
    /// ```
    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    /// ```
    /// use cksacc::Scalar;
    /// let x = <k256::Scalar as Scalar>::from_bytes_be(&[0x07]);
    /// let i = x.invert().unwrap();
    /// assert_eq!(x.mul(&i), <k256::Scalar as Scalar>::one());
    /// assert!(bool::from(<k256::Scalar as Scalar>::zero().invert().is_none()));
    /// ```
    fn invert(&self) -> Option<Self> {
        <Scalar as Field>::invert(self).into()
    }

    /// ```
    /// use cksacc::Scalar;
    /// // Leading zero bytes are insignificant, whatever the total width.
    /// let mut long = vec![0u8; 39];
    /// long.push(0x07);
    /// assert_eq!(
    ///     <k256::Scalar as Scalar>::from_bytes_be(long.as_slice()),
    ///     <k256::Scalar as Scalar>::from_bytes_be(&[0x07]),
    /// );
    /// ```
    fn from_bytes_be(bytes: &[u8]) -> Self {
        if bytes.len() <= 32 {
            let mut buf = [0u8; 32];
            buf[32 - bytes.len()..].copy_from_slice(bytes);
            <Scalar as Reduce<U256>>::reduce(U256::from_be_slice(&buf))
        } else {
            let radix = Scalar::from(256u64);
            bytes.iter().fold(<Scalar as Field>::ZERO, |acc, byte| {
                acc * radix + Scalar::from(u64::from(*byte))
            })
        }
    }

    /// ```
    /// use cksacc::Scalar;
    /// use rand::RngCore;
    /// let mut rng = rand::thread_rng();
    /// let x = <k256::Scalar as Scalar>::random(|buf| rng.fill_bytes(buf));
    /// assert_ne!(x, <k256::Scalar as Scalar>::zero());
    /// ```
    fn random<F: FnMut(&mut [u8])>(mut fill_bytes: F) -> Self {
        let mut buf = [0u8; 32];
        loop {
            fill_bytes(&mut buf);
            let repr = FieldBytes::clone_from_slice(&buf);
            if let Some(scalar) = Option::<Scalar>::from(Scalar::from_repr(repr)) {
                if scalar != <Scalar as Field>::ZERO {
                    return scalar;
                }
            }
        }
    }
}

impl crate::Curve for ProjectivePoint {
    type Scalar = Scalar;

    fn identity() -> Self {
        ProjectivePoint::IDENTITY
    }

    fn generator() -> Self {
        ProjectivePoint::GENERATOR
    }

    /// ```
    /// use cksacc::Curve;
    /// let g = <k256::ProjectivePoint as Curve>::generator();
    /// let o = <k256::ProjectivePoint as Curve>::identity();
    /// assert_eq!(g.add(&o), g);
    /// ```
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    /// ```
    /// use cksacc::{Curve, Scalar};
    /// let g = <k256::ProjectivePoint as Curve>::generator();
    /// let two = <k256::Scalar as Scalar>::from_bytes_be(&[0x02]);
    /// assert_eq!(g.mul(&two), g.add(&g));
    /// ```
    fn mul(&self, k: &Scalar) -> Self {
        self * k
    }
}
