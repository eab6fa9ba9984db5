//! Module for implementations using [`::p384`], the pure Rust NIST P-384
//! implementation from the RustCrypto project.
use p384::elliptic_curve::bigint::U384;
use p384::elliptic_curve::ff::{Field, PrimeField};
use p384::elliptic_curve::ops::Reduce;
use p384::{FieldBytes, ProjectivePoint, Scalar};

impl crate::Scalar for Scalar {

    fn zero() -> Self {
        <Scalar as Field>::ZERO
    }

    fn one() -> Self {
        <Scalar as Field>::ONE
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn mul(&self, other: &Self) -> Self {
        self * other
    }

    /// ```
    /// use cksacc::Scalar;
    /// let x = <p384::Scalar as Scalar>::from_bytes_be(&[0x07]);
    /// let i = x.invert().unwrap();
    /// assert_eq!(x.mul(&i), <p384::Scalar as Scalar>::one());
    /// ```
    fn invert(&self) -> Option<Self> {
        <Scalar as Field>::invert(self).into()
    }

    fn from_bytes_be(bytes: &[u8]) -> Self {
        if bytes.len() <= 48 {
            let mut buf = [0u8; 48];
            buf[48 - bytes.len()..].copy_from_slice(bytes);
            <Scalar as Reduce<U384>>::reduce(U384::from_be_slice(&buf))
        } else {
            let radix = Scalar::from(256u64);
            bytes.iter().fold(<Scalar as Field>::ZERO, |acc, byte| {
                acc * radix + Scalar::from(u64::from(*byte))
            })
        }
    }

    fn random<F: FnMut(&mut [u8])>(mut fill_bytes: F) -> Self {
        let mut buf = [0u8; 48];
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

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    /// ```
    /// use cksacc::{Curve, Scalar};
    /// let g = <p384::ProjectivePoint as Curve>::generator();
    /// let two = <p384::Scalar as Scalar>::from_bytes_be(&[0x02]);
    /// assert_eq!(g.mul(&two), g.add(&g));
    /// ```
    fn mul(&self, k: &Scalar) -> Self {
        self * k
    }
}
