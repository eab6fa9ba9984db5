//! This is a Rust implementation of a dynamic accumulator over a prime-order
//! elliptic curve group, as described in [An Accumulator Based on Bilinear
//! Maps and Efficient Revocation for Anonymous Credentials][1].
//!
//! An accumulation is a fixed size digest that, along with a witness of an
//! element's addition, can be used to prove the element is a member of a set.
//! The drawback to this solution is that any state change to the accumulation
//! invalidates the witnesses of the other elements in the set, requiring
//! computational resources to recompute them.
//!
//! The benefit of this construction is that witnesses can be recomputed by an
//! untrusted party. The authority holds a secret scalar `c` and publishes one
//! update message per state change; a [`Prover`] that replays those messages
//! learns the running commitment, the accumulated elements and the public
//! point sequence `Q[j] = g·c^j`, which is all it needs to produce a witness
//! for any current member. The secret never leaves the authority.
//!
//! # Backends
//! This crate is built with a modular curve backend. Curve types must
//! implement the [`Curve`] trait and their scalar field the [`Scalar`] trait.
//!
//! # Optional Features
//! - `k256` (default): Enable this feature to use the [`::k256`] secp256k1
//!   implementation as a curve backend.
//! - `p384`: Enable this feature to use the [`::p384`] NIST P-384
//!   implementation as a curve backend.
//! - `sha2` (default): Enable this feature to map elements with SHA-256.
//! - `sha3`: Enable this feature to map elements with SHAKE128 or SHAKE256.
//! - `blake2`: Enable this feature to map elements with variable-width
//!   BLAKE2b.
//! - `velocypack`: Enable this feature to accumulate any [`::serde`]
//!   serializable value via its [VelocyPack] encoding.
//!
//! [1]: https://eprint.iacr.org/2008/539.pdf
//! [VelocyPack]: https://github.com/arangodb/velocypack
use std::fmt;
use std::marker::PhantomData;

use zeroize::Zeroize;

#[cfg(feature = "blake2")]
pub mod blake2;

#[cfg(feature = "k256")]
pub mod k256;

#[cfg(feature = "p384")]
pub mod p384;

#[cfg(feature = "sha2")]
pub mod sha2;

#[cfg(feature = "sha3")]
pub mod sha3;

#[cfg(feature = "velocypack")]
pub mod velocypack;

#[cfg(all(test, feature = "k256", feature = "sha2"))]
mod tests;

/// A trait describing an element of the scalar field `Z_n` of a prime-order
/// group.
pub trait Scalar:
    Clone
    + Sized
    + Send
    + Sync
    + Eq
    + fmt::Debug
    + Zeroize
{
    /// Returns the additive identity.
    fn zero() -> Self;

    /// Returns the multiplicative identity.
    fn one() -> Self;

    /// Returns `self + other (mod n)`.
    fn add(&self, other: &Self) -> Self;

    /// Returns `self - other (mod n)`.
    fn sub(&self, other: &Self) -> Self;

    /// Returns `self * other (mod n)`.
    fn mul(&self, other: &Self) -> Self;

    /// Returns `self^-1 (mod n)`, or `None` for zero.
    fn invert(&self) -> Option<Self>;

    /// Constructs a scalar from a big-endian byte string, reduced modulo
    /// `n`. Accepts any length; the bytes are read as an unsigned integer.
    fn from_bytes_be(bytes: &[u8]) -> Self;

    /// Constructs a uniformly random nonzero scalar, drawing entropy from
    /// `fill_bytes`.
    fn random<F: FnMut(&mut [u8])>(fill_bytes: F) -> Self;
}

/// A trait describing an element of a prime-order group written additively,
/// with a fixed generator.
///
/// The accumulator never inspects coordinates; any opaque representation
/// with these operations will do. Resistance to scalar-multiplication side
/// channels is a property of the implementing type, not of this crate.
pub trait Curve:
    Clone
    + Sized
    + Send
    + Sync
    + Eq
    + fmt::Debug
{
    /// The scalar field of the group.
    type Scalar: Scalar;

    /// Returns the identity element.
    fn identity() -> Self;

    /// Returns the fixed generator `g`.
    fn generator() -> Self;

    /// Returns `self + other`.
    fn add(&self, other: &Self) -> Self;

    /// Returns `self` scaled by `k`.
    fn mul(&self, k: &Self::Scalar) -> Self;
}

/// A trait describing a method for converting some arbitrary data to a fixed
/// size digest.
///
/// The digest is read as a big-endian integer and reduced modulo the group
/// order, so its width should be at least the width of the order.
pub trait Map {
    fn map<V: Into<Vec<u8>>>(v: V) -> Vec<u8>;
}

/// The ways an accumulator or prover operation can fail.
///
/// Operations are atomic on in-memory state; a returned error implies no
/// state change, except [`Error::InverseOfZero`] which implies the instance
/// invariants no longer hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The supplied secret was zero.
    #[error("accumulator secret must be a nonzero scalar")]
    InvalidSecret,
    /// A witness did not verify against the current accumulation.
    #[error("witness does not match the current accumulation")]
    NotAMember,
    /// A modular inverse of zero was required.
    #[error("attempted modular inverse of zero")]
    InverseOfZero,
    /// The prover has not observed the element's addition.
    #[error("element is not tracked by this prover")]
    UnknownElement,
}

fn map_to_scalar<C: Curve, M: Map>(bytes: &[u8]) -> C::Scalar {
    C::Scalar::from_bytes_be(M::map(bytes).as_slice())
}

/// A witness of an element's membership in an accumulator.
///
/// The pair `(v, w)` satisfies `v·(e + c) = z` and, for witnesses built
/// without the secret, also `v·e + w = z`, where `e` is the element's mapped
/// scalar and `z` the accumulation it was issued against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness<C: Curve> {
    /// The element bytes.
    pub element: Vec<u8>,
    /// The accumulation less the element.
    pub v: C,
    /// The companion point completing the additive verification form.
    pub w: C,
}

/// The public message emitted by [`Accumulator::add`].
///
/// Carries the membership witness for the added element together with the
/// state a [`Prover`] needs to track the accumulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WitnessUpdate<C: Curve> {
    /// The element bytes.
    pub element: Vec<u8>,
    /// The accumulation after the addition.
    pub z: C,
    /// The accumulation before the addition; the witness value for the
    /// element.
    pub v: C,
    /// The pre-addition accumulation scaled by the secret.
    pub w: C,
    /// The next entry of the public power sequence.
    pub q: C,
    /// The cursor after the addition.
    pub i: Option<usize>,
}

impl<C: Curve> WitnessUpdate<C> {
    /// Return the membership witness carried by this update.
    pub fn witness(&self) -> Witness<C> {
        Witness {
            element: self.element.clone(),
            v: self.v.clone(),
            w: self.w.clone(),
        }
    }
}

impl<C: Curve> From<WitnessUpdate<C>> for Witness<C> {
    fn from(u: WitnessUpdate<C>) -> Self {
        Witness {
            element: u.element,
            v: u.v,
            w: u.w,
        }
    }
}

/// The public message emitted by [`Accumulator::del`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update<C: Curve> {
    /// The element bytes.
    pub element: Vec<u8>,
    /// The accumulation after the deletion.
    pub z: C,
    /// The pre-deletion entry of the public power sequence.
    pub q: C,
    /// The cursor after the deletion.
    pub i: Option<usize>,
}

/// Either message a [`Prover`] can consume, in emission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateMessage<C: Curve> {
    /// An element was added to the accumulation.
    Addition(WitnessUpdate<C>),
    /// An element was deleted from the accumulation.
    Deletion(Update<C>),
}

impl<C: Curve> From<WitnessUpdate<C>> for UpdateMessage<C> {
    fn from(u: WitnessUpdate<C>) -> Self {
        UpdateMessage::Addition(u)
    }
}

impl<C: Curve> From<&WitnessUpdate<C>> for UpdateMessage<C> {
    fn from(u: &WitnessUpdate<C>) -> Self {
        UpdateMessage::Addition(u.clone())
    }
}

impl<C: Curve> From<Update<C>> for UpdateMessage<C> {
    fn from(u: Update<C>) -> Self {
        UpdateMessage::Deletion(u)
    }
}

impl<C: Curve> From<&Update<C>> for UpdateMessage<C> {
    fn from(u: &Update<C>) -> Self {
        UpdateMessage::Deletion(u.clone())
    }
}

/// An accumulator.
///
/// Elements may be added and deleted without growing the accumulation; the
/// commitment stays a single group element no matter how many elements are
/// held. The accumulator owns the secret scalar and is the only party able
/// to mutate the set.
#[derive(Clone)]
pub struct Accumulator<C: Curve, M: Map> {
    /// The secret scalar.
    c: C::Scalar,

    /// The current accumulation value.
    z: C,

    /// The generator scaled by the `i`-th power of the secret; identity
    /// while the set is empty.
    q: C,

    /// Zero-based index of the last accumulated element; `None` while the
    /// set is empty.
    i: Option<usize>,

    map: PhantomData<M>,
}

impl<C: Curve, M: Map> Accumulator<C, M> {
    /// Initialize an accumulator from a known secret. Fails if the secret
    /// is zero.
    ///
    /// ```
    /// use cksacc::{Accumulator, Scalar, sha2::Sha256};
    /// use k256::ProjectivePoint;
    /// let c = <k256::Scalar as Scalar>::from_bytes_be(b"not actually a secret");
    /// let acc = Accumulator::<ProjectivePoint, Sha256>::with_secret(c);
    /// assert!(acc.is_ok());
    /// ```
    pub fn with_secret(c: C::Scalar) -> Result<Self, Error> {
        if c == C::Scalar::zero() {
            return Err(Error::InvalidSecret);
        }
        Ok(Accumulator {
            c,
            z: C::generator(),
            q: C::identity(),
            i: None,
            map: PhantomData,
        })
    }

    /// Initialize an accumulator from a randomly generated secret, drawing
    /// entropy from `fill_bytes`.
    ///
    /// ```
    /// use cksacc::{Accumulator, sha2::Sha256};
    /// use k256::ProjectivePoint;
    /// use rand::RngCore;
    /// let mut rng = rand::thread_rng();
    /// let acc = Accumulator::<ProjectivePoint, Sha256>::with_random_secret(
    ///     |buf| rng.fill_bytes(buf),
    /// );
    /// ```
    pub fn with_random_secret<F: FnMut(&mut [u8])>(fill_bytes: F) -> Self {
        Accumulator {
            c: C::Scalar::random(fill_bytes),
            z: C::generator(),
            q: C::identity(),
            i: None,
            map: PhantomData,
        }
    }

    /// Add an element to the accumulator. The returned update carries a
    /// witness to the element's addition and is the message to feed to
    /// provers.
    ///
    /// ```
    /// use cksacc::{Accumulator, sha2::Sha256};
    /// use k256::ProjectivePoint;
    /// use rand::RngCore;
    /// let mut rng = rand::thread_rng();
    /// let mut acc = Accumulator::<ProjectivePoint, Sha256>::with_random_secret(
    ///     |buf| rng.fill_bytes(buf),
    /// );
    /// let u = acc.add(&"abc");
    /// assert!(acc.verify(&u.witness()));
    /// ```
    pub fn add<'a, V>(&mut self, v: &'a V) -> WitnessUpdate<C>
    where V: 'a + Clone, Vec<u8>: From<V> {
        let element: Vec<u8> = v.clone().into();
        let e = map_to_scalar::<C, M>(element.as_slice());
        let witness_v = self.z.clone();
        let witness_w = self.z.mul(&self.c);
        self.z = self.z.mul(&e.add(&self.c));
        self.q = match self.i {
            None => C::generator(),
            Some(_) => self.q.mul(&self.c),
        };
        self.i = Some(self.i.map_or(0, |i| i + 1));
        WitnessUpdate {
            element,
            z: self.z.clone(),
            v: witness_v,
            w: witness_w,
            q: self.q.mul(&self.c),
            i: self.i,
        }
    }

    /// Delete an element from the accumulator. The witness must verify
    /// against the current accumulation or the deletion is rejected with
    /// [`Error::NotAMember`] and no state changes.
    ///
    /// ```
    /// use cksacc::{Accumulator, Error, sha2::Sha256};
    /// use k256::ProjectivePoint;
    /// use rand::RngCore;
    /// let mut rng = rand::thread_rng();
    /// let mut acc = Accumulator::<ProjectivePoint, Sha256>::with_random_secret(
    ///     |buf| rng.fill_bytes(buf),
    /// );
    /// let u = acc.add(&"abc");
    /// assert!(acc.del(&u.witness()).is_ok());
    /// assert!(!acc.verify(&u.witness()));
    /// assert_eq!(acc.del(&u.witness()).unwrap_err(), Error::NotAMember);
    /// ```
    pub fn del(&mut self, witness: &Witness<C>) -> Result<Update<C>, Error> {
        let e = map_to_scalar::<C, M>(witness.element.as_slice());
        if witness.v.mul(&e.add(&self.c)) != self.z {
            return Err(Error::NotAMember);
        }
        let inverse = e.add(&self.c).invert().ok_or(Error::InverseOfZero)?;
        self.z = self.z.mul(&inverse);
        let q_out = self.q.clone();
        match self.i {
            Some(0) | None => {
                self.q = C::identity();
                self.i = None;
            },
            Some(i) => {
                let c_inverse = self.c.invert().ok_or(Error::InverseOfZero)?;
                self.q = self.q.mul(&c_inverse);
                self.i = Some(i - 1);
            },
        }
        Ok(Update {
            element: witness.element.clone(),
            z: self.z.clone(),
            q: q_out,
            i: self.i,
        })
    }

    /// Verify an element is a member of the accumulator, checking the
    /// multiplicative form `v·(e + c) = z` with the secret.
    ///
    /// ```
    /// use cksacc::{Accumulator, sha2::Sha256};
    /// use k256::ProjectivePoint;
    /// use rand::RngCore;
    /// let mut rng = rand::thread_rng();
    /// let mut acc = Accumulator::<ProjectivePoint, Sha256>::with_random_secret(
    ///     |buf| rng.fill_bytes(buf),
    /// );
    /// let u = acc.add(&"abc");
    /// // A state change invalidates previously issued witnesses.
    /// assert!(acc.verify(&u.witness()));
    /// acc.add(&"def");
    /// assert!(!acc.verify(&u.witness()));
    /// ```
    pub fn verify(&self, witness: &Witness<C>) -> bool {
        let e = map_to_scalar::<C, M>(witness.element.as_slice());
        witness.v.mul(&e.add(&self.c)) == self.z
    }

    /// Generate a witness to an element's membership using the secret.
    ///
    /// The element's mapped scalar must be invertible, which fails only with
    /// negligible probability. Membership is not checked; the accumulator
    /// keeps no element set, and proving an element that was never added
    /// yields a witness the untrusted verification form rejects.
    ///
    /// ```
    /// use cksacc::{Accumulator, sha2::Sha256};
    /// use k256::ProjectivePoint;
    /// use rand::RngCore;
    /// let mut rng = rand::thread_rng();
    /// let mut acc = Accumulator::<ProjectivePoint, Sha256>::with_random_secret(
    ///     |buf| rng.fill_bytes(buf),
    /// );
    /// acc.add(&"abc");
    /// let w = acc.prove(&"abc").unwrap();
    /// assert!(acc.verify(&w));
    /// ```
    pub fn prove<'a, V>(&self, v: &'a V) -> Result<Witness<C>, Error>
    where V: 'a + Clone, Vec<u8>: From<V> {
        let element: Vec<u8> = v.clone().into();
        let e = map_to_scalar::<C, M>(element.as_slice());
        let member_inverse = e.add(&self.c).invert().ok_or(Error::InverseOfZero)?;
        let e_inverse = e.invert().ok_or(Error::InverseOfZero)?;
        Ok(Witness {
            element,
            v: self.z.mul(&member_inverse),
            w: self.z.mul(&e_inverse),
        })
    }

    /// Return the current accumulation value.
    pub fn get_value(&self) -> C {
        self.z.clone()
    }
}

impl<C: Curve, M: Map> Drop for Accumulator<C, M> {
    fn drop(&mut self) {
        self.c.zeroize();
    }
}

// The secret must not reach logs; everything else is public knowledge.
impl<C: Curve, M: Map> fmt::Debug for Accumulator<C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accumulator")
            .field("c", &"<secret>")
            .field("z", &self.z)
            .field("q", &self.q)
            .field("i", &self.i)
            .finish()
    }
}

/// An untrusted witness builder.
///
/// A prover replays the update stream of an accumulator and can then produce
/// a membership witness for any currently accumulated element without ever
/// holding the secret. It reconstructs the accumulation `z`, the multiset of
/// accumulated scalars and the power sequence `Q[j] = g·c^j` from the
/// messages alone.
///
/// Witness construction expands the polynomial whose roots are the other
/// accumulated scalars into elementary symmetric polynomials and evaluates
/// it against the power sequence. The work grows quadratically with the
/// number of accumulated elements.
#[derive(Clone, Debug)]
pub struct Prover<C: Curve, M: Map> {
    /// Mapped scalars of the currently accumulated elements.
    members: Vec<C::Scalar>,

    /// The public power sequence; `q[0]` is the generator.
    q: Vec<C>,

    /// Cursor mirroring the accumulator's.
    i: Option<usize>,

    /// The most recent accumulation value, once one has been observed.
    z: Option<C>,

    map: PhantomData<M>,
}

impl<C: Curve, M: Map> Prover<C, M> {
    /// Initialize a prover that has observed no updates yet.
    pub fn new() -> Self {
        Prover {
            members: Vec::new(),
            q: vec![C::generator()],
            i: None,
            z: None,
            map: PhantomData,
        }
    }

    /// Consume one update message. Messages must be consumed in emission
    /// order; a reordered, duplicated or partial stream leaves the prover
    /// out of sync with the accumulator.
    ///
    /// A deletion for an element this prover never observed fails with
    /// [`Error::UnknownElement`].
    ///
    /// ```
    /// use cksacc::{Accumulator, Prover, sha2::Sha256};
    /// use k256::ProjectivePoint;
    /// use rand::RngCore;
    /// let mut rng = rand::thread_rng();
    /// let mut acc = Accumulator::<ProjectivePoint, Sha256>::with_random_secret(
    ///     |buf| rng.fill_bytes(buf),
    /// );
    /// let mut prover = Prover::<ProjectivePoint, Sha256>::new();
    /// prover.update(acc.add(&"abc")).unwrap();
    /// prover.update(acc.add(&"def")).unwrap();
    /// let w = prover.prove(&"abc").unwrap();
    /// assert!(acc.verify(&w));
    /// assert!(prover.verify(&w));
    /// ```
    pub fn update<U>(&mut self, msg: U) -> Result<(), Error>
    where U: Into<UpdateMessage<C>> {
        match msg.into() {
            UpdateMessage::Addition(u) => {
                let e = map_to_scalar::<C, M>(u.element.as_slice());
                self.members.push(e);
                self.install(u.i, u.q);
                self.i = u.i;
                self.z = Some(u.z);
            },
            UpdateMessage::Deletion(u) => {
                let e = map_to_scalar::<C, M>(u.element.as_slice());
                let position = self.members.iter()
                    .position(|member| *member == e)
                    .ok_or(Error::UnknownElement)?;
                self.members.swap_remove(position);
                self.install(u.i, u.q);
                self.i = u.i;
                self.z = Some(u.z);
            },
        }
        Ok(())
    }

    /// Store a received power sequence entry, growing the sequence as
    /// needed.
    fn install(&mut self, i: Option<usize>, q: C) {
        let index = i.map_or(1, |i| i + 1);
        if index >= self.q.len() {
            self.q.resize(index + 1, C::identity());
        }
        self.q[index] = q;
    }

    /// Generate a witness to an element's membership without the secret.
    ///
    /// Fails with [`Error::UnknownElement`] if the element is not currently
    /// accumulated as far as this prover has observed.
    ///
    /// ```
    /// use cksacc::{Accumulator, Error, Prover, sha2::Sha256};
    /// use k256::ProjectivePoint;
    /// use rand::RngCore;
    /// let mut rng = rand::thread_rng();
    /// let mut acc = Accumulator::<ProjectivePoint, Sha256>::with_random_secret(
    ///     |buf| rng.fill_bytes(buf),
    /// );
    /// let mut prover = Prover::<ProjectivePoint, Sha256>::new();
    /// prover.update(acc.add(&"abc")).unwrap();
    /// assert!(acc.verify(&prover.prove(&"abc").unwrap()));
    /// assert_eq!(prover.prove(&"xyz").unwrap_err(), Error::UnknownElement);
    /// ```
    pub fn prove<'a, V>(&self, v: &'a V) -> Result<Witness<C>, Error>
    where V: 'a + Clone, Vec<u8>: From<V> {
        let element: Vec<u8> = v.clone().into();
        let e = map_to_scalar::<C, M>(element.as_slice());
        let i = self.i.ok_or(Error::UnknownElement)?;
        let position = self.members.iter()
            .position(|member| *member == e)
            .ok_or(Error::UnknownElement)?;
        // Elementary symmetric polynomials of the remaining members, built
        // with the recurrence s_j(A ∪ {x}) = s_j(A) + x·s_{j-1}(A).
        let mut sigma = vec![C::Scalar::zero(); i + 1];
        sigma[0] = C::Scalar::one();
        for (index, member) in self.members.iter().enumerate() {
            if index == position {
                continue;
            }
            for j in (1..=i).rev() {
                sigma[j] = sigma[j].add(&member.mul(&sigma[j - 1]));
            }
        }
        // v = sum s_j·Q[i-j]; w shifts the same coefficients one power up,
        // so that w = v·c without ever holding c.
        let mut witness_v = C::identity();
        let mut witness_w = C::identity();
        for (j, coefficient) in sigma.iter().enumerate() {
            witness_v = witness_v.add(&self.q[i - j].mul(coefficient));
            witness_w = witness_w.add(&self.q[i - j + 1].mul(coefficient));
        }
        Ok(Witness {
            element,
            v: witness_v,
            w: witness_w,
        })
    }

    /// Verify an element is a member of the accumulation this prover has
    /// observed, checking the additive form `v·e + w = z`. Returns false
    /// before the first update message.
    pub fn verify(&self, witness: &Witness<C>) -> bool {
        let z = match self.z.as_ref() {
            Some(z) => z,
            None => return false,
        };
        let e = map_to_scalar::<C, M>(witness.element.as_slice());
        witness.v.mul(&e).add(&witness.w) == *z
    }
}

impl<C: Curve, M: Map> Default for Prover<C, M> {
    fn default() -> Self {
        Self::new()
    }
}
