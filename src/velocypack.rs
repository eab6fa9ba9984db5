//! Module for implementations using [velocypack](https://docs.rs/velocypack).
use serde::Serialize;

use crate::{Accumulator, Curve, Error, Map, Prover, Witness, WitnessUpdate};

/// Trait for an accumulator that automatically serializes elements into
/// [VelocyPack](https://github.com/arangodb/velocypack) format before
/// mapping them.
pub trait VpackAccumulator<C: Curve> {

    /// Serialize `x` and add it to the accumulator.
    fn ser_add<S: Serialize>(&mut self, x: &S) -> WitnessUpdate<C>;

    /// Serialize `x` and generate a witness to its membership using the
    /// secret.
    fn ser_prove<S: Serialize>(&self, x: &S) -> Result<Witness<C>, Error>;
}

/// Trait for a prover that automatically serializes elements into
/// [VelocyPack](https://github.com/arangodb/velocypack) format before
/// mapping them.
pub trait VpackProver<C: Curve> {

    /// Serialize `x` and generate a witness to its membership without the
    /// secret.
    fn ser_prove<S: Serialize>(&self, x: &S) -> Result<Witness<C>, Error>;
}

impl<C: Curve, M: Map> VpackAccumulator<C> for Accumulator<C, M> {

    /// ```
    /// use cksacc::{Accumulator, sha2::Sha256};
    /// use cksacc::velocypack::VpackAccumulator;
    /// use k256::ProjectivePoint;
    /// use rand::RngCore;
    /// let mut rng = rand::thread_rng();
    /// let mut acc = Accumulator::<ProjectivePoint, Sha256>::with_random_secret(
    ///     |buf| rng.fill_bytes(buf),
    /// );
    /// let member = ("alice", 42u64);
    /// let u = acc.ser_add(&member);
    /// assert!(acc.verify(&u.witness()));
    /// ```
    fn ser_add<S: Serialize>(&mut self, x: &S) -> WitnessUpdate<C> {
        self.add(&velocypack::to_bytes(x).unwrap())
    }

    fn ser_prove<S: Serialize>(&self, x: &S) -> Result<Witness<C>, Error> {
        self.prove(&velocypack::to_bytes(x).unwrap())
    }
}

impl<C: Curve, M: Map> VpackProver<C> for Prover<C, M> {

    /// ```
    /// use cksacc::{Accumulator, Prover, sha2::Sha256};
    /// use cksacc::velocypack::{VpackAccumulator, VpackProver};
    /// use k256::ProjectivePoint;
    /// use rand::RngCore;
    /// let mut rng = rand::thread_rng();
    /// let mut acc = Accumulator::<ProjectivePoint, Sha256>::with_random_secret(
    ///     |buf| rng.fill_bytes(buf),
    /// );
    /// let mut prover = Prover::<ProjectivePoint, Sha256>::new();
    /// let member = ("alice", 42u64);
    /// prover.update(acc.ser_add(&member)).unwrap();
    /// let w = prover.ser_prove(&member).unwrap();
    /// assert!(acc.verify(&w));
    /// ```
    fn ser_prove<S: Serialize>(&self, x: &S) -> Result<Witness<C>, Error> {
        self.prove(&velocypack::to_bytes(x).unwrap())
    }
}
