//! Scenario tests driving an accumulator and a prover against each other
//! over secp256k1 with SHA-256 mapping, using a fixed secret so expected
//! states can be computed independently.
use k256::ProjectivePoint;
use rand::RngCore;

use crate::sha2::Sha256;
use crate::{Accumulator, Curve, Error, Map, Prover, Scalar};

type Fr = k256::Scalar;
type Acc = Accumulator<ProjectivePoint, Sha256>;
type Prv = Prover<ProjectivePoint, Sha256>;

const SECRET: [u8; 32] = [
    0x15, 0x4d, 0x39, 0x65, 0x05, 0xca, 0x22, 0xe6,
    0x5c, 0x0c, 0x5e, 0x05, 0x58, 0x53, 0x71, 0x5e,
    0x34, 0x97, 0x1e, 0xdc, 0x27, 0x01, 0x86, 0x57,
    0xaf, 0xe2, 0x81, 0x7e, 0x2d, 0xe4, 0x1b, 0x68,
];

fn secret() -> Fr {
    <Fr as Scalar>::from_bytes_be(&SECRET)
}

fn accumulator() -> Acc {
    Accumulator::with_secret(secret()).unwrap()
}

fn map_element(element: &str) -> Fr {
    <Fr as Scalar>::from_bytes_be(Sha256::map(element).as_slice())
}

fn generator() -> ProjectivePoint {
    <ProjectivePoint as Curve>::generator()
}

fn identity() -> ProjectivePoint {
    <ProjectivePoint as Curve>::identity()
}

/// The commitment over a member set, computed independently of the
/// accumulator.
fn expected_value(members: &[&str]) -> ProjectivePoint {
    let c = secret();
    let product = members.iter().copied().fold(<Fr as Scalar>::one(), |acc, element| {
        acc.mul(&map_element(element).add(&c))
    });
    generator().mul(&product)
}

#[test]
fn first_addition() {
    let mut acc = accumulator();
    let u_a = acc.add(&"a");
    assert!(acc.verify(&u_a.witness()));
    assert_eq!(acc.i, Some(0));
    assert_eq!(acc.z, expected_value(&["a"]));
    // The stored power starts at g and the emitted entry is one power up,
    // landing at index 1 of the prover's sequence.
    assert_eq!(acc.q, generator());
    assert_eq!(u_a.q, generator().mul(&secret()));
    assert_eq!(u_a.v, generator());
    assert_eq!(u_a.w, generator().mul(&secret()));
    assert_eq!(u_a.i, Some(0));
}

#[test]
fn additions_invalidate_prior_witnesses() {
    let mut acc = accumulator();
    let u_a = acc.add(&"a");
    let u_b = acc.add(&"b");
    let u_c = acc.add(&"c");
    assert_eq!(acc.i, Some(2));
    assert_eq!(acc.z, expected_value(&["a", "b", "c"]));
    assert!(!acc.verify(&u_a.witness()));
    assert!(!acc.verify(&u_b.witness()));
    assert!(acc.verify(&u_c.witness()));
}

#[test]
fn commitment_tracks_set_through_churn() {
    let mut acc = accumulator();
    acc.add(&"a");
    let u_b = acc.add(&"b");
    acc.add(&"c");
    acc.del(&acc.prove(&"b").unwrap()).unwrap();
    assert_eq!(acc.z, expected_value(&["a", "c"]));
    acc.add(&"d");
    assert_eq!(acc.z, expected_value(&["a", "c", "d"]));
    // The witness issued for "b" refers to a long-gone state by now.
    assert!(!acc.verify(&u_b.witness()));
}

#[test]
fn prover_replays_and_proves() {
    let mut acc = accumulator();
    let mut prover = Prv::new();
    prover.update(acc.add(&"a")).unwrap();
    prover.update(acc.add(&"b")).unwrap();
    prover.update(acc.add(&"c")).unwrap();
    for element in ["a", "b", "c"] {
        let witness = prover.prove(&element).unwrap();
        assert!(acc.verify(&witness));
        assert!(prover.verify(&witness));
    }
}

#[test]
fn prover_state_mirrors_accumulator() {
    let mut acc = accumulator();
    let mut prover = Prv::new();
    prover.update(acc.add(&"a")).unwrap();
    prover.update(acc.add(&"b")).unwrap();
    prover.update(acc.add(&"c")).unwrap();
    assert_eq!(prover.i, acc.i);
    assert_eq!(prover.z, Some(acc.get_value()));
    assert_eq!(prover.members.len(), 3);
    // The power sequence holds g·c^j for every index received so far.
    assert_eq!(prover.q.len(), 4);
    let c = secret();
    let mut power = <Fr as Scalar>::one();
    for entry in prover.q.iter() {
        assert_eq!(*entry, generator().mul(&power));
        power = power.mul(&c);
    }
}

#[test]
fn deletions_drain_to_empty() {
    let mut acc = accumulator();
    let mut prover = Prv::new();
    let u_a = acc.add(&"a");
    let u_b = acc.add(&"b");
    let u_c = acc.add(&"c");
    prover.update(&u_a).unwrap();
    prover.update(&u_b).unwrap();
    prover.update(&u_c).unwrap();
    prover.update(acc.del(&u_c.witness()).unwrap()).unwrap();
    prover.update(acc.del(&u_b.witness()).unwrap()).unwrap();
    prover.update(acc.del(&u_a.witness()).unwrap()).unwrap();
    assert_eq!(acc.i, None);
    assert_eq!(acc.q, identity());
    assert_eq!(acc.z, generator());
    assert!(prover.members.is_empty());
    assert_eq!(prover.i, None);
    assert_eq!(prover.z, Some(generator()));
    for update in [&u_a, &u_b, &u_c] {
        assert!(!acc.verify(&update.witness()));
    }
}

#[test]
fn stale_prover_witness_fails_after_deletion() {
    let mut acc = accumulator();
    let mut prover = Prv::new();
    prover.update(acc.add(&"a")).unwrap();
    prover.update(acc.add(&"b")).unwrap();
    let u_c = acc.add(&"c");
    prover.update(&u_c).unwrap();
    // The deletion is never routed to the prover, so it still believes "c"
    // is accumulated and produces a witness for the old state.
    acc.del(&u_c.witness()).unwrap();
    let witness = prover.prove(&"c").unwrap();
    assert!(!acc.verify(&witness));
}

#[test]
fn addition_then_deletion_restores_state() {
    let mut acc = accumulator();
    acc.add(&"a");
    acc.add(&"b");
    let snapshot = (acc.z.clone(), acc.q.clone(), acc.i);
    let u_x = acc.add(&"x");
    acc.del(&u_x.witness()).unwrap();
    assert_eq!((acc.z.clone(), acc.q.clone(), acc.i), snapshot);
}

#[test]
fn verification_has_no_side_effects() {
    let mut acc = accumulator();
    let u_a = acc.add(&"a");
    let snapshot = (acc.z.clone(), acc.q.clone(), acc.i);
    assert!(acc.verify(&u_a.witness()));
    assert!(acc.verify(&u_a.witness()));
    assert_eq!((acc.z.clone(), acc.q.clone(), acc.i), snapshot);
}

#[test]
fn addition_order_is_irrelevant() {
    let mut first = accumulator();
    first.add(&"a");
    first.add(&"b");
    let mut second = accumulator();
    second.add(&"b");
    second.add(&"a");
    assert_eq!(first.z, second.z);
    assert_eq!(first.q, second.q);
    assert_eq!(first.i, second.i);
}

#[test]
fn witnesses_do_not_transfer_between_secrets() {
    let mut acc = accumulator();
    let mut prover = Prv::new();
    prover.update(acc.add(&"a")).unwrap();
    let u_b = acc.add(&"b");
    prover.update(&u_b).unwrap();
    // A second authority accumulates the same elements under its own
    // secret; witnesses minted for the first do not carry over.
    let mut rng = rand::thread_rng();
    let mut other = Acc::with_random_secret(|buf| rng.fill_bytes(buf));
    other.add(&"a");
    other.add(&"b");
    assert!(!other.verify(&u_b.witness()));
    assert!(!other.verify(&prover.prove(&"a").unwrap()));
}

#[test]
fn trusted_and_untrusted_witnesses_satisfy_their_forms() {
    let mut acc = accumulator();
    let mut prover = Prv::new();
    prover.update(acc.add(&"a")).unwrap();
    prover.update(acc.add(&"b")).unwrap();
    // The trusted witness satisfies the multiplicative form only; its w
    // component is built from the element inverse, not the secret.
    let trusted = acc.prove(&"a").unwrap();
    assert!(acc.verify(&trusted));
    assert!(!prover.verify(&trusted));
    // The untrusted witness satisfies both forms.
    let untrusted = prover.prove(&"a").unwrap();
    assert!(acc.verify(&untrusted));
    assert!(prover.verify(&untrusted));
}

#[test]
fn duplicate_additions_accumulate_multiplicity() {
    let mut acc = accumulator();
    let mut prover = Prv::new();
    prover.update(acc.add(&"a")).unwrap();
    let second = acc.add(&"a");
    prover.update(&second).unwrap();
    assert_eq!(acc.z, expected_value(&["a", "a"]));
    // Deleting removes one occurrence; the element remains provable.
    prover.update(acc.del(&second.witness()).unwrap()).unwrap();
    assert_eq!(acc.z, expected_value(&["a"]));
    let witness = prover.prove(&"a").unwrap();
    assert!(acc.verify(&witness));
    assert!(prover.verify(&witness));
}

#[test]
fn prover_rejects_unknown_elements() {
    let mut acc = accumulator();
    let mut prover = Prv::new();
    assert_eq!(prover.prove(&"a").unwrap_err(), Error::UnknownElement);
    let u_a = acc.add(&"a");
    prover.update(&u_a).unwrap();
    assert_eq!(prover.prove(&"b").unwrap_err(), Error::UnknownElement);
    // A deletion for an element never observed is rejected as well.
    let mut bogus = acc.del(&u_a.witness()).unwrap();
    bogus.element = b"b".to_vec();
    assert_eq!(prover.update(&bogus).unwrap_err(), Error::UnknownElement);
}

#[test]
fn deletion_requires_a_current_witness() {
    let mut acc = accumulator();
    let u_a = acc.add(&"a");
    acc.add(&"b");
    let before = (acc.z.clone(), acc.q.clone(), acc.i);
    assert_eq!(acc.del(&u_a.witness()).unwrap_err(), Error::NotAMember);
    assert_eq!((acc.z.clone(), acc.q.clone(), acc.i), before);
}

#[test]
fn zero_secret_is_rejected() {
    assert_eq!(
        Acc::with_secret(<Fr as Scalar>::zero()).unwrap_err(),
        Error::InvalidSecret,
    );
}

#[test]
fn prover_verifies_nothing_before_updates() {
    let mut acc = accumulator();
    let prover = Prv::default();
    let u_a = acc.add(&"a");
    assert!(!prover.verify(&u_a.witness()));
}

#[test]
fn debug_output_redacts_the_secret() {
    let acc = accumulator();
    let rendered = format!("{:?}", acc);
    assert!(rendered.contains("<secret>"));
    assert!(!rendered.contains("154d3965"));
}
