//! Groth16 prover and verifier over the kernel's arithmetic.
//!
//! The key types are the flat-array consumer contract: per-signal sparse QAP
//! columns plus CRS point bases. File parsing lives with the caller; the
//! kernel only ever sees slices.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::curve::g1::G1Affine;
use crate::curve::g2::G2Affine;
use crate::curve::msm::msm;
use crate::fields::{Field, Fr};
use crate::pairing::{pairing_product_is_one, prepare_g1, prepare_g2};
use crate::poly::{Domain, SignalCoeffs, compute_h, linear_combination};

/// Proving key: QAP columns and CRS bases. `a_query`/`b_*_query` cover all
/// signals, `c_query` only the auxiliary (non-public) ones, `h_query` the
/// domain-sized tau-power basis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProvingKey {
    /// Public inputs, excluding the constant-one signal.
    pub num_public: usize,
    pub domain_size: usize,
    pub a_coeffs: Vec<SignalCoeffs>,
    pub b_coeffs: Vec<SignalCoeffs>,
    pub a_query: Vec<G1Affine>,
    pub b_g1_query: Vec<G1Affine>,
    pub b_g2_query: Vec<G2Affine>,
    pub c_query: Vec<G1Affine>,
    pub h_query: Vec<G1Affine>,
    pub alpha_g1: G1Affine,
    pub beta_g1: G1Affine,
    pub beta_g2: G2Affine,
    pub delta_g1: G1Affine,
    pub delta_g2: G2Affine,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyingKey {
    pub alpha_g1: G1Affine,
    pub beta_g2: G2Affine,
    pub gamma_g2: G2Affine,
    pub delta_g2: G2Affine,
    /// Public-input bases: ic[0] is the constant term.
    pub ic: Vec<G1Affine>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub a: G1Affine,
    pub b: G2Affine,
    pub c: G1Affine,
}

/// Proof with explicit blinding scalars; [`prove`] samples them. The
/// witness must start with the constant one.
pub fn prove_with_randomness(pk: &ProvingKey, witness: &[Fr], r: Fr, s: Fr) -> Proof {
    assert_eq!(witness.len(), pk.a_coeffs.len(), "witness/key size mismatch");
    assert_eq!(witness.len(), pk.b_coeffs.len(), "witness/key size mismatch");
    assert_eq!(witness[0], Fr::ONE, "witness must start with the one signal");
    assert_eq!(
        pk.c_query.len(),
        witness.len() - pk.num_public - 1,
        "c_query covers exactly the auxiliary signals"
    );

    let domain = Domain::new(pk.domain_size);
    debug!(
        "prove: {} signals, {} public, domain {}",
        witness.len(),
        pk.num_public,
        pk.domain_size
    );

    // Dense QAP evaluation vectors, then the quotient polynomial.
    let a_values = linear_combination(&domain, &pk.a_coeffs, witness);
    let b_values = linear_combination(&domain, &pk.b_coeffs, witness);
    let h = compute_h(&domain, &a_values, &b_values);

    let pi_a = pk.alpha_g1.to_projective()
        + msm(&pk.a_query, witness)
        + pk.delta_g1.to_projective().mul_scalar(&r);
    let pi_b = pk.beta_g2.to_projective()
        + msm(&pk.b_g2_query, witness)
        + pk.delta_g2.to_projective().mul_scalar(&s);
    let pi_b_g1 = pk.beta_g1.to_projective()
        + msm(&pk.b_g1_query, witness)
        + pk.delta_g1.to_projective().mul_scalar(&s);

    let aux = &witness[pk.num_public + 1..];
    let pi_c = msm(&pk.c_query, aux)
        + msm(&pk.h_query, &h)
        + pi_a.mul_scalar(&s)
        + pi_b_g1.mul_scalar(&r)
        - pk.delta_g1.to_projective().mul_scalar(&(r * s));

    Proof {
        a: pi_a.to_affine(),
        b: pi_b.to_affine(),
        c: pi_c.to_affine(),
    }
}

pub fn prove<R: Rng + ?Sized>(pk: &ProvingKey, witness: &[Fr], rng: &mut R) -> Proof {
    prove_with_randomness(pk, witness, Fr::random(rng), Fr::random(rng))
}

/// The Groth16 check: a public-input multiexp and one batched pairing
/// equation, e(-A, B) · e(alpha, beta) · e(vk_x, gamma) · e(C, delta) = 1.
///
/// Untrusted proof points are validated (curve membership, and the twist
/// subgroup for B) before touching the pairing.
pub fn verify(vk: &VerifyingKey, public_inputs: &[Fr], proof: &Proof) -> bool {
    if public_inputs.len() + 1 != vk.ic.len() {
        return false;
    }
    if !proof.a.is_on_curve() || !proof.b.is_on_curve() || !proof.c.is_on_curve() {
        return false;
    }
    if !proof.b.is_in_correct_subgroup() {
        return false;
    }

    let vk_x = vk.ic[0].to_projective() + msm(&vk.ic[1..], public_inputs);

    pairing_product_is_one(&[
        (prepare_g1(&-proof.a), prepare_g2(&proof.b)),
        (prepare_g1(&vk.alpha_g1), prepare_g2(&vk.beta_g2)),
        (prepare_g1(&vk_x.to_affine()), prepare_g2(&vk.gamma_g2)),
        (prepare_g1(&proof.c), prepare_g2(&vk.delta_g2)),
    ])
}
