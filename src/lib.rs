//! Cryptographic arithmetic kernel for a Groth16 prover/verifier over BN254:
//! fixed-width Montgomery field arithmetic, the Fq2/Fq6/Fq12 extension tower,
//! the G1/G2 group law with NAF scalar multiplication and Pippenger MSM, a
//! radix-2 FFT over the scalar field for QAP work, and the optimal-ate
//! pairing.
//!
//! The kernel is single-threaded and side-effect-free: pure functions over
//! fixed-size buffers. The only process-wide state is read-only constants
//! (moduli, generators, Frobenius and root-of-unity tables), safely shared
//! by reference; batch work shards across threads at the caller's level.

pub mod bigint;
pub mod codec;
pub mod curve;
pub mod fields;
pub mod groth16;
pub mod pairing;
pub mod poly;

pub use codec::DecodeError;
pub use curve::g1::{G1Affine, G1Projective};
pub use curve::g2::{G2Affine, G2Projective};
pub use curve::msm::msm;
pub use curve::{Affine, CurveParameters, Projective, batch_to_affine};
pub use fields::{Field, Fq, Fq2, Fq6, Fq12, Fr};
pub use groth16::{Proof, ProvingKey, VerifyingKey, prove, verify};
pub use pairing::{
    G1Prepared, G2Prepared, final_exponentiation, miller_loop, multi_miller_loop, pairing,
    pairing_product_is_one, prepare_g1, prepare_g2,
};
pub use poly::Domain;
