//! BN254 scalar field Fr: the G1/G2 subgroup order, and the FFT domain
//! field for QAP polynomial work.
//!
//! r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
//! r - 1 = 2^28 * t with t odd, so radix-2 domains up to 2^28 exist.

use once_cell::sync::Lazy;

use super::Field;
use super::fp::{Fp, FpParameters};

#[derive(Clone, Copy, Debug)]
pub struct FrParameters;

impl FpParameters<4> for FrParameters {
    const MODULUS: [u64; 4] = [
        0x43e1f593f0000001,
        0x2833e84879b97091,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];
    const MODULUS_BITS: u32 = 254;
    const INV: u64 = 0xc2e1f593efffffff;
    const R: [u64; 4] = [
        0xac96341c4ffffffb,
        0x36fc76959f60cd29,
        0x666ea36f7879462e,
        0x0e0a77c19a07df2f,
    ];
    const R2: [u64; 4] = [
        0x1bb8e645ae216da7,
        0x53fe3ab1e35c59e3,
        0x8c49833d53bb8085,
        0x0216d0b17f4e44a5,
    ];
    const MODULUS_MINUS_ONE_DIV_TWO: [u64; 4] = [
        0xa1f0fac9f8000000,
        0x9419f4243cdcb848,
        0xdc2822db40c0ac2e,
        0x183227397098d014,
    ];
    // r = 1 mod 4; no square roots are taken in the scalar field.
    const MODULUS_PLUS_ONE_DIV_FOUR: Option<[u64; 4]> = None;
}

pub type Fr = Fp<FrParameters, 4>;

impl Fr {
    /// Largest supported two-adic domain: 2^28 divides r - 1.
    pub const TWO_ADICITY: u32 = 28;

    /// Multiplicative generator of Fr* (5).
    pub const GENERATOR: Fr = Fr::from_montgomery_limbs([
        0x1b0d0ef99fffffe6,
        0xeaba68a3a32a913f,
        0x47d8eb76d8dd0689,
        0x15d0085520f5bbc3,
    ]);

    /// Generator of the order-2^28 subgroup: GENERATOR^((r-1)/2^28).
    pub const TWO_ADIC_ROOT_OF_UNITY: Fr = Fr::from_montgomery_limbs([
        0x636e735580d13d9c,
        0xa22bf3742445ffd6,
        0x56452ac01eb203d8,
        0x1860ef942963f9e7,
    ]);

    /// A primitive 2^log_n-th root of unity.
    ///
    /// Domains larger than 2^28 are a precondition violation.
    pub fn root_of_unity(log_n: u32) -> Fr {
        assert!(
            log_n <= Self::TWO_ADICITY,
            "no 2^{log_n} root of unity in Fr"
        );
        ROOTS_OF_UNITY[log_n as usize]
    }
}

/// Root ladder: ROOTS[k] has exact order 2^k (built once, shared read-only).
static ROOTS_OF_UNITY: Lazy<[Fr; 29]> = Lazy::new(|| {
    let mut roots = [Fr::ONE; 29];
    roots[Fr::TWO_ADICITY as usize] = Fr::TWO_ADIC_ROOT_OF_UNITY;
    for k in (0..Fr::TWO_ADICITY as usize).rev() {
        roots[k] = roots[k + 1].square();
    }
    roots
});
