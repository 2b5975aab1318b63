//! BN254 base field Fq.
//!
//! q = 21888242871839275222246405745257275088696311157297823662689037894645226208583

use super::fp::{Fp, FpParameters};

#[derive(Clone, Copy, Debug)]
pub struct FqParameters;

impl FpParameters<4> for FqParameters {
    const MODULUS: [u64; 4] = [
        0x3c208c16d87cfd47,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];
    const MODULUS_BITS: u32 = 254;
    const INV: u64 = 0x87d20782e4866389;
    const R: [u64; 4] = [
        0xd35d438dc58f0d9d,
        0x0a78eb28f5c70b3d,
        0x666ea36f7879462c,
        0x0e0a77c19a07df2f,
    ];
    const R2: [u64; 4] = [
        0xf32cfc5b538afa89,
        0xb5e71911d44501fb,
        0x47ab1eff0a417ff6,
        0x06d89f71cab8351f,
    ];
    const MODULUS_MINUS_ONE_DIV_TWO: [u64; 4] = [
        0x9e10460b6c3e7ea3,
        0xcbc0b548b438e546,
        0xdc2822db40c0ac2e,
        0x183227397098d014,
    ];
    // q = 3 mod 4, so x^((q+1)/4) is the square-root candidate.
    const MODULUS_PLUS_ONE_DIV_FOUR: Option<[u64; 4]> = Some([
        0x4f082305b61f3f52,
        0x65e05aa45a1c72a3,
        0x6e14116da0605617,
        0x0c19139cb84c680a,
    ]);
}

pub type Fq = Fp<FqParameters, 4>;

impl Fq {
    /// 1/2, used by the pairing line steps.
    pub const TWO_INV: Fq = Fq::from_montgomery_limbs([
        0x87bee7d24f060572,
        0xd0fd2add2f1c6ae5,
        0x8f5f7492fcfd4f44,
        0x1f37631a3d9cbfac,
    ]);

    /// Short-Weierstrass b for G1: y^2 = x^3 + 3.
    pub const COEFF_B: Fq = Fq::from_montgomery_limbs([
        0x7a17caa950ad28d7,
        0x1f6ac17ae15521b9,
        0x334bea4e696bd284,
        0x2a1f6744ce179d8e,
    ]);
}
