//! G1: BN254 over Fq, y^2 = x^3 + 3, generator (1, 2). Cofactor one, so
//! every on-curve point is in the r-torsion subgroup.

use super::{Affine, CurveParameters, Projective};
use crate::fields::Fq;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct G1Parameters;

impl CurveParameters for G1Parameters {
    type Base = Fq;

    const COEFF_A: Fq = Fq::ZERO;
    const COEFF_B: Fq = Fq::COEFF_B;
    // (1, 2) in Montgomery form.
    const GENERATOR_X: Fq = Fq::ONE;
    const GENERATOR_Y: Fq = Fq::from_montgomery_limbs([
        0xa6ba871b8b1e1b3a,
        0x14f1d651eb8e167b,
        0xccdd46def0f28c58,
        0x1c14ef83340fbe5e,
    ]);
}

pub type G1Projective = Projective<G1Parameters>;
pub type G1Affine = Affine<G1Parameters>;
