//! G2: the sextic D-twist of BN254 over Fq2, y^2 = x^3 + 3/xi.
//!
//! Also home of the twist constants the pairing's Frobenius endomorphism
//! needs (xi^((q-1)/3) and xi^((q-1)/2)).

use super::{Affine, CurveParameters, Projective};
use crate::fields::{Fq, Fq2, fp::FpParameters, fr::FrParameters};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct G2Parameters;

impl CurveParameters for G2Parameters {
    type Base = Fq2;

    const COEFF_A: Fq2 = Fq2::new(Fq::ZERO, Fq::ZERO);
    /// b / xi = 3 / (9 + u).
    const COEFF_B: Fq2 = Fq2::new(
        Fq::from_montgomery_limbs([
            0x3bf938e377b802a8,
            0x020b1b273633535d,
            0x26b7edf049755260,
            0x2514c6324384a86d,
        ]),
        Fq::from_montgomery_limbs([
            0x38e7ecccd1dcff67,
            0x65f0b37d93ce0d3e,
            0xd749d0dd22ac00aa,
            0x0141b9ce4a688d4d,
        ]),
    );
    const GENERATOR_X: Fq2 = Fq2::new(
        Fq::from_montgomery_limbs([
            0x8e83b5d102bc2026,
            0xdceb1935497b0172,
            0xfbb8264797811adf,
            0x19573841af96503b,
        ]),
        Fq::from_montgomery_limbs([
            0xafb4737da84c6140,
            0x6043dd5a5802d8c4,
            0x09e950fc52a02f86,
            0x14fef0833aea7b6b,
        ]),
    );
    const GENERATOR_Y: Fq2 = Fq2::new(
        Fq::from_montgomery_limbs([
            0x619dfa9d886be9f6,
            0xfe7fd297f59e9b78,
            0xff9e1a62231b7dfe,
            0x28fd7eebae9e4206,
        ]),
        Fq::from_montgomery_limbs([
            0x64095b56c71856ee,
            0xdc57f922327d3cbb,
            0x55f935be33351076,
            0x0da4a0e693fd6482,
        ]),
    );
}

/// xi^((q-1)/3): the x-coordinate twist factor of the q-power Frobenius.
pub const TWIST_MUL_BY_Q_X: Fq2 = Fq2::new(
    Fq::from_montgomery_limbs([
        0xb5773b104563ab30,
        0x347f91c8a9aa6454,
        0x7a007127242e0991,
        0x1956bcd8118214ec,
    ]),
    Fq::from_montgomery_limbs([
        0x6e849f1ea0aa4757,
        0xaa1c7b6d89f89141,
        0xb6e713cdfae0ca3a,
        0x26694fbb4e82ebc3,
    ]),
);

/// xi^((q-1)/2): the y-coordinate twist factor of the q-power Frobenius.
pub const TWIST_MUL_BY_Q_Y: Fq2 = Fq2::new(
    Fq::from_montgomery_limbs([
        0xe4bbdd0c2936b629,
        0xbb30f162e133bacb,
        0x31a9d1b6f9645366,
        0x253570bea500f8dd,
    ]),
    Fq::from_montgomery_limbs([
        0xa1d77ce45ffe77c7,
        0x07affd117826d1db,
        0x6d16bd27bb7edc6b,
        0x2c87200285defecc,
    ]),
);

pub type G2Projective = Projective<G2Parameters>;
pub type G2Affine = Affine<G2Parameters>;

impl G2Affine {
    /// Membership in the order-r subgroup. The twist curve has a nontrivial
    /// cofactor, so on-curve alone does not make a pairing-safe point.
    pub fn is_in_correct_subgroup(&self) -> bool {
        self.to_projective()
            .mul_bigint(&FrParameters::MODULUS)
            .is_identity()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::fields::{Field, Fr};
    use crate::test_utils::trng;

    #[test]
    fn generator_on_curve_and_in_subgroup() {
        let g = G2Affine::generator();
        assert!(g.is_on_curve());
        assert!(g.is_in_correct_subgroup());
    }

    #[test]
    fn twist_constants_are_xi_powers() {
        // xi^((q-1)/2) squared = xi^(q-1), and xi^((q-1)/3) cubed likewise.
        let xi = Fq2::new(Fq::from_u64(9), Fq::from_u64(1));
        let xq = xi.frobenius_map(1); // = xi^q since Frobenius is the q-power map
        assert_eq!(TWIST_MUL_BY_Q_Y.square() * xi, xq);
        assert_eq!(
            TWIST_MUL_BY_Q_X.square() * TWIST_MUL_BY_Q_X * xi,
            xq
        );
    }

    #[test]
    fn random_multiples_stay_in_subgroup() {
        let mut rng = trng();
        for _ in 0..5 {
            let p = G2Projective::generator().mul_scalar(&Fr::random(&mut rng));
            let a = p.to_affine();
            assert!(a.is_on_curve());
            assert!(a.is_in_correct_subgroup());
        }
    }
}
