//! Optimal-ate pairing over BN254.
//!
//! Stateless phases: prepare G1 (affine), prepare G2 (affine plus one line
//! coefficient triple per ate-loop digit and two Frobenius-twisted closing
//! additions), run the Miller loop, then the final exponentiation. Batched
//! products share a single final exponentiation.

pub mod final_exponentiation;

use once_cell::sync::Lazy;

pub use final_exponentiation::final_exponentiation;

use crate::curve::CurveParameters;
use crate::curve::g1::G1Affine;
use crate::curve::g2::{G2Affine, G2Parameters, TWIST_MUL_BY_Q_X, TWIST_MUL_BY_Q_Y};
use crate::curve::scalar_mul::naf;
use crate::fields::{Field, Fq, Fq2, Fq12};

/// The curve parameter z: BN254 is generated by this single value.
pub const CURVE_X: u64 = 4965661367192848881;

/// Ate loop scalar 6z + 2.
const ATE_LOOP: u128 = 6 * CURVE_X as u128 + 2;

/// Signed-digit expansion of 6z + 2 driving the Miller loop, derived once
/// from the scalar with the same NAF encoder the scalar multiplier uses.
static ATE_LOOP_NAF: Lazy<Vec<i8>> = Lazy::new(|| {
    naf(&[ATE_LOOP as u64, (ATE_LOOP >> 64) as u64])
});

/// One line-function step: (c0, c1, c2) scaled by the G1 point during the
/// loop and multiplied into f through the sparse 034 path.
pub type EllCoeff = (Fq2, Fq2, Fq2);

/// A G1 pairing input, fixed to affine form.
#[derive(Clone, Copy, Debug)]
pub struct G1Prepared {
    pub point: G1Affine,
}

impl From<&G1Affine> for G1Prepared {
    fn from(p: &G1Affine) -> Self {
        Self { point: *p }
    }
}

/// A G2 pairing input: every Miller-loop line precomputed.
#[derive(Clone, Debug)]
pub struct G2Prepared {
    pub ell_coeffs: Vec<EllCoeff>,
    pub infinity: bool,
}

/// Homogeneous projective G2 accumulator for the line steps.
struct G2HomProjective {
    x: Fq2,
    y: Fq2,
    z: Fq2,
}

fn doubling_step(r: &mut G2HomProjective) -> EllCoeff {
    let two_inv = Fq::TWO_INV;
    let a = (r.x * r.y).mul_by_fq(&two_inv);
    let b = r.y.square();
    let c = r.z.square();
    let e = <G2Parameters as CurveParameters>::COEFF_B * (c.double() + c);
    let f = e.double() + e;
    let g = (b + f).mul_by_fq(&two_inv);
    let h = (r.y + r.z).square() - (b + c);
    let i = e - b;
    let j = r.x.square();
    let e_square = e.square();
    r.x = a * (b - f);
    r.y = g.square() - (e_square.double() + e_square);
    r.z = b * h;
    (-h, j.double() + j, i)
}

fn addition_step(r: &mut G2HomProjective, q: &(Fq2, Fq2)) -> EllCoeff {
    let (qx, qy) = *q;
    let theta = r.y - qy * r.z;
    let lambda = r.x - qx * r.z;
    let c = theta.square();
    let d = lambda.square();
    let e = lambda * d;
    let f = r.z * c;
    let g = r.x * d;
    let h = e + f - g.double();
    r.x = lambda * h;
    r.y = theta * (g - h) - e * r.y;
    r.z *= e;
    let j = theta * qx - lambda * qy;
    (lambda, -theta, j)
}

/// The q-power Frobenius carried onto the twist: coordinate-wise conjugation
/// scaled by the twist constants.
fn mul_by_char(q: (Fq2, Fq2)) -> (Fq2, Fq2) {
    (
        q.0.frobenius_map(1) * TWIST_MUL_BY_Q_X,
        q.1.frobenius_map(1) * TWIST_MUL_BY_Q_Y,
    )
}

/// Line-step generation for a G2 point: one doubling step per ate digit, an
/// addition step per nonzero digit, then the two twist-trick closing
/// additions with psi(Q) and -psi^2(Q).
pub fn prepare_g2(q: &G2Affine) -> G2Prepared {
    if q.infinity {
        return G2Prepared {
            ell_coeffs: Vec::new(),
            infinity: true,
        };
    }
    let digits = &*ATE_LOOP_NAF;
    let mut ell_coeffs = Vec::with_capacity(digits.len() + digits.len() / 2 + 2);
    let mut r = G2HomProjective {
        x: q.x,
        y: q.y,
        z: Fq2::ONE,
    };
    let point = (q.x, q.y);
    let neg = (q.x, -q.y);

    for &digit in digits[..digits.len() - 1].iter().rev() {
        ell_coeffs.push(doubling_step(&mut r));
        match digit {
            1 => ell_coeffs.push(addition_step(&mut r, &point)),
            -1 => ell_coeffs.push(addition_step(&mut r, &neg)),
            _ => {}
        }
    }

    let q1 = mul_by_char(point);
    let mut q2 = mul_by_char(q1);
    q2.1 = -q2.1;
    ell_coeffs.push(addition_step(&mut r, &q1));
    ell_coeffs.push(addition_step(&mut r, &q2));

    G2Prepared {
        ell_coeffs,
        infinity: false,
    }
}

pub fn prepare_g1(p: &G1Affine) -> G1Prepared {
    G1Prepared::from(p)
}

/// Multiply the line value into f: coefficients scaled by the G1 point's
/// affine coordinates, then one sparse multiplication.
fn ell(f: Fq12, coeffs: &EllCoeff, p: &G1Affine) -> Fq12 {
    let c0 = coeffs.0.mul_by_fq(&p.y);
    let c1 = coeffs.1.mul_by_fq(&p.x);
    f.mul_by_034(&c0, &c1, &coeffs.2)
}

/// Batched Miller loop: squares f once per digit and folds every pair's
/// line(s) in, so k pairings cost one shared squaring chain.
///
/// Pairs with an infinite member contribute the neutral factor one.
pub fn multi_miller_loop(pairs: &[(G1Prepared, G2Prepared)]) -> Fq12 {
    let active: Vec<&(G1Prepared, G2Prepared)> = pairs
        .iter()
        .filter(|(p, q)| !p.point.infinity && !q.infinity)
        .collect();

    let digits = &*ATE_LOOP_NAF;
    let mut f = Fq12::ONE;
    let mut idx = 0;

    for i in (1..digits.len()).rev() {
        if i != digits.len() - 1 {
            f = f.square();
        }
        for (p, q) in active.iter().map(|pair| (&pair.0, &pair.1)) {
            f = ell(f, &q.ell_coeffs[idx], &p.point);
        }
        idx += 1;
        if digits[i - 1] != 0 {
            for (p, q) in active.iter().map(|pair| (&pair.0, &pair.1)) {
                f = ell(f, &q.ell_coeffs[idx], &p.point);
            }
            idx += 1;
        }
    }

    // The two closing additions.
    for _ in 0..2 {
        for (p, q) in active.iter().map(|pair| (&pair.0, &pair.1)) {
            f = ell(f, &q.ell_coeffs[idx], &p.point);
        }
        idx += 1;
    }

    f
}

pub fn miller_loop(p: &G1Prepared, q: &G2Prepared) -> Fq12 {
    multi_miller_loop(std::slice::from_ref(&(p.clone(), q.clone())))
}

/// The full pairing e(P, Q).
pub fn pairing(p: &G1Affine, q: &G2Affine) -> Fq12 {
    final_exponentiation(&miller_loop(&prepare_g1(p), &prepare_g2(q)))
}

/// The batched pairing-product check Π e(P_i, Q_i) = 1: k Miller loops, one
/// shared final exponentiation. This is the Groth16 verification shape.
pub fn pairing_product_is_one(pairs: &[(G1Prepared, G2Prepared)]) -> bool {
    final_exponentiation(&multi_miller_loop(pairs)) == Fq12::ONE
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::curve::g1::G1Projective;
    use crate::curve::g2::G2Projective;
    use crate::fields::Fr;
    use crate::test_utils::trng;

    fn e(p: &G1Projective, q: &G2Projective) -> Fq12 {
        pairing(&p.to_affine(), &q.to_affine())
    }

    #[test]
    fn ate_digits_reconstruct_loop_scalar() {
        let digits = &*ATE_LOOP_NAF;
        let mut acc: i128 = 0;
        for &d in digits.iter().rev() {
            acc = acc * 2 + d as i128;
        }
        assert_eq!(acc, ATE_LOOP as i128);
        assert_eq!(*digits.last().unwrap(), 1);
    }

    #[test]
    fn bilinearity() {
        let mut rng = trng();
        let g1 = G1Projective::generator();
        let g2 = G2Projective::generator();
        let base = e(&g1, &g2);
        assert_ne!(base, Fq12::ONE);
        for _ in 0..3 {
            let a = Fr::random(&mut rng);
            let b = Fr::random(&mut rng);
            let lhs = e(&g1.mul_scalar(&a), &g2.mul_scalar(&b));
            let rhs = e(&g1.mul_scalar(&(a * b)), &g2);
            assert_eq!(lhs, rhs);
        }
        // Small-exponent cross-check: e(2P, 3Q) = e(P, Q)^6.
        let lhs = e(
            &g1.mul_scalar(&Fr::from_u64(2)),
            &g2.mul_scalar(&Fr::from_u64(3)),
        );
        assert_eq!(lhs, Field::pow(&base, &[6]));
    }

    #[test]
    fn additivity_in_g2() {
        let mut rng = trng();
        let g1 = G1Projective::generator();
        let q1 = G2Projective::generator().mul_scalar(&Fr::random(&mut rng));
        let q2 = G2Projective::generator().mul_scalar(&Fr::random(&mut rng));
        let lhs = e(&g1, &(q1 + q2));
        let rhs = e(&g1, &q1) * e(&g1, &q2);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn identity_inputs_give_one() {
        let g1 = G1Projective::generator();
        let g2 = G2Projective::generator();
        assert_eq!(e(&G1Projective::identity(), &g2), Fq12::ONE);
        assert_eq!(e(&g1, &G2Projective::identity()), Fq12::ONE);
        assert_eq!(multi_miller_loop(&[]), Fq12::ONE);
    }

    #[test]
    fn batched_product_cancels() {
        // e(aP, Q) * e(-aP, Q) = 1 through the shared final exponentiation.
        let mut rng = trng();
        let a = Fr::random(&mut rng);
        let p = G1Projective::generator().mul_scalar(&a).to_affine();
        let q = G2Projective::generator().to_affine();
        let pairs = vec![
            (prepare_g1(&p), prepare_g2(&q)),
            (prepare_g1(&(-p)), prepare_g2(&q)),
        ];
        assert!(pairing_product_is_one(&pairs));
        // And an unbalanced product is not one.
        let pairs = vec![(prepare_g1(&p), prepare_g2(&q))];
        assert!(!pairing_product_is_one(&pairs));
    }

    #[test]
    fn output_is_in_cyclotomic_subgroup() {
        // Pairing values are r-th roots of the cyclotomic subgroup: the
        // conjugate is the inverse, and the specialized squaring agrees.
        let f = e(&G1Projective::generator(), &G2Projective::generator());
        assert_eq!(f * f.conjugate(), Fq12::ONE);
        assert_eq!(f.cyclotomic_square(), f.square());
    }
}
