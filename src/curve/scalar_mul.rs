//! NAF scalar multiplication.
//!
//! The non-adjacent form halves the expected nonzero-digit density versus
//! plain binary, trading one extra doubling for fewer additions: a net win
//! since addition costs at least a doubling here.

use super::{CurveParameters, Projective};
use crate::fields::Fr;

/// Non-adjacent form of a little-endian limb value: signed digits in
/// {-1, 0, 1}, low digit first, no two adjacent nonzeros, length at most
/// bits + 1.
pub fn naf(limbs: &[u64]) -> Vec<i8> {
    // One spare limb so the +1 carry of a trailing -1 digit cannot overflow.
    let mut k: Vec<u64> = limbs.to_vec();
    k.push(0);
    let mut digits = Vec::with_capacity(limbs.len() * 64 + 1);

    let is_zero = |k: &[u64]| k.iter().all(|&l| l == 0);
    while !is_zero(&k) {
        if k[0] & 1 == 1 {
            // Two consecutive would-be ones emit -1 and push a carry up.
            let digit: i8 = if k[0] & 3 == 3 { -1 } else { 1 };
            digits.push(digit);
            if digit == 1 {
                k[0] &= !1;
            } else {
                // k += 1
                let mut carry = true;
                for l in k.iter_mut() {
                    if !carry {
                        break;
                    }
                    let (v, c) = l.overflowing_add(1);
                    *l = v;
                    carry = c;
                }
            }
        } else {
            digits.push(0);
        }
        // k >>= 1
        for i in 0..k.len() - 1 {
            k[i] = (k[i] >> 1) | (k[i + 1] << 63);
        }
        let last = k.len() - 1;
        k[last] >>= 1;
    }
    digits
}

impl<C: CurveParameters> Projective<C> {
    /// Multiply by a little-endian limb scalar: NAF encode, then
    /// most-significant-digit-first double-and-add/subtract.
    pub fn mul_bigint(&self, scalar: &[u64]) -> Self {
        let digits = naf(scalar);
        let base = self.to_affine();
        let neg_base = -base;
        let mut acc = Self::identity();
        for &digit in digits.iter().rev() {
            acc = acc.double();
            match digit {
                1 => acc = acc.add_mixed(&base),
                -1 => acc = acc.add_mixed(&neg_base),
                _ => {}
            }
        }
        acc
    }

    /// Multiply by a scalar-field element (canonical representative).
    pub fn mul_scalar(&self, scalar: &Fr) -> Self {
        self.mul_bigint(&scalar.into_repr())
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use test_log::test;

    use super::super::g1::G1Projective;
    use super::*;
    use crate::fields::Field;
    use crate::test_utils::trng;

    #[test]
    fn naf_digits_are_nonadjacent_and_exact() {
        let mut rng = trng();
        for _ in 0..50 {
            let v: u64 = rng.random();
            let digits = naf(&[v]);
            assert!(digits.len() <= 65);
            for w in digits.windows(2) {
                assert!(w[0] == 0 || w[1] == 0, "adjacent nonzero digits");
            }
            // Reconstruct the value: sum digit_i * 2^i.
            let mut acc: i128 = 0;
            for &d in digits.iter().rev() {
                acc = acc * 2 + d as i128;
            }
            assert_eq!(acc, v as i128);
        }
        assert!(naf(&[0]).is_empty());
    }

    #[test]
    fn matches_repeated_addition() {
        let g = G1Projective::generator();
        let g_aff = g.to_affine();
        let mut expected = G1Projective::identity();
        for k in 0u64..1000 {
            assert_eq!(g.mul_scalar(&Fr::from_u64(k)), expected, "k = {k}");
            expected = expected.add_mixed(&g_aff);
        }
    }

    #[test]
    fn identity_cases() {
        let g = G1Projective::generator();
        assert!(g.mul_scalar(&Fr::ZERO).is_identity());
        assert_eq!(g.mul_scalar(&Fr::from_u64(1)), g);
        assert!(G1Projective::identity().mul_scalar(&Fr::from_u64(42)).is_identity());
    }

    #[test]
    fn distributes_over_scalar_addition() {
        let mut rng = trng();
        let g = G1Projective::generator();
        for _ in 0..5 {
            let a = Fr::random(&mut rng);
            let b = Fr::random(&mut rng);
            assert_eq!(
                g.mul_scalar(&(a + b)),
                g.mul_scalar(&a) + g.mul_scalar(&b)
            );
        }
    }
}
