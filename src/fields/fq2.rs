//! BN254 quadratic extension Fq2 = Fq[u]/(u^2 + 1).

use std::ops::{Add, Mul, Neg, Sub};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Field, Fq, impl_assign_ops};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fq2 {
    pub c0: Fq,
    pub c1: Fq,
}

/// u^(q^i) = FROBENIUS_COEFF_C1[i mod 2] * u; the odd power is -1 since
/// q = 3 mod 4.
const FROBENIUS_COEFF_C1: [Fq; 2] = [
    Fq::from_montgomery_limbs([
        0xd35d438dc58f0d9d,
        0x0a78eb28f5c70b3d,
        0x666ea36f7879462c,
        0x0e0a77c19a07df2f,
    ]),
    Fq::from_montgomery_limbs([
        0x68c3488912edefaa,
        0x8d087f6872aabf4f,
        0x51e1a24709081231,
        0x2259d6b14729c0fa,
    ]),
];

impl Fq2 {
    pub const fn new(c0: Fq, c1: Fq) -> Self {
        Self { c0, c1 }
    }

    pub fn from_base(c0: Fq) -> Self {
        Self::new(c0, Fq::ZERO)
    }

    /// Scale by an Fq element.
    pub fn mul_by_fq(&self, s: &Fq) -> Self {
        Self::new(self.c0 * *s, self.c1 * *s)
    }

    /// Multiply by the Fq6 non-residue xi = 9 + u.
    pub fn mul_by_nonresidue(&self) -> Self {
        // (9 + u)(a + bu) = (9a - b) + (a + 9b)u
        let nine_a = self.c0.double().double().double() + self.c0;
        let nine_b = self.c1.double().double().double() + self.c1;
        Self::new(nine_a - self.c1, self.c0 + nine_b)
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// Field norm a^2 + b^2 (u^2 = -1).
    pub fn norm(&self) -> Fq {
        self.c0.square() + self.c1.square()
    }

    /// Square root via the norm: valid because q = 3 mod 4.
    /// `None` when the element is a quadratic non-residue.
    pub fn sqrt(&self) -> Option<Self> {
        if self.c1.is_zero() {
            // Pure-base element: either c0 or -c0 has a base-field root.
            return match self.c0.sqrt() {
                Some(s) => Some(Self::new(s, Fq::ZERO)),
                None => (-self.c0).sqrt().map(|t| Self::new(Fq::ZERO, t)),
            };
        }
        let n = self.norm().sqrt()?;
        let mut delta = (self.c0 + n) * Fq::TWO_INV;
        let c0 = match delta.sqrt() {
            Some(c0) => c0,
            None => {
                delta = (self.c0 - n) * Fq::TWO_INV;
                delta.sqrt()?
            }
        };
        let c1 = self.c1 * c0.double().inverse().expect("c0 nonzero for c1 != 0");
        let cand = Self::new(c0, c1);
        (cand.square() == *self).then_some(cand)
    }

    /// Compression sign bit: lexicographic on (c1, c0) canonical values.
    pub fn lexicographically_largest(&self) -> bool {
        if self.c1.is_zero() {
            self.c0.lexicographically_largest()
        } else {
            self.c1.lexicographically_largest()
        }
    }
}

impl Add for Fq2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl Sub for Fq2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl Neg for Fq2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl Mul for Fq2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // Three-multiplication Karatsuba over u^2 = -1.
        let v0 = self.c0 * rhs.c0;
        let v1 = self.c1 * rhs.c1;
        let c0 = v0 - v1;
        let c1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - v0 - v1;
        Self::new(c0, c1)
    }
}

impl_assign_ops!((), Fq2);

impl Field for Fq2 {
    const ZERO: Self = Self::new(Fq::ZERO, Fq::ZERO);
    const ONE: Self = Self::new(Fq::ONE, Fq::ZERO);

    fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double())
    }

    fn square(&self) -> Self {
        // (a + b)(a - b), 2ab
        let c0 = (self.c0 + self.c1) * (self.c0 - self.c1);
        let c1 = (self.c0 * self.c1).double();
        Self::new(c0, c1)
    }

    /// Inverse through the norm: (a - bu) / (a^2 + b^2).
    fn inverse(&self) -> Option<Self> {
        let ni = self.norm().inverse()?;
        Some(Self::new(self.c0 * ni, -(self.c1 * ni)))
    }

    fn frobenius_map(&self, power: usize) -> Self {
        Self::new(self.c0, self.c1 * FROBENIUS_COEFF_C1[power % 2])
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(Fq::random(rng), Fq::random(rng))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::test_utils::trng;

    #[test]
    fn axioms_and_inverse() {
        let mut rng = trng();
        for _ in 0..30 {
            let a = Fq2::random(&mut rng);
            let b = Fq2::random(&mut rng);
            let c = Fq2::random(&mut rng);
            assert_eq!((a + b) + c, a + (b + c));
            assert_eq!((a * b) * c, a * (b * c));
            assert_eq!(a * (b + c), a * b + a * c);
            assert_eq!(a.square(), a * a);
            assert_eq!(a.double(), a + a);
            if !a.is_zero() {
                assert_eq!(a * a.inverse().unwrap(), Fq2::ONE);
            }
        }
    }

    #[test]
    fn frobenius_is_conjugation() {
        let mut rng = trng();
        for _ in 0..20 {
            let a = Fq2::random(&mut rng);
            assert_eq!(a.frobenius_map(1), a.conjugate());
            assert_eq!(a.frobenius_map(2), a);
            assert_eq!(a.conjugate().conjugate(), a);
        }
    }

    #[test]
    fn nonresidue_multiplication() {
        let xi = Fq2::new(Fq::from_u64(9), Fq::from_u64(1));
        let mut rng = trng();
        for _ in 0..20 {
            let a = Fq2::random(&mut rng);
            assert_eq!(a.mul_by_nonresidue(), a * xi);
        }
    }

    #[test]
    fn sqrt_roundtrip() {
        let mut rng = trng();
        let mut rejected = 0;
        for _ in 0..40 {
            let a = Fq2::random(&mut rng);
            let sq = a.square();
            let root = sq.sqrt().expect("square must have a root");
            assert_eq!(root.square(), sq);
            if a.sqrt().is_none() {
                rejected += 1;
            }
        }
        // Roughly half of random elements are non-residues.
        assert!(rejected > 5);
    }

    #[test]
    fn pure_base_sqrt() {
        // -1 = u^2 has the root u even though -1 is a base-field non-residue.
        let minus_one = Fq2::from_base(-Fq::ONE);
        let root = minus_one.sqrt().unwrap();
        assert_eq!(root.square(), minus_one);
    }
}
