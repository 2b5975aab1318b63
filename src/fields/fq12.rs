//! BN254 sextic-quadratic top level Fq12 = Fq6[w]/(w^2 - v).
//!
//! Pairing values live here. Besides the generic tower arithmetic this level
//! carries the two pairing-specific fast paths: the sparse line-coefficient
//! multiplication and cyclotomic squaring.

use std::ops::{Add, Mul, Neg, Sub};

use rand::Rng;

use super::{Field, Fq, Fq2, Fq6, impl_assign_ops};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Fq12 {
    pub c0: Fq6,
    pub c1: Fq6,
}

/// w^(q^i) = FROBENIUS_COEFF_C1[i mod 12] * w, coefficient xi^((q^i-1)/6).
const FROBENIUS_COEFF_C1: [Fq2; 12] = [
    Fq2::new(
        Fq::from_montgomery_limbs([
            0xd35d438dc58f0d9d,
            0x0a78eb28f5c70b3d,
            0x666ea36f7879462c,
            0x0e0a77c19a07df2f,
        ]),
        Fq::ZERO,
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0xaf9ba69633144907,
            0xca6b1d7387afb78a,
            0x11bded5ef08a2087,
            0x02f34d751a1f3a7c,
        ]),
        Fq::from_montgomery_limbs([
            0xa222ae234c492d72,
            0xd00f02a4565de15b,
            0xdc2ff3a253dfc926,
            0x10a75716b3899551,
        ]),
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0xca8d800500fa1bf2,
            0xf0c5d61468b39769,
            0x0e201271ad0d4418,
            0x04290f65bad856e6,
        ]),
        Fq::ZERO,
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0x365316184e46d97d,
            0x0af7129ed4c96d9f,
            0x659da72fca1009b5,
            0x08116d8983a20d23,
        ]),
        Fq::from_montgomery_limbs([
            0xb1df4af7c39c1939,
            0x3d9f02878a73bf7f,
            0x9b2220928caf0ae0,
            0x26684515eff054a6,
        ]),
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0x3350c88e13e80b9c,
            0x7dce557cdb5e56b9,
            0x6001b4b8b615564a,
            0x2682e617020217e0,
        ]),
        Fq::ZERO,
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0x86b76f821b329076,
            0x408bf52b4d19b614,
            0x53dfb9d0d985e92d,
            0x051e20146982d2a7,
        ]),
        Fq::from_montgomery_limbs([
            0x0fbc9cd47752ebc7,
            0x6d8fffe33415de24,
            0xbef22cf038cf41b9,
            0x15c0edff3c66bf54,
        ]),
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0x68c3488912edefaa,
            0x8d087f6872aabf4f,
            0x51e1a24709081231,
            0x2259d6b14729c0fa,
        ]),
        Fq::ZERO,
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0x8c84e580a568b440,
            0xcd164d1de0c21302,
            0xa692585790f737d5,
            0x2d7100fdc71265ad,
        ]),
        Fq::from_montgomery_limbs([
            0x99fdddf38c33cfd5,
            0xc77267ed1213e931,
            0xdc2052142da18f36,
            0x1fbcf75c2da80ad7,
        ]),
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0x71930c11d782e155,
            0xa6bb947cffbe3323,
            0xaa303344d4741444,
            0x2c3b3f0d26594943,
        ]),
        Fq::ZERO,
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0x05cd75fe8a3623ca,
            0x8c8a57f293a85cee,
            0x52b29e86b7714ea8,
            0x2852e0e95d8f9306,
        ]),
        Fq::from_montgomery_limbs([
            0x8a41411f14e0e40e,
            0x59e26809ddfe0b0d,
            0x1d2e2523f4d24d7d,
            0x09fc095cf1414b83,
        ]),
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0x08cfc388c494f1ab,
            0x19b315148d1373d4,
            0x584e90fdcb6c0213,
            0x09e1685bdf2f8849,
        ]),
        Fq::ZERO,
    ),
    Fq2::new(
        Fq::from_montgomery_limbs([
            0xb5691c94bd4a6cd1,
            0x56f575661b581478,
            0x64708be5a7fb6f30,
            0x2b462e5e77aecd82,
        ]),
        Fq::from_montgomery_limbs([
            0x2c63ef42612a1180,
            0x29f16aae345bec69,
            0xf95e18c648b216a4,
            0x1aa36073a4cae0d4,
        ]),
    ),
];

impl Fq12 {
    pub const fn new(c0: Fq6, c1: Fq6) -> Self {
        Self { c0, c1 }
    }

    /// Unitary inverse: negates the odd half. Equals Frobenius^6, and equals
    /// the true inverse on the unit circle (cyclotomic subgroup).
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// Sparse multiplication by a Miller-loop line value
    /// `d0 + (d3 + d4 v) w`: only three of six Fq2 slots are populated,
    /// which makes this roughly a third of a general multiplication.
    pub fn mul_by_034(&self, d0: &Fq2, d3: &Fq2, d4: &Fq2) -> Self {
        let a = self.c0.mul_by_fq2(d0);
        let b = self.c1.mul_by_01(d3, d4);
        let e = (self.c0 + self.c1).mul_by_01(&(*d0 + *d3), d4);
        let c1 = e - a - b;
        let c0 = a + b.mul_by_nonresidue();
        Self::new(c0, c1)
    }

    /// Granger–Scott squaring, valid only inside the cyclotomic subgroup
    /// (used exclusively by the final exponentiation).
    pub fn cyclotomic_square(&self) -> Self {
        fn fp4_square(a: Fq2, b: Fq2) -> (Fq2, Fq2) {
            let t0 = a.square();
            let t1 = b.square();
            let c0 = t1.mul_by_nonresidue() + t0;
            let c1 = (a + b).square() - t0 - t1;
            (c0, c1)
        }

        let mut z0 = self.c0.c0;
        let mut z4 = self.c0.c1;
        let mut z3 = self.c0.c2;
        let mut z2 = self.c1.c0;
        let mut z1 = self.c1.c1;
        let mut z5 = self.c1.c2;

        let (t0, t1) = fp4_square(z0, z1);
        z0 = (t0 - z0).double() + t0;
        z1 = (t1 + z1).double() + t1;

        let (t0, t1) = fp4_square(z2, z3);
        let (t2, t3) = fp4_square(z4, z5);
        z4 = (t0 - z4).double() + t0;
        z5 = (t1 + z5).double() + t1;

        let t6 = t3.mul_by_nonresidue();
        z2 = (t6 + z2).double() + t6;
        z3 = (t2 - z3).double() + t2;

        Self::new(Fq6::new(z0, z4, z3), Fq6::new(z2, z1, z5))
    }
}

impl Add for Fq12 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl Sub for Fq12 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl Neg for Fq12 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl Mul for Fq12 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let v0 = self.c0 * rhs.c0;
        let v1 = self.c1 * rhs.c1;
        let c0 = v0 + v1.mul_by_nonresidue();
        let c1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - v0 - v1;
        Self::new(c0, c1)
    }
}

impl_assign_ops!((), Fq12);

impl Field for Fq12 {
    const ZERO: Self = Self::new(Fq6::ZERO, Fq6::ZERO);
    const ONE: Self = Self::new(Fq6::ONE, Fq6::ZERO);

    fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double())
    }

    fn square(&self) -> Self {
        let v0 = self.c0 * self.c1;
        let c0 = (self.c0 + self.c1) * (self.c0 + self.c1.mul_by_nonresidue())
            - v0
            - v0.mul_by_nonresidue();
        let c1 = v0.double();
        Self::new(c0, c1)
    }

    fn inverse(&self) -> Option<Self> {
        let t = (self.c0.square() - self.c1.square().mul_by_nonresidue()).inverse()?;
        Some(Self::new(self.c0 * t, -(self.c1 * t)))
    }

    fn frobenius_map(&self, power: usize) -> Self {
        let c0 = self.c0.frobenius_map(power);
        let c1 = self.c1.frobenius_map(power);
        Self::new(c0, c1.mul_by_fq2(&FROBENIUS_COEFF_C1[power % 12]))
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(Fq6::random(rng), Fq6::random(rng))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::test_utils::trng;

    #[test]
    fn axioms_square_inverse() {
        let mut rng = trng();
        for _ in 0..10 {
            let a = Fq12::random(&mut rng);
            let b = Fq12::random(&mut rng);
            let c = Fq12::random(&mut rng);
            assert_eq!((a * b) * c, a * (b * c));
            assert_eq!(a * (b + c), a * b + a * c);
            assert_eq!(a.square(), a * a);
            if !a.is_zero() {
                assert_eq!(a * a.inverse().unwrap(), Fq12::ONE);
            }
        }
    }

    #[test]
    fn frobenius_order_twelve() {
        let mut rng = trng();
        for _ in 0..5 {
            let a = Fq12::random(&mut rng);
            let mut t = a;
            for _ in 0..12 {
                t = t.frobenius_map(1);
            }
            assert_eq!(t, a);
            assert_eq!(a.frobenius_map(1).frobenius_map(1), a.frobenius_map(2));
            assert_eq!(a.frobenius_map(2).frobenius_map(1), a.frobenius_map(3));
            // Conjugation is the half-way Frobenius.
            assert_eq!(a.frobenius_map(6), a.conjugate());
            assert_eq!(a.conjugate().conjugate(), a);
        }
    }

    #[test]
    fn sparse_mul_matches_general() {
        let mut rng = trng();
        for _ in 0..10 {
            let f = Fq12::random(&mut rng);
            let d0 = Fq2::random(&mut rng);
            let d3 = Fq2::random(&mut rng);
            let d4 = Fq2::random(&mut rng);
            let sparse = Fq12::new(
                Fq6::new(d0, Fq2::ZERO, Fq2::ZERO),
                Fq6::new(d3, d4, Fq2::ZERO),
            );
            assert_eq!(f.mul_by_034(&d0, &d3, &d4), f * sparse);
        }
    }

    #[test]
    fn cyclotomic_square_on_unit_circle() {
        // f^(q^6 - 1) lies in the kernel of the norm map, where the
        // specialized squaring coincides with the general one.
        let mut rng = trng();
        for _ in 0..5 {
            let f = Fq12::random(&mut rng);
            if f.is_zero() {
                continue;
            }
            let u = f.conjugate() * f.inverse().unwrap();
            assert_eq!(u.cyclotomic_square(), u.square());
            // And there conjugation really is inversion.
            assert_eq!(u * u.conjugate(), Fq12::ONE);
        }
    }
}
