//! BN254 cubic extension Fq6 = Fq2[v]/(v^3 - xi), xi = 9 + u.

use std::ops::{Add, Mul, Neg, Sub};

use rand::Rng;

use super::{Field, Fq, Fq2, impl_assign_ops};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Fq6 {
    pub c0: Fq2,
    pub c1: Fq2,
    pub c2: Fq2,
}

/// v^(q^i) = FROBENIUS_COEFF_C1[i mod 6] * v, with coefficient xi^((q^i-1)/3).
const FROBENIUS_COEFF_C1: [Fq2; 6] = [
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
            0xc9af22f716ad6bad,
            0xb311782a4aa662b2,
            0x19eeaf64e248c7f4,
            0x20273e77e3439f82,
        ]),
        Fq::from_montgomery_limbs([
            0xacc02860f7ce93ac,
            0x3933d5817ba76b4c,
            0x69e6188b446c8467,
            0x0a46036d4417cc55,
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
            0xf91aba2654e8e3b1,
            0x4771cb2fdc92ce12,
            0xdcb16ae0fc8bdf35,
            0x274aa195cd9d8be4,
        ]),
        Fq::from_montgomery_limbs([
            0x5cfc50ae18811f8b,
            0x4bb28433cb43988c,
            0x4fd35f13c3b56219,
            0x301949bd2fc8883a,
        ]),
    ),
];

/// (v^2)^(q^i) = FROBENIUS_COEFF_C2[i mod 6] * v^2, coefficient xi^(2(q^i-1)/3).
const FROBENIUS_COEFF_C2: [Fq2; 6] = [
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
            0x7361d77f843abe92,
            0xa5bb2bd3273411fb,
            0x9c941f314b3e2399,
            0x15df9cddbb9fd3ec,
        ]),
        Fq::from_montgomery_limbs([
            0x5dddfd154bd8c949,
            0x62cb29a5a4445b60,
            0x37bc870a0c7dd2b9,
            0x24830a9d3171f0fd,
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
            0x448a93a57b6762df,
            0xbfd62df528fdeadf,
            0xd858f5d00e9bd47a,
            0x06b03d4d3476ec58,
        ]),
        Fq::from_montgomery_limbs([
            0x2b19daf4bcc936d1,
            0xa1a54e7a56f4299f,
            0xb533eee05adeaef1,
            0x170c812b84dda0b2,
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
            0x843420f1d8dadbd6,
            0x31f010c9183fcdb2,
            0x436330b527a76049,
            0x13d47447f11adfe4,
        ]),
        Fq::from_montgomery_limbs([
            0xef494023a857fa74,
            0x2a925d02d5ab101a,
            0x83b015829ba62f10,
            0x2539111d0c13aea3,
        ]),
    ),
];

impl Fq6 {
    pub const fn new(c0: Fq2, c1: Fq2, c2: Fq2) -> Self {
        Self { c0, c1, c2 }
    }

    /// Multiply by v: (c0, c1, c2) -> (xi * c2, c0, c1).
    pub fn mul_by_nonresidue(&self) -> Self {
        Self::new(self.c2.mul_by_nonresidue(), self.c0, self.c1)
    }

    /// Scale every component by an Fq2 element.
    pub fn mul_by_fq2(&self, s: &Fq2) -> Self {
        Self::new(self.c0 * *s, self.c1 * *s, self.c2 * *s)
    }

    /// Sparse multiplication by b0 + b1 v (the Fq12 line-step helper).
    pub fn mul_by_01(&self, b0: &Fq2, b1: &Fq2) -> Self {
        let a_a = self.c0 * *b0;
        let b_b = self.c1 * *b1;
        let t0 = ((self.c1 + self.c2) * *b1 - b_b).mul_by_nonresidue() + a_a;
        let t1 = (self.c0 + self.c1) * (*b0 + *b1) - a_a - b_b;
        let t2 = (self.c0 + self.c2) * *b0 - a_a + b_b;
        Self::new(t0, t1, t2)
    }

    /// Sparse multiplication by b1 v.
    pub fn mul_by_1(&self, b1: &Fq2) -> Self {
        Self::new(
            (self.c2 * *b1).mul_by_nonresidue(),
            self.c0 * *b1,
            self.c1 * *b1,
        )
    }
}

impl Add for Fq6 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }
}

impl Sub for Fq6 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }
}

impl Neg for Fq6 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2)
    }
}

impl Mul for Fq6 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Six-multiplication generalized Karatsuba.
        let v0 = self.c0 * rhs.c0;
        let v1 = self.c1 * rhs.c1;
        let v2 = self.c2 * rhs.c2;
        let c0 = v0
            + ((self.c1 + self.c2) * (rhs.c1 + rhs.c2) - v1 - v2).mul_by_nonresidue();
        let c1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - v0 - v1
            + v2.mul_by_nonresidue();
        let c2 = (self.c0 + self.c2) * (rhs.c0 + rhs.c2) - v0 - v2 + v1;
        Self::new(c0, c1, c2)
    }
}

impl_assign_ops!((), Fq6);

impl Field for Fq6 {
    const ZERO: Self = Self::new(Fq2::ZERO, Fq2::ZERO, Fq2::ZERO);
    const ONE: Self = Self::new(Fq2::ONE, Fq2::ZERO, Fq2::ZERO);

    fn double(&self) -> Self {
        Self::new(self.c0.double(), self.c1.double(), self.c2.double())
    }

    fn square(&self) -> Self {
        // CH-SQR3 specialized squaring: five squarings/multiplications.
        let s0 = self.c0.square();
        let s1 = (self.c0 * self.c1).double();
        let s2 = (self.c0 - self.c1 + self.c2).square();
        let s3 = (self.c1 * self.c2).double();
        let s4 = self.c2.square();
        let c0 = s0 + s3.mul_by_nonresidue();
        let c1 = s1 + s4.mul_by_nonresidue();
        let c2 = s1 + s2 + s3 - s0 - s4;
        Self::new(c0, c1, c2)
    }

    /// Inverse through the three-term norm/resultant solve.
    fn inverse(&self) -> Option<Self> {
        let t0 = self.c0.square();
        let t1 = self.c1.square();
        let t2 = self.c2.square();
        let t3 = self.c0 * self.c1;
        let t4 = self.c0 * self.c2;
        let t5 = self.c1 * self.c2;
        let c0 = t0 - t5.mul_by_nonresidue();
        let c1 = t2.mul_by_nonresidue() - t3;
        let c2 = t1 - t4;
        let norm = self.c0 * c0
            + (self.c2 * c1).mul_by_nonresidue()
            + (self.c1 * c2).mul_by_nonresidue();
        let t6 = norm.inverse()?;
        Some(Self::new(c0 * t6, c1 * t6, c2 * t6))
    }

    fn frobenius_map(&self, power: usize) -> Self {
        Self::new(
            self.c0.frobenius_map(power),
            self.c1.frobenius_map(power) * FROBENIUS_COEFF_C1[power % 6],
            self.c2.frobenius_map(power) * FROBENIUS_COEFF_C2[power % 6],
        )
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(Fq2::random(rng), Fq2::random(rng), Fq2::random(rng))
    }
}
