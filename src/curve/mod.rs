//! Short-Weierstrass group law over the field tower.
//!
//! Points are generic over a [`CurveParameters`] descriptor so the same
//! Jacobian formulas serve G1 (over Fq) and G2 (over Fq2).

pub mod g1;
pub mod g2;
pub mod msm;
pub mod scalar_mul;

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::fields::Field;

/// Compile-time curve descriptor: y^2 = x^3 + a x + b over `Base`.
pub trait CurveParameters: 'static + Copy + Send + Sync + Debug {
    type Base: Field;

    const COEFF_A: Self::Base;
    const COEFF_B: Self::Base;
    const GENERATOR_X: Self::Base;
    const GENERATOR_Y: Self::Base;

    /// Multiply-by-a hook for the curve formulas. Curves with a = 0 keep the
    /// default and the fast paths below never call it.
    fn mul_by_a(elt: &Self::Base) -> Self::Base {
        Self::COEFF_A * *elt
    }
}

/// Jacobian point: affine (x, y) = (X/Z^2, Y/Z^3), Z = 0 encodes infinity.
#[derive(Clone, Copy, Debug)]
pub struct Projective<C: CurveParameters> {
    pub x: C::Base,
    pub y: C::Base,
    pub z: C::Base,
}

/// Affine point; infinity carries the conventional (0, 0) coordinates,
/// unambiguous because b != 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C::Base: Serialize",
    deserialize = "C::Base: Deserialize<'de>"
))]
pub struct Affine<C: CurveParameters> {
    pub x: C::Base,
    pub y: C::Base,
    pub infinity: bool,
}

impl<C: CurveParameters> Affine<C> {
    pub const fn new(x: C::Base, y: C::Base) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }

    pub fn identity() -> Self {
        Self {
            x: C::Base::ZERO,
            y: C::Base::ZERO,
            infinity: true,
        }
    }

    pub fn generator() -> Self {
        Self::new(C::GENERATOR_X, C::GENERATOR_Y)
    }

    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        let rhs = self.x.square() * self.x + C::mul_by_a(&self.x) + C::COEFF_B;
        self.y.square() == rhs
    }

    pub fn to_projective(&self) -> Projective<C> {
        if self.infinity {
            Projective::identity()
        } else {
            Projective {
                x: self.x,
                y: self.y,
                z: C::Base::ONE,
            }
        }
    }

    /// Dedicated Z = 1 doubling (mdbl-2007-bl): saves the Z^2 work of the
    /// general formula.
    pub fn double(&self) -> Projective<C> {
        if self.infinity {
            return Projective::identity();
        }
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + b).square() - a - c).double();
        let mut e = a.double() + a;
        if !C::COEFF_A.is_zero() {
            e += C::COEFF_A;
        }
        let f = e.square();
        let x3 = f - d.double();
        let y3 = e * (d - x3) - c.double().double().double();
        let z3 = self.y.double();
        Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}

impl<C: CurveParameters> Neg for Affine<C> {
    type Output = Self;
    fn neg(self) -> Self {
        if self.infinity {
            self
        } else {
            Self::new(self.x, -self.y)
        }
    }
}

impl<C: CurveParameters> Projective<C> {
    pub fn identity() -> Self {
        Self {
            x: C::Base::ONE,
            y: C::Base::ONE,
            z: C::Base::ZERO,
        }
    }

    pub fn generator() -> Self {
        Affine::<C>::generator().to_projective()
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// dbl-2007-bl; E picks up the a Z^4 term only on a != 0 curves.
    pub fn double(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + b).square() - a - c).double();
        let mut e = a.double() + a;
        if !C::COEFF_A.is_zero() {
            let z2 = self.z.square();
            e += C::mul_by_a(&z2.square());
        }
        let f = e.square();
        let x3 = f - d.double();
        let y3 = e * (d - x3) - c.double().double().double();
        let z3 = (self.y * self.z).double();
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Mixed addition (madd-2007-bl), rhs implicitly Z = 1.
    pub fn add_mixed(&self, rhs: &Affine<C>) -> Self {
        if rhs.infinity {
            return *self;
        }
        if self.is_identity() {
            return rhs.to_projective();
        }
        let z1z1 = self.z.square();
        let u2 = rhs.x * z1z1;
        let s2 = rhs.y * self.z * z1z1;
        if u2 == self.x {
            return if s2 == self.y {
                self.double()
            } else {
                Self::identity()
            };
        }
        let h = u2 - self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let r = (s2 - self.y).double();
        let v = self.x * i;
        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (self.y * j).double();
        let z3 = (self.z + h).square() - z1z1 - hh;
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Affine form via one inversion. Use [`batch_to_affine`] to amortize.
    pub fn to_affine(&self) -> Affine<C> {
        match self.z.inverse() {
            None => Affine::identity(),
            Some(z_inv) => {
                let z_inv2 = z_inv.square();
                Affine::new(self.x * z_inv2, self.y * z_inv2 * z_inv)
            }
        }
    }
}

impl<C: CurveParameters> Add for Projective<C> {
    type Output = Self;

    /// General Jacobian addition (add-2007-bl) with the full special-case
    /// ladder: infinities, P + P, P + (-P).
    fn add(self, rhs: Self) -> Self {
        if self.is_identity() {
            return rhs;
        }
        if rhs.is_identity() {
            return self;
        }
        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = self.x * z2z2;
        let u2 = rhs.x * z1z1;
        let s1 = self.y * rhs.z * z2z2;
        let s2 = rhs.y * self.z * z1z1;
        if u1 == u2 {
            return if s1 == s2 {
                self.double()
            } else {
                Self::identity()
            };
        }
        let h = u2 - u1;
        let i = h.double().square();
        let j = h * i;
        let r = (s2 - s1).double();
        let v = u1 * i;
        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + rhs.z).square() - z1z1 - z2z2) * h;
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}

impl<C: CurveParameters> AddAssign for Projective<C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<C: CurveParameters> Add<Affine<C>> for Projective<C> {
    type Output = Self;
    fn add(self, rhs: Affine<C>) -> Self {
        self.add_mixed(&rhs)
    }
}

impl<C: CurveParameters> AddAssign<Affine<C>> for Projective<C> {
    fn add_assign(&mut self, rhs: Affine<C>) {
        *self = self.add_mixed(&rhs);
    }
}

impl<C: CurveParameters> Neg for Projective<C> {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl<C: CurveParameters> Sub for Projective<C> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<C: CurveParameters> PartialEq for Projective<C> {
    /// Cross-multiplied comparison: X1 Z2^2 = X2 Z1^2 and Y1 Z2^3 = Y2 Z1^3,
    /// no inversion needed.
    fn eq(&self, other: &Self) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        self.x * z2z2 == other.x * z1z1
            && self.y * (z2z2 * other.z) == other.y * (z1z1 * self.z)
    }
}

impl<C: CurveParameters> Eq for Projective<C> {}

impl<C: CurveParameters> From<Affine<C>> for Projective<C> {
    fn from(p: Affine<C>) -> Self {
        p.to_projective()
    }
}

/// Montgomery's batch-inversion trick: one field inversion for the whole
/// slice (running product forward, back-substitution in reverse). This is
/// the only place inversions are batched.
pub fn batch_to_affine<C: CurveParameters>(points: &[Projective<C>]) -> Vec<Affine<C>> {
    let mut prefix = vec![C::Base::ONE; points.len()];
    let mut acc = C::Base::ONE;
    for (i, p) in points.iter().enumerate() {
        prefix[i] = acc;
        if !p.is_identity() {
            acc *= p.z;
        }
    }
    let mut inv = acc.inverse().expect("z coordinates are nonzero");
    let mut out = vec![Affine::identity(); points.len()];
    for (i, p) in points.iter().enumerate().rev() {
        if p.is_identity() {
            continue;
        }
        let z_inv = prefix[i] * inv;
        inv *= p.z;
        let z_inv2 = z_inv.square();
        out[i] = Affine::new(p.x * z_inv2, p.y * z_inv2 * z_inv);
    }
    out
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::g1::{G1Affine, G1Projective};
    use super::g2::G2Projective;
    use super::*;
    use crate::fields::{Fq, Fr};
    use crate::test_utils::trng;

    fn random_g1(rng: &mut impl rand::Rng) -> G1Projective {
        G1Projective::generator().mul_scalar(&Fr::random(rng))
    }

    #[test]
    fn generator_on_curve() {
        assert!(G1Affine::generator().is_on_curve());
        assert!(super::g2::G2Affine::generator().is_on_curve());
    }

    #[test]
    fn double_equals_add_self() {
        let mut rng = trng();
        for _ in 0..10 {
            let p = random_g1(&mut rng);
            assert_eq!(p.double(), p + p);
            let q = G2Projective::generator().mul_scalar(&Fr::random(&mut rng));
            assert_eq!(q.double(), q + q);
        }
    }

    #[test]
    fn add_negative_is_identity() {
        let mut rng = trng();
        for _ in 0..10 {
            let p = random_g1(&mut rng);
            assert!((p + (-p)).is_identity());
            assert_eq!(p + G1Projective::identity(), p);
            assert_eq!(G1Projective::identity() + p, p);
        }
    }

    #[test]
    fn mixed_add_matches_general() {
        let mut rng = trng();
        for _ in 0..10 {
            let p = random_g1(&mut rng);
            let q = random_g1(&mut rng);
            let q_aff = q.to_affine();
            assert_eq!(p.add_mixed(&q_aff), p + q);
            // Equal and opposite operands through the mixed path too.
            assert_eq!(p.add_mixed(&p.to_affine()), p.double());
            assert!(p.add_mixed(&(-p).to_affine()).is_identity());
        }
    }

    #[test]
    fn affine_double_matches() {
        let mut rng = trng();
        for _ in 0..10 {
            let p = random_g1(&mut rng);
            assert_eq!(p.to_affine().double(), p.double());
        }
        assert!(G1Affine::identity().double().is_identity());
    }

    #[test]
    fn affine_roundtrip() {
        let mut rng = trng();
        for _ in 0..10 {
            let p = random_g1(&mut rng);
            assert_eq!(p.to_affine().to_projective(), p);
        }
        assert!(G1Projective::identity().to_affine().is_identity());
    }

    #[test]
    fn equality_ignores_representation() {
        let mut rng = trng();
        let p = random_g1(&mut rng);
        // Rescale coordinates: same point, different Z.
        let s = Fq::random(&mut rng);
        let s2 = s.square();
        let rescaled = G1Projective {
            x: p.x * s2,
            y: p.y * s2 * s,
            z: p.z * s,
        };
        assert_eq!(p, rescaled);
        assert_ne!(p, p.double());
    }

    #[test]
    fn batch_to_affine_matches_elementwise() {
        let mut rng = trng();
        let mut points: Vec<G1Projective> = (0..17).map(|_| random_g1(&mut rng)).collect();
        points[5] = G1Projective::identity();
        points[11] = G1Projective::identity();
        let batch = batch_to_affine(&points);
        for (p, a) in points.iter().zip(&batch) {
            assert_eq!(p.to_affine(), *a);
        }
        assert!(batch_to_affine::<super::g1::G1Parameters>(&[]).is_empty());
    }
}
