//! Field tower for BN254: the Montgomery prime field and its quadratic,
//! cubic and sextic-quadratic extensions.

pub mod fp;
pub mod fq;
pub mod fq2;
pub mod fq6;
pub mod fq12;
pub mod fr;

pub use fp::{Fp, FpParameters};
pub use fq::{Fq, FqParameters};
pub use fq2::Fq2;
pub use fq6::Fq6;
pub use fq12::Fq12;
pub use fr::{Fr, FrParameters};

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;

/// Common surface of every tower level.
///
/// Elements are plain `Copy` values; all operators work on canonical
/// (internally Montgomery-form) representatives.
pub trait Field:
    Copy
    + Clone
    + Debug
    + PartialEq
    + Eq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    const ZERO: Self;
    const ONE: Self;

    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    fn double(&self) -> Self;

    fn square(&self) -> Self;

    /// Multiplicative inverse; `None` for zero.
    fn inverse(&self) -> Option<Self>;

    /// The `power`-th Frobenius endomorphism (the q^power map).
    fn frobenius_map(&self, power: usize) -> Self;

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Square-and-multiply by a little-endian limb exponent.
    fn pow(&self, exp: &[u64]) -> Self {
        let mut res = Self::ONE;
        for i in (0..exp.len() * 64).rev() {
            res = res.square();
            if (exp[i / 64] >> (i % 64)) & 1 == 1 {
                res *= *self;
            }
        }
        res
    }
}

/// Derives the `*Assign` operators from the by-value ones.
macro_rules! impl_assign_ops {
    (($($g:tt)*), $t:ty) => {
        impl<$($g)*> std::ops::AddAssign for $t {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }
        impl<$($g)*> std::ops::SubAssign for $t {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }
        impl<$($g)*> std::ops::MulAssign for $t {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }
    };
}
pub(crate) use impl_assign_ops;
