//! Montgomery-form prime field over a compile-time modulus.
//!
//! `Fp<P, N>` holds `N` little-endian u64 limbs of `value * R mod q`
//! (R = 2^(64N)). Standard form appears only at I/O boundaries; every
//! arithmetic path keeps the canonical-range invariant `0 <= value < q`.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigUint;
use rand::Rng;

use super::{Field, impl_assign_ops};
use crate::bigint;
use crate::codec::DecodeError;

/// Compile-time descriptor of a prime field, resolved through generics.
pub trait FpParameters<const N: usize>: 'static + Copy + Send + Sync {
    /// The prime modulus q.
    const MODULUS: [u64; N];
    const MODULUS_BITS: u32;
    /// `-q^{-1} mod 2^64`, the CIOS reduction constant.
    const INV: u64;
    /// `R mod q`: the Montgomery image of one.
    const R: [u64; N];
    /// `R^2 mod q`: carries standard-form values into Montgomery form.
    const R2: [u64; N];
    /// `(q - 1) / 2`, for the "greatest root" sign convention.
    const MODULUS_MINUS_ONE_DIV_TWO: [u64; N];
    /// `(q + 1) / 4` when q ≡ 3 (mod 4): the square-root exponent.
    const MODULUS_PLUS_ONE_DIV_FOUR: Option<[u64; N]>;
}

pub struct Fp<P, const N: usize> {
    limbs: [u64; N],
    _params: PhantomData<P>,
}

impl<P: FpParameters<N>, const N: usize> Fp<P, N> {
    pub const ZERO: Self = Self::from_montgomery_limbs([0; N]);
    pub const ONE: Self = Self::from_montgomery_limbs(P::R);

    /// Wire width in bytes.
    pub const BYTES: usize = N * 8;

    /// Wraps limbs that are already in Montgomery form (constant tables).
    pub const fn from_montgomery_limbs(limbs: [u64; N]) -> Self {
        Self {
            limbs,
            _params: PhantomData,
        }
    }

    pub fn montgomery_limbs(&self) -> [u64; N] {
        self.limbs
    }

    /// Standard-form limbs into Montgomery form. Value must be < q.
    pub fn from_limbs(limbs: [u64; N]) -> Self {
        debug_assert!(bigint::cmp(&limbs, &P::MODULUS) == Ordering::Less);
        Self::from_montgomery_limbs(limbs) * Self::from_montgomery_limbs(P::R2)
    }

    pub fn from_u64(v: u64) -> Self {
        let mut limbs = [0u64; N];
        limbs[0] = v;
        Self::from_limbs(limbs)
    }

    /// Leaves Montgomery form: the canonical standard-form limbs.
    pub fn into_repr(&self) -> [u64; N] {
        Self::montgomery_reduce(self.limbs, [0; N]).limbs
    }

    /// Reduces an arbitrary non-negative integer into the field.
    pub fn from_biguint(v: &BigUint) -> Self {
        let digits = v.to_u64_digits();
        let (_, rem) = bigint::div_rem(&digits, &P::MODULUS);
        let mut limbs = [0u64; N];
        limbs.copy_from_slice(&rem[..N]);
        Self::from_limbs(limbs)
    }

    pub fn to_biguint(&self) -> BigUint {
        let repr = self.into_repr();
        let mut bytes = Vec::with_capacity(Self::BYTES);
        for l in repr {
            bytes.extend_from_slice(&l.to_le_bytes());
        }
        BigUint::from_bytes_le(&bytes)
    }

    /// Canonical little-endian wire form (never Montgomery).
    pub fn to_bytes_le(&self) -> Vec<u8> {
        let repr = self.into_repr();
        let mut out = Vec::with_capacity(Self::BYTES);
        for l in repr {
            out.extend_from_slice(&l.to_le_bytes());
        }
        out
    }

    /// Parses a canonical little-endian buffer; rejects values >= q.
    pub fn from_bytes_le(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != Self::BYTES {
            return Err(DecodeError::InvalidLength {
                expected: Self::BYTES,
                got: bytes.len(),
            });
        }
        let mut limbs = [0u64; N];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            limbs[i] = u64::from_le_bytes(chunk.try_into().unwrap());
        }
        if bigint::cmp(&limbs, &P::MODULUS) != Ordering::Less {
            return Err(DecodeError::NonCanonical);
        }
        Ok(Self::from_limbs(limbs))
    }

    /// Parses an arbitrary-length little-endian buffer, reducing mod q.
    /// This is the unreduced-scalar entry point.
    pub fn from_bytes_le_reduced(bytes: &[u8]) -> Self {
        Self::from_biguint(&BigUint::from_bytes_le(bytes))
    }

    /// CIOS-style reduction of a double-width product, one interleaved
    /// `-q^{-1}` correction per input limb.
    pub(crate) fn montgomery_reduce(mut lo: [u64; N], mut hi: [u64; N]) -> Self {
        let modulus = P::MODULUS;
        let mut carry2 = 0u64;
        for i in 0..N {
            let k = lo[i].wrapping_mul(P::INV);
            let mut carry = 0u64;
            bigint::mac(lo[i], k, modulus[0], &mut carry);
            for j in 1..N {
                let idx = i + j;
                let slot = if idx < N {
                    &mut lo[idx]
                } else {
                    &mut hi[idx - N]
                };
                *slot = bigint::mac(*slot, k, modulus[j], &mut carry);
            }
            hi[i] = bigint::adc(hi[i], carry2, &mut carry);
            carry2 = carry;
        }
        let mut out = hi;
        if carry2 != 0 || bigint::gte(&out, &modulus) {
            out = bigint::sub(&out, &modulus).0;
        }
        Self::from_montgomery_limbs(out)
    }

    /// Uniform-enough sampling: double-width bytes reduced mod q.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = vec![0u8; 2 * Self::BYTES];
        rng.fill_bytes(&mut bytes);
        Self::from_bytes_le_reduced(&bytes)
    }

    pub fn is_zero(&self) -> bool {
        bigint::is_zero(&self.limbs)
    }

    pub fn double(&self) -> Self {
        *self + *self
    }

    pub fn square(&self) -> Self {
        *self * *self
    }

    /// Leaves Montgomery form, runs the binary-Euclid inverse, re-enters.
    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let std = self.into_repr();
        let inv = bigint::inverse_mod(&std, &P::MODULUS);
        Some(Self::from_limbs(inv))
    }

    /// Square root for q ≡ 3 (mod 4); `None` for non-residues.
    ///
    /// Calling this on a field without the precomputed exponent is a
    /// precondition violation.
    pub fn sqrt(&self) -> Option<Self> {
        let exp = P::MODULUS_PLUS_ONE_DIV_FOUR
            .expect("square root requires q = 3 mod 4");
        let cand = Field::pow(self, &exp);
        (cand.square() == *self).then_some(cand)
    }

    /// Sign convention for point compression: true iff the canonical value
    /// exceeds (q - 1) / 2.
    pub fn lexicographically_largest(&self) -> bool {
        bigint::cmp(&self.into_repr(), &P::MODULUS_MINUS_ONE_DIV_TWO) == Ordering::Greater
    }
}

impl<P: FpParameters<N>, const N: usize> Clone for Fp<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}
impl<P: FpParameters<N>, const N: usize> Copy for Fp<P, N> {}

impl<P: FpParameters<N>, const N: usize> PartialEq for Fp<P, N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.limbs == other.limbs
    }
}
impl<P: FpParameters<N>, const N: usize> Eq for Fp<P, N> {}

impl<P: FpParameters<N>, const N: usize> fmt::Debug for Fp<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl<P: FpParameters<N>, const N: usize> Default for Fp<P, N> {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Decimal-string serialization, the JSON convention of snark tooling.
impl<P: FpParameters<N>, const N: usize> serde::Serialize for Fp<P, N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.to_biguint())
    }
}

impl<'de, P: FpParameters<N>, const N: usize> serde::Deserialize<'de> for Fp<P, N> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        let v = BigUint::parse_bytes(s.as_bytes(), 10)
            .ok_or_else(|| serde::de::Error::custom("not a decimal field element"))?;
        let mut modulus_bytes = Vec::with_capacity(Self::BYTES);
        for l in P::MODULUS {
            modulus_bytes.extend_from_slice(&l.to_le_bytes());
        }
        if v >= BigUint::from_bytes_le(&modulus_bytes) {
            return Err(serde::de::Error::custom("non-canonical field element"));
        }
        Ok(Self::from_biguint(&v))
    }
}

impl<P: FpParameters<N>, const N: usize> Add for Fp<P, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (sum, carry) = bigint::add(&self.limbs, &rhs.limbs);
        let out = if carry || bigint::gte(&sum, &P::MODULUS) {
            bigint::sub(&sum, &P::MODULUS).0
        } else {
            sum
        };
        Self::from_montgomery_limbs(out)
    }
}

impl<P: FpParameters<N>, const N: usize> Sub for Fp<P, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let (diff, borrow) = bigint::sub(&self.limbs, &rhs.limbs);
        let out = if borrow {
            bigint::add(&diff, &P::MODULUS).0
        } else {
            diff
        };
        Self::from_montgomery_limbs(out)
    }
}

impl<P: FpParameters<N>, const N: usize> Neg for Fp<P, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        if self.is_zero() {
            self
        } else {
            Self::from_montgomery_limbs(bigint::sub(&P::MODULUS, &self.limbs).0)
        }
    }
}

impl<P: FpParameters<N>, const N: usize> Mul for Fp<P, N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let (lo, hi) = bigint::mul_wide(&self.limbs, &rhs.limbs);
        Self::montgomery_reduce(lo, hi)
    }
}

impl_assign_ops!((P: FpParameters<N>, const N: usize), Fp<P, N>);

impl<P: FpParameters<N>, const N: usize> Field for Fp<P, N> {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn is_zero(&self) -> bool {
        Fp::is_zero(self)
    }
    fn double(&self) -> Self {
        Fp::double(self)
    }
    fn square(&self) -> Self {
        Fp::square(self)
    }
    fn inverse(&self) -> Option<Self> {
        Fp::inverse(self)
    }
    /// The prime field is fixed by its own Frobenius.
    fn frobenius_map(&self, _power: usize) -> Self {
        *self
    }
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Fp::random(rng)
    }
}
