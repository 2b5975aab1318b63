//! Wire formats for field elements and curve points.
//!
//! Field elements cross the boundary as fixed-width little-endian canonical
//! bytes (never Montgomery). Points are big-endian: uncompressed `x ‖ y`, or
//! compressed `x` with flag bits folded into the leading byte (0x40 =
//! infinity, 0x80 = sign of y under the "greatest root" convention). Fq2
//! coordinates serialize as `c1 ‖ c0`.
//!
//! Decoding is the one place untrusted data enters the kernel, so every
//! failure here is a typed, recoverable error: including an x with no
//! square root, which must not trap.

use crate::curve::{Affine, CurveParameters, Projective, batch_to_affine};
use crate::fields::{Field, Fq, Fq2};

pub const INFINITY_FLAG: u8 = 0x40;
pub const SIGN_FLAG: u8 = 0x80;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("coordinate is not a canonical field element")]
    NonCanonical,
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("x coordinate has no square root")]
    NonResidue,
    #[error("infinity flag contradicts coordinate data")]
    InvalidInfinity,
}

/// What a curve coordinate needs beyond field arithmetic to cross the wire:
/// big-endian bytes, a square root for decompression, and a sign convention.
pub trait CoordField: Field {
    /// Serialized width in bytes.
    const BYTES: usize;

    fn write_be(&self, out: &mut [u8]);
    fn read_be(bytes: &[u8]) -> Result<Self, DecodeError>;
    fn sqrt(&self) -> Option<Self>;
    /// True iff the element is the "greatest" of {y, -y}.
    fn lexicographically_largest(&self) -> bool;
}

impl CoordField for Fq {
    const BYTES: usize = 32;

    fn write_be(&self, out: &mut [u8]) {
        let mut le = self.to_bytes_le();
        le.reverse();
        out.copy_from_slice(&le);
    }

    fn read_be(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut le = bytes.to_vec();
        le.reverse();
        Fq::from_bytes_le(&le)
    }

    fn sqrt(&self) -> Option<Self> {
        Fq::sqrt(self)
    }

    fn lexicographically_largest(&self) -> bool {
        Fq::lexicographically_largest(self)
    }
}

impl CoordField for Fq2 {
    const BYTES: usize = 64;

    fn write_be(&self, out: &mut [u8]) {
        self.c1.write_be(&mut out[..32]);
        self.c0.write_be(&mut out[32..]);
    }

    fn read_be(bytes: &[u8]) -> Result<Self, DecodeError> {
        let c1 = <Fq as CoordField>::read_be(&bytes[..32])?;
        let c0 = <Fq as CoordField>::read_be(&bytes[32..])?;
        Ok(Fq2::new(c0, c1))
    }

    fn sqrt(&self) -> Option<Self> {
        Fq2::sqrt(self)
    }

    fn lexicographically_largest(&self) -> bool {
        Fq2::lexicographically_largest(self)
    }
}

impl<C: CurveParameters> Affine<C>
where
    C::Base: CoordField,
{
    /// `x ‖ y`, big-endian; infinity is the flag byte over zeros.
    pub fn to_uncompressed(&self) -> Vec<u8> {
        let fe = C::Base::BYTES;
        let mut out = vec![0u8; 2 * fe];
        if self.infinity {
            out[0] = INFINITY_FLAG;
            return out;
        }
        self.x.write_be(&mut out[..fe]);
        self.y.write_be(&mut out[fe..]);
        out
    }

    pub fn from_uncompressed(bytes: &[u8]) -> Result<Self, DecodeError> {
        let fe = C::Base::BYTES;
        if bytes.len() != 2 * fe {
            return Err(DecodeError::InvalidLength {
                expected: 2 * fe,
                got: bytes.len(),
            });
        }
        let flags = bytes[0] & (INFINITY_FLAG | SIGN_FLAG);
        if flags & SIGN_FLAG != 0 {
            // The sign bit belongs to the compressed form only.
            return Err(DecodeError::NonCanonical);
        }
        if flags & INFINITY_FLAG != 0 {
            let mut rest = bytes.to_vec();
            rest[0] &= !INFINITY_FLAG;
            if rest.iter().any(|&b| b != 0) {
                return Err(DecodeError::InvalidInfinity);
            }
            return Ok(Self::identity());
        }
        let x = C::Base::read_be(&bytes[..fe])?;
        let y = C::Base::read_be(&bytes[fe..])?;
        let point = Self::new(x, y);
        if !point.is_on_curve() {
            return Err(DecodeError::NotOnCurve);
        }
        Ok(point)
    }

    /// Big-endian x with the infinity/sign flags in the leading byte.
    pub fn to_compressed(&self) -> Vec<u8> {
        let fe = C::Base::BYTES;
        let mut out = vec![0u8; fe];
        if self.infinity {
            out[0] = INFINITY_FLAG;
            return out;
        }
        self.x.write_be(&mut out);
        if self.y.lexicographically_largest() {
            out[0] |= SIGN_FLAG;
        }
        out
    }

    /// Decompression: solve y^2 = x^3 + ax + b, then pick the root the sign
    /// flag names. An x whose right-hand side has no root is a typed
    /// failure, not undefined behavior.
    pub fn from_compressed(bytes: &[u8]) -> Result<Self, DecodeError> {
        let fe = C::Base::BYTES;
        if bytes.len() != fe {
            return Err(DecodeError::InvalidLength {
                expected: fe,
                got: bytes.len(),
            });
        }
        let flags = bytes[0] & (INFINITY_FLAG | SIGN_FLAG);
        let mut data = bytes.to_vec();
        data[0] &= !(INFINITY_FLAG | SIGN_FLAG);
        if flags & INFINITY_FLAG != 0 {
            if flags & SIGN_FLAG != 0 || data.iter().any(|&b| b != 0) {
                return Err(DecodeError::InvalidInfinity);
            }
            return Ok(Self::identity());
        }
        let x = C::Base::read_be(&data)?;
        let rhs = x.square() * x + C::mul_by_a(&x) + C::COEFF_B;
        let mut y = CoordField::sqrt(&rhs).ok_or(DecodeError::NonResidue)?;
        if y.lexicographically_largest() != (flags & SIGN_FLAG != 0) {
            y = -y;
        }
        Ok(Self::new(x, y))
    }
}

/// Batch conversions: one batched affine pass, then concatenated encodings.
pub fn batch_to_uncompressed<C: CurveParameters>(points: &[Projective<C>]) -> Vec<u8>
where
    C::Base: CoordField,
{
    batch_to_affine(points)
        .iter()
        .flat_map(|p| p.to_uncompressed())
        .collect()
}

pub fn batch_to_compressed<C: CurveParameters>(points: &[Projective<C>]) -> Vec<u8>
where
    C::Base: CoordField,
{
    batch_to_affine(points)
        .iter()
        .flat_map(|p| p.to_compressed())
        .collect()
}

pub fn batch_from_compressed<C: CurveParameters>(
    bytes: &[u8],
) -> Result<Vec<Affine<C>>, DecodeError>
where
    C::Base: CoordField,
{
    let fe = C::Base::BYTES;
    if bytes.len() % fe != 0 {
        return Err(DecodeError::InvalidLength {
            expected: bytes.len().next_multiple_of(fe),
            got: bytes.len(),
        });
    }
    bytes.chunks_exact(fe).map(Affine::from_compressed).collect()
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::curve::g1::{G1Affine, G1Projective};
    use crate::curve::g2::G2Affine;
    use crate::fields::Fr;
    use crate::test_utils::trng;

    fn random_g1(rng: &mut impl rand::Rng) -> G1Affine {
        G1Projective::generator()
            .mul_scalar(&Fr::random(rng))
            .to_affine()
    }

    #[test]
    fn uncompressed_roundtrip() {
        let mut rng = trng();
        for _ in 0..10 {
            let p = random_g1(&mut rng);
            let bytes = p.to_uncompressed();
            assert_eq!(bytes.len(), 64);
            assert_eq!(G1Affine::from_uncompressed(&bytes).unwrap(), p);
        }
        let q = crate::curve::g2::G2Projective::generator().to_affine();
        let bytes = q.to_uncompressed();
        assert_eq!(bytes.len(), 256 / 2);
        assert_eq!(G2Affine::from_uncompressed(&bytes).unwrap(), q);
    }

    #[test]
    fn compressed_roundtrip_both_signs() {
        let mut rng = trng();
        for _ in 0..10 {
            let p = random_g1(&mut rng);
            for point in [p, -p] {
                let bytes = point.to_compressed();
                assert_eq!(bytes.len(), 32);
                assert_eq!(G1Affine::from_compressed(&bytes).unwrap(), point);
            }
        }
        let q = crate::curve::g2::G2Projective::generator().to_affine();
        assert_eq!(G2Affine::from_compressed(&q.to_compressed()).unwrap(), q);
    }

    #[test]
    fn infinity_encodings() {
        let id = G1Affine::identity();
        let unc = id.to_uncompressed();
        assert_eq!(unc[0], INFINITY_FLAG);
        assert!(G1Affine::from_uncompressed(&unc).unwrap().is_identity());
        let cmp = id.to_compressed();
        assert!(G1Affine::from_compressed(&cmp).unwrap().is_identity());
    }

    #[test]
    fn rejection_vectors() {
        // Wrong length.
        assert!(matches!(
            G1Affine::from_compressed(&[0u8; 31]),
            Err(DecodeError::InvalidLength { expected: 32, got: 31 })
        ));
        // Non-canonical coordinate: q itself, big-endian.
        let mut bytes = Fq::from_u64(0).to_bytes_le();
        bytes.reverse();
        let mut non_canonical = [0u8; 32];
        non_canonical.copy_from_slice(&bytes);
        // Overwrite with the modulus bytes.
        let m = num_bigint::BigUint::parse_bytes(
            b"21888242871839275222246405745257275088696311157297823662689037894645226208583",
            10,
        )
        .unwrap()
        .to_bytes_be();
        non_canonical[32 - m.len()..].copy_from_slice(&m);
        assert_eq!(
            G1Affine::from_compressed(&non_canonical),
            Err(DecodeError::NonCanonical)
        );
        // Off-curve uncompressed point: generator with corrupted y.
        let mut unc = G1Affine::generator().to_uncompressed();
        unc[63] ^= 1;
        assert_eq!(
            G1Affine::from_uncompressed(&unc),
            Err(DecodeError::NotOnCurve)
        );
        // x = 0 gives rhs = 3, a quadratic non-residue mod q.
        let zero_x = [0u8; 32];
        assert_eq!(
            G1Affine::from_compressed(&zero_x),
            Err(DecodeError::NonResidue)
        );
        // Infinity flag over nonzero payload.
        let mut bad_inf = G1Affine::generator().to_compressed();
        bad_inf[0] |= INFINITY_FLAG;
        assert_eq!(
            G1Affine::from_compressed(&bad_inf),
            Err(DecodeError::InvalidInfinity)
        );
    }

    #[test]
    fn batch_roundtrip() {
        let mut rng = trng();
        let mut points: Vec<G1Projective> = (0..9)
            .map(|_| G1Projective::generator().mul_scalar(&Fr::random(&mut rng)))
            .collect();
        points[4] = G1Projective::identity();
        let blob = batch_to_compressed(&points);
        assert_eq!(blob.len(), 9 * 32);
        let decoded: Vec<G1Affine> = batch_from_compressed(&blob).unwrap();
        for (p, d) in points.iter().zip(&decoded) {
            assert_eq!(p.to_affine(), *d);
        }
        let unc = batch_to_uncompressed(&points);
        assert_eq!(unc.len(), 9 * 64);
    }
}
