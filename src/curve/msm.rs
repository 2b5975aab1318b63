//! Multi-scalar multiplication: chunked Pippenger bucket method.

use itertools::Itertools;
use log::debug;

use super::{Affine, CurveParameters, Projective};
use crate::fields::{Fr, fp::FpParameters, fr::FrParameters};

/// Chunk width by ⌈log2 N⌉: balances 2^w bucket setup against N·bits/w
/// point additions.
fn window_size(n: usize) -> usize {
    const WINDOWS: [usize; 33] = [
        1, 1, 1, 2, 2, 3, 4, 4, 5, 6, 6, 7, 8, 8, 9, 10, 10, 11, 12, 12, 13,
        14, 14, 15, 16, 16, 16, 16, 16, 16, 16, 16, 16,
    ];
    let log2 = n.next_power_of_two().trailing_zeros() as usize;
    WINDOWS[log2.min(WINDOWS.len() - 1)]
}

/// The w bits of `repr` starting at bit `lo` (w < 64).
#[inline]
fn window_value(repr: &[u64; 4], lo: usize, width: usize) -> usize {
    let limb = lo / 64;
    let off = lo % 64;
    let mut v = repr[limb] >> off;
    if off + width > 64 && limb + 1 < repr.len() {
        v |= repr[limb + 1] << (64 - off);
    }
    (v & ((1u64 << width) - 1)) as usize
}

/// Folds the bucket triangle sum Σ (i+1)·buckets[i] by recursive halving:
/// each level adds its upper half into the lower half and collects the
/// upper-half sum into a doubling-weighted runner, so bucket i gets weight
/// i+1 without i separate additions.
fn reduce_buckets<C: CurveParameters>(buckets: &mut [Projective<C>]) -> Projective<C> {
    let mut len = buckets.len();
    debug_assert!((len + 1).is_power_of_two());
    let mut runner: Option<Projective<C>> = None;
    while len > 1 {
        let half = (len + 1) / 2;
        let mut upper_sum = Projective::identity();
        for b in &buckets[half - 1..len] {
            upper_sum += *b;
        }
        for lo in 1..half {
            let upper = buckets[lo - 1 + half];
            buckets[lo - 1] += upper;
        }
        runner = Some(match runner {
            None => upper_sum,
            Some(r) => r.double() + upper_sum,
        });
        len = half - 1;
    }
    let low = if len == 1 {
        buckets[0]
    } else {
        Projective::identity()
    };
    match runner {
        None => low,
        Some(r) => low + r.double(),
    }
}

/// Σ scalars[i] · bases[i] by the bucket method. Empty input gives the
/// identity; zero windows are skipped, so all-zero scalars do too.
pub fn msm<C: CurveParameters>(bases: &[Affine<C>], scalars: &[Fr]) -> Projective<C> {
    assert_eq!(
        bases.len(),
        scalars.len(),
        "msm requires matching base and scalar counts"
    );
    if bases.is_empty() {
        return Projective::identity();
    }

    let window = window_size(bases.len());
    let total_bits = FrParameters::MODULUS_BITS as usize;
    let n_chunks = total_bits.div_ceil(window);
    debug!(
        "msm: n={} window={} chunks={}",
        bases.len(),
        window,
        n_chunks
    );

    let reprs = scalars.iter().map(|s| s.into_repr()).collect_vec();

    let mut result = Projective::identity();
    for chunk in (0..n_chunks).rev() {
        let lo = chunk * window;
        let width = window.min(total_bits - lo);
        if chunk != n_chunks - 1 {
            for _ in 0..width {
                result = result.double();
            }
        }
        let mut buckets = vec![Projective::identity(); (1 << width) - 1];
        for (repr, base) in reprs.iter().zip(bases) {
            let w = window_value(repr, lo, width);
            if w != 0 {
                buckets[w - 1] += *base;
            }
        }
        result += reduce_buckets(&mut buckets);
    }
    result
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_traits::Num;
    use test_log::test;

    use super::super::batch_to_affine;
    use super::super::g1::{G1Affine, G1Projective};
    use super::*;
    use crate::fields::Field;
    use crate::test_utils::trng;

    fn naive_msm(bases: &[G1Affine], scalars: &[Fr]) -> G1Projective {
        bases
            .iter()
            .zip(scalars)
            .fold(G1Projective::identity(), |acc, (b, s)| {
                acc + b.to_projective().mul_scalar(s)
            })
    }

    #[test]
    fn matches_naive_for_random_sizes() {
        let mut rng = trng();
        for n in [1usize, 2, 3, 7, 33, 100] {
            let points: Vec<G1Projective> = (0..n)
                .map(|_| G1Projective::generator().mul_scalar(&Fr::random(&mut rng)))
                .collect();
            let bases = batch_to_affine(&points);
            let scalars: Vec<Fr> = (0..n).map(|_| Fr::random(&mut rng)).collect();
            assert_eq!(msm(&bases, &scalars), naive_msm(&bases, &scalars), "n = {n}");
        }
    }

    #[test]
    fn empty_and_zero_inputs() {
        assert!(msm::<super::super::g1::G1Parameters>(&[], &[]).is_identity());
        let bases = vec![G1Affine::generator(); 4];
        let scalars = vec![Fr::ZERO; 4];
        assert!(msm(&bases, &scalars).is_identity());
        // Infinity bases are skipped by the mixed addition.
        let bases = vec![G1Affine::identity(); 3];
        let scalars = vec![Fr::from_u64(5); 3];
        assert!(msm(&bases, &scalars).is_identity());
    }

    #[test]
    #[should_panic(expected = "matching base and scalar counts")]
    fn mismatched_lengths_panic() {
        let _ = msm(&[G1Affine::generator()], &[]);
    }

    #[test]
    fn fixed_four_term_vector() {
        // points [1]G, [2]G, [3]G, [4]G with scalars 7, 11, 13, 17: the
        // combination equals [136]G.
        let g = G1Projective::generator();
        let points: Vec<G1Projective> =
            (1..=4u64).map(|k| g.mul_scalar(&Fr::from_u64(k))).collect();
        let bases = batch_to_affine(&points);
        let scalars: Vec<Fr> = [7u64, 11, 13, 17].iter().map(|&k| Fr::from_u64(k)).collect();
        let result = msm(&bases, &scalars).to_affine();
        let expect_x = BigUint::from_str_radix(
            "7135791582969565242226919877212480995622369879456749116760435092731322618363",
            10,
        )
        .unwrap();
        let expect_y = BigUint::from_str_radix(
            "13183518490368094333547464138278191467797666983711822596787316629944529731368",
            10,
        )
        .unwrap();
        assert_eq!(result.x.to_biguint(), expect_x);
        assert_eq!(result.y.to_biguint(), expect_y);
        assert_eq!(msm(&bases, &scalars), g.mul_scalar(&Fr::from_u64(136)));
    }

    #[test]
    fn bucket_reduction_weights() {
        // Σ (i+1)·B_i with distinct points, against the direct sum.
        let mut rng = trng();
        for w in 1..=4usize {
            let n = (1 << w) - 1;
            let points: Vec<G1Projective> = (0..n)
                .map(|_| G1Projective::generator().mul_scalar(&Fr::random(&mut rng)))
                .collect();
            let mut buckets = points.clone();
            let got = reduce_buckets(&mut buckets);
            let want = points
                .iter()
                .enumerate()
                .fold(G1Projective::identity(), |acc, (i, p)| {
                    acc + p.mul_scalar(&Fr::from_u64(i as u64 + 1))
                });
            assert_eq!(got, want, "w = {w}");
        }
    }
}
