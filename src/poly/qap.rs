//! QAP operations: sparse linear combination and H-polynomial extraction.

use super::Domain;
use crate::fields::{Field, Fr};

/// One signal's sparse QAP column: (constraint index, coefficient) pairs.
pub type SignalCoeffs = Vec<(usize, Fr)>;

/// Accumulates the witness against the per-signal sparse columns, producing
/// the dense evaluation vector of A(x) (or B(x)) over the domain.
///
/// An index at or beyond the domain size is a malformed proving key and
/// panics.
pub fn linear_combination(
    domain: &Domain,
    signals: &[SignalCoeffs],
    witness: &[Fr],
) -> Vec<Fr> {
    assert_eq!(
        signals.len(),
        witness.len(),
        "one sparse column per witness value"
    );
    let mut values = vec![Fr::ZERO; domain.n];
    for (column, w) in signals.iter().zip(witness) {
        if w.is_zero() {
            continue;
        }
        for &(idx, coeff) in column {
            values[idx] += coeff * *w;
        }
    }
    values
}

/// H = (A·B − C) / Z in coefficient form, from the domain evaluations of A
/// and B.
///
/// For a satisfying witness C agrees with A·B pointwise on the domain, so
/// the numerator vanishes there and the quotient is computed on the odd
/// coset, where Z(x) = x^n − 1 is the constant −2.
pub fn compute_h(domain: &Domain, a_values: &[Fr], b_values: &[Fr]) -> Vec<Fr> {
    assert_eq!(a_values.len(), domain.n);
    assert_eq!(b_values.len(), domain.n);

    let mut a = a_values.to_vec();
    let mut b = b_values.to_vec();
    // C interpolates the pointwise product on the domain.
    let mut c: Vec<Fr> = a.iter().zip(&b).map(|(x, y)| *x * *y).collect();

    domain.ifft(&mut a);
    domain.ifft(&mut b);
    domain.ifft(&mut c);
    domain.coset_fft(&mut a);
    domain.coset_fft(&mut b);
    domain.coset_fft(&mut c);

    let z_inv = (-Fr::from_u64(2)).inverse().expect("two is a unit");
    let mut h: Vec<Fr> = a
        .iter()
        .zip(&b)
        .zip(&c)
        .map(|((x, y), z)| (*x * *y - *z) * z_inv)
        .collect();
    domain.coset_ifft(&mut h);
    h
}
