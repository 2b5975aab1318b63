//! Final exponentiation: maps a Miller-loop value to the canonical
//! cyclotomic coset representative, f^((q^12 - 1) / r).
//!
//! The easy part costs one inversion plus Frobenius work; the hard part is
//! the BN addition chain: repeated exponentiation by the curve parameter z
//! over cyclotomic squarings, recombined through Frobenius powers 1/2/3.
//! The chain is curve-specific and lives here, next to the rest of the
//! BN254 pairing parameters.

use super::CURVE_X;
use crate::curve::scalar_mul::naf;
use crate::fields::{Field, Fq12};

/// f^z inside the cyclotomic subgroup: NAF digits of z over cyclotomic
/// squarings, with the conjugate standing in for the inverse on -1 digits.
fn cyclotomic_exp(f: &Fq12, exp: u64) -> Fq12 {
    let f_inv = f.conjugate();
    let mut res = Fq12::ONE;
    for &digit in naf(&[exp]).iter().rev() {
        res = res.cyclotomic_square();
        match digit {
            1 => res *= *f,
            -1 => res *= f_inv,
            _ => {}
        }
    }
    res
}

/// f^(-z); z is positive for BN254 so this is a conjugation of f^z.
fn exp_by_neg_x(f: &Fq12) -> Fq12 {
    cyclotomic_exp(f, CURVE_X).conjugate()
}

pub fn final_exponentiation(f: &Fq12) -> Fq12 {
    // Easy part: f^((q^6 - 1)(q^2 + 1)).
    let f_inv = f.inverse().expect("miller loop output is a unit");
    let mut r = f.conjugate() * f_inv;
    let tmp = r;
    r = r.frobenius_map(2);
    r *= tmp;

    // Hard part: the BN254 chain.
    let y0 = exp_by_neg_x(&r);
    let y1 = y0.cyclotomic_square();
    let y2 = y1.cyclotomic_square();
    let mut y3 = y2 * y1;
    let y4 = exp_by_neg_x(&y3);
    let y5 = y4.cyclotomic_square();
    let mut y6 = exp_by_neg_x(&y5);
    y3 = y3.conjugate();
    y6 = y6.conjugate();
    let y7 = y6 * y4;
    let y8 = y7 * y3;
    let y9 = y8 * y1;
    let y10 = y8 * y4;
    let y11 = y10 * r;
    let y12 = y9.frobenius_map(1);
    let y13 = y12 * y11;
    let y14 = y8.frobenius_map(2) * y13;
    let r_conj = r.conjugate();
    let y15 = (r_conj * y9).frobenius_map(3);
    y15 * y14
}
