//! Radix-2 evaluation domain over Fr.

use log::debug;

use crate::fields::{Field, Fr};

/// A multiplicative subgroup of Fr* of exact power-of-two order, with the
/// precomputed root tables the iterative Cooley–Tukey transform consumes.
///
/// The "coset" variants evaluate at the odd 2n-th roots of unity instead:
/// shifted points sharing no roots with the vanishing polynomial of the
/// domain, which is what the H-polynomial quotient needs.
pub struct Domain {
    pub n: usize,
    pub log_n: u32,
    n_inv: Fr,
    /// Forward root powers w^0 .. w^(n/2 - 1) (Montgomery form).
    roots: Vec<Fr>,
    /// The same for w^-1.
    inv_roots: Vec<Fr>,
    /// Odd-root shift w_{2n} and its inverse, as power ladders.
    shift_powers: Vec<Fr>,
    shift_inv_powers: Vec<Fr>,
}

impl Domain {
    /// A domain of exactly `n` points. `n` must be a power of two no larger
    /// than 2^27 (one factor of two is reserved for the coset shift);
    /// anything else is a caller bug and panics.
    pub fn new(n: usize) -> Self {
        assert!(
            n.is_power_of_two(),
            "domain size must be a power of two, got {n}"
        );
        let log_n = n.trailing_zeros();
        let root = Fr::root_of_unity(log_n);
        let shift = Fr::root_of_unity(log_n + 1);
        debug!("fft domain: n={n} (2^{log_n})");

        let mut roots = Vec::with_capacity(n / 2);
        let mut inv_roots = Vec::with_capacity(n / 2);
        let root_inv = root.inverse().expect("root of unity is a unit");
        let mut acc = Fr::ONE;
        let mut acc_inv = Fr::ONE;
        for _ in 0..n / 2 {
            roots.push(acc);
            inv_roots.push(acc_inv);
            acc *= root;
            acc_inv *= root_inv;
        }

        let shift_inv = shift.inverse().expect("root of unity is a unit");
        let mut shift_powers = Vec::with_capacity(n);
        let mut shift_inv_powers = Vec::with_capacity(n);
        let mut acc = Fr::ONE;
        let mut acc_inv = Fr::ONE;
        for _ in 0..n {
            shift_powers.push(acc);
            shift_inv_powers.push(acc_inv);
            acc *= shift;
            acc_inv *= shift_inv;
        }

        Self {
            n,
            log_n,
            n_inv: Fr::from_u64(n as u64).inverse().expect("n < r"),
            roots,
            inv_roots,
            shift_powers,
            shift_inv_powers,
        }
    }

    fn transform(&self, values: &mut [Fr], table: &[Fr]) {
        let n = self.n;
        assert_eq!(values.len(), n, "input length must equal the domain size");
        if n == 1 {
            return;
        }
        // Bit-reversal permutation, then butterflies level by level.
        for i in 0..n {
            let j = (i.reverse_bits()) >> (usize::BITS - self.log_n);
            if j > i {
                values.swap(i, j);
            }
        }
        let mut m = 1;
        while m < n {
            let stride = n / (2 * m);
            for k in (0..n).step_by(2 * m) {
                for j in 0..m {
                    let w = table[j * stride];
                    let t = values[k + j + m] * w;
                    let u = values[k + j];
                    values[k + j] = u + t;
                    values[k + j + m] = u - t;
                }
            }
            m *= 2;
        }
    }

    /// Coefficients to evaluations, in place.
    pub fn fft(&self, values: &mut [Fr]) {
        self.transform(values, &self.roots);
    }

    /// Evaluations to coefficients: inverse transform scaled by n^-1.
    pub fn ifft(&self, values: &mut [Fr]) {
        self.transform(values, &self.inv_roots);
        for v in values.iter_mut() {
            *v *= self.n_inv;
        }
    }

    /// Evaluate at the odd 2n-th roots: scale coefficient i by shift^i,
    /// then transform as usual.
    pub fn coset_fft(&self, coeffs: &mut [Fr]) {
        assert_eq!(coeffs.len(), self.n, "input length must equal the domain size");
        for (c, s) in coeffs.iter_mut().zip(&self.shift_powers) {
            *c *= *s;
        }
        self.fft(coeffs);
    }

    /// Inverse of [`Self::coset_fft`].
    pub fn coset_ifft(&self, values: &mut [Fr]) {
        assert_eq!(values.len(), self.n, "input length must equal the domain size");
        self.ifft(values);
        for (c, s) in values.iter_mut().zip(&self.shift_inv_powers) {
            *c *= *s;
        }
    }
}
