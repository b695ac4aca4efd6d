//! Row-major matrix kernels over flat slices.
//!
//! The suffix names the layout of the two operands: `n` for as stored, `t` for
//! transposed. `a` is always `(m, k)` after its layout is applied, `b` is
//! `(k, n)`, and the result is `(m, n)`.

use crate::ops::traits::Element;

/// `a · bᵀ` with `a: (m, k)` and `b` stored as `(n, k)`.
pub(crate) fn matmul_nt<T: Element>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); m * n];
    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let b_row = &b[j * k..(j + 1) * k];
            out[i * n + j] = a_row.iter().zip(b_row).map(|(&x, &y)| x * y).sum();
        }
    }
    out
}

/// `a · b` with `a: (m, k)` and `b: (k, n)`.
pub(crate) fn matmul_nn<T: Element>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); m * n];
    for i in 0..m {
        let out_row = &mut out[i * n..(i + 1) * n];
        for p in 0..k {
            let a_ip = a[i * k + p];
            let b_row = &b[p * n..(p + 1) * n];
            for (o, &b_pj) in out_row.iter_mut().zip(b_row) {
                *o += a_ip * b_pj;
            }
        }
    }
    out
}

/// `aᵀ · b` with `a` stored as `(k, m)` and `b: (k, n)`.
pub(crate) fn matmul_tn<T: Element>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); m * n];
    for p in 0..k {
        let a_row = &a[p * m..(p + 1) * m];
        let b_row = &b[p * n..(p + 1) * n];
        for (i, &a_pi) in a_row.iter().enumerate() {
            let out_row = &mut out[i * n..(i + 1) * n];
            for (o, &b_pj) in out_row.iter_mut().zip(b_row) {
                *o += a_pi * b_pj;
            }
        }
    }
    out
}
