//! Small GEMM wrapper used by the gradient step, cost pass and prediction.
//!
//! This module provides a single abstraction over matrix multiplication:
//! - default: a simple, safe triple-loop implementation
//! - optional: a faster backend via the `matrixmultiply` feature
//!
//! Operands are described by strides so a row-major buffer can be read as its own
//! transpose without copying (`X^T * diff` in the gradient step).

/// A strided, read-only view of a matrix operand.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operand<'a> {
    pub(crate) data: &'a [f32],
    pub(crate) row_stride: usize,
    pub(crate) col_stride: usize,
}

impl<'a> Operand<'a> {
    /// Row-major buffer with `cols` columns.
    #[inline]
    pub(crate) fn row_major(data: &'a [f32], cols: usize) -> Self {
        Self {
            data,
            row_stride: cols,
            col_stride: 1,
        }
    }

    /// Row-major buffer with `cols` columns, read as its transpose.
    #[inline]
    pub(crate) fn transposed(data: &'a [f32], cols: usize) -> Self {
        Self {
            data,
            row_stride: 1,
            col_stride: cols,
        }
    }
}

/// Computes `c = a * b` where `a` is `(m, k)`, `b` is `(k, n)` and `c` is a row-major
/// `(m, n)` buffer. `c` is overwritten.
#[inline]
pub(crate) fn gemm(
    m: usize,
    n: usize,
    k: usize,
    a: Operand<'_>,
    b: Operand<'_>,
    c: &mut [f32],
) {
    debug_assert_eq!(c.len(), m * n);
    if m == 0 || n == 0 {
        return;
    }
    if k == 0 {
        c.fill(0.0);
        return;
    }

    #[cfg(feature = "matrixmultiply")]
    {
        // matrixmultiply supports arbitrary strides; with beta = 0 it never reads `c`.
        unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                1.0,
                a.data.as_ptr(),
                a.row_stride as isize,
                a.col_stride as isize,
                b.data.as_ptr(),
                b.row_stride as isize,
                b.col_stride as isize,
                0.0,
                c.as_mut_ptr(),
                n as isize,
                1,
            );
        }
    }

    #[cfg(not(feature = "matrixmultiply"))]
    for i in 0..m {
        let a0 = i * a.row_stride;
        for j in 0..n {
            let b0 = j * b.col_stride;
            let mut acc = 0.0_f32;
            for p in 0..k {
                let av = a.data[a0 + p * a.col_stride];
                let bv = b.data[p * b.row_stride + b0];
                acc = av.mul_add(bv, acc);
            }
            c[i * n + j] = acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemm_matches_hand_computed_product() {
        // (2,3) * (3,2)
        let a = [1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0_f32, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = [0.0_f32; 4];
        gemm(
            2,
            2,
            3,
            Operand::row_major(&a, 3),
            Operand::row_major(&b, 2),
            &mut c,
        );
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn transposed_operand_reads_columns_as_rows() {
        // a is (2,3); a^T * a is (3,3).
        let a = [1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut c = [0.0_f32; 9];
        gemm(
            3,
            3,
            2,
            Operand::transposed(&a, 3),
            Operand::row_major(&a, 3),
            &mut c,
        );
        assert_eq!(c, [17.0, 22.0, 27.0, 22.0, 29.0, 36.0, 27.0, 36.0, 45.0]);
    }
}
