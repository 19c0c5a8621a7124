//! Metrics.
//!
//! Metrics are evaluation helpers; they never feed back into the gradient step.

use crate::{Error, MatrixView, Result};

/// Index of the largest value in `row`.
///
/// Ties resolve to the first maximal index. Panics if `row` is empty.
#[inline]
pub fn argmax(row: &[f32]) -> usize {
    assert!(!row.is_empty(), "argmax requires at least 1 value");
    let mut best = 0;
    for (i, &v) in row.iter().enumerate().skip(1) {
        if v > row[best] {
            best = i;
        }
    }
    best
}

/// Row-wise argmax of a `(rows, cols)` matrix.
pub fn argmax_rows(m: MatrixView<'_>) -> Vec<usize> {
    (0..m.rows()).map(|i| argmax(m.row(i))).collect()
}

/// Classification accuracy: `(total - mismatches) / total`, in `[0, 1]`.
pub fn accuracy(predicted: &[usize], actual: &[usize]) -> Result<f32> {
    if predicted.len() != actual.len() {
        return Err(Error::ShapeMismatch {
            what: "predictions",
            got: predicted.len(),
            expected: actual.len(),
        });
    }
    if actual.is_empty() {
        return Err(Error::InvalidData(
            "accuracy requires at least one example".to_owned(),
        ));
    }

    let incorrect = predicted
        .iter()
        .zip(actual)
        .filter(|(p, a)| p != a)
        .count();
    let total = actual.len();
    Ok((total - incorrect) as f32 / total as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Matrix;

    #[test]
    fn argmax_prefers_first_of_ties() {
        assert_eq!(argmax(&[0.2, 0.5, 0.5]), 1);
        assert_eq!(argmax(&[3.0]), 0);
    }

    #[test]
    fn argmax_rows_reads_each_row() {
        let m = Matrix::from_flat(vec![0.1, 0.9, 0.8, 0.2, 0.5, 0.5], 3, 2).unwrap();
        assert_eq!(argmax_rows(m.view()), vec![1, 0, 0]);
    }

    #[test]
    fn accuracy_bounds() {
        assert_eq!(accuracy(&[0, 1, 2], &[0, 1, 2]).unwrap(), 1.0);
        assert_eq!(accuracy(&[1, 2, 0], &[0, 1, 2]).unwrap(), 0.0);
        assert_eq!(accuracy(&[0, 1, 0, 0], &[0, 1, 2, 2]).unwrap(), 0.5);
    }

    #[test]
    fn accuracy_rejects_length_mismatch() {
        assert!(matches!(
            accuracy(&[0, 1], &[0]),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(accuracy(&[], &[]).is_err());
    }
}
