use crate::error::{PairMapError, Result};
use crate::intermediate::Intermediate;

/// The opaque similarity-scoring collaborator.
///
/// Computing a pairwise score is explicitly out of scope for this crate (see the scope note in
/// the crate docs): the algorithm only needs *some* symmetric N×N matrix of values in roughly
/// `[0, 1]`, and treats this trait as the seam across which a real cheminformatics backend (or,
/// in tests, a deterministic stand-in) is plugged in.
pub trait ScoreProvider {
    /// Computes the full symmetric score matrix for `intermediates`.
    ///
    /// `jobs` is forwarded verbatim from [`crate::config::PairMapConfig::jobs`]; this trait does
    /// not interpret it, it is solely a hint for the implementor's own parallelism.
    fn score_matrix(&self, intermediates: &[Intermediate], jobs: usize) -> Vec<Vec<f64>>;
}

/// An N×N symmetric similarity score matrix, validated against an expected size.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    values: Vec<Vec<f64>>,
}

impl ScoreMatrix {
    /// Wraps `values`, checking that it is exactly `expected x expected`.
    pub fn from_rows(values: Vec<Vec<f64>>, expected: usize) -> Result<Self> {
        if values.len() != expected {
            return Err(PairMapError::CustomMatrixShapeMismatch {
                expected,
                found_rows: values.len(),
                found_cols: values.first().map_or(0, Vec::len),
            });
        }
        for row in &values {
            if row.len() != expected {
                return Err(PairMapError::CustomMatrixShapeMismatch {
                    expected,
                    found_rows: values.len(),
                    found_cols: row.len(),
                });
            }
        }
        Ok(ScoreMatrix { values })
    }

    /// The raw similarity score between `u` and `v`, unrounded.
    pub fn score(&self, u: usize, v: usize) -> f64 {
        self.values[u][v]
    }

    /// The similarity score between `u` and `v`, rounded to two decimal places.
    ///
    /// Edges always carry this rounded value, never the raw score.
    pub fn rounded_score(&self, u: usize, v: usize) -> f64 {
        round2(self.score(u, v))
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }
}

/// Rounds `x` to two decimal places, matching `numpy.round(x, decimals=2)` half-to-even-adjacent
/// behavior closely enough for the score domain (values are similarity scores, not currency).
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
