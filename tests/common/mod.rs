use pairmap::{Intermediate, ScoreProvider};

/// A [`ScoreProvider`] that returns a fixed, caller-supplied matrix; stands in for the real
/// cheminformatics scoring collaborator across the integration tests with a plain fixture instead
/// of expensive external computation.
pub struct FixedScores(pub Vec<Vec<f64>>);

impl ScoreProvider for FixedScores {
    fn score_matrix(&self, _intermediates: &[Intermediate], _jobs: usize) -> Vec<Vec<f64>> {
        self.0.clone()
    }
}

pub fn anonymous_intermediates(n: usize) -> Vec<Intermediate> {
    (0..n).map(|_| Intermediate::anonymous()).collect()
}

/// Deterministic pseudo-random symmetric matrix: off-diagonal entries uniform in
/// `[floor, 1.0]`, 1.0 on the diagonal. `seed` drives `rand`'s `StdRng` via `seed_from_u64`, so
/// the same seed always yields the same matrix for a given `rand` release (`StdRng`'s algorithm
/// is not guaranteed stable across `rand` major versions, only deterministic within one).
pub fn random_symmetric_matrix(n: usize, seed: u64, floor: f64) -> Vec<Vec<f64>> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let mut matrix = vec![vec![1.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let value: f64 = rng.gen_range(floor..=1.0);
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }
    matrix
}
