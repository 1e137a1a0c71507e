//! Dimensionality reduction (§4.6 "reduce dimensionality with a non-linear
//! projection"): a fixed random projection (Johnson-Lindenstrauss-style)
//! with a `tanh` nonlinearity applied to the projected coordinates.

/// Deterministic pseudo-random projection matrix generator, seeded so the
/// same `(from_dim, to_dim)` pair always yields the same matrix.
fn projection_matrix(from_dim: usize, to_dim: usize) -> Vec<Vec<f32>> {
    let mut state: u64 = 0x9e3779b97f4a7c15 ^ ((from_dim as u64) << 32) ^ to_dim as u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    (0..to_dim)
        .map(|_| {
            (0..from_dim)
                .map(|_| {
                    let bits = next();
                    // Map to roughly N(0, 1/to_dim) via a centered uniform draw.
                    let unit = (bits >> 11) as f64 / (1u64 << 53) as f64;
                    ((unit - 0.5) * 2.0 / (to_dim as f64).sqrt()) as f32
                })
                .collect()
        })
        .collect()
}

/// Project `vectors` (each `from_dim`-wide) down to `to_dim` dimensions.
/// A no-op when `to_dim >= from_dim`.
pub fn project(vectors: &[Vec<f32>], to_dim: usize) -> Vec<Vec<f32>> {
    let Some(from_dim) = vectors.first().map(|v| v.len()) else {
        return Vec::new();
    };
    if to_dim >= from_dim {
        return vectors.to_vec();
    }

    let matrix = projection_matrix(from_dim, to_dim);
    vectors
        .iter()
        .map(|v| {
            matrix
                .iter()
                .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum::<f32>().tanh())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_to_requested_dimension() {
        let vectors = vec![vec![1.0, 0.0, 0.5, -0.3], vec![0.0, 1.0, -0.5, 0.3]];
        let reduced = project(&vectors, 2);
        assert_eq!(reduced.len(), 2);
        assert!(reduced.iter().all(|v| v.len() == 2));
    }

    #[test]
    fn is_deterministic_across_calls() {
        let vectors = vec![vec![0.2, 0.4, 0.6, 0.8]];
        assert_eq!(project(&vectors, 2), project(&vectors, 2));
    }

    #[test]
    fn no_op_when_target_dim_not_smaller() {
        let vectors = vec![vec![1.0, 2.0]];
        assert_eq!(project(&vectors, 4), vectors);
    }

    #[test]
    fn output_is_bounded_by_tanh() {
        let vectors = vec![vec![100.0, -100.0, 50.0, -50.0]];
        let reduced = project(&vectors, 2);
        assert!(reduced[0].iter().all(|x| x.abs() <= 1.0));
    }
}
