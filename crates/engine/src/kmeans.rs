use crate::error::{EngineError, Result};
use crate::metrics::euclidean_distance_squared;
use ndarray::{Array2, ArrayView2};

pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Data-dependent cluster count: `round(sqrt(n))`, clamped to `[1, n]`.
#[must_use]
pub fn cluster_count(n: usize) -> usize {
    let k = (n as f64).sqrt().round() as usize;
    k.clamp(1, n.max(1))
}

/// Packs index-aligned sentence vectors into an `N × D` matrix.
pub fn vector_matrix(vectors: &[Vec<f32>], dimension: usize) -> Result<Array2<f32>> {
    let mut flat = Vec::with_capacity(vectors.len() * dimension);
    for vector in vectors {
        if vector.len() != dimension {
            return Err(EngineError::InvalidDimension {
                expected: dimension,
                actual: vector.len(),
            });
        }
        flat.extend_from_slice(vector);
    }
    Array2::from_shape_vec((vectors.len(), dimension), flat)
        .map_err(|e| EngineError::Other(format!("Bad vector matrix shape: {e}")))
}

/// Lloyd's k-means over Euclidean distance.
///
/// Centroid seeding is deterministic farthest-point selection: the first
/// centroid is the first input point; each subsequent centroid is the point
/// with maximal distance to its nearest already-chosen centroid, lowest
/// index on ties. Assignment ties also resolve to the lowest label index,
/// and a cluster that loses all members keeps its previous centroid.
#[derive(Debug, Clone)]
pub struct KMeans {
    clusters: usize,
    max_iterations: usize,
}

/// Final cluster state: one label per input row, one centroid row per label.
#[derive(Debug, Clone)]
pub struct Clustering {
    pub labels: Vec<usize>,
    pub centroids: Array2<f32>,
    pub iterations: usize,
    pub converged: bool,
}

impl KMeans {
    #[must_use]
    pub fn new(clusters: usize) -> Self {
        Self {
            clusters,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Partitions the rows of `vectors` into `clusters` groups.
    ///
    /// Fails before iterating when the cluster count is zero or exceeds the
    /// number of points. Converges to a local optimum or stops at the
    /// iteration cap.
    pub fn fit(&self, vectors: ArrayView2<'_, f32>) -> Result<Clustering> {
        let points = vectors.nrows();
        let k = self.clusters;
        if k < 1 || k > points {
            return Err(EngineError::InvalidClusterCount {
                clusters: k,
                points,
            });
        }

        let mut centroids = seed_centroids(vectors, k);
        let mut labels = assign(vectors, &centroids);
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;
            centroids = recompute_centroids(vectors, &labels, &centroids, k);
            let next = assign(vectors, &centroids);
            if next == labels {
                converged = true;
                break;
            }
            labels = next;
        }

        if !converged {
            // Keep centroids consistent with the final assignment when the
            // iteration cap cuts the loop short.
            centroids = recompute_centroids(vectors, &labels, &centroids, k);
            log::warn!("k-means stopped at the iteration cap ({})", self.max_iterations);
        }

        log::debug!("k-means finished after {iterations} iterations (converged: {converged})");
        Ok(Clustering {
            labels,
            centroids,
            iterations,
            converged,
        })
    }
}

/// Deterministic farthest-point seeding, first input point first.
fn seed_centroids(vectors: ArrayView2<'_, f32>, k: usize) -> Array2<f32> {
    let n = vectors.nrows();
    let mut centroids = Array2::zeros((k, vectors.ncols()));
    centroids.row_mut(0).assign(&vectors.row(0));

    let mut min_distances = vec![f32::MAX; n];
    for c in 1..k {
        let last = centroids.row(c - 1);
        for (i, nearest) in min_distances.iter_mut().enumerate() {
            let d = euclidean_distance_squared(vectors.row(i), last);
            if d < *nearest {
                *nearest = d;
            }
        }

        let mut farthest = 0;
        for (i, nearest) in min_distances.iter().enumerate() {
            if *nearest > min_distances[farthest] {
                farthest = i;
            }
        }
        centroids.row_mut(c).assign(&vectors.row(farthest));
    }

    centroids
}

/// Assigns every row to its nearest centroid, lowest label on ties.
fn assign(vectors: ArrayView2<'_, f32>, centroids: &Array2<f32>) -> Vec<usize> {
    vectors
        .outer_iter()
        .map(|point| {
            let mut label = 0;
            let mut best = f32::MAX;
            for (candidate, centroid) in centroids.outer_iter().enumerate() {
                let d = euclidean_distance_squared(point, centroid);
                if d < best {
                    best = d;
                    label = candidate;
                }
            }
            label
        })
        .collect()
}

/// Recomputes centroids as member means. An emptied cluster keeps its
/// previous centroid.
fn recompute_centroids(
    vectors: ArrayView2<'_, f32>,
    labels: &[usize],
    previous: &Array2<f32>,
    k: usize,
) -> Array2<f32> {
    let mut sums = Array2::<f32>::zeros((k, vectors.ncols()));
    let mut counts = vec![0usize; k];

    for (i, &label) in labels.iter().enumerate() {
        counts[label] += 1;
        let mut row = sums.row_mut(label);
        row += &vectors.row(i);
    }

    for (label, &count) in counts.iter().enumerate() {
        if count == 0 {
            sums.row_mut(label).assign(&previous.row(label));
        } else {
            let count = count as f32;
            sums.row_mut(label).mapv_inplace(|v| v / count);
        }
    }

    sums
}
