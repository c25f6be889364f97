use crate::kmeans::Clustering;
use crate::metrics::euclidean_distance;
use ndarray::ArrayView2;
use std::cmp::Ordering;

/// Per-cluster cohesion summary. Lower mean distance means a tighter
/// cluster. Members are vector indices in their original processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRanking {
    pub label: usize,
    pub mean_distance: f32,
    pub members: Vec<usize>,
}

/// Ranks clusters by mean member-to-centroid Euclidean distance, tightest
/// first. Ties sort by label index; clusters that ended up empty are
/// omitted.
#[must_use]
pub fn rank_clusters(clustering: &Clustering, vectors: ArrayView2<'_, f32>) -> Vec<ClusterRanking> {
    let k = clustering.centroids.nrows();
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (index, &label) in clustering.labels.iter().enumerate() {
        members[label].push(index);
    }

    let mut rankings: Vec<ClusterRanking> = members
        .into_iter()
        .enumerate()
        .filter(|(_, member_indices)| !member_indices.is_empty())
        .map(|(label, member_indices)| {
            let centroid = clustering.centroids.row(label);
            let total: f32 = member_indices
                .iter()
                .map(|&index| euclidean_distance(vectors.row(index), centroid))
                .sum();
            let mean_distance = total / member_indices.len() as f32;
            ClusterRanking {
                label,
                mean_distance,
                members: member_indices,
            }
        })
        .collect();

    rankings.sort_by(|a, b| {
        a.mean_distance
            .partial_cmp(&b.mean_distance)
            .unwrap_or(Ordering::Equal)
            .then(a.label.cmp(&b.label))
    });
    rankings
}
