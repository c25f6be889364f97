use serde::Serialize;
use std::io::{self, Write};
use textclust_corpus::TokenSequence;
use textclust_engine::{ClusterRanking, Clustering};

/// Console/JSON view of one clustering run, clusters ordered tightest
/// first.
#[derive(Debug, Serialize)]
pub struct ClusterReport {
    pub sentence_count: usize,
    pub cluster_count: usize,
    pub iterations: usize,
    pub converged: bool,
    pub clusters: Vec<ClusterSummary>,
}

#[derive(Debug, Serialize)]
pub struct ClusterSummary {
    pub label: usize,
    pub mean_distance: f32,
    pub size: usize,
    pub samples: Vec<String>,
}

impl ClusterReport {
    /// Resolves ranked member indices back to display sentences, keeping at
    /// most `samples` per cluster.
    pub fn build(
        sentences: &[TokenSequence],
        clustering: &Clustering,
        rankings: &[ClusterRanking],
        samples: usize,
    ) -> Self {
        let clusters = rankings
            .iter()
            .map(|ranking| ClusterSummary {
                label: ranking.label,
                mean_distance: ranking.mean_distance,
                size: ranking.members.len(),
                samples: ranking
                    .members
                    .iter()
                    .take(samples)
                    .filter_map(|&index| sentences.get(index).map(TokenSequence::display))
                    .collect(),
            })
            .collect();

        Self {
            sentence_count: sentences.len(),
            cluster_count: clustering.centroids.nrows(),
            iterations: clustering.iterations,
            converged: clustering.converged,
            clusters,
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Sentences: {}", self.sentence_count)?;
        writeln!(out, "Clusters: {}", self.cluster_count)?;
        for cluster in &self.clusters {
            writeln!(
                out,
                "cluster {} mean_distance:{:.6} :",
                cluster.label, cluster.mean_distance
            )?;
            for sentence in &cluster.samples {
                writeln!(out, "{sentence}")?;
            }
            writeln!(out, "---------")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sentences(words: &[&[&str]]) -> Vec<TokenSequence> {
        words
            .iter()
            .map(|tokens| TokenSequence::new(tokens.iter().map(|t| (*t).to_string()).collect()))
            .collect()
    }

    fn fixture() -> (Vec<TokenSequence>, Clustering, Vec<ClusterRanking>) {
        let sentences = sentences(&[&["a", "b"], &["c"], &["a", "c"]]);
        let clustering = Clustering {
            labels: vec![0, 1, 0],
            centroids: array![[1.0f32, 0.0], [0.0, 1.0]],
            iterations: 2,
            converged: true,
        };
        let rankings = vec![
            ClusterRanking {
                label: 1,
                mean_distance: 0.0,
                members: vec![1],
            },
            ClusterRanking {
                label: 0,
                mean_distance: 0.5,
                members: vec![0, 2],
            },
        ];
        (sentences, clustering, rankings)
    }

    #[test]
    fn build_keeps_ranking_order_and_joins_tokens() {
        let (sentences, clustering, rankings) = fixture();
        let report = ClusterReport::build(&sentences, &clustering, &rankings, 10);

        assert_eq!(report.sentence_count, 3);
        assert_eq!(report.cluster_count, 2);
        assert_eq!(report.clusters[0].label, 1);
        assert_eq!(report.clusters[0].samples, vec!["c"]);
        assert_eq!(report.clusters[1].samples, vec!["ab", "ac"]);
        assert_eq!(report.clusters[1].size, 2);
    }

    #[test]
    fn build_caps_samples_per_cluster() {
        let (sentences, clustering, rankings) = fixture();
        let report = ClusterReport::build(&sentences, &clustering, &rankings, 1);

        assert_eq!(report.clusters[1].size, 2);
        assert_eq!(report.clusters[1].samples, vec!["ab"]);
    }

    #[test]
    fn render_emits_headers_and_separators() {
        let (sentences, clustering, rankings) = fixture();
        let report = ClusterReport::build(&sentences, &clustering, &rankings, 10);

        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Sentences: 3\nClusters: 2\n"));
        assert!(text.contains("cluster 1 mean_distance:0.000000 :\nc\n---------\n"));
        assert!(text.contains("cluster 0 mean_distance:0.500000 :\nab\nac\n---------\n"));
    }
}
