use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use textclust_corpus::{load_titles, Segmenter, UnicodeSegmenter, WhitespaceSegmenter};
use textclust_embedding::{vectorize_all, EmbeddingStore};
use textclust_engine::{cluster_count, rank_clusters, vector_matrix, KMeans};

mod report;

use report::ClusterReport;

#[derive(Parser)]
#[command(name = "textclust")]
#[command(about = "Clusters short text titles by semantic similarity", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the word embedding store (.json, or word2vec text format)
    model: PathBuf,

    /// Path to the corpus file, one candidate sentence per line
    corpus: PathBuf,

    /// Sample sentences to print per cluster
    #[arg(long, default_value_t = 10)]
    samples: usize,

    /// Iteration cap for k-means
    #[arg(long, default_value_t = textclust_engine::DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Segmenter used to tokenize raw lines
    #[arg(long, value_enum, default_value_t = SegmenterKind::Unicode)]
    segmenter: SegmenterKind,

    /// Output JSON format
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for the report)
    #[arg(long)]
    quiet: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum SegmenterKind {
    /// Unicode word boundaries (handles CJK and multi-byte text)
    Unicode,
    /// Split on whitespace (corpus is already tokenized)
    Whitespace,
}

impl SegmenterKind {
    fn build(self) -> Box<dyn Segmenter> {
        match self {
            SegmenterKind::Unicode => Box::new(UnicodeSegmenter),
            SegmenterKind::Whitespace => Box::new(WhitespaceSegmenter),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let store = EmbeddingStore::load(&cli.model)
        .await
        .context("Failed to load embedding store")?;
    let segmenter = cli.segmenter.build();
    let sentences = load_titles(&cli.corpus, segmenter.as_ref())
        .await
        .context("Failed to load corpus")?;

    let vectors = vectorize_all(&store, &sentences).context("Failed to vectorize sentences")?;
    let matrix =
        vector_matrix(&vectors, store.dimension()).context("Failed to pack sentence vectors")?;

    let k = cluster_count(sentences.len());
    log::info!("Clustering {} sentences into {k} clusters", sentences.len());

    let clustering = KMeans::new(k)
        .with_max_iterations(cli.max_iterations)
        .fit(matrix.view())
        .context("Clustering failed")?;
    let rankings = rank_clusters(&clustering, matrix.view());

    let report = ClusterReport::build(&sentences, &clustering, &rankings, cli.samples);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let stdout = std::io::stdout();
        report.render(&mut stdout.lock())?;
    }

    Ok(())
}
