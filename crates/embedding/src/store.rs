use crate::error::{EmbeddingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const EMBEDDING_STORE_SCHEMA_VERSION: u32 = 1;

/// Pretrained token → vector store with a declared dimensionality.
///
/// Lookup by exact token string. A token that is absent is reported as a
/// miss, distinct from a token whose stored vector happens to be zero.
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedStore {
    schema_version: u32,
    dimension: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl EmbeddingStore {
    /// Loads a store from disk, dispatching on the file extension: `.json`
    /// for the schema-versioned JSON format, anything else for the word2vec
    /// text format.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let store = if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            Self::from_json_slice(&bytes)?
        } else {
            let text = String::from_utf8(bytes).map_err(|_| {
                EmbeddingError::InvalidStore(format!("{} is not valid UTF-8", path.display()))
            })?;
            Self::from_text(&text)?
        };
        log::info!(
            "Loaded embedding store from {} ({} tokens, dimension {})",
            path.display(),
            store.len(),
            store.dimension()
        );
        Ok(store)
    }

    /// Builds a store directly from token vectors. Useful for tests that
    /// need a small deterministic model.
    pub fn from_vectors(dimension: usize, vectors: HashMap<String, Vec<f32>>) -> Result<Self> {
        if dimension == 0 {
            return Err(EmbeddingError::InvalidStore(
                "dimension must be positive".to_string(),
            ));
        }
        for vector in vectors.values() {
            if vector.len() != dimension {
                return Err(EmbeddingError::InvalidDimension {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
        }
        Ok(Self { dimension, vectors })
    }

    fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let persisted: PersistedStore = serde_json::from_slice(bytes)?;
        if persisted.schema_version != EMBEDDING_STORE_SCHEMA_VERSION {
            return Err(EmbeddingError::InvalidStore(format!(
                "Unsupported embedding store schema_version {} (expected {EMBEDDING_STORE_SCHEMA_VERSION})",
                persisted.schema_version
            )));
        }
        Self::from_vectors(persisted.dimension, persisted.vectors)
    }

    /// Parses the word2vec text format: a `<count> <dim>` header line, then
    /// one `token v1 .. vD` row per line.
    fn from_text(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

        let (_, header) = lines.next().ok_or_else(|| {
            EmbeddingError::InvalidStore("empty embedding store file".to_string())
        })?;
        let mut parts = header.split_whitespace();
        let count: usize = parse_header_field(parts.next(), header)?;
        let dimension: usize = parse_header_field(parts.next(), header)?;
        if dimension == 0 {
            return Err(EmbeddingError::InvalidStore(
                "dimension must be positive".to_string(),
            ));
        }

        let mut vectors = HashMap::with_capacity(count);
        for (line_no, line) in lines {
            let mut fields = line.split_whitespace();
            let Some(token) = fields.next().map(str::to_string) else {
                continue;
            };
            let components: Vec<f32> = fields
                .map(|field| {
                    field.parse::<f32>().map_err(|e| {
                        EmbeddingError::InvalidStore(format!(
                            "line {}: bad vector component {field:?}: {e}",
                            line_no + 1
                        ))
                    })
                })
                .collect::<Result<_>>()?;
            if components.len() != dimension {
                return Err(EmbeddingError::InvalidStore(format!(
                    "line {}: expected {dimension} components, got {}",
                    line_no + 1,
                    components.len()
                )));
            }
            if vectors.insert(token, components).is_some() {
                log::debug!("Duplicate token on line {}, keeping the last", line_no + 1);
            }
        }

        if vectors.len() != count {
            return Err(EmbeddingError::InvalidStore(format!(
                "header declares {count} tokens, found {}",
                vectors.len()
            )));
        }

        Ok(Self { dimension, vectors })
    }

    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Exact-string lookup. `None` means the token is not in the store.
    #[must_use]
    pub fn lookup(&self, token: &str) -> Option<&[f32]> {
        self.vectors.get(token).map(Vec::as_slice)
    }
}

fn parse_header_field(field: Option<&str>, header: &str) -> Result<usize> {
    field
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(|| {
            EmbeddingError::InvalidStore(format!(
                "bad header {header:?}, expected \"<count> <dim>\""
            ))
        })
}
