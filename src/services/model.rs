use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Guards cosine similarity against division by zero
pub const EPSILON: f64 = 1e-10;

/// On-disk layout of the trained model
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    k_clusters: usize,
    feature_names: Vec<String>,
    centroids: Vec<Vec<f64>>,
}

/// Feature name → dimension index, fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct Vocabulary {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Builds a vocabulary, assigning indices in the order given
    ///
    /// Fails on duplicate names, since indices would no longer be unique.
    pub fn new(names: Vec<String>) -> AppResult<Self> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(AppError::ModelArtifact(format!(
                    "duplicate feature name '{}'",
                    name
                )));
            }
        }
        Ok(Self { names, index })
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Immutable recommendation model: vocabulary plus cluster centroids
///
/// Loaded once at startup and shared behind an `Arc`. Nothing mutates it after
/// construction, so concurrent requests read it without locking.
#[derive(Debug, Clone)]
pub struct RecommendationModel {
    vocabulary: Vocabulary,
    centroids: Vec<Vec<f64>>,
}

impl RecommendationModel {
    /// Creates a model, checking every centroid lives in the vocabulary's space
    pub fn new(vocabulary: Vocabulary, centroids: Vec<Vec<f64>>) -> AppResult<Self> {
        let dimension = vocabulary.len();
        if let Some((row, centroid)) = centroids
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != dimension)
        {
            return Err(AppError::ModelArtifact(format!(
                "centroid {} has length {}, expected {}",
                row,
                centroid.len(),
                dimension
            )));
        }

        Ok(Self {
            vocabulary,
            centroids,
        })
    }

    /// Loads the model artifact from a JSON file
    ///
    /// Any failure here is fatal: there is no fallback recommendation mode.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AppError::ModelArtifact(format!("cannot open {}: {}", path.display(), e))
        })?;

        let model = Self::from_reader(BufReader::new(file))?;

        tracing::info!(
            path = %path.display(),
            features = model.dimension(),
            clusters = model.cluster_count(),
            "Loaded recommendation model"
        );

        Ok(model)
    }

    /// Parses the artifact from any reader
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let artifact: ModelArtifact = serde_json::from_reader(reader)
            .map_err(|e| AppError::ModelArtifact(format!("unparsable artifact: {}", e)))?;
        Self::from_artifact(artifact)
    }

    /// Parses the artifact from an in-memory JSON string
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)
            .map_err(|e| AppError::ModelArtifact(format!("unparsable artifact: {}", e)))?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: ModelArtifact) -> AppResult<Self> {
        if artifact.centroids.len() != artifact.k_clusters {
            return Err(AppError::ModelArtifact(format!(
                "k_clusters is {} but {} centroids were provided",
                artifact.k_clusters,
                artifact.centroids.len()
            )));
        }

        let vocabulary = Vocabulary::new(artifact.feature_names)?;
        Self::new(vocabulary, artifact.centroids)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Vocabulary size, i.e. the length of every feature vector
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    pub fn cluster_count(&self) -> usize {
        self.centroids.len()
    }

    pub fn zero_vector(&self) -> Vec<f64> {
        vec![0.0; self.dimension()]
    }
}
