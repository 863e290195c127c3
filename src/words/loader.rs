use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tokio::fs;
use crate::words::{WordCatalog, WordEntry};
use crate::utils::{GameError, GameResult};
use tracing::{info, warn, debug};

/// On-disk shape of a word list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordListFile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub words: Vec<RawWordEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWordEntry {
    pub word: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub word_count: usize,
}

pub struct CatalogLoader {
    words_directory: PathBuf,
}

impl CatalogLoader {
    pub fn new<P: AsRef<Path>>(words_directory: P) -> Self {
        Self {
            words_directory: words_directory.as_ref().to_path_buf(),
        }
    }

    pub async fn load_catalog(&self, catalog_id: &str) -> GameResult<WordCatalog> {
        let path = self.catalog_path(catalog_id);

        if !path.exists() {
            return Err(GameError::catalog(format!("Word list not found: {}", catalog_id)));
        }

        Self::load_file(&path).await
    }

    pub async fn load_file<P: AsRef<Path>>(path: P) -> GameResult<WordCatalog> {
        let path = path.as_ref();
        info!("Loading word list from: {:?}", path);

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| GameError::catalog(format!("Failed to read word list: {}", e)))?;

        let file: WordListFile = serde_json::from_str(&content)
            .map_err(|e| GameError::catalog(format!("Failed to parse word list JSON: {}", e)))?;

        let catalog = Self::into_catalog(file)?;
        info!("Loaded word list '{}' with {} words", catalog.name, catalog.len());
        Ok(catalog)
    }

    pub async fn list_available_catalogs(&self) -> GameResult<Vec<CatalogMetadata>> {
        debug!("Scanning for word lists in: {:?}", self.words_directory);

        if !self.words_directory.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.words_directory)
            .await
            .map_err(|e| GameError::catalog(format!("Failed to read words directory: {}", e)))?;

        let mut catalogs = Vec::new();

        while let Some(entry) = entries.next_entry().await
            .map_err(|e| GameError::catalog(format!("Failed to read directory entry: {}", e)))? {

            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                match Self::load_metadata(&path).await {
                    Ok(metadata) => catalogs.push(metadata),
                    Err(e) => {
                        warn!("Skipping word list at {:?}: {}", path, e);
                        continue;
                    }
                }
            }
        }

        catalogs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(catalogs)
    }

    fn catalog_path(&self, catalog_id: &str) -> PathBuf {
        self.words_directory.join(format!("{}.json", catalog_id))
    }

    fn into_catalog(file: WordListFile) -> GameResult<WordCatalog> {
        let entries = file
            .words
            .into_iter()
            .map(|raw| WordEntry::new(raw.word, raw.description))
            .collect::<GameResult<Vec<_>>>()?;

        WordCatalog::new(file.name, entries)
    }

    async fn load_metadata(path: &Path) -> GameResult<CatalogMetadata> {
        let content = fs::read_to_string(path).await?;
        let file: WordListFile = serde_json::from_str(&content)?;

        Ok(CatalogMetadata {
            id: path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string(),
            name: file.name,
            description: file.description,
            word_count: file.words.len(),
        })
    }
}
