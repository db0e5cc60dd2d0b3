use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use wordwise_lib::config::AppConfig;
use wordwise_lib::enrichment::{Enricher, GenerativeClient};
use wordwise_lib::storage::FileStore;
use wordwise_lib::vocabulary::{Dataset, WordEntry};
use wordwise_lib::VocabularyStore;

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: PathBuf,
    pub config: AppConfig,
    pub store: VocabularyStore,
}

impl App {
    /// Open the store in `data_dir`, or the platform default
    pub fn new(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => FileStore::default_data_dir().context("Failed to get data directory")?,
        };

        let config = AppConfig::load_from_dir(&data_dir)
            .with_context(|| format!("Failed to load config from {}", data_dir.display()))?;

        // A data_dir in config.toml redirects the store itself
        let store_dir = config.data_dir.clone().unwrap_or_else(|| data_dir.clone());
        let file_store = FileStore::new(store_dir.clone());
        file_store
            .init()
            .with_context(|| format!("Failed to initialize {}", store_dir.display()))?;

        let dataset = match &config.dataset_path {
            Some(path) => Dataset::from_path(path)
                .with_context(|| format!("Failed to read word list {}", path.display()))?,
            None => Dataset::bundled(),
        };

        let mut store = VocabularyStore::open(Box::new(file_store), dataset);
        if !store.has_saved_state() {
            let defaults = config.session.to_session_config();
            store.set_session_length(defaults.length);
            store.set_smart_mode(defaults.smart);
        }

        Ok(Self {
            data_dir: store_dir,
            config,
            store,
        })
    }

    /// Find a word by exact id, falling back to a case-insensitive match
    pub fn find_word(&self, name: &str) -> Result<WordEntry> {
        let name = name.trim();
        if let Some(word) = self.store.word(name) {
            return Ok(word.clone());
        }

        let lower = name.to_lowercase();
        let matches: Vec<&WordEntry> = self
            .store
            .words()
            .iter()
            .filter(|w| w.id.to_lowercase() == lower)
            .collect();

        match matches.len() {
            0 => bail!("No word '{}' in the catalog", name),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous word '{}'. Matches: {}",
                name,
                matches
                    .iter()
                    .map(|w| w.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Enrichment backed by the configured service and the store's caches
    pub fn enricher(&self) -> Result<Enricher> {
        let client = GenerativeClient::from_config(&self.config.enrichment)
            .context("Enrichment service is not configured")?;
        Ok(Enricher::new(
            Arc::new(client),
            self.store.definition_cache(),
            self.store.quiz_cache(),
        ))
    }
}
