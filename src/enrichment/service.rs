use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::cache::ContentCache;
use super::client::EnrichmentService;
use super::models::{QuizQuestion, WordDefinition};

/// How long a request waits on another caller's fetch of the same word
const IN_FLIGHT_WAIT: Duration = Duration::from_secs(10);

/// Cache-first resolver for definitions and quizzes.
///
/// Failed fetches return a placeholder and are not cached, so the next
/// request tries the service again.
#[derive(Clone)]
pub struct Enricher {
    service: Arc<dyn EnrichmentService>,
    definitions: ContentCache<WordDefinition>,
    quizzes: ContentCache<QuizQuestion>,
}

impl Enricher {
    pub fn new(
        service: Arc<dyn EnrichmentService>,
        definitions: ContentCache<WordDefinition>,
        quizzes: ContentCache<QuizQuestion>,
    ) -> Self {
        Self {
            service,
            definitions,
            quizzes,
        }
    }

    pub fn definitions(&self) -> &ContentCache<WordDefinition> {
        &self.definitions
    }

    pub fn quizzes(&self) -> &ContentCache<QuizQuestion> {
        &self.quizzes
    }

    pub async fn definition(&self, word: &str) -> WordDefinition {
        if let Some(cached) = self.definitions.get(word) {
            log::debug!("Definition for {} loaded from cache", word);
            return cached;
        }

        let mut started = self.definitions.begin_fetch(word);
        if !started {
            self.definitions.wait_for_fetch(word, IN_FLIGHT_WAIT).await;
            if let Some(cached) = self.definitions.get(word) {
                log::debug!("Definition for {} loaded after in-flight fetch", word);
                return cached;
            }
            started = self.definitions.begin_fetch(word);
        }

        let result = self.service.fetch_definition(word).await;
        if let Ok(definition) = &result {
            self.definitions.put(word, definition.clone());
        }
        if started {
            self.definitions.finish_fetch(word);
        }

        match result {
            Ok(definition) => definition,
            Err(e) if e.is_parse_failure() => {
                log::warn!("Could not parse definition for {}: {}", word, e);
                WordDefinition::unparsable()
            }
            Err(e) => {
                log::warn!("Could not load definition for {}: {}", word, e);
                WordDefinition::unavailable()
            }
        }
    }

    pub async fn quiz(&self, word: &str) -> QuizQuestion {
        if let Some(cached) = self.quizzes.get(word) {
            log::debug!("Quiz for {} loaded from cache", word);
            return cached;
        }

        let mut started = self.quizzes.begin_fetch(word);
        if !started {
            self.quizzes.wait_for_fetch(word, IN_FLIGHT_WAIT).await;
            if let Some(cached) = self.quizzes.get(word) {
                log::debug!("Quiz for {} loaded after in-flight fetch", word);
                return cached;
            }
            started = self.quizzes.begin_fetch(word);
        }

        let result = self.service.fetch_quiz(word).await;
        if let Ok(quiz) = &result {
            self.quizzes.put(word, quiz.clone());
        }
        if started {
            self.quizzes.finish_fetch(word);
        }

        match result {
            Ok(quiz) => quiz,
            Err(e) => {
                log::warn!("Could not load quiz for {}: {}", word, e);
                QuizQuestion::fallback(word)
            }
        }
    }

    /// Warm the definition cache in the background.
    ///
    /// Returns None when the word is already cached or being fetched.
    pub fn prefetch_definition(&self, word: &str) -> Option<JoinHandle<()>> {
        if self.definitions.contains(word) || !self.definitions.begin_fetch(word) {
            return None;
        }
        let service = Arc::clone(&self.service);
        let cache = self.definitions.clone();
        let word = word.to_string();
        Some(tokio::spawn(async move {
            match service.fetch_definition(&word).await {
                Ok(definition) => cache.put(&word, definition),
                Err(e) => log::debug!("Prefetch of definition for {} failed: {}", word, e),
            }
            cache.finish_fetch(&word);
        }))
    }

    pub fn prefetch_quiz(&self, word: &str) -> Option<JoinHandle<()>> {
        if self.quizzes.contains(word) || !self.quizzes.begin_fetch(word) {
            return None;
        }
        let service = Arc::clone(&self.service);
        let cache = self.quizzes.clone();
        let word = word.to_string();
        Some(tokio::spawn(async move {
            match service.fetch_quiz(&word).await {
                Ok(quiz) => cache.put(&word, quiz),
                Err(e) => log::debug!("Prefetch of quiz for {} failed: {}", word, e),
            }
            cache.finish_fetch(&word);
        }))
    }
}
