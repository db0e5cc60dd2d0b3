use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::models::{EnrichmentError, QuizQuestion, WordDefinition};
use super::parse::{parse_definition, parse_quiz};
use crate::config::EnrichmentConfig;

/// Source of definitions and quiz questions for a word
#[async_trait]
pub trait EnrichmentService: Send + Sync {
    async fn fetch_definition(&self, word: &str) -> Result<WordDefinition, EnrichmentError>;
    async fn fetch_quiz(&self, word: &str) -> Result<QuizQuestion, EnrichmentError>;
}

/// Client for a `generateContent`-style text generation API
pub struct GenerativeClient {
    client: Client,
    endpoint: String,
    models: Vec<String>,
    api_key: String,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
    }
}

impl GenerativeClient {
    /// Create a client, reading the API key from the configured variable
    pub fn from_config(config: &EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| EnrichmentError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    pub fn new(config: &EnrichmentConfig, api_key: String) -> Result<Self, EnrichmentError> {
        if config.models.is_empty() {
            return Err(EnrichmentError::NoModels);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            models: config.models.clone(),
            api_key,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn pick_model(&self) -> Result<&str, EnrichmentError> {
        self.models
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .ok_or(EnrichmentError::NoModels)
    }

    /// Send a prompt and return the first candidate's text
    pub async fn generate(&self, prompt: &str) -> Result<String, EnrichmentError> {
        let model = self.pick_model()?.to_string();
        let url = format!("{}/{}:generateContent", self.endpoint, model);
        log::debug!("Generating with model {}", model);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_p: 0.8,
                top_k: 40,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.first_text().ok_or(EnrichmentError::EmptyResponse)
    }
}

fn definition_prompt(word: &str) -> String {
    format!(
        r#"Define the word "{word}" including its English definition, Vietnamese translation, and usage examples.

Please respond with a JSON object in EXACTLY this format (no additional text before or after):
{{
  "englishDefinition": "A concise definition in English, including part of speech and key meanings",
  "vietnameseDefinition": "A concise Vietnamese translation",
  "examples": [
    "An example sentence using the word",
    "Another example sentence if available",
    "A third example if available"
  ]
}}

Make sure:
1. The JSON is valid and properly formatted
2. englishDefinition includes the word's part of speech and primary meaning
3. vietnameseDefinition is an accurate translation
4. examples array contains 1-3 practical usage examples"#
    )
}

fn quiz_prompt(word: &str) -> String {
    format!(
        "Quiz for word \"{word}\":\nQuestion: What is the meaning of \"{word}\"?\nA: \nB: \nC: \nD: \nCorrect:"
    )
}

#[async_trait]
impl EnrichmentService for GenerativeClient {
    async fn fetch_definition(&self, word: &str) -> Result<WordDefinition, EnrichmentError> {
        let text = self.generate(&definition_prompt(word)).await?;
        parse_definition(&text).inspect_err(|e| {
            log::debug!("Unparsable definition for {}: {} ({:?})", word, e, text);
        })
    }

    async fn fetch_quiz(&self, word: &str) -> Result<QuizQuestion, EnrichmentError> {
        let text = self.generate(&quiz_prompt(word)).await?;
        parse_quiz(&text)
    }
}
