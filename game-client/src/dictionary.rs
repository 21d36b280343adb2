use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use game_core::WordBank;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// A source that can confirm a word exists.
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(true)` only when the provider positively confirms the word.
    async fn lookup(&self, word: &str) -> Result<bool, LookupError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    FreeDictionary,
    DictionaryApiDev,
    Datamuse,
}

impl ProviderKind {
    pub fn all() -> [ProviderKind; 3] {
        [
            ProviderKind::FreeDictionary,
            ProviderKind::DictionaryApiDev,
            ProviderKind::Datamuse,
        ]
    }

    pub fn base_url(self) -> &'static str {
        match self {
            ProviderKind::FreeDictionary => "https://freedictionaryapi.com/api/v1/entries/en/",
            ProviderKind::DictionaryApiDev => "https://api.dictionaryapi.dev/api/v2/entries/en/",
            ProviderKind::Datamuse => "https://api.datamuse.com/words?max=1&sp=",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::FreeDictionary => "freedictionaryapi.com",
            ProviderKind::DictionaryApiDev => "dictionaryapi.dev",
            ProviderKind::Datamuse => "datamuse.com",
        }
    }

    /// Whether a successful response body confirms `word`.
    pub fn confirms(self, body: &Value, word: &str) -> bool {
        match self {
            ProviderKind::FreeDictionary => body
                .get("entries")
                .and_then(Value::as_array)
                .is_some_and(|entries| !entries.is_empty()),
            ProviderKind::DictionaryApiDev => {
                body.as_array().is_some_and(|entries| !entries.is_empty())
                    && body.get("title").is_none()
            }
            ProviderKind::Datamuse => body.as_array().is_some_and(|entries| {
                entries.iter().any(|entry| {
                    entry
                        .get("word")
                        .and_then(Value::as_str)
                        .is_some_and(|found| found.eq_ignore_ascii_case(word))
                })
            }),
        }
    }
}

pub struct HttpDictionaryProvider {
    client: Client,
    kind: ProviderKind,
    base_url: String,
}

impl HttpDictionaryProvider {
    pub fn new(client: Client, kind: ProviderKind) -> Self {
        Self::with_base_url(client, kind, kind.base_url())
    }

    pub fn with_base_url(client: Client, kind: ProviderKind, base_url: impl Into<String>) -> Self {
        Self {
            client,
            kind,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DictionaryProvider for HttpDictionaryProvider {
    fn name(&self) -> &str {
        self.kind.name()
    }

    async fn lookup(&self, word: &str) -> Result<bool, LookupError> {
        let word = word.to_lowercase();
        let url = format!("{}{}", self.base_url, word);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            tracing::debug!("{} returned status {} for '{}'", self.name(), response.status(), word);
            return Ok(false);
        }

        let body: Value = response.json().await?;
        Ok(self.kind.confirms(&body, &word))
    }
}

/// Bounded memo of lookup results. When full, the oldest inserted word is evicted.
#[derive(Debug)]
pub struct ValidationCache {
    capacity: usize,
    entries: HashMap<String, bool>,
    order: VecDeque<String>,
}

impl ValidationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, word: &str) -> Option<bool> {
        self.entries.get(word).copied()
    }

    pub fn insert(&mut self, word: String, valid: bool) {
        if self.capacity == 0 {
            return;
        }
        if let Some(existing) = self.entries.get_mut(&word) {
            *existing = valid;
            return;
        }

        while self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(word.clone());
        self.entries.insert(word, valid);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decides whether a guess is a real word: the built-in vocabulary first, then the cache,
/// then each remote provider in turn.
pub struct DictionaryValidator {
    word_bank: Arc<WordBank>,
    providers: Vec<Box<dyn DictionaryProvider>>,
    timeout: Duration,
    cache: Mutex<ValidationCache>,
}

impl DictionaryValidator {
    pub fn new(
        word_bank: Arc<WordBank>,
        providers: Vec<Box<dyn DictionaryProvider>>,
        timeout: Duration,
        cache_capacity: usize,
    ) -> Self {
        Self {
            word_bank,
            providers,
            timeout,
            cache: Mutex::new(ValidationCache::new(cache_capacity)),
        }
    }

    /// Validator wired to the public dictionary APIs, or to none in offline mode.
    pub fn from_config(word_bank: Arc<WordBank>, config: &Config) -> Self {
        let providers: Vec<Box<dyn DictionaryProvider>> = if config.offline {
            Vec::new()
        } else {
            let client = Client::new();
            ProviderKind::all()
                .into_iter()
                .map(|kind| {
                    Box::new(HttpDictionaryProvider::new(client.clone(), kind)) as Box<dyn DictionaryProvider>
                })
                .collect()
        };

        Self::new(
            word_bank,
            providers,
            config.word_check_timeout,
            config.validation_cache_capacity,
        )
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    pub async fn validate(&self, word: &str) -> bool {
        let word = word.trim().to_uppercase();

        if self.word_bank.is_known_word(&word) {
            return true;
        }

        if let Some(valid) = self.cache.lock().await.get(&word) {
            tracing::debug!("Using cached validation for '{}': {}", word, valid);
            return valid;
        }

        for provider in &self.providers {
            match tokio::time::timeout(self.timeout, provider.lookup(&word)).await {
                Ok(Ok(true)) => {
                    tracing::debug!("'{}' confirmed by {}", word, provider.name());
                    self.cache.lock().await.insert(word, true);
                    return true;
                }
                Ok(Ok(false)) => {
                    tracing::debug!("'{}' not found by {}", word, provider.name());
                }
                Ok(Err(e)) => {
                    tracing::debug!("Lookup of '{}' via {} failed: {}", word, provider.name(), e);
                }
                Err(_) => {
                    tracing::debug!(
                        "Lookup of '{}' via {} timed out after {}ms",
                        word,
                        provider.name(),
                        self.timeout.as_millis()
                    );
                }
            }
        }

        self.cache.lock().await.insert(word, false);
        false
    }

    #[cfg(test)]
    async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }
}
