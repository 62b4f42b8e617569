use super::types::{BookRecord, Genre};
use crate::config::{CatalogConfig, MAX_SEARCH_LIMIT};
use crate::error::{BookclubError, CatalogError, FailureReason, Result};
use futures::future::join_all;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;

/// Upper bound on documents requested from upstream per search
const MAX_FETCH: usize = 40;
const MAX_DESCRIPTION_CHARS: usize = 500;
const MAX_PUBLISHERS: usize = 3;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Documents are kept as raw values so one odd document can't sink the page
#[derive(Debug, Deserialize)]
struct SearchResponse {
    docs: Vec<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchDoc {
    title: Option<String>,
    author_name: Option<Vec<String>>,
    first_publish_year: Option<i32>,
    subject: Option<Vec<String>>,
    key: Option<String>,
    cover_i: Option<i64>,
    number_of_pages_median: Option<u32>,
    ratings_average: Option<f64>,
    publisher: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct WorkDetails {
    description: Option<DescriptionField>,
}

/// Works carry their description either as a bare string or a typed text value
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptionField {
    Text(String),
    Typed { value: String },
}

/// HTTP client for the Open Library search API
pub struct CatalogClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    description_timeout: Duration,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        Self::with_base_url(
            &config.base_url,
            Duration::from_secs(config.timeout_seconds),
            Duration::from_secs(config.description_timeout_seconds),
        )
    }

    pub fn with_base_url(base_url: &str, timeout: Duration, description_timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("bookclub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BookclubError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(CatalogClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            description_timeout,
        })
    }

    /// Search for books by genre, preserving upstream order.
    ///
    /// Returns at most `limit` records (capped at [`MAX_SEARCH_LIMIT`]). An
    /// empty list means the catalog had no titled matches for the genre.
    pub async fn search(&self, genre: Genre, limit: usize) -> std::result::Result<Vec<BookRecord>, CatalogError> {
        let limit = limit.min(MAX_SEARCH_LIMIT);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let books = self.search_subject(genre.subject(), limit).await?;
        if !books.is_empty() {
            return Ok(books);
        }

        match genre.fallback_subject() {
            Some(fallback) => {
                tracing::info!("No matches for '{}', trying '{}'", genre.subject(), fallback);
                self.search_subject(fallback, limit).await
            }
            None => Ok(books),
        }
    }

    async fn search_subject(&self, subject: &str, limit: usize) -> std::result::Result<Vec<BookRecord>, CatalogError> {
        let url = format!("{}/search.json", self.base_url);
        let fetch = (limit * 2).min(MAX_FETCH).to_string();

        tracing::debug!("GET {} subject={} limit={}", url, subject, fetch);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("subject", subject),
                ("limit", fetch.as_str()),
                ("has_fulltext", "true"),
                ("language", "eng"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                let err = CatalogError::from_reqwest(&e);
                tracing::warn!("Catalog search failed ({}): {}", err.reason, e);
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Catalog returned status {}", status);
            return Err(CatalogError::new(
                FailureReason::BadResponse,
                format!("status code {}", status.as_u16()),
            ));
        }

        let body = response.text().await.map_err(|e| {
            tracing::warn!("Unreadable catalog body: {}", e);
            CatalogError::new(FailureReason::BadResponse, "unreadable response body")
        })?;
        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Malformed catalog payload: {}", e);
            CatalogError::new(FailureReason::BadResponse, format!("malformed payload: {}", e))
        })?;

        let books: Vec<BookRecord> = parsed
            .docs
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value::<SearchDoc>(value) {
                Ok(doc) => self.to_record(doc),
                Err(e) => {
                    tracing::warn!("Skipping catalog document {}: {}", i, e);
                    None
                }
            })
            .take(limit)
            .collect();

        tracing::debug!("Catalog returned {} usable records for '{}'", books.len(), subject);
        Ok(books)
    }

    /// Skips documents without a usable title
    fn to_record(&self, doc: SearchDoc) -> Option<BookRecord> {
        let title = doc.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())?;

        let key = doc.key.filter(|k| !k.trim().is_empty());
        let source_url = key.as_ref().map(|k| format!("{}{}", self.base_url, normalize_key(k)));

        Some(BookRecord {
            authors: doc
                .author_name
                .unwrap_or_default()
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
            first_publish_year: doc.first_publish_year,
            subjects: doc.subject.unwrap_or_default(),
            key,
            source_url,
            cover_id: doc.cover_i.filter(|id| *id > 0).map(|id| id as u64),
            page_count: doc.number_of_pages_median,
            rating: doc.ratings_average,
            publishers: doc.publisher.unwrap_or_default().into_iter().take(MAX_PUBLISHERS).collect(),
            ..BookRecord::new(title, None)
        })
    }

    /// Fetch and clean a work's description. Any failure yields `None`.
    pub async fn fetch_description(&self, key: &str) -> Option<String> {
        if key.trim().is_empty() {
            return None;
        }

        let url = format!("{}{}.json", self.base_url, normalize_key(key));
        let response = match self.http.get(&url).timeout(self.description_timeout).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                tracing::debug!("Description lookup for {} returned {}", key, r.status());
                return None;
            }
            Err(e) => {
                tracing::debug!("Description lookup for {} failed: {}", key, e);
                return None;
            }
        };

        let details: WorkDetails = response.json().await.ok()?;
        let raw = match details.description? {
            DescriptionField::Text(text) => text,
            DescriptionField::Typed { value } => value,
        };
        clean_description(&raw)
    }

    /// Attach descriptions to every record, fetched concurrently
    pub async fn with_descriptions(&self, records: Vec<BookRecord>) -> Vec<BookRecord> {
        let lookups = records.iter().map(|record| async move {
            match record.key.as_deref() {
                Some(key) => self.fetch_description(key).await,
                None => None,
            }
        });
        let descriptions = join_all(lookups).await;

        records
            .into_iter()
            .zip(descriptions)
            .map(|(record, description)| record.with_description(description))
            .collect()
    }

    /// Cheap availability probe
    pub async fn ping(&self) -> std::result::Result<(), CatalogError> {
        self.search_subject(Genre::Fiction.subject(), 1).await.map(|_| ())
    }
}

fn normalize_key(key: &str) -> String {
    let key = key.trim();
    if key.starts_with('/') {
        key.to_string()
    } else {
        format!("/{}", key)
    }
}

/// Strip markup, collapse whitespace and truncate long descriptions
fn clean_description(raw: &str) -> Option<String> {
    let without_tags = HTML_TAG.replace_all(raw, "");
    let collapsed = WHITESPACE.replace_all(&without_tags, " ");
    let text = collapsed.trim();

    if text.is_empty() {
        return None;
    }

    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        let truncated: String = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
        Some(format!("{}...", truncated))
    } else {
        Some(text.to_string())
    }
}
