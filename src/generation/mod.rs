mod client;
mod prompt;

pub use client::*;
pub use prompt::*;

use crate::catalog::BookRecord;
use crate::config::GenerationConfig;
use crate::error::GenerationError;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::time::Duration;

/// Build the prompt for `kind` and run it against the configured model
pub async fn analyze_book(
    client: &GenerationClient,
    config: &GenerationConfig,
    record: &BookRecord,
    kind: AnalysisKind,
) -> Result<GenerationResult, GenerationError> {
    let prompt = build_prompt(record, kind);
    let request = GenerationRequest::from_config(config, prompt);

    tracing::info!("Requesting {:?} for '{}' from {}", kind, record.title, config.model);
    client
        .generate(&request, Duration::from_secs(config.analysis_timeout_seconds))
        .await
}

/// Attribution appended below a generated analysis
pub fn analysis_footer<Tz>(model: &str, record: &BookRecord, generated_at: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let source = record.source_url.as_deref().unwrap_or("Open Library");
    format!(
        "---\nGenerated by {} on {}\nBook source: {}",
        model,
        generated_at.format("%Y-%m-%d %H:%M"),
        source
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogClient, Genre};
    use chrono::Utc;
    use mockito::Matcher;

    #[test]
    fn test_analysis_footer() {
        let mut record = BookRecord::new("Dune", Some("Frank Herbert"));
        record.source_url = Some("https://openlibrary.org/works/OL893415W".to_string());
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();

        let footer = analysis_footer("phi3:mini", &record, at);
        assert!(footer.contains("Generated by phi3:mini on 2024-03-09 14:05"));
        assert!(footer.contains("https://openlibrary.org/works/OL893415W"));
    }

    #[test]
    fn test_analysis_footer_without_source() {
        let record = BookRecord::new("Dune", None);
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert!(analysis_footer("m", &record, at).ends_with("Book source: Open Library"));
    }

    #[tokio::test]
    async fn test_search_build_generate_end_to_end() {
        let mut catalog = mockito::Server::new_async().await;
        catalog
            .mock("GET", "/search.json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("subject".into(), "fiction".into()),
                Matcher::UrlEncoded("limit".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"docs": [{"title": "Example Book", "author_name": ["A. Writer"]}]}"#)
            .create_async()
            .await;

        let mut generator = mockito::Server::new_async().await;
        let generate = generator
            .mock("POST", "/api/generate")
            .match_body(Matcher::Regex("Example Book".to_string()))
            .with_status(200)
            .with_body(r#"{"response":"STUB"}"#)
            .create_async()
            .await;

        let catalog_client =
            CatalogClient::with_base_url(&catalog.url(), Duration::from_secs(5), Duration::from_secs(5)).unwrap();
        let genre: Genre = "Fiction".parse().unwrap();
        let books = catalog_client.search(genre, 1).await.unwrap();
        assert_eq!(books.len(), 1);

        let prompt = build_prompt(&books[0], AnalysisKind::Summary);
        assert!(prompt.contains("Example Book"));
        assert!(prompt.contains("A. Writer"));

        let config = GenerationConfig {
            url: format!("{}/api/generate", generator.url()),
            ..GenerationConfig::default()
        };
        let client = GenerationClient::new(&config.url).unwrap();
        let result = analyze_book(&client, &config, &books[0], AnalysisKind::Summary)
            .await
            .unwrap();

        generate.assert_async().await;
        assert_eq!(result, GenerationResult { text: "STUB".to_string() });
    }
}
