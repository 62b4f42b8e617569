use crate::catalog::{BookRecord, CatalogClient, Genre};
use crate::config::{Config, MAX_SEARCH_LIMIT};
use crate::display;
use crate::error::{BookclubError, ExitStatus, Result};
use crate::ui;

/// Run the search command
pub async fn run_search(
    config: &Config,
    genre: String,
    limit: Option<usize>,
    json_output: bool,
    no_descriptions: bool,
) -> Result<ExitStatus> {
    let genre: Genre = genre.parse()?;
    let limit = resolve_limit(limit, config)?;
    let catalog = CatalogClient::new(&config.catalog)?;

    let with_descriptions = config.catalog.fetch_descriptions && !no_descriptions;
    let books = fetch_books(&catalog, genre, limit, with_descriptions).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&books)?);
    } else {
        println!("{}", display::format_books(&books, genre));
    }

    Ok(ExitStatus::Success)
}

/// Search with a spinner, optionally enriching results with descriptions
pub async fn fetch_books(
    catalog: &CatalogClient,
    genre: Genre,
    limit: usize,
    with_descriptions: bool,
) -> Result<Vec<BookRecord>> {
    let spinner = ui::Spinner::new(&format!("Searching Open Library for {} books...", genre));
    let books = catalog.search(genre, limit).await?;

    let books = if with_descriptions && !books.is_empty() {
        catalog.with_descriptions(books).await
    } else {
        books
    };
    spinner.finish_and_clear();

    tracing::info!("Found {} books for '{}'", books.len(), genre);
    Ok(books)
}

/// Command-line limit, falling back to the configured default
pub fn resolve_limit(requested: Option<usize>, config: &Config) -> Result<usize> {
    match requested {
        None => Ok(config.catalog.default_limit),
        Some(n) if (1..=MAX_SEARCH_LIMIT).contains(&n) => Ok(n),
        Some(n) => Err(BookclubError::InvalidInput(format!(
            "limit must be between 1 and {} (got {})",
            MAX_SEARCH_LIMIT, n
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_limit() {
        let mut config = Config::default();
        config.catalog.default_limit = 7;

        assert_eq!(resolve_limit(None, &config).unwrap(), 7);
        assert_eq!(resolve_limit(Some(1), &config).unwrap(), 1);
        assert_eq!(resolve_limit(Some(20), &config).unwrap(), 20);
        assert!(matches!(resolve_limit(Some(0), &config), Err(BookclubError::InvalidInput(_))));
        assert!(matches!(resolve_limit(Some(21), &config), Err(BookclubError::InvalidInput(_))));
    }
}
