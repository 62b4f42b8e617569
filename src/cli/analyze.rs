use super::search::{fetch_books, resolve_limit};
use crate::catalog::{BookRecord, CatalogClient, Genre};
use crate::config::Config;
use crate::display;
use crate::error::{BookclubError, ExitStatus, Result};
use crate::generation::{self, AnalysisKind, GenerationClient};
use crate::ui;
use std::time::Duration;

/// Run the analyze command
pub async fn run_analyze(
    config: &Config,
    genre: String,
    book: Option<usize>,
    kind: Option<AnalysisKind>,
    limit: Option<usize>,
) -> Result<ExitStatus> {
    let genre: Genre = genre.parse()?;
    let limit = resolve_limit(limit, config)?;
    let catalog = CatalogClient::new(&config.catalog)?;

    let books = fetch_books(&catalog, genre, limit, config.catalog.fetch_descriptions).await?;
    if books.is_empty() {
        return Err(BookclubError::NoBooksFound(genre.to_string()));
    }

    let interactive = ui::is_interactive();
    let index = match requested_book_index(book, books.len())? {
        Some(index) => index,
        None if interactive => {
            let labels: Vec<String> = books
                .iter()
                .enumerate()
                .map(|(i, b)| display::book_choice_label(i, b))
                .collect();
            ui::prompt_select_index("Select a book:", labels)?
        }
        None => 0,
    };

    let kind = match kind {
        Some(kind) => kind,
        None if interactive => ui::prompt_select("Analysis type:", AnalysisKind::ALL.to_vec())?,
        None => AnalysisKind::Summary,
    };

    let text = generate_analysis(config, &books[index], kind).await?;
    println!("{}", text);

    Ok(ExitStatus::Success)
}

/// Probe the generation service, then produce the analysis with its footer
pub async fn generate_analysis(config: &Config, book: &BookRecord, kind: AnalysisKind) -> Result<String> {
    let client = GenerationClient::new(&config.generation.url)?;

    let spinner = ui::Spinner::new(&format!("Checking {} at {}...", config.generation.model, client.endpoint()));
    client
        .check_availability(
            &config.generation.model,
            Duration::from_secs(config.generation.probe_timeout_seconds),
        )
        .await?;

    spinner.finish_and_clear();
    let spinner = ui::Spinner::new(&format!("Generating analysis of '{}'...", book.title));
    let result = generation::analyze_book(&client, &config.generation, book, kind).await?;
    spinner.finish_and_clear();

    let footer = generation::analysis_footer(&config.generation.model, book, chrono::Local::now());
    Ok(format!("{}\n\n{}", result.text.trim_end(), footer))
}

/// Translate a 1-based `--book` number into an index.
/// `None` means the user still has to choose.
fn requested_book_index(requested: Option<usize>, count: usize) -> Result<Option<usize>> {
    match requested {
        None => Ok(None),
        Some(n) if n >= 1 && n <= count => Ok(Some(n - 1)),
        Some(n) => Err(BookclubError::InvalidInput(format!(
            "book {} is out of range (search returned {} books)",
            n, count
        ))),
    }
}
