use super::analyze::generate_analysis;
use super::search::fetch_books;
use crate::catalog::{CatalogClient, Genre};
use crate::config::Config;
use crate::display;
use crate::error::{BookclubError, ExitStatus, Result};
use crate::generation::AnalysisKind;
use crate::ui;

/// Interactive genre → book → analysis loop
pub async fn run_session(config: &Config) -> Result<ExitStatus> {
    let catalog = CatalogClient::new(&config.catalog)?;

    ui::print_heading("📚 Virtual Book Club");
    ui::print_info("Discover books by genre and get AI-powered summaries, discussion questions and reading guides.");
    ui::print_blank();

    loop {
        match session_round(config, &catalog).await {
            Ok(()) => {}
            Err(BookclubError::UserCancelled) => break,
            // Failures degrade to an inline message; the user can retry
            Err(e) => ui::print_error(&e.user_message()),
        }

        ui::print_blank();
        match ui::prompt_confirm("Explore another book?", true) {
            Ok(true) => continue,
            Ok(false) | Err(_) => break,
        }
    }

    ui::print_info("Happy reading!");
    Ok(ExitStatus::Success)
}

async fn session_round(config: &Config, catalog: &CatalogClient) -> Result<()> {
    let labels: Vec<String> = Genre::ALL.iter().map(|g| g.label()).collect();
    let choice = ui::prompt_select("Select a genre:", labels)?;
    let genre: Genre = choice.parse()?;

    let books = fetch_books(
        catalog,
        genre,
        config.catalog.default_limit,
        config.catalog.fetch_descriptions,
    )
    .await?;

    println!("{}", display::format_books(&books, genre));
    if books.is_empty() {
        return Ok(());
    }

    let labels: Vec<String> = books
        .iter()
        .enumerate()
        .map(|(i, b)| display::book_choice_label(i, b))
        .collect();
    let index = ui::prompt_select_index("Select a book:", labels)?;
    let book = &books[index];
    ui::print_info(&format!("Selected: {}", display::book_choice_label(index, book)));

    let kind = ui::prompt_select("Analysis type:", AnalysisKind::ALL.to_vec())?;
    let text = generate_analysis(config, book, kind).await?;

    ui::print_blank();
    println!("{}", text);
    Ok(())
}
