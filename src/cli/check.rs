use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::error::{ExitStatus, Result};
use crate::generation::GenerationClient;
use crate::ui;
use std::time::Duration;

/// Run the check command
pub async fn run_check(config: &Config) -> Result<ExitStatus> {
    let generation = &config.generation;
    let client = GenerationClient::new(&generation.url)?;

    let spinner = ui::Spinner::new(&format!(
        "Testing {} with model {}...",
        client.endpoint(),
        generation.model
    ));
    let generation_status = client
        .check_availability(&generation.model, Duration::from_secs(generation.probe_timeout_seconds))
        .await;
    spinner.finish_and_clear();

    match &generation_status {
        Ok(()) => ui::print_success(&format!("Generation service ({}): available", generation.model)),
        Err(e) => {
            tracing::debug!("Generation probe failed: {}", e);
            ui::print_error(&format!("Generation service ({}): {}", generation.model, e.user_message()));
        }
    }

    let catalog = CatalogClient::new(&config.catalog)?;
    let spinner = ui::Spinner::new("Testing Open Library...");
    let catalog_status = catalog.ping().await;
    spinner.finish_and_clear();

    match &catalog_status {
        Ok(()) => ui::print_success("Open Library API: available"),
        Err(e) => {
            tracing::debug!("Catalog probe failed: {}", e);
            ui::print_error(&format!("Open Library API: {}", e.user_message()));
        }
    }

    ui::print_blank();
    ui::print_info(&format!("Theme: {}", config.ui.theme));
    ui::print_info(&format!("Model: {}", generation.model));
    ui::print_info(&format!("Probe timeout: {} seconds", generation.probe_timeout_seconds));
    ui::print_info(&format!("Analysis timeout: {} seconds", generation.analysis_timeout_seconds));

    if generation_status.is_err() {
        ui::print_blank();
        ui::print_warning("AI analysis won't work until the generation service is running.");
        ui::print_info("Start it with 'ollama serve', then run 'bookclub check' again.");
    }

    Ok(check_exit_status(generation_status.is_ok(), catalog_status.is_ok()))
}

fn check_exit_status(generation_ok: bool, catalog_ok: bool) -> ExitStatus {
    match (generation_ok, catalog_ok) {
        (true, true) => ExitStatus::Success,
        (false, _) => ExitStatus::GenerationUnavailable,
        (true, false) => ExitStatus::CatalogUnavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::closed_port_url;

    #[test]
    fn test_check_exit_status() {
        assert_eq!(check_exit_status(true, true), ExitStatus::Success);
        assert_eq!(check_exit_status(false, true), ExitStatus::GenerationUnavailable);
        assert_eq!(check_exit_status(true, false), ExitStatus::CatalogUnavailable);
    }

    #[tokio::test]
    async fn test_check_reports_unavailable_services() {
        let mut config = Config::default();
        config.generation.url = format!("{}/api/generate", closed_port_url());
        config.catalog.base_url = closed_port_url();

        let status = run_check(&config).await.unwrap();
        assert_eq!(status, ExitStatus::GenerationUnavailable);
    }
}
