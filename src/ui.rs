use crate::config::Theme;
use crate::error::{BookclubError, Result};
use console::{style, Color, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, Select};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

/// Global quiet mode flag - when true, suppresses non-error output
static QUIET_MODE: AtomicBool = AtomicBool::new(false);

static THEME: OnceLock<Theme> = OnceLock::new();

/// Enable or disable quiet mode globally
pub fn set_quiet_mode(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::SeqCst);
}

/// Check if quiet mode is enabled
pub fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::SeqCst)
}

/// Install the color theme. Only the first call takes effect.
pub fn set_theme(theme: Theme) {
    if THEME.set(theme).is_ok() && theme == Theme::Mono {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

fn theme() -> Theme {
    THEME.get().copied().unwrap_or_default()
}

fn accent<D>(value: D) -> StyledObject<D> {
    match theme() {
        Theme::Soft => style(value).fg(Color::Cyan),
        Theme::Default => style(value).fg(Color::Blue),
        Theme::Mono => style(value),
    }
}

/// Prompt for selection from a list
pub fn prompt_select<T: Display>(message: &str, options: Vec<T>) -> Result<T> {
    Select::new(message, options)
        .with_page_size(12)
        .prompt()
        .map_err(|_| BookclubError::UserCancelled)
}

/// Prompt for selection, returning the chosen index
pub fn prompt_select_index<T: Display>(message: &str, options: Vec<T>) -> Result<usize> {
    Select::new(message, options)
        .with_page_size(12)
        .raw_prompt()
        .map(|choice| choice.index)
        .map_err(|_| BookclubError::UserCancelled)
}

/// Prompt for confirmation
pub fn prompt_confirm(message: &str, default: bool) -> Result<bool> {
    Confirm::new(message)
        .with_default(default)
        .prompt()
        .map_err(|_| BookclubError::UserCancelled)
}

/// Create a spinner with a message
pub struct Spinner {
    progress: ProgressBar,
}

impl Spinner {
    /// Create and start a new spinner
    pub fn new(message: &str) -> Self {
        let progress = if is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        let template = match theme() {
            Theme::Soft => "{spinner:.cyan} {msg}",
            Theme::Default => "{spinner:.blue} {msg}",
            Theme::Mono => "{spinner} {msg}",
        };
        progress.set_style(
            ProgressStyle::default_spinner()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        progress.set_message(message.to_string());
        progress.enable_steady_tick(Duration::from_millis(100));
        Spinner { progress }
    }

    /// Stop the spinner and clear it
    pub fn finish_and_clear(&self) {
        self.progress.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.progress.is_finished() {
            self.progress.finish_and_clear();
        }
    }
}

/// Print a success message (suppressed in quiet mode)
pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {}", style("✓").green(), message);
    }
}

/// Print an error message (always shown, even in quiet mode)
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

/// Print a warning message (suppressed in quiet mode)
pub fn print_warning(message: &str) {
    if !is_quiet() {
        eprintln!("{} {}", style("!").yellow(), message);
    }
}

/// Print an info message (suppressed in quiet mode)
pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{} {}", accent("→"), message);
    }
}

/// Print a section heading (suppressed in quiet mode)
pub fn print_heading(message: &str) {
    if !is_quiet() {
        println!("{}", accent(message).bold());
    }
}

/// Print a blank line (suppressed in quiet mode)
pub fn print_blank() {
    if !is_quiet() {
        println!();
    }
}

/// Check if running in a TTY
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}
