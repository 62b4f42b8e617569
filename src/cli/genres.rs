use crate::catalog::Genre;
use crate::ui;

/// Run the genres command
pub fn run_genres() {
    ui::print_heading("Available genres");
    for genre in Genre::ALL {
        println!("  {}", genre.label());
    }
}
