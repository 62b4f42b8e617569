use crate::catalog::{BookRecord, Genre};

const LISTED_AUTHORS: usize = 3;
const CHOICE_AUTHORS: usize = 2;

/// Render search results as a readable listing
pub fn format_books(books: &[BookRecord], genre: Genre) -> String {
    if books.is_empty() {
        return format_no_books(genre);
    }

    let mut output = format!("📚 {} Books ({} found)\n\n", genre.title(), books.len());

    for (i, book) in books.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, book.title));
        output.push_str(&format!("   By: {}\n", format_authors(&book.authors, LISTED_AUTHORS)));

        if let Some(year) = book.first_publish_year {
            output.push_str(&format!("   Published: {}\n", year));
        }
        if let Some(pages) = book.page_count {
            output.push_str(&format!("   Pages: {}\n", pages));
        }
        if !book.publishers.is_empty() {
            output.push_str(&format!("   Publisher: {}\n", book.publishers.join(", ")));
        }
        if let Some(rating) = book.rating {
            output.push_str(&format!("   Rating: {:.1}/5\n", rating));
        }
        if let Some(ref url) = book.source_url {
            output.push_str(&format!("   View on Open Library: {}\n", url));
        }
        if let Some(ref description) = book.description {
            output.push_str(&format!("   Description: {}\n", description));
        }
        if !book.subjects.is_empty() {
            output.push_str(&format!("   Subjects: {}\n", book.subjects.join(", ")));
        }
        if let Some(cover) = book.cover_url() {
            output.push_str(&format!("   Cover: {}\n", cover));
        }

        output.push('\n');
    }

    output
}

/// Message for a search with zero matches, with genres worth trying
pub fn format_no_books(genre: Genre) -> String {
    let suggestions = [
        Genre::Fiction,
        Genre::Mystery,
        Genre::Romance,
        Genre::Biography,
        Genre::History,
        Genre::Philosophy,
        Genre::Literature,
    ]
    .iter()
    .filter(|g| **g != genre)
    .map(|g| g.subject())
    .collect::<Vec<_>>()
    .join(", ");

    format!("No books found for genre '{}'. Try: {}.", genre, suggestions)
}

/// Selection label, e.g. "1. Dune by Frank Herbert"
pub fn book_choice_label(index: usize, book: &BookRecord) -> String {
    let mut label = format!("{}. {} by ", index + 1, book.title);
    if book.authors.is_empty() {
        label.push_str(book.display_author());
    } else {
        let shown: Vec<&str> = book.authors.iter().take(CHOICE_AUTHORS).map(|a| a.as_str()).collect();
        label.push_str(&shown.join(", "));
        if book.authors.len() > CHOICE_AUTHORS {
            label.push_str(" et al.");
        }
    }
    label
}

fn format_authors(authors: &[String], max: usize) -> String {
    if authors.is_empty() {
        return "Unknown".to_string();
    }

    let mut text = authors.iter().take(max).cloned().collect::<Vec<_>>().join(", ");
    if authors.len() > max {
        text.push_str(&format!(" and {} others", authors.len() - max));
    }
    text
}
