use crate::error::BookclubError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const COVER_BASE_URL: &str = "https://covers.openlibrary.org/b/id";

/// Subject keywords the catalog can be searched by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Fiction,
    Mystery,
    Romance,
    ScienceFiction,
    Fantasy,
    Biography,
    History,
    Philosophy,
    Psychology,
    SelfHelp,
    Adventure,
    Thriller,
    Drama,
    Comedy,
    Horror,
    Poetry,
    Art,
    Music,
    Travel,
    Cooking,
    Literature,
}

impl Genre {
    pub const ALL: [Genre; 21] = [
        Genre::Fiction,
        Genre::Mystery,
        Genre::Romance,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Biography,
        Genre::History,
        Genre::Philosophy,
        Genre::Psychology,
        Genre::SelfHelp,
        Genre::Adventure,
        Genre::Thriller,
        Genre::Drama,
        Genre::Comedy,
        Genre::Horror,
        Genre::Poetry,
        Genre::Art,
        Genre::Music,
        Genre::Travel,
        Genre::Cooking,
        Genre::Literature,
    ];

    /// Keyword sent as the `subject` query parameter
    pub fn subject(&self) -> &'static str {
        match self {
            Genre::Fiction => "fiction",
            Genre::Mystery => "mystery",
            Genre::Romance => "romance",
            Genre::ScienceFiction => "science fiction",
            Genre::Fantasy => "fantasy",
            Genre::Biography => "biography",
            Genre::History => "history",
            Genre::Philosophy => "philosophy",
            Genre::Psychology => "psychology",
            Genre::SelfHelp => "self-help",
            Genre::Adventure => "adventure",
            Genre::Thriller => "thriller",
            Genre::Drama => "drama",
            Genre::Comedy => "comedy",
            Genre::Horror => "horror",
            Genre::Poetry => "poetry",
            Genre::Art => "art",
            Genre::Music => "music",
            Genre::Travel => "travel",
            Genre::Cooking => "cooking",
            Genre::Literature => "literature",
        }
    }

    /// Alternate subject tried once when the primary one has no matches
    pub fn fallback_subject(&self) -> Option<&'static str> {
        match self {
            Genre::Fantasy => Some("fantasy fiction"),
            Genre::SelfHelp => Some("self help"),
            _ => None,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Genre::Fiction | Genre::Literature => "📚",
            Genre::Mystery => "🕵️",
            Genre::Romance => "💕",
            Genre::ScienceFiction => "🚀",
            Genre::Fantasy => "🏰",
            Genre::Biography => "👤",
            Genre::History => "🌍",
            Genre::Philosophy => "🤔",
            Genre::Psychology => "🧠",
            Genre::SelfHelp => "💪",
            Genre::Adventure => "⚔️",
            Genre::Thriller => "😱",
            Genre::Drama => "🎭",
            Genre::Comedy => "😄",
            Genre::Horror => "👻",
            Genre::Poetry => "📝",
            Genre::Art => "🎨",
            Genre::Music => "🎵",
            Genre::Travel => "✈️",
            Genre::Cooking => "🍳",
        }
    }

    /// Menu label, e.g. "🚀 science fiction"
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji(), self.subject())
    }

    /// Title-cased name for headings
    pub fn title(&self) -> String {
        self.subject()
            .split(|c: char| c == ' ' || c == '-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(if self.subject().contains('-') { "-" } else { " " })
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subject())
    }
}

impl FromStr for Genre {
    type Err = BookclubError;

    /// Accepts plain keywords as well as menu labels with an emoji prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s
            .trim()
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase()
            .replace('_', " ");

        let genre = match cleaned.as_str() {
            "sci-fi" | "scifi" | "science-fiction" => Some(Genre::ScienceFiction),
            "self help" | "selfhelp" => Some(Genre::SelfHelp),
            other => Genre::ALL.iter().copied().find(|g| g.subject() == other),
        };

        genre.ok_or_else(|| BookclubError::UnknownGenre(s.trim().to_string()))
    }
}

/// One book returned by a catalog search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub first_publish_year: Option<i32>,
    pub subjects: Vec<String>,
    pub description: Option<String>,
    /// Catalog work key, e.g. "/works/OL45804W"
    pub key: Option<String>,
    pub source_url: Option<String>,
    pub cover_id: Option<u64>,
    pub page_count: Option<u32>,
    pub rating: Option<f64>,
    pub publishers: Vec<String>,
}

impl BookRecord {
    /// Minimal record with only a title and optional author
    pub fn new(title: impl Into<String>, author: Option<&str>) -> Self {
        BookRecord {
            title: title.into(),
            authors: author.map(|a| vec![a.to_string()]).unwrap_or_default(),
            first_publish_year: None,
            subjects: Vec::new(),
            description: None,
            key: None,
            source_url: None,
            cover_id: None,
            page_count: None,
            rating: None,
            publishers: Vec::new(),
        }
    }

    /// Primary author, if the catalog listed one
    pub fn author(&self) -> Option<&str> {
        self.authors.first().map(|a| a.as_str())
    }

    pub fn display_author(&self) -> &str {
        self.author().unwrap_or("Unknown")
    }

    pub fn cover_url(&self) -> Option<String> {
        self.cover_id
            .map(|id| format!("{}/{}-M.jpg", COVER_BASE_URL, id))
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_labelled_genres() {
        assert_eq!("fiction".parse::<Genre>().unwrap(), Genre::Fiction);
        assert_eq!("Fiction".parse::<Genre>().unwrap(), Genre::Fiction);
        assert_eq!("📚 fiction".parse::<Genre>().unwrap(), Genre::Fiction);
        assert_eq!("🕵️ mystery".parse::<Genre>().unwrap(), Genre::Mystery);
        assert_eq!("  Science Fiction ".parse::<Genre>().unwrap(), Genre::ScienceFiction);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("sci-fi".parse::<Genre>().unwrap(), Genre::ScienceFiction);
        assert_eq!("self_help".parse::<Genre>().unwrap(), Genre::SelfHelp);
        assert_eq!("self-help".parse::<Genre>().unwrap(), Genre::SelfHelp);
    }

    #[test]
    fn test_parse_unknown_genre() {
        assert!(matches!("".parse::<Genre>(), Err(BookclubError::UnknownGenre(_))));
        assert!(matches!("cyberpunk".parse::<Genre>(), Err(BookclubError::UnknownGenre(_))));
    }

    #[test]
    fn test_every_label_parses_back() {
        for genre in Genre::ALL {
            assert_eq!(genre.label().parse::<Genre>().unwrap(), genre);
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(Genre::ScienceFiction.title(), "Science Fiction");
        assert_eq!(Genre::SelfHelp.title(), "Self-Help");
        assert_eq!(Genre::Mystery.title(), "Mystery");
    }

    #[test]
    fn test_fallback_subjects() {
        assert_eq!(Genre::Fantasy.fallback_subject(), Some("fantasy fiction"));
        assert_eq!(Genre::SelfHelp.fallback_subject(), Some("self help"));
        assert_eq!(Genre::Mystery.fallback_subject(), None);
    }

    #[test]
    fn test_display_author_placeholder() {
        let record = BookRecord::new("Anonymous Tales", None);
        assert_eq!(record.author(), None);
        assert_eq!(record.display_author(), "Unknown");

        let record = BookRecord::new("Example Book", Some("A. Writer"));
        assert_eq!(record.display_author(), "A. Writer");
    }

    #[test]
    fn test_cover_url() {
        let mut record = BookRecord::new("Dune", Some("Frank Herbert"));
        assert_eq!(record.cover_url(), None);
        record.cover_id = Some(11481354);
        assert_eq!(
            record.cover_url().as_deref(),
            Some("https://covers.openlibrary.org/b/id/11481354-M.jpg")
        );
    }
}
