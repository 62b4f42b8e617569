use crate::catalog::BookRecord;
use clap::ValueEnum;
use std::fmt;

const UNKNOWN_AUTHOR: &str = "unknown author";
const UNKNOWN_YEAR: &str = "unknown year";
const UNKNOWN_SUBJECTS: &str = "unspecified subjects";
const NO_DESCRIPTION: &str = "No description available.";
const MAX_PROMPT_SUBJECTS: usize = 8;

/// The four analyses a user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum AnalysisKind {
    Summary,
    #[value(name = "discussion", alias = "discussion-questions")]
    DiscussionQuestions,
    ReadingGuide,
    #[value(alias = "recommendation")]
    Recommendations,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 4] = [
        AnalysisKind::Summary,
        AnalysisKind::DiscussionQuestions,
        AnalysisKind::ReadingGuide,
        AnalysisKind::Recommendations,
    ];
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisKind::Summary => write!(f, "📖 Book Summary & Analysis"),
            AnalysisKind::DiscussionQuestions => write!(f, "💬 Discussion Questions"),
            AnalysisKind::ReadingGuide => write!(f, "📚 Reading Guide"),
            AnalysisKind::Recommendations => write!(f, "⭐ Reading Recommendation"),
        }
    }
}

/// Book details as they appear inside every template
struct BookContext {
    title: String,
    author: String,
    year: String,
    subjects: String,
    description: String,
}

impl BookContext {
    fn from_record(record: &BookRecord) -> Self {
        let subjects = if record.subjects.is_empty() {
            UNKNOWN_SUBJECTS.to_string()
        } else {
            record
                .subjects
                .iter()
                .take(MAX_PROMPT_SUBJECTS)
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        BookContext {
            title: record.title.clone(),
            author: record.author().unwrap_or(UNKNOWN_AUTHOR).to_string(),
            year: record
                .first_publish_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| UNKNOWN_YEAR.to_string()),
            subjects,
            description: record
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }
}

/// Render the prompt for `kind` about `record`
pub fn build_prompt(record: &BookRecord, kind: AnalysisKind) -> String {
    let book = BookContext::from_record(record);
    match kind {
        AnalysisKind::Summary => build_summary_prompt(&book),
        AnalysisKind::DiscussionQuestions => build_discussion_prompt(&book),
        AnalysisKind::ReadingGuide => build_reading_guide_prompt(&book),
        AnalysisKind::Recommendations => build_recommendation_prompt(&book),
    }
}

fn build_summary_prompt(book: &BookContext) -> String {
    format!(r#"Analyze the book "{title}" by {author} (first published {year}).

SUBJECTS: {subjects}
DESCRIPTION: {description}

Give me:
📖 **PLOT**: 2-3 sentences about the main story
👤 **CHARACTERS**: the main character and their motivation
🎭 **THEMES**: the key themes explored
✍️ **STYLE**: the writing style and the book's significance

Keep the whole answer under 300 words."#,
        title = book.title,
        author = book.author,
        year = book.year,
        subjects = book.subjects,
        description = book.description
    )
}

fn build_discussion_prompt(book: &BookContext) -> String {
    format!(r#"Create book club discussion questions for "{title}" by {author} (first published {year}).

SUBJECTS: {subjects}
DESCRIPTION: {description}

Write 8-10 open-ended questions that cannot be answered with yes or no. Cover:
👤 **CHARACTERS**: choices, growth and motivation
🎭 **THEMES**: the ideas the book wrestles with
📖 **PLOT**: the central conflict and how it resolves
🌍 **MODERN RELEVANCE**: how the book speaks to readers today

Number the questions and keep each one to one or two sentences."#,
        title = book.title,
        author = book.author,
        year = book.year,
        subjects = book.subjects,
        description = book.description
    )
}

fn build_reading_guide_prompt(book: &BookContext) -> String {
    format!(r#"Create a reading guide for "{title}" by {author} (first published {year}).

SUBJECTS: {subjects}
DESCRIPTION: {description}

Organize the guide into these sections:
📅 **BEFORE READING**: context, background and what to expect
📖 **WHILE READING**: what to watch for, chapter by chapter if useful
📝 **AFTER READING**: key takeaways and questions to reflect on
📚 **SIMILAR BOOKS**: two or three books to read next"#,
        title = book.title,
        author = book.author,
        year = book.year,
        subjects = book.subjects,
        description = book.description
    )
}

fn build_recommendation_prompt(book: &BookContext) -> String {
    format!(r#"Write a reading recommendation for "{title}" by {author} (first published {year}).

SUBJECTS: {subjects}
DESCRIPTION: {description}

Give me:
👥 **WHO SHOULD READ**: the target audience
💡 **WHY READ**: what makes this book special
🎯 **WHAT YOU'LL GAIN**: what a reader takes away from it
📚 **SIMILAR BOOKS**: if you like this, try..."#,
        title = book.title,
        author = book.author,
        year = book.year,
        subjects = book.subjects,
        description = book.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BookRecord {
        let mut record = BookRecord::new("Example Book", Some("A. Writer"));
        record.first_publish_year = Some(1999);
        record.subjects = vec!["Fiction".to_string(), "Friendship".to_string()];
        record.description = Some("Two friends cross a desert.".to_string());
        record
    }

    #[test]
    fn test_every_kind_contains_title_and_author() {
        let record = sample();
        for kind in AnalysisKind::ALL {
            let prompt = build_prompt(&record, kind);
            assert!(prompt.contains("Example Book"), "{:?} lost the title", kind);
            assert!(prompt.contains("A. Writer"), "{:?} lost the author", kind);
            assert!(prompt.contains("Fiction, Friendship"));
            assert!(prompt.contains("Two friends cross a desert."));
            assert!(prompt.contains("1999"));
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let record = sample();
        for kind in AnalysisKind::ALL {
            assert_eq!(build_prompt(&record, kind), build_prompt(&record, kind));
        }
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let record = BookRecord::new("Anonymous Tales", None);
        for kind in AnalysisKind::ALL {
            let prompt = build_prompt(&record, kind);
            assert!(prompt.contains("by unknown author"));
            assert!(prompt.contains("unknown year"));
            assert!(prompt.contains(UNKNOWN_SUBJECTS));
            assert!(prompt.contains(NO_DESCRIPTION));
            assert!(!prompt.contains("by  "));
        }
    }

    #[test]
    fn test_templates_differ_per_kind() {
        let record = sample();
        assert!(build_prompt(&record, AnalysisKind::DiscussionQuestions).contains("8-10 open-ended questions"));

        let guide = build_prompt(&record, AnalysisKind::ReadingGuide);
        assert!(guide.contains("BEFORE READING"));
        assert!(guide.contains("WHILE READING"));
        assert!(guide.contains("AFTER READING"));

        assert!(build_prompt(&record, AnalysisKind::Summary).contains("PLOT"));
        assert!(build_prompt(&record, AnalysisKind::Recommendations).contains("WHO SHOULD READ"));
    }

    #[test]
    fn test_subject_list_is_capped() {
        let mut record = sample();
        record.subjects = (1..=12).map(|i| format!("s{}", i)).collect();
        let prompt = build_prompt(&record, AnalysisKind::Summary);
        assert!(prompt.contains("s8"));
        assert!(!prompt.contains("s9"));
    }

    #[test]
    fn test_title_is_verbatim() {
        let record = BookRecord::new(r#"The "Quoted" {Braces} Title"#, Some("X"));
        let prompt = build_prompt(&record, AnalysisKind::ReadingGuide);
        assert!(prompt.contains(r#"The "Quoted" {Braces} Title"#));
    }

    #[test]
    fn test_cli_names() {
        assert_eq!(AnalysisKind::from_str("discussion", true).unwrap(), AnalysisKind::DiscussionQuestions);
        assert_eq!(AnalysisKind::from_str("reading-guide", true).unwrap(), AnalysisKind::ReadingGuide);
        assert_eq!(AnalysisKind::from_str("recommendation", true).unwrap(), AnalysisKind::Recommendations);
        assert!(AnalysisKind::from_str("poem", true).is_err());
    }
}
