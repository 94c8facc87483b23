//! Resolve a user-typed title to one row of the MovieTable.
//!
//! Titles are not unique: "Drishyam" exists in Malayalam, Telugu, Tamil and
//! Hindi. Lookup therefore yields one of four outcomes instead of an id:
//! a single resolved row, nothing at all, several candidates that need a
//! language to choose between, or nothing in the requested language.

use data_loader::{MovieId, MovieTable};

/// One way to disambiguate a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChoice {
    pub language: String,
    pub year: Option<i32>,
}

/// Result of resolving a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleLookup {
    /// Exactly one row was selected
    Found(MovieId),
    /// No movie carries this title
    NotFound,
    /// The title exists in several languages and none was given
    Ambiguous(Vec<LanguageChoice>),
    /// The title exists, but not in the requested language
    NotFoundForLanguage,
}

/// Resolve `title` (and optionally `language`) against the table.
///
/// Both comparisons ignore case and surrounding whitespace. A blank
/// `language` counts as not given. When several rows remain after the
/// language check, or all matches share one language, the first row wins.
pub fn resolve_title(table: &MovieTable, title: &str, language: Option<&str>) -> TitleLookup {
    let matches = table.find_by_title(title);
    if matches.is_empty() {
        return TitleLookup::NotFound;
    }

    let language = language
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty());

    match language {
        Some(wanted) => matches
            .into_iter()
            .find(|&id| {
                table
                    .get_movie(id)
                    .is_some_and(|movie| movie.language.to_lowercase() == wanted)
            })
            .map_or(TitleLookup::NotFoundForLanguage, TitleLookup::Found),
        None => {
            let choices = language_choices(table, &matches);
            if count_languages(&choices) > 1 {
                TitleLookup::Ambiguous(choices)
            } else {
                TitleLookup::Found(matches[0])
            }
        }
    }
}

/// Distinct (language, year) pairs among the matches, in row order
fn language_choices(table: &MovieTable, matches: &[MovieId]) -> Vec<LanguageChoice> {
    let mut choices: Vec<LanguageChoice> = Vec::new();
    for movie in matches.iter().filter_map(|&id| table.get_movie(id)) {
        let choice = LanguageChoice {
            language: movie.language.clone(),
            year: movie.year,
        };
        if !choices.contains(&choice) {
            choices.push(choice);
        }
    }
    choices
}

fn count_languages(choices: &[LanguageChoice]) -> usize {
    let mut languages: Vec<String> = choices.iter().map(|c| c.language.to_lowercase()).collect();
    languages.sort_unstable();
    languages.dedup();
    languages.len()
}
