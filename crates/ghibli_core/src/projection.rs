//! Derived views over an already fetched film list.
//!
//! Everything here is pure and total: any slice, including an empty one, yields
//! a (possibly empty) result. Nothing is cached; callers recompute on demand.

use crate::Film;

/// Dashboard rows hold at most this many films.
pub const ROW_LIMIT: usize = 6;

/// How a search query is compared against film text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Field starts with the query.
    #[default]
    Prefix,
    /// Query appears anywhere in the field.
    Contains,
}

/// Highest score first, ties keep catalog order.
pub fn top_rated(films: &[Film]) -> Vec<Film> {
    let mut sorted = films.to_vec();
    sorted.sort_by(|a, b| b.score().cmp(&a.score()));
    sorted.truncate(ROW_LIMIT);
    sorted
}

pub fn by_director(films: &[Film], fragment: &str) -> Vec<Film> {
    let needle = fragment.to_lowercase();
    films
        .iter()
        .filter(|film| film.director.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Newest first by comparing `release_date` as plain text.
///
/// Only chronological while every date has the same shape (the API sends
/// four-digit years).
pub fn most_recent(films: &[Film]) -> Vec<Film> {
    let mut sorted = films.to_vec();
    sorted.sort_by(|a, b| b.release_date.cmp(&a.release_date));
    sorted.truncate(ROW_LIMIT);
    sorted
}

/// Films whose title, original title or director match `query`.
///
/// The query is trimmed first; a blank query keeps the whole list.
pub fn search(films: &[Film], query: &str, mode: MatchMode) -> Vec<Film> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return films.to_vec();
    }
    films
        .iter()
        .filter(|film| {
            [&film.title, &film.original_title, &film.director]
                .into_iter()
                .any(|field| field_matches(field, &needle, mode))
        })
        .cloned()
        .collect()
}

/// The hero film: first title containing `title_fragment`, else the first film.
pub fn featured<'a>(films: &'a [Film], title_fragment: &str) -> Option<&'a Film> {
    let needle = title_fragment.to_lowercase();
    films
        .iter()
        .find(|film| film.title.to_lowercase().contains(&needle))
        .or_else(|| films.first())
}

/// Picks the splash cover image; `seed` chooses the film.
pub fn splash_cover(films: &[Film], seed: u64) -> Option<&str> {
    if films.is_empty() {
        return None;
    }
    let index = (seed % films.len() as u64) as usize;
    films.get(index).map(|film| film.image.as_str())
}

fn field_matches(field: &str, needle: &str, mode: MatchMode) -> bool {
    let haystack = field.to_lowercase();
    match mode {
        MatchMode::Prefix => haystack.starts_with(needle),
        MatchMode::Contains => haystack.contains(needle),
    }
}
