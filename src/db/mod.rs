//! Persistence layer: one repository trait per collection with a MongoDB
//! implementation beside it. The traits are the seam test doubles plug
//! into.

pub mod blogs;
pub mod content;
pub mod destinations;
pub mod faqs;
pub mod fixed_departures;
pub mod holiday_types;
pub mod packages;
pub mod seo;
pub mod testimonials;

use bson::{Bson, Document};

use crate::error::AppError;

/// Page/limit pair parsed from query parameters.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub page: i64,
}

impl Page {
    pub fn new(limit: i64, page: i64) -> Self {
        Self { limit: limit.max(1), page: page.max(1) }
    }

    pub fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

pub(crate) fn db_err(e: mongodb::error::Error) -> AppError {
    AppError::Database(e.to_string())
}

/// Maps duplicate-key failures from the unique slug/page index to the same
/// conflict response the pre-check produces; everything else stays a
/// database error.
pub(crate) fn write_err(e: mongodb::error::Error) -> AppError {
    if is_duplicate_key(&e) {
        AppError::Conflict("Slug already exists. Please choose a different one.".into())
    } else {
        AppError::Database(e.to_string())
    }
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    match &*e.kind {
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(we)) => {
            we.code == 11000
        }
        _ => false,
    }
}

/// Case-insensitive substring match with the user input escaped, so query
/// text can never smuggle regex syntax into the filter.
pub(crate) fn regex_ci(value: &str) -> Bson {
    Bson::Document(bson::doc! {
        "$regex": regex::escape(value),
        "$options": "i",
    })
}

/// `{ field: /value/i }` as a standalone clause for `$or` arrays.
pub(crate) fn contains_ci(field: &str, value: &str) -> Document {
    let mut d = Document::new();
    d.insert(field, regex_ci(value));
    d
}

/// Keeps only non-empty strings out of a `distinct` result, sorted.
pub(crate) fn distinct_strings(values: Vec<Bson>) -> Vec<String> {
    let mut out: Vec<String> = values
        .into_iter()
        .filter_map(|b| b.as_str().map(str::to_string))
        .filter(|s| !s.is_empty())
        .collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_skip_is_zero_based() {
        assert_eq!(Page::new(10, 1).skip(), 0);
        assert_eq!(Page::new(10, 3).skip(), 20);
    }

    #[test]
    fn page_clamps_nonsense_input() {
        let page = Page::new(0, -2);
        assert_eq!(page.limit, 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.skip(), 0);
    }

    #[test]
    fn regex_ci_escapes_metacharacters() {
        let clause = contains_ci("title", "goa (beach)");
        let inner = clause.get_document("title").unwrap();
        assert_eq!(inner.get_str("$regex").unwrap(), r"goa \(beach\)");
        assert_eq!(inner.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn distinct_strings_drops_empties_and_sorts() {
        let values = vec![
            Bson::String("India".into()),
            Bson::String("".into()),
            Bson::Null,
            Bson::String("Bali".into()),
        ];
        assert_eq!(distinct_strings(values), vec!["Bali".to_string(), "India".to_string()]);
    }
}
