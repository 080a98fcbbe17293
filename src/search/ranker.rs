//! Weighted multi-field relevance ranking for type-ahead suggestions.
//!
//! One configurable ranker replaces the per-controller scoring blocks the
//! site grew over time: each entity type contributes a [`RankProfile`]
//! listing which candidate fields score, how much a substring hit is
//! worth, and the flat bonus for an exact (case-insensitive) match on the
//! primary field.

use super::SuggestCandidate;

/// Candidate fields the ranker can score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreField {
    Title,
    Description,
    ShortDescription,
    Destination,
    Country,
    State,
}

/// Weight entry: substring hit adds `weight`; a full-field exact match
/// additionally adds `exact_bonus` on top.
#[derive(Debug, Clone, Copy)]
pub struct FieldWeight {
    pub field: ScoreField,
    pub weight: u32,
    pub exact_bonus: u32,
}

/// Per-entity-type ranking configuration.
#[derive(Debug, Clone, Copy)]
pub struct RankProfile {
    pub weights: &'static [FieldWeight],
    /// Raw candidates fetched from the store before scoring.
    pub fetch_limit: i64,
    /// Ranked results returned to the client.
    pub result_cap: usize,
}

/// Tour package suggest dropdown.
pub const PACKAGE_SUGGEST: RankProfile = RankProfile {
    weights: &[
        FieldWeight { field: ScoreField::Title, weight: 10, exact_bonus: 5 },
        FieldWeight { field: ScoreField::Destination, weight: 8, exact_bonus: 0 },
        FieldWeight { field: ScoreField::Description, weight: 3, exact_bonus: 0 },
    ],
    fetch_limit: 10,
    result_cap: 5,
};

/// Holiday type search box.
pub const HOLIDAY_TYPE_SUGGEST: RankProfile = RankProfile {
    weights: &[
        FieldWeight { field: ScoreField::Title, weight: 10, exact_bonus: 5 },
        FieldWeight { field: ScoreField::Description, weight: 3, exact_bonus: 0 },
        FieldWeight { field: ScoreField::ShortDescription, weight: 2, exact_bonus: 0 },
    ],
    fetch_limit: 10,
    result_cap: 5,
};

/// Location-aware profile for the combined travel search bar, where
/// destination matches are listed ahead of package matches.
pub const TRAVEL_SUGGEST: RankProfile = RankProfile {
    weights: &[
        FieldWeight { field: ScoreField::Title, weight: 20, exact_bonus: 5 },
        FieldWeight { field: ScoreField::Destination, weight: 15, exact_bonus: 0 },
        FieldWeight { field: ScoreField::Country, weight: 12, exact_bonus: 0 },
        FieldWeight { field: ScoreField::State, weight: 10, exact_bonus: 0 },
        FieldWeight { field: ScoreField::Description, weight: 5, exact_bonus: 0 },
    ],
    fetch_limit: 10,
    result_cap: 12,
};

/// Scores one candidate against a pre-lowercased query.
///
/// Bonuses are additive and independent per field; a missing field simply
/// contributes nothing.
pub fn score(candidate: &SuggestCandidate, query_lower: &str, profile: &RankProfile) -> u32 {
    profile
        .weights
        .iter()
        .map(|fw| match candidate.field(fw.field) {
            Some(value) => {
                let value_lower = value.to_lowercase();
                if value_lower.contains(query_lower) {
                    let exact = if value_lower == query_lower { fw.exact_bonus } else { 0 };
                    fw.weight + exact
                } else {
                    0
                }
            }
            None => 0,
        })
        .sum()
}

/// Scores, orders, and caps a candidate batch.
///
/// Sort is stable: candidates with equal scores keep their fetch order.
pub fn rank(
    candidates: Vec<SuggestCandidate>,
    query: &str,
    profile: &RankProfile,
) -> Vec<(SuggestCandidate, u32)> {
    let query_lower = query.to_lowercase();
    let mut scored: Vec<(SuggestCandidate, u32)> = candidates
        .into_iter()
        .map(|c| {
            let s = score(&c, &query_lower, profile);
            (c, s)
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(profile.result_cap);
    scored
}
