//! Slug derivation and per-collection uniqueness enforcement.
//!
//! Every catalog entity gets a URL-safe slug derived from its title. The
//! allocator probes the owning collection through [`SlugLookup`] and
//! disambiguates collisions with an integer suffix. The probe is a UX
//! nicety only: the unique index on the `slug` field is the final arbiter,
//! and duplicate-key write errors are mapped to the same conflict response.

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::error::AppError;

/// Collection-side view the allocator needs: "is this slug taken by
/// somebody other than `exclude_id`?". Every catalog repository implements
/// this against its own collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlugLookup: Send + Sync {
    async fn slug_exists(
        &self,
        slug: &str,
        exclude_id: Option<ObjectId>,
    ) -> Result<bool, AppError>;
}

/// Derives the base slug from a human-readable title.
///
/// Lowercases, drops everything that is not `[a-z0-9]`, space, or hyphen,
/// turns whitespace runs into single hyphens, collapses hyphen runs, and
/// trims hyphens from both ends. A title of pure punctuation or emoji
/// yields an empty string; callers must substitute a fallback stem before
/// persisting (see [`unique_slug`]).
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppresses leading hyphens

    for c in title.chars() {
        let mapped = match c {
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            'a'..='z' | '0'..='9' => Some(c),
            c if c.is_whitespace() => None,
            '-' => None,
            _ => continue,
        };
        match mapped {
            Some(c) => {
                out.push(c);
                last_was_hyphen = false;
            }
            None => {
                if !last_was_hyphen {
                    out.push('-');
                }
                last_was_hyphen = true;
            }
        }
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Finds the first free slug in the sequence `base`, `base-1`, `base-2`, …
///
/// `fallback` replaces an empty `base` (titles that normalize to nothing);
/// callers pass the entity's freshly generated id so the slug is never
/// empty. `exclude_id` makes an entity's own slug invisible to the probe so
/// re-saving an unchanged title is a no-op.
///
/// The counter is deliberately uncapped; at catalog scale the loop
/// terminates after a handful of probes.
pub async fn unique_slug<L>(
    lookup: &L,
    base: &str,
    fallback: &str,
    exclude_id: Option<ObjectId>,
) -> Result<String, AppError>
where
    L: SlugLookup + ?Sized,
{
    let base = if base.is_empty() { fallback } else { base };

    if !lookup.slug_exists(base, exclude_id).await? {
        return Ok(base.to_string());
    }

    let mut counter: u64 = 1;
    loop {
        let candidate = format!("{base}-{counter}");
        if !lookup.slug_exists(&candidate, exclude_id).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

/// Validates a caller-supplied slug on create/update.
///
/// Explicit slugs are never silently disambiguated: if another entity
/// (excluding `exclude_id`) already owns it, the caller gets a conflict.
pub async fn require_free_slug<L>(
    lookup: &L,
    slug: &str,
    exclude_id: Option<ObjectId>,
) -> Result<(), AppError>
where
    L: SlugLookup + ?Sized,
{
    if slug.is_empty() {
        return Err(AppError::BadRequest("Slug cannot be empty".into()));
    }
    if lookup.slug_exists(slug, exclude_id).await? {
        return Err(AppError::Conflict(
            "Slug already exists. Please choose a different one.".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("Kerala Backwaters!!"), "kerala-backwaters");
    }

    #[test]
    fn slugify_collapses_whitespace() {
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }

    #[test]
    fn slugify_collapses_hyphen_runs() {
        assert_eq!(slugify("Goa -- Beach --- Trip"), "goa-beach-trip");
    }

    #[test]
    fn slugify_keeps_digits() {
        assert_eq!(slugify("7 Days in Ladakh"), "7-days-in-ladakh");
    }

    #[test]
    fn slugify_handles_degenerate_titles() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slugify_output_is_well_formed() {
        for title in [
            "Kerala Backwaters!!",
            "  Multiple   Spaces  ",
            "Ünïcödé & Émøjî 🏖️ Tour",
            "--already-sluggy--",
            "A.B.C/D_E",
        ] {
            let slug = slugify(title);
            assert!(
                slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "bad chars in {slug:?}"
            );
            assert!(!slug.starts_with('-'), "leading hyphen in {slug:?}");
            assert!(!slug.ends_with('-'), "trailing hyphen in {slug:?}");
            assert!(!slug.contains("--"), "hyphen run in {slug:?}");
        }
    }

    #[tokio::test]
    async fn unique_slug_returns_base_when_free() {
        let mut lookup = MockSlugLookup::new();
        lookup
            .expect_slug_exists()
            .with(eq("goa-trip"), eq(None))
            .returning(|_, _| Ok(false));

        let slug = unique_slug(&lookup, "goa-trip", "fallback", None)
            .await
            .unwrap();
        assert_eq!(slug, "goa-trip");
    }

    #[tokio::test]
    async fn unique_slug_appends_counter_on_collision() {
        let mut lookup = MockSlugLookup::new();
        lookup
            .expect_slug_exists()
            .returning(|slug, _| Ok(slug == "goa-trip"));

        let slug = unique_slug(&lookup, "goa-trip", "fallback", None)
            .await
            .unwrap();
        assert_eq!(slug, "goa-trip-1");
    }

    #[tokio::test]
    async fn unique_slug_skips_taken_counters() {
        let mut lookup = MockSlugLookup::new();
        lookup
            .expect_slug_exists()
            .returning(|slug, _| Ok(matches!(slug, "goa-trip" | "goa-trip-1" | "goa-trip-2")));

        let slug = unique_slug(&lookup, "goa-trip", "fallback", None)
            .await
            .unwrap();
        assert_eq!(slug, "goa-trip-3");
    }

    #[tokio::test]
    async fn unique_slug_substitutes_fallback_for_empty_base() {
        let mut lookup = MockSlugLookup::new();
        lookup.expect_slug_exists().returning(|_, _| Ok(false));

        let slug = unique_slug(&lookup, "", "65f0c0ffee", None).await.unwrap();
        assert_eq!(slug, "65f0c0ffee");
    }

    #[tokio::test]
    async fn unique_slug_passes_exclusion_through() {
        let own_id = ObjectId::new();
        let mut lookup = MockSlugLookup::new();
        lookup
            .expect_slug_exists()
            .with(eq("goa-trip"), eq(Some(own_id)))
            .returning(|_, _| Ok(false));

        let slug = unique_slug(&lookup, "goa-trip", "fallback", Some(own_id))
            .await
            .unwrap();
        assert_eq!(slug, "goa-trip");
    }

    #[tokio::test]
    async fn require_free_slug_rejects_taken() {
        let mut lookup = MockSlugLookup::new();
        lookup.expect_slug_exists().returning(|_, _| Ok(true));

        let err = require_free_slug(&lookup, "goa-trip", None).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn require_free_slug_rejects_empty() {
        let lookup = MockSlugLookup::new();
        let err = require_free_slug(&lookup, "", None).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
