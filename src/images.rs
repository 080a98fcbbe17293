//! Normalization of stored image paths into absolute URLs.
//!
//! Documents store whatever an admin pasted: bare filenames, `/uploads/...`
//! paths, full URLs, and (historically) full URLs that were joined onto
//! `/uploads/` a second time. Handlers run every outgoing image field
//! through these helpers so the frontend always receives one shape.

/// Builds the absolute URL for a stored image path.
///
/// Already-absolute `http(s)` URLs pass through untouched, except for the
/// legacy `/uploads/https://...` double-prefix corruption which is repaired
/// by extracting the inner URL. Relative paths are joined to `base_url` as
/// `{base}/uploads/{name}`; with no base configured the relative
/// `/uploads/{name}` form is returned.
pub fn absolutize(image: &str, base_url: Option<&str>) -> String {
    if image.is_empty() {
        return String::new();
    }

    if image.starts_with("http://") || image.starts_with("https://") {
        if let Some(inner) = repair_double_prefix(image) {
            return inner.to_string();
        }
        return image.to_string();
    }

    let clean = image.trim_start_matches('/');
    // Paths that already carry the uploads prefix keep it once.
    let clean = clean.strip_prefix("uploads/").unwrap_or(clean);

    match base_url {
        Some(base) => format!("{}/uploads/{}", base.trim_end_matches('/'), clean),
        None => format!("/uploads/{clean}"),
    }
}

/// Recovers the real URL from values like
/// `https://old-host/uploads/https://backend/uploads/beach.jpg`.
fn repair_double_prefix(image: &str) -> Option<&str> {
    let idx = image.find("/uploads/http")?;
    let inner = &image[idx + "/uploads/".len()..];
    if inner.starts_with("http://") || inner.starts_with("https://") {
        Some(inner)
    } else {
        None
    }
}

/// Absolutizes every entry of an image list in place.
pub fn absolutize_all(images: &mut [String], base_url: Option<&str>) {
    for image in images.iter_mut() {
        *image = absolutize(image, base_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_joined_to_base() {
        assert_eq!(
            absolutize("beach.jpg", Some("https://api.example.com")),
            "https://api.example.com/uploads/beach.jpg"
        );
    }

    #[test]
    fn leading_slash_does_not_double() {
        assert_eq!(
            absolutize("/uploads/beach.jpg", Some("https://api.example.com/")),
            "https://api.example.com/uploads/beach.jpg"
        );
    }

    #[test]
    fn absolute_url_passes_through() {
        assert_eq!(
            absolutize("https://cdn.example.com/a.jpg", Some("https://api.example.com")),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn double_prefix_is_repaired() {
        assert_eq!(
            absolutize(
                "https://old.example.com/uploads/https://api.example.com/uploads/a.jpg",
                None
            ),
            "https://api.example.com/uploads/a.jpg"
        );
    }

    #[test]
    fn no_base_yields_relative_uploads_path() {
        assert_eq!(absolutize("a.jpg", None), "/uploads/a.jpg");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(absolutize("", Some("https://x")), "");
    }
}
