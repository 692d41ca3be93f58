/// Content type of the rewritten root document.
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Fallback for unknown or missing extensions.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Root documents may be republished at any time; keep the freshness window short.
pub const ROOT_CACHE_CONTROL: &str = "public, max-age=60";

/// Build assets are versioned by the bundler and safe to cache for a day.
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=86400";

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("js", "application/javascript"),
    ("css", "text/css"),
    ("html", "text/html"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("json", "application/json"),
];

/// Content type derived from the final extension of `path`, case-insensitive.
pub fn content_type_for(path: &str) -> &'static str {
    extension(path)
        .and_then(|ext| {
            CONTENT_TYPES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(ext))
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

// Dotfiles such as `.env` have no extension, matching the usual extname rules.
fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_table() {
        assert_eq!(content_type_for("assets/app.js"), "application/javascript");
        assert_eq!(content_type_for("styles/main.css"), "text/css");
        assert_eq!(content_type_for("404.html"), "text/html");
        assert_eq!(content_type_for("logo.svg"), "image/svg+xml");
        assert_eq!(content_type_for("a/b/c.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("photo.jpg"), "image/jpeg");
        assert_eq!(content_type_for("fonts/inter.woff2"), "font/woff2");
        assert_eq!(content_type_for("manifest.json"), "application/json");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(content_type_for("app.JS"), "application/javascript");
        assert_eq!(content_type_for("IMG.PnG"), "image/png");
    }

    #[test]
    fn unknown_or_missing_extension_is_binary() {
        assert_eq!(content_type_for("robots.txt"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("LICENSE"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("dir.js/file"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(".js"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("trailing."), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn only_last_extension_counts() {
        assert_eq!(content_type_for("bundle.css.map"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("data.min.json"), "application/json");
    }
}
