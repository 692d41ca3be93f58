use std::fmt;

/// Default top-level prefix that published project builds live under.
pub const DEFAULT_KEY_PREFIX: &str = "main";

/// Name of the entry-point document inside a project.
pub const ROOT_DOCUMENT: &str = "index.html";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    #[error("project id must not be empty")]
    EmptyRepoId,
    #[error("invalid project id: {0}")]
    InvalidRepoId(String),
    #[error("asset path must not be empty")]
    EmptyAssetPath,
    #[error("asset path contains a traversal segment: {0}")]
    Traversal(String),
    #[error("asset path contains an empty segment: {0}")]
    EmptySegment(String),
    #[error("asset path contains a backslash: {0}")]
    Backslash(String),
}

/// Opaque project namespace taken from the `/projects/{repoId}` segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId(String);

impl RepoId {
    /// Validate a single path segment as a project id.
    ///
    /// Path extractors percent-decode their captures, so `%2F` can arrive here
    /// as a literal `/`. Anything that would split into a second key segment
    /// or walk out of the project namespace is rejected.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::EmptyRepoId);
        }
        if input == "." || input == ".." || input.contains(['/', '\\']) {
            return Err(PathError::InvalidRepoId(input.to_string()));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public mount point of this project, always with a trailing slash.
    pub fn mount_path(&self) -> String {
        format!("/projects/{}/", self.0)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relative file path inside a project, possibly nested (`assets/app.js`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetPath(String);

impl AssetPath {
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::EmptyAssetPath);
        }
        if input.contains('\\') {
            return Err(PathError::Backslash(input.to_string()));
        }
        for segment in input.split('/') {
            match segment {
                "" => return Err(PathError::EmptySegment(input.to_string())),
                "." | ".." => return Err(PathError::Traversal(input.to_string())),
                _ => {}
            }
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the path names the project's entry-point document.
    pub fn is_root_document(&self) -> bool {
        self.0 == ROOT_DOCUMENT
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Object-storage key; always inside `{prefix}/{repoId}/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Key of the project's root document: `{prefix}/{repoId}/index.html`.
    pub fn root(prefix: &str, repo: &RepoId) -> Self {
        Self(format!("{}/{}/{ROOT_DOCUMENT}", trim_prefix(prefix), repo))
    }

    /// Key of a file inside the project: `{prefix}/{repoId}/{path}`.
    pub fn asset(prefix: &str, repo: &RepoId, path: &AssetPath) -> Self {
        Self(format!("{}/{}/{}", trim_prefix(prefix), repo, path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn trim_prefix(prefix: &str) -> &str {
    prefix.trim_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(id: &str) -> RepoId {
        RepoId::parse(id).expect("valid repo id")
    }

    #[test]
    fn root_key_uses_index_document() {
        let key = StorageKey::root(DEFAULT_KEY_PREFIX, &repo("abc123"));
        assert_eq!(key.as_str(), "main/abc123/index.html");
    }

    #[test]
    fn asset_key_keeps_nested_segments() {
        let path = AssetPath::parse("static/js/main.3f2a.js").expect("valid path");
        let key = StorageKey::asset(DEFAULT_KEY_PREFIX, &repo("abc123"), &path);
        assert_eq!(key.as_str(), "main/abc123/static/js/main.3f2a.js");
    }

    #[test]
    fn prefix_slashes_are_trimmed() {
        let key = StorageKey::root("/builds/", &repo("p"));
        assert_eq!(key.as_str(), "builds/p/index.html");
    }

    #[test]
    fn repo_id_rejects_empty_and_dot_segments() {
        assert_eq!(RepoId::parse(""), Err(PathError::EmptyRepoId));
        assert!(matches!(RepoId::parse(".."), Err(PathError::InvalidRepoId(_))));
        assert!(matches!(RepoId::parse("."), Err(PathError::InvalidRepoId(_))));
    }

    #[test]
    fn repo_id_rejects_decoded_separators() {
        assert!(RepoId::parse("a/../b").is_err());
        assert!(RepoId::parse("a\\b").is_err());
    }

    #[test]
    fn asset_path_rejects_traversal() {
        assert!(matches!(
            AssetPath::parse("../secret"),
            Err(PathError::Traversal(_))
        ));
        assert!(matches!(
            AssetPath::parse("assets/../../other/index.html"),
            Err(PathError::Traversal(_))
        ));
        assert!(matches!(
            AssetPath::parse("./index.html"),
            Err(PathError::Traversal(_))
        ));
    }

    #[test]
    fn asset_path_rejects_empty_segments_and_backslashes() {
        assert_eq!(AssetPath::parse(""), Err(PathError::EmptyAssetPath));
        assert!(matches!(
            AssetPath::parse("a//b.js"),
            Err(PathError::EmptySegment(_))
        ));
        assert!(matches!(
            AssetPath::parse("/etc/passwd"),
            Err(PathError::EmptySegment(_))
        ));
        assert!(matches!(
            AssetPath::parse("..\\secret"),
            Err(PathError::Backslash(_))
        ));
    }

    #[test]
    fn dots_inside_names_are_allowed() {
        let path = AssetPath::parse("assets/app..min.js").expect("dots in a name are fine");
        assert_eq!(path.as_str(), "assets/app..min.js");
        assert!(!path.is_root_document());
        assert!(AssetPath::parse("index.html").expect("valid").is_root_document());
    }

    #[test]
    fn mount_path_has_trailing_slash() {
        assert_eq!(repo("abc123").mount_path(), "/projects/abc123/");
    }
}
