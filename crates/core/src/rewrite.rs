//! Root-document path rewriting.
//!
//! Published builds reference their files with root-absolute paths
//! (`src="/assets/app.js"`). Under the shared `/projects/{repoId}/` mount those
//! would resolve against the domain root, so the entry document is patched
//! before it is served.
//!
//! Rewriting is a plain textual substitution over the decoded document, not an
//! HTML parse. Matches inside inline scripts, comments, or attributes whose
//! name merely ends in `src`/`href`/`content` (`data-src="/`) are rewritten as
//! well. Served output depends on this exact behaviour.

use crate::path::RepoId;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStrategy {
    /// Inject `<base href="/projects/{repoId}/">` and make `src`/`href` relative.
    BaseTag,
    /// Prefix `src`/`href`/`content` root paths with `/projects/{repoId}`.
    #[default]
    PrefixRewrite,
}

impl RewriteStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaseTag => "base_tag",
            Self::PrefixRewrite => "prefix_rewrite",
        }
    }
}

impl fmt::Display for RewriteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown rewrite strategy: {0} (expected base_tag or prefix_rewrite)")]
pub struct UnknownStrategy(pub String);

impl FromStr for RewriteStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "base_tag" | "base" => Ok(Self::BaseTag),
            "prefix_rewrite" | "prefix" => Ok(Self::PrefixRewrite),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

static SRC_HREF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(src|href)="/"#).unwrap());

static SRC_HREF_CONTENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(src|href|content)="/"#).unwrap());

const HEAD_OPEN: &str = "<head>";

/// Rewrite root-absolute references in a project's entry document.
pub fn rewrite_root_document(html: &str, repo: &RepoId, strategy: RewriteStrategy) -> String {
    match strategy {
        RewriteStrategy::BaseTag => inject_base_tag(&strip_leading_slash(html), repo),
        RewriteStrategy::PrefixRewrite => prefix_paths(html, repo),
    }
}

fn strip_leading_slash(html: &str) -> String {
    SRC_HREF_RE
        .replace_all(html, |caps: &Captures| format!("{}=\"", &caps[1]))
        .into_owned()
}

// Runs after the slash stripping so the injected tag keeps its absolute href.
fn inject_base_tag(html: &str, repo: &RepoId) -> String {
    let base = format!("<base href=\"{}\">", repo.mount_path());
    if html.contains(HEAD_OPEN) {
        html.replacen(HEAD_OPEN, &format!("{HEAD_OPEN}{base}"), 1)
    } else {
        format!("{base}{html}")
    }
}

fn prefix_paths(html: &str, repo: &RepoId) -> String {
    let mount = repo.mount_path();
    SRC_HREF_CONTENT_RE
        .replace_all(html, |caps: &Captures| format!("{}=\"{mount}", &caps[1]))
        .into_owned()
}
