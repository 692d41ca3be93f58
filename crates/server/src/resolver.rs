//! Project Asset Resolver: request path → storage key → response body.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use projecthost_core::{
    ASSET_CACHE_CONTROL, AssetPath, HTML_CONTENT_TYPE, ROOT_CACHE_CONTROL, RepoId,
    RewriteStrategy, StorageKey, content_type_for, rewrite_root_document,
};
use std::sync::Arc;

use crate::error::NotFound;
use crate::storage::ProjectStore;

/// A successfully resolved file, ready to be sent with a 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedFile {
    pub body: Bytes,
    pub content_type: &'static str,
    pub cache_control: &'static str,
}

impl ServedFile {
    fn root_document(html: String) -> Self {
        Self {
            body: Bytes::from(html),
            content_type: HTML_CONTENT_TYPE,
            cache_control: ROOT_CACHE_CONTROL,
        }
    }

    fn asset(path: &AssetPath, body: Bytes) -> Self {
        Self {
            body,
            content_type: content_type_for(path.as_str()),
            cache_control: ASSET_CACHE_CONTROL,
        }
    }
}

impl IntoResponse for ServedFile {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.content_type),
                (header::CACHE_CONTROL, self.cache_control),
            ],
            self.body,
        )
            .into_response()
    }
}

#[derive(Clone)]
pub struct Resolver {
    store: ProjectStore,
    key_prefix: Arc<str>,
    strategy: RewriteStrategy,
    spa_fallback: bool,
}

impl Resolver {
    pub fn new(
        store: ProjectStore,
        key_prefix: &str,
        strategy: RewriteStrategy,
        spa_fallback: bool,
    ) -> Self {
        Self {
            store,
            key_prefix: Arc::from(key_prefix),
            strategy,
            spa_fallback,
        }
    }

    pub fn spa_fallback_enabled(&self) -> bool {
        self.spa_fallback
    }

    /// Serve the rewritten `index.html` of a project.
    pub async fn resolve_root(&self, repo_id: &str) -> Result<ServedFile, NotFound> {
        let repo = RepoId::parse(repo_id).map_err(|e| {
            tracing::warn!("rejected project id {repo_id:?}: {e}");
            NotFound::Project
        })?;
        self.root_document(&repo).await
    }

    /// Serve a file from a project verbatim. HTML assets are not rewritten.
    pub async fn resolve_asset(
        &self,
        repo_id: &str,
        file_path: &str,
    ) -> Result<ServedFile, NotFound> {
        let (repo, path) = parse_asset_request(repo_id, file_path)?;
        self.asset(&repo, &path).await
    }

    /// Like [`Resolver::resolve_asset`], but a well-formed path that matches no
    /// stored file gets the project's root document instead of a 404.
    ///
    /// The literal asset is always tried first. Malformed paths never fall back.
    pub async fn resolve_spa_fallback(
        &self,
        repo_id: &str,
        request_path: &str,
    ) -> Result<ServedFile, NotFound> {
        let (repo, path) = parse_asset_request(repo_id, request_path)?;
        match self.asset(&repo, &path).await {
            Ok(file) => Ok(file),
            Err(_) => {
                tracing::debug!("serving app shell of {repo} for client route {path}");
                self.root_document(&repo).await
            }
        }
    }

    async fn root_document(&self, repo: &RepoId) -> Result<ServedFile, NotFound> {
        let key = StorageKey::root(&self.key_prefix, repo);
        let body = match self.store.fetch(&key).await {
            Ok(body) if body.is_empty() => {
                tracing::warn!("no content found for key: {key}");
                return Err(NotFound::Project);
            }
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("error fetching root document {key}: {e}");
                return Err(NotFound::Project);
            }
        };
        let html = String::from_utf8_lossy(&body);
        Ok(ServedFile::root_document(rewrite_root_document(
            &html,
            repo,
            self.strategy,
        )))
    }

    async fn asset(&self, repo: &RepoId, path: &AssetPath) -> Result<ServedFile, NotFound> {
        let key = StorageKey::asset(&self.key_prefix, repo, path);
        match self.store.fetch(&key).await {
            Ok(body) => Ok(ServedFile::asset(path, body)),
            Err(e) => {
                tracing::warn!("asset not found for key {key}: {e}");
                Err(NotFound::Asset)
            }
        }
    }
}

fn parse_asset_request(repo_id: &str, file_path: &str) -> Result<(RepoId, AssetPath), NotFound> {
    let parsed = RepoId::parse(repo_id).and_then(|repo| Ok((repo, AssetPath::parse(file_path)?)));
    parsed.map_err(|e| {
        tracing::warn!("rejected asset request {repo_id:?}/{file_path:?}: {e}");
        NotFound::Asset
    })
}
