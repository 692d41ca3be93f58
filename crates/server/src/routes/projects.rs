use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};

use crate::error::NotFound;
use crate::resolver::Resolver;

/// GET /projects/{repo_id}, /projects/{repo_id}/ and /projects/{repo_id}/index.html
///
/// Path rejections (e.g. percent-encoded invalid UTF-8) are answered with the
/// same 404 as a missing object.
pub async fn root(
    State(resolver): State<Resolver>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let Ok(Path(repo_id)) = path else {
        return NotFound::Project.into_response();
    };
    resolver.resolve_root(&repo_id).await.into_response()
}

/// GET /projects/{repo_id}/{*file_path}
pub async fn asset(
    State(resolver): State<Resolver>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Response {
    let Ok(Path((repo_id, file_path))) = path else {
        return NotFound::Asset.into_response();
    };
    let served = if resolver.spa_fallback_enabled() {
        resolver.resolve_spa_fallback(&repo_id, &file_path).await
    } else {
        resolver.resolve_asset(&repo_id, &file_path).await
    };
    served.into_response()
}
