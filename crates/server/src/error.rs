use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// The only client-visible failure.
///
/// Missing objects, empty root documents, storage errors, timeouts and
/// malformed paths all end up here. Details are logged where they are
/// detected and never reach the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFound {
    Project,
    Asset,
}

impl NotFound {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Project => "Project not found",
            Self::Asset => "Asset not found",
        }
    }
}

impl IntoResponse for NotFound {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.message(),
        )
            .into_response()
    }
}
