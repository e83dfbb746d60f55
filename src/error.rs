use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use sea_orm::DbErr;

/// Failures a request handler can end with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Abandons the request and sends the browser elsewhere.
    #[error("redirect to {0}")]
    Redirect(String),
    #[error("database error: {0}")]
    Store(#[from] DbErr),
    #[error("failed to render template: {0}")]
    Render(#[from] askama::Error),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect(to.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Redirect(_) => StatusCode::SEE_OTHER,
            Self::Store(_) | Self::Render(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Redirect(to) = &self {
            return Redirect::to(to).into_response();
        }

        let status = self.status();
        tracing::error!(error = %self, "request failed");
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            "Internal Server Error".to_string()
        };

        error_page(status, &message)
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub(crate) struct ErrorTemplate<'a> {
    pub status: u16,
    pub reason: &'a str,
    pub message: &'a str,
}

/// Standalone HTML page for a failed request. Falls back to plain text when
/// the template itself fails.
pub(crate) fn error_page(status: StatusCode, message: &str) -> Response {
    let page = ErrorTemplate {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Error"),
        message,
    };
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render error page");
            (status, status.to_string()).into_response()
        }
    }
}
