use super::*;

#[derive(Debug)]
pub(super) enum ServerError {
  NotFound(String),
  Upstream(ExplorerError),
}

pub(super) type ServerResult<T = Response> = Result<T, ServerError>;

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
  (
    status,
    Json(api::ErrorResponse {
      error: error.into(),
    }),
  )
    .into_response()
}

impl IntoResponse for ServerError {
  fn into_response(self) -> Response {
    match self {
      Self::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
      Self::Upstream(error) if error.is_rate_limited() => {
        log::warn!("explorer rate limited: {error}");
        error_response(
          StatusCode::TOO_MANY_REQUESTS,
          "rate limit exceeded, please try again later",
        )
      }
      Self::Upstream(error) => {
        log::error!("error serving request: {error}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to fetch ordinals")
      }
    }
  }
}

impl From<ExplorerError> for ServerError {
  fn from(error: ExplorerError) -> Self {
    Self::Upstream(error)
  }
}

impl From<ledger::NotFound> for ServerError {
  fn from(error: ledger::NotFound) -> Self {
    Self::NotFound(error.to_string())
  }
}
