//! Status code classification.

use http::{HeaderMap, StatusCode, header};

use crate::error::ErrorKind;
use crate::interceptor::Interceptor;
use crate::{Response, Result};

/// Map a response status to an [`ErrorKind`].
///
/// Returns `None` for 2xx. Only the status code and, for 302, the
/// `Location` header are inspected.
pub fn classify(status: StatusCode, headers: &HeaderMap) -> Option<ErrorKind> {
    if status.is_success() {
        return None;
    }

    let kind = match status {
        StatusCode::FOUND => ErrorKind::Found {
            location: headers
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string(),
        },
        StatusCode::BAD_REQUEST => ErrorKind::BadRequest("Bad Request".to_string()),
        StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized("Unauthorized".to_string()),
        StatusCode::FORBIDDEN => ErrorKind::Forbidden("Forbidden".to_string()),
        StatusCode::NOT_FOUND => ErrorKind::NotFound("Not Found".to_string()),
        StatusCode::CONFLICT => ErrorKind::Conflict("Conflict".to_string()),
        StatusCode::UNPROCESSABLE_ENTITY => {
            ErrorKind::UnprocessableEntity("Unprocessable Entity".to_string())
        }
        StatusCode::TOO_MANY_REQUESTS => {
            ErrorKind::TooManyRequests("Too Many Requests".to_string())
        }
        s if s.is_client_error() => ErrorKind::BadRequest(format!(
            "Client Error {}: {}",
            s.as_u16(),
            reason(s)
        )),
        StatusCode::INTERNAL_SERVER_ERROR => {
            ErrorKind::InternalServerError("Internal Server Error".to_string())
        }
        s => ErrorKind::InternalServerError(format!(
            "Server Error {}: {}",
            s.as_u16(),
            reason(s)
        )),
    };

    Some(kind)
}

pub(crate) fn reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}

/// Interceptor that turns every non-2xx response into an [`ErrorKind`].
///
/// The factory installs it as the outermost interceptor of every client.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusClassifier;

impl Interceptor for StatusClassifier {
    fn intercept_response(&self, response: Response) -> Result<Response> {
        match classify(response.status(), response.headers()) {
            None => Ok(response),
            Some(kind) => {
                tracing::debug!(
                    status = response.status().as_u16(),
                    url = %response.url(),
                    error = %kind,
                    "Classified non-success response"
                );
                Err(kind.into())
            }
        }
    }
}
