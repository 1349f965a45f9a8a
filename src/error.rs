use serde::Deserialize;

// =========================================================
// 客户端错误类型
// =========================================================

/// Message used when the server answered non-2xx without a readable reason.
pub fn generic_status_message(status: u16) -> String {
    format!("Request failed with status code {}", status)
}

/// Failure of a single API call.
///
/// `Display` is always a sentence that can be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Network Error")]
    Network(String),
    /// 401: bad credentials, or a token the server no longer accepts.
    #[error("{message}")]
    Unauthorized { message: String },
    /// Any other non-2xx answer.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 2xx whose body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    /// The request body could not be serialized.
    #[error("Could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Builds the error for a non-2xx response, preferring the server's own
    /// `message`/`error` field over the generic fallback.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = ErrorBody::parse(body).unwrap_or_else(|| generic_status_message(status));
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status { status, message }
        }
    }

    /// HTTP status, when there was a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Decode(_) | ApiError::Encode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error payload shapes produced by the API (`{"message": ..}` from
/// handlers, `{"error": ..}` from middleware, `{"errors": [{"msg": ..}]}`
/// from request validators).
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Vec<FieldMessage>,
}

#[derive(Debug, Deserialize)]
struct FieldMessage {
    #[serde(default)]
    msg: Option<String>,
}

impl ErrorBody {
    fn parse(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed
            .message
            .or(parsed.error)
            .or_else(|| parsed.errors.into_iter().find_map(|e| e.msg))
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins() {
        let err = ApiError::from_status(400, r#"{"message":"Store already exists"}"#);
        assert_eq!(err.to_string(), "Store already exists");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn alternative_payload_shapes() {
        let err = ApiError::from_status(403, r#"{"error":"Access denied"}"#);
        assert_eq!(err.to_string(), "Access denied");

        let err = ApiError::from_status(422, r#"{"errors":[{"msg":"Invalid value"}]}"#);
        assert_eq!(err.to_string(), "Invalid value");
    }

    #[test]
    fn falls_back_to_generic_message() {
        let err = ApiError::from_status(500, "<html>oops</html>");
        assert_eq!(err.to_string(), "Request failed with status code 500");

        let err = ApiError::from_status(502, r#"{"message":"  "}"#);
        assert_eq!(err.to_string(), "Request failed with status code 502");
    }

    #[test]
    fn unauthorized_is_its_own_variant() {
        let err = ApiError::from_status(401, r#"{"message":"Invalid credentials"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn network_errors_read_like_the_browser() {
        let err = ApiError::Network("TypeError: Failed to fetch".into());
        assert_eq!(err.to_string(), "Network Error");
        assert_eq!(err.status(), None);
    }
}
