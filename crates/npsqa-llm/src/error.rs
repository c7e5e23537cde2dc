use thiserror::Error;

/// HTTP failure talking to a model server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot connect to {0}")]
    Connection(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    ResponseParsing(String),
    #[error("http client error: {0}")]
    Http(String),
}

impl ClientError {
    pub(crate) fn from_send(err: reqwest::Error, base_url: &str, timeout_secs: u64) -> Self {
        if err.is_connect() {
            Self::Connection(base_url.to_string())
        } else if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else {
            Self::Http(err.to_string())
        }
    }
}

pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client, ClientError> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ClientError::Http(e.to_string()))
}

/// Turn a non-2xx response into [`ClientError::Status`].
pub(crate) fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ClientError::Status { status: status.as_u16(), body })
}
