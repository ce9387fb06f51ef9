use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecoError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("decode error: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_renders_like_fetch_failures() {
        assert_eq!(RecoError::Status(502).to_string(), "HTTP 502");
        assert_eq!(
            RecoError::Decode("expected value".into()).to_string(),
            "decode error: expected value"
        );
    }
}
