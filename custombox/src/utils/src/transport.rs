use futures::future::LocalBoxFuture;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed with status {status}: {status_text}")]
    Status { status: u16, status_text: String },
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// Plain GET used to load remote content fragments.
///
/// Any response that made it back is `Ok`, whatever its status; only
/// transport level failures are errors here.
pub trait Transport {
    fn get(&self, url: &str) -> LocalBoxFuture<'static, Result<Response, FetchError>>;
}
