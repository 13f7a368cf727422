use thiserror::Error;
use utils::{DomError, FetchError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("the element doesn't exist: {0}")]
    TargetNotFound(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("modal was already opened")]
    AlreadyOpened,
    #[error("dom error: {0}")]
    Dom(#[from] DomError),
}
