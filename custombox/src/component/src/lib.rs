pub mod config;
pub mod content;
pub mod custombox;
pub mod error;
pub mod modal;
pub mod overlay;
pub mod toggle;
pub mod wrapper;

pub use config::{Animation, Edge, Options, Settings};
pub use error::ModalError;
pub use modal::{LifecycleEvent, Modal, Phase};
pub use toggle::ModalToggle;

/// Which way a visual node is animating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Open,
    Close,
}
