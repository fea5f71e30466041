//! Wren - A minimalist terminal composer for posting to X
//!
//! The core is small: [`compose::on_text_changed`] keeps a draft within
//! [`compose::MAX_POST_CHARS`], and [`compose::SubmissionFlow`] sends it
//! through a [`api::PostingApi`] and shows the result before clearing up.

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::future_not_send)]

pub mod api;
pub mod app;
pub mod compose;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod paths;
pub mod theme;

// Re-export main types for convenience
pub use api::{PostingApi, XClient};
pub use compose::{DraftSession, FlowState, MAX_POST_CHARS, Outcome, SubmissionFlow};
pub use config::Config;
pub use credentials::Credentials;
pub use error::{ConfigurationError, SubmissionError};
pub use models::{PostResult, SubmissionResult};
pub use theme::{Theme, ThemeColors};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
