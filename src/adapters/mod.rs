//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: ureq client for the prediction backend
//! - `toast`: expiring notification queue rendered by the TUI
//! - `sanitize`: clinical value and secret filtering for logs

pub mod http;
pub mod sanitize;
pub mod toast;

pub use http::HttpPredictionClient;
pub use toast::ToastQueue;
