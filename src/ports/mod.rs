//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the submission logic and the outside world (HTTP backend, the
//! user's notification area).

mod notifier;
mod prediction_api;

pub use notifier::{Notification, NotificationLevel, Notifier};
pub use prediction_api::{ApiError, FailureKind, PredictionApi};
