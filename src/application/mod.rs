//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application: submitting a form to the
//! backend off the UI thread and turning the answer into a result card.

pub mod presenter;
mod submission;
mod worker;

pub use presenter::{present, RiskPresentation, Tone};
pub use submission::{
    SubmissionController, SubmissionPhase, SubmitOutcome, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
pub use worker::{CallHandle, CallWorker};
