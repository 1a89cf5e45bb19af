//! Dialogue agent for the banking product catalog
//!
//! One turn flows: detect language -> classify intent -> dispatch to a
//! catalog keyword handler or the generation fallback chain -> append the
//! contact footer. Every failure path renders to localized user-facing
//! text; a turn never surfaces an error to the caller.

pub mod advisor;
pub mod classifier;
pub mod context;
pub mod fallback;
pub mod handlers;
pub mod messages;
pub mod render;

pub use advisor::{is_exit_command, Advisor};
pub use classifier::{DetectedIntent, IntentClassifier, GENERAL_INTENT};
pub use context::SessionContext;
pub use fallback::GenerationChain;
pub use render::{CardSummary, LoanSummary, SummaryExtractor};
