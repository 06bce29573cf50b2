//! HTTP request handlers.
//!
//! Handlers stay thin: extract and validate input, delegate to a
//! repository or an engine operation, wrap the result in the standard
//! `{ "data": ... }` envelope.

pub mod analytics;
pub mod assessment;
pub mod course;
pub mod learner;
pub mod progression;
pub mod suggestion;
