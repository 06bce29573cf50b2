//! HTTP client for the external Content Generation Service.
//!
//! The service turns a role or topic description into course structures,
//! module learning materials, and quiz questions. This crate wraps its
//! HTTP+JSON endpoints using [`reqwest`] and validates every response
//! shape before handing it to the engine: a missing or empty `modules`
//! array is an error here, never something callers have to re-check.

mod client;
mod types;

pub use client::{ContentAgentClient, ContentAgentError};
pub use types::{
    ArticleRef, GeneratedCourse, GeneratedCurriculum, GeneratedModule, GeneratedQuestion,
    GeneratedQuiz, ModuleContent, RemedialSuggestion, VideoRef,
};
