//! Pure domain logic for the Pathlight learning platform.
//!
//! This crate has zero internal dependencies so it can be used by the
//! API/repository layer and any future worker or CLI tooling. Everything
//! here is synchronous and side-effect free: progression arithmetic,
//! assessment scoring, proficiency tiers, and status state machines.

pub mod assessment;
pub mod error;
pub mod progression;
pub mod remedial;
pub mod skill;
pub mod suggestion;
pub mod types;
