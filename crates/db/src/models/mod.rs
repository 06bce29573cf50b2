//! Typed row models and request DTOs, one module per entity.

pub mod assessment;
pub mod course;
pub mod learner;
pub mod notification;
pub mod skill_profile;
pub mod suggestion;
pub mod task;
