//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods with a `_tx`
//! suffix take an open transaction instead so the engine can combine
//! writes across repositories atomically.

pub mod assessment_repo;
pub mod completed_course_repo;
pub mod course_repo;
pub mod learner_repo;
pub mod notification_repo;
pub mod skill_profile_repo;
pub mod suggestion_repo;
pub mod task_repo;

pub use assessment_repo::AssessmentRepo;
pub use completed_course_repo::CompletedCourseRepo;
pub use course_repo::CourseRepo;
pub use learner_repo::LearnerRepo;
pub use notification_repo::NotificationRepo;
pub use skill_profile_repo::SkillProfileRepo;
pub use suggestion_repo::SuggestionRepo;
pub use task_repo::TaskRepo;
