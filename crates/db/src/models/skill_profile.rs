//! Skill profile entity models.

use serde::Serialize;
use sqlx::FromRow;

use pathlight_core::types::{DbId, Timestamp};

/// A row from the `skill_profiles` table. One per (learner, skill name).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SkillProfile {
    pub id: DbId,
    pub learner_id: DbId,
    pub skill_name: String,
    pub created_at: Timestamp,
}

/// A row from the `skill_topics` table. Unique per (profile, topic name).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SkillTopic {
    pub id: DbId,
    pub profile_id: DbId,
    pub topic_name: String,
    pub proficiency: String,
    pub updated_at: Timestamp,
}

/// A skill profile enriched with its topics.
#[derive(Debug, Clone, Serialize)]
pub struct SkillProfileWithTopics {
    #[serde(flatten)]
    pub profile: SkillProfile,
    pub topics: Vec<SkillTopic>,
}
