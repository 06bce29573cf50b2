//! Repository for the `skill_profiles` and `skill_topics` tables.

use sqlx::PgPool;

use pathlight_core::types::DbId;

use crate::models::skill_profile::{SkillProfile, SkillProfileWithTopics, SkillTopic};

/// Column list for `skill_profiles` queries.
const COLUMNS: &str = "id, learner_id, skill_name, created_at";

/// Column list for `skill_topics` queries.
const TOPIC_COLUMNS: &str = "id, profile_id, topic_name, proficiency, updated_at";

/// Provides operations on learner skill profiles and their topic verdicts.
pub struct SkillProfileRepo;

impl SkillProfileRepo {
    /// Return the profile for `(learner, skill_name)`, creating it if it
    /// does not exist yet.
    pub async fn find_or_create_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
        skill_name: &str,
    ) -> Result<SkillProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO skill_profiles (learner_id, skill_name) \
             VALUES ($1, $2) \
             ON CONFLICT (learner_id, skill_name) DO UPDATE SET skill_name = EXCLUDED.skill_name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SkillProfile>(&query)
            .bind(learner_id)
            .bind(skill_name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Write a topic verdict into a profile. An existing verdict for the
    /// same topic is overwritten (last write wins).
    pub async fn upsert_topic_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        profile_id: DbId,
        topic_name: &str,
        proficiency: &str,
    ) -> Result<SkillTopic, sqlx::Error> {
        let query = format!(
            "INSERT INTO skill_topics (profile_id, topic_name, proficiency) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (profile_id, topic_name) \
             DO UPDATE SET proficiency = EXCLUDED.proficiency, updated_at = NOW() \
             RETURNING {TOPIC_COLUMNS}"
        );
        sqlx::query_as::<_, SkillTopic>(&query)
            .bind(profile_id)
            .bind(topic_name)
            .bind(proficiency)
            .fetch_one(&mut **tx)
            .await
    }

    /// All of a learner's profiles with their topics, oldest profile first.
    pub async fn list_for_learner(
        pool: &PgPool,
        learner_id: DbId,
    ) -> Result<Vec<SkillProfileWithTopics>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skill_profiles \
             WHERE learner_id = $1 ORDER BY created_at"
        );
        let profiles = sqlx::query_as::<_, SkillProfile>(&query)
            .bind(learner_id)
            .fetch_all(pool)
            .await?;

        let topic_query = format!(
            "SELECT {TOPIC_COLUMNS} FROM skill_topics \
             WHERE profile_id = $1 ORDER BY topic_name"
        );
        let mut out = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let topics = sqlx::query_as::<_, SkillTopic>(&topic_query)
                .bind(profile.id)
                .fetch_all(pool)
                .await?;
            out.push(SkillProfileWithTopics { profile, topics });
        }
        Ok(out)
    }

    /// Delete every profile (and topic, via cascade) for a learner.
    pub async fn delete_all_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        learner_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM skill_profiles WHERE learner_id = $1")
            .bind(learner_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
