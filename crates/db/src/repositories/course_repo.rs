//! Repository for the `courses` and `course_modules` tables.

use sqlx::PgPool;

use pathlight_core::types::DbId;

use crate::models::course::{Course, CourseModule, CourseWithModules, CreateCourse};

/// Column list for `courses` queries.
const COLUMNS: &str =
    "id, name, description, target_department, target_role, created_at, updated_at";

/// Column list for `course_modules` queries.
const MODULE_COLUMNS: &str =
    "id, course_id, position, title, summary, articles, video, content";

/// Provides CRUD operations for courses and their modules.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a course with its ordered modules in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCourse,
    ) -> Result<CourseWithModules, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO courses (name, description, target_department, target_role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let course = sqlx::query_as::<_, Course>(&insert_query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.target_department)
            .bind(&input.target_role)
            .fetch_one(&mut *tx)
            .await?;

        let module_query = format!(
            "INSERT INTO course_modules \
                 (course_id, position, title, summary, articles, video, content) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {MODULE_COLUMNS}"
        );
        let mut modules = Vec::with_capacity(input.modules.len());
        for (position, module) in input.modules.iter().enumerate() {
            let row = sqlx::query_as::<_, CourseModule>(&module_query)
                .bind(course.id)
                .bind(position as i32)
                .bind(&module.title)
                .bind(&module.summary)
                .bind(&module.articles)
                .bind(&module.video)
                .bind(&module.content)
                .fetch_one(&mut *tx)
                .await?;
            modules.push(row);
        }

        tx.commit().await?;
        Ok(CourseWithModules { course, modules })
    }

    /// List all courses, newest first (modules not included).
    pub async fn list(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses ORDER BY created_at DESC");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// Find a course by ID, enriched with its ordered modules.
    pub async fn find_by_id_with_modules(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CourseWithModules>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match course {
            Some(course) => {
                let modules = Self::modules_for_course(pool, course.id).await?;
                Ok(Some(CourseWithModules { course, modules }))
            }
            None => Ok(None),
        }
    }

    /// Find a course by its unique name, enriched with its ordered modules.
    pub async fn find_by_name_with_modules(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<CourseWithModules>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE name = $1");
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        match course {
            Some(course) => {
                let modules = Self::modules_for_course(pool, course.id).await?;
                Ok(Some(CourseWithModules { course, modules }))
            }
            None => Ok(None),
        }
    }

    /// Ordered modules for a course.
    pub async fn modules_for_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<CourseModule>, sqlx::Error> {
        let query = format!(
            "SELECT {MODULE_COLUMNS} FROM course_modules \
             WHERE course_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Fill in generated learning materials for one module.
    ///
    /// Returns the updated module, or `None` when the module does not
    /// belong to the course.
    pub async fn update_module_content(
        pool: &PgPool,
        course_id: DbId,
        module_id: DbId,
        summary: &str,
        articles: &serde_json::Value,
        video: Option<&serde_json::Value>,
    ) -> Result<Option<CourseModule>, sqlx::Error> {
        let query = format!(
            "UPDATE course_modules SET summary = $3, articles = $4, video = $5 \
             WHERE id = $1 AND course_id = $2 \
             RETURNING {MODULE_COLUMNS}"
        );
        sqlx::query_as::<_, CourseModule>(&query)
            .bind(module_id)
            .bind(course_id)
            .bind(summary)
            .bind(articles)
            .bind(video)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course and its modules.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
