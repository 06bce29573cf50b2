//! REST client for the Content Generation Service endpoints.

use serde::de::DeserializeOwned;

use crate::types::{
    GeneratedCourse, GeneratedCurriculum, GeneratedQuiz, ModuleContent, RemedialSuggestion,
};

/// Errors from the content generation client.
#[derive(Debug, thiserror::Error)]
pub enum ContentAgentError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Content agent error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service returned 2xx but the payload is unusable
    /// (e.g. an empty `modules` or `questions` array).
    #[error("Malformed content agent response: {0}")]
    MalformedResponse(String),
}

/// HTTP client for a single Content Generation Service instance.
///
/// The base URL is injected from configuration at startup; no call site
/// hard-codes a service address.
#[derive(Clone)]
pub struct ContentAgentClient {
    client: reqwest::Client,
    base_url: String,
}

impl ContentAgentClient {
    /// Create a new client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:5002`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Generate a course structure (name, description, module titles)
    /// for a target role.
    pub async fn generate_course(
        &self,
        target_role: &str,
    ) -> Result<GeneratedCourse, ContentAgentError> {
        let course: GeneratedCourse = self
            .post_json(
                "generate-course",
                &serde_json::json!({ "target_role": target_role }),
            )
            .await?;

        if course.modules.is_empty() {
            return Err(ContentAgentError::MalformedResponse(
                "generate-course returned no modules".to_string(),
            ));
        }
        Ok(course)
    }

    /// Generate learning materials (summary, articles, video) for a
    /// single module title.
    pub async fn generate_module_content(
        &self,
        module_title: &str,
    ) -> Result<ModuleContent, ContentAgentError> {
        self.post_json(
            "generate-module-content",
            &serde_json::json!({ "module_title": module_title }),
        )
        .await
    }

    /// Generate proficiency quiz questions for a target role.
    pub async fn generate_proficiency_assessment(
        &self,
        target_role: &str,
    ) -> Result<GeneratedQuiz, ContentAgentError> {
        let quiz: GeneratedQuiz = self
            .post_json(
                "generate-assessment",
                &serde_json::json!({ "target_role": target_role }),
            )
            .await?;

        if quiz.questions.is_empty() {
            return Err(ContentAgentError::MalformedResponse(
                "generate-assessment returned no questions".to_string(),
            ));
        }
        Ok(quiz)
    }

    /// Generate a full curriculum (modules with learning materials) for a
    /// tier-qualified role, e.g. "beginner Backend Engineer".
    pub async fn generate_full_course_content(
        &self,
        target_role: &str,
    ) -> Result<GeneratedCurriculum, ContentAgentError> {
        let curriculum: GeneratedCurriculum = self
            .post_json(
                "generate-full-course-content",
                &serde_json::json!({ "target_role": target_role }),
            )
            .await?;

        if curriculum.modules.is_empty() {
            return Err(ContentAgentError::MalformedResponse(
                "generate-full-course-content returned no modules".to_string(),
            ));
        }
        Ok(curriculum)
    }

    /// Generate a remedial module suggestion for a failed topic.
    pub async fn generate_remedial_suggestion(
        &self,
        failed_topic: &str,
    ) -> Result<RemedialSuggestion, ContentAgentError> {
        self.post_json(
            "generate-remedial-suggestion",
            &serde_json::json!({ "failed_topic": failed_topic }),
        )
        .await
    }

    // ---- private helpers ----

    /// POST a JSON body to an endpoint and parse the JSON response.
    async fn post_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<T, ContentAgentError> {
        tracing::debug!(endpoint, "Calling content generation service");

        let response = self
            .client
            .post(format!("{}/{endpoint}", self.base_url))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ContentAgentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}
