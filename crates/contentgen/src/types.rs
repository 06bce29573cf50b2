//! Response payloads returned by the Content Generation Service.

use serde::{Deserialize, Serialize};

/// A reference to a supporting article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRef {
    pub title: String,
    pub url: String,
}

/// A reference to a supporting video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRef {
    pub title: String,
    pub youtube_id: String,
}

/// One module within a generated course or curriculum.
///
/// Course-structure generation returns titles only; learning materials
/// (`summary`, `articles`, `video`) are filled in by the richer endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedModule {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub articles: Vec<ArticleRef>,
    #[serde(default)]
    pub video: Option<VideoRef>,
}

/// Response from `POST /generate-course`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedCourse {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub modules: Vec<GeneratedModule>,
}

/// Response from `POST /generate-module-content`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleContent {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub articles: Vec<ArticleRef>,
    #[serde(default)]
    pub video: Option<VideoRef>,
}

/// One quiz question with its answer key and topic tag.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub topic: String,
}

/// Response from `POST /generate-assessment`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedQuiz {
    pub questions: Vec<GeneratedQuestion>,
}

/// Response from `POST /generate-full-course-content`: a complete
/// curriculum with learning materials for every module.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedCurriculum {
    pub modules: Vec<GeneratedModule>,
}

/// Response from `POST /generate-remedial-suggestion`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemedialSuggestion {
    pub suggested_module_title: String,
    pub justification: String,
}
