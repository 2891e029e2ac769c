//! HTTP client for the tutor service

use reqwest::Client;

use super::error::ServiceError;
use super::models::{
    GenerateCustomQuizRequest, GenerateQuizRequest, GeneratedQuiz, QuizResult,
    SubmitQuizRequest, TopicsResponse, UserProgress,
};
use crate::quiz::config::{QuizConfig, QuizTarget};

/// Tutor service client
pub struct TutorClient {
    /// HTTP client
    client: Client,
    /// Service base URL, without trailing slash
    base_url: String,
}

impl TutorClient {
    /// Create a new client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request a generated quiz for the given configuration.
    ///
    /// Single-topic quizzes go to the standard endpoint; custom quizzes
    /// carry the full selected-topic set to the custom endpoint.
    pub async fn generate_quiz(&self, config: &QuizConfig) -> Result<GeneratedQuiz, ServiceError> {
        let response = match &config.target {
            QuizTarget::Topic(topic) => {
                let body = GenerateQuizRequest {
                    language: config.language.clone(),
                    topic: topic.clone(),
                    difficulty: config.difficulty.to_string(),
                    num_questions: config.num_questions,
                };
                self.client.post(self.url("/quiz/generate")).json(&body).send().await?
            }
            QuizTarget::Topics(topics) => {
                let body = GenerateCustomQuizRequest {
                    language: config.language.clone(),
                    topics: topics.iter().cloned().collect(),
                    difficulty: config.difficulty.to_string(),
                    num_questions: config.num_questions,
                };
                self.client.post(self.url("/quiz/custom")).json(&body).send().await?
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Generation(error_text(status.as_u16(), &message)));
        }

        let quiz: GeneratedQuiz = response.json().await?;
        Ok(quiz)
    }

    /// Submit answers for grading.
    ///
    /// Safe to retry with the same quiz id and answers; grading is
    /// deterministic on the service side.
    pub async fn submit_quiz(&self, request: &SubmitQuizRequest) -> Result<QuizResult, ServiceError> {
        let response = self.client.post(self.url("/quiz/submit")).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Submission(error_text(status.as_u16(), &message)));
        }

        let result: QuizResult = response.json().await?;
        Ok(result)
    }

    /// Fetch topics for a language with the user's per-topic progress
    pub async fn topics_with_progress(&self, language: &str) -> Result<TopicsResponse, ServiceError> {
        let response =
            self.client.get(self.url(&format!("/topics/{}", language))).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api { status: status.as_u16(), message });
        }

        let topics: TopicsResponse = response.json().await?;
        Ok(topics)
    }

    /// Fetch the user's progress snapshot across all languages
    pub async fn user_progress(&self) -> Result<UserProgress, ServiceError> {
        let response = self.client.get(self.url("/progress")).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api { status: status.as_u16(), message });
        }

        let progress: UserProgress = response.json().await?;
        Ok(progress)
    }

    /// Mark a tutorial as completed.
    ///
    /// Callers treat a failed ack as non-fatal: completion is shown to the
    /// user regardless.
    pub async fn complete_tutorial(&self, language: &str, topic: &str) -> Result<(), ServiceError> {
        let body = serde_json::json!({ "language": language, "topic": topic });
        let response =
            self.client.post(self.url("/progress/complete-tutorial")).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::ProgressUpdate(error_text(status.as_u16(), &message)));
        }
        Ok(())
    }

    /// Record a quiz completion and score against durable progress
    pub async fn complete_quiz(
        &self,
        language: &str,
        topic: &str,
        score: u8,
    ) -> Result<(), ServiceError> {
        let body = serde_json::json!({ "language": language, "topic": topic, "score": score });
        let response =
            self.client.post(self.url("/progress/complete-quiz")).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::ProgressUpdate(error_text(status.as_u16(), &message)));
        }
        Ok(())
    }
}

/// Format an error body with its status, tolerating empty bodies
fn error_text(status: u16, body: &str) -> String {
    if body.is_empty() {
        format!("service returned status {}", status)
    } else {
        format!("service returned status {}: {}", status, body)
    }
}
