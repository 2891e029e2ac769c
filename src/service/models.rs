//! Data models for tutor service requests and responses

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A user's answer to one question.
///
/// `Unanswered` is an explicit sentinel so a skipped question can never be
/// confused with choice index 0 or an empty code answer. On the wire it is
/// `null`, a choice is an integer, and code is a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// No answer entered
    #[default]
    Unanswered,
    /// Selected option index for a multiple-choice question
    Choice(usize),
    /// Free-text answer for a coding or debugging question
    Code(String),
}

impl Answer {
    /// Whether an answer has been entered
    pub fn is_answered(&self) -> bool {
        !matches!(self, Answer::Unanswered)
    }
}

/// A quiz question, polymorphic over its variant.
///
/// Content is supplied by the service; beyond the variant tag the engine
/// treats it as opaque and never grades locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Question {
    /// Multiple choice with exactly one correct option
    Mcq {
        /// Question text
        question: String,
        /// Answer options in display order
        options: Vec<String>,
        /// Index of the correct option (grading happens service-side)
        correct: usize,
        /// Explanation shown in the review
        #[serde(default)]
        explanation: Option<String>,
    },
    /// Write code from scratch
    Coding {
        /// Problem statement
        question: String,
        /// Reference solution, if the service provides one
        #[serde(default)]
        reference_solution: Option<String>,
    },
    /// Find and fix the bug in a snippet
    Debugging {
        /// Problem statement
        question: String,
        /// The snippet containing the bug
        buggy_code: String,
    },
}

impl Question {
    /// The question text, regardless of variant
    pub fn text(&self) -> &str {
        match self {
            Question::Mcq { question, .. }
            | Question::Coding { question, .. }
            | Question::Debugging { question, .. } => question,
        }
    }

    /// Short label for the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Question::Mcq { .. } => "MCQ",
            Question::Coding { .. } => "CODING",
            Question::Debugging { .. } => "DEBUGGING",
        }
    }
}

/// Request body for quiz generation against a single topic
#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuizRequest {
    /// Programming language
    pub language: String,
    /// Topic to quiz on
    pub topic: String,
    /// Requested difficulty
    pub difficulty: String,
    /// Requested question count
    pub num_questions: usize,
}

/// Request body for custom multi-topic quiz generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateCustomQuizRequest {
    /// Programming language
    pub language: String,
    /// Selected topics (all completed by the user)
    pub topics: Vec<String>,
    /// Requested difficulty
    pub difficulty: String,
    /// Requested question count
    pub num_questions: usize,
}

/// A generated quiz returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuiz {
    /// Unique identifier for this quiz instance
    pub quiz_id: String,
    /// Programming language
    pub language: String,
    /// Topic, for single-topic quizzes
    #[serde(default)]
    pub topic: Option<String>,
    /// Topics, for custom quizzes
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    /// Difficulty the quiz was generated at
    pub difficulty: String,
    /// Questions in fixed order; never reordered after generation
    pub questions: Vec<Question>,
    /// Time allowed, in minutes
    pub time_limit_minutes: u32,
}

/// Request body for quiz submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitQuizRequest {
    /// Quiz being submitted
    pub quiz_id: String,
    /// Answers aligned by index with the quiz's questions; skipped
    /// questions hold the `Unanswered` sentinel
    pub answers: Vec<Answer>,
    /// Programming language
    pub language: String,
    /// Topic, for single-topic quizzes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Difficulty the quiz was taken at
    pub difficulty: String,
}

/// Per-question grading detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionReview {
    /// 1-indexed question number
    pub question_number: usize,
    /// Question text
    pub question: String,
    /// What the user answered
    pub user_answer: Answer,
    /// The correct answer
    pub correct_answer: Answer,
    /// Whether the user's answer was correct
    pub is_correct: bool,
    /// Explanation of the correct answer
    #[serde(default)]
    pub explanation: Option<String>,
    /// MCQ options, when applicable
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

/// Graded quiz result.
///
/// `passed` is authoritative; the pass threshold lives in the service and
/// is never reconstructed client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    /// Number of correct answers
    pub score: u32,
    /// Total questions graded
    pub total_questions: u32,
    /// Integer percentage in 0-100
    pub percentage: u8,
    /// Whether the attempt passed
    pub passed: bool,
    /// Per-question review in question order
    pub detailed_results: Vec<QuestionReview>,
}

/// A topic with the user's progress, as reported by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicWithProgress {
    /// Position in the progression
    pub level: u32,
    /// Topic name
    pub topic: String,
    /// Short description
    pub description: String,
    /// Prerequisite topic names
    pub prerequisites: Vec<String>,
    /// Whether the topic is completed
    pub completed: bool,
    /// Whether the tutorial is completed
    pub tutorial_completed: bool,
    /// Number of quiz attempts
    pub quiz_attempts: u32,
    /// Best quiz percentage
    pub best_quiz_score: u8,
}

/// Response from the topics-with-progress endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicsResponse {
    /// Language queried
    pub language: String,
    /// Topics in level order
    pub topics: Vec<TopicWithProgress>,
    /// Count of completed topics
    pub total_completed: usize,
}

/// Per-language summary in the user-progress snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageSummary {
    /// Names of completed topics
    #[serde(default)]
    pub completed_topics: Vec<String>,
    /// Best quiz score per topic
    #[serde(default)]
    pub quiz_scores: HashMap<String, u8>,
}

/// Snapshot of the user's progress across languages
pub type UserProgress = HashMap<String, LanguageSummary>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn answers_serialize_to_wire_forms() {
        let answers =
            vec![Answer::Unanswered, Answer::Choice(0), Answer::Code("x = 1".into())];
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"[null,0,"x = 1"]"#);
    }

    #[test]
    fn unanswered_is_distinct_from_choice_zero_and_empty_code() {
        assert_ne!(Answer::Unanswered, Answer::Choice(0));
        assert_ne!(Answer::Unanswered, Answer::Code(String::new()));
    }

    #[test]
    fn question_deserializes_by_type_tag() {
        let json = r#"{
            "type": "mcq",
            "question": "What is 2 + 2?",
            "options": ["3", "4", "5"],
            "correct": 1,
            "explanation": "Basic arithmetic"
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.kind(), "MCQ");
        assert_eq!(question.text(), "What is 2 + 2?");
    }

    #[test]
    fn debugging_question_deserializes() {
        let json = r#"{
            "type": "debugging",
            "question": "Fix the off-by-one error",
            "buggy_code": "for i in range(1, len(xs)): print(xs[i])"
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.kind(), "DEBUGGING");
    }

    #[test]
    fn generated_quiz_deserializes() {
        let json = r#"{
            "quiz_id": "Python_Functions_Easy_1234",
            "language": "Python",
            "topic": "Functions",
            "difficulty": "Easy",
            "questions": [
                {"type": "coding", "question": "Write a function that doubles a number"}
            ],
            "time_limit_minutes": 10
        }"#;

        let quiz: GeneratedQuiz = serde_json::from_str(json).unwrap();
        assert_eq!(quiz.quiz_id, "Python_Functions_Easy_1234");
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.time_limit_minutes, 10);
        assert!(quiz.topics.is_none());
    }

    #[test]
    fn quiz_result_deserializes() {
        let json = r#"{
            "score": 3,
            "total_questions": 5,
            "percentage": 60,
            "passed": true,
            "detailed_results": [{
                "question_number": 1,
                "question": "What is a variable?",
                "user_answer": 2,
                "correct_answer": 2,
                "is_correct": true,
                "options": ["a", "b", "c"]
            }]
        }"#;

        let result: QuizResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.percentage, 60);
        assert!(result.passed);
        assert_eq!(result.detailed_results[0].user_answer, Answer::Choice(2));
    }
}
