use serde::{Deserialize, Serialize};
use validator::Validate;

/// Question kinds the grader knows how to score. Text input is collected but
/// never auto-graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum QuestionKind {
    #[serde(rename = "single-choice")]
    SingleChoice,
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "text-input")]
    TextInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct QuestionOption {
    pub(crate) text: String,
    #[serde(rename = "isCorrect", default)]
    pub(crate) is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Question {
    pub(crate) text: String,
    #[serde(rename = "helperText", default)]
    pub(crate) helper_text: Option<String>,
    #[serde(rename = "type")]
    pub(crate) kind: QuestionKind,
    #[serde(default)]
    pub(crate) options: Vec<QuestionOption>,
}

/// Employee-facing view of an option: the answer key stays with the trainer.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RedactedOption {
    pub(crate) text: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RedactedQuestion {
    pub(crate) text: String,
    #[serde(rename = "helperText")]
    pub(crate) helper_text: Option<String>,
    #[serde(rename = "type")]
    pub(crate) kind: QuestionKind,
    pub(crate) options: Vec<RedactedOption>,
}

impl Question {
    pub(crate) fn redacted(&self) -> RedactedQuestion {
        RedactedQuestion {
            text: self.text.clone(),
            helper_text: self.helper_text.clone(),
            kind: self.kind,
            options: self
                .options
                .iter()
                .map(|option| RedactedOption { text: option.text.clone() })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Answer {
    #[serde(rename = "questionIndex")]
    pub(crate) question_index: usize,
    #[serde(rename = "type")]
    pub(crate) kind: QuestionKind,
    #[serde(rename = "selectedOptions", default)]
    pub(crate) selected_options: Vec<usize>,
    #[serde(rename = "textAnswer", default)]
    pub(crate) text_answer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct QuestionResult {
    #[serde(rename = "questionIndex")]
    pub(crate) question_index: usize,
    #[serde(rename = "isCorrect")]
    pub(crate) is_correct: bool,
    #[serde(rename = "correctAnswers")]
    pub(crate) correct_answers: Vec<usize>,
    #[serde(rename = "userAnswers")]
    pub(crate) user_answers: Vec<usize>,
    #[serde(rename = "userTextAnswer")]
    pub(crate) user_text_answer: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SharedAssignmentCreate {
    pub(crate) training_id: i64,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[validate(length(min = 1, message = "at least one question is required"))]
    pub(crate) questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SharedAssignmentResponse {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) trainer_username: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) questions: Vec<Question>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmployeeAssignmentResponse {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) questions: Vec<RedactedQuestion>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignmentSubmissionCreate {
    pub(crate) training_id: i64,
    pub(crate) shared_assignment_id: i64,
    pub(crate) answers: Vec<Answer>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentResultResponse {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) score: i32,
    pub(crate) total_questions: i32,
    pub(crate) correct_answers: i32,
    pub(crate) question_results: Vec<QuestionResult>,
    pub(crate) submitted_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct FeedbackQuestion {
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) options: Vec<String>,
    #[serde(rename = "isDefault", default)]
    pub(crate) is_default: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SharedFeedbackCreate {
    pub(crate) training_id: i64,
    #[serde(rename = "defaultQuestions", default)]
    pub(crate) default_questions: Vec<serde_json::Value>,
    #[serde(rename = "customQuestions")]
    #[validate(length(min = 1, message = "at least one question is required"))]
    pub(crate) custom_questions: Vec<FeedbackQuestion>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SharedFeedbackResponse {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) trainer_username: String,
    #[serde(rename = "defaultQuestions")]
    pub(crate) default_questions: Vec<serde_json::Value>,
    #[serde(rename = "customQuestions")]
    pub(crate) custom_questions: Vec<serde_json::Value>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedbackSubmissionCreate {
    pub(crate) training_id: i64,
    pub(crate) shared_feedback_id: i64,
    pub(crate) responses: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct FeedbackSubmissionResponse {
    pub(crate) id: i64,
    pub(crate) training_id: i64,
    pub(crate) submitted_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_wire_format_roundtrip() {
        let raw = serde_json::json!({
            "text": "Which layer owns retries?",
            "helperText": "Pick one",
            "type": "single-choice",
            "options": [
                {"text": "client", "isCorrect": false},
                {"text": "transport", "isCorrect": true}
            ]
        });

        let question: Question = serde_json::from_value(raw.clone()).expect("question");
        assert_eq!(question.kind, QuestionKind::SingleChoice);
        assert!(question.options[1].is_correct);

        let back = serde_json::to_value(&question).expect("serialize");
        assert_eq!(back, raw);
    }

    #[test]
    fn answer_defaults_apply() {
        let raw = serde_json::json!({"questionIndex": 2, "type": "text-input"});
        let answer: Answer = serde_json::from_value(raw).expect("answer");
        assert_eq!(answer.question_index, 2);
        assert!(answer.selected_options.is_empty());
        assert!(answer.text_answer.is_none());
    }

    #[test]
    fn redacted_question_has_no_answer_key() {
        let question = Question {
            text: "q".to_string(),
            helper_text: None,
            kind: QuestionKind::MultipleChoice,
            options: vec![
                QuestionOption { text: "a".to_string(), is_correct: true },
                QuestionOption { text: "b".to_string(), is_correct: false },
            ],
        };

        let value = serde_json::to_value(question.redacted()).expect("redacted");
        let rendered = value.to_string();
        assert!(!rendered.contains("isCorrect"));
        assert_eq!(value["options"][0]["text"], "a");
    }
}
