//! Automatic scoring of assignment submissions.
//!
//! Single-choice requires exactly one selection that is a correct option.
//! Multiple-choice requires the selected set to equal the correct set.
//! Text input is collected for manual review and never auto-graded.
//! Answers pointing past the question list are dropped.

use std::collections::BTreeSet;

use crate::schemas::shared_content::{Answer, Question, QuestionKind, QuestionResult};

#[derive(Debug)]
pub(crate) struct GradedSubmission {
    pub(crate) score: i32,
    pub(crate) total_questions: i32,
    pub(crate) correct_answers: i32,
    pub(crate) question_results: Vec<QuestionResult>,
}

pub(crate) fn grade(questions: &[Question], answers: &[Answer]) -> GradedSubmission {
    let total_questions = questions.len();
    let mut correct_count = 0usize;
    let mut question_results = Vec::new();

    for answer in answers {
        let Some(question) = questions.get(answer.question_index) else {
            continue;
        };

        let correct_indices: Vec<usize> = question
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_correct)
            .map(|(index, _)| index)
            .collect();

        let is_correct = match question.kind {
            QuestionKind::SingleChoice => {
                answer.selected_options.len() == 1
                    && correct_indices.contains(&answer.selected_options[0])
            }
            QuestionKind::MultipleChoice => {
                let selected: BTreeSet<usize> = answer.selected_options.iter().copied().collect();
                let correct: BTreeSet<usize> = correct_indices.iter().copied().collect();
                selected == correct
            }
            QuestionKind::TextInput => false,
        };

        if is_correct {
            correct_count += 1;
        }

        question_results.push(QuestionResult {
            question_index: answer.question_index,
            is_correct,
            correct_answers: correct_indices,
            user_answers: answer.selected_options.clone(),
            user_text_answer: match question.kind {
                QuestionKind::TextInput => answer.text_answer.clone(),
                _ => None,
            },
        });
    }

    let score = if total_questions > 0 {
        (correct_count * 100 / total_questions) as i32
    } else {
        0
    };

    GradedSubmission {
        score,
        total_questions: total_questions as i32,
        correct_answers: correct_count as i32,
        question_results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::shared_content::QuestionOption;

    fn option(text: &str, is_correct: bool) -> QuestionOption {
        QuestionOption { text: text.to_string(), is_correct }
    }

    fn single_choice(correct: usize, total: usize) -> Question {
        Question {
            text: "q".to_string(),
            helper_text: None,
            kind: QuestionKind::SingleChoice,
            options: (0..total).map(|index| option("o", index == correct)).collect(),
        }
    }

    fn multiple_choice(correct: &[usize], total: usize) -> Question {
        Question {
            text: "q".to_string(),
            helper_text: None,
            kind: QuestionKind::MultipleChoice,
            options: (0..total).map(|index| option("o", correct.contains(&index))).collect(),
        }
    }

    fn answer(index: usize, kind: QuestionKind, selected: &[usize]) -> Answer {
        Answer {
            question_index: index,
            kind,
            selected_options: selected.to_vec(),
            text_answer: None,
        }
    }

    #[test]
    fn single_choice_requires_exactly_one_correct_selection() {
        let questions = vec![single_choice(1, 3)];

        let right = grade(&questions, &[answer(0, QuestionKind::SingleChoice, &[1])]);
        assert_eq!(right.correct_answers, 1);

        let wrong = grade(&questions, &[answer(0, QuestionKind::SingleChoice, &[0])]);
        assert_eq!(wrong.correct_answers, 0);

        let multiple = grade(&questions, &[answer(0, QuestionKind::SingleChoice, &[1, 2])]);
        assert_eq!(multiple.correct_answers, 0);
    }

    #[test]
    fn multiple_choice_requires_exact_set_match() {
        let questions = vec![multiple_choice(&[0, 2], 4)];

        let exact = grade(&questions, &[answer(0, QuestionKind::MultipleChoice, &[2, 0])]);
        assert_eq!(exact.correct_answers, 1);

        let subset = grade(&questions, &[answer(0, QuestionKind::MultipleChoice, &[0])]);
        assert_eq!(subset.correct_answers, 0);

        let superset = grade(&questions, &[answer(0, QuestionKind::MultipleChoice, &[0, 1, 2])]);
        assert_eq!(superset.correct_answers, 0);
    }

    #[test]
    fn text_input_is_never_auto_correct() {
        let questions = vec![Question {
            text: "explain".to_string(),
            helper_text: None,
            kind: QuestionKind::TextInput,
            options: vec![],
        }];
        let mut submitted = answer(0, QuestionKind::TextInput, &[]);
        submitted.text_answer = Some("a thorough explanation".to_string());

        let graded = grade(&questions, &[submitted]);
        assert_eq!(graded.correct_answers, 0);
        assert_eq!(
            graded.question_results[0].user_text_answer.as_deref(),
            Some("a thorough explanation")
        );
    }

    #[test]
    fn score_is_floored_percentage() {
        // 7 of 10 correct must give exactly 70
        let questions: Vec<Question> = (0..10).map(|_| single_choice(0, 2)).collect();
        let answers: Vec<Answer> = (0..10)
            .map(|index| {
                let selected = if index < 7 { vec![0] } else { vec![1] };
                Answer {
                    question_index: index,
                    kind: QuestionKind::SingleChoice,
                    selected_options: selected,
                    text_answer: None,
                }
            })
            .collect();

        let graded = grade(&questions, &answers);
        assert_eq!(graded.score, 70);

        // 1 of 3 floors to 33
        let questions: Vec<Question> = (0..3).map(|_| single_choice(0, 2)).collect();
        let answers = vec![answer(0, QuestionKind::SingleChoice, &[0])];
        assert_eq!(grade(&questions, &answers).score, 33);
    }

    #[test]
    fn zero_questions_scores_zero() {
        let graded = grade(&[], &[]);
        assert_eq!(graded.score, 0);
        assert_eq!(graded.total_questions, 0);
    }

    #[test]
    fn out_of_range_answers_are_dropped() {
        let questions = vec![single_choice(0, 2)];
        let answers = vec![
            answer(0, QuestionKind::SingleChoice, &[0]),
            answer(5, QuestionKind::SingleChoice, &[0]),
        ];

        let graded = grade(&questions, &answers);
        assert_eq!(graded.question_results.len(), 1);
        assert_eq!(graded.correct_answers, 1);
        assert_eq!(graded.score, 100);
    }
}
