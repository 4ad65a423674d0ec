//! Visibility resolution and answer validation.
//!
//! Pure functions over an [`Assessment`] and an [`AnswerSet`]. Nothing here
//! mutates its inputs or fails; validation problems come back as messages.

use crate::model::{
    AnswerSet, AnswerValue, Assessment, ConditionValue, ErrorMap, Question, QuestionType,
};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_NUMBER_MESSAGE: &str = "Please enter a valid number";

/// Whether `question` should be shown given the current answers.
///
/// A condition on a question with no answer (or on a question that does not
/// exist) never matches, so the dependent question stays hidden.
pub fn is_visible(question: &Question, answers: &AnswerSet) -> bool {
    let Some(condition) = &question.conditional_on else {
        return true;
    };
    let Some(answer) = answers.get(&condition.question_id) else {
        return false;
    };

    match &condition.value {
        ConditionValue::One(expected) => answer.as_str() == Some(expected.as_str()),
        ConditionValue::AnyOf(accepted) => match answer {
            AnswerValue::Choices(picked) => picked.iter().any(|p| accepted.contains(p)),
            scalar => scalar
                .as_str()
                .is_some_and(|s| accepted.iter().any(|a| a == s)),
        },
    }
}

/// Validate one question's answer. Callers skip hidden questions.
///
/// Rules run in a fixed order and the first failure wins: required, then
/// the type-specific checks (which only apply when an answer is present).
pub fn validate(question: &Question, answers: &AnswerSet) -> Option<String> {
    let answer = answers.get(&question.id).filter(|a| !a.is_empty());

    let Some(answer) = answer else {
        return question.required.then(|| REQUIRED_MESSAGE.to_string());
    };

    match question.kind {
        QuestionType::Numeric => {
            let Some(n) = answer.to_number() else {
                return Some(INVALID_NUMBER_MESSAGE.to_string());
            };
            if let Some(min) = question.min_value {
                if n < min {
                    return Some(format!("Value must be at least {min}"));
                }
            }
            if let Some(max) = question.max_value {
                if n > max {
                    return Some(format!("Value must be at most {max}"));
                }
            }
            None
        }
        QuestionType::ShortText | QuestionType::LongText => match question.max_length {
            Some(max) if answer.char_len() > max => {
                Some(format!("Maximum {max} characters allowed"))
            }
            _ => None,
        },
        QuestionType::SingleChoice | QuestionType::MultiChoice | QuestionType::File => None,
    }
}

/// Validate every visible question, in document order.
pub fn validate_all(assessment: &Assessment, answers: &AnswerSet) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for question in assessment.questions() {
        if !is_visible(question, answers) {
            continue;
        }
        if let Some(message) = validate(question, answers) {
            errors.insert(question.id.clone(), message);
        }
    }
    errors
}

/// The visible questions, in document order.
pub fn visible_questions<'a, 'b>(
    assessment: &'a Assessment,
    answers: &'b AnswerSet,
) -> impl Iterator<Item = &'a Question> + 'b
where
    'a: 'b,
{
    assessment.questions().filter(move |q| is_visible(q, answers))
}
