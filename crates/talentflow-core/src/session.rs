//! A candidate's form session over one assessment.
//!
//! The session owns the answers and the last error map. Changing an answer
//! clears that question's error right away; everything else waits for the
//! next [`ResponseSession::submit`].

use crate::evaluator;
use crate::model::{AnswerSet, AnswerValue, Assessment, ErrorMap, Question};

/// Preview/response runtime for one assessment.
#[derive(Debug, Clone)]
pub struct ResponseSession<'a> {
    assessment: &'a Assessment,
    answers: AnswerSet,
    errors: ErrorMap,
}

impl<'a> ResponseSession<'a> {
    /// Start with no answers.
    pub fn new(assessment: &'a Assessment) -> Self {
        Self::resume(assessment, AnswerSet::new())
    }

    /// Continue from previously collected answers.
    pub fn resume(assessment: &'a Assessment, answers: AnswerSet) -> Self {
        Self {
            assessment,
            answers,
            errors: ErrorMap::new(),
        }
    }

    pub fn assessment(&self) -> &'a Assessment {
        self.assessment
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Errors from the last submit attempt, minus any cleared since.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Record an answer and drop the question's error.
    pub fn set_answer(&mut self, question_id: &str, value: impl Into<AnswerValue>) {
        self.answers.set(question_id, value);
        self.errors.remove(question_id);
    }

    /// Forget an answer and drop the question's error.
    pub fn clear_answer(&mut self, question_id: &str) {
        self.answers.remove(question_id);
        self.errors.remove(question_id);
    }

    /// Whether a question is currently shown. Unknown ids are not.
    pub fn is_visible(&self, question_id: &str) -> bool {
        self.assessment
            .question(question_id)
            .is_some_and(|q| evaluator::is_visible(q, &self.answers))
    }

    pub fn visible_questions(&self) -> impl Iterator<Item = &Question> + '_ {
        evaluator::visible_questions(self.assessment, &self.answers)
    }

    /// Live validation for one question. Hidden and unknown questions pass.
    pub fn check(&self, question_id: &str) -> Option<String> {
        let question = self.assessment.question(question_id)?;
        if !evaluator::is_visible(question, &self.answers) {
            return None;
        }
        evaluator::validate(question, &self.answers)
    }

    /// Revalidate everything, replacing the previous error map.
    ///
    /// Returns the answers to hand off when there are no errors.
    pub fn submit(&mut self) -> Result<&AnswerSet, &ErrorMap> {
        self.errors = evaluator::validate_all(self.assessment, &self.answers);
        if self.errors.is_empty() {
            Ok(&self.answers)
        } else {
            Err(&self.errors)
        }
    }

    /// End the session and keep the answers.
    pub fn into_answers(self) -> AnswerSet {
        self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::REQUIRED_MESSAGE;
    use crate::model::{Condition, QuestionType, Section};

    fn assessment() -> Assessment {
        let mut react = Question::new("q5");
        react.kind = QuestionType::SingleChoice;
        react.required = true;
        react.options = Some(vec!["Yes".into(), "No".into()]);

        let mut project = Question::new("q6");
        project.kind = QuestionType::LongText;
        project.required = true;
        project.conditional_on = Some(Condition::equals("q5", "Yes"));

        let mut years = Question::new("q2");
        years.kind = QuestionType::Numeric;
        years.required = true;
        years.max_value = Some(50.0);

        Assessment::with_sections(
            "job-1",
            vec![Section {
                id: "s1".into(),
                title: "Skills".into(),
                questions: vec![years, react, project],
            }],
        )
    }

    #[test]
    fn submit_blocks_on_errors() {
        let a = assessment();
        let mut session = ResponseSession::new(&a);
        let errors = session.submit().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("q2"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.get("q5"), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn answering_clears_only_that_error() {
        let a = assessment();
        let mut session = ResponseSession::new(&a);
        let _ = session.submit();

        session.set_answer("q5", "Yes");
        assert!(!session.errors().contains("q5"));
        assert!(session.errors().contains("q2"));
        // q6 just became visible but is not flagged until the next submit.
        assert!(!session.errors().contains("q6"));
        assert_eq!(session.check("q6").as_deref(), Some(REQUIRED_MESSAGE));

        let errors = session.submit().unwrap_err();
        assert!(errors.contains("q6"));
    }

    #[test]
    fn submit_replaces_previous_errors() {
        let a = assessment();
        let mut session = ResponseSession::new(&a);
        session.set_answer("q2", "99");
        let _ = session.submit();
        assert_eq!(session.errors().get("q2"), Some("Value must be at most 50"));

        session.set_answer("q2", "5");
        session.set_answer("q5", "No");
        let answers = session.submit().unwrap();
        assert_eq!(answers.len(), 2);
        assert!(session.errors().is_empty());
    }

    #[test]
    fn hidden_answers_are_kept() {
        let a = assessment();
        let mut session = ResponseSession::new(&a);
        session.set_answer("q5", "Yes");
        session.set_answer("q6", "A long story");
        session.set_answer("q5", "No");

        assert!(!session.is_visible("q6"));
        assert_eq!(session.check("q6"), None);
        assert_eq!(
            session.answers().get("q6"),
            Some(&AnswerValue::from("A long story"))
        );
    }

    #[test]
    fn visible_questions_and_unknown_ids() {
        let a = assessment();
        let mut session = ResponseSession::new(&a);
        assert_eq!(session.visible_questions().count(), 2);
        session.set_answer("q5", "Yes");
        assert_eq!(session.visible_questions().count(), 3);
        assert!(!session.is_visible("nope"));
        assert_eq!(session.check("nope"), None);
    }

    #[test]
    fn clear_answer_and_resume() {
        let a = assessment();
        let mut session = ResponseSession::new(&a);
        session.set_answer("q2", "10");
        session.clear_answer("q2");
        assert!(session.answers().get("q2").is_none());

        let answers: AnswerSet = [("q2", "10"), ("q5", "No")].into_iter().collect();
        let mut resumed = ResponseSession::resume(&a, answers);
        assert!(resumed.submit().is_ok());
        assert_eq!(resumed.into_answers().len(), 2);
    }
}
