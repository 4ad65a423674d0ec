//! Authoring-time integrity checks for assessments.
//!
//! These warnings are about the schema, not about answers. Nothing here
//! blocks saving; a forward or dangling condition reference is reported but
//! still evaluated with the usual "no answer means hidden" rule.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::model::{Assessment, ConditionValue, QuestionType};

/// Category of schema problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    DuplicateSectionId,
    DuplicateQuestionId,
    /// Condition points at a question that does not exist.
    DanglingCondition,
    /// Condition points at a question that comes later in the form.
    ForwardCondition,
    SelfCondition,
    EmptyConditionValues,
    /// Condition expects a value that is not one of the target's options.
    UnknownConditionOption,
    EmptyOptions,
    InvertedBounds,
    EmptyQuestionText,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WarningKind::DuplicateSectionId => "duplicate-section-id",
            WarningKind::DuplicateQuestionId => "duplicate-question-id",
            WarningKind::DanglingCondition => "dangling-condition",
            WarningKind::ForwardCondition => "forward-condition",
            WarningKind::SelfCondition => "self-condition",
            WarningKind::EmptyConditionValues => "empty-condition-values",
            WarningKind::UnknownConditionOption => "unknown-condition-option",
            WarningKind::EmptyOptions => "empty-options",
            WarningKind::InvertedBounds => "inverted-bounds",
            WarningKind::EmptyQuestionText => "empty-question-text",
        };
        f.write_str(s)
    }
}

/// A warning from schema linting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaWarning {
    pub kind: WarningKind,
    /// The section or question the warning is about.
    pub element_id: String,
    pub message: String,
}

impl SchemaWarning {
    fn new(kind: WarningKind, element_id: &str, message: String) -> Self {
        Self {
            kind,
            element_id: element_id.to_string(),
            message,
        }
    }
}

/// Check an assessment for structural and condition problems.
pub fn lint_assessment(assessment: &Assessment) -> Vec<SchemaWarning> {
    let mut warnings = Vec::new();

    let mut seen_sections = HashSet::new();
    for section in &assessment.sections {
        if !seen_sections.insert(section.id.as_str()) {
            warnings.push(SchemaWarning::new(
                WarningKind::DuplicateSectionId,
                &section.id,
                format!("duplicate section ID: {}", section.id),
            ));
        }
    }

    // First position of each question id in document order.
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (pos, question) in assessment.questions().enumerate() {
        if positions.contains_key(question.id.as_str()) {
            warnings.push(SchemaWarning::new(
                WarningKind::DuplicateQuestionId,
                &question.id,
                format!("duplicate question ID: {}", question.id),
            ));
        } else {
            positions.insert(question.id.as_str(), pos);
        }
    }

    for (pos, question) in assessment.questions().enumerate() {
        if question.text.trim().is_empty() {
            warnings.push(SchemaWarning::new(
                WarningKind::EmptyQuestionText,
                &question.id,
                "question text is empty".into(),
            ));
        }

        let has_options = question.options.as_ref().is_some_and(|o| !o.is_empty());
        if question.kind.is_choice() && !has_options {
            warnings.push(SchemaWarning::new(
                WarningKind::EmptyOptions,
                &question.id,
                format!("{} question has no options", question.kind),
            ));
        }

        if question.kind == QuestionType::Numeric {
            if let (Some(min), Some(max)) = (question.min_value, question.max_value) {
                if min > max {
                    warnings.push(SchemaWarning::new(
                        WarningKind::InvertedBounds,
                        &question.id,
                        format!("minValue {min} is greater than maxValue {max}"),
                    ));
                }
            }
        }

        let Some(condition) = &question.conditional_on else {
            continue;
        };
        let target_id = condition.question_id.as_str();

        if matches!(&condition.value, ConditionValue::AnyOf(v) if v.is_empty()) {
            warnings.push(SchemaWarning::new(
                WarningKind::EmptyConditionValues,
                &question.id,
                "condition accepts no values and can never match".into(),
            ));
        }

        if target_id == question.id {
            warnings.push(SchemaWarning::new(
                WarningKind::SelfCondition,
                &question.id,
                "condition refers to the question itself".into(),
            ));
            continue;
        }

        match positions.get(target_id) {
            None => warnings.push(SchemaWarning::new(
                WarningKind::DanglingCondition,
                &question.id,
                format!("condition refers to unknown question '{target_id}'"),
            )),
            Some(&target_pos) if target_pos > pos => warnings.push(SchemaWarning::new(
                WarningKind::ForwardCondition,
                &question.id,
                format!("condition refers to later question '{target_id}'"),
            )),
            Some(_) => {}
        }

        let options = assessment
            .question(target_id)
            .filter(|t| t.kind.is_choice())
            .and_then(|t| t.options.as_ref())
            .filter(|o| !o.is_empty());
        if let Some(options) = options {
            for value in condition.value.values() {
                if !options.contains(value) {
                    warnings.push(SchemaWarning::new(
                        WarningKind::UnknownConditionOption,
                        &question.id,
                        format!("'{value}' is not an option of '{target_id}'"),
                    ));
                }
            }
        }
    }

    warnings
}
