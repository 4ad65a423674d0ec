//! Structural edit operations on an assessment.
//!
//! These back the assessment builder: add, update, reorder and delete
//! sections and questions. Every operation is synchronous and touches only
//! the in-memory structure; saving is the store's job.

use std::collections::HashSet;

use crate::error::StructuralError;
use crate::ids::{IdGenerator, IdKind};
use crate::model::{Assessment, Condition, Question, QuestionType, Section};

type Result<T> = std::result::Result<T, StructuralError>;

/// Placeholder title for new sections.
pub const NEW_SECTION_TITLE: &str = "New Section";

/// The mutable fields of a question.
///
/// Applying a patch overwrites every field, so constraints that no longer
/// fit the type survive only if the patch carries them over.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPatch {
    pub kind: QuestionType,
    pub text: String,
    pub required: bool,
    pub options: Option<Vec<String>>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub max_length: Option<usize>,
    pub conditional_on: Option<Condition>,
}

impl From<&Question> for QuestionPatch {
    fn from(q: &Question) -> Self {
        Self {
            kind: q.kind,
            text: q.text.clone(),
            required: q.required,
            options: q.options.clone(),
            min_value: q.min_value,
            max_value: q.max_value,
            max_length: q.max_length,
            conditional_on: q.conditional_on.clone(),
        }
    }
}

impl QuestionPatch {
    fn apply(self, q: &mut Question) {
        q.kind = self.kind;
        q.text = self.text;
        q.required = self.required;
        q.options = self.options;
        q.min_value = self.min_value;
        q.max_value = self.max_value;
        q.max_length = self.max_length;
        q.conditional_on = self.conditional_on;
    }
}

impl Assessment {
    /// Append an empty section with a fresh id.
    pub fn add_section(&mut self, ids: &mut dyn IdGenerator) -> &mut Section {
        let taken: HashSet<&str> = self.sections.iter().map(|s| s.id.as_str()).collect();
        let id = fresh_id(ids, IdKind::Section, &taken);
        self.sections.push(Section {
            id,
            title: NEW_SECTION_TITLE.to_string(),
            questions: Vec::new(),
        });
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    /// Append a blank short-text question to a section.
    pub fn add_question(
        &mut self,
        section_id: &str,
        ids: &mut dyn IdGenerator,
    ) -> Result<&mut Question> {
        let index = self.section_index(section_id)?;
        let taken: HashSet<&str> = self.questions().map(|q| q.id.as_str()).collect();
        let id = fresh_id(ids, IdKind::Question, &taken);

        let questions = &mut self.sections[index].questions;
        questions.push(Question::new(id));
        let last = questions.len() - 1;
        Ok(&mut questions[last])
    }

    /// Change a section's title.
    pub fn rename_section(&mut self, section_id: &str, title: impl Into<String>) -> Result<()> {
        let section = self.section_mut(section_id)?;
        section.title = title.into();
        Ok(())
    }

    /// Overwrite a question's mutable fields with `patch`.
    pub fn update_question(
        &mut self,
        section_id: &str,
        question_id: &str,
        patch: QuestionPatch,
    ) -> Result<&Question> {
        let section = self.section_mut(section_id)?;
        let question = section
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| StructuralError::question(question_id))?;
        patch.apply(question);
        Ok(question)
    }

    /// Move a question within its section.
    pub fn reorder(&mut self, section_id: &str, from: usize, to: usize) -> Result<()> {
        let questions = &mut self.section_mut(section_id)?.questions;
        StructuralError::check_index(from, questions.len())?;
        StructuralError::check_index(to, questions.len())?;
        if from != to {
            let moved = questions.remove(from);
            questions.insert(to, moved);
        }
        Ok(())
    }

    /// Remove the section at `index`.
    pub fn delete_section(&mut self, index: usize) -> Result<Section> {
        StructuralError::check_index(index, self.sections.len())?;
        Ok(self.sections.remove(index))
    }

    /// Remove the question at `index` in a section.
    pub fn delete_question(&mut self, section_id: &str, index: usize) -> Result<Question> {
        let questions = &mut self.section_mut(section_id)?.questions;
        StructuralError::check_index(index, questions.len())?;
        Ok(questions.remove(index))
    }

    fn section_index(&self, section_id: &str) -> Result<usize> {
        self.sections
            .iter()
            .position(|s| s.id == section_id)
            .ok_or_else(|| StructuralError::section(section_id))
    }

    fn section_mut(&mut self, section_id: &str) -> Result<&mut Section> {
        let index = self.section_index(section_id)?;
        Ok(&mut self.sections[index])
    }
}

fn fresh_id(ids: &mut dyn IdGenerator, kind: IdKind, taken: &HashSet<&str>) -> String {
    loop {
        let id = ids.next_id(kind);
        if !taken.contains(id.as_str()) {
            return id;
        }
    }
}
