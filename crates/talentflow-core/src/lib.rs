//! talentflow-core — Assessment schema, builder operations and evaluator.
//!
//! This crate defines the assessment data model, the structural edits the
//! builder performs on it, and the pure visibility and validation logic the
//! preview and response forms run over a candidate's answers.

pub mod builder;
pub mod error;
pub mod evaluator;
pub mod ids;
pub mod lint;
pub mod model;
pub mod parser;
pub mod session;

pub use builder::QuestionPatch;
pub use error::{RefKind, StructuralError};
pub use evaluator::{is_visible, validate, validate_all};
pub use ids::{IdGenerator, IdKind, RandomIds, SequentialIds};
pub use lint::{lint_assessment, SchemaWarning, WarningKind};
pub use model::{
    AnswerSet, AnswerValue, Assessment, AssessmentResponse, Condition, ConditionValue, ErrorMap,
    Question, QuestionType, Section,
};
pub use session::ResponseSession;
