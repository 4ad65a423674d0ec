pub mod check;
pub mod edit;
pub mod init;
pub mod save;
pub mod show;
pub mod submit;
pub mod validate;

use talentflow_core::{Assessment, ErrorMap};

/// Print errors in document order, one line per question.
pub(crate) fn print_errors(assessment: &Assessment, errors: &ErrorMap) {
    for question in assessment.questions() {
        if let Some(message) = errors.get(&question.id) {
            println!("  [{}] {}", question.id, message);
        }
    }
}
