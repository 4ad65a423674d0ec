//! The `talentflow check` command.

use std::path::PathBuf;

use anyhow::Result;

use talentflow_core::{evaluator, parser};

pub fn execute(assessment_path: PathBuf, answers_path: PathBuf, format: String) -> Result<()> {
    let assessment = parser::parse_assessment(&assessment_path)?;
    let answers = parser::load_answers(&answers_path)?;

    let errors = evaluator::validate_all(&assessment, &answers);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&errors)?);
        }
        _ => {
            let visible = evaluator::visible_questions(&assessment, &answers).count();
            println!(
                "{visible}/{} questions visible, {} error(s)",
                assessment.question_count(),
                errors.len()
            );
            super::print_errors(&assessment, &errors);
            if errors.is_empty() {
                println!("Answers are valid.");
            }
        }
    }

    if !errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
