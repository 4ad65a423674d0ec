//! The `talentflow validate` command.

use std::path::PathBuf;

use anyhow::Result;

use talentflow_core::{lint_assessment, parser};

pub fn execute(assessment_path: PathBuf) -> Result<()> {
    let assessments = parser::load_assessments(&assessment_path)?;

    let mut total_warnings = 0;

    for assessment in &assessments {
        println!(
            "Assessment for job {} ({} sections, {} questions)",
            assessment.job_id,
            assessment.sections.len(),
            assessment.question_count()
        );

        let warnings = lint_assessment(assessment);
        for w in &warnings {
            println!("  [{}] WARNING ({}): {}", w.element_id, w.kind, w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All assessments valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
