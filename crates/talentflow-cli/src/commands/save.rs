//! The `talentflow save` command.

use std::path::PathBuf;

use anyhow::Result;

use talentflow_core::{lint_assessment, parser};
use talentflow_store::config::load_config_from;
use talentflow_store::create_store;

pub async fn execute(assessment_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = create_store(&config);

    let assessment = parser::parse_assessment(&assessment_path)?;
    let warnings = lint_assessment(&assessment);
    if !warnings.is_empty() {
        tracing::warn!(
            "{} schema warning(s); run `talentflow validate` for details",
            warnings.len()
        );
    }

    let saved = store
        .save_assessment(&assessment.job_id, assessment.sections)
        .await?;

    println!(
        "Saved assessment {} for job {} ({} sections, {} questions) to {} store",
        saved.id,
        saved.job_id,
        saved.sections.len(),
        saved.question_count(),
        store.name()
    );

    Ok(())
}
