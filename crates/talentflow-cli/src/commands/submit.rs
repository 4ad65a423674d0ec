//! The `talentflow submit` command.

use std::path::PathBuf;

use anyhow::Result;

use talentflow_core::{parser, ResponseSession};
use talentflow_store::config::load_config_from;
use talentflow_store::create_store;

pub async fn execute(
    job_id: String,
    candidate_id: String,
    answers_path: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = create_store(&config);

    let assessment = store
        .load_assessment(&job_id)
        .await?
        .ok_or_else(|| talentflow_store::StoreError::NotFound(job_id.clone()))?;
    let answers = parser::load_answers(&answers_path)?;

    let mut session = ResponseSession::resume(&assessment, answers);
    if let Err(errors) = session.submit() {
        println!("Submission rejected, {} error(s):", errors.len());
        super::print_errors(&assessment, errors);
        std::process::exit(1);
    }

    let response = store
        .submit_response(assessment.id, &candidate_id, session.into_answers())
        .await?;

    println!(
        "Recorded response {} from candidate {} ({} answers)",
        response.id,
        response.candidate_id,
        response.responses.len()
    );

    Ok(())
}
