//! The persistence boundary used by the builder and the response form.

use async_trait::async_trait;
use uuid::Uuid;

use talentflow_core::{AnswerSet, Assessment, AssessmentResponse, Section};

/// Storage for assessments (one per job) and submitted responses.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Human-readable backend name (e.g. "json").
    fn name(&self) -> &str;

    /// The assessment for a job, if one has been saved.
    async fn load_assessment(&self, job_id: &str) -> anyhow::Result<Option<Assessment>>;

    /// Replace the job's section list, creating the assessment on first save.
    ///
    /// An existing assessment keeps its `id` and `created_at` and gets a new
    /// `updated_at`.
    async fn save_assessment(
        &self,
        job_id: &str,
        sections: Vec<Section>,
    ) -> anyhow::Result<Assessment>;

    /// Record a candidate's answers. A later submission replaces an earlier one.
    async fn submit_response(
        &self,
        assessment_id: Uuid,
        candidate_id: &str,
        responses: AnswerSet,
    ) -> anyhow::Result<AssessmentResponse>;

    /// The candidate's latest submission for an assessment.
    async fn load_response(
        &self,
        assessment_id: Uuid,
        candidate_id: &str,
    ) -> anyhow::Result<Option<AssessmentResponse>>;
}

/// Apply save semantics shared by every backend.
pub(crate) fn merge_save(
    existing: Option<Assessment>,
    job_id: &str,
    sections: Vec<Section>,
) -> Assessment {
    match existing {
        Some(mut assessment) => {
            assessment.sections = sections;
            assessment.updated_at = chrono::Utc::now();
            assessment
        }
        None => Assessment::with_sections(job_id, sections),
    }
}

/// Build a fresh response record.
pub(crate) fn new_response(
    assessment_id: Uuid,
    candidate_id: &str,
    responses: AnswerSet,
) -> AssessmentResponse {
    AssessmentResponse {
        id: Uuid::new_v4(),
        assessment_id,
        candidate_id: candidate_id.to_string(),
        responses,
        submitted_at: chrono::Utc::now(),
    }
}
