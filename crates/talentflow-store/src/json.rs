//! JSON-directory store.
//!
//! Layout under the data directory:
//!
//! ```text
//! assessments/<job_id>.json
//! responses/<assessment_id>/<candidate_id>.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use talentflow_core::{AnswerSet, Assessment, AssessmentResponse, Section};

use crate::error::StoreError;
use crate::traits::{merge_save, new_response, AssessmentStore};

/// A store that keeps one pretty-printed JSON file per record.
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn assessment_path(&self, job_id: &str) -> Result<PathBuf> {
        StoreError::check_key("job", job_id)?;
        Ok(self.root.join("assessments").join(format!("{job_id}.json")))
    }

    fn response_path(&self, assessment_id: Uuid, candidate_id: &str) -> Result<PathBuf> {
        StoreError::check_key("candidate", candidate_id)?;
        Ok(self
            .root
            .join("responses")
            .join(assessment_id.to_string())
            .join(format!("{candidate_id}.json")))
    }
}

async fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    let record = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(Some(record))
}

/// Write via a temporary sibling file so readers never see a partial record.
async fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(record).context("failed to serialize record")?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json)
        .await
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to move record into {}", path.display()))?;
    Ok(())
}

#[async_trait]
impl AssessmentStore for JsonStore {
    fn name(&self) -> &str {
        "json"
    }

    async fn load_assessment(&self, job_id: &str) -> Result<Option<Assessment>> {
        let path = self.assessment_path(job_id)?;
        read_record(&path).await
    }

    async fn save_assessment(&self, job_id: &str, sections: Vec<Section>) -> Result<Assessment> {
        let path = self.assessment_path(job_id)?;
        let existing = read_record::<Assessment>(&path).await?;
        let saved = merge_save(existing, job_id, sections);
        write_record(&path, &saved).await?;
        tracing::debug!(job_id, path = %path.display(), "saved assessment");
        Ok(saved)
    }

    async fn submit_response(
        &self,
        assessment_id: Uuid,
        candidate_id: &str,
        responses: AnswerSet,
    ) -> Result<AssessmentResponse> {
        let path = self.response_path(assessment_id, candidate_id)?;
        let response = new_response(assessment_id, candidate_id, responses);
        write_record(&path, &response).await?;
        tracing::debug!(%assessment_id, candidate_id, "recorded response");
        Ok(response)
    }

    async fn load_response(
        &self,
        assessment_id: Uuid,
        candidate_id: &str,
    ) -> Result<Option<AssessmentResponse>> {
        let path = self.response_path(assessment_id, candidate_id)?;
        read_record(&path).await
    }
}
