//! In-memory store for tests and previews.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use talentflow_core::{AnswerSet, Assessment, AssessmentResponse, Section};

use crate::traits::{merge_save, new_response, AssessmentStore};

/// A store that keeps everything in process memory.
///
/// Nothing survives the process; useful for previews and tests.
#[derive(Default)]
pub struct MemoryStore {
    assessments: RwLock<HashMap<String, Assessment>>,
    responses: RwLock<HashMap<(Uuid, String), AssessmentResponse>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored assessments.
    pub async fn assessment_count(&self) -> usize {
        self.assessments.read().await.len()
    }
}

#[async_trait]
impl AssessmentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load_assessment(&self, job_id: &str) -> anyhow::Result<Option<Assessment>> {
        Ok(self.assessments.read().await.get(job_id).cloned())
    }

    async fn save_assessment(
        &self,
        job_id: &str,
        sections: Vec<Section>,
    ) -> anyhow::Result<Assessment> {
        let mut assessments = self.assessments.write().await;
        let saved = merge_save(assessments.remove(job_id), job_id, sections);
        assessments.insert(job_id.to_string(), saved.clone());
        tracing::debug!(job_id, assessment_id = %saved.id, "saved assessment in memory");
        Ok(saved)
    }

    async fn submit_response(
        &self,
        assessment_id: Uuid,
        candidate_id: &str,
        responses: AnswerSet,
    ) -> anyhow::Result<AssessmentResponse> {
        let response = new_response(assessment_id, candidate_id, responses);
        self.responses
            .write()
            .await
            .insert((assessment_id, candidate_id.to_string()), response.clone());
        Ok(response)
    }

    async fn load_response(
        &self,
        assessment_id: Uuid,
        candidate_id: &str,
    ) -> anyhow::Result<Option<AssessmentResponse>> {
        Ok(self
            .responses
            .read()
            .await
            .get(&(assessment_id, candidate_id.to_string()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentflow_core::{AnswerValue, Question};

    fn section(id: &str, question_ids: &[&str]) -> Section {
        Section {
            id: id.into(),
            title: id.to_uppercase(),
            questions: question_ids.iter().map(|q| Question::new(*q)).collect(),
        }
    }

    #[tokio::test]
    async fn load_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.load_assessment("job-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn first_save_creates_then_replaces() {
        let store = MemoryStore::new();
        let first = store
            .save_assessment("job-1", vec![section("s1", &["q1", "q2"])])
            .await
            .unwrap();
        assert_eq!(first.job_id, "job-1");
        assert_eq!(first.created_at, first.updated_at);

        let second = store
            .save_assessment("job-1", vec![section("s2", &["q3"])])
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(second.sections.len(), 1);
        assert_eq!(second.sections[0].id, "s2");

        let loaded = store.load_assessment("job-1").await.unwrap().unwrap();
        assert_eq!(loaded, second);
        assert_eq!(store.assessment_count().await, 1);
    }

    #[tokio::test]
    async fn responses_keyed_by_assessment_and_candidate() {
        let store = MemoryStore::new();
        let assessment_id = Uuid::new_v4();
        let answers: AnswerSet = [("q1", "Engineer")].into_iter().collect();

        store
            .submit_response(assessment_id, "cand-1", answers)
            .await
            .unwrap();
        let later: AnswerSet = [("q1", "Lead")].into_iter().collect();
        store
            .submit_response(assessment_id, "cand-1", later)
            .await
            .unwrap();

        let found = store
            .load_response(assessment_id, "cand-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.responses.get("q1"), Some(&AnswerValue::from("Lead")));
        assert!(store
            .load_response(assessment_id, "cand-2")
            .await
            .unwrap()
            .is_none());
    }
}
