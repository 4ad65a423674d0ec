//! Identifier generation for builder-created sections and questions.

use uuid::Uuid;

/// What an id is being generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Section,
    Question,
}

/// Source of fresh identifiers.
///
/// Implementations need not know which ids are taken; the builder keeps
/// drawing until it gets one that is unused in the assessment.
pub trait IdGenerator {
    fn next_id(&mut self, kind: IdKind) -> String;
}

/// Counter-based ids: `section-1`, `q-1`, `q-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    sections: u64,
    questions: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: IdKind) -> String {
        match kind {
            IdKind::Section => {
                self.sections += 1;
                format!("section-{}", self.sections)
            }
            IdKind::Question => {
                self.questions += 1;
                format!("q-{}", self.questions)
            }
        }
    }
}

/// Random UUID-based ids: `section-<uuid>`, `q-<uuid>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self, kind: IdKind) -> String {
        let prefix = match kind {
            IdKind::Section => "section",
            IdKind::Question => "q",
        };
        format!("{prefix}-{}", Uuid::new_v4().simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_counts_per_kind() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(IdKind::Section), "section-1");
        assert_eq!(ids.next_id(IdKind::Question), "q-1");
        assert_eq!(ids.next_id(IdKind::Question), "q-2");
        assert_eq!(ids.next_id(IdKind::Section), "section-2");
    }

    #[test]
    fn random_ids_differ() {
        let mut ids = RandomIds;
        let a = ids.next_id(IdKind::Question);
        let b = ids.next_id(IdKind::Question);
        assert!(a.starts_with("q-"));
        assert_ne!(a, b);
    }
}
