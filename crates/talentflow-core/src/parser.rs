//! Assessment file loading.
//!
//! Assessments are authored as TOML and stored as JSON. Both load into the
//! same [`Assessment`] model. Answer sets are read from JSON.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    AnswerSet, Assessment, Condition, ConditionValue, Question, QuestionType, Section,
};

/// Intermediate TOML structure for parsing assessment files.
#[derive(Debug, Deserialize)]
struct TomlAssessmentFile {
    assessment: TomlAssessmentHeader,
    #[serde(default)]
    sections: Vec<TomlSection>,
}

#[derive(Debug, Deserialize)]
struct TomlAssessmentHeader {
    job_id: String,
}

#[derive(Debug, Deserialize)]
struct TomlSection {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(rename = "type", default = "default_type")]
    kind: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    min_value: Option<f64>,
    #[serde(default)]
    max_value: Option<f64>,
    #[serde(default)]
    max_length: Option<usize>,
    #[serde(default)]
    conditional_on: Option<TomlCondition>,
}

fn default_type() -> String {
    "short-text".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlCondition {
    question_id: String,
    value: ConditionValue,
}

/// Parse an assessment file, choosing the format by extension.
///
/// `.json` files are read as stored records; anything else as TOML.
pub fn parse_assessment(path: &Path) -> Result<Assessment> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read assessment file: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        parse_assessment_json(&content, path)
    } else {
        parse_assessment_str(&content, path)
    }
}

/// Parse a TOML string into an `Assessment` (useful for testing).
pub fn parse_assessment_str(content: &str, source_path: &Path) -> Result<Assessment> {
    let parsed: TomlAssessmentFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let sections = parsed
        .sections
        .into_iter()
        .map(|s| {
            let questions = s
                .questions
                .into_iter()
                .map(|q| {
                    let kind = q
                        .kind
                        .parse::<QuestionType>()
                        .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;

                    Ok(Question {
                        id: q.id,
                        kind,
                        text: q.text,
                        required: q.required,
                        options: q.options,
                        min_value: q.min_value,
                        max_value: q.max_value,
                        max_length: q.max_length,
                        conditional_on: q.conditional_on.map(|c| Condition {
                            question_id: c.question_id,
                            value: c.value,
                        }),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(Section {
                id: s.id,
                title: s.title,
                questions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Assessment::with_sections(parsed.assessment.job_id, sections))
}

/// Parse a stored JSON assessment record.
pub fn parse_assessment_json(content: &str, source_path: &Path) -> Result<Assessment> {
    serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))
}

/// Recursively load all `.toml` assessment files from a directory.
pub fn load_assessment_directory(dir: &Path) -> Result<Vec<Assessment>> {
    let mut assessments = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            assessments.extend(load_assessment_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_assessment(&path) {
                Ok(assessment) => assessments.push(assessment),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(assessments)
}

/// Load a file or every assessment under a directory.
pub fn load_assessments(path: &Path) -> Result<Vec<Assessment>> {
    if path.is_dir() {
        load_assessment_directory(path)
    } else {
        Ok(vec![parse_assessment(path)?])
    }
}

/// Read an answer set from a JSON object file.
pub fn load_answers(path: &Path) -> Result<AnswerSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerValue;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[assessment]
job_id = "job-frontend"

[[sections]]
id = "section-1"
title = "Background & Experience"

[[sections.questions]]
id = "q1"
type = "short-text"
text = "What is your current job title?"
required = true
max_length = 100

[[sections.questions]]
id = "q2"
type = "numeric"
text = "How many years of relevant experience do you have?"
required = true
min_value = 0
max_value = 50

[[sections]]
id = "section-2"
title = "Technical Skills"

[[sections.questions]]
id = "q5"
type = "single-choice"
text = "Have you worked with React before?"
required = true
options = ["Yes", "No"]

[[sections.questions]]
id = "q6"
type = "long-text"
text = "Describe a complex React project."
required = true
max_length = 1000
conditional_on = { question_id = "q5", value = "Yes" }
"#;

    #[test]
    fn parse_valid_toml() {
        let a = parse_assessment_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(a.job_id, "job-frontend");
        assert_eq!(a.sections.len(), 2);
        assert_eq!(a.question_count(), 4);

        let q2 = a.question("q2").unwrap();
        assert_eq!(q2.kind, QuestionType::Numeric);
        assert_eq!(q2.min_value, Some(0.0));
        assert_eq!(q2.max_value, Some(50.0));

        let q6 = a.question("q6").unwrap();
        assert_eq!(q6.conditional_on, Some(Condition::equals("q5", "Yes")));
    }

    #[test]
    fn parse_list_condition() {
        let toml = r#"
[assessment]
job_id = "j"

[[sections]]
id = "s"

[[sections.questions]]
id = "q4"
type = "multi-choice"
options = ["Go", "Rust"]

[[sections.questions]]
id = "q7"
conditional_on = { question_id = "q4", value = ["Go", "Rust"] }
"#;
        let a = parse_assessment_str(toml, &PathBuf::from("test.toml")).unwrap();
        let q7 = a.question("q7").unwrap();
        assert_eq!(q7.kind, QuestionType::ShortText);
        assert!(!q7.required);
        assert_eq!(
            q7.conditional_on,
            Some(Condition::any_of("q4", ["Go", "Rust"]))
        );
    }

    #[test]
    fn parse_unknown_question_type() {
        let toml = r#"
[assessment]
job_id = "j"

[[sections]]
id = "s"

[[sections.questions]]
id = "q1"
type = "slider"
"#;
        let err = parse_assessment_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("unknown question type"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_assessment_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn json_record_roundtrip() {
        let a = parse_assessment_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, serde_json::to_string_pretty(&a).unwrap()).unwrap();

        let loaded = parse_assessment(&path).unwrap();
        assert_eq!(loaded, a);
    }

    #[test]
    fn load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("bad.toml"), "nope = [").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let all = load_assessment_directory(dir.path()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].job_id, "job-frontend");
    }

    #[test]
    fn load_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.toml");
        std::fs::write(&file, VALID_TOML).unwrap();
        assert!(load_assessment_directory(&file).is_err());
        assert_eq!(load_assessments(&file).unwrap().len(), 1);
    }

    #[test]
    fn load_answers_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"q1": "Engineer", "q2": 4, "q4": ["Go"]}"#).unwrap();

        let answers = load_answers(&path).unwrap();
        assert_eq!(answers.get("q2"), Some(&AnswerValue::Number(4.0)));
        assert_eq!(answers.get("q4"), Some(&AnswerValue::from(vec!["Go"])));
    }
}
