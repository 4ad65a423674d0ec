//! Core data model types for talentflow assessments.
//!
//! An assessment belongs to one job and holds ordered sections of ordered,
//! typed questions. Answers are kept in an [`AnswerSet`] owned by whoever
//! runs the form; validation results land in an [`ErrorMap`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The full question set for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Record identifier, assigned when the assessment is first created.
    pub id: Uuid,
    /// The job this assessment belongs to. One assessment per job.
    pub job_id: String,
    /// Sections in rendering and evaluation order.
    #[serde(default)]
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assessment {
    /// Create an empty assessment for a job.
    pub fn new(job_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            job_id: job_id.into(),
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an assessment for a job with the given sections.
    pub fn with_sections(job_id: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            sections,
            ..Self::new(job_id)
        }
    }

    /// All questions across all sections, in document order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    /// Look up a question anywhere in the assessment.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == question_id)
    }

    /// Look up a section by id.
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Total number of questions.
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

/// A named, ordered group of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// One prompt with a type, constraints, and an optional visibility rule.
///
/// Type-specific constraints are flat optional fields. Changing `kind` does
/// not clear constraints that belong to the old type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub required: bool,
    /// Choice labels for single-choice and multi-choice questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    /// Maximum answer length in characters for text questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_on: Option<Condition>,
}

impl Question {
    /// A blank short-text question, as created by the builder.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: QuestionType::ShortText,
            text: String::new(),
            required: false,
            options: None,
            min_value: None,
            max_value: None,
            max_length: None,
            conditional_on: None,
        }
    }
}

/// The supported question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    ShortText,
    LongText,
    SingleChoice,
    MultiChoice,
    Numeric,
    File,
}

impl QuestionType {
    pub const ALL: [QuestionType; 6] = [
        QuestionType::ShortText,
        QuestionType::LongText,
        QuestionType::SingleChoice,
        QuestionType::MultiChoice,
        QuestionType::Numeric,
        QuestionType::File,
    ];

    /// Whether answers are free text subject to `max_length`.
    pub fn is_text(self) -> bool {
        matches!(self, QuestionType::ShortText | QuestionType::LongText)
    }

    /// Whether answers are picked from `options`.
    pub fn is_choice(self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultiChoice)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::ShortText => write!(f, "short-text"),
            QuestionType::LongText => write!(f, "long-text"),
            QuestionType::SingleChoice => write!(f, "single-choice"),
            QuestionType::MultiChoice => write!(f, "multi-choice"),
            QuestionType::Numeric => write!(f, "numeric"),
            QuestionType::File => write!(f, "file"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "short-text" | "text" => Ok(QuestionType::ShortText),
            "long-text" | "textarea" => Ok(QuestionType::LongText),
            "single-choice" | "radio" => Ok(QuestionType::SingleChoice),
            "multi-choice" | "checkbox" => Ok(QuestionType::MultiChoice),
            "numeric" | "number" => Ok(QuestionType::Numeric),
            "file" => Ok(QuestionType::File),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Makes a question's visibility depend on another question's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// The question whose answer is inspected.
    pub question_id: String,
    pub value: ConditionValue,
}

impl Condition {
    pub fn equals(question_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            value: ConditionValue::One(value.into()),
        }
    }

    pub fn any_of<I, S>(question_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: question_id.into(),
            value: ConditionValue::AnyOf(values.into_iter().map(Into::into).collect()),
        }
    }
}

/// Target of a condition: one exact value or a set of accepted values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    One(String),
    AnyOf(Vec<String>),
}

impl ConditionValue {
    /// Every value this condition mentions.
    pub fn values(&self) -> &[String] {
        match self {
            ConditionValue::One(v) => std::slice::from_ref(v),
            ConditionValue::AnyOf(vs) => vs,
        }
    }
}

/// A reference to an uploaded file. Only the name is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub filename: String,
}

/// One answer value.
///
/// JSON form: a number, a string, an array of strings, or
/// `{"filename": "..."}` for uploads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Choices(Vec<String>),
    File(FileRef),
}

impl AnswerValue {
    pub fn file(filename: impl Into<String>) -> Self {
        AnswerValue::File(FileRef {
            filename: filename.into(),
        })
    }

    /// True for `""` and `[]`. Whitespace is not empty.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.is_empty(),
            AnswerValue::Choices(c) => c.is_empty(),
            AnswerValue::File(f) => f.filename.is_empty(),
            AnswerValue::Number(_) => false,
        }
    }

    /// The string form of a scalar textual answer, used for condition matching.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            AnswerValue::File(f) => Some(&f.filename),
            AnswerValue::Number(_) | AnswerValue::Choices(_) => None,
        }
    }

    /// Convert to a number.
    ///
    /// Numbers pass through. Strings follow the form engine's number
    /// coercion: surrounding whitespace is ignored, a blank string is `0`,
    /// `0x`/`0o`/`0b` prefixes select a radix, and `Infinity` is spelled
    /// exactly. Choice lists are never numbers. NaN is rejected.
    pub fn to_number(&self) -> Option<f64> {
        let n = match self {
            AnswerValue::Number(n) => *n,
            AnswerValue::Text(_) | AnswerValue::File(_) => parse_number(self.as_str()?)?,
            AnswerValue::Choices(_) => return None,
        };
        (!n.is_nan()).then_some(n)
    }

    /// Length in characters, as checked against `max_length`.
    ///
    /// Counts Unicode scalar values, so an emoji outside the Basic
    /// Multilingual Plane counts once rather than as two UTF-16 units.
    pub fn char_len(&self) -> usize {
        match self {
            AnswerValue::Number(n) => n.to_string().chars().count(),
            AnswerValue::Text(s) => s.chars().count(),
            AnswerValue::File(f) => f.filename.chars().count(),
            AnswerValue::Choices(c) => c.join(",").chars().count(),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let digits = s
            .strip_prefix(prefix)
            .or_else(|| s.strip_prefix(&prefix.to_ascii_uppercase()[..]));
        if let Some(digits) = digits {
            if digits.is_empty() {
                return None;
            }
            return digits.chars().try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            });
        }
    }

    // Plain decimal only; `f64::from_str` would also take "inf" and "nan".
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(v: Vec<String>) -> Self {
        AnswerValue::Choices(v)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(v: Vec<&str>) -> Self {
        AnswerValue::Choices(v.into_iter().map(String::from).collect())
    }
}

/// Answers for one form session, keyed by question id.
///
/// A JSON `null` answer is read as no answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet(HashMap<String, AnswerValue>);

impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = HashMap::<String, Option<AnswerValue>>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(id, value)| value.map(|v| (id, v)))
                .collect(),
        ))
    }
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.0.get(question_id)
    }

    /// Store an answer, returning the previous one.
    pub fn set(
        &mut self,
        question_id: impl Into<String>,
        value: impl Into<AnswerValue>,
    ) -> Option<AnswerValue> {
        self.0.insert(question_id.into(), value.into())
    }

    pub fn remove(&mut self, question_id: &str) -> Option<AnswerValue> {
        self.0.remove(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Validation messages keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(HashMap<String, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn insert(&mut self, question_id: impl Into<String>, message: impl Into<String>) {
        self.0.insert(question_id.into(), message.into());
    }

    pub fn remove(&mut self, question_id: &str) -> Option<String> {
        self.0.remove(question_id)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

/// A submitted answer set for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub candidate_id: String,
    pub responses: AnswerSet,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_display_and_parse() {
        for kind in QuestionType::ALL {
            assert_eq!(kind.to_string().parse::<QuestionType>().unwrap(), kind);
        }
        assert_eq!(
            "Short_Text".parse::<QuestionType>().unwrap(),
            QuestionType::ShortText
        );
        assert_eq!("number".parse::<QuestionType>().unwrap(), QuestionType::Numeric);
        assert!("slider".parse::<QuestionType>().is_err());
    }

    #[test]
    fn question_json_uses_camel_case() {
        let mut q = Question::new("q6");
        q.kind = QuestionType::LongText;
        q.max_length = Some(1000);
        q.conditional_on = Some(Condition::equals("q5", "Yes"));

        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "long-text");
        assert_eq!(json["maxLength"], 1000);
        assert_eq!(json["conditionalOn"]["questionId"], "q5");
        assert!(json.get("minValue").is_none());

        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn condition_value_accepts_string_or_list() {
        let one: Condition =
            serde_json::from_str(r#"{"questionId":"q5","value":"Yes"}"#).unwrap();
        assert_eq!(one.value, ConditionValue::One("Yes".into()));

        let many: Condition =
            serde_json::from_str(r#"{"questionId":"q4","value":["Go","Rust"]}"#).unwrap();
        assert_eq!(many.value.values(), ["Go", "Rust"]);
    }

    #[test]
    fn answer_value_json_shapes() {
        let answers: AnswerSet = serde_json::from_str(
            r#"{"a": 4, "b": "four", "c": ["x", "y"], "d": {"filename": "cv.pdf"}}"#,
        )
        .unwrap();
        assert_eq!(answers.get("a"), Some(&AnswerValue::Number(4.0)));
        assert_eq!(answers.get("b"), Some(&AnswerValue::Text("four".into())));
        assert_eq!(answers.get("c"), Some(&AnswerValue::from(vec!["x", "y"])));
        assert_eq!(answers.get("d"), Some(&AnswerValue::file("cv.pdf")));
    }

    #[test]
    fn answer_emptiness_is_exact() {
        assert!(AnswerValue::from("").is_empty());
        assert!(!AnswerValue::from("   ").is_empty());
        assert!(AnswerValue::Choices(vec![]).is_empty());
        assert!(!AnswerValue::Number(0.0).is_empty());
    }

    #[test]
    fn numeric_conversion_of_decimals() {
        assert_eq!(AnswerValue::from(" 42 ").to_number(), Some(42.0));
        assert_eq!(AnswerValue::from("2.5").to_number(), Some(2.5));
        assert_eq!(AnswerValue::from(".5").to_number(), Some(0.5));
        assert_eq!(AnswerValue::from("-1e3").to_number(), Some(-1000.0));
        assert_eq!(AnswerValue::Number(7.0).to_number(), Some(7.0));
        assert_eq!(AnswerValue::from("abc").to_number(), None);
        assert_eq!(AnswerValue::from("1_000").to_number(), None);
        assert_eq!(AnswerValue::from("NaN").to_number(), None);
        assert_eq!(AnswerValue::from(vec!["5"]).to_number(), None);
    }

    #[test]
    fn numeric_conversion_blank_is_zero() {
        assert_eq!(AnswerValue::from("   ").to_number(), Some(0.0));
        assert_eq!(AnswerValue::from("\t\n").to_number(), Some(0.0));
    }

    #[test]
    fn numeric_conversion_radix_prefixes() {
        assert_eq!(AnswerValue::from("0x1A").to_number(), Some(26.0));
        assert_eq!(AnswerValue::from("0X1a").to_number(), Some(26.0));
        assert_eq!(AnswerValue::from("0o17").to_number(), Some(15.0));
        assert_eq!(AnswerValue::from("0b101").to_number(), Some(5.0));
        assert_eq!(AnswerValue::from("0x").to_number(), None);
        assert_eq!(AnswerValue::from("0x1G").to_number(), None);
        assert_eq!(AnswerValue::from("-0x1A").to_number(), None);
        assert_eq!(AnswerValue::from("0x+1").to_number(), None);
    }

    #[test]
    fn numeric_conversion_infinity_spelling() {
        assert_eq!(AnswerValue::from("Infinity").to_number(), Some(f64::INFINITY));
        assert_eq!(AnswerValue::from("+Infinity").to_number(), Some(f64::INFINITY));
        assert_eq!(
            AnswerValue::from(" -Infinity ").to_number(),
            Some(f64::NEG_INFINITY)
        );
        assert_eq!(AnswerValue::from("inf").to_number(), None);
        assert_eq!(AnswerValue::from("infinity").to_number(), None);
        assert_eq!(AnswerValue::from("INFINITY").to_number(), None);
    }

    #[test]
    fn char_len_counts_characters_not_bytes() {
        assert_eq!(AnswerValue::from("héllo").char_len(), 5);
    }

    #[test]
    fn char_len_counts_emoji_once() {
        assert_eq!(AnswerValue::from("ok 👍").char_len(), 4);
        assert_eq!(AnswerValue::from("😀😀").char_len(), 2);
    }

    #[test]
    fn null_answers_read_as_unanswered() {
        let answers: AnswerSet =
            serde_json::from_str(r#"{"q1": null, "q2": "Engineer"}"#).unwrap();
        assert_eq!(answers.len(), 1);
        assert!(answers.get("q1").is_none());
        assert_eq!(answers.get("q2"), Some(&AnswerValue::from("Engineer")));
    }

    #[test]
    fn assessment_lookups() {
        let assessment = Assessment::with_sections(
            "job-1",
            vec![
                Section {
                    id: "s1".into(),
                    title: "One".into(),
                    questions: vec![Question::new("q1"), Question::new("q2")],
                },
                Section {
                    id: "s2".into(),
                    title: "Two".into(),
                    questions: vec![Question::new("q3")],
                },
            ],
        );
        assert_eq!(assessment.question_count(), 3);
        assert!(assessment.question("q3").is_some());
        assert!(assessment.question("q4").is_none());
        let ids: Vec<&str> = assessment.questions().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["q1", "q2", "q3"]);
        assert_eq!(assessment.section("s2").unwrap().title, "Two");
    }
}
