//! The `talentflow edit` command.
//!
//! Each action loads the job's stored assessment, applies one builder
//! operation and saves the full section list back.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use talentflow_core::{Assessment, Condition, QuestionPatch, QuestionType};
use talentflow_store::config::load_config_from;
use talentflow_store::create_store;

#[derive(Subcommand)]
pub enum EditAction {
    /// Append an empty section
    AddSection {
        /// Initial title
        #[arg(long)]
        title: Option<String>,
    },

    /// Append a blank short-text question to a section
    AddQuestion {
        #[arg(long)]
        section: String,
    },

    /// Change a section's title
    RenameSection {
        #[arg(long)]
        section: String,

        #[arg(long)]
        title: String,
    },

    /// Change a question's fields
    SetQuestion {
        #[arg(long)]
        section: String,

        #[arg(long)]
        question: String,

        /// short-text, long-text, single-choice, multi-choice, numeric, file
        #[arg(long = "type")]
        kind: Option<String>,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        required: Option<bool>,

        /// Comma-separated option labels
        #[arg(long)]
        options: Option<String>,

        #[arg(long)]
        min: Option<f64>,

        #[arg(long)]
        max: Option<f64>,

        #[arg(long)]
        max_length: Option<usize>,

        /// Show only when another answer matches: "q5=Yes" or "q4=Go|Rust"
        #[arg(long)]
        show_if: Option<String>,

        /// Drop type-specific constraints that do not fit the new type
        #[arg(long)]
        clear_stale: bool,
    },

    /// Move a question within its section
    Reorder {
        #[arg(long)]
        section: String,

        #[arg(long)]
        from: usize,

        #[arg(long)]
        to: usize,
    },

    /// Delete the section at an index
    DeleteSection {
        #[arg(long)]
        index: usize,
    },

    /// Delete the question at an index in a section
    DeleteQuestion {
        #[arg(long)]
        section: String,

        #[arg(long)]
        index: usize,
    },
}

pub async fn execute(job_id: String, action: EditAction, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = create_store(&config);
    let mut ids = config.id_strategy.generator();

    let mut assessment = store
        .load_assessment(&job_id)
        .await?
        .unwrap_or_else(|| Assessment::new(&job_id));

    let summary = match action {
        EditAction::AddSection { title } => {
            let section = assessment.add_section(ids.as_mut());
            if let Some(title) = title {
                section.title = title;
            }
            format!("Added section {}", section.id)
        }
        EditAction::AddQuestion { section } => {
            let question = assessment.add_question(&section, ids.as_mut())?;
            format!("Added question {} to {section}", question.id)
        }
        EditAction::RenameSection { section, title } => {
            assessment.rename_section(&section, title)?;
            format!("Renamed section {section}")
        }
        EditAction::SetQuestion {
            section,
            question,
            kind,
            text,
            required,
            options,
            min,
            max,
            max_length,
            show_if,
            clear_stale,
        } => {
            let current = assessment
                .question(&question)
                .ok_or_else(|| anyhow::anyhow!("no question with id '{question}'"))?;
            let mut patch = QuestionPatch::from(current);

            if let Some(kind) = kind {
                patch.kind = kind.parse::<QuestionType>().map_err(|e| anyhow::anyhow!(e))?;
            }
            if let Some(text) = text {
                patch.text = text;
            }
            if let Some(required) = required {
                patch.required = required;
            }
            if let Some(options) = options {
                patch.options = Some(split_list(&options, ','));
            }
            if min.is_some() {
                patch.min_value = min;
            }
            if max.is_some() {
                patch.max_value = max;
            }
            if max_length.is_some() {
                patch.max_length = max_length;
            }
            if let Some(rule) = show_if {
                patch.conditional_on = Some(parse_show_if(&rule)?);
            }
            if clear_stale {
                clear_stale_constraints(&mut patch);
            }

            assessment.update_question(&section, &question, patch)?;
            format!("Updated question {question}")
        }
        EditAction::Reorder { section, from, to } => {
            assessment.reorder(&section, from, to)?;
            format!("Moved question {from} -> {to} in {section}")
        }
        EditAction::DeleteSection { index } => {
            let removed = assessment.delete_section(index)?;
            format!("Deleted section {}", removed.id)
        }
        EditAction::DeleteQuestion { section, index } => {
            let removed = assessment.delete_question(&section, index)?;
            format!("Deleted question {} from {section}", removed.id)
        }
    };

    let saved = store.save_assessment(&job_id, assessment.sections).await?;
    println!(
        "{summary} (job {}, {} sections, {} questions)",
        saved.job_id,
        saved.sections.len(),
        saved.question_count()
    );

    Ok(())
}

fn split_list(s: &str, sep: char) -> Vec<String> {
    s.split(sep)
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

/// Parse `question=value` or `question=a|b`.
fn parse_show_if(rule: &str) -> Result<Condition> {
    let (question_id, value) = rule
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected QUESTION=VALUE, got '{rule}'"))?;
    let question_id = question_id.trim();
    anyhow::ensure!(!question_id.is_empty(), "missing question id in '{rule}'");

    if value.contains('|') {
        Ok(Condition::any_of(question_id, split_list(value, '|')))
    } else {
        Ok(Condition::equals(question_id, value.trim()))
    }
}

fn clear_stale_constraints(patch: &mut QuestionPatch) {
    if !patch.kind.is_choice() {
        patch.options = None;
    }
    if patch.kind != QuestionType::Numeric {
        patch.min_value = None;
        patch.max_value = None;
    }
    if !patch.kind.is_text() {
        patch.max_length = None;
    }
}
