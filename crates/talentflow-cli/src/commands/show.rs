//! The `talentflow show` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use talentflow_core::{parser, ConditionValue, Question};

pub fn execute(assessment_path: PathBuf) -> Result<()> {
    let assessment = parser::parse_assessment(&assessment_path)?;

    println!("Assessment for job {}", assessment.job_id);

    for section in &assessment.sections {
        println!("\n{} ({})", section.title, section.id);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["ID", "Type", "Req", "Question", "Constraints", "Shown when"]);

        for q in &section.questions {
            table.add_row(vec![
                q.id.clone(),
                q.kind.to_string(),
                if q.required { "yes" } else { "" }.to_string(),
                q.text.clone(),
                constraints(q),
                condition(q),
            ]);
        }

        println!("{table}");
    }

    Ok(())
}

fn constraints(q: &Question) -> String {
    let mut parts = Vec::new();
    if q.kind.is_choice() {
        if let Some(options) = &q.options {
            parts.push(options.join(" | "));
        }
    }
    if q.kind.is_text() {
        if let Some(max) = q.max_length {
            parts.push(format!("max {max} chars"));
        }
    }
    if let Some(min) = q.min_value {
        parts.push(format!(">= {min}"));
    }
    if let Some(max) = q.max_value {
        parts.push(format!("<= {max}"));
    }
    parts.join(", ")
}

fn condition(q: &Question) -> String {
    match &q.conditional_on {
        None => String::new(),
        Some(c) => match &c.value {
            ConditionValue::One(v) => format!("{} = {v}", c.question_id),
            ConditionValue::AnyOf(vs) => format!("{} in [{}]", c.question_id, vs.join(", ")),
        },
    }
}
