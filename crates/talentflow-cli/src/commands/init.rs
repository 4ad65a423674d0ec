//! The `talentflow init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("talentflow.toml").exists() {
        println!("talentflow.toml already exists, skipping.");
    } else {
        std::fs::write("talentflow.toml", SAMPLE_CONFIG)?;
        println!("Created talentflow.toml");
    }

    std::fs::create_dir_all("assessments")?;
    let example_path = std::path::Path::new("assessments/example.toml");
    if example_path.exists() {
        println!("assessments/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ASSESSMENT)?;
        println!("Created assessments/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit assessments/example.toml");
    println!("  2. Run: talentflow validate --assessment assessments/example.toml");
    println!("  3. Run: talentflow save --assessment assessments/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# talentflow configuration

# Where the json backend keeps assessments and responses.
data_dir = "./talentflow-data"

# "json" or "memory"
backend = "json"

# "sequential" or "random"
id_strategy = "sequential"
"#;

const EXAMPLE_ASSESSMENT: &str = include_str!("../../../../assessments/frontend-engineer.toml");
