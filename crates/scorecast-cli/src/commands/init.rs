//! The `scorecast init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("scorecast.toml").exists() {
        println!("scorecast.toml already exists, skipping.");
    } else {
        std::fs::write("scorecast.toml", SAMPLE_CONFIG)?;
        println!("Created scorecast.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point `endpoint` at your prediction service if it is not the default");
    println!("  2. Run: scorecast fields");
    println!("  3. Run: scorecast predict --study-hours-per-day 6 --learning-style Visual");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# scorecast configuration

# Where the form is posted. `${VAR}` references are read from the environment,
# and SCORECAST_ENDPOINT overrides this value entirely.
endpoint = "https://vishaka.onrender.com/predict"

# Seconds to wait for an answer. Leave unset to wait as long as the
# connection stays open.
# timeout_secs = 30
"#;
