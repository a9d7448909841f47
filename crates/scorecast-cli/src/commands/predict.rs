//! The `scorecast predict` command.

use std::path::PathBuf;

use anyhow::Result;

use scorecast_core::render::render_result;
use scorecast_core::{FieldName, SubmissionController};

pub async fn execute(
    edits: Vec<(FieldName, String)>,
    endpoint: Option<String>,
    config_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let client = super::build_client(endpoint, config_path)?;

    let mut controller = SubmissionController::new();
    for (name, raw) in edits {
        let value = name.parse_value(&raw)?;
        controller.update_value(name, value);
    }

    controller.submit(&client).await;

    if let Some(notice) = controller.notice() {
        eprintln!("{notice}");
        std::process::exit(1);
    }
    if let Some(result) = controller.result() {
        if json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            print!("{}", render_result(result));
        }
    }

    Ok(())
}
