//! The `scorecast fields` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use scorecast_core::render::UNSET;
use scorecast_core::{FieldKind, FieldName};

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Label", "Range / Options", "Default"]);

    for name in FieldName::ALL {
        let spec = name.spec();
        let (range, default) = match spec.kind {
            FieldKind::Numeric {
                min,
                max,
                step,
                default,
            } => {
                let range = if step == 1 {
                    format!("{min}..={max}")
                } else {
                    format!("{min}..={max} step {step}")
                };
                (range, default.to_string())
            }
            FieldKind::Choice { options } => (options.join(", "), UNSET.to_string()),
        };
        table.add_row(vec![
            Cell::new(name.key()),
            Cell::new(spec.label),
            Cell::new(range),
            Cell::new(default),
        ]);
    }

    println!("{table}");
    Ok(())
}
