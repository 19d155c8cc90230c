//! CLI presentation: text and JSON formatting for run outcomes and dirty checks.

use crate::error::GeneratorError;
use crate::runner::{DirtyStatus, GenerateOutcome};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// One-line summary of a generator run.
pub fn format_outcome(generator: &str, outcome: &GenerateOutcome) -> String {
    match outcome {
        GenerateOutcome::Skipped => format!("{}: up to date", generator),
        GenerateOutcome::Regenerated { reason, artifacts } => {
            let why = reason
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "forced".to_string());
            format!(
                "{}: wrote {} file(s) ({})",
                generator,
                artifacts.len(),
                why
            )
        }
    }
}

/// Dirty-check report as text (table) or JSON.
pub fn format_status(status: &DirtyStatus, format: &str) -> Result<String, GeneratorError> {
    match format {
        "json" => serde_json::to_string_pretty(status)
            .map_err(|e| GeneratorError::Config(format!("Failed to serialize status: {}", e))),
        "text" => Ok(format_status_text(status)),
        other => Err(GeneratorError::Config(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn format_status_text(status: &DirtyStatus) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!(
            "{} v{}: {}",
            status.generator,
            status.version,
            status.descriptor.display()
        ))
    ));

    let verdict = match status.reason {
        Some(ref reason) => format!("{} ({})", "dirty".yellow(), reason),
        None => format!("{}", "clean".green()),
    };
    out.push_str(&format!("  State: {}\n\n", verdict));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Role", "Path", "Modified"]);
    for (role, paths) in [("input", &status.inputs), ("output", &status.outputs)] {
        for path in paths {
            table.add_row(vec![
                role.to_string(),
                path.display().to_string(),
                modified_label(path),
            ]);
        }
    }
    out.push_str(&format!("{}\n", table));
    out
}

fn modified_label(path: &std::path::Path) -> String {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(time) => chrono::DateTime::<chrono::Utc>::from(time)
            .format("%Y-%m-%d %H:%M:%S%.3f")
            .to_string(),
        Err(_) => "missing".to_string(),
    }
}
