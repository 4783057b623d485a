//! Markdown run report
//!
//! This module writes a human-readable summary of a harvest run: overall
//! counts, one table row per collection, and the collections that need a
//! second look.

use crate::output::stats::HarvestStats;
use crate::output::traits::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown report of a run to `output_path`
pub fn generate_markdown_summary(stats: &HarvestStats, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(stats);

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats run statistics as markdown
pub fn format_markdown_summary(stats: &HarvestStats) -> String {
    let mut md = String::new();

    md.push_str("# Catalog-Harvest Run Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", stats.started_at.to_rfc3339()));
    if let Some(finished) = &stats.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = stats.duration_seconds() {
        md.push_str(&format!(
            "- **Duration**: {} seconds ({:.2} minutes)\n",
            duration,
            duration as f64 / 60.0
        ));
    }
    if let Some(hash) = &stats.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!(
        "- **Collections Discovered**: {}\n",
        stats.collections_discovered
    ));
    md.push_str(&format!(
        "- **Collections Written**: {}\n",
        stats.collections_written()
    ));
    md.push_str(&format!("- **Items Extracted**: {}\n", stats.items_extracted()));
    md.push_str(&format!("- **Items Failed**: {}\n", stats.items_failed()));
    md.push_str(&format!("- **Images Saved**: {}\n", stats.images_saved()));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    // Per-collection breakdown
    if !stats.collections.is_empty() {
        md.push_str("## Collections\n\n");
        md.push_str("| Collection | Pages | Declared | Found | Extracted | Failed | Images | File |\n");
        md.push_str("|------------|-------|----------|-------|-----------|--------|--------|------|\n");

        for report in &stats.collections {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                escape_cell(&report.name),
                report.pages_visited,
                report
                    .declared_total
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                report.urls_found,
                report.items_extracted,
                report.items_failed,
                report.images_saved,
                report
                    .output
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ));
        }
        md.push('\n');
    }

    // Collections needing attention
    let attention: Vec<String> = stats
        .collections
        .iter()
        .flat_map(|report| {
            let mut notes = Vec::new();
            if let Some((expected, found)) = report.count_mismatch() {
                notes.push(format!(
                    "- **{}**: listing announced {} items, found {}",
                    report.name, expected, found
                ));
            }
            if let Some(reason) = &report.halted {
                notes.push(format!("- **{}**: pagination stopped: {}", report.name, reason));
            }
            if let Some(error) = &report.write_error {
                notes.push(format!("- **{}**: not written: {}", report.name, error));
            }
            notes
        })
        .collect();

    if !attention.is_empty() {
        md.push_str("## Needs Attention\n\n");
        for line in attention {
            md.push_str(&line);
            md.push('\n');
        }
        md.push('\n');
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
