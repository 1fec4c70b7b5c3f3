//! Terminal presentation: colour policy, headings and tables.

use crate::index::SearchRecord;
use crate::query::SearchHit;
use crate::validate::{Issue, SectionStats};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use console::style;

pub struct Theme;

impl Theme {
    /// Honour `NO_COLOR` and non-terminal output.
    pub fn should_disable_colors() -> bool {
        std::env::var_os("NO_COLOR").is_some() || !console::colors_enabled()
    }
}

pub fn heading(text: &str) -> String {
    if Theme::should_disable_colors() {
        text.to_string()
    } else {
        style(text).cyan().bold().to_string()
    }
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    if Theme::should_disable_colors() {
        table.force_no_tty();
    }
    table
}

pub fn hits_table(hits: &[SearchHit]) -> Table {
    let mut table = table(vec!["Label", "Scope", "Url", "Bucket"]);
    for hit in hits {
        for target in &hit.record.targets {
            table.add_row(vec![
                hit.record.label.as_str(),
                target.scope.as_str(),
                target.url.as_str(),
                hit.bucket_file.as_str(),
            ]);
        }
    }
    table
}

pub fn records_table(records: &[SearchRecord]) -> Table {
    let mut table = table(vec!["Key", "Label", "Targets", "Scope"]);
    for record in records {
        let scopes: Vec<&str> = record
            .targets
            .iter()
            .map(|t| t.scope.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        table.add_row(vec![
            record.key.clone(),
            record.label.clone(),
            record.targets.len().to_string(),
            scopes.join("\n"),
        ]);
    }
    table
}

pub fn stats_table(stats: &[SectionStats]) -> Table {
    let mut table = table(vec!["Section", "Buckets", "Records", "Targets", "Overloaded"]);
    for section in stats {
        table.add_row(vec![
            section.section.name().to_string(),
            section.buckets.to_string(),
            section.records.to_string(),
            section.targets.to_string(),
            section.overloaded.to_string(),
        ]);
    }
    table
}

pub fn issues_table(issues: &[Issue]) -> Table {
    let mut table = table(vec!["File", "Key", "Issue"]);
    for issue in issues {
        table.add_row(vec![
            issue.file.clone(),
            issue.key.clone().unwrap_or_default(),
            issue.kind.to_string(),
        ]);
    }
    table
}
