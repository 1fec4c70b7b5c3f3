//! Encoding of bucket files and the `searchdata.js` manifest in the exact
//! layout the search widget loads.

use crate::index::{SearchIndex, SearchRecord};
use std::fmt::Write;

/// Encode a string for a single-quoted JS literal holding HTML text.
pub fn encode_string(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => encoded.push_str("\\\\"),
            '\'' => encoded.push_str("\\'"),
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            '"' => encoded.push_str("&quot;"),
            '\u{a0}' => encoded.push_str("&#160;"),
            other => encoded.push(other),
        }
    }
    encoded
}

/// Render one record as a `['key',['Label',[...],...]]` tuple.
pub fn write_record(record: &SearchRecord) -> String {
    let mut line = String::new();
    let _ = write!(
        line,
        "['{}',['{}'",
        encode_string(&record.key),
        encode_string(&record.label)
    );
    for target in &record.targets {
        let _ = write!(
            line,
            ",['{}',{},'{}']",
            encode_string(&target.url),
            u8::from(target.local),
            encode_string(&target.scope)
        );
    }
    line.push_str("]]");
    line
}

/// Render a complete bucket file.
pub fn write_bucket(records: &[SearchRecord]) -> String {
    let mut out = String::from("var searchData=\n[\n");
    let body: Vec<String> = records
        .iter()
        .map(|record| format!("  {}", write_record(record)))
        .collect();
    out.push_str(&body.join(",\n"));
    if !body.is_empty() {
        out.push('\n');
    }
    out.push_str("];\n");
    out
}

fn write_object(out: &mut String, name: &str, values: &[String]) {
    let _ = writeln!(out, "var {name} =\n{{");
    let entries: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let value = value.replace('\\', "\\\\").replace('"', "\\\"");
            format!("  {index}: \"{value}\"")
        })
        .collect();
    out.push_str(&entries.join(",\n"));
    if !entries.is_empty() {
        out.push('\n');
    }
    out.push_str("};\n\n");
}

/// Render `searchdata.js` for every section of `index`.
pub fn write_search_data(index: &SearchIndex) -> String {
    let letters: Vec<String> = index.sections.iter().map(|s| s.letters()).collect();
    let names: Vec<String> = index
        .sections
        .iter()
        .map(|s| s.kind.name().to_string())
        .collect();
    let labels: Vec<String> = index
        .sections
        .iter()
        .map(|s| s.kind.label().to_string())
        .collect();

    let mut out = String::new();
    write_object(&mut out, "indexSectionsWithContent", &letters);
    write_object(&mut out, "indexSectionNames", &names);
    write_object(&mut out, "indexSectionLabels", &labels);
    out
}
