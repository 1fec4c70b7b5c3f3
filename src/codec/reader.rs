//! Decoding of generated `searchData` bucket files and the `searchdata.js`
//! manifest.

use super::error::{CodecError, CodecResult};
use crate::index::{SearchRecord, SearchTarget};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const BUCKET_VARIABLE: &str = "var searchData";

/// Parse one bucket file into its records.
pub fn parse_bucket(text: &str) -> CodecResult<Vec<SearchRecord>> {
    let literal = array_literal(text)?;
    let value: Value = serde_json5::from_str(literal)?;

    let Value::Array(items) = value else {
        return Err(CodecError::shape(0, "top level is not an array"));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect()
}

/// Strip `var searchData=` and the trailing `;`.
fn array_literal(text: &str) -> CodecResult<&str> {
    let text = text.trim_start_matches('\u{feff}').trim();
    let rest = text
        .strip_prefix(BUCKET_VARIABLE)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or(CodecError::Prefix {
            expected: BUCKET_VARIABLE,
        })?;
    let rest = rest.trim();
    Ok(rest.strip_suffix(';').unwrap_or(rest).trim_end())
}

fn parse_record(index: usize, item: &Value) -> CodecResult<SearchRecord> {
    let parts = item
        .as_array()
        .ok_or_else(|| CodecError::shape(index, "record is not an array"))?;
    let [key, body] = parts.as_slice() else {
        return Err(CodecError::shape(
            index,
            format!("expected [key, [label, targets...]], found {} elements", parts.len()),
        ));
    };

    let key = key
        .as_str()
        .ok_or_else(|| CodecError::shape(index, "key is not a string"))?;
    let body = body
        .as_array()
        .ok_or_else(|| CodecError::shape(index, "record body is not an array"))?;
    let (label, targets) = body
        .split_first()
        .ok_or_else(|| CodecError::shape(index, "record body is empty"))?;
    let label = label
        .as_str()
        .ok_or_else(|| CodecError::shape(index, "label is not a string"))?;

    let targets = targets
        .iter()
        .map(|target| parse_target(index, target))
        .collect::<CodecResult<Vec<_>>>()?;

    Ok(SearchRecord::new(key, decode_entities(label), targets))
}

fn parse_target(index: usize, value: &Value) -> CodecResult<SearchTarget> {
    let parts = value
        .as_array()
        .ok_or_else(|| CodecError::shape(index, "target is not an array"))?;
    let [url, flag, scope] = parts.as_slice() else {
        return Err(CodecError::shape(
            index,
            format!("expected [url, flag, scope], found {} elements", parts.len()),
        ));
    };

    let url = url
        .as_str()
        .ok_or_else(|| CodecError::shape(index, "target url is not a string"))?;
    let flag = flag
        .as_u64()
        .ok_or_else(|| CodecError::shape(index, "target flag is not a number"))?;
    let scope = scope
        .as_str()
        .ok_or_else(|| CodecError::shape(index, "target scope is not a string"))?;

    Ok(SearchTarget {
        url: url.to_string(),
        local: flag != 0,
        scope: decode_entities(scope),
    })
}

/// Decode the HTML entities the generator writes into labels and scopes.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match candidate.find(';').and_then(|end| {
            entity_char(&candidate[1..end]).map(|ch| (ch, end))
        }) {
            Some((ch, end)) => {
                decoded.push(ch);
                rest = &candidate[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &candidate[1..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

fn entity_char(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// One section as listed in `searchdata.js`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSection {
    pub index: usize,
    pub name: String,
    pub label: String,
    /// First characters of the section's buckets, in bucket order.
    pub letters: String,
}

/// Parsed `searchdata.js`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchDataManifest {
    pub sections: Vec<ManifestSection>,
}

impl SearchDataManifest {
    pub fn section(&self, name: &str) -> Option<&ManifestSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Letter of bucket `index` in section `name`.
    pub fn letter(&self, name: &str, index: usize) -> Option<char> {
        self.section(name)?.letters.chars().nth(index)
    }
}

fn object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"var\s+(\w+)\s*=\s*\{([^}]*)\}").expect("static regex is valid")
    })
}

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(\d+)\s*:\s*"((?:[^"\\]|\\.)*)""#).expect("static regex is valid")
    })
}

/// Parse the `searchdata.js` manifest.
///
/// The objects use bare numeric keys, which JSON5 does not allow, so they
/// are matched with regular expressions instead.
pub fn parse_search_data(text: &str) -> CodecResult<SearchDataManifest> {
    let mut contents = None;
    let mut names = None;
    let mut labels = None;

    for object in object_pattern().captures_iter(text) {
        let entries: Vec<(usize, String)> = entry_pattern()
            .captures_iter(&object[2])
            .filter_map(|entry| {
                let index = entry[1].parse().ok()?;
                Some((index, unescape_js(&entry[2])))
            })
            .collect();
        match &object[1] {
            "indexSectionsWithContent" => contents = Some(entries),
            "indexSectionNames" => names = Some(entries),
            "indexSectionLabels" => labels = Some(entries),
            _ => {}
        }
    }

    let names = names.ok_or_else(|| CodecError::Manifest("missing indexSectionNames".into()))?;
    let contents = contents.unwrap_or_default();
    let labels = labels.unwrap_or_default();
    let lookup = |entries: &[(usize, String)], index: usize| {
        entries
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, v)| v.clone())
    };

    let mut sections: Vec<ManifestSection> = names
        .iter()
        .map(|(index, name)| ManifestSection {
            index: *index,
            name: name.clone(),
            label: lookup(&labels, *index).unwrap_or_else(|| name.clone()),
            letters: lookup(&contents, *index).unwrap_or_default(),
        })
        .collect();
    sections.sort_by_key(|s| s.index);

    Ok(SearchDataManifest { sections })
}

fn unescape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"var searchData=
[
  ['findptr_10',['FindPtr',['../classEoSparam.html#aea1cb8ba6fc2b81d1bb18066a7037614',1,'EoSparam::FindPtr()'],['../classParamReservoir.html#ad3bc919f6aa561ba96feb47dd698d42c',1,'ParamReservoir::FindPtr(const string &amp;varName)']]],
  ['fim_9',['FIM',['../OCPConst_8hpp.html#a85d0ea9a8068e5dbac07aa9d5f9b9a2a',1,'OCPConst.hpp']]]
];
"#;

    #[test]
    fn test_parse_bucket() {
        let records = parse_bucket(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);

        let find_ptr = &records[0];
        assert_eq!(find_ptr.key, "findptr_10");
        assert_eq!(find_ptr.label, "FindPtr");
        assert_eq!(find_ptr.targets.len(), 2);
        assert_eq!(find_ptr.targets[1].scope, "ParamReservoir::FindPtr(const string &varName)");
        assert!(find_ptr.targets[0].local);

        assert_eq!(records[1].targets[0].scope, "OCPConst.hpp");
    }

    #[test]
    fn test_missing_prefix() {
        let err = parse_bucket("[['a_0',['a',['../a.html',1,'']]]];").unwrap_err();
        assert!(matches!(err, CodecError::Prefix { .. }));
    }

    #[test]
    fn test_shape_error_names_record() {
        let text = "var searchData=[['a_0',['a',['../a.html',1,'']]],['b_1','oops']];";
        match parse_bucket(text) {
            Err(CodecError::Shape { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_literal() {
        let err = parse_bucket("var searchData=[['a_0',").unwrap_err();
        assert!(matches!(err, CodecError::Json5(_)));
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp;b"), "a &b");
        assert_eq!(decode_entities("f():&#160;x.cpp"), "f():\u{a0}x.cpp");
        assert_eq!(decode_entities("&lt;T&gt;"), "<T>");
        assert_eq!(decode_entities("&#x41;"), "A");
        assert_eq!(decode_entities("R&D; &bogus; &"), "R&D; &bogus; &");
    }

    #[test]
    fn test_parse_search_data() {
        let text = r#"var indexSectionsWithContent =
{
  0: "_abdfp",
  1: "bp"
};

var indexSectionNames =
{
  0: "all",
  1: "classes"
};

var indexSectionLabels =
{
  0: "All",
  1: "Classes"
};
"#;
        let manifest = parse_search_data(text).unwrap();
        assert_eq!(manifest.sections.len(), 2);
        assert_eq!(manifest.section("classes").unwrap().label, "Classes");
        assert_eq!(manifest.letter("all", 4), Some('p'));
        assert_eq!(manifest.letter("all", 9), None);
    }

    #[test]
    fn test_manifest_without_names() {
        assert!(matches!(
            parse_search_data("var indexSectionsWithContent = { 0: \"a\" };"),
            Err(CodecError::Manifest(_))
        ));
    }
}
