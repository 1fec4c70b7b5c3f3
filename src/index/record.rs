//! Search-index records.
//!
//! A record is one `[key, [label, target, ...]]` tuple of a bucket file.
//! Strings are kept decoded in memory; entity encoding is a concern of the
//! codec.

use super::key::{search_stem, split_key};
use serde::{Deserialize, Serialize};

/// One link a record points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTarget {
    /// Page-relative url, `../classBulk.html#a03c2...`.
    pub url: String,
    /// The numeric flag of the tuple (`1` for pages of this site).
    pub local: bool,
    /// Owning-scope label used to disambiguate targets. May be empty.
    pub scope: String,
}

impl SearchTarget {
    pub fn new(url: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            local: true,
            scope: scope.into(),
        }
    }

    /// Page part of the url without the `#anchor`.
    pub fn page(&self) -> &str {
        self.url.split_once('#').map_or(self.url.as_str(), |(page, _)| page)
    }

    pub fn anchor(&self) -> Option<&str> {
        self.url.split_once('#').map(|(_, anchor)| anchor)
    }
}

/// A labelled entry of a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub key: String,
    pub label: String,
    pub targets: Vec<SearchTarget>,
}

impl SearchRecord {
    pub fn new(key: impl Into<String>, label: impl Into<String>, targets: Vec<SearchTarget>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            targets,
        }
    }

    /// Key without its ordinal. Falls back to the whole key when it has no
    /// numeric suffix.
    pub fn stem(&self) -> &str {
        split_key(&self.key).map_or(self.key.as_str(), |(stem, _)| stem)
    }

    pub fn ordinal(&self) -> Option<usize> {
        split_key(&self.key).map(|(_, ordinal)| ordinal)
    }

    /// The stem this record's label normalizes to.
    pub fn expected_stem(&self) -> String {
        search_stem(&self.label)
    }

    pub fn is_overloaded(&self) -> bool {
        self.targets.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_and_ordinal() {
        let record = SearchRecord::new(
            "paramcontrol_2ecpp_6",
            "ParamControl.cpp",
            vec![SearchTarget::new("../ParamControl_8cpp.html", "")],
        );
        assert_eq!(record.stem(), "paramcontrol_2ecpp");
        assert_eq!(record.ordinal(), Some(6));
        assert_eq!(record.expected_stem(), record.stem());
        assert!(!record.is_overloaded());
    }

    #[test]
    fn test_target_page_and_anchor() {
        let target = SearchTarget::new("../classRock.html#ab18455479725e43ef7c218862ca4dec3", "Rock");
        assert_eq!(target.page(), "../classRock.html");
        assert_eq!(target.anchor(), Some("ab18455479725e43ef7c218862ca4dec3"));

        let page_only = SearchTarget::new("../classRock.html", "");
        assert_eq!(page_only.page(), "../classRock.html");
        assert_eq!(page_only.anchor(), None);
    }
}
