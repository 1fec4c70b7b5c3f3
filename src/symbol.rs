//! Symbols extracted from source files.
//!
//! Parsers produce [`RawSymbol`]s without ids; the indexer assigns
//! [`SymbolId`]s and [`FileId`]s once every file is parsed so the ordering
//! does not depend on thread scheduling.

use crate::types::{CompactString, FileId, Range, SymbolId, SymbolKind, Visibility, compact_string};
use serde::{Deserialize, Serialize};

/// A symbol as it comes out of a language parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSymbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Qualified enclosing scope, `ns::Outer::Inner`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Parameter list (plus qualifiers) for callables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Parameter types only, without names or default values. Declarations
    /// and definitions of the same overload agree on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_signature: Option<String>,
    pub range: Range,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    pub visibility: Visibility,
    /// True when the symbol carries a body (function definition, class body).
    pub is_definition: bool,
    /// Page id for [`SymbolKind::Page`] symbols.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

impl RawSymbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, range: Range) -> Self {
        Self {
            name: name.into(),
            kind,
            scope: None,
            signature: None,
            type_signature: None,
            range,
            doc_comment: None,
            visibility: Visibility::Public,
            is_definition: false,
            page_id: None,
        }
    }

    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope.filter(|s| !s.is_empty());
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_type_signature(mut self, type_signature: impl Into<String>) -> Self {
        self.type_signature = Some(type_signature.into());
        self
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc_comment = doc;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn definition(mut self, is_definition: bool) -> Self {
        self.is_definition = is_definition;
        self
    }

    /// `scope::name`, or just `name` at global scope.
    pub fn qualified_name(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{scope}::{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// An indexed symbol bound to its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub file_id: FileId,
    pub name: CompactString,
    pub kind: SymbolKind,
    pub scope: Option<CompactString>,
    pub signature: Option<CompactString>,
    pub type_signature: Option<CompactString>,
    pub range: Range,
    pub doc_comment: Option<Box<str>>,
    pub visibility: Visibility,
    pub is_definition: bool,
    pub page_id: Option<CompactString>,
}

impl Symbol {
    pub fn from_raw(id: SymbolId, file_id: FileId, raw: RawSymbol) -> Self {
        Self {
            id,
            file_id,
            name: compact_string(&raw.name),
            kind: raw.kind,
            scope: raw.scope.as_deref().map(compact_string),
            signature: raw.signature.as_deref().map(compact_string),
            type_signature: raw.type_signature.as_deref().map(compact_string),
            range: raw.range,
            doc_comment: raw.doc_comment.map(String::into_boxed_str),
            visibility: raw.visibility,
            is_definition: raw.is_definition,
            page_id: raw.page_id.as_deref().map(compact_string),
        }
    }

    pub fn qualified_name(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{scope}::{}", self.name),
            None => self.name.to_string(),
        }
    }

    /// Signature identifying the overload: the type-only form when the
    /// parser produced one, else the displayed parameter list.
    pub fn overload_signature(&self) -> Option<&str> {
        self.type_signature.as_deref().or(self.signature.as_deref())
    }

    pub fn is_documented(&self) -> bool {
        self.doc_comment
            .as_deref()
            .is_some_and(|doc| !doc.trim().is_empty())
    }
}
