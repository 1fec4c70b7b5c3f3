//! Page names and member anchors.
//!
//! Pages follow the generator's naming: compounds live on
//! `class<Name>.html`, files on `<Name_8ext>.html`, and members are
//! `#a<hash>` anchors on their owner's page.

use crate::types::SymbolKind;
use sha2::{Digest, Sha256};

/// Escape a name for use in a page file name.
pub fn escape_page_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() + 8);
    for ch in name.chars() {
        let replacement = match ch {
            '_' => "__",
            '.' => "_8",
            ':' => "_1",
            '/' => "_2",
            '<' => "_3",
            '>' => "_4",
            '*' => "_5",
            '&' => "_6",
            '|' => "_7",
            '!' => "_9",
            ',' => "_00",
            ' ' => "_01",
            '{' => "_02",
            '}' => "_03",
            '?' => "_04",
            '^' => "_05",
            '%' => "_06",
            '(' => "_07",
            ')' => "_08",
            '+' => "_09",
            '=' => "_0a",
            '$' => "_0b",
            '\\' => "_0c",
            '@' => "_0d",
            ']' => "_0e",
            '[' => "_0f",
            '#' => "_0g",
            '"' => "_0h",
            '~' => "_0i",
            '\'' => "_0j",
            ';' => "_0k",
            '`' => "_0l",
            other => {
                escaped.push(other);
                continue;
            }
        };
        escaped.push_str(replacement);
    }
    escaped
}

/// Page for a compound with the given qualified name.
///
/// Returns `None` for kinds that never own a page of their own.
pub fn compound_page(kind: SymbolKind, qualified_name: &str) -> Option<String> {
    let prefix = match kind {
        SymbolKind::Class => "class",
        SymbolKind::Struct => "struct",
        SymbolKind::Union => "union",
        SymbolKind::Namespace => "namespace",
        _ => return None,
    };
    Some(format!("{prefix}{}.html", escape_page_name(qualified_name)))
}

/// Page for a source file, keyed by its display name (`DenseMat.cpp`).
pub fn file_page(display_name: &str) -> String {
    format!("{}.html", escape_page_name(display_name))
}

/// Page for a markdown/dox page id.
pub fn document_page(page_id: &str) -> String {
    format!("{page_id}.html")
}

/// Anchor of a member: `a` followed by 32 hex digits.
///
/// Derived from the qualified name and the parameter types only (see
/// [`Symbol::overload_signature`](crate::symbol::Symbol::overload_signature)),
/// so the declaration in a header and the definition in a source file share
/// an anchor even when their parameter names or defaults differ.
pub fn member_anchor(qualified_name: &str, signature: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(qualified_name.as_bytes());
    if let Some(signature) = signature {
        hasher.update(signature.as_bytes());
    }
    let digest = hasher.finalize();

    let mut anchor = String::with_capacity(33);
    anchor.push('a');
    for byte in &digest[..16] {
        anchor.push_str(&format!("{byte:02x}"));
    }
    anchor
}

/// `../page.html#anchor`
pub fn link(prefix: &str, page: &str, anchor: Option<&str>) -> String {
    match anchor {
        Some(anchor) => format!("{prefix}{page}#{anchor}"),
        None => format!("{prefix}{page}"),
    }
}
