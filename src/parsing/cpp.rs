//! C and C++ symbol extraction on top of tree-sitter.
//!
//! The walker collects the entities the documentation index cares about:
//! compounds (classes, structs, unions, namespaces), enums with their
//! values, typedefs, functions and methods, variables and fields, and
//! value-carrying macros. Function bodies are never entered.

use crate::parsing::{Language, LanguageParser, ParsedSource};
use crate::symbol::RawSymbol;
use crate::types::{Range, SymbolKind, Visibility};
use crate::utils::normalize_whitespace;
use tree_sitter::{Node, Parser};

/// Marker prefixes stripped from each comment line, longest first.
const COMMENT_PREFIXES: &[&str] = &[
    "///<", "//!<", "/**<", "/*!<", "///", "//!", "/**", "/*!", "//", "/*",
];

/// Prefixes of comments documenting the member on their left.
const TRAILING_DOC_PREFIXES: &[&str] = &["///<", "//!<", "/**<", "/*!<"];

pub struct CppParser {
    parser: Parser,
    language: Language,
    extract_private: bool,
}

impl std::fmt::Debug for CppParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CppParser")
            .field("language", &self.language.name())
            .field("extract_private", &self.extract_private)
            .finish()
    }
}

/// What a declarator names once pointers, references and initializers are
/// peeled off.
#[derive(Debug, PartialEq)]
enum Declarator {
    Function {
        name: String,
        qualifier: Option<String>,
        parameters: String,
        type_parameters: String,
    },
    Variable {
        name: String,
        qualifier: Option<String>,
    },
}

impl CppParser {
    pub fn new() -> Result<Self, String> {
        Self::with_grammar(Language::Cpp, tree_sitter_cpp::LANGUAGE.into())
    }

    /// Parser for plain C sources.
    pub fn new_c() -> Result<Self, String> {
        Self::with_grammar(Language::C, tree_sitter_c::LANGUAGE.into())
    }

    fn with_grammar(language: Language, grammar: tree_sitter::Language) -> Result<Self, String> {
        let mut parser = Parser::new();
        parser
            .set_language(&grammar)
            .map_err(|e| format!("Failed to set {} language: {e}", language.name()))?;

        Ok(Self {
            parser,
            language,
            extract_private: false,
        })
    }

    /// Keep private and protected-private members instead of dropping them.
    pub fn extract_private(mut self, extract_private: bool) -> Self {
        self.extract_private = extract_private;
        self
    }

    fn emit(&self, symbol: RawSymbol, out: &mut Vec<RawSymbol>) {
        if self.extract_private || symbol.visibility != Visibility::Private {
            out.push(symbol);
        }
    }

    fn visible(&self, access: Visibility) -> bool {
        self.extract_private || access != Visibility::Private
    }

    /// Walk namespace-level declarations.
    fn walk_scope(&self, node: Node, code: &str, scope: &[String], out: &mut Vec<RawSymbol>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "namespace_definition" => self.namespace(child, code, scope, out),
                "class_specifier" | "struct_specifier" | "union_specifier" => {
                    self.compound(child, code, scope, Visibility::Public, out);
                }
                "enum_specifier" => self.enumeration(child, code, scope, Visibility::Public, out),
                "function_definition" => self.function(child, code, scope, None, out),
                "declaration" => self.declaration(child, code, scope, None, out),
                "type_definition" => self.typedef(child, code, scope, Visibility::Public, out),
                "alias_declaration" => self.alias(child, code, scope, Visibility::Public, out),
                "preproc_def" | "preproc_function_def" => self.define(child, code, out),
                "template_declaration"
                | "linkage_specification"
                | "declaration_list"
                | "preproc_if"
                | "preproc_ifdef"
                | "preproc_else"
                | "preproc_elif"
                | "preproc_elifdef" => self.walk_scope(child, code, scope, out),
                _ => {}
            }
        }
    }

    fn namespace(&self, node: Node, code: &str, scope: &[String], out: &mut Vec<RawSymbol>) {
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        let Some(name_node) = node.child_by_field_name("name") else {
            // Anonymous namespace: contents belong to the enclosing scope.
            self.walk_scope(body, code, scope, out);
            return;
        };

        let mut inner = scope.to_vec();
        for part in node_text(name_node, code).split("::").map(str::trim) {
            if part.is_empty() {
                continue;
            }
            let symbol = RawSymbol::new(part, SymbolKind::Namespace, range_of(node))
                .with_scope(join_scope(&inner))
                .with_doc(doc_comment(node, code))
                .definition(true);
            self.emit(symbol, out);
            inner.push(part.to_string());
        }
        self.walk_scope(body, code, &inner, out);
    }

    /// Class, struct or union with a body. Forward declarations are ignored.
    fn compound(
        &self,
        node: Node,
        code: &str,
        scope: &[String],
        visibility: Visibility,
        out: &mut Vec<RawSymbol>,
    ) -> Option<Vec<String>> {
        let body = node.child_by_field_name("body")?;
        let name_node = node.child_by_field_name("name")?;
        if !self.visible(visibility) {
            return None;
        }

        let (kind, default_access) = match node.kind() {
            "class_specifier" => (SymbolKind::Class, Visibility::Private),
            "union_specifier" => (SymbolKind::Union, Visibility::Public),
            _ => (SymbolKind::Struct, Visibility::Public),
        };

        let (name, qualifier) = split_qualified(node_text(name_node, code));
        let mut outer = scope.to_vec();
        outer.extend(qualifier.iter().flat_map(|q| q.split("::").map(str::to_string)));

        let symbol = RawSymbol::new(name.clone(), kind, range_of(node))
            .with_scope(join_scope(&outer))
            .with_doc(doc_comment(node, code))
            .with_visibility(visibility)
            .definition(true);
        self.emit(symbol, out);

        outer.push(name);
        self.members(body, code, &outer, default_access, out);
        Some(outer)
    }

    /// Walk a class body, tracking access specifiers.
    fn members(
        &self,
        body: Node,
        code: &str,
        scope: &[String],
        default_access: Visibility,
        out: &mut Vec<RawSymbol>,
    ) {
        let mut access = default_access;
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            if child.kind() == "access_specifier" {
                access = parse_access(node_text(child, code)).unwrap_or(access);
            } else {
                self.member(child, code, scope, access, out);
            }
        }
    }

    fn member(
        &self,
        node: Node,
        code: &str,
        scope: &[String],
        access: Visibility,
        out: &mut Vec<RawSymbol>,
    ) {
        match node.kind() {
            "field_declaration" | "declaration" => {
                self.declaration(node, code, scope, Some(access), out);
            }
            "function_definition" => self.function(node, code, scope, Some(access), out),
            "class_specifier" | "struct_specifier" | "union_specifier" => {
                self.compound(node, code, scope, access, out);
            }
            "enum_specifier" => self.enumeration(node, code, scope, access, out),
            "type_definition" => self.typedef(node, code, scope, access, out),
            "alias_declaration" => self.alias(node, code, scope, access, out),
            "template_declaration" => {
                let mut cursor = node.walk();
                for inner in node.named_children(&mut cursor) {
                    self.member(inner, code, scope, access, out);
                }
            }
            "preproc_if" | "preproc_ifdef" | "preproc_else" | "preproc_elif" => {
                self.members(node, code, scope, access, out);
            }
            _ => {}
        }
    }

    /// Declarations: prototypes, member declarations, variables and fields.
    /// `access` is `Some` inside a class body.
    fn declaration(
        &self,
        node: Node,
        code: &str,
        scope: &[String],
        access: Option<Visibility>,
        out: &mut Vec<RawSymbol>,
    ) {
        let visibility = access.unwrap_or(Visibility::Public);

        // `struct Foo { ... } foo;` and nested type definitions.
        if let Some(ty) = node.child_by_field_name("type") {
            match ty.kind() {
                "class_specifier" | "struct_specifier" | "union_specifier" => {
                    self.compound(ty, code, scope, visibility, out);
                }
                "enum_specifier" => self.enumeration(ty, code, scope, visibility, out),
                _ => {}
            }
        }
        if !self.visible(visibility) {
            return;
        }

        let doc = doc_comment(node, code);
        let mut cursor = node.walk();
        let declarators: Vec<Node> = node.children_by_field_name("declarator", &mut cursor).collect();
        for declarator in declarators {
            let Some(declared) = analyze_declarator(declarator, code) else {
                continue;
            };
            let symbol = match declared {
                Declarator::Function {
                    name,
                    qualifier,
                    parameters,
                    type_parameters,
                } => {
                    let member = access.is_some() || qualifier.is_some();
                    let kind = if member && self.language == Language::Cpp {
                        SymbolKind::Method
                    } else {
                        SymbolKind::Function
                    };
                    RawSymbol::new(name, kind, range_of(node))
                        .with_scope(qualified_scope(scope, qualifier))
                        .with_signature(parameters)
                        .with_type_signature(type_parameters)
                }
                Declarator::Variable { name, qualifier } => {
                    let kind = if access.is_some() || qualifier.is_some() {
                        SymbolKind::Field
                    } else {
                        SymbolKind::Variable
                    };
                    // A variable declaration initialised in place is a definition.
                    let defined = access.is_none() && declarator.kind() == "init_declarator";
                    RawSymbol::new(name, kind, range_of(node))
                        .with_scope(qualified_scope(scope, qualifier))
                        .definition(defined)
                }
            };
            self.emit(symbol.with_doc(doc.clone()).with_visibility(visibility), out);
        }
    }

    fn function(
        &self,
        node: Node,
        code: &str,
        scope: &[String],
        access: Option<Visibility>,
        out: &mut Vec<RawSymbol>,
    ) {
        let visibility = access.unwrap_or(Visibility::Public);
        let Some(declarator) = node.child_by_field_name("declarator") else {
            return;
        };
        let Some(Declarator::Function {
            name,
            qualifier,
            parameters,
            type_parameters,
        }) = analyze_declarator(declarator, code)
        else {
            return;
        };

        let member = access.is_some() || qualifier.is_some();
        let kind = if member && self.language == Language::Cpp {
            SymbolKind::Method
        } else {
            SymbolKind::Function
        };
        let symbol = RawSymbol::new(name, kind, range_of(node))
            .with_scope(qualified_scope(scope, qualifier))
            .with_signature(parameters)
            .with_type_signature(type_parameters)
            .with_doc(doc_comment(node, code))
            .with_visibility(visibility)
            .definition(true);
        self.emit(symbol, out);
    }

    fn enumeration(
        &self,
        node: Node,
        code: &str,
        scope: &[String],
        visibility: Visibility,
        out: &mut Vec<RawSymbol>,
    ) {
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        if !self.visible(visibility) {
            return;
        }

        if let Some(name_node) = node.child_by_field_name("name") {
            let symbol = RawSymbol::new(node_text(name_node, code), SymbolKind::Enum, range_of(node))
                .with_scope(join_scope(scope))
                .with_doc(doc_comment(node, code))
                .with_visibility(visibility)
                .definition(true);
            self.emit(symbol, out);
        }

        let mut cursor = body.walk();
        for value in body.named_children(&mut cursor) {
            if value.kind() != "enumerator" {
                continue;
            }
            let Some(name_node) = value.child_by_field_name("name") else {
                continue;
            };
            let symbol = RawSymbol::new(node_text(name_node, code), SymbolKind::Enumerator, range_of(value))
                .with_scope(join_scope(scope))
                .with_doc(doc_comment(value, code))
                .with_visibility(visibility)
                .definition(true);
            self.emit(symbol, out);
        }
    }

    fn typedef(
        &self,
        node: Node,
        code: &str,
        scope: &[String],
        visibility: Visibility,
        out: &mut Vec<RawSymbol>,
    ) {
        if let Some(ty) = node.child_by_field_name("type") {
            match ty.kind() {
                "class_specifier" | "struct_specifier" | "union_specifier" => {
                    self.compound(ty, code, scope, visibility, out);
                }
                "enum_specifier" => self.enumeration(ty, code, scope, visibility, out),
                _ => {}
            }
        }
        if !self.visible(visibility) {
            return;
        }

        let doc = doc_comment(node, code);
        let mut cursor = node.walk();
        let declarators: Vec<Node> = node.children_by_field_name("declarator", &mut cursor).collect();
        for declarator in declarators {
            let name = match analyze_declarator(declarator, code) {
                Some(Declarator::Variable { name, .. }) | Some(Declarator::Function { name, .. }) => name,
                None => continue,
            };
            let symbol = RawSymbol::new(name, SymbolKind::Typedef, range_of(node))
                .with_scope(join_scope(scope))
                .with_doc(doc.clone())
                .with_visibility(visibility)
                .definition(true);
            self.emit(symbol, out);
        }
    }

    /// `using Name = Type;`
    fn alias(
        &self,
        node: Node,
        code: &str,
        scope: &[String],
        visibility: Visibility,
        out: &mut Vec<RawSymbol>,
    ) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let symbol = RawSymbol::new(node_text(name_node, code), SymbolKind::Typedef, range_of(node))
            .with_scope(join_scope(scope))
            .with_doc(doc_comment(node, code))
            .with_visibility(visibility)
            .definition(true);
        self.emit(symbol, out);
    }

    /// Macros are file-scoped. Object-like macros without a value
    /// (include guards, feature flags) are skipped.
    fn define(&self, node: Node, code: &str, out: &mut Vec<RawSymbol>) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name_node, code);
        let mut symbol = RawSymbol::new(name, SymbolKind::Define, range_of(node))
            .with_doc(doc_comment(node, code))
            .definition(true);

        if node.kind() == "preproc_function_def" {
            if let Some(params) = node.child_by_field_name("parameters") {
                symbol = symbol.with_signature(normalize_parameters(node_text(params, code)));
            }
        } else {
            let has_value = node
                .child_by_field_name("value")
                .is_some_and(|value| !node_text(value, code).trim().is_empty());
            if !has_value {
                return;
            }
        }
        self.emit(symbol, out);
    }
}

impl LanguageParser for CppParser {
    fn parse(&mut self, code: &str) -> ParsedSource {
        let Some(tree) = self.parser.parse(code, None) else {
            return ParsedSource::default();
        };
        let root = tree.root_node();

        let mut symbols = Vec::new();
        self.walk_scope(root, code, &[], &mut symbols);

        ParsedSource {
            symbols,
            file_doc: file_doc(root, code),
        }
    }

    fn language(&self) -> Language {
        self.language
    }
}

fn node_text<'a>(node: Node, code: &'a str) -> &'a str {
    &code[node.byte_range()]
}

fn range_of(node: Node) -> Range {
    let start = node.start_position();
    let end = node.end_position();
    Range::new(
        start.row as u32,
        start.column.min(u16::MAX as usize) as u16,
        end.row as u32,
        end.column.min(u16::MAX as usize) as u16,
    )
}

fn join_scope(scope: &[String]) -> Option<String> {
    if scope.is_empty() {
        None
    } else {
        Some(scope.join("::"))
    }
}

fn qualified_scope(scope: &[String], qualifier: Option<String>) -> Option<String> {
    let mut parts = scope.to_vec();
    if let Some(qualifier) = qualifier {
        parts.extend(qualifier.split("::").map(str::to_string));
    }
    join_scope(&parts)
}

fn parse_access(text: &str) -> Option<Visibility> {
    let text = text.trim_start();
    if text.starts_with("public") {
        Some(Visibility::Public)
    } else if text.starts_with("protected") {
        Some(Visibility::Protected)
    } else if text.starts_with("private") {
        Some(Visibility::Private)
    } else {
        None
    }
}

/// Remove `<...>` template argument lists, keeping `operator<` style names intact.
fn strip_template_args(text: &str) -> String {
    if text.contains("operator") {
        return text.to_string();
    }
    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// `A::B::name` into (`name`, `Some("A::B")`).
fn split_qualified(text: &str) -> (String, Option<String>) {
    let cleaned = normalize_whitespace(&strip_template_args(text)).replace(" :: ", "::");
    let cleaned = cleaned.trim_start_matches("::");
    // `operator::` does not occur, so the last separator ends the qualifier.
    match cleaned.rfind("::") {
        Some(pos) => {
            let qualifier = &cleaned[..pos];
            let name = cleaned[pos + 2..].to_string();
            (name, (!qualifier.is_empty()).then(|| qualifier.to_string()))
        }
        None => (cleaned.to_string(), None),
    }
}

fn name_of(node: Node, code: &str) -> Option<(String, Option<String>)> {
    match node.kind() {
        "identifier" | "field_identifier" | "type_identifier" | "destructor_name" | "operator_name"
        | "primitive_type" => Some((normalize_whitespace(node_text(node, code)), None)),
        "qualified_identifier" => Some(split_qualified(node_text(node, code))),
        "template_function" | "template_method" => {
            let name = node.child_by_field_name("name")?;
            name_of(name, code)
        }
        _ => None,
    }
}

/// The declarator nested inside a wrapper such as `*x`, `&x`, `x[4]` or `x = 1`.
fn inner_declarator(node: Node) -> Option<Node> {
    node.child_by_field_name("declarator").or_else(|| {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .last()
    })
}

fn analyze_declarator(node: Node, code: &str) -> Option<Declarator> {
    let mut current = node;
    loop {
        if current.kind() == "function_declarator" {
            let inner = current.child_by_field_name("declarator")?;
            let Some((name, qualifier)) = name_of(inner, code) else {
                // `(*callback)(int)` declares a pointer, not a function.
                return innermost_name(inner, code)
                    .map(|(name, qualifier)| Declarator::Variable { name, qualifier });
            };
            let (mut parameters, mut type_parameters) = current
                .child_by_field_name("parameters")
                .map(|params| format_parameters(params, code))
                .unwrap_or_else(|| ("()".to_string(), "()".to_string()));

            let mut cursor = current.walk();
            let is_const = current
                .children(&mut cursor)
                .any(|child| child.kind() == "type_qualifier" && node_text(child, code) == "const");
            if is_const {
                parameters.push_str(" const");
                type_parameters.push_str(" const");
            }
            return Some(Declarator::Function {
                name,
                qualifier,
                parameters,
                type_parameters,
            });
        }

        if let Some((name, qualifier)) = name_of(current, code) {
            return Some(Declarator::Variable { name, qualifier });
        }

        match current.kind() {
            "pointer_declarator"
            | "reference_declarator"
            | "array_declarator"
            | "init_declarator"
            | "parenthesized_declarator"
            | "attributed_declarator"
            | "bitfield_clause" => current = inner_declarator(current)?,
            _ => return None,
        }
    }
}

fn innermost_name(node: Node, code: &str) -> Option<(String, Option<String>)> {
    let mut current = node;
    loop {
        if let Some(found) = name_of(current, code) {
            return Some(found);
        }
        current = inner_declarator(current)?;
    }
}

/// Render a parameter list in the generator's spelling
/// (`(const int &n, vector< string > &result, bool flag=false)`), together
/// with the same list reduced to types (`(const int &, vector< string > &, bool)`).
fn format_parameters(list: Node, code: &str) -> (String, String) {
    let mut shown = Vec::new();
    let mut types = Vec::new();
    let mut cursor = list.walk();
    for param in list.children(&mut cursor) {
        if matches!(param.kind(), "(" | ")" | "," | "comment") {
            continue;
        }
        let (display, ty) = format_parameter(param, code);
        shown.push(display);
        types.push(ty);
    }
    (format!("({})", shown.join(", ")), format!("({})", types.join(", ")))
}

fn format_parameter(param: Node, code: &str) -> (String, String) {
    let declarator = param.child_by_field_name("declarator");
    let default = param
        .child_by_field_name("default_value")
        .map(|value| normalize_whitespace(node_text(value, code)));
    let base_end = declarator
        .or_else(|| param.child_by_field_name("default_value"))
        .map_or(param.end_byte(), |node| node.start_byte());
    let base = code[param.start_byte()..base_end].trim().trim_end_matches('=');
    let base = template_spacing(&normalize_whitespace(base));

    let with_default = |text: String| match &default {
        Some(value) => format!("{text}={value}"),
        None => text,
    };

    let Some(declarator) = declarator else {
        return (with_default(base.clone()), base);
    };

    let (before, name, after) = match declared_identifier(declarator) {
        Some(ident) => (
            &code[declarator.start_byte()..ident.start_byte()],
            node_text(ident, code),
            &code[ident.end_byte()..declarator.end_byte()],
        ),
        None => (node_text(declarator, code), "", ""),
    };
    let before = bind_pointer_marks(before);
    let after = template_spacing(&normalize_whitespace(after));

    let mut shown = base.clone();
    let mut ty = base;
    if !before.is_empty() || !name.is_empty() {
        shown.push(' ');
    }
    shown.push_str(&before);
    if !name.is_empty() && before.ends_with(|c: char| c.is_alphanumeric()) {
        shown.push(' ');
    }
    shown.push_str(name);
    shown.push_str(&after);

    if !before.is_empty() || !after.is_empty() {
        ty.push(' ');
        ty.push_str(&before);
        ty.push_str(&after);
    }
    (with_default(shown), ty)
}

/// The parameter name inside a declarator, if it has one.
fn declared_identifier(node: Node) -> Option<Node> {
    let mut current = node;
    loop {
        if current.kind() == "identifier" {
            return Some(current);
        }
        current = inner_declarator(current)?;
    }
}

/// `* const ` -> `*const`, `& ` -> `&`: marks attach to what follows.
fn bind_pointer_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in normalize_whitespace(text).chars() {
        if ch == ' ' && out.ends_with(['*', '&']) {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Space template brackets: `map<int, vector<int>>` -> `map< int, vector< int > >`.
fn template_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("< "),
            '>' => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
                out.push('>');
            }
            ' ' if out.ends_with(' ') => {}
            _ => out.push(ch),
        }
    }
    out.trim().to_string()
}

fn normalize_parameters(text: &str) -> String {
    normalize_whitespace(text)
        .replace("( ", "(")
        .replace(" )", ")")
        .replace(" ,", ",")
}

fn is_doc_comment(text: &str) -> bool {
    (text.starts_with("///") && !text.starts_with("////"))
        || text.starts_with("//!")
        || (text.starts_with("/**") && !text.starts_with("/**/"))
        || text.starts_with("/*!")
}

fn is_trailing_doc(text: &str) -> bool {
    TRAILING_DOC_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

/// Strip comment markers and decoration, keeping line structure.
fn clean_comment(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_suffix("*/").unwrap_or(text);
    text.lines()
        .map(|line| {
            let line = line.trim();
            let line = COMMENT_PREFIXES
                .iter()
                .find_map(|prefix| line.strip_prefix(prefix))
                .unwrap_or(line);
            line.trim_start_matches('*').trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Documentation attached to a declaration: the contiguous block of doc
/// comments right above it, or a `//!<` comment on its last line.
fn doc_comment(node: Node, code: &str) -> Option<String> {
    // Template parameters sit between the comment and the entity.
    let anchor = match node.parent() {
        Some(parent) if parent.kind() == "template_declaration" => parent,
        _ => node,
    };

    let mut blocks = Vec::new();
    let mut expected_row = anchor.start_position().row;
    let mut sibling = anchor.prev_sibling();
    while let Some(prev) = sibling {
        if prev.kind() != "comment" || prev.end_position().row + 1 < expected_row {
            break;
        }
        let text = node_text(prev, code);
        if !is_doc_comment(text) || is_trailing_doc(text) {
            break;
        }
        blocks.push(clean_comment(text));
        expected_row = prev.start_position().row;
        sibling = prev.prev_sibling();
    }

    if !blocks.is_empty() {
        blocks.reverse();
        let doc = blocks.join("\n");
        return (!doc.is_empty()).then_some(doc);
    }

    // Trailing comments can follow the terminating `,` or `;` token.
    let mut next = node.next_sibling();
    while let Some(candidate) = next {
        if candidate.start_position().row != node.end_position().row {
            break;
        }
        if candidate.kind() == "comment" {
            let text = node_text(candidate, code);
            if is_trailing_doc(text) {
                let doc = clean_comment(text);
                return (!doc.is_empty()).then_some(doc);
            }
            break;
        }
        next = candidate.next_sibling();
    }
    None
}

/// Brief of the top-level comment carrying a `\file` command.
fn file_doc(root: Node, code: &str) -> Option<String> {
    let mut cursor = root.walk();
    let comment = root
        .children(&mut cursor)
        .filter(|child| child.kind() == "comment")
        .map(|child| node_text(child, code))
        .find(|text| is_doc_comment(text) && (text.contains("\\file") || text.contains("@file")))?;

    let cleaned = clean_comment(comment);
    let brief = cleaned.lines().find_map(|line| {
        line.strip_prefix("\\brief")
            .or_else(|| line.strip_prefix("@brief"))
            .map(str::trim)
    });
    match brief {
        Some(brief) if !brief.is_empty() => Some(brief.to_string()),
        _ => {
            let rest: Vec<&str> = cleaned
                .lines()
                .filter(|line| !line.starts_with("\\file") && !line.starts_with("@file"))
                .filter(|line| line.chars().any(char::is_alphanumeric))
                .collect();
            (!rest.is_empty()).then(|| rest.join("\n"))
        }
    }
}
