//! Span-tracking scanner for TS/TSX registry sources.
//!
//! The structural transforms (icon rewriting, import path rewriting) need
//! to locate import statements and JSX elements without being fooled by
//! comments, string literals, or template literals. This scanner walks the
//! source once, skipping those regions, and reports the constructs it finds
//! with byte spans so callers can splice replacement text back into the
//! original source.
//!
//! It is deliberately not a full parser: it understands exactly as much
//! syntax as the transforms need (import clauses, one JSX element shape,
//! attribute lists) and treats everything else as opaque text.

use std::fmt;

/// Half-open byte range into the scanned source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Scan failure with the line it happened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub message: String,
    pub line: u32,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.message, self.line)
    }
}

impl std::error::Error for ScanError {}

/// One named binding of an import clause (`A` or `A as B`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub name: String,
    pub alias: Option<String>,
}

impl ImportBinding {
    /// The identifier the binding introduces into scope.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// One static import or re-export statement with a module specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// Full statement span, including the trailing `;` when present.
    pub span: Span,
    /// Module specifier text, without quotes.
    pub specifier: String,
    /// Span of the specifier text between the quotes.
    pub specifier_span: Span,
    /// Default import name, if any.
    pub default: Option<String>,
    /// Namespace import name (`* as ns`), if any.
    pub namespace: Option<String>,
    /// Named bindings, if any.
    pub named: Vec<ImportBinding>,
    /// Whether this is a type-only import.
    pub type_only: bool,
    /// Whether this is a re-export (`export ... from "spec"`), which
    /// references the specifier without introducing local bindings.
    pub reexport: bool,
}

impl ImportStatement {
    /// Whether the clause binds the given local identifier.
    pub fn binds(&self, local: &str) -> bool {
        self.default.as_deref() == Some(local)
            || self.namespace.as_deref() == Some(local)
            || self.named.iter().any(|b| b.local_name() == local)
    }
}

/// One JSX attribute, kept mostly as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxAttribute {
    pub name: String,
    /// Span of the whole attribute (name through value).
    pub span: Span,
    /// For `name="literal"` attributes, the unquoted literal.
    pub string_value: Option<String>,
}

/// One JSX element with a specific tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxElement {
    /// Full element span (`<Tag ...>` through `</Tag>`, or the
    /// self-closing tag).
    pub span: Span,
    /// Span of the tag name in the opening tag.
    pub name_span: Span,
    /// Span of the tag name in the closing tag, when not self-closing.
    pub close_name_span: Option<Span>,
    pub attributes: Vec<JsxAttribute>,
    pub self_closing: bool,
}

impl JsxElement {
    /// Find an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&JsxAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// Character-walking scanner over one source text.
struct Scanner<'a> {
    source: &'a str,
    /// Byte offset and char for each source character.
    chars: Vec<(usize, char)>,
    /// Index into `chars`.
    current: usize,
    /// Current line number (1-indexed).
    line: u32,
    /// Last non-trivia char seen at statement level, for keyword context.
    prev_significant: Option<char>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            current: 0,
            line: 1,
            prev_significant: None,
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.current).map(|&(_, c)| c)
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).map(|&(_, c)| c)
    }

    /// Byte offset of the next character (source length at end).
    fn byte_pos(&self) -> usize {
        self.chars
            .get(self.current)
            .map(|&(i, _)| i)
            .unwrap_or(self.source.len())
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> ScanError {
        ScanError {
            message: message.into(),
            line: self.line,
        }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ScanError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('*') => {
                    let start_line = self.line;
                    self.advance();
                    self.advance();
                    loop {
                        match self.peek() {
                            None => {
                                return Err(ScanError {
                                    message: "unterminated block comment".to_string(),
                                    line: start_line,
                                });
                            }
                            Some('*') if self.peek_next() == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            _ => {
                                self.advance();
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Skip a string body after its opening quote was consumed.
    fn skip_string(&mut self, quote: char) -> Result<(), ScanError> {
        loop {
            match self.advance() {
                None => return Err(self.error("unterminated string literal")),
                Some('\\') => {
                    self.advance();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// Skip a template literal body after the opening backtick was consumed.
    fn skip_template(&mut self) -> Result<(), ScanError> {
        loop {
            match self.advance() {
                None => return Err(self.error("unterminated template literal")),
                Some('\\') => {
                    self.advance();
                }
                Some('`') => return Ok(()),
                Some('$') if self.peek() == Some('{') => {
                    self.advance();
                    self.skip_braced()?;
                }
                Some(_) => {}
            }
        }
    }

    /// Skip to the `}` matching an already-consumed `{`, honouring nested
    /// braces, strings, templates, and comments.
    fn skip_braced(&mut self) -> Result<(), ScanError> {
        let mut depth = 1usize;
        while depth > 0 {
            self.skip_trivia()?;
            match self.advance() {
                None => return Err(self.error("unterminated '{'")),
                Some('{') => depth += 1,
                Some('}') => depth -= 1,
                Some('"') => self.skip_string('"')?,
                Some('\'') => self.skip_string('\'')?,
                Some('`') => self.skip_template()?,
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    /// Read a quoted string literal, returning (content, content span).
    fn read_string_literal(&mut self) -> Result<(String, Span), ScanError> {
        let quote = match self.advance() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error("expected string literal")),
        };
        let start = self.byte_pos();
        let mut end = start;
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string literal")),
                Some('\\') => {
                    self.advance();
                    self.advance();
                    end = self.byte_pos();
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                    end = self.byte_pos();
                }
            }
        }
        Ok((self.source[start..end].to_string(), Span { start, end }))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

/// Scan every static import statement in the source.
pub fn scan_imports(source: &str) -> Result<Vec<ImportStatement>, ScanError> {
    let mut s = Scanner::new(source);
    let mut imports = Vec::new();

    while !s.is_at_end() {
        match s.peek() {
            Some(c) if c.is_whitespace() => {
                s.advance();
            }
            Some('/') if matches!(s.peek_next(), Some('/') | Some('*')) => {
                s.skip_trivia()?;
            }
            Some('"') => {
                s.advance();
                s.skip_string('"')?;
                s.prev_significant = Some('"');
            }
            Some('\'') => {
                s.advance();
                s.skip_string('\'')?;
                s.prev_significant = Some('\'');
            }
            Some('`') => {
                s.advance();
                s.skip_template()?;
                s.prev_significant = Some('`');
            }
            Some(c) if is_ident_start(c) => {
                let start = s.byte_pos();
                let ident = s.read_identifier();
                // `a.import` is member access, not a statement keyword.
                if ident == "import" && s.prev_significant != Some('.') {
                    if let Some(import) = parse_import_tail(&mut s, start)? {
                        imports.push(import);
                    }
                } else if ident == "export" && s.prev_significant != Some('.') {
                    // Speculative: `export` is only interesting when a
                    // `from "spec"` clause follows.
                    let checkpoint = (s.current, s.line);
                    match parse_reexport_tail(&mut s, start)? {
                        Some(import) => imports.push(import),
                        None => {
                            s.current = checkpoint.0;
                            s.line = checkpoint.1;
                        }
                    }
                }
                s.prev_significant = ident.chars().last();
            }
            Some(c) => {
                s.advance();
                s.prev_significant = Some(c);
            }
            None => break,
        }
    }

    Ok(imports)
}

/// Parse the remainder of an import statement after the keyword.
///
/// Returns `None` for dynamic `import(...)` expressions, which are left
/// untouched.
fn parse_import_tail(
    s: &mut Scanner<'_>,
    start: usize,
) -> Result<Option<ImportStatement>, ScanError> {
    s.skip_trivia()?;

    if s.peek() == Some('(') {
        return Ok(None);
    }

    let mut default = None;
    let mut namespace = None;
    let mut named = Vec::new();
    let mut type_only = false;

    // Side-effect import: import "spec";
    if matches!(s.peek(), Some('"') | Some('\'')) {
        let (specifier, specifier_span) = s.read_string_literal()?;
        let end = finish_statement(s);
        return Ok(Some(ImportStatement {
            span: Span { start, end },
            specifier,
            specifier_span,
            default,
            namespace,
            named,
            type_only,
            reexport: false,
        }));
    }

    if s.peek().map(is_ident_start).unwrap_or(false) {
        let ident = s.read_identifier();
        s.skip_trivia()?;
        if ident == "type" && matches!(s.peek(), Some('{') | Some('*')) {
            type_only = true;
        } else if ident == "type" && s.peek().map(is_ident_start).unwrap_or(false) {
            type_only = true;
            default = Some(s.read_identifier());
            s.skip_trivia()?;
        } else {
            default = Some(ident);
        }
        if default.is_some() && s.match_char(',') {
            s.skip_trivia()?;
        }
    }

    if s.peek() == Some('*') {
        s.advance();
        s.skip_trivia()?;
        let as_kw = s.read_identifier();
        if as_kw != "as" {
            return Err(s.error("expected 'as' after '*' in import clause"));
        }
        s.skip_trivia()?;
        namespace = Some(s.read_identifier());
        s.skip_trivia()?;
    } else if s.peek() == Some('{') {
        s.advance();
        named = parse_named_bindings(s)?;
        s.skip_trivia()?;
    }

    let from_kw = s.read_identifier();
    if from_kw != "from" {
        return Err(s.error("expected 'from' in import statement"));
    }
    s.skip_trivia()?;

    let (specifier, specifier_span) = s.read_string_literal()?;
    let end = finish_statement(s);

    Ok(Some(ImportStatement {
        span: Span { start, end },
        specifier,
        specifier_span,
        default,
        namespace,
        named,
        type_only,
        reexport: false,
    }))
}

/// Parse a `{ a, b as c, type D }` binding list after the opening brace.
fn parse_named_bindings(s: &mut Scanner<'_>) -> Result<Vec<ImportBinding>, ScanError> {
    let mut named = Vec::new();
    loop {
        s.skip_trivia()?;
        match s.peek() {
            Some('}') => {
                s.advance();
                return Ok(named);
            }
            Some(c) if is_ident_start(c) => {
                let mut binding_name = s.read_identifier();
                // Per-binding type modifier: { type A }
                s.skip_trivia()?;
                if binding_name == "type" && s.peek().map(is_ident_start).unwrap_or(false) {
                    binding_name = s.read_identifier();
                    s.skip_trivia()?;
                }
                let mut alias = None;
                if s.peek().map(is_ident_start).unwrap_or(false) {
                    let as_kw = s.read_identifier();
                    if as_kw != "as" {
                        return Err(s.error("expected 'as' in import binding"));
                    }
                    s.skip_trivia()?;
                    alias = Some(s.read_identifier());
                    s.skip_trivia()?;
                }
                named.push(ImportBinding {
                    name: binding_name,
                    alias,
                });
                if s.peek() == Some(',') {
                    s.advance();
                }
            }
            _ => return Err(s.error("malformed import binding list")),
        }
    }
}

/// Parse the remainder of a possible `export ... from "spec"` statement.
///
/// Called speculatively after the `export` keyword; returns `None` when the
/// statement turns out not to be a re-export (the caller rewinds).
fn parse_reexport_tail(
    s: &mut Scanner<'_>,
    start: usize,
) -> Result<Option<ImportStatement>, ScanError> {
    s.skip_trivia()?;

    let mut namespace = None;
    let mut named = Vec::new();
    let mut type_only = false;

    if s.peek().map(is_ident_start).unwrap_or(false) {
        let checkpoint = (s.current, s.line);
        let ident = s.read_identifier();
        if ident == "type" {
            type_only = true;
            s.skip_trivia()?;
        } else {
            s.current = checkpoint.0;
            s.line = checkpoint.1;
        }
    }

    match s.peek() {
        Some('*') => {
            s.advance();
            s.skip_trivia()?;
            // `* as ns from` or plain `* from`; leave `from` unconsumed.
            if s.peek().map(is_ident_start).unwrap_or(false) {
                let checkpoint = (s.current, s.line);
                let ident = s.read_identifier();
                if ident == "as" {
                    s.skip_trivia()?;
                    namespace = Some(s.read_identifier());
                    s.skip_trivia()?;
                } else {
                    s.current = checkpoint.0;
                    s.line = checkpoint.1;
                }
            }
        }
        Some('{') => {
            s.advance();
            named = parse_named_bindings(s)?;
            s.skip_trivia()?;
        }
        _ => return Ok(None),
    }

    if !s.peek().map(is_ident_start).unwrap_or(false) {
        return Ok(None);
    }
    let from_kw = s.read_identifier();
    if from_kw != "from" {
        return Ok(None);
    }
    s.skip_trivia()?;
    if !matches!(s.peek(), Some('"') | Some('\'')) {
        return Ok(None);
    }

    let (specifier, specifier_span) = s.read_string_literal()?;
    let end = finish_statement(s);

    Ok(Some(ImportStatement {
        span: Span { start, end },
        specifier,
        specifier_span,
        default: None,
        namespace,
        named,
        type_only,
        reexport: true,
    }))
}

/// Consume an optional trailing `;`, returning the statement end offset.
fn finish_statement(s: &mut Scanner<'_>) -> usize {
    let mut end = s.byte_pos();
    // Only horizontal trivia between the specifier and the semicolon.
    while matches!(s.peek(), Some(' ') | Some('\t')) {
        s.advance();
    }
    if s.peek() == Some(';') {
        s.advance();
        end = s.byte_pos();
    }
    end
}

/// Scan every JSX element with the exact tag name `target`.
pub fn scan_jsx_elements(source: &str, target: &str) -> Result<Vec<JsxElement>, ScanError> {
    let mut s = Scanner::new(source);
    let mut elements = Vec::new();

    while !s.is_at_end() {
        match s.peek() {
            Some('/') if matches!(s.peek_next(), Some('/') | Some('*')) => {
                s.skip_trivia()?;
            }
            Some('"') => {
                s.advance();
                s.skip_string('"')?;
            }
            Some('\'') => {
                s.advance();
                s.skip_string('\'')?;
            }
            Some('`') => {
                s.advance();
                s.skip_template()?;
            }
            Some('<') => {
                if let Some(element) = try_parse_element(&mut s, target)? {
                    elements.push(element);
                } else {
                    s.advance();
                }
            }
            _ => {
                s.advance();
            }
        }
    }

    Ok(elements)
}

/// Attempt to parse an element with the target tag at the current `<`.
///
/// Leaves the scanner untouched (modulo position) when the tag name does
/// not match; the caller then advances past the `<` itself.
fn try_parse_element(s: &mut Scanner<'_>, target: &str) -> Result<Option<JsxElement>, ScanError> {
    let start = s.byte_pos();
    let after_lt = s.current + 1;

    // Look ahead: `<` target non-ident-char
    let mut i = after_lt;
    let mut matched = 0usize;
    for tc in target.chars() {
        match s.chars.get(i) {
            Some(&(_, c)) if c == tc => {
                i += 1;
                matched += 1;
            }
            _ => return Ok(None),
        }
    }
    if matched != target.chars().count() {
        return Ok(None);
    }
    if let Some(&(_, c)) = s.chars.get(i) {
        if c.is_alphanumeric() || c == '_' || c == '$' || c == '.' || c == '-' {
            return Ok(None);
        }
    }

    // Committed: consume `<` and the tag name.
    s.advance();
    let name_start = s.byte_pos();
    for _ in 0..matched {
        s.advance();
    }
    let name_span = Span {
        start: name_start,
        end: s.byte_pos(),
    };

    let mut attributes = Vec::new();
    let self_closing;

    loop {
        s.skip_trivia()?;
        match s.peek() {
            None => return Err(s.error(format!("unterminated <{}> tag", target))),
            Some('/') => {
                s.advance();
                if !s.match_char('>') {
                    return Err(s.error("expected '>' after '/'"));
                }
                self_closing = true;
                break;
            }
            Some('>') => {
                s.advance();
                self_closing = false;
                break;
            }
            Some(c) if is_ident_start(c) => {
                attributes.push(parse_attribute(s)?);
            }
            Some('{') => {
                // Spread attribute: {...props}
                let spread_start = s.byte_pos();
                s.advance();
                s.skip_braced()?;
                attributes.push(JsxAttribute {
                    name: String::new(),
                    span: Span {
                        start: spread_start,
                        end: s.byte_pos(),
                    },
                    string_value: None,
                });
            }
            Some(c) => return Err(s.error(format!("unexpected '{}' in <{}> tag", c, target))),
        }
    }

    if self_closing {
        return Ok(Some(JsxElement {
            span: Span {
                start,
                end: s.byte_pos(),
            },
            name_span,
            close_name_span: None,
            attributes,
            self_closing,
        }));
    }

    // Walk children until the matching close tag. Nested same-name elements
    // are consumed whole by recursion, so the next matching close tag here
    // is ours.
    loop {
        match s.peek() {
            None => return Err(s.error(format!("missing </{}> close tag", target))),
            Some('"') => {
                s.advance();
                s.skip_string('"')?;
            }
            Some('\'') => {
                s.advance();
                s.skip_string('\'')?;
            }
            Some('`') => {
                s.advance();
                s.skip_template()?;
            }
            Some('<') => {
                if s.peek_next() == Some('/') {
                    s.advance();
                    s.advance();
                    let close_name_start = s.byte_pos();
                    let name = s.read_identifier();
                    if name == target {
                        let close_name_span = Span {
                            start: close_name_start,
                            end: s.byte_pos(),
                        };
                        s.skip_trivia()?;
                        if !s.match_char('>') {
                            return Err(s.error(format!("malformed </{}> tag", target)));
                        }
                        return Ok(Some(JsxElement {
                            span: Span {
                                start,
                                end: s.byte_pos(),
                            },
                            name_span,
                            close_name_span: Some(close_name_span),
                            attributes,
                            self_closing: false,
                        }));
                    }
                } else if try_parse_element(s, target)?.is_none() {
                    // Not a same-name element; a nested same-name element is
                    // consumed whole by the recursive call, close tag included.
                    s.advance();
                }
            }
            Some(_) => {
                s.advance();
            }
        }
    }
}

/// Parse one `name` or `name="value"` or `name={expr}` attribute.
fn parse_attribute(s: &mut Scanner<'_>) -> Result<JsxAttribute, ScanError> {
    let attr_start = s.byte_pos();
    let mut name = s.read_identifier();
    // JSX attribute names may contain '-' and ':' (aria-*, data-*, xml:lang).
    while matches!(s.peek(), Some('-') | Some(':')) {
        name.push(s.advance().unwrap());
        name.push_str(&s.read_identifier());
    }

    let mut string_value = None;
    let mut end = s.byte_pos();

    let checkpoint = s.current;
    let checkpoint_line = s.line;
    s.skip_trivia()?;
    if s.peek() == Some('=') {
        s.advance();
        s.skip_trivia()?;
        match s.peek() {
            Some('"') | Some('\'') => {
                let (value, _) = s.read_string_literal()?;
                string_value = Some(value);
                end = s.byte_pos();
            }
            Some('{') => {
                s.advance();
                s.skip_braced()?;
                end = s.byte_pos();
            }
            _ => return Err(s.error(format!("malformed value for attribute '{}'", name))),
        }
    } else {
        // Bare boolean attribute; rewind the trivia we consumed.
        s.current = checkpoint;
        s.line = checkpoint_line;
    }

    Ok(JsxAttribute {
        name,
        span: Span {
            start: attr_start,
            end,
        },
        string_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_named_imports() {
        let source = r#"import { Slot, cn as classNames } from "@/lib/utils""#;
        let imports = scan_imports(source).unwrap();
        assert_eq!(imports.len(), 1);
        let import = &imports[0];
        assert_eq!(import.specifier, "@/lib/utils");
        assert_eq!(import.named.len(), 2);
        assert_eq!(import.named[0].name, "Slot");
        assert_eq!(import.named[1].local_name(), "classNames");
    }

    #[test]
    fn scans_default_namespace_and_side_effect_imports() {
        let source = "import React from 'react'\nimport * as z from 'zod';\nimport './globals.css';\n";
        let imports = scan_imports(source).unwrap();
        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].default.as_deref(), Some("React"));
        assert_eq!(imports[1].namespace.as_deref(), Some("z"));
        assert_eq!(imports[2].specifier, "./globals.css");
    }

    #[test]
    fn scans_mixed_default_and_named() {
        let source = r#"import Base, { Part } from "pkg";"#;
        let imports = scan_imports(source).unwrap();
        assert_eq!(imports[0].default.as_deref(), Some("Base"));
        assert_eq!(imports[0].named[0].name, "Part");
    }

    #[test]
    fn type_only_imports_are_flagged() {
        let source = r#"import type { Props } from "./types";"#;
        let imports = scan_imports(source).unwrap();
        assert!(imports[0].type_only);
        assert_eq!(imports[0].named[0].name, "Props");
    }

    #[test]
    fn imports_in_strings_and_comments_are_ignored() {
        let source = r#"
// import { Fake } from "not-real"
/* import "also-fake" */
const text = 'import "still-fake"';
import { Real } from "real-pkg";
"#;
        let imports = scan_imports(source).unwrap();
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "real-pkg");
    }

    #[test]
    fn dynamic_import_is_left_alone() {
        let source = r#"const mod = await import("./lazy"); import { A } from "b";"#;
        let imports = scan_imports(source).unwrap();
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "b");
    }

    #[test]
    fn statement_span_covers_trailing_semicolon() {
        let source = r#"import { A } from "b";"#;
        let imports = scan_imports(source).unwrap();
        assert_eq!(imports[0].span.slice(source), source);
    }

    #[test]
    fn specifier_span_allows_splicing() {
        let source = r#"import { A } from "@/registry/ui/button";"#;
        let imports = scan_imports(source).unwrap();
        assert_eq!(
            imports[0].specifier_span.slice(source),
            "@/registry/ui/button"
        );
    }

    #[test]
    fn binds_reports_local_names() {
        let source = r#"import D, { A, B as C } from "pkg";"#;
        let import = &scan_imports(source).unwrap()[0];
        assert!(import.binds("D"));
        assert!(import.binds("A"));
        assert!(import.binds("C"));
        assert!(!import.binds("B"));
    }

    #[test]
    fn reexports_with_specifiers_are_scanned() {
        let source = r#"export { Button, buttonVariants } from "@/registry/ui/button"
export * from "@/registry/ui/input"
export * as icons from "@/registry/icons"
"#;
        let imports = scan_imports(source).unwrap();
        assert_eq!(imports.len(), 3);
        assert!(imports.iter().all(|i| i.reexport));
        assert_eq!(imports[0].named[0].name, "Button");
        assert_eq!(imports[1].specifier, "@/registry/ui/input");
        assert_eq!(imports[2].namespace.as_deref(), Some("icons"));
    }

    #[test]
    fn local_exports_are_not_scanned() {
        let source = r#"const a = 1
export { a }
export default function main() {}
export const b = 2
import { c } from "real"
"#;
        let imports = scan_imports(source).unwrap();
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].specifier, "real");
        assert!(!imports[0].reexport);
    }

    #[test]
    fn unterminated_template_is_an_error() {
        let source = "const s = `unfinished";
        assert!(scan_imports(source).is_err());
    }

    #[test]
    fn finds_self_closing_element_with_attributes() {
        let source = r#"<RegistryIcon name="search" className="size-4" />"#;
        let elements = scan_jsx_elements(source, "RegistryIcon").unwrap();
        assert_eq!(elements.len(), 1);
        let el = &elements[0];
        assert!(el.self_closing);
        assert_eq!(el.span.slice(source), source);
        assert_eq!(
            el.attribute("name").unwrap().string_value.as_deref(),
            Some("search")
        );
        assert_eq!(el.attributes.len(), 2);
    }

    #[test]
    fn similar_tag_names_are_not_matched() {
        let source = r#"<RegistryIconButton name="x" /> <MyRegistryIcon name="y" />"#;
        let elements = scan_jsx_elements(source, "RegistryIcon").unwrap();
        assert!(elements.is_empty());
    }

    #[test]
    fn member_tags_are_not_matched() {
        let source = r#"<RegistryIcon.Fallback name="x" />"#;
        let elements = scan_jsx_elements(source, "RegistryIcon").unwrap();
        assert!(elements.is_empty());
    }

    #[test]
    fn paired_element_span_includes_close_tag() {
        let source = r#"<RegistryIcon name="sun"><span>fallback</span></RegistryIcon>"#;
        let elements = scan_jsx_elements(source, "RegistryIcon").unwrap();
        assert_eq!(elements.len(), 1);
        let el = &elements[0];
        assert!(!el.self_closing);
        assert_eq!(el.span.slice(source), source);
        assert_eq!(el.close_name_span.unwrap().slice(source), "RegistryIcon");
    }

    #[test]
    fn expression_attributes_are_scanned_over() {
        let source = r#"<RegistryIcon name="x" onClick={() => go("{nope}")} style={{ a: 1 }} />"#;
        let elements = scan_jsx_elements(source, "RegistryIcon").unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].attributes.len(), 3);
    }

    #[test]
    fn spread_attributes_are_kept() {
        let source = r#"<RegistryIcon name="x" {...props} />"#;
        let elements = scan_jsx_elements(source, "RegistryIcon").unwrap();
        assert_eq!(elements[0].attributes.len(), 2);
    }

    #[test]
    fn elements_inside_comments_are_ignored() {
        let source = "// <RegistryIcon name=\"a\" />\nconst x = 1;";
        let elements = scan_jsx_elements(source, "RegistryIcon").unwrap();
        assert!(elements.is_empty());
    }

    #[test]
    fn unterminated_element_is_an_error() {
        let source = r#"<RegistryIcon name="x""#;
        assert!(scan_jsx_elements(source, "RegistryIcon").is_err());
    }

    #[test]
    fn missing_close_tag_is_an_error() {
        let source = r#"<RegistryIcon name="x"><div /></div>"#;
        assert!(scan_jsx_elements(source, "RegistryIcon").is_err());
    }
}
