//! Shared helpers for integration tests.
//!
//! Provides a small CSS parser covering the syntax the test suites use,
//! plus an [`run`] helper that parses, analyzes, and serializes in one step.

#![allow(dead_code)]

use rmrules_core::stylesheet::{
    AtRule, Attribute, Combinator, Comment, Compound, Declaration, Node, Pseudo, Rule, Selector,
    Stylesheet,
};
use rmrules_core::{analyze, AnalysisConfig, Report, Result};

/// Parses a stylesheet from CSS source text.
///
/// Handles rules, at-rules (statement and block form), and comments.
/// Panics on malformed input; test fixtures are expected to be valid.
pub fn parse(source: &str) -> Stylesheet<'_> {
    let bytes = source.as_bytes();
    let mut nodes = Vec::new();
    let mut i = 0;

    while i < source.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
        } else if source[i..].starts_with("/*") {
            let end = source[i + 2..]
                .find("*/")
                .map(|p| p + i + 2)
                .expect("unterminated comment");
            nodes.push(Node::Comment(Comment {
                text: &source[i + 2..end],
            }));
            i = end + 2;
        } else if bytes[i] == b'@' {
            let end = at_rule_end(bytes, i);
            nodes.push(Node::AtRule(AtRule {
                text: source[i..end].trim(),
            }));
            i = end;
        } else {
            let open = source[i..].find('{').map(|p| p + i).expect("missing '{'");
            let close = source[open..]
                .find('}')
                .map(|p| p + open)
                .expect("missing '}'");
            nodes.push(Node::Rule(Rule {
                selectors: parse_selector_list(&source[i..open]),
                declarations: parse_declarations(&source[open + 1..close]),
            }));
            i = close + 1;
        }
    }

    Stylesheet { nodes }
}

/// Parses `source`, runs [`analyze`] with `config`, and returns the
/// serialized result next to the analysis outcome.
pub fn run(source: &str, config: &AnalysisConfig) -> (String, Result<Report>) {
    let mut stylesheet = parse(source);
    let outcome = analyze(&mut stylesheet, config);
    (stylesheet.to_string(), outcome)
}

fn at_rule_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut j = start;
    while j < bytes.len() {
        match bytes[j] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return j + 1;
                }
            }
            b';' if depth == 0 => return j + 1,
            _ => {}
        }
        j += 1;
    }
    bytes.len()
}

fn parse_selector_list(text: &str) -> Vec<Selector<'_>> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_selector)
        .collect()
}

/// Parses a single complex selector into key-first compound order.
pub fn parse_selector(text: &str) -> Selector<'_> {
    let mut rest = text.trim();
    // Written order first: each entry carries the combinator joining it
    // to the compound on its left.
    let mut written: Vec<(Combinator, &str)> = Vec::new();
    let mut pending = Combinator::Descendant;

    while !rest.is_empty() {
        let end = compound_end(rest);
        written.push((pending, &rest[..end]));
        let after = rest[end..].trim_start();
        let (combinator, next) = match after.as_bytes().first() {
            Some(b'>') => (Combinator::Child, &after[1..]),
            Some(b'+') => (Combinator::NextSibling, &after[1..]),
            Some(b'~') => (Combinator::SubsequentSibling, &after[1..]),
            _ => (Combinator::Descendant, after),
        };
        pending = combinator;
        rest = next.trim_start();
    }

    let compounds = written
        .into_iter()
        .rev()
        .map(|(combinator, part)| {
            let mut compound = parse_compound(part);
            compound.combinator = combinator;
            compound
        })
        .collect();
    Selector { compounds }
}

fn compound_end(text: &str) -> usize {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            c if depth == 0 && (c.is_whitespace() || matches!(c, '>' | '+' | '~')) => {
                return idx;
            }
            _ => {}
        }
    }
    text.len()
}

fn parse_compound(text: &str) -> Compound<'_> {
    let mut compound = Compound::default();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.as_bytes()[0] {
            b'*' => rest = &rest[1..],
            b'.' => {
                let (name, after) = take_ident(&rest[1..]);
                compound.classes.push(name);
                rest = after;
            }
            b'#' => {
                let (name, after) = take_ident(&rest[1..]);
                compound.id = Some(name);
                rest = after;
            }
            b'[' => {
                let close = rest.find(']').expect("missing ']'");
                compound.attributes.push(parse_attribute(&rest[1..close]));
                rest = &rest[close + 1..];
            }
            b':' => {
                let skip = if rest[1..].starts_with(':') { 2 } else { 1 };
                let (name, after) = take_ident(&rest[skip..]);
                let mut argument = None;
                let mut next = after;
                if next.starts_with('(') {
                    let close = next.find(')').expect("missing ')'");
                    argument = Some(&next[1..close]);
                    next = &next[close + 1..];
                }
                compound.pseudos.push(Pseudo { name, argument });
                rest = next;
            }
            _ => {
                let (name, after) = take_ident(rest);
                assert!(!name.is_empty(), "unparsable selector fragment: {rest:?}");
                compound.tag = Some(name);
                rest = after;
            }
        }
    }

    compound
}

fn take_ident(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(text.len());
    (&text[..end], &text[end..])
}

fn parse_attribute(inner: &str) -> Attribute<'_> {
    for operator in ["~=", "|=", "^=", "$=", "*=", "="] {
        if let Some(pos) = inner.find(operator) {
            let name = &inner[..pos];
            let raw = &inner[pos + operator.len()..];
            let value = raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| raw.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(raw);
            return Attribute {
                name,
                operator,
                value,
            };
        }
    }
    Attribute {
        name: inner,
        operator: "",
        value: "",
    }
}

fn parse_declarations(block: &str) -> Vec<Declaration<'_>> {
    block
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (property, value) = part.split_once(':').expect("missing ':' in declaration");
            Declaration {
                property: property.trim(),
                value: value.trim(),
            }
        })
        .collect()
}
