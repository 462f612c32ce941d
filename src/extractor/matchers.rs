//! Small, independent matchers over annotated Java text.
//!
//! Each matcher recognises one construct (a type declaration, a single
//! annotation kind, a doc comment) so a surprise in one place cannot derail
//! the others.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TYPE_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"public\s+(?:class|enum|interface)\s+(\w+)").unwrap());

static INTERFACE_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"public\s+interface\s+(\w+)").unwrap());

/// `private <type> <name>;` with at most one generic bracket and an optional array suffix.
static FIELD_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"private\s+(\w+(?:<[^>]+>)?(?:\[\])?)\s+(\w+)\s*;").unwrap()
});

static ROUTE_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r#"@Path\("([^"]+)"\)"#).unwrap());

/// Verb, route, optional media-type annotations, return type, name and parameter list.
static METHOD_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)@(GET|POST|PUT|DELETE)\s+",
        r#"@Path\("([^"]+)"\)\s*"#,
        r"(?:@(?:Produces|Consumes)\([^)]+\)\s*)*",
        r"([\w<>\[\],\s]+?)\s+",
        r"(\w+)\s*\((.*?)\)\s*;",
    ))
    .unwrap()
});

static QUERY_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"@QueryParam\s*\(\s*"([^"]+)"\s*\)"#).unwrap());

static PATH_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"@PathParam\s*\(\s*"([^"]+)"\s*\)"#).unwrap());

static BRACE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

static ANNOTATION_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+\([^)]*\)").unwrap());

static DOC_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*\*(.*?)\*/").unwrap());

static DOC_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\*\s*").unwrap());

/// Identifier of the first public class, enum or interface.
pub fn type_declaration(content: &str) -> Option<&str> {
    first_group(&TYPE_DECL, content)
}

/// Identifier of the first public interface.
pub fn interface_declaration(content: &str) -> Option<&str> {
    first_group(&INTERFACE_DECL, content)
}

/// `(type, name)` of every private field declaration, in source order.
pub fn field_declarations(content: &str) -> impl Iterator<Item = (&str, &str)> {
    FIELD_DECL.captures_iter(content).filter_map(|cap| {
        let declared_type = cap.get(1)?.as_str();
        let name = cap.get(2)?.as_str();
        Some((declared_type, name))
    })
}

/// Argument of the first `@Path` annotation found in `content`.
pub fn route_path(content: &str) -> Option<&str> {
    first_group(&ROUTE_PATH, content)
}

/// A method declaration matched by [`method_declarations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodMatch<'a> {
    /// Byte offset of the verb annotation
    pub start: usize,
    pub verb: &'a str,
    pub path: &'a str,
    pub return_type: &'a str,
    pub name: &'a str,
    /// Raw text between the parentheses
    pub params: &'a str,
}

/// Annotated method declarations, possibly spanning several lines.
pub fn method_declarations(content: &str) -> impl Iterator<Item = MethodMatch<'_>> {
    METHOD_DECL.captures_iter(content).filter_map(|cap: Captures<'_>| {
        Some(MethodMatch {
            start: cap.get(0)?.start(),
            verb: cap.get(1)?.as_str(),
            path: cap.get(2)?.as_str(),
            return_type: cap.get(3)?.as_str().trim(),
            name: cap.get(4)?.as_str(),
            params: cap.get(5)?.as_str(),
        })
    })
}

/// Names inside `{...}` placeholders of a route path.
pub fn path_placeholders(path: &str) -> impl Iterator<Item = &str> {
    BRACE_TOKEN
        .captures_iter(path)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
}

pub fn query_param(segment: &str) -> Option<&str> {
    first_group(&QUERY_PARAM, segment)
}

pub fn path_param(segment: &str) -> Option<&str> {
    first_group(&PATH_PARAM, segment)
}

/// Removes every `@Name(...)` annotation from a parameter segment.
pub fn strip_annotations(segment: &str) -> String {
    ANNOTATION_CALL.replace_all(segment, "").into_owned()
}

/// Splits a parameter list on top-level commas.
///
/// Commas nested in parentheses (annotation arguments), angle brackets
/// (generic arguments) or string literals do not split. Returns `None` when the
/// parentheses are unbalanced. Empty segments are dropped.
pub fn split_parameters(params: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    let mut paren_depth: i32 = 0;
    let mut angle_depth: i32 = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut segment_start = 0;

    for (idx, ch) in params.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '(' => paren_depth += 1,
            ')' => {
                paren_depth -= 1;
                if paren_depth < 0 {
                    return None;
                }
            }
            '<' => angle_depth += 1,
            '>' => angle_depth = (angle_depth - 1).max(0),
            ',' if paren_depth == 0 && angle_depth == 0 => {
                segments.push(params[segment_start..idx].trim());
                segment_start = idx + 1;
            }
            _ => {}
        }
    }

    if paren_depth != 0 || in_string {
        return None;
    }
    segments.push(params[segment_start..].trim());
    segments.retain(|s| !s.is_empty());
    Some(segments)
}

/// First sentence of the doc comment that immediately precedes `method_start`.
///
/// Only whitespace (and stray `@` characters) may sit between the end of the
/// comment and the method. Comment markers collapse to single spaces and the
/// text is cut at the first block tag (`@`) or full stop.
pub fn preceding_doc_comment(content: &str, method_start: usize) -> Option<String> {
    let head = content.get(..method_start)?;
    let comment = DOC_COMMENT.captures_iter(head).last()?;
    let whole = comment.get(0)?;

    let gap = &head[whole.end()..];
    if gap.chars().any(|c| !c.is_whitespace() && c != '@') {
        return None;
    }

    let body = comment.get(1)?.as_str().trim();
    let collapsed = DOC_MARKERS.replace_all(body, " ");
    let collapsed = collapsed.trim();
    let end = collapsed.find(['@', '.']).unwrap_or(collapsed.len());
    Some(collapsed[..end].trim().to_string())
}

fn first_group<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)?.get(1).map(|m| m.as_str())
}
