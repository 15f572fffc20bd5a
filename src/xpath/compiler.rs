//! Path Compiler
//!
//! Turns one or more path fragments into a [`CompiledPath`]: an ordered list
//! of segments, each carrying a zero-based [`Predicate`].
//!
//! Two syntaxes share one representation:
//!
//! ```text
//! slash  m:customer/email[1]/@addr     one-based indices, '/' delimits
//! dot    .m:customer.email[0].@addr    zero-based indices, '.' or '/' delimits
//! ```
//!
//! A path is dot syntax when it starts with `.` followed by a letter. In dot
//! syntax `\.` is a literal dot inside a name.

use super::predicate::{Pattern, Predicate, ValueTest};
use crate::error::{Result, XenError};
use std::fmt;

/// Path delimiter; a fragment starting with it anchors at the root
pub const DELIM: char = '/';

/// Index origin and delimiter convention of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxMode {
    /// `a/b[1]`: one-based indices
    Slash,
    /// `.a.b[0]`: zero-based indices
    Dot,
}

impl SyntaxMode {
    /// Index of the first candidate as written in this syntax
    pub fn index_origin(self) -> i64 {
        match self {
            SyntaxMode::Slash => 1,
            SyntaxMode::Dot => 0,
        }
    }
}

/// What a segment navigates to
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentKind {
    /// Topmost ancestor
    Root,
    /// `..`
    Parent,
    /// `.`
    SelfNode,
    /// `@name`: projects an attribute; always the final segment
    Attribute(String),
    /// Children with this exact name, or all children for `*`
    Named(String),
}

/// One step of a compiled path
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub kind: SegmentKind,
    /// [`Predicate::All`] unless the segment had a bracketed filter
    pub predicate: Predicate,
}

impl PathSegment {
    fn new(kind: SegmentKind) -> Self {
        PathSegment {
            kind,
            predicate: Predicate::All,
        }
    }
}

/// An immutable, reusable query plan
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPath {
    text: String,
    segments: Vec<PathSegment>,
    mode: SyntaxMode,
}

/// Anything that can be read as a list of path fragments
pub trait Fragments {
    fn fragments(&self) -> Vec<&str>;
}

impl Fragments for str {
    fn fragments(&self) -> Vec<&str> {
        vec![self]
    }
}

impl Fragments for String {
    fn fragments(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

impl<S: AsRef<str>> Fragments for [S] {
    fn fragments(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<S: AsRef<str>, const N: usize> Fragments for [S; N] {
    fn fragments(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<S: AsRef<str>> Fragments for Vec<S> {
    fn fragments(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

/// Join fragments into one path
///
/// A `/` is inserted between fragments unless the text so far already ends
/// with one. A fragment that starts with `/` discards everything before it.
pub fn assemble(fragments: &[&str]) -> String {
    let mut path = String::new();
    for fragment in fragments {
        if fragment.starts_with(DELIM) {
            path.clear();
        } else if !path.is_empty() && !path.ends_with(DELIM) {
            path.push(DELIM);
        }
        path.push_str(fragment);
    }
    path
}

impl CompiledPath {
    /// Compile path fragments
    pub fn compile<P: Fragments + ?Sized>(path: &P) -> Result<Self> {
        let text = assemble(&path.fragments());
        let compiled = Self::parse(text)?;
        log::trace!(
            "compiled <{}> ({:?}) into {} segments",
            compiled.text,
            compiled.mode,
            compiled.segments.len()
        );
        Ok(compiled)
    }

    fn parse(text: String) -> Result<Self> {
        let mut chars = text.chars();
        let mode = match (chars.next(), chars.next()) {
            (Some('.'), Some(c)) if c.is_alphabetic() => SyntaxMode::Dot,
            _ => SyntaxMode::Slash,
        };
        let body = match mode {
            SyntaxMode::Dot => &text[1..],
            SyntaxMode::Slash => text.as_str(),
        };

        let mut tokens = split_tokens(body, mode).map_err(|msg| XenError::syntax(&text, msg))?;
        // trailing delimiter
        if tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }

        let mut segments = Vec::with_capacity(tokens.len());
        let last = tokens.len().saturating_sub(1);
        for (i, token) in tokens.iter().enumerate() {
            if token.is_empty() {
                if i == 0 {
                    segments.push(PathSegment::new(SegmentKind::Root));
                    continue;
                }
                return Err(match mode {
                    SyntaxMode::Slash => XenError::Unsupported {
                        path: text.clone(),
                        feature: "descendant search (//)",
                    },
                    SyntaxMode::Dot => XenError::syntax(&text, "empty segment"),
                });
            }
            segments.push(compile_segment(token, i == last, mode, &text)?);
        }

        Ok(CompiledPath {
            text,
            segments,
            mode,
        })
    }

    /// The assembled path text, as used in error messages
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn mode(&self) -> SyntaxMode {
        self.mode
    }

    /// True when the final segment projects an attribute
    pub fn ends_with_attribute(&self) -> bool {
        matches!(
            self.segments.last(),
            Some(PathSegment {
                kind: SegmentKind::Attribute(_),
                ..
            })
        )
    }
}

impl fmt::Display for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Split on delimiters outside brackets
///
/// `/` always delimits; in dot syntax an unescaped `.` does too. Bracket
/// content is kept verbatim, and brackets inside a quoted predicate value
/// do not count toward nesting.
fn split_tokens(body: &str, mode: SyntaxMode) -> std::result::Result<Vec<String>, &'static str> {
    if body.is_empty() {
        return Ok(Vec::new());
    }
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' if depth > 0 => {
                quote = Some(c);
                current.push(c);
            }
            '\\' => {
                let next = chars.peek().copied();
                match next {
                    Some('.') if depth == 0 && mode == SyntaxMode::Dot => {
                        current.push('.');
                        chars.next();
                    }
                    Some(n @ ('[' | ']')) if depth > 0 => {
                        current.push(c);
                        current.push(n);
                        chars.next();
                    }
                    _ => current.push(c),
                }
            }
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.checked_sub(1).ok_or("unbalanced ']'")?;
                current.push(c);
            }
            '/' if depth == 0 => tokens.push(std::mem::take(&mut current)),
            '.' if depth == 0 && mode == SyntaxMode::Dot => {
                tokens.push(std::mem::take(&mut current))
            }
            _ => current.push(c),
        }
    }
    if quote.is_some() {
        return Err("unterminated quoted value");
    }
    if depth != 0 {
        return Err("unbalanced '['");
    }
    tokens.push(current);
    Ok(tokens)
}

fn compile_segment(token: &str, is_last: bool, mode: SyntaxMode, path: &str) -> Result<PathSegment> {
    match token {
        "." => return Ok(PathSegment::new(SegmentKind::SelfNode)),
        ".." => return Ok(PathSegment::new(SegmentKind::Parent)),
        _ => {}
    }

    if let Some(name) = token.strip_prefix('@') {
        if name == "*" {
            return Err(XenError::Unsupported {
                path: path.to_string(),
                feature: "attribute wildcard (@*)",
            });
        }
        if name.is_empty() || name.contains('[') {
            return Err(XenError::syntax(path, format!("bad attribute segment '{token}'")));
        }
        if !is_last {
            return Err(XenError::syntax(path, format!("attribute segment '{token}' must be last")));
        }
        return Ok(PathSegment::new(SegmentKind::Attribute(name.to_string())));
    }

    let Some(open) = token.find('[') else {
        return Ok(PathSegment::new(SegmentKind::Named(token.to_string())));
    };
    let name = &token[..open];
    if name.is_empty() || name == "." || name == ".." {
        return Err(XenError::syntax(path, format!("predicate needs an element name in '{token}'")));
    }
    let Some(content) = token[open + 1..].strip_suffix(']') else {
        return Err(XenError::syntax(path, format!("text after predicate in '{token}'")));
    };

    Ok(PathSegment {
        kind: SegmentKind::Named(name.to_string()),
        predicate: compile_predicate(content, mode, path)?,
    })
}

/// Compile the content between `[` and `]`
fn compile_predicate(content: &str, mode: SyntaxMode, path: &str) -> Result<Predicate> {
    let content = content.replace("last()", "");
    let content = content.trim();

    if content.is_empty() {
        return Ok(Predicate::LastRelative(0));
    }

    if let Some(rest) = content.strip_prefix('@') {
        if rest.starts_with('*') {
            return Err(XenError::Unsupported {
                path: path.to_string(),
                feature: "attribute wildcard (@*)",
            });
        }
        let Some(op) = rest.find(['=', '~']) else {
            return Ok(Predicate::AttributeExists(rest.to_string()));
        };
        let name = rest[..op].trim();
        if name.is_empty() {
            return Err(XenError::syntax(path, format!("missing attribute name in [{content}]")));
        }
        let test = value_test(&rest[op..], path)?;
        return Ok(Predicate::AttributeMatches(name.to_string(), test));
    }

    let text_test = content
        .strip_prefix("text()")
        .or_else(|| content.strip_prefix('.'));
    if let Some(rest) = text_test {
        let rest = rest.trim_start();
        if !rest.starts_with(['=', '~']) {
            return Err(XenError::syntax(path, format!("text predicate needs '=' or '~' in [{content}]")));
        }
        return Ok(Predicate::TextMatches(value_test(rest, path)?));
    }

    let n: i64 = content
        .parse()
        .map_err(|_| XenError::syntax(path, format!("unrecognized predicate [{content}]")))?;
    Ok(index_predicate(n, mode))
}

/// Normalize a written index to a zero-based predicate
fn index_predicate(n: i64, mode: SyntaxMode) -> Predicate {
    match mode {
        SyntaxMode::Slash if n > 0 => Predicate::ExactIndex((n - 1) as usize),
        SyntaxMode::Slash => Predicate::LastRelative(n.unsigned_abs() as usize),
        SyntaxMode::Dot if n >= 0 => Predicate::ExactIndex(n as usize),
        SyntaxMode::Dot => Predicate::LastRelative((n.unsigned_abs() - 1) as usize),
    }
}

/// `=` or `~` followed by a quoted value
fn value_test(operator_and_value: &str, path: &str) -> Result<ValueTest> {
    let (op, raw) = operator_and_value.split_at(1);
    let value = unquote(raw.trim())
        .ok_or_else(|| XenError::syntax(path, format!("expected a quoted value after '{op}'")))?;
    if op == "~" {
        let pattern = Pattern::new(value).map_err(|source| XenError::Pattern {
            path: path.to_string(),
            source,
        })?;
        Ok(ValueTest::Pattern(pattern))
    } else {
        Ok(ValueTest::Literal(value.to_string()))
    }
}

fn unquote(raw: &str) -> Option<&str> {
    let quote = raw.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let inner = raw.strip_prefix(quote)?.strip_suffix(quote)?;
    Some(inner)
}
