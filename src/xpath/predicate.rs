//! Predicate Engine
//!
//! Typed filters narrowing the candidate children at one path segment.
//! Indices are already normalized to zero-based form by the compiler.

use crate::dom::NodeRef;
use regex::Regex;
use std::fmt;

/// Comparison used by attribute and text predicates
#[derive(Clone)]
pub enum ValueTest {
    /// Exact string equality
    Literal(String),
    /// Whole-string regular expression match
    Pattern(Pattern),
}

/// A regex anchored to match the entire value
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source` so that it must match the whole input
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Pattern {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written in the path
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.source)
    }
}

impl ValueTest {
    #[inline]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            ValueTest::Literal(expected) => expected == value,
            ValueTest::Pattern(pattern) => pattern.is_match(value),
        }
    }
}

impl PartialEq for ValueTest {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValueTest::Literal(a), ValueTest::Literal(b)) => a == b,
            (ValueTest::Pattern(a), ValueTest::Pattern(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for ValueTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueTest::Literal(value) => write!(f, "Literal({value:?})"),
            ValueTest::Pattern(pattern) => fmt::Debug::fmt(pattern, f),
        }
    }
}

/// Filter applied to the candidates of a named segment
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// No filtering
    All,
    /// Zero-based position from the front
    ExactIndex(usize),
    /// Position counted back from the last candidate (0 = last)
    LastRelative(usize),
    /// Attribute present with a non-empty value
    AttributeExists(String),
    /// Attribute value passes the test; absent attributes compare as ""
    AttributeMatches(String, ValueTest),
    /// Local text passes the test
    TextMatches(ValueTest),
}

/// An index predicate pointed outside the candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    /// Zero-based index; negative values count back from the end (-1 = last)
    pub index: i64,
    pub len: usize,
}

impl Predicate {
    /// Narrow `candidates`, keeping document order
    ///
    /// Index variants select exactly one node and fail on any list, empty
    /// or not, that has no element at the index.
    pub fn apply<'d>(&self, candidates: Vec<NodeRef<'d>>) -> Result<Vec<NodeRef<'d>>, OutOfRange> {
        let len = candidates.len();
        match self {
            Predicate::All => Ok(candidates),
            Predicate::ExactIndex(i) => match candidates.get(*i) {
                Some(node) => Ok(vec![*node]),
                None => Err(OutOfRange {
                    index: *i as i64,
                    len,
                }),
            },
            Predicate::LastRelative(k) => match len.checked_sub(k + 1) {
                Some(i) => Ok(vec![candidates[i]]),
                None => Err(OutOfRange {
                    index: -(*k as i64) - 1,
                    len,
                }),
            },
            Predicate::AttributeExists(name) => Ok(candidates
                .into_iter()
                .filter(|node| !node.attribute(name).is_empty())
                .collect()),
            Predicate::AttributeMatches(name, test) => Ok(candidates
                .into_iter()
                .filter(|node| test.matches(node.attribute(name)))
                .collect()),
            Predicate::TextMatches(test) => Ok(candidates
                .into_iter()
                .filter(|node| test.matches(node.text()))
                .collect()),
        }
    }
}
