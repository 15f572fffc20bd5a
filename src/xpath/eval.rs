//! Path Evaluator
//!
//! Walks a [`CompiledPath`] from a start node and collects matches in
//! document order.
//!
//! Parent, self and root segments move a single cursor. A named segment
//! narrows the cursor's children with its predicate; when more segments
//! follow, the rest of the path runs independently from every surviving
//! child and the results are concatenated. An attribute segment ends the
//! walk.

use super::compiler::{CompiledPath, PathSegment, SegmentKind};
use super::predicate::OutOfRange;
use super::value::{AttributeRef, Match};
use crate::dom::NodeRef;
use crate::error::{Result, XenError};

/// Evaluate a compiled path against `start`
///
/// An empty path yields `start` itself. Never fails because nothing matched;
/// only index predicates pointing outside a non-empty candidate list fail.
pub fn evaluate<'d>(path: &CompiledPath, start: NodeRef<'d>) -> Result<Vec<Match<'d>>> {
    let mut matches = Vec::new();
    walk(path, path.segments(), start, &mut matches)?;
    log::trace!(
        "evaluated <{}> from <{}>: {} matches",
        path.text(),
        start.name(),
        matches.len()
    );
    Ok(matches)
}

fn walk<'d>(
    path: &CompiledPath,
    segments: &[PathSegment],
    start: NodeRef<'d>,
    matches: &mut Vec<Match<'d>>,
) -> Result<()> {
    let mut current = Some(start);

    for (i, segment) in segments.iter().enumerate() {
        let Some(node) = current else {
            break;
        };
        match &segment.kind {
            SegmentKind::Parent => current = node.parent(),
            SegmentKind::SelfNode => {}
            SegmentKind::Root => current = Some(node.root()),
            SegmentKind::Attribute(name) => {
                if let Some((name, value)) = node.attribute_entry(name) {
                    matches.push(Match::Attribute(AttributeRef {
                        owner: node,
                        name,
                        value,
                    }));
                }
                return Ok(());
            }
            SegmentKind::Named(name) => {
                let narrowed = segment
                    .predicate
                    .apply(node.children(name))
                    .map_err(|OutOfRange { index, len }| XenError::IndexOutOfRange {
                        path: path.text().to_string(),
                        index,
                        len,
                    })?;
                let rest = &segments[i + 1..];
                if rest.is_empty() {
                    matches.extend(narrowed.into_iter().map(Match::Element));
                } else {
                    for child in narrowed {
                        walk(path, rest, child, matches)?;
                    }
                }
                return Ok(());
            }
        }
    }

    if let Some(node) = current {
        matches.push(Match::Element(node));
    }
    Ok(())
}

/// Reduce a match list to its single element
///
/// Fails with [`XenError::NotFound`] when empty and
/// [`XenError::AmbiguousMatch`] when there is more than one.
pub fn resolve_one<'d>(path: &CompiledPath, matches: Vec<Match<'d>>) -> Result<Match<'d>> {
    let count = matches.len();
    let mut iter = matches.into_iter();
    match (iter.next(), count) {
        (None, _) => Err(XenError::NotFound {
            path: path.text().to_string(),
        }),
        (Some(only), 1) => Ok(only),
        (Some(_), count) => Err(XenError::AmbiguousMatch {
            path: path.text().to_string(),
            count,
        }),
    }
}
