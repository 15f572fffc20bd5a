//! Path Query Engine
//!
//! XPath-like selection over a [`Document`](crate::dom::Document) tree:
//! - Two syntaxes (slash one-based, dot zero-based) compiled to one plan
//! - Index, attribute and text predicates with literal or regex tests
//! - Direct-child navigation only; `//` is not supported
//! - Compiled path caching and parallel multi-query evaluation

pub mod cache;
pub mod compiler;
pub mod eval;
pub mod parallel;
pub mod predicate;
pub mod query;
pub mod value;

pub use cache::PathCache;
pub use compiler::{CompiledPath, Fragments, PathSegment, SegmentKind, SyntaxMode};
pub use eval::{evaluate, resolve_one};
pub use parallel::{map_matches, select_parallel, xmap};
pub use predicate::{Pattern, Predicate, ValueTest};
pub use value::{AttributeRef, Match};
