//! Parallel Path Evaluation
//!
//! Uses Rayon to evaluate many paths against one tree. A [`Document`] is
//! plain owned data, so shared `NodeRef`s can cross threads freely.
//!
//! [`Document`]: crate::dom::Document

use super::compiler::CompiledPath;
use super::eval::evaluate;
use super::value::Match;
use crate::dom::NodeRef;
use crate::error::Result;
use rayon::prelude::*;

/// Evaluate multiple paths in parallel, one result per path in input order
pub fn select_parallel<'d>(node: NodeRef<'d>, paths: &[&str]) -> Vec<Result<Vec<Match<'d>>>> {
    paths.par_iter().map(|path| node.all(*path)).collect()
}

/// Evaluate a path and map every match in parallel
pub fn map_matches<'d, F, T>(node: NodeRef<'d>, path: &str, mapper: F) -> Result<Vec<T>>
where
    F: Fn(Match<'d>) -> T + Sync + Send,
    T: Send,
{
    let matches = node.all(path)?;
    Ok(matches.into_par_iter().map(mapper).collect())
}

/// Evaluate keyed paths in parallel, returning `(key, texts)` in input order
///
/// The first failing path aborts the whole map.
pub fn xmap<'d>(node: NodeRef<'d>, queries: &[(&str, &str)]) -> Result<Vec<(String, Vec<&'d str>)>> {
    queries
        .par_iter()
        .map(|(key, path)| -> Result<(String, Vec<&'d str>)> {
            let compiled = CompiledPath::compile(*path)?;
            let texts = evaluate(&compiled, node)?.iter().map(|m| m.text()).collect();
            Ok((key.to_string(), texts))
        })
        .collect()
}
