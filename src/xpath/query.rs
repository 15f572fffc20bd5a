//! Query Surface
//!
//! Path queries as methods on [`NodeRef`]. Each accepts anything
//! implementing [`Fragments`]: a single `&str`, or an array, slice or `Vec`
//! of fragments joined with `/`.
//!
//! `all*` operations never fail on an empty result; `get*` return `None`
//! for nothing and fail on more than one; `one*` require exactly one.

use super::compiler::{CompiledPath, Fragments};
use super::eval::{evaluate, resolve_one};
use super::value::Match;
use crate::dom::NodeRef;
use crate::error::{Result, XenError};

impl<'d> NodeRef<'d> {
    /// Every match of the path
    pub fn all<P: Fragments + ?Sized>(&self, path: &P) -> Result<Vec<Match<'d>>> {
        self.select(&CompiledPath::compile(path)?)
    }

    /// The single match, `None` when nothing matched
    pub fn get<P: Fragments + ?Sized>(&self, path: &P) -> Result<Option<Match<'d>>> {
        let compiled = CompiledPath::compile(path)?;
        let matches = self.select(&compiled)?;
        if matches.is_empty() {
            return Ok(None);
        }
        resolve_one(&compiled, matches).map(Some)
    }

    /// Exactly one match
    pub fn one<P: Fragments + ?Sized>(&self, path: &P) -> Result<Match<'d>> {
        self.select_one(&CompiledPath::compile(path)?)
    }

    /// Text of the single match, `None` when nothing matched
    pub fn get_text<P: Fragments + ?Sized>(&self, path: &P) -> Result<Option<&'d str>> {
        Ok(self.get(path)?.map(|m| m.text()))
    }

    /// Text of exactly one match
    pub fn one_text<P: Fragments + ?Sized>(&self, path: &P) -> Result<&'d str> {
        Ok(self.one(path)?.text())
    }

    /// Text of every match
    pub fn all_text<P: Fragments + ?Sized>(&self, path: &P) -> Result<Vec<&'d str>> {
        Ok(self.all(path)?.iter().map(|m| m.text()).collect())
    }

    /// Value of the single attribute the path projects, `None` when absent
    ///
    /// The path must end in an `@name` segment.
    pub fn get_attr<P: Fragments + ?Sized>(&self, path: &P) -> Result<Option<&'d str>> {
        let compiled = attribute_path(path)?;
        let matches = self.select(&compiled)?;
        if matches.is_empty() {
            return Ok(None);
        }
        Ok(Some(resolve_one(&compiled, matches)?.text()))
    }

    /// Values of every attribute the path projects
    pub fn all_attr<P: Fragments + ?Sized>(&self, path: &P) -> Result<Vec<&'d str>> {
        let compiled = attribute_path(path)?;
        Ok(self.select(&compiled)?.iter().map(|m| m.text()).collect())
    }

    /// Evaluate a precompiled path
    #[inline]
    pub fn select(&self, path: &CompiledPath) -> Result<Vec<Match<'d>>> {
        evaluate(path, *self)
    }

    /// Evaluate a precompiled path that must match exactly once
    pub fn select_one(&self, path: &CompiledPath) -> Result<Match<'d>> {
        resolve_one(path, self.select(path)?)
    }
}

fn attribute_path<P: Fragments + ?Sized>(path: &P) -> Result<CompiledPath> {
    let compiled = CompiledPath::compile(path)?;
    if !compiled.ends_with_attribute() {
        return Err(XenError::Argument(format!(
            "<{}> does not end in an @attribute segment",
            compiled.text()
        )));
    }
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn sample() -> Document {
        Document::parse_str(r#"<r><a x="1">first</a><a x="2">second</a><n>3.5</n></r>"#).unwrap()
    }

    #[test]
    fn test_all_and_get() {
        let doc = sample();
        let root = doc.root();
        assert_eq!(root.all("a").unwrap().len(), 2);
        assert!(root.all("zzz").unwrap().is_empty());

        let err = root.get("a").unwrap_err();
        assert!(matches!(err, XenError::AmbiguousMatch { .. }));
        assert_eq!(err.path(), Some("a"));

        let second = root.get("a[2]").unwrap().unwrap();
        assert_eq!(second.as_node().map(|n| n.attribute("x")), Some("2"));
        assert!(root.get("zzz").unwrap().is_none());
    }

    #[test]
    fn test_no_fragments_is_self() {
        let doc = sample();
        let root = doc.root();
        let none: [&str; 0] = [];
        assert_eq!(root.get(&none).unwrap(), Some(Match::Element(root)));
    }

    #[test]
    fn test_one() {
        let doc = sample();
        let root = doc.root();
        assert_eq!(root.one("n").unwrap().to_f64().unwrap(), 3.5);
        assert!(matches!(root.one("zzz"), Err(XenError::NotFound { .. })));
        assert!(matches!(root.one("a"), Err(XenError::AmbiguousMatch { count: 2, .. })));
    }

    #[test]
    fn test_text_queries() {
        let doc = sample();
        let root = doc.root();
        assert_eq!(root.get_text("missing/path").unwrap(), None);
        assert_eq!(root.get_text(&["a[@x='1']"]).unwrap(), Some("first"));
        assert_eq!(root.one_text("a[0]").unwrap(), "second");
        assert_eq!(root.all_text("a").unwrap(), ["first", "second"]);
    }

    #[test]
    fn test_attribute_queries() {
        let doc = sample();
        let root = doc.root();
        assert_eq!(root.all_attr("a/@x").unwrap(), ["1", "2"]);
        assert_eq!(root.get_attr(".a[-1].@x").unwrap(), Some("2"));
        assert_eq!(root.get_attr("n/@x").unwrap(), None);
        assert!(matches!(root.get_attr("a[1]"), Err(XenError::Argument(_))));
        assert!(matches!(root.all_attr("a"), Err(XenError::Argument(_))));
    }

    #[test]
    fn test_precompiled_reuse() {
        let doc = sample();
        let path = CompiledPath::compile("..").unwrap();
        for a in doc.root().children("a") {
            assert_eq!(a.select_one(&path).unwrap(), Match::Element(doc.root()));
        }
    }
}
