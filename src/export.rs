//! Tree Export
//!
//! Depth-first [`Visitor`] traversal and a markup writer built on it.
//!
//! The writer emits each element's local text after its children, so a
//! written tree parses back to the same names, attributes, texts and child
//! order.

use crate::core::entities::escape;
use crate::dom::NodeRef;
use std::fmt;

/// Callbacks for a depth-first walk
pub trait Visitor<'d> {
    /// Called before any of the node's children
    fn enter(&mut self, node: NodeRef<'d>);

    /// Called after all of the node's children
    fn leave(&mut self, _node: NodeRef<'d>) {}
}

/// Walk `node` and its descendants in document order
pub fn walk<'d, V: Visitor<'d> + ?Sized>(node: NodeRef<'d>, visitor: &mut V) {
    // (node, children already pushed)
    let mut stack = vec![(node, false)];
    while let Some((current, expanded)) = stack.pop() {
        if expanded {
            visitor.leave(current);
            continue;
        }
        visitor.enter(current);
        stack.push((current, true));
        let children: Vec<_> = current.child_nodes().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, false)));
    }
}

/// Writer settings
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Per-level indent; `None` writes everything on one line
    pub indent: Option<String>,
}

impl WriterOptions {
    pub fn compact() -> Self {
        WriterOptions { indent: None }
    }

    pub fn pretty(indent: impl Into<String>) -> Self {
        WriterOptions {
            indent: Some(indent.into()),
        }
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self::pretty("  ")
    }
}

/// Serializes a subtree as markup
pub struct XmlWriter {
    indent: Option<String>,
    out: String,
    depth: usize,
}

impl XmlWriter {
    pub fn new(options: &WriterOptions) -> Self {
        XmlWriter {
            indent: options.indent.clone(),
            out: String::new(),
            depth: 0,
        }
    }

    /// Write one subtree and return the markup
    pub fn write(mut self, node: NodeRef<'_>) -> String {
        walk(node, &mut self);
        self.out
    }

    fn newline(&mut self, depth: usize) {
        if let Some(indent) = &self.indent {
            if !self.out.is_empty() {
                self.out.push('\n');
            }
            for _ in 0..depth {
                self.out.push_str(indent);
            }
        }
    }
}

impl<'d> Visitor<'d> for XmlWriter {
    fn enter(&mut self, node: NodeRef<'d>) {
        self.newline(self.depth);
        self.out.push('<');
        self.out.push_str(node.name());
        for (name, value) in node.attributes() {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape(value));
            self.out.push('"');
        }

        if node.child_count() == 0 {
            if node.text().is_empty() {
                self.out.push_str("/>");
            } else {
                self.out.push('>');
                self.out.push_str(&escape(node.text()));
            }
            return;
        }
        self.out.push('>');
        self.depth += 1;
    }

    fn leave(&mut self, node: NodeRef<'d>) {
        if node.child_count() == 0 {
            if node.text().is_empty() {
                return;
            }
        } else {
            if !node.text().is_empty() {
                self.newline(self.depth);
                self.out.push_str(&escape(node.text()));
            }
            self.depth -= 1;
            self.newline(self.depth);
        }
        self.out.push_str("</");
        self.out.push_str(node.name());
        self.out.push('>');
    }
}

/// Serialize a subtree with the given options
pub fn to_xml(node: NodeRef<'_>, options: &WriterOptions) -> String {
    XmlWriter::new(options).write(node)
}

impl fmt::Display for NodeRef<'_> {
    /// Pretty markup with a two-space indent
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_xml(*self, &WriterOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::sax::ParseOptions;

    fn sample() -> Document {
        let mut doc = Document::new("r");
        let root = doc.root_id();
        doc.put_attribute(root, "id", "a<b");
        let a = doc.append_element(root, "a");
        doc.set_text(a, "x & y");
        let b = doc.append_element(root, "b");
        let c = doc.append_element(b, "c");
        doc.set_text(b, "tail");
        doc.put_attribute(c, "q", "it's");
        doc
    }

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl<'d> Visitor<'d> for Trace {
        fn enter(&mut self, node: NodeRef<'d>) {
            self.0.push(format!("+{}", node.name()));
        }

        fn leave(&mut self, node: NodeRef<'d>) {
            self.0.push(format!("-{}", node.name()));
        }
    }

    #[test]
    fn test_walk_order() {
        let doc = sample();
        let mut trace = Trace::default();
        walk(doc.root(), &mut trace);
        assert_eq!(trace.0, ["+r", "+a", "-a", "+b", "+c", "-c", "-b", "-r"]);
    }

    #[test]
    fn test_compact() {
        let doc = sample();
        assert_eq!(
            to_xml(doc.root(), &WriterOptions::compact()),
            r#"<r id="a&lt;b"><a>x &amp; y</a><b><c q="it&apos;s"/>tail</b></r>"#
        );
    }

    #[test]
    fn test_pretty() {
        let doc = sample();
        let expected = [
            r#"<r id="a&lt;b">"#,
            "  <a>x &amp; y</a>",
            "  <b>",
            r#"    <c q="it&apos;s"/>"#,
            "    tail",
            "  </b>",
            "</r>",
        ]
        .join("\n");
        assert_eq!(doc.root().to_string(), expected);
    }

    #[test]
    fn test_non_ascii_escaped() {
        let doc = Document::parse_str("<r>café</r>").unwrap();
        assert_eq!(to_xml(doc.root(), &WriterOptions::compact()), "<r>caf&#233;</r>");
    }

    #[test]
    fn test_round_trip() {
        let doc = sample();
        for options in [WriterOptions::compact(), WriterOptions::default()] {
            let text = to_xml(doc.root(), &options);
            let back = Document::parse_str(&text).unwrap();
            assert_eq!(to_xml(back.root(), &options), text);
        }

        let raw = Document::parse_str_with(
            &to_xml(doc.root(), &WriterOptions::compact()),
            &ParseOptions { trim_whitespace: false },
        )
        .unwrap();
        assert_eq!(
            to_xml(raw.root(), &WriterOptions::compact()),
            to_xml(doc.root(), &WriterOptions::compact())
        );
    }
}
