//! SAX (Simple API for XML) Module
//!
//! Event-driven ingestion contract for building trees.
//!
//! ## Architecture
//!
//! ```text
//! SliceReader ---> drive() ---> ContentHandler
//!                                    |
//!                                    v
//!                               TreeBuilder ---> Document
//! ```
//!
//! Only three events reach a handler: start-element, characters and
//! end-element. CDATA sections arrive as characters; comments, processing
//! instructions and the DOCTYPE are dropped by [`drive`].

pub mod builder;

pub use builder::{ParseOptions, TreeBuilder};

use crate::core::attributes::Attribute;
use crate::error::Result;
use crate::reader::{SliceReader, XmlEvent};

/// Receiver of ingestion events
///
/// Returning an error from any callback aborts the run.
pub trait ContentHandler {
    /// Byte offset of the event about to be delivered
    fn locate(&mut self, _position: usize) {}

    /// Element opening tag with its qualified name and ordered attributes
    fn start_element(&mut self, name: &str, attributes: &[Attribute<'_>]) -> Result<()>;

    /// Character data, entities already decoded
    fn characters(&mut self, text: &str) -> Result<()>;

    /// Element closing tag
    fn end_element(&mut self, name: &str) -> Result<()>;
}

/// Feed every event of `input` into `handler`
///
/// Empty elements are delivered as a start/end pair.
pub fn drive<H: ContentHandler>(input: &str, handler: &mut H) -> Result<()> {
    let mut reader = SliceReader::new(input);
    loop {
        let position = reader.position();
        let Some(event) = reader.next_event() else {
            return Ok(());
        };
        handler.locate(position);
        match event? {
            XmlEvent::StartElement(e) => handler.start_element(e.name, &e.attributes)?,
            XmlEvent::EmptyElement(e) => {
                handler.start_element(e.name, &e.attributes)?;
                handler.end_element(e.name)?;
            }
            XmlEvent::EndElement(e) => handler.end_element(e.name)?,
            XmlEvent::Text(text) => handler.characters(&text)?,
            XmlEvent::CData(text) => handler.characters(text)?,
            XmlEvent::Comment(_)
            | XmlEvent::ProcessingInstruction { .. }
            | XmlEvent::DocType(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
        positions: Vec<usize>,
    }

    impl ContentHandler for Recorder {
        fn locate(&mut self, position: usize) {
            self.positions.push(position);
        }

        fn start_element(&mut self, name: &str, attributes: &[Attribute<'_>]) -> Result<()> {
            let attrs: Vec<String> = attributes
                .iter()
                .map(|a| format!("{}={}", a.name, a.value))
                .collect();
            self.log.push(format!("start {name} [{}]", attrs.join(",")));
            Ok(())
        }

        fn characters(&mut self, text: &str) -> Result<()> {
            self.log.push(format!("chars {text}"));
            Ok(())
        }

        fn end_element(&mut self, name: &str) -> Result<()> {
            self.log.push(format!("end {name}"));
            Ok(())
        }
    }

    #[test]
    fn test_drive_event_sequence() {
        let mut rec = Recorder::default();
        drive(
            "<?xml version=\"1.0\"?><!-- c --><r a=\"1\"><e/>x &amp; y<![CDATA[<z>]]></r>",
            &mut rec,
        )
        .unwrap();
        assert_eq!(
            rec.log,
            vec![
                "start r [a=1]",
                "start e []",
                "end e",
                "chars x & y",
                "chars <z>",
                "end r",
            ]
        );
        assert_eq!(rec.positions[0], 0);
    }

    #[test]
    fn test_drive_stops_on_reader_error() {
        let mut rec = Recorder::default();
        assert!(drive("<r><!-- never closed", &mut rec).is_err());
        assert_eq!(rec.log, vec!["start r []"]);
    }
}
