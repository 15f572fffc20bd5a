//! Zero-Copy Slice Reader
//!
//! Pulls markup events out of a `&str`. Names, comments, CDATA and
//! undecoded text are borrowed straight from the input.

use super::events::{EndElement, StartElement, XmlEvent};
use crate::core::attributes::parse_attributes;
use crate::core::entities::decode_text;
use crate::core::scanner::Scanner;
use crate::error::{Result, XenError};

/// Zero-copy markup reader over a string slice
pub struct SliceReader<'a> {
    input: &'a str,
    scanner: Scanner<'a>,
    failed: bool,
}

impl<'a> SliceReader<'a> {
    /// Create a new slice reader
    pub fn new(input: &'a str) -> Self {
        SliceReader {
            input,
            scanner: Scanner::new(input),
            failed: false,
        }
    }

    /// Byte offset of the next unread input
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Get the next event, `None` at end of input
    pub fn next_event(&mut self) -> Option<Result<XmlEvent<'a>>> {
        if self.failed {
            return None;
        }
        loop {
            if self.scanner.is_eof() {
                return None;
            }
            let event = if self.scanner.peek() == Some(b'<') {
                self.read_markup()
            } else {
                match self.read_text() {
                    Some(text) => Ok(text),
                    None => continue,
                }
            };
            if event.is_err() {
                self.failed = true;
            }
            return Some(event);
        }
    }

    /// Text up to the next '<' or end of input; `None` when empty
    fn read_text(&mut self) -> Option<XmlEvent<'a>> {
        let start = self.scanner.position();
        let end = self.scanner.find_tag_start().unwrap_or(self.input.len());
        self.scanner.set_position(end);
        if end == start {
            return None;
        }
        Some(XmlEvent::Text(decode_text(self.scanner.slice(start, end))))
    }

    fn read_markup(&mut self) -> Result<XmlEvent<'a>> {
        let start = self.scanner.position();

        if self.scanner.starts_with("<!--") {
            self.scanner.advance(4);
            let end = self.expect_terminator("-->", start, "unterminated comment")?;
            return Ok(XmlEvent::Comment(self.scanner.slice(start + 4, end)));
        }

        if self.scanner.starts_with("<![CDATA[") {
            self.scanner.advance(9);
            let end = self.expect_terminator("]]>", start, "unterminated CDATA section")?;
            return Ok(XmlEvent::CData(self.scanner.slice(start + 9, end)));
        }

        if self.scanner.starts_with("<!") {
            return self.read_doctype(start);
        }

        if self.scanner.starts_with("<?") {
            self.scanner.advance(2);
            let end = self.expect_terminator("?>", start, "unterminated processing instruction")?;
            let body = self.scanner.slice(start + 2, end);
            let (target, data) = match body.find(|c: char| c.is_ascii_whitespace()) {
                Some(split) => {
                    let data = body[split..].trim();
                    (&body[..split], (!data.is_empty()).then_some(data))
                }
                None => (body, None),
            };
            return Ok(XmlEvent::ProcessingInstruction { target, data });
        }

        if self.scanner.starts_with("</") {
            self.scanner.advance(2);
            let name = self
                .scanner
                .read_name()
                .ok_or_else(|| XenError::parse("expected element name after '</'", start))?;
            self.scanner.skip_whitespace();
            if self.scanner.peek() != Some(b'>') {
                return Err(XenError::parse(
                    format!("expected '>' to close </{name}"),
                    self.scanner.position(),
                ));
            }
            self.scanner.advance(1);
            return Ok(XmlEvent::EndElement(EndElement::new(name)));
        }

        self.read_start_tag(start)
    }

    fn read_start_tag(&mut self, start: usize) -> Result<XmlEvent<'a>> {
        self.scanner.advance(1);
        let name = self
            .scanner
            .read_name()
            .ok_or_else(|| XenError::parse("expected element name after '<'", start))?;
        let attrs_start = self.scanner.position();
        let gt = self
            .scanner
            .find_tag_end_quoted()
            .ok_or_else(|| XenError::parse(format!("unterminated start tag <{name}"), start))?;
        self.scanner.set_position(gt + 1);

        let mut attrs_end = gt;
        let is_empty = gt > attrs_start && self.input.as_bytes()[gt - 1] == b'/';
        if is_empty {
            attrs_end -= 1;
        }

        let attributes = parse_attributes(self.scanner.slice(attrs_start, attrs_end))
            .map_err(|(message, offset)| XenError::parse(message, attrs_start + offset))?;
        let element = StartElement::new(name, attributes);

        if is_empty {
            Ok(XmlEvent::EmptyElement(element))
        } else {
            Ok(XmlEvent::StartElement(element))
        }
    }

    /// DOCTYPE, including an internal subset in brackets
    fn read_doctype(&mut self, start: usize) -> Result<XmlEvent<'a>> {
        let mut depth = 0usize;
        let mut pos = start + 2;
        loop {
            self.scanner.set_position(pos);
            match self.scanner.peek() {
                None => return Err(XenError::parse("unterminated declaration", start)),
                Some(b'[') => depth += 1,
                Some(b']') => depth = depth.saturating_sub(1),
                Some(b'>') if depth == 0 => break,
                _ => {}
            }
            pos += 1;
        }
        self.scanner.set_position(pos + 1);
        Ok(XmlEvent::DocType(self.scanner.slice(start, pos + 1)))
    }

    /// Find `terminator`, move past it and return where it began
    fn expect_terminator(
        &mut self,
        terminator: &str,
        start: usize,
        message: &'static str,
    ) -> Result<usize> {
        let end = self
            .scanner
            .find_str(terminator)
            .ok_or_else(|| XenError::parse(message, start))?;
        self.scanner.set_position(end + terminator.len());
        Ok(end)
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = Result<XmlEvent<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

/// Read every event from a string slice, stopping at the first error
pub fn parse_events(input: &str) -> Result<Vec<XmlEvent<'_>>> {
    SliceReader::new(input).collect()
}
