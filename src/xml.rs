//! XML event cursor
//!
//! Thin pull-parser wrapper shared by the reply and tree decoders. It
//! matches elements by local name, keeps leaf text verbatim and remembers
//! whether an `<ok/>` marker passed by at any depth.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{NetconfError, Result};

/// An element whose start tag has just been read
pub(crate) struct Element<'a> {
    start: BytesStart<'a>,
    empty: bool,
}

impl<'a> Element<'a> {
    /// Local name, namespace prefix removed
    pub fn name(&self) -> &[u8] {
        self.start.local_name().into_inner()
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Value of the attribute with the given local name
    pub fn attribute(&self, name: &[u8]) -> Result<Option<String>> {
        for attr in self.start.attributes() {
            let attr = attr.map_err(|e| NetconfError::Decode(format!("bad attribute: {}", e)))?;
            if attr.key.local_name().as_ref() == name {
                let value = attr
                    .unescape_value()
                    .map_err(|e| NetconfError::Decode(format!("bad attribute value: {}", e)))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }
}

/// Pull cursor over a complete XML document
pub(crate) struct XmlCursor<'a> {
    reader: Reader<&'a [u8]>,
    source: &'a str,
    event_start: usize,
    saw_ok: bool,
}

impl<'a> XmlCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            reader: Reader::from_str(source),
            source,
            event_start: 0,
            saw_ok: false,
        }
    }

    /// Byte offset just past the last event read
    pub fn position(&self) -> usize {
        self.reader.buffer_position() as usize
    }

    /// Byte offset of the `</` that opened the end tag just read
    pub fn closing_tag_start(&self) -> usize {
        let end = self.position();
        self.source
            .get(..end)
            .and_then(|before| before.rfind("</"))
            .unwrap_or(end)
    }

    /// Source text between two offsets
    pub fn slice(&self, from: usize, to: usize) -> &'a str {
        self.source.get(from..to).unwrap_or_default()
    }

    /// Whether an `ok` element has been seen so far
    pub fn saw_ok(&self) -> bool {
        self.saw_ok
    }

    /// Read the next raw event
    pub fn next_event(&mut self) -> Result<Event<'a>> {
        self.event_start = self.position();
        let event = match self.reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(NetconfError::Decode(format!(
                    "malformed XML at byte {}: {}",
                    self.event_start, e
                )))
            }
        };
        if let Event::Start(start) | Event::Empty(start) = &event {
            if start.local_name().as_ref() == b"ok" {
                self.saw_ok = true;
            }
        }
        Ok(event)
    }

    /// Next top-level element, skipping declarations, comments and text
    ///
    /// Returns `None` once the document ends without another element.
    pub fn next_root(&mut self) -> Result<Option<Element<'a>>> {
        loop {
            match self.next_event()? {
                Event::Start(start) => return Ok(Some(Element { start, empty: false })),
                Event::Empty(start) => return Ok(Some(Element { start, empty: true })),
                Event::End(end) => {
                    return Err(NetconfError::Decode(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    )))
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }

    /// Next child of the element currently open
    ///
    /// Returns `None` when that element's end tag is reached.
    pub fn next_child(&mut self) -> Result<Option<Element<'a>>> {
        loop {
            match self.next_event()? {
                Event::Start(start) => return Ok(Some(Element { start, empty: false })),
                Event::Empty(start) => return Ok(Some(Element { start, empty: true })),
                Event::End(_) => return Ok(None),
                Event::Eof => return Err(unexpected_eof()),
                _ => {}
            }
        }
    }

    /// Consume the rest of `element`, discarding it
    pub fn skip(&mut self, element: &Element<'_>) -> Result<()> {
        if element.empty {
            return Ok(());
        }
        let mut depth = 1usize;
        while depth > 0 {
            match self.next_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(unexpected_eof()),
                _ => {}
            }
        }
        Ok(())
    }

    /// Consume the rest of `element`, returning its character data verbatim
    ///
    /// Nested elements are skipped; their text is not collected.
    pub fn text(&mut self, element: &Element<'_>) -> Result<String> {
        let mut out = String::new();
        if element.empty {
            return Ok(out);
        }
        loop {
            match self.next_event()? {
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| NetconfError::Decode(format!("bad text: {}", e)))?;
                    out.push_str(&text);
                }
                Event::CData(data) => {
                    let data = std::str::from_utf8(&data)
                        .map_err(|e| NetconfError::Decode(format!("bad CDATA: {}", e)))?;
                    out.push_str(data);
                }
                Event::Start(start) => {
                    let nested = Element { start, empty: false };
                    self.skip(&nested)?;
                }
                Event::End(_) => return Ok(out),
                Event::Eof => return Err(unexpected_eof()),
                _ => {}
            }
        }
    }
}

fn unexpected_eof() -> NetconfError {
    NetconfError::Decode("unexpected end of document".to_string())
}
