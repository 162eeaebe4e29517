//! Sphinx XML output parser.

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::ParseError;
use crate::xml::{XmlElement, XmlNode};

/// Parse the XML written by `sphinx-build -b xml` into an element tree.
///
/// Returns the root element (normally `document`). The XML declaration and
/// doctype are skipped. Whitespace-only text containing a line break is
/// dropped: docutils pretty-prints its output, and the indentation between
/// elements is not content. Whitespace without a line break (for example the
/// body of `<desc_sig_space> </desc_sig_space>`) is kept.
///
/// # Errors
///
/// Returns an error if the input is not well-formed XML, has no root element,
/// or ends before the root element is closed.
pub fn parse_xml(xml: &str) -> Result<XmlElement, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let mut root = start_element(&reader, &e);
                read_children(&mut reader, &mut root)?;
                return Ok(root);
            }
            Event::Empty(e) => return Ok(start_element(&reader, &e)),
            Event::Eof => return Err(ParseError::NoRoot),
            _ => {}
        }
        buf.clear();
    }
}

fn read_children<R: BufRead>(
    reader: &mut Reader<R>,
    parent: &mut XmlElement,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let mut child = start_element(reader, &e);
                read_children(reader, &mut child)?;
                parent.children.push(XmlNode::Element(child));
            }
            Event::Empty(e) => {
                let child = start_element(reader, &e);
                parent.children.push(XmlNode::Element(child));
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                append_text(parent, &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                append_text(parent, &decode_entity(&entity));
            }
            Event::CData(e) => {
                append_text(parent, &String::from_utf8_lossy(&e));
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(ParseError::UnexpectedEof {
                    element: parent.name.clone(),
                });
            }
            _ => {}
        }
        buf.clear();
    }

    parent.children.retain(|child| !is_formatting(child));
    Ok(())
}

fn start_element<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> XmlElement {
    XmlElement {
        name: decode_lossy(reader, e.name().as_ref()),
        attrs: decode_attrs(reader, e),
        children: Vec::new(),
    }
}

fn decode_lossy<R: BufRead>(reader: &Reader<R>, bytes: &[u8]) -> String {
    reader.decoder().decode(bytes).map_or_else(
        |_| String::from_utf8_lossy(bytes).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn decode_attrs<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = decode_lossy(reader, attr.key.as_ref());
        if key.starts_with("xmlns") {
            continue;
        }

        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        attrs.insert(key, value);
    }
    attrs
}

/// Append text, merging with a preceding text leaf.
///
/// Entity references arrive as separate events, so `a &lt; b` is three
/// events that must end up as one leaf.
fn append_text(parent: &mut XmlElement, text: &str) {
    if let Some(XmlNode::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(XmlNode::text(text));
    }
}

fn is_formatting(node: &XmlNode) -> bool {
    matches!(node, XmlNode::Text(text) if text.contains('\n') && text.trim().is_empty())
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}
