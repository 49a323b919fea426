//! Builds annotation trees with real ranges from XML fixture sources.
//!
//! This stands in for the external annotation parser. Tokenizing is left to
//! `quick-xml`; ranges are recovered from `buffer_position()` around each
//! event. Fixture sources are ASCII, so byte columns equal UTF-16 columns.

use odata_annotation::syntax::{
    AnnotationFile, Attribute, Element, ElementChild, Namespace, Reference, Target, TextNode,
};
use odata_annotation::{Position, Range};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Position of `needle`'s first occurrence in `source`, moved right by `delta`.
pub fn position_of(source: &str, needle: &str, delta: usize) -> Position {
    let offset = source
        .find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not found in fixture"));
    position_at(source, offset + delta)
}

fn position_at(source: &str, offset: usize) -> Position {
    let before = &source[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    Position::new(line as u32, (offset - line_start) as u32)
}

fn range_at(source: &str, start: usize, end: usize) -> Range {
    Range::new(position_at(source, start), position_at(source, end))
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    element: Element,
    start: usize,
    content_start: usize,
}

/// Build an element (without content) from a start or empty tag spanning
/// `start..end` of `source`.
fn start_element(source: &str, tag: &BytesStart<'_>, start: usize, end: usize) -> Element {
    let name = std::str::from_utf8(tag.name().as_ref())
        .expect("tag name is UTF-8")
        .to_string();
    let name_start = start + 1;
    let name_end = name_start + name.len();
    let mut element = Element::new(name).with_name_range(range_at(source, name_start, name_end));

    let text = &source[..end];
    let mut cursor = name_end;
    for attribute in tag.attributes() {
        let attribute = attribute.expect("well-formed attribute");
        let key = std::str::from_utf8(attribute.key.as_ref()).expect("attribute name is UTF-8");
        let value = attribute.unescape_value().expect("attribute value unescapes");

        let key_start = cursor + text[cursor..].find(key).expect("attribute key in tag");
        let key_end = key_start + key.len();
        let quote_start = key_end
            + text[key_end..]
                .find(['"', '\''])
                .expect("quoted attribute value");
        let quote = &text[quote_start..=quote_start];
        let value_start = quote_start + 1;
        let value_end = value_start + text[value_start..].find(quote).expect("closing quote");
        cursor = value_end + 1;

        element = element.with_attribute(Attribute::new(key, value.as_ref()).with_ranges(
            range_at(source, key_start, cursor),
            range_at(source, key_start, key_end),
            range_at(source, value_start, value_end),
        ));
    }
    element
}

fn attach(stack: &mut [OpenElement], roots: &mut Vec<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.element.content.push(element.into()),
        None => roots.push(element),
    }
}

fn close(source: &str, open: OpenElement, content_end: usize, end: usize) -> Element {
    open.element
        .with_content_range(range_at(source, open.content_start, content_end))
        .with_range(range_at(source, open.start, end))
}

/// Parse an XML fixture into a generic element tree rooted at its first
/// top-level element.
pub fn parse_xml(source: &str) -> Element {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut roots = Vec::new();

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event().unwrap_or_else(|error| {
            panic!("fixture is not XML at {}: {error}", reader.error_position())
        });
        let after = reader.buffer_position() as usize;
        match event {
            Event::Start(tag) => {
                let start = source[..after].rfind('<').expect("start tag opens with '<'");
                stack.push(OpenElement {
                    element: start_element(source, &tag, start, after),
                    start,
                    content_start: after,
                });
            }
            Event::Empty(tag) => {
                let start = source[..after].rfind('<').expect("empty tag opens with '<'");
                let element = start_element(source, &tag, start, after)
                    .with_range(range_at(source, start, after));
                attach(&mut stack, &mut roots, element);
            }
            Event::End(_) => {
                let open = stack.pop().expect("end tag matches an open element");
                let content_end = source[..after].rfind("</").expect("end tag opens with '</'");
                let element = close(source, open, content_end, after);
                attach(&mut stack, &mut roots, element);
            }
            Event::Text(text) => {
                let end = source[before..].find('<').map_or(source.len(), |len| before + len);
                let raw = &source[before..end];
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let first = before + (raw.len() - raw.trim_start().len());
                let value = text.unescape().expect("text unescapes");
                if let Some(parent) = stack.last_mut() {
                    parent.element.content.push(
                        TextNode::new(value.trim())
                            .with_range(range_at(source, first, first + trimmed.len()))
                            .into(),
                    );
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    assert!(stack.is_empty(), "fixture has unclosed elements");
    roots.into_iter().next().expect("fixture has a root element")
}

fn descendants<'a>(element: &'a Element, name: &str, out: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        if child.name == name {
            out.push(child);
        }
        descendants(child, name, out);
    }
}

fn find_all<'a>(root: &'a Element, name: &str) -> Vec<&'a Element> {
    let mut out = Vec::new();
    descendants(root, name, &mut out);
    out
}

/// Build an [`AnnotationFile`] from an XML fixture.
///
/// References span their `edmx:Reference` element; the namespace spans its
/// `Namespace`/`Alias` attributes; targets span their `Annotations` element.
pub fn annotation_file(source: &str) -> AnnotationFile {
    let root = parse_xml(source);
    let mut file = AnnotationFile::new("file:///annotations.xml");
    file.range = root.range;

    for reference in find_all(&root, "edmx:Reference") {
        let uri = reference.attribute("Uri");
        for include in reference.elements_with_name("edmx:Include") {
            let namespace = include.attribute("Namespace");
            let alias = include.attribute("Alias");
            file.references.push(Reference {
                name: namespace.map(|a| a.value.clone()).unwrap_or_default(),
                alias: alias.map(|a| a.value.clone()),
                uri: uri.map(|a| a.value.clone()),
                range: reference.range,
                name_range: namespace.and_then(|a| a.value_range),
                alias_range: alias.and_then(|a| a.value_range),
                uri_range: uri.and_then(|a| a.value_range),
            });
        }
    }

    if let Some(schema) = find_all(&root, "Schema").first() {
        let namespace = schema.attribute("Namespace");
        let alias = schema.attribute("Alias");
        let start = namespace.and_then(|a| a.range);
        let end = alias.and_then(|a| a.range).or(start);
        file.namespace = Some(Namespace {
            name: namespace.map(|a| a.value.clone()).unwrap_or_default(),
            alias: alias.map(|a| a.value.clone()),
            range: start.zip(end).map(|(start, end)| Range::new(start.start, end.end)),
            name_range: namespace.and_then(|a| a.value_range),
            alias_range: alias.and_then(|a| a.value_range),
        });
    }

    for annotations in find_all(&root, "Annotations") {
        let name = annotations.attribute("Target");
        file.targets.push(Target {
            name: name.map(|a| a.value.clone()).unwrap_or_default(),
            range: annotations.range,
            name_range: name.and_then(|a| a.value_range),
            terms: annotations.child_elements().cloned().collect(),
        });
    }

    file
}

/// Clear every range below the first term of the first target, keeping the
/// tree shape. Simulates nodes synthesized while the user is typing.
pub fn strip_term_ranges(file: &mut AnnotationFile) {
    fn strip(element: &mut Element) {
        element.range = None;
        element.content_range = None;
        for child in &mut element.content {
            if let ElementChild::Element(child) = child {
                strip(child);
            }
        }
    }
    if let Some(term) = file.targets.first_mut().and_then(|t| t.terms.first_mut()) {
        strip(term);
    }
}
