//! XML text emission.

use std::fmt::Write;

use super::node::{Content, Element};

/// XML declaration emitted before the root element.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Render `root` as a complete XML document.
pub(crate) fn render_document(root: &Element, indent: &str) -> String {
    tracing::trace!(root = %root.name, indent_len = indent.len(), "Rendering document");

    let mut out = String::with_capacity(4096);
    out.push_str(XML_DECLARATION);
    newline(&mut out, indent);
    render_element(&mut out, root, indent, 0);
    out
}

/// Render a single element subtree without a declaration.
#[must_use]
pub fn render_fragment(element: &Element, indent: &str) -> String {
    let mut out = String::new();
    render_element(&mut out, element, indent, 0);
    out
}

fn render_element(out: &mut String, element: &Element, indent: &str, depth: usize) {
    pad(out, indent, depth);
    out.push('<');
    out.push_str(&element.name);
    for attribute in &element.attributes {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            " {}=\"{}\"",
            attribute.name,
            escape_attribute(&attribute.value.to_string())
        );
    }

    match &element.content {
        Content::Empty => out.push_str("/>"),
        Content::Children(children) if children.is_empty() => out.push_str("/>"),
        Content::Text(value) => {
            out.push('>');
            out.push_str(&escape_text(&value.to_string()));
            close(out, &element.name);
        }
        Content::Children(children) => {
            out.push('>');
            for child in children {
                newline(out, indent);
                render_element(out, child, indent, depth + 1);
            }
            newline(out, indent);
            pad(out, indent, depth);
            close(out, &element.name);
        }
    }
}

fn close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn pad(out: &mut String, indent: &str, depth: usize) {
    for _ in 0..depth {
        out.push_str(indent);
    }
}

fn newline(out: &mut String, indent: &str) {
    if !indent.is_empty() {
        out.push('\n');
    }
}

/// Characters allowed in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

/// Escape character data. Characters XML cannot carry are dropped.
#[must_use]
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c if !is_xml_char(c) => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape a double-quoted attribute value. Characters XML cannot carry are
/// dropped.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if !is_xml_char(c) => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Element {
        Element::container("Envelope")
            .with_attribute("version", "0.52")
            .with_child(
                Element::empty("Sender")
                    .with_attribute("id", "12345678")
                    .with_attribute("email", "a@b.com"),
            )
            .with_child(
                Element::container("Packet")
                    .with_child(
                        Element::container("PacketInfo")
                            .with_child(Element::leaf("PacketId", 1_i64)),
                    )
                    .with_child(Element::container("Payload")),
            )
    }

    #[test]
    fn test_render_indented() {
        let xml = render_document(&sample(), "  ");
        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<Envelope version="0.52">
  <Sender id="12345678" email="a@b.com"/>
  <Packet>
    <PacketInfo>
      <PacketId>1</PacketId>
    </PacketInfo>
    <Payload/>
  </Packet>
</Envelope>"#;
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_render_compact() {
        let xml = render_fragment(&sample(), "");
        assert_eq!(
            xml,
            r#"<Envelope version="0.52"><Sender id="12345678" email="a@b.com"/><Packet><PacketInfo><PacketId>1</PacketId></PacketInfo><Payload/></Packet></Envelope>"#
        );
    }

    #[test]
    fn test_indent_does_not_change_structure() {
        let tabbed = render_document(&sample(), "\t");
        let compact = render_document(&sample(), "");
        let a = roxmltree::Document::parse(&tabbed).unwrap();
        let b = roxmltree::Document::parse(&compact).unwrap();
        let names = |d: &roxmltree::Document<'_>| -> Vec<String> {
            d.descendants()
                .filter(|n| n.is_element())
                .map(|n| n.tag_name().name().to_string())
                .collect()
        };
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn test_escaping() {
        let el = Element::leaf("P", "Salt & <pepper>")
            .with_attribute("note", "say \"hi\" & 'bye'");
        assert_eq!(
            render_fragment(&el, "  "),
            r#"<P note="say &quot;hi&quot; &amp; &apos;bye&apos;">Salt &amp; &lt;pepper&gt;</P>"#
        );
    }

    #[test]
    fn test_escaped_output_parses_back() {
        let el = Element::container("Envelope")
            .with_child(Element::leaf("HiringOrgName", "Smith & Sons <AB>"));
        let xml = render_document(&el, "  ");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let name = doc
            .descendants()
            .find(|n| n.has_tag_name("HiringOrgName"))
            .unwrap();
        assert_eq!(name.text(), Some("Smith & Sons <AB>"));
    }

    #[test]
    fn test_non_xml_characters_are_dropped() {
        assert_eq!(escape_text("bell\u{7}char\u{FFFE}"), "bellchar");
        assert_eq!(escape_text("tab\tand\nnewline"), "tab\tand\nnewline");
        assert_eq!(escape_attribute("a\u{0}b\u{1B}c"), "abc");

        let el = Element::container("Envelope")
            .with_child(Element::leaf("P", "bell\u{7}char").with_attribute("note", "x\u{8}y"));
        let xml = render_document(&el, "  ");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let p = doc.descendants().find(|n| n.has_tag_name("P")).unwrap();
        assert_eq!(p.text(), Some("bellchar"));
        assert_eq!(p.attribute("note"), Some("xy"));
    }
}
