//! XML normalization.
//!
//! The document must have exactly one root element. Record extraction, in
//! order of preference:
//!
//! 1. a root whose children form a single repeated collection is itself
//!    the record sequence, whatever the collection is called;
//! 2. a child collection named `ticket` (a single child is promoted to a
//!    one-element sequence);
//! 3. the same rule for a collection named `item`;
//! 4. otherwise the whole root is one record.
//!
//! Leaf elements become string fields; nested elements become nested
//! object values. Element attributes are not mapped. The parse is one
//! synchronous unit of work.

use model::FieldMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::Value;

use crate::error::NormalizeError;

/// Child-collection names recognized as record containers, in preference
/// order.
const RECORD_COLLECTIONS: [&str; 2] = ["ticket", "item"];

/// Parses XML bytes into one field-mapping per record.
pub fn normalize_xml(raw: &[u8]) -> Result<Vec<FieldMap>, NormalizeError> {
    let text =
        std::str::from_utf8(raw).map_err(|err| NormalizeError::InvalidUtf8(err.to_string()))?;
    let mut reader = Reader::from_str(text);

    // Locate the root element, skipping the prolog.
    let root = loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = element_name(&start);
                break parse_element(&mut reader, &name)?;
            }
            Ok(Event::Empty(_)) => break XmlNode::default(),
            Ok(Event::Eof) => {
                return Err(NormalizeError::Xml("document has no root element".into()))
            }
            Ok(_) => continue,
            Err(err) => return Err(NormalizeError::Xml(err.to_string())),
        }
    };

    // The parser is lenient about sibling roots; the contract is not.
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(_)) | Ok(Event::Empty(_)) => {
                return Err(NormalizeError::Xml(
                    "document must have exactly one root element".into(),
                ))
            }
            Ok(_) => continue,
            Err(err) => return Err(NormalizeError::Xml(err.to_string())),
        }
    }

    Ok(extract_records(root))
}

/// One parsed element: accumulated text plus child elements in document
/// order. Repeated child names are grouped later, during value
/// conversion.
#[derive(Debug, Default)]
struct XmlNode {
    text: String,
    children: Vec<(String, XmlNode)>,
}

/// Consumes events up to and including the element's matching end tag.
/// Tag-name balance itself is enforced by the parser.
fn parse_element(reader: &mut Reader<&[u8]>, name: &str) -> Result<XmlNode, NormalizeError> {
    let mut node = XmlNode::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let child_name = element_name(&start);
                let child = parse_element(reader, &child_name)?;
                node.children.push((child_name, child));
            }
            Ok(Event::Empty(start)) => {
                node.children.push((element_name(&start), XmlNode::default()));
            }
            Ok(Event::Text(text)) => {
                let unescaped = text
                    .unescape()
                    .map_err(|err| NormalizeError::Xml(err.to_string()))?;
                push_text(&mut node, unescaped.trim());
            }
            Ok(Event::CData(data)) => {
                let bytes = data.into_inner();
                push_text(&mut node, String::from_utf8_lossy(&bytes).trim());
            }
            Ok(Event::End(_)) => return Ok(node),
            Ok(Event::Eof) => {
                return Err(NormalizeError::Xml(format!(
                    "unexpected end of document inside <{name}>"
                )))
            }
            Ok(_) => {}
            Err(err) => return Err(NormalizeError::Xml(err.to_string())),
        }
    }
}

fn push_text(node: &mut XmlNode, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    if !node.text.is_empty() {
        node.text.push(' ');
    }
    node.text.push_str(fragment);
}

fn element_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

/// Leaf elements become strings; elements with children become objects,
/// with repeated child names collapsing into arrays.
fn node_to_value(node: XmlNode) -> Value {
    if node.children.is_empty() {
        return Value::String(node.text);
    }

    let mut fields = FieldMap::new();
    for (name, child) in node.children {
        let value = node_to_value(child);
        match fields.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                fields.insert(name, value);
            }
        }
    }
    Value::Object(fields)
}

fn extract_records(root: XmlNode) -> Vec<FieldMap> {
    let mut fields = match node_to_value(root) {
        Value::Object(fields) => fields,
        // A root with no child elements is a single, field-less record.
        _ => return vec![FieldMap::new()],
    };

    let structurally_array =
        fields.len() == 1 && matches!(fields.values().next(), Some(Value::Array(_)));

    let collection = if structurally_array {
        fields.keys().next().cloned()
    } else {
        RECORD_COLLECTIONS
            .iter()
            .find(|name| fields.contains_key(**name))
            .map(|name| name.to_string())
    };

    if let Some(name) = collection {
        match fields.remove(&name) {
            Some(Value::Array(items)) => return items.into_iter().map(value_to_record).collect(),
            // A single child is promoted to a one-element sequence.
            Some(single) => return vec![value_to_record(single)],
            None => {}
        }
    }

    // No recognizable collection: the whole root is one record.
    vec![fields]
}

fn value_to_record(value: Value) -> FieldMap {
    match value {
        Value::Object(fields) => fields,
        // A scalar record carries no fields; validation rejects it
        // row-locally rather than failing the batch.
        _ => FieldMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_collection_yields_one_record_per_child() {
        let raw = b"<tickets>\
            <ticket><customer_id>CUST-001</customer_id><subject>First</subject></ticket>\
            <ticket><customer_id>CUST-002</customer_id><subject>Second</subject></ticket>\
        </tickets>";
        let rows = normalize_xml(raw).expect("parse");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["customer_id"], "CUST-001");
        assert_eq!(rows[1]["subject"], "Second");
    }

    #[test]
    fn single_ticket_child_is_promoted_to_one_record() {
        let raw = b"<import><ticket><subject>Only one</subject></ticket></import>";
        let rows = normalize_xml(raw).expect("parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["subject"], "Only one");
    }

    #[test]
    fn item_collection_is_recognized_when_no_ticket_children_exist() {
        let raw = b"<feed>\
            <item><subject>A</subject></item>\
            <item><subject>B</subject></item>\
        </feed>";
        let rows = normalize_xml(raw).expect("parse");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["subject"], "B");
    }

    #[test]
    fn ticket_children_take_precedence_over_item_children() {
        let raw = b"<mixed>\
            <ticket><subject>from ticket</subject></ticket>\
            <item><subject>from item</subject></item>\
        </mixed>";
        let rows = normalize_xml(raw).expect("parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["subject"], "from ticket");
    }

    #[test]
    fn uniformly_repeated_children_are_structurally_an_array() {
        let raw = b"<rows>\
            <row><subject>A</subject></row>\
            <row><subject>B</subject></row>\
            <row><subject>C</subject></row>\
        </rows>";
        let rows = normalize_xml(raw).expect("parse");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2]["subject"], "C");
    }

    #[test]
    fn root_without_collections_is_a_single_record() {
        let raw = b"<ticket>\
            <subject>Standalone</subject>\
            <description>One record</description>\
        </ticket>";
        let rows = normalize_xml(raw).expect("parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["subject"], "Standalone");
        assert_eq!(rows[0]["description"], "One record");
    }

    #[test]
    fn nested_elements_become_nested_objects() {
        let raw = b"<ticket>\
            <subject>s</subject>\
            <metadata><source>web</source><region>eu</region></metadata>\
        </ticket>";
        let rows = normalize_xml(raw).expect("parse");

        assert_eq!(rows[0]["metadata"]["source"], "web");
        assert_eq!(rows[0]["metadata"]["region"], "eu");
    }

    #[test]
    fn scalar_record_elements_normalize_to_empty_mappings() {
        let raw = b"<tickets><ticket>junk</ticket>\
            <ticket><subject>ok</subject></ticket></tickets>";
        let rows = normalize_xml(raw).expect("parse");

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1]["subject"], "ok");
    }

    #[test]
    fn entities_are_unescaped_and_text_trimmed() {
        let raw = b"<ticket><subject>  Q&amp;A about &lt;widgets&gt;  </subject></ticket>";
        let rows = normalize_xml(raw).expect("parse");

        assert_eq!(rows[0]["subject"], "Q&A about <widgets>");
    }

    #[test]
    fn attributes_are_not_mapped() {
        let raw = b"<ticket id=\"42\"><subject>s</subject></ticket>";
        let rows = normalize_xml(raw).expect("parse");

        assert_eq!(rows.len(), 1);
        assert!(rows[0].get("id").is_none());
    }

    #[test]
    fn mismatched_tags_are_a_normalization_failure() {
        let err = normalize_xml(b"<a><b>text</a></b>").expect_err("mismatched");
        assert!(matches!(err, NormalizeError::Xml(_)));
    }

    #[test]
    fn truncated_documents_are_a_normalization_failure() {
        let err = normalize_xml(b"<tickets><ticket><subject>s</subject>").expect_err("truncated");
        match err {
            NormalizeError::Xml(message) => assert!(message.contains("unexpected end")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sibling_roots_are_rejected() {
        let err = normalize_xml(b"<a/><b/>").expect_err("two roots");
        match err {
            NormalizeError::Xml(message) => assert!(message.contains("exactly one root")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_documents_are_rejected() {
        let err = normalize_xml(b"   ").expect_err("no root");
        assert!(matches!(err, NormalizeError::Xml(_)));
    }

    #[test]
    fn non_utf8_payloads_are_rejected() {
        let err = normalize_xml(&[0xFF, 0xFE, 0x3C]).expect_err("bad bytes");
        assert!(matches!(err, NormalizeError::InvalidUtf8(_)));
    }
}
