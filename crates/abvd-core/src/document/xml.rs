//! XML wire format reader.

use std::borrow::Cow;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use super::{Document, DocumentError, RawRecord};

const RECORD_TAG: &str = "record";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Parses a language document from the XML returned by the server.
///
/// The server answers with bare `<record>` elements; those are wrapped in a
/// root element first. Text that starts with an XML declaration is taken to
/// be a complete document already.
pub fn parse_document(content: &str) -> Result<Document, DocumentError> {
    let records = read_records(content)?;
    debug!(records = records.len(), "read document records");
    Document::from_records(records)
}

/// Reads every `<record>` element into a flat field map, without
/// classifying it.
pub fn read_records(content: &str) -> Result<Vec<RawRecord>, DocumentError> {
    let xml = wrap_fragment(content);
    let mut reader = Reader::from_str(&xml);
    let mut records = Vec::new();
    let mut current: Option<RawRecord> = None;
    // Field being read: element name and accumulated text.
    let mut field: Option<(String, String)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = tag_name(e.name().as_ref());
                if let Some((parent, _)) = &field {
                    return Err(DocumentError::NestedElement {
                        field: parent.clone(),
                        element: name,
                    });
                }
                if current.is_some() {
                    field = Some((name, String::new()));
                } else if name == RECORD_TAG {
                    current = Some(RawRecord::new());
                }
            }
            Event::Empty(e) => {
                let name = tag_name(e.name().as_ref());
                if let Some((parent, _)) = &field {
                    return Err(DocumentError::NestedElement {
                        field: parent.clone(),
                        element: name,
                    });
                }
                if let Some(record) = current.as_mut() {
                    insert_field(record, name, None)?;
                } else if name == RECORD_TAG {
                    records.push(RawRecord::new());
                }
            }
            Event::Text(t) => {
                if let Some((_, text)) = field.as_mut() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some((_, text)) = field.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some((name, text)) = field.take() {
                    let value = if text.is_empty() { None } else { Some(text) };
                    if let Some(record) = current.as_mut() {
                        insert_field(record, name, value)?;
                    }
                } else if let Some(record) = current.take() {
                    records.push(record);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(records)
}

/// Wraps a bare record fragment into a complete XML document.
///
/// Text that already starts with an XML declaration is returned as is.
pub fn wrap_fragment(content: &str) -> Cow<'_, str> {
    if content.trim_start().starts_with("<?xml") {
        Cow::Borrowed(content)
    } else {
        Cow::Owned(format!("{}\n<abvd>\n{}\n</abvd>\n", XML_DECLARATION, content))
    }
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn insert_field(
    record: &mut RawRecord,
    name: String,
    value: Option<String>,
) -> Result<(), DocumentError> {
    if record.contains_key(&name) {
        return Err(DocumentError::DuplicateField(name));
    }
    record.insert(name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_records_fields() {
        let xml = "<record><id>1</id><word>hand</word><loan></loan><item/></record>";
        let records = read_records(xml).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], Some("1".to_string()));
        assert_eq!(records[0]["loan"], None);
        assert_eq!(records[0]["item"], None);
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = "<record><word>salt &amp; pepper</word></record>";
        let records = read_records(xml).unwrap();
        assert_eq!(records[0]["word"], Some("salt & pepper".to_string()));
    }

    #[test]
    fn test_duplicate_field() {
        let xml = "<record><id>1</id><id>2</id></record>";
        assert!(matches!(
            read_records(xml),
            Err(DocumentError::DuplicateField(f)) if f == "id"
        ));
    }

    #[test]
    fn test_nested_element() {
        let xml = "<record><word><b>hand</b></word></record>";
        assert!(matches!(
            read_records(xml),
            Err(DocumentError::NestedElement { .. })
        ));
    }

    #[test]
    fn test_wrap_fragment() {
        let wrapped = wrap_fragment("<record/>");
        assert!(wrapped.starts_with("<?xml"));
        assert!(wrapped.contains("<abvd>\n<record/>\n</abvd>"));
        assert_eq!(wrap_fragment(&wrapped), wrapped);
    }

    #[test]
    fn test_declared_document_is_not_wrapped() {
        let xml = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<abvd><record><id>7</id></record></abvd>";
        let records = read_records(xml).unwrap();
        assert_eq!(records[0]["id"], Some("7".to_string()));
    }
}
