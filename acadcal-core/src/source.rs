//! Upstream feed ingestion.
//!
//! The registrar publishes its calendar as an XML document shaped like:
//!
//! ```xml
//! <set>
//!   <node>
//!     <id>1234</id>
//!     <term>Fall 2024</term>
//!     <title>Registration Opens</title>
//!     <textDescription>null</textDescription>
//!     <timeStart><span class="date-display-single">(All day)</span></timeStart>
//!     <dateStartUnix><span>1700000000</span></dateStartUnix>
//!     ...
//!   </node>
//! </set>
//! ```
//!
//! Every value arrives as a string and absence is spelled `"null"`. This module
//! converts each `<node>` into a typed [`SourceEvent`] once, so nothing
//! downstream ever sees the sentinel.

use roxmltree::{Document, Node};

use crate::error::{AcadCalError, AcadCalResult};

/// `timeStart` value marking an event without a time of day.
pub const ALL_DAY_SENTINEL: &str = "(All day)";

/// Upstream spelling of "no value".
const NULL_SENTINEL: &str = "null";

const ROOT_ELEMENT: &str = "set";
const NODE_ELEMENT: &str = "node";

/// One calendar entry from the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEvent {
    pub id: String,
    /// Academic term label, e.g. "Spring 2025"
    pub term: String,
    pub title: String,
    pub text_description: Option<String>,
    /// Details page, usually relative to the feed URL
    pub path: Option<String>,
    /// Last modification, Unix seconds
    pub updated: i64,
    pub associated_link: Option<String>,
    /// Free-text attribute blob (audience, category, ...)
    pub event_attrs: Option<String>,
    pub date_start_unix: i64,
    pub date_end_unix: i64,
    /// Textual time of day, or [`ALL_DAY_SENTINEL`]
    pub time_start: String,
}

impl SourceEvent {
    pub fn is_all_day(&self) -> bool {
        self.time_start == ALL_DAY_SENTINEL
    }

    /// Convert a single `<node>` element.
    ///
    /// `index` is the node's position in the feed and only used for error messages
    /// when the node has no usable id.
    fn from_node(node: Node<'_, '_>, index: usize) -> AcadCalResult<Self> {
        let id = required_text(node, "id", index)?;
        if id.is_empty() {
            return Err(AcadCalError::FieldCoercion {
                node: format!("#{index}"),
                field: "id",
                value: id,
            });
        }

        Ok(SourceEvent {
            term: required_text(node, "term", index)?,
            title: required_text(node, "title", index)?,
            text_description: optional_text(node, "textDescription"),
            path: optional_text(node, "path"),
            updated: timestamp(node, "updated", &id, index)?,
            associated_link: optional_text(node, "associatedLink"),
            event_attrs: optional_text(node, "eventAttrs"),
            date_start_unix: timestamp(node, "dateStartUnix", &id, index)?,
            date_end_unix: timestamp(node, "dateEndUnix", &id, index)?,
            time_start: required_text(node, "timeStart", index)?,
            id,
        })
    }
}

/// Parse the upstream XML document into source events, in document order.
pub fn parse_feed(xml: &str) -> AcadCalResult<Vec<SourceEvent>> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    if root.tag_name().name() != ROOT_ELEMENT {
        return Err(AcadCalError::FeedParse(format!(
            "expected <{ROOT_ELEMENT}> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    root.children()
        .filter(|n| n.is_element() && n.tag_name().name() == NODE_ELEMENT)
        .enumerate()
        .map(|(index, node)| SourceEvent::from_node(node, index))
        .collect()
}

/// Concatenated, trimmed text content of the named child element.
///
/// Reading all descendant text lets plain fields (`<id>1</id>`) and wrapped
/// fields (`<timeStart><span>..</span></timeStart>`) share one code path.
fn field_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    let field = node
        .children()
        .find(|c| c.is_element() && c.tag_name().name() == name)?;

    let text: String = field
        .descendants()
        .filter(|d| d.is_text())
        .filter_map(|d| d.text())
        .collect();

    Some(text.trim().to_string())
}

fn required_text(node: Node<'_, '_>, name: &'static str, index: usize) -> AcadCalResult<String> {
    field_text(node, name).ok_or_else(|| {
        AcadCalError::FeedParse(format!("node #{index} is missing required <{name}>"))
    })
}

/// Optional fields treat a missing element, an empty value and `"null"` alike.
fn optional_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    field_text(node, name).filter(|text| !text.is_empty() && text != NULL_SENTINEL)
}

fn timestamp(node: Node<'_, '_>, name: &'static str, id: &str, index: usize) -> AcadCalResult<i64> {
    let raw = required_text(node, name, index)?;
    raw.parse::<i64>().map_err(|_| AcadCalError::FieldCoercion {
        node: id.to_string(),
        field: name,
        value: raw,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Render a `<node>` element the way the registrar feed does.
    pub(crate) fn node_xml(fields: &[(&str, &str)]) -> String {
        let mut xml = String::from("<node>");
        for (name, value) in fields {
            match *name {
                "timeStart" | "dateStartUnix" | "dateEndUnix" => xml.push_str(&format!(
                    "<{name}><span class=\"date-display-single\">{value}</span></{name}>"
                )),
                _ => xml.push_str(&format!("<{name}>{value}</{name}>")),
            }
        }
        xml.push_str("</node>");
        xml
    }

    pub(crate) fn feed_xml(nodes: &[String]) -> String {
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<set>{}</set>", nodes.concat())
    }

    pub(crate) fn advising_day_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("id", "E1"),
            ("term", "Fall 2024"),
            ("title", "Advising Day"),
            ("textDescription", "null"),
            ("path", "/x"),
            ("updated", "1699000000"),
            ("associatedLink", "null"),
            ("eventAttrs", "null"),
            ("timeStart", "9:00 AM"),
            ("dateStartUnix", "1700000000"),
            ("dateEndUnix", "1700003600"),
        ]
    }

    fn with_field(name: &'static str, value: &'static str) -> Vec<(&'static str, &'static str)> {
        advising_day_fields()
            .into_iter()
            .map(|(k, v)| if k == name { (k, value) } else { (k, v) })
            .collect()
    }

    #[test]
    fn test_parse_feed_reads_all_fields() {
        let xml = feed_xml(&[node_xml(&advising_day_fields())]);
        let events = parse_feed(&xml).unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.id, "E1");
        assert_eq!(event.term, "Fall 2024");
        assert_eq!(event.title, "Advising Day");
        assert_eq!(event.path.as_deref(), Some("/x"));
        assert_eq!(event.updated, 1_699_000_000);
        assert_eq!(event.date_start_unix, 1_700_000_000);
        assert_eq!(event.date_end_unix, 1_700_003_600);
        assert_eq!(event.time_start, "9:00 AM");
        assert!(!event.is_all_day());
    }

    #[test]
    fn test_null_sentinel_becomes_none() {
        let xml = feed_xml(&[node_xml(&advising_day_fields())]);
        let event = &parse_feed(&xml).unwrap()[0];

        assert_eq!(event.text_description, None);
        assert_eq!(event.associated_link, None);
        assert_eq!(event.event_attrs, None);
    }

    #[test]
    fn test_empty_and_missing_optional_fields_become_none() {
        let fields: Vec<_> = with_field("textDescription", "   ")
            .into_iter()
            .filter(|(k, _)| *k != "eventAttrs")
            .collect();
        let event = &parse_feed(&feed_xml(&[node_xml(&fields)])).unwrap()[0];

        assert_eq!(event.text_description, None);
        assert_eq!(event.event_attrs, None);
    }

    #[test]
    fn test_all_day_sentinel_inside_span() {
        let fields = with_field("timeStart", "(All day)");
        let event = &parse_feed(&feed_xml(&[node_xml(&fields)])).unwrap()[0];
        assert!(event.is_all_day());
    }

    #[test]
    fn test_escaped_markup_in_text_is_decoded() {
        let fields = with_field("textDescription", "Bring ID &amp; forms");
        let event = &parse_feed(&feed_xml(&[node_xml(&fields)])).unwrap()[0];
        assert_eq!(event.text_description.as_deref(), Some("Bring ID & forms"));
    }

    #[test]
    fn test_preserves_document_order() {
        let first = node_xml(&with_field("id", "A"));
        let second = node_xml(&with_field("id", "B"));
        let events = parse_feed(&feed_xml(&[first, second])).unwrap();

        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_empty_set_yields_no_events() {
        assert!(parse_feed("<set></set>").unwrap().is_empty());
    }

    #[test]
    fn test_non_numeric_timestamp_is_coercion_error() {
        let fields = with_field("dateStartUnix", "tomorrow");
        let err = parse_feed(&feed_xml(&[node_xml(&fields)])).unwrap_err();

        match err {
            AcadCalError::FieldCoercion { node, field, value } => {
                assert_eq!(node, "E1");
                assert_eq!(field, "dateStartUnix");
                assert_eq!(value, "tomorrow");
            }
            other => panic!("expected FieldCoercion, got {other:?}"),
        }
    }

    #[test]
    fn test_null_timestamp_is_coercion_error() {
        let fields = with_field("updated", "null");
        let err = parse_feed(&feed_xml(&[node_xml(&fields)])).unwrap_err();
        assert!(matches!(err, AcadCalError::FieldCoercion { field: "updated", .. }));
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let fields: Vec<_> = advising_day_fields()
            .into_iter()
            .filter(|(k, _)| *k != "title")
            .collect();
        let err = parse_feed(&feed_xml(&[node_xml(&fields)])).unwrap_err();
        assert!(matches!(err, AcadCalError::FeedParse(_)));
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let fields = with_field("id", "");
        let err = parse_feed(&feed_xml(&[node_xml(&fields)])).unwrap_err();
        assert!(matches!(err, AcadCalError::FieldCoercion { field: "id", .. }));
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let err = parse_feed("<set><node>").unwrap_err();
        assert!(matches!(err, AcadCalError::FeedParse(_)));
    }

    #[test]
    fn test_wrong_root_is_parse_error() {
        let err = parse_feed("<rss><channel/></rss>").unwrap_err();
        assert!(matches!(err, AcadCalError::FeedParse(_)));
    }
}
