//! Event description markup.
//!
//! Descriptions are built as a small typed tree of paragraphs and rendered
//! twice: to HTML (for `X-ALT-DESC`) through quick-xml's writer, which escapes
//! all text and attribute values, and to plain text (for `DESCRIPTION`) by
//! walking the same tree. Upstream text is never spliced into markup by hand.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{AcadCalError, AcadCalResult};
use crate::source::SourceEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Inline {
    Text(String),
    /// Anchor whose visible text is the URL itself
    Link(String),
    LineBreak,
}

/// A `<p>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn text(text: impl Into<String>) -> Self {
        Paragraph {
            inlines: vec![Inline::Text(text.into())],
        }
    }

    /// A paragraph holding `text`, with a period appended unless it already ends in one.
    pub fn sentence(text: &str) -> Self {
        if text.ends_with('.') {
            Self::text(text)
        } else {
            Self::text(format!("{text}."))
        }
    }

    fn push_text(&mut self, text: impl Into<String>) {
        self.inlines.push(Inline::Text(text.into()));
    }

    fn push_link(&mut self, url: &str) {
        self.inlines.push(Inline::Link(url.to_string()));
    }

    fn push_break(&mut self) {
        self.inlines.push(Inline::LineBreak);
    }

    fn write_html(&self, writer: &mut Writer<Vec<u8>>) -> AcadCalResult<()> {
        writer
            .write_event(Event::Start(BytesStart::new("p")))
            .map_err(markup_error)?;

        for inline in &self.inlines {
            match inline {
                Inline::Text(text) => writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(markup_error)?,
                Inline::Link(url) => {
                    let mut anchor = BytesStart::new("a");
                    anchor.push_attribute(("href", url.as_str()));
                    anchor.push_attribute(("target", "_blank"));
                    writer
                        .write_event(Event::Start(anchor))
                        .map_err(markup_error)?;
                    writer
                        .write_event(Event::Text(BytesText::new(url)))
                        .map_err(markup_error)?;
                    writer
                        .write_event(Event::End(BytesEnd::new("a")))
                        .map_err(markup_error)?;
                }
                Inline::LineBreak => writer
                    .write_event(Event::Empty(BytesStart::new("br")))
                    .map_err(markup_error)?,
            }
        }

        writer
            .write_event(Event::End(BytesEnd::new("p")))
            .map_err(markup_error)?;
        Ok(())
    }

    fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text(text) => text.as_str(),
                // Link text equals its href, so the href is never repeated
                Inline::Link(url) => url.as_str(),
                Inline::LineBreak => "\n",
            })
            .collect()
    }
}

/// An ordered sequence of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    paragraphs: Vec<Paragraph>,
}

impl Description {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph; `None` contributes nothing.
    pub fn push(&mut self, paragraph: Option<Paragraph>) {
        if let Some(paragraph) = paragraph {
            self.paragraphs.push(paragraph);
        }
    }

    /// A copy of this description with `paragraph` placed first.
    pub fn with_prefix(&self, paragraph: Paragraph) -> Self {
        let mut paragraphs = Vec::with_capacity(self.paragraphs.len() + 1);
        paragraphs.push(paragraph);
        paragraphs.extend(self.paragraphs.iter().cloned());
        Description { paragraphs }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn to_html(&self) -> AcadCalResult<String> {
        let mut writer = Writer::new(Vec::new());
        for paragraph in &self.paragraphs {
            paragraph.write_html(&mut writer)?;
        }

        String::from_utf8(writer.into_inner())
            .map_err(|e| AcadCalError::IcsGenerate(format!("description is not UTF-8: {e}")))
    }

    /// Paragraphs separated by a blank line, no wrapping.
    pub fn to_plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// The "Link:" / "More info:" paragraph, or `None` when neither URL is present.
///
/// Both URLs must already be absolute.
pub fn links_paragraph(associated_link: Option<&str>, more_info: Option<&str>) -> Option<Paragraph> {
    let lines: Vec<(&str, &str)> = [("Link: ", associated_link), ("More info: ", more_info)]
        .into_iter()
        .filter_map(|(label, url)| url.map(|url| (label, url)))
        .collect();

    if lines.is_empty() {
        return None;
    }

    let mut paragraph = Paragraph::default();
    for (i, (label, url)) in lines.into_iter().enumerate() {
        if i > 0 {
            paragraph.push_break();
        }
        paragraph.push_text(label);
        paragraph.push_link(url);
    }
    Some(paragraph)
}

/// The description body shared by every event produced from `source`:
/// attributes, free text, then links.
pub fn base_description(
    source: &SourceEvent,
    associated_link: Option<&str>,
    more_info: Option<&str>,
) -> Description {
    let mut description = Description::new();
    description.push(source.event_attrs.as_deref().map(Paragraph::sentence));
    description.push(source.text_description.as_deref().map(Paragraph::sentence));
    description.push(links_paragraph(associated_link, more_info));
    description
}

fn markup_error(err: impl std::fmt::Display) -> AcadCalError {
    AcadCalError::IcsGenerate(format!("failed to write description markup: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_appends_missing_period() {
        let html = Description {
            paragraphs: vec![Paragraph::sentence("Bring ID")],
        }
        .to_html()
        .unwrap();
        assert_eq!(html, "<p>Bring ID.</p>");
    }

    #[test]
    fn test_sentence_keeps_existing_period() {
        let html = Description {
            paragraphs: vec![Paragraph::sentence("Bring ID.")],
        }
        .to_html()
        .unwrap();
        assert_eq!(html, "<p>Bring ID.</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        let html = Description {
            paragraphs: vec![Paragraph::sentence("Grades <final> & transcripts")],
        }
        .to_html()
        .unwrap();
        assert_eq!(html, "<p>Grades &lt;final&gt; &amp; transcripts.</p>");
    }

    #[test]
    fn test_links_paragraph_both_lines() {
        let paragraph = links_paragraph(
            Some("https://example.edu/form"),
            Some("https://example.edu/event/1"),
        )
        .unwrap();
        let mut description = Description::new();
        description.push(Some(paragraph));

        assert_eq!(
            description.to_html().unwrap(),
            "<p>Link: <a href=\"https://example.edu/form\" target=\"_blank\">https://example.edu/form</a>\
             <br/>More info: <a href=\"https://example.edu/event/1\" target=\"_blank\">https://example.edu/event/1</a></p>"
        );
        assert_eq!(
            description.to_plain_text(),
            "Link: https://example.edu/form\nMore info: https://example.edu/event/1"
        );
    }

    #[test]
    fn test_links_paragraph_single_line_has_no_break() {
        let paragraph = links_paragraph(None, Some("https://example.edu/x")).unwrap();
        let mut description = Description::new();
        description.push(Some(paragraph));

        let html = description.to_html().unwrap();
        assert!(!html.contains("<br"));
        assert!(html.starts_with("<p>More info: <a "));
    }

    #[test]
    fn test_links_paragraph_omitted_without_links() {
        assert_eq!(links_paragraph(None, None), None);
    }

    #[test]
    fn test_href_attribute_is_escaped() {
        let paragraph = links_paragraph(Some("https://example.edu/?a=1&b=2"), None).unwrap();
        let mut description = Description::new();
        description.push(Some(paragraph));

        let html = description.to_html().unwrap();
        assert!(html.contains("href=\"https://example.edu/?a=1&amp;b=2\""));
        assert_eq!(description.to_plain_text(), "Link: https://example.edu/?a=1&b=2");
    }

    #[test]
    fn test_prefix_and_plain_text_paragraph_spacing() {
        let mut base = Description::new();
        base.push(Some(Paragraph::sentence("Undergraduate")));
        base.push(links_paragraph(None, Some("https://example.edu/x")));

        let prefixed = base.with_prefix(Paragraph::text("This event ends on Friday, May 2, 2025."));

        assert_eq!(
            prefixed.to_plain_text(),
            "This event ends on Friday, May 2, 2025.\n\nUndergraduate.\n\nMore info: https://example.edu/x"
        );
        // Base is untouched
        assert_eq!(base.paragraphs.len(), 2);
    }

    #[test]
    fn test_empty_description_renders_empty() {
        let description = Description::new();
        assert!(description.is_empty());
        assert_eq!(description.to_html().unwrap(), "");
        assert_eq!(description.to_plain_text(), "");
    }
}
