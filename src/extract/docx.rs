//! DOCX text extraction.
//!
//! A DOCX file is a zip package; the text lives in `word/document.xml`
//! as `<w:t>` runs grouped into `<w:p>` paragraphs. Runs are
//! concatenated in document order with paragraph breaks. True
//! pagination is not recoverable from the packaging, so the page count
//! is always 1.

use std::io::{Cursor, Read};

use crate::error::ExtractError;
use crate::models::ExtractedText;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract paragraph text from DOCX bytes.
pub fn extract_docx(content: &[u8]) -> Result<ExtractedText, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content))
        .map_err(|e| ExtractError::MalformedDocument(format!("not a zip archive: {}", e)))?;

    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
        ExtractError::MalformedDocument(format!("missing {}: {}", DOCUMENT_PART, e))
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractError::MalformedDocument(format!("unreadable document part: {}", e)))?;

    Ok(ExtractedText::from_text_layer(document_xml_text(&xml)))
}

/// Walk the document XML and collect `<w:t>` run text in order.
///
/// Hand-rolled scan instead of a full XML parser: only three tags
/// matter (`w:t` runs, `w:p` paragraph ends, `w:br`/`w:tab` breaks) and
/// WordprocessingML escapes are limited to the five XML entities.
fn document_xml_text(xml: &str) -> String {
    let mut out = String::new();
    let mut rest = xml;

    while let Some(lt) = rest.find('<') {
        let tag_start = &rest[lt + 1..];
        let Some(gt) = tag_start.find('>') else { break };
        let tag = &tag_start[..gt];
        let after_tag = &tag_start[gt + 1..];

        let name = tag_name(tag);
        if name == "w:t" {
            // Self-closing empty run carries no text.
            if tag.ends_with('/') {
                rest = after_tag;
                continue;
            }
            let Some(end) = after_tag.find("</w:t>") else { break };
            out.push_str(&unescape_xml(&after_tag[..end]));
            rest = &after_tag[end + "</w:t>".len()..];
        } else if name == "/w:p" {
            out.push('\n');
            rest = after_tag;
        } else if name == "w:br" || name == "w:cr" {
            out.push('\n');
            rest = after_tag;
        } else if name == "w:tab" {
            out.push('\t');
            rest = after_tag;
        } else {
            rest = after_tag;
        }
    }

    // Collapse the trailing paragraph break.
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Element name of a raw tag body: attributes and the self-closing
/// slash stripped, leading `/` of close tags kept.
fn tag_name(tag: &str) -> &str {
    let tag = tag.trim_end_matches('/');
    tag.split_whitespace().next().unwrap_or(tag)
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
