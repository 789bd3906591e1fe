//! Word (.docx) summary document.
//!
//! A .docx file is a zip package of WordprocessingML parts. Only the parts
//! Word needs to open the file are written: content types, package
//! relationships, styles, and the document body.

use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::config::ExportSettings;
use crate::entry::ExportRequest;
use crate::error::{DeadlineError, DeadlineResult};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Column width in twentieths of a point (two columns across a 6.5in body)
const COLUMN_WIDTH: u32 = 4680;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:rPr><w:sz w:val="22"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="480" w:after="240"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style><w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblCellMar><w:left w:w="108" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style><w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/></w:tblBorders></w:tblPr></w:style></w:styles>"#;

/// Build the document package.
///
/// Blank rows (no event and no date) are filtered first, then rows whose
/// date does not parse. Dates are shown exactly as supplied. Returns the
/// package bytes and the number of entries left out.
pub fn generate_docx(request: &ExportRequest, settings: &ExportSettings) -> DeadlineResult<(Vec<u8>, usize)> {
    let blank = request.entries().iter().filter(|e| e.is_blank()).count();
    if blank > 0 {
        log::debug!("Document export: ignoring {} blank rows", blank);
    }

    let rows: Vec<(&str, &str)> = request
        .entries()
        .iter()
        .filter(|entry| !entry.is_blank())
        .filter(|entry| entry.parsed_date().is_some())
        .map(|entry| (entry.event.as_str(), entry.date.trim()))
        .collect();
    let skipped = request.entries().len() - rows.len();

    let document = document_xml(request, settings, &rows)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        // Fixed timestamp keeps the package byte-stable
        .last_modified_time(DateTime::default());

    for (name, contents) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
        ("word/styles.xml", STYLES_XML.as_bytes()),
        ("word/document.xml", document.as_slice()),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(contents)?;
    }

    let cursor = zip.finish()?;
    Ok((cursor.into_inner(), skipped))
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// WordprocessingML body: heading, optional client/trial lines, deadline table.
fn document_xml(
    request: &ExportRequest,
    settings: &ExportSettings,
    rows: &[(&str, &str)],
) -> DeadlineResult<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
    )?;

    start(&mut writer, "w:document", &[("xmlns:w", W_NS)])?;
    start(&mut writer, "w:body", &[])?;

    paragraph(&mut writer, &settings.document_title, Some("Heading1"))?;
    if !request.client_name().is_empty() {
        paragraph(&mut writer, &format!("Client: {}", request.client_name()), None)?;
    }
    if let Some(trial_date) = request.trial_date() {
        paragraph(&mut writer, &format!("Trial Date: {}", trial_date), None)?;
    }

    let width = COLUMN_WIDTH.to_string();
    start(&mut writer, "w:tbl", &[])?;
    start(&mut writer, "w:tblPr", &[])?;
    empty(&mut writer, "w:tblStyle", &[("w:val", "TableGrid")])?;
    empty(&mut writer, "w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
    empty(&mut writer, "w:tblLook", &[("w:val", "04A0")])?;
    end(&mut writer, "w:tblPr")?;
    start(&mut writer, "w:tblGrid", &[])?;
    empty(&mut writer, "w:gridCol", &[("w:w", width.as_str())])?;
    empty(&mut writer, "w:gridCol", &[("w:w", width.as_str())])?;
    end(&mut writer, "w:tblGrid")?;

    table_row(&mut writer, "Event", "Deadline", &width)?;
    for (event, date) in rows {
        table_row(&mut writer, event, date, &width)?;
    }
    end(&mut writer, "w:tbl")?;

    start(&mut writer, "w:sectPr", &[])?;
    empty(&mut writer, "w:pgSz", &[("w:w", "12240"), ("w:h", "15840")])?;
    empty(
        &mut writer,
        "w:pgMar",
        &[
            ("w:top", "1440"),
            ("w:right", "1440"),
            ("w:bottom", "1440"),
            ("w:left", "1440"),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    end(&mut writer, "w:sectPr")?;

    end(&mut writer, "w:body")?;
    end(&mut writer, "w:document")?;

    Ok(writer.into_inner().into_inner())
}

fn paragraph(writer: &mut XmlWriter, text: &str, style: Option<&str>) -> DeadlineResult<()> {
    start(writer, "w:p", &[])?;
    if let Some(style) = style {
        start(writer, "w:pPr", &[])?;
        empty(writer, "w:pStyle", &[("w:val", style)])?;
        end(writer, "w:pPr")?;
    }
    run(writer, text)?;
    end(writer, "w:p")
}

fn run(writer: &mut XmlWriter, text: &str) -> DeadlineResult<()> {
    // XML 1.0 has no representation for most control characters
    let text: String = text
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n'))
        .collect();
    if text.is_empty() {
        return Ok(());
    }

    start(writer, "w:r", &[])?;
    start(writer, "w:t", &[("xml:space", "preserve")])?;
    write(writer, Event::Text(BytesText::new(&text)))?;
    end(writer, "w:t")?;
    end(writer, "w:r")
}

fn table_row(writer: &mut XmlWriter, first: &str, second: &str, width: &str) -> DeadlineResult<()> {
    start(writer, "w:tr", &[])?;
    for text in [first, second] {
        start(writer, "w:tc", &[])?;
        start(writer, "w:tcPr", &[])?;
        empty(writer, "w:tcW", &[("w:w", width), ("w:type", "dxa")])?;
        end(writer, "w:tcPr")?;
        start(writer, "w:p", &[])?;
        run(writer, text)?;
        end(writer, "w:p")?;
        end(writer, "w:tc")?;
    }
    end(writer, "w:tr")
}

fn element<'a>(name: &'a str, attributes: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for attribute in attributes {
        element.push_attribute(*attribute);
    }
    element
}

fn start(writer: &mut XmlWriter, name: &str, attributes: &[(&str, &str)]) -> DeadlineResult<()> {
    write(writer, Event::Start(element(name, attributes)))
}

fn empty(writer: &mut XmlWriter, name: &str, attributes: &[(&str, &str)]) -> DeadlineResult<()> {
    write(writer, Event::Empty(element(name, attributes)))
}

fn end(writer: &mut XmlWriter, name: &str) -> DeadlineResult<()> {
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write(writer: &mut XmlWriter, event: Event<'_>) -> DeadlineResult<()> {
    writer
        .write_event(event)
        .map_err(|e| DeadlineError::DocumentXml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryInput;
    use std::io::Read;

    /// Unzip the package and return word/document.xml.
    fn document_part(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip package");
        let mut part = archive
            .by_name("word/document.xml")
            .expect("document part present");
        let mut xml = String::new();
        part.read_to_string(&mut xml).unwrap();
        xml
    }

    fn text_of(node: roxmltree::Node<'_, '_>) -> String {
        node.descendants()
            .filter(|n| n.has_tag_name((W_NS, "t")))
            .filter_map(|n| n.text())
            .collect()
    }

    /// Paragraph texts outside the table, and the text of each table row's cells.
    fn body_text(xml: &str) -> (Vec<String>, Vec<Vec<String>>) {
        let doc = roxmltree::Document::parse(xml).expect("well-formed document.xml");
        let body = doc
            .descendants()
            .find(|n| n.has_tag_name((W_NS, "body")))
            .unwrap();
        let paragraphs = body
            .children()
            .filter(|n| n.has_tag_name((W_NS, "p")))
            .map(text_of)
            .collect();
        let rows = body
            .descendants()
            .filter(|n| n.has_tag_name((W_NS, "tr")))
            .map(|tr| {
                tr.children()
                    .filter(|n| n.has_tag_name((W_NS, "tc")))
                    .map(text_of)
                    .collect()
            })
            .collect();

        (paragraphs, rows)
    }

    fn generate(request: &ExportRequest) -> (Vec<u8>, usize) {
        generate_docx(request, &ExportSettings::default()).unwrap()
    }

    #[test]
    fn test_document_has_heading_client_trial_and_rows() {
        let request = ExportRequest::new(
            "Smith",
            vec![
                EntryInput::new("Amend pleadings", "2025-11-24"),
                EntryInput::new("Conduct mediation", "2025-11-01"),
            ],
        )
        .with_trial_date("2025-12-01");

        let (bytes, skipped) = generate(&request);
        assert_eq!(skipped, 0);

        let (paragraphs, rows) = body_text(&document_part(&bytes));
        assert_eq!(
            paragraphs,
            vec![
                "Legal Deadlines Summary".to_string(),
                "Client: Smith".to_string(),
                "Trial Date: 2025-12-01".to_string(),
            ]
        );
        assert_eq!(
            rows,
            vec![
                vec!["Event".to_string(), "Deadline".to_string()],
                vec!["Amend pleadings".to_string(), "2025-11-24".to_string()],
                vec!["Conduct mediation".to_string(), "2025-11-01".to_string()],
            ]
        );
    }

    #[test]
    fn test_optional_lines_are_omitted() {
        let (bytes, _) = generate(&ExportRequest::new("", vec![]));
        let (paragraphs, rows) = body_text(&document_part(&bytes));

        assert_eq!(paragraphs, vec!["Legal Deadlines Summary".to_string()]);
        assert_eq!(rows.len(), 1, "Empty export still has the header row");
    }

    #[test]
    fn test_blank_and_undated_rows_are_filtered() {
        let request = ExportRequest::new(
            "",
            vec![
                EntryInput::new("", ""),
                EntryInput::new("  ", " "),
                EntryInput::new("No date yet", ""),
                EntryInput::new("Kept", "2025-06-01"),
            ],
        );
        let (bytes, skipped) = generate(&request);
        let (_, rows) = body_text(&document_part(&bytes));

        assert_eq!(skipped, 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "Kept");
    }

    #[test]
    fn test_markup_characters_are_escaped() {
        let request = ExportRequest::new(
            "Smith & <Jones>",
            vec![EntryInput::new("Respond to \"motion\" re: O'Brien", "2025-06-01")],
        );
        let (bytes, _) = generate(&request);
        let xml = document_part(&bytes);

        assert!(xml.contains("Client: Smith &amp; &lt;Jones&gt;"));
        let (paragraphs, rows) = body_text(&xml);
        assert_eq!(paragraphs[1], "Client: Smith & <Jones>");
        assert_eq!(rows[1][0], "Respond to \"motion\" re: O'Brien");
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let request = ExportRequest::new("Smith\u{0007}", vec![EntryInput::new("Bell\u{0000}ringer", "2025-06-01")]);
        let (bytes, _) = generate(&request);
        let (paragraphs, rows) = body_text(&document_part(&bytes));

        assert_eq!(paragraphs[1], "Client: Smith");
        assert_eq!(rows[1][0], "Bellringer");
    }

    #[test]
    fn test_custom_title_from_settings() {
        let settings = ExportSettings {
            document_title: "Texas Family Law Trial Deadlines".to_string(),
            ..ExportSettings::default()
        };
        let (bytes, _) = generate_docx(&ExportRequest::new("", vec![]), &settings).unwrap();
        let (paragraphs, _) = body_text(&document_part(&bytes));
        assert_eq!(paragraphs[0], "Texas Family Law Trial Deadlines");
    }

    #[test]
    fn test_package_has_required_parts_and_is_stable() {
        let request = ExportRequest::new("Smith", vec![EntryInput::new("Mediation", "2025-06-01")]);
        let (first, _) = generate(&request);
        let (second, _) = generate(&request);
        assert_eq!(first, second, "Same request should produce identical bytes");

        let archive = zip::ZipArchive::new(Cursor::new(first.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/document.xml",
        ] {
            assert!(names.contains(&part), "Missing part {}. Got: {:?}", part, names);
        }
    }
}
