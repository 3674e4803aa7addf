use std::io::Read;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::AppError;

/// File types accepted for upload analysis.
pub const ALLOWED_TYPES: &[&str] = &["txt", "pdf", "docx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Text,
    Pdf,
    Docx,
}

/// Extracts plain text from an uploaded file, dispatching on the file
/// extension with the declared content type as fallback.
///
/// Unsupported types are a validation error; files of a supported type
/// that cannot be decoded are unprocessable.
pub fn extract_text(
    data: &[u8],
    file_name: &str,
    content_type: Option<&str>,
) -> Result<String, AppError> {
    let kind = detect_kind(file_name, content_type).ok_or_else(|| {
        AppError::Validation(format!(
            "Unsupported file type. Allowed types: {}",
            ALLOWED_TYPES.join(", ")
        ))
    })?;

    let text = match kind {
        FileKind::Text => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::UnprocessableEntity("File is not valid UTF-8 text".to_string()))?,
        FileKind::Pdf => extract_pdf(data)?,
        FileKind::Docx => extract_docx(data)?,
    };

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text found in file".to_string(),
        ));
    }
    Ok(text)
}

fn detect_kind(file_name: &str, content_type: Option<&str>) -> Option<FileKind> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("txt") => return Some(FileKind::Text),
        Some("pdf") => return Some(FileKind::Pdf),
        Some("docx") => return Some(FileKind::Docx),
        _ => {}
    }
    match content_type {
        Some("text/plain") => Some(FileKind::Text),
        Some("application/pdf") => Some(FileKind::Pdf),
        Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => {
            Some(FileKind::Docx)
        }
        _ => None,
    }
}

fn extract_pdf(data: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::UnprocessableEntity(format!("Failed to process PDF file: {e}")))
}

/// Walks `word/document.xml` inside the DOCX archive, collecting `<w:t>`
/// runs and turning paragraph ends into newlines.
fn extract_docx(data: &[u8]) -> Result<String, AppError> {
    let unreadable =
        |e: &dyn std::fmt::Display| AppError::UnprocessableEntity(format!("Failed to process DOCX file: {e}"));

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).map_err(|e| unreadable(&e))?;
    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|_| AppError::UnprocessableEntity("DOCX archive has no document body".to_string()))?;
    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| unreadable(&e))?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_run => {
                text.push_str(&t.unescape().map_err(|e| unreadable(&e))?)
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(unreadable(&e)),
            _ => {}
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();
            writer
                .start_file("word/document.xml", options)
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_txt_passthrough() {
        let text = extract_text(b"Plain text body.", "notes.txt", None).unwrap();
        assert_eq!(text, "Plain text body.");
    }

    #[test]
    fn test_txt_by_content_type_without_extension() {
        let text = extract_text(b"Body here.", "notes", Some("text/plain")).unwrap();
        assert_eq!(text, "Body here.");
    }

    #[test]
    fn test_txt_invalid_utf8_unprocessable() {
        let err = extract_text(&[0xff, 0xfe, 0x00], "bad.txt", None).unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = extract_text(b"data", "image.png", Some("image/png")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_empty_text_unprocessable() {
        let err = extract_text(b"   \n  ", "blank.txt", None).unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_docx_paragraph_extraction() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph here.</w:t></w:r></w:p>
    <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>
  </w:body>
</w:document>"#;
        let text = extract_text(&docx_bytes(xml), "doc.docx", None).unwrap();
        assert_eq!(text.trim(), "First paragraph here.\nSecond paragraph.");
    }

    #[test]
    fn test_docx_entity_unescaped() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Fish &amp; chips.</w:t></w:r></w:p></w:body></w:document>"#;
        let text = extract_text(&docx_bytes(xml), "doc.docx", None).unwrap();
        assert_eq!(text.trim(), "Fish & chips.");
    }

    #[test]
    fn test_docx_without_document_body_rejected() {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("unrelated.xml", options).unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let err = extract_text(&buf, "doc.docx", None).unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_docx_garbage_bytes_rejected() {
        let err = extract_text(b"definitely not a zip", "doc.docx", None).unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
