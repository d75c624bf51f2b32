use lopdf::content::Content;
use lopdf::{Document, Object};

use super::encode::decode_byte;
use crate::core::InvoiceError;

/// Read back the text runs of a rendered invoice, one list per page.
///
/// Only understands the simple `Tj` runs the encoder writes; it is meant for
/// checking rendered documents, not for general PDF text extraction.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<Vec<Vec<String>>, InvoiceError> {
    let doc = Document::load_mem(pdf_bytes)
        .map_err(|e| InvoiceError::Render(format!("failed to load PDF: {e}")))?;

    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let data = doc
                .get_page_content(page_id)
                .map_err(|e| InvoiceError::Render(format!("failed to read page content: {e}")))?;
            let content = Content::decode(&data)
                .map_err(|e| InvoiceError::Render(format!("failed to decode page content: {e}")))?;
            Ok(content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| op.operands.first().and_then(decode_text))
                .collect())
        })
        .collect()
}

fn decode_text(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(bytes.iter().map(|&b| decode_byte(b)).collect()),
        _ => None,
    }
}
