use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

use super::PRODUCER;
use crate::core::InvoiceError;
use crate::layout::metrics::MM_PER_POINT;
use crate::layout::{Element, FontStyle, Layout, Page};

/// Border stroke width in points.
const BORDER_WIDTH: f32 = 0.57;

/// Encode a finished layout as PDF bytes.
///
/// The document carries no timestamps or random identifiers, so equal
/// layouts always produce equal bytes.
pub fn encode_layout(layout: &Layout) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();
    let resources_id = add_font_resources(&mut doc);
    let media_box = vec![
        0.into(),
        0.into(),
        Object::Real(mm_to_pt(layout.page_width)),
        Object::Real(mm_to_pt(layout.page_height)),
    ];

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = page_content(page, layout.page_height)
            .encode()
            .map_err(|e| InvoiceError::Render(format!("failed to encode page {}: {e}", page.number)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => Object::Integer(kids.len() as i64),
        "Kids" => kids,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_text(&layout.title), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Render(format!("failed to save PDF: {e}")))?;

    Ok(output)
}

fn add_font_resources(doc: &mut Document) -> ObjectId {
    let mut fonts = Dictionary::new();
    for font in [FontStyle::Regular, FontStyle::Bold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), Object::Reference(font_id));
    }
    doc.add_object(dictionary! {
        "Font" => fonts,
    })
}

fn page_content(page: &Page, page_height: f32) -> Content {
    let mut operations = vec![Operation::new("w", vec![Object::Real(BORDER_WIDTH)])];

    for element in &page.elements {
        match element {
            Element::Border(rect) => {
                operations.push(Operation::new(
                    "re",
                    vec![
                        Object::Real(mm_to_pt(rect.x)),
                        Object::Real(mm_to_pt(page_height - rect.y - rect.height)),
                        Object::Real(mm_to_pt(rect.width)),
                        Object::Real(mm_to_pt(rect.height)),
                    ],
                ));
                operations.push(Operation::new("S", vec![]));
            }
            Element::Text(run) => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![run.font.resource_name().into(), Object::Real(run.size)],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![
                        Object::Real(mm_to_pt(run.x)),
                        Object::Real(mm_to_pt(page_height - run.baseline)),
                    ],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_text(&run.text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
        }
    }

    Content { operations }
}

fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_POINT
}

/// WinAnsiEncoding code points in 0x80..=0x9F. The rest of 0x20..=0xFF
/// coincides with Latin-1.
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80), // €
    ('\u{201A}', 0x82), // ‚
    ('\u{0192}', 0x83), // ƒ
    ('\u{201E}', 0x84), // „
    ('\u{2026}', 0x85), // …
    ('\u{2020}', 0x86), // †
    ('\u{2021}', 0x87), // ‡
    ('\u{02C6}', 0x88), // ˆ
    ('\u{2030}', 0x89), // ‰
    ('\u{0160}', 0x8A), // Š
    ('\u{2039}', 0x8B), // ‹
    ('\u{0152}', 0x8C), // Œ
    ('\u{017D}', 0x8E), // Ž
    ('\u{2018}', 0x91), // ‘
    ('\u{2019}', 0x92), // ’
    ('\u{201C}', 0x93), // “
    ('\u{201D}', 0x94), // ”
    ('\u{2022}', 0x95), // •
    ('\u{2013}', 0x96), // –
    ('\u{2014}', 0x97), // —
    ('\u{02DC}', 0x98), // ˜
    ('\u{2122}', 0x99), // ™
    ('\u{0161}', 0x9A), // š
    ('\u{203A}', 0x9B), // ›
    ('\u{0153}', 0x9C), // œ
    ('\u{017E}', 0x9E), // ž
    ('\u{0178}', 0x9F), // Ÿ
];

/// Encode text for a WinAnsi simple font. Characters the encoding cannot
/// represent become `?`.
pub(crate) fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => match WIN_ANSI_HIGH.iter().find(|(ch, _)| *ch == c) {
                Some((_, byte)) => *byte,
                None => {
                    log::warn!("character {c:?} cannot be encoded in WinAnsi, substituting '?'");
                    b'?'
                }
            },
        })
        .collect()
}

/// Inverse of [`encode_text`] for a single byte.
pub(crate) fn decode_byte(byte: u8) -> char {
    WIN_ANSI_HIGH
        .iter()
        .find(|(_, b)| *b == byte)
        .map_or(char::from(byte), |(c, _)| *c)
}
