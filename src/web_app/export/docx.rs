// web_app/export/docx.rs - Render a ProposalDocument as a Word file

use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, Footer, Header, LineSpacing, Paragraph, Pic, Run, Style, StyleType,
};
use image::ImageFormat;

use super::document::{ProductBlock, ProposalDocument, SEPARATOR};
use super::ExportError;

const EMU_PER_PX: u32 = 9525;

pub const PRODUCT_IMAGE_PX: (u32, u32) = (200, 150);
pub const LOGO_PX: (u32, u32) = (100, 100);

/// Decode any supported format and re-encode as PNG
///
/// Returns the PNG bytes with the source pixel dimensions, or `None` if the
/// bytes are not an image we can read.
pub fn normalize_png(bytes: &[u8]) -> Option<(Vec<u8>, u32, u32)> {
    let decoded = match image::load_from_memory(bytes) {
        Ok(img) => img,
        Err(e) => {
            tracing::warn!("Dropping undecodable image ({} bytes): {}", bytes.len(), e);
            return None;
        }
    };

    let mut png = Cursor::new(Vec::new());
    if let Err(e) = decoded.write_to(&mut png, ImageFormat::Png) {
        tracing::warn!("Could not re-encode image as PNG: {}", e);
        return None;
    }
    Some((png.into_inner(), decoded.width(), decoded.height()))
}

fn picture(bytes: &[u8], (width, height): (u32, u32)) -> Option<Pic> {
    let (png, w, h) = normalize_png(bytes)?;
    Some(Pic::new_with_dimensions(png, w, h).size(width * EMU_PER_PX, height * EMU_PER_PX))
}

fn spaced(paragraph: Paragraph, before: u32, after: u32) -> Paragraph {
    paragraph.line_spacing(LineSpacing::new().before(before).after(after))
}

fn text(content: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(content))
}

fn heading_styles(docx: Docx) -> Docx {
    docx.add_style(
        Style::new("Title", StyleType::Paragraph)
            .name("Title")
            .size(48)
            .bold(),
    )
    .add_style(
        Style::new("Heading1", StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold(),
    )
    .add_style(
        Style::new("Heading2", StyleType::Paragraph)
            .name("Heading 2")
            .size(28)
            .bold(),
    )
}

fn product_paragraphs(block: &ProductBlock) -> Vec<Paragraph> {
    let mut paragraphs = Vec::with_capacity(6);

    if let Some(pic) = block.image.as_deref().and_then(|b| picture(b, PRODUCT_IMAGE_PX)) {
        paragraphs.push(spaced(
            Paragraph::new().add_run(Run::new().add_image(pic)).align(AlignmentType::Center),
            0,
            200,
        ));
    }

    paragraphs.push(spaced(text(&block.heading()).style("Heading1"), 0, 200));
    paragraphs.push(spaced(text(&block.description_line()), 0, 100));
    paragraphs.push(spaced(text(&block.price_line()), 0, 150));

    if let Some(warning) = block.warning_line() {
        paragraphs.push(spaced(
            Paragraph::new().add_run(Run::new().add_text(warning).bold().color("C0392B")),
            0,
            150,
        ));
    }

    paragraphs.push(spaced(text(SEPARATOR).align(AlignmentType::Center), 150, 300));
    paragraphs
}

/// Serialize the document to `.docx` bytes
pub fn render_docx(document: &ProposalDocument) -> Result<Vec<u8>, ExportError> {
    let mut letterhead = Run::new()
        .add_text(&document.letterhead.company_name)
        .bold()
        .size(32);
    if let Some(logo) = document.letterhead.logo.as_deref().and_then(|b| picture(b, LOGO_PX)) {
        letterhead = letterhead.add_text(" ").add_image(logo);
    }
    let header = Header::new().add_paragraph(spaced(
        Paragraph::new().add_run(letterhead).align(AlignmentType::Center),
        0,
        400,
    ));
    let footer = Footer::new().add_paragraph(spaced(
        text(&document.footer_text()).align(AlignmentType::Center),
        0,
        200,
    ));

    let mut docx = heading_styles(Docx::new()).header(header).footer(footer).add_paragraph(
        spaced(
            text(&document.title).style("Title").align(AlignmentType::Center),
            0,
            400,
        ),
    );

    let metadata = document.metadata_lines();
    let metadata_count = metadata.len();
    for (i, line) in metadata.into_iter().enumerate() {
        let after = if i + 1 == metadata_count { 400 } else { 80 };
        docx = docx.add_paragraph(spaced(text(&line), 0, after));
    }

    for block in &document.blocks {
        for paragraph in product_paragraphs(block) {
            docx = docx.add_paragraph(paragraph);
        }
    }

    docx = docx.add_paragraph(spaced(
        text(&document.grand_total_line())
            .style("Heading2")
            .align(AlignmentType::Center),
        400,
        0,
    ));

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ExportError::Serialization(e.to_string()))?;

    tracing::info!(
        "Rendered proposal with {} products ({} bytes)",
        document.blocks.len(),
        buffer.get_ref().len()
    );
    Ok(buffer.into_inner())
}
