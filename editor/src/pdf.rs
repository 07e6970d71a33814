//! Scene → PDF projection.
//!
//! DESIGN
//! ======
//! Projection runs in two stages. [`layout`] turns a scene snapshot into a
//! [`PageLayout`]: absolutely positioned image, fill, and text nodes in paint
//! order, with text already wrapped and colors resolved. It is pure and
//! reads nothing but the snapshot. [`render`] writes a layout into a
//! single-page A4 document with `lopdf`, resolving image sources through an
//! [`ImageResolver`].
//!
//! Page space is 595×842 with a top-left origin; PDF user space is the same
//! size in points with a bottom-left origin, so `pdf_y = 842 - y - height`.
//!
//! TRADE-OFFS
//! ==========
//! Text uses the standard Type1 Helvetica faces with `WinAnsiEncoding`, so no
//! font program is embedded. Characters outside that encoding print as `?`.
//! Semibold and extrabold have no standard face and render with the bold one.
//!
//! ERROR HANDLING
//! ==============
//! Images that cannot be resolved or decoded are skipped with a warning;
//! the rest of the page still renders. Only document assembly failures
//! surface as [`ProjectError`].

#[cfg(test)]
#[path = "pdf_test.rs"]
mod pdf_test;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tracing::{debug, warn};

use crate::align::TextMeasure;
use crate::color::{Rgba, overlay_fill, text_fill};
use crate::consts::{PAGE_HEIGHT, PAGE_WIDTH, PDF_ASCENT_RATIO, PDF_TEXT_WRAP_WIDTH};
use crate::doc::{Element, FontWeight, Scene, TextAlign};
use crate::upload::{decode_data_uri, is_data_uri};

/// Failure to assemble the PDF.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Looks up image bytes for an element or background source.
pub trait ImageResolver {
    /// Raw encoded image bytes (PNG or JPEG) for `src`, or `None` if unavailable.
    fn resolve(&self, src: &str) -> Option<Vec<u8>>;
}

/// Resolves embedded `data:` URIs only; paths resolve to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriResolver;

impl ImageResolver for DataUriResolver {
    fn resolve(&self, src: &str) -> Option<Vec<u8>> {
        if !is_data_uri(src) {
            return None;
        }
        match decode_data_uri(src) {
            Ok(uri) => Some(uri.bytes),
            Err(e) => {
                warn!(error = %e, "undecodable data URI");
                None
            }
        }
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// A positioned bitmap, stretched to its box.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    pub src: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A solid rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct FillNode {
    pub color: Rgba,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One wrapped line, offset from the node's left edge by its alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub offset_x: f64,
}

/// A wrapped text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub x: f64,
    pub y: f64,
    pub wrap_width: f64,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub fill: Rgba,
    pub align: TextAlign,
    pub line_height: f64,
    pub lines: Vec<TextLine>,
}

/// A drawable item in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Image(ImageNode),
    Fill(FillNode),
    Text(TextNode),
}

/// Everything needed to draw one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<Node>,
}

/// Lay out a scene snapshot: background, overlay, then elements in list order.
#[must_use]
pub fn layout(scene: &Scene, measure: &dyn TextMeasure) -> PageLayout {
    let mut nodes = Vec::with_capacity(scene.len() + 2);

    if !scene.background_image.is_empty() {
        nodes.push(Node::Image(ImageNode {
            src: scene.background_image.clone(),
            x: 0.0,
            y: 0.0,
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
        }));
    }

    if scene.background_overlay_opacity > 0 {
        let color = overlay_fill(&scene.background_overlay, scene.background_overlay_opacity);
        if !color.is_invisible() {
            nodes.push(Node::Fill(FillNode { color, x: 0.0, y: 0.0, width: PAGE_WIDTH, height: PAGE_HEIGHT }));
        }
    }

    for element in scene.elements() {
        match element {
            Element::Image(image) => nodes.push(Node::Image(ImageNode {
                src: image.src.clone(),
                x: image.position.x,
                y: image.position.y,
                width: image.size.width,
                height: image.size.height,
            })),
            Element::Text(text) => {
                let font_size = f64::from(text.font_size);
                let mut fill = text_fill(&text.color);
                fill.a *= f64::from(text.opacity.min(100)) / 100.0;
                let lines = wrap_text(&text.content, font_size, PDF_TEXT_WRAP_WIDTH, measure)
                    .into_iter()
                    .map(|line| {
                        let width = measure.line_width(&line, font_size);
                        TextLine { offset_x: align_offset(text.align, width, PDF_TEXT_WRAP_WIDTH), text: line }
                    })
                    .collect();
                nodes.push(Node::Text(TextNode {
                    x: text.position.x,
                    y: text.position.y,
                    wrap_width: PDF_TEXT_WRAP_WIDTH,
                    font_size,
                    font_weight: text.font_weight,
                    fill,
                    align: text.align,
                    line_height: measure.line_height(font_size),
                    lines,
                }));
            }
        }
    }

    PageLayout { width: PAGE_WIDTH, height: PAGE_HEIGHT, nodes }
}

/// Greedy word wrap. Explicit newlines always break; a single word wider
/// than `max_width` stays on its own line and overflows.
#[must_use]
pub fn wrap_text(text: &str, font_size: f64, max_width: f64, measure: &dyn TextMeasure) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = format!("{line} {word}");
            if measure.line_width(&candidate, font_size) <= max_width {
                line = candidate;
            } else {
                out.push(std::mem::replace(&mut line, word.to_string()));
            }
        }
        out.push(line);
    }
    out
}

fn align_offset(align: TextAlign, line_width: f64, box_width: f64) -> f64 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => (box_width - line_width) / 2.0,
        TextAlign::Right => box_width - line_width,
    }
}

/// Standard Type1 face for a font weight.
#[must_use]
pub fn base_font(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "Helvetica",
        FontWeight::Semibold | FontWeight::Bold | FontWeight::Extrabold => "Helvetica-Bold",
    }
}

fn font_resource(weight: FontWeight) -> &'static str {
    match weight {
        FontWeight::Normal => "F1",
        FontWeight::Semibold | FontWeight::Bold | FontWeight::Extrabold => "F2",
    }
}

// =============================================================================
// RENDER
// =============================================================================

/// Render a layout to PDF bytes.
///
/// # Errors
///
/// Returns [`ProjectError`] if the document cannot be serialized.
pub fn render(layout: &PageLayout, resolver: &dyn ImageResolver) -> Result<Vec<u8>, ProjectError> {
    let mut doc = build_document(layout, resolver);
    doc.compress();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    debug!(bytes = bytes.len(), nodes = layout.nodes.len(), "pdf rendered");
    Ok(bytes)
}

/// Lay out and render a scene snapshot in one step.
///
/// # Errors
///
/// Returns [`ProjectError`] if the document cannot be serialized.
pub fn project(scene: &Scene, measure: &dyn TextMeasure, resolver: &dyn ImageResolver) -> Result<Vec<u8>, ProjectError> {
    render(&layout(scene, measure), resolver)
}

/// Accumulates resources and content operators for the single page.
struct PageWriter {
    content: String,
    xobjects: Dictionary,
    ext_gstates: Dictionary,
    image_count: usize,
    gstate_count: usize,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            content: String::new(),
            xobjects: Dictionary::new(),
            ext_gstates: Dictionary::new(),
            image_count: 0,
            gstate_count: 0,
        }
    }

    /// Register a fill-alpha graphics state and return its resource name.
    fn alpha_state(&mut self, alpha: f64) -> String {
        self.gstate_count += 1;
        let name = format!("GS{}", self.gstate_count);
        self.ext_gstates.set(name.as_bytes(), dictionary! { "Type" => "ExtGState", "ca" => real(alpha) });
        name
    }

    fn image(&mut self, doc: &mut Document, node: &ImageNode, resolver: &dyn ImageResolver) {
        let Some(bytes) = resolver.resolve(&node.src) else {
            warn!(src = %truncate_src(&node.src), "image source unavailable, skipping");
            return;
        };
        let xobject_id = match image_xobject(doc, &bytes) {
            Ok(id) => id,
            Err(e) => {
                warn!(src = %truncate_src(&node.src), error = %e, "image decode failed, skipping");
                return;
            }
        };
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        self.xobjects.set(name.as_bytes(), Object::Reference(xobject_id));
        let pdf_y = PAGE_HEIGHT - node.y - node.height;
        self.content.push_str(&format!("q {} 0 0 {} {} {} cm /{name} Do Q\n", node.width, node.height, node.x, pdf_y));
    }

    fn fill(&mut self, node: &FillNode) {
        let pdf_y = PAGE_HEIGHT - node.y - node.height;
        self.content.push_str("q\n");
        if node.color.a < 1.0 {
            let gs = self.alpha_state(node.color.a);
            self.content.push_str(&format!("/{gs} gs\n"));
        }
        self.content.push_str(&format!(
            "{} {} {} rg\n{} {} {} {} re f\nQ\n",
            node.color.r, node.color.g, node.color.b, node.x, pdf_y, node.width, node.height
        ));
    }

    fn text(&mut self, node: &TextNode) {
        if node.fill.is_invisible() {
            return;
        }
        self.content.push_str("q\n");
        if node.fill.a < 1.0 {
            let gs = self.alpha_state(node.fill.a);
            self.content.push_str(&format!("/{gs} gs\n"));
        }
        self.content.push_str(&format!(
            "{} {} {} rg\nBT\n/{} {} Tf\n",
            node.fill.r,
            node.fill.g,
            node.fill.b,
            font_resource(node.font_weight),
            node.font_size
        ));
        for (i, line) in node.lines.iter().enumerate() {
            if line.text.is_empty() {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let top = node.y + i as f64 * node.line_height;
            let baseline = PAGE_HEIGHT - (top + node.font_size * PDF_ASCENT_RATIO);
            self.content.push_str(&format!(
                "1 0 0 1 {} {} Tm\n<{}> Tj\n",
                node.x + line.offset_x,
                baseline,
                hex(&win_ansi(&line.text))
            ));
        }
        self.content.push_str("ET\nQ\n");
    }
}

fn build_document(layout: &PageLayout, resolver: &dyn ImageResolver) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut writer = PageWriter::new();
    for node in &layout.nodes {
        match node {
            Node::Image(image) => writer.image(&mut doc, image, resolver),
            Node::Fill(fill) => writer.fill(fill),
            Node::Text(text) => writer.text(text),
        }
    }

    let fonts = dictionary! {
        "F1" => type1_font(base_font(FontWeight::Normal)),
        "F2" => type1_font(base_font(FontWeight::Bold)),
    };
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    resources.set("XObject", Object::Dictionary(writer.xobjects));
    if !writer.ext_gstates.is_empty() {
        resources.set("ExtGState", Object::Dictionary(writer.ext_gstates));
    }

    let content_id = doc.add_object(Stream::new(Dictionary::new(), writer.content.into_bytes()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), real(layout.width), real(layout.height)],
        "Contents" => content_id,
        "Resources" => resources,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn type1_font(base: &str) -> Object {
    Object::Dictionary(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Decode an image and add it as an RGB XObject, with a soft mask when it
/// has any transparency.
fn image_xobject(doc: &mut Document, bytes: &[u8]) -> Result<ObjectId, image::ImageError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    let pixels = img.as_raw();
    let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
    let mut alpha = Vec::with_capacity(pixels.len() / 4);
    for px in pixels.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
        alpha.push(px[3]);
    }

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    if alpha.iter().any(|&a| a < u8::MAX) {
        let smask_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha,
        ));
        dict.set("SMask", Object::Reference(smask_id));
    }
    Ok(doc.add_object(Stream::new(dict, rgb)))
}

#[allow(clippy::cast_possible_truncation)]
fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Encode text for a `WinAnsiEncoding` font. Unmappable characters become `?`.
#[must_use]
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => u8::try_from(c).unwrap_or(b'?'),
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        out.push_str(&format!("{b:02X}"));
        out
    })
}

fn truncate_src(src: &str) -> &str {
    src.get(..48).unwrap_or(src)
}
