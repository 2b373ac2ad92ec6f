// journal-pdf: draws the paginated journal onto A4 pages

use crate::config::{JournalConfig, POINTS_PER_CATEGORY};
use crate::error::AppError;
use crate::pagination::{JournalDay, Sheet, SheetKind, Slot};
use ::image::{DynamicImage, Rgba, RgbImage};
use log::{debug, info, warn};
use printpdf::path::PaintMode;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;

// ============================================================================
// Constants
// ============================================================================

/// A4 portrait dimensions in mm
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

/// One A5 cell, a quarter of the A4 page
const CELL_WIDTH_MM: f32 = PAGE_WIDTH_MM / 2.0;
const CELL_HEIGHT_MM: f32 = PAGE_HEIGHT_MM / 2.0;

/// Inner padding of journal cells
const CELL_PADDING_X_MM: f32 = 10.0;
const CELL_PADDING_Y_MM: f32 = 12.0;

/// Inner padding of cover cells
const COVER_PADDING_X_MM: f32 = 12.0;
const COVER_PADDING_Y_MM: f32 = 15.0;

/// Font sizes in points
const FRONT_TITLE_FONT_SIZE: f32 = 32.0;
const BACK_TITLE_FONT_SIZE: f32 = 18.0;
const SECTION_FONT_SIZE: f32 = 11.0;
const COVER_FONT_SIZE: f32 = 9.0;
const CATEGORY_FONT_SIZE: f32 = 8.0;
const DATE_FONT_SIZE: f32 = 7.0;
const FOOTER_FONT_SIZE: f32 = 6.0;

/// Vertical space reserved inside a journal cell
const DATE_HEADER_HEIGHT_MM: f32 = 4.0;
const FOOTER_HEIGHT_MM: f32 = 6.0;
const CATEGORY_HEADER_HEIGHT_MM: f32 = 5.0;

/// Ruled writing lines
const WRITING_LINE_SPACING_MM: f32 = 5.0;
const INSIGHT_LINE_SPACING_MM: f32 = 4.5;

/// Cover image bounds on the front cover
const COVER_IMAGE_MAX_WIDTH_MM: f32 = 60.0;
const COVER_IMAGE_MAX_HEIGHT_MM: f32 = 35.0;

/// Average Helvetica glyph width as a fraction of the font size
const AVG_GLYPH_WIDTH_EM: f32 = 0.5;
const MM_PER_PT: f32 = 25.4 / 72.0;

// ============================================================================
// Layout Helpers
// ============================================================================

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Content box of a cell after padding, in page coordinates (origin bottom-left)
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl Frame {
    /// Cell `index` in reading order: 0 top-left, 1 top-right, 2 bottom-left, 3 bottom-right
    fn cell(index: usize, pad_x: f32, pad_y: f32) -> Self {
        let col = (index % 2) as f32;
        let row = (index / 2) as f32;
        let left = col * CELL_WIDTH_MM;
        let top = PAGE_HEIGHT_MM - row * CELL_HEIGHT_MM;
        Frame {
            left: left + pad_x,
            right: left + CELL_WIDTH_MM - pad_x,
            top: top - pad_y,
            bottom: top - CELL_HEIGHT_MM + pad_y,
        }
    }

    fn width(&self) -> f32 {
        self.right - self.left
    }

    fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }
}

fn text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH_EM * MM_PER_PT
}

/// Shortens `text` so it fits in `max_width_mm` at `font_size`.
fn fit_text(text: &str, font_size: f32, max_width_mm: f32) -> String {
    if text_width_mm(text, font_size) <= max_width_mm {
        return text.to_string();
    }
    let per_char = font_size * AVG_GLYPH_WIDTH_EM * MM_PER_PT;
    let max_chars = (max_width_mm / per_char).floor() as usize;
    let keep = max_chars.saturating_sub(3);
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str("...");
    shortened
}

fn gray(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

// ============================================================================
// PDF Generation
// ============================================================================

/// Writes the journal to `output_path`, one A4 page per sheet.
///
/// With no sheets the document still gets its single blank page; the journal
/// body is simply empty.
pub fn generate_pdf(
    config: &JournalConfig,
    sheets: &[Sheet<JournalDay>],
    output_path: &str,
) -> Result<(), AppError> {
    let title = config
        .journal_name
        .clone()
        .unwrap_or_else(|| config.label("frontTitle").to_string());
    let (doc, page1, layer1) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::PdfError(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::PdfError(e.to_string()))?,
    };

    if sheets.is_empty() {
        warn!("event=empty_journal reason=zero_days output={}", output_path);
    }

    for (index, sheet) in sheets.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };
        debug!(
            "event=draw_sheet index={} kind={:?} filled={}",
            index,
            sheet.kind,
            sheet.filled_count()
        );
        draw_sheet(&layer, &fonts, config, sheet)?;
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| AppError::PdfError(e.to_string()))?;

    info!(
        "event=pdf_written output={} sheets={} days={}",
        output_path,
        sheets.len(),
        config.day_count()
    );
    Ok(())
}

/// Pretty-printed JSON of the sheet layout, for `--layout`.
pub fn layout_json(sheets: &[Sheet<JournalDay>]) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(sheets)?)
}

fn draw_sheet(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    config: &JournalConfig,
    sheet: &Sheet<JournalDay>,
) -> Result<(), AppError> {
    // Title sheet: covers on top, its two slots below
    let first_cell = match sheet.kind {
        SheetKind::Title => {
            draw_back_cover(layer, fonts, config, Frame::cell(0, COVER_PADDING_X_MM, COVER_PADDING_Y_MM));
            draw_front_cover(layer, fonts, config, Frame::cell(1, COVER_PADDING_X_MM, COVER_PADDING_Y_MM))?;
            2
        }
        SheetKind::Regular => 0,
    };

    for (offset, slot) in sheet.slots.iter().enumerate() {
        let cell = first_cell + offset;
        match slot {
            Slot::Filled(day) => draw_journal_cell(
                layer,
                fonts,
                config,
                day,
                Frame::cell(cell, CELL_PADDING_X_MM, CELL_PADDING_Y_MM),
            ),
            Slot::Empty => draw_placeholder(layer, cell),
        }
    }

    if config.cut_guides {
        draw_cut_guides(layer);
    }
    Ok(())
}

// ============================================================================
// Journal Cell
// ============================================================================

fn day_header(config: &JournalConfig, day: &JournalDay) -> String {
    match day.date {
        Some(date) => config.locale.format_day(date),
        None => format!("{} {}", config.label("day"), day.number),
    }
}

fn draw_journal_cell(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    config: &JournalConfig,
    day: &JournalDay,
    frame: Frame,
) {
    // Date header above the first category
    layer.set_fill_color(gray(0.6));
    layer.use_text(
        day_header(config, day),
        DATE_FONT_SIZE,
        Mm(frame.left),
        Mm(frame.top - 2.5),
        &fonts.regular,
    );

    let area_top = frame.top - DATE_HEADER_HEIGHT_MM;
    let area_bottom = frame.bottom + FOOTER_HEIGHT_MM;
    let labels = config.categories.labels();
    let block_height = (area_top - area_bottom) / labels.len().max(1) as f32;
    let max_score = format!("/{}", POINTS_PER_CATEGORY);

    for (index, label) in labels.iter().enumerate() {
        let block_top = area_top - index as f32 * block_height;
        let block_bottom = block_top - block_height;
        let is_last = index + 1 == labels.len();
        draw_category_block(
            layer,
            fonts,
            label,
            &max_score,
            frame,
            block_top,
            block_bottom,
            is_last,
        );
    }

    draw_cell_footer(layer, fonts, config, frame);
}

#[allow(clippy::too_many_arguments)]
fn draw_category_block(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    label: &str,
    max_score: &str,
    frame: Frame,
    block_top: f32,
    block_bottom: f32,
    is_last: bool,
) {
    let text_y = block_top - 3.5;
    let score_width = text_width_mm(max_score, DATE_FONT_SIZE);

    layer.set_fill_color(gray(0.4));
    layer.use_text(
        fit_text(label, CATEGORY_FONT_SIZE, frame.width() - score_width - 2.0),
        CATEGORY_FONT_SIZE,
        Mm(frame.left),
        Mm(text_y),
        &fonts.bold,
    );
    layer.use_text(
        max_score,
        DATE_FONT_SIZE,
        Mm(frame.right - score_width),
        Mm(text_y),
        &fonts.regular,
    );

    // Header underline
    let underline_y = block_top - CATEGORY_HEADER_HEIGHT_MM;
    layer.set_outline_color(gray(0.45));
    layer.set_outline_thickness(0.5);
    draw_line(layer, frame.left, underline_y, frame.right, underline_y);

    // Writing lines
    layer.set_outline_color(gray(0.94));
    layer.set_outline_thickness(0.3);
    let mut line_y = underline_y - WRITING_LINE_SPACING_MM;
    while line_y > block_bottom + 1.0 {
        draw_line(layer, frame.left, line_y, frame.right, line_y);
        line_y -= WRITING_LINE_SPACING_MM;
    }

    if !is_last {
        layer.set_outline_color(gray(0.8));
        layer.set_outline_thickness(0.3);
        draw_line(layer, frame.left, block_bottom, frame.right, block_bottom);
    }
}

fn draw_cell_footer(layer: &PdfLayerReference, fonts: &Fonts, config: &JournalConfig, frame: Frame) {
    let y = frame.bottom + 1.5;
    let field_width = 10.0;
    let gap = 2.0;

    let total_label = config.label("total");
    let total_value = format!("/{}", config.categories.total_points());
    let total_field_x = frame.left + text_width_mm(total_label, FOOTER_FONT_SIZE) + gap;

    layer.set_fill_color(gray(0.6));
    layer.set_outline_color(gray(0.6));
    layer.set_outline_thickness(0.3);

    layer.use_text(total_label, FOOTER_FONT_SIZE, Mm(frame.left), Mm(y), &fonts.regular);
    draw_line(layer, total_field_x, y - 0.8, total_field_x + field_width, y - 0.8);
    layer.use_text(
        &total_value,
        FOOTER_FONT_SIZE,
        Mm(total_field_x + field_width - text_width_mm(&total_value, FOOTER_FONT_SIZE)),
        Mm(y),
        &fonts.regular,
    );

    let rating_label = config.label("rating");
    let rating_value = format!("= /{}", POINTS_PER_CATEGORY);
    let rating_x = total_field_x + field_width + 8.0;
    let rating_field_x = rating_x + text_width_mm(rating_label, FOOTER_FONT_SIZE) + gap;

    layer.use_text(rating_label, FOOTER_FONT_SIZE, Mm(rating_x), Mm(y), &fonts.regular);
    draw_line(layer, rating_field_x, y - 0.8, rating_field_x + field_width, y - 0.8);
    layer.use_text(
        &rating_value,
        FOOTER_FONT_SIZE,
        Mm(rating_field_x + field_width - text_width_mm(&rating_value, FOOTER_FONT_SIZE)),
        Mm(y),
        &fonts.regular,
    );
}

/// Light grey fill for slots past the end of the journal
fn draw_placeholder(layer: &PdfLayerReference, cell: usize) {
    let frame = Frame::cell(cell, 0.0, 0.0);
    layer.set_fill_color(gray(0.98));
    layer.add_rect(
        Rect::new(Mm(frame.left), Mm(frame.bottom), Mm(frame.right), Mm(frame.top))
            .with_mode(PaintMode::Fill),
    );
}

// ============================================================================
// Covers
// ============================================================================

fn draw_centered(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    center_x: f32,
    y: f32,
) {
    layer.use_text(
        text,
        font_size,
        Mm(center_x - text_width_mm(text, font_size) / 2.0),
        Mm(y),
        font,
    );
}

fn draw_back_cover(layer: &PdfLayerReference, fonts: &Fonts, config: &JournalConfig, frame: Frame) {
    let center = frame.center_x();

    layer.set_fill_color(gray(0.15));
    draw_centered(layer, &fonts.bold, config.label("backTitle"), BACK_TITLE_FONT_SIZE, center, frame.top - 6.0);

    layer.set_fill_color(gray(0.45));
    draw_centered(layer, &fonts.regular, config.label("backSubtitle"), COVER_FONT_SIZE, center, frame.top - 12.0);

    layer.set_fill_color(gray(0.15));
    let insights_y = frame.top - 26.0;
    layer.use_text(
        config.label("keyInsights"),
        SECTION_FONT_SIZE,
        Mm(frame.left),
        Mm(insights_y),
        &fonts.bold,
    );

    let footer_rule_y = frame.bottom + 10.0;
    layer.set_outline_color(gray(0.94));
    layer.set_outline_thickness(0.3);
    let mut line_y = insights_y - 5.0 - INSIGHT_LINE_SPACING_MM;
    while line_y > footer_rule_y + 6.0 {
        draw_line(layer, frame.left, line_y, frame.right, line_y);
        line_y -= INSIGHT_LINE_SPACING_MM;
    }

    layer.set_outline_color(gray(0.8));
    draw_line(layer, frame.left, footer_rule_y, frame.right, footer_rule_y);

    layer.set_fill_color(gray(0.6));
    draw_centered(layer, &fonts.regular, config.label("backFooter"), CATEGORY_FONT_SIZE, center, frame.bottom + 3.0);
}

fn draw_front_cover(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    config: &JournalConfig,
    frame: Frame,
) -> Result<(), AppError> {
    let center = frame.center_x();

    layer.set_fill_color(gray(0.15));
    draw_centered(layer, &fonts.bold, config.label("frontTitle"), FRONT_TITLE_FONT_SIZE, center, frame.top - 12.0);

    let rule_y = frame.top - 24.0;
    layer.set_outline_color(gray(0.15));
    layer.set_outline_thickness(0.8);
    draw_line(layer, center - 30.0, rule_y, center + 30.0, rule_y);

    if let Some(ref image) = config.cover_image {
        let top = rule_y - 6.0;
        let bounds = Frame {
            left: center - COVER_IMAGE_MAX_WIDTH_MM / 2.0,
            right: center + COVER_IMAGE_MAX_WIDTH_MM / 2.0,
            top,
            bottom: top - COVER_IMAGE_MAX_HEIGHT_MM,
        };
        embed_cover_image(layer, image, bounds)?;
    }

    // Fill-in fields, pre-filled when the value is known
    let span = config.date_span().map(|(first, last)| {
        format!(
            "{} – {}",
            config.locale.format_short(first),
            config.locale.format_short(last)
        )
    });
    let fields = [
        (config.label("journalName"), config.journal_name.as_deref(), frame.bottom + 42.0),
        (config.label("fromTo"), span.as_deref(), frame.bottom + 24.0),
    ];
    for (label, value, label_y) in fields {
        draw_cover_field(layer, fonts, frame, label, value, label_y);
    }

    layer.set_fill_color(gray(0.6));
    draw_centered(layer, &fonts.regular, config.label("beginWhenReady"), COVER_FONT_SIZE, center, frame.bottom + 2.0);
    Ok(())
}

fn draw_cover_field(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    frame: Frame,
    label: &str,
    value: Option<&str>,
    label_y: f32,
) {
    let line_y = label_y - 9.0;

    layer.set_fill_color(gray(0.45));
    draw_centered(layer, &fonts.bold, &label.to_uppercase(), COVER_FONT_SIZE, frame.center_x(), label_y);

    if let Some(value) = value {
        layer.set_fill_color(gray(0.15));
        let text = fit_text(value, SECTION_FONT_SIZE, frame.width());
        draw_centered(layer, &fonts.regular, &text, SECTION_FONT_SIZE, frame.center_x(), line_y + 1.5);
    }

    layer.set_outline_color(gray(0.15));
    layer.set_outline_thickness(0.5);
    draw_line(layer, frame.left + 5.0, line_y, frame.right - 5.0, line_y);
}

/// Area of `bounds` the image occupies: as large as fits while keeping the
/// aspect ratio, centred horizontally and flush with the top edge.
/// `None` for an image without pixels.
fn fit_image(width_px: u32, height_px: u32, bounds: Frame) -> Option<Frame> {
    if width_px == 0 || height_px == 0 {
        return None;
    }
    let box_height = bounds.top - bounds.bottom;
    let aspect = width_px as f32 / height_px as f32;
    let (width, height) = if bounds.width() / box_height > aspect {
        (box_height * aspect, box_height)
    } else {
        (bounds.width(), bounds.width() / aspect)
    };
    let left = bounds.center_x() - width / 2.0;
    Some(Frame {
        left,
        right: left + width,
        top: bounds.top,
        bottom: bounds.top - height,
    })
}

/// RGB pixels with transparency blended onto white paper
fn flatten_onto_white(cover: &DynamicImage) -> RgbImage {
    let rgba = cover.to_rgba8();
    let mut flat = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = f32::from(a) / 255.0;
        let blend = |channel: u8| (f32::from(channel) * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        flat.put_pixel(x, y, ::image::Rgb([blend(r), blend(g), blend(b)]));
    }
    flat
}

fn embed_cover_image(
    layer: &PdfLayerReference,
    cover: &DynamicImage,
    bounds: Frame,
) -> Result<(), AppError> {
    let placement = fit_image(cover.width(), cover.height(), bounds)
        .ok_or_else(|| AppError::ImageError("image has no pixels".to_string()))?;
    let flat = flatten_onto_white(cover);
    let (width_px, height_px) = flat.dimensions();
    debug!(
        "event=cover_embed px={}x{} mm={:.1}x{:.1}",
        width_px,
        height_px,
        placement.width(),
        placement.top - placement.bottom
    );

    let image = Image::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: flat.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(placement.left)),
            translate_y: Some(Mm(placement.bottom)),
            dpi: Some(width_px as f32 / (placement.width() / 25.4)),
            ..Default::default()
        },
    );

    Ok(())
}

// ============================================================================
// Drawing Utilities
// ============================================================================

/// Dashed lines along the A5 cell borders
fn draw_cut_guides(layer: &PdfLayerReference) {
    layer.set_outline_color(gray(0.5));
    layer.set_outline_thickness(0.5);
    draw_dashed_line(layer, CELL_WIDTH_MM, 0.0, CELL_WIDTH_MM, PAGE_HEIGHT_MM);
    draw_dashed_line(layer, 0.0, CELL_HEIGHT_MM, PAGE_WIDTH_MM, CELL_HEIGHT_MM);
}

fn draw_dashed_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    const DASH_MM: f32 = 3.0;
    const GAP_MM: f32 = 2.0;

    let length = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
    if length == 0.0 {
        return;
    }
    let (dx, dy) = ((x2 - x1) / length, (y2 - y1) / length);

    let mut travelled = 0.0;
    while travelled < length {
        let end = (travelled + DASH_MM).min(length);
        draw_line(
            layer,
            x1 + dx * travelled,
            y1 + dy * travelled,
            x1 + dx * end,
            y1 + dy * end,
        );
        travelled += DASH_MM + GAP_MM;
    }
}

fn draw_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let points = vec![
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x2), Mm(y2)), false),
    ];
    let line = Line {
        points,
        is_closed: false,
    };
    layer.add_line(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_tile_the_page() {
        let top_left = Frame::cell(0, 0.0, 0.0);
        let bottom_right = Frame::cell(3, 0.0, 0.0);
        assert_eq!(top_left.left, 0.0);
        assert_eq!(top_left.top, PAGE_HEIGHT_MM);
        assert_eq!(bottom_right.right, PAGE_WIDTH_MM);
        assert_eq!(bottom_right.bottom, 0.0);
        assert_eq!(Frame::cell(1, 0.0, 0.0).left, CELL_WIDTH_MM);
        assert_eq!(Frame::cell(2, 0.0, 0.0).top, CELL_HEIGHT_MM);
    }

    #[test]
    fn padding_shrinks_the_frame() {
        let frame = Frame::cell(0, CELL_PADDING_X_MM, CELL_PADDING_Y_MM);
        assert_eq!(frame.width(), CELL_WIDTH_MM - 2.0 * CELL_PADDING_X_MM);
        assert_eq!(frame.top - frame.bottom, CELL_HEIGHT_MM - 2.0 * CELL_PADDING_Y_MM);
    }

    #[test]
    fn fit_text_keeps_short_labels() {
        assert_eq!(fit_text("Finances", CATEGORY_FONT_SIZE, 80.0), "Finances");
    }

    #[test]
    fn fit_text_truncates_long_labels() {
        let long = "Kreative Entfaltung, Kunst, Musik & Projekte und noch viel mehr dazu";
        let fitted = fit_text(long, CATEGORY_FONT_SIZE, 40.0);
        assert!(fitted.ends_with("..."));
        assert!(text_width_mm(&fitted, CATEGORY_FONT_SIZE) <= 40.0);
    }

    fn cover_bounds() -> Frame {
        Frame {
            left: 0.0,
            right: 60.0,
            top: 100.0,
            bottom: 65.0,
        }
    }

    #[test]
    fn wide_image_fills_bounds_width() {
        let placed = fit_image(600, 100, cover_bounds()).unwrap();
        assert_eq!(placed.left, 0.0);
        assert_eq!(placed.right, 60.0);
        assert_eq!(placed.top, 100.0);
        assert_eq!(placed.bottom, 90.0);
    }

    #[test]
    fn tall_image_is_centred_at_full_height() {
        let placed = fit_image(100, 350, cover_bounds()).unwrap();
        assert_eq!(placed.top - placed.bottom, 35.0);
        assert!((placed.width() - 10.0).abs() < 1e-3);
        assert!((placed.center_x() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn image_without_pixels_has_no_placement() {
        assert!(fit_image(0, 10, cover_bounds()).is_none());
        assert!(fit_image(10, 0, cover_bounds()).is_none());
    }

    #[test]
    fn transparency_blends_onto_white() {
        let mut rgba = ::image::RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn empty_cover_image_is_rejected_when_embedding() {
        let (doc, page, layer) =
            PdfDocument::new("cover", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let empty = DynamicImage::new_rgb8(0, 0);
        let result = embed_cover_image(&layer, &empty, cover_bounds());
        assert!(matches!(result, Err(AppError::ImageError(_))));
    }
}
