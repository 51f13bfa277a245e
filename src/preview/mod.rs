//! # Ticket Preview Renderer
//!
//! Lays a wire-form block sequence out as a simulated thermal-printer
//! ticket. The output is a structured layout model ([`TicketPreview`]),
//! not pixels: each node carries the computed metrics (alignment, weight,
//! font scale, letter spacing, column widths) a host needs to draw the
//! approximation.
//!
//! ## Architecture
//!
//! ```text
//! &[ContentBlock] → PreviewRenderer → TicketPreview
//!                        ↓
//!                  Per block:
//!                  - text: scale metrics from the size multiplier
//!                  - rule: repeat char to the ticket's character grid
//!                  - table: proportional column layout + footer rule
//!                  - image: resolve via ImageLoader, placeholder on failure
//!                  - qr / cut / drawer: fixed markers
//! ```
//!
//! The character grid models a fixed-pitch printer scaled from an
//! 80 mm / 32-column reference. The only state a renderer keeps between
//! calls is the set of image sources that failed to load, so repeated
//! renders never retry a broken source.

mod resolve;

pub use resolve::{FsImageLoader, ImageLoader, LoadedImage, OfflineLoader};

use std::collections::HashSet;

use tracing::warn;

use crate::ticket::types::{Align, ContentBlock, TableBlock, TextBlock};

/// Base font size of the simulated ticket, in rem.
pub const BASE_FONT_SIZE: f32 = 0.85;
/// Reference paper width for the character grid.
pub const REFERENCE_WIDTH_MM: f64 = 80.0;
/// Characters per line at the reference width.
pub const REFERENCE_COLUMNS: usize = 32;
/// Lower bound on the character grid, however narrow the paper.
pub const MIN_COLUMNS: usize = 10;

/// Font weight of normal text (CSS numeric weight).
pub const WEIGHT_NORMAL: u16 = 400;
/// Font weight of a table header without `headerBold`.
pub const WEIGHT_SEMIBOLD: u16 = 600;
/// Font weight of bold text and bold table headers.
pub const WEIGHT_BOLD: u16 = 700;

/// Characters available on one line at the given paper width.
///
/// `max(10, round(width_mm / 80 × 32))`.
pub fn rule_char_count(width_mm: f64) -> usize {
    let scaled = ((width_mm / REFERENCE_WIDTH_MM) * REFERENCE_COLUMNS as f64).round();
    if scaled.is_nan() || scaled < MIN_COLUMNS as f64 {
        MIN_COLUMNS
    } else {
        scaled as usize
    }
}

/// Repeat `pattern` across the full line width, truncated to exactly the
/// grid's character count. An empty pattern yields an empty rule.
pub fn rule_line(pattern: &str, width_mm: f64) -> String {
    if pattern.is_empty() {
        return String::new();
    }
    pattern.chars().cycle().take(rule_char_count(width_mm)).collect()
}

/// One laid-out text line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub content: String,
    pub align: Align,
    pub weight: u16,
    /// Font size in rem: base size × the block's height multiplier.
    pub font_size: f32,
    /// Extra tracking in em. Zero unless the width multiplier exceeds 1.
    pub letter_spacing: f32,
}

/// One laid-out table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellLayout {
    pub text: String,
    pub align: Align,
    /// Percentage width, `None` when the table supplied no widths at all.
    pub width_pct: Option<i64>,
    pub weight: u16,
}

/// A laid-out table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub header: Vec<CellLayout>,
    pub rows: Vec<Vec<CellLayout>>,
    /// Insert a blank spacer row after each data row.
    pub row_gap: bool,
    /// Closing rule, present only when the block asked for a footer line.
    pub footer_rule: Option<String>,
}

/// How an image block resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// The source loaded; dimensions come from the loader.
    Loaded {
        src: String,
        width: u32,
        height: u32,
    },
    /// Empty or broken source: show the fixed placeholder graphic.
    Placeholder,
}

/// One node of the simulated ticket.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewNode {
    Text(TextLine),
    Image(ImageSource),
    /// Paper-cut marker: a dashed separator.
    CutMark,
    /// Cash-drawer marker with its fixed label.
    DrawerMark,
    /// A full-width repeated-character rule.
    Rule(String),
    Table(TableLayout),
    /// QR blocks always show a fixed placeholder; the payload is not
    /// encoded.
    QrPlaceholder,
}

/// The laid-out ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketPreview {
    pub width_mm: f64,
    pub nodes: Vec<PreviewNode>,
}

/// Lays out block sequences at a fixed paper width.
///
/// The broken-source set is owned here, per instance: once a source fails
/// to load it stays broken for the rest of the session and later renders
/// substitute the placeholder without a new load attempt.
pub struct PreviewRenderer {
    width_mm: f64,
    loader: Box<dyn ImageLoader>,
    broken: HashSet<String>,
}

impl PreviewRenderer {
    /// Renderer with the filesystem-backed image loader.
    pub fn new(width_mm: f64) -> Self {
        Self::with_loader(width_mm, Box::new(FsImageLoader))
    }

    /// Renderer with a host-supplied image loader.
    pub fn with_loader(width_mm: f64, loader: Box<dyn ImageLoader>) -> Self {
        Self {
            width_mm,
            loader,
            broken: HashSet::new(),
        }
    }

    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    /// Sources that have failed to load in this session.
    pub fn broken_sources(&self) -> &HashSet<String> {
        &self.broken
    }

    /// Lay out the sequence. Deterministic apart from image resolution,
    /// whose only lasting effect is growing the broken-source set.
    pub fn render(&mut self, blocks: &[ContentBlock]) -> TicketPreview {
        let nodes = blocks.iter().map(|block| self.render_block(block)).collect();
        TicketPreview {
            width_mm: self.width_mm,
            nodes,
        }
    }

    fn render_block(&mut self, block: &ContentBlock) -> PreviewNode {
        match block {
            ContentBlock::Image(image) => PreviewNode::Image(self.resolve_image(&image.src)),
            ContentBlock::Text(text) => PreviewNode::Text(layout_text(text)),
            ContentBlock::Cut(_) => PreviewNode::CutMark,
            ContentBlock::OpenDrawer(_) => PreviewNode::DrawerMark,
            ContentBlock::CharLine(line) => {
                PreviewNode::Rule(rule_line(&line.char_line, self.width_mm))
            }
            ContentBlock::Table(table) => PreviewNode::Table(self.layout_table(table)),
            ContentBlock::Qr(_) => PreviewNode::QrPlaceholder,
        }
    }

    fn resolve_image(&mut self, src: &str) -> ImageSource {
        if src.is_empty() || self.broken.contains(src) {
            return ImageSource::Placeholder;
        }
        match self.loader.load(src) {
            Ok(loaded) => ImageSource::Loaded {
                src: src.to_owned(),
                width: loaded.width,
                height: loaded.height,
            },
            Err(error) => {
                warn!(src, %error, "image failed to load; using placeholder");
                self.broken.insert(src.to_owned());
                ImageSource::Placeholder
            }
        }
    }

    fn layout_table(&self, table: &TableBlock) -> TableLayout {
        let column_count = table.header.len();

        // Unlike normalization, the preview does not reshape the data: it
        // lays out whatever geometry the wire carries. Missing widths fall
        // back to a plain even split; an unknowable split (no header) leaves
        // cell widths unset.
        let widths: Vec<i64> = match table.column_widths.as_deref() {
            Some(widths) if !widths.is_empty() => widths.to_vec(),
            _ if column_count > 0 => vec![100 / column_count as i64; column_count],
            _ => Vec::new(),
        };
        let width_at = |index: usize| widths.get(index).or_else(|| widths.first()).copied();

        let header_weight = if table.header_bold.unwrap_or(false) {
            WEIGHT_BOLD
        } else {
            WEIGHT_SEMIBOLD
        };

        let header = table
            .header
            .iter()
            .enumerate()
            .map(|(index, cell)| CellLayout {
                text: cell.text.clone(),
                align: cell.align.unwrap_or(Align::Left),
                width_pct: width_at(index),
                weight: header_weight,
            })
            .collect();

        let rows = table
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(index, cell)| CellLayout {
                        text: cell.text.clone(),
                        align: cell.align.unwrap_or(Align::Left),
                        width_pct: width_at(index),
                        weight: WEIGHT_NORMAL,
                    })
                    .collect()
            })
            .collect();

        let footer_rule = table.footer_line.unwrap_or(false).then(|| {
            rule_line(table.line_char.as_deref().unwrap_or("-"), self.width_mm)
        });

        TableLayout {
            header,
            rows,
            row_gap: table.row_spacing.unwrap_or(1) > 1,
            footer_rule,
        }
    }
}

fn layout_text(text: &TextBlock) -> TextLine {
    let size = text.size.unwrap_or_default();
    TextLine {
        content: text.text.clone(),
        align: text.align.unwrap_or(Align::Left),
        weight: if text.bold.unwrap_or(false) {
            WEIGHT_BOLD
        } else {
            WEIGHT_NORMAL
        },
        font_size: BASE_FONT_SIZE * size.height as f32,
        letter_spacing: if size.width > 1 {
            0.02 * size.width as f32
        } else {
            0.0
        },
    }
}
