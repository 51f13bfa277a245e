//! Builder-form blocks: the fully defaulted, editing-oriented representation.
//!
//! The builder form is the live source of truth during an edit session.
//! Every optional wire field is resolved to a concrete value here, so
//! editing code never deals with `Option`s. [`BuilderBlock::to_wire`] maps
//! back to the compact wire shape.

use super::types::{
    Align, CharLineBlock, ContentBlock, CutBlock, ImageBlock, OpenDrawerBlock, QrBlock, TableBlock,
    TableCell, TextBlock, TextSize,
};

/// Wire-format dialect.
///
/// Two variants of the template format exist in the wild. They differ in
/// the default text alignment and in whether default text styling is
/// written to the wire. The dialect is fixed per edit session and threaded
/// explicitly through normalization and the wire transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// The richer variant: text defaults to centered; `bold`/`size` are
    /// written unless they equal their defaults (`false` / `{1,1}`).
    #[default]
    Full,
    /// The simpler variant: text defaults to left; `bold`/`size` are never
    /// written.
    Minimal,
}

impl Dialect {
    /// Default alignment a text block receives when the wire omits one.
    pub fn default_align(self) -> Align {
        match self {
            Dialect::Full => Align::Center,
            Dialect::Minimal => Align::Left,
        }
    }
}

/// The closed set of block kinds, used for menus and block construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Text,
    Image,
    Qr,
    Table,
    Cut,
    OpenDrawer,
    CharLine,
}

impl BlockKind {
    /// Menu order of the block picker.
    pub const MENU: [BlockKind; 7] = [
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Qr,
        BlockKind::Table,
        BlockKind::Cut,
        BlockKind::OpenDrawer,
        BlockKind::CharLine,
    ];

    /// Human-readable display label.
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Text => "Texto",
            BlockKind::Image => "Imagen",
            BlockKind::Qr => "QR",
            BlockKind::Table => "Tabla",
            BlockKind::Cut => "Corte",
            BlockKind::OpenDrawer => "Abrir caja",
            BlockKind::CharLine => "Línea",
        }
    }
}

/// One table cell in builder form: alignment is always concrete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    pub align: Align,
}

impl Cell {
    pub fn new(text: impl Into<String>, align: Align) -> Self {
        Self {
            text: text.into(),
            align,
        }
    }
}

/// Builder form of a text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuilder {
    pub text: String,
    pub align: Align,
    pub bold: bool,
    pub size_width: u32,
    pub size_height: u32,
}

/// Builder form of a table block. Geometry is always consistent:
/// `rows[i].len() == header.len() == column_widths.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBuilder {
    pub header: Vec<Cell>,
    pub header_bold: bool,
    pub column_widths: Vec<i64>,
    pub line_char: String,
    pub row_spacing: u32,
    pub footer_line: bool,
    pub rows: Vec<Vec<Cell>>,
}

impl TableBuilder {
    /// Column count, defined by the header.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// The builder-form block union, discriminated by an explicit kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderBlock {
    Text(TextBuilder),
    Image(ImageBlock),
    Cut(CutBlock),
    OpenDrawer(OpenDrawerBlock),
    CharLine(CharLineBlock),
    Table(TableBuilder),
    Qr(QrBlock),
}

impl BuilderBlock {
    /// The kind discriminant of this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            BuilderBlock::Text(_) => BlockKind::Text,
            BuilderBlock::Image(_) => BlockKind::Image,
            BuilderBlock::Cut(_) => BlockKind::Cut,
            BuilderBlock::OpenDrawer(_) => BlockKind::OpenDrawer,
            BuilderBlock::CharLine(_) => BlockKind::CharLine,
            BuilderBlock::Table(_) => BlockKind::Table,
            BuilderBlock::Qr(_) => BlockKind::Qr,
        }
    }

    /// The default text block: what an empty template holds, and what
    /// replaces the last block when it is removed.
    pub fn default_text(dialect: Dialect) -> Self {
        BuilderBlock::Text(TextBuilder {
            text: String::new(),
            align: dialect.default_align(),
            bold: false,
            size_width: 1,
            size_height: 1,
        })
    }

    /// Starter value for a freshly added block of the given kind.
    ///
    /// Distinct from plain defaults — tables come with example columns so a
    /// new block is immediately useful, not empty.
    pub fn editor_default(kind: BlockKind, dialect: Dialect) -> Self {
        match kind {
            BlockKind::Text => Self::default_text(dialect),
            BlockKind::Image => BuilderBlock::Image(ImageBlock { src: String::new() }),
            BlockKind::Qr => BuilderBlock::Qr(QrBlock {
                qr_content: String::new(),
            }),
            BlockKind::Cut => BuilderBlock::Cut(CutBlock { cut: true }),
            BlockKind::OpenDrawer => {
                BuilderBlock::OpenDrawer(OpenDrawerBlock { open_drawer: true })
            }
            BlockKind::CharLine => BuilderBlock::CharLine(CharLineBlock {
                char_line: "-".into(),
            }),
            BlockKind::Table => BuilderBlock::Table(TableBuilder {
                header: vec![
                    Cell::new("Columna 1", Align::Left),
                    Cell::new("Columna 2", Align::Center),
                    Cell::new("Columna 3", Align::Right),
                ],
                header_bold: true,
                column_widths: vec![60, 20, 20],
                line_char: "-".into(),
                row_spacing: 1,
                footer_line: true,
                rows: Vec::new(),
            }),
        }
    }

    /// Convert this block to its wire form.
    ///
    /// Total over all variants. Inverse of classification up to
    /// default-filling: normalizing the result yields this block back.
    pub fn to_wire(&self, dialect: Dialect) -> ContentBlock {
        match self {
            BuilderBlock::Text(text) => ContentBlock::Text(text.to_wire(dialect)),
            BuilderBlock::Image(image) => ContentBlock::Image(image.clone()),
            BuilderBlock::Cut(cut) => ContentBlock::Cut(cut.clone()),
            BuilderBlock::OpenDrawer(drawer) => ContentBlock::OpenDrawer(drawer.clone()),
            BuilderBlock::CharLine(line) => ContentBlock::CharLine(line.clone()),
            BuilderBlock::Table(table) => ContentBlock::Table(table.to_wire()),
            BuilderBlock::Qr(qr) => ContentBlock::Qr(qr.clone()),
        }
    }
}

impl TextBuilder {
    fn to_wire(&self, dialect: Dialect) -> TextBlock {
        let (bold, size) = match dialect {
            Dialect::Full => (
                self.bold.then_some(true),
                (self.size_width != 1 || self.size_height != 1).then_some(TextSize {
                    width: self.size_width,
                    height: self.size_height,
                }),
            ),
            Dialect::Minimal => (None, None),
        };
        TextBlock {
            text: self.text.clone(),
            align: Some(self.align),
            bold,
            size,
        }
    }
}

impl TableBuilder {
    fn to_wire(&self) -> TableBlock {
        TableBlock {
            header: self.header.iter().map(Cell::to_wire).collect(),
            header_bold: Some(self.header_bold),
            column_widths: Some(self.column_widths.clone()),
            line_char: Some(self.line_char.clone()),
            row_spacing: Some(self.row_spacing),
            footer_line: Some(self.footer_line),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(Cell::to_wire).collect())
                .collect(),
        }
    }
}

impl Cell {
    fn to_wire(&self) -> TableCell {
        TableCell {
            text: self.text.clone(),
            align: Some(self.align),
        }
    }
}
