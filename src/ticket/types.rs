//! Wire-form content block types and shape classification.
//!
//! The wire format carries no explicit type tag: a block is recognized by
//! which distinguishing fields it contains. [`ContentBlock`] makes that
//! implicit scheme an explicit tagged union. Serialization stays untagged
//! (the enum writes only the variant's own fields), while deserialization
//! goes through [`ContentBlock::classify`], an ordered shape check that
//! never fails — unrecognizable input degrades to a default [`TextBlock`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Horizontal alignment for text blocks and table cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Parse an alignment from a loose JSON value. Anything that is not one
    /// of the three known strings is treated as absent.
    fn from_value(value: Option<&Value>) -> Option<Self> {
        match value.and_then(Value::as_str) {
            Some("left") => Some(Align::Left),
            Some("center") => Some(Align::Center),
            Some("right") => Some(Align::Right),
            _ => None,
        }
    }
}

/// Character size multiplier for text blocks.
///
/// `{1, 1}` is the printer's base character cell; larger values expand the
/// glyphs in each dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

impl Default for TextSize {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }
}

/// One line of styled text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<TextSize>,
}

/// An image referenced by URI or path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageBlock {
    pub src: String,
}

/// Paper-cut marker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CutBlock {
    pub cut: bool,
}

/// Cash-drawer pulse marker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpenDrawerBlock {
    #[serde(rename = "openDrawer")]
    pub open_drawer: bool,
}

/// A full-width rule drawn by repeating a character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharLineBlock {
    #[serde(rename = "charLine")]
    pub char_line: String,
}

/// QR code payload. The preview shows a placeholder; no encoding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QrBlock {
    #[serde(rename = "qrContent")]
    pub qr_content: String,
}

/// One table cell: text plus optional alignment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
}

/// A columnar table with a header row and data rows.
///
/// On the wire, geometry may be inconsistent (rows shorter or longer than
/// the header, widths missing or mismatched). Normalization reconciles all
/// of it; this type records what was actually supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBlock {
    #[serde(default)]
    pub header: Vec<TableCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bold: Option<bool>,
    /// Percentage-like column widths. Not validated to sum to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<i64>>,
    /// Character used for the footer rule (default `-`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_char: Option<String>,
    /// Values above 1 insert a blank spacer row after each data row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_spacing: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_line: Option<bool>,
    #[serde(default)]
    pub rows: Vec<Vec<TableCell>>,
}

/// The wire-form content block union.
///
/// Variant order matches classification precedence: a malformed object that
/// satisfies several shape checks resolves to the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentBlock {
    Table(TableBlock),
    Qr(QrBlock),
    Image(ImageBlock),
    CharLine(CharLineBlock),
    OpenDrawer(OpenDrawerBlock),
    Cut(CutBlock),
    Text(TextBlock),
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(ContentBlock::classify(&value))
    }
}

impl ContentBlock {
    /// Classify a loose JSON value into a content block.
    ///
    /// Shape checks short-circuit in a fixed precedence order:
    /// table (`header` + `rows`) → `qrContent` → `src` → `charLine` →
    /// `openDrawer` → `cut` → `text`. Anything else, including non-object
    /// values, becomes a default text block. This function is total.
    pub fn classify(value: &Value) -> Self {
        let map = match value.as_object() {
            Some(map) => map,
            None => return ContentBlock::Text(TextBlock::default()),
        };

        if map.contains_key("header") && map.contains_key("rows") {
            ContentBlock::Table(classify_table(map))
        } else if map.contains_key("qrContent") {
            ContentBlock::Qr(QrBlock {
                qr_content: string_field(map, "qrContent"),
            })
        } else if map.contains_key("src") {
            ContentBlock::Image(ImageBlock {
                src: string_field(map, "src"),
            })
        } else if map.contains_key("charLine") {
            ContentBlock::CharLine(CharLineBlock {
                char_line: string_field(map, "charLine"),
            })
        } else if map.contains_key("openDrawer") {
            ContentBlock::OpenDrawer(OpenDrawerBlock {
                open_drawer: truthy(map.get("openDrawer")),
            })
        } else if map.contains_key("cut") {
            ContentBlock::Cut(CutBlock {
                cut: truthy(map.get("cut")),
            })
        } else if map.contains_key("text") {
            ContentBlock::Text(classify_text(map))
        } else {
            ContentBlock::Text(TextBlock::default())
        }
    }
}

fn classify_text(map: &Map<String, Value>) -> TextBlock {
    TextBlock {
        text: string_field(map, "text"),
        align: Align::from_value(map.get("align")),
        bold: map.get("bold").map(|v| truthy(Some(v))),
        size: map.get("size").and_then(Value::as_object).map(|size| TextSize {
            width: number_field(size, "width").unwrap_or(1).max(0) as u32,
            height: number_field(size, "height").unwrap_or(1).max(0) as u32,
        }),
    }
}

fn classify_table(map: &Map<String, Value>) -> TableBlock {
    TableBlock {
        header: cell_array(map.get("header")),
        header_bold: map.get("headerBold").map(|v| truthy(Some(v))),
        column_widths: map.get("columnWidths").and_then(Value::as_array).map(|widths| {
            widths.iter().map(|w| loose_number(w).unwrap_or(0)).collect()
        }),
        line_char: map
            .get("lineChar")
            .and_then(Value::as_str)
            .map(str::to_owned),
        row_spacing: map
            .get("rowSpacing")
            .and_then(loose_number)
            .map(|n| n.max(0) as u32),
        footer_line: map.get("footerLine").map(|v| truthy(Some(v))),
        rows: map
            .get("rows")
            .and_then(Value::as_array)
            .map(|rows| rows.iter().map(|row| cell_array(Some(row))).collect())
            .unwrap_or_default(),
    }
}

fn cell_array(value: Option<&Value>) -> Vec<TableCell> {
    value
        .and_then(Value::as_array)
        .map(|cells| cells.iter().map(classify_cell).collect())
        .unwrap_or_default()
}

fn classify_cell(value: &Value) -> TableCell {
    match value.as_object() {
        Some(map) => TableCell {
            text: string_field(map, "text"),
            align: Align::from_value(map.get("align")),
        },
        None => TableCell::default(),
    }
}

/// Extract a string field, defaulting non-strings to empty.
fn string_field(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Extract an integral field, accepting floats by truncation.
fn number_field(map: &Map<String, Value>, key: &str) -> Option<i64> {
    map.get(key).and_then(loose_number)
}

fn loose_number(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}

/// JavaScript-style truthiness, matching how the original coerced flag
/// fields with `Boolean(...)`. Missing and `null` are false; zero and the
/// empty string are false; arrays and objects are true.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
