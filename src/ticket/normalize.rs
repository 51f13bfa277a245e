//! Normalization: wire form → builder form.
//!
//! Every input, however incomplete, is coerced into a valid builder
//! sequence. Missing fields get defaults, table geometry is reconciled to
//! the header's column count, and nothing aliases the input — the output is
//! always a fresh copy.

use super::builder::{BuilderBlock, Cell, Dialect, TableBuilder, TextBuilder};
use super::types::{Align, ContentBlock, TableBlock, TableCell};

/// Normalize an externally supplied value into a builder sequence.
///
/// `None` or an empty slice produce a single default text block, so the
/// sequence is never empty.
pub fn normalize(value: Option<&[ContentBlock]>, dialect: Dialect) -> Vec<BuilderBlock> {
    match value {
        None | Some([]) => vec![BuilderBlock::default_text(dialect)],
        Some(blocks) => blocks
            .iter()
            .map(|block| normalize_block(block, dialect))
            .collect(),
    }
}

/// Normalize a single wire block, filling every default.
pub fn normalize_block(block: &ContentBlock, dialect: Dialect) -> BuilderBlock {
    match block {
        ContentBlock::Table(table) => BuilderBlock::Table(normalize_table(table)),
        ContentBlock::Qr(qr) => BuilderBlock::Qr(qr.clone()),
        ContentBlock::Image(image) => BuilderBlock::Image(image.clone()),
        ContentBlock::CharLine(line) => BuilderBlock::CharLine(line.clone()),
        ContentBlock::OpenDrawer(drawer) => BuilderBlock::OpenDrawer(drawer.clone()),
        ContentBlock::Cut(cut) => BuilderBlock::Cut(cut.clone()),
        ContentBlock::Text(text) => BuilderBlock::Text(TextBuilder {
            text: text.text.clone(),
            align: text.align.unwrap_or(dialect.default_align()),
            bold: text.bold.unwrap_or(false),
            size_width: text.size.map(|s| s.width).unwrap_or(1),
            size_height: text.size.map(|s| s.height).unwrap_or(1),
        }),
    }
}

/// Normalize a wire table into consistent geometry.
///
/// The header defines the column count. An empty header becomes one empty
/// cell. Every row is resized to exactly that count: extra cells are
/// dropped, missing cells synthesized empty and left-aligned.
fn normalize_table(table: &TableBlock) -> TableBuilder {
    let header: Vec<Cell> = if table.header.is_empty() {
        vec![Cell::default()]
    } else {
        table.header.iter().map(normalize_cell).collect()
    };
    let column_count = header.len();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            (0..column_count)
                .map(|index| row.get(index).map(normalize_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    let supplied = table.column_widths.as_deref().unwrap_or_default();

    TableBuilder {
        header,
        header_bold: table.header_bold.unwrap_or(false),
        column_widths: reconcile_widths(supplied, column_count),
        line_char: table.line_char.clone().unwrap_or_else(|| "-".into()),
        row_spacing: table.row_spacing.unwrap_or(1),
        footer_line: table.footer_line.unwrap_or(false),
        rows,
    }
}

fn normalize_cell(cell: &TableCell) -> Cell {
    Cell {
        text: cell.text.clone(),
        align: cell.align.unwrap_or(Align::Left),
    }
}

/// Reconcile supplied widths to exactly `count` entries.
///
/// An empty list gets an even distribution. Otherwise entries are taken
/// positionally, missing positions fall back to the first supplied width,
/// then to 0. Extra entries are dropped.
pub(crate) fn reconcile_widths(widths: &[i64], count: usize) -> Vec<i64> {
    if widths.is_empty() {
        return distributed_widths(count);
    }
    (0..count)
        .map(|index| {
            widths
                .get(index)
                .or_else(|| widths.first())
                .copied()
                .unwrap_or(0)
        })
        .collect()
}

/// Even percentage distribution over `count` columns, remainder on the
/// last column so the total stays 100.
pub(crate) fn distributed_widths(count: usize) -> Vec<i64> {
    if count == 0 {
        return Vec::new();
    }
    let base = 100 / count as i64;
    (0..count)
        .map(|index| {
            if index == count - 1 {
                100 - base * (count as i64 - 1)
            } else {
                base
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::types::TextSize;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_none_equals_normalize_empty() {
        let from_none = normalize(None, Dialect::Full);
        let from_empty = normalize(Some(&[]), Dialect::Full);
        assert_eq!(from_none, from_empty);
        assert_eq!(from_none, vec![BuilderBlock::default_text(Dialect::Full)]);
    }

    #[test]
    fn test_default_align_follows_dialect() {
        let wire = [ContentBlock::Text(Default::default())];
        let full = normalize(Some(&wire), Dialect::Full);
        let minimal = normalize(Some(&wire), Dialect::Minimal);
        match (&full[0], &minimal[0]) {
            (BuilderBlock::Text(f), BuilderBlock::Text(m)) => {
                assert_eq!(f.align, Align::Center);
                assert_eq!(m.align, Align::Left);
            }
            other => panic!("expected text blocks, got {other:?}"),
        }
    }

    #[test]
    fn test_table_rows_padded_to_header_length() {
        let wire = [ContentBlock::Table(TableBlock {
            header: vec![
                TableCell {
                    text: "A".into(),
                    align: None,
                },
                TableCell {
                    text: "B".into(),
                    align: None,
                },
            ],
            rows: vec![vec![TableCell {
                text: "1".into(),
                align: None,
            }]],
            ..Default::default()
        })];

        let table = match &normalize(Some(&wire), Dialect::Full)[0] {
            BuilderBlock::Table(t) => t.clone(),
            other => panic!("expected table, got {other:?}"),
        };
        assert_eq!(
            table.rows,
            vec![vec![Cell::new("1", Align::Left), Cell::new("", Align::Left)]]
        );
        assert_eq!(table.column_widths, vec![50, 50]);
        assert_eq!(table.line_char, "-");
        assert_eq!(table.row_spacing, 1);
    }

    #[test]
    fn test_table_rows_truncated_to_header_length() {
        let cell = |t: &str| TableCell {
            text: t.into(),
            align: None,
        };
        let wire = [ContentBlock::Table(TableBlock {
            header: vec![cell("A")],
            rows: vec![vec![cell("1"), cell("2"), cell("3")]],
            ..Default::default()
        })];
        let table = match &normalize(Some(&wire), Dialect::Full)[0] {
            BuilderBlock::Table(t) => t.clone(),
            other => panic!("expected table, got {other:?}"),
        };
        assert_eq!(table.rows, vec![vec![Cell::new("1", Align::Left)]]);
    }

    #[test]
    fn test_empty_header_becomes_single_cell() {
        let wire = [ContentBlock::Table(TableBlock::default())];
        let table = match &normalize(Some(&wire), Dialect::Full)[0] {
            BuilderBlock::Table(t) => t.clone(),
            other => panic!("expected table, got {other:?}"),
        };
        assert_eq!(table.header, vec![Cell::default()]);
        assert_eq!(table.column_widths, vec![100]);
    }

    #[test]
    fn test_distributed_widths_remainder_on_last() {
        assert_eq!(distributed_widths(3), vec![33, 33, 34]);
        assert_eq!(distributed_widths(4), vec![25, 25, 25, 25]);
        assert_eq!(distributed_widths(1), vec![100]);
        assert_eq!(distributed_widths(0), Vec::<i64>::new());
    }

    #[test]
    fn test_reconcile_pads_with_first_supplied_width() {
        assert_eq!(reconcile_widths(&[60, 20], 4), vec![60, 20, 60, 60]);
        assert_eq!(reconcile_widths(&[60, 20, 20], 2), vec![60, 20]);
        assert_eq!(reconcile_widths(&[], 2), vec![50, 50]);
    }

    #[test]
    fn test_normalize_after_to_wire_is_identity() {
        let dialect = Dialect::Full;
        let wire = [
            ContentBlock::Text(crate::ticket::types::TextBlock {
                text: "Hola".into(),
                align: None,
                bold: Some(true),
                size: Some(TextSize {
                    width: 2,
                    height: 1,
                }),
            }),
            ContentBlock::Table(TableBlock {
                header: vec![TableCell {
                    text: "X".into(),
                    align: None,
                }],
                rows: vec![Vec::new()],
                ..Default::default()
            }),
            ContentBlock::Cut(crate::ticket::types::CutBlock { cut: true }),
        ];

        let normalized = normalize(Some(&wire), dialect);
        let rewired: Vec<ContentBlock> = normalized.iter().map(|b| b.to_wire(dialect)).collect();
        let renormalized = normalize(Some(&rewired), dialect);
        assert_eq!(normalized, renormalized);
    }
}
