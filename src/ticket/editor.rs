//! The template editing state machine.
//!
//! [`TicketTemplate`] owns the builder-form block sequence for the duration
//! of an edit session. External values enter only through [`TicketTemplate::set_value`]
//! (which takes a fresh normalized copy); edits leave only through the
//! events returned by each operation. Nothing is written back into the
//! host's value.
//!
//! All operations are synchronous and total: each either completes and
//! yields an event, or is a guarded no-op returning `None`.

use tracing::debug;

use super::builder::{BlockKind, BuilderBlock, Cell, Dialect};
use super::normalize::{normalize, reconcile_widths};
use super::types::{Align, ContentBlock};

/// Direction for [`TicketTemplate::move_block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Notification raised by template operations, carrying the full wire-form
/// sequence. `ContentChange` fires on every live edit; `ContentSubmit` only
/// on an explicit commit, so hosts can tell the two apart.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateEvent {
    ContentChange(Vec<ContentBlock>),
    ContentSubmit(Vec<ContentBlock>),
}

impl TemplateEvent {
    /// The wire-form payload, regardless of event kind.
    pub fn content(&self) -> &[ContentBlock] {
        match self {
            TemplateEvent::ContentChange(content) | TemplateEvent::ContentSubmit(content) => {
                content
            }
        }
    }
}

/// Editing state machine over an ordered block sequence.
#[derive(Debug, Clone)]
pub struct TicketTemplate {
    blocks: Vec<BuilderBlock>,
    dialect: Dialect,
}

impl TicketTemplate {
    /// Create an empty template: one default text block.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            blocks: vec![BuilderBlock::default_text(dialect)],
            dialect,
        }
    }

    /// Create a template from an externally supplied value.
    pub fn from_value(value: Option<&[ContentBlock]>, dialect: Dialect) -> Self {
        Self {
            blocks: normalize(value, dialect),
            dialect,
        }
    }

    /// Replace the edit state with a fresh normalized copy of `value`.
    ///
    /// This is the only ingestion point for external data; it raises no
    /// event, mirroring how a host-pushed value is not echoed back.
    pub fn set_value(&mut self, value: Option<&[ContentBlock]>) {
        self.blocks = normalize(value, self.dialect);
    }

    /// The current builder-form sequence.
    pub fn blocks(&self) -> &[BuilderBlock] {
        &self.blocks
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The current sequence in wire form.
    pub fn content(&self) -> Vec<ContentBlock> {
        self.blocks
            .iter()
            .map(|block| block.to_wire(self.dialect))
            .collect()
    }

    fn change(&self) -> TemplateEvent {
        TemplateEvent::ContentChange(self.content())
    }

    /// Append a freshly constructed default block of the requested kind.
    pub fn add_block(&mut self, kind: BlockKind) -> TemplateEvent {
        debug!(kind = kind.label(), "add block");
        self.blocks.push(BuilderBlock::editor_default(kind, self.dialect));
        self.change()
    }

    /// Remove the block at `index`. Removing the last block reinstates one
    /// default text block. Out-of-range indices are no-ops.
    pub fn remove_block(&mut self, index: usize) -> Option<TemplateEvent> {
        if index >= self.blocks.len() {
            return None;
        }
        debug!(index, "remove block");
        self.blocks.remove(index);
        if self.blocks.is_empty() {
            self.blocks.push(BuilderBlock::default_text(self.dialect));
        }
        Some(self.change())
    }

    /// Swap the block at `index` with its neighbor in `direction`.
    /// Moving the first block up or the last block down is a no-op.
    pub fn move_block(&mut self, index: usize, direction: Direction) -> Option<TemplateEvent> {
        if index >= self.blocks.len() {
            return None;
        }
        let target = match direction {
            Direction::Up => index.checked_sub(1)?,
            Direction::Down => {
                let down = index + 1;
                if down >= self.blocks.len() {
                    return None;
                }
                down
            }
        };
        debug!(index, target, "move block");
        self.blocks.swap(index, target);
        Some(self.change())
    }

    /// Replace the block at `index` wholesale.
    pub fn update_block(&mut self, index: usize, block: BuilderBlock) -> Option<TemplateEvent> {
        let slot = self.blocks.get_mut(index)?;
        *slot = block;
        Some(self.change())
    }

    /// Explicit commit: same payload as a change, distinct event.
    pub fn submit(&self) -> TemplateEvent {
        TemplateEvent::ContentSubmit(self.content())
    }

    // === Table sub-operations ===
    //
    // Each derives a new table with the targeted field changed and flows
    // through the same change event as `update_block`. Column add/remove
    // re-derives widths and resizes every row in lock-step with the header.

    /// Append a column: empty left-aligned header cell, widths reconciled,
    /// one empty cell added to every row.
    pub fn add_column(&mut self, index: usize) -> Option<TemplateEvent> {
        self.with_table(index, |table| {
            table.header.push(Cell::default());
            let count = table.header.len();
            table.column_widths = reconcile_widths(&table.column_widths, count);
            for row in &mut table.rows {
                row.push(Cell::default());
            }
            true
        })
    }

    /// Remove the column at `column`. Guarded so at least one column stays.
    pub fn remove_column(&mut self, index: usize, column: usize) -> Option<TemplateEvent> {
        self.with_table(index, |table| {
            if table.header.len() <= 1 || column >= table.header.len() {
                return false;
            }
            table.header.remove(column);
            if column < table.column_widths.len() {
                table.column_widths.remove(column);
            }
            let count = table.header.len();
            table.column_widths = reconcile_widths(&table.column_widths, count);
            for row in &mut table.rows {
                if column < row.len() {
                    row.remove(column);
                }
            }
            true
        })
    }

    /// Append an empty row sized to the current column count.
    pub fn add_row(&mut self, index: usize) -> Option<TemplateEvent> {
        self.with_table(index, |table| {
            let row = vec![Cell::default(); table.header.len()];
            table.rows.push(row);
            true
        })
    }

    /// Remove the row at `row`. Out-of-range is a no-op.
    pub fn remove_row(&mut self, index: usize, row: usize) -> Option<TemplateEvent> {
        self.with_table(index, |table| {
            if row >= table.rows.len() {
                return false;
            }
            table.rows.remove(row);
            true
        })
    }

    /// Set the text of the header cell at `column`.
    pub fn update_header_text(
        &mut self,
        index: usize,
        column: usize,
        text: impl Into<String>,
    ) -> Option<TemplateEvent> {
        let text = text.into();
        self.with_table(index, |table| match table.header.get_mut(column) {
            Some(cell) => {
                cell.text = text;
                true
            }
            None => false,
        })
    }

    /// Set the alignment of the header cell at `column`.
    pub fn update_header_align(
        &mut self,
        index: usize,
        column: usize,
        align: Align,
    ) -> Option<TemplateEvent> {
        self.with_table(index, |table| match table.header.get_mut(column) {
            Some(cell) => {
                cell.align = align;
                true
            }
            None => false,
        })
    }

    /// Toggle bold rendering of the header row.
    pub fn update_header_bold(&mut self, index: usize, bold: bool) -> Option<TemplateEvent> {
        self.with_table(index, |table| {
            table.header_bold = bold;
            true
        })
    }

    /// Set the text of the body cell at (`row`, `column`).
    pub fn update_cell(
        &mut self,
        index: usize,
        row: usize,
        column: usize,
        text: impl Into<String>,
    ) -> Option<TemplateEvent> {
        let text = text.into();
        self.with_table(index, |table| {
            match table.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
                Some(cell) => {
                    cell.text = text;
                    true
                }
                None => false,
            }
        })
    }

    /// Set the alignment of the body cell at (`row`, `column`).
    pub fn update_cell_align(
        &mut self,
        index: usize,
        row: usize,
        column: usize,
        align: Align,
    ) -> Option<TemplateEvent> {
        self.with_table(index, |table| {
            match table.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
                Some(cell) => {
                    cell.align = align;
                    true
                }
                None => false,
            }
        })
    }

    /// Set the width of column `column` from raw user input.
    ///
    /// Never rejects: anything that does not parse as a number becomes 0.
    pub fn update_column_width(
        &mut self,
        index: usize,
        column: usize,
        raw: &str,
    ) -> Option<TemplateEvent> {
        let width = parse_width(raw);
        self.with_table(index, |table| {
            match table.column_widths.get_mut(column) {
                Some(slot) => {
                    *slot = width;
                    true
                }
                None => false,
            }
        })
    }

    /// Run `mutate` against the table block at `index`. Returns `None` when
    /// the index is out of range, the block is not a table, or the mutation
    /// reports a guarded no-op.
    fn with_table(
        &mut self,
        index: usize,
        mutate: impl FnOnce(&mut super::builder::TableBuilder) -> bool,
    ) -> Option<TemplateEvent> {
        let changed = match self.blocks.get_mut(index) {
            Some(BuilderBlock::Table(table)) => mutate(table),
            _ => return None,
        };
        changed.then(|| self.change())
    }
}

/// Coerce raw width input to a number the way the original editor did:
/// `Number(value)` semantics, so non-numeric input becomes 0, never an
/// error. Fractions are truncated to whole percentages.
fn parse_width(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        .unwrap_or(0)
}
