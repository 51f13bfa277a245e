//! # Ticketera - Receipt Ticket Template Library
//!
//! Ticketera models ESC/POS-style receipt layouts as data. It provides:
//!
//! - **Content model**: a tagged union of printable blocks (text, image,
//!   cut, open-drawer, character rule, table, QR)
//! - **Normalization**: total coercion of arbitrary JSON into a consistent,
//!   fully defaulted builder sequence
//! - **Editing**: add/remove/move/update operations with change events,
//!   including table column and row manipulation
//! - **Preview**: a deterministic layout of the sequence as a simulated
//!   fixed-width thermal ticket
//!
//! ## Quick Start
//!
//! ```
//! use ticketera::preview::{OfflineLoader, PreviewRenderer};
//! use ticketera::ticket::{BlockKind, ContentBlock, Dialect, TicketTemplate};
//!
//! // Ingest a persisted value, however partial.
//! let wire: Vec<ContentBlock> = serde_json::from_str(
//!     r#"[{"text": "PANADERÍA SOL", "bold": true}, {"charLine": "="}]"#,
//! ).unwrap();
//! let mut template = TicketTemplate::from_value(Some(&wire), Dialect::Full);
//!
//! // Edit: every mutation hands back the wire-form payload.
//! let event = template.add_block(BlockKind::Cut);
//! assert_eq!(event.content().len(), 3);
//!
//! // Lay the result out as an 80mm ticket.
//! let mut renderer = PreviewRenderer::with_loader(80.0, Box::new(OfflineLoader));
//! let preview = renderer.render(event.content());
//! assert_eq!(preview.nodes.len(), 3);
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`ticket`] | Content block model, normalization, editing operations |
//! | [`preview`] | Fixed-width ticket layout renderer |
//! | [`error`] | Error types |
//!
//! ## Scope
//!
//! Ticketera is the model layer only. It performs no printer I/O and no
//! persistence: hosts read the wire form from the change/submit events and
//! own storage and device transmission themselves.

pub mod error;
pub mod preview;
pub mod ticket;

// Re-exports for convenience
pub use error::TicketeraError;
pub use preview::{PreviewRenderer, TicketPreview};
pub use ticket::{ContentBlock, Dialect, TemplateEvent, TicketTemplate};
