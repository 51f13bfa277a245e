//! # Ticket Content Model
//!
//! A printable receipt is an ordered sequence of typed content blocks:
//! text, image, cut, open-drawer, character rule, table, QR code. The
//! model exists in two representations:
//!
//! - **wire form** ([`ContentBlock`]): the compact, serializable shape used
//!   for persistence and exchange; optional fields stay optional.
//! - **builder form** ([`BuilderBlock`]): the fully defaulted shape held as
//!   the live source of truth while editing.
//!
//! ```
//! use ticketera::ticket::{ContentBlock, Dialect, TicketTemplate};
//!
//! let wire: Vec<ContentBlock> =
//!     serde_json::from_str(r#"[{"text": "Hola"}, {"cut": true}]"#).unwrap();
//! let mut template = TicketTemplate::from_value(Some(&wire), Dialect::Full);
//! let event = template.submit();
//! assert_eq!(event.content().len(), 2);
//! ```

mod builder;
mod editor;
mod normalize;
pub mod types;

pub use builder::{BlockKind, BuilderBlock, Cell, Dialect, TableBuilder, TextBuilder};
pub use editor::{Direction, TemplateEvent, TicketTemplate};
pub use normalize::{normalize, normalize_block};
pub use types::{
    Align, CharLineBlock, ContentBlock, CutBlock, ImageBlock, OpenDrawerBlock, QrBlock,
    TableBlock, TableCell, TextBlock, TextSize,
};
