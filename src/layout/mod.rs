//! Page layout engine.
//!
//! Everything here works in top-origin coordinates and threads an explicit
//! immutable [`Cursor`] through each step: a layout function takes the
//! cursor marking the next free vertical position and returns the cursor
//! below whatever it drew. The [`pagination::PageFlow`] state machine owns
//! the physical pages and the one subtle invariant of the whole engine:
//! only the last page of a document stays open for trailing content.

pub mod canvas;
pub mod cursor;
pub mod header;
pub mod pagination;
pub mod party;
pub mod signature;
pub mod table;

pub use canvas::{PageCanvas, PageResources, TextStyle};
pub use cursor::Cursor;
pub use header::{HeaderAnchors, HeaderContext};
pub use pagination::{PageFlow, PaginationPlan};
pub use table::{draw_items_table, TableOptions, TableOutcome};
