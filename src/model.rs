//! Row cache and the table projection built on top of it.

pub mod cache;
pub mod table;

pub use cache::RowCache;
pub use table::{
    process_line, CellData, CellRole, CellView, LogModel, ModelEvent, ModelState,
};
