//! Floor-plan viewport and geometry engine.
//!
//! Everything in this crate is synchronous and free of I/O. A host (the web
//! frontend, tests, or the backend's relabel mutation) owns a
//! [`editor::FloorPlanEditor`], feeds it input events, reads back state for
//! painting, and drains queued [`store::Commit`]s into an [`store::EventStore`].

pub mod boundary;
pub mod calc;
pub mod config;
pub mod editor;
pub mod error;
pub mod gesture;
pub mod grid;
pub mod input;
pub mod labeling;
pub mod models;
pub mod selection;
pub mod store;
pub mod viewport;

pub use config::EditorConfig;
pub use editor::{EditMode, FloorPlanEditor, Panel};
pub use error::{InputError, StoreError};
pub use models::{FloorPlan, Point, Rect, Size, Table, TableId, Venue, Zone, ZoneId};
