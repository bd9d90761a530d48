//! # day-layout
//!
//! Deterministic layout of calendar events on a single day track.
//!
//! Events that overlap are drawn side by side; events that do not overlap
//! keep the full track width. Events are grouped into overlap pockets, each
//! pocket is split into at most two display columns, and every event comes
//! out as a render instruction carrying its column index and the pocket's
//! column count.
//!
//! ## Modules
//!
//! - [`interval`] — Validated minute ranges inside the twelve-hour day window
//! - [`record`] — Loosely typed input records and their explicit parsing
//! - [`slot`] — Column slots (placed interval or alignment hole)
//! - [`pocket`] — Group intervals into overlap pockets
//! - [`columns`] — Split a pocket into display columns
//! - [`layout`] — Layout pass, render instructions, and the track engine
//! - [`geometry`] — Pixel boxes for render instructions
//! - [`error`] — Error types

pub mod columns;
pub mod error;
pub mod geometry;
pub mod interval;
pub mod layout;
pub mod pocket;
pub mod record;
pub mod slot;

pub use columns::{fix_pocket, ColumnGroup};
pub use error::LayoutError;
pub use geometry::{Geometry, Placement, PlacementSink, TrackConfig};
pub use interval::{Interval, DAY_END, DAY_START};
pub use layout::{lay_out, lay_out_records, LayoutEngine, RenderInstruction, RenderSink};
pub use pocket::group_pockets;
pub use record::{parse_bound, EventRecord, RawBound};
pub use slot::Slot;
