//! Presentation helpers shared by the CLI table and the GUI

pub mod map;
pub mod summary;

pub use map::{bubble_radius_m, map_center, MapViewport};
pub use summary::{summary_rows, SummaryRow, SummaryTotals};
