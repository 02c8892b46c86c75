//! Chart widgets for Statlens statistics screens.
//!
//! - [`ChartData`]: validated x timestamps plus aligned series
//! - [`PointDetails`]: popup with the values of one hovered chart point
//! - [`PointDetailsStyle`]: its look, loadable from TOML or JSON

pub mod chart_data;
pub mod format;
pub mod point_details;
pub mod style;

pub use chart_data::{ChartData, ChartDataError, ChartLine};
pub use format::{format_timestamp, format_value, has_time_of_day, DateFormats, NumberFormat};
pub use point_details::{DetailLine, PointDetails, PointDetailsClicked};
pub use style::{PointDetailsStyle, StyleError};
