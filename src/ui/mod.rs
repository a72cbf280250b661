pub mod chart;
pub mod panels;
pub mod tooltip;
