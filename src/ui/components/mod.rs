pub mod dashboard;
pub mod stats_bar;
pub mod typing_area;
