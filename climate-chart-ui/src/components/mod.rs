//! Reusable Dioxus RSX components for the climate dashboard pages.

mod aggregation_controls;
mod chart_container;
mod chart_header;
mod error_display;
mod kpi_tiles;
mod loading_spinner;
mod recommendation_cards;
mod series_toggles;
mod year_range_picker;

pub use aggregation_controls::AggregationControls;
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use kpi_tiles::KpiTiles;
pub use loading_spinner::LoadingSpinner;
pub use recommendation_cards::RecommendationCards;
pub use series_toggles::SeriesToggles;
pub use year_range_picker::YearRangePicker;
