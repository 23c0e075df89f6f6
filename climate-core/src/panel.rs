//! Load outcome of a single chart panel.
//!
//! Each panel owns its own state, so a failed endpoint only ever changes
//! the panel it feeds.

use crate::error::ApiError;

/// Inline text for a panel whose fetch failed.
pub const LOAD_ERROR: &str = "Failed to load data";
/// Inline text for the forecast panel, which fails while the model is untrained.
pub const FORECAST_LOAD_ERROR: &str = "Failed to load data. The forecast model may need training.";
pub const FORECAST_NOT_READY: &str = "Forecast is not ready yet";
pub const NO_DATA: &str = "No data for the selected period";

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState<T> {
    Loading,
    Ready(T),
    /// The backend answered but there is nothing to draw yet.
    NotReady(String),
    Failed(String),
    /// Toggled off by the user; kept in the DOM but not refreshed.
    Hidden,
}

impl<T> Default for PanelState<T> {
    fn default() -> Self {
        PanelState::Loading
    }
}

impl<T> PanelState<T> {
    /// Maps a fetch result, logging failures under the endpoint path.
    pub fn from_result(result: Result<T, ApiError>, error_text: &str) -> Self {
        match result {
            Ok(value) => PanelState::Ready(value),
            Err(e) => {
                if e.is_not_found() {
                    log::warn!("Nothing at {}: {}", e.path(), e);
                } else {
                    log::error!("Error loading {}: {}", e.path(), e);
                }
                PanelState::Failed(error_text.to_string())
            }
        }
    }

    /// Like [`PanelState::from_result`], but an empty payload becomes `NotReady`.
    pub fn from_result_or_empty(
        result: Result<T, ApiError>,
        is_empty: impl Fn(&T) -> bool,
        error_text: &str,
        not_ready_text: &str,
    ) -> Self {
        match Self::from_result(result, error_text) {
            PanelState::Ready(value) if is_empty(&value) => {
                PanelState::NotReady(not_ready_text.to_string())
            }
            other => other,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PanelState::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Text shown in place of a chart, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            PanelState::NotReady(msg) | PanelState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PanelState<U> {
        match self {
            PanelState::Loading => PanelState::Loading,
            PanelState::Ready(value) => PanelState::Ready(f(value)),
            PanelState::NotReady(msg) => PanelState::NotReady(msg),
            PanelState::Failed(msg) => PanelState::Failed(msg),
            PanelState::Hidden => PanelState::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> ApiError {
        ApiError::Transport {
            path: "/api/predictive-temp".to_string(),
            reason: "connection refused".to_string(),
        }
    }

    #[test]
    fn test_failure_maps_to_inline_message() {
        let state: PanelState<Vec<u8>> = PanelState::from_result(Err(failure()), FORECAST_LOAD_ERROR);
        assert_eq!(state.message(), Some(FORECAST_LOAD_ERROR));
        assert!(!state.is_ready());
    }

    #[test]
    fn test_empty_payload_is_not_ready() {
        let state = PanelState::from_result_or_empty(
            Ok(Vec::<u8>::new()),
            |v| v.is_empty(),
            LOAD_ERROR,
            FORECAST_NOT_READY,
        );
        assert_eq!(state, PanelState::NotReady(FORECAST_NOT_READY.to_string()));

        let state = PanelState::from_result_or_empty(
            Ok(vec![1u8]),
            |v| v.is_empty(),
            LOAD_ERROR,
            FORECAST_NOT_READY,
        );
        assert_eq!(state.ready(), Some(&vec![1u8]));
    }

    #[test]
    fn test_map_preserves_messages() {
        let state: PanelState<u8> = PanelState::Failed(LOAD_ERROR.to_string());
        assert_eq!(state.map(|v| v as u32), PanelState::Failed(LOAD_ERROR.to_string()));
        assert_eq!(PanelState::Ready(2u8).map(|v| v * 2), PanelState::Ready(4u8));
    }
}
