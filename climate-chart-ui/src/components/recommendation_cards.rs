//! Forecast summary and recommendation cards.

use crate::components::LoadingSpinner;
use climate_core::panel::PanelState;
use climate_core::payload::{Prescriptive, RecommendationCard};
use dioxus::prelude::*;

#[component]
pub fn RecommendationCards(prescriptive: PanelState<Prescriptive>) -> Element {
    let body = match prescriptive {
        PanelState::Ready(p) => rsx! {
            p {
                class: "forecast-summary",
                style: "font-style: italic; margin-bottom: 12px;",
                "{p.forecast_summary}"
            }
            div {
                class: "rec-grid",
                style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 12px;",
                for card in p.recs {
                    RecCard { card: card.clone() }
                }
            }
        },
        PanelState::NotReady(msg) | PanelState::Failed(msg) => rsx! {
            p { class: "chart-message", "{msg}" }
        },
        PanelState::Loading => rsx! {
            LoadingSpinner { message: "Loading recommendations...".to_string() }
        },
        PanelState::Hidden => rsx! {},
    };

    rsx! {
        section {
            class: "recommendations",
            style: "margin: 24px 0;",
            h3 { "Recommendations" }
            {body}
        }
    }
}

#[component]
fn RecCard(card: RecommendationCard) -> Element {
    let class = format!("rec-card {}", card.status.css_class());
    rsx! {
        div {
            class: "{class}",
            style: "padding: 12px; border-radius: 8px; border: 1px solid #e0e0e0;",
            div {
                style: "font-weight: bold; margin-bottom: 4px;",
                "{card.icon} {card.sector}"
            }
            div { style: "margin-bottom: 4px;", "{card.action}" }
            div { style: "font-size: 0.85em; color: #555;", "{card.detail}" }
        }
    }
}
