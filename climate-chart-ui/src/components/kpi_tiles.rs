//! KPI tile row.

use crate::bindings::KpiSlot;
use climate_core::kpi::{Badge, KpiField, KpiTile, PLACEHOLDER};
use climate_core::panel::PanelState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct KpiTilesProps {
    pub tiles: PanelState<Vec<KpiTile>>,
    /// Tiles shown with a placeholder until the snapshot arrives
    pub fields: Vec<KpiField>,
}

/// Renders one tile per field. Until the data is ready every value shows
/// the placeholder; a failed fetch adds an inline note under the row.
#[component]
pub fn KpiTiles(props: KpiTilesProps) -> Element {
    let tiles: Vec<KpiTile> = match props.tiles.ready() {
        Some(tiles) => tiles.clone(),
        None => props
            .fields
            .iter()
            .map(|field| KpiTile {
                field: *field,
                text: PLACEHOLDER.to_string(),
                badge: None,
                caption: None,
            })
            .collect(),
    };
    let note = props.tiles.message().map(str::to_string);

    rsx! {
        div {
            class: "kpi-row",
            style: "display: flex; flex-wrap: wrap; gap: 16px; margin-bottom: 24px;",
            for tile in tiles {
                KpiTileCard { tile: tile.clone() }
            }
        }
        if let Some(note) = note {
            p {
                class: "kpi-note",
                style: "color: #c0392b; font-size: 0.9em;",
                "{note}"
            }
        }
    }
}

#[component]
fn KpiTileCard(tile: KpiTile) -> Element {
    let id = KpiSlot(tile.field).id();
    let badge_class = tile
        .badge
        .map(|badge| format!("kpi-badge {}", badge.css_class()))
        .unwrap_or_default();

    rsx! {
        div {
            class: "kpi-card",
            style: "flex: 1 1 180px; padding: 12px 16px; border: 1px solid #e0e0e0; border-radius: 8px; background: #fff;",
            div {
                style: "font-size: 0.85em; color: #666;",
                "{tile.field.title()}"
            }
            div {
                id: "{id}",
                class: "kpi-value",
                style: "font-size: 1.6em; font-weight: bold;",
                "{tile.text}"
            }
            if let Some(badge) = tile.badge {
                span { class: "{badge_class}", "{badge_label(badge)}" }
            }
            if let Some(caption) = tile.caption.clone() {
                div {
                    class: "kpi-caption",
                    style: "font-size: 0.8em; color: #888;",
                    "{caption}"
                }
            }
        }
    }
}

fn badge_label(badge: Badge) -> &'static str {
    match badge {
        Badge::AboveNormal => "Above normal",
        Badge::BelowNormal => "Below normal",
        Badge::Neutral => "Normal",
        Badge::Alert => "Above average",
        Badge::Calm => "At or below average",
    }
}
