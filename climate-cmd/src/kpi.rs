//! `kpi` and `watch-kpi`.

use climate_api::ApiClient;
use climate_core::kpi::{anomaly_tile, extreme_days_tile, overview_tiles, KpiTile};
use climate_core::payload::KpiSnapshot;
use log::{error, info};
use std::future::Future;
use std::time::Duration;

/// All tiles either dashboard shows for one snapshot.
pub fn snapshot_tiles(snapshot: &KpiSnapshot) -> Vec<KpiTile> {
    let mut tiles = overview_tiles(snapshot);
    tiles.push(anomaly_tile(snapshot.temp_anomaly));
    tiles.push(extreme_days_tile(
        snapshot.extreme_days,
        snapshot.extreme_hist_avg,
    ));
    tiles
}

/// One line per tile: title, value, then badge and caption if present.
pub fn render_tiles(tiles: &[KpiTile]) -> String {
    tiles
        .iter()
        .map(|tile| {
            let mut line = format!("{:<22} {}", tile.field.title(), tile.text);
            if let Some(badge) = tile.badge {
                line.push_str(&format!(" [{}]", badge.css_class()));
            }
            if let Some(caption) = &tile.caption {
                line.push_str(&format!(" ({caption})"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn run_kpi(client: &ApiClient) -> anyhow::Result<()> {
    let snapshot = client.kpi().await?;
    println!("{}", render_tiles(&snapshot_tiles(&snapshot)));
    Ok(())
}

/// Refreshes until Ctrl-C. A failed refresh is logged and the loop goes on.
pub async fn run_watch_kpi(client: &ApiClient, every: Duration) -> anyhow::Result<()> {
    info!("refreshing KPIs every {}s (Ctrl-C to stop)", every.as_secs());
    let refresh = move || async move {
        match client.kpi().await {
            Ok(snapshot) => println!("{}\n", render_tiles(&snapshot_tiles(&snapshot))),
            Err(e) => error!("Error loading {}: {}", e.path(), e),
        }
    };
    let rounds = refresh_until(refresh, every, tokio::signal::ctrl_c()).await;
    info!("stopping KPI refresh after {} rounds", rounds);
    Ok(())
}

/// Runs `refresh`, waits `every`, and repeats until `stop` resolves. `stop`
/// is polled for the whole run, so it also cuts a refresh short. Returns the
/// number of refreshes that finished.
pub async fn refresh_until<R, Fut, S>(mut refresh: R, every: Duration, stop: S) -> usize
where
    R: FnMut() -> Fut,
    Fut: Future<Output = ()>,
    S: Future,
{
    tokio::pin!(stop);
    let mut rounds = 0;
    loop {
        tokio::select! {
            biased;
            _ = &mut stop => return rounds,
            _ = refresh() => rounds += 1,
        }
        tokio::select! {
            biased;
            _ = &mut stop => return rounds,
            _ = tokio::time::sleep(every) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tiles() {
        let snapshot = KpiSnapshot {
            year: Some(2023),
            avg_temp: Some(14.2),
            temp_anomaly: Some(-0.3),
            extreme_days: Some(7.0),
            extreme_hist_avg: Some(4.5),
            ..KpiSnapshot::default()
        };
        let text = render_tiles(&snapshot_tiles(&snapshot));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("14.2 \u{b0}C"));
        assert!(lines[0].ends_with("(Data for 2023)"));
        assert!(lines[1].contains(" -"));
        assert!(lines[4].contains("\u{2212}0.3"));
        assert!(lines[4].contains("[below-normal]"));
        assert!(lines[5].contains("[alert]"));
    }

    #[tokio::test]
    async fn test_stop_interrupts_a_hung_refresh() {
        let rounds = refresh_until(
            std::future::pending::<()>,
            Duration::from_secs(3600),
            std::future::ready(()),
        )
        .await;
        assert_eq!(rounds, 0);
    }

    #[tokio::test]
    async fn test_stop_ends_the_wait_between_refreshes() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let mut tx = Some(tx);
        let mut calls = 0;
        let refresh = || {
            calls += 1;
            if calls == 2 {
                if let Some(tx) = tx.take() {
                    let _ = tx.send(());
                }
            }
            async {}
        };
        let rounds = refresh_until(refresh, Duration::from_millis(1), rx).await;
        assert_eq!(rounds, 2);
    }
}
