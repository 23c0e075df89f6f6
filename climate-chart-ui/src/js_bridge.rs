//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Plotly.js itself is pulled from the CDN on first use. The small glue in
//! `assets/js/plotly-bridge.js` is evaluated at global scope once `Plotly`
//! exists and exposes `window.renderClimateChart` / `window.purgeClimateChart`.
//! Every call below polls until Plotly, the glue and the target element are
//! all present, so callers never have to sequence them.

use climate_core::view_model::ChartSpec;
use wasm_bindgen::JsCast;

static PLOTLY_BRIDGE_JS: &str = include_str!("../assets/js/plotly-bridge.js");

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('[climate] JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Encode `text` as a JS string literal (quotes included).
fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

/// Load Plotly and the chart glue. Safe to call more than once.
pub fn init_charts() {
    let store_js = format!(
        "if (!window.__climateChartsReady) {{ window.__climateBridge = {}; }}",
        js_string(PLOTLY_BRIDGE_JS)
    );
    call_js(&store_js);

    let init_js = format!(
        r#"
        (function() {{
            if (window.__climateChartsReady || window.__climateChartsLoading) return;
            window.__climateChartsLoading = true;
            if (typeof Plotly === 'undefined' && !document.getElementById('plotly-cdn')) {{
                var script = document.createElement('script');
                script.id = 'plotly-cdn';
                script.src = {cdn};
                document.head.appendChild(script);
            }}
            var waitForPlotly = setInterval(function() {{
                if (typeof Plotly !== 'undefined') {{
                    clearInterval(waitForPlotly);
                    (0, eval)(window.__climateBridge);
                    delete window.__climateBridge;
                    if (typeof renderClimateChart !== 'undefined') window.renderClimateChart = renderClimateChart;
                    if (typeof purgeClimateChart !== 'undefined') window.purgeClimateChart = purgeClimateChart;
                    window.__climateChartsReady = true;
                    console.log('[climate] charts initialized');
                }}
            }}, 100);
        }})();
        "#,
        cdn = js_string(PLOTLY_CDN),
    );
    call_js(&init_js);
}

/// Give up on an element that never shows up after this many 100 ms polls.
const MAX_POLLS: u32 = 300;

/// Poll until `ready` holds, then run `body` with `el` bound to the
/// container.
///
/// Each call stamps the container with a new sequence number when issued. A
/// poll whose stamp has been superseded stops without drawing, so only the
/// latest render or message for a container ever lands.
fn draw_when_ready(container_id: &str, ready: &str, body: &str) -> String {
    format!(
        r#"
        (function() {{
            var id = {id};
            var seqs = window.__climateSeq = window.__climateSeq || {{}};
            var seq = seqs[id] = (seqs[id] || 0) + 1;
            var tries = 0;
            var poll = setInterval(function() {{
                if (seqs[id] !== seq) {{ clearInterval(poll); return; }}
                var el = document.getElementById(id);
                if (!el || !({ready})) {{
                    if (++tries >= {max}) {{
                        clearInterval(poll);
                        console.warn('[climate] gave up waiting for #' + id);
                    }}
                    return;
                }}
                clearInterval(poll);
                {body}
            }}, 100);
        }})();
        "#,
        id = js_string(container_id),
        max = MAX_POLLS,
    )
}

fn render_script(container_id: &str, spec: &ChartSpec) -> String {
    let data = serde_json::to_string(&spec.data).unwrap_or_else(|_| "[]".to_string());
    let layout = serde_json::to_string(&spec.layout).unwrap_or_else(|_| "{}".to_string());
    let config = serde_json::to_string(&spec.config).unwrap_or_else(|_| "{}".to_string());
    draw_when_ready(
        container_id,
        "window.__climateChartsReady && typeof window.renderClimateChart !== 'undefined'",
        &format!(
            r#"try {{
                    window.renderClimateChart(id, {data}, {layout}, {config});
                }} catch(e) {{ console.error('[climate] renderClimateChart error:', e); }}"#,
            data = js_string(&data),
            layout = js_string(&layout),
            config = js_string(&config),
        ),
    )
}

fn message_script(container_id: &str, message: &str) -> String {
    draw_when_ready(
        container_id,
        "true",
        &format!(
            r#"if (typeof Plotly !== 'undefined') Plotly.purge(el);
                var p = document.createElement('p');
                p.className = 'chart-message';
                p.textContent = {msg};
                el.innerHTML = '';
                el.appendChild(p);
                el.dataset.climateMessage = '1';"#,
            msg = js_string(message),
        ),
    )
}

/// Create or replace the chart in `container_id`.
///
/// `Plotly.react` redraws the whole figure, so repeated calls with the same
/// spec leave the container unchanged.
pub fn render_chart(container_id: &str, spec: &ChartSpec) {
    call_js(&render_script(container_id, spec));
}

/// Replace the container's contents with a plain-text message.
///
/// Does not depend on Plotly having loaded, so it also works when the CDN is
/// unreachable.
pub fn show_message(container_id: &str, message: &str) {
    call_js(&message_script(container_id, message));
}

/// Destroy/clean up a chart in the given container. Pending draws for the
/// container are dropped.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        r#"var seqs = window.__climateSeq = window.__climateSeq || {{}};
        seqs[{id}] = (seqs[{id}] || 0) + 1;
        if (window.purgeClimateChart) {{ window.purgeClimateChart({id}); }} else {{ var el = document.getElementById({id}); if (el) el.innerHTML = ''; }}"#,
        id = js_string(container_id)
    ));
}

/// Blocking browser alert.
pub fn alert(message: &str) {
    match web_sys::window() {
        Some(window) => {
            if window.alert_with_message(message).is_err() {
                log::warn!("alert failed: {}", message);
            }
        }
        None => log::warn!("no window for alert: {}", message),
    }
}

/// Overwrite the value of an `<input>` in place.
pub fn set_input_value(element_id: &str, value: &str) {
    let input = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok());
    match input {
        Some(input) => input.set_value(value),
        None => log::warn!("no input #{} to reset", element_id),
    }
}

/// `window.location.origin`, used as the API base URL in the browser.
pub fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_quotes_and_newlines() {
        assert_eq!(js_string("it's \"here\"\n"), r#""it's \"here\"\n""#);
    }

    #[test]
    fn test_bridge_defines_globals() {
        assert!(PLOTLY_BRIDGE_JS.contains("function renderClimateChart"));
        assert!(PLOTLY_BRIDGE_JS.contains("function purgeClimateChart"));
    }

    #[test]
    fn test_render_and_message_share_the_sequence_gate() {
        let spec = ChartSpec {
            data: vec![],
            layout: serde_json::json!({}),
            config: serde_json::json!({}),
        };
        for script in [
            render_script("monthly-chart", &spec),
            message_script("monthly-chart", "No data"),
        ] {
            assert!(script.contains(r#"var id = "monthly-chart";"#));
            assert!(script.contains("var seq = seqs[id] = (seqs[id] || 0) + 1;"));
            assert!(script.contains("if (seqs[id] !== seq) { clearInterval(poll); return; }"));
        }
    }

    #[test]
    fn test_polling_is_capped() {
        let script = message_script("kpi-chart", "x");
        assert!(script.contains(&format!("if (++tries >= {})", MAX_POLLS)));
        assert!(script.contains("gave up waiting"));
    }

    #[test]
    fn test_message_text_is_escaped_into_the_script() {
        let script = message_script("c", "it's </p> \"bad\"");
        assert!(script.contains(r#"p.textContent = "it's </p> \"bad\"";"#));
    }
}
