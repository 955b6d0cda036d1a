//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js choropleth lives in `assets/js/*.js`, is embedded at compile
//! time and evaluated as globals (no ES modules) exposed via `window.*`.
//! Column data for the current display buffer is published once per
//! selection change as `window.__uscColumns`; each panel render only passes
//! its own small config.

use wasm_bindgen::JsValue;

static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static CHOROPLETH_JS: &str = include_str!("../assets/js/choropleth.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('USC JS call failed:', e); }}",
        code
    );
    if let Err(err) = js_sys::eval(&wrapped) {
        web_sys::console::warn_2(&JsValue::from_str("USC eval failed:"), &err);
    }
}

/// Quote a JSON document as a JS string literal.
fn js_string(json: &str) -> String {
    serde_json::to_string(json).unwrap_or_else(|_| "\"{}\"".to_string())
}

/// Waits for D3, evaluates the stored scripts and promotes their entry points.
const INIT_JS: &str = r#"
        (function() {
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined') {
                    clearInterval(waitForD3);
                    (0, eval)(window.__uscChartScripts);
                    delete window.__uscChartScripts;
                    if (typeof renderChoropleth !== 'undefined') window.renderChoropleth = renderChoropleth;
                    if (typeof initTooltip !== 'undefined') window.initTooltip = initTooltip;
                    if (typeof showTooltip !== 'undefined') window.showTooltip = showTooltip;
                    if (typeof hideTooltip !== 'undefined') window.hideTooltip = hideTooltip;
                    window.__uscChartsReady = true;
                    console.log('USC charts initialized');
                }
            }, 100);
        })();
"#;

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The scripts are stored on `window` and evaluated at global scope (indirect
/// eval) once D3 is present, then their entry points are promoted to
/// `window.*`.
pub fn init_charts() {
    let all_js = [TOOLTIP_JS, CHOROPLETH_JS].join("\n");
    call_js(&format!("window.__uscChartScripts = {};", js_string(&all_js)));

    call_js(INIT_JS);
}

/// Publish the column data every panel draws from.
///
/// `columns_json` is the serialized column map of a display buffer
/// (`x`, `y`, `name`, `<metric>_left`, ...).
pub fn publish_columns(columns_json: &str) {
    call_js(&format!(
        "window.__uscColumns = JSON.parse({});",
        js_string(columns_json)
    ));
}

/// Render one choropleth panel from the published columns.
///
/// Polls until the chart scripts are ready and the container exists.
pub fn render_choropleth(container_id: &str, config_json: &str) {
    let config = js_string(config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__uscChartsReady &&
                    window.__uscColumns &&
                    typeof window.renderChoropleth !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderChoropleth('{container_id}', window.__uscColumns, JSON.parse({config}));
                    }} catch(e) {{ console.error('[USC] renderChoropleth error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}
