use js_sys::{Function, Object, Reflect};
use shared::{AnalyticsEvent, AnalyticsReporter};
use wasm_bindgen::{JsCast, JsValue};

/// Forwards events to the page's `gtag` function when one is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct GtagReporter;

impl AnalyticsReporter for GtagReporter {
    fn report(&self, event: &AnalyticsEvent) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let gtag = match Reflect::get(&window, &JsValue::from_str("gtag")) {
            Ok(value) => value,
            Err(_) => return,
        };
        let Some(gtag) = gtag.dyn_ref::<Function>() else {
            log::debug!("gtag not loaded, dropping {}", event.name());
            return;
        };

        let params = Object::new();
        let _ = Reflect::set(&params, &"event_category".into(), &event.category().into());
        let _ = Reflect::set(&params, &"event_label".into(), &event.label().into());

        if let Err(e) = gtag.call3(&JsValue::NULL, &"event".into(), &event.name().into(), &params) {
            log::warn!("gtag rejected {}: {:?}", event.name(), e);
        }
    }
}
