//! Malformed menu settings are recovered from with a logged warning.

use std::sync::{Arc, Mutex};

use lwpc_runtime::{LayoutMenu, SeriesMenu, TimeframeMenu};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Default)]
struct WarningState {
    warnings: Vec<String>,
}

struct WarningCapture {
    state: Arc<Mutex<WarningState>>,
}

impl<S> Layer<S> for WarningCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != tracing::Level::WARN {
            return;
        }
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(message) = msg.message {
            self.state
                .lock()
                .expect("warning capture lock")
                .warnings
                .push(message);
        }
    }
}

fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let state = Arc::new(Mutex::new(WarningState::default()));
    let subscriber = tracing_subscriber::registry().with(WarningCapture {
        state: Arc::clone(&state),
    });
    let out = tracing::subscriber::with_default(subscriber, f);
    let warnings = std::mem::take(&mut state.lock().expect("warning capture lock").warnings);
    (out, warnings)
}

#[test]
fn malformed_timeframe_settings_warn_and_yield_empty_menu() {
    let (menu, warnings) = capture(|| TimeframeMenu::from_json(r#"{"favorites": "1D"}"#));
    assert!(menu.items.is_empty());
    assert!(menu.favorites.is_empty());
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("timeframe menu"), "{warnings:?}");
}

#[test]
fn malformed_layout_and_series_settings_warn() {
    let (layout, layout_warnings) = capture(|| LayoutMenu::from_json(r#"{"favs": [0, 1]}"#));
    let (series, series_warnings) = capture(|| SeriesMenu::from_json("{favorites: }"));
    assert!(layout.items.is_empty());
    assert!(series.items.is_empty());
    assert_eq!(layout_warnings.len(), 1);
    assert_eq!(series_warnings.len(), 1);
}

#[test]
fn well_formed_settings_are_silent() {
    let (menu, warnings) = capture(|| {
        TimeframeMenu::from_json(
            r#"{"favorites": ["5m"], "menu_listings": {"m": [1, 5, 15], "h": [1]}}"#,
        )
    });
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(menu.entries().count(), 4);
}
