use gloo::net::http::Request;
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use std::sync::OnceLock;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Serialize)]
struct LogRequest {
    level: String,
    message: String,
    component: Option<String>,
}

/// Where to POST log lines; unset means console only
static REMOTE_ENDPOINT: OnceLock<String> = OnceLock::new();
static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

/// `log` backend writing to the browser console, so the domain crate's
/// `debug!`/`warn!` calls show up in dev tools
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            Level::Error => gloo::console::error!(line.clone()),
            Level::Warn => gloo::console::warn!(line.clone()),
            Level::Info => gloo::console::info!(line.clone()),
            Level::Debug | Level::Trace => gloo::console::debug!(line.clone()),
        }

        if record.level() <= Level::Info {
            send_remote(record.level(), line, Some(record.target().to_string()));
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Pass the full `/api/logs` URL to also ship
/// info-and-above lines to the server.
pub fn init(remote_endpoint: Option<String>) {
    if let Some(endpoint) = remote_endpoint {
        let _ = REMOTE_ENDPOINT.set(endpoint);
    }

    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn send_remote(level: Level, message: String, component: Option<String>) {
    let Some(endpoint) = REMOTE_ENDPOINT.get() else {
        return;
    };

    let request = LogRequest {
        level: level.as_str().to_lowercase(),
        message,
        component,
    };

    // Fire and forget; a failed log post must not log again
    spawn_local(async move {
        if let Ok(req) = Request::post(endpoint).json(&request) {
            let _ = req.send().await;
        }
    });
}

/// Component-tagged logging for the yew side
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        log::debug!(target: component, "{}", message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        log::info!(target: component, "{}", message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        log::warn!(target: component, "{}", message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        log::error!(target: component, "{}", message);
    }
}
