//! WASM bindings for a browser frontend

#![cfg(feature = "wasm")]

use std::time::Duration;

use wasm_bindgen::prelude::*;
use crate::{InputEvent, MatchConfig, MatchSession, NoScene, Transition};

/// A match session driven from JavaScript
///
/// Scene hooks are not forwarded; the frontend reacts to the returned
/// transitions and the per-frame snapshot instead.
#[wasm_bindgen]
pub struct WasmSession {
    inner: MatchSession<NoScene>,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a session from a JSON `MatchConfig`. An empty string uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmSession, JsError> {
        let config = if config_json.trim().is_empty() {
            MatchConfig::default()
        } else {
            MatchConfig::from_json(config_json)?
        };
        let inner = MatchSession::new(config, NoScene)?;
        Ok(WasmSession { inner })
    }

    /// Record a point for player 1 or 2
    pub fn point(&mut self, player: u8) -> Result<JsValue, JsError> {
        let transitions = self.inner.handle(InputEvent::PointScored { player })?;
        to_js(&transitions)
    }

    pub fn restart(&mut self) -> Result<JsValue, JsError> {
        let transitions = self.inner.handle(InputEvent::RestartRequested)?;
        to_js(&transitions)
    }

    pub fn main_menu(&mut self) -> Result<JsValue, JsError> {
        let transitions = self.inner.handle(InputEvent::MainMenuRequested)?;
        to_js(&transitions)
    }

    /// Advance by `dt_seconds` of frame time
    pub fn tick(&mut self, dt_seconds: f64) -> Result<JsValue, JsError> {
        if !dt_seconds.is_finite() || dt_seconds < 0.0 {
            return Err(JsError::new(&format!("Invalid frame time: {}", dt_seconds)));
        }
        let transitions = self.inner.tick(Duration::from_secs_f64(dt_seconds));
        to_js(&transitions)
    }

    pub fn declare_intro_end(&mut self) {
        self.inner.declare_intro_end();
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.snapshot())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

fn to_js(transitions: &[Transition]) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(transitions)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
