//! WebAssembly bindings for the board generator.
//!
//! This module exposes a game session to JavaScript through wasm-bindgen.
//! State crosses the boundary as the same JSON document the stored game uses.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::generator::GenerationConfig;
#[cfg(feature = "wasm")]
use crate::session::{GameSession, GameStateJson};
#[cfg(feature = "wasm")]
use crate::topology::BoardSize;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed session wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmSession {
    session: GameSession,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmSession {
    /// Create an empty classic session
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSession {
        WasmSession {
            session: GameSession::new(),
        }
    }

    /// Generate a new board. On failure the previous board and rules stay.
    /// Flags follow the UI toggles: `true` means the pairing is allowed.
    #[wasm_bindgen]
    pub fn generate(
        &mut self,
        extension: bool,
        same_resource_can_touch: bool,
        eight_six_can_touch: bool,
        two_twelve_can_touch: bool,
        same_number_can_touch: bool,
    ) -> Result<String, JsValue> {
        let size = if extension {
            BoardSize::Extension
        } else {
            BoardSize::Classic
        };
        let config = GenerationConfig::new(size)
            .with_same_resource_can_touch(same_resource_can_touch)
            .with_eight_six_can_touch(eight_six_can_touch)
            .with_two_twelve_can_touch(two_twelve_can_touch)
            .with_same_number_can_touch(same_number_can_touch);

        self.session
            .regenerate_with(config, &mut rand::thread_rng())
            .map_err(to_js)?;
        Ok(self.get_state())
    }

    /// Enable or disable manual number selection
    #[wasm_bindgen(js_name = setManualDice)]
    pub fn set_manual_dice(&mut self, enabled: bool) {
        self.session.set_manual_dice(enabled);
    }

    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self) -> Result<(), JsValue> {
        self.session.start_game().map_err(to_js)
    }

    #[wasm_bindgen(js_name = endGame)]
    pub fn end_game(&mut self) {
        self.session.end_game();
    }

    /// Roll two dice, returns the pair as `[first, second]`
    #[wasm_bindgen(js_name = rollDice)]
    pub fn roll_dice(&mut self) -> Result<Vec<u8>, JsValue> {
        let roll = self
            .session
            .roll_dice(&mut rand::thread_rng())
            .map_err(to_js)?;
        Ok(vec![roll.first, roll.second])
    }

    #[wasm_bindgen(js_name = selectNumber)]
    pub fn select_number(&mut self, number: u8) -> Result<(), JsValue> {
        self.session.select_number(number).map_err(to_js)
    }

    /// Hex indices to light up for the selected number
    #[wasm_bindgen(js_name = getHighlighted)]
    pub fn get_highlighted(&self) -> Vec<u32> {
        self.session
            .highlighted_hexes()
            .into_iter()
            .map(|h| h as u32)
            .collect()
    }

    /// Robber waves as a JSON array of arrays
    #[wasm_bindgen(js_name = getRobberWaves)]
    pub fn get_robber_waves(&self) -> String {
        serde_json::to_string(&self.session.robber_waves()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the session state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.session.to_json()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Replace the session from a stored JSON document
    #[wasm_bindgen(js_name = loadState)]
    pub fn load_state(&mut self, state_json: &str) -> Result<(), JsValue> {
        let state: GameStateJson = serde_json::from_str(state_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid state JSON: {}", e)))?;
        self.session = GameSession::from_json(state).map_err(to_js)?;
        Ok(())
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "wasm")]
fn to_js(e: crate::session::SessionError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
