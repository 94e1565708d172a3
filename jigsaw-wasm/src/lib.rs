use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use jigsaw_core::{
    ConfigError, PieceId, PlacementError, PuzzleConfig, PuzzleSession, TargetId, TrashId,
    TriggerOutcome,
};
use js_sys::{Float32Array, Uint32Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

mod constants;
mod models;
mod state;
mod utils;

use constants::*;
use models::{PieceView, PlacementView, SlotView, TrashView};
use state::{STATE, State, with_state};
use utils::{get_query_param, line_attr, log, to_js_err};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let search = window.location().search().unwrap_or_default();

    let config = build_config(&search).map_err(to_js_err)?;
    let seed = get_query_param(&search, "seed")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or_else(random_seed);
    log(&format!(
        "jigsaw: {}x{} puzzle, seed {}",
        config.rows, config.cols, seed
    ));
    let session = PuzzleSession::new(config, seed).map_err(to_js_err)?;

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        session,
        error_timer: None,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));
    {
        let s = state.borrow();
        set_error_visible(&s, false);
        set_line(&s, LINE_HIDDEN);
    }
    attach_ui(state);
    Ok(())
}

/// `?config=<json>` first, then `?rows=` / `?cols=` on top of it.
fn build_config(search: &str) -> Result<PuzzleConfig, ConfigError> {
    let mut config = match get_query_param(search, "config") {
        Some(text) => PuzzleConfig::from_json(&text)?,
        None => PuzzleConfig::default(),
    };
    if let Some(rows) = get_query_param(search, "rows").and_then(|v| v.parse().ok()) {
        config.rows = rows;
    }
    if let Some(cols) = get_query_param(search, "cols").and_then(|v| v.parse().ok()) {
        config.cols = cols;
    }
    config.validate()?;
    Ok(config)
}

fn random_seed() -> u64 {
    // 2^53, the integer range a JS number holds exactly
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}

fn attach_ui(state: Rc<RefCell<State>>) {
    let doc = state.borrow().document.clone();

    // Reset button (scatter the pieces again, same edges)
    if let Some(btn) = doc.get_element_by_id(RESET_BUTTON_ID)
        && let Ok(btn) = btn.dyn_into::<HtmlElement>()
    {
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            s.session.request_reset();
            set_line(&s, LINE_HIDDEN);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
}

fn set_line(s: &State, value: &str) {
    if let Some(el) = s.document.get_element_by_id(LINE_ELEMENT_ID) {
        let _ = el.set_attribute("line", value);
    }
}

fn set_error_visible(s: &State, visible: bool) {
    if let Some(el) = s.document.get_element_by_id(ERROR_ELEMENT_ID) {
        let _ = el.set_attribute("visible", if visible { "true" } else { "false" });
    }
}

/// Show the error entity for `delay`. A newer rejection restarts the timer.
fn show_error(s: &mut State, delay: Duration) {
    let Some(el) = s.document.get_element_by_id(ERROR_ELEMENT_ID) else {
        return;
    };
    let _ = el.set_attribute("visible", "true");
    if let Some(handle) = s.error_timer.take() {
        s.window.clear_timeout_with_handle(handle);
    }
    let hide = Closure::once_into_js(move || {
        let _ = el.set_attribute("visible", "false");
        let _ = with_state(|s| s.error_timer = None);
    });
    let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    match s
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(hide.unchecked_ref(), ms)
    {
        Ok(handle) => s.error_timer = Some(handle),
        Err(e) => log(&format!("jigsaw: could not schedule error reset: {e:?}")),
    }
}

/// Scene side effects of a trigger: selection line and error indicator.
fn apply_outcome(s: &mut State, outcome: &TriggerOutcome) {
    match outcome {
        TriggerOutcome::Armed { line_start, .. } => {
            let p = line_start.to_array();
            set_line(s, &line_attr(p, p));
        }
        TriggerOutcome::Ignored { error } => {
            if matches!(error, PlacementError::DoubleSelection { .. }) {
                log(&format!("jigsaw: {error}"));
            }
        }
        TriggerOutcome::Rotated { .. } => {}
        TriggerOutcome::Rejected { error, .. } => {
            log(&format!("jigsaw: {error}"));
            set_line(s, LINE_HIDDEN);
        }
        TriggerOutcome::Cancelled { .. }
        | TriggerOutcome::Committed(_)
        | TriggerOutcome::Discarded(_) => set_line(s, LINE_HIDDEN),
    }
    if let TriggerOutcome::Committed(commit) = outcome
        && commit.completion.is_solved()
    {
        log("jigsaw: puzzle solved");
    }
    if let Some(delay) = outcome.error_indicator() {
        show_error(s, delay);
    }
}

fn parse_piece(id: &str) -> Result<PieceId, JsValue> {
    match id.parse::<TargetId>() {
        Ok(TargetId::Piece(p)) => Ok(p),
        _ => Err(JsValue::from_str(&format!("not a piece: {id}"))),
    }
}

/// Click on a scene entity (`piece-N`, `skeleton-N`, `trash`). Returns the
/// outcome as JSON.
#[wasm_bindgen]
pub fn trigger(id: &str) -> Result<String, JsValue> {
    with_state(|s| {
        let outcome = s.session.trigger_named(id);
        apply_outcome(s, &outcome);
        serde_json::to_string(&outcome).map_err(to_js_err)
    })?
}

#[wasm_bindgen]
pub fn trigger_rotate(id: &str) -> Result<String, JsValue> {
    with_state(|s| {
        let outcome = s.session.trigger_rotate_named(id);
        serde_json::to_string(&outcome).map_err(to_js_err)
    })?
}

#[wasm_bindgen]
pub fn request_reset() -> Result<(), JsValue> {
    with_state(|s| {
        s.session.request_reset();
        set_line(s, LINE_HIDDEN);
    })
}

/// Cursor moved; drag the free end of the selection line along.
#[wasm_bindgen]
pub fn set_line_end(x: f32, y: f32, z: f32) -> Result<(), JsValue> {
    with_state(|s| {
        if let Some(armed) = s.session.selection().armed() {
            let start = armed.line_start.to_array();
            set_line(s, &line_attr(start, [x, y, z]));
        }
    })
}

#[wasm_bindgen]
pub fn config_json() -> Result<String, JsValue> {
    with_state(|s| serde_json::to_string(s.session.config()).map_err(to_js_err))?
}

#[wasm_bindgen]
pub fn pieces_json() -> Result<String, JsValue> {
    with_state(|s| {
        let pieces: Vec<PieceView> = s.session.pieces().iter().map(PieceView::from).collect();
        serde_json::to_string(&pieces).map_err(to_js_err)
    })?
}

#[wasm_bindgen]
pub fn slots_json() -> Result<String, JsValue> {
    with_state(|s| {
        let slots: Vec<SlotView> = s.session.slots().iter().map(SlotView::from).collect();
        serde_json::to_string(&slots).map_err(to_js_err)
    })?
}

#[wasm_bindgen]
pub fn placements_json() -> Result<String, JsValue> {
    with_state(|s| {
        let placements: Vec<PlacementView> = s
            .session
            .placements()
            .iter()
            .map(|p| PlacementView::new(p, &s.session))
            .collect();
        serde_json::to_string(&placements).map_err(to_js_err)
    })?
}

#[wasm_bindgen]
pub fn trash_json() -> Result<String, JsValue> {
    with_state(|s| {
        let trash: Vec<TrashView> = s
            .session
            .trash_locations()
            .iter()
            .enumerate()
            .map(|(i, p)| TrashView {
                id: TrashId(i).to_string(),
                position: p.to_array(),
            })
            .collect();
        serde_json::to_string(&trash).map_err(to_js_err)
    })?
}

#[wasm_bindgen]
pub fn completion_json() -> Result<String, JsValue> {
    with_state(|s| serde_json::to_string(&s.session.check_completion()).map_err(to_js_err))?
}

/// SVG path data of a piece outline, for 2D previews.
#[wasm_bindgen]
pub fn contour_svg(id: &str) -> Result<String, JsValue> {
    let piece = parse_piece(id)?;
    with_state(|s| s.session.contour(piece).map(|c| c.to_svg_path()))?
        .ok_or_else(|| JsValue::from_str(&format!("unknown piece: {id}")))
}

/// Vertex positions of the extruded piece, `[x, y, z, ...]`, corner anchored.
#[wasm_bindgen]
pub fn mesh_positions(id: &str) -> Result<Float32Array, JsValue> {
    let piece = parse_piece(id)?;
    let mesh = with_state(|s| s.session.mesh(piece))?
        .map_err(to_js_err)?
        .ok_or_else(|| JsValue::from_str(&format!("unknown piece: {id}")))?;
    Ok(Float32Array::from(mesh.positions_flat().as_slice()))
}

#[wasm_bindgen]
pub fn mesh_indices(id: &str) -> Result<Uint32Array, JsValue> {
    let piece = parse_piece(id)?;
    let mesh = with_state(|s| s.session.mesh(piece))?
        .map_err(to_js_err)?
        .ok_or_else(|| JsValue::from_str(&format!("unknown piece: {id}")))?;
    Ok(Uint32Array::from(mesh.indices().as_slice()))
}
