use std::cell::RefCell;
use std::rc::Rc;

use jigsaw_core::PuzzleSession;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

/// Runtime state shared by the exported functions and DOM callbacks.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub session: PuzzleSession,
    /// Pending `setTimeout` handle that hides the error indicator.
    pub error_timer: Option<i32>,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}

/// Run `f` against the installed state, failing if `start()` has not run.
pub fn with_state<R>(f: impl FnOnce(&mut State) -> R) -> Result<R, JsValue> {
    let state = STATE
        .with(|st| st.borrow().clone())
        .ok_or_else(|| JsValue::from_str("puzzle not started"))?;
    let mut s = state.borrow_mut();
    Ok(f(&mut s))
}
