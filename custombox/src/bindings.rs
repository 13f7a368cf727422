//! JavaScript entry point mirroring the classic widget API:
//!
//! ```js
//! const modal = new Custombox({ target: "#panel", effect: "slide", close: () => {} });
//! await modal.open();
//! ```

use std::rc::Rc;

use component::{Modal, Options};
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Function, Promise, Reflect};
use utils::web::{GlooTransport, WebSurface};
use utils::Hook;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

/// Wraps the JS function stored under `name`, if there is one.
fn js_hook(options: &JsValue, name: &'static str) -> Option<Hook> {
    let callback = Reflect::get(options, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()?;
    Some(Hook::new(move || {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::warn!("{name} callback threw: {e:?}");
        }
    }))
}

fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

#[wasm_bindgen(js_name = Custombox)]
pub struct JsCustombox {
    modal: Modal<WebSurface>,
}

#[wasm_bindgen(js_class = Custombox)]
impl JsCustombox {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsCustombox, JsError> {
        let mut parsed: Options = options
            .into_serde()
            .map_err(|e| JsError::new(&format!("invalid options: {e}")))?;
        parsed.open = js_hook(&options, "open");
        parsed.complete = js_hook(&options, "complete");
        parsed.close = js_hook(&options, "close");

        let surface = WebSurface::new().map_err(to_js_error)?;
        let modal = Modal::new(surface, Rc::new(GlooTransport), parsed).map_err(to_js_error)?;
        Ok(Self { modal })
    }

    /// Rejects when the target can't be found or loaded.
    pub fn open(&self) -> Promise {
        let modal = self.modal.clone();
        future_to_promise(async move {
            modal
                .open()
                .await
                .map(|()| JsValue::UNDEFINED)
                .map_err(|e| to_js_error(e).into())
        })
    }

    pub fn close(&self) -> Promise {
        let modal = self.modal.clone();
        future_to_promise(async move {
            modal.close().await;
            Ok(JsValue::UNDEFINED)
        })
    }
}
