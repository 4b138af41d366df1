//! # toc-highlight-web
//!
//! Browser binding for `toc-highlight-engine`, compiled to WebAssembly.
//!
//! With the default `autostart` feature the module attaches itself to the page
//! as soon as it is instantiated (or on `DOMContentLoaded` while the document
//! is still loading). Configuration comes from an optional inline block:
//!
//! ```html
//! <script type="application/toml" id="toc-highlight-config">
//! active_class = "is-current"
//! throttle_ms = 80
//! </script>
//! ```
//!
//! Without `autostart`, scripts drive it explicitly:
//!
//! ```js
//! const toc = new TocHighlight({ active_class: "is-current" });
//! toc.refresh();
//! toc.destroy();
//! ```
//!
//! ## Module Structure
//!
//! - **`dom`**: [`WebDom`], the engine's page access over `web-sys`
//! - **`timer`**: [`WebTimer`], `setTimeout`-backed trailing timer
//! - **`listeners`**: registry of installed event listeners
//! - **`session`**: [`Session`], a controller wired to the live page
//! - **`logging`**: logger backend per target
//! - **`autostart`**: the `start` entry point and inline config block

#[cfg(feature = "autostart")]
pub mod autostart;
pub mod dom;
pub mod error;
pub mod listeners;
pub mod logging;
pub mod session;
pub mod timer;

pub use dom::WebDom;
pub use error::WebError;
pub use session::Session;
pub use timer::{TimerHandle, WebTimer};

use toc_highlight_config::TocConfig;
use wasm_bindgen::prelude::*;

/// Script-facing handle on an attached TOC highlighter.
#[wasm_bindgen]
pub struct TocHighlight {
    session: Option<Session>,
}

#[wasm_bindgen]
impl TocHighlight {
    /// Attach to the current document.
    ///
    /// `options` is a plain object with any of the config keys; missing keys
    /// take their defaults. A page without a TOC yields a detached instance.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<TocHighlight, JsValue> {
        let config = config_from_options(options)?;
        if let Ok(level) = config.log_level_filter() {
            logging::init(level);
        }
        let session = Session::attach(&config)?;
        Ok(Self { session })
    }

    #[wasm_bindgen(js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_attached)
    }

    #[wasm_bindgen(js_name = linkCount)]
    pub fn link_count(&self) -> usize {
        self.session.as_ref().map_or(0, Session::link_count)
    }

    /// Recompute the active link from the current scroll position now.
    /// Returns whether a link was marked.
    pub fn refresh(&self) -> bool {
        self.session.as_ref().is_some_and(Session::refresh)
    }

    /// Remove every listener and cancel the pending timer.
    pub fn destroy(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.teardown();
        }
    }
}

fn config_from_options(options: JsValue) -> Result<TocConfig, WebError> {
    if options.is_undefined() || options.is_null() {
        return Ok(TocConfig::default());
    }
    let config: TocConfig =
        serde_wasm_bindgen::from_value(options).map_err(|err| WebError::Options(err.to_string()))?;
    config.validate()?;
    Ok(config)
}
