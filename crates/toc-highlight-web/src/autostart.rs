use std::cell::RefCell;

use log::LevelFilter;
use toc_highlight_config::{ConfigError, TocConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{AddEventListenerOptions, Document};

use crate::error::{WebError, describe};
use crate::logging;
use crate::session::Session;

/// Element id of the optional inline TOML configuration block.
pub const CONFIG_ELEMENT_ID: &str = "toc-highlight-config";

thread_local! {
    static PAGE_SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    let document = web_sys::window().and_then(|window| window.document());

    let (config, problem) = match read_inline_config(document.as_ref()) {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(err) => (TocConfig::default(), Some(err)),
    };
    logging::init(config.log_level_filter().unwrap_or(LevelFilter::Warn));
    if let Some(err) = problem {
        log::warn!("ignoring inline config: {err}");
    }

    let Some(document) = document else {
        log::warn!("toc-highlight not started: {}", WebError::NoDocument);
        return;
    };
    if let Err(err) = when_ready(&document, config) {
        log::warn!("toc-highlight not started: {err}");
    }
}

fn when_ready(document: &Document, config: TocConfig) -> Result<(), WebError> {
    if document.ready_state() != "loading" {
        attach_page(&config);
        return Ok(());
    }

    let callback = Closure::once_into_js(move || attach_page(&config));
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            callback.unchecked_ref(),
            &options,
        )
        .map_err(|err| WebError::Listener {
            event: "DOMContentLoaded",
            message: describe(&err),
        })
}

fn attach_page(config: &TocConfig) {
    match Session::attach(config) {
        Ok(Some(session)) => PAGE_SESSION.with(|slot| *slot.borrow_mut() = Some(session)),
        Ok(None) => log::debug!("page has no TOC"),
        Err(err) => log::warn!("toc-highlight not started: {err}"),
    }
}

fn read_inline_config(document: Option<&Document>) -> Result<Option<TocConfig>, ConfigError> {
    let text = document
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    parse_inline_config(text.as_deref())
}

/// Parse the inline block's text. A missing or blank block means defaults.
pub(crate) fn parse_inline_config(text: Option<&str>) -> Result<Option<TocConfig>, ConfigError> {
    match text {
        Some(text) if !text.trim().is_empty() => TocConfig::from_toml_str(text).map(Some),
        _ => Ok(None),
    }
}
