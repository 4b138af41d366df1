use toc_highlight_config::ConfigError;
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("No global `window` object")]
    NoWindow,
    #[error("Window has no `document`")]
    NoDocument,
    #[error("Failed to register `{event}` listener: {message}")]
    Listener {
        event: &'static str,
        message: String,
    },
    #[error("Invalid options object: {0}")]
    Options(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Best-effort text for an exception thrown by a browser API.
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
