//! # toc-highlight-engine
//!
//! Keeps a table-of-contents sidebar pointing at the section being read.
//!
//! The engine knows nothing about browsers. It sees the page through
//! [`TocDom`] and schedules trailing updates through [`TimerHost`]; the
//! `toc-highlight-web` crate supplies both for `wasm32`, tests supply fakes.
//!
//! ## Module Structure
//!
//! - **`dom`**: the capability trait plus [`NavLink`] and [`HeadingMark`]
//! - **`matching`**: fragment to link resolution, including percent decoding
//! - **`headings`**: which heading the reader has most recently scrolled past
//! - **`throttle`**: the scroll rate limiter with a guaranteed trailing run
//! - **`sync`**: [`TocSync`], the controller wiring the above to host events

pub mod dom;
pub mod headings;
pub mod matching;
pub mod sync;
pub mod throttle;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use dom::{HeadingMark, NavLink, TocDom};
pub use headings::{DEFAULT_LOOKAHEAD_PX, compute_active_fragment};
pub use matching::{DecodeError, decode_fragment, match_link_for_id};
pub use sync::{SyncSettings, TocSync};
pub use throttle::{
    DEFAULT_THROTTLE_INTERVAL, Throttle, ThrottleState, ThrottleStep, TimerCommand, TimerHost,
};
