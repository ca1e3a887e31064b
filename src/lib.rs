//! # hr-portal
//!
//! WASM presentation layer for the HR administration pages. The markup is
//! rendered by the HR backend; this crate attaches behavior to it.
//!
//! Two components carry the behavior:
//!
//! | Module | Role |
//! |--------|------|
//! | [`components::preferences`] | Restores, applies and persists theme color, text color, font size and dark mode |
//! | [`components::forms`] | Posts HR forms to the backend and turns the JSON reply into alerts and refreshes |
//! | [`bindings`] | Maps DOM events on known ids to the component operations |
//!
//! Everything outside [`app`] is plain Rust behind small traits
//! ([`util::storage::KeyValueStore`], [`state::presentation::StyleTarget`],
//! [`net::transport::Transport`], [`components::forms::Feedback`]) so it
//! builds and tests natively. The `browser` feature adds the `web-sys`
//! implementations and the module start function.

pub mod bindings;
pub mod components;
pub mod config;
pub mod net;
pub mod state;
pub mod util;

#[cfg(feature = "browser")]
pub mod app;

#[cfg(test)]
mod testing;
