//! Networking modules for the HR backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` defines the HTTP seam and error model, `types` the JSON reply
//! schema, and `api` the endpoint URLs, body encoders and the `gloo-net`
//! transport used in the browser.

pub mod api;
pub mod transport;
pub mod types;
