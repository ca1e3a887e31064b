//! Utility helpers shared across the portal modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (local storage,
//! document access) from the controllers so the controllers stay testable.

pub mod color;
#[cfg(feature = "browser")]
pub mod dom;
pub mod storage;
