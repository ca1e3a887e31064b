//! Client-side state models.
//!
//! DESIGN
//! ======
//! `preferences` is the durable record, `presentation` turns it into DOM
//! mutations, and `submission` tracks form descriptors and in-flight
//! requests. None of them touch the browser directly.

pub mod preferences;
pub mod presentation;
pub mod submission;
