//! Controllers behind the HR page controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! `preferences` drives the display-settings panel; `forms` drives every
//! create/update/delete flow and the dependent employee dropdown. Both are
//! generic over their browser seams and are instantiated with the `web-sys`
//! implementations by `app`.

pub mod forms;
pub mod preferences;
