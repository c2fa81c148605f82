//! Rewrite suggestions for a resume against a job description.
//!
//! `/ai/enhance` stores a batch per session; `/ai/apply` replays the chosen
//! suggestions onto the client's current copy of the resume.

pub mod apply;
pub mod enhancer;
pub mod handlers;
pub mod models;
pub mod rules;
pub mod store;
