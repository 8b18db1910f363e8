//! Schema request for an existing topic
//!
//! - `preflight`: validates the topic and `env` query parameter from the URL
//! - `form`: field values, touched state and client-side validation
//! - `submission`: request lifecycle and the force-register override
//! - `component`: the Leptos page wiring these together

pub mod component;
pub mod form;
pub mod preflight;
pub mod submission;

pub use component::TopicSchemaRequestPage;
