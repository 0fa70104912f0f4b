//! Domain library for the Jal Sanchay Mitra rainwater-harvesting assistant.
//!
//! The crate owns the feasibility estimator, the persisted record shapes,
//! repository shims over injected identity/document-store collaborators, and
//! the HTTP clients and handlers for the assessment and chatbot backends.

pub mod analysis;
pub mod assessment;
pub mod backend;
pub mod chat;
pub mod clock;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod navigation;
pub mod records;
pub mod remote;
pub mod store;
pub mod telemetry;
