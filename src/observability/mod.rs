//! Observability layer for the Gemini chat client.
//!
//! Services log through an injectable [`Logger`]. The default
//! [`StructuredLogger`] emits `tracing` events and strips credentials from
//! structured fields before they reach a subscriber.
//!
//! ```rust
//! use integrations_gemini_chat::observability::{Logger, StructuredLogger};
//! use serde_json::json;
//!
//! let logger = StructuredLogger::new("gemini.files");
//! logger.info("upload started", json!({ "display_name": "report.pdf" }));
//! ```

pub mod logging;

pub use logging::{DefaultLogger, Logger, StructuredLogger};
