//! WebView Bridge Runtime - acquisition, host seam, and simulation
//!
//! This crate provides the page-side machinery for obtaining the handle a
//! `WebViewJavascriptBridge`-style host injects into a page:
//!
//! - **Acquisition**: phase-keyed consumer registration with a FIFO queue
//!   drained exactly once when the host signals readiness
//! - **Host seam**: [`PageEnvironment`] abstracts the document, scheduler
//!   turns, and event subscription, so the runtime runs against a real
//!   WebView or an in-memory double
//! - **Handle**: [`Bridge`] normalizes host-generation differences once at
//!   delivery
//! - **Diagnostics**: opt-in call logging that never alters behavior
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   wvb-rs    │  Consumer-facing API (waiters)
//! └──────┬──────┘
//!        │ register_consumer
//! ┌──────▼────────────────────────────────┐
//! │  wvb-runtime  This crate              │
//! │  ┌───────────────┐                    │
//! │  │ BridgeRuntime │  Idle/Acquiring/   │
//! │  └───────┬───────┘  Ready phases      │
//! │          │ drives          delivers   │
//! │  ┌───────▼─────────┐  ┌─────────────┐ │
//! │  │ PageEnvironment │  │   Bridge    │ │
//! │  │ probe · events  │  │ handle with │ │
//! │  │ scheduler turns │  │  init stub  │ │
//! │  └─────────────────┘  └─────────────┘ │
//! └───────────────────────────────────────┘
//! ```
//!
//! # Decoupling via PageEnvironment
//!
//! The runtime owns no DOM. Every page-side effect (probe insertion, event
//! subscription, turn scheduling) goes through the [`PageEnvironment`]
//! trait, which keeps the state machine testable without a WebView and
//! lets embedders adapt whichever shell they run in.

pub mod acquire;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod handle;
pub mod host;
pub mod sim;

// Re-export key types at crate root
pub use acquire::BridgeRuntime;
pub use config::{AcquireConfig, DIAGNOSTICS_ENV};
pub use diagnostics::DiagnosticBridge;
pub use error::{Error, Result};
pub use handle::{Bridge, HostBridge, ResponseCallback};
pub use host::{DeferredTask, EventListener, PageEnvironment};
pub use sim::{RecordingBridge, SimulatedPage};
