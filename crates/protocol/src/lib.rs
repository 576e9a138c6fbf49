//! Wire types for the WebView JavaScript bridge handshake.
//!
//! This crate contains the serde-serializable types exchanged with the
//! native side of a `WebViewJavascriptBridge`-style host. These types
//! represent the "protocol layer" - the shapes of data as they appear at
//! the page/host boundary.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization/deserialization
//! - **1:1 with the host library**: Match the message and probe shapes the
//!   Obj-C/Java bridge libraries consume
//! - **Stable**: Changes only when the handshake surface changes
//!
//! The acquisition state machine built on top of these types lives in
//! `wvb-runtime`.

pub mod handshake;
pub mod message;

pub use handshake::*;
pub use message::*;
