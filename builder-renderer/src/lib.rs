//! # Coconut Builder Renderer
//!
//! Turns builder canvas state into something a user can see.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  Canvas                     │
//! ├──────────────────────┬──────────────────────┤
//! │  DisplayList         │  HtmlExporter        │
//! │  (live editor boxes, │  (standalone page,   │
//! │   selection outline, │   absolute layout)   │
//! │   resize handle)     │                      │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! With the `wasm` feature, [`wasm::WasmBuilder`] exposes the whole editor
//! to JavaScript.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod display;
pub mod error;
pub mod export;
pub mod style;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use display::{BoxHeight, DisplayList, Outline, RenderBox, RenderContent};
pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, HtmlExporter};
