//! # Coconut Builder Core
//!
//! Core logic for the website builder's free-form canvas.
//! Compiles to WASM so the browser editor and native tools share one model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               builder-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Element Model   │  Canvas Surface          │
//! │  - Elements      │  - Mouse/touch adapters  │
//! │  - Selection     │  - Drag / resize states  │
//! │  - Partial edits │  - Hit testing           │
//! ├─────────────────────────────────────────────┤
//! │  Property Editor │  Documents & Stores      │
//! │  - Field parsing │  - Page JSON documents   │
//! │  - Live preview  │  - Memory / file stores  │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod schema;
pub mod store;
pub mod surface;
pub mod update;

pub use canvas::Canvas;
pub use editor::{Property, PropertyEditor, PropertyField};
pub use element::{
    Element, ElementId, ElementKind, ElementType, FontWeight, ImageProps, Position, Styles,
    TextAlign,
};
pub use error::{BuilderError, BuilderResult};
pub use event::{
    InputEvent, MouseEvent, PointerEvent, PointerPhase, PointerPosition, TouchEvent, TouchPoint,
};
pub use schema::{ElementRecord, PageDocument};
pub use store::{FilePageStore, MemoryPageStore, PageStore, StoreError};
pub use surface::{CanvasBounds, CanvasSurface, DragState, GrabOffset, SurfaceConfig};
pub use update::ElementUpdate;

/// Builder core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
