//! Bunny stage engine: keeps a control panel, a grid of sprites, and a
//! click-driven multi-selection in agreement.
//!
//! The crate compiles natively (the headless driver and all tests use it that
//! way) and to WebAssembly, where [`engine::Engine`] binds the controller to a
//! browser canvas. The host layer only forwards DOM events and field edits; all
//! reconciliation happens here and is reported back as
//! [`controller::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Reconciliation controller and the [`controller::ControlEvent`] inbox |
//! | [`entity`] | Entity registry, stable ids, and grid layout |
//! | [`selection`] | Multi-selection set toggled by clicks |
//! | [`panel`] | Control panel fields (count, scale, rotation) |
//! | [`surface`] | Render surface contract and the retained in-memory stage |
//! | [`config`] | Stage geometry and rotation unit, with environment overrides |
//! | [`error`] | Rejected-input error type |
//! | [`render`] | Draws the stage onto a 2D canvas context |
//! | [`engine`] | Browser wrapper owning the canvas element |
//! | [`stage`] | `wasm-bindgen` export the host page constructs |
//! | [`consts`] | Field bounds, defaults, and stage geometry constants |

pub mod config;
pub mod consts;
pub mod controller;
pub mod engine;
pub mod entity;
pub mod error;
pub mod panel;
pub mod render;
pub mod selection;
pub mod stage;
pub mod surface;
