//! Free-form cover page editor engine.
//!
//! This crate owns the editable page: an ordered scene of text and image
//! elements on a fixed A4 canvas, the pointer gesture state machine that
//! moves and resizes them, center-line snapping while dragging, persistence
//! of the scene to a key-value store, and projection of a scene snapshot into
//! a single-page PDF. The host (browser glue or the `coverpage` binary) wires
//! raw input events to [`engine::EngineCore`] and reacts to the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Scene store operations and input handlers ([`engine::EngineCore`]) |
//! | [`doc`] | Element types, sparse updates, and the ordered [`doc::Scene`] |
//! | [`align`] | Text-extent estimation and center-snap helpers |
//! | [`camera`] | Screen ⇄ page coordinate conversion for on-screen zoom |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing element bodies, drag handles, and controls |
//! | [`theme`] | Named theme presets (background image + colors) |
//! | [`form`] | Form field record and the default seeded layout |
//! | [`persist`] | Key-value persistence bridge and save debouncing |
//! | [`upload`] | Data URI codec and latest-wins image read tracking |
//! | [`color`] | CSS color parsing for text and overlay fills |
//! | [`pdf`] | Scene → PDF projection |
//! | [`consts`] | Shared numeric constants (page size, thresholds, minimum sizes) |

pub mod align;
pub mod camera;
pub mod color;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod form;
pub mod hit;
pub mod input;
pub mod pdf;
pub mod persist;
pub mod theme;
pub mod upload;
