//! sweepgrid: deterministic parameter-sweep combination indexing and labeled
//! comparison-grid compositing.
//!
//! The crate has two halves. The indexing half ([`axis`], [`combination`])
//! maps a linear index to a point of the X x Y x Z Cartesian product and
//! back, one combination per external run. The compositing half
//! ([`collector`], [`grid_layout`], [`compositor`], [`text_paint`]) gathers
//! the per-run images and stitches them into a single labeled comparison
//! grid. [`ops`] is the typed operation surface the host calls.

pub mod axis;
pub mod collector;
pub mod combination;
pub mod compositor;
pub mod grid_layout;
pub mod manifest;
pub mod ops;
pub mod text_paint;
