#![forbid(unsafe_code)]

//! Core: shared geometry for the reaction bar.
//!
//! # Role in reactbar
//! `reactbar-core` is the vocabulary every other crate speaks. Button frames,
//! row bounds, mask frames and hit-test points are all expressed with these
//! types so that layout, style and the reconciling node never have to agree
//! on anything else.

pub mod geometry;

pub use geometry::{Point, Rect, Sides, Size};
