//! Pure domain types with minimal dependencies
//!
//! Types here have no async or framework dependencies so the session and
//! capture layers can share them freely.

pub mod geometry;
pub mod screen;
pub mod transform;

pub use geometry::*;
pub use screen::*;
