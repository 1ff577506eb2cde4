//! Zoom aggregate: value objects, the URL key codec and the preset catalog.

pub mod catalog;
pub mod key;
pub mod value_objects;

pub use catalog::*;
pub use key::{ZoomKey, decode, encode};
pub use value_objects::*;
