//! Playlist documents: model, validation and loading.
//!
//! A playlist is loaded once, validated, and frozen behind an `Arc`. Nothing
//! downstream mutates it.

mod load;
mod model;
mod validate;

pub use load::*;
pub use model::*;
pub use validate::*;
