//! Widget construction: the handle bundle the player drives and the theme
//! resolved from the playlist's style options.

mod build;
mod handles;
mod theme;

pub use build::*;
pub use handles::*;
pub use theme::*;

#[cfg(test)]
mod tests;
