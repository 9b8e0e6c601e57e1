mod branch;
pub mod primitives;

pub use branch::*;
