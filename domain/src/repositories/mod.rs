mod branch;

pub use branch::*;
