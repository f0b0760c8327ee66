//! Command handler implementations

pub mod check;
pub mod describe;
pub mod render;
