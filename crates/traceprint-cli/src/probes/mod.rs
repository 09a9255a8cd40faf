pub mod demo;
pub mod host;
