pub mod attributes;
pub mod scan;
