pub mod collectors;
pub mod persistence;
