pub mod file;
pub mod item;
