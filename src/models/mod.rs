pub mod item;
pub mod upload;

pub use item::*;
pub use upload::*;
