pub mod football;
pub mod picks;
pub mod prediction;

pub use football::*;
pub use picks::*;
pub use prediction::*;
