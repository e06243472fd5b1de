pub mod event;
pub mod registration;

pub use event::*;
pub use registration::*;
