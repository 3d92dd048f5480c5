mod animator;
mod component;
mod controller;

pub use animator::*;
pub use component::*;
pub use controller::*;
