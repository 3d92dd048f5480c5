// Leaf widgets
pub mod button;
pub mod spinner;
pub mod tooltip;

// Overlays
pub mod modal;

// Stateful: expansion controller + panel animator
pub mod accordion;

// Re-exports for convenience
pub use accordion::*;
pub use button::*;
pub use modal::*;
pub use spinner::*;
pub use tooltip::*;
