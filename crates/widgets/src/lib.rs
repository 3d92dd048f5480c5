pub mod components;
pub mod schedule;
