pub mod action;
pub mod reducer;

pub use action::Action;
pub use reducer::{apply, apply_all, Transition};
