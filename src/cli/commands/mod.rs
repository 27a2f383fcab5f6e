//! One module per menu entry.

pub mod add;
pub mod login;
pub mod remove;
pub mod signup;
pub mod view;
