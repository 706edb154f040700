pub mod actions;
pub mod check;
pub mod registration;
