pub mod lifecycle;
pub mod pin;
