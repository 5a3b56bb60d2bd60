pub mod notification;
pub mod order;
pub mod quote;
