pub mod breakdown;
pub mod chat;
pub mod check;
pub mod common;
pub mod contact;
pub mod dashboard;
pub mod revenue;
