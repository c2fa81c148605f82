pub mod grammar;
pub mod handlers;
