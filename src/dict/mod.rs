pub mod manager;
pub mod source;
