pub mod chat;
pub mod document;
pub mod quiz;
