pub mod api;
pub mod dto;
pub mod error;
pub mod push;
pub mod runtime;
