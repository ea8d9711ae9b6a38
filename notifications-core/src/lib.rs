pub mod application;
pub mod auth;
pub mod context;
pub mod dto;
pub mod error;
pub mod repository;
pub mod routing;
pub mod service;
