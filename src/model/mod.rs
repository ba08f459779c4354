pub mod access_key;
pub mod address;
pub mod admin;
pub mod api;
pub mod auth;
pub mod pagination;
pub mod workflow;
