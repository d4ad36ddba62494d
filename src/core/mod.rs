pub mod access;
pub mod auth;
pub mod cache;
pub mod policy;
pub mod services;
pub mod session;
