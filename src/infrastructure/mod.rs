pub mod config;
pub mod credentials;
pub mod media;
pub mod repositories;
