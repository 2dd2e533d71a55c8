//! Sinkhole Infrastructure Layer
pub mod crypto;
pub mod database;
pub mod dns;
pub mod repositories;
