//! Persistence layer for the coursework assistant
//!
//! Accounts own courseworks, courseworks own chapters; topics and references are
//! shared and linked through association tables. Open a handle with
//! [`db::create_connection`], provision it with [`db::bootstrap`], then pass it to
//! the service structs in [`services`].

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod services;

pub use error::StoreError;
