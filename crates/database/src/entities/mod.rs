//! Table definitions and the foreign keys between them
//!
//! | table                | owner                    | on owner delete            |
//! |----------------------|--------------------------|----------------------------|
//! | `courseworks`        | `accounts.id`            | deleted with the account   |
//! | `chapters`           | `courseworks.id`         | deleted with the coursework|
//! | `coursework_topics`  | both sides               | link row removed only      |
//! | `chapter_references` | both sides               | link row removed only      |
//!
//! The database declares every foreign key as `RESTRICT`; the services delete
//! children explicitly inside the owner's transaction.

pub mod accounts;
pub mod chapter_references;
pub mod chapters;
pub mod coursework_topics;
pub mod courseworks;
pub mod references;
pub mod topics;
