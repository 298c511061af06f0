//! Operations over the coursework data model
//!
//! Every write validates its input before touching storage. Writes spanning
//! more than one row run in a single transaction, which rolls back on drop if
//! an error returns early.

pub mod account;
pub mod chapter;
pub mod coursework;
pub mod reference;
pub mod topic;

mod cascade;
mod fields;

pub use account::{AccountProfile, AccountService, NewAccount};
pub use cascade::DeleteSummary;
pub use chapter::{ChapterDetails, ChapterService, NewChapter};
pub use coursework::{CourseworkDetails, CourseworkService, NewCoursework};
pub use reference::{NewReference, ReferenceDetails, ReferenceService};
pub use topic::{NewTopic, TopicService};
