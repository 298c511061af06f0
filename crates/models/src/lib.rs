pub mod progress;
pub mod status;

pub use progress::{Progress, ProgressOutOfRange};
pub use status::{ChapterStatus, CourseworkStatus, ParseStatusError};
