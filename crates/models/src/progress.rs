use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Error returned when a percentage falls outside 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressOutOfRange(pub i32);

impl Display for ProgressOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "progress percentage must be between {} and {}, got {}",
            Progress::MIN.0,
            Progress::MAX.0,
            self.0
        )
    }
}

impl Error for ProgressOutOfRange {}

/// Completion percentage of a coursework, always within 0..=100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Progress(i32);

impl Progress {
    pub const MIN: Self = Progress(0);
    pub const MAX: Self = Progress(100);

    pub fn new(value: i32) -> Result<Self, ProgressOutOfRange> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Progress(value))
        } else {
            Err(ProgressOutOfRange(value))
        }
    }

    pub fn value(self) -> i32 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self == Self::MAX
    }
}

impl TryFrom<i32> for Progress {
    type Error = ProgressOutOfRange;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Progress::new(value)
    }
}

impl From<Progress> for i32 {
    fn from(progress: Progress) -> Self {
        progress.0
    }
}

impl Display for Progress {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}%", self.0)
    }
}
