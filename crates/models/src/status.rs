use serde::{Deserialize, Serialize};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::IntoStaticStr;

#[cfg(feature = "database")]
use sea_orm::{DeriveActiveEnum, EnumIter};

/// Error returned when a status string is not part of its closed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub value: String,
}

impl Display for ParseStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "'{}' is not a valid {} status", self.value, self.kind)
    }
}

impl Error for ParseStatusError {}

/// Lifecycle of a coursework project
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "database", derive(EnumIter, DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
pub enum CourseworkStatus {
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "draft"))]
    Draft,
    #[cfg_attr(feature = "database", sea_orm(string_value = "in_progress"))]
    InProgress,
    #[cfg_attr(feature = "database", sea_orm(string_value = "completed"))]
    Completed,
}

impl CourseworkStatus {
    pub const ALL: [Self; 3] = [Self::Draft, Self::InProgress, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl FromStr for CourseworkStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError {
                kind: "coursework",
                value: s.to_owned(),
            })
    }
}

/// Progress of a single chapter
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "database", derive(EnumIter, DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
pub enum ChapterStatus {
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "pending"))]
    Pending,
    #[cfg_attr(feature = "database", sea_orm(string_value = "in_progress"))]
    InProgress,
    #[cfg_attr(feature = "database", sea_orm(string_value = "completed"))]
    Completed,
}

impl ChapterStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl FromStr for ChapterStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError {
                kind: "chapter",
                value: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coursework_status_defaults_to_draft() {
        assert_eq!(CourseworkStatus::default(), CourseworkStatus::Draft);
    }

    #[test]
    fn chapter_status_defaults_to_pending() {
        assert_eq!(ChapterStatus::default(), ChapterStatus::Pending);
    }

    #[test]
    fn parses_every_coursework_status() {
        for status in CourseworkStatus::ALL {
            assert_eq!(status.as_str().parse::<CourseworkStatus>(), Ok(status));
        }
        assert_eq!(
            " in_progress ".parse::<CourseworkStatus>(),
            Ok(CourseworkStatus::InProgress)
        );
    }

    #[test]
    fn rejects_values_outside_the_closed_set() {
        let err = "archived".parse::<CourseworkStatus>().unwrap_err();
        assert_eq!(err.kind, "coursework");
        assert_eq!(err.value, "archived");
        assert_eq!(err.to_string(), "'archived' is not a valid coursework status");

        // Statuses are not shared between the two sets
        assert!("pending".parse::<CourseworkStatus>().is_err());
        assert!("draft".parse::<ChapterStatus>().is_err());
        assert!("InProgress".parse::<ChapterStatus>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&CourseworkStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<ChapterStatus>("\"completed\"").unwrap(),
            ChapterStatus::Completed
        );
        assert_eq!(ChapterStatus::InProgress.as_str(), "in_progress");
    }
}
