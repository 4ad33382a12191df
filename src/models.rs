use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: i64,
    pub name: String,
    pub roll_number: String,
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub email: String,
}

/// Payload for `POST /students`: a student before the backend assigns its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub roll_number: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub email: String,
}

impl NewStudent {
    pub fn into_student(self, student_id: i64) -> Student {
        Student {
            student_id,
            name: self.name,
            roll_number: self.roll_number,
            class_name: self.class_name,
            email: self.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatedStudent {
    pub student_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Late];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseError::new("attendance status", value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceUpsert {
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total_students: u64,
    pub present_today: u64,
    pub absent_today: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub attendance_percentage: f64,
    pub present: u64,
    pub absent: u64,
    pub late: u64,
    /// Base64-encoded PNG.
    pub image: String,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Result of a graph request. A backend `{error}` body is a message for the
/// user, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphOutcome {
    Data(GraphData),
    NoData(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    RollNumber,
    Class,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::RollNumber => "roll_number",
            Self::Class => "class",
        }
    }
}

impl FromStr for SortField {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "roll_number" => Ok(Self::RollNumber),
            "class" => Ok(Self::Class),
            _ => Err(ParseError::new("sort field", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseError::new("sort order", value)),
        }
    }
}

/// A sort selector value such as `roll_number-desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSelection {
    pub field: SortField,
    pub order: SortOrder,
}

impl fmt::Display for SortSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field.as_str(), self.order.as_str())
    }
}

impl FromStr for SortSelection {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (field, order) = value
            .split_once('-')
            .ok_or_else(|| ParseError::new("sort option", value))?;
        Ok(Self {
            field: field.parse()?,
            order: order.parse()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StudentQuery {
    pub search: String,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl StudentQuery {
    pub fn new(search: impl Into<String>, sort: SortSelection) -> Self {
        Self {
            search: search.into(),
            sort_by: sort.field,
            order: sort.order,
        }
    }
}
