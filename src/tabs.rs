use crate::models::ParseError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Students,
    Attendance,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Self::Students, Self::Attendance, Self::Reports];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Attendance => "attendance",
            Self::Reports => "reports",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Students => "Students",
            Self::Attendance => "Mark Attendance",
            Self::Reports => "Reports",
        }
    }

    /// The data load that activating this tab triggers.
    pub fn reload(self) -> Reload {
        match self {
            Self::Students => Reload::StudentList,
            Self::Attendance => Reload::AttendanceForm,
            Self::Reports => Reload::ReportCards,
        }
    }
}

impl FromStr for Tab {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == value)
            .ok_or_else(|| ParseError {
                kind: "tab",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reload {
    StudentList,
    AttendanceForm,
    ReportCards,
}

/// Which tab button and panel are active. Exactly one is at any time.
#[derive(Debug, Clone, Default)]
pub struct TabBar {
    active: Tab,
}

impl TabBar {
    pub fn new(initial: Tab) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Clicking the already-active tab still reloads its data.
    pub fn activate(&mut self, tab: Tab) -> Reload {
        self.active = tab;
        tab.reload()
    }
}
