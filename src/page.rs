use crate::forms::AddStudentForm;
use crate::modals::Modals;
use crate::models::{SortSelection, Stats, StudentQuery};
use crate::tabs::{Tab, TabBar};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A message for the user, shown once as an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Rendered markup of the dynamic containers.
#[derive(Debug, Clone, Default)]
pub struct Containers {
    pub students: String,
    pub attendance: String,
    pub reports: String,
}

/// Everything the page shows, held explicitly instead of read back from the
/// document.
#[derive(Debug, Clone)]
pub struct Page {
    pub tabs: TabBar,
    pub search: String,
    pub sort: SortSelection,
    pub date: NaiveDate,
    pub stats: Option<Stats>,
    pub containers: Containers,
    pub modals: Modals,
    saving: BTreeSet<i64>,
    notices: Vec<Notice>,
}

impl Page {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tabs: TabBar::new(Tab::Students),
            search: String::new(),
            sort: SortSelection::default(),
            date: today,
            stats: None,
            containers: Containers::default(),
            modals: Modals::default(),
            saving: BTreeSet::new(),
            notices: Vec::new(),
        }
    }

    pub fn student_query(&self) -> StudentQuery {
        StudentQuery::new(self.search.clone(), self.sort)
    }

    /// Takes the submit lock for a row. Returns false while a save for the
    /// same student is still in flight.
    pub fn begin_save(&mut self, student_id: i64) -> bool {
        self.saving.insert(student_id)
    }

    pub fn finish_save(&mut self, student_id: i64) {
        self.saving.remove(&student_id);
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    /// Captures the page for the browser. Notices are handed out once.
    pub fn snapshot(&mut self) -> PageSnapshot {
        let add_student = &self.modals.add_student;
        let graph = &self.modals.graph;
        PageSnapshot {
            active_tab: self.tabs.active(),
            search: self.search.clone(),
            sort: self.sort.to_string(),
            date: self.date,
            stats: self.stats.unwrap_or_default(),
            students_html: self.containers.students.clone(),
            attendance_html: self.containers.attendance.clone(),
            reports_html: self.containers.reports.clone(),
            add_student: AddStudentSnapshot {
                open: add_student.is_open(),
                form: add_student.form.clone(),
            },
            graph: GraphSnapshot {
                open: graph.is_open(),
                title: graph.title.clone(),
                body_html: graph.body.clone(),
            },
            notices: std::mem::take(&mut self.notices),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddStudentSnapshot {
    pub open: bool,
    pub form: AddStudentForm,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    pub open: bool,
    pub title: String,
    pub body_html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub active_tab: Tab,
    pub search: String,
    pub sort: String,
    pub date: NaiveDate,
    pub stats: Stats,
    pub students_html: String,
    pub attendance_html: String,
    pub reports_html: String,
    pub add_student: AddStudentSnapshot,
    pub graph: GraphSnapshot,
    pub notices: Vec<Notice>,
}
