use crate::client::AttendanceApi;
use crate::errors::ClientError;
use crate::forms::AddStudentForm;
use crate::modals::{ClickTarget, Overlay};
use crate::models::{AttendanceStatus, AttendanceUpsert, GraphOutcome, ParseError, StudentQuery};
use crate::page::{NoticeLevel, Page, PageSnapshot};
use crate::tabs::{Reload, Tab};
use crate::tasks::{TaskKey, TaskRegistry};
use crate::views;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// A user interaction forwarded from the browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    TabClicked { tab: Tab },
    SearchInput { text: String },
    SortChanged { value: String },
    /// Raw value of the date input; empty keeps the current date.
    DateChanged { date: String },
    ShowAddStudent,
    CloseAddStudent,
    SubmitAddStudent { form: AddStudentForm },
    /// `status` is the row's selector value at the moment Save was clicked.
    MarkAttendance { student_id: i64, status: AttendanceStatus },
    ViewAttendance { student_id: i64, name: String },
    ViewGraph { student_id: i64, name: String },
    CloseGraph,
    OverlayClicked { overlay: Overlay, target: ClickTarget },
}

struct Inner {
    api: Arc<dyn AttendanceApi>,
    page: Mutex<Page>,
    tasks: TaskRegistry,
    search_debounce: Duration,
}

/// Keeps the page in step with the backend: every interaction goes through
/// [`Controller::dispatch`], loads run as keyed background tasks.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<Inner>,
}

impl Controller {
    pub fn new(api: Arc<dyn AttendanceApi>, today: NaiveDate, search_debounce: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                page: Mutex::new(Page::new(today)),
                tasks: TaskRegistry::new(),
                search_debounce,
            }),
        }
    }

    /// Initial page load: stats plus the default tab's data.
    pub async fn init(&self) {
        self.reload_stats();
        let tab = self.inner.page.lock().await.tabs.active();
        self.trigger(tab.reload());
    }

    pub async fn snapshot(&self) -> PageSnapshot {
        self.inner.page.lock().await.snapshot()
    }

    /// Waits for every background load, including a pending debounced search.
    pub async fn settle(&self) {
        self.inner.tasks.settle().await;
    }

    pub async fn dispatch(&self, event: UiEvent) -> Result<(), ParseError> {
        debug!(?event, "dispatching ui event");
        match event {
            UiEvent::TabClicked { tab } => {
                let reload = self.inner.page.lock().await.tabs.activate(tab);
                self.trigger(reload);
            }
            UiEvent::SearchInput { text } => {
                self.inner.page.lock().await.search = text;
                let this = self.clone();
                self.inner.tasks.spawn_after(
                    TaskKey::Students,
                    self.inner.search_debounce,
                    async move { this.load_students().await },
                );
            }
            UiEvent::SortChanged { value } => {
                let sort = value.parse()?;
                self.inner.page.lock().await.sort = sort;
                self.trigger(Reload::StudentList);
            }
            UiEvent::DateChanged { date } => {
                let date = date.trim();
                if !date.is_empty() {
                    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                        .map_err(|_| ParseError::new("date", date))?;
                    self.inner.page.lock().await.date = parsed;
                }
                self.trigger(Reload::AttendanceForm);
            }
            UiEvent::ShowAddStudent => self.inner.page.lock().await.modals.add_student.show(),
            UiEvent::CloseAddStudent => self.inner.page.lock().await.modals.add_student.hide(),
            UiEvent::SubmitAddStudent { form } => self.submit_add_student(form).await,
            UiEvent::MarkAttendance { student_id, status } => {
                self.mark_attendance(student_id, status).await
            }
            UiEvent::ViewAttendance { student_id, name } => {
                self.view_attendance(student_id, &name).await
            }
            UiEvent::ViewGraph { student_id, name } => self.view_graph(student_id, &name).await,
            UiEvent::CloseGraph => self.inner.page.lock().await.modals.graph.hide(),
            UiEvent::OverlayClicked { overlay, target } => {
                self.inner.page.lock().await.modals.clicked(overlay, target);
            }
        }
        Ok(())
    }

    fn trigger(&self, reload: Reload) {
        let this = self.clone();
        match reload {
            Reload::StudentList => {
                self.inner
                    .tasks
                    .spawn(TaskKey::Students, async move { this.load_students().await });
            }
            Reload::AttendanceForm => {
                self.inner.tasks.spawn(TaskKey::Attendance, async move {
                    this.load_attendance_form().await
                });
            }
            Reload::ReportCards => {
                self.inner
                    .tasks
                    .spawn(TaskKey::Reports, async move { this.load_reports().await });
            }
        }
    }

    fn reload_stats(&self) {
        let this = self.clone();
        self.inner
            .tasks
            .spawn(TaskKey::Stats, async move { this.load_stats().await });
    }

    pub async fn load_stats(&self) {
        match self.inner.api.fetch_stats().await {
            Ok(stats) => self.inner.page.lock().await.stats = Some(stats),
            Err(err) => error!("error loading stats: {err}"),
        }
    }

    pub async fn load_students(&self) {
        let query = self.inner.page.lock().await.student_query();
        let markup = match self.inner.api.fetch_students(&query).await {
            Ok(students) => views::render_student_list(&students),
            Err(err) => {
                error!("error loading students: {err}");
                views::render_load_error("students")
            }
        };
        self.inner.page.lock().await.containers.students = markup.into_string();
    }

    pub async fn load_attendance_form(&self) {
        let date = self.inner.page.lock().await.date;
        let loaded = async {
            let students = self
                .inner
                .api
                .fetch_students(&StudentQuery::default())
                .await?;
            let records = self.inner.api.fetch_attendance(date).await?;
            Ok::<_, ClientError>((students, records))
        }
        .await;

        let mut page = self.inner.page.lock().await;
        match loaded {
            Ok((students, records)) => {
                page.containers.attendance =
                    views::render_attendance_list(&students, &records).into_string();
            }
            Err(err) => {
                error!("error loading attendance for {date}: {err}");
                page.containers.attendance = views::render_load_error("attendance").into_string();
            }
        }
    }

    pub async fn load_reports(&self) {
        let markup = match self.inner.api.fetch_students(&StudentQuery::default()).await {
            Ok(students) => views::render_reports_list(&students),
            Err(err) => {
                error!("error loading reports: {err}");
                views::render_load_error("reports")
            }
        };
        self.inner.page.lock().await.containers.reports = markup.into_string();
    }

    async fn submit_add_student(&self, form: AddStudentForm) {
        let payload = {
            let mut page = self.inner.page.lock().await;
            page.modals.add_student.form = form;
            match page.modals.add_student.form.to_payload() {
                Ok(payload) => payload,
                Err(missing) => {
                    page.notify(NoticeLevel::Error, missing.to_string());
                    return;
                }
            }
        };

        match self.inner.api.create_student(&payload).await {
            Ok(student) => {
                info!(student_id = student.student_id, "student added");
                {
                    let mut page = self.inner.page.lock().await;
                    page.notify(NoticeLevel::Success, "Student added successfully!");
                    page.modals.add_student.hide();
                }
                self.trigger(Reload::StudentList);
                self.reload_stats();
            }
            Err(ClientError::Api { message, .. }) => {
                error!("backend rejected new student: {message}");
                self.inner
                    .page
                    .lock()
                    .await
                    .notify(NoticeLevel::Error, format!("Error: {message}"));
            }
            Err(err) => {
                error!("error adding student: {err}");
                self.inner
                    .page
                    .lock()
                    .await
                    .notify(NoticeLevel::Error, "Error adding student");
            }
        }
    }

    async fn mark_attendance(&self, student_id: i64, status: AttendanceStatus) {
        let upsert = {
            let mut page = self.inner.page.lock().await;
            if !page.begin_save(student_id) {
                debug!(student_id, "attendance save already in flight, ignoring");
                return;
            }
            AttendanceUpsert {
                student_id,
                date: page.date,
                status,
                remarks: String::new(),
            }
        };

        let result = self.inner.api.upsert_attendance(&upsert).await;

        let mut page = self.inner.page.lock().await;
        page.finish_save(student_id);
        match result {
            Ok(()) => {
                info!(student_id, status = %upsert.status, date = %upsert.date, "attendance marked");
                page.notify(NoticeLevel::Success, "Attendance marked successfully!");
                drop(page);
                self.reload_stats();
            }
            Err(err) => {
                error!("error marking attendance: {err}");
                page.notify(NoticeLevel::Error, "Error marking attendance");
            }
        }
    }

    async fn view_attendance(&self, student_id: i64, name: &str) {
        match self.inner.api.fetch_student_attendance(student_id).await {
            Ok(records) if records.is_empty() => {
                self.inner.page.lock().await.notify(
                    NoticeLevel::Info,
                    "No attendance records found for this student",
                );
            }
            Ok(records) => {
                let mut message = format!("Attendance Record for {name}\n\n");
                for record in &records {
                    let _ = writeln!(message, "{}: {}", record.date, record.status);
                }
                self.inner
                    .page
                    .lock()
                    .await
                    .notify(NoticeLevel::Info, message);
            }
            Err(err) => {
                error!("error loading attendance history for {student_id}: {err}");
                self.inner
                    .page
                    .lock()
                    .await
                    .notify(NoticeLevel::Error, "Error loading attendance records");
            }
        }
    }

    async fn view_graph(&self, student_id: i64, name: &str) {
        let outcome = self.inner.api.fetch_attendance_graph(student_id).await;
        let mut page = self.inner.page.lock().await;
        match outcome {
            Ok(GraphOutcome::Data(graph)) => {
                let body = views::render_graph_panel(&graph).into_string();
                page.modals
                    .graph
                    .show(format!("Attendance Report - {name}"), body);
            }
            Ok(GraphOutcome::NoData(message)) => page.notify(NoticeLevel::Info, message),
            Err(err) => {
                error!("error loading graph for {student_id}: {err}");
                page.notify(NoticeLevel::Error, "Error loading attendance graph");
            }
        }
    }
}
