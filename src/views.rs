//! Markup for each dynamic container. Every function is pure: it maps domain
//! values to a fragment and leaves placing it on the page to the caller.

use crate::models::{AttendanceRecord, AttendanceStatus, GraphData, Student};
use maud::{Markup, html};

pub fn render_student_list(students: &[Student]) -> Markup {
    html! {
        @if students.is_empty() {
            p.placeholder { "No students found" }
        } @else {
            @for student in students {
                div.student-card data-student-id=(student.student_id) {
                    h3 { (student.name) }
                    p { strong { "Roll:" } " " (student.roll_number) }
                    p { strong { "Class:" } " " (student.class_name) }
                    p { strong { "Email:" } " " (student.email) }
                    button.btn.btn-primary
                        type="button"
                        data-action="view-attendance"
                        data-student-id=(student.student_id)
                        data-student-name=(student.name) {
                        "View Attendance"
                    }
                }
            }
        }
    }
}

/// Status shown for a student before any edit: the record for the loaded
/// date if one exists, otherwise `Present`.
pub fn displayed_status(student_id: i64, records: &[AttendanceRecord]) -> AttendanceStatus {
    records
        .iter()
        .find(|record| record.student_id == student_id)
        .map(|record| record.status)
        .unwrap_or_default()
}

pub fn render_attendance_list(students: &[Student], records: &[AttendanceRecord]) -> Markup {
    html! {
        @if students.is_empty() {
            p.placeholder { "No students available" }
        } @else {
            @for student in students {
                @let current = displayed_status(student.student_id, records);
                div.attendance-item data-student-id=(student.student_id) {
                    div.attendance-info {
                        h4 { (student.name) }
                        p { (student.roll_number) " - " (student.class_name) }
                    }
                    div.attendance-status {
                        select id={ "status-" (student.student_id) } data-student-id=(student.student_id) {
                            @for status in AttendanceStatus::ALL {
                                option value=(status.as_str()) selected[status == current] {
                                    (status.as_str())
                                }
                            }
                        }
                    }
                    div.attendance-actions {
                        button.btn.btn-success
                            type="button"
                            data-action="mark-attendance"
                            data-student-id=(student.student_id) {
                            "Save"
                        }
                    }
                }
            }
        }
    }
}

pub fn render_reports_list(students: &[Student]) -> Markup {
    html! {
        @for student in students {
            div.report-card
                data-action="view-graph"
                data-student-id=(student.student_id)
                data-student-name=(student.name) {
                h3 { (student.name) }
                p { (student.roll_number) }
                p { (student.class_name) }
                p.report-hint { "📊 Click to view attendance graph" }
            }
        }
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn render_graph_panel(graph: &GraphData) -> Markup {
    html! {
        div.attendance-stats {
            (stat_box(&format_percentage(graph.attendance_percentage), "Attendance"))
            (stat_box(&graph.present.to_string(), "Present"))
            (stat_box(&graph.absent.to_string(), "Absent"))
            (stat_box(&graph.late.to_string(), "Late"))
        }
        img src={ "data:image/png;base64," (graph.image) } alt="Attendance Graph";
    }
}

fn stat_box(value: &str, label: &str) -> Markup {
    html! {
        div.stat-box {
            h4 { (value) }
            p { (label) }
        }
    }
}

/// Inline notice left in a container whose load failed.
pub fn render_load_error(what: &str) -> Markup {
    html! {
        p.load-error { "Error loading " (what) }
    }
}
