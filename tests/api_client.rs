use attendance_web::client::{AttendanceApi, HttpApi};
use attendance_web::errors::ClientError;
use attendance_web::models::{
    AttendanceStatus, AttendanceUpsert, GraphOutcome, NewStudent, SortField, SortOrder,
    StudentQuery,
};
use chrono::NaiveDate;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpApi {
    HttpApi::new(format!("{}/api", server.uri()), Duration::from_secs(2)).unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

#[tokio::test]
async fn fetch_students_sends_search_and_sort() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/students"))
        .and(query_param("search", "asha"))
        .and(query_param("sort_by", "roll_number"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "student_id": 1, "name": "Asha", "roll_number": "R-1", "class": "10A", "email": "a@x.io" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let query = StudentQuery {
        search: "asha".into(),
        sort_by: SortField::RollNumber,
        order: SortOrder::Desc,
    };
    let students = api_for(&server).fetch_students(&query).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].class_name, "10A");
}

#[tokio::test]
async fn fetch_stats_parses_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_students": 30, "present_today": 25, "absent_today": 3
        })))
        .mount(&server)
        .await;

    let stats = api_for(&server).fetch_stats().await.unwrap();
    assert_eq!(stats.total_students, 30);
    assert_eq!(stats.present_today, 25);
    assert_eq!(stats.absent_today, 3);
}

#[tokio::test]
async fn create_student_returns_the_created_student() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/students"))
        .and(body_json(json!({
            "name": "Cara", "roll_number": "R-3", "class": "10A", "email": "c@x.io"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Student added successfully", "student_id": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = api_for(&server)
        .create_student(&NewStudent {
            name: "Cara".into(),
            roll_number: "R-3".into(),
            class_name: "10A".into(),
            email: "c@x.io".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.student_id, 12);
    assert_eq!(created.name, "Cara");
}

#[tokio::test]
async fn create_student_surfaces_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/students"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Roll number exists" })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_student(&NewStudent {
            name: "Cara".into(),
            roll_number: "R-1".into(),
            class_name: "10A".into(),
            email: "c@x.io".into(),
        })
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Roll number exists");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_attendance_filters_by_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/attendance"))
        .and(query_param("date", "2026-10-18"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "attendance_id": 5, "student_id": 1, "date": "2026-10-18", "status": "Absent",
              "remarks": "", "name": "Asha", "roll_number": "R-1", "class": "10A" }
        ])))
        .mount(&server)
        .await;

    let records = api_for(&server).fetch_attendance(date()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].student_id, 1);
    assert_eq!(records[0].status, AttendanceStatus::Absent);
}

#[tokio::test]
async fn fetch_student_attendance_reads_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/attendance/student/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "student_id": 4, "date": "2026-10-18", "status": "Late" },
            { "student_id": 4, "date": "2026-10-17", "status": "Present" }
        ])))
        .mount(&server)
        .await;

    let records = api_for(&server).fetch_student_attendance(4).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].status, AttendanceStatus::Present);
}

#[tokio::test]
async fn upsert_attendance_posts_the_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/attendance"))
        .and(body_json(json!({
            "student_id": 4, "date": "2026-10-18", "status": "Late", "remarks": ""
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({ "message": "Attendance marked successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server)
        .upsert_attendance(&AttendanceUpsert {
            student_id: 4,
            date: date(),
            status: AttendanceStatus::Late,
            remarks: String::new(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn upsert_attendance_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/attendance"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .upsert_attendance(&AttendanceUpsert {
            student_id: 4,
            date: date(),
            status: AttendanceStatus::Present,
            remarks: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 500, .. }));
}

#[tokio::test]
async fn graph_without_data_is_a_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/attendance/graph/9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "No attendance data found" })),
        )
        .mount(&server)
        .await;

    let outcome = api_for(&server).fetch_attendance_graph(9).await.unwrap();
    assert_eq!(outcome, GraphOutcome::NoData("No attendance data found".into()));
}

#[tokio::test]
async fn graph_with_data_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/attendance/graph/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "image": "iVBORw0KGgo=", "attendance_percentage": 87.5,
            "present": 14, "absent": 2, "late": 0, "total": 16
        })))
        .mount(&server)
        .await;

    match api_for(&server).fetch_attendance_graph(9).await.unwrap() {
        GraphOutcome::Data(graph) => {
            assert_eq!(graph.attendance_percentage, 87.5);
            assert_eq!(graph.present, 14);
            assert_eq!(graph.total, Some(16));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_stats().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let api = HttpApi::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
    let err = api.fetch_stats().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}
