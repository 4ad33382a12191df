use crate::errors::ClientError;
use crate::models::{
    AttendanceRecord, AttendanceUpsert, CreatedStudent, GraphData, GraphOutcome, NewStudent,
    Stats, Student, StudentQuery,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// The backend REST API. Each call issues exactly one request.
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    async fn fetch_stats(&self) -> Result<Stats, ClientError>;
    async fn fetch_students(&self, query: &StudentQuery) -> Result<Vec<Student>, ClientError>;
    async fn create_student(&self, student: &NewStudent) -> Result<Student, ClientError>;
    async fn fetch_attendance(&self, date: NaiveDate)
    -> Result<Vec<AttendanceRecord>, ClientError>;
    async fn fetch_student_attendance(
        &self,
        student_id: i64,
    ) -> Result<Vec<AttendanceRecord>, ClientError>;
    async fn upsert_attendance(&self, upsert: &AttendanceUpsert) -> Result<(), ClientError>;
    async fn fetch_attendance_graph(&self, student_id: i64) -> Result<GraphOutcome, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    http: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Network)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl AttendanceApi for HttpApi {
    async fn fetch_stats(&self) -> Result<Stats, ClientError> {
        let response = self
            .http
            .get(self.url("/stats"))
            .send()
            .await
            .map_err(ClientError::Network)?;
        read_json(response).await
    }

    async fn fetch_students(&self, query: &StudentQuery) -> Result<Vec<Student>, ClientError> {
        let response = self
            .http
            .get(self.url("/students"))
            .query(query)
            .send()
            .await
            .map_err(ClientError::Network)?;
        read_json(response).await
    }

    async fn create_student(&self, student: &NewStudent) -> Result<Student, ClientError> {
        let response = self
            .http
            .post(self.url("/students"))
            .json(student)
            .send()
            .await
            .map_err(ClientError::Network)?;
        let created: CreatedStudent = read_json(response).await?;
        Ok(student.clone().into_student(created.student_id))
    }

    async fn fetch_attendance(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        let response = self
            .http
            .get(self.url("/attendance"))
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .map_err(ClientError::Network)?;
        read_json(response).await
    }

    async fn fetch_student_attendance(
        &self,
        student_id: i64,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/attendance/student/{student_id}")))
            .send()
            .await
            .map_err(ClientError::Network)?;
        read_json(response).await
    }

    async fn upsert_attendance(&self, upsert: &AttendanceUpsert) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/attendance"))
            .json(upsert)
            .send()
            .await
            .map_err(ClientError::Network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Network)?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        Ok(())
    }

    async fn fetch_attendance_graph(&self, student_id: i64) -> Result<GraphOutcome, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/attendance/graph/{student_id}")))
            .send()
            .await
            .map_err(ClientError::Network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ClientError::Network)?;

        if let Ok(ErrorBody { error }) = serde_json::from_slice::<ErrorBody>(&body) {
            return Ok(GraphOutcome::NoData(error));
        }
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        let graph: GraphData =
            serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))?;
        Ok(GraphOutcome::Data(graph))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(ClientError::Network)?;
    if !status.is_success() {
        return Err(api_error(status, &body));
    }
    serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))
}

fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
    let message = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
