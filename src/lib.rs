pub mod app;
pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod modals;
pub mod models;
pub mod page;
pub mod sessions;
pub mod state;
pub mod tabs;
pub mod tasks;
pub mod ui;
pub mod views;

pub use app::router;
pub use client::{AttendanceApi, HttpApi};
pub use config::Config;
pub use controller::{Controller, UiEvent};
pub use sessions::Sessions;
pub use state::AppState;
