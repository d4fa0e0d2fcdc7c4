pub mod action;
pub mod cli;
pub mod data;
pub mod department;
pub mod desk;
pub mod errors;
pub mod event_loop;
pub mod payload;
pub mod settings;
pub mod tui;
pub mod ui;

/// Identity used for paths and log files.
pub struct ClinicDesk;

impl app::Application for ClinicDesk {
    const APP_ID: &'static str = "clinic_desk";
}
