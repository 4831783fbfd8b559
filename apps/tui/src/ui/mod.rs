// UI module for krishi-mate
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Login => screens::login::render_login(app, f),
        AppScreen::Dashboard => screens::dashboard::render_dashboard(app, f),
    }
}
