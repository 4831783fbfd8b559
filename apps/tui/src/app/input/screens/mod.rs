use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;
use krishi_mate::Tab;

mod chat;
mod dashboard;
mod help;
mod login;
mod market;
mod recommendations;
mod yield_tab;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    // The queued action runs before the next frame; drop keys until then.
    if app.pending.is_some() {
        return;
    }

    if help::handle_help_toggle(app, key, captures_text(app)) {
        return;
    }

    match app.screen {
        AppScreen::Login => login::handle_login_input(app, key),
        AppScreen::Dashboard => dashboard::handle_dashboard_input(app, key),
    }
}

/// True while printable keys belong to a text field rather than shortcuts.
pub fn captures_text(app: &App) -> bool {
    match app.screen {
        AppScreen::Login => true,
        AppScreen::Dashboard => match app.tab {
            Tab::Chat => true,
            Tab::Yield => yield_tab::captures_text(app),
            _ => false,
        },
    }
}
