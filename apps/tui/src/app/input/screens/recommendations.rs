use crate::app::state::{App, PendingAction};
use crossterm::event::KeyCode;

pub fn handle_recommendations_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Right => {
            app.recommendations.selected_favorable = !app.recommendations.selected_favorable;
        }
        KeyCode::Char('r') => {
            app.recommendations.result = None;
            app.queue(PendingAction::LoadRecommendations);
        }
        _ => {}
    }
}
