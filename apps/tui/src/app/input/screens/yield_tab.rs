use crate::app::forms::YieldField;
use crate::app::state::{App, PendingAction};
use crossterm::event::KeyCode;

pub fn captures_text(app: &App) -> bool {
    app.yield_form.metadata.is_some() && app.yield_form.field() == YieldField::Area
}

pub fn handle_yield_input(app: &mut App, key: KeyCode) {
    if app.yield_form.metadata.is_none() {
        if key == KeyCode::Char('r') && app.yield_form.metadata_error.is_some() {
            app.yield_form.metadata_error = None;
            app.queue(PendingAction::LoadYieldMetadata);
        }
        return;
    }

    match key {
        KeyCode::Down => app.yield_form.focus_next(),
        KeyCode::Up => app.yield_form.focus_prev(),
        KeyCode::Right => app.yield_form.cycle(true),
        KeyCode::Left => app.yield_form.cycle(false),
        KeyCode::Char(c) if captures_text(app) => app.yield_form.push_area(c),
        KeyCode::Backspace => {
            app.yield_form.area.pop();
        }
        KeyCode::Enter => match app.yield_form.request() {
            Ok(request) => {
                app.yield_form.result = None;
                app.queue(PendingAction::PredictYield(request));
            }
            Err(message) => app.status_message = message,
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{pune_farmer, test_app};
    use krishi_mate::Tab;

    #[tokio::test]
    async fn filled_form_predicts_yield() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Yield);
        app.run_pending().await;
        assert!(app.yield_form.metadata.is_some());

        for _ in 0..4 {
            handle_yield_input(&mut app, KeyCode::Right);
            handle_yield_input(&mut app, KeyCode::Down);
        }
        assert!(captures_text(&app));
        handle_yield_input(&mut app, KeyCode::Char('3'));
        handle_yield_input(&mut app, KeyCode::Enter);
        app.run_pending().await;

        let production = app
            .yield_form
            .result
            .as_ref()
            .and_then(|result| result.as_ref().ok())
            .map(|prediction| prediction.predicted_production);
        assert_eq!(production, Some(6.0));
    }

    #[tokio::test]
    async fn missing_choice_is_reported_without_request() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Yield);
        app.run_pending().await;

        handle_yield_input(&mut app, KeyCode::Enter);
        assert!(app.pending.is_none());
        assert_eq!(app.status_message, "Please choose State");
    }
}
