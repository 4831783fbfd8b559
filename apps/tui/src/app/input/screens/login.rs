use crate::app::forms::LoginField;
use crate::app::state::{App, PendingAction};
use crossterm::event::KeyCode;

pub fn handle_login_input(app: &mut App, key: KeyCode) {
    let field = app.login.field;
    let uses_picker = field.is_picker() || field == LoginField::MainCrop;

    match key {
        KeyCode::Esc => app.running = false,
        KeyCode::Tab => app.login.next_field(),
        KeyCode::BackTab => app.login.prev_field(),
        KeyCode::Down if uses_picker => app.login.move_picker(true),
        KeyCode::Up if uses_picker => app.login.move_picker(false),
        KeyCode::Right | KeyCode::Left if field == LoginField::MainCrop => {
            app.login.move_picker(key == KeyCode::Right);
        }
        KeyCode::Down => app.login.next_field(),
        KeyCode::Up => app.login.prev_field(),
        KeyCode::Backspace => app.login.backspace(),
        KeyCode::Char(c) => app.login.push_char(c),
        KeyCode::Enter if field.is_picker() => {
            if app.login.commit_choice() {
                app.status_message.clear();
                app.login.next_field();
            } else {
                app.status_message = format!("No {} matches that name", field.label());
            }
        }
        KeyCode::Enter if field == LoginField::MainCrop => submit(app),
        KeyCode::Enter => app.login.next_field(),
        _ => {}
    }
}

fn submit(app: &mut App) {
    match app.login.to_profile() {
        Ok(profile) => app.queue(PendingAction::SaveProfile(profile)),
        Err(message) => app.status_message = message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_app;
    use crate::app::state::AppScreen;

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_login_input(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn full_sign_up_lands_on_dashboard() {
        let mut app = test_app(None).await;

        type_text(&mut app, "Meena");
        handle_login_input(&mut app, KeyCode::Enter);
        type_text(&mut app, "9123456780");
        handle_login_input(&mut app, KeyCode::Enter);
        type_text(&mut app, "punjab");
        handle_login_input(&mut app, KeyCode::Enter);
        type_text(&mut app, "ludh");
        handle_login_input(&mut app, KeyCode::Enter);
        handle_login_input(&mut app, KeyCode::Enter);
        handle_login_input(&mut app, KeyCode::Down);
        handle_login_input(&mut app, KeyCode::Enter);

        assert!(matches!(app.pending, Some(PendingAction::SaveProfile(_))));
        app.run_pending().await;

        assert_eq!(app.screen, AppScreen::Dashboard);
        assert_eq!(
            app.farmer().map(|farmer| farmer.location.as_str()),
            Some("Ludhiana, Punjab")
        );
        assert_eq!(app.status_message, "Welcome, Meena!");
    }

    #[tokio::test]
    async fn incomplete_form_reports_first_problem() {
        let mut app = test_app(None).await;
        app.login.field = LoginField::MainCrop;
        handle_login_input(&mut app, KeyCode::Enter);

        assert!(app.pending.is_none());
        assert_eq!(app.status_message, "Please enter your name");
    }

    #[tokio::test]
    async fn q_is_typed_not_quit() {
        let mut app = test_app(None).await;
        type_text(&mut app, "q");
        assert!(app.running);
        assert_eq!(app.login.name, "q");
    }
}
