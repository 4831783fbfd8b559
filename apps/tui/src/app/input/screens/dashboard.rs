use super::{captures_text, chat, market, recommendations, yield_tab};
use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, PendingAction};
use crossterm::event::KeyCode;
use krishi_mate::Tab;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Tab => {
            let next = wrap_increment(app.tab.index(), Tab::ALL.len());
            app.select_tab(Tab::ALL[next]);
            return;
        }
        KeyCode::BackTab => {
            let prev = wrap_decrement(app.tab.index(), Tab::ALL.len());
            app.select_tab(Tab::ALL[prev]);
            return;
        }
        _ => {}
    }

    if !captures_text(app) && handle_global_key(app, key) {
        return;
    }

    match app.tab {
        Tab::Market => market::handle_market_input(app, key),
        Tab::Yield => yield_tab::handle_yield_input(app, key),
        Tab::Recommendations => recommendations::handle_recommendations_input(app, key),
        Tab::Chat => chat::handle_chat_input(app, key),
        Tab::Farm | Tab::Sensors | Tab::Crops | Tab::Weather | Tab::Insights => {}
    }
}

fn handle_global_key(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('L') => app.queue(PendingAction::Logout),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            if let Some(tab) = Tab::from_index(index) {
                app.select_tab(tab);
            }
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::screens::dispatch_input;
    use crate::app::state::tests::{pune_farmer, test_app};

    #[tokio::test]
    async fn number_keys_jump_to_tabs() {
        let mut app = test_app(Some(pune_farmer())).await;
        dispatch_input(&mut app, KeyCode::Char('4'));
        assert_eq!(app.tab, Tab::Market);
        assert!(app.orchestrator.cache().is_pending(krishi_mate::DataDomain::Market));
    }

    #[tokio::test]
    async fn tab_key_wraps_around() {
        let mut app = test_app(Some(pune_farmer())).await;
        dispatch_input(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, Tab::Chat);
        dispatch_input(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Farm);
    }

    #[tokio::test]
    async fn chat_keeps_digits_and_q_as_text() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Chat);
        for c in "q2?".chars() {
            dispatch_input(&mut app, KeyCode::Char(c));
        }
        assert!(app.running);
        assert!(!app.show_help);
        assert_eq!(app.tab, Tab::Chat);
        assert_eq!(app.chat.input, "q2?");
    }

    #[tokio::test]
    async fn q_quits_from_static_tabs() {
        let mut app = test_app(Some(pune_farmer())).await;
        dispatch_input(&mut app, KeyCode::Char('2'));
        dispatch_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn help_popup_swallows_keys() {
        let mut app = test_app(Some(pune_farmer())).await;
        dispatch_input(&mut app, KeyCode::Char('?'));
        dispatch_input(&mut app, KeyCode::Char('3'));
        assert!(app.show_help);
        assert_eq!(app.tab, Tab::Farm);
        dispatch_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
