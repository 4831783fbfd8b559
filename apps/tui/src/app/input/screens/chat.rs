use crate::app::state::{App, PendingAction};
use crossterm::event::KeyCode;
use std::path::PathBuf;

pub fn handle_chat_input(app: &mut App, key: KeyCode) {
    let chat = &mut app.chat;
    match key {
        KeyCode::Char(c) => chat.input.push(c),
        KeyCode::Backspace => {
            chat.input.pop();
        }
        KeyCode::F(2) => {
            chat.attaching = !chat.attaching;
            chat.input.clear();
        }
        KeyCode::Esc => {
            chat.attaching = false;
            chat.input.clear();
        }
        KeyCode::Up | KeyCode::PageUp => chat.scroll = chat.scroll.saturating_add(1),
        KeyCode::Down | KeyCode::PageDown => chat.scroll = chat.scroll.saturating_sub(1),
        KeyCode::Enter => {
            let text = chat.input.trim().to_string();
            if text.is_empty() {
                return;
            }
            let action = if chat.attaching {
                PendingAction::AttachImage(PathBuf::from(text))
            } else {
                PendingAction::SendChat(text)
            };
            chat.input.clear();
            chat.attaching = false;
            app.queue(action);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{pune_farmer, test_app};
    use krishi_mate::Tab;

    #[tokio::test]
    async fn blank_message_is_not_sent() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Chat);
        handle_chat_input(&mut app, KeyCode::Char(' '));
        handle_chat_input(&mut app, KeyCode::Enter);
        assert!(app.pending.is_none());
    }

    #[tokio::test]
    async fn attach_mode_queues_image_path() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Chat);
        handle_chat_input(&mut app, KeyCode::F(2));
        for c in "leaf.jpg".chars() {
            handle_chat_input(&mut app, KeyCode::Char(c));
        }
        handle_chat_input(&mut app, KeyCode::Enter);

        assert_eq!(
            app.pending,
            Some(PendingAction::AttachImage(PathBuf::from("leaf.jpg")))
        );
        assert!(!app.chat.attaching);
    }

    #[tokio::test]
    async fn unreadable_image_leaves_history_alone() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Chat);
        app.queue(PendingAction::AttachImage(PathBuf::from(
            "/definitely/not/here.png",
        )));
        app.run_pending().await;

        assert_eq!(app.chat.messages.len(), 1);
        assert!(app.status_message.starts_with("Could not read"));
    }
}
