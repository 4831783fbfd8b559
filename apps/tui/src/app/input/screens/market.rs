use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, PendingAction};
use crossterm::event::KeyCode;

pub fn handle_market_input(app: &mut App, key: KeyCode) {
    let len = app.market_view().map_or(0, |view| view.prices.len());

    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.market.selected = wrap_increment(app.market.selected, len);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.market.selected = wrap_decrement(app.market.selected, len);
        }
        KeyCode::Char('r') => app.queue(PendingAction::RefreshMarket),
        _ => {}
    }
}
