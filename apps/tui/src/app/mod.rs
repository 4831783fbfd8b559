// App module for krishi-mate
// Handles dashboard state, forms and key handling

pub mod forms;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{ActionOutcome, App, AppScreen, PendingAction};
