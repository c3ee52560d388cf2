use agenda_core::Agenda;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub agenda: Agenda,
}

impl AppState {
    pub fn new(agenda: Agenda) -> Self {
        AppState { agenda }
    }
}
