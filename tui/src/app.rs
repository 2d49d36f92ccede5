//! Main Application
//!
//! Event loop and input handling. The app is a thin display client: key
//! presses become controller intents, and every frame renders whatever
//! the observable state currently says. Which screen shows is decided
//! purely by whether a payload is present.

use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::watch;
use tracing::debug;

use birthday_core::{
    BirthdayClient, BirthdayController, BirthdayPayload, ClientConfig, ConnectionStatus,
    WsTransport,
};

use crate::net;
use crate::ui;

/// Fallback address when discovery finds nothing
const FALLBACK_ADDRESS: &str = "127.0.0.1:8080";

/// Redraw interval while idle
const TICK: Duration = Duration::from_millis(250);

/// Terminal surface over a [`BirthdayController`]
pub struct App {
    running: bool,
    controller: BirthdayController,
    payload: watch::Receiver<Option<BirthdayPayload>>,
    status: watch::Receiver<ConnectionStatus>,
    address: String,
    suggestions: Vec<String>,
    suggestion_index: usize,
}

impl App {
    /// Build the app over a live WebSocket transport.
    ///
    /// A pre-supplied server address starts connecting immediately;
    /// otherwise the address field is pre-filled from local network
    /// discovery and waits for the user.
    #[must_use]
    pub fn new(server: Option<String>) -> Self {
        let config = ClientConfig::from_env();
        let transport = Arc::new(WsTransport::new(config));
        let (client, payload_rx, status_rx) = BirthdayClient::new(transport);
        let controller = BirthdayController::new(client, payload_rx, status_rx);

        let payload = controller.payload();
        let status = controller.status();

        let suggestions = net::address_suggestions();
        let connect_now = server.is_some();
        let address = server
            .or_else(|| suggestions.first().cloned())
            .unwrap_or_else(|| FALLBACK_ADDRESS.to_string());

        let app = Self {
            running: true,
            controller,
            payload,
            status,
            address,
            suggestions,
            suggestion_index: 0,
        };
        if connect_now {
            app.controller.connect_to_server(&app.address);
        }
        app
    }

    /// Run the event loop until quit
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        let mut input = EventStream::new();
        // Local clones so select arms don't hold a borrow of self.
        let mut payload_rx = self.payload.clone();
        let mut status_rx = self.status.clone();

        self.draw(terminal)?;
        while self.running {
            tokio::select! {
                event = input.next() => {
                    if let Some(Ok(Event::Key(key))) = event {
                        self.handle_key(key);
                    }
                }
                changed = payload_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = status_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                () = tokio::time::sleep(TICK) => {}
            }
            self.draw(terminal)?;
        }

        self.controller.disconnect();
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let payload = self.payload.borrow().clone();
        let status = *self.status.borrow();
        let hint = self.next_suggestion();

        terminal.draw(|frame| {
            if let Some(payload) = &payload {
                ui::draw_birthday(frame, payload);
            } else {
                ui::draw_connection(frame, &self.address, status, hint.as_deref());
            }
        })?;
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        if self.payload.borrow().is_some() {
            self.handle_birthday_key(key.code);
        } else {
            self.handle_connection_key(key.code);
        }
    }

    fn handle_birthday_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('d') => {
                debug!("disconnect requested");
                self.controller.disconnect();
            }
            _ => {}
        }
    }

    fn handle_connection_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.running = false,
            KeyCode::Enter => {
                if !self.address.is_empty() {
                    self.controller.connect_to_server(&self.address);
                }
            }
            KeyCode::Tab => self.cycle_suggestion(),
            KeyCode::Backspace => {
                self.address.pop();
            }
            KeyCode::Char(c) if c.is_ascii_graphic() => self.address.push(c),
            _ => {}
        }
    }

    fn cycle_suggestion(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.address = self.suggestions[self.suggestion_index].clone();
        self.suggestion_index = (self.suggestion_index + 1) % self.suggestions.len();
    }

    fn next_suggestion(&self) -> Option<String> {
        self.suggestions.get(self.suggestion_index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_new_prefills_an_address() {
        let app = App::new(None);
        assert!(!app.address.is_empty());
        assert!(app.address.contains(':'), "missing port: {}", app.address);
    }

    #[tokio::test]
    async fn test_explicit_server_wins_over_discovery() {
        let app = App::new(Some("10.1.2.3:9000".to_string()));
        assert_eq!(app.address, "10.1.2.3:9000");
    }

    #[tokio::test]
    async fn test_tab_cycles_suggestions() {
        let mut app = App::new(None);
        app.suggestions = vec!["a:8080".to_string(), "b:8080".to_string()];
        app.suggestion_index = 0;

        app.handle_connection_key(KeyCode::Tab);
        assert_eq!(app.address, "a:8080");
        app.handle_connection_key(KeyCode::Tab);
        assert_eq!(app.address, "b:8080");
        app.handle_connection_key(KeyCode::Tab);
        assert_eq!(app.address, "a:8080");
    }

    #[tokio::test]
    async fn test_typing_edits_the_address() {
        let mut app = App::new(None);
        app.address.clear();

        for c in "10.0.0.5:8080".chars() {
            app.handle_connection_key(KeyCode::Char(c));
        }
        assert_eq!(app.address, "10.0.0.5:8080");

        app.handle_connection_key(KeyCode::Backspace);
        assert_eq!(app.address, "10.0.0.5:808");
    }

    #[tokio::test]
    async fn test_esc_quits_from_connection_screen() {
        let mut app = App::new(None);
        assert!(app.running);
        app.handle_connection_key(KeyCode::Esc);
        assert!(!app.running);
    }
}
