//! Reactive wrapper the components talk to.

use leptos::prelude::*;

use crate::api::RemoteLibrarian;
use crate::chat::ChatSession;
use crate::model::book::Book;
use crate::orchestrator::{self, Orchestrator};

#[derive(Clone, Copy)]
pub struct LibraryVm {
    pub session: RwSignal<Orchestrator>,
    pub chat: RwSignal<ChatSession>,
}

impl Default for LibraryVm {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryVm {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(Orchestrator::new()),
            chat: RwSignal::new(ChatSession::new()),
        }
    }

    pub fn start(self) {
        let effects = self.session.try_update(|s| s.start()).unwrap_or_default();
        self.dispatch(effects);
    }

    pub fn set_query(self, query: String) {
        self.session.update(|s| s.set_query(query));
    }

    pub fn submit_search(self) {
        let effects = self
            .session
            .try_update(|s| s.submit_search())
            .unwrap_or_default();
        self.dispatch(effects);
    }

    pub fn select_book(self, book: Book) {
        let effects = self
            .session
            .try_update(|s| s.select_book(book))
            .unwrap_or_default();
        self.dispatch(effects);
    }

    pub fn back(self) {
        self.session.update(|s| s.back());
    }

    pub fn reset(self) {
        self.session.update(|s| s.reset());
    }

    pub fn send_chat(self, input: String) {
        let Some(turn) = self.chat.try_update(|c| c.submit(&input)).flatten() else {
            return;
        };

        let chat = self.chat;
        leptos::task::spawn_local(async move {
            let reply = turn.run(&RemoteLibrarian).await;
            chat.update(|c| c.receive(reply));
        });
    }

    fn dispatch(self, effects: Vec<orchestrator::Effect>) {
        for effect in effects {
            if effect == orchestrator::Effect::ScrollToTop {
                scroll_to_top();
                continue;
            }

            let session = self.session;
            leptos::task::spawn_local(async move {
                if let Some(outcome) = effect.run(&RemoteLibrarian).await {
                    session.update(|s| s.apply(outcome));
                }
            });
        }
    }
}

fn scroll_to_top() {
    let options = web_sys::ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&options);
}
