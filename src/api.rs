use leptos::prelude::*;

use crate::catalog::{Librarian, CHAT_APOLOGY};
use crate::model::book::{Analysis, Book, ChatTurn};

#[server]
pub async fn fetch_shelf(theme: String) -> Result<Vec<Book>, ServerFnError> {
    let state = expect_context::<crate::server::state::AppState>();
    Ok(state.catalog.fetch_shelf(&theme).await)
}

#[server]
pub async fn search_books(query: String) -> Result<Vec<Book>, ServerFnError> {
    let state = expect_context::<crate::server::state::AppState>();
    Ok(state.catalog.search_books(&query).await)
}

#[server]
pub async fn analyze_book(title: String, author: String) -> Result<Analysis, ServerFnError> {
    let state = expect_context::<crate::server::state::AppState>();
    Ok(state.catalog.analyze_book(&title, &author).await)
}

/// One chat turn. The reply is markdown; the chat widget renders it.
#[server]
pub async fn librarian_reply(
    #[server(default)] history: Vec<ChatTurn>,
    message: String,
) -> Result<String, ServerFnError> {
    let state = expect_context::<crate::server::state::AppState>();
    Ok(state.catalog.chat_turn(&history, &message).await)
}

/// Browser-side librarian backed by the server functions above. A failed
/// round trip degrades the same way a failed remote call does.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteLibrarian;

impl Librarian for RemoteLibrarian {
    async fn fetch_shelf(&self, theme: &str) -> Vec<Book> {
        crate::api::fetch_shelf(theme.to_string())
            .await
            .unwrap_or_else(|e| {
                tracing::error!("shelf {theme:?}: {e}");
                vec![]
            })
    }

    async fn search_books(&self, query: &str) -> Vec<Book> {
        crate::api::search_books(query.to_string())
            .await
            .unwrap_or_else(|e| {
                tracing::error!("search {query:?}: {e}");
                vec![]
            })
    }

    async fn analyze_book(&self, title: &str, author: &str) -> Analysis {
        crate::api::analyze_book(title.to_string(), author.to_string())
            .await
            .unwrap_or_else(|e| {
                tracing::error!("analysis of {title:?}: {e}");
                Analysis::unavailable()
            })
    }

    async fn chat_turn(&self, history: &[ChatTurn], message: &str) -> String {
        crate::api::librarian_reply(history.to_vec(), message.to_string())
            .await
            .unwrap_or_else(|e| {
                tracing::error!("chat turn: {e}");
                CHAT_APOLOGY.to_string()
            })
    }
}
