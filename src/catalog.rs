use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;
use crate::model::book::{Analysis, Book, ChatTurn};
use crate::normalize;

const SHELF_SIZE: usize = 5;
const SEARCH_SIZE: usize = 8;

const CURATOR_INSTRUCTION: &str =
    "You are an expert librarian with impeccable taste. Curate lists of high-quality literature.";

pub const LIBRARIAN_PERSONA: &str = "You are a wise, kind, and extremely well-read librarian named Eleanor. \
    You help people find books, understand literature, and navigate the library. \
    Keep your responses warm, encouraging, and relatively concise (under 100 words unless asked for more). \
    Use markdown for formatting book titles in italics.";

pub const CHAT_APOLOGY: &str =
    "I apologize, dear patron. I seem to have lost my train of thought. Could you repeat that?";
pub const CHAT_SPEECHLESS: &str = "I apologize, I couldn't find the words.";

/// One structured generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    /// JSON schema the response should follow.
    pub response_schema: Option<serde_json::Value>,
}

/// Remote text generation. Implementations return the raw model text.
pub trait ContentService {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<String, AppError>> + Send;

    fn converse(
        &self,
        history: &[ChatTurn],
        message: &str,
        system_instruction: &str,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// The four operations the UI depends on. None of them fail: every error is
/// absorbed into a safe default before it gets here.
#[allow(async_fn_in_trait)]
pub trait Librarian {
    async fn fetch_shelf(&self, theme: &str) -> Vec<Book>;
    async fn search_books(&self, query: &str) -> Vec<Book>;
    async fn analyze_book(&self, title: &str, author: &str) -> Analysis;
    async fn chat_turn(&self, history: &[ChatTurn], message: &str) -> String;
}

pub fn book_list_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "author": { "type": "STRING" },
                "description": { "type": "STRING" },
                "year": { "type": "STRING" },
                "genre": { "type": "STRING" },
                "coverColor": {
                    "type": "STRING",
                    "description": "A valid hex color code that matches the mood of the book cover"
                },
                "rating": { "type": "NUMBER", "description": "A rating from 1 to 5" },
                "reason": {
                    "type": "STRING",
                    "description": "A short reason why this matches the search query"
                }
            },
            "required": ["title", "author", "description", "genre", "coverColor"]
        }
    })
}

pub fn analysis_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "themes": { "type": "ARRAY", "items": { "type": "STRING" } },
            "funFact": { "type": "STRING" }
        }
    })
}

/// Catalog operations on top of a [`ContentService`].
pub struct Catalog<S> {
    service: S,
}

impl<S: ContentService> Catalog<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub async fn fetch_shelf(&self, theme: &str) -> Vec<Book> {
        let request = GenerationRequest {
            prompt: format!(
                "List {SHELF_SIZE} defining or popular books for the genre/theme: \"{theme}\"."
            ),
            system_instruction: None,
            response_schema: Some(book_list_schema()),
        };

        match self.generate_books(request).await {
            Ok(books) => {
                tracing::debug!("shelf {theme:?}: {} books", books.len());
                books
            }
            Err(e) => {
                tracing::error!("shelf {theme:?} unavailable: {e}");
                vec![]
            }
        }
    }

    pub async fn search_books(&self, query: &str) -> Vec<Book> {
        let query = query.trim();
        if query.is_empty() {
            return vec![];
        }

        let request = GenerationRequest {
            prompt: format!(
                "Recommend {SEARCH_SIZE} books based on this search query: \"{query}\". \
                 If the query is a specific book, return similar books. \
                 Ensure the coverColor is a rich, aesthetic hex code."
            ),
            system_instruction: Some(CURATOR_INSTRUCTION.to_string()),
            response_schema: Some(book_list_schema()),
        };

        match self.generate_books(request).await {
            Ok(books) => books,
            Err(e) => {
                tracing::error!("search {query:?} failed: {e}");
                vec![]
            }
        }
    }

    pub async fn analyze_book(&self, title: &str, author: &str) -> Analysis {
        let request = GenerationRequest {
            prompt: format!("Provide a detailed analysis for the book \"{title}\" by {author}."),
            system_instruction: None,
            response_schema: Some(analysis_schema()),
        };

        let result = match self.service.generate(request).await {
            Ok(text) => normalize::analysis(Some(text.as_str())).map_err(AppError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(analysis) if !analysis.is_empty() => analysis,
            Ok(_) => {
                tracing::warn!("empty analysis for {title:?}");
                Analysis::unavailable()
            }
            Err(e) => {
                tracing::error!("analysis of {title:?} failed: {e}");
                Analysis::unavailable()
            }
        }
    }

    pub async fn chat_turn(&self, history: &[ChatTurn], message: &str) -> String {
        match self
            .service
            .converse(history, message, LIBRARIAN_PERSONA)
            .await
        {
            Ok(reply) if reply.trim().is_empty() => CHAT_SPEECHLESS.to_string(),
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("chat turn failed: {e}");
                CHAT_APOLOGY.to_string()
            }
        }
    }

    async fn generate_books(&self, request: GenerationRequest) -> Result<Vec<Book>, AppError> {
        let text = self.service.generate(request).await?;
        Ok(normalize::books(Some(text.as_str()))?)
    }
}

impl<S: ContentService> Librarian for Catalog<S> {
    async fn fetch_shelf(&self, theme: &str) -> Vec<Book> {
        Catalog::fetch_shelf(self, theme).await
    }

    async fn search_books(&self, query: &str) -> Vec<Book> {
        Catalog::search_books(self, query).await
    }

    async fn analyze_book(&self, title: &str, author: &str) -> Analysis {
        Catalog::analyze_book(self, title, author).await
    }

    async fn chat_turn(&self, history: &[ChatTurn], message: &str) -> String {
        Catalog::chat_turn(self, history, message).await
    }
}
