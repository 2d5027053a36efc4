pub mod book_card;
pub mod book_shelf;
pub mod chat_widget;
pub mod layout;
pub mod search_bar;
