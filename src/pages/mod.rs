pub mod book_detail;
pub mod home;
pub mod search_results;
