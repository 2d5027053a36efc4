use leptos::prelude::*;

use crate::components::book_card::BookCard;
use crate::model::book::Book;

const PLACEHOLDER_SLOTS: usize = 5;

#[component]
pub fn BookShelf(
    title: String,
    books: Signal<Vec<Book>>,
    #[prop(into)] loading: Signal<bool>,
    on_select: Callback<Book>,
) -> impl IntoView {
    view! {
        <section class="book-shelf">
            <h2 class="shelf-title">{title}</h2>
            {move || {
                if loading.get() {
                    (0..PLACEHOLDER_SLOTS)
                        .map(|_| view! { <div class="book-card skeleton"></div> })
                        .collect_view()
                        .into_any()
                } else {
                    let books = books.get();
                    if books.is_empty() {
                        view! {
                            <p class="shelf-empty">
                                "The shelves are currently being dusted. Please check back shortly."
                            </p>
                        }
                        .into_any()
                    } else {
                        books
                            .into_iter()
                            .map(|book| view! { <BookCard book=book on_select=on_select /> })
                            .collect_view()
                            .into_any()
                    }
                }
            }}
            <div class="shelf-board"></div>
        </section>
    }
}
