use leptos::prelude::*;

use crate::components::book_shelf::BookShelf;
use crate::components::search_bar::SearchBar;
use crate::model::book::{Book, Shelf};
use crate::view_model::LibraryVm;

#[component]
pub fn HomePage() -> impl IntoView {
    let vm = expect_context::<LibraryVm>();
    let loading = Signal::derive(move || vm.session.with(|s| s.shelves_loading()));
    let on_select = Callback::new(move |book: Book| vm.select_book(book));

    view! {
        <header class="hero">
            <h1>"Discover Your Next " <span class="accent">"Great Read"</span></h1>
            <p>
                "Explore a curated collection enhanced by artificial intelligence. "
                "Search for a topic, feeling, or genre, and let our digital concierge guide you."
            </p>
            <SearchBar />
        </header>

        <div class="shelves">
            {Shelf::ALL
                .into_iter()
                .map(|shelf| {
                    let books = Signal::derive(move || vm.session.with(|s| s.shelf(shelf).to_vec()));
                    view! {
                        <BookShelf
                            title=shelf.label().to_string()
                            books=books
                            loading=loading
                            on_select=on_select
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}
