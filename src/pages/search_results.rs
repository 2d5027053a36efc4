use leptos::prelude::*;

use crate::components::book_shelf::BookShelf;
use crate::components::search_bar::SearchBar;
use crate::model::book::Book;
use crate::view_model::LibraryVm;

#[component]
pub fn SearchResultsPage() -> impl IntoView {
    let vm = expect_context::<LibraryVm>();
    let results = Signal::derive(move || vm.session.with(|s| s.search_results().to_vec()));
    let query = move || vm.session.with(|s| s.query().to_string());
    let on_select = Callback::new(move |book: Book| vm.select_book(book));

    view! {
        <div class="search-results">
            <div class="results-header">
                <button class="back" on:click=move |_| vm.back()>"← Back"</button>
                <h2>"Results for " <span class="accent">"\"" {query} "\""</span></h2>
            </div>
            <SearchBar />
            {move || {
                if vm.session.with(|s| s.is_searching()) {
                    view! {
                        <div class="searching">
                            <p>"Consulting the archives..."</p>
                        </div>
                    }
                    .into_any()
                } else {
                    view! {
                        <BookShelf
                            title="Search Findings".to_string()
                            books=results
                            loading=false
                            on_select=on_select
                        />
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
