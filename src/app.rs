use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::components::chat_widget::ChatWidget;
use crate::components::layout::Layout;
use crate::model::book::ViewState;
use crate::pages::{book_detail::BookDetailPage, home::HomePage, search_results::SearchResultsPage};
use crate::view_model::LibraryVm;

#[cfg(feature = "ssr")]
pub fn shell(options: leptos::config::LeptosOptions) -> impl IntoView {
    use leptos::prelude::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HashedStylesheet id="leptos" options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let vm = LibraryVm::new();
    provide_context(vm);

    // Effects only run in the browser, so the shelves load after hydration.
    Effect::new(move |_| untrack(move || vm.start()));

    view! {
        <Title text="USA4Books - The Enhanced Library" />
        <Meta name="description" content="Discover your next great read in a curated library enhanced by artificial intelligence." />

        <Router>
            <Layout>
                <Routes fallback=|| view! { <p>"Page not found."</p> }>
                    <Route path=path!("/") view=LibraryPage />
                </Routes>
            </Layout>
            <ChatWidget />
        </Router>
    }
}

/// Renders whichever view the session is on.
#[component]
fn LibraryPage() -> impl IntoView {
    let vm = expect_context::<LibraryVm>();
    let view_state = Memo::new(move |_| vm.session.with(|s| s.view()));

    move || match view_state.get() {
        ViewState::Home => view! { <HomePage /> }.into_any(),
        ViewState::SearchResults => view! { <SearchResultsPage /> }.into_any(),
        ViewState::BookDetails => view! { <BookDetailPage /> }.into_any(),
    }
}
