use leptos::prelude::*;

use crate::view_model::LibraryVm;

#[component]
pub fn SearchBar() -> impl IntoView {
    let vm = expect_context::<LibraryVm>();
    let searching = Signal::derive(move || vm.session.with(|s| s.is_searching()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        vm.submit_search();
    };

    view! {
        <div class="search-section">
            <form class="search-bar" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Find a book about resilience in the 1920s..."
                    prop:value=move || vm.session.with(|s| s.query().to_string())
                    on:input=move |ev| vm.set_query(event_target_value(&ev))
                />
                <button type="submit" disabled=move || searching.get()>
                    {move || if searching.get() { "Searching..." } else { "Search" }}
                </button>
            </form>
        </div>
    }
}
