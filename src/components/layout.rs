use leptos::prelude::*;

use crate::view_model::LibraryVm;

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let vm = expect_context::<LibraryVm>();

    view! {
        <header class="site-header">
            <div class="header-inner">
                <button class="logo" on:click=move |_| vm.reset()>
                    <span class="logo-title">"USA4Books"</span>
                    <span class="logo-tagline">"The Enhanced Library"</span>
                </button>
            </div>
        </header>
        <main class="site-main">
            {children()}
        </main>
        <footer class="site-footer">
            <p>"USA4Books. Reimagining the library experience for the digital age."</p>
        </footer>
    }
}
