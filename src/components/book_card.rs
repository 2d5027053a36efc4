use leptos::prelude::*;

use crate::model::book::Book;

#[component]
pub fn BookCard(
    book: Book,
    #[prop(optional)] on_select: Option<Callback<Book>>,
) -> impl IntoView {
    let cover_class = if book.has_dark_cover() {
        "book-cover dark"
    } else {
        "book-cover light"
    };
    let style = format!("background-color: {}", book.cover_color());
    let reason = book.reason.clone();
    let title = book.title.clone();
    let author = book.author.clone();

    let on_click = move |_| {
        if let Some(cb) = &on_select {
            cb.run(book.clone());
        }
    };

    view! {
        <div class="book-card" on:click=on_click>
            <div class=cover_class style=style>
                <h3 class="book-cover-title">{title}</h3>
                <p class="book-cover-author">{author}</p>
            </div>
            {reason.map(|r| view! { <p class="book-reason">"\u{201c}" {r} "\u{201d}"</p> })}
        </div>
    }
}
