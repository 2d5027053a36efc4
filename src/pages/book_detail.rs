use leptos::prelude::*;

use crate::components::book_card::BookCard;
use crate::model::book::{Analysis, Book};
use crate::view_model::LibraryVm;

#[component]
pub fn BookDetailPage() -> impl IntoView {
    let vm = expect_context::<LibraryVm>();
    let selected = move || vm.session.with(|s| s.selected_book().cloned());

    view! {
        {move || {
            selected().map(|book| {
                view! {
                    <div class="book-detail">
                        <div class="book-visual">
                            <button class="back" on:click=move |_| vm.back()>"← Back"</button>
                            <BookCard book=book.clone() />
                        </div>
                        <BookInformation book=book />
                    </div>
                }
            })
        }}
    }
}

#[component]
fn BookInformation(book: Book) -> impl IntoView {
    let vm = expect_context::<LibraryVm>();

    view! {
        <article class="book-information">
            <h1>{book.title}</h1>
            <p class="book-author">"by " {book.author}</p>
            <div class="book-meta">
                {book.genre.map(|g| view! { <span class="badge">{g}</span> })}
                {book.year.map(|y| view! { <span class="badge">{y}</span> })}
                {book.rating.map(|r| view! { <span class="badge">{format!("{r:.1} / 5")}</span> })}
            </div>
            <p class="book-description">{book.description}</p>

            <section class="book-analysis">
                <h3>"Librarian's Analysis"</h3>
                {move || {
                    if vm.session.with(|s| s.is_analyzing()) {
                        return view! { <p class="analysis-loading">"Consulting the catalog..."</p> }
                            .into_any();
                    }
                    match vm.session.with(|s| s.analysis().cloned()) {
                        Some(analysis) if analysis != Analysis::unavailable() => {
                            view! { <AnalysisView analysis=analysis /> }.into_any()
                        }
                        _ => view! {
                            <p class="analysis-unavailable">"Analysis unavailable at the moment."</p>
                        }
                        .into_any(),
                    }
                }}
            </section>
        </article>
    }
}

#[component]
fn AnalysisView(analysis: Analysis) -> impl IntoView {
    let Analysis {
        summary,
        themes,
        fun_fact,
    } = analysis;

    view! {
        <p class="analysis-summary">{summary}</p>
        <div class="analysis-themes">
            <p><strong>"Themes"</strong></p>
            {themes
                .into_iter()
                .map(|t| view! { <span class="badge theme">{t}</span> })
                .collect_view()}
        </div>
        {(!fun_fact.is_empty()).then(|| view! {
            <p class="analysis-fun-fact">
                <strong>"Did you know? "</strong>
                {fun_fact}
            </p>
        })}
    }
}
