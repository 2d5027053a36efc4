//! Session state for the catalog views.
//!
//! Transitions are synchronous and return the [`Effect`]s to carry out.
//! Running an effect against a [`Librarian`] yields an [`Outcome`] that goes
//! back in through [`Orchestrator::apply`]. Searches and analyses are tagged
//! with a [`Ticket`]; only the latest one of each kind is applied.

use futures::future::join_all;

use crate::catalog::Librarian;
use crate::model::book::{Analysis, Book, Shelf, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadShelves,
    Search { ticket: Ticket, query: String },
    Analyze { ticket: Ticket, title: String, author: String },
    ScrollToTop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    ShelvesLoaded(Vec<(Shelf, Vec<Book>)>),
    SearchCompleted { ticket: Ticket, books: Vec<Book> },
    AnalysisCompleted { ticket: Ticket, analysis: Analysis },
}

impl Effect {
    /// Issues the remote calls behind this effect. Presentation-only effects
    /// have no outcome.
    pub async fn run<L: Librarian>(self, librarian: &L) -> Option<Outcome> {
        match self {
            Effect::LoadShelves => {
                let shelves = join_all(Shelf::ALL.into_iter().map(move |shelf| async move {
                    (shelf, librarian.fetch_shelf(shelf.label()).await)
                }))
                .await;
                Some(Outcome::ShelvesLoaded(shelves))
            }
            Effect::Search { ticket, query } => {
                let books = librarian.search_books(&query).await;
                Some(Outcome::SearchCompleted { ticket, books })
            }
            Effect::Analyze {
                ticket,
                title,
                author,
            } => {
                let analysis = librarian.analyze_book(&title, &author).await;
                Some(Outcome::AnalysisCompleted { ticket, analysis })
            }
            Effect::ScrollToTop => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
    view: ViewState,
    query: String,
    search_results: Vec<Book>,
    searching: bool,
    selected: Option<Book>,
    analysis: Option<Analysis>,
    analyzing: bool,
    shelves: Vec<(Shelf, Vec<Book>)>,
    loading_shelves: bool,
    next_ticket: u64,
    search_ticket: Option<Ticket>,
    analysis_ticket: Option<Ticket>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    pub fn new() -> Self {
        Self {
            view: ViewState::Home,
            query: String::new(),
            search_results: vec![],
            searching: false,
            selected: None,
            analysis: None,
            analyzing: false,
            shelves: Shelf::ALL.into_iter().map(|s| (s, vec![])).collect(),
            loading_shelves: false,
            next_ticket: 0,
            search_ticket: None,
            analysis_ticket: None,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search_results(&self) -> &[Book] {
        &self.search_results
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.selected.as_ref()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn shelf(&self, shelf: Shelf) -> &[Book] {
        self.shelves
            .iter()
            .find(|(s, _)| *s == shelf)
            .map(|(_, books)| books.as_slice())
            .unwrap_or(&[])
    }

    pub fn shelves_loading(&self) -> bool {
        self.loading_shelves
    }

    /// App start: both curated shelves load concurrently.
    pub fn start(&mut self) -> Vec<Effect> {
        self.view = ViewState::Home;
        self.loading_shelves = true;
        vec![Effect::LoadShelves]
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn submit_search(&mut self) -> Vec<Effect> {
        let query = self.query.trim();
        if query.is_empty() || self.view == ViewState::BookDetails {
            return vec![];
        }
        let query = query.to_string();

        let ticket = self.issue_ticket();
        self.search_ticket = Some(ticket);
        self.search_results.clear();
        self.searching = true;
        self.view = ViewState::SearchResults;

        tracing::debug!("search {query:?} issued as {ticket:?}");
        vec![Effect::Search { ticket, query }]
    }

    pub fn select_book(&mut self, book: Book) -> Vec<Effect> {
        if self.view == ViewState::BookDetails {
            return vec![];
        }

        let ticket = self.issue_ticket();
        self.analysis_ticket = Some(ticket);
        self.analysis = None;
        self.analyzing = true;
        self.view = ViewState::BookDetails;

        let effect = Effect::Analyze {
            ticket,
            title: book.title.clone(),
            author: book.author.clone(),
        };
        self.selected = Some(book);

        vec![Effect::ScrollToTop, effect]
    }

    pub fn back(&mut self) {
        match self.view {
            ViewState::BookDetails => {
                self.leave_details();
                self.view = if self.search_results.is_empty() {
                    ViewState::Home
                } else {
                    ViewState::SearchResults
                };
            }
            ViewState::SearchResults => self.view = ViewState::Home,
            ViewState::Home => {}
        }
    }

    /// Logo click: back to a clean home view.
    pub fn reset(&mut self) {
        self.leave_details();
        self.query.clear();
        self.search_results.clear();
        self.searching = false;
        self.search_ticket = None;
        self.view = ViewState::Home;
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::ShelvesLoaded(loaded) => {
                for (shelf, books) in loaded {
                    match self.shelves.iter_mut().find(|(s, _)| *s == shelf) {
                        Some((_, slot)) => *slot = books,
                        None => self.shelves.push((shelf, books)),
                    }
                }
                self.loading_shelves = false;
            }
            Outcome::SearchCompleted { ticket, books } => {
                if self.search_ticket != Some(ticket) {
                    tracing::debug!("dropping superseded search {ticket:?}");
                    return;
                }
                self.search_ticket = None;
                self.search_results = books;
                self.searching = false;
            }
            Outcome::AnalysisCompleted { ticket, analysis } => {
                if self.analysis_ticket != Some(ticket) {
                    tracing::debug!("dropping superseded analysis {ticket:?}");
                    return;
                }
                self.analysis_ticket = None;
                self.analysis = Some(analysis);
                self.analyzing = false;
            }
        }
    }

    /// Runs effects one after another and applies their outcomes.
    pub async fn drive<L: Librarian>(&mut self, librarian: &L, effects: Vec<Effect>) {
        for effect in effects {
            if let Some(outcome) = effect.run(librarian).await {
                self.apply(outcome);
            }
        }
    }

    fn leave_details(&mut self) {
        self.selected = None;
        self.analysis = None;
        self.analyzing = false;
        self.analysis_ticket = None;
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use futures::channel::oneshot;

    use super::*;
    use crate::model::book::ChatTurn;
    use pretty_assertions::assert_eq;

    fn book(title: &str) -> Book {
        Book {
            title: title.to_string(),
            author: "Anon".to_string(),
            description: "A book.".to_string(),
            year: None,
            genre: None,
            cover_color: None,
            rating: None,
            reason: None,
        }
    }

    /// In-memory librarian; a shelf whose theme is listed in `failing`
    /// comes back empty, as the catalog does on failure.
    #[derive(Default)]
    struct FakeLibrarian {
        failing: Vec<&'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl Librarian for FakeLibrarian {
        async fn fetch_shelf(&self, theme: &str) -> Vec<Book> {
            self.calls.borrow_mut().push(format!("shelf:{theme}"));
            if self.failing.iter().any(|f| *f == theme) {
                vec![]
            } else {
                vec![book(&format!("{theme} #1")), book(&format!("{theme} #2"))]
            }
        }

        async fn search_books(&self, query: &str) -> Vec<Book> {
            self.calls.borrow_mut().push(format!("search:{query}"));
            vec![book(&format!("about {query}"))]
        }

        async fn analyze_book(&self, title: &str, _author: &str) -> Analysis {
            self.calls.borrow_mut().push(format!("analyze:{title}"));
            Analysis {
                summary: format!("On {title}"),
                themes: vec!["memory".to_string()],
                fun_fact: String::new(),
            }
        }

        async fn chat_turn(&self, _history: &[ChatTurn], _message: &str) -> String {
            String::new()
        }
    }

    #[tokio::test]
    async fn start_loads_both_shelves() {
        let librarian = FakeLibrarian::default();
        let mut orch = Orchestrator::new();

        let effects = orch.start();
        assert!(orch.shelves_loading());
        orch.drive(&librarian, effects).await;

        assert!(!orch.shelves_loading());
        assert_eq!(orch.view(), ViewState::Home);
        assert_eq!(orch.shelf(Shelf::Classics).len(), 2);
        assert_eq!(orch.shelf(Shelf::SciFi).len(), 2);
        assert_eq!(librarian.calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn failed_shelf_is_isolated() {
        let librarian = FakeLibrarian {
            failing: vec!["American Classics"],
            ..Default::default()
        };
        let mut orch = Orchestrator::new();

        let effects = orch.start();
        orch.drive(&librarian, effects).await;

        assert!(orch.shelf(Shelf::Classics).is_empty());
        assert_eq!(orch.shelf(Shelf::SciFi)[0].title, "Thought-Provoking Sci-Fi #1");
        assert!(!orch.shelves_loading());
    }

    /// The classics shelf only resolves once the sci-fi shelf has been
    /// requested, so loading one shelf after the other never finishes.
    struct Handoff {
        release: RefCell<Option<oneshot::Sender<()>>>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl Handoff {
        fn new() -> Self {
            let (release, gate) = oneshot::channel();
            Self {
                release: RefCell::new(Some(release)),
                gate: RefCell::new(Some(gate)),
            }
        }
    }

    impl Librarian for Handoff {
        async fn fetch_shelf(&self, theme: &str) -> Vec<Book> {
            if theme == Shelf::Classics.label() {
                let gate = self.gate.borrow_mut().take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
            } else if let Some(release) = self.release.borrow_mut().take() {
                let _ = release.send(());
            }
            vec![book(theme)]
        }

        async fn search_books(&self, _query: &str) -> Vec<Book> {
            vec![]
        }

        async fn analyze_book(&self, _title: &str, _author: &str) -> Analysis {
            Analysis::unavailable()
        }

        async fn chat_turn(&self, _history: &[ChatTurn], _message: &str) -> String {
            String::new()
        }
    }

    #[tokio::test]
    async fn shelves_load_concurrently() {
        let librarian = Handoff::new();
        let mut orch = Orchestrator::new();

        let effects = orch.start();
        tokio::time::timeout(Duration::from_secs(2), orch.drive(&librarian, effects))
            .await
            .expect("shelf requests ran one after the other");

        assert_eq!(orch.shelf(Shelf::Classics)[0].title, "American Classics");
        assert_eq!(orch.shelf(Shelf::SciFi)[0].title, "Thought-Provoking Sci-Fi");
        assert!(!orch.shelves_loading());
    }

    #[test]
    fn blank_query_is_ignored() {
        let mut orch = Orchestrator::new();
        orch.set_query("  ");

        assert!(orch.submit_search().is_empty());
        assert_eq!(orch.view(), ViewState::Home);
        assert!(!orch.is_searching());
    }

    #[tokio::test]
    async fn search_then_details_then_back_returns_to_results() {
        let librarian = FakeLibrarian::default();
        let mut orch = Orchestrator::new();

        orch.set_query("whales");
        let effects = orch.submit_search();
        assert_eq!(orch.view(), ViewState::SearchResults);
        assert!(orch.is_searching());
        orch.drive(&librarian, effects).await;
        assert!(!orch.is_searching());
        assert_eq!(orch.search_results()[0].title, "about whales");

        let chosen = orch.search_results()[0].clone();
        let effects = orch.select_book(chosen);
        assert_eq!(effects[0], Effect::ScrollToTop);
        assert_eq!(orch.view(), ViewState::BookDetails);
        assert!(orch.is_analyzing());
        orch.drive(&librarian, effects).await;
        assert_eq!(orch.analysis().unwrap().summary, "On about whales");

        orch.back();
        assert_eq!(orch.view(), ViewState::SearchResults);
        assert!(orch.selected_book().is_none());
        assert!(orch.analysis().is_none());
    }

    #[test]
    fn details_from_home_goes_back_home() {
        let mut orch = Orchestrator::new();
        orch.select_book(book("Walden"));
        assert_eq!(orch.selected_book().unwrap().title, "Walden");

        orch.back();
        assert_eq!(orch.view(), ViewState::Home);
    }

    #[test]
    fn back_from_results_goes_home() {
        let mut orch = Orchestrator::new();
        orch.set_query("whales");
        orch.submit_search();

        orch.back();
        assert_eq!(orch.view(), ViewState::Home);
        assert_eq!(orch.query(), "whales");
    }

    #[test]
    fn selecting_clears_prior_analysis() {
        let mut orch = Orchestrator::new();
        let effects = orch.select_book(book("Walden"));
        let Effect::Analyze { ticket, .. } = effects[1].clone() else {
            panic!("expected an analysis effect");
        };
        orch.apply(Outcome::AnalysisCompleted {
            ticket,
            analysis: Analysis::unavailable(),
        });
        assert!(orch.analysis().is_some());

        orch.back();
        orch.select_book(book("Emma"));
        assert!(orch.analysis().is_none());
        assert!(orch.is_analyzing());
    }

    #[test]
    fn last_search_wins() {
        let mut orch = Orchestrator::new();
        orch.set_query("first");
        let first = orch.submit_search();
        orch.set_query("second");
        let second = orch.submit_search();

        let ticket_of = |effects: &[Effect]| match &effects[0] {
            Effect::Search { ticket, .. } => *ticket,
            other => panic!("unexpected effect {other:?}"),
        };

        orch.apply(Outcome::SearchCompleted {
            ticket: ticket_of(&second),
            books: vec![book("second")],
        });
        orch.apply(Outcome::SearchCompleted {
            ticket: ticket_of(&first),
            books: vec![book("first")],
        });

        assert_eq!(orch.search_results().len(), 1);
        assert_eq!(orch.search_results()[0].title, "second");
        assert!(!orch.is_searching());
    }

    #[test]
    fn analysis_after_leaving_details_is_dropped() {
        let mut orch = Orchestrator::new();
        let effects = orch.select_book(book("Walden"));
        let Effect::Analyze { ticket, .. } = effects[1].clone() else {
            panic!("expected an analysis effect");
        };

        orch.back();
        orch.apply(Outcome::AnalysisCompleted {
            ticket,
            analysis: Analysis::unavailable(),
        });

        assert!(orch.analysis().is_none());
        assert!(!orch.is_analyzing());
    }

    #[test]
    fn reset_clears_everything() {
        let mut orch = Orchestrator::new();
        orch.set_query("whales");
        let effects = orch.submit_search();
        let Effect::Search { ticket, .. } = effects[0].clone() else {
            panic!("expected a search effect");
        };
        orch.select_book(book("Moby-Dick"));

        orch.reset();
        assert_eq!(orch.view(), ViewState::Home);
        assert_eq!(orch.query(), "");
        assert!(orch.selected_book().is_none());

        // a search still in flight no longer lands
        orch.apply(Outcome::SearchCompleted {
            ticket,
            books: vec![book("late")],
        });
        assert!(orch.search_results().is_empty());
    }
}
