#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use clap::Parser;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::services::ServeDir;
    use tracing_subscriber::EnvFilter;
    use usa4books::app::App;
    use usa4books::server::state::AppState;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    #[derive(Parser)]
    #[command(name = "usa4books")]
    struct Cli {
        /// Run one search against the catalog, print the books and exit
        #[arg(long, value_name = "QUERY")]
        search: Option<String>,
    }

    let cli = Cli::parse();

    let site_root = std::env::var("LEPTOS_SITE_ROOT").unwrap_or_else(|_| "target/site".into());
    let site_addr: std::net::SocketAddr = std::env::var("LEPTOS_SITE_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()
        .expect("invalid LEPTOS_SITE_ADDR");
    let leptos_options = leptos::config::LeptosOptions::builder()
        .output_name(std::sync::Arc::<str>::from("usa4books"))
        .site_root(std::sync::Arc::<str>::from(site_root))
        .site_pkg_dir(std::sync::Arc::<str>::from("pkg"))
        .env(leptos::config::Env::PROD)
        .site_addr(site_addr)
        .reload_port(3001)
        .build();
    let addr = leptos_options.site_addr;

    let state = AppState::new(leptos_options.clone()).expect("failed to initialize app state");

    if let Some(query) = cli.search {
        let books = state.catalog.search_books(&query).await;
        if books.is_empty() {
            println!("No books found for {query:?}.");
        }
        for book in books {
            println!("{} by {}", book.title, book.author);
            if let Some(reason) = book.reason {
                println!("    {reason}");
            }
        }
        return;
    }

    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes_with_context(
            &state,
            routes,
            {
                let state = state.clone();
                move || usa4books::server::state::provide_server_context(state.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || {
                    use usa4books::app::shell;
                    shell(leptos_options.clone())
                }
            },
        )
        .fallback(axum::routing::get_service(ServeDir::new(
            leptos_options.site_root.as_ref(),
        )))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    tracing::info!("listening on http://{}", &addr);
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}

#[cfg(not(feature = "ssr"))]
pub fn main() {}
