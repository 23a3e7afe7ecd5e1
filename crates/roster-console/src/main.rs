#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config;

/// Pages, server functions and the JSON API behind one router. Every request
/// is traced, and page requests without a session cookie go to /login.
#[cfg(feature = "ssr")]
fn console_router(
    leptosOptions: leptos::prelude::LeptosOptions,
    state: roster_api::middleware::auth::AppState,
) -> axum::Router {
    use leptos::prelude::provide_context;
    use leptos_axum::{file_and_error_handler, generate_route_list, LeptosRoutes};
    use roster_ui::{shell, App};

    let api = state.api.clone();
    let session = state.session.clone();
    let shellOptions = leptosOptions.clone();

    axum::Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            generate_route_list(App),
            move || {
                provide_context(api.clone());
                provide_context(session.clone());
            },
            move || shell(shellOptions.clone()),
        )
        .fallback(file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(roster_api::api_router(state))
        .layer(axum::middleware::from_fn(
            roster_api::middleware::auth::require_page_auth,
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use std::path::Path;

    use leptos::prelude::get_configuration;
    use roster_api::middleware::auth::AppState;
    use roster_client::StudentApi;
    use tracing_subscriber::EnvFilter;

    use crate::config::{config_path, ConsoleConfig};

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let path = config_path(std::env::args().skip(1));
    let settings = ConsoleConfig::load(Path::new(&path));
    tracing::info!(
        config = %path,
        student_api = %settings.student_api.base_url,
        "console configured"
    );

    let api = match StudentApi::new(&settings.student_api) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("[student_api] section is unusable: {e}");
            std::process::exit(1);
        }
    };

    let leptosOptions = match get_configuration(None) {
        Ok(conf) => conf.leptos_options,
        Err(e) => {
            tracing::error!("leptos configuration: {e}");
            std::process::exit(1);
        }
    };
    let addr = settings.server.socket_addr().unwrap_or_else(|| {
        tracing::warn!(
            "{}:{} is not a socket address, serving on {}",
            settings.server.bind,
            settings.server.port,
            leptosOptions.site_addr
        );
        leptosOptions.site_addr
    });

    let app = console_router(
        leptosOptions,
        AppState {
            api,
            session: settings.session,
        },
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("cannot listen on {addr}: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!("student records console on http://{addr}");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server stopped: {e}");
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {}
