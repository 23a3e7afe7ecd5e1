use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    StaticSegment,
};

use crate::components::nav::Nav;
use crate::components::toast::ToastProvider;
use crate::pages::login::LoginPage;
use crate::pages::students::StudentsPage;

/// Document shell used for server rendering and the error fallback.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <link rel="icon" href="/favicon.svg" type="image/svg+xml" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <noscript>"Student Records needs JavaScript enabled."</noscript>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/roster-console.css" />
        <Title formatter=|page: String| format!("{page} | Student Records") />
        <ToastProvider>
            <Router>
                <Routes fallback=NotFound>
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <SignedIn><StudentsPage /></SignedIn> }
                    />
                    <Route path=StaticSegment("login") view=LoginPage />
                </Routes>
            </Router>
        </ToastProvider>
    }
}

/// Sidebar layout for pages behind the session cookie.
#[component]
fn SignedIn(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Nav />
            <main class="main-content">{children()}</main>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <Title text="Not found" />
        <div class="login-page">
            <div class="login-card">
                <h1>"Page not found"</h1>
                <a class="btn btn-primary" href="/">"Back to students"</a>
            </div>
        </div>
    }
}
