use leptos::prelude::ServerFnError;

/// Message server functions return when the request carries no usable
/// session. Pages react to it by sending the browser to the login screen.
pub const NOT_SIGNED_IN: &str = "not signed in";

/// The message a server function failed with, without the transport prefix.
pub fn error_text(e: &ServerFnError) -> String {
    match e {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

pub fn is_signed_out(e: &ServerFnError) -> bool {
    matches!(e, ServerFnError::ServerError(message) if message == NOT_SIGNED_IN)
}

/// Full page load of `/login`, so the page middleware sees the cleared session.
#[cfg(feature = "hydrate")]
pub fn redirect_to_login() {
    if let Err(e) = leptos::prelude::window().location().set_href("/login") {
        leptos::logging::error!("could not navigate to /login: {e:?}");
    }
}
