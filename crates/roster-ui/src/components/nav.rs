use leptos::prelude::*;

use crate::pages::login::Logout;

#[component]
pub fn Nav() -> impl IntoView {
    let logoutAction = ServerAction::<Logout>::new();

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"S"</div>
                <span class="brand-text">"Student Records"</span>
            </div>
            <ul class="nav-links">
                <li class="nav-item active">
                    <a href="/">
                        <span class="nav-icon">"\u{2630}"</span>
                        <span>"Students"</span>
                    </a>
                </li>
            </ul>
            <div class="nav-footer">
                <ActionForm action=logoutAction>
                    <button type="submit" class="btn btn-ghost nav-logout">
                        <span class="nav-icon">"\u{21E5}"</span>
                        <span>"Log Out"</span>
                    </button>
                </ActionForm>
            </div>
        </nav>
    }
}
