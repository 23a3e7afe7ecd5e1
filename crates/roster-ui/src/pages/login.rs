use leptos::prelude::*;
use leptos_meta::Title;

use crate::components::toast::ToastContext;
use crate::server_error::error_text;

#[server]
async fn login(email: String, password: String) -> Result<(), ServerFnError> {
    use roster_types::Credentials;

    use crate::session::{session_settings, set_session_cookie, student_api};

    let credentials =
        Credentials::new(&email, &password).map_err(|e| ServerFnError::new(e.to_string()))?;

    let api = student_api()?;
    let token = api.login(&credentials).await.map_err(|e| {
        tracing::warn!("login for {} failed: {e}", credentials.email);
        ServerFnError::new(e.user_message())
    })?;

    set_session_cookie(&session_settings().cookie(&token))?;
    tracing::info!("signed in {}", credentials.email);

    leptos_axum::redirect("/");

    Ok(())
}

#[server]
async fn register(
    name: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<(), ServerFnError> {
    use roster_types::Registration;

    use crate::session::student_api;

    let registration = Registration::new(&name, &email, &password, &confirm_password)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let api = student_api()?;
    api.register(&registration).await.map_err(|e| {
        tracing::warn!("registration for {} failed: {e}", registration.email);
        ServerFnError::new(e.user_message())
    })?;

    tracing::info!("registered {}", registration.email);
    Ok(())
}

#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    use crate::session::{session_settings, set_session_cookie};

    set_session_cookie(&session_settings().cleared_cookie())?;
    leptos_axum::redirect("/login");

    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum AuthMode {
    Login,
    Register,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let toasts = expect_context::<ToastContext>();
    let (mode, setMode) = signal(AuthMode::Login);

    let loginAction = ServerAction::<Login>::new();
    let loginValue = loginAction.value();
    let registerAction = ServerAction::<Register>::new();
    let registerValue = registerAction.value();

    let loginError = move || {
        loginValue
            .get()
            .and_then(|result| result.err())
            .map(|e| error_text(&e))
    };
    let registerError = move || {
        registerValue
            .get()
            .and_then(|result| result.err())
            .map(|e| error_text(&e))
    };

    // Back to the login form once the account exists
    Effect::new(move |_| {
        if let Some(Ok(())) = registerValue.get() {
            setMode.set(AuthMode::Login);
            toasts.success("Account created, sign in to continue");
        }
    });

    let toggleClass = move |target: AuthMode| {
        if mode.get() == target {
            "toggle-option active"
        } else {
            "toggle-option"
        }
    };

    view! {
        <Title text="Sign in" />
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"S"</div>
                    <h1>"Student Records"</h1>
                    <p>"ACPT Institute"</p>
                </div>

                <div class="auth-toggle" role="tablist">
                    <button
                        type="button"
                        class=move || toggleClass(AuthMode::Login)
                        on:click=move |_| setMode.set(AuthMode::Login)
                    >
                        "Login"
                    </button>
                    <button
                        type="button"
                        class=move || toggleClass(AuthMode::Register)
                        on:click=move |_| setMode.set(AuthMode::Register)
                    >
                        "Register"
                    </button>
                </div>

                {move || match mode.get() {
                    AuthMode::Login => {
                        view! {
                            <h2 class="auth-title">"Welcome Back"</h2>
                            {move || {
                                loginError().map(|e| view! { <div class="login-error">{e}</div> })
                            }}
                            <ActionForm action=loginAction>
                                <div class="form-group">
                                    <label for="email">"Email"</label>
                                    <input
                                        type="email"
                                        id="email"
                                        name="email"
                                        placeholder="you@example.com"
                                        required
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="password">"Password"</label>
                                    <input type="password" id="password" name="password" required />
                                </div>
                                <button
                                    type="submit"
                                    class="btn btn-primary"
                                    disabled=move || loginAction.pending().get()
                                >
                                    {move || {
                                        if loginAction.pending().get() { "Signing in..." } else { "Login" }
                                    }}
                                </button>
                            </ActionForm>
                        }
                            .into_any()
                    }
                    AuthMode::Register => {
                        view! {
                            <h2 class="auth-title">"Welcome"</h2>
                            {move || {
                                registerError()
                                    .map(|e| view! { <div class="login-error">{e}</div> })
                            }}
                            <ActionForm action=registerAction>
                                <div class="form-group">
                                    <label for="reg-name">"Name"</label>
                                    <input type="text" id="reg-name" name="name" required />
                                </div>
                                <div class="form-group">
                                    <label for="reg-email">"Email"</label>
                                    <input type="email" id="reg-email" name="email" required />
                                </div>
                                <div class="form-group">
                                    <label for="reg-password">"Password"</label>
                                    <input
                                        type="password"
                                        id="reg-password"
                                        name="password"
                                        required
                                    />
                                </div>
                                <div class="form-group">
                                    <label for="reg-confirm">"Re-Enter Password"</label>
                                    <input
                                        type="password"
                                        id="reg-confirm"
                                        name="confirm_password"
                                        required
                                    />
                                </div>
                                <button
                                    type="submit"
                                    class="btn btn-primary"
                                    disabled=move || registerAction.pending().get()
                                >
                                    {move || {
                                        if registerAction.pending().get() {
                                            "Creating account..."
                                        } else {
                                            "Register"
                                        }
                                    }}
                                </button>
                            </ActionForm>
                        }
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}
