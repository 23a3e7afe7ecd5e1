use leptos::prelude::*;

/// Blocking yes/no prompt. Nothing behind the backdrop is clickable until
/// one of the buttons is pressed.
#[component]
pub fn ConfirmDialog<Y, N>(
    title: &'static str,
    message: String,
    /// Label of the confirming button (e.g., "Delete")
    confirm_label: &'static str,
    busy: ReadSignal<bool>,
    on_confirm: Y,
    on_cancel: N,
) -> impl IntoView
where
    Y: Fn() + Clone + Send + Sync + 'static,
    N: Fn() + Clone + Send + Sync + 'static,
{
    view! {
        <div class="dialog-backdrop">
            <div class="card dialog dialog-confirm" role="alertdialog" aria-modal="true">
                <div class="card-title">{title}</div>
                <p class="dialog-message">{message}</p>
                <div class="dialog-actions">
                    <button
                        type="button"
                        class="btn btn-ghost"
                        disabled=move || busy.get()
                        on:click=move |_| on_cancel()
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="btn btn-danger"
                        disabled=move || busy.get()
                        on:click=move |_| on_confirm()
                    >
                        {move || if busy.get() { "Working..." } else { confirm_label }}
                    </button>
                </div>
            </div>
        </div>
    }
}
