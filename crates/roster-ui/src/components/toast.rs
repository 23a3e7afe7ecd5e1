use std::time::Duration;

use leptos::prelude::*;

const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

/// Visible toasts, oldest first.
#[derive(Clone, Debug, Default)]
struct ToastQueue {
    issued: u64,
    shown: Vec<Toast>,
}

impl ToastQueue {
    fn add(&mut self, message: String, level: ToastLevel) -> u64 {
        let id = self.issued;
        self.issued += 1;
        self.shown.push(Toast { id, message, level });
        id
    }

    fn remove(&mut self, id: u64) {
        self.shown.retain(|toast| toast.id != id);
    }
}

/// Alert channel for the pages: save and delete outcomes, load failures.
#[derive(Clone, Copy)]
pub struct ToastContext {
    queue: RwSignal<ToastQueue>,
}

impl ToastContext {
    pub fn success(&self, message: impl Into<String>) {
        self.show(message.into(), ToastLevel::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message.into(), ToastLevel::Error);
    }

    /// Shows `message` until it expires or is clicked away.
    pub fn show(&self, message: String, level: ToastLevel) {
        let mut id = 0;
        self.queue.update(|queue| id = queue.add(message, level));

        let ctx = *self;
        set_timeout(move || ctx.dismiss(id), TOAST_LIFETIME);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|queue| queue.remove(id));
    }
}

/// Renders toasts over every page; wrap the router with it once.
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let ctx = ToastContext {
        queue: RwSignal::new(ToastQueue::default()),
    };
    provide_context(ctx);

    view! {
        {children()}
        <div class="toast-container" role="status">
            <For each=move || ctx.queue.with(|q| q.shown.clone()) key=|toast| toast.id let:toast>
                <div class=toast.level.class() on:click=move |_| ctx.dismiss(toast.id)>
                    {toast.message.clone()}
                </div>
            </For>
        </div>
    }
}
