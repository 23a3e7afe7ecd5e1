use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use roster_types::{Student, StudentDraft};

#[derive(Clone, Debug, PartialEq)]
pub enum DialogMode {
    Create,
    Edit(Student),
}

impl DialogMode {
    pub fn title(&self) -> &'static str {
        match self {
            DialogMode::Create => "Add Student",
            DialogMode::Edit(_) => "Edit Student",
        }
    }

    pub fn initial_draft(&self) -> StudentDraft {
        match self {
            DialogMode::Create => StudentDraft::default(),
            DialogMode::Edit(student) => StudentDraft::from(student),
        }
    }
}

/// Modal form bound to a local draft. The draft is checked before
/// `on_save` sees it; server-side failures arrive through `error`.
#[component]
pub fn StudentDialog<S, C>(
    mode: DialogMode,
    on_save: S,
    on_cancel: C,
    /// True while the save request is in flight
    saving: ReadSignal<bool>,
    error: ReadSignal<Option<String>>,
) -> impl IntoView
where
    S: Fn(DialogMode, StudentDraft) + Clone + Send + Sync + 'static,
    C: Fn() + Clone + Send + Sync + 'static,
{
    let initial = mode.initial_draft();
    let title = mode.title();

    let (name, setName) = signal(initial.name);
    let (age, setAge) = signal(initial.age);
    let (address, setAddress) = signal(initial.address);
    let (contact, setContact) = signal(initial.contact);
    let (localError, setLocalError) = signal(Option::<String>::None);

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let draft = StudentDraft {
            name: name.get_untracked(),
            age: age.get_untracked(),
            address: address.get_untracked(),
            contact: contact.get_untracked(),
        };
        match draft.validate() {
            Ok(_) => {
                setLocalError.set(None);
                on_save(mode.clone(), draft);
            }
            Err(e) => setLocalError.set(Some(e.to_string())),
        }
    };

    let shownError = move || localError.get().or_else(|| error.get());

    view! {
        <div class="dialog-backdrop">
            <div class="card dialog" role="dialog" aria-modal="true">
                <div class="card-title">{title}</div>
                <form on:submit=onSubmit>
                    <div class="form-row">
                        <div class="form-group">
                            <label for="student-name">"Name"</label>
                            <input
                                type="text"
                                id="student-name"
                                required
                                prop:value=move || name.get()
                                on:input=move |ev| setName.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label for="student-age">"Age"</label>
                            <input
                                type="number"
                                id="student-age"
                                min="1"
                                required
                                prop:value=move || age.get()
                                on:input=move |ev| setAge.set(event_target_value(&ev))
                            />
                        </div>
                    </div>
                    <div class="form-group">
                        <label for="student-address">"Address"</label>
                        <textarea
                            id="student-address"
                            rows="2"
                            required
                            prop:value=move || address.get()
                            on:input=move |ev| setAddress.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="form-group">
                        <label for="student-contact">"Contact"</label>
                        <input
                            type="text"
                            id="student-contact"
                            required
                            prop:value=move || contact.get()
                            on:input=move |ev| setContact.set(event_target_value(&ev))
                        />
                    </div>

                    {move || shownError().map(|e| view! { <div class="login-error">{e}</div> })}

                    <div class="dialog-actions">
                        <button
                            type="button"
                            class="btn btn-ghost"
                            disabled=move || saving.get()
                            on:click=move |_| on_cancel()
                        >
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_mode_prefills_from_record() {
        let student = Student {
            id: "4".into(),
            name: "Nimal".into(),
            age: Some(19),
            address: "Kandy".into(),
            contact: "071".into(),
        };
        let mode = DialogMode::Edit(student);
        assert_eq!(mode.title(), "Edit Student");
        assert_eq!(mode.initial_draft().age, "19");
        assert_eq!(DialogMode::Create.initial_draft(), StudentDraft::default());
    }
}
