use leptos::prelude::*;
use leptos_meta::Title;
#[allow(unused_imports)]
use roster_types::{apply_created, apply_deleted, apply_updated, Student, StudentDraft, StudentId};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::student_dialog::{DialogMode, StudentDialog};
use crate::components::toast::ToastContext;
#[allow(unused_imports)]
use crate::server_error::{error_text, is_signed_out};

#[server]
pub async fn list_students() -> Result<Vec<Student>, ServerFnError> {
    use crate::session::{client_error, require_session};

    let (api, token) = require_session().await?;
    api.list_students(&token).await.map_err(client_error)
}

#[server]
pub async fn create_student(
    name: String,
    age: String,
    address: String,
    contact: String,
) -> Result<Student, ServerFnError> {
    use crate::session::{client_error, require_session};

    let draft = StudentDraft {
        name,
        age,
        address,
        contact,
    };
    let student = draft
        .validate()
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let (api, token) = require_session().await?;
    let created = api
        .create_student(&token, &student)
        .await
        .map_err(client_error)?;
    tracing::info!("created student {}", created.name);
    Ok(created)
}

#[server]
pub async fn update_student(
    id: String,
    name: String,
    age: String,
    address: String,
    contact: String,
) -> Result<Student, ServerFnError> {
    use crate::session::{client_error, require_session};

    let draft = StudentDraft {
        name,
        age,
        address,
        contact,
    };
    let student = draft
        .validate()
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let (api, token) = require_session().await?;
    let updated = api
        .update_student(&token, &StudentId(id), &student)
        .await
        .map_err(client_error)?;
    tracing::info!("updated student {}", updated.id);
    Ok(updated)
}

#[server]
pub async fn delete_student(id: String) -> Result<(), ServerFnError> {
    use crate::session::{client_error, require_session};

    let (api, token) = require_session().await?;
    let id = StudentId(id);
    api.delete_student(&token, &id).await.map_err(client_error)?;
    tracing::info!("deleted student {id}");
    Ok(())
}

fn delete_prompt(student: &Student) -> String {
    format!(
        "Are you sure you want to delete {}? This cannot be undone.",
        student.name_label()
    )
}

#[component]
pub fn StudentsPage() -> impl IntoView {
    #[allow(unused_variables)]
    let toasts = expect_context::<ToastContext>();

    // None until the first load resolves
    #[allow(unused_variables)]
    let (students, setStudents) = signal(Option::<Result<Vec<Student>, String>>::None);
    let (dialog, setDialog) = signal(Option::<DialogMode>::None);
    #[allow(unused_variables)]
    let (dialogError, setDialogError) = signal(Option::<String>::None);
    let (pendingDelete, setPendingDelete) = signal(Option::<Student>::None);
    #[allow(unused_variables)]
    let (busy, setBusy) = signal(false);

    let fetch = move || {
        #[cfg(feature = "hydrate")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = list_students().await.map_err(|e| {
                if is_signed_out(&e) {
                    crate::server_error::redirect_to_login();
                }
                error_text(&e)
            });
            setStudents.set(Some(result));
        });
    };

    // Initial fetch on mount
    #[cfg(feature = "hydrate")]
    fetch();

    let saveStudent = move |mode: DialogMode, draft: StudentDraft| {
        setDialogError.set(None);
        #[cfg(feature = "hydrate")]
        {
            setBusy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let StudentDraft {
                    name,
                    age,
                    address,
                    contact,
                } = draft;
                let result = match &mode {
                    DialogMode::Create => create_student(name, age, address, contact).await,
                    DialogMode::Edit(existing) => {
                        update_student(existing.id.0.clone(), name, age, address, contact).await
                    }
                };
                setBusy.set(false);

                match result {
                    Ok(record) => {
                        let label = record.name_label();
                        if record.id.is_empty() {
                            // No id came back; reload to pick up the server's.
                            fetch();
                        } else {
                            setStudents.update(|state| {
                                if let Some(Ok(list)) = state {
                                    match mode {
                                        DialogMode::Create => apply_created(list, record),
                                        DialogMode::Edit(_) => apply_updated(list, record),
                                    }
                                }
                            });
                        }
                        setDialog.set(None);
                        toasts.success(format!("Saved {label}"));
                    }
                    Err(e) => {
                        if is_signed_out(&e) {
                            crate::server_error::redirect_to_login();
                        }
                        setDialogError.set(Some(error_text(&e)));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (mode, draft);
        }
    };

    let confirmDelete = move || {
        let Some(target) = pendingDelete.get_untracked() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            setBusy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = delete_student(target.id.0.clone()).await;
                setBusy.set(false);
                setPendingDelete.set(None);

                match result {
                    Ok(()) => {
                        setStudents.update(|state| {
                            if let Some(Ok(list)) = state {
                                apply_deleted(list, &target.id);
                            }
                        });
                        toasts.success(format!("Deleted {}", target.name_label()));
                    }
                    Err(e) => {
                        if is_signed_out(&e) {
                            crate::server_error::redirect_to_login();
                        }
                        toasts.error(format!("Failed to delete student: {}", error_text(&e)));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = target;
        }
    };

    let openCreate = move |_: leptos::ev::MouseEvent| {
        setDialogError.set(None);
        setDialog.set(Some(DialogMode::Create));
    };

    view! {
        <Title text="Students" />
        <div class="page-header">
            <div>
                <h1>"My Students"</h1>
                <p class="subtitle">"Student records from the registry"</p>
            </div>
            <button class="btn btn-primary" on:click=openCreate>
                "Add Student"
            </button>
        </div>
        {move || {
            match students.get() {
                None => {
                    view! {
                        <div class="loading">
                            <div class="spinner"></div>
                            "Loading students..."
                        </div>
                    }
                        .into_any()
                }
                Some(Err(e)) => {
                    view! {
                        <div class="card">
                            <p class="login-error">"Failed to load students: " {e}</p>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| {
                                    setStudents.set(None);
                                    fetch();
                                }
                            >
                                "Retry"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                Some(Ok(list)) => {
                    view! {
                        <div class="card">
                            <table class="student-table">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Age"</th>
                                        <th>"Address"</th>
                                        <th>"Contact"</th>
                                        <th>"Action"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {if list.is_empty() {
                                        view! {
                                            <tr>
                                                <td colspan="5" class="table-empty">
                                                    "No students available."
                                                </td>
                                            </tr>
                                        }
                                            .into_any()
                                    } else {
                                        list.into_iter()
                                            .map(|student| {
                                                view! {
                                                    <StudentRow
                                                        student=student
                                                        on_edit=move |s: Student| {
                                                            setDialogError.set(None);
                                                            setDialog.set(Some(DialogMode::Edit(s)));
                                                        }
                                                        on_delete=move |s: Student| {
                                                            setPendingDelete.set(Some(s))
                                                        }
                                                    />
                                                }
                                            })
                                            .collect_view()
                                            .into_any()
                                    }}
                                </tbody>
                            </table>
                        </div>
                    }
                        .into_any()
                }
            }
        }}
        {move || {
            dialog
                .get()
                .map(|mode| {
                    view! {
                        <StudentDialog
                            mode=mode
                            on_save=saveStudent
                            on_cancel=move || setDialog.set(None)
                            saving=busy
                            error=dialogError
                        />
                    }
                })
        }}
        {move || {
            pendingDelete
                .get()
                .map(|student| {
                    view! {
                        <ConfirmDialog
                            title="Delete Student"
                            message=delete_prompt(&student)
                            confirm_label="Delete"
                            busy=busy
                            on_confirm=confirmDelete
                            on_cancel=move || setPendingDelete.set(None)
                        />
                    }
                })
        }}
    }
}

#[component]
fn StudentRow<E, D>(student: Student, on_edit: E, on_delete: D) -> impl IntoView
where
    E: Fn(Student) + Clone + Send + Sync + 'static,
    D: Fn(Student) + Clone + Send + Sync + 'static,
{
    let editTarget = student.clone();
    let deleteTarget = student.clone();
    // Rows the server has not assigned an id to cannot be addressed yet
    let unsaved = student.id.is_empty();

    view! {
        <tr>
            <td>{student.name_label()}</td>
            <td>{student.age_label()}</td>
            <td>{student.address_label()}</td>
            <td>{student.contact_label()}</td>
            <td class="row-actions">
                <button
                    class="btn btn-ghost btn-sm"
                    disabled=unsaved
                    on:click=move |_| on_edit(editTarget.clone())
                >
                    "Edit"
                </button>
                <button
                    class="btn btn-ghost btn-sm btn-danger-text"
                    disabled=unsaved
                    on:click=move |_| on_delete(deleteTarget.clone())
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_prompt_names_the_student() {
        let student = Student {
            id: "3".into(),
            name: "Kamal".into(),
            ..Default::default()
        };
        assert_eq!(
            delete_prompt(&student),
            "Are you sure you want to delete Kamal? This cannot be undone."
        );

        let unnamed = Student::default();
        assert!(delete_prompt(&unnamed).contains("N/A"));
    }
}
