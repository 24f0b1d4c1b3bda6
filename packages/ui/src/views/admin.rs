use std::future::Future;

use api::{ApiClient, Contact, ImageUpload};
use dioxus::prelude::*;

use crate::admin::workflow::{self, CONFIRM_LOGOUT};
use crate::admin::{DashboardState, Tab};
use crate::window::confirm_dialog;
use crate::{use_auth, AuthHandle};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Run a dashboard operation with a fresh bearer and restart the idle timer.
fn dispatch<Fut>(
    state: Signal<DashboardState>,
    op: impl FnOnce(ApiClient, Signal<DashboardState>) -> Fut,
) where
    Fut: Future<Output = ()> + 'static,
{
    let handle = consume_context::<AuthHandle>();
    handle.service().reset_idle_timeout();
    spawn(op(handle.api(), state));
}

/// The admin dashboard: overview plus one tab per collection.
#[component]
pub fn AdminView(on_logout: EventHandler<()>) -> Element {
    let auth = use_auth();
    let mut state = use_signal(DashboardState::default);

    use_hook(|| {
        dispatch(state, |api, mut state| async move {
            workflow::load_all(&api, &mut state).await;
        })
    });

    let handle_logout = move |_| {
        if !confirm_dialog(CONFIRM_LOGOUT) {
            return;
        }
        tracing::info!("Admin logout initiated");
        let handle = consume_context::<AuthHandle>();
        spawn(async move {
            handle.service().force_logout().await;
            on_logout.call(());
        });
    };

    let user_name = auth()
        .user
        .map(|user| user.name)
        .unwrap_or_default();
    let current = state();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }

        div { class: "admin-container",
            header { class: "admin-header",
                h1 { "Portfolio Dashboard" }
                div { class: "admin-user",
                    span { "Welcome, {user_name}" }
                    button { class: "btn danger", onclick: handle_logout, "Logout" }
                }
            }

            nav { class: "admin-tabs",
                for tab in Tab::ALL {
                    button {
                        key: "{tab.label()}",
                        class: if current.active_tab == tab { "tab active" } else { "tab" },
                        onclick: move |_| state.write().set_active_tab(tab),
                        "{tab.label()}"
                    }
                }
            }

            if !current.message.is_empty() {
                div {
                    class: if current.message_is_error() { "message error" } else { "message success" },
                    "{current.message}"
                }
            }
            if current.loading {
                div { class: "loading", "Loading..." }
            }

            match current.active_tab {
                Tab::Overview => rsx! { Overview { state } },
                Tab::Skills => rsx! { SkillsTab { state } },
                Tab::Projects => rsx! { ProjectsTab { state } },
                Tab::About => rsx! { AboutTab { state } },
                Tab::Contacts => rsx! { ContactsTab { state } },
            }
        }
    }
}

#[component]
fn Overview(state: Signal<DashboardState>) -> Element {
    let current = state();
    let about = if current.about.is_some() { "Published" } else { "Not set" };
    rsx! {
        div { class: "overview-grid",
            div { class: "stat-card",
                h3 { "Skills" }
                p { class: "stat", "{current.skills.len()}" }
            }
            div { class: "stat-card",
                h3 { "Projects" }
                p { class: "stat", "{current.projects.len()}" }
            }
            div { class: "stat-card",
                h3 { "Messages" }
                p { class: "stat", "{current.contacts.len()}" }
            }
            div { class: "stat-card",
                h3 { "About" }
                p { class: "stat", "{about}" }
            }
        }
    }
}

#[component]
fn SkillsTab(state: Signal<DashboardState>) -> Element {
    let mut state = state;
    let current = state();
    let form = current.skill_form.clone();
    let editing = current.editing_skill.is_some();

    rsx! {
        section { class: "editor",
            h2 { if editing { "Edit Skill" } else { "Add Skill" } }
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    dispatch(state, |api, mut state| async move {
                        workflow::submit_skill(&api, &mut state).await;
                    });
                },
                input {
                    placeholder: "Name",
                    value: "{form.name}",
                    oninput: move |evt| state.write().skill_form.name = evt.value(),
                }
                select {
                    value: "{form.level}",
                    onchange: move |evt| state.write().skill_form.level = evt.value(),
                    option { value: "", "Select level" }
                    for level in ["Beginner", "Intermediate", "Advanced", "Expert"] {
                        option { key: "{level}", value: level, "{level}" }
                    }
                }
                input {
                    placeholder: "Category",
                    value: "{form.category}",
                    oninput: move |evt| state.write().skill_form.category = evt.value(),
                }
                input {
                    placeholder: "Icon URL (optional)",
                    value: "{form.icon_url}",
                    oninput: move |evt| state.write().skill_form.icon_url = evt.value(),
                }
                div { class: "form-actions",
                    button { r#type: "submit", class: "btn primary", disabled: current.loading,
                        if editing { "Update Skill" } else { "Add Skill" }
                    }
                    if editing {
                        button {
                            r#type: "button",
                            class: "btn",
                            onclick: move |_| state.write().reset_skill_form(),
                            "Cancel"
                        }
                    }
                }
            }
        }

        section { class: "item-list",
            for skill in current.skills.clone() {
                div { key: "{skill.id}", class: "item",
                    if let Some(icon) = skill.icon_url.clone() {
                        img { class: "item-icon", src: "{icon}", alt: "{skill.name}" }
                    }
                    div { class: "item-body",
                        h4 { "{skill.name}" }
                        p { "{skill.level} · {skill.category.clone().unwrap_or_default()}" }
                    }
                    div { class: "item-actions",
                        button {
                            class: "btn",
                            onclick: {
                                let skill = skill.clone();
                                move |_| state.write().edit_skill(skill.clone())
                            },
                            "Edit"
                        }
                        button {
                            class: "btn danger",
                            onclick: {
                                let id = skill.id.clone();
                                move |_| {
                                    let id = id.clone();
                                    dispatch(state, |api, mut state| async move {
                                        workflow::delete_skill(&api, &mut state, &id, confirm_dialog).await;
                                    });
                                }
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ProjectsTab(state: Signal<DashboardState>) -> Element {
    let mut state = state;
    let current = state();
    let form = current.project_form.clone();
    let editing = current.editing_project.is_some();

    rsx! {
        section { class: "editor",
            h2 { if editing { "Edit Project" } else { "Add Project" } }
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    dispatch(state, |api, mut state| async move {
                        workflow::submit_project(&api, &mut state).await;
                    });
                },
                input {
                    placeholder: "Title",
                    value: "{form.title}",
                    oninput: move |evt| state.write().project_form.title = evt.value(),
                }
                textarea {
                    placeholder: "Description",
                    value: "{form.description}",
                    oninput: move |evt| state.write().project_form.description = evt.value(),
                }
                input {
                    placeholder: "Technologies (comma separated)",
                    value: "{form.technologies}",
                    oninput: move |evt| state.write().project_form.technologies = evt.value(),
                }
                input {
                    placeholder: "Image URL (optional)",
                    value: "{form.image_url}",
                    oninput: move |evt| state.write().project_form.image_url = evt.value(),
                }
                input {
                    placeholder: "Link (optional)",
                    value: "{form.link}",
                    oninput: move |evt| state.write().project_form.link = evt.value(),
                }
                div { class: "form-actions",
                    button { r#type: "submit", class: "btn primary", disabled: current.loading,
                        if editing { "Update Project" } else { "Add Project" }
                    }
                    if editing {
                        button {
                            r#type: "button",
                            class: "btn",
                            onclick: move |_| state.write().reset_project_form(),
                            "Cancel"
                        }
                    }
                }
            }
        }

        section { class: "item-list",
            for project in current.projects.clone() {
                div { key: "{project.id}", class: "item",
                    if let Some(image) = project.image_url.clone() {
                        img { class: "item-image", src: "{image}", alt: "{project.title}" }
                    }
                    div { class: "item-body",
                        h4 { "{project.title}" }
                        p { "{project.description}" }
                        div { class: "tags",
                            for tech in project.technologies.clone() {
                                span { class: "tag", "{tech}" }
                            }
                        }
                        if let Some(link) = project.link.clone() {
                            a { href: "{link}", target: "_blank", "View project" }
                        }
                    }
                    div { class: "item-actions",
                        button {
                            class: "btn",
                            onclick: {
                                let project = project.clone();
                                move |_| state.write().edit_project(project.clone())
                            },
                            "Edit"
                        }
                        button {
                            class: "btn danger",
                            onclick: {
                                let id = project.id.clone();
                                move |_| {
                                    let id = id.clone();
                                    dispatch(state, |api, mut state| async move {
                                        workflow::delete_project(&api, &mut state, &id, confirm_dialog).await;
                                    });
                                }
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AboutTab(state: Signal<DashboardState>) -> Element {
    let mut state = state;
    let current = state();

    let handle_file = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            state.write().select_file(None);
            return;
        };
        match engine.read_file(&name).await {
            Some(bytes) => state.write().select_file(Some(ImageUpload::new(name, bytes))),
            None => tracing::warn!("Could not read selected file {name}"),
        }
    };

    rsx! {
        section { class: "editor",
            h2 { "About" }
            form {
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    dispatch(state, |api, mut state| async move {
                        workflow::submit_about(&api, &mut state).await;
                    });
                },
                textarea {
                    rows: "8",
                    value: "{current.about_form.description}",
                    oninput: move |evt| state.write().about_form.description = evt.value(),
                }
                button { r#type: "submit", class: "btn primary", disabled: current.loading,
                    "Save About"
                }
            }
        }

        section { class: "editor",
            h2 { "Profile Image" }
            if let Some(image) = current.about.as_ref().and_then(|a| a.profile_image_url.clone()) {
                img { class: "profile-image", src: "{image}", alt: "Profile" }
            }
            input { r#type: "file", accept: "image/*", onchange: handle_file }
            button {
                class: "btn primary",
                disabled: current.selected_file.is_none() || current.loading,
                onclick: move |_| {
                    dispatch(state, |api, mut state| async move {
                        workflow::upload_profile_image(&api, &mut state).await;
                    });
                },
                "Upload Image"
            }
        }
    }
}

fn received_at(contact: &Contact) -> Option<String> {
    contact
        .created_at
        .map(|at| at.format("%b %d, %Y %H:%M").to_string())
}

#[component]
fn ContactsTab(state: Signal<DashboardState>) -> Element {
    let current = state();

    rsx! {
        section { class: "item-list",
            if current.contacts.is_empty() {
                p { class: "empty", "No messages yet." }
            }
            for contact in current.contacts.clone() {
                div { key: "{contact.id}", class: "item",
                    div { class: "item-body",
                        h4 { {format!("{} <{}>", contact.name, contact.email)} }
                        if let Some(at) = received_at(&contact) {
                            small { "{at}" }
                        }
                        p { "{contact.message}" }
                    }
                    div { class: "item-actions",
                        button {
                            class: "btn danger",
                            onclick: {
                                let id = contact.id.clone();
                                move |_| {
                                    let id = id.clone();
                                    dispatch(state, |api, mut state| async move {
                                        workflow::delete_contact(&api, &mut state, &id, confirm_dialog).await;
                                    });
                                }
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
