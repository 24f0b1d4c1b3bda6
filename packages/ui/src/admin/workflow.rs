//! Dashboard operations: load, create, update and delete for each collection.
//!
//! Every mutation follows the same cycle. Set `loading`, call the backend,
//! then either report success and reload that collection or report
//! `"Error <verb> <thing>: <reason>"`. Nothing is mutated locally; the reload
//! is the only way new data reaches the state.

use api::{ApiError, ContentApi};

use super::{DashboardSink, DashboardState};

pub const CONFIRM_DELETE_SKILL: &str = "Are you sure you want to delete this skill?";
pub const CONFIRM_DELETE_PROJECT: &str = "Are you sure you want to delete this project?";
pub const CONFIRM_DELETE_CONTACT: &str = "Are you sure you want to delete this contact message?";
pub const CONFIRM_LOGOUT: &str =
    "Are you sure you want to logout? All session data will be cleared.";

fn error_line(action: &str, error: &ApiError) -> String {
    format!("Error {action}: {}", error.user_message())
}

fn finish(state: &mut impl DashboardSink, message: String) {
    state.update(|s| {
        s.loading = false;
        s.message = message;
    });
}

fn start(state: &mut impl DashboardSink) {
    state.update(|s| s.loading = true);
}

fn report_invalid(state: &mut impl DashboardSink, error: impl ToString) {
    state.update(|s| s.message = error.to_string());
}

/// Load every collection, as done when the dashboard opens.
pub async fn load_all(api: &impl ContentApi, state: &mut impl DashboardSink) {
    load_skills(api, state).await;
    load_projects(api, state).await;
    load_contacts(api, state).await;
    load_about(api, state).await;
}

pub async fn load_skills(api: &impl ContentApi, state: &mut impl DashboardSink) {
    start(state);
    match api.get_skills().await {
        Ok(skills) => {
            tracing::debug!("Loaded {} skills", skills.len());
            state.update(|s| {
                s.skills = skills;
                s.loading = false;
            });
        }
        Err(e) => {
            tracing::error!("Error loading skills: {e}");
            finish(state, error_line("loading skills", &e));
        }
    }
}

pub async fn submit_skill(api: &impl ContentApi, state: &mut impl DashboardSink) {
    let (form, editing) = state.view(|s| (s.skill_form.clone(), s.editing_skill.clone()));
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(e) => return report_invalid(state, e),
    };

    start(state);
    let (result, done, action) = match &editing {
        Some(skill) => (
            api.update_skill(&skill.id, &draft).await,
            "Skill updated successfully!",
            "updating skill",
        ),
        None => (
            api.create_skill(&draft).await,
            "Skill created successfully!",
            "creating skill",
        ),
    };

    match result {
        Ok(()) => {
            finish(state, done.to_string());
            load_skills(api, state).await;
            state.update(DashboardState::reset_skill_form);
        }
        Err(e) => finish(state, error_line(action, &e)),
    }
}

/// Delete a skill once `confirm` accepts the prompt. A refusal sends nothing.
pub async fn delete_skill(
    api: &impl ContentApi,
    state: &mut impl DashboardSink,
    id: &str,
    confirm: impl FnOnce(&str) -> bool,
) {
    if !confirm(CONFIRM_DELETE_SKILL) {
        return;
    }
    match api.delete_skill(id).await {
        Ok(()) => {
            finish(state, "Skill deleted successfully!".to_string());
            load_skills(api, state).await;
        }
        Err(e) => finish(state, error_line("deleting skill", &e)),
    }
}

pub async fn load_projects(api: &impl ContentApi, state: &mut impl DashboardSink) {
    start(state);
    match api.get_projects().await {
        Ok(projects) => {
            tracing::debug!("Loaded {} projects", projects.len());
            state.update(|s| {
                s.projects = projects;
                s.loading = false;
            });
        }
        Err(e) => {
            tracing::error!("Error loading projects: {e}");
            finish(state, error_line("loading projects", &e));
        }
    }
}

pub async fn submit_project(api: &impl ContentApi, state: &mut impl DashboardSink) {
    let (form, editing) = state.view(|s| (s.project_form.clone(), s.editing_project.clone()));
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(e) => return report_invalid(state, e),
    };

    start(state);
    let (result, done, action) = match &editing {
        Some(project) => (
            api.update_project(&project.id, &draft).await,
            "Project updated successfully!",
            "updating project",
        ),
        None => (
            api.create_project(&draft).await,
            "Project created successfully!",
            "creating project",
        ),
    };

    match result {
        Ok(()) => {
            finish(state, done.to_string());
            load_projects(api, state).await;
            state.update(DashboardState::reset_project_form);
        }
        Err(e) => finish(state, error_line(action, &e)),
    }
}

pub async fn delete_project(
    api: &impl ContentApi,
    state: &mut impl DashboardSink,
    id: &str,
    confirm: impl FnOnce(&str) -> bool,
) {
    if !confirm(CONFIRM_DELETE_PROJECT) {
        return;
    }
    match api.delete_project(id).await {
        Ok(()) => {
            finish(state, "Project deleted successfully!".to_string());
            load_projects(api, state).await;
        }
        Err(e) => finish(state, error_line("deleting project", &e)),
    }
}

pub async fn load_contacts(api: &impl ContentApi, state: &mut impl DashboardSink) {
    match api.get_contacts().await {
        Ok(contacts) => {
            tracing::debug!("Loaded {} contacts", contacts.len());
            state.update(|s| s.contacts = contacts);
        }
        Err(e) => {
            tracing::error!("Error loading contacts: {e}");
            state.update(|s| s.message = error_line("loading contacts", &e));
        }
    }
}

pub async fn delete_contact(
    api: &impl ContentApi,
    state: &mut impl DashboardSink,
    id: &str,
    confirm: impl FnOnce(&str) -> bool,
) {
    if !confirm(CONFIRM_DELETE_CONTACT) {
        return;
    }
    match api.delete_contact(id).await {
        Ok(()) => {
            finish(state, "Contact message deleted successfully!".to_string());
            load_contacts(api, state).await;
        }
        Err(e) => finish(state, error_line("deleting contact", &e)),
    }
}

/// Load the about document into the state and its form. Failures are only logged.
pub async fn load_about(api: &impl ContentApi, state: &mut impl DashboardSink) {
    match api.get_about().await {
        Ok(about) => state.update(|s| {
            if let Some(about) = &about {
                s.about_form = crate::forms::AboutForm::from_about(about);
            }
            s.about = about;
        }),
        Err(e) => tracing::error!("Error loading about info: {e}"),
    }
}

pub async fn submit_about(api: &impl ContentApi, state: &mut impl DashboardSink) {
    let draft = match state.view(|s| s.about_form.validate()) {
        Ok(draft) => draft,
        Err(e) => return report_invalid(state, e),
    };

    start(state);
    match api.update_about(&draft).await {
        Ok(()) => {
            finish(state, "About information updated successfully!".to_string());
            load_about(api, state).await;
        }
        Err(e) => finish(state, error_line("updating about", &e)),
    }
}

/// Upload the selected profile image. Does nothing when no file is selected.
pub async fn upload_profile_image(api: &impl ContentApi, state: &mut impl DashboardSink) {
    let Some(file) = state.view(|s| s.selected_file.clone()) else {
        return;
    };

    start(state);
    match api.upload_about_image(&file).await {
        Ok(()) => {
            finish(state, "Profile image uploaded successfully!".to_string());
            load_about(api, state).await;
            state.update(|s| s.selected_file = None);
        }
        Err(e) => finish(state, error_line("uploading image", &e)),
    }
}
