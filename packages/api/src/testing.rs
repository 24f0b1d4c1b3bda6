//! Scripted backends for tests of the auth service and the dashboard views.
//!
//! Enabled inside this crate's tests and, for downstream crates, through the
//! `testing` feature.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::json;
use store::{
    About, AboutDraft, Contact, Project, ProjectDraft, Skill, SkillDraft, User,
};

use crate::auth::AuthBackend;
use crate::content::ContentApi;
use crate::error::ApiError;
use crate::models::{AuthResponse, ImageUpload, LoginCredentials, RegisterData};

pub fn admin_user() -> User {
    User {
        id: "1".into(),
        name: "A".into(),
        email: "a@b.com".into(),
        role: "admin".into(),
    }
}

/// Unsigned JWT whose `exp` is `offset_secs` from now (negative for the past).
pub fn token_expiring_in(offset_secs: i64) -> String {
    let exp = store::current_timestamp() + offset_secs;
    store::token::unsigned_token(&json!({"id": "1", "exp": exp}))
}

/// [`AuthBackend`] that answers every login/register with a fixed result.
#[derive(Default)]
pub struct FakeAuthBackend {
    answer: Mutex<Option<Result<AuthResponse, ApiError>>>,
    fail_logout: bool,
    logins: Mutex<Vec<String>>,
    logouts: Mutex<Vec<Option<String>>>,
}

impl FakeAuthBackend {
    pub fn answering(response: AuthResponse) -> Self {
        Self {
            answer: Mutex::new(Some(Ok(response))),
            ..Self::default()
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            answer: Mutex::new(Some(Err(error))),
            ..Self::default()
        }
    }

    pub fn with_failing_logout(mut self) -> Self {
        self.fail_logout = true;
        self
    }

    /// Emails of every login attempt.
    pub fn logins(&self) -> Vec<String> {
        self.logins.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Tokens sent with every server-side logout.
    pub fn logouts(&self) -> Vec<Option<String>> {
        self.logouts.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn next_answer(&self) -> Result<AuthResponse, ApiError> {
        let answer = self.answer.lock().ok().and_then(|mut a| a.take());
        answer.unwrap_or_else(|| Ok(AuthResponse::failure("no scripted answer")))
    }
}

impl AuthBackend for FakeAuthBackend {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        if let Ok(mut logins) = self.logins.lock() {
            logins.push(credentials.email.clone());
        }
        self.next_answer()
    }

    async fn register(&self, _data: &RegisterData) -> Result<AuthResponse, ApiError> {
        self.next_answer()
    }

    async fn logout(&self, token: Option<String>) -> Result<(), ApiError> {
        if let Ok(mut logouts) = self.logouts.lock() {
            logouts.push(token);
        }
        if self.fail_logout {
            return Err(ApiError::Unreachable("logout endpoint down".into()));
        }
        Ok(())
    }
}

/// In-memory [`ContentApi`] that records every call it receives.
///
/// Calls are logged as `"<operation>"` or `"<operation>:<id>"`.
#[derive(Default)]
pub struct FakeContentApi {
    pub skills: Mutex<Vec<Skill>>,
    pub projects: Mutex<Vec<Project>>,
    pub contacts: Mutex<Vec<Contact>>,
    pub about: Mutex<Option<About>>,
    failures: Mutex<VecDeque<(String, ApiError)>>,
    calls: Mutex<Vec<String>>,
    skill_drafts: Mutex<Vec<SkillDraft>>,
    project_drafts: Mutex<Vec<ProjectDraft>>,
}

impl FakeContentApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skills(self, skills: Vec<Skill>) -> Self {
        if let Ok(mut current) = self.skills.lock() {
            *current = skills;
        }
        self
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        if let Ok(mut current) = self.projects.lock() {
            *current = projects;
        }
        self
    }

    pub fn with_contacts(self, contacts: Vec<Contact>) -> Self {
        if let Ok(mut current) = self.contacts.lock() {
            *current = contacts;
        }
        self
    }

    pub fn with_about(self, about: About) -> Self {
        if let Ok(mut current) = self.about.lock() {
            *current = Some(about);
        }
        self
    }

    /// Make the next call to `operation` fail with `error`.
    pub fn fail_next(&self, operation: &str, error: ApiError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push_back((operation.to_string(), error));
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    /// Skill payloads received by create and update, oldest first.
    pub fn skill_drafts(&self) -> Vec<SkillDraft> {
        self.skill_drafts.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// Project payloads received by create and update, oldest first.
    pub fn project_drafts(&self) -> Vec<ProjectDraft> {
        self.project_drafts.lock().map(|d| d.clone()).unwrap_or_default()
    }

    fn keep<T: Clone>(drafts: &Mutex<Vec<T>>, draft: &T) {
        if let Ok(mut drafts) = drafts.lock() {
            drafts.push(draft.clone());
        }
    }

    fn record(&self, operation: &str, id: Option<&str>) -> Result<(), ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(match id {
                Some(id) => format!("{operation}:{id}"),
                None => operation.to_string(),
            });
        }
        let Ok(mut failures) = self.failures.lock() else {
            return Ok(());
        };
        match failures.iter().position(|(op, _)| op == operation) {
            Some(index) => match failures.remove(index) {
                Some((_, error)) => Err(error),
                None => Ok(()),
            },
            None => Ok(()),
        }
    }
}

fn skill_from(id: String, draft: &SkillDraft) -> Skill {
    Skill {
        id,
        name: draft.name.clone(),
        level: draft.level.clone(),
        category: Some(draft.category.clone()),
        icon_url: draft.icon_url.clone(),
    }
}

fn project_from(id: String, draft: &ProjectDraft) -> Project {
    Project {
        id,
        title: draft.title.clone(),
        description: draft.description.clone(),
        technologies: draft.technologies.clone(),
        image_url: draft.image_url.clone(),
        link: draft.link.clone(),
        project_url: None,
        github_url: None,
        created_at: None,
    }
}

impl ContentApi for FakeContentApi {
    async fn get_skills(&self) -> Result<Vec<Skill>, ApiError> {
        self.record("get_skills", None)?;
        Ok(self.skills.lock().map(|s| s.clone()).unwrap_or_default())
    }

    async fn create_skill(&self, draft: &SkillDraft) -> Result<(), ApiError> {
        self.record("create_skill", None)?;
        Self::keep(&self.skill_drafts, draft);
        if let Ok(mut skills) = self.skills.lock() {
            let id = format!("s{}", skills.len() + 1);
            skills.push(skill_from(id, draft));
        }
        Ok(())
    }

    async fn update_skill(&self, id: &str, draft: &SkillDraft) -> Result<(), ApiError> {
        self.record("update_skill", Some(id))?;
        Self::keep(&self.skill_drafts, draft);
        if let Ok(mut skills) = self.skills.lock() {
            for skill in skills.iter_mut().filter(|s| s.id == id) {
                *skill = skill_from(id.to_string(), draft);
            }
        }
        Ok(())
    }

    async fn delete_skill(&self, id: &str) -> Result<(), ApiError> {
        self.record("delete_skill", Some(id))?;
        if let Ok(mut skills) = self.skills.lock() {
            skills.retain(|s| s.id != id);
        }
        Ok(())
    }

    async fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.record("get_projects", None)?;
        Ok(self.projects.lock().map(|p| p.clone()).unwrap_or_default())
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<(), ApiError> {
        self.record("create_project", None)?;
        Self::keep(&self.project_drafts, draft);
        if let Ok(mut projects) = self.projects.lock() {
            let id = format!("p{}", projects.len() + 1);
            projects.push(project_from(id, draft));
        }
        Ok(())
    }

    async fn update_project(&self, id: &str, draft: &ProjectDraft) -> Result<(), ApiError> {
        self.record("update_project", Some(id))?;
        Self::keep(&self.project_drafts, draft);
        if let Ok(mut projects) = self.projects.lock() {
            for project in projects.iter_mut().filter(|p| p.id == id) {
                *project = project_from(id.to_string(), draft);
            }
        }
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        self.record("delete_project", Some(id))?;
        if let Ok(mut projects) = self.projects.lock() {
            projects.retain(|p| p.id != id);
        }
        Ok(())
    }

    async fn get_about(&self) -> Result<Option<About>, ApiError> {
        self.record("get_about", None)?;
        Ok(self.about.lock().ok().and_then(|a| a.clone()))
    }

    async fn update_about(&self, draft: &AboutDraft) -> Result<(), ApiError> {
        self.record("update_about", None)?;
        if let Ok(mut about) = self.about.lock() {
            let id = about.as_ref().map(|a| a.id.clone()).unwrap_or_default();
            let image = about.as_ref().and_then(|a| a.profile_image_url.clone());
            *about = Some(About {
                id,
                description: draft.description.clone(),
                profile_image_url: image,
            });
        }
        Ok(())
    }

    async fn upload_about_image(&self, file: &ImageUpload) -> Result<(), ApiError> {
        self.record("upload_about_image", Some(&file.file_name))?;
        if let Ok(mut about) = self.about.lock() {
            if let Some(about) = about.as_mut() {
                about.profile_image_url = Some(format!("/uploads/{}", file.file_name));
            }
        }
        Ok(())
    }

    async fn get_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        self.record("get_contacts", None)?;
        Ok(self.contacts.lock().map(|c| c.clone()).unwrap_or_default())
    }

    async fn delete_contact(&self, id: &str) -> Result<(), ApiError> {
        self.record("delete_contact", Some(id))?;
        if let Ok(mut contacts) = self.contacts.lock() {
            contacts.retain(|c| c.id != id);
        }
        Ok(())
    }
}
