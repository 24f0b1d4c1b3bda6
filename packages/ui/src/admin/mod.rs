//! # Admin dashboard state
//!
//! [`DashboardState`] is everything the dashboard view renders: the active
//! tab, the message line, the loaded collections and the editor forms. The
//! async operations that fill it live in [`workflow`].
//!
//! The view keeps the state in a `Signal`; workflows write through the
//! [`DashboardSink`] trait so they run the same against a plain value in tests.

use api::ImageUpload;
use dioxus::prelude::*;
use store::{About, Contact, Project, Skill};

use crate::forms::{AboutForm, ProjectForm, SkillForm};

pub mod workflow;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    Skills,
    Projects,
    About,
    Contacts,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Skills,
        Tab::Projects,
        Tab::About,
        Tab::Contacts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Skills => "Skills",
            Tab::Projects => "Projects",
            Tab::About => "About",
            Tab::Contacts => "Contacts",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub active_tab: Tab,
    pub loading: bool,
    pub message: String,

    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub contacts: Vec<Contact>,
    pub about: Option<About>,

    pub skill_form: SkillForm,
    pub project_form: ProjectForm,
    pub about_form: AboutForm,

    pub editing_skill: Option<Skill>,
    pub editing_project: Option<Project>,
    pub selected_file: Option<ImageUpload>,
}

impl DashboardState {
    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.message.clear();
    }

    pub fn edit_skill(&mut self, skill: Skill) {
        self.skill_form = SkillForm::from_skill(&skill);
        self.editing_skill = Some(skill);
    }

    pub fn reset_skill_form(&mut self) {
        self.skill_form = SkillForm::default();
        self.editing_skill = None;
    }

    pub fn edit_project(&mut self, project: Project) {
        self.project_form = ProjectForm::from_project(&project);
        self.editing_project = Some(project);
    }

    pub fn reset_project_form(&mut self) {
        self.project_form = ProjectForm::default();
        self.editing_project = None;
    }

    pub fn select_file(&mut self, file: Option<ImageUpload>) {
        self.selected_file = file;
    }

    /// Whether the message line reports a failure.
    pub fn message_is_error(&self) -> bool {
        self.message.starts_with("Error")
    }
}

/// Write access to a [`DashboardState`], wherever it lives.
pub trait DashboardSink {
    fn view<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R;
    fn update(&mut self, f: impl FnOnce(&mut DashboardState));
}

impl DashboardSink for DashboardState {
    fn view<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(self)
    }

    fn update(&mut self, f: impl FnOnce(&mut DashboardState)) {
        f(self)
    }
}

impl DashboardSink for Signal<DashboardState> {
    fn view<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&self.read())
    }

    fn update(&mut self, f: impl FnOnce(&mut DashboardState)) {
        f(&mut self.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill() -> Skill {
        Skill {
            id: "s1".into(),
            name: "Rust".into(),
            level: "Expert".into(),
            category: Some("Languages".into()),
            icon_url: None,
        }
    }

    #[test]
    fn switching_tab_clears_message() {
        let mut state = DashboardState {
            message: "Skill created successfully!".into(),
            ..DashboardState::default()
        };
        state.set_active_tab(Tab::Projects);
        assert_eq!(state.active_tab, Tab::Projects);
        assert!(state.message.is_empty());
    }

    #[test]
    fn edit_then_reset_skill() {
        let mut state = DashboardState::default();
        state.edit_skill(skill());
        assert_eq!(state.skill_form.name, "Rust");
        assert_eq!(state.skill_form.category, "Languages");
        assert_eq!(state.editing_skill.as_ref().map(|s| s.id.as_str()), Some("s1"));

        state.reset_skill_form();
        assert_eq!(state.skill_form, SkillForm::default());
        assert!(state.editing_skill.is_none());
    }

    #[test]
    fn error_messages_are_flagged() {
        let mut state = DashboardState::default();
        state.message = "Error deleting skill: nope".into();
        assert!(state.message_is_error());
        state.message = "Skill deleted successfully!".into();
        assert!(!state.message_is_error());
    }
}
