//! Form models behind the login page and the dashboard editors.
//!
//! Each form holds the raw text of its inputs and turns it into a typed
//! payload with `validate`, which is the only place input rules live.

use api::LoginCredentials;
use store::{About, AboutDraft, Project, ProjectDraft, Skill, SkillDraft};
use thiserror::Error;

pub const PASSWORD_MIN_LEN: usize = 5;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// `local@domain`, no whitespace, domain labels non-empty.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').all(|label| !label.is_empty())
}

/// Split a comma-separated technology list, trimming and dropping empties.
pub fn split_technologies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub show_password: bool,
}

impl LoginForm {
    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn password_input_type(&self) -> &'static str {
        if self.show_password {
            "text"
        } else {
            "password"
        }
    }

    pub fn validate(&self) -> Result<LoginCredentials, FormError> {
        if self.email.is_empty() {
            return Err(FormError::Required("Email"));
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(FormError::Required("Password"));
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(FormError::TooShort {
                field: "Password",
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(LoginCredentials::new(self.email.clone(), self.password.clone()))
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillForm {
    pub name: String,
    pub level: String,
    pub category: String,
    pub icon_url: String,
}

impl SkillForm {
    pub fn from_skill(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            level: skill.level.clone(),
            category: skill.category.clone().unwrap_or_default(),
            icon_url: skill.icon_url.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<SkillDraft, FormError> {
        Ok(SkillDraft {
            name: required("Name", &self.name)?,
            level: required("Level", &self.level)?,
            category: required("Category", &self.category)?,
            icon_url: optional(&self.icon_url),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    /// Comma-separated, as typed.
    pub technologies: String,
    pub image_url: String,
    pub link: String,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            technologies: project.technologies.join(", "),
            image_url: project.image_url.clone().unwrap_or_default(),
            link: project.link.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ProjectDraft, FormError> {
        Ok(ProjectDraft {
            title: required("Title", &self.title)?,
            description: required("Description", &self.description)?,
            technologies: split_technologies(&self.technologies),
            image_url: optional(&self.image_url),
            link: optional(&self.link),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AboutForm {
    pub description: String,
}

impl AboutForm {
    pub fn from_about(about: &About) -> Self {
        Self {
            description: about.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<AboutDraft, FormError> {
        Ok(AboutDraft {
            description: required("Description", &self.description)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@b.com", true)]
    #[case("admin@example.co.uk", true)]
    #[case("a@b", true)]
    #[case("", false)]
    #[case("ab.com", false)]
    #[case("@b.com", false)]
    #[case("a@", false)]
    #[case("a@@b.com", false)]
    #[case("a b@c.com", false)]
    #[case("a@b..com", false)]
    fn email_format(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(is_valid_email(email), valid);
    }

    #[test]
    fn login_form_rules() {
        let mut form = LoginForm::default();
        assert_eq!(form.validate(), Err(FormError::Required("Email")));

        form.email = "not-an-email".into();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));

        form.email = "a@b.com".into();
        form.password = "abcd".into();
        assert_eq!(
            form.validate(),
            Err(FormError::TooShort {
                field: "Password",
                min: 5
            })
        );

        form.password = "abcde".into();
        let credentials = form.validate().unwrap();
        assert_eq!(credentials.email, "a@b.com");
        assert_eq!(credentials.password, "abcde");
    }

    #[test]
    fn password_visibility_toggles() {
        let mut form = LoginForm::default();
        assert_eq!(form.password_input_type(), "password");
        form.toggle_password_visibility();
        assert_eq!(form.password_input_type(), "text");
        form.toggle_password_visibility();
        assert_eq!(form.password_input_type(), "password");
    }

    #[test]
    fn skill_form_requires_name_level_category() {
        let mut form = SkillForm {
            name: "Rust".into(),
            level: "Expert".into(),
            ..SkillForm::default()
        };
        assert_eq!(form.validate(), Err(FormError::Required("Category")));

        form.category = "Languages".into();
        form.icon_url = "  ".into();
        let draft = form.validate().unwrap();
        assert_eq!(draft.category, "Languages");
        assert_eq!(draft.icon_url, None);
    }

    #[rstest]
    #[case("Angular, Node , ,MongoDB", &["Angular", "Node", "MongoDB"])]
    #[case("", &[])]
    #[case("Rust", &["Rust"])]
    fn technologies_are_split_and_trimmed(#[case] raw: &str, #[case] expected: &[&str]) {
        assert_eq!(split_technologies(raw), expected);
    }

    #[test]
    fn project_form_round_trips_existing_project() {
        let project = Project {
            id: "p1".into(),
            title: "Site".into(),
            description: "Portfolio".into(),
            technologies: vec!["Angular".into(), "Node".into()],
            image_url: None,
            link: Some("https://x.dev".into()),
            project_url: None,
            github_url: None,
            created_at: None,
        };
        let form = ProjectForm::from_project(&project);
        assert_eq!(form.technologies, "Angular, Node");

        let draft = form.validate().unwrap();
        assert_eq!(draft.technologies, project.technologies);
        assert_eq!(draft.link.as_deref(), Some("https://x.dev"));
        assert_eq!(draft.image_url, None);
    }

    #[test]
    fn about_form_requires_description() {
        assert_eq!(
            AboutForm::default().validate(),
            Err(FormError::Required("Description"))
        );
    }
}
