//! # Portfolio content endpoints
//!
//! Typed wrappers around the backend's CRUD routes. Reads are public; writes
//! need the admin's bearer token, which the caller attaches with
//! [`ApiClient::with_bearer`].
//!
//! | Method | Route |
//! |--------|-------|
//! | `get_skills` / `get_skill` | `GET /skills`, `GET /skills/:id` |
//! | `create_skill` / `update_skill` / `delete_skill` | `POST /skills`, `PUT /skills/:id`, `DELETE /skills/:id` |
//! | `get_projects` / `get_project` | `GET /projects`, `GET /projects/:id` |
//! | `create_project` / `update_project` / `delete_project` | `POST /projects`, `PUT /projects/:id`, `DELETE /projects/:id` |
//! | `get_about` / `update_about` | `GET /about`, `PUT /about` |
//! | `upload_about_image` | `POST /about/upload-image` (multipart `image`) |
//! | `upload_image` | `POST /upload` (multipart `image`) |
//! | `get_contacts` / `submit_contact` / `delete_contact` | `GET /contact`, `POST /contact`, `DELETE /contact/:id` |
//!
//! Every response is resolved through [`crate::envelope`] and image URLs are
//! rewritten through [`crate::images`] before records are returned.
//!
//! [`ContentApi`] is the subset the admin dashboard drives. It exists so the
//! dashboard workflows can run against a scripted backend in tests.

use std::future::Future;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use store::{About, AboutDraft, Contact, ContactDraft, Project, ProjectDraft, Skill, SkillDraft};

use crate::client::ApiClient;
use crate::envelope::{self, CONTACTS_KEY, PROJECTS_KEY, SKILLS_KEY};
use crate::error::ApiError;
use crate::images::{ImageRewriter, RewriteImages};
use crate::models::ImageUpload;

/// Data operations used by the admin dashboard.
pub trait ContentApi {
    fn get_skills(&self) -> impl Future<Output = Result<Vec<Skill>, ApiError>>;
    fn create_skill(&self, draft: &SkillDraft) -> impl Future<Output = Result<(), ApiError>>;
    fn update_skill(
        &self,
        id: &str,
        draft: &SkillDraft,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn delete_skill(&self, id: &str) -> impl Future<Output = Result<(), ApiError>>;

    fn get_projects(&self) -> impl Future<Output = Result<Vec<Project>, ApiError>>;
    fn create_project(&self, draft: &ProjectDraft)
        -> impl Future<Output = Result<(), ApiError>>;
    fn update_project(
        &self,
        id: &str,
        draft: &ProjectDraft,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn delete_project(&self, id: &str) -> impl Future<Output = Result<(), ApiError>>;

    fn get_about(&self) -> impl Future<Output = Result<Option<About>, ApiError>>;
    fn update_about(&self, draft: &AboutDraft) -> impl Future<Output = Result<(), ApiError>>;
    fn upload_about_image(
        &self,
        file: &ImageUpload,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn get_contacts(&self) -> impl Future<Output = Result<Vec<Contact>, ApiError>>;
    fn delete_contact(&self, id: &str) -> impl Future<Output = Result<(), ApiError>>;
}

/// Body of `POST /upload`: the stored URL, under whichever key the backend uses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

/// Multipart field the backend reads uploaded files from.
const IMAGE_FIELD: &str = "image";

/// One content call: its route, its method and the body it carries.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ContentRequest<'a> {
    Skills,
    Skill(&'a str),
    CreateSkill(&'a SkillDraft),
    UpdateSkill(&'a str, &'a SkillDraft),
    DeleteSkill(&'a str),
    Projects,
    Project(&'a str),
    CreateProject(&'a ProjectDraft),
    UpdateProject(&'a str, &'a ProjectDraft),
    DeleteProject(&'a str),
    About,
    UpdateAbout(&'a AboutDraft),
    UploadAboutImage(&'a ImageUpload),
    UploadImage(&'a ImageUpload),
    Contacts,
    SubmitContact(&'a ContactDraft),
    DeleteContact(&'a str),
}

impl ContentRequest<'_> {
    pub(crate) fn route(&self) -> (Method, String) {
        match self {
            Self::Skills => (Method::GET, "skills".into()),
            Self::Skill(id) => (Method::GET, format!("skills/{id}")),
            Self::CreateSkill(_) => (Method::POST, "skills".into()),
            Self::UpdateSkill(id, _) => (Method::PUT, format!("skills/{id}")),
            Self::DeleteSkill(id) => (Method::DELETE, format!("skills/{id}")),
            Self::Projects => (Method::GET, "projects".into()),
            Self::Project(id) => (Method::GET, format!("projects/{id}")),
            Self::CreateProject(_) => (Method::POST, "projects".into()),
            Self::UpdateProject(id, _) => (Method::PUT, format!("projects/{id}")),
            Self::DeleteProject(id) => (Method::DELETE, format!("projects/{id}")),
            Self::About => (Method::GET, "about".into()),
            Self::UpdateAbout(_) => (Method::PUT, "about".into()),
            Self::UploadAboutImage(_) => (Method::POST, "about/upload-image".into()),
            Self::UploadImage(_) => (Method::POST, "upload".into()),
            Self::Contacts => (Method::GET, "contact".into()),
            Self::SubmitContact(_) => (Method::POST, "contact".into()),
            Self::DeleteContact(id) => (Method::DELETE, format!("contact/{id}")),
        }
    }

    /// Build the request on `client`, bearer included.
    pub(crate) fn build(&self, client: &ApiClient) -> Result<RequestBuilder, ApiError> {
        let (method, path) = self.route();
        let request = client.request(method, &path);
        Ok(match *self {
            Self::CreateSkill(draft) | Self::UpdateSkill(_, draft) => request.json(draft),
            Self::CreateProject(draft) | Self::UpdateProject(_, draft) => request.json(draft),
            Self::UpdateAbout(draft) => request.json(draft),
            Self::SubmitContact(draft) => request.json(draft),
            Self::UploadAboutImage(file) | Self::UploadImage(file) => {
                request.multipart(image_form(file)?)
            }
            Self::Skills
            | Self::Skill(_)
            | Self::DeleteSkill(_)
            | Self::Projects
            | Self::Project(_)
            | Self::DeleteProject(_)
            | Self::About
            | Self::Contacts
            | Self::DeleteContact(_) => request,
        })
    }
}

fn image_form(file: &ImageUpload) -> Result<Form, ApiError> {
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime)
        .map_err(|e| ApiError::Decode(format!("invalid MIME type {}: {e}", file.mime)))?;
    Ok(Form::new().part(IMAGE_FIELD, part))
}

impl ApiClient {
    async fn call(&self, request: ContentRequest<'_>) -> Result<Value, ApiError> {
        self.send(request.build(self)?).await
    }

    pub async fn get_skills(&self) -> Result<Vec<Skill>, ApiError> {
        let body = self.call(ContentRequest::Skills).await?;
        let skills: Vec<Skill> = envelope::decode_list(body, SKILLS_KEY)?;
        Ok(skills.rewrite_images(self.images()))
    }

    pub async fn get_skill(&self, id: &str) -> Result<Option<Skill>, ApiError> {
        let body = self.call(ContentRequest::Skill(id)).await?;
        let skill: Option<Skill> = decode_one(body)?;
        Ok(skill.rewrite_images(self.images()))
    }

    pub async fn create_skill(&self, draft: &SkillDraft) -> Result<(), ApiError> {
        let body = self.call(ContentRequest::CreateSkill(draft)).await?;
        envelope::decode_ack(body)
    }

    pub async fn update_skill(&self, id: &str, draft: &SkillDraft) -> Result<(), ApiError> {
        let body = self.call(ContentRequest::UpdateSkill(id, draft)).await?;
        envelope::decode_ack(body)
    }

    pub async fn delete_skill(&self, id: &str) -> Result<(), ApiError> {
        let body = self.call(ContentRequest::DeleteSkill(id)).await?;
        envelope::decode_ack(body)
    }

    pub async fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        let body = self.call(ContentRequest::Projects).await?;
        let projects: Vec<Project> = envelope::decode_list(body, PROJECTS_KEY)?;
        Ok(projects.rewrite_images(self.images()))
    }

    pub async fn get_project(&self, id: &str) -> Result<Option<Project>, ApiError> {
        let body = self.call(ContentRequest::Project(id)).await?;
        let project: Option<Project> = decode_one(body)?;
        Ok(project.rewrite_images(self.images()))
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<(), ApiError> {
        let body = self.call(ContentRequest::CreateProject(draft)).await?;
        envelope::decode_ack(body)
    }

    pub async fn update_project(&self, id: &str, draft: &ProjectDraft) -> Result<(), ApiError> {
        let body = self.call(ContentRequest::UpdateProject(id, draft)).await?;
        envelope::decode_ack(body)
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        let body = self.call(ContentRequest::DeleteProject(id)).await?;
        envelope::decode_ack(body)
    }

    pub async fn get_about(&self) -> Result<Option<About>, ApiError> {
        let body = self.call(ContentRequest::About).await?;
        let about: Option<About> = envelope::decode_single(body)?;
        Ok(about.rewrite_images(self.images()))
    }

    pub async fn update_about(&self, draft: &AboutDraft) -> Result<(), ApiError> {
        let body = self.call(ContentRequest::UpdateAbout(draft)).await?;
        envelope::decode_ack(body)
    }

    pub async fn upload_about_image(&self, file: &ImageUpload) -> Result<(), ApiError> {
        let body = self.call(ContentRequest::UploadAboutImage(file)).await?;
        envelope::decode_ack(body)
    }

    /// Upload a standalone image and return the URL the backend stored it under.
    pub async fn upload_image(&self, file: &ImageUpload) -> Result<Option<String>, ApiError> {
        let body = self.call(ContentRequest::UploadImage(file)).await?;
        uploaded_url(body, self.images())
    }

    pub async fn get_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let body = self.call(ContentRequest::Contacts).await?;
        envelope::decode_list(body, CONTACTS_KEY)
    }

    pub async fn submit_contact(&self, draft: &ContactDraft) -> Result<(), ApiError> {
        let body = self.call(ContentRequest::SubmitContact(draft)).await?;
        envelope::decode_ack(body)
    }

    pub async fn delete_contact(&self, id: &str) -> Result<(), ApiError> {
        let body = self.call(ContentRequest::DeleteContact(id)).await?;
        envelope::decode_ack(body)
    }
}

/// Single records come either bare or as `{data: ...}`.
fn decode_one<T: serde::de::DeserializeOwned>(body: Value) -> Result<Option<T>, ApiError> {
    let wrapped = body
        .as_object()
        .is_some_and(|map| map.contains_key("data") || map.contains_key("success"));
    if wrapped {
        envelope::decode_single(body)
    } else if body.is_null() {
        Ok(None)
    } else {
        Ok(Some(serde_json::from_value(body)?))
    }
}

fn uploaded_url(body: Value, images: &ImageRewriter) -> Result<Option<String>, ApiError> {
    envelope::decode_ack(body.clone())?;
    let uploaded: UploadResponse = match body {
        Value::Object(_) => serde_json::from_value(body)?,
        _ => return Ok(None),
    };
    Ok(images.rewrite(uploaded.url.or(uploaded.image_url)))
}

impl ContentApi for ApiClient {
    async fn get_skills(&self) -> Result<Vec<Skill>, ApiError> {
        ApiClient::get_skills(self).await
    }

    async fn create_skill(&self, draft: &SkillDraft) -> Result<(), ApiError> {
        ApiClient::create_skill(self, draft).await
    }

    async fn update_skill(&self, id: &str, draft: &SkillDraft) -> Result<(), ApiError> {
        ApiClient::update_skill(self, id, draft).await
    }

    async fn delete_skill(&self, id: &str) -> Result<(), ApiError> {
        ApiClient::delete_skill(self, id).await
    }

    async fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        ApiClient::get_projects(self).await
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<(), ApiError> {
        ApiClient::create_project(self, draft).await
    }

    async fn update_project(&self, id: &str, draft: &ProjectDraft) -> Result<(), ApiError> {
        ApiClient::update_project(self, id, draft).await
    }

    async fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        ApiClient::delete_project(self, id).await
    }

    async fn get_about(&self) -> Result<Option<About>, ApiError> {
        ApiClient::get_about(self).await
    }

    async fn update_about(&self, draft: &AboutDraft) -> Result<(), ApiError> {
        ApiClient::update_about(self, draft).await
    }

    async fn upload_about_image(&self, file: &ImageUpload) -> Result<(), ApiError> {
        ApiClient::upload_about_image(self, file).await
    }

    async fn get_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        ApiClient::get_contacts(self).await
    }

    async fn delete_contact(&self, id: &str) -> Result<(), ApiError> {
        ApiClient::delete_contact(self, id).await
    }
}
