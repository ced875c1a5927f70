//! Request/Response DTOs

use folio_db::{NewBlogPost, NewContactMessage, NewExperience, NewProject, NewSkill};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ==================== Auth Types ====================

/// Login form (OAuth2 password-flow field names)
#[derive(Deserialize)]
pub struct LoginForm {
    /// Administrator email
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Authenticated administrator
#[derive(Serialize, Deserialize)]
pub struct MeResponse {
    pub email: String,
}

// ==================== Generic Responses ====================

/// Plain acknowledgement
#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Acknowledgement for a newly created record
#[derive(Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: String,
}

// ==================== Content Types ====================

/// Project create/update request
#[derive(Deserialize)]
pub struct ProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl ProjectRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("title", &self.title, MAX_TITLE_LENGTH)?;
        require_text("description", &self.description, MAX_BODY_LENGTH)
    }
}

impl From<ProjectRequest> for NewProject {
    fn from(req: ProjectRequest) -> Self {
        NewProject {
            title: req.title,
            description: req.description,
            technologies: req.technologies,
            image_url: req.image_url,
            github_url: req.github_url,
            live_url: req.live_url,
            featured: req.featured,
            created_at: None,
        }
    }
}

/// Blog post create/update request
#[derive(Deserialize)]
pub struct BlogPostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
}

impl BlogPostRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("title", &self.title, MAX_TITLE_LENGTH)?;
        require_text("content", &self.content, MAX_BODY_LENGTH)?;
        require_text("excerpt", &self.excerpt, MAX_BODY_LENGTH)
    }
}

impl From<BlogPostRequest> for NewBlogPost {
    fn from(req: BlogPostRequest) -> Self {
        NewBlogPost {
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            image_url: req.image_url,
            tags: req.tags,
            published: req.published,
            created_at: None,
        }
    }
}

/// Skill create request
#[derive(Deserialize)]
pub struct SkillRequest {
    pub name: String,
    pub category: String,
    pub level: i64,
    #[serde(default)]
    pub icon: Option<String>,
}

impl SkillRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("name", &self.name, MAX_TITLE_LENGTH)?;
        require_text("category", &self.category, MAX_TITLE_LENGTH)?;
        if !(1..=5).contains(&self.level) {
            return Err(ApiError::BadRequest(
                "level must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<SkillRequest> for NewSkill {
    fn from(req: SkillRequest) -> Self {
        NewSkill {
            name: req.name,
            category: req.category,
            level: req.level,
            icon: req.icon,
        }
    }
}

/// Experience create request
#[derive(Deserialize)]
pub struct ExperienceRequest {
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl ExperienceRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("company", &self.company, MAX_TITLE_LENGTH)?;
        require_text("position", &self.position, MAX_TITLE_LENGTH)?;
        require_text("description", &self.description, MAX_BODY_LENGTH)?;
        require_text("start_date", &self.start_date, MAX_TITLE_LENGTH)
    }
}

impl From<ExperienceRequest> for NewExperience {
    fn from(req: ExperienceRequest) -> Self {
        NewExperience {
            company: req.company,
            position: req.position,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            technologies: req.technologies,
        }
    }
}

/// Public contact form submission
#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Subject used when the visitor leaves it blank
pub const DEFAULT_CONTACT_SUBJECT: &str = "Portfolio Contact";

impl ContactRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("name", &self.name, MAX_TITLE_LENGTH)?;
        require_text("message", &self.message, MAX_BODY_LENGTH)?;
        if !is_plausible_email(&self.email) {
            return Err(ApiError::BadRequest("email is not a valid address".to_string()));
        }
        if let Some(subject) = &self.subject
            && subject.len() > MAX_TITLE_LENGTH
        {
            return Err(ApiError::BadRequest(format!(
                "subject exceeds maximum length of {} characters",
                MAX_TITLE_LENGTH
            )));
        }
        Ok(())
    }
}

impl From<ContactRequest> for NewContactMessage {
    fn from(req: ContactRequest) -> Self {
        let subject = req
            .subject
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTACT_SUBJECT.to_string());

        NewContactMessage {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            message: req.message,
            subject,
        }
    }
}

// ==================== Input Validation ====================

/// Maximum length of short text fields
const MAX_TITLE_LENGTH: usize = 200;
/// Maximum length of long text fields
const MAX_BODY_LENGTH: usize = 100_000;

/// Require a non-blank field within a length limit
fn require_text(field: &str, value: &str, max: usize) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} cannot be empty", field)));
    }
    if value.len() > max {
        return Err(ApiError::BadRequest(format!(
            "{} exceeds maximum length of {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Loose address check: one `@`, non-empty local part, dotted domain
fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
