use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const GUEST_USER: &str = "guest";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SaveProjectRequest {
    pub user_id: String,
    pub project_name: String,
    /// Opaque room geometry, stored by the backend as-is.
    pub geometry_data: String,
    pub final_image_url: String,
}

impl SaveProjectRequest {
    pub fn new(project_name: impl Into<String>, final_image_url: impl Into<String>) -> Self {
        Self {
            user_id: GUEST_USER.to_string(),
            project_name: project_name.into(),
            geometry_data: String::new(),
            final_image_url: final_image_url.into(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_geometry(mut self, geometry_data: impl Into<String>) -> Self {
        self.geometry_data = geometry_data.into();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedProject {
    pub message: String,
    pub project_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: u64,
    pub user_id: String,
    pub project_name: String,
    #[serde(default)]
    pub geometry_data: String,
    pub final_image_url: String,
    pub created_at: NaiveDateTime,
}
