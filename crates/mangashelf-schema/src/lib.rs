pub mod model;

use serde::{Deserialize, Serialize};

pub use model::{Manga, MangaImage, Setting, User, ViewedManga};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub message: String,
    pub user: Option<User>,
    /// Present when the server hands the session token to the client instead
    /// of (or in addition to) setting a cookie.
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterResponse {
    pub message: String,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RefreshLibraryResponse {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub total_mangas: Option<i64>,
    pub output: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MangaImages {
    #[serde(default)]
    pub images: Vec<MangaImage>,
    #[serde(rename = "totalPages", default)]
    pub total_pages: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsResponse {
    pub success: bool,
    pub settings: Vec<Setting>,
    pub error: Option<String>,
}

impl SettingsResponse {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings
            .iter()
            .find(|setting| setting.key == key)
            .map(|setting| setting.value.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateSettingsRequest {
    pub manga_directory: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSettingsResponse {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub updated_settings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateDirectoryRequest {
    pub directory: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DirectoryValidation {
    pub success: bool,
    pub directory: Option<String>,
    pub manga_folders: Option<i64>,
    pub image_count: Option<i64>,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Body of a failed request. Auth endpoints report `message`, everything
/// else reports `error`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn reason(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|reason| !reason.is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_reason_prefers_error_key() {
        let body: ErrorResponse = serde_json::from_value(json!({
            "error": "Manga not found",
            "message": "ignored"
        }))
        .unwrap();
        assert_eq!(body.reason(), Some("Manga not found"));

        let body: ErrorResponse =
            serde_json::from_value(json!({ "message": "Incorrect password" })).unwrap();
        assert_eq!(body.reason(), Some("Incorrect password"));

        let body: ErrorResponse = serde_json::from_value(json!({ "message": "" })).unwrap();
        assert_eq!(body.reason(), None);
    }

    #[test]
    fn test_login_response_without_token() {
        let body: LoginResponse = serde_json::from_value(json!({
            "message": "Login successful",
            "user": { "username": "ayase" }
        }))
        .unwrap();

        assert_eq!(body.token, None);
        assert_eq!(body.user.unwrap().username, "ayase");
    }

    #[test]
    fn test_refresh_failure() {
        let body: RefreshLibraryResponse = serde_json::from_value(json!({
            "success": false,
            "error": "Import script failed",
            "details": "Traceback ..."
        }))
        .unwrap();

        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Import script failed"));
        assert_eq!(body.total_mangas, None);
    }

    #[test]
    fn test_manga_images_total_pages() {
        let body: MangaImages = serde_json::from_value(json!({
            "images": [
                { "filename": "001.jpg", "url": "/manga/one-piece/001.jpg" },
                { "filename": "002.jpg", "url": "/manga/one-piece/002.jpg" }
            ],
            "totalPages": 2
        }))
        .unwrap();

        assert_eq!(body.total_pages, 2);
        assert_eq!(body.images[1].url, "/manga/one-piece/002.jpg");
    }

    #[test]
    fn test_settings_lookup() {
        let body: SettingsResponse = serde_json::from_value(json!({
            "success": true,
            "settings": [
                { "key": "manga_directory", "value": "/srv/manga", "description": "Manga folder" },
                { "key": "theme", "value": "dark" }
            ]
        }))
        .unwrap();

        assert_eq!(body.get("manga_directory"), Some("/srv/manga"));
        assert_eq!(body.get("missing"), None);
    }

    #[test]
    fn test_register_request_omits_confirmation() {
        let body = serde_json::to_value(RegisterRequest {
            username: "ayase".to_string(),
            email: "ayase@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({ "username": "ayase", "email": "ayase@example.com", "password": "secret1" })
        );
    }
}
