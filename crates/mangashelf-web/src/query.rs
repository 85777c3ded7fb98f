use mangashelf_schema::*;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::utils::{api_url, token};

const SESSION_EXPIRED: &str = "session expired, please log in again";
const INVALID_RESPONSE: &str = "unexpected response from server";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("connection error, try again")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{reason}")]
    Api { status: u16, reason: String },
}

impl QueryError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, QueryError::Unauthorized(_))
    }
}

fn with_token(req: RequestBuilder) -> RequestBuilder {
    match token() {
        Some(token) => req.header("Authorization", format!("Bearer {}", token)),
        None => req,
    }
}

/// Turns a failed response into an error. 401 and 403 both mean the session
/// is gone, whatever the body says.
fn classify(status: u16, body: ErrorResponse) -> QueryError {
    if status == StatusCode::UNAUTHORIZED.as_u16() || status == StatusCode::FORBIDDEN.as_u16() {
        return QueryError::Unauthorized(body.reason().unwrap_or(SESSION_EXPIRED).to_string());
    }

    QueryError::Api {
        status,
        reason: body
            .reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {}", status)),
    }
}

fn decode_body<T>(status: u16, body: &[u8]) -> Result<T, QueryError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|e| {
        warn!("unreadable response body (status {}): {}", status, e);
        QueryError::Api {
            status,
            reason: INVALID_RESPONSE.to_string(),
        }
    })
}

async fn send<T>(req: RequestBuilder) -> Result<T, QueryError>
where
    T: DeserializeOwned,
{
    let res = with_token(req).send().await?;
    let status = res.status();
    let body = res.bytes().await?;

    if status.is_success() {
        return decode_body(status.as_u16(), &body);
    }

    // a body that fails to parse still carries the status
    Err(classify(
        status.as_u16(),
        serde_json::from_slice(&body).unwrap_or_default(),
    ))
}

fn get(path: &str) -> RequestBuilder {
    reqwest::Client::new().get(api_url(path))
}

fn post(path: &str) -> RequestBuilder {
    reqwest::Client::new()
        .post(api_url(path))
        .header("Content-Type", "application/json")
}

pub async fn user_login(username: String, password: String) -> Result<LoginResponse, QueryError> {
    send(post("/api/auth/login").json(&LoginRequest { username, password })).await
}

pub async fn user_register(
    username: String,
    email: String,
    password: String,
) -> Result<RegisterResponse, QueryError> {
    send(post("/api/auth/register").json(&RegisterRequest {
        username,
        email,
        password,
    }))
    .await
}

pub async fn user_logout() -> Result<MessageResponse, QueryError> {
    send(post("/api/auth/logout")).await
}

pub async fn fetch_me() -> Result<User, QueryError> {
    let res: UserResponse = send(get("/api/auth/user")).await?;
    Ok(res.user)
}

pub async fn fetch_manga_list() -> Result<Vec<Manga>, QueryError> {
    send(get("/api/mangas/list")).await
}

pub async fn fetch_manga(id: i64) -> Result<Manga, QueryError> {
    send(get(&format!("/api/mangas/{}", id))).await
}

pub async fn mark_manga_viewed(id: i64) -> Result<ViewedManga, QueryError> {
    send(post(&format!("/api/mangas/{}/view", id))).await
}

pub async fn fetch_manga_images(id: i64) -> Result<MangaImages, QueryError> {
    send(get(&format!("/api/mangas/{}/images", id))).await
}

/// The server answers refresh failures with `success: false` and a 500, so
/// the body is decoded regardless of status.
pub async fn refresh_library() -> Result<RefreshLibraryResponse, QueryError> {
    let res = with_token(post("/api/refresh-library")).send().await?;
    let status = res.status();
    let body = res.bytes().await?;
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(classify(
            status.as_u16(),
            serde_json::from_slice(&body).unwrap_or_default(),
        ));
    }

    decode_body(status.as_u16(), &body)
}

pub async fn fetch_settings() -> Result<SettingsResponse, QueryError> {
    send(get("/api/settings")).await
}

pub async fn update_manga_directory(directory: String) -> Result<UpdateSettingsResponse, QueryError> {
    send(post("/api/settings").json(&UpdateSettingsRequest {
        manga_directory: directory,
    }))
    .await
}

pub async fn validate_directory(directory: String) -> Result<DirectoryValidation, QueryError> {
    send(post("/api/settings/validate-directory").json(&ValidateDirectoryRequest { directory }))
        .await
}

#[cfg(test)]
mod test {
    use super::*;

    fn error_body(message: Option<&str>, error: Option<&str>) -> ErrorResponse {
        ErrorResponse {
            message: message.map(str::to_string),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_classify_unauthorized() {
        let err = classify(401, error_body(Some("Token is missing"), None));
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Token is missing");

        let err = classify(403, error_body(Some("Token is invalid"), None));
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Token is invalid");

        let err = classify(401, ErrorResponse::default());
        assert_eq!(err.to_string(), SESSION_EXPIRED);
    }

    #[test]
    fn test_classify_api_errors() {
        let err = classify(500, error_body(None, Some("Error loading manga")));
        assert!(matches!(err, QueryError::Api { status: 500, .. }));
        assert_eq!(err.to_string(), "Error loading manga");

        let err = classify(400, error_body(Some("Username already exists"), None));
        assert!(matches!(err, QueryError::Api { status: 400, .. }));
        assert_eq!(err.to_string(), "Username already exists");

        let err = classify(502, ErrorResponse::default());
        assert!(!err.is_unauthorized());
        assert_eq!(err.to_string(), "request failed with status 502");
    }

    #[test]
    fn test_decode_body_mismatch_is_not_a_network_error() {
        let res = decode_body::<Vec<Manga>>(200, br#"{"error": "not a list"}"#);
        match res {
            Err(QueryError::Api { status, reason }) => {
                assert_eq!(status, 200);
                assert_eq!(reason, INVALID_RESPONSE);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let res = decode_body::<RefreshLibraryResponse>(500, br#"{"success": false, "error": "Import script failed"}"#);
        assert_eq!(res.unwrap().error.as_deref(), Some("Import script failed"));
    }

    #[test]
    fn test_decode_view_response() {
        let viewed = decode_body::<ViewedManga>(
            200,
            br#"{"id": 3, "title": "Blame!", "genres": "Sci-Fi,Horror", "tags": "", "views": 11}"#,
        )
        .unwrap();
        assert_eq!(viewed.views, 11);
    }
}
