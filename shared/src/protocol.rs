use crate::{API_PREFIX, User, UserUpdate};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// 该方法是否携带 JSON 请求体
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Concrete path for this request. Endpoints with path parameters override it.
    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed(Self::PATH)
    }

    /// Whether the request is sent with a JSON body. Defaults to the method's convention.
    fn has_body(&self) -> bool {
        Self::METHOD.has_body()
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// Exchange credentials for a bearer token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The backend replies with `{"token": "..."}`; extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/api/v1/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Create an account. Registration does not log the user in.
///
/// Any 2xx counts as success; the created user in the reply is informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl ApiRequest for RegisterRequest {
    type Response = User;
    const PATH: &'static str = "/api/v1/register";
    const METHOD: HttpMethod = HttpMethod::Post;
}

fn user_path(id: u64) -> Cow<'static, str> {
    Cow::Owned(format!("{}/users/{}", API_PREFIX, id))
}

/// Fetch one user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserRequest {
    pub id: u64,
}

impl ApiRequest for GetUserRequest {
    type Response = User;
    const PATH: &'static str = "/api/v1/users/:id";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> Cow<'static, str> {
        user_path(self.id)
    }
}

/// Replace the fields of a user; only the update is sent as the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(skip)]
    pub id: u64,
    #[serde(flatten)]
    pub update: UserUpdate,
}

impl ApiRequest for UpdateUserRequest {
    type Response = User;
    const PATH: &'static str = "/api/v1/users/:id";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> Cow<'static, str> {
        user_path(self.id)
    }
}

/// Soft-delete a user. The backend answers 204 with no body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub id: u64,
}

impl ApiRequest for DeleteUserRequest {
    type Response = ();
    const PATH: &'static str = "/api/v1/users/:id";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> Cow<'static, str> {
        user_path(self.id)
    }
}

/// Undo a soft delete. The backend reads nothing but the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreUserRequest {
    pub id: u64,
}

impl ApiRequest for RestoreUserRequest {
    type Response = ();
    const PATH: &'static str = "/api/v1/users/:id";
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> Cow<'static, str> {
        user_path(self.id)
    }

    fn has_body(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterised_paths() {
        assert_eq!(GetUserRequest { id: 3 }.path(), "/api/v1/users/3");
        assert_eq!(DeleteUserRequest { id: 9 }.path(), "/api/v1/users/9");
        assert_eq!(LoginRequest { username: "a".into(), password: "b".into() }.path(), "/api/v1/login");
    }

    #[test]
    fn update_request_body_omits_id() {
        let req = UpdateUserRequest {
            id: 4,
            update: UserUpdate {
                phone: Some("123".into()),
                ..Default::default()
            },
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"phone":"123"}"#);
        assert_eq!(req.path(), "/api/v1/users/4");
    }

    #[test]
    fn only_writes_carry_a_body() {
        assert!(LoginRequest::METHOD.has_body());
        assert!(UpdateUserRequest::METHOD.has_body());
        assert!(!GetUserRequest::METHOD.has_body());
        assert!(!DeleteUserRequest::METHOD.has_body());
    }

    #[test]
    fn restore_is_a_bodyless_patch() {
        let req = RestoreUserRequest { id: 6 };
        assert_eq!(RestoreUserRequest::METHOD, HttpMethod::Patch);
        assert!(!req.has_body());
        assert_eq!(req.path(), "/api/v1/users/6");
    }

    #[test]
    fn login_response_ignores_extra_fields() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"token":"abc","expires_in":86400}"#).unwrap();
        assert_eq!(resp.token, "abc");
    }
}
