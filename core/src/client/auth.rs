use tracing::warn;

use super::{build_request, json_body, parse_json, resource_url};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, RequestBody};
use crate::registry::{Endpoint, Resource};
use crate::session::{SessionContext, SessionError, Synced};
use crate::types::{
    LoginUser, MessageResponse, ProfileUpdate, RegisterUser, UserResponse,
};

/// Client for `/api/v1/user`: registration, login and the profile.
///
/// Login, logout and load-user keep a `SessionContext` in step with the
/// server and report the outcome through `Synced`.
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: resource_url(base_url, Resource::User),
        }
    }

    pub fn build_register_user(&self, input: &RegisterUser) -> Result<HttpRequest, ApiError> {
        Ok(build_request(
            &self.base_url,
            Endpoint::RegisterUser,
            "",
            Some(json_body(input)?),
        ))
    }

    pub fn build_login_user(&self, input: &LoginUser) -> Result<HttpRequest, ApiError> {
        Ok(build_request(
            &self.base_url,
            Endpoint::LoginUser,
            "",
            Some(json_body(input)?),
        ))
    }

    pub fn build_logout_user(&self) -> HttpRequest {
        build_request(&self.base_url, Endpoint::LogoutUser, "", None)
    }

    pub fn build_load_user(&self) -> HttpRequest {
        build_request(&self.base_url, Endpoint::LoadUser, "", None)
    }

    /// JSON fields get a JSON content-type; form data leaves it to the host.
    pub fn build_update_user(&self, input: &ProfileUpdate) -> Result<HttpRequest, ApiError> {
        let body = match input {
            ProfileUpdate::Json(fields) => json_body(fields)?,
            ProfileUpdate::Form(form) => RequestBody::Multipart(form.clone()),
        };
        Ok(build_request(
            &self.base_url,
            Endpoint::UpdateUser,
            "",
            Some(body),
        ))
    }

    pub fn parse_register_user(&self, response: HttpResponse) -> Result<MessageResponse, ApiError> {
        parse_json(&response)
    }

    /// On success, stores the returned user in `session`.
    pub fn parse_login_user(
        &self,
        response: HttpResponse,
        session: &SessionContext,
    ) -> Result<Synced<UserResponse>, ApiError> {
        let data: UserResponse = parse_json(&response)?;
        let session = store_user(&data, session);
        Ok(Synced { data, session })
    }

    /// Clears `session` whatever the server answered: the client drops its
    /// view of the session as soon as logout is requested.
    pub fn parse_logout_user(
        &self,
        response: HttpResponse,
        session: &SessionContext,
    ) -> Result<Synced<MessageResponse>, ApiError> {
        let cleared = session.clear();
        if let Err(e) = &cleared {
            warn!(error = %e, "failed to clear session on logout");
        }
        let data = parse_json(&response)?;
        Ok(Synced {
            data,
            session: cleared,
        })
    }

    /// Same session effect as `parse_login_user`.
    pub fn parse_load_user(
        &self,
        response: HttpResponse,
        session: &SessionContext,
    ) -> Result<Synced<UserResponse>, ApiError> {
        let data: UserResponse = parse_json(&response)?;
        let session = store_user(&data, session);
        Ok(Synced { data, session })
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<UserResponse, ApiError> {
        parse_json(&response)
    }
}

fn store_user(data: &UserResponse, session: &SessionContext) -> Result<(), SessionError> {
    let result = match &data.user {
        Some(user) => session.set_user(user.clone()),
        None => Err(SessionError::MissingUser),
    };
    if let Err(e) = &result {
        warn!(error = %e, "session not updated");
    }
    result
}
