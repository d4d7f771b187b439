//! Request builders, response parsers and form validation for the
//! sign-in, sign-up and sign-out endpoints.
//!
//! # Design
//! Mirrors `TodoClient`: `build_*` produces an `HttpRequest`, `parse_*`
//! consumes an `HttpResponse`. Form validation runs before a request is
//! built, so invalid input never reaches the network. Session state lives
//! in `Session`, which drives these builders.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{check_status, json_request};
use crate::error::{ApiError, AuthError, Field};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::Credentials;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@([a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9]*\.)+[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

#[derive(Debug, Clone, Serialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl SignUpForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            password_confirmation: password_confirmation.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        if self.password_confirmation != self.password {
            return Err(invalid(Field::PasswordConfirmation, "passwords do not match"));
        }
        Ok(())
    }
}

fn invalid(field: Field, message: &str) -> AuthError {
    AuthError::Validation {
        field,
        message: message.to_string(),
    }
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    if email.is_empty() {
        return Err(invalid(Field::Email, "email is required"));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(invalid(Field::Email, "email address is invalid"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(invalid(Field::Password, "password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid(Field::Password, "password must be at least 8 characters"));
    }
    Ok(())
}

/// The account echoed back by a successful sign-in or sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Option<i64>,
    pub email: Option<String>,
}

/// Stateless builder/parser for the auth endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_sign_in(&self, form: &SignInForm) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}/sign_in", self.base_url), form)
    }

    pub fn build_sign_up(&self, form: &SignUpForm) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}/sign_up", self.base_url), form)
    }

    pub fn build_sign_out(&self, credentials: &Credentials) -> HttpRequest {
        credentials.authorize(HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/sign_out", self.base_url),
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn parse_sign_in(&self, response: &HttpResponse) -> Result<AuthenticatedUser, AuthError> {
        parse_auth(response, "invalid email or password")
    }

    pub fn parse_sign_up(&self, response: &HttpResponse) -> Result<AuthenticatedUser, AuthError> {
        parse_auth(response, "sign up failed")
    }

    pub fn parse_sign_out(&self, response: &HttpResponse) -> Result<(), AuthError> {
        check_status(response)?;
        Ok(())
    }
}

fn parse_auth(response: &HttpResponse, fallback: &str) -> Result<AuthenticatedUser, AuthError> {
    let body: Value = serde_json::from_str(&response.body).unwrap_or(Value::Null);

    if (400..500).contains(&response.status) {
        let mut messages = error_messages(&body);
        if messages.is_empty() {
            messages.push(fallback.to_string());
        }
        return Err(AuthError::Rejected {
            field: Field::Email,
            messages,
        });
    }
    check_status(response)?;

    Ok(body
        .get("data")
        .cloned()
        .and_then(|data| serde_json::from_value(data).ok())
        .unwrap_or_default())
}

/// Collect error strings from the shapes the auth API uses:
/// `{"errors": [..]}`, `{"errors": {"full_messages": [..]}}` and
/// `{"status": {"errors": [..]}}`.
fn error_messages(body: &Value) -> Vec<String> {
    let candidates = [
        body.pointer("/status/errors"),
        body.pointer("/errors/full_messages"),
        body.get("errors"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}
