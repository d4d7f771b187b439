//! Authentication session and credential persistence.
//!
//! # Design
//! The session is an explicit value. Code that issues remote calls receives
//! a `Credentials` from it instead of reading shared storage. Persistence goes
//! through `CredentialStore` so the CLI can keep credentials in a file while
//! tests keep them in memory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthClient, AuthenticatedUser, SignInForm, SignUpForm};
use crate::error::{AuthError, CredentialStoreError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

pub const ACCESS_TOKEN_HEADER: &str = "access-token";
pub const CLIENT_HEADER: &str = "client";
pub const UID_HEADER: &str = "uid";

/// The credential header set issued at sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub client: String,
    pub uid: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, client: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            client: client.into(),
            uid: uid.into(),
        }
    }

    /// Extract all three headers. Returns `None` if any is missing or empty;
    /// a partial set is never used.
    pub fn from_response(response: &HttpResponse) -> Option<Self> {
        let get = |name: &str| response.header(name).filter(|value| !value.is_empty());
        Some(Self::new(
            get(ACCESS_TOKEN_HEADER)?,
            get(CLIENT_HEADER)?,
            get(UID_HEADER)?,
        ))
    }

    /// Attach the credential headers to `request`.
    pub fn authorize(&self, mut request: HttpRequest) -> HttpRequest {
        request.headers.extend([
            (ACCESS_TOKEN_HEADER.to_string(), self.access_token.clone()),
            (CLIENT_HEADER.to_string(), self.client.clone()),
            (UID_HEADER.to_string(), self.uid.clone()),
        ]);
        request
    }
}

/// Durable storage for the credential set.
pub trait CredentialStore {
    fn load(&self) -> Result<Option<Credentials>, CredentialStoreError>;
    fn save(&mut self, credentials: &Credentials) -> Result<(), CredentialStoreError>;
    fn clear(&mut self) -> Result<(), CredentialStoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: Option<Credentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, CredentialStoreError> {
        Ok(self.credentials.clone())
    }

    fn save(&mut self, credentials: &Credentials) -> Result<(), CredentialStoreError> {
        self.credentials = Some(credentials.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CredentialStoreError> {
        self.credentials = None;
        Ok(())
    }
}

/// Credentials kept as a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, CredentialStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, credentials: &Credentials) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(credentials)?)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CredentialStoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    SignedIn(Credentials),
}

/// Sign-in state plus the store that persists it.
#[derive(Debug)]
pub struct Session<S: CredentialStore> {
    store: S,
    state: SessionState,
}

impl<S: CredentialStore> Session<S> {
    /// Resume from whatever `store` holds.
    pub fn restore(store: S) -> Result<Self, CredentialStoreError> {
        let state = match store.load()? {
            Some(credentials) => SessionState::SignedIn(credentials),
            None => SessionState::SignedOut,
        };
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, SessionState::SignedIn(_))
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        match &self.state {
            SessionState::SignedIn(credentials) => Some(credentials),
            SessionState::SignedOut => None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sign_in<T: Transport>(
        &mut self,
        auth: &AuthClient,
        transport: &T,
        form: &SignInForm,
    ) -> Result<AuthenticatedUser, AuthError> {
        form.validate()?;
        let response = transport.execute(auth.build_sign_in(form)?)?;
        let user = auth.parse_sign_in(&response)?;
        self.establish(&response)?;
        Ok(user)
    }

    pub fn sign_up<T: Transport>(
        &mut self,
        auth: &AuthClient,
        transport: &T,
        form: &SignUpForm,
    ) -> Result<AuthenticatedUser, AuthError> {
        form.validate()?;
        let response = transport.execute(auth.build_sign_up(form)?)?;
        let user = auth.parse_sign_up(&response)?;
        self.establish(&response)?;
        Ok(user)
    }

    /// Invalidate the session remotely and forget it locally. Local state is
    /// cleared even when the remote call fails; that failure is returned.
    pub fn sign_out<T: Transport>(&mut self, auth: &AuthClient, transport: &T) -> Result<(), AuthError> {
        let remote = match self.credentials() {
            Some(credentials) => transport
                .execute(auth.build_sign_out(credentials))
                .map_err(AuthError::from)
                .and_then(|response| auth.parse_sign_out(&response)),
            None => Ok(()),
        };
        if let Err(e) = &remote {
            warn!("sign-out request failed: {e}");
        }

        self.state = SessionState::SignedOut;
        self.store.clear()?;
        info!("signed out");
        remote
    }

    /// Store the credential set from a successful auth response. A partial
    /// set stores nothing and leaves the session signed out.
    fn establish(&mut self, response: &HttpResponse) -> Result<(), CredentialStoreError> {
        match Credentials::from_response(response) {
            Some(credentials) => {
                self.store.save(&credentials)?;
                info!("signed in as {}", credentials.uid);
                self.state = SessionState::SignedIn(credentials);
            }
            None => warn!("auth response is missing credential headers; nothing stored"),
        }
        Ok(())
    }
}
