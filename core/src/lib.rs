//! Client core for the todolist service.
//!
//! # Overview
//! Keeps a local todo list in step with a remote collection behind an
//! email/password session. Request builders and response parsers are pure
//! (host-does-IO); a `Transport` executes the round-trips.
//!
//! # Design
//! - `TodoClient` / `AuthClient` are stateless: they hold only `base_url`.
//! - `Session` owns the credential set and its persistence. `Remote` receives
//!   the credentials explicitly and attaches them to every request.
//! - `TodoStore` is the single source of truth for the UI. Edits and reorders
//!   are applied locally first and persisted afterwards without rollback.
//! - `filter` and `reorder` are pure functions over `&[Todo]`.

pub mod auth;
pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod remote;
pub mod reorder;
pub mod session;
pub mod store;
pub mod transport;
pub mod types;

pub use auth::{AuthClient, AuthenticatedUser, SignInForm, SignUpForm};
pub use client::TodoClient;
pub use error::{ApiError, AuthError, CredentialStoreError, Field, StoreError};
pub use filter::{filter, Filter};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use remote::Remote;
pub use session::{
    CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore, Session, SessionState,
};
pub use store::{PurgeReport, SyncReport, SyncStatus, TodoStore};
pub use transport::{Transport, UreqTransport};
pub use types::{NewTodo, Todo, TodoPatch};
