use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub content: String,
    pub completed_flg: bool,
    pub delete_flg: bool,
    pub sort: i64,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub content: String,
    #[serde(default)]
    pub completed_flg: bool,
    #[serde(default)]
    pub delete_flg: bool,
    #[serde(default)]
    pub sort: i64,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub content: Option<String>,
    pub completed_flg: Option<bool>,
    pub delete_flg: Option<bool>,
    pub sort: Option<i64>,
}

#[derive(Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

struct User {
    id: i64,
    password: String,
}

struct Token {
    uid: String,
    access_token: String,
}

struct Stored {
    owner: i64,
    todo: Todo,
}

/// Accounts, live sessions keyed by `client`, and every user's todos.
#[derive(Default)]
pub struct Db {
    users: HashMap<String, User>,
    sessions: HashMap<String, Token>,
    todos: BTreeMap<i64, Stored>,
    next_user_id: i64,
    next_todo_id: i64,
}

impl Db {
    fn issue_token(&mut self, uid: &str) -> [(&'static str, String); 3] {
        let client = Uuid::new_v4().to_string();
        let access_token = Uuid::new_v4().to_string();
        self.sessions.insert(
            client.clone(),
            Token {
                uid: uid.to_string(),
                access_token: access_token.clone(),
            },
        );
        [
            ("access-token", access_token),
            ("client", client),
            ("uid", uid.to_string()),
        ]
    }

    /// Resolve the credential header set to a user id.
    fn authenticate(&self, headers: &HeaderMap) -> Result<i64, MockError> {
        let get = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());
        let (Some(access_token), Some(client), Some(uid)) = (get("access-token"), get("client"), get("uid")) else {
            return Err(MockError::Unauthorized);
        };
        match self.sessions.get(client) {
            Some(token) if token.uid == uid && token.access_token == access_token => {
                self.users.get(uid).map(|user| user.id).ok_or(MockError::Unauthorized)
            }
            _ => Err(MockError::Unauthorized),
        }
    }

    fn owned(&self, owner: i64, id: i64) -> Result<&Todo, MockError> {
        match self.todos.get(&id) {
            Some(stored) if stored.owner == owner => Ok(&stored.todo),
            _ => Err(MockError::NotFound),
        }
    }

    fn owned_mut(&mut self, owner: i64, id: i64) -> Result<&mut Todo, MockError> {
        match self.todos.get_mut(&id) {
            Some(stored) if stored.owner == owner => Ok(&mut stored.todo),
            _ => Err(MockError::NotFound),
        }
    }
}

pub type SharedDb = Arc<RwLock<Db>>;

#[derive(Debug, Error)]
pub enum MockError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("invalid login credentials")]
    InvalidLogin,

    #[error("sign up rejected")]
    SignUpRejected(Vec<String>),

    #[error("session not found")]
    SessionNotFound,
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            MockError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "errors": ["You need to sign in or sign up before continuing."] }),
            ),
            MockError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "not found" })),
            MockError::InvalidLogin => (
                StatusCode::UNAUTHORIZED,
                json!({ "errors": ["Invalid login credentials. Please try again."] }),
            ),
            MockError::SignUpRejected(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "status": { "message": "User couldn't be created successfully.", "errors": errors } }),
            ),
            MockError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "errors": ["User was not found or was not logged in."] }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(Db::default()));
    Router::new()
        .route("/sign_up", post(sign_up))
        .route("/sign_in", post(sign_in))
        .route("/sign_out", delete(sign_out))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).patch(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn sign_up(State(db): State<SharedDb>, Json(input): Json<SignUp>) -> Result<Response, MockError> {
    let mut db = db.write().await;

    let mut errors = Vec::new();
    if !input.email.contains('@') {
        errors.push("Email is not an email".to_string());
    } else if db.users.contains_key(&input.email) {
        errors.push("Email has already been taken".to_string());
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!("Password is too short (minimum is {MIN_PASSWORD_LEN} characters)"));
    }
    if input.password_confirmation != input.password {
        errors.push("Password confirmation doesn't match Password".to_string());
    }
    if !errors.is_empty() {
        return Err(MockError::SignUpRejected(errors));
    }

    db.next_user_id += 1;
    let id = db.next_user_id;
    db.users.insert(
        input.email.clone(),
        User {
            id,
            password: input.password,
        },
    );
    let headers = db.issue_token(&input.email);
    info!(user = id, "signed up");

    let body = json!({
        "status": { "code": 200, "message": "Signed up successfully." },
        "data": { "id": id, "email": input.email },
    });
    Ok((StatusCode::OK, headers, Json(body)).into_response())
}

async fn sign_in(State(db): State<SharedDb>, Json(input): Json<SignIn>) -> Result<Response, MockError> {
    let mut db = db.write().await;
    let id = match db.users.get(&input.email) {
        Some(user) if user.password == input.password => user.id,
        _ => return Err(MockError::InvalidLogin),
    };
    let headers = db.issue_token(&input.email);
    info!(user = id, "signed in");

    let body = json!({ "data": { "id": id, "email": input.email } });
    Ok((StatusCode::OK, headers, Json(body)).into_response())
}

async fn sign_out(State(db): State<SharedDb>, headers: HeaderMap) -> Result<Json<Value>, MockError> {
    let mut db = db.write().await;
    db.authenticate(&headers).map_err(|_| MockError::SessionNotFound)?;
    let client = headers
        .get("client")
        .and_then(|value| value.to_str().ok())
        .ok_or(MockError::SessionNotFound)?;
    db.sessions.remove(client);
    info!("signed out");
    Ok(Json(json!({ "success": true })))
}

async fn list_todos(State(db): State<SharedDb>, headers: HeaderMap) -> Result<Json<Vec<Todo>>, MockError> {
    let db = db.read().await;
    let owner = db.authenticate(&headers)?;
    let mut todos: Vec<Todo> = db
        .todos
        .values()
        .filter(|stored| stored.owner == owner)
        .map(|stored| stored.todo.clone())
        .collect();
    todos.sort_by_key(|todo| (todo.sort, Reverse(todo.id)));
    Ok(Json(todos))
}

async fn create_todo(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), MockError> {
    let mut db = db.write().await;
    let owner = db.authenticate(&headers)?;
    db.next_todo_id += 1;
    let todo = Todo {
        id: db.next_todo_id,
        content: input.content,
        completed_flg: input.completed_flg,
        delete_flg: input.delete_flg,
        sort: input.sort,
    };
    db.todos.insert(
        todo.id,
        Stored {
            owner,
            todo: todo.clone(),
        },
    );
    debug!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, MockError> {
    let db = db.read().await;
    let owner = db.authenticate(&headers)?;
    db.owned(owner, id).map(|todo| Json(todo.clone()))
}

async fn update_todo(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, MockError> {
    let mut db = db.write().await;
    let owner = db.authenticate(&headers)?;
    let todo = db.owned_mut(owner, id)?;
    if let Some(content) = input.content {
        todo.content = content;
    }
    if let Some(completed) = input.completed_flg {
        todo.completed_flg = completed;
    }
    if let Some(deleted) = input.delete_flg {
        todo.delete_flg = deleted;
    }
    if let Some(sort) = input.sort {
        todo.sort = sort;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, MockError> {
    let mut db = db.write().await;
    let owner = db.authenticate(&headers)?;
    db.owned_mut(owner, id)?;
    db.todos.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}
