//! The todo collection as seen through one session.
//!
//! `Remote` joins the stateless `TodoClient` with a `Transport` and the
//! session's `Credentials`, so every request it sends carries the credential
//! header set. Without credentials the requests go out unauthenticated and
//! the server is expected to answer 401.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::session::Credentials;
use crate::transport::Transport;
use crate::types::{NewTodo, Todo, TodoPatch};

#[derive(Debug, Clone)]
pub struct Remote<T: Transport> {
    client: TodoClient,
    transport: T,
    credentials: Option<Credentials>,
}

impl<T: Transport> Remote<T> {
    pub fn new(client: TodoClient, transport: T, credentials: Option<Credentials>) -> Self {
        Self {
            client,
            transport,
            credentials,
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_todos())?;
        self.client.parse_list_todos(response)
    }

    pub fn get(&self, id: i64) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_get_todo(id))?;
        self.client.parse_get_todo(response)
    }

    pub fn create(&self, input: &NewTodo) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_create_todo(input)?)?;
        self.client.parse_create_todo(response)
    }

    pub fn update(&self, id: i64, patch: &TodoPatch) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_update_todo(id, patch)?)?;
        self.client.parse_update_todo(response)
    }

    pub fn delete(&self, id: i64) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_todo(id))?;
        self.client.parse_delete_todo(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = match &self.credentials {
            Some(credentials) => credentials.authorize(request),
            None => request,
        };
        self.transport.execute(request)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl Transport for Recorder {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: "[]".to_string(),
            })
        }
    }

    #[test]
    fn every_request_carries_credentials() {
        let recorder = Recorder::default();
        let remote = Remote::new(
            TodoClient::new("http://api"),
            &recorder,
            Some(Credentials::new("tok", "cli", "a@example.com")),
        );

        remote.list().unwrap();
        remote.delete(4).unwrap();

        let requests = recorder.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        for request in requests.iter() {
            assert_eq!(request.header("access-token"), Some("tok"));
            assert_eq!(request.header("client"), Some("cli"));
            assert_eq!(request.header("uid"), Some("a@example.com"));
        }
    }

    #[test]
    fn signed_out_requests_are_unauthenticated() {
        let recorder = Recorder::default();
        let remote = Remote::new(TodoClient::new("http://api"), &recorder, None);

        remote.list().unwrap();

        let requests = recorder.requests.lock().unwrap();
        assert_eq!(requests[0].header("access-token"), None);
    }
}
