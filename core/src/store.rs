//! The in-memory todo list for the signed-in user.
//!
//! # Design
//! `TodoStore` owns the authoritative local copy and mutates it before the
//! matching remote call. Background writes (edits, reorder, purge) never roll
//! the local state back; their failures are logged and recorded per item as
//! `SyncStatus::Failed` until a later write succeeds or the list is reloaded.
//!
//! Independent writes are fanned out over at most `MAX_IN_FLIGHT` scoped
//! worker threads and are not ordered relative to each other; the server's
//! last write wins.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use log::{debug, error, info, warn};

use crate::error::{ApiError, StoreError};
use crate::filter::{self, Filter};
use crate::remote::Remote;
use crate::reorder;
use crate::transport::Transport;
use crate::types::{NewTodo, Todo, TodoPatch};

/// Upper bound on concurrent requests in one fan-out.
pub const MAX_IN_FLIGHT: usize = 8;

/// Whether the server has confirmed the local copy of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    Pending,
    Failed,
}

/// Outcome of `TodoStore::purge_deleted`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Ids removed from the local list; one delete was issued per id.
    pub removed: Vec<i64>,
    /// Ids whose remote delete failed. They are gone locally regardless.
    pub failed: Vec<i64>,
}

/// Outcome of a fanned-out batch of position updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub sent: usize,
    pub failed: Vec<i64>,
}

pub struct TodoStore<T: Transport> {
    remote: Remote<T>,
    items: Vec<Todo>,
    status: HashMap<i64, SyncStatus>,
}

impl<T: Transport> TodoStore<T> {
    pub fn new(remote: Remote<T>) -> Self {
        Self {
            remote,
            items: Vec::new(),
            status: HashMap::new(),
        }
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn view(&self, mode: Filter) -> Vec<&Todo> {
        filter::filter(&self.items, mode)
    }

    pub fn get(&self, id: i64) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    pub fn sync_status(&self, id: i64) -> Option<SyncStatus> {
        self.status.get(&id).copied()
    }

    /// Items whose last background write failed.
    pub fn unsynced(&self) -> Vec<i64> {
        self.items
            .iter()
            .filter(|todo| self.sync_status(todo.id) == Some(SyncStatus::Failed))
            .map(|todo| todo.id)
            .collect()
    }

    /// Replace the list with the server's. On failure nothing changes.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let todos = self.remote.list()?;
        info!("loaded {} todos", todos.len());
        self.status = todos.iter().map(|todo| (todo.id, SyncStatus::Synced)).collect();
        self.items = todos;
        Ok(())
    }

    /// Re-fetch one item and replace the local copy with the server's,
    /// discarding any unconfirmed local change to it.
    pub fn refresh(&mut self, id: i64) -> Result<&Todo, StoreError> {
        let index = self
            .items
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(StoreError::UnknownTodo(id))?;
        let fresh = self.remote.get(id)?;
        self.status.insert(id, SyncStatus::Synced);
        self.items[index] = fresh;
        Ok(&self.items[index])
    }

    /// Create a todo and put the server's copy at the head of the list.
    /// Nothing is inserted unless the server accepts it.
    pub fn add(&mut self, content: &str) -> Result<&Todo, StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }
        let created = self.remote.create(&NewTodo::new(content))?;
        debug!("created todo {}", created.id);
        self.status.insert(created.id, SyncStatus::Synced);
        self.items.insert(0, created);
        Ok(&self.items[0])
    }

    /// Apply `patch` locally, then persist it. A failed write is logged and
    /// leaves the local change in place.
    pub fn apply_update(&mut self, id: i64, patch: TodoPatch) -> Result<SyncStatus, StoreError> {
        let todo = self
            .items
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(StoreError::UnknownTodo(id))?;
        todo.apply(&patch);
        self.status.insert(id, SyncStatus::Pending);

        let status = match self.remote.update(id, &patch) {
            Ok(_) => SyncStatus::Synced,
            Err(e) => {
                error!("failed to update todo {id}: {e}");
                SyncStatus::Failed
            }
        };
        self.status.insert(id, status);
        Ok(status)
    }

    pub fn set_completed(&mut self, id: i64, completed: bool) -> Result<SyncStatus, StoreError> {
        self.apply_update(id, TodoPatch::completed(completed))
    }

    pub fn toggle_completed(&mut self, id: i64) -> Result<SyncStatus, StoreError> {
        let completed = self.get(id).ok_or(StoreError::UnknownTodo(id))?.completed_flg;
        self.set_completed(id, !completed)
    }

    pub fn edit_content(&mut self, id: i64, content: &str) -> Result<SyncStatus, StoreError> {
        if content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }
        self.apply_update(id, TodoPatch::content(content))
    }

    /// Move to the trash.
    pub fn soft_delete(&mut self, id: i64) -> Result<SyncStatus, StoreError> {
        self.apply_update(id, TodoPatch::deleted(true))
    }

    /// Take out of the trash.
    pub fn restore(&mut self, id: i64) -> Result<SyncStatus, StoreError> {
        self.apply_update(id, TodoPatch::deleted(false))
    }

    /// Permanently delete every trashed item. One delete is issued per
    /// trashed item; once all have finished the trashed items are dropped
    /// locally whether or not their delete succeeded.
    pub fn purge_deleted(&mut self) -> PurgeReport {
        let removed: Vec<i64> = self
            .items
            .iter()
            .filter(|todo| todo.delete_flg)
            .map(|todo| todo.id)
            .collect();

        let results = self.fan_out(&removed, |remote, &id| remote.delete(id));
        let mut failed = Vec::new();
        for (id, result) in results {
            if let Err(e) = result {
                warn!("failed to delete todo {id}: {e}");
                failed.push(id);
            }
        }

        self.items.retain(|todo| !todo.delete_flg);
        for id in &removed {
            self.status.remove(id);
        }
        info!("emptied trash: {} removed, {} failed remotely", removed.len(), failed.len());
        PurgeReport { removed, failed }
    }

    /// Move the item at `source` in the `mode` view to `destination`,
    /// renumber the list and persist every item's position, one update per
    /// item.
    ///
    /// The local order changes before any request is sent. A `None`
    /// destination is a cancelled drop and changes nothing.
    pub fn reorder(
        &mut self,
        mode: Filter,
        source: usize,
        destination: Option<usize>,
    ) -> Result<SyncReport, StoreError> {
        if destination.is_none() {
            debug!("drop cancelled; order unchanged");
        }
        let changes = reorder::reorder(&mut self.items, mode, source, destination)?;
        for (id, _) in &changes {
            self.status.insert(*id, SyncStatus::Pending);
        }

        let results = self.fan_out(&changes, |remote, &(id, sort)| {
            remote.update(id, &TodoPatch::sort(sort)).map(|_| ())
        });

        let mut report = SyncReport {
            sent: changes.len(),
            failed: Vec::new(),
        };
        for ((id, _), result) in results {
            let status = match result {
                Ok(()) => SyncStatus::Synced,
                Err(e) => {
                    error!("failed to persist position of todo {id}: {e}");
                    report.failed.push(id);
                    SyncStatus::Failed
                }
            };
            self.status.insert(id, status);
        }
        Ok(report)
    }

    /// Run `call` once per job on up to `MAX_IN_FLIGHT` workers and wait for
    /// all of them. Results come back in job order.
    fn fan_out<J, F>(&self, jobs: &[J], call: F) -> Vec<(J, Result<(), ApiError>)>
    where
        J: Copy + Send + Sync,
        F: Fn(&Remote<T>, &J) -> Result<(), ApiError> + Sync,
    {
        let remote = &self.remote;
        let call = &call;
        let next = &AtomicUsize::new(0);
        let workers = jobs.len().min(MAX_IN_FLIGHT);

        let mut results: Vec<Option<Result<(), ApiError>>> = jobs.iter().map(|_| None).collect();
        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    scope.spawn(move || {
                        let mut done = Vec::new();
                        loop {
                            let index = next.fetch_add(1, Ordering::Relaxed);
                            let Some(job) = jobs.get(index) else {
                                break;
                            };
                            done.push((index, call(remote, job)));
                        }
                        done
                    })
                })
                .collect();
            for handle in handles {
                match handle.join() {
                    Ok(done) => {
                        for (index, result) in done {
                            results[index] = Some(result);
                        }
                    }
                    Err(_) => error!("request worker panicked"),
                }
            }
        });

        jobs.iter()
            .zip(results)
            .map(|(job, result)| {
                let result =
                    result.unwrap_or_else(|| Err(ApiError::Transport("request worker panicked".to_string())));
                (*job, result)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::*;
    use crate::client::TodoClient;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use crate::session::Credentials;

    const BASE: &str = "http://api";

    /// In-memory stand-in for the todo collection endpoints.
    #[derive(Default)]
    struct FakeApi {
        state: Mutex<FakeState>,
    }

    #[derive(Default)]
    struct FakeState {
        todos: Vec<Todo>,
        next_id: i64,
        failing: HashSet<i64>,
        down: bool,
        calls: Vec<(HttpMethod, String)>,
    }

    impl FakeApi {
        fn with(todos: Vec<Todo>) -> Self {
            let next_id = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            Self {
                state: Mutex::new(FakeState {
                    todos,
                    next_id,
                    ..FakeState::default()
                }),
            }
        }

        fn fail_for(&self, id: i64) {
            self.state.lock().unwrap().failing.insert(id);
        }

        fn clear_failures(&self) {
            self.state.lock().unwrap().failing.clear();
        }

        fn set_down(&self, down: bool) {
            self.state.lock().unwrap().down = down;
        }

        fn calls(&self, method: HttpMethod) -> usize {
            self.state
                .lock()
                .unwrap()
                .calls
                .iter()
                .filter(|(m, _)| *m == method)
                .count()
        }

        fn server_todo(&self, id: i64) -> Option<Todo> {
            self.state.lock().unwrap().todos.iter().find(|t| t.id == id).cloned()
        }
    }

    fn reply(status: u16, body: String) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }

    impl Transport for FakeApi {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let mut state = self.state.lock().unwrap();
            state.calls.push((request.method, request.path.clone()));
            if state.down {
                return Err(ApiError::Transport("connection refused".to_string()));
            }

            let rest = request.path.strip_prefix(BASE).unwrap_or_default();
            let id: Option<i64> = rest.strip_prefix("/todos/").and_then(|s| s.parse().ok());
            if let Some(id) = id {
                if state.failing.contains(&id) {
                    return reply(500, "injected failure".to_string());
                }
            }

            match (request.method, id) {
                (HttpMethod::Get, None) => reply(200, serde_json::to_string(&state.todos).unwrap()),
                (HttpMethod::Get, Some(id)) => match state.todos.iter().find(|t| t.id == id) {
                    Some(todo) => reply(200, serde_json::to_string(todo).unwrap()),
                    None => reply(404, String::new()),
                },
                (HttpMethod::Post, None) => {
                    let input: NewTodo = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
                    let todo = Todo {
                        id: state.next_id,
                        content: input.content,
                        completed_flg: input.completed_flg,
                        delete_flg: input.delete_flg,
                        sort: input.sort,
                    };
                    state.next_id += 1;
                    state.todos.insert(0, todo.clone());
                    reply(201, serde_json::to_string(&todo).unwrap())
                }
                (HttpMethod::Patch, Some(id)) => {
                    let patch: TodoPatch = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
                    match state.todos.iter_mut().find(|t| t.id == id) {
                        Some(todo) => {
                            todo.apply(&patch);
                            reply(200, serde_json::to_string(todo).unwrap())
                        }
                        None => reply(404, String::new()),
                    }
                }
                (HttpMethod::Delete, Some(id)) => {
                    let before = state.todos.len();
                    state.todos.retain(|t| t.id != id);
                    if state.todos.len() < before {
                        reply(204, String::new())
                    } else {
                        reply(404, String::new())
                    }
                }
                _ => reply(404, String::new()),
            }
        }
    }

    fn todo(id: i64, content: &str) -> Todo {
        Todo {
            id,
            content: content.to_string(),
            completed_flg: false,
            delete_flg: false,
            sort: id,
        }
    }

    fn store(api: &FakeApi) -> TodoStore<&FakeApi> {
        let credentials = Credentials::new("tok", "cli", "a@example.com");
        TodoStore::new(Remote::new(TodoClient::new(BASE), api, Some(credentials)))
    }

    fn loaded(api: &FakeApi) -> TodoStore<&FakeApi> {
        let mut store = store(api);
        store.load().unwrap();
        store
    }

    fn ids(items: Vec<&Todo>) -> Vec<i64> {
        items.into_iter().map(|t| t.id).collect()
    }

    #[test]
    fn load_replaces_list() {
        let api = FakeApi::with(vec![todo(1, "a"), todo(2, "b")]);
        let store = loaded(&api);
        assert_eq!(ids(store.view(Filter::All)), vec![1, 2]);
        assert_eq!(store.sync_status(1), Some(SyncStatus::Synced));
    }

    #[test]
    fn failed_load_keeps_previous_state() {
        let api = FakeApi::with(vec![todo(1, "a")]);
        let mut store = loaded(&api);
        api.set_down(true);

        assert!(store.load().is_err());
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn add_prepends_server_copy() {
        let api = FakeApi::with(vec![todo(1, "a")]);
        let mut store = loaded(&api);

        let created = store.add("Buy milk").unwrap().clone();

        assert_eq!(created.id, 2);
        assert!(!created.completed_flg);
        assert!(!created.delete_flg);
        assert_eq!(created.sort, 0);
        assert_eq!(store.items()[0], created);
    }

    #[test]
    fn failed_add_changes_nothing() {
        let api = FakeApi::with(vec![todo(1, "a")]);
        let mut store = loaded(&api);
        api.set_down(true);

        assert!(store.add("Buy milk").is_err());
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn empty_content_is_rejected_without_a_request() {
        let api = FakeApi::default();
        let mut store = store(&api);
        assert!(matches!(store.add("   "), Err(StoreError::EmptyContent)));
        assert_eq!(api.calls(HttpMethod::Post), 0);
    }

    #[test]
    fn update_failure_keeps_local_change() {
        let api = FakeApi::with(vec![todo(1, "a")]);
        let mut store = loaded(&api);
        api.fail_for(1);

        let status = store.toggle_completed(1).unwrap();

        assert_eq!(status, SyncStatus::Failed);
        assert!(store.get(1).unwrap().completed_flg);
        assert!(!api.server_todo(1).unwrap().completed_flg);
        assert_eq!(store.unsynced(), vec![1]);
    }

    #[test]
    fn update_unknown_id_sends_nothing() {
        let api = FakeApi::with(vec![todo(1, "a")]);
        let mut store = loaded(&api);
        assert!(matches!(store.soft_delete(9), Err(StoreError::UnknownTodo(9))));
        assert_eq!(api.calls(HttpMethod::Patch), 0);
    }

    #[test]
    fn edit_and_restore_persist() {
        let api = FakeApi::with(vec![todo(1, "a")]);
        let mut store = loaded(&api);

        store.edit_content(1, "Buy oat milk").unwrap();
        store.soft_delete(1).unwrap();
        store.restore(1).unwrap();

        let remote = api.server_todo(1).unwrap();
        assert_eq!(remote.content, "Buy oat milk");
        assert!(!remote.delete_flg);
        assert_eq!(store.get(1).unwrap(), &remote);
    }

    #[test]
    fn purge_issues_one_delete_per_trashed_item() {
        let api = FakeApi::with(vec![todo(1, "a"), todo(2, "b"), todo(3, "c")]);
        let mut store = loaded(&api);
        store.soft_delete(1).unwrap();
        store.soft_delete(3).unwrap();

        let report = store.purge_deleted();

        assert_eq!(report.removed, vec![1, 3]);
        assert!(report.failed.is_empty());
        assert_eq!(api.calls(HttpMethod::Delete), report.removed.len());
        assert!(store.items().iter().all(|t| !t.delete_flg));
        assert_eq!(ids(store.view(Filter::All)), vec![2]);
    }

    #[test]
    fn purge_drops_locally_even_when_a_delete_fails() {
        let api = FakeApi::with(vec![todo(1, "a"), todo(2, "b")]);
        let mut store = loaded(&api);
        store.soft_delete(1).unwrap();
        store.soft_delete(2).unwrap();
        api.fail_for(2);

        let report = store.purge_deleted();

        assert_eq!(report.failed, vec![2]);
        assert!(store.items().is_empty());
        assert!(api.server_todo(2).is_some());
    }

    #[test]
    fn reorder_updates_locally_and_persists_positions() {
        let api = FakeApi::with(vec![todo(1, "a"), todo(2, "b"), todo(3, "c")]);
        let mut store = loaded(&api);

        let report = store.reorder(Filter::All, 2, Some(0)).unwrap();

        assert_eq!(ids(store.view(Filter::All)), vec![3, 1, 2]);
        let sorts: Vec<i64> = store.items().iter().map(|t| t.sort).collect();
        assert_eq!(sorts, vec![1, 2, 3]);
        assert!(report.failed.is_empty());
        assert_eq!(api.calls(HttpMethod::Patch), report.sent);
        assert_eq!(api.server_todo(3).unwrap().sort, 1);
        assert_eq!(api.server_todo(2).unwrap().sort, 3);
    }

    #[test]
    fn reorder_failure_does_not_undo_or_block_others() {
        let api = FakeApi::with(vec![todo(1, "a"), todo(2, "b"), todo(3, "c")]);
        let mut store = loaded(&api);
        api.fail_for(1);

        let report = store.reorder(Filter::All, 0, Some(2)).unwrap();

        assert_eq!(ids(store.view(Filter::All)), vec![2, 3, 1]);
        assert_eq!(report.failed, vec![1]);
        assert_eq!(store.sync_status(1), Some(SyncStatus::Failed));
        assert_eq!(store.sync_status(2), Some(SyncStatus::Synced));
        assert_eq!(api.server_todo(2).unwrap().sort, 1);
    }

    #[test]
    fn reorder_sends_one_update_per_item() {
        let api = FakeApi::with(vec![todo(1, "a"), todo(2, "b"), todo(3, "c")]);
        let mut store = loaded(&api);

        // Item 1 already sits at sort 1 and stays there.
        let report = store.reorder(Filter::All, 1, Some(2)).unwrap();

        assert_eq!(ids(store.view(Filter::All)), vec![1, 3, 2]);
        assert_eq!(report.sent, store.items().len());
        assert_eq!(api.calls(HttpMethod::Patch), 3);
    }

    #[test]
    fn failed_position_is_resent_by_the_next_reorder() {
        let api = FakeApi::with(vec![todo(1, "a"), todo(2, "b"), todo(3, "c")]);
        let mut store = loaded(&api);
        api.fail_for(1);
        store.reorder(Filter::All, 0, Some(2)).unwrap();
        assert_eq!(api.server_todo(1).unwrap().sort, 1);
        assert_eq!(store.sync_status(1), Some(SyncStatus::Failed));

        api.clear_failures();
        store.reorder(Filter::All, 0, Some(1)).unwrap();

        assert_eq!(ids(store.view(Filter::All)), vec![3, 2, 1]);
        assert_eq!(store.get(1).unwrap().sort, 3);
        assert_eq!(api.server_todo(1).unwrap().sort, 3);
        assert_eq!(store.sync_status(1), Some(SyncStatus::Synced));
        assert!(store.unsynced().is_empty());
    }

    /// Serves a trash of `count` items and records peak concurrent deletes.
    struct SlowTrash {
        count: i64,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        deletes: AtomicUsize,
    }

    impl Transport for SlowTrash {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            match request.method {
                HttpMethod::Get => {
                    let todos: Vec<Todo> = (1..=self.count)
                        .map(|id| Todo {
                            delete_flg: true,
                            ..todo(id, "old")
                        })
                        .collect();
                    reply(200, serde_json::to_string(&todos).unwrap())
                }
                _ => {
                    let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    self.peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(std::time::Duration::from_millis(5));
                    self.in_flight.fetch_sub(1, Ordering::SeqCst);
                    self.deletes.fetch_add(1, Ordering::SeqCst);
                    reply(204, String::new())
                }
            }
        }
    }

    #[test]
    fn fan_out_caps_concurrent_requests() {
        let api = SlowTrash {
            count: 40,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        };
        let credentials = Credentials::new("tok", "cli", "a@example.com");
        let mut store = TodoStore::new(Remote::new(TodoClient::new(BASE), &api, Some(credentials)));
        store.load().unwrap();

        let report = store.purge_deleted();

        assert_eq!(report.removed, (1..=40).collect::<Vec<i64>>());
        assert!(report.failed.is_empty());
        assert_eq!(api.deletes.load(Ordering::SeqCst), 40);
        assert!(api.peak.load(Ordering::SeqCst) <= MAX_IN_FLIGHT);
        assert!(store.items().is_empty());
    }

    #[test]
    fn refresh_replaces_unconfirmed_local_copy() {
        let api = FakeApi::with(vec![todo(1, "a"), todo(2, "b")]);
        let mut store = loaded(&api);
        api.fail_for(1);
        store.edit_content(1, "lost edit").unwrap();
        api.clear_failures();

        let fresh = store.refresh(1).unwrap().clone();

        assert_eq!(fresh.content, "a");
        assert_eq!(store.get(1).unwrap(), &fresh);
        assert_eq!(store.sync_status(1), Some(SyncStatus::Synced));
        assert!(matches!(store.refresh(9), Err(StoreError::UnknownTodo(9))));
        assert_eq!(api.calls(HttpMethod::Get), 2);
    }

    #[test]
    fn cancelled_drop_sends_nothing() {
        let api = FakeApi::with(vec![todo(1, "a"), todo(2, "b")]);
        let mut store = loaded(&api);
        let before = store.items().to_vec();

        let report = store.reorder(Filter::All, 0, None).unwrap();

        assert_eq!(report, SyncReport::default());
        assert_eq!(store.items(), before.as_slice());
        assert_eq!(api.calls(HttpMethod::Patch), 0);
    }

    #[test]
    fn lifecycle_across_filters() {
        let api = FakeApi::default();
        let mut store = store(&api);
        store.load().unwrap();

        let id = store.add("Buy milk").unwrap().id;
        assert_eq!(ids(store.view(Filter::All)), vec![id]);
        assert_eq!(ids(store.view(Filter::Unchecked)), vec![id]);

        store.toggle_completed(id).unwrap();
        assert_eq!(ids(store.view(Filter::Completed)), vec![id]);
        assert!(store.view(Filter::Unchecked).is_empty());

        store.soft_delete(id).unwrap();
        assert_eq!(ids(store.view(Filter::Delete)), vec![id]);
        assert!(store.view(Filter::All).is_empty());
        assert!(store.view(Filter::Completed).is_empty());

        store.purge_deleted();
        for mode in [Filter::All, Filter::Completed, Filter::Unchecked, Filter::Delete] {
            assert!(store.view(mode).is_empty());
        }
        store.load().unwrap();
        assert!(store.items().is_empty());
    }
}
