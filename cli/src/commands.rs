use anyhow::{bail, Context, Result};
use log::{info, warn};
use todolist_core::{
    AuthClient, FileCredentialStore, Filter, Remote, Session, SignInForm, SignUpForm, SyncStatus, Todo, TodoClient,
    TodoStore, UreqTransport,
};

use crate::config::Config;

pub struct App {
    config: Config,
    auth: AuthClient,
    transport: UreqTransport,
    session: Session<FileCredentialStore>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let store = FileCredentialStore::new(config.credentials_path()?);
        let session = Session::restore(store).context("Failed to read stored credentials")?;
        Ok(Self {
            auth: AuthClient::new(&config.api.base_url),
            transport: UreqTransport::new(),
            config,
            session,
        })
    }

    pub fn sign_up(&mut self, email: String, password: String, confirmation: Option<String>) -> Result<()> {
        let confirmation = confirmation.unwrap_or_else(|| password.clone());
        let form = SignUpForm::new(email, password, confirmation);
        self.session.sign_up(&self.auth, &self.transport, &form)?;
        self.report_session()
    }

    pub fn sign_in(&mut self, email: String, password: String) -> Result<()> {
        let form = SignInForm::new(email, password);
        self.session.sign_in(&self.auth, &self.transport, &form)?;
        self.report_session()
    }

    pub fn sign_out(&mut self) -> Result<()> {
        if let Err(e) = self.session.sign_out(&self.auth, &self.transport) {
            warn!("server did not confirm sign-out: {e}");
        }
        println!("Signed out.");
        Ok(())
    }

    fn report_session(&self) -> Result<()> {
        match self.session.credentials() {
            Some(credentials) => {
                println!("Signed in as {}.", credentials.uid);
                Ok(())
            }
            None => bail!("Server did not return a complete credential set; not signed in"),
        }
    }

    /// A store loaded with the signed-in user's todos.
    fn store(&self) -> Result<TodoStore<UreqTransport>> {
        let Some(credentials) = self.session.credentials() else {
            bail!("Not signed in. Run `todolist sign-in` first.");
        };
        let remote = Remote::new(
            TodoClient::new(&self.config.api.base_url),
            self.transport.clone(),
            Some(credentials.clone()),
        );
        let mut store = TodoStore::new(remote);
        store.load().context("Failed to load todos")?;
        Ok(store)
    }

    pub fn list(&self, filter: Filter) -> Result<()> {
        let store = self.store()?;
        print_view(&store, filter);
        Ok(())
    }

    /// Print one todo as the server currently has it.
    pub fn show(&self, id: i64) -> Result<()> {
        let mut store = self.store()?;
        println!("{}", render_detail(store.refresh(id)?));
        Ok(())
    }

    pub fn add(&self, content: &str) -> Result<()> {
        let mut store = self.store()?;
        let todo = store.add(content)?;
        println!("Added #{}: {}", todo.id, todo.content);
        Ok(())
    }

    pub fn edit(&self, id: i64, content: &str) -> Result<()> {
        let mut store = self.store()?;
        let status = store.edit_content(id, content)?;
        report_write(id, "edited", status);
        Ok(())
    }

    pub fn set_completed(&self, id: i64, completed: Option<bool>) -> Result<()> {
        let mut store = self.store()?;
        let status = match completed {
            Some(completed) => store.set_completed(id, completed)?,
            None => store.toggle_completed(id)?,
        };
        let done = store.get(id).map(|todo| todo.completed_flg).unwrap_or_default();
        report_write(id, if done { "completed" } else { "reopened" }, status);
        Ok(())
    }

    pub fn trash(&self, id: i64, deleted: bool) -> Result<()> {
        let mut store = self.store()?;
        let status = if deleted {
            store.soft_delete(id)?
        } else {
            store.restore(id)?
        };
        report_write(id, if deleted { "moved to trash" } else { "restored" }, status);
        Ok(())
    }

    /// Positions are 1-based within the `filter` view, as `list` prints them.
    pub fn move_item(&self, filter: Filter, from: usize, to: Option<usize>) -> Result<()> {
        let source = from.checked_sub(1).context("Positions start at 1")?;
        let destination = match to {
            Some(to) => Some(to.checked_sub(1).context("Positions start at 1")?),
            None => None,
        };

        let mut store = self.store()?;
        let report = store.reorder(filter, source, destination)?;
        if destination.is_none() {
            println!("No destination; order unchanged.");
            return Ok(());
        }
        info!("reorder sent {} position updates", report.sent);
        if !report.failed.is_empty() {
            eprintln!("Warning: could not save the position of {:?}", report.failed);
        }
        print_view(&store, filter);
        Ok(())
    }

    pub fn empty_trash(&self) -> Result<()> {
        let mut store = self.store()?;
        let report = store.purge_deleted();
        println!("Removed {} todo(s) from the trash.", report.removed.len());
        if !report.failed.is_empty() {
            eprintln!("Warning: the server did not confirm deleting {:?}", report.failed);
        }
        Ok(())
    }
}

fn report_write(id: i64, action: &str, status: SyncStatus) {
    match status {
        SyncStatus::Synced => println!("#{id} {action}."),
        _ => eprintln!("#{id} {action} locally, but the server did not confirm it."),
    }
}

fn print_view(store: &TodoStore<UreqTransport>, filter: Filter) {
    let view = store.view(filter);
    if view.is_empty() {
        println!("No todos ({filter}).");
        return;
    }
    for (position, todo) in view.into_iter().enumerate() {
        println!("{}", render_line(position + 1, todo, store.sync_status(todo.id)));
    }
}

pub fn render_line(position: usize, todo: &Todo, status: Option<SyncStatus>) -> String {
    let check = if todo.completed_flg { "x" } else { " " };
    let mut line = format!("{position:>3}. [{check}] {}  (#{})", todo.content, todo.id);
    if status == Some(SyncStatus::Failed) {
        line.push_str("  (unsynced)");
    }
    line
}

pub fn render_detail(todo: &Todo) -> String {
    let check = if todo.completed_flg { "x" } else { " " };
    let place = if todo.delete_flg { "in trash" } else { "listed" };
    format!("#{} [{check}] {}  ({place}, sort {})", todo.id, todo.content, todo.sort)
}
