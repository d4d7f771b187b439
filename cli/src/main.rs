mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use todolist_core::Filter;

use commands::App;
use config::Config;

#[derive(Parser)]
#[command(name = "todolist", about = "Todo list client for the todolist API")]
struct Cli {
    /// Config file (default: <config dir>/todolist/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create an account and sign in
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        password_confirmation: Option<String>,
    },
    /// Sign in and store the session credentials
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the session and forget the stored credentials
    SignOut,
    /// List todos
    List {
        /// all, completed, unchecked or delete (alias: trash)
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },
    /// Show one todo as stored on the server
    Show { id: i64 },
    /// Add a todo at the top of the list
    Add { content: String },
    /// Change a todo's text
    Edit { id: i64, content: String },
    /// Mark a todo completed
    Done { id: i64 },
    /// Mark a todo not completed
    Undone { id: i64 },
    /// Flip a todo's completed flag
    Toggle { id: i64 },
    /// Move a todo to the trash
    Rm { id: i64 },
    /// Take a todo out of the trash
    Restore { id: i64 },
    /// Move the todo at position FROM to position TO within a view
    Move {
        from: usize,
        /// Omit to cancel the move
        to: Option<usize>,
        /// all, completed, unchecked or delete (alias: trash)
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },
    /// Permanently delete everything in the trash
    EmptyTrash,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose)?;

    let mut app = App::new(config)?;
    match cli.command {
        Cmd::SignUp {
            email,
            password,
            password_confirmation,
        } => app.sign_up(email, password, password_confirmation),
        Cmd::SignIn { email, password } => app.sign_in(email, password),
        Cmd::SignOut => app.sign_out(),
        Cmd::List { filter } => app.list(filter),
        Cmd::Show { id } => app.show(id),
        Cmd::Add { content } => app.add(&content),
        Cmd::Edit { id, content } => app.edit(id, &content),
        Cmd::Done { id } => app.set_completed(id, Some(true)),
        Cmd::Undone { id } => app.set_completed(id, Some(false)),
        Cmd::Toggle { id } => app.set_completed(id, None),
        Cmd::Rm { id } => app.trash(id, true),
        Cmd::Restore { id } => app.trash(id, false),
        Cmd::Move { from, to, filter } => app.move_item(filter, from, to),
        Cmd::EmptyTrash => app.empty_trash(),
    }
}
