//! LiteBooks TUI
//!
//! Terminal client for a markdown book catalog backed by a hosted store.
//! Anonymous readers browse and search the public catalog; signed-in
//! admins create, edit, hide, and delete books. Without a configured
//! remote endpoint the client runs local-only against the built-in
//! samples.
//!
//! ## Views
//!
//! - Catalog: searchable book list with a detail pane
//! - Reader: full markdown content of the selected book
//! - Editor: create/edit form with draft preview ($EDITOR for content)
//! - Login: email/password sign-in
//!
//! ## Navigation
//!
//! - j/k or ↑/↓: Move selection / scroll
//! - Enter: Open the selected book
//! - /: Incremental search
//! - ?: Help overlay
//! - q: Quit

mod app;
mod editor;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use litebooks_core::{Catalog, Config, RemoteStore, RestStore};

use app::{App, EditorField, InputMode, View, ViewKind};

#[derive(Parser)]
#[command(name = "litebooks")]
#[command(about = "LiteBooks - a terminal client for a markdown book catalog")]
#[command(version)]
struct Cli {
    /// Path to an alternate config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ignore any remote configuration and browse the built-in samples
    #[arg(long)]
    local: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path).unwrap_or_default(),
        None => Config::load_or_default(),
    };

    init_tui_logging(&config);

    let store = if cli.local {
        None
    } else {
        RestStore::from_config(&config)
    };
    let mut app = App::new(Catalog::new(store));

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend, S: RemoteStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    // Initial fetch (may seed an empty remote collection)
    app.refresh().await;

    loop {
        app.check_status_timeout();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // If the error modal is showing, any key dismisses it
                if app.has_error() {
                    app.clear_error();
                    continue;
                }

                // If help is showing, any key dismisses it
                if app.show_help {
                    app.show_help = false;
                    continue;
                }

                // Delete confirmation overlay captures input
                if app.pending_delete.is_some() {
                    handle_confirm_key(app, key.code).await;
                    continue;
                }

                match app.view.kind() {
                    ViewKind::Catalog => {
                        handle_catalog_key(app, key.code, key.modifiers).await
                    }
                    ViewKind::Reader => handle_reader_key(app, key.code),
                    ViewKind::Editor => {
                        handle_editor_key(terminal, app, key.code, key.modifiers).await?
                    }
                    ViewKind::Login => handle_login_key(app, key.code, key.modifiers).await,
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Keys on the delete confirmation overlay
async fn handle_confirm_key<S: RemoteStore>(app: &mut App<S>, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.confirm_pending_delete().await;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.cancel_pending_delete();
        }
        _ => {}
    }
}

/// Keys in the catalog view
async fn handle_catalog_key<S: RemoteStore>(
    app: &mut App<S>,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    // Incremental search captures text input
    if app.input_mode == InputMode::Search {
        match code {
            KeyCode::Esc => {
                app.search_query.clear();
                app.input_mode = InputMode::Normal;
                app.clamp_selection();
            }
            KeyCode::Enter => {
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Char(c) => {
                app.search_query.push(c);
                app.clamp_selection();
            }
            KeyCode::Backspace => {
                app.search_query.pop();
                app.clamp_selection();
            }
            _ => {}
        }
        return;
    }

    match code {
        // Quit
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('g') => app.move_to_first(),
        KeyCode::Char('G') => app.move_to_last(),

        // Open the reader
        KeyCode::Enter => app.open_reader(),

        // Search
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_query.clear();
            app.clamp_selection();
        }

        // Manual refresh
        KeyCode::Char('r') => {
            app.refresh().await;
            app.set_status("Refreshed");
        }

        // Help
        KeyCode::Char('?') => {
            app.show_help = true;
        }

        // Sign in (anonymous only; the key is simply absent otherwise)
        KeyCode::Char('i') if !app.is_admin() => app.open_login(),

        // Admin affordances; unavailable rather than erroring while anonymous
        KeyCode::Char('n') if app.is_admin() => app.open_editor_create(),
        KeyCode::Char('e') if app.is_admin() => {
            if let Some(book) = app.selected_book().cloned() {
                app.open_editor_edit(&book);
            }
        }
        KeyCode::Char('d') if app.is_admin() => app.delete_selected().await,
        KeyCode::Char('v') if app.is_admin() => app.toggle_hidden_selected().await,
        KeyCode::Char('o') if app.is_admin() => app.sign_out().await,

        _ => {}
    }
}

/// Keys in the reader view
fn handle_reader_key<S: RemoteStore>(app: &mut App<S>, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => app.back_to_catalog(),
        KeyCode::Char('k') | KeyCode::Up => {
            app.reader_scroll = app.reader_scroll.saturating_sub(1);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.reader_scroll = app.reader_scroll.saturating_add(1);
        }
        KeyCode::Char('g') => app.reader_scroll = 0,
        KeyCode::Char('e') if app.is_admin() => {
            let book = match &app.view {
                View::Reader { book } => Some(book.clone()),
                _ => None,
            };
            if let Some(book) = book {
                app.open_editor_edit(&book);
            }
        }
        _ => {}
    }
}

/// Keys in the editor view
async fn handle_editor_key<B: Backend, S: RemoteStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Result<()> {
    // Save from any field
    if code == KeyCode::Char('s') && modifiers.contains(KeyModifiers::CONTROL) {
        app.submit_save().await;
        return Ok(());
    }

    // Cancel: the draft is discarded
    if code == KeyCode::Esc {
        app.back_to_catalog();
        return Ok(());
    }

    let View::Editor(form) = &mut app.view else {
        return Ok(());
    };

    match code {
        KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
        KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),

        KeyCode::Left if form.field == EditorField::Category => {
            form.draft.category = form.draft.category.prev();
        }
        KeyCode::Right if form.field == EditorField::Category => {
            form.draft.category = form.draft.category.next();
        }

        // Content round-trips through $EDITOR with the TUI suspended
        KeyCode::Enter if form.field == EditorField::Content => {
            let initial = form.draft.content.clone();

            disable_raw_mode()?;
            stdout().execute(LeaveAlternateScreen)?;
            stdout().execute(cursor::Show)?;

            let edited = editor::edit_markdown(&initial);

            enable_raw_mode()?;
            stdout().execute(EnterAlternateScreen)?;
            terminal.clear()?;

            match edited {
                Ok(content) => {
                    if let View::Editor(form) = &mut app.view {
                        form.draft.content = content;
                    }
                }
                Err(e) => app.set_error(format!("Editor failed: {}", e)),
            }
        }

        // Enter advances through the text fields
        KeyCode::Enter => form.field = form.field.next(),

        KeyCode::Char(c) => {
            if let Some(text) = form.focused_text_mut() {
                text.push(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(text) = form.focused_text_mut() {
                text.pop();
            }
        }

        _ => {}
    }

    Ok(())
}

/// Keys in the login view
async fn handle_login_key<S: RemoteStore>(
    app: &mut App<S>,
    code: KeyCode,
    modifiers: KeyModifiers,
) {
    if code == KeyCode::Esc
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
    {
        app.back_to_catalog();
        return;
    }

    if code == KeyCode::Enter {
        app.submit_login().await;
        return;
    }

    let View::Login(form) = &mut app.view else {
        return;
    };

    match code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => form.toggle_field(),
        KeyCode::Char(c) => form.focused_text_mut().push(c),
        KeyCode::Backspace => {
            form.focused_text_mut().pop();
        }
        _ => {}
    }
}

/// Initialize logging for TUI mode
///
/// Only initializes if the LITEBOOKS_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("LITEBOOKS_LOG") else {
        return;
    };

    let log_path = config.log_file_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "litebooks_core={},litebooks_tui={}",
        log_level, log_level
    ));

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
