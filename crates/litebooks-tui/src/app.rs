//! Application state and logic

use std::time::Instant;

use litebooks_core::{filter_catalog, Book, BookDraft, Catalog, RemoteStore, Session};

/// Input mode for the catalog view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Incremental search (after pressing /)
    Search,
}

/// Editor form field focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Description,
    Category,
    Content,
}

impl EditorField {
    /// Move to the next field (wrapping)
    pub fn next(self) -> Self {
        match self {
            EditorField::Title => EditorField::Description,
            EditorField::Description => EditorField::Category,
            EditorField::Category => EditorField::Content,
            EditorField::Content => EditorField::Title,
        }
    }

    /// Move to the previous field (wrapping)
    pub fn prev(self) -> Self {
        match self {
            EditorField::Title => EditorField::Content,
            EditorField::Description => EditorField::Title,
            EditorField::Category => EditorField::Description,
            EditorField::Content => EditorField::Category,
        }
    }
}

/// Editor screen context: the draft plus save routing
#[derive(Debug, Clone, PartialEq)]
pub struct EditorForm {
    pub draft: BookDraft,
    /// Record being edited; `None` when creating
    pub target: Option<Book>,
    pub is_editing: bool,
    pub field: EditorField,
}

impl EditorForm {
    /// Fresh draft for a new record
    pub fn create() -> Self {
        Self {
            draft: BookDraft::default(),
            target: None,
            is_editing: false,
            field: EditorField::Title,
        }
    }

    /// Draft populated from an existing record
    pub fn edit(book: &Book) -> Self {
        Self {
            draft: BookDraft::from_book(book),
            target: Some(book.clone()),
            is_editing: true,
            field: EditorField::Title,
        }
    }

    /// The text buffer for the focused field, if it is a text field
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            EditorField::Title => Some(&mut self.draft.title),
            EditorField::Description => Some(&mut self.draft.description),
            EditorField::Category | EditorField::Content => None,
        }
    }
}

/// Login screen context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub field: LoginField,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            field: LoginField::Email,
        }
    }

    pub fn focused_text_mut(&mut self) -> &mut String {
        match self.field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_field(&mut self) {
        self.field = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

/// Active screen. Each variant carries exactly the context it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Catalog,
    Reader { book: Book },
    Editor(EditorForm),
    Login(LoginForm),
}

/// Discriminant used for key dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Catalog,
    Reader,
    Editor,
    Login,
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::Catalog => ViewKind::Catalog,
            View::Reader { .. } => ViewKind::Reader,
            View::Editor(_) => ViewKind::Editor,
            View::Login(_) => ViewKind::Login,
        }
    }
}

/// Application state
pub struct App<S> {
    /// The synchronized collection and its remote store
    pub catalog: Catalog<S>,
    /// Current auth session; presence unlocks the admin affordances
    pub session: Option<Session>,
    /// Active screen
    pub view: View,
    /// Current input mode (catalog view only)
    pub input_mode: InputMode,
    /// Live search query
    pub search_query: String,
    /// Selected index into the filtered catalog
    pub selected: usize,
    /// Scroll offset in the reader view
    pub reader_scroll: u16,
    /// Remote record awaiting delete confirmation
    pub pending_delete: Option<Book>,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<Instant>,
    /// Blocking error modal content
    pub error_message: Option<String>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl<S: RemoteStore> App<S> {
    pub fn new(catalog: Catalog<S>) -> Self {
        Self {
            catalog,
            session: None,
            view: View::Catalog,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            selected: 0,
            reader_scroll: 0,
            pending_delete: None,
            status_message: None,
            status_message_time: None,
            error_message: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Whether the viewer holds the admin affordances
    pub fn is_admin(&self) -> bool {
        self.session.is_some()
    }

    /// The display subset: search and visibility applied, order preserved
    pub fn visible_books(&self) -> Vec<&Book> {
        filter_catalog(self.catalog.books(), &self.search_query, self.is_admin())
    }

    /// The record under the cursor, if any
    pub fn selected_book(&self) -> Option<&Book> {
        self.visible_books().get(self.selected).copied()
    }

    /// Keep the cursor inside the filtered list
    pub fn clamp_selection(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let len = self.visible_books().len();
        if self.selected < len.saturating_sub(1) {
            self.selected += 1;
        }
    }

    pub fn move_to_first(&mut self) {
        self.selected = 0;
    }

    pub fn move_to_last(&mut self) {
        self.selected = self.visible_books().len().saturating_sub(1);
    }

    /// Set a status message (auto-dismissed after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > std::time::Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Raise the blocking error modal
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    // ---- view transitions ----

    /// catalog -> reader, carrying the selected record
    pub fn open_reader(&mut self) {
        if let Some(book) = self.selected_book().cloned() {
            self.reader_scroll = 0;
            self.view = View::Reader { book };
        }
    }

    /// catalog -> editor in create mode (admin only; caller gates)
    pub fn open_editor_create(&mut self) {
        if self.is_admin() {
            self.view = View::Editor(EditorForm::create());
        }
    }

    /// catalog/reader -> editor in edit mode (admin only; caller gates)
    pub fn open_editor_edit(&mut self, book: &Book) {
        if self.is_admin() {
            self.view = View::Editor(EditorForm::edit(book));
        }
    }

    /// any -> login (only reachable while anonymous)
    pub fn open_login(&mut self) {
        if !self.is_admin() {
            self.view = View::Login(LoginForm::new());
        }
    }

    /// Back to the catalog, discarding any screen context
    pub fn back_to_catalog(&mut self) {
        self.view = View::Catalog;
        self.clamp_selection();
    }

    // ---- async actions ----

    /// Re-fetch the collection and keep the cursor in bounds
    pub async fn refresh(&mut self) {
        self.catalog.refresh().await;
        self.clamp_selection();
    }

    /// Submit the login form; stays on the login view on failure
    pub async fn submit_login(&mut self) {
        let View::Login(form) = &self.view else {
            return;
        };
        let email = form.email.trim().to_string();
        let password = form.password.clone();
        if email.is_empty() || password.is_empty() {
            self.set_error("Email and password are required");
            return;
        }

        match self.catalog.sign_in(&email, &password).await {
            Ok(session) => {
                let name = session.display_name().to_string();
                self.session = Some(session);
                self.view = View::Catalog;
                self.refresh().await;
                self.set_status(format!("Signed in as {name}"));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// End the session; the view stays on the catalog
    pub async fn sign_out(&mut self) {
        if self.session.is_none() {
            return;
        }
        let result = self.catalog.sign_out().await;
        self.session = None;
        self.view = View::Catalog;
        self.clamp_selection();
        match result {
            Ok(()) => self.set_status("Signed out"),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Save the editor draft; on failure the view and draft are untouched
    pub async fn submit_save(&mut self) {
        let View::Editor(form) = &self.view else {
            return;
        };
        let draft = form.draft.clone();
        let target = form.target.clone();

        match self.catalog.save(&draft, target.as_ref()).await {
            Ok(()) => {
                self.view = View::Catalog;
                self.clamp_selection();
                self.set_status("Saved");
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Delete the record under the cursor.
    ///
    /// Samples are dismissed immediately; remote records go through the
    /// confirmation overlay first.
    pub async fn delete_selected(&mut self) {
        let Some(book) = self.selected_book().cloned() else {
            return;
        };
        if book.is_local {
            match self.catalog.delete(&book.id).await {
                Ok(()) => {
                    self.clamp_selection();
                    self.set_status(format!("Dismissed sample '{}'", book.title));
                }
                Err(e) => self.set_error(e.to_string()),
            }
        } else {
            self.pending_delete = Some(book);
        }
    }

    /// Confirm the pending remote delete
    pub async fn confirm_pending_delete(&mut self) {
        let Some(book) = self.pending_delete.take() else {
            return;
        };
        match self.catalog.delete(&book.id).await {
            Ok(()) => {
                self.clamp_selection();
                self.set_status(format!("Deleted '{}'", book.title));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn cancel_pending_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Toggle visibility of the record under the cursor
    pub async fn toggle_hidden_selected(&mut self) {
        let Some(book) = self.selected_book().cloned() else {
            return;
        };
        match self.catalog.toggle_hidden(&book.id).await {
            Ok(()) => {
                let message = if book.is_hidden {
                    format!("'{}' is visible to readers", book.title)
                } else {
                    format!("'{}' is hidden from readers", book.title)
                };
                self.set_status(message);
            }
            Err(e) => self.set_error(e.to_string()),
        }
        self.clamp_selection();
    }
}
