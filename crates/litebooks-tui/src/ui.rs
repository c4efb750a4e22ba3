//! UI rendering

use litebooks_core::{Book, Category, RemoteStore};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, EditorField, EditorForm, InputMode, LoginField, LoginForm, View, ViewKind};

/// Main UI rendering function
pub fn draw<S: RemoteStore>(frame: &mut Frame, app: &App<S>) {
    // Main area with a one-line status bar at the bottom
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    match &app.view {
        View::Catalog => draw_catalog(frame, app, outer_chunks[0]),
        View::Reader { book } => draw_reader(frame, app, book, outer_chunks[0]),
        View::Editor(form) => draw_editor(frame, form, outer_chunks[0]),
        View::Login(form) => draw_login(frame, form, outer_chunks[0]),
    }

    draw_status_bar(frame, app, outer_chunks[1]);

    // Overlays, last so they sit on top
    if let Some(book) = &app.pending_delete {
        draw_confirm_overlay(frame, book);
    }
    if let Some(message) = &app.error_message {
        draw_error_overlay(frame, message);
    }
    if app.show_help {
        draw_help_overlay(frame, app);
    }
}

/// Catalog view: book list on the left, detail preview on the right
fn draw_catalog<S: RemoteStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    draw_search_bar(frame, app, chunks[0]);

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    draw_book_list(frame, app, pane_chunks[0]);
    draw_book_detail(frame, app, pane_chunks[1]);
}

fn draw_search_bar<S: RemoteStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let searching = app.input_mode == InputMode::Search;
    let text = if searching {
        // Trailing block as a poor man's cursor
        format!("/{}▌", app.search_query)
    } else if app.search_query.is_empty() {
        "Press / to search".to_string()
    } else {
        format!("/{}", app.search_query)
    };

    let style = if searching {
        Style::default().fg(Color::Yellow)
    } else if app.search_query.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" LiteBooks ")
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(Paragraph::new(text).style(style).block(block), area);
}

fn draw_book_list<S: RemoteStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Catalog ");

    if app.catalog.is_loading() {
        let loading = Paragraph::new("Loading catalog…")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    let books = app.visible_books();
    if books.is_empty() {
        let empty = Paragraph::new("No books match.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = books
        .iter()
        .map(|book| {
            let mut spans = vec![Span::raw(book.title.clone())];
            spans.push(Span::styled(
                format!("  [{}]", book.category.label()),
                Style::default().fg(category_color(book.category)),
            ));
            if book.is_hidden {
                spans.push(Span::styled(
                    "  hidden",
                    Style::default().fg(Color::Red),
                ));
            }
            if book.is_local {
                spans.push(Span::styled(
                    "  sample",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Indexed(237))
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_book_detail<S: RemoteStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Detail ");

    let Some(book) = app.selected_book() else {
        frame.render_widget(block, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            book.category.label(),
            Style::default().fg(category_color(book.category)),
        )),
        Line::from(""),
    ];
    if !book.description.is_empty() {
        lines.push(Line::from(book.description.clone()));
        lines.push(Line::from(""));
    }
    if let Some(created) = book.created_at {
        lines.push(Line::from(Span::styled(
            format!("Created {}", created.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if book.is_local {
        lines.push(Line::from(Span::styled(
            "Built-in sample (not stored remotely)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    if book.is_hidden {
        lines.push(Line::from(Span::styled(
            "Hidden from anonymous readers",
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter to read",
        Style::default().fg(Color::DarkGray),
    )));

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(detail, area);
}

/// Reader view: header plus scrollable markdown body
fn draw_reader<S: RemoteStore>(frame: &mut Frame, app: &App<S>, book: &Book, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let header_lines = vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            book.category.label(),
            Style::default().fg(category_color(book.category)),
        )),
        Line::from(Span::styled(
            book.description.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let header = Paragraph::new(header_lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(header, chunks[0]);

    let body = Paragraph::new(book.content.as_str())
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((app.reader_scroll, 0));
    frame.render_widget(body, chunks[1]);
}

/// Editor view: form on the left, draft preview on the right
fn draw_editor(frame: &mut Frame, form: &EditorForm, area: Rect) {
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let title = if form.is_editing {
        " Edit Book "
    } else {
        " New Book "
    };

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(pane_chunks[0]);

    draw_form_field(
        frame,
        "Title",
        &form.draft.title,
        form.field == EditorField::Title,
        form_chunks[0],
    );
    draw_form_field(
        frame,
        "Description",
        &form.draft.description,
        form.field == EditorField::Description,
        form_chunks[1],
    );

    // Category: cycles with ←/→ rather than taking text
    let category_line = Line::from(
        Category::ALL
            .iter()
            .flat_map(|c| {
                let style = if *c == form.draft.category {
                    Style::default()
                        .fg(category_color(*c))
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                [Span::styled(c.label().to_string(), style), Span::raw("  ")]
            })
            .collect::<Vec<_>>(),
    );
    let category = Paragraph::new(category_line).block(
        field_block("Category", form.field == EditorField::Category),
    );
    frame.render_widget(category, form_chunks[2]);

    let content_summary = if form.draft.content.trim().is_empty() {
        "(empty) - press Enter to write in $EDITOR".to_string()
    } else {
        format!(
            "{} lines - press Enter to edit in $EDITOR",
            form.draft.content.lines().count()
        )
    };
    let content = Paragraph::new(content_summary)
        .style(Style::default().fg(Color::DarkGray))
        .block(field_block("Content (markdown)", form.field == EditorField::Content));
    frame.render_widget(content, form_chunks[3]);

    // Draft preview pane
    let mut preview_lines = vec![
        Line::from(Span::styled(
            if form.draft.title.is_empty() {
                "Untitled".to_string()
            } else {
                form.draft.title.clone()
            },
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            form.draft.description.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    for line in form.draft.content.lines() {
        preview_lines.push(Line::from(line.to_string()));
    }
    let preview = Paragraph::new(preview_lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(preview, pane_chunks[1]);
}

/// Login view: centered credentials box
fn draw_login(frame: &mut Frame, form: &LoginForm, area: Rect) {
    let box_area = centered_rect(50, 11, area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Admin Login ");
    frame.render_widget(Clear, box_area);
    frame.render_widget(&outer, box_area);

    let inner = outer.inner(box_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(inner);

    draw_form_field(
        frame,
        "Email",
        &form.email,
        form.field == LoginField::Email,
        chunks[0],
    );
    let masked = "•".repeat(form.password.chars().count());
    draw_form_field(
        frame,
        "Password",
        &masked,
        form.field == LoginField::Password,
        chunks[1],
    );

    let hint = Paragraph::new("Enter: sign in   Tab: switch field   Esc: back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[2]);
}

fn draw_form_field(frame: &mut Frame, label: &str, value: &str, focused: bool, area: Rect) {
    let text = if focused {
        format!("{value}▌")
    } else {
        value.to_string()
    };
    let field = Paragraph::new(text).block(field_block(label, focused));
    frame.render_widget(field, area);
}

fn field_block(label: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(format!(" {label} "))
}

/// Bottom status bar: key hints, session, transient status
fn draw_status_bar<S: RemoteStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let hints = match app.view.kind() {
        ViewKind::Catalog => {
            if app.input_mode == InputMode::Search {
                "type to search  Enter:done  Esc:clear"
            } else if app.is_admin() {
                "j/k:move  Enter:read  n:new  e:edit  d:delete  v:visibility  r:refresh  o:sign out  ?:help  q:quit"
            } else {
                "j/k:move  Enter:read  /:search  r:refresh  i:sign in  ?:help  q:quit"
            }
        }
        ViewKind::Reader => {
            if app.is_admin() {
                "j/k:scroll  e:edit  Esc:back"
            } else {
                "j/k:scroll  Esc:back"
            }
        }
        ViewKind::Editor => "Tab:next field  Ctrl+S:save  Esc:cancel",
        ViewKind::Login => "Enter:sign in  Tab:switch field  Esc:back",
    };

    let session = match &app.session {
        Some(session) => session.display_name().to_string(),
        None => "anonymous".to_string(),
    };
    let mode = if app.catalog.is_configured() {
        ""
    } else {
        "  [local-only]"
    };

    let left = app
        .status_message
        .clone()
        .unwrap_or_else(|| hints.to_string());
    let right = format!("{session}{mode}");

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(right.len() as u16 + 1)])
        .split(area);

    frame.render_widget(
        Paragraph::new(left).style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(right)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        chunks[1],
    );
}

fn draw_confirm_overlay(frame: &mut Frame, book: &Book) {
    let area = centered_rect(60, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete '{}' permanently?", book.title),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y: delete   n/Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Confirm "),
        );
    frame.render_widget(dialog, area);
}

fn draw_error_overlay(frame: &mut Frame, message: &str) {
    let area = centered_rect(60, 8, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    frame.render_widget(dialog, area);
}

fn draw_help_overlay<S: RemoteStore>(frame: &mut Frame, app: &App<S>) {
    let area = centered_rect(64, 16, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Catalog",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  j/k or ↑/↓   move selection"),
        Line::from("  Enter        open the reader"),
        Line::from("  /            incremental search (title or category)"),
        Line::from("  r            refresh from the remote store"),
        Line::from("  g/G          jump to first/last"),
    ];
    if app.is_admin() {
        lines.extend([
            Line::from(""),
            Line::from(Span::styled(
                "Admin",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  n            new book"),
            Line::from("  e            edit selected (also from the reader)"),
            Line::from("  d            delete selected (samples are dismissed)"),
            Line::from("  v            toggle hidden/public"),
            Line::from("  o            sign out"),
        ]);
    } else {
        lines.extend([
            Line::from(""),
            Line::from("  i            sign in to manage the catalog"),
        ]);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "press any key to close",
        Style::default().fg(Color::DarkGray),
    )));

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help "),
    );
    frame.render_widget(dialog, area);
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Programming => Color::Cyan,
        Category::DevOps => Color::Green,
        Category::UiUx => Color::Magenta,
        Category::General => Color::Blue,
    }
}

/// Center a fixed-height box horizontally and vertically
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
