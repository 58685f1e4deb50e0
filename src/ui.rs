use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pokedex::{capitalize, Config, Controller, Pokemon, PokemonSource, Presenter, TypeRegistry, UiEvent};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use futures::StreamExt;
use std::collections::BTreeSet;
use std::io;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Types,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Table => Focus::Types,
            Focus::Types => Focus::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
}

/// What a key press asks the run loop to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Emit(UiEvent),
}

/// Everything the screen shows, independent of the terminal
pub struct ViewState {
    pub rows: Vec<Pokemon>,
    pub type_options: Vec<String>,
    pub selected_types: BTreeSet<String>,
    pub search: String,
    pub invert: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub no_results: bool,
    /// Clock time of the last successful load
    pub loaded_at: Option<String>,
    pub show_detail: bool,
    pub focus: Focus,
    pub mode: InputMode,
    pub table_state: TableState,
    pub types_state: ListState,
    pub registry: TypeRegistry,
}

impl ViewState {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            rows: Vec::new(),
            type_options: Vec::new(),
            selected_types: BTreeSet::new(),
            search: String::new(),
            invert: false,
            loading: false,
            error: None,
            no_results: false,
            loaded_at: None,
            show_detail: false,
            focus: Focus::Table,
            mode: InputMode::Browse,
            table_state: TableState::default(),
            types_state: ListState::default(),
            registry,
        }
    }

    pub fn selected_pokemon(&self) -> Option<&Pokemon> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
    }

    pub fn next(&mut self) {
        match self.focus {
            Focus::Table => step(&mut self.table_state, self.rows.len(), 1),
            Focus::Types => step_list(&mut self.types_state, self.type_options.len(), 1),
        }
    }

    pub fn previous(&mut self) {
        match self.focus {
            Focus::Table => step(&mut self.table_state, self.rows.len(), -1),
            Focus::Types => step_list(&mut self.types_state, self.type_options.len(), -1),
        }
    }

    pub fn page_down(&mut self) {
        if self.focus == Focus::Table && !self.rows.is_empty() {
            let i = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some((i + 20).min(self.rows.len() - 1)));
        }
    }

    pub fn page_up(&mut self) {
        if self.focus == Focus::Table {
            let i = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(i.saturating_sub(20)));
        }
    }

    /// Flip the type under the cursor; returns the new selection
    pub fn toggle_type_under_cursor(&mut self) -> Option<Vec<String>> {
        let label = self.types_state.selected().and_then(|i| self.type_options.get(i))?.clone();
        if !self.selected_types.remove(&label) {
            self.selected_types.insert(label);
        }
        Some(self.selected_types.iter().cloned().collect())
    }
}

fn step(state: &mut TableState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let i = match state.selected() {
        Some(i) => wrap(i, len, delta),
        None => 0,
    };
    state.select(Some(i));
}

fn step_list(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let i = match state.selected() {
        Some(i) => wrap(i, len, delta),
        None => 0,
    };
    state.select(Some(i));
}

fn wrap(i: usize, len: usize, delta: isize) -> usize {
    (i as isize + delta).rem_euclid(len as isize) as usize
}

/// Map a key press onto view changes and, when filters change, a UiEvent
pub fn handle_key(view: &mut ViewState, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if view.mode == InputMode::Search {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                view.mode = InputMode::Browse;
                Action::None
            }
            KeyCode::Backspace => {
                if view.search.pop().is_some() {
                    Action::Emit(UiEvent::QueryChanged(view.search.clone()))
                } else {
                    Action::None
                }
            }
            KeyCode::Char(c) => {
                view.search.push(c);
                Action::Emit(UiEvent::QueryChanged(view.search.clone()))
            }
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('/') => {
            view.mode = InputMode::Search;
            Action::None
        }
        KeyCode::Char('r') if view.error.is_some() => Action::Emit(UiEvent::RetryClicked),
        KeyCode::Char('n') => {
            view.invert = !view.invert;
            Action::Emit(UiEvent::InvertToggled(view.invert))
        }
        KeyCode::Char(' ') if view.focus == Focus::Types => match view.toggle_type_under_cursor() {
            Some(types) => Action::Emit(UiEvent::TypesChanged(types)),
            None => Action::None,
        },
        KeyCode::Char('x') => {
            if view.selected_types.is_empty() {
                return Action::None;
            }
            view.selected_types.clear();
            Action::Emit(UiEvent::TypesChanged(Vec::new()))
        }
        KeyCode::Tab => {
            view.focus = view.focus.next();
            if view.focus == Focus::Types && view.types_state.selected().is_none() && !view.type_options.is_empty() {
                view.types_state.select(Some(0));
            }
            Action::None
        }
        KeyCode::Enter => {
            view.show_detail = !view.show_detail;
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view.next();
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view.previous();
            Action::None
        }
        KeyCode::PageDown => {
            view.page_down();
            Action::None
        }
        KeyCode::PageUp => {
            view.page_up();
            Action::None
        }
        KeyCode::Home => {
            if !view.rows.is_empty() {
                view.table_state.select(Some(0));
            }
            Action::None
        }
        KeyCode::End => {
            if !view.rows.is_empty() {
                view.table_state.select(Some(view.rows.len() - 1));
            }
            Action::None
        }
        _ => Action::None,
    }
}

// ============================================================================
// PRESENTER
// ============================================================================

pub struct TuiPresenter<B: Backend> {
    terminal: Terminal<B>,
    pub view: ViewState,
}

impl<B: Backend> TuiPresenter<B> {
    pub fn new(terminal: Terminal<B>, registry: TypeRegistry) -> Self {
        Self {
            terminal,
            view: ViewState::new(registry),
        }
    }

    pub fn draw(&mut self) -> io::Result<()> {
        let view = &mut self.view;
        self.terminal.draw(|f| ui(f, view))?;
        Ok(())
    }

    /// Redraw from inside a Presenter hook, where errors cannot propagate
    fn redraw(&mut self) {
        if let Err(err) = self.draw() {
            warn!(error = %err, "redraw failed");
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Presenter for TuiPresenter<B> {
    fn show_loading(&mut self) {
        self.view.loading = true;
        // The load awaits right after this; paint now or the spinner never shows
        self.redraw();
    }

    fn hide_loading(&mut self) {
        self.view.loading = false;
        self.redraw();
    }

    fn show_error(&mut self, message: &str) {
        self.view.error = Some(message.to_string());
    }

    fn hide_error(&mut self) {
        self.view.error = None;
    }

    fn set_no_results(&mut self, visible: bool) {
        self.view.no_results = visible;
    }

    fn render(&mut self, records: &[&Pokemon]) {
        self.view.rows = records.iter().map(|p| (*p).clone()).collect();
        if self.view.rows.is_empty() {
            self.view.table_state.select(None);
        } else {
            self.view.table_state.select(Some(0));
        }
    }

    fn populate_types(&mut self, labels: &[String]) {
        self.view.type_options = labels.to_vec();
        self.view.selected_types.retain(|t| labels.contains(t));
        self.view.types_state.select(if labels.is_empty() { None } else { Some(0) });
    }
}

// ============================================================================
// RUN LOOP
// ============================================================================

pub async fn run_ui<S>(source: S, config: &Config) -> Result<()>
where
    S: PokemonSource + Sync,
{
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let presenter = TuiPresenter::new(terminal, TypeRegistry::with_defaults());
    let mut controller = Controller::new(source, presenter, config);

    // Run the app
    let res = run_app(&mut controller).await;

    // Restore terminal
    disable_raw_mode()?;
    let terminal = controller.presenter_mut().terminal_mut();
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<S, B>(controller: &mut Controller<S, TuiPresenter<B>>) -> Result<()>
where
    S: PokemonSource + Sync,
    B: Backend,
{
    // Failure is already on screen with a retry hint
    let _ = controller.load().await;
    sync_after_load(controller).await;

    let mut events = EventStream::new();

    loop {
        controller.presenter_mut().draw()?;

        let Some(event) = events.next().await else {
            return Ok(());
        };

        if let Event::Key(key) = event? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_key(&mut controller.presenter_mut().view, key) {
                Action::Quit => return Ok(()),
                Action::Emit(ui_event) => {
                    let reloaded = ui_event == UiEvent::RetryClicked;
                    let _ = controller.handle(ui_event).await;
                    if reloaded {
                        sync_after_load(controller).await;
                    }
                }
                Action::None => {}
            }
        }
    }
}

/// Copy the load time into the view and hand a pruned type checklist back
/// to the controller, so both filter on the same selection.
async fn sync_after_load<S, B>(controller: &mut Controller<S, TuiPresenter<B>>)
where
    S: PokemonSource + Sync,
    B: Backend,
{
    let loaded_at = controller.catalog().loaded_label();
    controller.presenter_mut().view.loaded_at = loaded_at;

    let selected = &controller.presenter().view.selected_types;
    if *selected == controller.query().types {
        return;
    }

    let types: Vec<String> = selected.iter().cloned().collect();
    let _ = controller.handle(UiEvent::TypesChanged(types)).await;
}

// ============================================================================
// DRAWING
// ============================================================================

fn ui(f: &mut Frame, view: &mut ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search + filter summary
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], view);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65), // Pokémon list
            Constraint::Percentage(35), // Types or detail panel
        ])
        .split(chunks[1]);

    if view.no_results {
        render_no_results(f, content_chunks[0]);
    } else {
        render_table(f, content_chunks[0], view);
    }

    if view.show_detail {
        render_detail_panel(f, content_chunks[1], view);
    } else {
        render_types(f, content_chunks[1], view);
    }

    render_status_bar(f, chunks[2], view);

    if view.loading {
        render_popup(f, " Loading ", "⏳ Loading Pokémon...", Color::Cyan);
    } else if let Some(message) = &view.error {
        let text = format!("{}\n\nPress r to retry, q to quit.", message);
        render_popup(f, " Error ", &text, Color::Red);
    }
}

fn render_header(f: &mut Frame, area: Rect, view: &ViewState) {
    let search_style = if view.mode == InputMode::Search {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let cursor = if view.mode == InputMode::Search { "▏" } else { "" };

    let mut spans = vec![
        Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}{}", view.search, cursor), search_style),
        Span::raw("  |  "),
    ];

    let invert_style = if view.invert {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    spans.push(Span::styled(
        format!("[{}] NOT", if view.invert { "x" } else { " " }),
        invert_style,
    ));

    spans.push(Span::raw("  |  "));
    spans.push(Span::styled(
        format!("Showing: {}", view.rows.len()),
        Style::default().fg(Color::White),
    ));

    if let Some(at) = &view.loaded_at {
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(format!("Loaded {}", at), Style::default().fg(Color::DarkGray)));
    }

    if !view.selected_types.is_empty() {
        let labels: Vec<String> = view.selected_types.iter().map(|t| capitalize(t)).collect();
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(labels.join(", "), Style::default().fg(Color::Green)));
    }

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Pokédex "),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, view: &mut ViewState) {
    let header_cells = ["#", "Name", "Types"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let registry = &view.registry;
    let rows = view.rows.iter().map(|p| {
        let badges: Vec<Span> = p
            .types
            .iter()
            .flat_map(|t| {
                [
                    Span::styled(
                        capitalize(t),
                        Style::default().fg(hex_color(registry.color_for_label(t))),
                    ),
                    Span::raw(" "),
                ]
            })
            .collect();

        Row::new(vec![
            Cell::from(p.display_number()),
            Cell::from(truncate(&p.display_name(), 28)),
            Cell::from(Line::from(badges)),
        ])
        .height(1)
    });

    let border_color = if view.focus == Focus::Table { Color::Yellow } else { Color::White };

    let table = Table::new(
        rows,
        [Constraint::Length(7), Constraint::Length(30), Constraint::Min(10)],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Pokémon "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut view.table_state);
}

fn render_no_results(f: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("No Pokémon match the current filters.")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" Pokémon "));
    f.render_widget(paragraph, area);
}

fn render_types(f: &mut Frame, area: Rect, view: &mut ViewState) {
    let items: Vec<ListItem> = view
        .type_options
        .iter()
        .map(|t| {
            let mark = if view.selected_types.contains(t) { "[x] " } else { "[ ] " };
            ListItem::new(Line::from(vec![
                Span::raw(mark),
                Span::styled(capitalize(t), Style::default().fg(hex_color(view.registry.color_for_label(t)))),
            ]))
        })
        .collect();

    let border_color = if view.focus == Focus::Types { Color::Yellow } else { Color::White };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(" Types "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut view.types_state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, view: &ViewState) {
    let Some(p) = view.selected_pokemon() else {
        let empty = Paragraph::new("Nothing selected")
            .block(Block::default().borders(Borders::ALL).title(" Detail "));
        f.render_widget(empty, area);
        return;
    };

    let types: Vec<Span> = p
        .types
        .iter()
        .flat_map(|t| {
            [
                Span::styled(
                    capitalize(t),
                    Style::default()
                        .fg(hex_color(view.registry.color_for_label(t)))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]
        })
        .collect();

    let lines = vec![
        Line::from(Span::styled(
            p.display_name(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(p.display_number(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(types),
        Line::from(""),
        Line::from(Span::styled("Image:", Style::default().fg(Color::Yellow))),
        Line::from(p.image.clone()),
    ];

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Detail "));

    f.render_widget(detail, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, view: &ViewState) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let spans = if view.mode == InputMode::Search {
        vec![
            Span::styled(" SEARCH ", Style::default().fg(Color::Black).bg(Color::Yellow)),
            Span::raw(" type to filter | "),
            key("Enter/Esc"),
            Span::raw(" Done"),
        ]
    } else {
        let selected = view.table_state.selected().map(|i| i + 1).unwrap_or(0);
        vec![
            Span::styled(format!(" Row: {}/{} ", selected, view.rows.len()), Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            key("/"),
            Span::raw(" Search | "),
            key("Tab"),
            Span::raw(" Focus | "),
            key("Space"),
            Span::raw(" Type | "),
            key("x"),
            Span::raw(" Clear types | "),
            key("n"),
            Span::raw(" NOT | "),
            key("Enter"),
            Span::raw(" Details | "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" Quit"),
        ]
    };

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_popup(f: &mut Frame, title: &str, text: &str, color: Color) {
    let area = centered_rect(50, 25, f.size());
    let popup = Paragraph::new(text.to_string())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title.to_string()),
        );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// "#78C850" → Color::Rgb; anything else → White
fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Color::White;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex::{FilterQuery, IndexEntry, LoadError, RawPokemon};
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view_with_types() -> ViewState {
        let mut view = ViewState::new(TypeRegistry::with_defaults());
        view.type_options = vec!["planta".to_string(), "fuego".to_string(), "agua".to_string()];
        view
    }

    fn buffer_text(presenter: &TuiPresenter<TestBackend>) -> String {
        presenter
            .terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_search_mode_emits_query_changes() {
        let mut view = view_with_types();

        assert_eq!(handle_key(&mut view, press(KeyCode::Char('/'))), Action::None);
        assert_eq!(view.mode, InputMode::Search);

        assert_eq!(
            handle_key(&mut view, press(KeyCode::Char('p'))),
            Action::Emit(UiEvent::QueryChanged("p".to_string()))
        );
        // 'q' is text while searching, not quit
        assert_eq!(
            handle_key(&mut view, press(KeyCode::Char('q'))),
            Action::Emit(UiEvent::QueryChanged("pq".to_string()))
        );
        assert_eq!(
            handle_key(&mut view, press(KeyCode::Backspace)),
            Action::Emit(UiEvent::QueryChanged("p".to_string()))
        );

        handle_key(&mut view, press(KeyCode::Esc));
        assert_eq!(view.mode, InputMode::Browse);
        assert_eq!(handle_key(&mut view, press(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn test_type_toggle_emits_selection() {
        let mut view = view_with_types();

        // Space does nothing while the table has focus
        assert_eq!(handle_key(&mut view, press(KeyCode::Char(' '))), Action::None);

        handle_key(&mut view, press(KeyCode::Tab));
        assert_eq!(view.focus, Focus::Types);
        handle_key(&mut view, press(KeyCode::Down));

        assert_eq!(
            handle_key(&mut view, press(KeyCode::Char(' '))),
            Action::Emit(UiEvent::TypesChanged(vec!["fuego".to_string()]))
        );
        assert_eq!(
            handle_key(&mut view, press(KeyCode::Char(' '))),
            Action::Emit(UiEvent::TypesChanged(vec![]))
        );
    }

    #[test]
    fn test_invert_and_retry_keys() {
        let mut view = view_with_types();

        assert_eq!(
            handle_key(&mut view, press(KeyCode::Char('n'))),
            Action::Emit(UiEvent::InvertToggled(true))
        );
        assert_eq!(
            handle_key(&mut view, press(KeyCode::Char('n'))),
            Action::Emit(UiEvent::InvertToggled(false))
        );

        // Retry only while an error is up
        assert_eq!(handle_key(&mut view, press(KeyCode::Char('r'))), Action::None);
        view.error = Some("offline".to_string());
        assert_eq!(
            handle_key(&mut view, press(KeyCode::Char('r'))),
            Action::Emit(UiEvent::RetryClicked)
        );
    }

    #[test]
    fn test_navigation_wraps() {
        let mut view = view_with_types();
        view.rows = vec![
            Pokemon::new(1, "bulbasaur", "img", vec!["planta".to_string()]),
            Pokemon::new(4, "charmander", "img", vec!["fuego".to_string()]),
        ];

        view.next();
        assert_eq!(view.table_state.selected(), Some(0));
        view.next();
        view.next();
        assert_eq!(view.table_state.selected(), Some(0));
        view.previous();
        assert_eq!(view.selected_pokemon().unwrap().name, "charmander");
    }

    #[test]
    fn test_presenter_renders_rows_and_states() {
        let terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut presenter = TuiPresenter::new(terminal, TypeRegistry::with_defaults());

        let bulbasaur = Pokemon::new(1, "bulbasaur", "img", vec!["planta".to_string(), "veneno".to_string()]);
        presenter.populate_types(&["planta".to_string(), "veneno".to_string()]);
        presenter.render(&[&bulbasaur]);
        presenter.set_no_results(false);
        presenter.draw().unwrap();

        let text = buffer_text(&presenter);
        assert!(text.contains("Bulbasaur"));
        assert!(text.contains("#001"));
        assert!(text.contains("Veneno"));

        presenter.render(&[]);
        presenter.set_no_results(true);
        presenter.show_error("Could not reach");
        presenter.draw().unwrap();

        let text = buffer_text(&presenter);
        assert!(text.contains("No Pokémon match"));
        assert!(text.contains("Could not reach"));
        assert_eq!(presenter.view.table_state.selected(), None);
    }

    #[test]
    fn test_populate_types_drops_stale_selection() {
        let terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut presenter = TuiPresenter::new(terminal, TypeRegistry::with_defaults());
        presenter.view.selected_types.insert("hada".to_string());
        presenter.view.selected_types.insert("agua".to_string());

        presenter.populate_types(&["agua".to_string()]);

        assert_eq!(presenter.view.selected_types.len(), 1);
        assert!(presenter.view.selected_types.contains("agua"));
    }

    /// Serves one squirtle, whatever is asked for
    struct SquirtleOnly;

    #[async_trait::async_trait]
    impl PokemonSource for SquirtleOnly {
        async fn fetch_index(&self) -> Result<Vec<IndexEntry>, LoadError> {
            Ok(vec![IndexEntry {
                name: "squirtle".to_string(),
                url: "https://pokeapi.test/pokemon/7/".to_string(),
            }])
        }

        async fn fetch_detail(&self, _entry: &IndexEntry) -> Result<RawPokemon, LoadError> {
            serde_json::from_str(r#"{"id": 7, "name": "squirtle", "types": [{"type": {"name": "water"}}]}"#)
                .map_err(|e| LoadError::NetworkFailure(e.to_string()))
        }
    }

    #[tokio::test]
    async fn test_reload_syncs_pruned_selection_and_load_time() {
        let terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut presenter = TuiPresenter::new(terminal, TypeRegistry::with_defaults());
        presenter.view.selected_types = ["fuego".to_string(), "agua".to_string()].into_iter().collect();

        let query = FilterQuery::default().with_types(["fuego", "agua"]);
        let mut controller = Controller::new(SquirtleOnly, presenter, &Config::default()).with_query(query);

        controller.load().await.unwrap();
        sync_after_load(&mut controller).await;

        let expected: BTreeSet<String> = ["agua".to_string()].into_iter().collect();
        assert_eq!(controller.query().types, expected);
        assert_eq!(controller.presenter().view.selected_types, expected);
        assert_eq!(controller.visible().len(), 1);

        controller.presenter_mut().draw().unwrap();
        let text = buffer_text(controller.presenter());
        assert!(text.contains("Loaded "));
        assert!(text.contains("Squirtle"));
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#78C850"), Color::Rgb(0x78, 0xC8, 0x50));
        assert_eq!(hex_color("nope"), Color::White);
        assert_eq!(hex_color("#GGGGGG"), Color::White);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("pikachu", 10), "pikachu");
        assert_eq!(truncate("crabominable", 8), "crabo...");
    }
}
