use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gameshop_core::{
    validate::validate_search, GameRecord, Price, SaleRecord, Shop, ShopSummary,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::form::{AddGameForm, ListCursor, TextInput, UpdateGameForm};

const TICK_RATE: Duration = Duration::from_millis(250);
const CURRENCY: &str = "R$";
const PAGE: isize = 10;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Home,
    AddGame,
    ListGames,
    SearchGames,
    UpdateGame,
    RecordSale,
    SalesHistory,
}

const SCREENS: [Screen; 7] = [
    Screen::Home,
    Screen::AddGame,
    Screen::ListGames,
    Screen::SearchGames,
    Screen::UpdateGame,
    Screen::RecordSale,
    Screen::SalesHistory,
];

impl Screen {
    fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::AddGame => "Add Game",
            Screen::ListGames => "List Games",
            Screen::SearchGames => "Search Games",
            Screen::UpdateGame => "Update Game",
            Screen::RecordSale => "Record Sale",
            Screen::SalesHistory => "Sales History",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Menu,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Status {
    level: StatusLevel,
    message: String,
}

#[derive(Debug)]
enum AppEvent {
    Input(Event),
    Tick,
}

/// Terminal frontend for the shop.
pub struct ShopApp {
    shop: Shop,
    theme: Theme,
    screen: Screen,
    focus: Focus,
    menu_cursor: ListCursor,
    summary: ShopSummary,
    games: Vec<GameRecord>,
    sales: Vec<SaleRecord>,
    revenue: Price,
    list_cursor: ListCursor,
    add_form: AddGameForm,
    search: TextInput,
    search_results: Option<Vec<GameRecord>>,
    update_form: UpdateGameForm,
    status: Status,
    should_quit: bool,
}

impl ShopApp {
    pub fn new(shop: Shop) -> Self {
        Self {
            shop,
            theme: Theme::default(),
            screen: Screen::Home,
            focus: Focus::Menu,
            menu_cursor: ListCursor::default(),
            summary: ShopSummary::default(),
            games: Vec::new(),
            sales: Vec::new(),
            revenue: Price::ZERO,
            list_cursor: ListCursor::default(),
            add_form: AddGameForm::default(),
            search: TextInput::default(),
            search_results: None,
            update_form: UpdateGameForm::default(),
            status: Status {
                level: StatusLevel::Info,
                message: "Use the menu to navigate".to_string(),
            },
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        if let Err(err) = self.refresh() {
            error!(?err, "Initial load failed");
            self.set_status(StatusLevel::Error, format!("Failed to load shop data: {err}"));
        }

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        // Leave raw mode even when the loop fails.
        let result = self.event_loop(&mut terminal, &mut event_rx).await;
        let restored = restore_terminal(&mut terminal);
        result.and(restored)?;
        info!("Shop closed");
        Ok(())
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        terminal.hide_cursor()?;
        terminal.clear()?;

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                return Ok(());
            }

            match events.recv().await {
                Some(AppEvent::Input(Event::Key(key))) => self.handle_key(key),
                // Resizes and ticks only need a redraw.
                Some(AppEvent::Input(_)) | Some(AppEvent::Tick) => {}
                None => return Ok(()),
            }
        }
    }

    fn set_status(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.status = Status {
            level,
            message: message.into(),
        };
    }

    /// Re-read whatever the current screen shows.
    fn refresh(&mut self) -> Result<()> {
        match self.screen {
            Screen::Home => {
                self.summary = self.shop.summary()?;
            }
            Screen::ListGames | Screen::RecordSale => {
                self.games = self.shop.catalog().list()?;
                self.list_cursor.clamp(self.games.len());
            }
            Screen::UpdateGame => {
                self.games = self.shop.catalog().list()?;
                self.update_form.selection.clamp(self.games.len());
                let selected = self.games.get(self.update_form.selection.index());
                self.update_form.load(selected);
            }
            Screen::SalesHistory => {
                self.sales = self.shop.ledger().load()?;
                self.revenue = self.shop.ledger().total()?;
                self.list_cursor.clamp(self.sales.len());
            }
            Screen::AddGame | Screen::SearchGames => {}
        }
        Ok(())
    }

    fn open_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.list_cursor.reset();
            self.search_results = None;
            self.update_form.field = 0;
        }
        debug!(screen = screen.title(), "Screen opened");
        match self.refresh() {
            Ok(()) => self.set_status(StatusLevel::Info, self.screen_hint()),
            Err(err) => {
                error!(?err, screen = screen.title(), "Load failed");
                self.set_status(StatusLevel::Error, format!("Failed to load data: {err}"));
            }
        }
    }

    fn screen_hint(&self) -> String {
        match self.screen {
            Screen::Home => "Use the menu to navigate".to_string(),
            Screen::AddGame => "Fill in the game details".to_string(),
            Screen::ListGames if self.games.is_empty() => "No games registered yet".to_string(),
            Screen::ListGames => format!("{} game(s) registered", self.games.len()),
            Screen::SearchGames => "Search by part of a name or genre".to_string(),
            Screen::UpdateGame if self.games.is_empty() => {
                "There are no games to update".to_string()
            }
            Screen::UpdateGame => "Select the game to update".to_string(),
            Screen::RecordSale if self.games.is_empty() => {
                "No games registered. Add at least one game before selling".to_string()
            }
            Screen::RecordSale => "Select the game sold".to_string(),
            Screen::SalesHistory if self.sales.is_empty() => "No sales recorded yet".to_string(),
            Screen::SalesHistory => format!("{} sale(s) recorded", self.sales.len()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if let Err(err) = self.dispatch_key(key) {
            error!(?err, screen = self.screen.title(), "Operation failed");
            self.set_status(StatusLevel::Error, format!("Error: {err}"));
        }
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers == KeyModifiers::CONTROL {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return Ok(());
                }
                KeyCode::Char('r') => {
                    self.refresh()?;
                    self.set_status(StatusLevel::Info, "Reloaded from disk");
                    return Ok(());
                }
                _ => {}
            }
        }

        match self.focus {
            Focus::Menu => self.handle_menu_key(key),
            Focus::Content if key.code == KeyCode::Esc => {
                self.focus = Focus::Menu;
                Ok(())
            }
            Focus::Content => match self.screen {
                Screen::Home => Ok(()),
                Screen::AddGame => self.handle_add_key(key),
                Screen::ListGames => {
                    Self::handle_list_key(&mut self.list_cursor, key, self.games.len());
                    Ok(())
                }
                Screen::SearchGames => self.handle_search_key(key),
                Screen::UpdateGame => self.handle_update_key(key),
                Screen::RecordSale => self.handle_sale_key(key),
                Screen::SalesHistory => {
                    Self::handle_list_key(&mut self.list_cursor, key, self.sales.len());
                    Ok(())
                }
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.menu_cursor.move_by(1, SCREENS.len());
                self.open_screen(SCREENS[self.menu_cursor.index()]);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.menu_cursor.move_by(-1, SCREENS.len());
                self.open_screen(SCREENS[self.menu_cursor.index()]);
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                if self.screen != Screen::Home {
                    self.focus = Focus::Content;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_list_key(cursor: &mut ListCursor, key: KeyEvent, len: usize) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => cursor.move_by(1, len),
            KeyCode::Char('k') | KeyCode::Up => cursor.move_by(-1, len),
            KeyCode::PageDown => cursor.move_by(PAGE, len),
            KeyCode::PageUp => cursor.move_by(-PAGE, len),
            KeyCode::Home | KeyCode::Char('g') => cursor.reset(),
            KeyCode::End | KeyCode::Char('G') => cursor.move_by(isize::MAX / 2, len),
            _ => {}
        }
    }

    fn handle_add_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.add_form.cycle_field(1),
            KeyCode::BackTab | KeyCode::Up => self.add_form.cycle_field(-1),
            KeyCode::Enter => self.submit_new_game()?,
            _ => {
                self.add_form.active_mut().handle_key(&key);
            }
        }
        Ok(())
    }

    fn submit_new_game(&mut self) -> Result<()> {
        let fields = match self.add_form.submission() {
            Ok(fields) => fields,
            Err(err) => {
                self.set_status(StatusLevel::Error, err.to_string());
                return Ok(());
            }
        };
        if self
            .shop
            .catalog()
            .insert(&fields.name, &fields.genre, fields.price)?
        {
            self.add_form.reset();
            self.set_status(StatusLevel::Success, format!("{} added", fields.name));
        } else {
            self.set_status(
                StatusLevel::Warning,
                format!("A game named {} already exists", fields.name),
            );
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match (key.code, &self.search_results) {
            (KeyCode::Enter, _) => {}
            (KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown, Some(results)) => {
                let len = results.len();
                Self::handle_list_key(&mut self.list_cursor, key, len);
                return Ok(());
            }
            _ => {
                self.search.handle_key(&key);
                return Ok(());
            }
        }
        let term = match validate_search(self.search.value()) {
            Ok(term) => term.to_string(),
            Err(err) => {
                self.set_status(StatusLevel::Error, err.to_string());
                return Ok(());
            }
        };
        let results = self.shop.catalog().search(&term)?;
        if results.is_empty() {
            self.set_status(StatusLevel::Warning, "No games found");
        } else {
            self.set_status(
                StatusLevel::Info,
                format!("{} game(s) match \"{term}\"", results.len()),
            );
        }
        self.list_cursor.reset();
        self.search_results = Some(results);
        Ok(())
    }

    fn handle_update_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.games.is_empty() {
            return Ok(());
        }
        match key.code {
            KeyCode::Tab => self.update_form.cycle_field(1),
            KeyCode::BackTab => self.update_form.cycle_field(-1),
            KeyCode::Enter => self.submit_update()?,
            KeyCode::Down | KeyCode::Up if self.update_form.field == 0 => {
                let delta = if key.code == KeyCode::Down { 1 } else { -1 };
                self.update_form.selection.move_by(delta, self.games.len());
                let selected = self.games.get(self.update_form.selection.index());
                self.update_form.load(selected);
            }
            KeyCode::Down => self.update_form.cycle_field(1),
            KeyCode::Up => self.update_form.cycle_field(-1),
            _ => {
                if let Some(input) = self.update_form.active_mut() {
                    input.handle_key(&key);
                }
            }
        }
        Ok(())
    }

    fn submit_update(&mut self) -> Result<()> {
        let selected = self.games.get(self.update_form.selection.index());
        let Some(old_name) = selected.map(|game| game.name.clone()) else {
            return Ok(());
        };
        let fields = match self.update_form.submission() {
            Ok(fields) => fields,
            Err(err) => {
                self.set_status(StatusLevel::Error, err.to_string());
                return Ok(());
            }
        };
        let matched = self.shop.catalog().update(
            &old_name,
            &fields.name,
            &fields.genre,
            fields.price,
        )?;
        self.refresh()?;
        if matched {
            self.set_status(StatusLevel::Success, format!("{old_name} updated"));
        } else {
            self.set_status(
                StatusLevel::Warning,
                format!("{old_name} is no longer in the catalog"),
            );
        }
        Ok(())
    }

    fn handle_sale_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code != KeyCode::Enter {
            Self::handle_list_key(&mut self.list_cursor, key, self.games.len());
            return Ok(());
        }
        let selected = self.games.get(self.list_cursor.index());
        let Some(name) = selected.map(|game| game.name.clone()) else {
            self.set_status(
                StatusLevel::Warning,
                "No games registered. Add at least one game before selling",
            );
            return Ok(());
        };
        match self.shop.sell(&name)? {
            Some(sale) => self.set_status(
                StatusLevel::Success,
                format!("Sale of {} recorded at {}", sale.name, sale.timestamp),
            ),
            None => {
                self.refresh()?;
                self.set_status(
                    StatusLevel::Warning,
                    format!("{name} is no longer in the catalog"),
                );
            }
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(frame.size());
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(20)])
            .split(rows[1]);

        self.render_title(frame, rows[0]);
        self.render_menu(frame, body[0]);
        match self.screen {
            Screen::Home => self.render_home(frame, body[1]),
            Screen::AddGame => self.render_add(frame, body[1]),
            Screen::ListGames => self.render_games(frame, body[1]),
            Screen::SearchGames => self.render_search(frame, body[1]),
            Screen::UpdateGame => self.render_update(frame, body[1]),
            Screen::RecordSale => self.render_sale(frame, body[1]),
            Screen::SalesHistory => self.render_history(frame, body[1]),
        }
        self.render_status(frame, rows[2]);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled(
            "Game Shop",
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, area);
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = SCREENS
            .iter()
            .enumerate()
            .map(|(idx, screen)| {
                if idx == self.menu_cursor.index() {
                    ListItem::new(Line::from(Span::styled(
                        format!("▶ {}", screen.title()),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )))
                } else {
                    ListItem::new(Line::from(Span::styled(
                        format!("  {}", screen.title()),
                        Style::default().fg(self.theme.primary_fg),
                    )))
                }
            })
            .collect();
        let list = List::new(items).block(self.panel("Menu", self.focus == Focus::Menu));
        frame.render_widget(list, area);
    }

    fn panel(&self, title: &'static str, focused: bool) -> Block<'static> {
        let color = if focused {
            self.theme.accent
        } else {
            self.theme.muted
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title)
    }

    fn content_panel(&self) -> Block<'static> {
        self.panel(self.screen.title(), self.focus == Focus::Content)
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, message: &str) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(self.theme.muted),
        )))
        .block(self.content_panel())
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_home(&self, frame: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled("Welcome to the Game Shop!", bold)),
            Line::from(""),
            Line::from("You can:"),
        ];
        for (verb, rest) in [
            ("Add", " new games"),
            ("List", " every game"),
            ("Search", " by name or genre"),
            ("Update", " game details"),
            ("Record", " sales"),
            ("View", " the sales history"),
        ] {
            lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::styled(verb, bold),
                Span::raw(rest),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("Use the menu on the left to navigate."));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Games registered: {}  |  Sales made: {}",
                self.summary.games, self.summary.sales
            ),
            Style::default().fg(self.theme.accent),
        )));

        let paragraph = Paragraph::new(lines)
            .block(self.content_panel())
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_inputs(
        &self,
        frame: &mut Frame,
        area: Rect,
        labels: &[&'static str],
        inputs: &[&TextInput],
        active: Option<usize>,
    ) {
        let constraints: Vec<Constraint> = labels
            .iter()
            .map(|_| Constraint::Length(3))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, (label, input)) in labels.iter().zip(inputs).enumerate() {
            let field_area = chunks[idx];
            let focused = self.focus == Focus::Content && active == Some(idx);
            let paragraph =
                Paragraph::new(input.value().to_string()).block(self.panel(*label, focused));
            frame.render_widget(paragraph, field_area);
            if focused {
                let cursor_x = (field_area.x + 1 + input.cursor() as u16)
                    .min(field_area.x + field_area.width.saturating_sub(2));
                frame.set_cursor(cursor_x, field_area.y + 1);
            }
        }
    }

    fn render_add(&self, frame: &mut Frame, area: Rect) {
        let block = self.content_panel();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(9), Constraint::Length(1)])
            .split(inner);
        self.render_inputs(
            frame,
            chunks[0],
            &AddGameForm::LABELS,
            &self.add_form.inputs(),
            Some(self.add_form.field),
        );
        self.render_help(frame, chunks[1], "Tab next field  Enter add game  Esc menu");
    }

    fn render_help(&self, frame: &mut Frame, area: Rect, text: &str) {
        let help = Paragraph::new(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(self.theme.muted),
        )));
        frame.render_widget(help, area);
    }

    fn game_line(&self, game: &GameRecord) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                game.name.clone(),
                Style::default()
                    .fg(self.theme.primary_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  |  {}", game.genre),
                Style::default().fg(self.theme.muted),
            ),
            Span::raw(format!("  |  {}", format_currency(game.price))),
        ])
    }

    fn render_game_list(
        &self,
        frame: &mut Frame,
        area: Rect,
        games: &[GameRecord],
        cursor: ListCursor,
        block: Block<'static>,
    ) {
        let items: Vec<ListItem> = games
            .iter()
            .map(|game| ListItem::new(self.game_line(game)))
            .collect();
        let mut state = ListState::default();
        if !games.is_empty() {
            state.select(Some(cursor.index().min(games.len() - 1)));
        }
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_games(&self, frame: &mut Frame, area: Rect) {
        if self.games.is_empty() {
            self.render_message(frame, area, "No games registered yet.");
            return;
        }
        self.render_game_list(
            frame,
            area,
            &self.games,
            self.list_cursor,
            self.content_panel(),
        );
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);
        self.render_inputs(
            frame,
            chunks[0],
            &["Part of a name or genre"],
            &[&self.search],
            Some(0),
        );
        match &self.search_results {
            None => self.render_message(
                frame,
                chunks[1],
                "Type a term and press Enter to search.",
            ),
            Some(results) if results.is_empty() => {
                self.render_message(frame, chunks[1], "No games found.")
            }
            Some(results) => self.render_game_list(
                frame,
                chunks[1],
                results,
                self.list_cursor,
                self.panel("Results", false),
            ),
        }
    }

    fn render_update(&self, frame: &mut Frame, area: Rect) {
        if self.games.is_empty() {
            self.render_message(frame, area, "There are no games to update.");
            return;
        }
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);
        let selecting = self.focus == Focus::Content && self.update_form.field == 0;
        self.render_game_list(
            frame,
            chunks[0],
            &self.games,
            self.update_form.selection,
            self.panel("Select the game to update", selecting),
        );

        let block = self.content_panel();
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        let form = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(9), Constraint::Length(2)])
            .split(inner);
        let active = self.update_form.field.checked_sub(1);
        self.render_inputs(
            frame,
            form[0],
            &UpdateGameForm::LABELS,
            &self.update_form.inputs(),
            active,
        );
        self.render_help(
            frame,
            form[1],
            "Tab next field  ↑/↓ choose game  Enter save  Esc menu",
        );
    }

    fn render_sale(&self, frame: &mut Frame, area: Rect) {
        if self.games.is_empty() {
            self.render_message(
                frame,
                area,
                "No games registered. Add at least one game before selling.",
            );
            return;
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(4)])
            .split(area);
        self.render_game_list(
            frame,
            chunks[0],
            &self.games,
            self.list_cursor,
            self.content_panel(),
        );

        let detail = self
            .games
            .get(self.list_cursor.index())
            .map(|game| {
                Line::from(vec![
                    Span::styled("Genre: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(game.genre.clone()),
                    Span::styled("  Price: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format_currency(game.price)),
                ])
            })
            .unwrap_or_default();
        let paragraph = Paragraph::new(vec![
            detail,
            Line::from(Span::styled(
                "Enter confirm sale",
                Style::default().fg(self.theme.muted),
            )),
        ])
        .block(self.panel("Selected game", false));
        frame.render_widget(paragraph, chunks[1]);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect) {
        if self.sales.is_empty() {
            self.render_message(frame, area, "No sales recorded yet.");
            return;
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let total = Paragraph::new(Line::from(vec![
            Span::styled("Total sales: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format_currency(self.revenue),
                Style::default()
                    .fg(self.theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(self.panel("Summary", false));
        frame.render_widget(total, chunks[0]);

        let items: Vec<ListItem> = self
            .sales
            .iter()
            .map(|sale| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        sale.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  |  {}", sale.genre),
                        Style::default().fg(self.theme.muted),
                    ),
                    Span::raw(format!("  |  {}", format_currency(sale.price))),
                    Span::styled(
                        format!("  |  {}", sale.timestamp),
                        Style::default().fg(self.theme.muted),
                    ),
                ]))
            })
            .collect();
        let mut state = ListState::default();
        state.select(Some(self.list_cursor.index().min(self.sales.len() - 1)));
        let list = List::new(items)
            .block(self.content_panel())
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let color = match self.status.level {
            StatusLevel::Info => self.theme.primary_fg,
            StatusLevel::Success => self.theme.success,
            StatusLevel::Warning => self.theme.warning,
            StatusLevel::Error => self.theme.danger,
        };
        let keys = match self.focus {
            Focus::Menu => "↑/↓ choose screen  Enter open  Ctrl+R reload  q quit",
            Focus::Content => "Esc back to menu  Ctrl+R reload  Ctrl+C quit",
        };
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                self.status.message.clone(),
                Style::default().fg(color),
            )),
            Line::from(Span::styled(keys, Style::default().fg(self.theme.muted))),
        ])
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn format_currency(price: Price) -> String {
    format!("{CURRENCY} {price}")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
