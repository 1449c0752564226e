//! ratatui-based catalog browser.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Context as _;
use bookconnect_application::CatalogSession;
use bookconnect_core::{Criteria, CriteriaForm, FilterOption, KeyFilter, ThemeChoice};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Paragraph, Wrap,
};
use unicode_width::UnicodeWidthStr;

mod view;

pub use view::ListView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiExit {
    Quit,
}

pub struct Ui {
    session: CatalogSession,
    view: ListView,
    cursor: usize,
    author_options: Vec<FilterOption>,
    genre_options: Vec<FilterOption>,
    search_panel: SearchPanel,
    settings_panel: SettingsPanel,
}

impl Ui {
    pub fn new(session: CatalogSession) -> Self {
        let catalog = session.catalog().clone();
        let mut view = ListView::new(catalog.clone());
        session.start(&mut view);
        Self {
            session,
            view,
            cursor: 0,
            author_options: catalog.author_options(),
            genre_options: catalog.genre_options(),
            search_panel: SearchPanel::default(),
            settings_panel: SettingsPanel::default(),
        }
    }

    pub fn session(&self) -> &CatalogSession {
        &self.session
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut terminal = setup_terminal()?;
        terminal.clear().ok();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.event_loop(&mut terminal)
        }));
        let restore_result = restore_terminal(&mut terminal);

        match (result, restore_result) {
            (Ok(Ok(())), Ok(())) => Ok(()),
            (Ok(Ok(())), Err(err)) => Err(err),
            (Ok(Err(err)), _) => Err(err),
            (Err(panic), Ok(())) => Err(anyhow::anyhow!(panic_to_string(panic))),
            (Err(panic), Err(err)) => Err(anyhow::anyhow!(
                "{}\n(additionally failed to restore terminal: {err})",
                panic_to_string(panic)
            )),
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(250);
        let mut needs_redraw = true;

        loop {
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                needs_redraw = false;
            }

            if !event::poll(tick_rate)? {
                continue;
            }

            match event::read()? {
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    needs_redraw = true;
                    if let Some(UiExit::Quit) = self.handle_key(key) {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<UiExit> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UiExit::Quit);
        }

        if self.settings_panel.open {
            self.handle_settings_panel_key(key);
            None
        } else if self.search_panel.open {
            self.handle_search_panel_key(key);
            None
        } else if self.view.detail.is_some() {
            self.handle_detail_key(key);
            None
        } else {
            self.handle_main_key(key)
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> Option<UiExit> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Some(UiExit::Quit),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.view.rows.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(row) = self.view.rows.get(self.cursor) {
                    let id = row.id.clone();
                    self.session.select_item(id.as_str(), &mut self.view);
                }
            }
            KeyCode::Char('m') | KeyCode::Char(' ') => {
                let first_new = self.view.rows.len();
                if self.session.advance_page(&mut self.view) {
                    self.cursor = first_new.min(self.view.rows.len().saturating_sub(1));
                }
            }
            KeyCode::Char('/') => {
                self.search_panel.reset();
                self.search_panel.open = true;
            }
            KeyCode::Char('s') => {
                self.settings_panel.open = true;
                self.settings_panel.choice = self.session.theme_choice();
            }
            KeyCode::Char('r') => {
                self.session.reset(&mut self.view);
                self.cursor = 0;
            }
            _ => {}
        }
        None
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            self.session.clear_selection(&mut self.view);
        }
    }

    fn handle_search_panel_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_panel.reset();
            }
            KeyCode::Enter => {
                let form = self
                    .search_panel
                    .form(&self.author_options, &self.genre_options);
                self.search_panel.reset();
                tracing::debug!(
                    title = %form.title,
                    author = %form.author,
                    genre = %form.genre,
                    "search submitted"
                );
                self.session.submit_filter(Criteria::from(form), &mut self.view);
                self.cursor = 0;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.search_panel.focus = self.search_panel.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.search_panel.focus = self.search_panel.focus.prev();
            }
            KeyCode::Left => match self.search_panel.focus {
                SearchFocus::Title => {}
                SearchFocus::Author => {
                    self.search_panel.author =
                        cycle_back(self.search_panel.author, self.author_options.len());
                }
                SearchFocus::Genre => {
                    self.search_panel.genre =
                        cycle_back(self.search_panel.genre, self.genre_options.len());
                }
            },
            KeyCode::Right => match self.search_panel.focus {
                SearchFocus::Title => {}
                SearchFocus::Author => {
                    self.search_panel.author =
                        cycle_forward(self.search_panel.author, self.author_options.len());
                }
                SearchFocus::Genre => {
                    self.search_panel.genre =
                        cycle_forward(self.search_panel.genre, self.genre_options.len());
                }
            },
            KeyCode::Backspace => {
                if self.search_panel.focus == SearchFocus::Title {
                    self.search_panel.title.pop();
                }
            }
            KeyCode::Char(ch) => {
                if self.search_panel.focus == SearchFocus::Title && !ch.is_control() {
                    self.search_panel.title.push(ch);
                }
            }
            _ => {}
        }
    }

    fn handle_settings_panel_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.settings_panel.open = false;
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.settings_panel.choice = self.settings_panel.choice.toggle();
            }
            KeyCode::Enter => {
                self.settings_panel.open = false;
                tracing::info!(theme = %self.settings_panel.choice, "theme saved");
                self.session
                    .set_theme_choice(self.settings_panel.choice, &mut self.view);
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(self.view.base_style()), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new(Text::from(self.header_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, layout[0]);

        self.draw_list(frame, layout[1]);

        let footer = Paragraph::new(Text::from(self.footer_lines()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, layout[2]);

        if self.view.detail.is_some() {
            self.draw_detail(area, frame);
        }

        if self.search_panel.open {
            self.draw_search_panel(area, frame);
        }

        if self.settings_panel.open {
            self.draw_settings_panel(area, frame);
        }
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(Span::styled("Book Connect", bold))];
        let summary = match self.session.criteria() {
            Some(criteria) if !criteria.is_unfiltered() => self.criteria_summary(criteria),
            _ => format!("All books ({})", self.session.catalog().len()),
        };
        lines.push(Line::raw(summary));
        lines
    }

    fn criteria_summary(&self, criteria: &Criteria) -> String {
        let catalog = self.session.catalog();
        let mut parts = Vec::new();
        if !criteria.title.trim().is_empty() {
            parts.push(format!("title \"{}\"", criteria.title.trim()));
        }
        if let KeyFilter::Key(key) = &criteria.author {
            parts.push(format!(
                "author {}",
                catalog.author_name(key).unwrap_or(key)
            ));
        }
        if let KeyFilter::Key(key) = &criteria.genre {
            parts.push(format!("genre {}", catalog.genre_name(key).unwrap_or(key)));
        }
        format!(
            "{} matches for {}",
            self.session.results().len(),
            parts.join(", ")
        )
    }

    fn footer_lines(&self) -> Vec<Line<'static>> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let show_more = if self.session.is_exhausted() {
            Span::styled(
                self.view.show_more_label(),
                Style::default().add_modifier(Modifier::DIM),
            )
        } else {
            Span::styled(self.view.show_more_label(), bold)
        };
        vec![Line::from(vec![
            show_more,
            Span::raw("   "),
            Span::styled("m", bold),
            Span::raw(" more  "),
            Span::styled("Enter", bold),
            Span::raw(" open  "),
            Span::styled("/", bold),
            Span::raw(" search  "),
            Span::styled("r", bold),
            Span::raw(" reset  "),
            Span::styled("s", bold),
            Span::raw(" settings  "),
            Span::styled("q", bold),
            Span::raw(" quit"),
        ])]
    }

    fn draw_list(&self, frame: &mut ratatui::Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Books ({}/{})",
            self.view.rows.len(),
            self.session.results().len()
        ));

        if self.view.empty {
            let lines = vec![
                Line::raw("No results found."),
                Line::raw(""),
                Line::raw("Your filters might be too narrow. Press / to search again or r to reset."),
            ];
            let paragraph = Paragraph::new(Text::from(lines))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let max_width = area.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = self
            .view
            .rows
            .iter()
            .map(|row| {
                ListItem::new(Text::from(vec![
                    Line::styled(
                        truncate_to_width(&row.title, max_width),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Line::raw(truncate_to_width(&row.author_name, max_width)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(self.view.accent_style().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always);

        let mut state = ListState::default();
        state.select(Some(self.cursor.min(self.view.rows.len().saturating_sub(1))));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_detail(&self, area: Rect, frame: &mut ratatui::Frame) {
        let Some(detail) = &self.view.detail else {
            return;
        };
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::styled(detail.subtitle.clone(), bold),
            Line::raw(detail.genres.join(", ")),
            Line::raw(""),
        ];
        lines.extend(detail.description.lines().map(|l| Line::raw(l.to_string())));
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            detail.image.clone(),
            Style::default().add_modifier(Modifier::DIM),
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(detail.title.clone(), bold))
            .style(self.view.base_style());
        let paragraph = Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_search_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                "Search",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .style(self.view.base_style());
        frame.render_widget(block.clone(), popup_area);

        let inner = block.inner(popup_area);
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let panel = &self.search_panel;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let title_value = if panel.focus == SearchFocus::Title {
            format!("{}_", panel.title)
        } else {
            panel.title.clone()
        };
        let lines = vec![
            field_line("Title", title_value, panel.focus == SearchFocus::Title),
            Line::raw(""),
            field_line(
                "Author",
                option_label(&self.author_options, panel.author),
                panel.focus == SearchFocus::Author,
            ),
            Line::raw(""),
            field_line(
                "Genre",
                option_label(&self.genre_options, panel.genre),
                panel.focus == SearchFocus::Genre,
            ),
        ];
        frame.render_widget(Paragraph::new(Text::from(lines)), sections[0]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("Tab", bold),
            Span::raw(" field  "),
            Span::styled("←/→", bold),
            Span::raw(" choose  "),
            Span::styled("Enter", bold),
            Span::raw(" search  "),
            Span::styled("Esc", bold),
            Span::raw(" cancel"),
        ]))
        .wrap(Wrap { trim: true });
        frame.render_widget(help, sections[1]);
    }

    fn draw_settings_panel(&self, area: Rect, frame: &mut ratatui::Frame) {
        let popup_area = centered_rect(40, 25, area);
        frame.render_widget(Clear, popup_area);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let choice = self.settings_panel.choice;
        let lines = vec![
            Line::from(vec![
                Span::styled("Theme: ", bold),
                option_chip("day", choice == ThemeChoice::Day),
                Span::raw(" "),
                option_chip("night", choice == ThemeChoice::Night),
            ]),
            Line::raw(""),
            Line::from(vec![
                Span::styled("←/→", bold),
                Span::raw(" toggle  "),
                Span::styled("Enter", bold),
                Span::raw(" save  "),
                Span::styled("Esc", bold),
                Span::raw(" cancel"),
            ]),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Settings", bold))
            .style(self.view.base_style());
        let paragraph = Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SearchFocus {
    #[default]
    Title,
    Author,
    Genre,
}

impl SearchFocus {
    fn next(self) -> Self {
        match self {
            SearchFocus::Title => SearchFocus::Author,
            SearchFocus::Author => SearchFocus::Genre,
            SearchFocus::Genre => SearchFocus::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            SearchFocus::Title => SearchFocus::Genre,
            SearchFocus::Author => SearchFocus::Title,
            SearchFocus::Genre => SearchFocus::Author,
        }
    }
}

/// The search form. Author and genre hold indices into the option lists,
/// where index 0 is always the "any" entry.
#[derive(Debug, Clone, Default)]
struct SearchPanel {
    open: bool,
    focus: SearchFocus,
    title: String,
    author: usize,
    genre: usize,
}

impl SearchPanel {
    /// Closes the panel and clears what was typed.
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn form(&self, authors: &[FilterOption], genres: &[FilterOption]) -> CriteriaForm {
        CriteriaForm {
            title: self.title.clone(),
            author: option_value(authors, self.author),
            genre: option_value(genres, self.genre),
        }
    }
}

#[derive(Debug, Clone)]
struct SettingsPanel {
    open: bool,
    choice: ThemeChoice,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self {
            open: false,
            choice: ThemeChoice::Day,
        }
    }
}

fn option_value(options: &[FilterOption], index: usize) -> String {
    options
        .get(index)
        .map(|option| option.value.clone())
        .unwrap_or_default()
}

fn option_label(options: &[FilterOption], index: usize) -> String {
    options
        .get(index)
        .map(|option| option.label.clone())
        .unwrap_or_default()
}

fn cycle_forward(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + 1) % len }
}

fn cycle_back(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + len - 1) % len
    }
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        Span::styled(format!("{label}: "), label_style),
        Span::raw(value),
    ])
}

fn option_chip(label: &str, selected: bool) -> Span<'static> {
    let style = if selected {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Span::styled(label.to_string(), style)
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let mut buf = [0u8; 4];
        let w = UnicodeWidthStr::width(&*ch.encode_utf8(&mut buf));
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen).context("enter alt screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    terminal::disable_raw_mode().context("disable raw mode")?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("leave alt screen")?;
    Ok(())
}

fn panic_to_string(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: (unknown payload)".to_string()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}
