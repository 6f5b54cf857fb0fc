pub mod components;
pub mod widgets;

use crate::component::CollectionTreeComponent;
use crate::model::SelectionEvent;
use components::{TreeViewComponent, ViewMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub struct Ui {
    error_message: Option<String>,
    show_help: bool,
    last_selection: Option<SelectionEvent>,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            error_message: None,
            show_help: false,
            last_selection: None,
        }
    }

    pub fn draw(&self, frame: &mut Frame, component: &CollectionTreeComponent, view: &TreeViewComponent) {
        let size = frame.area();

        // Main layout: header, body, footer
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(3),    // Tree
                Constraint::Length(1), // Footer
            ])
            .split(size);

        self.draw_header(frame, chunks[0], component);
        self.draw_tree(frame, chunks[1], component, view);
        self.draw_footer(frame, chunks[2], view);

        if let Some(ref error) = self.error_message {
            self.draw_error(frame, error);
        }

        if self.show_help {
            self.draw_help(frame);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, component: &CollectionTreeComponent) {
        let name = component
            .decorated()
            .and_then(|d| d.tree().root())
            .map(|r| r.name.clone())
            .unwrap_or_else(|| "(no collection)".to_string());
        let language = component.selected_language().unwrap_or("-").to_string();
        let org_message = if component.coming_soon().is_some() { "org" } else { "default" };

        let header_text = vec![
            Span::raw("[Collection: "),
            Span::styled(name, Style::default().fg(Color::Cyan)),
            Span::raw("] [Lang: "),
            Span::styled(language, Style::default().fg(Color::Green)),
            Span::raw("] [Coming soon: "),
            Span::styled(org_message, Style::default().fg(Color::Yellow)),
            Span::raw("]"),
        ];

        let header = Paragraph::new(Line::from(header_text))
            .style(Style::default().bg(Color::DarkGray));

        frame.render_widget(header, area);
    }

    fn draw_tree(
        &self,
        frame: &mut Frame,
        area: Rect,
        component: &CollectionTreeComponent,
        view: &TreeViewComponent,
    ) {
        let Some(tree) = component.decorated() else {
            let waiting = Paragraph::new("Waiting for content...")
                .block(Block::default().title("Collection").borders(Borders::ALL))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(waiting, area);
            return;
        };

        let rows = view.visible_rows(tree);
        let expanded = |id: &str| view.is_expanded(id);
        let title = match view.mode() {
            ViewMode::Tree => "Collection",
            ViewMode::List => "Contents",
        };
        let widget = widgets::CollectionTreeWidget::new(tree, &rows, &expanded)
            .selected((!rows.is_empty()).then_some(view.cursor()))
            .title(title);

        frame.render_widget(widget, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect, view: &TreeViewComponent) {
        let mode_text = match view.mode() {
            ViewMode::Tree => "TREE",
            ViewMode::List => "LIST",
        };
        let selected = self
            .last_selection
            .as_ref()
            .map(|s| format!(" [Opened: {}]", s.id))
            .unwrap_or_default();

        let footer_text = vec![
            Span::raw("["),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit] ["),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Open] ["),
            Span::styled("L", Style::default().fg(Color::Yellow)),
            Span::raw(" Language] ["),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::raw(" Help] [Mode: "),
            Span::styled(mode_text, Style::default().fg(Color::Cyan)),
            Span::raw("]"),
            Span::styled(selected, Style::default().fg(Color::Green)),
        ];

        let footer = Paragraph::new(Line::from(footer_text))
            .style(Style::default().bg(Color::DarkGray));

        frame.render_widget(footer, area);
    }

    fn draw_error(&self, frame: &mut Frame, message: &str) {
        let area = centered_rect(50, 20, frame.area());

        let block = Block::default()
            .title("Error")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Red));

        let text = Paragraph::new(message)
            .block(block)
            .wrap(ratatui::widgets::Wrap { trim: true });

        frame.render_widget(Clear, area);
        frame.render_widget(text, area);
    }

    fn draw_help(&self, frame: &mut Frame) {
        let area = centered_rect(60, 60, frame.area());

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan));

        let help_text = [
            "Navigation:",
            "  j/k, Up/Down  - Move cursor",
            "  Space, l/h    - Expand / collapse folder",
            "  Enter         - Open content",
            "",
            "View:",
            "  Tab           - Toggle tree / flat list",
            "  L             - Next language",
            "  r             - Reload inputs",
            "",
            "  q, Ctrl+Q     - Quit",
            "",
            "Press Esc to close help",
        ];

        let text = Paragraph::new(help_text.join("\n"))
            .block(block)
            .style(Style::default());

        frame.render_widget(Clear, area);
        frame.render_widget(text, area);
    }

    pub fn show_error(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn has_overlay(&self) -> bool {
        self.error_message.is_some() || self.show_help
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_overlays(&mut self) {
        self.show_help = false;
        self.error_message = None;
    }

    pub fn record_selection(&mut self, selection: SelectionEvent) {
        self.last_selection = Some(selection);
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
