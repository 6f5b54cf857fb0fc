pub mod setup;

use anyhow::Result;
use coltree::config::AppConfig;
use coltree::decorate::ListItem;
use coltree::input::InputWatcher;
use coltree::model::SelectionEvent;
use coltree::services::LanguageSelector;
use coltree::ui::components::{TreeViewComponent, ViewMode};
use coltree::ui::Ui;
use coltree::CollectionTreeComponent;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use setup::InputPaths;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct CollectionTreeApp {
    component: CollectionTreeComponent,
    selections: mpsc::UnboundedReceiver<SelectionEvent>,
    languages: Arc<LanguageSelector>,
    language_cycle: Vec<String>,
    view: TreeViewComponent,
    ui: Ui,
    config: AppConfig,
    paths: InputPaths,
    _watcher: Option<InputWatcher>,
    input_changes: Option<mpsc::UnboundedReceiver<PathBuf>>,
    opened: Vec<SelectionEvent>,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    should_quit: bool,
}

enum AppEvent {
    Component(bool),
    Selection(Option<SelectionEvent>),
    InputChanged(Option<PathBuf>),
    Terminal(Option<io::Result<Event>>),
}

impl CollectionTreeApp {
    pub fn new(config: AppConfig, paths: InputPaths, language: Option<&str>) -> Result<Self> {
        tracing::info!("CollectionTreeApp::new called with nodes: {:?}", paths.nodes);

        let inputs = paths.read(&config)?;
        let (services, languages) = setup::build_services(&config, language);
        let (component, selections) =
            CollectionTreeComponent::new(services, inputs, config.coming_soon.parent_fallback);

        let mut language_cycle = config.locale.languages.clone();
        let current = languages.current();
        if !language_cycle.contains(&current) {
            language_cycle.insert(0, current);
        }

        let mut watched = vec![paths.nodes.as_path()];
        if let Some(status) = paths.status.as_deref() {
            watched.push(status);
        }
        let (watcher, input_changes) = match InputWatcher::new(&watched) {
            Ok((watcher, rx)) => (Some(watcher), Some(rx)),
            Err(e) => {
                tracing::warn!("Input watcher unavailable, use 'r' to reload: {}", e);
                (None, None)
            }
        };

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        tracing::info!("Terminal created");

        Ok(Self {
            component,
            selections,
            languages,
            language_cycle,
            view: TreeViewComponent::new(),
            ui: Ui::new(),
            config,
            paths,
            _watcher: watcher,
            input_changes,
            opened: Vec::new(),
            terminal,
            should_quit: false,
        })
    }

    /// Runs until the user quits and returns every selection made.
    pub async fn run(&mut self) -> Result<Vec<SelectionEvent>> {
        tracing::info!("App::run started");
        self.component.start();

        let mut events = EventStream::new();
        let mut needs_redraw = true;

        loop {
            if self.should_quit {
                tracing::debug!("Quit flag set, exiting loop");
                break;
            }

            if needs_redraw {
                self.draw()?;
                needs_redraw = false;
            }

            let event = tokio::select! {
                applied = self.component.next_event(), if !self.component.is_torn_down() => {
                    AppEvent::Component(applied)
                }
                selection = self.selections.recv() => AppEvent::Selection(selection),
                changed = recv_or_pending(&mut self.input_changes) => AppEvent::InputChanged(changed),
                terminal_event = events.next() => AppEvent::Terminal(terminal_event),
            };

            match event {
                AppEvent::Component(applied) => {
                    needs_redraw = applied;
                }
                AppEvent::Selection(Some(selection)) => {
                    self.ui.record_selection(selection.clone());
                    self.opened.push(selection);
                    needs_redraw = true;
                }
                AppEvent::Selection(None) => {}
                AppEvent::InputChanged(Some(path)) => {
                    tracing::info!("Input file changed: {:?}", path);
                    self.reload_inputs();
                    needs_redraw = true;
                }
                AppEvent::InputChanged(None) => {
                    self.input_changes = None;
                }
                AppEvent::Terminal(Some(Ok(Event::Key(key)))) => {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                        needs_redraw = true;
                    }
                }
                AppEvent::Terminal(Some(Ok(Event::Resize(width, height)))) => {
                    tracing::debug!("Terminal resized to {}x{}", width, height);
                    needs_redraw = true;
                }
                AppEvent::Terminal(Some(Ok(_))) => {}
                AppEvent::Terminal(Some(Err(e))) => {
                    tracing::error!("Terminal event error: {}", e);
                }
                AppEvent::Terminal(None) => self.should_quit = true,
            }
        }

        self.component.teardown();
        // Selections emitted by the final keypress
        while let Ok(selection) = self.selections.try_recv() {
            self.opened.push(selection);
        }
        self.cleanup()?;
        Ok(std::mem::take(&mut self.opened))
    }

    fn draw(&mut self) -> Result<()> {
        if let Some(tree) = self.component.decorated() {
            let rows = self.view.visible_rows(tree).len();
            self.view.clamp(rows);
        }
        let (ui, component, view) = (&self.ui, &self.component, &self.view);
        self.terminal.draw(|frame| ui.draw(frame, component, view))?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        tracing::debug!("Handling key {:?}", key);

        if self.ui.has_overlay() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.ui.close_overlays();
            }
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Char('Q'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            (KeyCode::Char('?'), _) => self.ui.toggle_help(),
            (KeyCode::Char('j') | KeyCode::Down, _) => {
                let rows = self.row_count();
                self.view.move_down(rows);
            }
            (KeyCode::Char('k') | KeyCode::Up, _) => self.view.move_up(),
            (KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Right, _) => self.toggle_current(true),
            (KeyCode::Char('h') | KeyCode::Left, _) => self.toggle_current(false),
            (KeyCode::Enter, _) => self.activate_current(),
            (KeyCode::Tab, _) => self.view.toggle_mode(),
            (KeyCode::Char('L'), _) => self.next_language(),
            (KeyCode::Char('r'), _) => self.reload_inputs(),
            _ => {}
        }
    }

    fn row_count(&self) -> usize {
        self.component
            .decorated()
            .map(|tree| self.view.visible_rows(tree).len())
            .unwrap_or(0)
    }

    fn current_identifier(&self) -> Option<(String, bool)> {
        let tree = self.component.decorated()?;
        let row = self.view.current(tree)?;
        let node = tree.tree().get(row.node)?;
        Some((node.identifier.clone(), node.has_children()))
    }

    fn toggle_current(&mut self, expand: bool) {
        if self.view.mode() != ViewMode::Tree {
            return;
        }
        let Some((identifier, has_children)) = self.current_identifier() else {
            return;
        };
        if !has_children {
            return;
        }
        match (expand, self.view.is_expanded(&identifier)) {
            (true, false) => self.view.toggle_expand(&identifier),
            (false, true) => self.view.collapse(&identifier),
            _ => {}
        }
    }

    fn activate_current(&mut self) {
        let Some(tree) = self.component.decorated() else {
            return;
        };
        let Some(row) = self.view.current(tree) else {
            return;
        };

        let emitted = match self.view.mode() {
            ViewMode::Tree => match tree.get(row.node) {
                Some(node) => self.component.on_node_click(node),
                None => false,
            },
            ViewMode::List => match ListItem::from_node(tree, row.node) {
                Some(item) => self.component.on_item_select(&item),
                None => false,
            },
        };

        // Folders are handled by the view itself
        if !emitted {
            self.toggle_current(!self.current_is_expanded());
        }
    }

    fn current_is_expanded(&self) -> bool {
        self.current_identifier()
            .map(|(id, _)| self.view.is_expanded(&id))
            .unwrap_or(false)
    }

    fn next_language(&mut self) {
        if self.language_cycle.is_empty() {
            return;
        }
        let current = self.languages.current();
        let position = self
            .language_cycle
            .iter()
            .position(|l| *l == current)
            .unwrap_or(0);
        let next = &self.language_cycle[(position + 1) % self.language_cycle.len()];
        tracing::info!("Switching language from {} to {}", current, next);
        self.languages.select(next);
    }

    fn reload_inputs(&mut self) {
        match self.paths.read(&self.config) {
            Ok(inputs) => {
                self.ui.clear_error();
                self.component.update_inputs(inputs);
            }
            Err(e) => {
                tracing::error!("Failed to reload inputs: {:#}", e);
                self.ui.show_error(&format!("Failed to reload inputs: {:#}", e));
            }
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

async fn recv_or_pending<T>(rx: &mut Option<mpsc::UnboundedReceiver<T>>) -> Option<T> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

impl Drop for CollectionTreeApp {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
