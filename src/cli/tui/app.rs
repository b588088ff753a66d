//! TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use crate::config::Config;
use crate::domain::{compute_stats, Item, ItemId, ItemStore, Quantity, Stats};

pub const HELP: &str =
    "j/k:move space:pack +/-:qty 1-0:set qty a:add d:delete q:quit";

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the add form
    Adding,
    Confirm(ConfirmAction),
}

/// Confirmation actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Delete(ItemId),
}

/// Contents of the add form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Form {
    pub description: String,
    pub quantity: Quantity,
}

/// Application state
pub struct App {
    /// The packing list
    store: ItemStore,

    /// Heading text
    title: String,

    /// Upper bound of the quantity selectors
    max_quantity: u32,

    /// Add form, kept between visits until submitted
    form: Form,

    /// Input mode
    input_mode: InputMode,

    /// Selected list index
    selected: usize,

    /// Status message to display
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create a new application over the given store
    pub fn new(store: ItemStore, config: &Config) -> Self {
        Self {
            store,
            title: config.title.clone(),
            max_quantity: config.max_quantity,
            form: Form::default(),
            input_mode: InputMode::Normal,
            selected: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            // Every event is followed by a full redraw from the current list
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    /// Draw the UI
    pub fn draw(&self, frame: &mut Frame) {
        views::packing::draw(frame, self);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C quits from any mode
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match &self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Adding => self.handle_adding_key(key),
            InputMode::Confirm(_) => self.handle_confirm_key(key),
        }
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => self.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection_up(),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.store.len().saturating_sub(1);
            }

            // Item controls
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let max = self.max_quantity;
                self.adjust_selected_quantity(|q| q.step_up(max));
            }
            KeyCode::Char('-') => self.adjust_selected_quantity(Quantity::step_down),
            KeyCode::Char(c @ '0'..='9') => {
                // 0 stands for 10, matching the last option of the selector
                let value = c.to_digit(10).map(|d| if d == 0 { 10 } else { d });
                if let Some(value) = value {
                    self.set_selected_quantity(value);
                }
            }
            KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(item) = self.selected_item() {
                    self.input_mode = InputMode::Confirm(ConfirmAction::Delete(item.id));
                }
            }

            // Form
            KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Char('i') | KeyCode::Tab => {
                self.input_mode = InputMode::Adding;
            }

            KeyCode::Char('?') => {
                self.status_message = Some(HELP.to_string());
            }

            _ => {}
        }
    }

    /// Handle keys while the add form has focus
    fn handle_adding_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Backspace => {
                self.form.description.pop();
            }
            KeyCode::Up => {
                self.form.quantity = self.form.quantity.step_up(self.max_quantity);
            }
            KeyCode::Down => {
                self.form.quantity = self.form.quantity.step_down();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.description.push(c);
            }
            _ => {}
        }
    }

    /// Handle keys in confirm mode
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let InputMode::Confirm(ConfirmAction::Delete(id)) = self.input_mode {
                    self.delete(id);
                }
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    /// Move selection down, wrapping at the end
    fn move_selection_down(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection up, wrapping at the start
    fn move_selection_up(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Adds the form contents as a new item and resets the form
    fn submit_form(&mut self) {
        let description = self.form.description.trim().to_string();
        let quantity = self.form.quantity;

        match self.store.add(description, quantity) {
            Some(id) => {
                self.form = Form::default();
                self.selected = self.store.len() - 1;
                self.status_message = self
                    .store
                    .get(id)
                    .map(|item| format!("Added: {}", item));
            }
            None => {
                self.status_message = Some("Type a description first".to_string());
            }
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.toggle_packed(id);
        }
    }

    fn adjust_selected_quantity(&mut self, change: impl Fn(Quantity) -> Quantity) {
        if let Some(item) = self.selected_item() {
            let (id, quantity) = (item.id, change(item.quantity));
            self.store.set_quantity(id, quantity);
        }
    }

    fn set_selected_quantity(&mut self, value: u32) {
        if value > self.max_quantity {
            self.status_message = Some(format!("Quantity goes up to {}", self.max_quantity));
            return;
        }
        if let (Some(id), Ok(quantity)) = (self.selected_id(), Quantity::new(value)) {
            self.store.set_quantity(id, quantity);
        }
    }

    fn delete(&mut self, id: ItemId) {
        let description = self.store.get(id).map(|item| item.description.clone());
        if self.store.delete(id) {
            self.selected = self.selected.min(self.store.len().saturating_sub(1));
            if let Some(description) = description {
                self.status_message = Some(format!("Deleted: {}", description));
            }
        }
    }

    fn selected_id(&self) -> Option<ItemId> {
        self.selected_item().map(|item| item.id)
    }

    // Public accessors for views

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    pub fn stats(&self) -> Stats {
        compute_stats(self.store.items())
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.store.items().get(self.selected)
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
