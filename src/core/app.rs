// Application State
// Dashboard UI state and its wiring to the sync store

use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};

use super::events::{AppEvent, InputMode};
use super::model::{Category, Widget};
use super::widget_form::{FormField, WidgetForm};
use super::AppConfig;
use crate::operations::{Snapshot, SyncError, SyncStore};
use crate::ui::toast::Toast;

/// Progress of the category load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Settled result of a store operation, delivered back to the UI thread
#[derive(Debug)]
pub enum Outcome {
    Loaded(Result<usize, SyncError>),
    WidgetAdded(Result<(), SyncError>),
    WidgetDeleted(Result<(), SyncError>),
}

/// Focused position on the board
///
/// `slot` indexes the widgets of the focused category; the slot one past
/// the last widget is that category's "add" tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFocus {
    pub category: usize,
    pub slot: usize,
}

/// Button highlighted in the delete confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Cancel,
    Delete,
}

/// Widget waiting for delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub category_id: String,
    pub widget_id: String,
    pub widget_name: String,
    pub choice: ConfirmChoice,
}

/// Main application state
pub struct App {
    /// Resolved configuration
    pub config: AppConfig,

    /// Focused card or add tile
    pub focus: BoardFocus,

    /// "Add Widget" form; kept between openings of the side panel
    pub form: WidgetForm,

    /// Whether the side panel is visible
    pub drawer_open: bool,

    /// Delete confirmation dialog, when open
    pub confirm: Option<PendingDelete>,

    /// Visible notifications, oldest first
    pub toasts: Vec<Toast>,

    pub load_state: LoadState,

    /// Whether the application should quit
    pub should_quit: bool,

    snapshot: Snapshot,
    store: Arc<SyncStore>,
    updates: watch::Receiver<Snapshot>,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
    runtime: Handle,
}

impl App {
    /// Create the application; store operations are spawned on `runtime`
    pub fn new(config: AppConfig, store: Arc<SyncStore>, runtime: Handle) -> Self {
        let updates = store.subscribe();
        let snapshot = store.snapshot();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self {
            config,
            focus: BoardFocus::default(),
            form: WidgetForm::new(None),
            drawer_open: false,
            confirm: None,
            toasts: Vec::new(),
            load_state: LoadState::Loading,
            should_quit: false,
            snapshot,
            store,
            updates,
            outcome_tx,
            outcome_rx,
            runtime,
        }
    }

    /// Data currently shown on the board
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn categories(&self) -> &[Category] {
        self.snapshot.categories()
    }

    /// Where keyboard input currently goes
    pub fn input_mode(&self) -> InputMode {
        if self.confirm.is_some() {
            InputMode::Confirm
        } else if self.drawer_open {
            InputMode::Drawer
        } else {
            InputMode::Board
        }
    }

    pub fn focused_category(&self) -> Option<&Category> {
        self.categories().get(self.focus.category)
    }

    /// Focused widget, or `None` when the add tile is focused
    pub fn focused_widget(&self) -> Option<(&Category, &Widget)> {
        let category = self.focused_category()?;
        category
            .widgets
            .get(self.focus.slot)
            .map(|widget| (category, widget))
    }

    /// Kick off a (re)load of all categories
    pub fn start_load(&mut self) {
        self.load_state = LoadState::Loading;
        let store = Arc::clone(&self.store);
        let tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let result = store.load().await;
            let _ = tx.send(Outcome::Loaded(result));
        });
    }

    fn dispatch_add(&self, category_id: String, widget: Widget) {
        let store = Arc::clone(&self.store);
        let tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let result = store.add_widget(&category_id, widget).await;
            let _ = tx.send(Outcome::WidgetAdded(result));
        });
    }

    fn dispatch_delete(&self, category_id: String, widget_id: String) {
        let store = Arc::clone(&self.store);
        let tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let result = store.delete_widget(&category_id, &widget_id).await;
            let _ = tx.send(Outcome::WidgetDeleted(result));
        });
    }

    /// Pick up store changes and settled operations; expire old toasts
    pub fn pump(&mut self) {
        if self.updates.has_changed().unwrap_or(false) {
            self.snapshot = self.updates.borrow_and_update().clone();
            self.clamp_focus();
        }

        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }

        self.expire_toasts(Instant::now());
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Loaded(Ok(_)) => self.load_state = LoadState::Ready,
            Outcome::Loaded(Err(err)) => {
                self.toasts.push(Toast::error(format!("Failed to load categories: {}", err)));
                self.load_state = LoadState::Failed(err.to_string());
            }
            Outcome::WidgetAdded(Ok(())) => {
                self.toasts.push(Toast::success("Widget added successfully!".to_string()));
            }
            Outcome::WidgetAdded(Err(err)) => {
                self.toasts.push(Toast::error(format!("Failed to add widget: {}", err)));
            }
            Outcome::WidgetDeleted(Ok(())) => {
                self.toasts.push(Toast::success("Widget deleted successfully!".to_string()));
            }
            Outcome::WidgetDeleted(Err(err)) => {
                self.toasts.push(Toast::error(format!("Failed to delete widget: {}", err)));
            }
        }
    }

    /// Drop toasts that have been visible for the configured duration
    pub fn expire_toasts(&mut self, now: Instant) {
        let ttl = self.config.ui.toast_duration;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < ttl);
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        if event == AppEvent::Quit {
            self.quit();
            return;
        }

        match self.input_mode() {
            InputMode::Board => self.handle_board_event(event),
            InputMode::Drawer => self.handle_drawer_event(event),
            InputMode::Confirm => self.handle_confirm_event(event),
        }
    }

    fn handle_board_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Up => self.move_category(-1),
            AppEvent::Down => self.move_category(1),
            AppEvent::Left => self.focus.slot = self.focus.slot.saturating_sub(1),
            AppEvent::Right => {
                self.focus.slot += 1;
                self.clamp_focus();
            }
            AppEvent::Submit => {
                if self.focused_widget().is_none() {
                    if let Some(category) = self.focused_category() {
                        let id = category.id.clone();
                        self.open_drawer(Some(id));
                    }
                }
            }
            AppEvent::OpenDrawer => self.open_drawer(None),
            AppEvent::RequestDelete => {
                let pending = self.focused_widget().map(|(category, widget)| PendingDelete {
                    category_id: category.id.clone(),
                    widget_id: widget.id.clone(),
                    widget_name: widget.name.clone(),
                    choice: ConfirmChoice::Delete,
                });
                if pending.is_some() {
                    self.confirm = pending;
                }
            }
            AppEvent::Refresh => self.start_load(),
            _ => {}
        }
    }

    fn handle_drawer_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Back => self.drawer_open = false,
            AppEvent::NextField => self.form.next_field(),
            AppEvent::PreviousField => self.form.previous_field(),
            AppEvent::Left | AppEvent::Right if self.form.field == FormField::Category => {
                let forward = event == AppEvent::Right;
                self.form.cycle_category(self.snapshot.categories(), forward);
            }
            AppEvent::Input(c) => self.form.input(c),
            AppEvent::Backspace => self.form.backspace(),
            AppEvent::Submit => self.submit_form(),
            _ => {}
        }
    }

    fn handle_confirm_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Back => self.confirm = None,
            AppEvent::Left | AppEvent::Right => {
                if let Some(pending) = self.confirm.as_mut() {
                    pending.choice = match pending.choice {
                        ConfirmChoice::Cancel => ConfirmChoice::Delete,
                        ConfirmChoice::Delete => ConfirmChoice::Cancel,
                    };
                }
            }
            AppEvent::Submit => {
                if let Some(pending) = self.confirm.take() {
                    if pending.choice == ConfirmChoice::Delete {
                        self.dispatch_delete(pending.category_id, pending.widget_id);
                    }
                }
            }
            _ => {}
        }
    }

    /// Open the side panel, optionally switching its category
    fn open_drawer(&mut self, category_id: Option<String>) {
        if category_id.is_some() {
            self.form.category_id = category_id;
        }
        self.form.field = if self.form.category_id.is_some() {
            FormField::Name
        } else {
            FormField::Category
        };
        self.drawer_open = true;
    }

    /// Dispatch the drafted widget when every field is present
    ///
    /// The form is cleared and closed right away; the board only changes
    /// once the server confirms.
    fn submit_form(&mut self) {
        if let Some((category_id, widget)) = self.form.build() {
            self.dispatch_add(category_id, widget);
            self.form.clear();
            self.drawer_open = false;
        }
    }

    fn move_category(&mut self, delta: isize) {
        let count = self.categories().len();
        if count == 0 {
            return;
        }
        let next = self.focus.category.saturating_add_signed(delta).min(count - 1);
        if next != self.focus.category {
            self.focus.category = next;
            self.clamp_focus();
        }
    }

    /// Keep focus on an existing category and slot
    fn clamp_focus(&mut self) {
        let categories = self.snapshot.categories();
        if categories.is_empty() {
            self.focus = BoardFocus::default();
            return;
        }

        self.focus.category = self.focus.category.min(categories.len() - 1);
        let widgets = categories[self.focus.category].widgets.len();
        self.focus.slot = self.focus.slot.min(widgets);
    }

    /// Request application quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
