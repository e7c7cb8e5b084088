use crate::board::{
    Answer, Board, BoardError, BoardView, Deferred, FilterSelection, Lane, Removal,
};
use crate::config::hotkeys::{Mode, ViewHotkeys};
use crate::config::Config;
use crate::drag::DragSession;
use crate::logger::LogBuffer;
use crate::ui::Theme;
use log::*;

use super::form::TaskForm;
use super::navigation::{
    Notification, NotificationLevel, PendingAction, PendingConfirmation, View,
};

/// Number of ticks a notification stays visible.
const NOTIFICATION_TICKS: usize = 60;

/// Houses data representative of application state.
///
pub struct State {
    board: Board,
    config: Config,
    selection: FilterSelection,
    search_mode: bool,
    lane: Lane,
    cursor: usize,
    drag: Option<DragSession>,
    pending: Option<PendingConfirmation>,
    view_stack: Vec<View>,
    form: Option<TaskForm>,
    notification: Option<Notification>,
    log_open: bool,
    logs: LogBuffer,
    theme: Theme,
    hotkeys: ViewHotkeys,
}

impl State {
    /// Return a new state around an opened board.
    ///
    pub fn new(board: Board, config: Config, logs: LogBuffer) -> State {
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default", config.theme_name);
            Theme::default()
        });
        let hotkeys = config.hotkeys.clone();
        State {
            board,
            config,
            selection: FilterSelection::new(),
            search_mode: false,
            lane: Lane::Todo,
            cursor: 0,
            drag: None,
            pending: None,
            view_stack: vec![View::Board],
            form: None,
            notification: None,
            log_open: false,
            logs,
            theme,
            hotkeys,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Visible tasks and stats for the current filter.
    ///
    pub fn view(&self) -> BoardView<'_> {
        self.board.view(&self.selection)
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn hotkeys(&self) -> &ViewHotkeys {
        &self.hotkeys
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn current_view(&self) -> View {
        self.view_stack.last().copied().unwrap_or(View::Board)
    }

    fn push_view(&mut self, view: View) {
        debug!("Pushing view {:?}", view);
        self.view_stack.push(view);
    }

    fn pop_view(&mut self) -> Option<View> {
        if self.view_stack.len() > 1 {
            self.view_stack.pop()
        } else {
            None
        }
    }

    /// Input mode deciding which hotkey table applies.
    ///
    pub fn mode(&self) -> Mode {
        if self.pending.is_some() {
            Mode::Confirmation
        } else if self.current_view().is_form() {
            Mode::TaskForm
        } else if self.drag.is_some() {
            Mode::Drag
        } else if self.search_mode {
            Mode::Search
        } else {
            Mode::Board
        }
    }

    // Cursor

    pub fn current_lane(&self) -> Lane {
        self.lane
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Identifier of the task under the cursor.
    ///
    pub fn selected_task_id(&self) -> Option<String> {
        self.view()
            .visible
            .get(self.lane, self.cursor)
            .map(|t| t.id.clone())
    }

    fn clamp_cursor(&mut self) {
        let count = self.view().visible.count(self.lane);
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }

    fn focus_task(&mut self, id: &str) {
        let found = self.view().visible.position(id);
        if let Some((lane, position)) = found {
            self.lane = lane;
            self.cursor = position;
        } else {
            self.clamp_cursor();
        }
    }

    pub fn next_task(&mut self) -> &mut Self {
        self.cursor += 1;
        self.clamp_cursor();
        self
    }

    pub fn previous_task(&mut self) -> &mut Self {
        self.cursor = self.cursor.saturating_sub(1);
        self
    }

    pub fn next_lane(&mut self) -> &mut Self {
        if let Some(lane) = self.lane.next() {
            self.lane = lane;
            self.clamp_cursor();
        }
        self
    }

    pub fn previous_lane(&mut self) -> &mut Self {
        if let Some(lane) = self.lane.previous() {
            self.lane = lane;
            self.clamp_cursor();
        }
        self
    }

    // Search and filter

    pub fn enter_search_mode(&mut self) -> &mut Self {
        self.search_mode = true;
        self
    }

    /// Leave search mode keeping the query applied.
    ///
    pub fn exit_search_mode(&mut self) -> &mut Self {
        self.search_mode = false;
        self
    }

    /// Leave search mode and drop the query.
    ///
    pub fn cancel_search(&mut self) -> &mut Self {
        self.search_mode = false;
        self.selection.search.clear();
        self.clamp_cursor();
        self
    }

    pub fn is_search_mode(&self) -> bool {
        self.search_mode
    }

    pub fn add_search_char(&mut self, c: char) -> &mut Self {
        self.selection.search.push(c);
        self.clamp_cursor();
        self
    }

    pub fn remove_search_char(&mut self) -> &mut Self {
        self.selection.search.pop();
        self.clamp_cursor();
        self
    }

    pub fn cycle_priority_filter(&mut self) -> &mut Self {
        self.selection.priority = self.selection.priority.cycle();
        debug!("Priority filter is now {}", self.selection.priority);
        self.clamp_cursor();
        self
    }

    pub fn reset_filter(&mut self) -> &mut Self {
        self.selection = FilterSelection::new();
        self.clamp_cursor();
        self
    }

    // Drag

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Pick up the task under the cursor.
    ///
    pub fn start_drag(&mut self) -> &mut Self {
        let Some(id) = self.selected_task_id() else {
            return self;
        };
        let drag = DragSession::pick_up(&self.view().visible, &id);
        self.drag = drag;
        debug!("Picked up task {}", id);
        self
    }

    /// Move the dragged card with the given gesture step.
    ///
    pub fn move_drag(&mut self, step: fn(&mut DragSession)) -> &mut Self {
        if let Some(drag) = self.drag.as_mut() {
            step(drag);
            self.lane = drag.lane();
            self.cursor = drag.position();
        }
        self
    }

    /// Drop the dragged card and apply the resulting layout.
    ///
    pub fn drop_task(&mut self) -> &mut Self {
        let Some(drag) = self.drag.take() else {
            return self;
        };
        if !drag.has_moved() {
            return self;
        }
        let id = drag.task_id().to_string();
        let layout = drag.release();
        match self.board.apply_layout(&layout) {
            Ok(()) => self.notify_info(format!("Moved {}", id)),
            Err(e) => self.report(e),
        }
        self.focus_task(&id);
        self
    }

    pub fn cancel_drag(&mut self) -> &mut Self {
        if let Some(drag) = self.drag.take() {
            self.focus_task(drag.task_id());
        }
        self
    }

    // Confirmation

    pub fn pending_confirmation(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// Ask to delete the task under the cursor.
    ///
    pub fn request_delete(&mut self) -> &mut Self {
        let Some(id) = self.selected_task_id() else {
            return self;
        };
        let mut deferred = Deferred::new();
        match self.board.delete(&id, &mut deferred) {
            Ok(Removal::Declined) => {
                if let Some(prompt) = deferred.take_prompt() {
                    self.pending = Some(PendingConfirmation {
                        prompt,
                        action: PendingAction::DeleteTask(id),
                    });
                }
            }
            Ok(Removal::Removed(_)) => self.clamp_cursor(),
            Err(e) => self.report(e),
        }
        self
    }

    /// Ask to delete every completed task.
    ///
    pub fn request_clear_completed(&mut self) -> &mut Self {
        let mut deferred = Deferred::new();
        match self.board.clear_completed(&mut deferred) {
            Ok(Removal::Declined) => {
                if let Some(prompt) = deferred.take_prompt() {
                    self.pending = Some(PendingConfirmation {
                        prompt,
                        action: PendingAction::ClearCompleted,
                    });
                }
            }
            Ok(Removal::Removed(_)) => self.notify_info("No completed tasks"),
            Err(e) => self.report(e),
        }
        self
    }

    /// Run the pending action now that the user agreed.
    ///
    pub fn confirm_pending(&mut self) -> &mut Self {
        let Some(pending) = self.pending.take() else {
            return self;
        };
        let result = match &pending.action {
            PendingAction::DeleteTask(id) => self.board.delete(id, &mut Answer(true)),
            PendingAction::ClearCompleted => self.board.clear_completed(&mut Answer(true)),
        };
        match result {
            Ok(Removal::Removed(n)) => {
                self.notify_info(match n {
                    1 => "Deleted 1 task".to_string(),
                    n => format!("Deleted {} tasks", n),
                });
            }
            Ok(Removal::Declined) => {}
            Err(e) => self.report(e),
        }
        self.clamp_cursor();
        self
    }

    pub fn cancel_pending(&mut self) -> &mut Self {
        if self.pending.take().is_some() {
            debug!("Confirmation cancelled");
        }
        self
    }

    // Form

    pub fn form(&self) -> Option<&TaskForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        self.form.as_mut()
    }

    pub fn open_create_form(&mut self) -> &mut Self {
        self.form = Some(TaskForm::create());
        self.push_view(View::CreateTask);
        self
    }

    /// Open the edit form for the task under the cursor.
    ///
    pub fn open_edit_form(&mut self) -> &mut Self {
        let Some(id) = self.selected_task_id() else {
            return self;
        };
        if let Some(task) = self.board.get(&id) {
            self.form = Some(TaskForm::edit(task));
            self.push_view(View::EditTask);
        }
        self
    }

    pub fn close_form(&mut self) -> &mut Self {
        self.form = None;
        self.pop_view();
        self
    }

    /// Create or update from the form. Validation errors keep the form open
    /// with the message, everything else closes it.
    ///
    pub fn submit_form(&mut self) -> &mut Self {
        let Some(form) = self.form.as_ref() else {
            return self;
        };
        let fields = form.fields();
        let result = match form.editing() {
            Some(id) => {
                let id = id.to_string();
                self.board.update(&id, fields)
            }
            None => self.board.create(fields),
        };

        match result {
            Ok(task) => {
                self.close_form();
                self.notify_info(format!("Saved {}", task.id));
                self.focus_task(&task.id);
            }
            Err(BoardError::Validation(message)) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_error(message);
                }
            }
            Err(e) => {
                self.close_form();
                self.report(e);
            }
        }
        self
    }

    // Theme, log, notifications

    /// Switch to the next theme and remember it in the configuration.
    ///
    pub fn cycle_theme(&mut self) -> &mut Self {
        self.theme = self.theme.next();
        self.config.theme_name = self.theme.name.clone();
        if let Err(e) = self.config.save() {
            warn!("Failed to save theme preference: {}", e);
        }
        self.notify_info(format!("Theme: {}", self.theme.name));
        self
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.log_open = !self.log_open;
        self
    }

    pub fn is_log_open(&self) -> bool {
        self.log_open
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notify(message.into(), NotificationLevel::Info);
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notify(message.into(), NotificationLevel::Error);
    }

    fn notify(&mut self, message: String, level: NotificationLevel) {
        self.notification = Some(Notification {
            message,
            level,
            ticks_left: NOTIFICATION_TICKS,
        });
    }

    /// Surface a board error to the user. Errors the user cannot fix from
    /// the board also open the log panel, where the details were recorded.
    ///
    fn report(&mut self, error: BoardError) {
        if error.is_recoverable() {
            self.notify_error(error.to_string());
            return;
        }
        self.log_open = true;
        match &error {
            BoardError::Storage(_) => {
                self.notify_error(format!("{} (changes kept in memory)", error))
            }
            _ => self.notify_error(error.to_string()),
        }
    }

    /// Advance time, expiring the notification.
    ///
    pub fn tick(&mut self) -> &mut Self {
        if let Some(notification) = self.notification.as_mut() {
            notification.ticks_left = notification.ticks_left.saturating_sub(1);
            if notification.ticks_left == 0 {
                self.notification = None;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fixtures::seeded_board;
    use crate::board::{PrioritySelector, Priority, Status};
    use crate::drag::DragSession;
    use crate::storage::MemorySlot;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn state() -> (State, MemorySlot) {
        let (board, slot) = seeded_board();
        (State::new(board, Config::new(), LogBuffer::new()), slot)
    }

    fn type_into_form(state: &mut State, text: &str) {
        for c in text.chars() {
            state.form_mut().unwrap().input(KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::empty(),
                kind: KeyEventKind::Press,
                state: KeyEventState::empty(),
            });
        }
    }

    #[test]
    fn new_state_starts_on_board() {
        let (state, _slot) = state();
        assert_eq!(state.current_view(), View::Board);
        assert_eq!(state.mode(), Mode::Board);
        assert_eq!(state.selected_task_id().as_deref(), Some("T3"));
        assert_eq!(state.theme().name, "tokyo-night");
    }

    #[test]
    fn cursor_moves_between_lanes_and_clamps() {
        let (mut state, _slot) = state();
        state.next_task();
        assert_eq!(state.cursor(), 0);
        state.next_lane();
        assert_eq!(state.selected_task_id().as_deref(), Some("T2"));
        state.next_lane().next_lane();
        assert_eq!(state.current_lane(), Lane::Done);
        assert_eq!(state.selected_task_id().as_deref(), Some("T1"));
        state.previous_lane().previous_lane().previous_lane();
        assert_eq!(state.current_lane(), Lane::Todo);
    }

    #[test]
    fn search_narrows_and_cancel_restores() {
        let (mut state, _slot) = state();
        state.enter_search_mode();
        assert_eq!(state.mode(), Mode::Search);
        for c in "css".chars() {
            state.add_search_char(c);
        }
        assert_eq!(state.view().counts(), [0, 1, 0]);
        assert_eq!(state.selected_task_id(), None);

        state.exit_search_mode();
        assert_eq!(state.selection().search, "css");
        state.cancel_search();
        assert_eq!(state.view().counts(), [1, 1, 1]);
    }

    #[test]
    fn priority_filter_cycles() {
        let (mut state, _slot) = state();
        state.cycle_priority_filter();
        assert_eq!(
            state.selection().priority,
            PrioritySelector::Only(Priority::High)
        );
        assert_eq!(state.view().counts(), [1, 0, 1]);
        state.reset_filter();
        assert_eq!(state.selection().priority, PrioritySelector::All);
    }

    #[test]
    fn delete_waits_for_confirmation() {
        let (mut state, _slot) = state();
        state.request_delete();
        assert_eq!(state.mode(), Mode::Confirmation);
        let prompt = state.pending_confirmation().unwrap().prompt.clone();
        assert!(prompt.contains("T3"));
        assert_eq!(state.board().tasks().len(), 3);

        state.cancel_pending();
        assert_eq!(state.board().tasks().len(), 3);

        state.request_delete().confirm_pending();
        assert!(state.board().get("T3").is_none());
        assert_eq!(state.pending_confirmation(), None);
    }

    #[test]
    fn clear_completed_with_confirmation() {
        let (mut state, _slot) = state();
        state.request_clear_completed();
        assert_eq!(
            state.pending_confirmation().unwrap().action,
            PendingAction::ClearCompleted
        );
        state.confirm_pending();
        assert_eq!(state.board().stats().done, 0);

        state.request_clear_completed();
        assert!(state.pending_confirmation().is_none());
        assert_eq!(
            state.notification().map(|n| n.message.as_str()),
            Some("No completed tasks")
        );
    }

    #[test]
    fn drag_to_done_lane() {
        let (mut state, _slot) = state();
        state.start_drag();
        assert_eq!(state.mode(), Mode::Drag);
        state.move_drag(DragSession::move_right);
        state.move_drag(DragSession::move_right);
        state.move_drag(DragSession::move_up);
        state.drop_task();

        assert!(state.drag().is_none());
        assert_eq!(state.board().get("T3").unwrap().status, Status::Done);
        assert_eq!(state.current_lane(), Lane::Done);
        assert_eq!(state.selected_task_id().as_deref(), Some("T3"));
    }

    #[test]
    fn cancelled_drag_changes_nothing() {
        let (mut state, _slot) = state();
        let before = state.board().tasks().to_vec();
        state.start_drag().move_drag(DragSession::move_right);
        state.cancel_drag();
        assert_eq!(state.board().tasks(), before.as_slice());
        assert_eq!(state.selected_task_id().as_deref(), Some("T3"));
    }

    #[test]
    fn submit_empty_title_keeps_form_open() {
        let (mut state, _slot) = state();
        state.open_create_form();
        assert_eq!(state.mode(), Mode::TaskForm);
        state.submit_form();
        assert_eq!(state.current_view(), View::CreateTask);
        assert!(state.form().unwrap().error().is_some());

        type_into_form(&mut state, "Ship it");
        state.submit_form();
        assert_eq!(state.current_view(), View::Board);
        assert_eq!(state.board().get("T4").unwrap().title, "Ship it");
        assert_eq!(state.selected_task_id().as_deref(), Some("T4"));
    }

    #[test]
    fn edit_form_updates_task() {
        let (mut state, _slot) = state();
        state.open_edit_form();
        assert_eq!(state.current_view(), View::EditTask);
        type_into_form(&mut state, "!");
        state.submit_form();
        assert_eq!(
            state.board().get("T3").unwrap().title,
            "Implement Drag & Drop!"
        );
    }

    #[test]
    fn storage_failure_is_reported() {
        let (mut state, slot) = state();
        slot.fail_writes(true);
        state.open_create_form();
        type_into_form(&mut state, "Offline");
        state.submit_form();
        assert_eq!(state.current_view(), View::Board);
        let notification = state.notification().unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
        assert!(notification.message.contains("kept in memory"));
        assert!(state.board().has_unsaved_changes());
        assert!(state.is_log_open());
    }

    #[test]
    fn missing_task_on_submit_is_reported_without_log() {
        let (mut state, _slot) = state();
        state.open_edit_form();
        let id = state.form().and_then(|f| f.editing()).unwrap().to_string();
        state.request_delete().confirm_pending();
        assert!(state.board().get(&id).is_none());

        state.submit_form();
        let notification = state.notification().unwrap();
        assert_eq!(notification.level, NotificationLevel::Error);
        assert!(notification.message.contains(&id));
        assert!(!state.is_log_open());
    }

    #[test]
    fn cycle_theme_and_notifications_expire() {
        let (mut state, _slot) = state();
        state.cycle_theme();
        assert_eq!(state.theme().name, "dracula");
        assert!(state.notification().is_some());
        for _ in 0..NOTIFICATION_TICKS {
            state.tick();
        }
        assert!(state.notification().is_none());
    }
}
