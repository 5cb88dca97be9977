//! Engine: the composition root for the task grid.
//!
//! Owns the task snapshot, filter, visible month and gestures. Pointer
//! events go in through [`Engine::handle_pointer`], gesture commits come
//! out as [`TaskIntent`]s applied to the [`TaskStore`], and every change is
//! announced to subscribers as an [`EngineChange`].

use std::rc::Rc;

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::gestures::{
    CaptureGuard, DateRange, DragGesture, DragRelease, DragState, NoopCapture, SelectionGesture,
    SelectionState, SharedCapture,
};
use crate::grid::{
    cap_lanes, CappedLayout, DateGrid, GridGeometry, PointerPos, Segment, SegmentPlanner,
};
use crate::models::filter::TaskFilter;
use crate::models::settings::{LiveUpdateMode, Settings, SettingsError};
use crate::models::task::{Task, TaskId, TaskValidationError};
use crate::services::notification::{LogNotificationSink, Notice, NotificationSink};
use crate::services::task::TaskStore;
use crate::utils::date::{first_of_month, shift_months};

pub mod events;
pub mod intents;
pub mod observers;

pub use events::{InteractionOutcome, PointerEvent, PointerTarget};
pub use intents::{DeferredEditDialog, EditDialog, EditOutcome, EditRequest, TaskIntent};
pub use observers::{EngineChange, SubscriptionId};

use observers::Observers;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid task: {0}")]
    Invalid(#[from] TaskValidationError),
    #[error("{context}: {error:#}")]
    Store {
        context: &'static str,
        error: anyhow::Error,
    },
}

/// Builder for [`Engine`]. Every collaborator except the store has a default.
pub struct EngineBuilder {
    store: Box<dyn TaskStore>,
    notifications: Box<dyn NotificationSink>,
    dialog: Box<dyn EditDialog>,
    capture: SharedCapture,
    settings: Settings,
    filter: TaskFilter,
    today: Option<NaiveDate>,
    month: Option<NaiveDate>,
}

impl EngineBuilder {
    pub fn new(store: impl TaskStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            notifications: Box::new(LogNotificationSink),
            dialog: Box::new(DeferredEditDialog),
            capture: Rc::new(std::cell::RefCell::new(NoopCapture)),
            settings: Settings::default(),
            filter: TaskFilter::default(),
            today: None,
            month: None,
        }
    }

    pub fn notifications(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.notifications = Box::new(sink);
        self
    }

    pub fn dialog(mut self, dialog: impl EditDialog + 'static) -> Self {
        self.dialog = Box::new(dialog);
        self
    }

    pub fn capture(mut self, capture: SharedCapture) -> Self {
        self.capture = capture;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn filter(mut self, filter: TaskFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Override the local date (defaults to the system clock).
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Month to show first (defaults to today's month).
    pub fn month(mut self, month: NaiveDate) -> Self {
        self.month = Some(month);
        self
    }

    /// Validate the settings and load the initial snapshot.
    pub fn build(self) -> Result<Engine, SettingsError> {
        self.settings.validate()?;

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let month = first_of_month(self.month.unwrap_or(today));
        let grid = DateGrid::new(month, today, self.settings.week_start());

        let mut engine = Engine {
            store: self.store,
            notifications: self.notifications,
            dialog: self.dialog,
            capture: self.capture,
            drag: DragGesture::new(self.settings.drag_threshold_px),
            selection: SelectionGesture::new(),
            settings: self.settings,
            filter: self.filter,
            today,
            month,
            grid,
            tasks: Vec::new(),
            segments: Vec::new(),
            geometry: GridGeometry::default(),
            pending_edit: None,
            provisional_written: false,
            provisional_failed: false,
            observers: Observers::default(),
        };
        engine.refresh();
        Ok(engine)
    }
}

pub struct Engine {
    store: Box<dyn TaskStore>,
    notifications: Box<dyn NotificationSink>,
    dialog: Box<dyn EditDialog>,
    capture: SharedCapture,
    settings: Settings,
    filter: TaskFilter,
    today: NaiveDate,
    /// First day of the visible month.
    month: NaiveDate,
    grid: DateGrid,
    /// Unfiltered snapshot in store order.
    tasks: Vec<Task>,
    segments: Vec<Segment>,
    geometry: GridGeometry,
    selection: SelectionGesture,
    drag: DragGesture,
    pending_edit: Option<EditRequest>,
    /// A drag preview reached the store during the current gesture.
    provisional_written: bool,
    /// A preview write failed; later previews in this gesture stay local.
    provisional_failed: bool,
    observers: Observers,
}

impl Engine {
    pub fn builder(store: impl TaskStore + 'static) -> EngineBuilder {
        EngineBuilder::new(store)
    }

    // State accessors

    pub fn grid(&self) -> &DateGrid {
        &self.grid
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Snapshot tasks that pass the current filter.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks, self.today)
    }

    /// Segments for the visible month, including any drag preview.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments under the configured lane cap.
    pub fn visible_layout(&self) -> CappedLayout {
        cap_lanes(&self.segments, self.settings.max_visible_lanes)
    }

    pub fn preview_task(&self) -> Option<Task> {
        self.drag.preview()
    }

    pub fn selection_range(&self) -> Option<DateRange> {
        self.selection.range()
    }

    pub fn is_highlighted(&self, date: NaiveDate) -> bool {
        self.selection.is_highlighted(date)
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// The edit request waiting for [`Engine::finish_edit`].
    pub fn pending_edit(&self) -> Option<&EditRequest> {
        self.pending_edit.as_ref()
    }

    pub fn store(&self) -> &dyn TaskStore {
        self.store.as_ref()
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Date of the cell under `pos`, if the geometry is measured.
    pub fn date_at(&self, pos: PointerPos) -> Option<NaiveDate> {
        self.geometry.date_at(&self.grid, pos)
    }

    // Inputs

    /// Reload the snapshot from the store. On failure the last good
    /// snapshot is kept.
    pub fn refresh(&mut self) {
        match self.store.list_tasks() {
            Ok(tasks) => {
                self.tasks = tasks;
                self.observers.emit(EngineChange::TasksChanged);
            }
            Err(e) => self.report_failure("Failed to load tasks", &e),
        }
        self.relayout();
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.relayout();
    }

    /// Show the month containing `date`. Any gesture in flight is cancelled.
    pub fn set_month(&mut self, date: NaiveDate) {
        let month = first_of_month(date);
        if month == self.month {
            return;
        }
        self.cancel_gesture();
        self.month = month;
        self.rebuild_grid();
    }

    pub fn next_month(&mut self) {
        self.set_month(shift_months(self.month, 1));
    }

    pub fn previous_month(&mut self) {
        self.set_month(shift_months(self.month, -1));
    }

    pub fn go_to_today(&mut self) {
        self.set_month(self.today);
    }

    /// Move the local date, e.g. after midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        if today == self.today {
            return;
        }
        self.today = today;
        self.rebuild_grid();
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.drag.set_threshold(settings.drag_threshold_px);
        let week_changed = settings.first_day_of_week != self.settings.first_day_of_week;
        self.settings = settings;
        if week_changed {
            self.rebuild_grid();
        } else {
            self.relayout();
        }
        Ok(())
    }

    /// Width of one day cell as measured by the host. Zero or non-finite
    /// widths leave drags without displacement.
    pub fn set_cell_width(&mut self, px: f32) {
        self.geometry.cell_width = px;
    }

    /// Full measured geometry, used to resolve moves that carry no cell.
    pub fn set_geometry(&mut self, geometry: GridGeometry) {
        self.geometry = geometry;
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&EngineChange) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // Pointer routing

    pub fn handle_pointer(&mut self, event: PointerEvent) -> InteractionOutcome {
        match event {
            PointerEvent::Down { pos, target } => self.pointer_down(pos, target),
            PointerEvent::Move { pos, cell } => self.pointer_move(pos, cell),
            PointerEvent::Up { .. } => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    /// Abandon whatever gesture is active without committing it.
    pub fn cancel_gesture(&mut self) {
        if self.selection.is_active() {
            self.selection.cancel();
            self.observers.emit(EngineChange::SelectionChanged(None));
        }
        if let Some(original) = self.drag.cancel() {
            log::debug!("Drag on task {} cancelled", original.id);
            self.end_provisional(&original);
            self.relayout();
        }
    }

    fn pointer_down(&mut self, pos: PointerPos, target: PointerTarget) -> InteractionOutcome {
        if self.selection.is_active() || self.drag.is_active() {
            log::debug!("Pointer down ignored while a gesture is active");
            return InteractionOutcome::Ignored;
        }

        match target {
            PointerTarget::Cell(date) => {
                if !self.grid.contains(date) {
                    return InteractionOutcome::Ignored;
                }
                let capture = Rc::clone(&self.capture);
                if !self
                    .selection
                    .pointer_down(date, false, || CaptureGuard::acquire(&capture))
                {
                    return InteractionOutcome::Ignored;
                }
                let range = DateRange::single(date);
                self.observers.emit(EngineChange::SelectionChanged(Some(range)));
                InteractionOutcome::SelectionChanged(range)
            }
            PointerTarget::Task { id, kind } => {
                let Some(task) = self.task(&id).cloned() else {
                    log::debug!("Pointer down on unknown task {}", id);
                    return InteractionOutcome::Ignored;
                };
                let capture = CaptureGuard::acquire(&self.capture);
                self.drag.pointer_down(task, kind, pos, capture);
                self.provisional_written = false;
                self.provisional_failed = false;
                InteractionOutcome::DragArmed(id)
            }
            PointerTarget::Outside => InteractionOutcome::Ignored,
        }
    }

    fn pointer_move(&mut self, pos: PointerPos, cell: Option<NaiveDate>) -> InteractionOutcome {
        if self.selection.is_active() {
            let date = cell.or_else(|| self.date_at(pos));
            let Some(date) = date.filter(|date| self.grid.contains(*date)) else {
                return InteractionOutcome::Ignored;
            };
            return match self.selection.pointer_move(date) {
                Some(range) => {
                    self.observers.emit(EngineChange::SelectionChanged(Some(range)));
                    InteractionOutcome::SelectionChanged(range)
                }
                None => InteractionOutcome::Ignored,
            };
        }

        let Some(candidate) = self.drag.pointer_move(pos, self.geometry.cell_width) else {
            return InteractionOutcome::Ignored;
        };
        self.write_preview(&candidate);
        self.relayout();
        self.observers.emit(EngineChange::DragPreview(candidate.clone()));
        InteractionOutcome::DragPreview(candidate)
    }

    fn pointer_up(&mut self) -> InteractionOutcome {
        if let Some(range) = self.selection.pointer_up() {
            return self.finish_selection(range);
        }
        let release = self.drag.pointer_up();
        self.finish_drag(release)
    }

    fn pointer_leave(&mut self) -> InteractionOutcome {
        if let Some(range) = self.selection.pointer_leave() {
            return self.finish_selection(range);
        }
        let release = self.drag.pointer_leave();
        self.finish_drag(release)
    }

    fn finish_selection(&mut self, range: DateRange) -> InteractionOutcome {
        self.observers.emit(EngineChange::SelectionChanged(None));
        self.open_edit(EditRequest::create(range.start, range.end));
        InteractionOutcome::CreateRequested(range)
    }

    fn finish_drag(&mut self, release: DragRelease) -> InteractionOutcome {
        match release {
            DragRelease::Idle => InteractionOutcome::Ignored,
            DragRelease::Click(task) => {
                let id = task.id.clone();
                self.open_edit(EditRequest::edit(task));
                InteractionOutcome::EditRequested(id)
            }
            DragRelease::Commit { original, updated } => {
                self.provisional_written = false;
                self.provisional_failed = false;
                match self.dispatch(TaskIntent::Update(updated.clone())) {
                    Ok(_) => InteractionOutcome::TaskCommitted(updated),
                    Err(_) => {
                        // Best effort: put the original back over any preview writes.
                        if self.settings.live_update_mode == LiveUpdateMode::Optimistic {
                            self.restore(&original);
                        }
                        InteractionOutcome::CommitFailed(original.id)
                    }
                }
            }
            DragRelease::NoChange(task) => {
                let id = task.id.clone();
                self.end_provisional(&task);
                self.relayout();
                InteractionOutcome::DragNoChange(id)
            }
            DragRelease::Abandoned(task) => {
                self.end_provisional(&task);
                self.relayout();
                InteractionOutcome::Ignored
            }
        }
    }

    /// Write a drag candidate through to the store in optimistic mode.
    fn write_preview(&mut self, candidate: &Task) {
        if self.settings.live_update_mode != LiveUpdateMode::Optimistic || self.provisional_failed {
            return;
        }
        match self.store.update_task(candidate) {
            Ok(()) => self.provisional_written = true,
            Err(e) => {
                self.provisional_failed = true;
                self.report_failure("Failed to save drag preview", &e);
            }
        }
    }

    /// Undo preview writes once a drag ends without a commit.
    fn end_provisional(&mut self, original: &Task) {
        let written = std::mem::take(&mut self.provisional_written);
        self.provisional_failed = false;
        if written {
            self.restore(original);
        }
    }

    fn restore(&mut self, original: &Task) {
        log::debug!("Restoring task {} after drag", original.id);
        if let Err(e) = self.store.update_task(original) {
            self.report_failure("Failed to restore task", &e);
        }
        self.refresh();
    }

    // Edit flow

    fn open_edit(&mut self, request: EditRequest) {
        self.dialog.open(&request);
        self.pending_edit = Some(request);
    }

    /// Apply what the edit dialog returned for the pending request.
    ///
    /// A save that fails validation keeps the request pending so the dialog
    /// can be shown again.
    pub fn finish_edit(&mut self, outcome: EditOutcome) -> Result<Option<Task>, EngineError> {
        let Some(request) = self.pending_edit.take() else {
            log::debug!("No edit in progress");
            return Ok(None);
        };

        match outcome {
            EditOutcome::Save(draft) => {
                let intent = match &request.existing {
                    Some(existing) => TaskIntent::Update(existing.with_fields(draft)),
                    None => TaskIntent::Create(draft),
                };
                let result = self.dispatch(intent);
                if let Err(EngineError::Invalid(_)) = &result {
                    self.pending_edit = Some(request);
                }
                result
            }
            EditOutcome::Cancel => Ok(None),
            EditOutcome::Delete { confirmed: false } => {
                log::debug!("Delete declined");
                Ok(None)
            }
            EditOutcome::Delete { confirmed: true } => match request.existing {
                Some(existing) => self.dispatch(TaskIntent::Delete(existing.id)),
                None => Ok(None),
            },
        }
    }

    // Mutations

    /// Apply an intent to the store and reload the snapshot.
    ///
    /// Returns the created or updated task. Store failures are logged and
    /// surfaced as [`Notice::Failed`] before being returned.
    pub fn dispatch(&mut self, intent: TaskIntent) -> Result<Option<Task>, EngineError> {
        let result = self.apply(intent);
        if !matches!(result, Err(EngineError::Invalid(_))) {
            self.refresh();
        }
        result
    }

    fn apply(&mut self, intent: TaskIntent) -> Result<Option<Task>, EngineError> {
        match intent {
            TaskIntent::Create(draft) => {
                draft.validate()?;
                let task = self
                    .store
                    .create_task(draft)
                    .map_err(|e| self.store_error("Failed to create task", e))?;
                log::info!("Created task {} ({})", task.id, task.name);
                self.notifications.notify(Notice::TaskCreated {
                    id: task.id.clone(),
                    name: task.name.clone(),
                });
                Ok(Some(task))
            }
            TaskIntent::Update(task) => {
                task.validate()?;
                let known = self.task(&task.id).is_some();
                self.store
                    .update_task(&task)
                    .map_err(|e| self.store_error("Failed to update task", e))?;
                if known {
                    log::info!(
                        "Updated task {} ({} to {})",
                        task.id,
                        task.start_date,
                        task.end_date
                    );
                    self.notifications.notify(Notice::TaskUpdated {
                        id: task.id.clone(),
                        name: task.name.clone(),
                    });
                }
                Ok(Some(task))
            }
            TaskIntent::Delete(id) => {
                let name = self.task(&id).map(|task| task.name.clone());
                self.store
                    .delete_task(&id)
                    .map_err(|e| self.store_error("Failed to delete task", e))?;
                if let Some(name) = name {
                    log::info!("Deleted task {}", id);
                    self.notifications.notify(Notice::TaskDeleted { id, name });
                }
                Ok(None)
            }
        }
    }

    fn store_error(&mut self, context: &'static str, error: anyhow::Error) -> EngineError {
        self.report_failure(context, &error);
        EngineError::Store { context, error }
    }

    fn report_failure(&mut self, context: &str, error: &anyhow::Error) {
        log::warn!("{}: {:#}", context, error);
        self.notifications.notify(Notice::Failed {
            message: format!("{}: {}", context, error),
        });
    }

    // Layout

    fn rebuild_grid(&mut self) {
        self.grid = DateGrid::new(self.month, self.today, self.settings.week_start());
        self.relayout();
    }

    fn relayout(&mut self) {
        let preview = self.drag.preview();
        let tasks = self.tasks.iter().map(|task| match &preview {
            Some(candidate) if candidate.id == task.id => candidate,
            _ => task,
        });
        let visible = tasks.filter(|task| self.filter.matches(task, self.today));
        self.segments = SegmentPlanner::plan(&self.grid, visible);
        self.observers.emit(EngineChange::LayoutChanged);
    }
}
