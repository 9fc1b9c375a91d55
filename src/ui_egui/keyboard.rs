// Keyboard interaction
//
// An outer state machine (none -> selecting -> moving <-> resizing) driven by
// discrete key commands. The proposal math is delegated to the view's
// DragHandler, so pointer and keyboard gestures share one set of invariants.
// - Moving: directional keys shift the whole event by one grid unit
// - Resizing: directional keys shift the active edge by one grid unit
// - Cancel while resizing drops back to moving with the pre-resize range

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::drag::EventDropped;
use super::handler::{DragHandler, InteractionError, InteractionKind};
use super::resize::{EventResized, ResizeEdge};
use super::views::InteractionTarget;
use crate::models::event::CalendarEvent;
use crate::models::settings::InteractionSettings;
use crate::models::ui::ViewType;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum KeyboardMode {
    #[default]
    None,
    /// Several events share the focused cell; one is highlighted for selection
    Selecting {
        candidates: Vec<CalendarEvent>,
        index: usize,
    },
    Moving,
    Resizing { edge: ResizeEdge },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Confirm,
    Cancel,
    SwitchToResize,
    StartEdge,
    EndEdge,
    ReturnToMove,
    Up,
    Down,
    Left,
    Right,
    NextEvent,
    PreviousEvent,
}

/// What the host view knows at the moment a key is pressed.
#[derive(Clone, Copy)]
pub struct KeyboardContext<'a> {
    pub focused_date: NaiveDate,
    /// Events occupying the focused cell, in display order
    pub events_in_focus: &'a [CalendarEvent],
    pub target: &'a dyn InteractionTarget,
}

#[derive(Clone, Debug, PartialEq)]
pub enum KeyOutcome {
    /// Key has no meaning in the current mode
    Ignored,
    /// Selection candidate changed or selection started
    Selected,
    ModeChanged,
    /// One proposal update was pushed to the handler
    Updated,
    Dropped(EventDropped),
    Resized(EventResized),
    /// Confirm produced no commit (nothing moved, or the proposal was invalid)
    Rejected,
    Cancelled,
}

/// Ranges tracked for the event under keyboard control
#[derive(Clone, Debug, PartialEq)]
struct KeyboardGesture {
    /// The event as first selected; payloads always report this
    original: CalendarEvent,
    /// Range after the last directional step, valid or not
    cursor: (NaiveDateTime, NaiveDateTime),
    last_valid: (NaiveDateTime, NaiveDateTime),
    /// Range to restore when a resize is cancelled
    move_range: (NaiveDateTime, NaiveDateTime),
}

impl KeyboardGesture {
    fn new(event: CalendarEvent) -> Self {
        let range = (event.start, event.end);
        Self {
            original: event,
            cursor: range,
            last_valid: range,
            move_range: range,
        }
    }
}

#[derive(Clone, Debug)]
pub struct KeyboardCoordinator {
    view: ViewType,
    time_slot: Duration,
    min_duration: Duration,
    mode: KeyboardMode,
    gesture: Option<KeyboardGesture>,
}

impl KeyboardCoordinator {
    pub fn new(view: ViewType) -> Self {
        Self::with_settings(view, &InteractionSettings::default())
    }

    pub fn with_settings(view: ViewType, settings: &InteractionSettings) -> Self {
        Self {
            view,
            time_slot: settings.time_slot_duration(),
            min_duration: settings.min_event_duration(),
            mode: KeyboardMode::None,
            gesture: None,
        }
    }

    pub fn view(&self) -> ViewType {
        self.view
    }

    pub fn mode(&self) -> &KeyboardMode {
        &self.mode
    }

    /// Highlighted candidate while selecting, otherwise the event under control
    pub fn selected_event(&self) -> Option<&CalendarEvent> {
        match &self.mode {
            KeyboardMode::Selecting { candidates, index } => candidates.get(*index),
            _ => self.gesture.as_ref().map(|gesture| &gesture.original),
        }
    }

    /// Range reached by the last directional step
    pub fn working_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.gesture.as_ref().map(|gesture| gesture.cursor)
    }

    pub fn handle_key(
        &mut self,
        key: KeyCommand,
        handler: &mut DragHandler,
        context: &KeyboardContext<'_>,
    ) -> Result<KeyOutcome, InteractionError> {
        let outcome = match self.mode {
            KeyboardMode::None => self.handle_idle(key, handler, context),
            KeyboardMode::Selecting { .. } => self.handle_selecting(key, handler, context),
            KeyboardMode::Moving => self.handle_moving(key, handler, context),
            KeyboardMode::Resizing { edge } => self.handle_resizing(edge, key, handler, context),
        }?;

        if outcome != KeyOutcome::Ignored {
            log::trace!("Key {:?} -> {:?}, mode now {:?}", key, outcome, self.mode);
        }
        Ok(outcome)
    }

    fn handle_idle(
        &mut self,
        key: KeyCommand,
        handler: &mut DragHandler,
        context: &KeyboardContext<'_>,
    ) -> Result<KeyOutcome, InteractionError> {
        if key != KeyCommand::Confirm {
            return Ok(KeyOutcome::Ignored);
        }

        match context.events_in_focus {
            [] => Ok(KeyOutcome::Ignored),
            [event] => {
                self.begin_move(event.clone(), handler, context)?;
                Ok(KeyOutcome::ModeChanged)
            }
            candidates => {
                self.mode = KeyboardMode::Selecting {
                    candidates: candidates.to_vec(),
                    index: 0,
                };
                Ok(KeyOutcome::Selected)
            }
        }
    }

    fn handle_selecting(
        &mut self,
        key: KeyCommand,
        handler: &mut DragHandler,
        context: &KeyboardContext<'_>,
    ) -> Result<KeyOutcome, InteractionError> {
        let KeyboardMode::Selecting { candidates, index } = &mut self.mode else {
            return Ok(KeyOutcome::Ignored);
        };

        match key {
            KeyCommand::NextEvent if !candidates.is_empty() => {
                *index = (*index + 1) % candidates.len();
                Ok(KeyOutcome::Selected)
            }
            KeyCommand::PreviousEvent if !candidates.is_empty() => {
                *index = (*index + candidates.len() - 1) % candidates.len();
                Ok(KeyOutcome::Selected)
            }
            KeyCommand::Confirm => match candidates.get(*index).cloned() {
                Some(event) => {
                    self.begin_move(event, handler, context)?;
                    Ok(KeyOutcome::ModeChanged)
                }
                None => Ok(KeyOutcome::Ignored),
            },
            KeyCommand::Cancel => {
                self.mode = KeyboardMode::None;
                Ok(KeyOutcome::Cancelled)
            }
            _ => Ok(KeyOutcome::Ignored),
        }
    }

    fn handle_moving(
        &mut self,
        key: KeyCommand,
        handler: &mut DragHandler,
        context: &KeyboardContext<'_>,
    ) -> Result<KeyOutcome, InteractionError> {
        match key {
            KeyCommand::Up | KeyCommand::Down | KeyCommand::Left | KeyCommand::Right => {
                let Some(gesture) = self.gesture.as_ref() else {
                    return Ok(KeyOutcome::Ignored);
                };
                let Some(step) = self.step(key, gesture.original.all_day) else {
                    return Ok(KeyOutcome::Ignored);
                };

                let (start, end) = (gesture.cursor.0 + step, gesture.cursor.1 + step);
                let is_valid = context.target.is_valid(start, end);
                handler.update_drag(start, is_valid, context.target.highlight_cells(start, end))?;
                self.advance((start, end), is_valid);
                Ok(KeyOutcome::Updated)
            }
            KeyCommand::SwitchToResize => {
                let Some(gesture) = self.gesture.as_mut() else {
                    return Ok(KeyOutcome::Ignored);
                };
                gesture.move_range = gesture.last_valid;
                let range = gesture.last_valid;
                self.restart(
                    KeyboardMode::Resizing {
                        edge: ResizeEdge::End,
                    },
                    range,
                    handler,
                    context,
                )?;
                Ok(KeyOutcome::ModeChanged)
            }
            KeyCommand::Confirm => {
                let result = handler.complete_drag();
                let gesture = self.finish();
                match (result?, gesture) {
                    (Some(dropped), Some(gesture)) => Ok(KeyOutcome::Dropped(EventDropped {
                        old_start: gesture.original.start,
                        old_end: gesture.original.end,
                        event: gesture.original,
                        ..dropped
                    })),
                    _ => Ok(KeyOutcome::Rejected),
                }
            }
            KeyCommand::Cancel => {
                handler.cancel_drag();
                self.finish();
                Ok(KeyOutcome::Cancelled)
            }
            _ => Ok(KeyOutcome::Ignored),
        }
    }

    fn handle_resizing(
        &mut self,
        edge: ResizeEdge,
        key: KeyCommand,
        handler: &mut DragHandler,
        context: &KeyboardContext<'_>,
    ) -> Result<KeyOutcome, InteractionError> {
        let Some(gesture) = self.gesture.as_ref() else {
            return Ok(KeyOutcome::Ignored);
        };

        match key {
            KeyCommand::Up | KeyCommand::Down | KeyCommand::Left | KeyCommand::Right => {
                let Some(step) = self.step(key, gesture.original.all_day) else {
                    return Ok(KeyOutcome::Ignored);
                };

                let (mut start, mut end) = gesture.cursor;
                match edge {
                    ResizeEdge::Start => start += step,
                    ResizeEdge::End => end += step,
                }
                let well_formed = handler
                    .resize_context()
                    .is_some_and(|resize| resize.is_range_valid(start, end, self.min_duration));
                let is_valid = well_formed && context.target.is_valid(start, end);

                handler.update_resize(
                    start,
                    end,
                    is_valid,
                    context.target.highlight_cells(start, end),
                )?;
                self.advance((start, end), is_valid);
                Ok(KeyOutcome::Updated)
            }
            KeyCommand::StartEdge | KeyCommand::EndEdge => {
                let requested = if key == KeyCommand::StartEdge {
                    ResizeEdge::Start
                } else {
                    ResizeEdge::End
                };
                if requested == edge {
                    return Ok(KeyOutcome::Ignored);
                }
                let range = gesture.last_valid;
                self.restart(KeyboardMode::Resizing { edge: requested }, range, handler, context)?;
                Ok(KeyOutcome::ModeChanged)
            }
            KeyCommand::ReturnToMove => {
                let range = gesture.last_valid;
                self.restart(KeyboardMode::Moving, range, handler, context)?;
                Ok(KeyOutcome::ModeChanged)
            }
            KeyCommand::Cancel => {
                let range = gesture.move_range;
                self.restart(KeyboardMode::Moving, range, handler, context)?;
                Ok(KeyOutcome::Cancelled)
            }
            KeyCommand::Confirm => {
                let result = handler.complete_resize();
                let gesture = self.finish();
                match (result?, gesture) {
                    (Some(resized), Some(gesture)) => Ok(KeyOutcome::Resized(EventResized {
                        event: gesture.original,
                        ..resized
                    })),
                    _ => Ok(KeyOutcome::Rejected),
                }
            }
            _ => Ok(KeyOutcome::Ignored),
        }
    }

    /// Offset applied by one directional key, `None` when the key does not
    /// apply (vertical slot steps on an all-day event in a time grid).
    fn step(&self, key: KeyCommand, all_day: bool) -> Option<Duration> {
        let vertical = match self.view {
            ViewType::Month => Duration::days(7),
            ViewType::Day | ViewType::Week if all_day => return horizontal_step(key),
            ViewType::Day | ViewType::Week => self.view.grid_unit(self.time_slot).duration(),
        };
        match key {
            KeyCommand::Up => Some(-vertical),
            KeyCommand::Down => Some(vertical),
            _ => horizontal_step(key),
        }
    }

    fn begin_move(
        &mut self,
        event: CalendarEvent,
        handler: &mut DragHandler,
        context: &KeyboardContext<'_>,
    ) -> Result<(), InteractionError> {
        handler.start_drag(&event, context.focused_date)?;
        log::debug!("Keyboard selected event {}", event.id);
        self.gesture = Some(KeyboardGesture::new(event));
        self.mode = KeyboardMode::Moving;
        Ok(())
    }

    /// Replace the handler's gesture with a fresh one over `range` and push a
    /// single update so an immediate confirm commits it.
    fn restart(
        &mut self,
        next: KeyboardMode,
        range: (NaiveDateTime, NaiveDateTime),
        handler: &mut DragHandler,
        context: &KeyboardContext<'_>,
    ) -> Result<(), InteractionError> {
        let Some(gesture) = self.gesture.as_mut() else {
            return Ok(());
        };
        let working = gesture.original.with_range(range.0, range.1);
        let (start, end) = range;
        let is_valid = context.target.is_valid(start, end);
        let cells = context.target.highlight_cells(start, end);

        match handler.mode() {
            InteractionKind::Dragging => handler.cancel_drag(),
            InteractionKind::Resizing => handler.cancel_resize(),
            InteractionKind::Idle => {}
        }
        match next {
            KeyboardMode::Moving => {
                handler.start_drag(&working, start.date())?;
                handler.update_drag(start, is_valid, cells)?;
            }
            KeyboardMode::Resizing { edge } => {
                handler.start_resize(&working, edge)?;
                handler.update_resize(start, end, is_valid, cells)?;
            }
            KeyboardMode::None | KeyboardMode::Selecting { .. } => {}
        }

        gesture.cursor = range;
        gesture.last_valid = range;
        self.mode = next;
        Ok(())
    }

    fn advance(&mut self, range: (NaiveDateTime, NaiveDateTime), is_valid: bool) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.cursor = range;
            if is_valid {
                gesture.last_valid = range;
            }
        }
    }

    fn finish(&mut self) -> Option<KeyboardGesture> {
        self.mode = KeyboardMode::None;
        self.gesture.take()
    }
}

fn horizontal_step(key: KeyCommand) -> Option<Duration> {
    match key {
        KeyCommand::Left => Some(Duration::days(-1)),
        KeyCommand::Right => Some(Duration::days(1)),
        _ => None,
    }
}
