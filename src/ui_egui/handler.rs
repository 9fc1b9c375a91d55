//! Drag/resize interaction state machine.
//!
//! One [`DragHandler`] is owned by each calendar view. It holds the transient
//! state of a single gesture: `Idle -> Dragging -> Idle` or
//! `Idle -> Resizing -> Idle`. Starting a gesture while another is active, or
//! pushing an update for the wrong mode, is a caller bug and is reported as an
//! [`InteractionError`] at the call site. Completing and cancelling are both
//! terminal and always leave the handler idle.
//!
//! Listeners are called synchronously after every state change and receive the
//! handler itself, already updated, so they can read whatever they need.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::drag::{DragContext, DropRegion, EventDropped};
use super::resize::{EventResized, ResizeContext, ResizeEdge};
use super::views::types::HighlightCellInfo;
use crate::models::event::CalendarEvent;

/// Observable mode of the handler
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InteractionKind {
    #[default]
    Idle,
    Dragging,
    Resizing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("cannot start {requested:?} while already {active:?}")]
    AlreadyActive {
        active: InteractionKind,
        requested: InteractionKind,
    },
    #[error("drag operation called while {mode:?}")]
    NotDragging { mode: InteractionKind },
    #[error("resize operation called while {mode:?}")]
    NotResizing { mode: InteractionKind },
}

#[derive(Clone, Debug, Default, PartialEq)]
enum InteractionMode {
    #[default]
    Idle,
    Dragging(DragContext),
    Resizing(ResizeContext),
}

impl InteractionMode {
    fn kind(&self) -> InteractionKind {
        match self {
            InteractionMode::Idle => InteractionKind::Idle,
            InteractionMode::Dragging(_) => InteractionKind::Dragging,
            InteractionMode::Resizing(_) => InteractionKind::Resizing,
        }
    }
}

/// Proposal fields shared by both gesture kinds
#[derive(Clone, Debug, Default, PartialEq)]
struct Proposal {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    is_valid: bool,
    cells: Vec<HighlightCellInfo>,
    updated: bool,
}

/// Owned copy of the observable handler state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionSnapshot {
    pub kind: InteractionKind,
    pub active_event_id: Option<String>,
    pub resize_edge: Option<ResizeEdge>,
    pub proposed_start: Option<NaiveDateTime>,
    pub proposed_end: Option<NaiveDateTime>,
    pub is_proposed_valid: bool,
    pub highlighted_cells: Vec<HighlightCellInfo>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&DragHandler)>;

#[derive(Default)]
pub struct DragHandler {
    mode: InteractionMode,
    proposal: Proposal,
    listeners: Vec<(ListenerId, Listener)>,
    /// Listeners taken out of `listeners` while they are being called
    dispatching: usize,
    next_listener_id: u64,
}

impl std::fmt::Debug for DragHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragHandler")
            .field("mode", &self.mode)
            .field("proposal", &self.proposal)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl DragHandler {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- observers ----

    pub fn add_listener(&mut self, listener: impl FnMut(&DragHandler) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Registered listeners, including those currently being notified
    pub fn listener_count(&self) -> usize {
        self.listeners.len() + self.dispatching
    }

    fn notify(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        self.dispatching = listeners.len();
        for (_, listener) in listeners.iter_mut() {
            listener(&*self);
        }
        self.dispatching = 0;
        self.listeners = listeners;
    }

    // ---- drag ----

    /// Begin moving `event`; `reference_date` is the day the gesture grabbed.
    pub fn start_drag(
        &mut self,
        event: &CalendarEvent,
        reference_date: NaiveDate,
    ) -> Result<(), InteractionError> {
        self.ensure_idle(InteractionKind::Dragging)?;

        log::debug!("Start drag of event {} from {}", event.id, reference_date);
        self.mode = InteractionMode::Dragging(DragContext::from_event(event, reference_date));
        self.proposal = Proposal::default();
        self.notify();
        Ok(())
    }

    /// Set the kind of area the dragged event hovers. A pushed proposal is
    /// re-ranged for the new region but marked invalid with no cells, since
    /// the driver validated a different range; the next `update_drag` restores it.
    pub fn set_drop_region(&mut self, region: DropRegion) -> Result<(), InteractionError> {
        let mode = self.mode.kind();
        let InteractionMode::Dragging(context) = &mut self.mode else {
            return Err(Self::violation(InteractionError::NotDragging { mode }));
        };
        if context.target_region == region {
            return Ok(());
        }

        context.target_region = region;
        if let Some(hovered) = context.hovered_start {
            let (start, end) = context.proposed_range(hovered);
            self.proposal.start = Some(start);
            self.proposal.end = Some(end);
            self.proposal.is_valid = false;
            self.proposal.cells.clear();
        }
        self.notify();
        Ok(())
    }

    /// Push a new proposed start for the dragged event. The end follows from
    /// the event's duration, or from the all-day conversion rules.
    pub fn update_drag(
        &mut self,
        proposed_start: NaiveDateTime,
        is_valid: bool,
        cells: Vec<HighlightCellInfo>,
    ) -> Result<(), InteractionError> {
        let mode = self.mode.kind();
        let InteractionMode::Dragging(context) = &mut self.mode else {
            return Err(Self::violation(InteractionError::NotDragging { mode }));
        };

        context.hovered_start = Some(proposed_start);
        let (start, end) = context.proposed_range(proposed_start);
        self.proposal = Proposal {
            start: Some(start),
            end: Some(end),
            is_valid,
            cells,
            updated: true,
        };
        self.notify();
        Ok(())
    }

    pub fn complete_drag(&mut self) -> Result<Option<EventDropped>, InteractionError> {
        self.complete_drag_with(|_| true)
    }

    /// Finish the drag. Returns the drop only when the last proposal was
    /// valid, well-formed (`start <= end`) and `accept` (the host's veto)
    /// agrees. The handler is idle afterwards whatever the outcome.
    pub fn complete_drag_with(
        &mut self,
        accept: impl FnOnce(&EventDropped) -> bool,
    ) -> Result<Option<EventDropped>, InteractionError> {
        let context = match std::mem::take(&mut self.mode) {
            InteractionMode::Dragging(context) => context,
            other => {
                let mode = other.kind();
                self.mode = other;
                return Err(Self::violation(InteractionError::NotDragging { mode }));
            }
        };
        let proposal = std::mem::take(&mut self.proposal);

        let dropped = Self::committed_range(&proposal).map(|(new_start, new_end)| EventDropped {
            old_start: context.original_start,
            old_end: context.original_end,
            new_start,
            new_end,
            type_conversion: context.type_conversion(),
            event: context.event.clone(),
        });
        let result = match dropped {
            Some(dropped) if accept(&dropped) => {
                log::debug!(
                    "Drop committed for event {}: {} -> {}",
                    dropped.event.id,
                    dropped.new_start,
                    dropped.new_end
                );
                Some(dropped)
            }
            Some(dropped) => {
                log::warn!("Drop of event {} vetoed by host", dropped.event.id);
                None
            }
            None => {
                log::debug!("Drag of event {} ended without a valid proposal", context.event.id);
                None
            }
        };

        self.notify();
        Ok(result)
    }

    /// Abandon the current gesture. Always leaves the handler idle.
    pub fn cancel_drag(&mut self) {
        if self.is_resizing() {
            log::warn!("cancel_drag called during a resize; clearing resize state");
        }
        self.reset("drag");
    }

    // ---- resize ----

    /// Begin resizing `event` by `edge`; the event's current range is the
    /// reference for the whole gesture.
    pub fn start_resize(
        &mut self,
        event: &CalendarEvent,
        edge: ResizeEdge,
    ) -> Result<(), InteractionError> {
        self.ensure_idle(InteractionKind::Resizing)?;

        log::debug!("Start resize of event {} by {:?} edge", event.id, edge);
        self.mode = InteractionMode::Resizing(ResizeContext::from_event(event, edge));
        self.proposal = Proposal::default();
        self.notify();
        Ok(())
    }

    pub fn update_resize(
        &mut self,
        proposed_start: NaiveDateTime,
        proposed_end: NaiveDateTime,
        is_valid: bool,
        cells: Vec<HighlightCellInfo>,
    ) -> Result<(), InteractionError> {
        if !self.is_resizing() {
            let mode = self.mode.kind();
            return Err(Self::violation(InteractionError::NotResizing { mode }));
        }

        self.proposal = Proposal {
            start: Some(proposed_start),
            end: Some(proposed_end),
            is_valid,
            cells,
            updated: true,
        };
        self.notify();
        Ok(())
    }

    pub fn complete_resize(&mut self) -> Result<Option<EventResized>, InteractionError> {
        self.complete_resize_with(|_| true)
    }

    pub fn complete_resize_with(
        &mut self,
        accept: impl FnOnce(&EventResized) -> bool,
    ) -> Result<Option<EventResized>, InteractionError> {
        let context = match std::mem::take(&mut self.mode) {
            InteractionMode::Resizing(context) => context,
            other => {
                let mode = other.kind();
                self.mode = other;
                return Err(Self::violation(InteractionError::NotResizing { mode }));
            }
        };
        let proposal = std::mem::take(&mut self.proposal);

        let resized = Self::committed_range(&proposal).map(|(new_start, new_end)| EventResized {
            event: context.event.clone(),
            resize_edge: context.edge,
            new_start,
            new_end,
        });
        let result = match resized {
            Some(resized) if accept(&resized) => {
                log::debug!(
                    "Resize committed for event {}: {} -> {}",
                    resized.event.id,
                    resized.new_start,
                    resized.new_end
                );
                Some(resized)
            }
            Some(resized) => {
                log::warn!("Resize of event {} vetoed by host", resized.event.id);
                None
            }
            None => {
                log::debug!("Resize of event {} ended without a valid proposal", context.event.id);
                None
            }
        };

        self.notify();
        Ok(result)
    }

    pub fn cancel_resize(&mut self) {
        if self.is_dragging() {
            log::warn!("cancel_resize called during a drag; clearing drag state");
        }
        self.reset("resize");
    }

    // ---- accessors ----

    pub fn mode(&self) -> InteractionKind {
        self.mode.kind()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, InteractionMode::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, InteractionMode::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.mode, InteractionMode::Resizing(_))
    }

    pub fn active_event(&self) -> Option<&CalendarEvent> {
        match &self.mode {
            InteractionMode::Idle => None,
            InteractionMode::Dragging(context) => Some(&context.event),
            InteractionMode::Resizing(context) => Some(&context.event),
        }
    }

    pub fn resize_edge(&self) -> Option<ResizeEdge> {
        match &self.mode {
            InteractionMode::Resizing(context) => Some(context.edge),
            _ => None,
        }
    }

    pub fn original_start(&self) -> Option<NaiveDateTime> {
        match &self.mode {
            InteractionMode::Idle => None,
            InteractionMode::Dragging(context) => Some(context.original_start),
            InteractionMode::Resizing(context) => Some(context.original_start),
        }
    }

    pub fn original_end(&self) -> Option<NaiveDateTime> {
        match &self.mode {
            InteractionMode::Idle => None,
            InteractionMode::Dragging(context) => Some(context.original_end),
            InteractionMode::Resizing(context) => Some(context.original_end),
        }
    }

    pub fn reference_date(&self) -> Option<NaiveDate> {
        match &self.mode {
            InteractionMode::Dragging(context) => Some(context.reference_date),
            _ => None,
        }
    }

    pub fn drop_region(&self) -> Option<DropRegion> {
        match &self.mode {
            InteractionMode::Dragging(context) => Some(context.target_region),
            _ => None,
        }
    }

    pub fn drag_context(&self) -> Option<&DragContext> {
        match &self.mode {
            InteractionMode::Dragging(context) => Some(context),
            _ => None,
        }
    }

    pub fn resize_context(&self) -> Option<&ResizeContext> {
        match &self.mode {
            InteractionMode::Resizing(context) => Some(context),
            _ => None,
        }
    }

    pub fn proposed_start(&self) -> Option<NaiveDateTime> {
        self.proposal.start
    }

    pub fn proposed_end(&self) -> Option<NaiveDateTime> {
        self.proposal.end
    }

    pub fn is_proposed_valid(&self) -> bool {
        self.proposal.is_valid
    }

    /// Whether an update arrived since the gesture started
    pub fn has_update(&self) -> bool {
        self.proposal.updated
    }

    /// Cells targeted by the latest proposal (read-only)
    pub fn highlighted_cells(&self) -> &[HighlightCellInfo] {
        &self.proposal.cells
    }

    pub fn snapshot(&self) -> InteractionSnapshot {
        InteractionSnapshot {
            kind: self.mode(),
            active_event_id: self.active_event().map(|event| event.id.clone()),
            resize_edge: self.resize_edge(),
            proposed_start: self.proposal.start,
            proposed_end: self.proposal.end,
            is_proposed_valid: self.proposal.is_valid,
            highlighted_cells: self.proposal.cells.clone(),
        }
    }

    // ---- internals ----

    fn ensure_idle(&self, requested: InteractionKind) -> Result<(), InteractionError> {
        match self.mode.kind() {
            InteractionKind::Idle => Ok(()),
            active => Err(Self::violation(InteractionError::AlreadyActive {
                active,
                requested,
            })),
        }
    }

    fn violation(error: InteractionError) -> InteractionError {
        log::error!("Interaction invariant violated: {}", error);
        error
    }

    /// Range to commit: the driver marked it valid after at least one update,
    /// and it is not inverted.
    fn committed_range(proposal: &Proposal) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if !proposal.updated || !proposal.is_valid {
            return None;
        }
        match (proposal.start, proposal.end) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }

    fn reset(&mut self, gesture: &str) {
        if let Some(event) = self.active_event() {
            log::debug!("Cancel {} of event {}", gesture, event.id);
        }
        self.mode = InteractionMode::Idle;
        self.proposal = Proposal::default();
        self.notify();
    }
}
