// Interaction layer for the egui calendar views
// Gesture state, snapping and keyboard control shared by day, week and month views

pub mod drag;
pub mod handler;
pub mod keyboard;
pub mod resize;
pub mod snap;
pub mod views;

pub use drag::{DragContext, DropRegion, EventDropped, TypeConversion};
pub use handler::{DragHandler, InteractionError, InteractionKind, InteractionSnapshot, ListenerId};
pub use keyboard::{KeyCommand, KeyOutcome, KeyboardContext, KeyboardCoordinator, KeyboardMode};
pub use resize::{EventResized, ResizeContext, ResizeEdge};
pub use snap::{SnapAnchors, SnapKind, SnapResolver, SnapResult};
