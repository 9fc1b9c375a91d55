// Service module exports
// Collaborators around the interaction core: event lookup and settings persistence

pub mod event;
pub mod settings;
