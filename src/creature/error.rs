//! Error types for creature editing and settings

use super::id::PartId;

/// Refused structural edit. The tree is left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    /// The part's node table is full
    NodeCapacity { part: PartId, capacity: usize },
    /// The matched part already carries the maximum number of appendages
    AppendageCapacity { part: PartId, capacity: usize },
    /// No node within pick radius anywhere in the tree
    NoNodeNearby,
    /// Id refers to a part that no longer exists
    UnknownPart(PartId),
    /// The root can only go away with the whole creature
    RootNotRemovable,
    /// Offsets only exist on appendages
    NotAnAppendage(PartId),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::NodeCapacity { part, capacity } => {
                write!(f, "{} already has {} nodes", part, capacity)
            }
            EditError::AppendageCapacity { part, capacity } => {
                write!(f, "{} already has {} appendages", part, capacity)
            }
            EditError::NoNodeNearby => write!(f, "no node near the pointer"),
            EditError::UnknownPart(id) => write!(f, "unknown part {}", id),
            EditError::RootNotRemovable => write!(f, "the root part cannot be removed"),
            EditError::NotAnAppendage(id) => write!(f, "{} is not an appendage", id),
        }
    }
}

impl std::error::Error for EditError {}

/// Error type for settings loading and saving
#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::ParseError(e)
    }
}

impl From<ron::Error> for SettingsError {
    fn from(e: ron::Error) -> Self {
        SettingsError::SerializeError(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(e) => write!(f, "IO error: {}", e),
            SettingsError::ParseError(e) => write!(f, "Parse error: {}", e),
            SettingsError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            SettingsError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}
