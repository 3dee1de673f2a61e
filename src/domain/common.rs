use crate::domain::transaction::TransactionId;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> TransactionId;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
