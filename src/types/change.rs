/// The kind of row change a feed event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A notification-only change event.
///
/// Carries no row payload: receivers must re-query the table for actual data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub table: String,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(table: &str, kind: ChangeKind) -> Self {
        Self {
            table: table.to_string(),
            kind,
        }
    }
}
