/// What a keypress on a trigger should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    FocusPrev,
    FocusNext,
    FocusFirst,
    FocusLast,
    Toggle,
}

impl NavAction {
    /// Maps a `KeyboardEvent::key()` value to its action. Unmapped keys
    /// return `None` and must keep their default browser behavior.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::FocusPrev),
            "ArrowDown" => Some(Self::FocusNext),
            "Home" => Some(Self::FocusFirst),
            "End" => Some(Self::FocusLast),
            "Enter" | " " => Some(Self::Toggle),
            _ => None,
        }
    }

    /// True for the pure focus-movement keys. The container-level fallback
    /// handler only acts on these; toggling stays with the per-trigger
    /// handler so a single keypress is never handled twice.
    pub fn moves_focus(self) -> bool {
        !matches!(self, Self::Toggle)
    }
}
