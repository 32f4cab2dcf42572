/// Actions that can be performed in the file picker
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Top,
    Bottom,

    // Entries
    Open,
    Parent,

    // Modals
    ShowHelp,
    CloseModal,

    // App control
    Quit,

    // No action
    None,
}
