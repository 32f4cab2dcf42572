pub mod file_picker;
pub mod header;
pub mod help_modal;
pub mod status_bar;

pub use file_picker::FilePicker;
pub use header::Header;
pub use help_modal::HelpModal;
pub use status_bar::StatusBar;
