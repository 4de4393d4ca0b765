//! GUI components

pub mod arguments_form;
pub mod download_item;
pub mod notice_line;
pub mod progress_bar;
pub mod url_input;

// Re-export for convenience
pub use arguments_form::arguments_form;
pub use download_item::download_item;
pub use notice_line::notice_line;
pub use progress_bar::progress_bar;
pub use url_input::url_input;
