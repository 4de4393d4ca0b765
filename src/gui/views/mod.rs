//! GUI views

pub mod main_view;
pub mod onboarding_view;

// Re-export for convenience
pub use main_view::main_view;
pub use onboarding_view::onboarding_view;
