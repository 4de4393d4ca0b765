//! First-run onboarding wizard

pub mod flow;

pub use flow::{InstallOutcome, NextAction, Onboarding, Slide};
