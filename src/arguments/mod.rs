//! Download arguments preference bundle

pub mod model;

pub use model::{ArgumentField, ArgumentUpdate, DownloadArguments, DownloadArgumentsModel};
