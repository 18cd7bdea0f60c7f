//! Helper functions shared by the content layer and commands

mod date;
mod url;

pub use date::*;
pub use url::*;
