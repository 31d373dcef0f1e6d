//! Named asset files read into memory.

mod error;
mod reader;

pub use error::AssetError;
pub use reader::{read_asset, read_optional_asset};
