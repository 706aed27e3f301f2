pub mod config;
pub mod core;

pub use crate::config::{KanaConfig, UnknownPolicy, VowelStyle};
pub use crate::core::classifier::CharClass;
pub use crate::core::converter::{convert, KanaConv};
pub use crate::core::error::ConvertError;
pub use crate::core::table::{LookupTable, TableError};
