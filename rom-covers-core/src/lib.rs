pub mod platform;
pub mod table;

pub use platform::{Platform, PlatformParseError};
pub use table::{PlatformEntry, PlatformTable};
