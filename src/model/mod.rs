pub mod section;
pub mod locale;
pub mod config;

pub use section::*;
pub use locale::*;
pub use config::*;
