pub mod boundaries;
pub mod change;
pub mod codec;
pub mod editing;
pub mod locale;
pub mod sections;
pub mod selection;
