pub mod cli;
pub mod field;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod util;
