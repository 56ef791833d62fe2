use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "datefield", about = concat!("datefield v", env!("CARGO_PKG_VERSION"), " - drive a sectioned date input from the terminal"), version, args_override_self = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Locale tag (default: config, then LC_ALL/LC_TIME/LANG)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Field config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write a debug log to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    /// Also log selection changes (with --log)
    #[arg(long, global = true)]
    pub trace: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the sections for the locale
    Sections,
    /// Focus the field and type a key script into it
    Type(TypeArgs),
    /// Paste text into the field
    Paste(PasteArgs),
    /// Press an adjustment key on one section
    Adjust(AdjustArgs),
    /// Check an ISO date against the config's validation rules
    Check(CheckArgs),
}

// ---------------------------------------------------------------------------
// Command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TypeArgs {
    /// Characters to type. `<name>` presses a named key (left, right, up,
    /// down, home, end, pageup, pagedown, delete, backspace, ctrl-a) and
    /// `~` waits until the pending keystroke query expires.
    pub keys: String,
    /// Initial ISO date
    #[arg(long)]
    pub value: Option<String>,
    /// Section to start in (year, month, day)
    #[arg(long)]
    pub start: Option<String>,
}

#[derive(Args)]
pub struct PasteArgs {
    /// Clipboard text
    pub text: String,
    /// Initial ISO date
    #[arg(long)]
    pub value: Option<String>,
    /// Paste with only this section selected (default: whole field)
    #[arg(long)]
    pub section: Option<String>,
}

#[derive(Args)]
pub struct AdjustArgs {
    /// up, down, pageup, pagedown, home, end
    pub key: String,
    /// Section to adjust (year, month, day)
    #[arg(long)]
    pub section: String,
    /// Initial ISO date
    #[arg(long)]
    pub value: Option<String>,
    /// Press the key this many times
    #[arg(long, default_value_t = 1)]
    pub repeat: usize,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Date in YYYY-MM-DD form
    pub iso: String,
}
