mod session;
pub use session::{cmd_adjust, cmd_paste, cmd_type};

use std::path::PathBuf;

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::field::{CaretRange, DateField, ManualClock};
use crate::io::config_io;
use crate::model::config::FieldConfig;
use crate::model::section::{SectionType, SelectedSections};
use crate::ops::codec;

/// Options shared by every subcommand
pub struct Globals {
    pub json: bool,
    pub locale: Option<String>,
    pub config: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let globals = Globals {
        json: cli.json,
        locale: cli.locale,
        config: cli.config,
    };

    match cli.command {
        Commands::Sections => cmd_sections(&globals),
        Commands::Type(args) => cmd_type(args, &globals),
        Commands::Paste(args) => cmd_paste(args, &globals),
        Commands::Adjust(args) => cmd_adjust(args, &globals),
        Commands::Check(args) => cmd_check(args, &globals),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_config(globals: &Globals) -> Result<FieldConfig, Box<dyn std::error::Error>> {
    let mut config = match &globals.config {
        Some(path) => config_io::read_config(path)?,
        None => FieldConfig::default(),
    };
    if let Some(locale) = &globals.locale {
        config.locale = Some(locale.clone());
    }
    Ok(config)
}

/// A field driven by a hand-moved clock, so `~` in a key script can skip
/// past the query timeout without sleeping.
fn build_field(globals: &Globals) -> Result<(DateField, ManualClock), Box<dyn std::error::Error>> {
    let config = load_config(globals)?;
    let clock = ManualClock::new(Local::now().date_naive());
    let field = DateField::with_clock(config, Box::new(clock.clone()));
    Ok((field, clock))
}

/// Apply `--value`, without reporting it as a change.
fn set_initial_value(field: &mut DateField, value: Option<&str>) -> Result<(), String> {
    if let Some(iso) = value {
        if !codec::is_valid_iso_date(iso) {
            return Err(format!("invalid --value '{}': expected YYYY-MM-DD", iso));
        }
        field.set_iso_date(Some(iso));
        field.take_date_changes();
    }
    Ok(())
}

/// Focus the field the way a user tabbing into it would. With a caret
/// range spanning the whole text, every section is selected.
fn focus(field: &mut DateField, caret: CaretRange) {
    let token = field.handle_focus();
    field.complete_focus(token, caret);
}

fn parse_section_type(name: &str) -> Result<SectionType, String> {
    SectionType::from_name(name).ok_or_else(|| {
        format!("unknown section '{}': expected year, month or day", name)
    })
}

fn select_section(field: &mut DateField, name: &str) -> Result<(), String> {
    let section_type = parse_section_type(name)?;
    if field
        .sections()
        .iter()
        .all(|s| s.section_type != section_type)
    {
        return Err(format!("no {} section in this field", section_type));
    }
    field.set_selected_sections(Some(SelectedSections::Type(section_type)));
    Ok(())
}

fn print_run(run: &RunJson, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(run)?);
    } else {
        for step in &run.steps {
            println!("{}", format_step_line(step));
        }
        for change in &run.changes {
            println!("{}", format_change_line(change));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_sections(globals: &Globals) -> Result<(), Box<dyn std::error::Error>> {
    let (field, _) = build_field(globals)?;
    let result = SectionsJson {
        locale: field.locale().clone(),
        rendered: field.rendered_string(),
        sections: field.sections().iter().map(section_to_json).collect(),
    };

    if globals.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "locale {} (text {})",
            result.locale.format_locale,
            result.locale.text_locale.code()
        );
        println!("{}", result.rendered);
        for section in &result.sections {
            println!("{}", format_section_line(section));
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs, globals: &Globals) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(globals)?;
    let today = Local::now().date_naive();

    let error = match codec::parse_iso_date(&args.iso) {
        None => Some("not a valid YYYY-MM-DD date".to_string()),
        Some(date) => {
            codec::validate_date(date, &config.validation, today).map(|e| e.to_string())
        }
    };
    let result = CheckJson {
        iso: args.iso.clone(),
        valid: error.is_none(),
        error,
    };

    if globals.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.valid {
        println!("ok {}", result.iso);
    }

    match result.error {
        Some(e) => Err(format!("{}: {}", args.iso, e).into()),
        None => Ok(()),
    }
}
