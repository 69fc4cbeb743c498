//! dirpick - Interactive directory picker and creator
//!
//! This is the command-line entry point. It owns every collaborator for the
//! lifetime of the process and lends them to the orchestrator. Results go to
//! stdout one per line; everything meant for the person goes to stderr.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use dirpick::commands::{CreateRequest, PickRequest, SelectionOrchestrator};
use dirpick::config::Config;
use dirpick::constants::{DEFAULT_CANCEL_LABEL, EXIT_NO_RESULT, EXIT_SUCCESS};
use dirpick::infrastructure::RealFileSystem;
use dirpick::logging;
use dirpick::menu::{
    CapabilityState, EnvAutomation, MenuPresenter, MenuSpec, PlainMenu, UiPreference,
};
use dirpick::ui::{DialoguerConsole, TerminalGrid};

/// Command-line arguments for dirpick
#[derive(Parser)]
#[command(name = "dirpick", version)]
#[command(about = "Interactive directory picker and creator", long_about = None)]
struct Cli {
    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Configuration file (defaults to ./.dirpick.toml)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Presentation style
    #[arg(long, value_enum, global = true)]
    ui: Option<UiPreference>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pick existing directories and print their paths
    Pick(PickArgs),
    /// Create a new directory and print its path
    Create(CreateArgs),
    /// Show a generic menu and print the answer
    Menu(MenuArgs),
}

#[derive(Args)]
struct PickArgs {
    /// Directory whose subdirectories are offered
    base: PathBuf,

    /// Exclude directories whose name matches a wildcard pattern
    #[arg(long, value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Exclude directories without any entries
    #[arg(long)]
    exclude_empty: bool,

    /// Allow selecting several directories
    #[arg(long)]
    multiple: bool,

    /// Offer to try again when nothing was selected
    #[arg(long)]
    retry_on_cancel: bool,

    /// Attempts before giving up
    #[arg(long, value_name = "N")]
    max_attempts: Option<u32>,

    /// Menu title
    #[arg(long)]
    title: Option<String>,

    /// Do not use the grid picker
    #[arg(long)]
    no_grid: bool,
}

#[derive(Args)]
struct CreateArgs {
    /// Directory to create the new directory in
    parent: PathBuf,

    /// Name of the new directory; prompted for when omitted
    #[arg(long)]
    name: Option<String>,

    /// Validate and report without creating anything
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Single,
    Multiple,
    YesNo,
}

#[derive(Args)]
struct MenuArgs {
    /// Menu title
    #[arg(long)]
    title: String,

    #[arg(long, value_enum, default_value_t = ModeArg::Single)]
    mode: ModeArg,

    /// Option to offer; repeat for each option
    #[arg(long = "option", value_name = "OPTION")]
    options: Vec<String>,

    /// Zero-based index of the preselected option (single mode)
    #[arg(long, value_name = "N")]
    default: Option<usize>,

    #[arg(long, default_value = DEFAULT_CANCEL_LABEL)]
    cancel_label: String,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())?.apply_env();
    let ui = cli.ui.unwrap_or(config.ui.preference);
    log::debug!("Using {ui} presentation");

    let fs = RealFileSystem::new();
    let console = DialoguerConsole;
    let grid = TerminalGrid;
    let capability = CapabilityState::new();
    let automation = EnvAutomation;
    let presenter = MenuPresenter::new(&console, &capability, PlainMenu::stdio());
    let orchestrator = SelectionOrchestrator::new(&fs, presenter, &automation).with_grid(&grid);

    let produced = match cli.command {
        Command::Pick(args) => run_pick(&orchestrator, args, &config, ui)?,
        Command::Create(args) => run_create(&orchestrator, args, ui),
        Command::Menu(args) => run_menu(&orchestrator, args, ui)?,
    };

    Ok(ExitCode::from(if produced {
        EXIT_SUCCESS
    } else {
        EXIT_NO_RESULT
    }))
}

fn run_pick(
    orchestrator: &SelectionOrchestrator<'_>,
    args: PickArgs,
    config: &Config,
    ui: UiPreference,
) -> Result<bool> {
    let mut exclude = config.pick.exclude.clone();
    exclude.extend(args.exclude);

    let request = PickRequest {
        base: args.base,
        exclude,
        exclude_empty: args.exclude_empty || config.pick.exclude_empty,
        multiple: args.multiple,
        retry_on_cancel: args.retry_on_cancel || config.pick.retry_on_cancel,
        max_attempts: args.max_attempts.unwrap_or(config.pick.max_attempts),
        title: args.title,
        ui,
        skip_grid: args.no_grid || config.ui.skip_grid,
    };

    let picked = orchestrator.pick_directories(&request)?;
    for dir in &picked {
        println!("{}", dir.path.display());
    }
    Ok(!picked.is_empty())
}

fn run_create(
    orchestrator: &SelectionOrchestrator<'_>,
    args: CreateArgs,
    ui: UiPreference,
) -> bool {
    let request = CreateRequest {
        parent: args.parent,
        name: args.name,
        dry_run: args.dry_run,
        ui,
    };

    match orchestrator.create_directory(&request).target() {
        Some(path) => {
            println!("{}", path.display());
            true
        }
        None => false,
    }
}

fn run_menu(
    orchestrator: &SelectionOrchestrator<'_>,
    args: MenuArgs,
    ui: UiPreference,
) -> Result<bool> {
    let mut spec = match args.mode {
        ModeArg::Single => MenuSpec::single(args.title, args.options),
        ModeArg::Multiple => MenuSpec::multiple(args.title, args.options),
        ModeArg::YesNo => MenuSpec {
            options: args.options,
            ..MenuSpec::yes_no(args.title)
        },
    }
    .with_cancel_label(args.cancel_label);
    spec.default_selection = args.default;

    let result = orchestrator.resolve_menu(&spec, ui)?;
    if let Some(answer) = result.as_bool() {
        println!("{answer}");
        return Ok(true);
    }

    let selected = result.selected();
    for option in &selected {
        println!("{option}");
    }
    Ok(!selected.is_empty())
}
