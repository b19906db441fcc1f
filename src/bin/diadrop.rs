use clap::{Parser, Subcommand};
use diadrop::cli::{self as prog_cli, OutputMode};
use diadrop::config::AppConfig;
use diadrop::store::ProjectStore;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "diadrop", version, about = "DiaDrop chart project manager", long_about = None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, help = "Path to a config file (TOML). If omitted, defaults are used.")]
    config: Option<PathBuf>,
    /// Override the projects directory (takes precedence over config)
    #[arg(long, help = "Directory holding .dia project files. Takes precedence over config/env.")]
    dir: Option<PathBuf>,
    #[arg(long, help = "Log level: off|error|warn|info|debug|trace")]
    log_level: Option<String>,
    #[arg(long, help = "Print machine-readable JSON instead of text")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "List projects, most recently modified first")]
    List,
    #[command(about = "Create a new project, optionally importing data from CSV")]
    New {
        #[arg(help = "Project name (also the file name)")]
        name: String,
        #[arg(long, help = "CSV file: first column labels, second column values")]
        csv: Option<PathBuf>,
        #[arg(long, help = "Color scheme name (see `palettes`)")]
        scheme: Option<String>,
        #[arg(long = "type", help = "Chart type: Bar|Line|Pie|Scatter")]
        chart_type: Option<String>,
        #[arg(long, help = "Chart title")]
        title: Option<String>,
    },
    #[command(about = "Print the decrypted .dia text of a project")]
    Show {
        name: String,
    },
    #[command(about = "Replace a project with edited .dia text from a file")]
    Apply {
        name: String,
        #[arg(help = "File containing .dia text")]
        file: PathBuf,
    },
    #[command(about = "Append a data point; color defaults to the next scheme color")]
    Add {
        name: String,
        label: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        #[arg(long, help = "Explicit #RRGGBB color")]
        color: Option<String>,
    },
    #[command(about = "Remove the data point at INDEX (0-based)")]
    Remove {
        name: String,
        index: usize,
    },
    #[command(about = "Change the color of the data point at INDEX")]
    Recolor {
        name: String,
        index: usize,
        color: String,
    },
    #[command(about = "Switch color scheme and recolor all points")]
    Scheme {
        name: String,
        scheme: String,
    },
    #[command(about = "Change chart type and/or title")]
    Set {
        name: String,
        #[arg(long = "type")]
        chart_type: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    #[command(about = "Remove all data points")]
    Clear {
        name: String,
    },
    #[command(about = "Rename a project (the old file is removed)")]
    Rename {
        name: String,
        new_name: String,
    },
    #[command(about = "Delete a project file")]
    Delete {
        name: String,
    },
    #[command(about = "Copy an encrypted .dia file into the projects directory")]
    Import {
        file: PathBuf,
    },
    #[command(about = "Write an encrypted copy of a project to a path")]
    Export {
        name: String,
        output: PathBuf,
    },
    #[command(about = "List available color schemes")]
    Palettes,
}

impl From<Commands> for prog_cli::Command {
    fn from(c: Commands) -> Self {
        use prog_cli::Command as C;
        match c {
            Commands::List => C::List,
            Commands::New { name, csv, scheme, chart_type, title } => {
                C::New { name, csv, scheme, chart_type, title }
            }
            Commands::Show { name } => C::Show { name },
            Commands::Apply { name, file } => C::Apply { name, file },
            Commands::Add { name, label, value, color } => C::Add { name, label, value, color },
            Commands::Remove { name, index } => C::Remove { name, index },
            Commands::Recolor { name, index, color } => C::Recolor { name, index, color },
            Commands::Scheme { name, scheme } => C::Scheme { name, scheme },
            Commands::Set { name, chart_type, title } => C::Set { name, chart_type, title },
            Commands::Clear { name } => C::Clear { name },
            Commands::Rename { name, new_name } => C::Rename { name, new_name },
            Commands::Delete { name } => C::Delete { name },
            Commands::Import { file } => C::Import { file },
            Commands::Export { name, output } => C::Export { name, output },
            Commands::Palettes => C::Palettes,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let overrides =
        AppConfig { projects_dir: cli.dir.clone(), log_level: cli.log_level.clone(), ..AppConfig::default() };
    let cfg = AppConfig::load(cli.config.as_deref(), overrides);

    if let Err(e) = cfg.init_logging() {
        eprintln!("warning: logging disabled: {e}");
    }

    let store = match ProjectStore::open(cfg.projects_dir(), cfg.store_options()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    if let Err(e) = prog_cli::run_with_format(&store, cli.command.into(), mode) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
