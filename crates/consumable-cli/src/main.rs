use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use log::LevelFilter;

mod commands;

#[derive(Parser)]
#[command(name = "consumable-cli", version, about = "Consumable expiration tracker CLI")]
struct Cli {
    /// Show debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consumable management
    Item {
        #[command(subcommand)]
        action: commands::item::ItemAction,
    },
    /// Derived expiration status
    Status {
        #[command(flatten)]
        args: commands::status::StatusArgs,
    },
    /// Entity alias management
    Entity {
        #[command(subcommand)]
        action: commands::entity::EntityAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Item { action } => commands::item::run(action),
        Commands::Status { args } => commands::status::run(args),
        Commands::Entity { action } => commands::entity::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
