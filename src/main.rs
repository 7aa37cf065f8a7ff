//! OpsTeam CLI - team lifecycle management for operations platforms

use clap::{CommandFactory, Parser};
use log::LevelFilter;

use opsteam::cli::args::GlobalOptions;
use opsteam::cli::{self, Cli, Commands, ServiceCommands, TeamCommands};
use opsteam::error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init(args) => cli::init::run(&opts, args),
        Commands::Status => cli::status::run(&opts),
        Commands::Team(team_cmd) => match team_cmd {
            TeamCommands::Create(args) => cli::team::create(&opts, args).await,
            TeamCommands::Get { team_id } => cli::team::get(&opts, &team_id).await,
            TeamCommands::Update(args) => cli::team::update(&opts, args).await,
            TeamCommands::Delete { team_id, yes } => cli::team::delete(&opts, &team_id, yes).await,
            TeamCommands::Import { import_id } => cli::team::import(&opts, &import_id).await,
        },
        Commands::Service(service_cmd) => match service_cmd {
            ServiceCommands::Create(args) => cli::service::create(&opts, args).await,
            ServiceCommands::Get { service_id } => cli::service::get(&opts, &service_id).await,
            ServiceCommands::Update { service_id, args } => {
                cli::service::update(&opts, &service_id, args).await
            }
            ServiceCommands::Delete { service_id, yes } => {
                cli::service::delete(&opts, &service_id, yes).await
            }
        },
        Commands::Completion { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "opsteam", &mut std::io::stdout());
            Ok(())
        }
    }
}
