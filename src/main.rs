use clap::Parser;
use ztr_dashboard::cli::{
    handle_completions, handle_config_init, logs, restart, status, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => ztr_dashboard::cli::serve::run_serve(args).await,
        Commands::Status(args) => print_output(status::handle_status(&args).await),
        Commands::Logs(args) => print_output(logs::handle_logs(&args).await),
        Commands::Restart(args) => print_output(restart::handle_restart(&args).await),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_output(output: anyhow::Result<String>) -> anyhow::Result<()> {
    let output = output?;
    println!("{}", output);
    Ok(())
}
