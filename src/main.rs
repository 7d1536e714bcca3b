use clap::Parser;
use shiftrank::app::{handle_fatal_error, init_logging, AppConfig};
use shiftrank::cli::{execute_command, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let config = match load_config(&cli).await {
        Ok(config) => config,
        Err(e) => {
            // Logging is not up yet; fall back to verbosity-only settings
            init_logging(&AppConfig::new(verbose));
            handle_fatal_error(e, verbose)
        }
    };

    init_logging(&config);

    match execute_command(cli.command, &config).await {
        Ok(output) => println!("{output}"),
        Err(e) => handle_fatal_error(e, verbose),
    }
}

async fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load(cli.verbose, cli.config.as_deref())
        .await?
        .with_base_url(cli.base_url.clone())
        .with_top_n(cli.top)
        .with_strategy(cli.strategy)
        .with_leading_shift_kept(cli.no_skip_leading_shift);
    config.validate()?;
    Ok(config)
}
