use std::path::Path;
use clap::Parser;
use oncoscopic::{cli, config, errors};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let result = match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args).await,
        cli::Commands::Predict(args) => cli::predict::handle_predict(args).await,
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                errors::OncoscopicError::Config(_) => 2,
                errors::OncoscopicError::Client(_) => 3,
                errors::OncoscopicError::Prediction(_) => 4,
                errors::OncoscopicError::InvalidInput(_) => 5,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), errors::OncoscopicError> {
    let settings = config::load_settings(Some(Path::new(&args.config))).await?;
    println!("Configuration is valid: {}", args.config);
    println!("  listen:     {}", settings.listen_addr());
    println!("  classifier: {}", settings.classifier.url);
    println!("  llm:        {} ({} / {})", settings.llm.provider, settings.llm.vision_model, settings.llm.chat_model);
    println!("  api key:    {}", config::credentials::mask_secret(&settings.llm.api_key));
    Ok(())
}
