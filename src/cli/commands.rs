use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "oncoscopic", version, about = "Skin lesion analysis gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Run one image through validation and classification
    Predict(PredictArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address (overrides config)
    #[arg(long)]
    pub host: Option<String>,
}

#[derive(Args, Clone)]
pub struct PredictArgs {
    /// Image file to analyse
    pub image: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also request the structured explanation of the diagnosis
    #[arg(long)]
    pub explain: bool,

    /// Language code for the explanation (en, es, fr, de, it, pt, ru, zh, ja, ko, ar)
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
