use clap::Parser;
use keyscout::Provider;
use keyscout::core::config;
use keyscout::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "keyscout", about = "Free keyword research report for your business")]
struct Args {
    /// Chat-completion provider to use
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Model name passed to the provider
    #[arg(short, long)]
    model: Option<String>,

    /// Lead-capture form id
    #[arg(long)]
    form_id: Option<String>,

    /// Where to write the debug log
    #[arg(long, default_value = "keyscout.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config()?;
    let resolved = config::resolve(
        &file_config,
        &config::CliOverrides {
            provider: args.provider,
            model: args.model,
            form_id: args.form_id,
        },
    )?;

    log::info!(
        "Keyscout starting up with provider: {:?}, model: {}",
        resolved.provider,
        resolved.model_name
    );

    tui::run(resolved)?;
    Ok(())
}
