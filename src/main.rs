use anyhow::Context;
use clap::Parser;
use fare_card::utils::{logger, validation::Validate};
use fare_card::{CardConfig, CliConfig, CommandOutput, Session, SystemClock};
use std::io::BufRead;

fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 載入配置，未指定檔案時使用預設值
    let config = match &args.config {
        Some(path) => match CardConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => CardConfig::default(),
    };

    if config.json_logs() {
        logger::init_json_logger(args.verbose, config.log_level());
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }

    tracing::info!("🚀 Starting fare-card");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut session = Session::new(config.build_card(SystemClock));

    let result = if args.commands.is_empty() {
        let lines = std::io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .context("failed to read commands from stdin")?;
        session.run_script(lines.iter().map(String::as_str))
    } else {
        session.run_script(args.commands.iter().map(String::as_str))
    };

    match result {
        Ok(outputs) => print_outputs(&outputs, args.json)?,
        Err(e) => {
            tracing::error!("❌ Command failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    }

    Ok(())
}

fn print_outputs(outputs: &[CommandOutput], json: bool) -> anyhow::Result<()> {
    for output in outputs {
        if json {
            println!("{}", serde_json::to_string(output)?);
        } else {
            println!("{}", output);
        }
    }
    Ok(())
}
