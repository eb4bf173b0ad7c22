use clap::Parser;
use crop_health::utils::error::{DiagnosisError, ErrorSeverity};
use crop_health::utils::logger;
use crop_health::{
    CaptureFlow, CliConfig, Command, DiagnoseLeafUseCase, FilePicker, HttpDiagnosisClient,
    ImageSource, ResultView,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.load_app_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    tracing::info!("Using diagnosis backend at {}", config.base_url);

    let client = match HttpDiagnosisClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => exit_with(&e),
    };

    match cli.command {
        Command::Health => match client.health().await {
            Ok(message) => println!("✅ {}", message),
            Err(e) => exit_with(&e),
        },
        Command::Diagnose { image, json } => {
            let use_case = Arc::new(DiagnoseLeafUseCase::new(client));
            let flow = CaptureFlow::new(Arc::new(FilePicker::new(image)), use_case);

            let outcome = match flow.select(ImageSource::Gallery).await {
                Ok(_) => flow.diagnose().await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(result) if json => println!("{}", serde_json::to_string_pretty(&result)?),
                Ok(result) => print!("{}", ResultView::from(&result)),
                Err(e) => exit_with(&e),
            }
        }
    }

    Ok(())
}

fn exit_with(e: &DiagnosisError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
