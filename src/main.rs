use std::path::PathBuf;

use clap::{Parser, Subcommand};
use medpredict::models::DiagnosticTarget;

#[derive(Parser)]
#[command(name = "medpredict", version, about = "Disease prediction web app")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web app and JSON API (the default)
    Serve,
    /// Fit one target model from its labelled CSV table
    Train {
        /// diabetes, heart-disease or parkinsons
        target: DiagnosticTarget,
        /// Labelled table with the public dataset's headers
        data: PathBuf,
        /// Directory the `.apr` model and its manifest are written to
        #[arg(short, long, default_value = "saved_models")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    medpredict::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => medpredict::run().await.map_err(|e| e.to_string()),
        Command::Train { target, data, out } => medpredict::train(target, &data, &out)
            .map(|manifest| {
                println!(
                    "{} -> {} ({} rows, training accuracy {:.3})",
                    data.display(),
                    out.join(format!("{}.apr", target.artifact_stem())).display(),
                    manifest.provenance.rows,
                    manifest.provenance.training_accuracy
                );
            })
            .map_err(|e| e.to_string()),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        eprintln!("medpredict: {e}");
        std::process::exit(1);
    }
}
