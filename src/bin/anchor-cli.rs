use clap::{Parser, Subcommand};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anchor-cli")]
#[command(about = "Management CLI for the dataset integrity anchor service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health and blockchain reachability
    Status,
    /// Upload a CSV dataset
    Upload {
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Show the digest of the active dataset
    Digest,
    /// Anchor the active digest on the blockchain
    Anchor,
    /// Verify the active dataset against the anchored digest
    Verify,
    /// Demonstrate that a one-cell change breaks verification
    TamperDemo,
    /// Descriptive statistics for a verified dataset
    Eda,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client
                .get(format!("{}/api/health", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Upload { file } => {
            let body = tokio::fs::read(&file).await?;
            let res = client
                .post(format!("{}/api/dataset", cli.url))
                .header(CONTENT_TYPE, HeaderValue::from_static("text/csv"))
                .body(body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Digest => {
            let res = client
                .get(format!("{}/api/digest", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Anchor => {
            let res = client
                .post(format!("{}/api/anchor", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Verify => {
            let res = client
                .get(format!("{}/api/verify", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::TamperDemo => {
            let res = client
                .post(format!("{}/api/tamper-demo", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Eda => {
            let res = client.get(format!("{}/api/eda", cli.url)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
