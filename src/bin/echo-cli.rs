use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "echo-cli")]
#[command(about = "Client for the merge-echo server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// POST a raw JSON object to /echo
    Send {
        /// JSON object, e.g. '{"value":"hi"}'
        body: String,
    },
    /// POST {"value": TEXT} to /echo
    Value {
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let body: Value = match cli.command {
        Commands::Send { body } => serde_json::from_str(&body)?,
        Commands::Value { text } => json!({ "value": text }),
    };

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/echo", cli.url.trim_end_matches('/')))
        .json(&body)
        .send()
        .await?;

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let request_id = res
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    if !status.is_success() {
        eprintln!("Error: server returned status {} (request {})", status, request_id);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
