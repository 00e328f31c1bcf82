use std::path::PathBuf;
use clap::{Parser, Subcommand};
use reqwest::multipart;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "api-cli")]
#[command(about = "Command-line client for the Differetmix API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Root greeting
    Hello,
    /// Application name, environment and debug flag
    Info,
    /// Service and document store health
    Health,
    /// Look up a product by EAN
    Product { ean: String },
    /// Describe a model (alexnet, resnet, lenet)
    Model { name: String },
    /// Ask a unicorn to behave
    Unicorn { name: String },
    /// Page through the item list
    Items {
        #[arg(long)]
        q: Option<String>,
        #[arg(long, default_value_t = 0)]
        skip: usize,
        #[arg(long, default_value_t = 100)]
        limit: usize,
    },
    /// Upload a file
    Upload {
        path: PathBuf,
        #[arg(long, default_value = "image/jpeg")]
        content_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Hello => client.get(format!("{}/", base)).send().await?,
        Commands::Info => client.get(format!("{}/info", base)).send().await?,
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Product { ean } => {
            client.get(format!("{}/products/{}", base, ean)).send().await?
        }
        Commands::Model { name } => client.get(format!("{}/models/{}", base, name)).send().await?,
        Commands::Unicorn { name } => {
            client.get(format!("{}/unicorns/{}", base, name)).send().await?
        }
        Commands::Items { q, skip, limit } => {
            let mut query = vec![("skip", skip.to_string()), ("limit", limit.to_string())];
            if let Some(q) = q {
                query.push(("q", q));
            }
            client
                .get(format!("{}/query_params/items/", base))
                .query(&query)
                .send()
                .await?
        }
        Commands::Upload { path, content_type } => {
            let bytes = tokio::fs::read(&path).await?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let part = multipart::Part::bytes(bytes)
                .file_name(filename)
                .mime_str(&content_type)?;
            client
                .post(format!("{}/uploadfile/", base))
                .multipart(multipart::Form::new().part("file", part))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Some(reason) = res.headers().get("x-error").and_then(|v| v.to_str().ok()) {
            eprintln!("X-Error: {}", reason);
        }
    }

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    if status.is_success() {
        Ok(())
    } else {
        Err(format!("request failed with status {}", status).into())
    }
}
