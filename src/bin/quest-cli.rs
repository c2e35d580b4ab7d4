use clap::{Parser, Subcommand};
use http_quest::quest::Level;
use quest_sdk::QuestClient;
use reqwest::header::{HeaderValue, CONTENT_TYPE, LOCATION};
use reqwest::redirect;

#[derive(Parser)]
#[command(name = "quest-cli")]
#[command(about = "Client for the HTTP quest server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the entrance page
    Home,
    /// Send a single request to one level, without following redirects
    Level {
        /// Level number, 1 to 12
        number: u8,
        #[arg(short, long)]
        password: String,
        /// JSON body for the POST levels
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Walk the whole quest and print what was collected
    Solve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let url = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Home => {
            let res = reqwest::get(format!("{}/", url)).await?;
            println!("{}", res.text().await?);
        }
        Commands::Level {
            number,
            password,
            body,
        } => {
            let level = Level::from_number(number)
                .ok_or_else(|| format!("no level {number}, levels run from 1 to 12"))?;

            let client = reqwest::Client::builder()
                .redirect(redirect::Policy::none())
                .build()?;

            let mut req = client
                .request(level.method(), format!("{}{}", url, level.path()))
                .header("X-Password", password);
            if let Some(body) = body {
                req = req.header(CONTENT_TYPE, "application/json").body(body);
            }

            print_response(level, req.send().await?).await?;
        }
        Commands::Solve => {
            let walkthrough = QuestClient::new(url)?.solve().await?;
            println!("{}", serde_json::to_string_pretty(&walkthrough)?);
        }
    }

    Ok(())
}

async fn print_response(level: Level, res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    println!("Level {}: {}", level, res.status());

    let headers = res.headers();
    for (name, value) in [
        ("Location", headers.get(LOCATION)),
        ("X-Real-Password", headers.get("x-real-password")),
    ] {
        if let Some(value) = value.and_then(|v: &HeaderValue| v.to_str().ok()) {
            println!("{}: {}", name, value);
        }
    }

    let text = res.text().await?;
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
