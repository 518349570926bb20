use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderName, CACHE_CONTROL, LOCATION};
use serde_json::json;

use docs_gateway::config::validation::validate_config;
use docs_gateway::config::GatewayConfig;
use docs_gateway::routing::builtin::navigation;
use docs_gateway::RedirectPolicy;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Inspect and test the docs gateway redirect policy", long_about = None)]
struct Cli {
    /// Config file to read the policy from (defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the decision for a request path
    Resolve { path: String },
    /// List the rule table and allow-list in effect
    Rules,
    /// Show the previous and next sidebar pages for a docs path
    Nav { path: String },
    /// Validate the config file and report every problem
    Validate,
    /// Request a path from a running gateway without following redirects
    Probe {
        path: String,
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { path } => {
            let policy = load_policy(&cli.config)?;
            let out = json!({
                "request_path": &path,
                "decision": policy.decide(&path),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Rules => {
            let policy = load_policy(&cli.config)?;
            let out = json!({
                "mode": policy.mode(),
                "prefix": policy.prefix(),
                "rules": policy.rules().iter_sorted(),
                "allow_list": policy.allowed_pages(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Nav { path } => {
            let (prev, next) = navigation(&path);
            let out = json!({
                "page": &path,
                "prev": prev,
                "next": next,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Validate => {
            let config = read_config(&cli.config)?;
            match validate_config(&config) {
                Ok(()) => println!("Configuration is valid"),
                Err(errors) => {
                    for error in &errors {
                        eprintln!("error: {}", error);
                    }
                    std::process::exit(1);
                }
            }
        }
        Commands::Probe { path, url } => {
            let client = reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()?;
            let res = client
                .get(format!("{}{}", url.trim_end_matches('/'), path))
                .send()
                .await?;

            let out = json!({
                "status": res.status().as_u16(),
                "location": header_str(&res, LOCATION),
                "cache_control": header_str(&res, CACHE_CONTROL),
                "request_id": header_str(&res, HeaderName::from_static("x-request-id")),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

/// Read the config without validation, so `validate` can report everything.
fn read_config(path: &Option<PathBuf>) -> Result<GatewayConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(toml::from_str(&std::fs::read_to_string(path)?)?),
        None => Ok(GatewayConfig::default()),
    }
}

fn load_policy(path: &Option<PathBuf>) -> Result<RedirectPolicy, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => docs_gateway::config::load_config(path)?,
        None => GatewayConfig::default(),
    };
    Ok(RedirectPolicy::from_config(&config.docs)?)
}

fn header_str(res: &reqwest::Response, name: HeaderName) -> Option<String> {
    res.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
