use std::time::Duration;

use betterbots::{ClientConfig, HttpClient, HttpError, Method, ParamValue, RequestOptions, ResponseBody};
use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing token; pass --token or set BETTERBOTS_TOKEN")]
    MissingToken,
    #[error("invalid --param `{0}`; expected name=value")]
    InvalidParam(String),
    #[error(transparent)]
    Api(#[from] HttpError),
    #[error("websocket read failed: {0}")]
    WsRead(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("timed out waiting for websocket message")]
    Timeout,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "betterbots", about = "BetterBots.gg API and websocket CLI")]
struct Cli {
    #[arg(long, env = "BETTERBOTS_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "BETTERBOTS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the token and print the profile it belongs to.
    Me,
    /// GET an API path, e.g. `get /bots/{id} --param id=816238712`.
    Get {
        path: String,
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },
    /// Open a websocket and print incoming text messages.
    Ws {
        url: String,
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long, default_value_t = 15)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    let mut client = HttpClient::from_config(config);

    let result = run(&mut client, cli.token.as_deref(), cli.command).await;
    client.close().await;
    result
}

async fn run(client: &mut HttpClient, token: Option<&str>, command: Command) -> Result<(), CliError> {
    match command {
        Command::Me => {
            let token = token.ok_or(CliError::MissingToken)?;
            let profile = client.static_login(token).await?;
            print_body(&profile)
        }
        Command::Get { path, params } => {
            login_or_open(client, token).await?;
            let params = parse_params(&params)?;
            let params = params
                .iter()
                .map(|(name, value)| (name.as_str(), ParamValue::from(value)))
                .collect::<Vec<_>>();
            let route = client.route(Method::GET, &path, &params)?;
            let body = client.request(&route, RequestOptions::default()).await?;
            print_body(&body)
        }
        Command::Ws { url, count, timeout_secs } => {
            login_or_open(client, token).await?;
            let mut socket = client.ws_connect(&url).await?;
            eprintln!("connected: {url}");

            let mut received = 0_usize;
            while received < count {
                let next = tokio::time::timeout(Duration::from_secs(timeout_secs), socket.next())
                    .await
                    .map_err(|_| CliError::Timeout)?;
                let Some(message) = next else {
                    eprintln!("websocket closed by peer");
                    break;
                };
                match message.map_err(|error| CliError::WsRead(Box::new(error)))? {
                    Message::Text(text) => {
                        println!("{}", text.as_str());
                        received = received.saturating_add(1);
                    }
                    Message::Close(_) => {
                        eprintln!("websocket closed by peer");
                        break;
                    }
                    _ => {}
                }
            }
            Ok(())
        }
    }
}

/// Log in when a token is available; otherwise open an anonymous session.
async fn login_or_open(client: &mut HttpClient, token: Option<&str>) -> Result<(), CliError> {
    match token {
        Some(token) => {
            client.static_login(token).await?;
        }
        None => client.recreate()?,
    }
    Ok(())
}

fn parse_params(raw: &[String]) -> Result<Vec<(String, String)>, CliError> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, value)| (name.to_owned(), value.to_owned()))
                .ok_or_else(|| CliError::InvalidParam(pair.clone()))
        })
        .collect()
}

fn print_body(body: &ResponseBody) -> Result<(), CliError> {
    match body {
        ResponseBody::Json(value) => println!("{}", serde_json::to_string_pretty(value)?),
        ResponseBody::Text(text) => println!("{text}"),
    }
    Ok(())
}
