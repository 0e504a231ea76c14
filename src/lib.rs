//! Async client for the BetterBots.gg REST and WebSocket API.
//!
//! The crate resolves endpoint routes, keeps one reusable network session,
//! attaches the `APIKey` token, decodes responses by content type, and maps
//! failures onto [`HttpError`]. What happens on a WebSocket after it is opened
//! is left to the caller.
//!
//! ```no_run
//! use betterbots::{HttpClient, Method, RequestOptions};
//!
//! # async fn run() -> Result<(), betterbots::HttpError> {
//! let mut client = HttpClient::from_env()?;
//! let profile = client.static_login("my-token").await?;
//! println!("logged in as {profile}");
//!
//! let route = client.route(Method::GET, "/bots/{id}", &[("id", "816238712".into())])?;
//! let bot = client.request(&route, RequestOptions::default()).await?;
//! println!("{bot}");
//!
//! client.close().await;
//! # Ok(())
//! # }
//! ```

pub mod body;
pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod route;
pub mod session;

pub use body::ResponseBody;
pub use client::{AUTH_HEADER, HttpClient, RequestOptions, SessionState};
pub use config::{ClientConfig, Timeouts};
pub use error::HttpError;
pub use gate::PauseGate;
pub use reqwest::Method;
pub use route::{BASE_URL, ParamValue, Route, RouteError};
pub use session::{Connector, ReqwestConnector, ReqwestSession, Session, Socket};
