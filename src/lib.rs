//! # cwmanage
//!
//! A typed async client for the ConnectWise Manage REST API.
//!
//! ## Features
//!
//! - **Generic verbs**: fetch, create, replace, partial update and remove
//!   against any endpoint, with Basic auth and `clientId` headers attached
//! - **Transparent pagination**: [`CwClient::fetch_all`] counts, then walks
//!   every page and returns one ordered list
//! - **Typed errors**: HTTP failures map to [`CwError`] variants carrying the
//!   message, status code and raw body; 404 is an absence signal, not an error
//! - **Resource services**: tickets, notes and configurations on top of the
//!   generic verbs
//!
//! The client performs no automatic retries.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration from explicit values or environment variables
//! - [`auth`] - Authentication header construction
//! - [`error`] - Error taxonomy and status classification
//! - [`client`] - The request executor
//! - [`pagination`] - Count-then-page retrieval of whole collections
//! - [`query`] - Query parameters for collection endpoints
//! - [`models`] - Ticket, configuration and note models
//! - [`resources`] - Ticket and configuration operations
//!
//! ## Configuration
//!
//! [`Config::from_env`] reads:
//!
//! - `CW_BASE_URL`: ConnectWise site URL
//! - `CW_COMPANY`: company identifier used at login
//! - `CW_USERNAME` / `CW_PASSWORD`: API member credentials (or public/private keys)
//! - `CW_CLIENT_ID`: registered client ID
//!
//! ## Example
//!
//! ```ignore
//! use cwmanage::{Config, CwClient, Query, TicketService};
//!
//! async fn example() -> Result<(), cwmanage::CwError> {
//!     let config = Config::from_env()?;
//!     let client = CwClient::new(&config)?;
//!
//!     let tickets = TicketService::with_defaults(&client, config.ticket_defaults);
//!     let open = tickets
//!         .get_tickets(&Query::new().with_conditions("closedFlag=false"))
//!         .await?;
//!     for ticket in open {
//!         println!("#{}: {}", ticket.id, ticket.summary);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;
pub mod resources;

pub use client::CwClient;
pub use config::{Config, TicketDefaults};
pub use error::{ApiError, CwError};
pub use query::Query;
pub use resources::{ConfigurationService, TicketService};
