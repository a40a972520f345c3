//! Gateway to the Dossin database backend.
//!
//! Two outbound calls are supported:
//!
//! - `GET {base}/database/schema`: the schema document
//! - `POST {base}/database/query` with `{sql, params}`: query rows (`{data: [...]}`)
//!
//! # Examples
//!
//! ```no_run
//! use dossin_backend::{DatabaseGateway, HttpGateway};
//! use dossin_core::{QueryRequest, Settings};
//!
//! # async fn example() -> dossin_core::Result<()> {
//! let gateway = HttpGateway::new(&Settings::default())?;
//! let schema = gateway.fetch_schema().await?;
//! let rows = gateway
//!     .run_query(&QueryRequest::new("SELECT * FROM turnos LIMIT 10"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod gateway;

pub use gateway::{DatabaseGateway, HttpGateway};
