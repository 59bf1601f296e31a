//! Market-Data Ingestion Layer
//!
//! Quote feeds arrive as newline-delimited JSON where each line maps an
//! instrument key to a record of fields. This crate partitions every record
//! into the fields a consumer wants to keep (e.g. `timestamp` and
//! `last_price`) and everything else, writing two parallel streams.
//!
//! # Example
//!
//! ```rust
//! use infra_ingest::split_record;
//! use serde_json::json;
//!
//! let record = json!({
//!     "NSE:INFY": {"timestamp": "2024-07-29T09:16:20", "last_price": 1850.5, "volume": 10},
//!     "_meta": {"source": "ticker"}
//! });
//! let keys = vec!["timestamp".to_string(), "last_price".to_string()];
//! let split = split_record(record.as_object().unwrap(), &keys);
//!
//! assert_eq!(split.retained["NSE:INFY"], json!({"timestamp": "2024-07-29T09:16:20", "last_price": 1850.5}));
//! assert_eq!(split.remaining["NSE:INFY"], json!({"volume": 10}));
//! assert_eq!(split.remaining["_meta"], json!({"source": "ticker"}));
//! ```

pub mod record_split;
pub mod config;
pub mod error;

pub use record_split::{split_files, split_record, split_stream, SplitRecord, SplitStats};
pub use config::SplitConfig;
pub use error::{IngestError, IngestResult};
