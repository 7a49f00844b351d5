// wrtwatch-core: Decoding, derived metrics, and device tracking on top of wrtwatch-api.

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod decode;
pub mod devices;
pub mod error;
pub mod metrics;
pub mod model;
pub mod monitor;
pub mod normalize;
pub mod status;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, RouterConfig, TlsVerification};
pub use error::CoreError;
pub use monitor::Monitor;

pub use aggregate::{PageFailure, merge};
pub use catalog::{FieldCategory, FieldSpec};
pub use decode::{decode, decode_payload};
pub use devices::{extract_devices, is_connected};
pub use metrics::{DerivedMetrics, LoadAverage, MemoryUsage, RateState, TrafficRates, bandwidth_rate};
pub use normalize::normalize;
pub use status::StatusFlags;

// Re-export model types at the crate root for ergonomics.
pub use model::{DeviceRecord, DeviceSource, FieldMap, FieldValue, MacAddress, Snapshot};
