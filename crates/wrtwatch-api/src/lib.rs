// wrtwatch-api: Async Rust client for DD-WRT live status pages

pub mod client;
pub mod error;
pub mod page;
pub mod probe;
pub mod transport;

pub use client::{Credentials, PageFetch, RouterClient};
pub use error::Error;
pub use page::{Page, default_pages};
pub use probe::probe;
pub use transport::{TlsMode, TransportConfig};
