// ── Domain model ──
//
// Decoded field values, the per-cycle snapshot, and the device types the
// extractor derives from it.

pub mod device;
pub mod field;
pub mod mac;
pub mod snapshot;

pub use device::{DeviceRecord, DeviceSource};
pub use field::{FieldMap, FieldValue};
pub use mac::{InvalidMac, MacAddress, is_mac};
pub use snapshot::Snapshot;
