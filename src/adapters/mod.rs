// Adapters layer: concrete implementations of the domain ports (storage, vendor files).

pub mod storage;
pub mod vendor_file;

pub use storage::LocalStorage;
pub use vendor_file::{load_vendors, parse_vendors, VendorFormat};
