pub mod booking;
pub mod engine;
pub mod filter;
pub mod grouping;
pub mod pipeline;
pub mod planner;
pub mod planning;
pub mod selector;
pub mod summary;

pub use crate::domain::model::{Combo, Coverage, Selection, ServiceGroup, Vendor};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
