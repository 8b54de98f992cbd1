pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::LocalStorage;
pub use crate::core::{
    booking::BookingSession,
    engine::{PlannerEngine, PlannerOutput},
    filter::filter_by_location,
    grouping::group_by_service,
    pipeline::RecommendationPipeline,
    planner::{recommend, PlanRequest, Recommendation},
    planning::{suggest_planning_steps, EventType, PlanningStep},
    selector::{best_unconstrained, select, select_best, SelectionLimits},
};
pub use crate::domain::model::{BudgetStatus, Combo, Coverage, Selection, ServiceGroup, Vendor};
pub use crate::utils::error::{PlannerError, Result};
