use crate::core::booking::BookingSession;
use crate::core::filter::filter_by_location;
use crate::core::grouping::group_by_service;
use crate::core::planning::{suggest_planning_steps, EventType, PlanningStep};
use crate::core::selector::{
    best_unconstrained_from_groups, select_from_groups, SelectionLimits,
};
use crate::domain::model::{BudgetStatus, Combo, Coverage, ServiceGroup, Vendor};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub event_type: EventType,
    pub location: String,
    pub budget: u64,
}

impl PlanRequest {
    /// Vendors matching the requested location, grouped by service. This is
    /// the input every selection for this request runs over.
    pub fn local_services(&self, vendors: &[Vendor]) -> ServiceGroup {
        group_by_service(&filter_by_location(vendors, &self.location))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub request: PlanRequest,
    /// Every vendor that passed the location filter, grouped for display.
    pub services: ServiceGroup,
    pub selected: Combo,
    pub coverage: Coverage,
    pub budget_status: Option<BudgetStatus>,
    /// Best combo ignoring budget, only filled in when nothing fits.
    pub closest: Option<Combo>,
    pub closest_budget_status: Option<BudgetStatus>,
    pub planning_steps: Vec<PlanningStep>,
}

impl Recommendation {
    pub fn has_vendors(&self) -> bool {
        !self.services.is_empty()
    }

    pub fn total_cost(&self) -> u64 {
        self.selected.total_price()
    }
}

pub fn recommend(
    vendors: &[Vendor],
    request: &PlanRequest,
    limits: &SelectionLimits,
) -> Result<Recommendation> {
    let services = request.local_services(vendors);

    if services.is_empty() {
        tracing::warn!("No vendors found for location '{}'", request.location);
    }

    let selection = select_from_groups(&services, request.budget, limits)?;

    let budget_status = (!selection.combo.is_empty())
        .then(|| BudgetStatus::compare(selection.combo.total_price(), request.budget));

    let closest = if selection.combo.is_empty() && !services.is_empty() {
        Some(best_unconstrained_from_groups(&services))
    } else {
        None
    };
    let closest_budget_status = closest
        .as_ref()
        .map(|combo| BudgetStatus::compare(combo.total_price(), request.budget));

    tracing::info!(
        "Recommendation for {} in '{}': {} vendors selected ({:?}), total {}",
        request.event_type,
        request.location,
        selection.combo.len(),
        selection.coverage,
        selection.combo.total_price()
    );

    Ok(Recommendation {
        request: request.clone(),
        services,
        selected: selection.combo,
        coverage: selection.coverage,
        budget_status,
        closest,
        closest_budget_status,
        planning_steps: suggest_planning_steps(&request.event_type),
    })
}

/// Books every planning step whose service is covered by the selected combo.
pub fn book_selected(
    session: BookingSession,
    recommendation: &Recommendation,
    at: DateTime<Utc>,
) -> Result<BookingSession> {
    let mut session = session;
    for step in session.pending(&recommendation.planning_steps) {
        let vendor = step
            .service()
            .and_then(|service| recommendation.selected.vendor_for(service));
        if let Some(vendor) = vendor {
            session = session.book(step, Some(vendor), at)?;
        }
    }
    Ok(session)
}
