use crate::core::planning::PlanningStep;
use crate::domain::model::Vendor;
use crate::utils::error::{PlannerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub step: PlanningStep,
    pub vendor: Option<String>,
    pub booked_at: DateTime<Utc>,
}

/// Booking progress owned by the caller.
///
/// Updates take the session by value and hand back the new one; nothing is
/// shared between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSession {
    history: Vec<Booking>,
}

impl BookingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book(
        mut self,
        step: PlanningStep,
        vendor: Option<&Vendor>,
        at: DateTime<Utc>,
    ) -> Result<Self> {
        if self.is_booked(step) {
            return Err(PlannerError::BookingError {
                step: step.label().to_string(),
                reason: "step is already booked".to_string(),
            });
        }

        if let (Some(vendor), Some(service)) = (vendor, step.service()) {
            if vendor.service != service {
                return Err(PlannerError::BookingError {
                    step: step.label().to_string(),
                    reason: format!(
                        "{} offers {}, not {}",
                        vendor.name, vendor.service, service
                    ),
                });
            }
        }

        tracing::info!(
            "{} booked{}",
            step.label(),
            vendor.map(|v| format!(" with {}", v.name)).unwrap_or_default()
        );

        self.history.push(Booking {
            step,
            vendor: vendor.map(|v| v.name.clone()),
            booked_at: at,
        });
        Ok(self)
    }

    pub fn is_booked(&self, step: PlanningStep) -> bool {
        self.history.iter().any(|b| b.step == step)
    }

    pub fn booked_vendor(&self, step: PlanningStep) -> Option<&str> {
        self.history
            .iter()
            .find(|b| b.step == step)
            .and_then(|b| b.vendor.as_deref())
    }

    /// Bookings in the order they were made.
    pub fn history(&self) -> &[Booking] {
        &self.history
    }

    pub fn pending(&self, steps: &[PlanningStep]) -> Vec<PlanningStep> {
        steps
            .iter()
            .copied()
            .filter(|step| !self.is_booked(*step))
            .collect()
    }
}
