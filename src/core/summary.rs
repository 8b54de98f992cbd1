use crate::core::booking::BookingSession;
use crate::core::planner::Recommendation;
use crate::domain::model::{BudgetStatus, Combo};
use std::fmt::Write;

fn push_combo(out: &mut String, combo: &Combo) {
    for vendor in combo.vendors() {
        let _ = writeln!(
            out,
            "- {}: {} (Price: ₹{}, Rating: {})",
            vendor.service, vendor.name, vendor.price, vendor.rating
        );
    }
}

fn push_budget_status(out: &mut String, status: Option<BudgetStatus>) {
    match status {
        Some(BudgetStatus::Under { remaining }) => {
            let _ = writeln!(out, "You have ₹{} remaining in your budget.", remaining);
        }
        Some(BudgetStatus::Over { by }) => {
            let _ = writeln!(out, "You are over budget by ₹{}.", by);
        }
        Some(BudgetStatus::Exact) | None => {}
    }
}

/// Plain-text report of a recommendation for terminal output.
pub fn render_summary(recommendation: &Recommendation) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "All Available Vendors by Service:");
    if !recommendation.has_vendors() {
        let _ = writeln!(
            out,
            "No vendors found for this location. Try another city or check your spelling."
        );
    }
    for (service, vendors) in recommendation.services.iter() {
        let _ = writeln!(out, "{}:", service);
        for vendor in vendors {
            let _ = writeln!(
                out,
                "  {} (Price: ₹{}, Rating: {}, Location: {})",
                vendor.name, vendor.price, vendor.rating, vendor.location
            );
        }
    }

    let _ = writeln!(out, "\nRecommended Vendors:");
    if recommendation.selected.is_empty() {
        let _ = writeln!(out, "No suitable vendor combination found within your budget.");
        if let Some(closest) = &recommendation.closest {
            let _ = writeln!(out, "Closest possible set costs: ₹{}", closest.total_price());
            push_combo(&mut out, closest);
            push_budget_status(&mut out, recommendation.closest_budget_status);
        }
    } else {
        push_combo(&mut out, &recommendation.selected);
        let _ = writeln!(out, "Total Estimated Cost: ₹{}", recommendation.total_cost());
        push_budget_status(&mut out, recommendation.budget_status);
    }

    let _ = writeln!(out, "\nSuggested Planning Steps:");
    for (i, step) in recommendation.planning_steps.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, step);
    }

    out
}

pub fn render_bookings(session: &BookingSession) -> String {
    let mut out = String::from("Booking History:\n");
    if session.history().is_empty() {
        out.push_str("Nothing booked yet.\n");
    }
    for booking in session.history() {
        let _ = match &booking.vendor {
            Some(vendor) => writeln!(out, "{}: {}", booking.step, vendor),
            None => writeln!(out, "{}: Booked", booking.step),
        };
    }
    out
}
