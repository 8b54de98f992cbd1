use crate::domain::model::{ServiceGroup, Vendor};
use std::cmp::Ordering;

/// Ranking used inside every group: higher rating first, cheaper first on equal rating.
pub fn rank(a: &Vendor, b: &Vendor) -> Ordering {
    b.rating
        .partial_cmp(&a.rating)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.price.cmp(&b.price))
}

/// Partitions vendors by service. `sort_by` is stable, so vendors with the
/// same rating and price keep their input order.
pub fn group_by_service(vendors: &[Vendor]) -> ServiceGroup {
    let mut groups: Vec<(String, Vec<Vendor>)> = Vec::new();

    for vendor in vendors {
        match groups.iter().position(|(service, _)| *service == vendor.service) {
            Some(index) => groups[index].1.push(vendor.clone()),
            None => groups.push((vendor.service.clone(), vec![vendor.clone()])),
        }
    }

    for (_, members) in groups.iter_mut() {
        members.sort_by(rank);
    }

    tracing::debug!(
        "Grouped {} vendors into {} service categories",
        vendors.len(),
        groups.len()
    );

    ServiceGroup::from_groups(groups)
}
