use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A single vendor offer. Two records with the same name are still distinct offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub name: String,
    pub service: String,
    pub location: String,
    pub price: u64,
    pub rating: f64,
}

impl Vendor {
    pub fn new(
        name: impl Into<String>,
        service: impl Into<String>,
        location: impl Into<String>,
        price: u64,
        rating: f64,
    ) -> Self {
        Self {
            name: name.into(),
            service: service.into(),
            location: location.into(),
            price,
            rating,
        }
    }
}

/// Vendors keyed by service category.
///
/// Categories keep the order in which they first appear in the input, and
/// each group is ordered by rating (descending) then price (ascending).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceGroup {
    groups: Vec<(String, Vec<Vendor>)>,
}

impl ServiceGroup {
    pub(crate) fn from_groups(groups: Vec<(String, Vec<Vendor>)>) -> Self {
        Self { groups }
    }

    pub fn get(&self, service: &str) -> Option<&[Vendor]> {
        self.groups
            .iter()
            .find(|(key, _)| key == service)
            .map(|(_, vendors)| vendors.as_slice())
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Vendor])> {
        self.groups
            .iter()
            .map(|(key, vendors)| (key.as_str(), vendors.as_slice()))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn vendor_count(&self) -> usize {
        self.groups.iter().map(|(_, vendors)| vendors.len()).sum()
    }
}

impl Serialize for ServiceGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (service, vendors) in &self.groups {
            map.serialize_entry(service, vendors)?;
        }
        map.end()
    }
}

/// A set of vendors holding at most one vendor per service category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Combo {
    vendors: Vec<Vendor>,
}

impl Combo {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a combo, returning `None` if two vendors share a service.
    pub fn new(vendors: Vec<Vendor>) -> Option<Self> {
        for (i, vendor) in vendors.iter().enumerate() {
            if vendors[..i].iter().any(|v| v.service == vendor.service) {
                return None;
            }
        }
        Some(Self { vendors })
    }

    pub(crate) fn from_unique(vendors: Vec<Vendor>) -> Self {
        debug_assert!(Self::new(vendors.clone()).is_some());
        Self { vendors }
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn total_price(&self) -> u64 {
        self.vendors
            .iter()
            .fold(0u64, |acc, v| acc.saturating_add(v.price))
    }

    pub fn total_score(&self) -> f64 {
        self.vendors.iter().map(|v| v.rating).sum()
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.vendors.iter().map(|v| v.service.as_str())
    }

    pub fn vendor_for(&self, service: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.service == service)
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}

/// How many categories a selection covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Coverage {
    /// One vendor from every available category.
    Full,
    /// Fallback tier: only `categories` of the available categories fit.
    Partial { categories: usize },
    /// Nothing fits the budget.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub combo: Combo,
    pub coverage: Coverage,
}

impl Selection {
    pub fn empty() -> Self {
        Self {
            combo: Combo::empty(),
            coverage: Coverage::Empty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetStatus {
    Under { remaining: u64 },
    Exact,
    Over { by: u64 },
}

impl BudgetStatus {
    pub fn compare(total: u64, budget: u64) -> Self {
        match total.cmp(&budget) {
            std::cmp::Ordering::Less => BudgetStatus::Under {
                remaining: budget - total,
            },
            std::cmp::Ordering::Equal => BudgetStatus::Exact,
            std::cmp::Ordering::Greater => BudgetStatus::Over { by: total - budget },
        }
    }
}
