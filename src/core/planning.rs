use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EventType {
    Wedding,
    Birthday,
    Corporate,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Wedding => "Wedding",
            EventType::Birthday => "Birthday",
            EventType::Corporate => "Corporate",
            EventType::Other(name) => name,
        }
    }
}

impl FromStr for EventType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "wedding" => EventType::Wedding,
            "birthday" => EventType::Birthday,
            "corporate" => EventType::Corporate,
            _ => EventType::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(event) => event,
            Err(never) => match never {},
        }
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningStep {
    BookVenue,
    BookDecoration,
    BookCatering,
    BookPhotographer,
    BookCake,
    BookAvEquipment,
    BookVendors,
}

impl PlanningStep {
    pub fn label(&self) -> &'static str {
        match self {
            PlanningStep::BookVenue => "Book venue",
            PlanningStep::BookDecoration => "Book decoration",
            PlanningStep::BookCatering => "Book catering",
            PlanningStep::BookPhotographer => "Book photographer",
            PlanningStep::BookCake => "Book cake",
            PlanningStep::BookAvEquipment => "Book AV equipment",
            PlanningStep::BookVendors => "Book vendors",
        }
    }

    /// Service category a vendor must offer to fulfil this step.
    pub fn service(&self) -> Option<&'static str> {
        match self {
            PlanningStep::BookVenue => Some("Venue"),
            PlanningStep::BookDecoration => Some("Decoration"),
            PlanningStep::BookCatering => Some("Catering"),
            PlanningStep::BookPhotographer => Some("Photography"),
            PlanningStep::BookCake => Some("Cake"),
            PlanningStep::BookAvEquipment => Some("AV Equipment"),
            PlanningStep::BookVendors => None,
        }
    }
}

impl fmt::Display for PlanningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn suggest_planning_steps(event_type: &EventType) -> Vec<PlanningStep> {
    use PlanningStep::*;

    match event_type {
        EventType::Wedding => vec![BookVenue, BookDecoration, BookCatering, BookPhotographer],
        EventType::Birthday => vec![BookVenue, BookDecoration, BookCake, BookPhotographer],
        EventType::Corporate => vec![BookVenue, BookCatering, BookAvEquipment, BookDecoration],
        EventType::Other(_) => vec![BookVenue, BookVendors],
    }
}
