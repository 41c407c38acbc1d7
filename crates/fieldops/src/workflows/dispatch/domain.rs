use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for accepted complaints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplaintId(pub String);

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identifier for a field technician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TechnicianId(pub u32);

impl fmt::Display for TechnicianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Appliance categories a technician can be qualified for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Specialization {
    #[serde(rename = "AC")]
    Ac,
    Refrigerator,
    #[serde(rename = "Washing Machine")]
    WashingMachine,
    #[serde(rename = "TV")]
    Television,
    Induction,
    Microwave,
    Geyser,
    Dishwasher,
    #[serde(rename = "Water Purifier")]
    WaterPurifier,
}

impl Specialization {
    pub const ALL: [Specialization; 9] = [
        Specialization::Ac,
        Specialization::Refrigerator,
        Specialization::WashingMachine,
        Specialization::Television,
        Specialization::Induction,
        Specialization::Microwave,
        Specialization::Geyser,
        Specialization::Dishwasher,
        Specialization::WaterPurifier,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Specialization::Ac => "AC",
            Specialization::Refrigerator => "Refrigerator",
            Specialization::WashingMachine => "Washing Machine",
            Specialization::Television => "TV",
            Specialization::Induction => "Induction",
            Specialization::Microwave => "Microwave",
            Specialization::Geyser => "Geyser",
            Specialization::Dishwasher => "Dishwasher",
            Specialization::WaterPurifier => "Water Purifier",
        }
    }

    /// Every known tag; the permissive fallback set used when no keyword or
    /// error-code rule matches a complaint.
    pub fn all_tags() -> BTreeSet<Specialization> {
        Specialization::ALL.iter().copied().collect()
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown specialization '{0}'")]
pub struct UnknownSpecialization(pub String);

impl FromStr for Specialization {
    type Err = UnknownSpecialization;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_uppercase();
        let found = Specialization::ALL
            .iter()
            .find(|spec| spec.label().to_ascii_uppercase() == normalized);
        found
            .copied()
            .ok_or_else(|| UnknownSpecialization(raw.trim().to_string()))
    }
}

/// Parse the delimited specialization field of the persisted technician
/// layout (e.g. `"AC,Refrigerator,TV"`).
pub fn parse_specializations(raw: &str) -> Result<BTreeSet<Specialization>, UnknownSpecialization> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Specialization::from_str)
        .collect()
}

/// Encode a specialization set back into the delimited persisted form.
pub fn encode_specializations(specs: &BTreeSet<Specialization>) -> String {
    specs
        .iter()
        .map(|spec| spec.label())
        .collect::<Vec<_>>()
        .join(",")
}

/// Availability state of a technician. The dispatch coordinator performs the
/// only in-scope transition, available to busy, exactly once per successful
/// assignment. Release back to available is an operational action outside
/// the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicianStatus {
    Available,
    Busy,
}

impl TechnicianStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TechnicianStatus::Available => "available",
            TechnicianStatus::Busy => "busy",
        }
    }
}

/// A field resource in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technician {
    pub id: TechnicianId,
    pub name: String,
    pub contact_no: String,
    pub location: GeoPoint,
    pub status: TechnicianStatus,
    pub specializations: BTreeSet<Specialization>,
}

impl Technician {
    pub fn is_available(&self) -> bool {
        self.status == TechnicianStatus::Available
    }

    pub fn has_any_specialization(&self, required: &BTreeSet<Specialization>) -> bool {
        required.iter().any(|spec| self.specializations.contains(spec))
    }
}

/// Validated complaint payload handed over by the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintSubmission {
    pub submitter_id: i64,
    pub problem: String,
    pub address: String,
    pub contact_no: String,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Sentinel strings the ingestion client sends when text extraction found
/// no error code.
const ERROR_CODE_SENTINELS: [&str; 3] = ["", "NOT_PROVIDED", "UNKNOWN"];

impl ComplaintSubmission {
    /// Coordinates are only usable when both halves are present.
    pub fn location(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    /// Trimmed, upper-cased error code with sentinel values collapsed to
    /// `None`.
    pub fn normalized_error_code(&self) -> Option<String> {
        self.error_code
            .as_deref()
            .map(|code| code.trim().to_ascii_uppercase())
            .filter(|code| !ERROR_CODE_SENTINELS.contains(&code.as_str()))
    }
}

/// Immutable ledger payload describing one accepted complaint. Built once by
/// the submission pipeline and owned by the ledger after appending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub complaint_id: ComplaintId,
    pub submitter_id: i64,
    pub problem: String,
    pub address: String,
    pub location: Option<GeoPoint>,
    pub error_code: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Name of the claimed technician; `None` is the explicit unassigned
    /// marker.
    pub assigned_technician: Option<String>,
}

/// Outbound technician view carried by a successful assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedTechnician {
    pub id: TechnicianId,
    pub name: String,
    pub contact_no: String,
}

impl From<&Technician> for AssignedTechnician {
    fn from(technician: &Technician) -> Self {
        Self {
            id: technician.id,
            name: technician.name.clone(),
            contact_no: technician.contact_no.clone(),
        }
    }
}

/// Result of an assignment attempt. Exhaustion cases are expected outcomes
/// reported as values, never as faults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssignmentOutcome {
    Assigned { technician: AssignedTechnician },
    NoAvailableTechnician,
    NoSuitableTechnician,
}

impl AssignmentOutcome {
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignmentOutcome::Assigned { .. })
    }

    pub fn technician_name(&self) -> Option<&str> {
        match self {
            AssignmentOutcome::Assigned { technician } => Some(technician.name.as_str()),
            _ => None,
        }
    }
}
