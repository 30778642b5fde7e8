//! Data models shared by every stage of the enrichment pipeline.
//!
//! - [`Entity`]: one input row (a college and its candidate brochure URL)
//! - [`Field`]: the fixed, ordered output schema
//! - [`EnrichmentRecord`]: one output row, always fully populated
//! - [`FailureRecord`] / [`RunSummary`]: what is reported once the run ends

use crate::pipeline::FailureReason;
use serde::Serialize;
use std::fmt;

/// Placeholder written for every field that no rule could fill.
pub const NOT_AVAILABLE: &str = "Not available";

/// A single college read from the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Display name, copied verbatim into the `College Name` column.
    pub name: String,
    /// First non-empty value among the admissible URL columns.
    pub candidate_url: Option<String>,
}

impl Entity {
    /// Build an entity from a name cell and the resolved URL cell, if any.
    pub fn new(name: impl Into<String>, candidate_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            candidate_url,
        }
    }
}

/// Columns of the output table, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CollegeName,
    Established,
    Location,
    Type,
    Departments,
    StudentStrength,
    FacultyCount,
    CampusArea,
    Labs,
    Library,
    Naac,
    Nba,
    Rankings,
    PlacementPercentage,
    AveragePackage,
    TopCompanies,
    ResearchCenters,
    Publications,
    Patents,
    SportsFacilities,
    HostelFacilities,
    TransportFacilities,
}

/// Number of columns in the output table.
pub const FIELD_COUNT: usize = 22;

impl Field {
    /// Every column, in header order.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::CollegeName,
        Field::Established,
        Field::Location,
        Field::Type,
        Field::Departments,
        Field::StudentStrength,
        Field::FacultyCount,
        Field::CampusArea,
        Field::Labs,
        Field::Library,
        Field::Naac,
        Field::Nba,
        Field::Rankings,
        Field::PlacementPercentage,
        Field::AveragePackage,
        Field::TopCompanies,
        Field::ResearchCenters,
        Field::Publications,
        Field::Patents,
        Field::SportsFacilities,
        Field::HostelFacilities,
        Field::TransportFacilities,
    ];

    /// Column title as it appears in the output header.
    pub fn header(self) -> &'static str {
        match self {
            Field::CollegeName => "College Name",
            Field::Established => "Established",
            Field::Location => "Location",
            Field::Type => "Type",
            Field::Departments => "Departments",
            Field::StudentStrength => "Student Strength",
            Field::FacultyCount => "Faculty Count",
            Field::CampusArea => "Campus Area",
            Field::Labs => "Labs",
            Field::Library => "Library",
            Field::Naac => "NAAC",
            Field::Nba => "NBA",
            Field::Rankings => "Rankings",
            Field::PlacementPercentage => "Placement Percentage",
            Field::AveragePackage => "Average Package",
            Field::TopCompanies => "Top Companies",
            Field::ResearchCenters => "Research Centers",
            Field::Publications => "Publications",
            Field::Patents => "Patents",
            Field::SportsFacilities => "Sports Facilities",
            Field::HostelFacilities => "Hostel Facilities",
            Field::TransportFacilities => "Transport Facilities",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// All column titles in order.
    pub fn headers() -> impl Iterator<Item = &'static str> {
        Field::ALL.iter().map(|f| f.header())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One row of the output table.
///
/// Every field always holds a string; fields without a match hold
/// [`NOT_AVAILABLE`]. The college name is taken from the [`Entity`], never
/// from document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentRecord {
    values: [String; FIELD_COUNT],
}

impl EnrichmentRecord {
    /// A record with every field at the placeholder except `College Name`.
    pub fn new(college_name: &str) -> Self {
        let mut values: [String; FIELD_COUNT] =
            std::array::from_fn(|_| NOT_AVAILABLE.to_string());
        values[Field::CollegeName.index()] = college_name.to_string();
        Self { values }
    }

    /// Current value of `field`; never empty.
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Overwrite `field` with a matched value.
    ///
    /// # Arguments
    ///
    /// * `field` - Column to overwrite
    /// * `value` - Non-empty text produced by an extraction rule
    pub fn set(&mut self, field: Field, value: String) {
        self.values[field.index()] = value;
    }

    /// Values in header order.
    pub fn values(&self) -> &[String; FIELD_COUNT] {
        &self.values
    }
}

/// Pipeline stage an entity was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Normalizing,
    Fetching,
    Decoding,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Normalizing => "normalizing",
            Stage::Fetching => "fetching",
            Stage::Decoding => "decoding",
        };
        f.write_str(s)
    }
}

/// An entity that produced no output row in this run.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub name: String,
    pub stage: Stage,
    pub reason: String,
}

impl FailureRecord {
    /// Capture the college name, failing stage and reason text.
    pub fn new(name: &str, reason: &FailureReason) -> Self {
        Self {
            name: name.to_string(),
            stage: reason.stage(),
            reason: reason.to_string(),
        }
    }
}

/// Final tally of one run, in processing order.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: Vec<FailureRecord>,
    /// RFC 3339 timestamp taken when the last entity finished.
    pub finished_at: String,
}

impl RunSummary {
    /// Names of the failed colleges, in processing order.
    pub fn failed_names(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.name.as_str()).collect()
    }
}
