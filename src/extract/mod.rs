//! Rule-based field extraction from brochure text.
//!
//! Extraction starts from a record where every field is [`NOT_AVAILABLE`]
//! (except `College Name`) and applies each entry of [`RULES`]. A rule
//! overwrites its own field only when it matches. Rules target disjoint
//! fields, so the table can be applied in any order with the same result.
//!
//! # Rules
//!
//! | Field | Match | Kept |
//! |-------|-------|------|
//! | Established | `established in NNNN` | first year |
//! | Location | `located in ...` up to `.` or `,` | first, trimmed |
//! | Type | government / private / autonomous | first by priority |
//! | Departments | `department(s) of ...` | all, joined |
//! | Labs, Top Companies | keyword span | all, joined |
//! | Counts (students, faculty, publications, patents) | digits before keyword | first |
//! | Placement Percentage | `NN% placement` | `"NN%"` |
//! | Average Package | `N.N lpa/lakh/package` | `"N.N LPA"` |
//! | Everything else | keyword span up to `.` or `,` | first |
//!
//! [`NOT_AVAILABLE`]: crate::models::NOT_AVAILABLE

pub mod rules;

use crate::decode::ExtractedText;
use crate::models::{EnrichmentRecord, Field};
use tracing::{debug, instrument};

/// A field rule: full text in, value out when it matched.
pub type Rule = fn(&str) -> Option<String>;

/// Every extractable field paired with its rule. `College Name` has no rule.
pub const RULES: &[(Field, Rule)] = &[
    (Field::Established, rules::established),
    (Field::Location, rules::location),
    (Field::Type, rules::institution_type),
    (Field::Departments, rules::departments),
    (Field::StudentStrength, rules::student_strength),
    (Field::FacultyCount, rules::faculty_count),
    (Field::CampusArea, rules::campus_area),
    (Field::Labs, rules::labs),
    (Field::Library, rules::library),
    (Field::Naac, rules::naac),
    (Field::Nba, rules::nba),
    (Field::Rankings, rules::rankings),
    (Field::PlacementPercentage, rules::placement_percentage),
    (Field::AveragePackage, rules::average_package),
    (Field::TopCompanies, rules::top_companies),
    (Field::ResearchCenters, rules::research_centers),
    (Field::Publications, rules::publications),
    (Field::Patents, rules::patents),
    (Field::SportsFacilities, rules::sports_facilities),
    (Field::HostelFacilities, rules::hostel_facilities),
    (Field::TransportFacilities, rules::transport_facilities),
];

/// Build the output row for `college_name` from its brochure text.
///
/// Never fails: unmatched fields keep the placeholder value.
#[instrument(level = "debug", skip(text))]
pub fn extract(text: &ExtractedText, college_name: &str) -> EnrichmentRecord {
    let mut record = EnrichmentRecord::new(college_name);
    let mut matched = 0usize;
    for (field, rule) in RULES {
        if let Some(value) = rule(text.as_str()) {
            record.set(*field, value);
            matched += 1;
        }
    }
    debug!(matched, total = RULES.len(), "Applied extraction rules");
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FIELD_COUNT, NOT_AVAILABLE};
    use std::collections::HashSet;

    const BROCHURE: &str = "Sri Example College of Engineering\n\
        Established in 1984, the college is located in Coimbatore, Tamil Nadu.\n\
        It is an autonomous institution affiliated to Anna University.\n\
        Department of Mechanical Engineering. Department of Computer Science.\n\
        More than 3200 students and 210 faculty members.\n\
        The campus spans 120 acres.\n\
        Accredited by NAAC with A+ grade. NBA accredited UG programmes.\n\
        Ranked 87 in NIRF 2023.\n\
        85% placement record with average 4.2 LPA.\n\
        Top recruiting companies include TCS and Wipro.\n";

    #[test]
    fn test_rules_cover_every_field_but_name() {
        let fields: HashSet<Field> = RULES.iter().map(|(f, _)| *f).collect();
        assert_eq!(fields.len(), RULES.len(), "rules must target disjoint fields");
        assert_eq!(RULES.len(), FIELD_COUNT - 1);
        assert!(!fields.contains(&Field::CollegeName));
    }

    #[test]
    fn test_extract_brochure() {
        let text = ExtractedText::new(BROCHURE);
        let record = extract(&text, "Sri Example College");

        assert_eq!(record.get(Field::CollegeName), "Sri Example College");
        assert_eq!(record.get(Field::Established), "1984");
        assert_eq!(record.get(Field::Location), "coimbatore");
        assert_eq!(record.get(Field::Type), "Autonomous");
        assert_eq!(
            record.get(Field::Departments),
            "mechanical engineering, computer science"
        );
        assert_eq!(record.get(Field::StudentStrength), "3200");
        assert_eq!(record.get(Field::FacultyCount), "210");
        assert_eq!(record.get(Field::CampusArea), "120 acres");
        assert_eq!(record.get(Field::Naac), "naac with a+ grade");
        assert_eq!(record.get(Field::Nba), "nba accredited ug programmes");
        assert_eq!(record.get(Field::Rankings), "ranked 87 in nirf 2023");
        assert_eq!(record.get(Field::PlacementPercentage), "85%");
        assert_eq!(record.get(Field::AveragePackage), "4.2 LPA");
        assert_eq!(
            record.get(Field::TopCompanies),
            "companies include tcs and wipro"
        );
        assert_eq!(record.get(Field::Library), NOT_AVAILABLE);
        assert_eq!(record.get(Field::Patents), NOT_AVAILABLE);
        assert_eq!(record.get(Field::HostelFacilities), NOT_AVAILABLE);
    }

    #[test]
    fn test_college_name_is_never_extracted() {
        let text = ExtractedText::new("college name: something else entirely");
        let record = extract(&text, "Given Name");
        assert_eq!(record.get(Field::CollegeName), "Given Name");
    }

    #[test]
    fn test_empty_text_yields_placeholders() {
        let record = extract(&ExtractedText::new(""), "Empty");
        for field in Field::ALL.iter().skip(1) {
            assert_eq!(record.get(*field), NOT_AVAILABLE);
        }
        assert!(record.values().iter().all(|v| !v.is_empty()));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = ExtractedText::new(BROCHURE);
        assert_eq!(extract(&text, "A"), extract(&text, "A"));
    }

    #[test]
    fn test_rule_order_does_not_matter() {
        let text = ExtractedText::new(BROCHURE);
        let forward = extract(&text, "A");

        let mut reversed = EnrichmentRecord::new("A");
        for (field, rule) in RULES.iter().rev() {
            if let Some(value) = rule(text.as_str()) {
                reversed.set(*field, value);
            }
        }
        assert_eq!(forward, reversed);
    }
}
