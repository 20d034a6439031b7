//! Cluster records and the filter/sort pipeline behind the cluster table.
//!
//! The comparison mode of every column is fixed by [`ClusterField`], never by
//! the runtime shape of a value: percentage labels such as `"9.5%"` sort
//! lexically even though they look numeric.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomicAnnotation {
    Unknown,
    Bacteria,
    Archaea,
    Metazoa,
}

impl TaxonomicAnnotation {
    pub const ALL: [Self; 4] = [Self::Unknown, Self::Bacteria, Self::Archaea, Self::Metazoa];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Bacteria => "Bacteria",
            Self::Archaea => "Archaea",
            Self::Metazoa => "Metazoa",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TopDatabaseMatch {
    BathymodiolusThermophilus,
    SulfurimonasAutotrophica,
    MethanococcusMaripaludis,
    CandidaAlbicans,
    UnknownSpecies,
}

impl TopDatabaseMatch {
    pub const ALL: [Self; 5] = [
        Self::BathymodiolusThermophilus,
        Self::SulfurimonasAutotrophica,
        Self::MethanococcusMaripaludis,
        Self::CandidaAlbicans,
        Self::UnknownSpecies,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BathymodiolusThermophilus => "Bathymodiolus thermophilus",
            Self::SulfurimonasAutotrophica => "Sulfurimonas autotrophica",
            Self::MethanococcusMaripaludis => "Methanococcus maripaludis",
            Self::CandidaAlbicans => "Candida albicans",
            Self::UnknownSpecies => "Unknown species",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FunctionSignal {
    MethaneMetabolismDomain,
    SulfurOxidationPathway,
    MethanogenesisEnzyme,
    CellWallBiosynthesis,
    HypotheticalProtein,
}

impl FunctionSignal {
    pub const ALL: [Self; 5] = [
        Self::MethaneMetabolismDomain,
        Self::SulfurOxidationPathway,
        Self::MethanogenesisEnzyme,
        Self::CellWallBiosynthesis,
        Self::HypotheticalProtein,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MethaneMetabolismDomain => "Methane metabolism domain",
            Self::SulfurOxidationPathway => "Sulfur oxidation pathway",
            Self::MethanogenesisEnzyme => "Methanogenesis enzyme",
            Self::CellWallBiosynthesis => "Cell wall biosynthesis",
            Self::HypotheticalProtein => "Hypothetical protein",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalAssociation {
    LinkedToVents,
    SedimentCore,
    HydrothermalVents,
    HumanGut,
    OpenOcean,
}

impl EnvironmentalAssociation {
    pub const ALL: [Self; 5] = [
        Self::LinkedToVents,
        Self::SedimentCore,
        Self::HydrothermalVents,
        Self::HumanGut,
        Self::OpenOcean,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LinkedToVents => "Linked to C021 (vents)",
            Self::SedimentCore => "Sediment core",
            Self::HydrothermalVents => "Hydrothermal vents",
            Self::HumanGut => "Human gut",
            Self::OpenOcean => "Open ocean",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum NoveltyCategory {
    KnownGenus,
    KnownSpecies,
    NovelGenusCandidate,
    NovelSpeciesCandidate,
}

impl NoveltyCategory {
    pub const ALL: [Self; 4] = [
        Self::KnownGenus,
        Self::KnownSpecies,
        Self::NovelGenusCandidate,
        Self::NovelSpeciesCandidate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::KnownGenus => "Known genus",
            Self::KnownSpecies => "Known species",
            Self::NovelGenusCandidate => "Novel genus candidate",
            Self::NovelSpeciesCandidate => "Novel species candidate",
        }
    }

    pub fn is_novel(self) -> bool {
        matches!(
            self,
            Self::NovelGenusCandidate | Self::NovelSpeciesCandidate
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ExpertValidation {
    Reviewed,
    Pending,
    Rejected,
}

impl ExpertValidation {
    pub const ALL: [Self; 3] = [Self::Reviewed, Self::Pending, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reviewed => "Reviewed ✅",
            Self::Pending => "Pending ⏳",
            Self::Rejected => "Rejected ❌",
        }
    }

    /// Label without the status glyph, used for data attributes.
    pub fn token(self) -> &'static str {
        match self {
            Self::Reviewed => "reviewed",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub id: String,
    pub size: u32,
    pub novelty: f64,
    pub annotation: TaxonomicAnnotation,
    pub p_value: f64,
    pub tax_confidence: f64,
    pub rep_seq_id: String,
    pub top_db_match: TopDatabaseMatch,
    pub function_signal: FunctionSignal,
    pub abundance: f64,
    pub env_assoc: EnvironmentalAssociation,
    pub novelty_category: NoveltyCategory,
    pub expert_validation: ExpertValidation,
}

impl ClusterRecord {
    /// Minimal record with neutral descriptive fields; `novelty` is clamped
    /// into `[0, 100]`.
    pub fn new(
        id: impl Into<String>,
        size: u32,
        novelty: f64,
        annotation: TaxonomicAnnotation,
    ) -> Self {
        let id = id.into();
        Self {
            rep_seq_id: format!("contig_{id}"),
            id,
            size: size.max(1),
            novelty: clamp_percent(novelty, 100.0),
            annotation,
            p_value: 1.0,
            tax_confidence: 70.0,
            top_db_match: TopDatabaseMatch::UnknownSpecies,
            function_signal: FunctionSignal::HypotheticalProtein,
            abundance: 0.0,
            env_assoc: EnvironmentalAssociation::OpenOcean,
            novelty_category: NoveltyCategory::KnownSpecies,
            expert_validation: ExpertValidation::Pending,
        }
    }

    pub fn novelty_label(&self) -> String {
        format!("{}%", format_one_decimal_trimmed(self.novelty))
    }

    pub fn tax_confidence_label(&self) -> String {
        format!("{:.1}%", self.tax_confidence)
    }

    pub fn abundance_label(&self) -> String {
        format!("{:.1}%", self.abundance)
    }

    pub fn p_value_label(&self) -> String {
        format!("{:.2e}", self.p_value)
    }

    pub fn novelty_badge(&self) -> NoveltyBadge {
        NoveltyBadge::for_novelty(self.novelty)
    }
}

/// Clamps a percentage into `[0, max]`, mapping NaN to zero.
pub fn clamp_percent(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

fn format_one_decimal_trimmed(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Badge tier of the novelty column.
pub enum NoveltyBadge {
    High,
    Moderate,
    Low,
}

impl NoveltyBadge {
    pub fn for_novelty(novelty: f64) -> Self {
        if novelty > 75.0 {
            Self::High
        } else if novelty > 25.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn variant(self) -> &'static str {
        match self {
            Self::High => "destructive",
            Self::Moderate => "secondary",
            Self::Low => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    Numeric,
    Lexical,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClusterFieldValue<'a> {
    Number(f64),
    Text(Cow<'a, str>),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
/// Column of the cluster table; doubles as the sort key.
pub enum ClusterField {
    Id,
    Size,
    Novelty,
    Annotation,
    PValue,
    TaxConfidence,
    RepSeqId,
    TopDbMatch,
    FunctionSignal,
    Abundance,
    EnvAssoc,
    NoveltyCategory,
    ExpertValidation,
}

impl ClusterField {
    pub const ALL: [Self; 13] = [
        Self::Id,
        Self::Size,
        Self::Novelty,
        Self::Annotation,
        Self::PValue,
        Self::TaxConfidence,
        Self::RepSeqId,
        Self::TopDbMatch,
        Self::FunctionSignal,
        Self::Abundance,
        Self::EnvAssoc,
        Self::NoveltyCategory,
        Self::ExpertValidation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Size => "size",
            Self::Novelty => "novelty",
            Self::Annotation => "annotation",
            Self::PValue => "p_value",
            Self::TaxConfidence => "tax_confidence",
            Self::RepSeqId => "rep_seq_id",
            Self::TopDbMatch => "top_db_match",
            Self::FunctionSignal => "function_signal",
            Self::Abundance => "abundance",
            Self::EnvAssoc => "env_assoc",
            Self::NoveltyCategory => "novelty_category",
            Self::ExpertValidation => "expert_validation",
        }
    }

    pub fn header_label(self) -> &'static str {
        match self {
            Self::Id => "Cluster ID",
            Self::Size => "Size",
            Self::Novelty => "Novelty",
            Self::Annotation => "Annotation",
            Self::PValue => "P-value",
            Self::TaxConfidence => "Tax. Confidence",
            Self::RepSeqId => "Rep. Seq ID",
            Self::TopDbMatch => "Top DB Match",
            Self::FunctionSignal => "Function Signal",
            Self::Abundance => "Abundance",
            Self::EnvAssoc => "Env. Assoc.",
            Self::NoveltyCategory => "Novelty Category",
            Self::ExpertValidation => "Expert Validation",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DashboardError> {
        let normalized = raw.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| DashboardError::InvalidSortKey {
                key: raw.to_string(),
            })
    }

    pub fn comparison_mode(self) -> ComparisonMode {
        match self {
            Self::Size | Self::Novelty | Self::PValue => ComparisonMode::Numeric,
            _ => ComparisonMode::Lexical,
        }
    }

    pub fn value_of(self, record: &ClusterRecord) -> ClusterFieldValue<'_> {
        match self {
            Self::Id => ClusterFieldValue::Text(Cow::Borrowed(record.id.as_str())),
            Self::Size => ClusterFieldValue::Number(f64::from(record.size)),
            Self::Novelty => ClusterFieldValue::Number(record.novelty),
            Self::Annotation => ClusterFieldValue::Text(Cow::Borrowed(record.annotation.as_str())),
            Self::PValue => ClusterFieldValue::Number(record.p_value),
            Self::TaxConfidence => ClusterFieldValue::Text(Cow::Owned(record.tax_confidence_label())),
            Self::RepSeqId => ClusterFieldValue::Text(Cow::Borrowed(record.rep_seq_id.as_str())),
            Self::TopDbMatch => ClusterFieldValue::Text(Cow::Borrowed(record.top_db_match.as_str())),
            Self::FunctionSignal => {
                ClusterFieldValue::Text(Cow::Borrowed(record.function_signal.as_str()))
            }
            Self::Abundance => ClusterFieldValue::Text(Cow::Owned(record.abundance_label())),
            Self::EnvAssoc => ClusterFieldValue::Text(Cow::Borrowed(record.env_assoc.as_str())),
            Self::NoveltyCategory => {
                ClusterFieldValue::Text(Cow::Borrowed(record.novelty_category.as_str()))
            }
            Self::ExpertValidation => {
                ClusterFieldValue::Text(Cow::Borrowed(record.expert_validation.as_str()))
            }
        }
    }

    /// Rendered cell text for this column.
    pub fn display_value(self, record: &ClusterRecord) -> String {
        match self {
            Self::Novelty => record.novelty_label(),
            Self::PValue => record.p_value_label(),
            _ => match self.value_of(record) {
                ClusterFieldValue::Number(value) => format_one_decimal_trimmed(value),
                ClusterFieldValue::Text(text) => text.into_owned(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, DashboardError> {
        match raw.trim() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(DashboardError::InvalidSortDirection {
                direction: raw.to_string(),
            }),
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn aria_sort(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: ClusterField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: ClusterField::Novelty,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(key: ClusterField, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Next spec after a header click on `key`.
    ///
    /// `(k, desc) -> (k, asc)`, `(k, asc) -> (k, desc)`, `(k, _) -> (k2, desc)`.
    pub fn toggled(self, key: ClusterField) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Descending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        Self { key, direction }
    }

    /// `aria-sort` value of `field` under this spec.
    pub fn aria_sort_for(self, field: ClusterField) -> &'static str {
        if self.key == field {
            self.direction.aria_sort()
        } else {
            "none"
        }
    }
}

/// Case-insensitive primary ordering with a lowercase-first tiebreak.
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
        .then_with(|| right.cmp(left))
}

/// Natural (ascending) order of two records on `key`.
///
/// Operands whose dynamic types disagree compare equal.
pub fn compare_cluster_records(
    left: &ClusterRecord,
    right: &ClusterRecord,
    key: ClusterField,
) -> Ordering {
    match (key.value_of(left), key.value_of(right)) {
        (ClusterFieldValue::Number(left), ClusterFieldValue::Number(right)) => {
            left.partial_cmp(&right).unwrap_or(Ordering::Equal)
        }
        (ClusterFieldValue::Text(left), ClusterFieldValue::Text(right)) => {
            locale_compare(&left, &right)
        }
        _ => Ordering::Equal,
    }
}

pub fn cluster_matches_filter(record: &ClusterRecord, filter_text: &str) -> bool {
    if filter_text.is_empty() {
        return true;
    }
    let needle = filter_text.to_lowercase();
    record.id.to_lowercase().contains(&needle)
        || record.annotation.as_str().to_lowercase().contains(&needle)
}

pub fn filter_clusters<'a>(records: &'a [ClusterRecord], filter_text: &str) -> Vec<&'a ClusterRecord> {
    records
        .iter()
        .filter(|record| cluster_matches_filter(record, filter_text))
        .collect()
}

/// Stable sort; ties keep their relative input order in both directions.
pub fn sort_clusters(rows: &mut [&ClusterRecord], spec: SortSpec) {
    rows.sort_by(|left, right| {
        let ordering = compare_cluster_records(left, right, spec.key);
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Filtered and sorted table rows.
pub fn cluster_table_view<'a>(
    records: &'a [ClusterRecord],
    filter_text: &str,
    spec: SortSpec,
) -> Vec<&'a ClusterRecord> {
    let mut rows = filter_clusters(records, filter_text);
    sort_clusters(&mut rows, spec);
    rows
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Filter text and sort spec of the cluster table.
pub struct ClusterTableState {
    pub filter_text: String,
    pub sort: SortSpec,
}

impl ClusterTableState {
    pub fn set_filter_text(&mut self, filter_text: impl Into<String>) {
        self.filter_text = filter_text.into();
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    pub fn toggle_sort(&mut self, key: ClusterField) -> SortSpec {
        self.sort = self.sort.toggled(key);
        self.sort
    }

    /// Toggles by column key; unknown keys leave the state untouched.
    pub fn toggle_sort_by_key(&mut self, raw_key: &str) -> Result<SortSpec, DashboardError> {
        let key = ClusterField::parse(raw_key)?;
        Ok(self.toggle_sort(key))
    }

    pub fn view<'a>(&self, records: &'a [ClusterRecord]) -> Vec<&'a ClusterRecord> {
        cluster_table_view(records, &self.filter_text, self.sort)
    }
}
