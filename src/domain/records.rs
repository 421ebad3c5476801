/// Dashboard records and the list-filtering contract they share
use super::enums::*;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A filterable query parameter and the values it accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub param: &'static str,
    pub values: &'static [&'static str],
}

/// Records served by a list endpoint
///
/// Keyword search looks at `name` and `code`; date bounds apply to
/// `timeline_date`.
pub trait ListRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Path segment under `/api`
    const RESOURCE: &'static str;
    const FILTERS: &'static [FilterSpec];

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn code(&self) -> &str;
    fn filter_value(&self, param: &str) -> Option<&'static str>;
    fn timeline_date(&self) -> NaiveDate;

    /// Case-insensitive substring match on name or code
    fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.name().to_lowercase().contains(&needle) || self.code().to_lowercase().contains(&needle)
    }
}

// ============================================================================
// ENTERPRISES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enterprise {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub enterprise_type: EnterpriseType,
    pub status: EnterpriseStatus,
    pub contact: Contact,
    pub address: String,
    pub license_expires_at: Option<NaiveDate>,
    pub registered_at: NaiveDate,
}

impl ListRecord for Enterprise {
    const RESOURCE: &'static str = "enterprises";
    const FILTERS: &'static [FilterSpec] = &[
        FilterSpec {
            param: "status",
            values: EnterpriseStatus::VALUES,
        },
        FilterSpec {
            param: "type",
            values: EnterpriseType::VALUES,
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn filter_value(&self, param: &str) -> Option<&'static str> {
        match param {
            "status" => Some(self.status.as_str()),
            "type" => Some(self.enterprise_type.as_str()),
            _ => None,
        }
    }

    fn timeline_date(&self) -> NaiveDate {
        self.registered_at
    }
}

/// Body of `POST /api/enterprises`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseDraft {
    pub name: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub enterprise_type: Option<EnterpriseType>,
    pub contact: Option<Contact>,
    pub address: Option<String>,
}

/// Body of `PUT /api/enterprises/:id`; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseUpdate {
    pub name: Option<String>,
    pub status: Option<EnterpriseStatus>,
    pub contact: Option<Contact>,
    pub address: Option<String>,
    pub license_expires_at: Option<NaiveDate>,
}

// ============================================================================
// IMPORTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub id: String,
    pub declaration_no: String,
    pub product_name: String,
    pub enterprise_id: String,
    pub enterprise_name: String,
    pub origin_country: String,
    pub quantity: u32,
    pub unit: String,
    #[serde(rename = "level")]
    pub risk_level: RiskLevel,
    pub status: ImportStatus,
    pub declared_at: NaiveDate,
}

impl ListRecord for ImportRecord {
    const RESOURCE: &'static str = "imports";
    const FILTERS: &'static [FilterSpec] = &[
        FilterSpec {
            param: "status",
            values: ImportStatus::VALUES,
        },
        FilterSpec {
            param: "level",
            values: RiskLevel::VALUES,
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.product_name
    }

    fn code(&self) -> &str {
        &self.declaration_no
    }

    fn filter_value(&self, param: &str) -> Option<&'static str> {
        match param {
            "status" => Some(self.status.as_str()),
            "level" => Some(self.risk_level.as_str()),
            _ => None,
        }
    }

    fn timeline_date(&self) -> NaiveDate {
        self.declared_at
    }
}

/// Body of `POST /api/imports`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDraft {
    pub product_name: Option<String>,
    pub enterprise_id: Option<String>,
    pub origin_country: Option<String>,
    pub quantity: Option<u32>,
    pub unit: Option<String>,
    #[serde(rename = "level")]
    pub risk_level: Option<RiskLevel>,
}

// ============================================================================
// ISOLATION PLANTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub inspector: String,
    pub note: String,
    pub inspected_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsolationPlant {
    pub id: String,
    pub plant_code: String,
    pub variety_name: String,
    pub import_id: String,
    pub isolation_site: String,
    pub stage: GrowthStage,
    pub status: PlantStatus,
    #[serde(rename = "level")]
    pub risk_level: RiskLevel,
    pub last_inspection: Option<Inspection>,
    pub planted_at: NaiveDate,
}

impl ListRecord for IsolationPlant {
    const RESOURCE: &'static str = "plants";
    const FILTERS: &'static [FilterSpec] = &[
        FilterSpec {
            param: "status",
            values: PlantStatus::VALUES,
        },
        FilterSpec {
            param: "level",
            values: RiskLevel::VALUES,
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.variety_name
    }

    fn code(&self) -> &str {
        &self.plant_code
    }

    fn filter_value(&self, param: &str) -> Option<&'static str> {
        match param {
            "status" => Some(self.status.as_str()),
            "level" => Some(self.risk_level.as_str()),
            _ => None,
        }
    }

    fn timeline_date(&self) -> NaiveDate {
        self.planted_at
    }
}

// ============================================================================
// QUARANTINE TASKS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspector {
    pub name: String,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarantineTask {
    pub id: String,
    pub task_no: String,
    pub title: String,
    pub import_id: String,
    pub inspector: Inspector,
    pub priority: Priority,
    pub status: TaskStatus,
    pub created_at: NaiveDate,
    pub deadline: NaiveDate,
}

impl ListRecord for QuarantineTask {
    const RESOURCE: &'static str = "quarantine/tasks";
    const FILTERS: &'static [FilterSpec] = &[
        FilterSpec {
            param: "status",
            values: TaskStatus::VALUES,
        },
        FilterSpec {
            param: "priority",
            values: Priority::VALUES,
        },
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn code(&self) -> &str {
        &self.task_no
    }

    fn filter_value(&self, param: &str) -> Option<&'static str> {
        match param {
            "status" => Some(self.status.as_str()),
            "priority" => Some(self.priority.as_str()),
            _ => None,
        }
    }

    fn timeline_date(&self) -> NaiveDate {
        self.created_at
    }
}

/// Body of `PATCH /api/quarantine/tasks/:id/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusUpdate {
    pub status: TaskStatus,
}

// ============================================================================
// LAB TESTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Laboratory {
    pub name: String,
    pub accredited: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTest {
    pub id: String,
    pub sample_no: String,
    pub sample_name: String,
    pub task_id: String,
    pub test_item: String,
    pub laboratory: Laboratory,
    pub conclusion: LabConclusion,
    pub result_value: Option<f64>,
    pub tested_at: NaiveDate,
}

impl ListRecord for LabTest {
    const RESOURCE: &'static str = "lab/tests";
    const FILTERS: &'static [FilterSpec] = &[FilterSpec {
        param: "conclusion",
        values: LabConclusion::VALUES,
    }];

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.sample_name
    }

    fn code(&self) -> &str {
        &self.sample_no
    }

    fn filter_value(&self, param: &str) -> Option<&'static str> {
        match param {
            "conclusion" => Some(self.conclusion.as_str()),
            _ => None,
        }
    }

    fn timeline_date(&self) -> NaiveDate {
        self.tested_at
    }
}

// ============================================================================
// REPORTS
// ============================================================================

/// `data` of `GET /api/reports/summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub enterprises_total: usize,
    pub enterprises_by_status: BTreeMap<String, usize>,
    pub imports_total: usize,
    pub imports_by_status: BTreeMap<String, usize>,
    pub plants_abnormal: usize,
    pub open_tasks: usize,
    pub lab_tests_total: usize,
    /// Qualified share of decided lab tests, 0.0 when none are decided
    pub lab_pass_rate: f64,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn enterprise() -> Enterprise {
        Enterprise {
            id: "1".to_string(),
            code: "ENT-2024-0001".to_string(),
            name: "Green Harbor Nursery".to_string(),
            enterprise_type: EnterpriseType::Nursery,
            status: EnterpriseStatus::Suspended,
            contact: Contact {
                name: "Lin".to_string(),
                phone: "555-0101".to_string(),
            },
            address: "12 Dock Road".to_string(),
            license_expires_at: None,
            registered_at: NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date"),
        }
    }

    #[test]
    fn test_keyword_matches_name_or_code_case_insensitively() {
        let record = enterprise();
        assert!(record.matches_keyword("HARBOR"));
        assert!(record.matches_keyword("ent-2024"));
        assert!(!record.matches_keyword("orchard"));
    }

    #[test]
    fn test_filter_params_match_wire_fields() {
        let record = enterprise();
        let value = serde_json::to_value(&record).expect("serialize");

        for spec in Enterprise::FILTERS {
            assert_eq!(
                value[spec.param],
                json!(record.filter_value(spec.param).expect("declared filter"))
            );
        }
        assert_eq!(value["registeredAt"], json!("2024-02-01"));
        assert_eq!(value["licenseExpiresAt"], json!(null));
    }

    #[test]
    fn test_draft_rejects_unknown_type() {
        let draft = serde_json::from_value::<EnterpriseDraft>(json!({"name": "X", "type": "BANK"}));
        assert!(draft.is_err());

        let draft: EnterpriseDraft =
            serde_json::from_value(json!({"name": "X", "type": "farm"})).expect("known type");
        assert_eq!(draft.enterprise_type, Some(EnterpriseType::Farm));
        assert_eq!(draft.code, None);
    }
}
