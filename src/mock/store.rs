/// Thread-safe in-memory record store behind the mock REST backend
use super::fixtures::{enterprise_id, import_id, Fixtures};
use super::{ApiFailure, ListQuery};
use crate::apis::{PageData, QueryParams};
use crate::config::PaginationConfig;
use crate::domain::*;
use crate::errors::ErrorCode;
use chrono::{Local, Utc};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Records the store can list and look up generically
pub trait StoredRecord: ListRecord {
    /// Singular label used in not-found messages
    const LABEL: &'static str;

    fn table(store: &MockStore) -> &RwLock<Vec<Self>>;
}

impl StoredRecord for Enterprise {
    const LABEL: &'static str = "Enterprise";

    fn table(store: &MockStore) -> &RwLock<Vec<Self>> {
        &store.enterprises
    }
}

impl StoredRecord for ImportRecord {
    const LABEL: &'static str = "Import record";

    fn table(store: &MockStore) -> &RwLock<Vec<Self>> {
        &store.imports
    }
}

impl StoredRecord for IsolationPlant {
    const LABEL: &'static str = "Isolation plant";

    fn table(store: &MockStore) -> &RwLock<Vec<Self>> {
        &store.plants
    }
}

impl StoredRecord for QuarantineTask {
    const LABEL: &'static str = "Quarantine task";

    fn table(store: &MockStore) -> &RwLock<Vec<Self>> {
        &store.tasks
    }
}

impl StoredRecord for LabTest {
    const LABEL: &'static str = "Lab test";

    fn table(store: &MockStore) -> &RwLock<Vec<Self>> {
        &store.lab_tests
    }
}

/// Decode a request body, mapping shape and enum errors to `INVALID_PARAMS`
pub fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, ApiFailure> {
    serde_json::from_value(body).map_err(|e| ApiFailure::invalid(format!("Invalid request body: {}", e)))
}

/// Trimmed non-empty string or `MISSING_PARAMS`
fn required_text(value: Option<String>, field: &str) -> Result<String, ApiFailure> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiFailure::missing(field))
}

pub struct MockStore {
    enterprises: RwLock<Vec<Enterprise>>,
    imports: RwLock<Vec<ImportRecord>>,
    plants: RwLock<Vec<IsolationPlant>>,
    tasks: RwLock<Vec<QuarantineTask>>,
    lab_tests: RwLock<Vec<LabTest>>,
    pagination: PaginationConfig,
    next_enterprise: AtomicUsize,
    next_import: AtomicUsize,
}

impl MockStore {
    pub fn new(fixtures: Fixtures, pagination: PaginationConfig) -> Self {
        let next_enterprise = fixtures.enterprises.len() + 1;
        let next_import = fixtures.imports.len() + 1;
        Self {
            enterprises: RwLock::new(fixtures.enterprises),
            imports: RwLock::new(fixtures.imports),
            plants: RwLock::new(fixtures.plants),
            tasks: RwLock::new(fixtures.tasks),
            lab_tests: RwLock::new(fixtures.lab_tests),
            pagination,
            next_enterprise: AtomicUsize::new(next_enterprise),
            next_import: AtomicUsize::new(next_import),
        }
    }

    pub fn seeded(seed: u64, count: usize, pagination: PaginationConfig) -> Self {
        Self::new(Fixtures::generate(seed, count), pagination)
    }

    pub fn list<R: StoredRecord>(&self, params: &QueryParams) -> Result<PageData<R>, ApiFailure> {
        let query = ListQuery::parse::<R>(params, &self.pagination)?;
        let records = R::table(self).read();
        Ok(query.apply(&records))
    }

    pub fn detail<R: StoredRecord>(&self, id: &str) -> Result<R, ApiFailure> {
        R::table(self)
            .read()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| ApiFailure::not_found(R::LABEL, id))
    }

    pub fn len<R: StoredRecord>(&self) -> usize {
        R::table(self).read().len()
    }

    // ------------------------------------------------------------------
    // Enterprises
    // ------------------------------------------------------------------

    /// New enterprises start in `PENDING`; a missing code is generated
    pub fn create_enterprise(&self, draft: EnterpriseDraft) -> Result<Enterprise, ApiFailure> {
        let name = required_text(draft.name, "name")?;
        let enterprise_type = draft.enterprise_type.ok_or_else(|| ApiFailure::missing("type"))?;
        let contact = draft.contact.ok_or_else(|| ApiFailure::missing("contact"))?;
        if contact.name.trim().is_empty() {
            return Err(ApiFailure::missing("contact.name"));
        }

        let mut enterprises = self.enterprises.write();
        let seq = self.next_enterprise.fetch_add(1, Ordering::SeqCst);
        let today = Local::now().date_naive();
        let code = match draft.code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()) {
            Some(code) => code,
            None => format!("ENT-{}-{:04}", today.format("%Y"), seq),
        };
        if enterprises.iter().any(|e| e.code.eq_ignore_ascii_case(&code)) {
            return Err(ApiFailure::business(format!(
                "Enterprise code '{}' is already registered",
                code
            )));
        }

        let enterprise = Enterprise {
            id: enterprise_id(seq),
            code,
            name,
            enterprise_type,
            status: EnterpriseStatus::Pending,
            contact,
            address: draft.address.unwrap_or_default(),
            license_expires_at: None,
            registered_at: today,
        };
        enterprises.push(enterprise.clone());
        Ok(enterprise)
    }

    pub fn update_enterprise(&self, id: &str, update: EnterpriseUpdate) -> Result<Enterprise, ApiFailure> {
        let mut enterprises = self.enterprises.write();
        let enterprise = enterprises
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiFailure::not_found(Enterprise::LABEL, id))?;

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ApiFailure::invalid("name must not be blank"));
            }
            enterprise.name = name;
        }
        if let Some(status) = update.status {
            enterprise.status = status;
        }
        if let Some(contact) = update.contact {
            enterprise.contact = contact;
        }
        if let Some(address) = update.address {
            enterprise.address = address;
        }
        if let Some(expires) = update.license_expires_at {
            enterprise.license_expires_at = Some(expires);
        }
        Ok(enterprise.clone())
    }

    pub fn delete_enterprise(&self, id: &str) -> Result<Enterprise, ApiFailure> {
        let mut enterprises = self.enterprises.write();
        let position = enterprises
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ApiFailure::not_found(Enterprise::LABEL, id))?;
        Ok(enterprises.remove(position))
    }

    // ------------------------------------------------------------------
    // Imports
    // ------------------------------------------------------------------

    /// New declarations start in `DECLARED` and must name an existing enterprise
    pub fn create_import(&self, draft: ImportDraft) -> Result<ImportRecord, ApiFailure> {
        let product_name = required_text(draft.product_name, "productName")?;
        let enterprise_ref = required_text(draft.enterprise_id, "enterpriseId")?;
        let origin_country = required_text(draft.origin_country, "originCountry")?;
        let quantity = draft.quantity.ok_or_else(|| ApiFailure::missing("quantity"))?;
        if quantity == 0 {
            return Err(ApiFailure::invalid("quantity must be greater than zero"));
        }

        let enterprise = self.detail::<Enterprise>(&enterprise_ref)?;
        if enterprise.status != EnterpriseStatus::Active {
            return Err(ApiFailure::business(format!(
                "Enterprise {} is {} and cannot declare imports",
                enterprise.code,
                enterprise.status.label()
            )));
        }

        let seq = self.next_import.fetch_add(1, Ordering::SeqCst);
        let record = ImportRecord {
            id: import_id(seq),
            declaration_no: format!("DEC{:08}", 25_000_000 + seq),
            product_name,
            enterprise_id: enterprise.id,
            enterprise_name: enterprise.name,
            origin_country,
            quantity,
            unit: draft
                .unit
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| "plants".to_string()),
            risk_level: draft.risk_level.unwrap_or(RiskLevel::Low),
            status: ImportStatus::Declared,
            declared_at: Local::now().date_naive(),
        };
        self.imports.write().push(record.clone());
        Ok(record)
    }

    // ------------------------------------------------------------------
    // Quarantine tasks
    // ------------------------------------------------------------------

    /// Completed and cancelled tasks are closed to further changes
    pub fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<QuarantineTask, ApiFailure> {
        let mut tasks = self.tasks.write();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiFailure::not_found(QuarantineTask::LABEL, id))?;

        if task.status.is_final() && task.status != status {
            return Err(ApiFailure::new(
                ErrorCode::BusinessError,
                format!("Task {} is already {}", task.task_no, task.status.label()),
            ));
        }
        task.status = status;
        Ok(task.clone())
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    pub fn summary(&self) -> ReportSummary {
        let enterprises = self.enterprises.read();
        let imports = self.imports.read();
        let plants = self.plants.read();
        let tasks = self.tasks.read();
        let lab_tests = self.lab_tests.read();

        let mut enterprises_by_status = BTreeMap::new();
        for enterprise in enterprises.iter() {
            *enterprises_by_status
                .entry(enterprise.status.as_str().to_string())
                .or_insert(0) += 1;
        }
        let mut imports_by_status = BTreeMap::new();
        for record in imports.iter() {
            *imports_by_status
                .entry(record.status.as_str().to_string())
                .or_insert(0) += 1;
        }

        let decided = lab_tests.iter().filter(|t| t.conclusion.is_decided()).count();
        let qualified = lab_tests
            .iter()
            .filter(|t| t.conclusion == LabConclusion::Qualified)
            .count();
        let lab_pass_rate = if decided == 0 {
            0.0
        } else {
            qualified as f64 / decided as f64
        };

        ReportSummary {
            enterprises_total: enterprises.len(),
            enterprises_by_status,
            imports_total: imports.len(),
            imports_by_status,
            plants_abnormal: plants
                .iter()
                .filter(|p| p.status == PlantStatus::Abnormal)
                .count(),
            open_tasks: tasks.iter().filter(|t| !t.status.is_final()).count(),
            lab_tests_total: lab_tests.len(),
            lab_pass_rate,
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MockStore {
        MockStore::seeded(11, 30, PaginationConfig::default())
    }

    fn draft() -> EnterpriseDraft {
        EnterpriseDraft {
            name: Some("Harborview Seeds Co., Ltd.".to_string()),
            code: None,
            enterprise_type: Some(EnterpriseType::Importer),
            contact: Some(Contact {
                name: "Ana Silva".to_string(),
                phone: "+1-555-0199".to_string(),
            }),
            address: None,
        }
    }

    #[test]
    fn test_detail_unknown_id_is_not_found() {
        let err = store().detail::<Enterprise>("ent-9999").expect_err("unknown");
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }

    #[test]
    fn test_create_enterprise_appends_pending_record() {
        let store = store();
        let created = store.create_enterprise(draft()).expect("create");

        assert_eq!(created.status, EnterpriseStatus::Pending);
        assert_eq!(created.id, "ent-0031");
        assert_eq!(store.len::<Enterprise>(), 31);
        assert_eq!(store.detail::<Enterprise>(&created.id).expect("stored"), created);
    }

    #[test]
    fn test_create_enterprise_requires_fields() {
        let store = store();
        let mut missing_name = draft();
        missing_name.name = Some("   ".to_string());
        assert_eq!(
            store.create_enterprise(missing_name).expect_err("blank name").code,
            ErrorCode::MissingParams
        );

        let mut missing_type = draft();
        missing_type.enterprise_type = None;
        let err = store.create_enterprise(missing_type).expect_err("no type");
        assert_eq!(err.code, ErrorCode::MissingParams);
        assert!(err.message.contains("type"));
    }

    #[test]
    fn test_duplicate_code_is_business_error() {
        let store = store();
        let existing = store.detail::<Enterprise>("ent-0001").expect("fixture");
        let mut duplicate = draft();
        duplicate.code = Some(existing.code.to_lowercase());
        assert_eq!(
            store.create_enterprise(duplicate).expect_err("duplicate").code,
            ErrorCode::BusinessError
        );
    }

    #[test]
    fn test_bad_enum_in_body_is_invalid_params() {
        let err = parse_body::<EnterpriseUpdate>(json!({"status": "CLOSED"})).expect_err("bad status");
        assert_eq!(err.code, ErrorCode::InvalidParams);
    }

    #[test]
    fn test_update_and_delete_enterprise() {
        let store = store();
        let update = EnterpriseUpdate {
            status: Some(EnterpriseStatus::Revoked),
            ..Default::default()
        };
        let updated = store.update_enterprise("ent-0002", update).expect("update");
        assert_eq!(updated.status, EnterpriseStatus::Revoked);

        store.delete_enterprise("ent-0002").expect("delete");
        assert_eq!(
            store.detail::<Enterprise>("ent-0002").expect_err("gone").code,
            ErrorCode::ResourceNotFound
        );
        assert_eq!(
            store.delete_enterprise("ent-0002").expect_err("twice").code,
            ErrorCode::ResourceNotFound
        );
    }

    #[test]
    fn test_import_requires_active_enterprise() {
        let store = store();
        let active = store
            .list::<Enterprise>(&[("status".to_string(), "ACTIVE".to_string())].into_iter().collect())
            .expect("list")
            .items
            .remove(0);
        let suspended = store
            .list::<Enterprise>(&[("status".to_string(), "SUSPENDED".to_string())].into_iter().collect())
            .expect("list")
            .items
            .remove(0);

        let mut import = ImportDraft {
            product_name: Some("Tulip bulbs".to_string()),
            enterprise_id: Some(active.id.clone()),
            origin_country: Some("Netherlands".to_string()),
            quantity: Some(400),
            unit: None,
            risk_level: Some(RiskLevel::High),
        };
        let created = store.create_import(import.clone()).expect("create import");
        assert_eq!(created.status, ImportStatus::Declared);
        assert_eq!(created.enterprise_name, active.name);
        assert_eq!(created.unit, "plants");

        import.enterprise_id = Some(suspended.id);
        assert_eq!(
            store.create_import(import.clone()).expect_err("suspended").code,
            ErrorCode::BusinessError
        );

        import.enterprise_id = Some("ent-4040".to_string());
        assert_eq!(
            store.create_import(import).expect_err("unknown").code,
            ErrorCode::ResourceNotFound
        );
    }

    #[test]
    fn test_final_task_status_is_locked() {
        let store = store();
        // Fixture index 2 cycles to COMPLETED
        let task = store.detail::<QuarantineTask>("tsk-0003").expect("fixture");
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(
            store
                .update_task_status(&task.id, TaskStatus::Processing)
                .expect_err("closed")
                .code,
            ErrorCode::BusinessError
        );

        let updated = store
            .update_task_status("tsk-0001", TaskStatus::Processing)
            .expect("pending task");
        assert_eq!(updated.status, TaskStatus::Processing);
    }

    #[test]
    fn test_summary_counts() {
        let store = store();
        let summary = store.summary();
        assert_eq!(summary.enterprises_total, 30);
        assert_eq!(summary.enterprises_by_status.values().sum::<usize>(), 30);
        assert!(summary.lab_pass_rate >= 0.0 && summary.lab_pass_rate <= 1.0);
        assert!(summary.open_tasks <= 30);
    }
}
