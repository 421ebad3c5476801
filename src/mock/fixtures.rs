/// Seeded random fixtures for every dashboard resource
///
/// The first records of each collection cycle through the enum values so every
/// status exists regardless of seed; the rest are random.
use crate::domain::*;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const NAME_PREFIXES: &[&str] = &[
    "Green Harbor",
    "Sunrise",
    "Jade River",
    "Northern Plains",
    "Pacific Bloom",
    "Golden Field",
    "Blue Ridge",
    "Silver Leaf",
    "Evergreen",
    "Red Maple",
];
const NAME_NOUNS: &[&str] = &["Nursery", "Horticulture", "Seeds", "Agritech", "Trading", "Plantation"];
const NAME_SUFFIXES: &[&str] = &["Co., Ltd.", "Group", "Inc."];

const CONTACTS: &[&str] = &[
    "Chen Wei", "Maria Lopez", "Ahmed Karim", "Lin Hua", "Sofia Rossi", "Kenji Sato", "Priya Nair",
    "Tom Becker",
];
const STREETS: &[&str] = &["Dock Road", "Harbor Avenue", "Garden Street", "Orchard Lane", "Port Boulevard"];

const PRODUCTS: &[&str] = &[
    "Phalaenopsis orchid",
    "Tulip bulbs",
    "Olive saplings",
    "Blueberry seedlings",
    "Rose cuttings",
    "Date palm offshoots",
    "Citrus rootstock",
    "Lily bulbs",
    "Grape vine cuttings",
    "Avocado seedlings",
];
const COUNTRIES: &[&str] = &[
    "Netherlands", "Thailand", "Spain", "Chile", "Israel", "New Zealand", "Japan", "Ecuador",
];
const UNITS: &[&str] = &["plants", "bulbs", "kg", "cuttings"];

const SITES: &[&str] = &[
    "Isolation Site A / Greenhouse 1",
    "Isolation Site A / Greenhouse 2",
    "Isolation Site B / Net House 1",
    "Isolation Site C / Field Plot 3",
];
const INSPECTION_NOTES: &[&str] = &[
    "No symptoms observed",
    "Leaf spotting on lower canopy, sampled",
    "Growth normal, next check in 14 days",
    "Suspected aphid presence, traps placed",
];

const INSPECTORS: &[(&str, &str)] = &[
    ("Zhang Min", "Plant Quarantine Division"),
    ("Olivia Grant", "Plant Quarantine Division"),
    ("Rahul Mehta", "Port Inspection Office"),
    ("Hannah Weber", "Port Inspection Office"),
    ("Diego Castro", "Isolation Management"),
];
const TASK_KINDS: &[&str] = &["Arrival inspection", "Isolation check", "Sampling", "Release review"];

const TEST_ITEMS: &[&str] = &[
    "Nematode screening",
    "Viral PCR panel",
    "Fungal culture",
    "Bacterial wilt assay",
    "Pest identification",
];
const LABORATORIES: &[(&str, bool)] = &[
    ("Central Plant Health Laboratory", true),
    ("Port Quarantine Lab", true),
    ("Regional Agricultural Testing Center", false),
];

/// First day of the fixture timeline
fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn pick<'a, T>(rng: &mut StdRng, values: &'a [T]) -> &'a T {
    // Every pool above is non-empty
    &values[rng.gen_range(0..values.len())]
}

/// Cycle through `all` for the first records, random afterwards
fn cycled<T: Copy>(rng: &mut StdRng, all: &[T], index: usize) -> T {
    if index < all.len() {
        all[index]
    } else {
        *pick(rng, all)
    }
}

fn day_offset(rng: &mut StdRng, max_days: i64) -> NaiveDate {
    epoch() + Duration::days(rng.gen_range(0..max_days))
}

#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub enterprises: Vec<Enterprise>,
    pub imports: Vec<ImportRecord>,
    pub plants: Vec<IsolationPlant>,
    pub tasks: Vec<QuarantineTask>,
    pub lab_tests: Vec<LabTest>,
}

impl Fixtures {
    /// Generate `count` records per resource; same seed gives the same data
    pub fn generate(seed: u64, count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let enterprises: Vec<Enterprise> = (0..count)
            .map(|i| generate_enterprise(&mut rng, i))
            .collect();
        let imports: Vec<ImportRecord> = (0..count)
            .map(|i| generate_import(&mut rng, i, &enterprises))
            .collect();
        let plants: Vec<IsolationPlant> = (0..count)
            .map(|i| generate_plant(&mut rng, i, &imports))
            .collect();
        let tasks: Vec<QuarantineTask> = (0..count)
            .map(|i| generate_task(&mut rng, i, &imports))
            .collect();
        let lab_tests: Vec<LabTest> = (0..count)
            .map(|i| generate_lab_test(&mut rng, i, &tasks))
            .collect();

        Self {
            enterprises,
            imports,
            plants,
            tasks,
            lab_tests,
        }
    }
}

pub fn enterprise_id(seq: usize) -> String {
    format!("ent-{:04}", seq)
}

pub fn import_id(seq: usize) -> String {
    format!("imp-{:04}", seq)
}

fn generate_enterprise(rng: &mut StdRng, index: usize) -> Enterprise {
    let seq = index + 1;
    let registered_at = day_offset(rng, 540);
    let license_expires_at = if rng.gen_bool(0.8) {
        Some(registered_at + Duration::days(365 * rng.gen_range(1..4)))
    } else {
        None
    };

    Enterprise {
        id: enterprise_id(seq),
        code: format!("ENT-{}-{:04}", 2024 + (seq % 2), seq),
        name: format!(
            "{} {} {}",
            pick(rng, NAME_PREFIXES),
            pick(rng, NAME_NOUNS),
            pick(rng, NAME_SUFFIXES)
        ),
        enterprise_type: cycled(rng, EnterpriseType::ALL, index),
        status: cycled(rng, EnterpriseStatus::ALL, index),
        contact: Contact {
            name: pick(rng, CONTACTS).to_string(),
            phone: format!("+1-555-{:04}", rng.gen_range(0..10000)),
        },
        address: format!("{} {}", rng.gen_range(1..300), pick(rng, STREETS)),
        license_expires_at,
        registered_at,
    }
}

fn generate_import(rng: &mut StdRng, index: usize, enterprises: &[Enterprise]) -> ImportRecord {
    let seq = index + 1;
    let (enterprise_id, enterprise_name) = match enterprises.choose(rng) {
        Some(e) => (e.id.clone(), e.name.clone()),
        None => (String::new(), String::new()),
    };

    ImportRecord {
        id: import_id(seq),
        declaration_no: format!("DEC{:08}", 24_000_000 + seq * 7),
        product_name: pick(rng, PRODUCTS).to_string(),
        enterprise_id,
        enterprise_name,
        origin_country: pick(rng, COUNTRIES).to_string(),
        quantity: rng.gen_range(10..5000),
        unit: pick(rng, UNITS).to_string(),
        risk_level: cycled(rng, RiskLevel::ALL, index),
        status: cycled(rng, ImportStatus::ALL, index),
        declared_at: day_offset(rng, 540),
    }
}

fn generate_plant(rng: &mut StdRng, index: usize, imports: &[ImportRecord]) -> IsolationPlant {
    let seq = index + 1;
    let (import_ref, variety) = match imports.choose(rng) {
        Some(i) => (i.id.clone(), i.product_name.clone()),
        None => (String::new(), pick(rng, PRODUCTS).to_string()),
    };
    let planted_at = day_offset(rng, 500);
    let last_inspection = if rng.gen_bool(0.75) {
        Some(Inspection {
            inspector: pick(rng, INSPECTORS).0.to_string(),
            note: pick(rng, INSPECTION_NOTES).to_string(),
            inspected_at: planted_at + Duration::days(rng.gen_range(3..60)),
        })
    } else {
        None
    };

    IsolationPlant {
        id: format!("plt-{:04}", seq),
        plant_code: format!("ISO-{:05}", 10_000 + seq),
        variety_name: variety,
        import_id: import_ref,
        isolation_site: pick(rng, SITES).to_string(),
        stage: cycled(rng, GrowthStage::ALL, index),
        status: cycled(rng, PlantStatus::ALL, index),
        risk_level: cycled(rng, RiskLevel::ALL, index),
        last_inspection,
        planted_at,
    }
}

fn generate_task(rng: &mut StdRng, index: usize, imports: &[ImportRecord]) -> QuarantineTask {
    let seq = index + 1;
    let (import_ref, product) = match imports.choose(rng) {
        Some(i) => (i.id.clone(), i.product_name.clone()),
        None => (String::new(), pick(rng, PRODUCTS).to_string()),
    };
    let (inspector, department) = *pick(rng, INSPECTORS);
    let created_at = day_offset(rng, 540);

    QuarantineTask {
        id: format!("tsk-{:04}", seq),
        task_no: format!("QT-{:06}", 240_000 + seq),
        title: format!("{} - {}", pick(rng, TASK_KINDS), product),
        import_id: import_ref,
        inspector: Inspector {
            name: inspector.to_string(),
            department: department.to_string(),
        },
        priority: cycled(rng, Priority::ALL, index),
        status: cycled(rng, TaskStatus::ALL, index),
        created_at,
        deadline: created_at + Duration::days(rng.gen_range(3..30)),
    }
}

fn generate_lab_test(rng: &mut StdRng, index: usize, tasks: &[QuarantineTask]) -> LabTest {
    let seq = index + 1;
    let task_id = tasks.choose(rng).map(|t| t.id.clone()).unwrap_or_default();
    let conclusion = cycled(rng, LabConclusion::ALL, index);
    let (laboratory, accredited) = *pick(rng, LABORATORIES);
    let result_value = if conclusion.is_decided() {
        Some((rng.gen_range(0.0..100.0_f64) * 100.0).round() / 100.0)
    } else {
        None
    };

    LabTest {
        id: format!("lab-{:04}", seq),
        sample_no: format!("S{:07}", 3_000_000 + seq),
        sample_name: format!("{} sample", pick(rng, PRODUCTS)),
        task_id,
        test_item: pick(rng, TEST_ITEMS).to_string(),
        laboratory: Laboratory {
            name: laboratory.to_string(),
            accredited,
        },
        conclusion,
        result_value,
        tested_at: day_offset(rng, 540),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_data() {
        let a = Fixtures::generate(42, 20);
        let b = Fixtures::generate(42, 20);
        assert_eq!(a.enterprises, b.enterprises);
        assert_eq!(a.lab_tests, b.lab_tests);
    }

    #[test]
    fn test_every_status_is_present() {
        let fixtures = Fixtures::generate(1, 10);
        let statuses: HashSet<_> = fixtures.enterprises.iter().map(|e| e.status).collect();
        assert_eq!(statuses.len(), EnterpriseStatus::ALL.len());
        let conclusions: HashSet<_> = fixtures.lab_tests.iter().map(|t| t.conclusion).collect();
        assert_eq!(conclusions.len(), LabConclusion::ALL.len());
    }

    #[test]
    fn test_references_point_at_existing_records() {
        let fixtures = Fixtures::generate(3, 25);
        let enterprise_ids: HashSet<_> = fixtures.enterprises.iter().map(|e| e.id.as_str()).collect();
        assert!(fixtures
            .imports
            .iter()
            .all(|i| enterprise_ids.contains(i.enterprise_id.as_str())));
        assert!(fixtures
            .tasks
            .iter()
            .all(|t| t.deadline >= t.created_at));
    }
}
