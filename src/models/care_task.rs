use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CareCategory {
    BodyCare,
    LifeSupport,
}

/// Care task ticked on a visit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CareTask {
    Toilet,
    Diaper,
    Meal,
    Bath,
    Oral,
    Medicine,
    Transfer,
    Outing,
    Dressing,
    JointCleaning,
    Cleaning,
    Laundry,
    Clothes,
    Sheets,
    BathPrep,
    LifeOther,
}

impl CareTask {
    pub const ALL: [CareTask; 16] = [
        CareTask::Toilet,
        CareTask::Diaper,
        CareTask::Meal,
        CareTask::Bath,
        CareTask::Oral,
        CareTask::Medicine,
        CareTask::Transfer,
        CareTask::Outing,
        CareTask::Dressing,
        CareTask::JointCleaning,
        CareTask::Cleaning,
        CareTask::Laundry,
        CareTask::Clothes,
        CareTask::Sheets,
        CareTask::BathPrep,
        CareTask::LifeOther,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CareTask::Toilet => "toilet",
            CareTask::Diaper => "diaper",
            CareTask::Meal => "meal",
            CareTask::Bath => "bath",
            CareTask::Oral => "oral",
            CareTask::Medicine => "medicine",
            CareTask::Transfer => "transfer",
            CareTask::Outing => "outing",
            CareTask::Dressing => "dressing",
            CareTask::JointCleaning => "joint-cleaning",
            CareTask::Cleaning => "cleaning",
            CareTask::Laundry => "laundry",
            CareTask::Clothes => "clothes",
            CareTask::Sheets => "sheets",
            CareTask::BathPrep => "bath-prep",
            CareTask::LifeOther => "life-other",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            CareTask::Toilet => "Toileting",
            CareTask::Diaper => "Diaper change",
            CareTask::Meal => "Meal assistance",
            CareTask::Bath => "Bathing / wipe-down",
            CareTask::Oral => "Oral care",
            CareTask::Medicine => "Medication",
            CareTask::Transfer => "Transfer / mobility",
            CareTask::Outing => "Outing",
            CareTask::Dressing => "Dressing",
            CareTask::JointCleaning => "Joint cleaning",
            CareTask::Cleaning => "Cleaning",
            CareTask::Laundry => "Laundry",
            CareTask::Clothes => "Clothes tidying",
            CareTask::Sheets => "Sheet change",
            CareTask::BathPrep => "Bath preparation",
            CareTask::LifeOther => "Other",
        }
    }

    pub fn category(&self) -> CareCategory {
        match self {
            CareTask::Cleaning
            | CareTask::Laundry
            | CareTask::Clothes
            | CareTask::Sheets
            | CareTask::BathPrep
            | CareTask::LifeOther => CareCategory::LifeSupport,
            _ => CareCategory::BodyCare,
        }
    }

    /// Settings key that overrides the printed label.
    pub fn label_key(&self) -> String {
        format!("label.{}", self.code())
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let c = code.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|t| t.code() == c)
    }
}

/// Set of care tasks, stored as a comma separated list of codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CareTasks(pub BTreeSet<CareTask>);

impl CareTasks {
    /// Parse a user supplied list such as `meal,toilet`.
    pub fn parse_list(input: &str) -> AppResult<Self> {
        let mut set = BTreeSet::new();
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let task = CareTask::from_code(part)
                .ok_or_else(|| AppError::InvalidCareTask(part.to_string()))?;
            set.insert(task);
        }
        Ok(Self(set))
    }

    /// Lenient reader for the DB column: unknown codes are dropped.
    pub fn from_db_str(s: &str) -> Self {
        Self(s.split(',').filter_map(CareTask::from_code).collect())
    }

    pub fn to_db_str(&self) -> String {
        self.0
            .iter()
            .map(|t| t.code())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn has_category(&self, category: CareCategory) -> bool {
        self.0.iter().any(|t| t.category() == category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Labels joined with `/`, honouring `label.<code>` overrides.
    pub fn describe(&self, overrides: &HashMap<String, String>) -> String {
        self.join_labels(|_| true, overrides)
    }

    /// Same as [`describe`](Self::describe), restricted to one category.
    pub fn describe_category(
        &self,
        category: CareCategory,
        overrides: &HashMap<String, String>,
    ) -> String {
        self.join_labels(|t| t.category() == category, overrides)
    }

    fn join_labels(
        &self,
        keep: impl Fn(&CareTask) -> bool,
        overrides: &HashMap<String, String>,
    ) -> String {
        self.0
            .iter()
            .filter(|&t| keep(t))
            .map(|t| {
                overrides
                    .get(&t.label_key())
                    .map(String::as_str)
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or(t.default_label())
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}
