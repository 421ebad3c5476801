//! Closed enumerations for status, level, priority and conclusion values
//!
//! Wire form is the SCREAMING_SNAKE value; `label()` is the display text.
//! Parsing is case-insensitive.

/// Define a closed enum with wire values and display labels
#[macro_export]
macro_rules! domain_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($wire:literal, $label:literal)),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($variant),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
            pub const VALUES: &'static [&'static str] = &[$($wire),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),*
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),*
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| format!("Unknown {} '{}'", stringify!($name), s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

domain_enum! {
    /// Registration state of an enterprise
    pub enum EnterpriseStatus {
        Active => ("ACTIVE", "Active"),
        Suspended => ("SUSPENDED", "Suspended"),
        Revoked => ("REVOKED", "Revoked"),
        Pending => ("PENDING", "Pending review"),
    }
}

domain_enum! {
    pub enum EnterpriseType {
        Importer => ("IMPORTER", "Importer"),
        Nursery => ("NURSERY", "Nursery"),
        Farm => ("FARM", "Farm"),
        Agent => ("AGENT", "Customs agent"),
    }
}

domain_enum! {
    /// Progress of an import declaration
    pub enum ImportStatus {
        Declared => ("DECLARED", "Declared"),
        Inspecting => ("INSPECTING", "Inspecting"),
        Isolating => ("ISOLATING", "In isolation"),
        Released => ("RELEASED", "Released"),
        Destroyed => ("DESTROYED", "Destroyed"),
        Returned => ("RETURNED", "Returned"),
    }
}

domain_enum! {
    pub enum RiskLevel {
        Low => ("LOW", "Low"),
        Medium => ("MEDIUM", "Medium"),
        High => ("HIGH", "High"),
    }
}

domain_enum! {
    /// Quarantine processing task state
    pub enum TaskStatus {
        Pending => ("PENDING", "Pending"),
        Processing => ("PROCESSING", "Processing"),
        Completed => ("COMPLETED", "Completed"),
        Cancelled => ("CANCELLED", "Cancelled"),
    }
}

domain_enum! {
    pub enum Priority {
        Low => ("LOW", "Low"),
        Normal => ("NORMAL", "Normal"),
        Urgent => ("URGENT", "Urgent"),
    }
}

domain_enum! {
    /// Cultivation stage of an isolation plant
    pub enum GrowthStage {
        Seedling => ("SEEDLING", "Seedling"),
        Vegetative => ("VEGETATIVE", "Vegetative"),
        Flowering => ("FLOWERING", "Flowering"),
        Fruiting => ("FRUITING", "Fruiting"),
        Dormant => ("DORMANT", "Dormant"),
    }
}

domain_enum! {
    /// Observation state of an isolation plant
    pub enum PlantStatus {
        Growing => ("GROWING", "Growing"),
        Observing => ("OBSERVING", "Under observation"),
        Abnormal => ("ABNORMAL", "Abnormal"),
        Released => ("RELEASED", "Released"),
        Destroyed => ("DESTROYED", "Destroyed"),
    }
}

domain_enum! {
    pub enum LabConclusion {
        Qualified => ("QUALIFIED", "Qualified"),
        Unqualified => ("UNQUALIFIED", "Unqualified"),
        Pending => ("PENDING", "Pending"),
    }
}

impl TaskStatus {
    /// Completed and cancelled tasks accept no further transitions
    pub fn is_final(&self) -> bool {
        match self {
            TaskStatus::Pending | TaskStatus::Processing => false,
            TaskStatus::Completed | TaskStatus::Cancelled => true,
        }
    }
}

impl LabConclusion {
    pub fn is_decided(&self) -> bool {
        match self {
            LabConclusion::Qualified | LabConclusion::Unqualified => true,
            LabConclusion::Pending => false,
        }
    }
}
