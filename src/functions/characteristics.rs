// ABOUTME: Static characteristics carried by every elemental function
// ABOUTME: Defines role, sync, resource and duration classifications and config overlays

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::FunctionEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleInProcess {
    BusinessAction,
    RetryAnalysis,
    SpecialParamValidation,
    BusinessRuleValidation,
    CompleteIncompleteAction,
    Rollback,
    RebuildResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncType {
    #[default]
    Sync,
    Async,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[default]
    Cpu,
    Io,
    Network,
    ExternalApi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationClass {
    #[default]
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCharacteristics {
    pub name: String,
    pub description: String,
    pub role: RoleInProcess,
    #[serde(default)]
    pub sync: SyncType,
    #[serde(default)]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub duration: DurationClass,
}

impl FunctionCharacteristics {
    pub fn new(name: impl Into<String>, description: impl Into<String>, role: RoleInProcess) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            role,
            sync: SyncType::default(),
            resource_type: ResourceType::default(),
            duration: DurationClass::default(),
        }
    }

    /// Function defaults overlaid with whatever the configuration entry sets
    pub fn configured(
        entry: Option<&FunctionEntry>,
        default_name: &str,
        default_description: &str,
    ) -> Self {
        let mut characteristics =
            Self::new(default_name, default_description, RoleInProcess::BusinessAction);

        if let Some(entry) = entry {
            if let Some(ref name) = entry.name {
                characteristics.name = name.clone();
            }
            if let Some(ref description) = entry.description {
                characteristics.description = description.clone();
            }
            if let Some(role) = entry.role {
                characteristics.role = role;
            }
            if let Some(sync) = entry.sync {
                characteristics.sync = sync;
            }
            if let Some(resource_type) = entry.resource_type {
                characteristics.resource_type = resource_type;
            }
            if let Some(duration) = entry.duration {
                characteristics.duration = duration;
            }
        }

        characteristics
    }
}

macro_rules! string_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    other => Err(format!(
                        "'{}' is not a valid {}",
                        other,
                        stringify!($ty)
                    )),
                }
            }
        }
    };
}

string_enum!(RoleInProcess {
    BusinessAction => "business_action",
    RetryAnalysis => "retry_analysis",
    SpecialParamValidation => "special_param_validation",
    BusinessRuleValidation => "business_rule_validation",
    CompleteIncompleteAction => "complete_incomplete_action",
    Rollback => "rollback",
    RebuildResponse => "rebuild_response",
});

string_enum!(SyncType {
    Sync => "sync",
    Async => "async",
});

string_enum!(ResourceType {
    Cpu => "cpu",
    Io => "io",
    Network => "network",
    ExternalApi => "external_api",
});

string_enum!(DurationClass {
    Short => "short",
    Medium => "medium",
    Long => "long",
});
