//! Subscription filters

use super::component::ComponentId;
use super::error::{LoggerError, Result};
use super::severity::Severity;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Predicate over `(severity, component)` deciding whether a subscription
/// receives an entry.
///
/// # Example
///
/// ```
/// use callback_logger::{ComponentId, Filter, Severity};
///
/// let net = ComponentId::named("Subsystem", 1);
/// let filter = Filter::from_map([(net.clone(), Severity::Warning)]);
///
/// assert!(filter.matches(Severity::Error, &net));
/// assert!(!filter.matches(Severity::Info, &net));
/// assert!(!filter.matches(Severity::Fatal, &ComponentId::named("Subsystem", 2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Any component at or above the threshold
    MinSeverity(Severity),
    /// Only listed components, each at or above its own threshold.
    /// An empty map matches every entry.
    ComponentMap(HashMap<ComponentId, Severity>),
}

impl Filter {
    /// Matches every entry
    pub fn all() -> Self {
        Filter::ComponentMap(HashMap::new())
    }

    pub fn min_severity(threshold: Severity) -> Self {
        Filter::MinSeverity(threshold)
    }

    /// One component, every severity
    pub fn component(component: impl Into<ComponentId>) -> Self {
        Self::components([component])
    }

    /// Listed components, every severity
    pub fn components<I, C>(components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ComponentId>,
    {
        Filter::ComponentMap(
            components
                .into_iter()
                .map(|c| (c.into(), Severity::Debug))
                .collect(),
        )
    }

    /// Per-component thresholds
    pub fn from_map<I, C>(thresholds: I) -> Self
    where
        I: IntoIterator<Item = (C, Severity)>,
        C: Into<ComponentId>,
    {
        Filter::ComponentMap(
            thresholds
                .into_iter()
                .map(|(c, severity)| (c.into(), severity))
                .collect(),
        )
    }

    pub fn matches(&self, severity: Severity, component: &ComponentId) -> bool {
        match self {
            Filter::MinSeverity(threshold) => severity >= *threshold,
            Filter::ComponentMap(map) => {
                if map.is_empty() {
                    return true;
                }
                map.get(component)
                    .is_some_and(|threshold| severity >= *threshold)
            }
        }
    }

    /// Registration-time check.
    ///
    /// `MinSeverity(Uninitialized)` is accepted and means "no floor"; explicit
    /// map entries must lie in `Debug..=Fatal`.
    pub fn validate(&self) -> Result<()> {
        match self {
            Filter::MinSeverity(_) => Ok(()),
            Filter::ComponentMap(map) => {
                match map.iter().find(|(_, severity)| !severity.is_valid()) {
                    Some((component, severity)) => Err(LoggerError::invalid_argument(format!(
                        "severity {} for component {} is outside [Debug, Fatal]",
                        severity.rank(),
                        component
                    ))),
                    None => Ok(()),
                }
            }
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::all()
    }
}

impl From<Severity> for Filter {
    fn from(threshold: Severity) -> Self {
        Filter::MinSeverity(threshold)
    }
}

impl From<ComponentId> for Filter {
    fn from(component: ComponentId) -> Self {
        Filter::component(component)
    }
}

impl From<HashSet<ComponentId>> for Filter {
    fn from(components: HashSet<ComponentId>) -> Self {
        Filter::components(components)
    }
}

impl From<BTreeSet<ComponentId>> for Filter {
    fn from(components: BTreeSet<ComponentId>) -> Self {
        Filter::components(components)
    }
}

impl From<HashMap<ComponentId, Severity>> for Filter {
    fn from(thresholds: HashMap<ComponentId, Severity>) -> Self {
        Filter::ComponentMap(thresholds)
    }
}
