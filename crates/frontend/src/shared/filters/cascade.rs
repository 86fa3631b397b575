//! Dependent filter chains such as warehouse → product → order. The
//! cascade is a strict total order: setting a level clears everything
//! below it, and a level stays disabled until every ancestor has a value.

use contracts::domain::FilterOption;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CascadeLevel {
    /// Filter name as sent to the backend, e.g. `warehouseId`.
    pub name: &'static str,
    pub value: Option<String>,
    pub options: Vec<FilterOption>,
    /// True when `options` is the degraded-mode placeholder set.
    pub degraded: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FilterCascade {
    levels: Vec<CascadeLevel>,
    degraded_fallback: bool,
}

impl FilterCascade {
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            levels: names
                .iter()
                .map(|name| CascadeLevel {
                    name,
                    ..CascadeLevel::default()
                })
                .collect(),
            degraded_fallback: true,
        }
    }

    /// Disable the fallback-to-placeholder behavior (production builds
    /// that would rather show the failure).
    pub fn with_degraded_fallback(mut self, enabled: bool) -> Self {
        self.degraded_fallback = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn name(&self, level: usize) -> Option<&'static str> {
        self.levels.get(level).map(|l| l.name)
    }

    pub fn value(&self, level: usize) -> Option<&str> {
        self.levels.get(level)?.value.as_deref()
    }

    pub fn options(&self, level: usize) -> &[FilterOption] {
        self.levels
            .get(level)
            .map(|l| l.options.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_degraded(&self, level: usize) -> bool {
        self.levels.get(level).map(|l| l.degraded).unwrap_or(false)
    }

    /// A level may only be edited when every ancestor has a value.
    pub fn is_enabled(&self, level: usize) -> bool {
        self.levels[..level.min(self.levels.len())]
            .iter()
            .all(|l| l.value.is_some())
    }

    /// Set (or clear) a level's value. Every deeper level loses both its
    /// value and its cached option list; the caller re-populates the next
    /// level's options when the new value is non-empty.
    pub fn set_value(&mut self, level: usize, value: Option<String>) {
        if level >= self.levels.len() {
            return;
        }
        self.levels[level].value = value.filter(|v| !v.is_empty());
        for deeper in &mut self.levels[level + 1..] {
            deeper.value = None;
            deeper.options.clear();
            deeper.degraded = false;
        }
    }

    pub fn set_options(&mut self, level: usize, options: Vec<FilterOption>) {
        if let Some(l) = self.levels.get_mut(level) {
            l.options = options;
            l.degraded = false;
        }
    }

    /// Install the placeholder option set after a failed option load.
    /// Returns false when degraded mode is disabled (the level then keeps
    /// an empty list and the failure surfaces to the caller).
    pub fn apply_degraded_options(&mut self, level: usize) -> bool {
        if !self.degraded_fallback {
            return false;
        }
        if let Some(l) = self.levels.get_mut(level) {
            l.options = placeholder_options(l.name);
            l.degraded = true;
            return true;
        }
        false
    }

    /// (name, value) pairs of every set level, for the list query.
    pub fn active_values(&self) -> Vec<(&'static str, String)> {
        self.levels
            .iter()
            .filter_map(|l| l.value.clone().map(|v| (l.name, v)))
            .collect()
    }
}

/// Clearly-marked synthetic options keeping the screen usable while the
/// dependent endpoint is down.
pub fn placeholder_options(name: &str) -> Vec<FilterOption> {
    (1..=3)
        .map(|i| FilterOption {
            id: format!("sample-{}", i),
            label: format!("Sample {} {}", name, i),
            placeholder: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cascade() -> FilterCascade {
        FilterCascade::new(&["warehouseId", "productId", "orderId"])
    }

    fn options(ids: &[&str]) -> Vec<FilterOption> {
        ids.iter().map(|id| FilterOption::new(*id, *id)).collect()
    }

    #[test]
    fn test_setting_a_level_clears_everything_below() {
        let mut c = cascade();
        c.set_value(0, Some("w1".to_string()));
        c.set_options(1, options(&["p1", "p2"]));
        c.set_value(1, Some("p1".to_string()));
        c.set_options(2, options(&["o1"]));
        c.set_value(2, Some("o1".to_string()));

        c.set_value(0, Some("w2".to_string()));
        assert_eq!(c.value(0), Some("w2"));
        assert_eq!(c.value(1), None);
        assert_eq!(c.value(2), None);
        assert!(c.options(1).is_empty());
        assert!(c.options(2).is_empty());
    }

    #[test]
    fn test_descendants_disabled_until_ancestors_set() {
        let mut c = cascade();
        assert!(c.is_enabled(0));
        assert!(!c.is_enabled(1));
        assert!(!c.is_enabled(2));

        c.set_value(0, Some("w1".to_string()));
        assert!(c.is_enabled(1));
        assert!(!c.is_enabled(2));

        c.set_value(1, Some("p1".to_string()));
        assert!(c.is_enabled(2));
    }

    #[test]
    fn test_clearing_a_value_disables_descendants() {
        let mut c = cascade();
        c.set_value(0, Some("w1".to_string()));
        c.set_value(1, Some("p1".to_string()));
        c.set_value(0, None);
        assert!(!c.is_enabled(1));
        assert_eq!(c.value(1), None);
    }

    #[test]
    fn test_degraded_fallback_is_marked_and_configurable() {
        let mut c = cascade();
        assert!(c.apply_degraded_options(1));
        assert!(c.is_degraded(1));
        assert!(c.options(1).iter().all(|o| o.placeholder));

        let mut strict = cascade().with_degraded_fallback(false);
        assert!(!strict.apply_degraded_options(1));
        assert!(strict.options(1).is_empty());
    }

    #[test]
    fn test_active_values_skip_unset_levels() {
        let mut c = cascade();
        c.set_value(0, Some("w1".to_string()));
        assert_eq!(c.active_values(), vec![("warehouseId", "w1".to_string())]);
    }
}
