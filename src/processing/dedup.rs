//! Rule de-duplication logic.
//!
//! Collapses identical `(prefix, lower, upper)` triples and filters rules by
//! address family.

use super::expand::subnet_count;
use crate::models::{Family, RangeRule};
use std::collections::BTreeSet;

/// Deduplicated collection of [`RangeRule`]s, iterated in sorted order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RuleSet {
    rules: BTreeSet<RangeRule>,
}

impl RuleSet {
    pub fn new() -> RuleSet {
        RuleSet::default()
    }

    /// Add a rule. Returns false if the same triple was already present.
    pub fn insert(&mut self, rule: RangeRule) -> bool {
        self.rules.insert(rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RangeRule> + '_ {
        self.rules.iter()
    }

    /// Total number of subnets the rules expand to, `None` on overflow.
    pub fn subnet_count(&self) -> Option<u128> {
        self.rules.iter().try_fold(0u128, |total, rule| {
            total.checked_add(subnet_count(rule.prefix(), rule.lower(), rule.upper())?)
        })
    }
}

impl FromIterator<RangeRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = RangeRule>>(iter: I) -> Self {
        RuleSet {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RangeRule;
    type IntoIter = std::collections::btree_set::Iter<'a, RangeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// De-duplicate rules, optionally keeping a single address family.
///
/// # Arguments
/// * `rules` - The resolved rules, duplicates allowed
/// * `family` - Optional address family to keep
///
/// # Returns
/// * `RuleSet` - one entry per distinct triple
pub fn de_duplicate_rules(rules: Vec<RangeRule>, family: Option<Family>) -> RuleSet {
    let total = rules.len();
    let mut set = RuleSet::new();
    let mut skipped = 0;

    for rule in rules {
        if family.is_some_and(|f| f != rule.prefix().family()) {
            skipped += 1;
            continue;
        }
        if !set.insert(rule) {
            log::debug!("Duplicate rule absorbed: {rule}");
        }
    }

    if skipped > 0 {
        log::warn!(
            "Skipped {skipped} rule(s) not in address family {}",
            family.map(|f| f.to_string()).unwrap_or_default()
        );
    }
    log::info!(
        "De-duplicated {total} rule(s) into {} distinct rule(s)",
        set.len()
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::read_rule_file;
    use crate::processing::expand_rule;
    use itertools::Itertools;

    fn rules(lines: &[&str]) -> Vec<RangeRule> {
        lines.iter().map(|l| l.parse().unwrap()).collect()
    }

    #[test]
    fn test_de_duplicate_identical_rules() {
        let input = rules(&["10.0.0.0/8,8,9", "10.0.0.0/8,8,9", "10.0.0.0/8,8,10"]);
        assert_eq!(input.iter().unique().count(), 2);
        let set = de_duplicate_rules(input, None);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().unique().count(), set.len());

        let mut set = set;
        assert!(!set.insert("10.0.0.0/8,8,9".parse().unwrap()));
        assert!(set.insert("10.0.0.0/8,9,9".parse().unwrap()));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_de_duplicate_sorted_order() {
        let set = de_duplicate_rules(
            rules(&["2001:db8::/32,32,32", "192.0.2.0/24,24,24", "10.0.0.0/8,8,9"]),
            None,
        );
        let order: Vec<String> = set.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            order,
            vec!["10.0.0.0/8,8,9", "192.0.2.0/24,24,24", "2001:db8::/32,32,32"]
        );
    }

    #[test]
    fn test_de_duplicate_family_filter() {
        let input = rules(&["2001:db8::/32,32,32", "10.0.0.0/8,8,9"]);
        let v6 = de_duplicate_rules(input.clone(), Some(Family::V6));
        assert_eq!(v6.len(), 1);
        assert!(v6.iter().all(|r| r.prefix().family() == Family::V6));
        let v4 = de_duplicate_rules(input, Some(Family::V4));
        assert_eq!(v4.iter().next().unwrap().to_string(), "10.0.0.0/8,8,9");
    }

    #[test]
    fn test_rule_set_subnets() {
        let set: RuleSet = rules(&["10.0.0.0/8,9,9", "192.0.2.0/24,24,24"])
            .into_iter()
            .collect();
        assert_eq!(set.subnet_count(), Some(3));
        let out: Vec<String> = set
            .iter()
            .flat_map(expand_rule)
            .map(|p| p.to_string())
            .collect();
        assert_eq!(out, vec!["10.0.0.0/9", "10.128.0.0/9", "192.0.2.0/24"]);
    }

    #[test]
    fn test_rule_set_subnet_count_overflow() {
        let set: RuleSet = rules(&["::/0,0,128"]).into_iter().collect();
        assert_eq!(set.subnet_count(), None);
    }

    #[test]
    fn test_de_duplicate_from_file() {
        let records = read_rule_file("src/tests/test_data/rules_duplicates.json")
            .expect("Error reading rule file");
        assert_eq!(records.len(), 5);
        let resolved: Vec<RangeRule> = records
            .iter()
            .map(|r| r.resolve())
            .collect::<Result<_, _>>()
            .expect("Error resolving rules");
        let set = de_duplicate_rules(resolved, None);
        assert_eq!(set.len(), 3, "Expected 3 rules after de-duplication");
    }
}
