//! Range expansion into concrete subnets.
//!
//! [`expand`] walks every length in a rule's range and, for each length,
//! every subnet of the covering prefix in ascending address order.

use crate::models::{low_bits, Prefix, RangeRule};
use std::iter::FusedIterator;
use std::ops::RangeInclusive;

/// Iterator over the subnets of a prefix at one target length.
#[derive(Debug, Clone)]
pub struct Subnets {
    base: Prefix,
    length: u8,
    next_index: u128,
    max_index: u128,
    done: bool,
}

/// Iterator over the subnets of `base` having prefix length `length`.
///
/// Yields nothing when `length` is shorter than `base` or longer than the
/// family allows.
pub fn subnets(base: Prefix, length: u8) -> Subnets {
    let valid = base.length() <= length && length <= base.max_length();
    let max_index = if valid {
        low_bits(length - base.length())
    } else {
        0
    };
    Subnets {
        base,
        length,
        next_index: 0,
        max_index,
        done: !valid,
    }
}

impl Subnets {
    fn remaining(&self) -> Option<u128> {
        if self.done {
            Some(0)
        } else {
            (self.max_index - self.next_index).checked_add(1)
        }
    }
}

impl Iterator for Subnets {
    type Item = Prefix;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let host_len = self.base.max_length() - self.length;
        // host_len is 128 only for ::/0 at length 0, where the index is 0.
        let offset = self.next_index.checked_shl(host_len as u32).unwrap_or(0);
        let subnet = Prefix::from_parts(
            self.base.family(),
            self.base.bits() | offset,
            self.length,
        );
        if self.next_index == self.max_index {
            self.done = true;
        } else {
            self.next_index += 1;
        }
        Some(subnet)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining().map(usize::try_from) {
            Some(Ok(n)) => (n, Some(n)),
            _ => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Subnets {}

/// Lazy iterator over all subnets of a prefix across a range of lengths.
#[derive(Debug, Clone)]
pub struct Expand {
    base: Prefix,
    lengths: RangeInclusive<u8>,
    current: Option<Subnets>,
}

/// Expand `prefix` into its subnets for every length in `lower..=upper`.
///
/// Lengths are visited in ascending order. When the bounds violate
/// `prefix.length <= lower <= upper <= max_length` nothing is yielded.
///
/// # Examples
/// ```
/// use prefix_expand::models::Prefix;
/// use prefix_expand::processing::expand;
/// let p = Prefix::parse("10.0.0.0/8").unwrap();
/// let subnets: Vec<String> = expand(p, 9, 9).map(|s| s.to_string()).collect();
/// assert_eq!(subnets, vec!["10.0.0.0/9", "10.128.0.0/9"]);
/// ```
pub fn expand(prefix: Prefix, lower: u8, upper: u8) -> Expand {
    let valid = prefix.length() <= lower && lower <= upper && upper <= prefix.max_length();
    #[allow(clippy::reversed_empty_ranges)]
    let lengths = if valid { lower..=upper } else { 1..=0 };
    Expand {
        base: prefix,
        lengths,
        current: None,
    }
}

/// Expand a validated [`RangeRule`].
pub fn expand_rule(rule: &RangeRule) -> Expand {
    expand(*rule.prefix(), rule.lower(), rule.upper())
}

impl Iterator for Expand {
    type Item = Prefix;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(subnet) = current.next() {
                    return Some(subnet);
                }
            }
            let length = self.lengths.next()?;
            self.current = Some(subnets(self.base, length));
        }
    }
}

impl FusedIterator for Expand {}

/// Number of subnets [`expand`] yields for the given bounds.
///
/// Returns `None` when the count does not fit in a `u128`.
pub fn subnet_count(prefix: &Prefix, lower: u8, upper: u8) -> Option<u128> {
    if !(prefix.length() <= lower && lower <= upper && upper <= prefix.max_length()) {
        return Some(0);
    }
    (lower..=upper).try_fold(0u128, |total, k| {
        let at_k = 1u128.checked_shl((k - prefix.length()) as u32)?;
        total.checked_add(at_k)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Family;
    use itertools::Itertools;

    fn prefix(s: &str) -> Prefix {
        Prefix::parse(s).unwrap()
    }

    fn expand_str(p: &str, lower: u8, upper: u8) -> Vec<String> {
        expand(prefix(p), lower, upper)
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_expand_exact_is_identity() {
        for p in ["10.0.0.0/8", "0.0.0.0/0", "192.0.2.1/32", "2001:db8::/32", "::/0", "::1/128"] {
            let base = prefix(p);
            let out: Vec<Prefix> = expand(base, base.length(), base.length()).collect();
            assert_eq!(out, vec![base], "Exact expansion of {p}");
        }
    }

    #[test]
    fn test_expand_v4_one_level() {
        assert_eq!(
            expand_str("10.0.0.0/8", 8, 9),
            vec!["10.0.0.0/8", "10.0.0.0/9", "10.128.0.0/9"]
        );
        assert_eq!(expand_str("10.0.0.0/8", 9, 9), vec!["10.0.0.0/9", "10.128.0.0/9"]);
    }

    #[test]
    fn test_expand_v4_two_levels_order() {
        assert_eq!(
            expand_str("192.0.2.0/24", 25, 26),
            vec![
                "192.0.2.0/25",
                "192.0.2.128/25",
                "192.0.2.0/26",
                "192.0.2.64/26",
                "192.0.2.128/26",
                "192.0.2.192/26",
            ]
        );
    }

    #[test]
    fn test_expand_v4_to_hosts() {
        let out = expand_str("192.0.2.252/30", 32, 32);
        assert_eq!(
            out,
            vec!["192.0.2.252/32", "192.0.2.253/32", "192.0.2.254/32", "192.0.2.255/32"]
        );
        assert_eq!(subnet_count(&prefix("0.0.0.0/0"), 0, 32), Some((1u128 << 33) - 1));
    }

    #[test]
    fn test_expand_v6() {
        assert_eq!(
            expand_str("2001:db8::/32", 33, 33),
            vec!["2001:db8::/33", "2001:db8:8000::/33"]
        );
        assert_eq!(
            expand_str("::/0", 1, 1),
            vec!["::/1", "8000::/1"]
        );
        assert_eq!(
            expand_str("::/126", 128, 128),
            vec!["::/128", "::1/128", "::2/128", "::3/128"]
        );
    }

    #[test]
    fn test_subnet_count_matches_expand() {
        let cases = [
            ("10.0.0.0/8", 8, 12),
            ("192.0.2.0/24", 24, 32),
            ("2001:db8::/32", 32, 40),
            ("::/120", 124, 128),
        ];
        for (p, lower, upper) in cases {
            let base = prefix(p);
            let expected = subnet_count(&base, lower, upper).unwrap();
            assert_eq!(expand(base, lower, upper).count() as u128, expected, "{p},{lower},{upper}");
            for k in lower..=upper {
                let at_k = subnets(base, k).count() as u128;
                assert_eq!(at_k, 1u128 << (k - base.length()), "{p} at /{k}");
            }
        }
    }

    #[test]
    fn test_subnets_unique_and_contained() {
        let base = prefix("172.16.0.0/12");
        for k in 12..=18 {
            let out: Vec<Prefix> = subnets(base, k).collect();
            assert_eq!(out.len(), out.iter().unique().count(), "duplicates at /{k}");
            for s in &out {
                assert_eq!(s.length(), k);
                assert!(base.contains(s), "{s} not inside {base}");
            }
            for (a, b) in out.iter().tuple_windows() {
                assert!(!a.contains(b) && !b.contains(a), "{a} overlaps {b}");
                assert!(a < b);
            }
        }
    }

    #[test]
    fn test_expand_is_restartable() {
        let base = prefix("2001:db8::/48");
        let first: Vec<Prefix> = expand(base, 48, 52).collect();
        let second: Vec<Prefix> = expand(base, 48, 52).collect();
        assert_eq!(first, second);
        let it = expand(base, 50, 51);
        let cloned: Vec<Prefix> = it.clone().collect();
        assert_eq!(cloned, it.collect::<Vec<_>>());
    }

    #[test]
    fn test_expand_invalid_bounds_yields_nothing() {
        assert_eq!(expand(prefix("10.0.0.0/8"), 7, 9).count(), 0);
        assert_eq!(expand(prefix("10.0.0.0/8"), 9, 8).count(), 0);
        assert_eq!(expand(prefix("10.0.0.0/8"), 8, 33).count(), 0);
        assert_eq!(subnets(prefix("10.0.0.0/8"), 7).count(), 0);
        assert_eq!(subnet_count(&prefix("10.0.0.0/8"), 9, 8), Some(0));
    }

    #[test]
    fn test_full_width_v6_is_lazy() {
        let base = prefix("::/0");
        assert_eq!(subnet_count(&base, 0, 128), None);
        assert_eq!(subnet_count(&base, 127, 127), Some(1u128 << 127));
        let mut hosts = subnets(base, 128);
        assert_eq!(hosts.size_hint().1, None);
        assert_eq!(hosts.next().unwrap().to_string(), "::/128");
        assert_eq!(hosts.next().unwrap().to_string(), "::1/128");
        let mut top = subnets(base, 1);
        assert_eq!(top.size_hint(), (2, Some(2)));
        top.next();
        top.next();
        assert_eq!(top.next(), None);
        assert_eq!(top.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_expand_rule() {
        let rule: RangeRule = "10.0.0.0/8,9,9".parse().unwrap();
        let out: Vec<Prefix> = expand_rule(&rule).collect();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.family() == Family::V4));
    }
}
