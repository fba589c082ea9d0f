//! Per-field value predicates.
//!
//! A [`Matcher`] answers three questions about a current value `v` of its
//! field: the next accepted value at or after `v` (wrapping to the first
//! accepted value when none is left), whether such a value exists without
//! wrapping, and whether `v` itself is accepted.

use crate::field::{Bounds, Field};

/// Accepted values for one field of a schedule.
///
/// Every variant carries the legal bounds of the field it was built for.
/// Matchers are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Matcher {
    /// `5`
    Static { value: u8, bounds: Bounds },
    /// `1-5`
    Range { lo: u8, hi: u8, bounds: Bounds },
    /// `*/15`: `min`, `min + stride`, ... up to `max`.
    Step { stride: u8, bounds: Bounds },
    /// `*`
    Wildcard { bounds: Bounds },
    /// `0,30`: union of two or more distinct matchers, in first-seen order.
    Composite { members: Vec<Matcher>, bounds: Bounds },
}

impl Matcher {
    pub fn wildcard(field: Field) -> Self {
        Matcher::Wildcard {
            bounds: field.bounds(),
        }
    }

    /// `None` when `value` is outside the field's bounds.
    pub fn static_value(field: Field, value: u8) -> Option<Self> {
        let bounds = field.bounds();
        bounds.contains(value.into()).then_some(Matcher::Static { value, bounds })
    }

    /// `None` unless `min <= lo <= hi <= max`.
    pub fn range(field: Field, lo: u8, hi: u8) -> Option<Self> {
        let bounds = field.bounds();
        (lo <= hi && bounds.contains(lo.into()) && bounds.contains(hi.into()))
            .then_some(Matcher::Range { lo, hi, bounds })
    }

    /// `None` unless `1 <= stride <= max`.
    pub fn step(field: Field, stride: u8) -> Option<Self> {
        let bounds = field.bounds();
        (stride >= 1 && stride <= bounds.max).then_some(Matcher::Step { stride, bounds })
    }

    /// Merge comma-separated terms. Duplicates are dropped; a single
    /// remaining term is returned as-is. `None` for an empty list.
    pub fn union(field: Field, terms: Vec<Matcher>) -> Option<Self> {
        let mut members: Vec<Matcher> = Vec::with_capacity(terms.len());
        for term in terms {
            let flattened = match term {
                Matcher::Composite { members, .. } => members,
                other => vec![other],
            };
            for m in flattened {
                if !members.contains(&m) {
                    members.push(m);
                }
            }
        }
        match members.len() {
            0 => None,
            1 => members.pop(),
            _ => Some(Matcher::Composite {
                members,
                bounds: field.bounds(),
            }),
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            Matcher::Static { bounds, .. }
            | Matcher::Range { bounds, .. }
            | Matcher::Step { bounds, .. }
            | Matcher::Wildcard { bounds }
            | Matcher::Composite { bounds, .. } => *bounds,
        }
    }

    /// Smallest accepted value overall.
    pub fn first(&self) -> u8 {
        match self {
            Matcher::Static { value, .. } => *value,
            Matcher::Range { lo, .. } => *lo,
            Matcher::Step { bounds, .. } | Matcher::Wildcard { bounds } => bounds.min,
            Matcher::Composite { members, bounds } => members
                .iter()
                .map(Matcher::first)
                .min()
                .unwrap_or(bounds.min),
        }
    }

    /// Smallest accepted value `>= v`, wrapping to [`first`](Self::first)
    /// when there is none.
    pub fn next(&self, v: u8) -> u8 {
        self.next_within(v).unwrap_or_else(|| self.first())
    }

    /// Whether an accepted value `>= v` exists without wrapping.
    pub fn has_next(&self, v: u8) -> bool {
        self.next_within(v).is_some()
    }

    /// Whether `v` itself is accepted.
    pub fn matches(&self, v: u8) -> bool {
        if !self.bounds().contains(v.into()) {
            return false;
        }
        match self {
            Matcher::Static { value, .. } => v == *value,
            Matcher::Range { lo, hi, .. } => (*lo..=*hi).contains(&v),
            Matcher::Step { stride, bounds } => (v - bounds.min).checked_rem(*stride) == Some(0),
            Matcher::Wildcard { .. } => true,
            Matcher::Composite { members, .. } => members.iter().any(|m| m.matches(v)),
        }
    }

    fn next_within(&self, v: u8) -> Option<u8> {
        match self {
            Matcher::Static { value, .. } => (v <= *value).then_some(*value),
            Matcher::Range { lo, hi, .. } => {
                if v <= *lo {
                    Some(*lo)
                } else {
                    (v <= *hi).then_some(v)
                }
            }
            Matcher::Step { stride, bounds } => {
                if v <= bounds.min {
                    return Some(bounds.min);
                }
                let offset = u32::from(v - bounds.min);
                let stride = u32::from(*stride).max(1);
                let candidate = u32::from(bounds.min) + offset.div_ceil(stride) * stride;
                if candidate <= u32::from(bounds.max) {
                    u8::try_from(candidate).ok()
                } else {
                    None
                }
            }
            Matcher::Wildcard { bounds } => {
                if v <= bounds.min {
                    Some(bounds.min)
                } else {
                    (v <= bounds.max).then_some(v)
                }
            }
            Matcher::Composite { members, .. } => {
                members.iter().filter_map(|m| m.next_within(v)).min()
            }
        }
    }
}
