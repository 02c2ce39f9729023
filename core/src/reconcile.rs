//! Capacity/demand reconciler.
//!
//!   required  = ceil(demand / capacity)            (0 when capacity is 0)
//!   adherence = min(100, round(available / required × 100))
//!
//! A day that needs nobody is fully staffed: adherence 100, whatever the
//! roster looks like.

use crate::types::{Headcount, Minutes};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub required_count:    Headcount,
    pub adherence_percent: u8,
}

pub fn required_headcount(demand_minutes: Minutes, net_capacity_minutes: Minutes) -> Headcount {
    if net_capacity_minutes <= 0.0 {
        return 0;
    }
    let heads = (demand_minutes.max(0.0) / net_capacity_minutes).ceil();
    // Float-to-int `as` saturates, and NaN becomes 0.
    heads as Headcount
}

pub fn adherence_percent(available: Headcount, required: Headcount) -> u8 {
    if required == 0 {
        return 100;
    }
    let ratio = f64::from(available) / f64::from(required) * 100.0;
    ratio.round().min(100.0) as u8
}

pub fn reconcile(
    demand_minutes:       Minutes,
    net_capacity_minutes: Minutes,
    available:            Headcount,
) -> Reconciliation {
    let required_count = required_headcount(demand_minutes, net_capacity_minutes);
    Reconciliation {
        required_count,
        adherence_percent: adherence_percent(available, required_count),
    }
}
