//! Rack statistics
//!
//! Fish counts per gender and a coarse age distribution derived from each
//! tank's date of birth. Ages are measured in average-length months
//! (30.44 days).

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::types::{Gender, Rack, Tank};

const DAYS_PER_MONTH: f64 = 30.44;

/// Tank counts per age bucket.
///
/// Tanks between 6 and 12 months old, and tanks without a date of birth,
/// fall in no bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgeDistribution {
    pub less_than_6_months: u32,
    pub one_to_two_years: u32,
    pub two_to_three_years: u32,
    pub over_three_years: u32,
}

impl AgeDistribution {
    fn record(&mut self, months: f64) {
        if months > 36.0 {
            self.over_three_years += 1;
        } else if months > 24.0 {
            self.two_to_three_years += 1;
        } else if months > 12.0 {
            self.one_to_two_years += 1;
        } else if months <= 6.0 {
            self.less_than_6_months += 1;
        }
    }

    fn add(&mut self, other: &AgeDistribution) {
        self.less_than_6_months += other.less_than_6_months;
        self.one_to_two_years += other.one_to_two_years;
        self.two_to_three_years += other.two_to_three_years;
        self.over_three_years += other.over_three_years;
    }

    /// `(label, count)` pairs in display order
    pub fn buckets(&self) -> [(&'static str, u32); 4] {
        [
            ("<6 months", self.less_than_6_months),
            ("1-2 years", self.one_to_two_years),
            ("2-3 years", self.two_to_three_years),
            (">3 years", self.over_three_years),
        ]
    }
}

/// Aggregate counts for one rack or a set of racks
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RackStats {
    pub total_tanks: u32,
    pub fish_by_gender: BTreeMap<Gender, u64>,
    pub total_fish: u64,
    pub age_distribution: AgeDistribution,
}

impl RackStats {
    /// Statistics for one rack, with ages measured against today
    pub fn of(rack: &Rack) -> Self {
        Self::at(rack, Local::now().date_naive())
    }

    /// Statistics for one rack, with ages measured against `today`
    pub fn at(rack: &Rack, today: NaiveDate) -> Self {
        let mut stats = RackStats::default();
        for tank in &rack.tanks {
            stats.record(tank, today);
        }
        stats
    }

    /// Combined statistics across racks
    pub fn overall(racks: &[Rack], today: NaiveDate) -> Self {
        racks.iter().fold(RackStats::default(), |mut acc, rack| {
            acc.merge(&RackStats::at(rack, today));
            acc
        })
    }

    fn record(&mut self, tank: &Tank, today: NaiveDate) {
        self.total_tanks += 1;
        for sub in &tank.subdivisions {
            *self.fish_by_gender.entry(sub.gender).or_default() += u64::from(sub.count);
            self.total_fish += u64::from(sub.count);
        }
        if let Some(dob) = tank.dob {
            self.age_distribution.record(age_in_months(dob, today));
        }
    }

    fn merge(&mut self, other: &RackStats) {
        self.total_tanks += other.total_tanks;
        self.total_fish += other.total_fish;
        for (gender, count) in &other.fish_by_gender {
            *self.fish_by_gender.entry(*gender).or_default() += count;
        }
        self.age_distribution.add(&other.age_distribution);
    }

    pub fn fish(&self, gender: Gender) -> u64 {
        self.fish_by_gender.get(&gender).copied().unwrap_or(0)
    }

    /// Share of `gender` in the total fish count, rounded to one decimal
    pub fn gender_percent(&self, gender: Gender) -> f64 {
        percent(self.fish(gender), self.total_fish)
    }

    /// Share of tanks in an age bucket, rounded to one decimal
    pub fn age_percent(&self, count: u32) -> f64 {
        percent(u64::from(count), u64::from(self.total_tanks))
    }
}

/// Age of a fish born on `dob`, in average-length months
pub fn age_in_months(dob: NaiveDate, today: NaiveDate) -> f64 {
    (today - dob).num_days() as f64 / DAYS_PER_MONTH
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / total as f64).round() / 10.0
}
