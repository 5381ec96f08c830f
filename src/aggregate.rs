//! Grouped survival statistics and the chart series built from them.
//!
//! Groups appear in the order their key is first seen in the dataset. Every
//! function here reads enriched passengers (see [`crate::enrich`]).

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::passenger::Passenger;
use crate::stats::SummaryStats;

/// Family-size groups smaller than this are left out of the family chart.
pub const MIN_FAMILY_GROUP: usize = 5;

/// Lower edges of the age histogram bins; each bin spans `[edge, next_edge)`.
pub const AGE_BINS: &[u32] = &[0, 10, 20, 30, 40, 50, 60, 70, 80, 90];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Sex,
    Class,
    AgeGroup,
    FamilySize,
    Port,
}

impl GroupKey {
    /// Display label of the group `p` belongs to under this key.
    pub fn label(self, p: &Passenger) -> String {
        match self {
            GroupKey::Sex => p.derived.sex_display.clone(),
            GroupKey::Class => p.derived.class_display.clone(),
            GroupKey::AgeGroup => p.derived.age_group.label().to_string(),
            GroupKey::FamilySize => family_label(p.derived.family_size),
            GroupKey::Port => p.derived.port_display.clone(),
        }
    }
}

fn family_label(size: u32) -> String {
    if size > 1 {
        format!("{size} persons")
    } else {
        format!("{size} person")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub label: String,
    pub total: usize,
    pub survived: usize,
}

impl GroupStats {
    pub fn died(&self) -> usize {
        self.total - self.survived
    }

    pub fn survival_rate(&self) -> f64 {
        survival_rate(self.survived, self.total)
    }
}

/// Survival percentage rounded to one decimal; 0.0 for an empty group.
pub fn survival_rate(survived: usize, total: usize) -> f64 {
    SummaryStats::pct(survived, total)
}

/// Counts totals and survivors per distinct key, in first-occurrence order.
fn tally<K, F>(passengers: &[Passenger], key: F) -> Vec<(K, usize, usize)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Passenger) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, usize, usize)> = Vec::new();

    for p in passengers {
        let k = key(p);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, 0, 0));
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.1 += 1;
        if p.survived {
            group.2 += 1;
        }
    }

    groups
}

/// Groups passengers by `key`, one [`GroupStats`] per distinct label.
pub fn group_by(passengers: &[Passenger], key: GroupKey) -> Vec<GroupStats> {
    tally(passengers, |p| key.label(p))
        .into_iter()
        .map(|(label, total, survived)| GroupStats {
            label,
            total,
            survived,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
    Line,
    Pie,
}

/// One numeric series of a chart, aligned with the chart's labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

impl Series {
    fn new(label: &str, values: Vec<f64>) -> Self {
        Self {
            label: label.to_string(),
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Series>,
}

fn labels_of(groups: &[GroupStats]) -> Vec<String> {
    groups.iter().map(|g| g.label.clone()).collect()
}

fn rates_of(groups: &[GroupStats]) -> Vec<f64> {
    groups.iter().map(GroupStats::survival_rate).collect()
}

/// Survived and died counts per sex.
pub fn sex_chart(passengers: &[Passenger]) -> Chart {
    let groups = group_by(passengers, GroupKey::Sex);
    let survived = groups.iter().map(|g| g.survived as f64).collect();
    let died = groups.iter().map(|g| g.died() as f64).collect();

    Chart {
        id: "sex",
        title: "Survival by Gender",
        kind: ChartKind::Bar,
        labels: labels_of(&groups),
        datasets: vec![Series::new("Survived", survived), Series::new("Died", died)],
    }
}

/// Survival rate per passenger class, classes in ascending order.
pub fn class_chart(passengers: &[Passenger]) -> Chart {
    let mut by_class = tally(passengers, |p| p.pclass);
    by_class.sort_by_key(|(class, _, _)| *class);

    let groups: Vec<GroupStats> = by_class
        .into_iter()
        .map(|(class, total, survived)| GroupStats {
            label: format!("Class {class}"),
            total,
            survived,
        })
        .collect();

    Chart {
        id: "class",
        title: "Survival Rate by Passenger Class (%)",
        kind: ChartKind::Doughnut,
        labels: labels_of(&groups),
        datasets: vec![Series::new("Survival Rate (%)", rates_of(&groups))],
    }
}

pub fn age_group_chart(passengers: &[Passenger]) -> Chart {
    let groups = group_by(passengers, GroupKey::AgeGroup);

    Chart {
        id: "age_group",
        title: "Survival Rate by Age Group",
        kind: ChartKind::Line,
        labels: labels_of(&groups),
        datasets: vec![Series::new("Survival Rate (%)", rates_of(&groups))],
    }
}

/// Passenger counts per embarkation port.
pub fn port_chart(passengers: &[Passenger]) -> Chart {
    let groups = group_by(passengers, GroupKey::Port);
    let counts = groups.iter().map(|g| g.total as f64).collect();

    Chart {
        id: "port",
        title: "Passengers by Port of Embarkation",
        kind: ChartKind::Pie,
        labels: labels_of(&groups),
        datasets: vec![Series::new("Passengers", counts)],
    }
}

/// Survival rate per family size, skipping groups with fewer than `min_group` members.
pub fn family_chart(passengers: &[Passenger], min_group: usize) -> Chart {
    let groups: Vec<GroupStats> = group_by(passengers, GroupKey::FamilySize)
        .into_iter()
        .filter(|g| g.total >= min_group)
        .collect();

    Chart {
        id: "family",
        title: "Survival Rate by Family Size",
        kind: ChartKind::Bar,
        labels: labels_of(&groups),
        datasets: vec![Series::new("Survival Rate (%)", rates_of(&groups))],
    }
}

/// Histogram of known ages over [`AGE_BINS`]. Ages past the last edge are not counted.
pub fn age_distribution_chart(passengers: &[Passenger]) -> Chart {
    let mut counts = vec![0usize; AGE_BINS.len() - 1];

    for age in passengers.iter().filter_map(|p| p.age) {
        if let Some(bin) = AGE_BINS
            .windows(2)
            .position(|w| age >= f64::from(w[0]) && age < f64::from(w[1]))
        {
            counts[bin] += 1;
        }
    }

    let labels = AGE_BINS
        .windows(2)
        .map(|w| format!("{}-{}", w[0], w[1]))
        .collect();

    Chart {
        id: "age",
        title: "Age Distribution",
        kind: ChartKind::Bar,
        labels,
        datasets: vec![Series::new(
            "Number of Passengers",
            counts.into_iter().map(|c| c as f64).collect(),
        )],
    }
}

/// Every chart, in page order.
pub fn all_charts(passengers: &[Passenger], min_family_group: usize) -> Vec<Chart> {
    vec![
        sex_chart(passengers),
        class_chart(passengers),
        age_distribution_chart(passengers),
        age_group_chart(passengers),
        port_chart(passengers),
        family_chart(passengers, min_family_group),
    ]
}
