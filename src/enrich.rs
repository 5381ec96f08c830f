//! Derived-field computation for parsed passengers.

use crate::passenger::{AgeGroup, Derived, Passenger, Port};

impl Derived {
    /// Computes every derived field from the passenger's source columns.
    pub fn compute(p: &Passenger) -> Self {
        Derived {
            family_size: p.sib_sp.saturating_add(p.parch).saturating_add(1),
            age_group: AgeGroup::from_age(p.age),
            sex_display: p.sex.display().to_string(),
            class_display: format!("Class {}", p.pclass),
            port_display: p.embarked.map_or("Unknown", Port::display).to_string(),
        }
    }
}

/// Fills in `p.derived`. Running it again leaves the record unchanged.
pub fn enrich(p: &mut Passenger) {
    p.derived = Derived::compute(p);
}

pub fn enrich_all(passengers: &mut [Passenger]) {
    passengers.iter_mut().for_each(enrich);
}
