//! Typed passenger records and the categorical values they carry.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    /// Maps the raw `Sex` column; anything but `male`/`female` is `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "male" => Sex::Male,
            "female" => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Unknown => "Unknown",
        }
    }
}

/// Port of embarkation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Port {
    Southampton,
    Cherbourg,
    Queenstown,
}

impl Port {
    /// Looks up a one-letter embarkation code. Unmapped codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "S" => Some(Port::Southampton),
            "C" => Some(Port::Cherbourg),
            "Q" => Some(Port::Queenstown),
            _ => None,
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            Port::Southampton => "Southampton",
            Port::Cherbourg => "Cherbourg",
            Port::Queenstown => "Queenstown",
        }
    }
}

/// Age bucket with fixed thresholds at 18, 30 and 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AgeGroup {
    Child,
    YoungAdult,
    Adult,
    Senior,
    #[default]
    Unknown,
}

impl AgeGroup {
    pub fn from_age(age: Option<f64>) -> Self {
        match age {
            None => AgeGroup::Unknown,
            Some(a) if a < 18.0 => AgeGroup::Child,
            Some(a) if a < 30.0 => AgeGroup::YoungAdult,
            Some(a) if a < 50.0 => AgeGroup::Adult,
            Some(_) => AgeGroup::Senior,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Child => "Child (0-17)",
            AgeGroup::YoungAdult => "Young Adult (18-29)",
            AgeGroup::Adult => "Adult (30-49)",
            AgeGroup::Senior => "Senior (50+)",
            AgeGroup::Unknown => "Unknown",
        }
    }
}

/// Fields computed from a passenger's source columns by the enricher.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Derived {
    pub family_size: u32,
    pub age_group: AgeGroup,
    pub sex_display: String,
    pub class_display: String,
    pub port_display: String,
}

/// One row of the passenger dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passenger {
    pub id: i64,
    pub survived: bool,
    pub pclass: u32,
    pub name: String,
    pub sex: Sex,
    pub age: Option<f64>,
    pub sib_sp: u32,
    pub parch: u32,
    pub ticket: String,
    pub fare: Option<f64>,
    pub cabin: String,
    pub embarked: Option<Port>,

    /// Empty until [`crate::enrich::enrich`] runs.
    pub derived: Derived,
}

impl Default for Passenger {
    fn default() -> Self {
        Passenger {
            id: 0,
            survived: false,
            pclass: 0,
            name: String::new(),
            sex: Sex::Unknown,
            age: None,
            sib_sp: 0,
            parch: 0,
            ticket: String::new(),
            fare: None,
            cabin: String::new(),
            embarked: None,
            derived: Derived::default(),
        }
    }
}
