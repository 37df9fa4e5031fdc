use std::fmt;
use std::str::FromStr;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};

// Letter grades in select order, each paired with its grade-point string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Grade {
    #[default]
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 11] = [
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::F,
    ];

    pub fn letter(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    // The option value as stored in the snapshot, e.g. "3.7".
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "4.0",
            Grade::AMinus => "3.7",
            Grade::BPlus => "3.3",
            Grade::B => "3.0",
            Grade::BMinus => "2.7",
            Grade::CPlus => "2.3",
            Grade::C => "2.0",
            Grade::CMinus => "1.7",
            Grade::DPlus => "1.3",
            Grade::D => "1.0",
            Grade::F => "0.0",
        }
    }

    pub fn points(self) -> f64 {
        match self {
            Grade::A => 4.0,
            Grade::AMinus => 3.7,
            Grade::BPlus => 3.3,
            Grade::B => 3.0,
            Grade::BMinus => 2.7,
            Grade::CPlus => 2.3,
            Grade::C => 2.0,
            Grade::CMinus => 1.7,
            Grade::DPlus => 1.3,
            Grade::D => 1.0,
            Grade::F => 0.0,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Accepts either the grade-point string ("3.7") or the letter ("A-", any case).
impl FromStr for Grade {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Grade::ALL
            .into_iter()
            .find(|g| g.as_str() == s || g.letter().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("Unknown grade '{}', expected one of A, A-, B+, B, B-, C+, C, C-, D+, D, F or 4.0 .. 0.0", s))
    }
}

impl TryFrom<String> for Grade {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.as_str().to_string()
    }
}

// One row of the ledger. Fields missing from a stored object take the blank-row defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct CourseRecord {
    pub name: String,
    pub credits: String,
    pub grade: Grade,
}

impl CourseRecord {
    pub fn new(name: Option<&str>, credits: Option<&str>, grade: Option<Grade>) -> Self {
        CourseRecord {
            name: name.unwrap_or_default().to_string(),
            credits: credits.unwrap_or_default().to_string(),
            grade: grade.unwrap_or_default(),
        }
    }

    pub fn blank() -> Self {
        CourseRecord::default()
    }
}
