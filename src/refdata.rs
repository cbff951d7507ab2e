/// Fixed reference lists the synthesizer draws from.
///
/// Order is significant: each draw reduces a raw LCG output modulo the list
/// length, so reordering or resizing a list changes every derived record.
use anyhow::{Result, ensure};

pub const FIRST_NAMES: &[&str] = &[
    "Olivia", "Liam", "Emma", "Noah", "Ava", "Ethan", "Sophia", "Mason",
    "Isabella", "Logan", "Mia", "Lucas", "Charlotte", "Elijah", "Amelia",
    "James", "Harper", "Benjamin", "Evelyn", "Henry", "Luna", "Jack", "Nora",
    "Leo",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller",
    "Davis", "Rodriguez", "Martinez", "Hernandez", "Lopez", "Wilson",
    "Anderson", "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee",
    "Perez", "White", "Harris", "Clark",
];

pub const DOMAINS: &[&str] = &[
    "gmail.com", "yahoo.com", "outlook.com", "hotmail.com", "icloud.com",
    "proton.me", "fastmail.com", "example.com",
];

pub const ADDED_BY: &[&str] = &[
    "Aisha Khan", "Marcus Webb", "Priya Patel", "Tom Okafor", "Lena Fischer",
    "Diego Ramos",
];

/// Validated reference lists. Construction is the only place emptiness can
/// sneak in, so it is checked once here and treated as a configuration error.
#[derive(Debug, Clone)]
pub struct RefLists {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub domains: Vec<String>,
    pub added_by: Vec<String>,
}

impl RefLists {
    pub fn new(
        first_names: Vec<String>,
        last_names: Vec<String>,
        domains: Vec<String>,
        added_by: Vec<String>,
    ) -> Result<Self> {
        ensure!(!first_names.is_empty(), "first-name list is empty");
        ensure!(!last_names.is_empty(), "last-name list is empty");
        ensure!(!domains.is_empty(), "domain list is empty");
        ensure!(!added_by.is_empty(), "added-by list is empty");
        Ok(RefLists {
            first_names,
            last_names,
            domains,
            added_by,
        })
    }

    /// The built-in lists. Non-empty by construction, so this never fails.
    pub fn builtin() -> Self {
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
        RefLists {
            first_names: owned(FIRST_NAMES),
            last_names: owned(LAST_NAMES),
            domains: owned(DOMAINS),
            added_by: owned(ADDED_BY),
        }
    }
}
