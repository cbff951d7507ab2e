/// On-demand record synthesis.
///
/// `index → Record` is a pure function of the index, the reference lists, and
/// the session clock captured at construction. No record is ever stored here;
/// re-deriving the same index always yields the same record.
use jiff::Timestamp;

use crate::record::{Avatar, Record, format_phone};
use crate::refdata::RefLists;
use crate::rng::{Lcg, hash32};

/// Salt added to the index before hashing into a seed.
pub const SEED_SALT: i64 = 1_234_567;

/// One named draw from the per-record stream.
///
/// The draw schedule is a contract, not an implementation detail: every draw
/// consumes one LCG output, so inserting, removing, or reordering a step
/// changes every downstream field of every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStep {
    FirstName,
    LastName,
    PhoneOffset,
    EmailSuffix,
    EmailDomain,
    Score,
    RecencyDays,
    DayJitterMs,
    AddedBy,
    AvatarHue,
}

/// The fixed draw schedule, in stream order.
pub const DRAW_ORDER: [DrawStep; 10] = [
    DrawStep::FirstName,
    DrawStep::LastName,
    DrawStep::PhoneOffset,
    DrawStep::EmailSuffix,
    DrawStep::EmailDomain,
    DrawStep::Score,
    DrawStep::RecencyDays,
    DrawStep::DayJitterMs,
    DrawStep::AddedBy,
    DrawStep::AvatarHue,
];

#[derive(Debug, Default)]
struct Draws {
    first: u32,
    last: u32,
    phone_offset: u32,
    email_suffix: u32,
    domain: u32,
    score: u32,
    days: u32,
    jitter_ms: u32,
    added_by: u32,
    hue: u32,
}

pub struct Synthesizer {
    lists: RefLists,
    now: Timestamp,
}

impl Synthesizer {
    /// `now` is the session clock: captured once, it anchors every
    /// `last_message_at` and is reused by recency filtering so a record cannot
    /// drift between recency buckets within a session.
    pub fn new(lists: RefLists, now: Timestamp) -> Self {
        Synthesizer { lists, now }
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn lists(&self) -> &RefLists {
        &self.lists
    }

    /// Materialize the record for `index`. Pure; `id == index + 1`.
    pub fn synthesize(&self, index: u64) -> Record {
        let mut rng = Lcg::new(hash32((index as i64).wrapping_add(SEED_SALT)));
        let mut d = Draws::default();
        for step in DRAW_ORDER {
            let raw = rng.next();
            match step {
                DrawStep::FirstName => d.first = raw % self.lists.first_names.len() as u32,
                DrawStep::LastName => d.last = raw % self.lists.last_names.len() as u32,
                DrawStep::PhoneOffset => d.phone_offset = raw % 3_000_000_000,
                DrawStep::EmailSuffix => d.email_suffix = raw % 1_000,
                DrawStep::EmailDomain => d.domain = raw % self.lists.domains.len() as u32,
                DrawStep::Score => d.score = raw % 1_000,
                DrawStep::RecencyDays => d.days = raw % 730,
                DrawStep::DayJitterMs => d.jitter_ms = raw % 86_400_000,
                DrawStep::AddedBy => d.added_by = raw % self.lists.added_by.len() as u32,
                DrawStep::AvatarHue => d.hue = raw % 360,
            }
        }

        let first = &self.lists.first_names[d.first as usize];
        let last = &self.lists.last_names[d.last as usize];
        let domain = &self.lists.domains[d.domain as usize];

        let ms = self.now.as_millisecond()
            - i64::from(d.days) * 86_400_000
            - i64::from(d.jitter_ms);
        // At most 731 days before the session clock, always in jiff's range.
        let last_message_at = Timestamp::from_millisecond(ms).unwrap_or(self.now);

        let initials: String = first
            .chars()
            .take(1)
            .chain(last.chars().take(1))
            .collect::<String>()
            .to_uppercase();

        Record {
            id: index + 1,
            name: format!("{first} {last}"),
            phone: format_phone(6_000_000_000 + u64::from(d.phone_offset)),
            email: format!(
                "{}.{}{}@{domain}",
                first.to_lowercase(),
                last.to_lowercase(),
                d.email_suffix
            ),
            score: d.score,
            last_message_at,
            added_by: self.lists.added_by[d.added_by as usize].clone(),
            avatar: Avatar {
                hue: d.hue as u16,
                initials,
            },
        }
    }
}
