/// The in-memory query pipeline: search, filters, sort, and the view that
/// owns the materialized collection.
use std::cell::RefCell;
use std::cmp::Ordering;
use std::str::FromStr;

use jiff::Timestamp;
use memchr::memmem;

use crate::record::Record;
use crate::synth::Synthesizer;

/// Size of the virtual dataset a session materializes by default.
pub const DEFAULT_TOTAL: u64 = 1_000_000;

/// Score bucket. Boundaries are half-open: High ≥700, Medium [400, 700),
/// Low <400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl FromStr for ScoreBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(ScoreBand::High),
            "medium" => Ok(ScoreBand::Medium),
            "low" => Ok(ScoreBand::Low),
            _ => Err(format!("unknown score band: {s} (high|medium|low)")),
        }
    }
}

/// Recency bucket relative to the session clock: Recent ≤30 days, Older >30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recency {
    Recent,
    Older,
}

impl FromStr for Recency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(Recency::Recent),
            "older" => Ok(Recency::Older),
            _ => Err(format!("unknown recency: {s} (recent|older)")),
        }
    }
}

/// Four independent, optional predicates, AND-ed together. All `None` means
/// no filtering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub score: Option<ScoreBand>,
    pub recency: Option<Recency>,
    pub added_by: Option<String>,
    pub domain: Option<String>,
}

impl FilterState {
    /// Number of predicates currently set (shown in the toolbar).
    pub fn active_count(&self) -> usize {
        usize::from(self.score.is_some())
            + usize::from(self.recency.is_some())
            + usize::from(self.added_by.is_some())
            + usize::from(self.domain.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Generation order; sorting is a no-op for this key.
    #[default]
    Id,
    Name,
    Email,
    LastMessageAt,
    AddedBy,
    Score,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "email" => Ok(SortKey::Email),
            "last-message-at" => Ok(SortKey::LastMessageAt),
            "added-by" => Ok(SortKey::AddedBy),
            "score" => Ok(SortKey::Score),
            _ => Err(format!(
                "unknown sort key: {s} (id|name|email|last-message-at|added-by|score)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            _ => Err(format!("unknown sort direction: {s} (asc|desc)")),
        }
    }
}

/// The full query tuple. Equality on this type keys the view's memo and the
/// pagination window's reset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuerySpec {
    pub filters: FilterState,
    /// Settled (debounced, trimmed) search text. Whitespace-only matches
    /// everything; matching is a case-insensitive substring test against
    /// name and email, and a verbatim test against the phone string.
    pub search: String,
    pub sort_by: SortKey,
    pub dir: SortDir,
}

/// Owns the materialized collection and answers queries over it.
///
/// The collection is generated once per session and immutable afterward.
/// `query` recomputes from scratch on every new tuple; the memo of the last
/// result is a shortcut, never a correctness dependency.
pub struct DatasetView {
    records: Vec<Record>,
    now: Timestamp,
    cache: RefCell<Option<(QuerySpec, Vec<usize>)>>,
}

impl DatasetView {
    /// One-time bulk materialization of indices `[0, total)`.
    pub fn materialize(synth: &Synthesizer, total: u64) -> Self {
        let records = (0..total).map(|i| synth.synthesize(i)).collect();
        DatasetView {
            records,
            now: synth.now(),
            cache: RefCell::new(None),
        }
    }

    /// Wrap an already-built collection (samples, tests). `now` must be the
    /// same session clock the records were generated against.
    pub fn from_records(records: Vec<Record>, now: Timestamp) -> Self {
        DatasetView {
            records,
            now,
            cache: RefCell::new(None),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Filter + search + sort. Returns references in result order.
    pub fn query(&self, spec: &QuerySpec) -> Vec<&Record> {
        if let Some((cached, idx)) = self.cache.borrow().as_ref()
            && cached == spec
        {
            return idx.iter().map(|&i| &self.records[i]).collect();
        }

        let idx = self.run(spec);
        let out = idx.iter().map(|&i| &self.records[i]).collect();
        *self.cache.borrow_mut() = Some((spec.clone(), idx));
        out
    }

    fn run(&self, spec: &QuerySpec) -> Vec<usize> {
        let needle = spec.search.trim().to_lowercase();
        let finder = (!needle.is_empty()).then(|| memmem::Finder::new(needle.as_bytes()));

        let mut idx: Vec<usize> = (0..self.records.len())
            .filter(|&i| self.passes(&self.records[i], spec, finder.as_ref()))
            .collect();

        if spec.sort_by != SortKey::Id {
            // Vec::sort_by is stable, so tied keys keep ascending id order in
            // both directions (the comparator is reversed, not the input).
            idx.sort_by(|&a, &b| {
                let ord = compare_by_key(&self.records[a], &self.records[b], spec.sort_by);
                match spec.dir {
                    SortDir::Asc => ord,
                    SortDir::Desc => ord.reverse(),
                }
            });
        }
        idx
    }

    fn passes(&self, rec: &Record, spec: &QuerySpec, finder: Option<&memmem::Finder>) -> bool {
        if let Some(finder) = finder {
            // Same folding as the needle, so mixed-case emails and non-ASCII
            // names from custom lists still match.
            let name = rec.name.to_lowercase();
            let email = rec.email.to_lowercase();
            let hit = finder.find(name.as_bytes()).is_some()
                || finder.find(email.as_bytes()).is_some()
                || finder.find(rec.phone.as_bytes()).is_some();
            if !hit {
                return false;
            }
        }

        match spec.filters.score {
            Some(ScoreBand::High) if rec.score < 700 => return false,
            Some(ScoreBand::Medium) if !(400..700).contains(&rec.score) => return false,
            Some(ScoreBand::Low) if rec.score >= 400 => return false,
            _ => {}
        }

        if let Some(recency) = spec.filters.recency {
            let days = (self.now.as_millisecond() - rec.last_message_at.as_millisecond()) as f64
                / 86_400_000.0;
            match recency {
                Recency::Recent if days > 30.0 => return false,
                Recency::Older if days <= 30.0 => return false,
                _ => {}
            }
        }

        if let Some(added_by) = &spec.filters.added_by
            && rec.added_by != *added_by
        {
            return false;
        }

        if let Some(domain) = &spec.filters.domain {
            let rec_domain = rec.email.split('@').nth(1).unwrap_or("");
            if rec_domain != domain {
                return false;
            }
        }

        true
    }
}

fn compare_by_key(a: &Record, b: &Record, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Email => a.email.cmp(&b.email),
        SortKey::LastMessageAt => a.last_message_at.cmp(&b.last_message_at),
        SortKey::AddedBy => a.added_by.cmp(&b.added_by),
        SortKey::Score => a.score.cmp(&b.score),
    }
}
