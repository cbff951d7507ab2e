/// The synthetic customer record model.
///
/// Field names serialize in camelCase to match the external JSON shape
/// consumed by presentation layers.
use jiff::Timestamp;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// `index + 1`; unique and stable for a given index forever.
    pub id: u64,
    pub name: String,
    /// Canonical `+1-XXX-XXX-XXXX`.
    pub phone: String,
    pub email: String,
    /// Engagement score in `[0, 999]`.
    pub score: u32,
    pub last_message_at: Timestamp,
    pub added_by: String,
    pub avatar: Avatar,
}

/// Deterministic avatar descriptor: a two-stop gradient keyed by hue with the
/// record's initials overlaid. Rendering to an actual image is deferred to
/// `to_data_uri`, so the descriptor itself stays cheap to generate and compare.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Avatar {
    /// Gradient start hue in `[0, 360)`; the second stop is `(hue + 40) % 360`.
    pub hue: u16,
    pub initials: String,
}

impl Avatar {
    /// Render the descriptor as a base64 SVG `data:` URI.
    pub fn to_data_uri(&self) -> String {
        use base64::Engine;
        let svg = format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='64' height='64'>\
             <defs><linearGradient id='g' x1='0' y1='0' x2='1' y2='1'>\
             <stop offset='0%' stop-color='hsl({},70%,55%)'/>\
             <stop offset='100%' stop-color='hsl({},70%,45%)'/>\
             </linearGradient></defs>\
             <rect width='100%' height='100%' fill='url(#g)'/>\
             <text x='50%' y='56%' text-anchor='middle' font-family='Inter,Arial' \
             font-size='28' fill='rgba(255,255,255,.92)' font-weight='700'>{}</text>\
             </svg>",
            self.hue,
            (self.hue + 40) % 360,
            self.initials,
        );
        format!(
            "data:image/svg+xml;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(svg.as_bytes())
        )
    }
}

/// Format a 10-digit number as `+1-XXX-XXX-XXXX`. Part of the data model:
/// `Record::phone` stores the canonical form, not the raw number.
pub fn format_phone(raw: u64) -> String {
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(raw);
    debug_assert_eq!(digits.len(), 10, "phone source must be a 10-digit number");
    format!("+1-{}-{}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
}
