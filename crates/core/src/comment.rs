//! Review comments owned by a draft record.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Palette used for derived placeholder avatars.
const AVATAR_PALETTE: [&str; 8] = [
    "#e57373", "#f06292", "#ba68c8", "#7986cb", "#4fc3f7", "#4db6ac", "#aed581", "#ffb74d",
];

/// A single review comment on a listing.
///
/// `id` is unique within the owning record's comment sequence and assigned
/// at creation time. `date` is free text, not a validated calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Comment {
    pub id: String,
    pub author: String,
    /// Uploaded avatar payload; `None` means the surface renders the
    /// deterministic placeholder from [`placeholder_avatar`].
    pub avatar: Option<String>,
    pub date: String,
    /// Star rating, 1–5 by convention. Not enforced at this layer.
    pub rating: u8,
    pub likes: u32,
    pub body: String,
    pub developer_response: Option<String>,
}

/// Generate a fresh comment id.
///
/// UUID v7: time-ordered like the wall-clock ids it replaces, without the
/// collision risk of two comments created in the same millisecond.
pub fn new_comment_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

impl Comment {
    /// A blank comment with a fresh id, ready for the editor's scratch slot.
    pub fn blank() -> Self {
        Self {
            id: new_comment_id(),
            author: String::new(),
            avatar: None,
            date: String::new(),
            rating: 5,
            likes: 0,
            body: String::new(),
            developer_response: None,
        }
    }
}

/// Deterministic placeholder avatar for a comment without an uploaded one.
///
/// Returns `(initial, color)`: the author's uppercased first character and
/// a palette color keyed by the author name, so both rendering twins derive
/// the same avatar for the same author.
pub fn placeholder_avatar(author: &str) -> (char, &'static str) {
    let initial = author
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?');
    let key: usize = author.bytes().map(usize::from).sum();
    (initial, AVATAR_PALETTE[key % AVATAR_PALETTE.len()])
}
