//! Offer URL macro expansion.
//!
//! The offer URL stored on a record is a template that may embed the
//! `{click_id}` macro. The record itself treats it as opaque text; the
//! serving side expands it per visitor.

/// The macro token an offer URL template may embed.
pub const CLICK_ID_MACRO: &str = "{click_id}";

/// Expand every occurrence of [`CLICK_ID_MACRO`] in `template`.
///
/// A template without the token is returned verbatim.
pub fn expand_offer_url(template: &str, click_id: &str) -> String {
    template.replace(CLICK_ID_MACRO, click_id)
}
