//! Editor sections, in their fixed tab order.

/// The named sections of the editor, in the order the tab bar shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Domain,
    Tracker,
    Design,
    Analytics,
    Push,
    Extra,
}

impl Section {
    /// All sections in tab order.
    pub const ALL: [Section; 6] = [
        Section::Domain,
        Section::Tracker,
        Section::Design,
        Section::Analytics,
        Section::Push,
        Section::Extra,
    ];

    /// The section after this one, or `None` at the last tab.
    pub fn next(self) -> Option<Section> {
        match self {
            Section::Domain => Some(Section::Tracker),
            Section::Tracker => Some(Section::Design),
            Section::Design => Some(Section::Analytics),
            Section::Analytics => Some(Section::Push),
            Section::Push => Some(Section::Extra),
            Section::Extra => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_the_tab_order() {
        let mut section = Section::Domain;
        let mut visited = vec![section];
        while let Some(next) = section.next() {
            visited.push(next);
            section = next;
        }
        assert_eq!(visited, Section::ALL);
    }

    #[test]
    fn last_section_has_no_next() {
        assert_eq!(Section::Extra.next(), None);
    }
}
