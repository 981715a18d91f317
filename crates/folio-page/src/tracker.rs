//! Active-section tracking
//!
//! Fed with intersection ratios, reports the most visible page section so
//! the navigation can highlight it. Only the current id is retained.

/// One intersection observation
#[derive(Clone, Debug, PartialEq)]
pub struct SectionRatio {
    pub id: String,
    pub ratio: f64,
}

impl SectionRatio {
    pub fn new(id: impl Into<String>, ratio: f64) -> Self {
        Self {
            id: id.into(),
            ratio,
        }
    }
}

/// Tracks which registered section is currently most visible
#[derive(Clone, Debug)]
pub struct ActiveSectionTracker {
    /// Section ids in page order
    sections: Vec<String>,
    /// Index into `sections`
    active: usize,
}

impl ActiveSectionTracker {
    /// Create a tracker over sections in page order
    ///
    /// The first section starts active. An empty list yields a tracker whose
    /// `active` is `None` and which ignores every observation.
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            active: 0,
        }
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// The currently active section id
    pub fn active(&self) -> Option<&str> {
        self.sections.get(self.active).map(String::as_str)
    }

    /// Apply a batch of observations and return the active id
    ///
    /// Among entries with a positive ratio the highest wins, ties going to the
    /// section earlier in page order. Unregistered ids are ignored. When no
    /// entry has a positive ratio the current id is kept.
    pub fn observe(&mut self, entries: &[SectionRatio]) -> Option<&str> {
        let mut best: Option<(usize, f64)> = None;
        for entry in entries {
            if entry.ratio.is_nan() || entry.ratio <= 0.0 {
                continue;
            }
            let Some(index) = self.sections.iter().position(|s| *s == entry.id) else {
                log::debug!("[page] ignoring unregistered section '{}'", entry.id);
                continue;
            };
            let better = match best {
                None => true,
                Some((best_index, best_ratio)) => {
                    entry.ratio > best_ratio || (entry.ratio == best_ratio && index < best_index)
                }
            };
            if better {
                best = Some((index, entry.ratio));
            }
        }

        if let Some((index, _)) = best {
            if index != self.active {
                log::debug!("[page] active section -> '{}'", self.sections[index]);
            }
            self.active = index;
        }
        self.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ActiveSectionTracker {
        ActiveSectionTracker::new(["home", "projects", "wins", "contact"])
    }

    #[test]
    fn test_initial_is_first_section() {
        assert_eq!(tracker().active(), Some("home"));
    }

    #[test]
    fn test_highest_ratio_wins() {
        let mut t = tracker();
        let active = t.observe(&[
            SectionRatio::new("home", 0.1),
            SectionRatio::new("projects", 0.9),
        ]);
        assert_eq!(active, Some("projects"));
    }

    #[test]
    fn test_tie_goes_to_earlier_section() {
        let mut t = tracker();
        t.observe(&[
            SectionRatio::new("contact", 0.5),
            SectionRatio::new("wins", 0.5),
        ]);
        assert_eq!(t.active(), Some("wins"));
    }

    #[test]
    fn test_zero_ratios_keep_current() {
        let mut t = tracker();
        t.observe(&[SectionRatio::new("wins", 0.4)]);
        t.observe(&[
            SectionRatio::new("home", 0.0),
            SectionRatio::new("projects", 0.0),
        ]);
        assert_eq!(t.active(), Some("wins"));
        t.observe(&[]);
        assert_eq!(t.active(), Some("wins"));
    }

    #[test]
    fn test_unknown_ids_ignored() {
        let mut t = tracker();
        t.observe(&[
            SectionRatio::new("about", 1.0),
            SectionRatio::new("contact", 0.2),
        ]);
        assert_eq!(t.active(), Some("contact"));
    }

    #[test]
    fn test_nan_ratio_ignored() {
        let mut t = tracker();
        t.observe(&[SectionRatio::new("projects", f64::NAN)]);
        assert_eq!(t.active(), Some("home"));
    }

    #[test]
    fn test_empty_tracker() {
        let mut t = ActiveSectionTracker::new(Vec::<String>::new());
        assert_eq!(t.active(), None);
        assert_eq!(t.observe(&[SectionRatio::new("home", 1.0)]), None);
    }
}
