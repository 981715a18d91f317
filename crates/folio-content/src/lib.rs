//! Folio content model
//!
//! Immutable tables of projects, skills, achievements and the owner's
//! profile. Everything here is `'static` and read-only: renderers borrow
//! entries, nothing mutates them.
//!
//! Optional links are `None` when the site has nothing to point at, which is
//! what lets card renderers omit the matching affordance.

mod data;
mod model;

pub use data::{ACHIEVEMENTS, PROFILE, PROJECTS, SKILL_GROUPS};
pub use model::{Achievement, CardSize, Profile, Proficiency, ProjectEntry, SkillEntry, SkillGroup};

use serde::Serialize;

/// Everything the page composer renders, bundled for one pass
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SiteContent {
    pub profile: &'static Profile,
    pub projects: &'static [ProjectEntry],
    pub skills: &'static [SkillGroup],
    pub achievements: &'static [Achievement],
}

impl SiteContent {
    /// The site's built-in content tables
    pub fn canonical() -> Self {
        Self {
            profile: &PROFILE,
            projects: PROJECTS,
            skills: SKILL_GROUPS,
            achievements: ACHIEVEMENTS,
        }
    }

    /// Projects that should be listed, in table order
    pub fn visible_projects(&self) -> impl Iterator<Item = &'static ProjectEntry> {
        self.projects.iter().filter(|p| !p.hidden)
    }

    /// Look up a project by slug, hidden or not
    pub fn project_by_slug(&self, slug: &str) -> Option<&'static ProjectEntry> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    /// Serialize for JavaScript consumers
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self::canonical()
    }
}
