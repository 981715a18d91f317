//! Content entry types

use serde::Serialize;

/// Skill proficiency tier, lowest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Working,
    Proficient,
    Advanced,
}

impl Proficiency {
    /// All tiers, strongest first (legend order)
    pub fn all() -> &'static [Proficiency] {
        &[
            Proficiency::Advanced,
            Proficiency::Proficient,
            Proficiency::Working,
        ]
    }

    /// Display label
    pub fn name(&self) -> &'static str {
        match self {
            Proficiency::Working => "Working",
            Proficiency::Proficient => "Proficient",
            Proficiency::Advanced => "Advanced",
        }
    }

    /// Lowercase id, matching the serialized form
    pub fn id(&self) -> &'static str {
        match self {
            Proficiency::Working => "working",
            Proficiency::Proficient => "proficient",
            Proficiency::Advanced => "advanced",
        }
    }

    /// Parse from string ID (case-insensitive)
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "working" => Some(Proficiency::Working),
            "proficient" => Some(Proficiency::Proficient),
            "advanced" => Some(Proficiency::Advanced),
            _ => None,
        }
    }
}

/// Grid footprint of a project card
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    #[default]
    Standard,
    Large,
}

/// A portfolio project
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectEntry {
    /// URL-safe identifier, unique within the table
    pub slug: &'static str,
    pub name: &'static str,
    /// One-line description
    pub blurb: &'static str,
    /// Technology tags, in display order
    pub tech: &'static [&'static str],
    /// Source repository
    pub repo: Option<&'static str>,
    /// Live demo
    pub demo: Option<&'static str>,
    /// Cover image path
    pub cover: Option<&'static str>,
    /// Additional screenshots
    pub gallery: &'static [&'static str],
    pub size: CardSize,
    /// Kept in the table but not listed
    pub hidden: bool,
}

impl ProjectEntry {
    pub fn has_repo(&self) -> bool {
        self.repo.is_some()
    }

    pub fn has_demo(&self) -> bool {
        self.demo.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkillEntry {
    pub label: &'static str,
    pub tier: Proficiency,
    /// Icon id from the site's icon set
    pub icon: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkillGroup {
    pub title: &'static str,
    pub items: &'static [SkillEntry],
}

/// A competition result
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Achievement {
    /// Emoji badge
    pub place: &'static str,
    pub event: &'static str,
    pub desc: &'static str,
}

/// Site owner's details shown in the hero and contact sections
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub title: &'static str,
    pub subhead: &'static str,
    pub availability: &'static str,
    pub email: &'static str,
    pub github: Option<&'static str>,
    pub linkedin: Option<&'static str>,
    pub resume: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_ordering() {
        assert!(Proficiency::Working < Proficiency::Proficient);
        assert!(Proficiency::Proficient < Proficiency::Advanced);
    }

    #[test]
    fn test_proficiency_from_id() {
        assert_eq!(Proficiency::from_id("Advanced"), Some(Proficiency::Advanced));
        assert_eq!(Proficiency::from_id("WORKING"), Some(Proficiency::Working));
        assert_eq!(Proficiency::from_id("expert"), None);
    }

    #[test]
    fn test_proficiency_serialize() {
        let json = serde_json::to_string(&Proficiency::Proficient).unwrap();
        assert_eq!(json, "\"proficient\"");
        assert_eq!(json.trim_matches('"'), Proficiency::Proficient.id());
    }

    #[test]
    fn test_card_size_default() {
        assert_eq!(CardSize::default(), CardSize::Standard);
        assert_eq!(serde_json::to_string(&CardSize::Large).unwrap(), "\"large\"");
    }
}
