//! Card renderers
//!
//! Pure mappings from content entries to [`View`] trees. A missing optional
//! field omits its affordance entirely; nothing renders a placeholder.

use folio_content::{Achievement, ProjectEntry, SkillEntry, SkillGroup};
use serde::{Deserialize, Serialize};

use crate::view::{Element, View};

/// Visual layout of a project card
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardVariant {
    /// Text column with the cover beside it
    #[default]
    Classic,
    /// Text only, no cover
    Compact,
    /// Cover on top, text below
    Image,
}

impl CardVariant {
    pub fn all() -> &'static [CardVariant] {
        &[CardVariant::Classic, CardVariant::Compact, CardVariant::Image]
    }

    pub fn id(&self) -> &'static str {
        match self {
            CardVariant::Classic => "classic",
            CardVariant::Compact => "compact",
            CardVariant::Image => "image",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "classic" => Some(CardVariant::Classic),
            "compact" => Some(CardVariant::Compact),
            "image" => Some(CardVariant::Image),
            _ => None,
        }
    }
}

/// Render a project card
pub fn project_card(project: &ProjectEntry, variant: CardVariant) -> View {
    let card = Element::new("article")
        .with_class(&format!("project-card project-card--{}", variant.id()))
        .with_attr("data-slug", project.slug);

    let card = match variant {
        CardVariant::Compact => card
            .child(title(project))
            .child(blurb(project))
            .child(tech_tags(project)),
        CardVariant::Image => card
            .child_opt(cover(project, "project-card__cover project-card__cover--wide"))
            .child(title(project))
            .child(blurb(project))
            .child(tech_tags(project))
            .child_opt(gallery(project)),
        CardVariant::Classic => card.child(
            Element::new("div")
                .with_class("project-card__body")
                .child(
                    Element::new("div")
                        .with_class("project-card__text")
                        .child(title(project))
                        .child(blurb(project))
                        .child(tech_tags(project)),
                )
                .child_opt(cover(project, "project-card__cover")),
        ),
    };

    card.child(actions(project)).into()
}

fn title(project: &ProjectEntry) -> Element {
    Element::new("h3")
        .with_class("project-card__title")
        .text(project.name)
}

fn blurb(project: &ProjectEntry) -> Element {
    Element::new("p")
        .with_class("project-card__blurb")
        .text(project.blurb)
}

fn tech_tags(project: &ProjectEntry) -> Element {
    Element::new("div").with_class("project-card__tech").children(
        project
            .tech
            .iter()
            .map(|tag| Element::new("span").with_class("tag").text(*tag).into()),
    )
}

fn cover(project: &ProjectEntry, class: &str) -> Option<Element> {
    project.cover.map(|src| {
        Element::new("div")
            .with_class(class)
            .with_attr("data-affordance", "cover")
            .child(
                Element::new("img")
                    .with_attr("src", src)
                    .with_attr("alt", project.name)
                    .with_attr("loading", "lazy"),
            )
    })
}

/// Thumbnail strip, omitted when the project has no gallery
fn gallery(project: &ProjectEntry) -> Option<Element> {
    if project.gallery.is_empty() {
        return None;
    }
    Some(
        Element::new("div")
            .with_class("project-card__gallery")
            .with_attr("data-affordance", "gallery")
            .children(project.gallery.iter().enumerate().map(|(i, src)| {
                Element::new("img")
                    .with_attr("src", *src)
                    .with_attr("alt", format!("{} screenshot {}", project.name, i + 1))
                    .with_attr("loading", "lazy")
                    .into()
            })),
    )
}

fn actions(project: &ProjectEntry) -> Element {
    Element::new("div")
        .with_class("project-card__actions")
        .child_opt(
            project
                .repo
                .map(|href| external_link(href, "repo", "btn btn--glass", "View Code")),
        )
        .child_opt(
            project
                .demo
                .map(|href| external_link(href, "demo", "btn btn--solid", "Live Demo")),
        )
}

fn external_link(href: &str, affordance: &str, class: &str, label: &str) -> Element {
    Element::new("a")
        .with_attr("href", href)
        .with_attr("target", "_blank")
        .with_attr("rel", "noreferrer")
        .with_class(class)
        .with_attr("data-affordance", affordance)
        .text(label)
}

/// Render a skill pill: tier dot, optional icon, label
pub fn skill_pill(skill: &SkillEntry) -> View {
    Element::new("span")
        .with_class("skill-pill")
        .with_attr("title", skill.label)
        .with_attr("data-tier", skill.tier.id())
        .child(Element::new("span").with_class(&format!("dot dot--{}", skill.tier.id())))
        .child_opt(skill.icon.map(|icon| {
            Element::new("span")
                .with_class("skill-pill__icon")
                .with_attr("data-icon", icon)
                .with_attr("aria-hidden", "true")
        }))
        .child(Element::new("span").with_class("skill-pill__label").text(skill.label))
        .into()
}

/// Render a titled group of skill pills
pub fn skill_group(group: &SkillGroup) -> View {
    Element::new("section")
        .with_class("glass-card skill-group")
        .child(Element::new("h3").text(group.title))
        .child(
            Element::new("ul").children(
                group
                    .items
                    .iter()
                    .map(|skill| Element::new("li").child(skill_pill(skill)).into()),
            ),
        )
        .into()
}

/// Render an achievement card: badge, event, description
pub fn achievement_card(achievement: &Achievement) -> View {
    Element::new("article")
        .with_class("glass-card achievement")
        .child(
            Element::new("span")
                .with_class("achievement__place")
                .with_attr("aria-hidden", "true")
                .text(achievement.place),
        )
        .child(Element::new("h3").text(achievement.event))
        .child(Element::new("p").text(achievement.desc))
        .into()
}
