//! Page composer
//!
//! Assembles the canonical single page from [`SiteContent`]. Navigation
//! entries mirror the section ids, and the active entry is highlighted by
//! re-rendering [`nav`] with the tracker's current id.

use folio_content::{CardSize, Profile, SiteContent};

use crate::cards::{achievement_card, project_card, skill_group, CardVariant};
use crate::contact::contact_row;
use crate::tracker::ActiveSectionTracker;
use crate::view::{Element, View};

/// A navigable page section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub label: &'static str,
}

/// Sections in page order
pub const SECTIONS: &[Section] = &[
    Section { id: "home", label: "Home" },
    Section { id: "projects", label: "Projects" },
    Section { id: "skills", label: "Skills" },
    Section { id: "wins", label: "Wins" },
    Section { id: "contact", label: "Contact" },
];

/// Element ids the browser wiring looks up
pub const NAV_ID: &str = "site-nav";
pub const BACKDROP_ID: &str = "backdrop";
pub const CODE_STREAM_ID: &str = "code-stream";

#[derive(Clone, Debug)]
pub struct PageOptions {
    pub card_variant: CardVariant,
    /// Id of the element the background effect mounts into
    pub backdrop_id: &'static str,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            card_variant: CardVariant::Classic,
            backdrop_id: BACKDROP_ID,
        }
    }
}

/// Tracker over [`SECTIONS`]
pub fn section_tracker() -> ActiveSectionTracker {
    ActiveSectionTracker::new(SECTIONS.iter().map(|s| s.id))
}

/// Compose the whole page
pub fn compose_page(content: &SiteContent, options: &PageOptions, active: Option<&str>) -> View {
    let view = View::Fragment(vec![
        header(content.profile, active),
        Element::new("main")
            .child(hero(content.profile, options.backdrop_id))
            .child(projects_section(content, options.card_variant))
            .child(skills_section(content))
            .child(wins_section(content))
            .child(contact_section(content.profile))
            .into(),
        footer(content.profile),
    ]);
    log::debug!("[page] composed {} sections", SECTIONS.len());
    view
}

fn header(profile: &Profile, active: Option<&str>) -> View {
    Element::new("header")
        .with_class("site-header")
        .child(
            Element::new("a")
                .with_attr("href", "#home")
                .with_class("site-header__brand")
                .text(profile.name),
        )
        .child(nav(active))
        .into()
}

/// Navigation bar with the active entry marked
pub fn nav(active: Option<&str>) -> View {
    Element::new("nav")
        .with_id(NAV_ID)
        .with_class("site-nav")
        .children(SECTIONS.iter().map(|section| {
            let link = Element::new("a")
                .with_attr("href", format!("#{}", section.id))
                .with_attr("data-section", section.id);
            let link = if active == Some(section.id) {
                link.with_class("site-nav__link is-active")
                    .with_attr("aria-current", "true")
            } else {
                link.with_class("site-nav__link")
            };
            link.text(section.label).into()
        }))
        .into()
}

fn hero(profile: &Profile, backdrop_id: &str) -> Element {
    Element::new("section")
        .with_id("home")
        .with_class("hero")
        .child(
            Element::new("div")
                .with_id(backdrop_id)
                .with_class("hero__backdrop")
                .with_attr("aria-hidden", "true"),
        )
        .child(
            Element::new("div")
                .with_class("hero__content")
                .child(Element::new("h1").text(profile.name))
                .child(Element::new("p").with_class("hero__title").text(profile.title))
                .child(Element::new("p").with_class("hero__subhead").text(profile.subhead))
                .child(
                    Element::new("p")
                        .with_class("hero__availability")
                        .text(profile.availability),
                )
                .child_opt(profile.resume.map(|href| {
                    Element::new("a")
                        .with_attr("href", href)
                        .with_class("btn btn--glass")
                        .with_attr("data-affordance", "resume")
                        .text("Resume")
                })),
        )
        .child(
            Element::new("pre")
                .with_id(CODE_STREAM_ID)
                .with_class("hero__code-stream")
                .with_attr("aria-hidden", "true"),
        )
}

fn section_heading(title: &str, accent: &str) -> Element {
    Element::new("h2")
        .text(format!("{} ", title))
        .child(Element::new("span").with_class("gradient-text").text(accent))
}

fn projects_section(content: &SiteContent, variant: CardVariant) -> Element {
    Element::new("section")
        .with_id("projects")
        .with_class("section")
        .child(section_heading("Featured", "Projects"))
        .child(
            Element::new("div").with_class("project-grid").children(
                content.visible_projects().map(|project| {
                    let cell = Element::new("div").with_class(match project.size {
                        CardSize::Standard => "project-grid__cell",
                        CardSize::Large => "project-grid__cell project-grid__cell--large",
                    });
                    cell.child(project_card(project, variant)).into()
                }),
            ),
        )
}

fn skills_section(content: &SiteContent) -> Element {
    Element::new("section")
        .with_id("skills")
        .with_class("section")
        .child(section_heading("Technical", "Skills"))
        .child(
            Element::new("div")
                .with_class("skill-legend")
                .children(folio_content::Proficiency::all().iter().map(|tier| {
                    Element::new("span")
                        .with_class("skill-legend__item")
                        .child(Element::new("span").with_class(&format!("dot dot--{}", tier.id())))
                        .text(tier.name())
                        .into()
                })),
        )
        .child(
            Element::new("div")
                .with_class("skill-grid")
                .children(content.skills.iter().map(skill_group)),
        )
}

fn wins_section(content: &SiteContent) -> Element {
    Element::new("section")
        .with_id("wins")
        .with_class("section")
        .child(section_heading("Hackathon", "Wins"))
        .child(
            Element::new("div")
                .with_class("wins-grid")
                .children(content.achievements.iter().map(achievement_card)),
        )
}

fn contact_section(profile: &Profile) -> Element {
    Element::new("section")
        .with_id("contact")
        .with_class("section contact")
        .child(section_heading("Let's", "Connect"))
        .child(
            Element::new("p")
                .with_class("contact__lead")
                .text("Open to internships and junior roles. The fastest way to reach me is email."),
        )
        .child(contact_row(profile))
}

fn footer(profile: &Profile) -> View {
    Element::new("footer")
        .with_class("site-footer")
        .text(format!("© {}", profile.name))
        .into()
}
