//! Integration tests for page rendering
//!
//! These tests verify the composed page end to end:
//! - Every section renders from the canonical content
//! - Card affordances follow the content table
//! - Navigation highlighting follows the section tracker
//! - Contact links carry encoded mailto URLs

use folio_content::SiteContent;
use folio_page::{
    compose_page, nav, section_tracker, CardVariant, ContactEvent, PageOptions, SectionRatio,
    SECTIONS,
};

// =============================================================================
// Composition Tests
// =============================================================================

#[test]
fn test_canonical_page_renders() {
    let content = SiteContent::canonical();
    let html = compose_page(&content, &PageOptions::default(), Some("home")).render();

    for section in SECTIONS {
        assert!(
            html.contains(&format!("<section id=\"{}\"", section.id)),
            "missing section {}",
            section.id
        );
    }
    assert!(html.contains(content.profile.name));
    assert!(html.contains("id=\"code-stream\""));
}

#[test]
fn test_page_escapes_content_text() {
    let content = SiteContent::canonical();
    let html = compose_page(&content, &PageOptions::default(), None).render();

    // "Languages & Core" and "C# / .NET" come straight from the skill table
    assert!(html.contains("Languages &amp; Core"));
    assert!(!html.contains("Languages & Core"));
}

#[test]
fn test_every_variant_renders_one_card_per_visible_project() {
    let content = SiteContent::canonical();
    for variant in CardVariant::all() {
        let options = PageOptions {
            card_variant: *variant,
            ..PageOptions::default()
        };
        let page = compose_page(&content, &options, None);
        let cards = page.find_all(&|el| el.tag == "article" && el.attr("data-slug").is_some());
        assert_eq!(cards.len(), content.visible_projects().count());
    }
}

#[test]
fn test_affordances_follow_content() {
    let content = SiteContent::canonical();
    let page = compose_page(&content, &PageOptions::default(), None);

    let repos = content.visible_projects().filter(|p| p.has_repo()).count();
    let demos = content.visible_projects().filter(|p| p.has_demo()).count();
    assert_eq!(page.affordances("repo").len(), repos);
    assert_eq!(page.affordances("demo").len(), demos);
}

// =============================================================================
// Navigation Tests
// =============================================================================

#[test]
fn test_tracker_drives_nav_highlight() {
    let mut tracker = section_tracker();
    let active = tracker
        .observe(&[
            SectionRatio::new("home", 0.1),
            SectionRatio::new("projects", 0.9),
        ])
        .map(str::to_string);
    assert_eq!(active.as_deref(), Some("projects"));

    let html = nav(active.as_deref()).render();
    assert!(html.contains(
        "<a href=\"#projects\" data-section=\"projects\" class=\"site-nav__link is-active\""
    ));
    assert_eq!(html.matches("is-active").count(), 1);
}

// =============================================================================
// Contact Tests
// =============================================================================

#[test]
fn test_contact_links_rendered() {
    let content = SiteContent::canonical();
    let page = compose_page(&content, &PageOptions::default(), None);

    let email = page.find_all(&|el| el.attr("data-contact") == Some(ContactEvent::Email.id()));
    assert_eq!(email.len(), 1);
    let href = email[0].attr("href").unwrap();
    assert!(href.starts_with(&format!("mailto:{}?subject=", content.profile.email)));
    assert!(!href.contains(' '));

    // The serialized attribute escapes the query separator
    let html = page.render();
    assert!(html.contains("&amp;body="));
}
