//! Contact links and their analytics events

use folio_content::Profile;

use crate::view::{Element, View};

/// Contact channels that report a click event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactEvent {
    Email,
    GitHub,
    LinkedIn,
}

impl ContactEvent {
    pub fn all() -> &'static [ContactEvent] {
        &[ContactEvent::Email, ContactEvent::GitHub, ContactEvent::LinkedIn]
    }

    /// Analytics event name
    pub fn event_name(&self) -> &'static str {
        match self {
            ContactEvent::Email => "Contact — Email Click",
            ContactEvent::GitHub => "Contact — GitHub Click",
            ContactEvent::LinkedIn => "Contact — LinkedIn Click",
        }
    }

    /// Value of the `data-contact` attribute on the rendered link
    pub fn id(&self) -> &'static str {
        match self {
            ContactEvent::Email => "email",
            ContactEvent::GitHub => "github",
            ContactEvent::LinkedIn => "linkedin",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "email" => Some(ContactEvent::Email),
            "github" => Some(ContactEvent::GitHub),
            "linkedin" => Some(ContactEvent::LinkedIn),
            _ => None,
        }
    }
}

/// Percent-encode like JavaScript's `encodeURIComponent`
pub fn encode_uri_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Build a `mailto:` URL with an encoded subject and body
pub fn mailto(email: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        email,
        encode_uri_component(subject),
        encode_uri_component(body)
    )
}

/// A rendered contact channel
#[derive(Clone, Debug, PartialEq)]
pub struct ContactLink {
    pub event: ContactEvent,
    pub href: String,
    pub label: String,
}

/// Contact links for a profile, skipping channels it does not have
pub fn contact_links(profile: &Profile) -> Vec<ContactLink> {
    let first_name = profile.name.split_whitespace().next().unwrap_or(profile.name);
    let subject = format!("Opportunity for {}", first_name);
    let body = format!(
        "Hi {},\n\nI came across your portfolio and would like to discuss...",
        first_name
    );

    let mut links = vec![ContactLink {
        event: ContactEvent::Email,
        href: mailto(profile.email, &subject, &body),
        label: "Email Me".to_string(),
    }];
    if let Some(github) = profile.github {
        links.push(ContactLink {
            event: ContactEvent::GitHub,
            href: github.to_string(),
            label: "GitHub".to_string(),
        });
    }
    if let Some(linkedin) = profile.linkedin {
        links.push(ContactLink {
            event: ContactEvent::LinkedIn,
            href: linkedin.to_string(),
            label: "LinkedIn".to_string(),
        });
    }
    links
}

/// Render the contact link row
pub fn contact_row(profile: &Profile) -> View {
    Element::new("div")
        .with_class("contact__links")
        .children(contact_links(profile).into_iter().map(|link| {
            let mut a = Element::new("a")
                .with_attr("href", link.href)
                .with_class(&format!("btn contact__{}", link.event.id()))
                .with_attr("data-contact", link.event.id());
            if link.event == ContactEvent::Email {
                a = a.with_attr("aria-label", format!("Email {}", profile.email));
            } else {
                a = a
                    .with_attr("target", "_blank")
                    .with_attr("rel", "noreferrer");
            }
            a.text(link.label).into()
        }))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            name: "Sam Rivers",
            title: "Engineer",
            subhead: "",
            availability: "",
            email: "sam@example.com",
            github: Some("https://github.com/sam"),
            linkedin: None,
            resume: None,
        }
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("keep-_.!~*'()"), "keep-_.!~*'()");
        assert_eq!(encode_uri_component("line\nbreak"), "line%0Abreak");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
        assert_eq!(encode_uri_component("?/#"), "%3F%2F%23");
    }

    #[test]
    fn test_mailto() {
        assert_eq!(
            mailto("me@example.com", "Hi there", "Line 1\nLine 2"),
            "mailto:me@example.com?subject=Hi%20there&body=Line%201%0ALine%202"
        );
    }

    #[test]
    fn test_event_names() {
        assert_eq!(ContactEvent::Email.event_name(), "Contact — Email Click");
        assert_eq!(ContactEvent::GitHub.event_name(), "Contact — GitHub Click");
        assert_eq!(ContactEvent::LinkedIn.event_name(), "Contact — LinkedIn Click");
        for e in ContactEvent::all() {
            assert_eq!(ContactEvent::from_id(e.id()), Some(*e));
        }
    }

    #[test]
    fn test_contact_links_skip_missing_channels() {
        let links = contact_links(&profile());
        let events: Vec<_> = links.iter().map(|l| l.event).collect();
        assert_eq!(events, vec![ContactEvent::Email, ContactEvent::GitHub]);
        assert!(links[0]
            .href
            .starts_with("mailto:sam@example.com?subject=Opportunity%20for%20Sam"));
    }

    #[test]
    fn test_contact_row_tags_links() {
        let view = contact_row(&profile());
        let tagged = view.find_all(&|el| el.attr("data-contact").is_some());
        assert_eq!(tagged.len(), 2);
        assert_eq!(tagged[1].attr("target"), Some("_blank"));
        assert!(tagged[0].attr("target").is_none());
    }
}
