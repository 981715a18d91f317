//! Folio page rendering
//!
//! Pure-Rust rendering of the portfolio page into a [`View`] tree:
//!
//! - [`cards`]: project, skill and achievement cards
//! - [`composer`]: page assembly and navigation
//! - [`tracker`]: which section is currently in view
//! - [`contact`]: mailto links and click analytics names
//! - [`typewriter`]: the hero code stream
//!
//! Nothing here touches the browser. The web app mounts the serialized HTML
//! and feeds intersection ratios back into the tracker.

pub mod cards;
pub mod composer;
pub mod contact;
pub mod tracker;
pub mod typewriter;
pub mod view;

pub use cards::CardVariant;
pub use composer::{compose_page, nav, section_tracker, PageOptions, Section, SECTIONS};
pub use contact::{mailto, ContactEvent};
pub use tracker::{ActiveSectionTracker, SectionRatio};
pub use typewriter::Typewriter;
pub use view::{Element, View};
