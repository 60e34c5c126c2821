//! The static page content.
//!
//! Everything except the header and footer fragments is authored here:
//! hero with the terminal window, about, projects, and the contact
//! form. Marker classes drive the behaviors: `reveal` for scroll
//! reveals, `card` for tilting project cards, `magnetic` for the
//! call-to-action pull.

use vitrine_types::{Document, Element, ElementId, HoverFlavor, Role};

/// Lines typed into the hero terminal, in order.
pub const TERMINAL_SCRIPT: [&str; 4] = [
    "> Initializing environment...",
    "> Loading modules: Design, DevOps, CI/CD...",
    "> [SUCCESS] Pipeline Active.",
    "> Welcome.",
];

struct Project {
    title: &'static str,
    summary: &'static str,
    stack: &'static str,
    href: &'static str,
}

const PROJECTS: [Project; 3] = [
    Project {
        title: "Forge",
        summary: "Terminal-native coding agent with checkpointed sessions and sandboxed tools.",
        stack: "Rust / Tokio / Ratatui",
        href: "https://github.com/danielchristiancazares/forge",
    },
    Project {
        title: "Pipeline Atlas",
        summary: "Visual map of CI/CD runs across environments, with drill-down to every job log.",
        stack: "TypeScript / Grafana",
        href: "#projects",
    },
    Project {
        title: "Driftwatch",
        summary: "Detects infrastructure drift nightly and opens annotated pull requests to reconcile it.",
        stack: "Go / Terraform",
        href: "#projects",
    },
];

/// Builds the page skeleton the fragments and behaviors attach to.
#[must_use]
pub fn base_document() -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    doc.push(root, Element::new(Role::Block).with_dom_id("custom-cursor"));
    doc.push(
        root,
        Element::new(Role::Block).with_dom_id("header-placeholder"),
    );

    let main = doc.push(root, Element::new(Role::Block));
    push_hero(&mut doc, main);
    push_about(&mut doc, main);
    push_projects(&mut doc, main);
    push_contact(&mut doc, main);

    doc.push(
        root,
        Element::new(Role::Block).with_dom_id("footer-placeholder"),
    );

    doc
}

fn push_hero(doc: &mut Document, parent: ElementId) {
    let hero = doc.push(parent, Element::new(Role::Section).with_dom_id("hero"));
    doc.push(hero, Element::new(Role::Heading).with_text("Daniel Cazares"));
    doc.push(
        hero,
        Element::new(Role::Text).with_text("Design-minded DevOps engineer. I build pipelines people can trust."),
    );

    let terminal = doc.push(
        hero,
        Element::new(Role::Block)
            .with_class("hover-trigger")
            .with_cursor_hint(HoverFlavor::Code),
    );
    doc.push(
        terminal,
        Element::new(Role::Block).with_dom_id("terminal-typewriter"),
    );

    let actions = doc.push(hero, Element::new(Role::Block));
    doc.push(
        actions,
        Element::new(Role::Link)
            .with_href("#projects")
            .with_class("magnetic")
            .with_text("View Projects"),
    );
    doc.push(
        actions,
        Element::new(Role::Link)
            .with_href("#contact")
            .with_class("magnetic")
            .with_text("Get In Touch"),
    );
}

fn push_about(doc: &mut Document, parent: ElementId) {
    let about = doc.push(
        parent,
        Element::new(Role::Section)
            .with_dom_id("about")
            .with_class("reveal"),
    );
    doc.push(about, Element::new(Role::Heading).with_text("About"));
    doc.push(
        about,
        Element::new(Role::Text).with_text(
            "I spend my days where design systems meet delivery systems. \
             Most of my work is making deploys boring: reproducible builds, \
             honest dashboards, and interfaces that say what they mean.",
        ),
    );

    let skills = doc.push(about, Element::new(Role::List));
    for skill in [
        "CI/CD architecture",
        "Infrastructure as code",
        "Design systems",
        "Observability",
    ] {
        doc.push(skills, Element::new(Role::Item).with_text(skill));
    }
}

fn push_projects(doc: &mut Document, parent: ElementId) {
    let projects = doc.push(
        parent,
        Element::new(Role::Section).with_dom_id("projects"),
    );
    doc.push(projects, Element::new(Role::Heading).with_text("Projects"));

    for project in &PROJECTS {
        let card = doc.push(
            projects,
            Element::new(Role::Block)
                .with_class("card")
                .with_class("reveal")
                .with_cursor_hint(HoverFlavor::Link),
        );
        doc.push(card, Element::new(Role::Heading).with_text(project.title));
        doc.push(card, Element::new(Role::Text).with_text(project.summary));
        doc.push(card, Element::new(Role::Text).with_text(project.stack));
        doc.push(
            card,
            Element::new(Role::Link)
                .with_href(project.href)
                .with_text("View project"),
        );
    }
}

fn push_contact(doc: &mut Document, parent: ElementId) {
    let contact = doc.push(
        parent,
        Element::new(Role::Section)
            .with_dom_id("contact")
            .with_class("reveal"),
    );
    doc.push(contact, Element::new(Role::Heading).with_text("Contact"));
    doc.push(
        contact,
        Element::new(Role::Text).with_text("Have a pipeline that needs taming? Write me."),
    );

    let form = doc.push(contact, Element::new(Role::Form).with_dom_id("contact-form"));
    for (name, label) in [
        ("name", "Name"),
        ("email", "Email"),
        ("subject", "Subject"),
    ] {
        doc.push(
            form,
            Element::new(Role::Field).with_name(name).with_text(label),
        );
    }
    doc.push(
        form,
        Element::new(Role::Field)
            .with_name("message")
            .with_text("Message"),
    );
    doc.push(
        form,
        Element::new(Role::Button)
            .with_class("magnetic")
            .with_text("Send Message"),
    );
}
