//! Behaviors for the injected header and footer.
//!
//! Both are bound once the fragment content is in the tree. The header
//! owns the collapsed-menu state; the footer just needs the current
//! year stamped into its copyright line.

use chrono::Datelike;

use vitrine_types::{Document, ElementId};

/// Menu state for the injected header.
///
/// Binding requires both the menu button and the menu itself. A header
/// fragment missing either simply gets no menu behavior.
#[derive(Debug)]
pub struct HeaderChrome {
    menu_button: ElementId,
    menu: ElementId,
    menu_links: Vec<ElementId>,
    menu_open: bool,
}

impl HeaderChrome {
    #[must_use]
    pub fn bind(doc: &Document, mount: ElementId) -> Option<Self> {
        let menu_button = doc.descendant_by_dom_id(mount, "mobile-menu-btn");
        let menu = doc.descendant_by_dom_id(mount, "mobile-menu");
        let (Some(menu_button), Some(menu)) = (menu_button, menu) else {
            tracing::debug!("header fragment has no collapsible menu");
            return None;
        };
        Some(Self {
            menu_button,
            menu,
            menu_links: doc.links_under(menu),
            menu_open: false,
        })
    }

    #[must_use]
    pub fn menu_button(&self) -> ElementId {
        self.menu_button
    }

    #[must_use]
    pub fn menu(&self) -> ElementId {
        self.menu
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close(&mut self) {
        self.menu_open = false;
    }

    /// Closes the menu when `id` is one of its links. Returns whether the
    /// click belonged to the menu.
    pub fn link_clicked(&mut self, id: ElementId) -> bool {
        if self.menu_links.contains(&id) {
            self.menu_open = false;
            true
        } else {
            false
        }
    }

    /// A viewport at or past the breakpoint shows the full nav, so the
    /// collapsed menu is forced shut.
    pub fn handle_resize(&mut self, width: u16, breakpoint: u16) {
        if width >= breakpoint {
            self.menu_open = false;
        }
    }
}

/// Stamps `year` into the footer's `current-year` element.
///
/// Returns whether the element was found; a footer fragment without it
/// is left alone.
pub fn apply_footer_year(doc: &mut Document, mount: ElementId, year: i32) -> bool {
    match doc.descendant_by_dom_id(mount, "current-year") {
        Some(id) => {
            doc.set_text(id, year.to_string());
            true
        }
        None => {
            tracing::debug!("footer fragment has no current-year element");
            false
        }
    }
}

#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
