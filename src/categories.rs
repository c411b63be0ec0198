//! Fixed catalog of browsable categories.
//!
//! A category can be referred to by its slug (`retro`) or its display name
//! (`Retro Gaming`). Threads store the display name; anything outside the
//! catalog is kept as typed.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CATALOG: [Category; 8] = [
    Category {
        slug: "popular",
        name: "Popular Games",
        description: "Discuss the biggest and most talked-about games right now",
    },
    Category {
        slug: "indie",
        name: "Indie Games",
        description: "Hidden gems and creative independent games worth discussing",
    },
    Category {
        slug: "esports",
        name: "Esports",
        description: "Competitive gaming, tournaments, and professional play",
    },
    Category {
        slug: "streamers",
        name: "Streamers",
        description: "Talk about your favorite content creators and live streams",
    },
    Category {
        slug: "mobile",
        name: "Mobile Games",
        description: "Gaming on the go - mobile and handheld discussions",
    },
    Category {
        slug: "retro",
        name: "Retro Gaming",
        description: "Classic games, nostalgia, and gaming history",
    },
    Category {
        slug: "reviews",
        name: "Game Reviews",
        description: "Share opinions, ratings, and detailed game reviews",
    },
    Category {
        slug: "tech",
        name: "Gaming Tech",
        description: "Hardware, mods, and technical gaming discussions",
    },
];

/// Catalog entry by slug or display name, ignoring case and surrounding space.
pub fn find(key: &str) -> Option<&'static Category> {
    let key = key.trim();
    CATALOG
        .iter()
        .find(|c| c.slug.eq_ignore_ascii_case(key) || c.name.eq_ignore_ascii_case(key))
}

/// Display name for a catalog slug or name; other input comes back trimmed.
pub fn canonical_name(key: &str) -> String {
    find(key).map(|c| c.name.to_string()).unwrap_or_else(|| key.trim().to_string())
}

/// Derived per-category figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub thread_count: usize,
    pub message_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_and_name_resolve_to_the_same_entry() {
        assert_eq!(find("retro"), find("Retro Gaming"));
        assert_eq!(find("  RETRO "), find("retro gaming"));
        assert_eq!(find("tech").map(|c| c.name), Some("Gaming Tech"));
        assert!(find("Action RPG").is_none());
    }

    #[test]
    fn canonical_name_falls_back_to_input() {
        assert_eq!(canonical_name("mobile"), "Mobile Games");
        assert_eq!(canonical_name(" Action RPG "), "Action RPG");
    }

    #[test]
    fn slugs_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            assert!(CATALOG[i + 1..].iter().all(|b| b.slug != a.slug && b.name != a.name));
        }
    }
}
