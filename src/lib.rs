//! # pixeldocs
//!
//! Build-time tooling for a multi-project documentation site. The site root
//! holds one directory per project plus a landing `index.md`; each project
//! ships its own navigation descriptor and markdown pages.
//!
//! # Architecture: Two Independent Steps
//!
//! ```text
//! 1. Sidebar   <project>/config/sidebar.json  →  SidebarMap    (merged navigation)
//! 2. Banners   index.md, <project>/*.md       →  *.png         (social preview cards)
//! ```
//!
//! Neither step depends on the other. The sidebar is composed once while the
//! site renderer loads its theme configuration; banner cards are produced
//! after the site is built, straight into its asset directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sidebar`] | Reads each project's descriptor and merges them into one map, last write wins |
//! | [`cards`] | Walks the site, names each card, and drives the renderer one document at a time |
//! | [`banner`] | Card description (`CardSpec`) and the pure-Rust PNG renderer behind `CardRenderer` |
//! | [`metadata`] | Front matter extraction and title/description resolution |
//! | [`social`] | Twitter card `<meta>` head tags pointing at a page's banner |
//! | [`versions`] | Latest published artifact version from the package repository |
//! | [`config`] | `config.toml` loading, stock defaults, merging, and validation |
//! | [`types`] | Navigation types shared by the composer and its JSON output |
//! | [`output`] | CLI output formatting for composer and generator events |
//!
//! # Design Decisions
//!
//! ## Last Write Wins
//!
//! Projects are merged in configured order with a shallow overwrite. If two
//! projects claim the same route prefix, the later project's sections replace
//! the earlier ones entirely. The prefix keeps the position where it first
//! appeared, so sidebar order follows the first project that declared it.
//!
//! ## Missing Means Skip
//!
//! A project without a descriptor contributes nothing to the sidebar. A
//! project without a directory produces no banner cards. Neither is an
//! error. A malformed descriptor is, because a silently empty sidebar would
//! ship broken navigation.
//!
//! ## One Card at a Time
//!
//! Banner generation is sequential. Each document is read, described, and
//! rendered before the next one starts, and a failure is reported without
//! stopping the batch.

pub mod banner;
pub mod cards;
pub mod config;
pub mod metadata;
pub mod output;
pub mod sidebar;
pub mod social;
pub mod types;
pub mod versions;

#[cfg(test)]
pub(crate) mod test_helpers;
