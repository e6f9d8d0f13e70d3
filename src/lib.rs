//! # Map Poster
//!
//! The core of a map poster designer: sizing a poster design for export and
//! packing a whole design into a compact, URL-safe share link.
//!
//! A poster is a [`poster::PosterConfig`]: a location, a cartographic style
//! with one of its palettes, typography, format and layer switches. Everything
//! in this crate works on that one value.
//!
//! ```text
//! PosterConfig ──► calculate_target_resolution ──► Rasterizer ──► PNG
//!        │
//!        └──────► encode_config ──► #config=<payload> ──► decode_config ──► PosterPatch
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`poster`] | Poster design types: location, palette, typography, format, layers |
//! | [`styles`] | Static registry of map styles and their palettes |
//! | [`export`] | Export sizing, the [`export::Rasterizer`] seam, batch export with rayon |
//! | [`codec`] | Share link codec: compact record ⇄ LZ-compressed URI-safe text |
//! | [`config`] | `poster.toml` loading, validation, merging; poster documents |
//! | [`naming`] | Slugs and file names for exported posters |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Long Edge Is Sacred
//!
//! An export preset names a long edge (its `height`) and a DPI. Changing the
//! poster's aspect ratio or orientation only ever moves the short edge, so a
//! "Print 300dpi" export is always 18 inches on its long side no matter which
//! format the user picked.
//!
//! ## Share Links Are Partial
//!
//! Decoding yields a [`poster::PosterPatch`], not a full config. Fields a link
//! leaves out stay at whatever the editor already shows. Style and palette are
//! carried as registry ids; only an AI-generated custom palette travels inline,
//! since the receiving side has no other way to know its colors.
//!
//! ## Decoding Never Fails Loudly
//!
//! Links are pasted by hand, truncated by chat apps and produced by older
//! builds. [`codec::decode_config`] returns `None` for anything it cannot
//! use and logs the reason through `tracing`; the caller decides what to show.

pub mod codec;
pub mod config;
pub mod export;
pub mod naming;
pub mod output;
pub mod poster;
pub mod styles;
