//! Name certificate content and generation history.
//!
//! Names themselves are produced elsewhere; this module validates what the
//! client sends back for export, lays it out as printable HTML, and models
//! the read-only generation log.

mod certificate;
mod generation_log;

pub use certificate::{certificate_html, CharacterMeaning, NameData, UserData};
pub use generation_log::{page_size, GenerationLogEntry, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
