//! lenspost: a bot that posts a never-before-used stock photo with an AI
//! caption on a fixed schedule.
//!
//! One run walks a straight line: verify publisher credentials, load the
//! ledger of already-posted ids, sample the photo API for an unposted
//! photo, download it in two resolutions, caption the small one, publish
//! the original, record the id. Any failure skips the rest of the run and
//! the temp files are removed either way.

pub mod caption;
pub mod config;
pub mod deps;
pub mod fetch;
pub mod ledger;
pub mod retry;
pub mod runner;
pub mod selector;
pub mod traits;
pub mod types;
