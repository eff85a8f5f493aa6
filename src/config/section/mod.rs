//! Configuration section definitions.
//!
//! Each module corresponds to a section in `hotshade.toml`:
//!
//! | Module    | TOML Section | Purpose                                 |
//! |-----------|--------------|-----------------------------------------|
//! | `sources` | `[sources]`  | Ordered filesystem search roots         |
//! | `stages`  | `[stages]`   | Stage file suffixes (`.vert`, `.frag`)  |
//! | `watch`   | `[watch]`    | Change detection and tick interval      |

mod sources;
mod stages;
mod watch;

pub use sources::SourcesConfig;
pub use stages::StagesConfig;
pub use watch::WatchConfig;
