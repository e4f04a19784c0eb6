//! Configuration module

mod site;

pub use site::RepositoryConfig;
pub use site::SiteConfig;
pub use site::{ACCESS_TOKEN_ENV, CONFIG_FILE};
