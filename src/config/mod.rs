//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::NotionCredentials;
pub use site::NotionSettings;
pub use site::PropertyNames;
pub use site::{API_KEY_VAR, BASE_URL_VAR, DATABASE_ID_VAR};
