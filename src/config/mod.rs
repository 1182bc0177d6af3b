mod credentials;
mod loader;
mod types;

pub use credentials::{
    provider_from_config, CredentialProvider, NoCredentials, SecureString, StaticCredentials,
    StorageCredentials, StorageError, TOKEN_KEY,
};
pub use loader::{ConfigError, BASE_URL_ENV};
pub use types::{ApiConfig, AuthConfig, Config, SearchConfig};
