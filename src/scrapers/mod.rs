pub mod credentials;
pub mod land;
pub mod traits;
pub mod types;

pub use credentials::{CredentialBundle, EnvCredentials};
pub use land::{LandApiFetcher, RetryPolicy};
pub use traits::{CredentialProvider, PageFetcher, PageOutcome};
pub use types::{PageRequest, SearchParams, TradeType};
