//! Factory for creating store backends.

use std::sync::Arc;

use mentorship_core::config::StoreConfig;
use mentorship_core::error::{MentorshipError, MentorshipResult};
use mentorship_core::stores::MemoryStore;
use mentorship_core::traits::{MentorshipStore, StoreBackend};
use tracing::info;

/// Factory for creating store backends.
pub struct StoreFactory;

impl StoreFactory {
    /// Create the store selected by `config`.
    pub async fn create(config: &StoreConfig) -> MentorshipResult<Arc<dyn MentorshipStore>> {
        match config.backend {
            StoreBackend::Memory => {
                info!("Using in-memory store");
                Ok(Arc::new(MemoryStore::new()))
            }

            #[cfg(feature = "mongodb")]
            StoreBackend::MongoDb => {
                let store = crate::mongo::MongoStore::connect(config).await?;
                Ok(Arc::new(store))
            }

            #[allow(unreachable_patterns)]
            other => Err(MentorshipError::Configuration(format!(
                "Store backend '{}' is not enabled. Rebuild with the '{}' feature.",
                other.as_str(),
                other.as_str()
            ))),
        }
    }

    /// Backends compiled into this build.
    pub fn available() -> Vec<StoreBackend> {
        [
            Some(StoreBackend::Memory),
            cfg!(feature = "mongodb").then_some(StoreBackend::MongoDb),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend() {
        let store = StoreFactory::create(&StoreConfig::default()).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_available_backends() {
        let backends = StoreFactory::available();
        assert_eq!(backends[0], StoreBackend::Memory);
        assert_eq!(
            backends.contains(&StoreBackend::MongoDb),
            cfg!(feature = "mongodb")
        );
    }

    #[cfg(not(feature = "mongodb"))]
    #[tokio::test]
    async fn test_disabled_backend_is_configuration_error() {
        let config = StoreConfig {
            backend: StoreBackend::MongoDb,
            ..Default::default()
        };
        let err = match StoreFactory::create(&config).await {
            Ok(_) => panic!("mongodb backend should be unavailable"),
            Err(err) => err,
        };
        assert!(matches!(err, MentorshipError::Configuration(_)));
        assert_eq!(StoreFactory::available(), vec![StoreBackend::Memory]);
    }
}
