//! Shared wiring for identity integration tests.
//!
//! Builds an `IdentityService` over the real adapters: the in-memory
//! registry, an Argon2 hasher with cheap parameters, and a JWT issuer with a
//! fixed key.

use std::num::NonZeroUsize;
use std::sync::Arc;

use argon2::Params;
use mockable::DefaultClock;
use podcast_identity::IdentityService;
use podcast_identity::config::SigningKey;
use podcast_identity::outbound::crypto::{Argon2PasswordHasher, JwtTokenIssuer};
use podcast_identity::outbound::persistence::InMemoryAccountRegistry;

pub type Service = IdentityService<InMemoryAccountRegistry, Argon2PasswordHasher, JwtTokenIssuer>;

/// Service plus handles on the collaborators tests inspect directly.
pub struct Harness {
    pub service: Service,
    pub registry: Arc<InMemoryAccountRegistry>,
    pub tokens: Arc<JwtTokenIssuer>,
}

/// Fresh service with an empty registry.
pub fn harness() -> Harness {
    let params = Params::new(64, 1, 1, None).expect("cheap argon2 params");
    let workers = NonZeroUsize::new(4).expect("non-zero workers");
    let hasher = Arc::new(Argon2PasswordHasher::with_params(params, workers));
    let key = SigningKey::new(vec![b'i'; 32]);
    let tokens = Arc::new(JwtTokenIssuer::new(&key, None, Arc::new(DefaultClock)));
    let registry = Arc::new(InMemoryAccountRegistry::new());
    let service = IdentityService::new(Arc::clone(&registry), hasher, Arc::clone(&tokens));
    Harness {
        service,
        registry,
        tokens,
    }
}
