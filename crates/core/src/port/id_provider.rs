// ID Provider Port (for deterministic testing)

/// ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Generate a new unique entry ID
    fn generate_id(&self) -> String;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Sequential provider (`entry-1`, `entry-2`, ...) for tests and demos
#[derive(Default)]
pub struct SequentialIdProvider {
    next: std::sync::atomic::AtomicU64,
}

impl IdProvider for SequentialIdProvider {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
        format!("entry-{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_ids_unique() {
        let provider = UuidProvider;
        let ids: HashSet<_> = (0..1000).map(|_| provider.generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_sequential_ids() {
        let provider = SequentialIdProvider::default();
        assert_eq!(provider.generate_id(), "entry-1");
        assert_eq!(provider.generate_id(), "entry-2");
    }
}
