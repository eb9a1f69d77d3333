// Environment Provider Port (for testability)

/// Environment lookup interface (allows mocking in tests)
pub trait EnvProvider: Send + Sync {
    /// Value of `key`, `None` when unset or not valid unicode
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key`, treating an empty or blank value as unset
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.trim().is_empty())
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;

    /// Mock environment backed by a map
    #[derive(Default, Clone)]
    pub struct MockEnvProvider {
        vars: HashMap<String, String>,
    }

    impl MockEnvProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, key: &str, value: &str) -> Self {
            self.vars.insert(key.to_string(), value.to_string());
            self
        }
    }

    impl EnvProvider for MockEnvProvider {
        fn var(&self, key: &str) -> Option<String> {
            self.vars.get(key).cloned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::MockEnvProvider;
    use super::*;

    #[test]
    fn test_blank_value_is_unset() {
        let env = MockEnvProvider::new().with("ICP_ROOT", "  ");
        assert_eq!(env.var("ICP_ROOT").as_deref(), Some("  "));
        assert!(env.non_empty("ICP_ROOT").is_none());
    }
}
