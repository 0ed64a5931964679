//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let site_id = builder.site_id("main");
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic values
///
/// The same test name always yields the same data, so failures reproduce.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (seed derived from the name's hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_get_all_sites");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Site id in the crawler's stored form (underscore separated)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let site_id = TestDataBuilder::new(7).site_id("news");
    /// assert_eq!(site_id, "test_site_7_news");
    /// ```
    pub fn site_id(&self, suffix: &str) -> String {
        format!("test_site_{}_{}", self.seed, suffix)
    }

    /// URL belonging to a generated site
    pub fn page_url(&self, site_suffix: &str, page: usize) -> String {
        format!(
            "https://{}.example.test/page/{}",
            self.site_id(site_suffix).replace('_', "-"),
            page
        )
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::fmt::Debug;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that values never increase from one element to the next
    pub fn assert_non_increasing<T: PartialOrd + Debug>(values: &[T], context: &str) {
        for pair in values.windows(2) {
            assert!(
                pair[0] >= pair[1],
                "{}: expected non-increasing order, found {:?} before {:?} in {:?}",
                context,
                pair[0],
                pair[1],
                values
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::assertions::*;
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::from_test_name("my_test");
        let builder2 = TestDataBuilder::from_test_name("my_test");

        assert_eq!(builder1.site_id("a"), builder2.site_id("a"));
        assert_eq!(builder1.page_url("a", 1), builder2.page_url("a", 1));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.site_id("a"), builder2.site_id("a"));
    }

    #[test]
    fn test_page_url_uses_hyphenated_host() {
        let url = TestDataBuilder::new(3).page_url("blog", 9);
        assert_eq!(url, "https://test-site-3-blog.example.test/page/9");
    }

    #[test]
    fn test_assert_non_increasing_accepts_ties() {
        assert_non_increasing(&[9, 5, 5, 0], "ties");
    }

    #[test]
    #[should_panic(expected = "non-increasing")]
    fn test_assert_non_increasing_rejects_growth() {
        assert_non_increasing(&[1, 2], "growth");
    }
}
