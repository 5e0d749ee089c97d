//! @ai:module:intent Code layout variants compared by the benchmark
//! @ai:module:layer domain
//! @ai:module:public_api Variant
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Annotation evaluation mode of a generated tree
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    NoFuture,
    WithFuture,
}

impl Variant {
    /// Run order of a full benchmark.
    pub const ALL: [Variant; 2] = [Variant::NoFuture, Variant::WithFuture];

    /// @ai:intent Directory and top-level package name of the variant
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::NoFuture => "example_no_future",
            Variant::WithFuture => "example_with_future",
        }
    }

    /// @ai:intent Whether generated modules defer annotation evaluation
    /// @ai:effects pure
    pub fn defers_annotations(&self) -> bool {
        matches!(self, Variant::WithFuture)
    }

    /// @ai:intent Dotted module path of a module inside this variant's package
    /// @ai:example (WithFuture, "aggregate") -> "example_with_future.aggregate"
    /// @ai:effects pure
    pub fn qualified(&self, module: &str) -> String {
        format!("{}.{}", self.as_str(), module)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_with_future_defers() {
        assert!(!Variant::NoFuture.defers_annotations());
        assert!(Variant::WithFuture.defers_annotations());
    }

    #[test]
    fn test_run_order_starts_without_future() {
        assert_eq!(Variant::ALL[0], Variant::NoFuture);
        assert_eq!(Variant::ALL[1], Variant::WithFuture);
    }

    #[test]
    fn test_qualified_module_name() {
        assert_eq!(
            Variant::NoFuture.qualified("memory_probe"),
            "example_no_future.memory_probe"
        );
    }
}
