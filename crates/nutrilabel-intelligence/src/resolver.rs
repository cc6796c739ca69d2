// ABOUTME: Pluggable per-ingredient resolver interface implemented by name-indexed backends
// ABOUTME: Resolves a recipe's lines sequentially, pairing each line with its result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use nutrilabel_core::errors::AppResult;
use nutrilabel_core::models::{IngredientLine, ResolutionResult, ResolutionSource};

/// A backend that maps one ingredient name to a per-100g profile
///
/// Absence is not an error: an unknown name resolves to
/// [`ResolutionResult::unmatched`]. `Err` is reserved for the backend itself
/// being unusable (connection lost, query failed).
#[async_trait]
pub trait IngredientResolver: Send + Sync {
    /// Source tag attached to this backend's matches
    fn source(&self) -> ResolutionSource;

    /// Resolve one ingredient name
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be queried.
    async fn resolve(&self, name: &str) -> AppResult<ResolutionResult>;
}

/// Resolve every line in order, stopping at the first backend failure
///
/// # Errors
///
/// Propagates the first error returned by `resolver`.
pub async fn resolve_lines<R>(
    resolver: &R,
    lines: &[IngredientLine],
) -> AppResult<Vec<(IngredientLine, ResolutionResult)>>
where
    R: IngredientResolver + ?Sized,
{
    let mut resolved = Vec::with_capacity(lines.len());
    for line in lines {
        let result = resolver.resolve(&line.name).await?;
        resolved.push((line.clone(), result));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::NutritionTable;
    use nutrilabel_core::errors::{AppError, ErrorCode};

    struct BrokenBackend;

    #[async_trait]
    impl IngredientResolver for BrokenBackend {
        fn source(&self) -> ResolutionSource {
            ResolutionSource::Database
        }

        async fn resolve(&self, _name: &str) -> AppResult<ResolutionResult> {
            Err(AppError::database("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_resolve_lines_preserves_order() {
        let table = NutritionTable::builtin();
        let lines = vec![
            IngredientLine::grams("glorp", 50.0),
            IngredientLine::grams("Rice", 100.0),
        ];
        let resolved = resolve_lines(&table, &lines).await.unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].0.name, "glorp");
        assert!(!resolved[0].1.is_matched());
        assert!(resolved[1].1.is_matched());
    }

    #[tokio::test]
    async fn test_resolve_lines_propagates_backend_failure() {
        let lines = vec![IngredientLine::grams("rice", 100.0)];
        let error = resolve_lines(&BrokenBackend, &lines).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::DatabaseError);
    }
}
