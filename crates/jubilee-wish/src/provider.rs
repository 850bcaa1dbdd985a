use async_trait::async_trait;

use crate::error::WishError;

/// An opaque, fallible birthday-wish generator.
///
/// Implementations are external collaborators: the composer treats
/// `generate` as `prompt -> text | failure` and recovers from any failure
/// with the canned fallback.
#[async_trait]
pub trait WishProvider: Send + Sync {
    /// Generate a wish for the given name.
    async fn generate(&self, name: &str) -> Result<String, WishError>;

    /// Generate a wish for someone turning a specific age.
    async fn generate_with_age(&self, name: &str, age: u32) -> Result<String, WishError>;
}
