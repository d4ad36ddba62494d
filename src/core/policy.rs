//! Cache consistency policy applied after each mutation.
//!
//! The policy is explicit and uniform across entities:
//!
//! | mutation | policy     | effect                                        |
//! |----------|------------|-----------------------------------------------|
//! | create   | Invalidate | list key dropped, refetched on next read      |
//! | update   | Invalidate | list key dropped, refetched on next read      |
//! | delete   | Refetch    | list refetched before success is reported     |
//!
//! Deletes force the stronger refetch so a destructive action never
//! leaves a stale list view behind.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Drop the affected keys; the next read fetches lazily.
    Invalidate,
    /// Refetch the list immediately, before the caller sees success.
    Refetch,
}

pub fn cache_policy(mutation: Mutation) -> CachePolicy {
    match mutation {
        Mutation::Create | Mutation::Update => CachePolicy::Invalidate,
        Mutation::Delete => CachePolicy::Refetch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletes_refetch_everything_else_invalidates() {
        assert_eq!(cache_policy(Mutation::Create), CachePolicy::Invalidate);
        assert_eq!(cache_policy(Mutation::Update), CachePolicy::Invalidate);
        assert_eq!(cache_policy(Mutation::Delete), CachePolicy::Refetch);
    }
}
