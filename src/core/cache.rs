use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Cache entry with TTL support
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    created_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// TTL-based in-memory cache with thread-safe access
#[derive(Debug)]
pub struct TtlCache<K, V> {
    storage: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    default_ttl: Duration,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            default_ttl: self.default_ttl,
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let mut storage = self.storage.write().ok()?;

        if let Some(entry) = storage.get(key) {
            if entry.is_expired() {
                storage.remove(key);
                None
            } else {
                Some(entry.value.clone())
            }
        } else {
            None
        }
    }

    pub fn insert(&self, key: K, value: V) {
        if let Ok(mut storage) = self.storage.write() {
            storage.insert(key, CacheEntry::new(value, self.default_ttl));
        }
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.storage
            .write()
            .ok()?
            .remove(key)
            .map(|entry| entry.value)
    }

    /// Remove every entry whose key matches the predicate.
    pub fn remove_where<F>(&self, pred: F)
    where
        F: Fn(&K) -> bool,
    {
        if let Ok(mut storage) = self.storage.write() {
            storage.retain(|key, _| !pred(key));
        }
    }

    pub fn clear(&self) {
        if let Ok(mut storage) = self.storage.write() {
            storage.clear();
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        if let Ok(storage) = self.storage.read() {
            storage.get(key).is_some_and(|entry| !entry.is_expired())
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Domain entity a cache key is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Articles,
    Categories,
    Clients,
    Fournisseurs,
    CommandesClients,
    CommandesFournisseurs,
    Ventes,
    MvtStk,
    Roles,
    Utilisateurs,
    Entreprises,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Articles => "articles",
            Entity::Categories => "categories",
            Entity::Clients => "clients",
            Entity::Fournisseurs => "fournisseurs",
            Entity::CommandesClients => "commandes-clients",
            Entity::CommandesFournisseurs => "commandes-fournisseurs",
            Entity::Ventes => "ventes",
            Entity::MvtStk => "mvtstk",
            Entity::Roles => "roles",
            Entity::Utilisateurs => "utilisateurs",
            Entity::Entreprises => "entreprises",
        }
    }
}

/// Entity-scoped cache key, optionally parameterized by record id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    List(Entity),
    Item(Entity, i64),
}

impl CacheKey {
    pub fn entity(&self) -> Entity {
        match self {
            CacheKey::List(entity) | CacheKey::Item(entity, _) => *entity,
        }
    }
}

const DEFAULT_QUERY_TTL: Duration = Duration::from_secs(300);

/// Process-wide query cache shared by the resource services.
///
/// Responses are stored as JSON values so one cache serves every entity
/// type. Entries are mutated only through the designated insert,
/// invalidate, and remove calls; the inner `RwLock` serializes access.
/// A disabled cache (profile `cache_enabled = false`) never hits.
#[derive(Debug, Clone)]
pub struct QueryCache {
    storage: TtlCache<CacheKey, serde_json::Value>,
    enabled: bool,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_TTL, true)
    }
}

impl QueryCache {
    pub fn new(ttl: Duration, enabled: bool) -> Self {
        Self {
            storage: TtlCache::new(ttl),
            enabled,
        }
    }

    pub fn disabled() -> Self {
        Self::new(DEFAULT_QUERY_TTL, false)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let value = self.storage.get(key)?;
        serde_json::from_value(value).ok()
    }

    pub fn put<T: Serialize>(&self, key: CacheKey, value: &T) {
        if !self.enabled {
            return;
        }
        if let Ok(value) = serde_json::to_value(value) {
            self.storage.insert(key, value);
        }
    }

    /// Drop the list key and every item key for an entity. The next read
    /// fetches from the network (lazy refresh).
    pub fn invalidate(&self, entity: Entity) {
        log::debug!("Invalidating {} cache entries", entity.as_str());
        self.storage.remove_where(|key| key.entity() == entity);
    }

    pub fn remove(&self, key: &CacheKey) {
        self.storage.remove(key);
    }

    pub fn clear(&self) {
        self.storage.clear();
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.enabled && self.storage.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_ttl_cache_basic_operations() {
        let cache = TtlCache::new(Duration::from_millis(100));

        cache.insert("key1".to_string(), "value1".to_string());
        assert_eq!(cache.get(&"key1".to_string()), Some("value1".to_string()));
        assert_eq!(cache.get(&"key2".to_string()), None);
    }

    #[test]
    fn test_ttl_expiration() {
        let cache = TtlCache::new(Duration::from_millis(50));

        cache.insert("key".to_string(), "value".to_string());
        assert_eq!(cache.get(&"key".to_string()), Some("value".to_string()));

        thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.get(&"key".to_string()), None);
    }

    #[test]
    fn test_remove_where() {
        let cache = TtlCache::new(Duration::from_secs(10));
        cache.insert("a-1".to_string(), 1);
        cache.insert("a-2".to_string(), 2);
        cache.insert("b-1".to_string(), 3);

        cache.remove_where(|key| key.starts_with("a-"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"b-1".to_string()), Some(3));
    }

    #[test]
    fn test_query_cache_round_trip() {
        let cache = QueryCache::default();
        let key = CacheKey::List(Entity::Articles);

        cache.put(key.clone(), &vec!["a".to_string(), "b".to_string()]);
        let cached: Option<Vec<String>> = cache.get(&key);
        assert_eq!(cached, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_query_cache_invalidate_drops_list_and_items() {
        let cache = QueryCache::default();
        cache.put(CacheKey::List(Entity::Articles), &1);
        cache.put(CacheKey::Item(Entity::Articles, 7), &2);
        cache.put(CacheKey::List(Entity::Categories), &3);

        cache.invalidate(Entity::Articles);

        assert!(!cache.contains(&CacheKey::List(Entity::Articles)));
        assert!(!cache.contains(&CacheKey::Item(Entity::Articles, 7)));
        assert!(cache.contains(&CacheKey::List(Entity::Categories)));
    }

    #[test]
    fn test_disabled_cache_never_hits() {
        let cache = QueryCache::disabled();
        let key = CacheKey::List(Entity::Ventes);

        cache.put(key.clone(), &42);
        let cached: Option<i32> = cache.get(&key);
        assert_eq!(cached, None);
        assert!(!cache.contains(&key));
    }

    #[test]
    fn test_cache_key_entity() {
        assert_eq!(CacheKey::List(Entity::Roles).entity(), Entity::Roles);
        assert_eq!(CacheKey::Item(Entity::Roles, 3).entity(), Entity::Roles);
    }
}
