//! Session-scoped cache of previously fetched users.
//!
//! Keyed by user id. Bounded caches evict the least-frequently-read entry
//! when a new id is inserted at capacity, breaking ties by insertion age.

use std::collections::HashMap;

use tracing::debug;

use crate::config::DEFAULT_USERS_CACHE_MAX_LIMIT;
use crate::models::{Guild, User, UserConnection};

#[derive(Debug, Clone)]
struct Entry {
    user: User,
    hits: u64,
    inserted_at: u64,
}

#[derive(Debug, Clone)]
pub struct UsersCache {
    entries: HashMap<String, Entry>,
    max_entries: Option<usize>,
    /// Monotonic insert counter used as the eviction tie-breaker.
    clock: u64,
}

impl Default for UsersCache {
    fn default() -> Self {
        Self::new(DEFAULT_USERS_CACHE_MAX_LIMIT)
    }
}

impl UsersCache {
    /// A cache holding at most `max_entries` users. `0` means unbounded.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries: (max_entries > 0).then_some(max_entries),
            clock: 0,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.entries.contains_key(user_id)
    }

    /// Look up a user and count the read toward its eviction priority.
    pub fn get(&mut self, user_id: &str) -> Option<&User> {
        self.entries.get_mut(user_id).map(|entry| {
            entry.hits += 1;
            &entry.user
        })
    }

    /// Look up a user without touching its eviction priority.
    pub fn peek(&self, user_id: &str) -> Option<&User> {
        self.entries.get(user_id).map(|entry| &entry.user)
    }

    pub fn get_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.entries.get_mut(user_id).map(|entry| {
            entry.hits += 1;
            &mut entry.user
        })
    }

    /// Insert a user under its own id, returning the entry it replaced.
    ///
    /// Replacing an existing id never evicts another entry.
    pub fn insert(&mut self, user: User) -> Option<User> {
        if !self.entries.contains_key(&user.id) {
            self.evict_if_full();
        }

        self.clock += 1;
        let entry = Entry {
            user,
            hits: 0,
            inserted_at: self.clock,
        };

        self.entries
            .insert(entry.user.id.clone(), entry)
            .map(|old| old.user)
    }

    pub fn remove(&mut self, user_id: &str) -> Option<User> {
        self.entries.remove(user_id).map(|entry| entry.user)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the `connections` slot of a cached user.
    ///
    /// Returns `false` and leaves the cache untouched when the user isn't
    /// cached.
    pub fn refresh_connections(&mut self, user_id: &str, connections: Vec<UserConnection>) -> bool {
        match self.entries.get_mut(user_id) {
            Some(entry) => {
                entry.user.connections = Some(connections);
                true
            }
            None => false,
        }
    }

    /// Replace the `guilds` slot of a cached user.
    ///
    /// Returns `false` and leaves the cache untouched when the user isn't
    /// cached.
    pub fn refresh_guilds(&mut self, user_id: &str, guilds: Vec<Guild>) -> bool {
        match self.entries.get_mut(user_id) {
            Some(entry) => {
                entry.user.guilds = Some(guilds);
                true
            }
            None => false,
        }
    }

    fn evict_if_full(&mut self) {
        let Some(max) = self.max_entries else {
            return;
        };

        while self.entries.len() >= max {
            let victim = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| (entry.hits, entry.inserted_at))
                .map(|(id, _)| id.clone());

            match victim {
                Some(id) => {
                    debug!(user_id = %id, "evicting user from cache");
                    self.entries.remove(&id);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscordModel;
    use serde_json::json;

    fn user(id: &str) -> User {
        User::from_value(json!({ "id": id, "username": format!("user-{id}") })).unwrap()
    }

    #[test]
    fn default_is_bounded_at_configured_limit() {
        let cache = UsersCache::default();
        assert_eq!(cache.max_entries(), Some(DEFAULT_USERS_CACHE_MAX_LIMIT));
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_limit_is_unbounded() {
        assert_eq!(UsersCache::new(0).max_entries(), None);
        assert_eq!(UsersCache::unbounded().max_entries(), None);
    }

    #[test]
    fn insert_get_remove() {
        let mut cache = UsersCache::unbounded();
        assert!(cache.insert(user("1")).is_none());
        assert!(cache.contains("1"));
        assert_eq!(cache.get("1").map(|u| u.id.as_str()), Some("1"));
        assert_eq!(cache.remove("1").map(|u| u.id), Some("1".to_string()));
        assert!(cache.get("1").is_none());
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut cache = UsersCache::unbounded();
        cache.insert(user("1"));
        let mut newer = user("1");
        newer.username = Some("renamed".to_string());

        let old = cache.insert(newer).unwrap();

        assert_eq!(old.username.as_deref(), Some("user-1"));
        assert_eq!(
            cache.peek("1").and_then(|u| u.username.as_deref()),
            Some("renamed")
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn evicts_least_frequently_read() {
        let mut cache = UsersCache::new(2);
        cache.insert(user("a"));
        cache.insert(user("b"));
        cache.get("a");
        cache.get("a");
        cache.get("b");

        cache.insert(user("c"));

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn ties_evict_oldest_insert() {
        let mut cache = UsersCache::new(2);
        cache.insert(user("a"));
        cache.insert(user("b"));

        cache.insert(user("c"));

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn peek_does_not_count_as_read() {
        let mut cache = UsersCache::new(2);
        cache.insert(user("a"));
        cache.insert(user("b"));
        cache.peek("a");
        cache.get("b");

        cache.insert(user("c"));

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
    }

    #[test]
    fn replacing_at_capacity_does_not_evict() {
        let mut cache = UsersCache::new(2);
        cache.insert(user("a"));
        cache.insert(user("b"));

        cache.insert(user("a"));

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("b"));
    }

    #[test]
    fn refresh_slots_only_touch_existing_entries() {
        let mut cache = UsersCache::unbounded();
        cache.insert(user("1"));

        assert!(cache.refresh_connections("1", Vec::new()));
        assert!(cache.refresh_guilds("1", Vec::new()));
        assert!(!cache.refresh_connections("2", Vec::new()));
        assert!(!cache.refresh_guilds("2", Vec::new()));

        let cached = cache.peek("1").unwrap();
        assert_eq!(cached.connections.as_deref(), Some(&[][..]));
        assert_eq!(cached.guilds.as_deref(), Some(&[][..]));
        assert!(!cache.contains("2"));
    }

    #[test]
    fn clear_empties_cache() {
        let mut cache = UsersCache::unbounded();
        cache.insert(user("1"));
        cache.insert(user("2"));
        cache.clear();
        assert!(cache.is_empty());
    }
}
