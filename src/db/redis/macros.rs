/// Read-through caching over [`Cache`](crate::db::Cache).
///
/// Returns the cached value when the key is present. Otherwise awaits the
/// block, queues the result for a background write with the given TTL, and
/// returns it. A failed cache read (Redis down, stale payload) is logged and
/// treated as a miss. Must be used inside a function returning `AppResult`.
///
/// # Example
/// ```rust,ignore
/// let games: Vec<Game> = cached!(cache, CacheKey::ClusterMembers(3), 3600, async {
///     catalog.find_by_cluster_id(3).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let hit = match $cache.get_from_cache(&$key).await {
            Ok(hit) => hit,
            Err(e) => {
                ::tracing::warn!(key = %$key, error = %e, "Cache read failed, falling back to source");
                None
            }
        };
        match hit {
            Some(cached) => Ok(cached),
            None => {
                let value = $block.await?;
                $cache.set_in_background(&$key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
