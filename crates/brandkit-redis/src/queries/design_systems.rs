//! Design system queries against Redis.
//!
//! Each saved design system lives in a hash at
//! `brandkit:{owner}:design_system:{id}` (field `data`), and is indexed per owner
//! in the sorted set `brandkit:{owner}:design_systems:all` scored by creation time.

use crate::client::{RedisError, RedisPool, RedisResult, KEY_PREFIX};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Stored design system. The nested documents are kept as JSON strings so the
/// storage layer does not depend on the domain types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignSystemRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub analysis_json: Option<String>,
    pub colors_json: Option<String>,
    pub typography_json: Option<String>,
    pub spacing_json: Option<String>,
    pub components_json: Option<String>,
    pub created_at: String,
}

fn item_key(owner_id: &str, id: &str) -> String {
    format!("{}:{}:design_system:{}", KEY_PREFIX, owner_id, id)
}

fn index_key(owner_id: &str) -> String {
    format!("{}:{}:design_systems:all", KEY_PREFIX, owner_id)
}

/// Insert a design system and index it under its owner.
pub async fn create_design_system(pool: &RedisPool, row: &DesignSystemRow) -> RedisResult<()> {
    let score = chrono::DateTime::parse_from_rfc3339(&row.created_at)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|_| chrono::Utc::now().timestamp_millis());

    let mut conn = pool.clone();
    let key = item_key(&row.owner_id, &row.id);
    conn.hset::<_, _, _, ()>(&key, "data", serde_json::to_string(row)?).await?;

    let zkey = index_key(&row.owner_id);
    conn.zadd::<_, _, _, ()>(&zkey, &row.id, score).await?;

    debug!(id = %row.id, owner = %row.owner_id, "Stored design system");
    Ok(())
}

/// Fetch one design system owned by `owner_id`.
pub async fn get_design_system(
    pool: &RedisPool,
    owner_id: &str,
    id: &str,
) -> RedisResult<DesignSystemRow> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(item_key(owner_id, id), "data").await?;
    match json {
        Some(j) => Ok(serde_json::from_str(&j)?),
        None => Err(RedisError::NotFound(format!("Design system not found: {}", id))),
    }
}

/// List an owner's design systems, newest first.
pub async fn list_design_systems(
    pool: &RedisPool,
    owner_id: &str,
) -> RedisResult<Vec<DesignSystemRow>> {
    let mut conn = pool.clone();
    let ids: Vec<String> = conn.zrevrange(index_key(owner_id), 0, -1).await?;

    let mut entries = Vec::with_capacity(ids.len());
    for id in ids {
        let mut c = pool.clone();
        let json: Option<String> = c.hget(item_key(owner_id, &id), "data").await?;
        entries.push((id, json));
    }
    Ok(decode_rows(entries))
}

/// Decode `(id, data)` pairs fetched for an index. Index entries whose hash is
/// gone are skipped silently; undecodable hashes are skipped with a warning.
fn decode_rows(entries: Vec<(String, Option<String>)>) -> Vec<DesignSystemRow> {
    entries
        .into_iter()
        .filter_map(|(id, json)| {
            let json = json?;
            match serde_json::from_str::<DesignSystemRow>(&json) {
                Ok(row) => Some(row),
                Err(e) => {
                    warn!(id = %id, error = %e, "Skipping undecodable design system");
                    None
                }
            }
        })
        .collect()
}

/// Delete a design system. Returns `false` when the owner has no such entry.
pub async fn delete_design_system(pool: &RedisPool, owner_id: &str, id: &str) -> RedisResult<bool> {
    let mut conn = pool.clone();
    let removed: i64 = conn.del(item_key(owner_id, id)).await?;
    conn.zrem::<_, _, ()>(index_key(owner_id), id).await?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_scoped_by_owner() {
        assert_eq!(item_key("user_1", "abc"), "brandkit:user_1:design_system:abc");
        assert_eq!(index_key("user_1"), "brandkit:user_1:design_systems:all");
        assert_ne!(item_key("user_1", "abc"), item_key("user_2", "abc"));
    }

    fn sample_row(id: &str) -> DesignSystemRow {
        DesignSystemRow {
            id: id.to_string(),
            owner_id: "user_1".to_string(),
            name: "Acme".to_string(),
            description: String::new(),
            analysis_json: None,
            colors_json: Some("{}".to_string()),
            typography_json: None,
            spacing_json: None,
            components_json: None,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_decode_rows_skips_corrupt_and_missing_entries() {
        let good = serde_json::to_string(&sample_row("ds-1")).unwrap();
        let newer = serde_json::to_string(&sample_row("ds-3")).unwrap();
        let rows = decode_rows(vec![
            ("ds-3".to_string(), Some(newer)),
            ("ds-2".to_string(), Some("{not json".to_string())),
            ("ds-gone".to_string(), None),
            ("ds-1".to_string(), Some(good)),
        ]);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ds-3", "ds-1"]);
    }

    #[test]
    fn test_row_roundtrips_through_json() {
        let row = DesignSystemRow {
            id: "ds-1".to_string(),
            owner_id: "user_1".to_string(),
            name: "Acme".to_string(),
            description: "Fintech for Gen Z".to_string(),
            analysis_json: None,
            colors_json: Some("{}".to_string()),
            typography_json: None,
            spacing_json: None,
            components_json: Some("[]".to_string()),
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_string(&row).unwrap();
        let back: DesignSystemRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "ds-1");
        assert_eq!(back.colors_json.as_deref(), Some("{}"));
        assert!(back.analysis_json.is_none());
    }
}
