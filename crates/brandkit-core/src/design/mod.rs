//! Design system module.
//!
//! Domain models for generated design systems and the storage seam used to
//! save, list and delete them. Saved design systems are immutable; every
//! lookup is scoped by owner.

pub mod model;

use async_trait::async_trait;
use brandkit_redis::{design_systems, RedisError, RedisPool};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::{BrandkitConfig, StorageBackend};
use crate::error::{BrandkitError, BrandkitResult};
pub use model::{ComponentCode, DesignSummary, DesignSystem, DesignSystemData, GeneratedComponent};

/// Persistence for saved design systems.
#[async_trait]
pub trait DesignStore: Send + Sync {
    /// Store a design system under its owner.
    async fn save(&self, design: &DesignSystem) -> BrandkitResult<()>;

    /// Fetch one design system. Another owner's id is `DesignSystemNotFound`.
    async fn get(&self, owner_id: &str, id: &str) -> BrandkitResult<DesignSystem>;

    /// All design systems of an owner, newest first.
    async fn list(&self, owner_id: &str) -> BrandkitResult<Vec<DesignSystem>>;

    /// Delete a design system. Returns `false` when nothing was removed.
    async fn delete(&self, owner_id: &str, id: &str) -> BrandkitResult<bool>;
}

/// Redis-backed store.
#[derive(Clone)]
pub struct RedisDesignStore {
    pool: RedisPool,
}

impl RedisDesignStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Connect to Redis at `url`.
    pub async fn connect(url: &str) -> BrandkitResult<Self> {
        let pool = brandkit_redis::init_pool(url).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DesignStore for RedisDesignStore {
    async fn save(&self, design: &DesignSystem) -> BrandkitResult<()> {
        let row = design.to_row()?;
        design_systems::create_design_system(&self.pool, &row).await?;
        Ok(())
    }

    async fn get(&self, owner_id: &str, id: &str) -> BrandkitResult<DesignSystem> {
        match design_systems::get_design_system(&self.pool, owner_id, id).await {
            Ok(row) => DesignSystem::from_row(row),
            Err(RedisError::NotFound(_)) => Err(BrandkitError::DesignSystemNotFound(id.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, owner_id: &str) -> BrandkitResult<Vec<DesignSystem>> {
        let rows = design_systems::list_design_systems(&self.pool, owner_id).await?;
        Ok(designs_from_rows(rows))
    }

    async fn delete(&self, owner_id: &str, id: &str) -> BrandkitResult<bool> {
        Ok(design_systems::delete_design_system(&self.pool, owner_id, id).await?)
    }
}

/// Map stored rows to design systems, skipping rows missing a required part.
fn designs_from_rows(rows: Vec<design_systems::DesignSystemRow>) -> Vec<DesignSystem> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id.clone();
            DesignSystem::from_row(row)
                .map_err(|e| warn!(id = %id, error = %e, "Skipping unreadable design system"))
                .ok()
        })
        .collect()
}

/// Open the store selected by `config.storage`.
pub async fn open_store(config: &BrandkitConfig) -> BrandkitResult<Arc<dyn DesignStore>> {
    match config.storage {
        StorageBackend::Redis => Ok(Arc::new(RedisDesignStore::connect(&config.redis_url).await?)),
        StorageBackend::Memory => {
            warn!("Using in-memory storage; saved design systems are lost on exit");
            Ok(Arc::new(MemoryDesignStore::new()))
        }
    }
}

/// Process-local store, used by tests and `storage = "memory"`.
#[derive(Default)]
pub struct MemoryDesignStore {
    // owner -> designs in save order
    designs: RwLock<HashMap<String, Vec<DesignSystem>>>,
}

impl MemoryDesignStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DesignStore for MemoryDesignStore {
    async fn save(&self, design: &DesignSystem) -> BrandkitResult<()> {
        let mut designs = self.designs.write().await;
        let owned = designs.entry(design.owner_id.clone()).or_default();
        owned.retain(|d| d.id != design.id);
        owned.push(design.clone());
        debug!(id = %design.id, owner = %design.owner_id, "Stored design system in memory");
        Ok(())
    }

    async fn get(&self, owner_id: &str, id: &str) -> BrandkitResult<DesignSystem> {
        self.designs
            .read()
            .await
            .get(owner_id)
            .and_then(|owned| owned.iter().find(|d| d.id == id))
            .cloned()
            .ok_or_else(|| BrandkitError::DesignSystemNotFound(id.to_string()))
    }

    async fn list(&self, owner_id: &str) -> BrandkitResult<Vec<DesignSystem>> {
        let designs = self.designs.read().await;
        let mut owned: Vec<DesignSystem> = designs
            .get(owner_id)
            .map(|owned| owned.iter().rev().cloned().collect())
            .unwrap_or_default();
        // Stable: equal timestamps keep the newest save first.
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn delete(&self, owner_id: &str, id: &str) -> BrandkitResult<bool> {
        let mut designs = self.designs.write().await;
        let Some(owned) = designs.get_mut(owner_id) else {
            return Ok(false);
        };
        let before = owned.len();
        owned.retain(|d| d.id != id);
        Ok(owned.len() < before)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::palette::{analyze_locally, PaletteGenerator};
    use crate::spacing::generate_spacing;
    use crate::typography::TypographyGenerator;

    pub fn sample_data() -> DesignSystemData {
        let analysis = analyze_locally("Modern fintech app for Gen Z");
        DesignSystemData {
            colors: PaletteGenerator::new(16).generate_palette(&analysis).unwrap(),
            typography: TypographyGenerator::with_seed(1).generate_typography_system("modern", None),
            spacing: generate_spacing(),
            components: vec![GeneratedComponent {
                name: "Button".to_string(),
                variant: "primary".to_string(),
                description: "Primary action".to_string(),
                category: "button".to_string(),
                code: ComponentCode {
                    react: "<button />".to_string(),
                    vue: "<button />".to_string(),
                    svelte: "<button />".to_string(),
                    html: "<button></button>".to_string(),
                    css: ".btn {}".to_string(),
                },
            }],
        }
    }

    pub fn sample_design(owner: &str, name: &str) -> DesignSystem {
        DesignSystem::new(owner, name, "Modern fintech app for Gen Z", Some(analyze_locally("fintech")), sample_data())
    }
}
