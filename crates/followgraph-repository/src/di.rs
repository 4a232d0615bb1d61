//! Dependency injection modules using Shaku.
//!
//! - `MySqlFollowGraphModule`: DAO over the MySQL table client
//! - `InMemoryFollowGraphModule`: DAO over the in-memory table client

use crate::dao::{FollowEdgeDaoImpl, FollowEdgeDaoImplParameters, TableSettings};
use crate::memory::{InMemoryFollowEdgeTableClient, InMemoryFollowEdgeTableClientParameters, MemoryTable};
use crate::mysql::{MySqlFollowEdgeTableClient, MySqlFollowEdgeTableClientParameters};
use crate::pool::{DatabasePool, DatabasePoolInterface, DatabasePoolParameters};
use followgraph_config::{AppConfig, TableConfig};
use followgraph_core::{module, FollowGraphResult};
use std::sync::Arc;
use tracing::info;

module! {
    pub MySqlFollowGraphModule {
        components = [
            DatabasePool,
            MySqlFollowEdgeTableClient,
            FollowEdgeDaoImpl,
        ],
        providers = [],
    }
}

module! {
    pub InMemoryFollowGraphModule {
        components = [
            InMemoryFollowEdgeTableClient,
            FollowEdgeDaoImpl,
        ],
        providers = [],
    }
}

/// Connects to MySQL and builds the DAO module.
///
/// Migrations are not run here; call
/// [`DatabasePoolInterface::run_migrations`](crate::DatabasePoolInterface::run_migrations)
/// when the deployment owns the schema.
pub async fn build_mysql_module(config: &AppConfig) -> FollowGraphResult<Arc<MySqlFollowGraphModule>> {
    let db_pool = DatabasePool::connect(&config.database).await?;
    let settings = TableSettings::from(&config.table);

    let module = MySqlFollowGraphModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<MySqlFollowEdgeTableClient>(
            MySqlFollowEdgeTableClientParameters {
                settings: settings.clone(),
            },
        )
        .with_component_parameters::<FollowEdgeDaoImpl>(FollowEdgeDaoImplParameters { settings })
        .build();

    info!(table = %config.table.table_name, "MySQL follow graph module built");
    Ok(Arc::new(module))
}

/// Builds the DAO module over an empty in-memory table.
#[must_use]
pub fn build_in_memory_module(table: &TableConfig) -> Arc<InMemoryFollowGraphModule> {
    let settings = TableSettings::from(table);

    let module = InMemoryFollowGraphModule::builder()
        .with_component_parameters::<InMemoryFollowEdgeTableClient>(
            InMemoryFollowEdgeTableClientParameters {
                settings: settings.clone(),
                table: MemoryTable::default(),
            },
        )
        .with_component_parameters::<FollowEdgeDaoImpl>(FollowEdgeDaoImplParameters { settings })
        .build();

    Arc::new(module)
}
