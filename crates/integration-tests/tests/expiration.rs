//! List expiration and the maintenance pass that purges expired lists

use std::sync::Arc;
use std::time::Duration;
use todo_core::application::{MaintenanceScheduler, TodoManager};
use todo_core::port::id_provider::SequentialIdProvider;
use todo_core::port::time_provider::ManualClock;
use todo_core::port::{KvStore, Maintenance, MaintenanceConfig};
use todo_infra_sqlite::{create_pool, run_migrations, SqliteKvStore, SqliteMaintenance};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

struct Env {
    store: Arc<SqliteKvStore>,
    maintenance: Arc<SqliteMaintenance>,
    clock: Arc<ManualClock>,
}

async fn env() -> Env {
    let pool = create_pool(":memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));

    Env {
        store: Arc::new(SqliteKvStore::new(pool.clone(), clock.clone())),
        maintenance: Arc::new(SqliteMaintenance::new(pool, clock.clone())),
        clock,
    }
}

impl Env {
    fn manager(&self, list_id: &str, ttl: Option<Duration>) -> TodoManager {
        TodoManager::new(
            self.store.clone(),
            list_id,
            Arc::new(SequentialIdProvider::new(list_id)),
            self.clock.clone(),
        )
        .unwrap()
        .with_expiration(ttl)
    }
}

#[tokio::test]
async fn test_list_expires_after_ttl() {
    let env = env().await;
    let list = env.manager("weekly", Some(7 * DAY));

    list.create("water plants").await.unwrap();

    env.clock.advance(6 * DAY);
    assert_eq!(list.list().await.unwrap().len(), 1);

    env.clock.advance(DAY);
    assert!(list.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_every_write_extends_expiry() {
    let env = env().await;
    let list = env.manager("weekly", Some(7 * DAY));

    let todo = list.create("water plants").await.unwrap();
    env.clock.advance(5 * DAY);
    list.toggle(&todo.id).await.unwrap();
    env.clock.advance(5 * DAY);

    let todos = list.list().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert!(todos[0].completed);
}

#[tokio::test]
async fn test_lists_without_ttl_never_expire() {
    let env = env().await;
    let list = env.manager("forever", None);
    list.create("keep me").await.unwrap();

    env.clock.advance(3650 * DAY);
    assert_eq!(list.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_maintenance_purges_only_expired_lists() {
    let env = env().await;
    env.manager("short", Some(DAY)).create("a").await.unwrap();
    env.manager("long", Some(30 * DAY)).create("b").await.unwrap();
    env.manager("forever", None).create("c").await.unwrap();

    env.clock.advance(2 * DAY);

    let stats = env.maintenance.get_stats().await.unwrap();
    assert_eq!(stats.key_count, 3);
    assert_eq!(stats.expired_key_count, 1);

    let scheduler = MaintenanceScheduler::new(
        env.maintenance.clone(),
        MaintenanceConfig::default(),
        Duration::from_secs(3600),
    );
    let stats = scheduler.run_now().await.unwrap();
    assert_eq!(stats.key_count, 2);
    assert_eq!(stats.expired_key_count, 0);

    assert!(env.store.get("short").await.unwrap().is_none());
    assert!(env.store.get("long").await.unwrap().is_some());
    assert!(env.store.get("forever").await.unwrap().is_some());
}
