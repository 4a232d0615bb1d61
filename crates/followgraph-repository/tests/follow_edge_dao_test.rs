//! Integration tests for FollowEdgeDaoImpl over MySqlFollowEdgeTableClient.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use followgraph_config::AppConfig;
use followgraph_core::{FollowEdge, FollowGraphError, HasComponent};
use followgraph_repository::{
    build_mysql_module, AttributeValue, DatabasePoolInterface, FollowEdgeDao, FollowEdgeDaoImpl,
    FollowEdgeTableClient, MySqlFollowEdgeTableClient, QueryExpression, TableSettings,
};
use futures::TryStreamExt;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

fn dao_with_page_size(db: &TestDatabase, page_size: usize) -> FollowEdgeDaoImpl {
    let settings = TableSettings {
        page_size,
        ..TableSettings::default()
    };
    let client = MySqlFollowEdgeTableClient::new(db.pool(), settings.clone());
    FollowEdgeDaoImpl::new(Arc::new(client), settings)
}

fn from_usernames(edges: &[FollowEdge]) -> HashSet<String> {
    edges.iter().map(|e| e.from_username.clone()).collect()
}

#[tokio::test]
async fn test_create_and_list_follows() {
    let db = TestDatabase::new().await;
    let dao = dao_with_page_size(&db, 100);

    let edge = dao
        .create_follow_edge("alice", "bob")
        .await
        .expect("Failed to create edge");
    assert_eq!(edge, FollowEdge::new("alice", "bob"));

    let follows = dao
        .get_all_follows("alice")
        .expect("Invalid argument")
        .try_collect_all()
        .await
        .expect("Query failed");
    assert_eq!(follows, vec![FollowEdge::new("alice", "bob")]);
}

#[tokio::test]
async fn test_followers_use_reverse_index() {
    let db = TestDatabase::new().await;
    let dao = dao_with_page_size(&db, 100);

    dao.create_follow_edge("alice", "bob").await.unwrap();
    dao.create_follow_edge("carol", "bob").await.unwrap();
    dao.create_follow_edge("bob", "dave").await.unwrap();

    let followers = dao
        .get_all_followers("bob")
        .unwrap()
        .try_collect_all()
        .await
        .expect("Query failed");

    let expected: HashSet<String> = ["alice", "carol"].iter().map(|s| (*s).to_string()).collect();
    assert_eq!(from_usernames(&followers), expected);
    assert!(followers.iter().all(|e| e.to_username == "bob"));
}

#[tokio::test]
async fn test_create_is_idempotent() {
    let db = TestDatabase::new().await;
    let dao = dao_with_page_size(&db, 100);

    dao.create_follow_edge("alice", "bob").await.unwrap();
    dao.create_follow_edge("alice", "bob").await.unwrap();

    let follows = dao.get_all_follows("alice").unwrap().try_collect_all().await.unwrap();
    assert_eq!(follows.len(), 1);
}

#[tokio::test]
async fn test_unknown_account_lists_are_empty() {
    let db = TestDatabase::new().await;
    let dao = dao_with_page_size(&db, 100);

    assert!(dao.get_all_follows("ghost").unwrap().try_collect_all().await.unwrap().is_empty());
    assert!(dao.get_all_followers("ghost").unwrap().try_collect_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_walks_every_page() {
    let db = TestDatabase::new().await;
    let dao = dao_with_page_size(&db, 2);

    for to in ["a", "b", "c", "d", "e"] {
        dao.create_follow_edge("alice", to).await.unwrap();
    }
    for from in ["u1", "u2", "u3"] {
        dao.create_follow_edge(from, "alice").await.unwrap();
    }

    let follows: Vec<FollowEdge> = dao.get_all_follows("alice").unwrap().try_collect().await.unwrap();
    let targets: Vec<&str> = follows.iter().map(|e| e.to_username.as_str()).collect();
    assert_eq!(targets, vec!["a", "b", "c", "d", "e"]);

    let followers = dao.get_all_followers("alice").unwrap().try_collect_all().await.unwrap();
    assert_eq!(followers.len(), 3);
}

#[tokio::test]
async fn test_invalid_arguments_write_nothing() {
    let db = TestDatabase::new().await;
    let dao = dao_with_page_size(&db, 100);

    assert!(matches!(
        dao.create_follow_edge("bob", "").await,
        Err(FollowGraphError::InvalidArgument(_))
    ));
    assert!(matches!(dao.get_all_follows(""), Err(FollowGraphError::InvalidArgument(_))));
    assert!(matches!(dao.get_all_followers(""), Err(FollowGraphError::InvalidArgument(_))));

    let follows = dao.get_all_follows("bob").unwrap().try_collect_all().await.unwrap();
    assert!(follows.is_empty());
}

#[tokio::test]
async fn test_trailing_space_usernames_are_distinct_keys() {
    let db = TestDatabase::new().await;
    let dao = dao_with_page_size(&db, 100);

    dao.create_follow_edge("alice", "bob").await.unwrap();
    dao.create_follow_edge("alice", "bob ").await.unwrap();

    let follows = dao.get_all_follows("alice").unwrap().try_collect_all().await.unwrap();
    assert_eq!(
        follows,
        vec![FollowEdge::new("alice", "bob"), FollowEdge::new("alice", "bob ")]
    );

    let followers = dao.get_all_followers("bob ").unwrap().try_collect_all().await.unwrap();
    assert_eq!(followers, vec![FollowEdge::new("alice", "bob ")]);
}

#[tokio::test]
async fn test_unknown_index_is_a_store_failure() {
    let db = TestDatabase::new().await;
    let client = MySqlFollowEdgeTableClient::new(db.pool(), TableSettings::default());

    let mut values = HashMap::new();
    values.insert(":toUsername".to_string(), AttributeValue::s("bob"));
    let expression = QueryExpression::new()
        .with_index_name("no_such_index")
        .with_key_condition_expression("toUsername = :toUsername")
        .with_expression_attribute_values(values);

    let err = client.query_page(&expression).await.unwrap_err();
    assert!(matches!(err, FollowGraphError::StoreFailure(_)));
    assert!(err.to_string().contains("does not have the specified index"));
}

#[tokio::test]
async fn test_mysql_module_resolves_dao() {
    let db = TestDatabase::new().await;
    let mut config = AppConfig::default();
    config.database = db.config().clone();

    let module = build_mysql_module(&config).await.expect("Failed to build module");
    let dao: Arc<dyn FollowEdgeDao> = module.resolve();
    dao.create_follow_edge("alice", "bob").await.unwrap();

    let followers = dao.get_all_followers("bob").unwrap().try_collect_all().await.unwrap();
    assert_eq!(followers, vec![FollowEdge::new("alice", "bob")]);

    let pool: Arc<dyn DatabasePoolInterface> = module.resolve();
    pool.health_check().await.expect("Health check failed");
}
