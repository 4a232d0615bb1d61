//! MySQL table client.

mod follow_edge_table_client;

pub use follow_edge_table_client::*;
