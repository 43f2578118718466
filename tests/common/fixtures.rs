//! Permissions documents used across the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use grant_graph::permissions::{Dataset, Graph, build_graph};

/// One user holding one role that can read one database.
pub const SINGLE_CHAIN_JSON: &str = r#"{
    "users": [{"name": "U1"}],
    "roles": [{"name": "R1"}],
    "databases": [{"name": "D1"}],
    "user_grants": {"U1": [{"role": "R1"}]},
    "role_grants": {"R1": [{"privilege": "SELECT", "granted_on": "DATABASE", "name": "D1"}]}
}"#;

/// A role reaching a database only through a qualified table grant.
pub const TABLE_GRANT_JSON: &str = r#"{
    "users": [],
    "roles": [{"name": "REPORTER"}],
    "databases": [{"name": "PROD_DB"}],
    "role_grants": {
        "REPORTER": [
            {"privilege": "SELECT", "granted_on": "TABLE", "name": "PROD_DB.SCHEMA1.USERS"}
        ]
    }
}"#;

/// Grants and memberships that point at names missing from the entity lists.
pub const DANGLING_JSON: &str = r#"{
    "users": [{"name": "ALICE"}, {"name": "BOB"}],
    "roles": [{"name": "ANALYST"}],
    "databases": [{"name": "SALES"}],
    "user_grants": {
        "ALICE": [{"role": "ANALYST", "granted_by": "USERADMIN"}, {"role": "GHOST_ROLE"}],
        "BOB": [{"role": ""}, {}]
    },
    "role_grants": {
        "ANALYST": [
            {"privilege": "USAGE", "granted_on": "DATABASE", "name": "SALES", "granted_by": "SYSADMIN"},
            {"privilege": "USAGE", "granted_on": "WAREHOUSE", "name": "COMPUTE_WH"},
            {"privilege": "SELECT", "granted_on": "TABLE", "name": "ARCHIVE.PUBLIC.ORDERS"}
        ],
        "GHOST_ROLE": [
            {"privilege": "USAGE", "granted_on": "DATABASE", "name": "SALES"}
        ]
    },
    "table_grants": {"SALES.PUBLIC.ORDERS": [{"privilege": "SELECT"}]}
}"#;

pub fn dataset(raw: &str) -> Dataset {
    serde_json::from_str(raw).expect("fixture parses")
}

pub fn graph(raw: &str) -> Arc<Graph> {
    Arc::new(build_graph(&dataset(raw)))
}

pub fn sample_graph() -> Arc<Graph> {
    Arc::new(build_graph(&Dataset::sample()))
}

/// A role granted on `count` databases, for exercising listing caps.
pub fn wide_role_json(count: usize) -> String {
    let databases = (0..count)
        .map(|index| format!(r#"{{"name": "DB{index:02}"}}"#))
        .collect::<Vec<_>>()
        .join(",");
    let grants = (0..count)
        .map(|index| {
            format!(r#"{{"privilege": "USAGE", "granted_on": "DATABASE", "name": "DB{index:02}"}}"#)
        })
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"{{"users": [], "roles": [{{"name": "WIDE"}}], "databases": [{databases}],
            "role_grants": {{"WIDE": [{grants}]}}}}"#
    )
}
