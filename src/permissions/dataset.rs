use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Optional text field that keeps an explicit `null` apart from an absent key.
///
/// `None` is an absent key, `Some(None)` a literal `null`.
pub type Nullable = Option<Option<String>>;

fn nullable<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Nullable, D::Error> {
    Option::<String>::deserialize(deserializer).map(Some)
}

fn text(field: &Nullable) -> Option<&str> {
    field.as_ref()?.as_deref()
}

fn present(value: &str) -> Nullable {
    Some(Some(value.to_owned()))
}

/// Snapshot of account permissions as exported by the fetcher.
///
/// `users`, `roles` and `databases` are required; the grant maps default to
/// empty and keep document order. Fields this model does not name are kept in
/// each record's `extra` map so an export writes back what was read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub timestamp: Nullable,
    pub roles: Vec<RoleEntry>,
    pub users: Vec<UserEntry>,
    pub databases: Vec<DatabaseEntry>,
    #[serde(default)]
    pub role_grants: IndexMap<String, Vec<PrivilegeGrant>>,
    #[serde(default)]
    pub user_grants: IndexMap<String, Vec<RoleAssignment>>,
    #[serde(default)]
    pub role_memberships: IndexMap<String, Vec<MembershipGrant>>,
    #[serde(default)]
    pub table_grants: IndexMap<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserEntry {
    pub name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub email: Nullable,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub comment: Nullable,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub comment: Nullable,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseEntry {
    pub name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub comment: Nullable,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of `SHOW GRANTS TO ROLE`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrivilegeGrant {
    pub privilege: String,
    pub granted_on: String,
    pub name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub granted_by: Nullable,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of `SHOW GRANTS TO USER`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub role: Nullable,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub granted_by: Nullable,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of `SHOW GRANTS OF ROLE`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MembershipGrant {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub grantee_name: Nullable,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub granted_by: Nullable,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserEntry {
    pub fn email(&self) -> Option<&str> {
        text(&self.email)
    }

    pub fn comment(&self) -> Option<&str> {
        text(&self.comment)
    }
}

impl RoleEntry {
    pub fn comment(&self) -> Option<&str> {
        text(&self.comment)
    }
}

impl DatabaseEntry {
    pub fn comment(&self) -> Option<&str> {
        text(&self.comment)
    }
}

impl RoleAssignment {
    pub fn role(&self) -> Option<&str> {
        text(&self.role)
    }

    pub fn granted_by(&self) -> Option<&str> {
        text(&self.granted_by)
    }
}

impl MembershipGrant {
    pub fn grantee_name(&self) -> Option<&str> {
        text(&self.grantee_name)
    }

    pub fn granted_by(&self) -> Option<&str> {
        text(&self.granted_by)
    }
}

/// Object class a privilege grant applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantTarget {
    Database,
    Table,
    Other,
}

impl PrivilegeGrant {
    pub fn granted_by(&self) -> Option<&str> {
        text(&self.granted_by)
    }

    pub fn target(&self) -> GrantTarget {
        if self.granted_on.eq_ignore_ascii_case("DATABASE") {
            GrantTarget::Database
        } else if self.granted_on.eq_ignore_ascii_case("TABLE") {
            GrantTarget::Table
        } else {
            GrantTarget::Other
        }
    }

    /// Database a grant resolves to, or `None` for object classes that are not drawn.
    pub fn database_name(&self) -> Option<&str> {
        match self.target() {
            GrantTarget::Database => Some(self.name.as_str()),
            GrantTarget::Table => Some(owning_database(&self.name)),
            GrantTarget::Other => None,
        }
    }
}

/// Leading component of a qualified `DB.SCHEMA.TABLE` name.
pub fn owning_database(qualified: &str) -> &str {
    qualified
        .split_once('.')
        .map(|(database, _)| database)
        .unwrap_or(qualified)
}

impl Dataset {
    pub fn timestamp(&self) -> Option<&str> {
        text(&self.timestamp)
    }

    /// Rejects shapes the graph builder cannot represent faithfully.
    pub fn validate(&self) -> Result<(), String> {
        check_names("user", self.users.iter().map(|user| user.name.as_str()))?;
        check_names("role", self.roles.iter().map(|role| role.name.as_str()))?;
        check_names(
            "database",
            self.databases.iter().map(|database| database.name.as_str()),
        )?;

        for (role, grants) in &self.role_grants {
            if role.trim().is_empty() {
                return Err("role_grants contains an entry with an empty role name".to_owned());
            }
            if let Some(grant) = grants.iter().find(|grant| grant.name.trim().is_empty()) {
                return Err(format!(
                    "role_grants for {role} contains a {} grant without an object name",
                    grant.privilege
                ));
            }
        }

        if self.user_grants.keys().any(|user| user.trim().is_empty()) {
            return Err("user_grants contains an entry with an empty user name".to_owned());
        }

        Ok(())
    }

    pub fn role_grant_count(&self) -> usize {
        self.role_grants.values().map(Vec::len).sum()
    }

    pub fn user_grant_count(&self) -> usize {
        self.user_grants.values().map(Vec::len).sum()
    }

    /// Built-in dataset shown when the primary source cannot be loaded.
    pub fn sample() -> Self {
        fn role(name: &str, comment: &str) -> RoleEntry {
            RoleEntry {
                name: name.to_owned(),
                comment: present(comment),
                extra: Map::new(),
            }
        }

        fn user(name: &str, email: &str) -> UserEntry {
            UserEntry {
                name: name.to_owned(),
                email: present(email),
                comment: None,
                extra: Map::new(),
            }
        }

        fn database(name: &str, comment: &str) -> DatabaseEntry {
            DatabaseEntry {
                name: name.to_owned(),
                comment: present(comment),
                extra: Map::new(),
            }
        }

        fn grant(privilege: &str, granted_on: &str, name: &str) -> PrivilegeGrant {
            PrivilegeGrant {
                privilege: privilege.to_owned(),
                granted_on: granted_on.to_owned(),
                name: name.to_owned(),
                granted_by: None,
                extra: Map::new(),
            }
        }

        fn assignment(role: &str) -> RoleAssignment {
            RoleAssignment {
                role: present(role),
                granted_by: present("USERADMIN"),
                extra: Map::new(),
            }
        }

        fn membership(grantee: &str) -> MembershipGrant {
            MembershipGrant {
                grantee_name: present(grantee),
                granted_by: present("USERADMIN"),
                extra: Map::new(),
            }
        }

        Self {
            timestamp: present(&chrono::Utc::now().to_rfc3339()),
            roles: vec![
                role("ACCOUNTADMIN", "Account administrator role"),
                role("SYSADMIN", "System administrator role"),
                role("USERADMIN", "User administrator role"),
                role("PUBLIC", "Default public role"),
                role("DATA_ANALYST", "Data analyst role"),
                role("DATA_ENGINEER", "Data engineer role"),
            ],
            users: vec![
                user("ADMIN_USER", "admin@company.com"),
                user("ANALYST_USER", "analyst@company.com"),
                user("ENGINEER_USER", "engineer@company.com"),
                user("READONLY_USER", "readonly@company.com"),
            ],
            databases: vec![
                database("PROD_DB", "Production database"),
                database("DEV_DB", "Development database"),
                database("ANALYTICS_DB", "Analytics database"),
            ],
            role_grants: IndexMap::from([
                (
                    "DATA_ANALYST".to_owned(),
                    vec![
                        grant("SELECT", "TABLE", "PROD_DB.SCHEMA1.USERS"),
                        grant("SELECT", "TABLE", "ANALYTICS_DB.PUBLIC.REPORTS"),
                    ],
                ),
                (
                    "DATA_ENGINEER".to_owned(),
                    vec![
                        grant("ALL", "DATABASE", "DEV_DB"),
                        grant("INSERT", "TABLE", "PROD_DB.SCHEMA1.LOGS"),
                    ],
                ),
            ]),
            user_grants: IndexMap::from([
                (
                    "ANALYST_USER".to_owned(),
                    vec![assignment("DATA_ANALYST"), assignment("PUBLIC")],
                ),
                (
                    "ENGINEER_USER".to_owned(),
                    vec![assignment("DATA_ENGINEER"), assignment("PUBLIC")],
                ),
            ]),
            role_memberships: IndexMap::from([
                ("DATA_ANALYST".to_owned(), vec![membership("ANALYST_USER")]),
                ("DATA_ENGINEER".to_owned(), vec![membership("ENGINEER_USER")]),
            ]),
            table_grants: IndexMap::new(),
        }
    }
}

fn check_names<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> Result<(), String> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(format!("a {kind} entry has an empty name"));
        }
        if !seen.insert(name) {
            return Err(format!("duplicate {kind} name {name}"));
        }
    }
    Ok(())
}
