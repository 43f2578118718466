use clap::ValueEnum;

use super::filter::TypeFilter;
use super::graph::{EdgeKind, NodeKind};

/// Dataset figures listed in the controls panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tally {
    Users,
    Roles,
    Databases,
    PrivilegeGrants,
    RoleAssignments,
    DanglingEdges,
}

/// Display language for labels, panel headings and status lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    pub fn node_kind(self, kind: NodeKind) -> &'static str {
        match (self, kind) {
            (Self::En, NodeKind::User) => "User",
            (Self::En, NodeKind::Role) => "Role",
            (Self::En, NodeKind::Database) => "Database",
            (Self::En, NodeKind::Table) => "Table",
            (Self::Ja, NodeKind::User) => "ユーザー",
            (Self::Ja, NodeKind::Role) => "ロール",
            (Self::Ja, NodeKind::Database) => "データベース",
            (Self::Ja, NodeKind::Table) => "テーブル",
        }
    }

    pub fn edge_kind(self, kind: EdgeKind) -> &'static str {
        match (self, kind) {
            (Self::En, EdgeKind::Membership) => "Membership",
            (Self::En, EdgeKind::Grant) => "Grant",
            (Self::Ja, EdgeKind::Membership) => "メンバーシップ",
            (Self::Ja, EdgeKind::Grant) => "権限付与",
        }
    }

    pub fn type_filter(self, filter: TypeFilter) -> &'static str {
        match (self, filter) {
            (Self::En, TypeFilter::All) => "All",
            (Self::En, TypeFilter::Users) => "Users",
            (Self::En, TypeFilter::Roles) => "Roles",
            (Self::En, TypeFilter::Tables) => "Tables",
            (Self::Ja, TypeFilter::All) => "すべて",
            (Self::Ja, TypeFilter::Users) => "ユーザー",
            (Self::Ja, TypeFilter::Roles) => "ロール",
            (Self::Ja, TypeFilter::Tables) => "テーブル",
        }
    }

    pub fn type_field(self) -> &'static str {
        match self {
            Self::En => "Type",
            Self::Ja => "タイプ",
        }
    }

    pub fn email_field(self) -> &'static str {
        match self {
            Self::En => "Email",
            Self::Ja => "メール",
        }
    }

    pub fn comment_field(self) -> &'static str {
        match self {
            Self::En => "Description",
            Self::Ja => "説明",
        }
    }

    pub fn related_heading(self, count: usize) -> String {
        match self {
            Self::En => format!("Related permissions ({count}):"),
            Self::Ja => format!("関連権限 ({count}件):"),
        }
    }

    pub fn connected_heading(self) -> &'static str {
        match self {
            Self::En => "Connected permissions:",
            Self::Ja => "接続された権限:",
        }
    }

    pub fn role_assignments_heading(self) -> &'static str {
        match self {
            Self::En => "Role assignments:",
            Self::Ja => "ロール割り当て:",
        }
    }

    pub fn granted_by(self, grantor: &str) -> String {
        match self {
            Self::En => format!("by {grantor}"),
            Self::Ja => format!("付与者: {grantor}"),
        }
    }

    pub fn overflow(self, hidden: usize) -> String {
        match self {
            Self::En => format!("... +{hidden} more"),
            Self::Ja => format!("... 他 {hidden} 件"),
        }
    }

    pub fn status_loading(self) -> &'static str {
        match self {
            Self::En => "Loading permissions data...",
            Self::Ja => "データを読み込み中...",
        }
    }

    pub fn status_loaded(self) -> &'static str {
        match self {
            Self::En => "Permissions data loaded",
            Self::Ja => "データが正常に読み込まれました",
        }
    }

    pub fn status_sample_missing(self, location: &str) -> String {
        match self {
            Self::En => format!("Showing sample data ({location} not found)"),
            Self::Ja => format!("サンプルデータを表示中 ({location}が見つかりません)"),
        }
    }

    pub fn status_sample_error(self) -> &'static str {
        match self {
            Self::En => "Showing sample data (failed to read permissions data)",
            Self::Ja => "サンプルデータを表示中 (データ読み込みエラー)",
        }
    }

    pub fn status_update_detected(self) -> &'static str {
        match self {
            Self::En => "New data detected. Reloading...",
            Self::Ja => "新しいデータが検出されました。更新中...",
        }
    }

    pub fn status_exported(self, path: &str) -> String {
        match self {
            Self::En => format!("Exported to {path}"),
            Self::Ja => format!("{path} にエクスポートしました"),
        }
    }

    pub fn status_export_failed(self) -> &'static str {
        match self {
            Self::En => "Export failed",
            Self::Ja => "エクスポートに失敗しました",
        }
    }

    pub fn app_title(self) -> &'static str {
        match self {
            Self::En => "Snowflake grants",
            Self::Ja => "Snowflake 権限",
        }
    }

    pub fn graph_totals(self, nodes: usize, edges: usize) -> String {
        match self {
            Self::En => format!("nodes: {nodes}  edges: {edges}"),
            Self::Ja => format!("ノード: {nodes}  エッジ: {edges}"),
        }
    }

    pub fn visible_totals(self, nodes: usize, edges: usize) -> String {
        match self {
            Self::En => format!("visible: {nodes} nodes / {edges} edges"),
            Self::Ja => format!("表示中: ノード {nodes} / エッジ {edges}"),
        }
    }

    pub fn snapshot(self, timestamp: &str) -> String {
        match self {
            Self::En => format!("snapshot: {timestamp}"),
            Self::Ja => format!("取得日時: {timestamp}"),
        }
    }

    pub fn controls_heading(self) -> &'static str {
        match self {
            Self::En => "Controls",
            Self::Ja => "操作",
        }
    }

    pub fn filter_label(self) -> &'static str {
        match self {
            Self::En => "Show",
            Self::Ja => "表示",
        }
    }

    pub fn search_label(self) -> &'static str {
        match self {
            Self::En => "Search",
            Self::Ja => "検索",
        }
    }

    pub fn suggestions_hint(self) -> &'static str {
        match self {
            Self::En => "No exact match. Did you mean:",
            Self::Ja => "一致する項目がありません。候補:",
        }
    }

    pub fn reset_button(self) -> &'static str {
        match self {
            Self::En => "Reset",
            Self::Ja => "リセット",
        }
    }

    pub fn reload_button(self) -> &'static str {
        match self {
            Self::En => "Reload",
            Self::Ja => "再読み込み",
        }
    }

    pub fn export_button(self) -> &'static str {
        match self {
            Self::En => "Export JSON",
            Self::Ja => "JSONエクスポート",
        }
    }

    pub fn detailed_view_toggle(self) -> &'static str {
        match self {
            Self::En => "Detailed view",
            Self::Ja => "詳細表示",
        }
    }

    pub fn live_layout_toggle(self) -> &'static str {
        match self {
            Self::En => "Live layout",
            Self::Ja => "レイアウトを動かす",
        }
    }

    pub fn dataset_heading(self) -> &'static str {
        match self {
            Self::En => "Dataset",
            Self::Ja => "データセット",
        }
    }

    pub fn tally(self, tally: Tally, count: usize) -> String {
        let label = match (self, tally) {
            (Self::En, Tally::Users) => "users",
            (Self::En, Tally::Roles) => "roles",
            (Self::En, Tally::Databases) => "databases",
            (Self::En, Tally::PrivilegeGrants) => "privilege grants",
            (Self::En, Tally::RoleAssignments) => "role assignments",
            (Self::En, Tally::DanglingEdges) => "edges to unknown nodes",
            (Self::Ja, Tally::Users) => "ユーザー",
            (Self::Ja, Tally::Roles) => "ロール",
            (Self::Ja, Tally::Databases) => "データベース",
            (Self::Ja, Tally::PrivilegeGrants) => "権限付与",
            (Self::Ja, Tally::RoleAssignments) => "ロール割り当て",
            (Self::Ja, Tally::DanglingEdges) => "不明なノードへのエッジ",
        };
        format!("{label}: {count}")
    }

    pub fn selection_heading(self) -> &'static str {
        match self {
            Self::En => "Selection",
            Self::Ja => "選択中",
        }
    }

    pub fn selection_hint(self) -> &'static str {
        match self {
            Self::En => "Click a node to see its grants.",
            Self::Ja => "ノードをクリックすると権限を表示します。",
        }
    }

    pub fn all_related_heading(self) -> &'static str {
        match self {
            Self::En => "All related permissions",
            Self::Ja => "すべての関連権限",
        }
    }

    pub fn empty_view(self) -> &'static str {
        match self {
            Self::En => "No nodes match the current filter and search.",
            Self::Ja => "現在のフィルターと検索に一致するノードはありません。",
        }
    }
}
