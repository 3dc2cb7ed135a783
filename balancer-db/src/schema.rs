//! Fixed table layout.

use std::fmt;

/// Storage class of a fixed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
    /// Stored as `INTEGER` 0/1.
    Bool,
}

impl ColumnType {
    const fn sql(&self) -> &'static str {
        match self {
            ColumnType::Integer | ColumnType::Bool => "INTEGER",
            ColumnType::Text => "TEXT",
        }
    }
}

/// A fixed column of a table. `id` and `extra` are implicit and not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
}

const fn col(name: &'static str, ty: ColumnType) -> Column {
    Column { name, ty, nullable: false }
}

const fn nullable(name: &'static str, ty: ColumnType) -> Column {
    Column { name, ty, nullable: true }
}

use ColumnType::{Bool, Integer, Text};

const DEVICE_COLUMNS: &[Column] = &[
    col("name", Text),
    col("type", Text),
    col("version", Text),
    col("requires_vip_ip", Bool),
    col("has_acl", Bool),
    col("supports_vlan", Bool),
];

const LOADBALANCER_COLUMNS: &[Column] = &[
    col("name", Text),
    col("tenant_id", Text),
    nullable("device_id", Integer),
    col("algorithm", Text),
    col("status", Text),
    col("created", Text),
    col("updated", Text),
];

const RSERVER_COLUMNS: &[Column] = &[
    col("sf_id", Integer),
    col("name", Text),
    col("type", Text),
    col("web_host_redir", Text),
    col("redirection_code", Text),
    col("ip_type", Text),
    col("address", Text),
    nullable("port", Integer),
    col("state", Text),
    col("opstate", Text),
    col("description", Text),
    nullable("fail_on_all", Bool),
    col("min_con", Integer),
    col("max_con", Integer),
    col("weight", Integer),
    col("probes", Text),
    nullable("rate_bandwidth", Integer),
    nullable("rate_connection", Integer),
    nullable("backup_rs", Text),
    nullable("backup_rs_port", Integer),
    col("created", Text),
    col("updated", Text),
    col("status", Text),
    nullable("cookie_str", Text),
    col("condition", Text),
];

const PROBE_COLUMNS: &[Column] = &[
    nullable("sf_id", Integer),
    col("name", Text),
    col("type", Text),
    col("description", Text),
    col("probe_interval", Integer),
    col("pass_detect_interval", Integer),
    col("receive_timeout", Integer),
    col("pass_detect_count", Integer),
    col("fail_detect", Integer),
    col("is_routed", Bool),
    nullable("port", Integer),
];

const STICKY_COLUMNS: &[Column] = &[col("lb_id", Integer)];

/// One table per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Devices,
    LoadBalancers,
    RealServers,
    Probes,
    Stickies,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Devices,
        Table::LoadBalancers,
        Table::RealServers,
        Table::Probes,
        Table::Stickies,
    ];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Table::Devices => "devices",
            Table::LoadBalancers => "loadbalancers",
            Table::RealServers => "rservers",
            Table::Probes => "probes",
            Table::Stickies => "stickies",
        }
    }

    /// Fixed columns in storage order, excluding `id` and `extra`.
    #[must_use]
    pub const fn columns(&self) -> &'static [Column] {
        match self {
            Table::Devices => DEVICE_COLUMNS,
            Table::LoadBalancers => LOADBALANCER_COLUMNS,
            Table::RealServers => RSERVER_COLUMNS,
            Table::Probes => PROBE_COLUMNS,
            Table::Stickies => STICKY_COLUMNS,
        }
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns().iter().find(|c| c.name == name)
    }

    /// Columns that get a secondary index for owner lookups.
    const fn indexed(&self) -> &'static [&'static str] {
        match self {
            Table::LoadBalancers => &["tenant_id"],
            Table::RealServers => &["sf_id"],
            Table::Probes => &["sf_id"],
            Table::Stickies => &["lb_id"],
            Table::Devices => &[],
        }
    }

    /// `CREATE TABLE IF NOT EXISTS` plus index statements for this table.
    pub(crate) fn create_sql(&self) -> String {
        let mut defs = vec!["\"id\" INTEGER PRIMARY KEY".to_string()];
        defs.extend(self.columns().iter().map(|c| {
            let null = if c.nullable { "" } else { " NOT NULL" };
            format!("\"{}\" {}{}", c.name, c.ty.sql(), null)
        }));
        defs.push("\"extra\" TEXT NOT NULL DEFAULT '{}'".to_string());

        let mut sql = format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (\n    {}\n);\n",
            self.name(),
            defs.join(",\n    ")
        );
        for column in self.indexed() {
            sql.push_str(&format!(
                "CREATE INDEX IF NOT EXISTS \"idx_{table}_{column}\" ON \"{table}\" (\"{column}\");\n",
                table = self.name(),
            ));
        }
        sql
    }

    /// Quoted column list for `SELECT`: `"id", <fixed...>, "extra"`.
    pub(crate) fn select_list(&self) -> String {
        let mut names = vec!["\"id\"".to_string()];
        names.extend(self.columns().iter().map(|c| format!("\"{}\"", c.name)));
        names.push("\"extra\"".to_string());
        names.join(", ")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
