#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};

    use crate::schema::{ConfigNode, Decl, Schema};

    #[derive(Debug, Default, PartialEq)]
    pub struct ServerConfig {
        pub name: String,
        pub motd: Option<String>,
        pub debug: bool,
        pub server: ServerSection,
        pub database: DbSection,
    }

    impl ConfigNode for ServerConfig {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .value(
                    Decl::new("name").comment("Server name"),
                    |c| &c.name,
                    |c| &mut c.name,
                )
                .optional("motd", |c| &c.motd, |c| &mut c.motd)
                .value("debug", |c| &c.debug, |c| &mut c.debug)
                .node(
                    Decl::new("server").comment("Game server settings"),
                    |c| &c.server,
                    |c| &mut c.server,
                )
                .node("database", |c| &c.database, |c| &mut c.database)
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct ServerSection {
        pub max_players: i64,
        pub port: u16,
        pub limits: Limits,
    }

    impl ConfigNode for ServerSection {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .value(
                    Decl::new("max_players")
                        .segment("maxPlayers")
                        .comments(["Max players", "Default: 20"]),
                    |s| &s.max_players,
                    |s| &mut s.max_players,
                )
                .value("port", |s| &s.port, |s| &mut s.port)
                .node("limits", |s| &s.limits, |s| &mut s.limits)
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Limits {
        pub max_players: i64,
    }

    impl ConfigNode for Limits {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema.value(
                Decl::new("max_players").comment("Per-team cap"),
                |l| &l.max_players,
                |l| &mut l.max_players,
            )
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct DbSection {
        pub url: Option<String>,
        pub pool_size: u32,
    }

    impl ConfigNode for DbSection {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .optional(
                    Decl::new("url").comment("Connection string URL"),
                    |d| &d.url,
                    |d| &mut d.url,
                )
                .value(
                    Decl::new("pool_size").comment("Connection pool size"),
                    |d| &d.pool_size,
                    |d| &mut d.pool_size,
                )
        }
    }

    pub fn sample_server() -> ServerConfig {
        ServerConfig {
            name: "survival".into(),
            motd: Some("Welcome".into()),
            debug: false,
            server: ServerSection {
                max_players: 40,
                port: 25565,
                limits: Limits { max_players: 8 },
            },
            database: DbSection {
                url: None,
                pool_size: 5,
            },
        }
    }

    // -- Embedded base section --------------------------------------------------

    #[derive(Debug, Default, PartialEq)]
    pub struct BaseSettings {
        pub enabled: bool,
        pub priority: i32,
    }

    impl ConfigNode for BaseSettings {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .value(
                    Decl::new("enabled").comment("Whether the module is enabled"),
                    |b| &b.enabled,
                    |b| &mut b.enabled,
                )
                .value("priority", |b| &b.priority, |b| &mut b.priority)
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct ModuleConfig {
        pub label: String,
        pub limits: Limits,
        pub base: BaseSettings,
    }

    impl ConfigNode for ModuleConfig {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .value("label", |m| &m.label, |m| &mut m.label)
                .node("limits", |m| &m.limits, |m| &mut m.limits)
                .embed(|m| &m.base, |m| &mut m.base)
        }
    }

    /// Base section holding a nested node, embedded by [`TeamConfig`].
    #[derive(Debug, Default, PartialEq)]
    pub struct Quota {
        pub quota: Limits,
        pub shared: bool,
    }

    impl ConfigNode for Quota {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .node(
                    Decl::new("quota").comment("Team quota"),
                    |q| &q.quota,
                    |q| &mut q.quota,
                )
                .value("shared", |q| &q.shared, |q| &mut q.shared)
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct TeamConfig {
        pub team: String,
        pub base: Quota,
    }

    impl ConfigNode for TeamConfig {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .value("team", |t| &t.team, |t| &mut t.team)
                .embed(|t| &t.base, |t| &mut t.base)
        }
    }

    // -- Opaque serde values ----------------------------------------------------

    #[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Mode {
        #[default]
        Fast,
        Slow,
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct EnumConfig {
        pub mode: Mode,
        pub tags: Vec<String>,
    }

    impl ConfigNode for EnumConfig {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .value("mode", |c| &c.mode, |c| &mut c.mode)
                .value("tags", |c| &c.tags, |c| &mut c.tags)
        }
    }

    /// An `Option` declared through `value` instead of `optional`.
    #[derive(Debug, Default, PartialEq)]
    pub struct PlainOptional {
        pub motd: Option<String>,
        pub port: u16,
    }

    impl ConfigNode for PlainOptional {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .value("motd", |p| &p.motd, |p| &mut p.motd)
                .value("port", |p| &p.port, |p| &mut p.port)
        }
    }

    // -- Broken schemas ---------------------------------------------------------

    #[derive(Debug, Default)]
    pub struct Empty;

    impl ConfigNode for Empty {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
        }
    }

    #[derive(Debug, Default)]
    pub struct Clashing {
        pub a: i32,
        pub b: i32,
    }

    impl ConfigNode for Clashing {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .value(Decl::new("a").segment("same"), |c| &c.a, |c| &mut c.a)
                .value(Decl::new("b").segment("same"), |c| &c.b, |c| &mut c.b)
        }
    }

    #[derive(Debug, Default)]
    pub struct DottedSegment {
        pub port: u16,
    }

    impl ConfigNode for DottedSegment {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema.value(
                Decl::new("port").segment("net.port"),
                |d| &d.port,
                |d| &mut d.port,
            )
        }
    }

    #[derive(Debug, Default)]
    pub struct Broken {
        pub value: i32,
    }

    impl ConfigNode for Broken {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema.value("value", |b| &b.value, |b| &mut b.value)
        }

        fn construct() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
            Err("Broken refuses to be constructed".into())
        }
    }

    #[derive(Debug, Default)]
    pub struct HasBroken {
        pub broken: Broken,
    }

    impl ConfigNode for HasBroken {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema.node("broken", |h| &h.broken, |h| &mut h.broken)
        }
    }

    #[derive(Debug, Default)]
    pub struct Unstorable {
        pub huge: u64,
        pub name: String,
    }

    impl ConfigNode for Unstorable {
        fn schema(schema: Schema<Self>) -> Schema<Self> {
            schema
                .value("huge", |u| &u.huge, |u| &mut u.huge)
                .value("name", |u| &u.name, |u| &mut u.name)
        }
    }
}
