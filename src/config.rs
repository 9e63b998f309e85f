use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 导出文档配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// PDF 标题
    pub document_title: String,
    /// 下载文件名 (不含扩展名)
    pub file_stem: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            document_title: "HARTRON Bill Details".to_string(),
            file_stem: "bill".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// 默认值 + HARTRON_ 前缀环境变量 (例如 HARTRON_SERVER__PORT=9000)
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("export.document_title", defaults.export.document_title)?
            .set_default("export.file_stem", defaults.export.file_stem)?
            .add_source(
                config::Environment::with_prefix("HARTRON")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 从环境变量加载配置，格式错误时回退到默认值
    pub fn from_env() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("配置加载失败, 使用默认配置: {}", e);
                Self::default()
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
