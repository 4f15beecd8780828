use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// 站点数据与静态资源配置
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// JSON snapshot used to seed the in-memory store; the embedded
    /// default snapshot is used when absent.
    #[serde(default)]
    pub snapshot_path: Option<String>,
    /// Directory holding the admin single-page app.
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { snapshot_path: None, frontend_dir: default_frontend_dir() }
    }
}

fn default_frontend_dir() -> String { "frontend".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file if present, otherwise defaults filled from env vars.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(_) => Self::from_env(),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // 站点配置允许由环境变量覆盖
        self.site.normalize_from_env();
        self.site.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SiteConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(path) = std::env::var("SITE_SNAPSHOT_PATH") {
            if !path.trim().is_empty() {
                self.snapshot_path = Some(path);
            }
        }
        if let Ok(dir) = std::env::var("SITE_FRONTEND_DIR") {
            if !dir.trim().is_empty() {
                self.frontend_dir = dir;
            }
        }
        if matches!(self.snapshot_path.as_deref(), Some(p) if p.trim().is_empty()) {
            self.snapshot_path = None;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.frontend_dir.trim().is_empty() {
            return Err(anyhow!("site.frontend_dir 不能为空"));
        }
        if let Some(p) = &self.snapshot_path {
            if !p.ends_with(".json") {
                return Err(anyhow!("site.snapshot_path 必须是 .json 文件"));
            }
        }
        Ok(())
    }
}
