// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含数据库、服务器、供应商接入和任务生命周期等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 爬取供应商配置
    pub crawl: CrawlSettings,
    /// 关键词建议供应商配置
    pub keywords: KeywordSettings,
    /// 相关性分类器配置
    pub relevancy: RelevancySettings,
    /// 任务生命周期配置
    pub lifecycle: LifecycleSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 爬取供应商配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 供应商API基础URL
    pub base_url: String,
    /// 供应商API密钥
    pub api_key: String,
    /// 爬取最大深度
    pub max_depth: u32,
    /// 单次爬取页面数上限
    pub page_limit: u32,
    /// 轮询间隔（秒）
    pub poll_interval_secs: u64,
    /// 轮询总超时（秒）
    pub poll_timeout_secs: u64,
}

/// 关键词建议供应商配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordSettings {
    /// 供应商API基础URL
    pub base_url: String,
    /// RapidAPI主机名
    pub rapidapi_host: String,
    /// RapidAPI密钥
    pub rapidapi_key: String,
    /// 查询的国家代码
    pub country: String,
    /// 查询的搜索引擎
    pub search_engine: String,
    /// 最低搜索量过滤阈值
    pub min_volume: u64,
    /// 最大并发请求数
    pub max_concurrent: u32,
    /// 每秒持续请求数上限
    pub requests_per_second: u32,
    /// 令牌桶突发容量
    pub burst_capacity: u32,
}

/// 相关性分类器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RelevancySettings {
    /// 分类器API基础URL
    pub base_url: String,
    /// 分类器API密钥
    pub api_key: String,
    /// 使用的模型名称
    pub model: String,
    /// 单批关键词数量
    pub batch_size: usize,
}

/// 任务生命周期配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleSettings {
    /// 即席认领的过期阈值（分钟）
    pub claim_stale_minutes: i64,
    /// 巡检回收的过期阈值（分钟），须不大于即席阈值
    pub sweep_stale_minutes: i64,
    /// 巡检间隔（秒）
    pub sweep_interval_secs: u64,
    /// 每次巡检认领的任务数上限
    pub sweep_batch_size: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB pool settings
            .set_default("database.max_connections", 100)?
            .set_default("database.min_connections", 10)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default crawl vendor settings
            .set_default("crawl.base_url", "https://api.firecrawl.dev")?
            .set_default("crawl.api_key", "")?
            .set_default("crawl.max_depth", 3)?
            .set_default("crawl.page_limit", 25)?
            .set_default("crawl.poll_interval_secs", 3)?
            .set_default("crawl.poll_timeout_secs", 180)?
            // Default keyword vendor settings
            .set_default("keywords.base_url", "https://ahrefs2.p.rapidapi.com")?
            .set_default("keywords.rapidapi_host", "ahrefs2.p.rapidapi.com")?
            .set_default("keywords.rapidapi_key", "")?
            .set_default("keywords.country", "us")?
            .set_default("keywords.search_engine", "google")?
            .set_default("keywords.min_volume", 100)?
            .set_default("keywords.max_concurrent", 5)?
            .set_default("keywords.requests_per_second", 5)?
            .set_default("keywords.burst_capacity", 10)?
            // Default relevancy classifier settings
            .set_default("relevancy.base_url", "https://api.openai.com")?
            .set_default("relevancy.api_key", "")?
            .set_default("relevancy.model", "gpt-4o")?
            .set_default("relevancy.batch_size", 150)?
            // Default lifecycle settings
            .set_default("lifecycle.claim_stale_minutes", 10)?
            .set_default("lifecycle.sweep_stale_minutes", 5)?
            .set_default("lifecycle.sweep_interval_secs", 20)?
            .set_default("lifecycle.sweep_batch_size", 5)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("RANKRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
