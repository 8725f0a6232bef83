// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 已抓取页面实体
///
/// 爬取供应商返回的单个结果页面，按URL模式分类后入库。
/// 以 (网站档案, URL) 为键做幂等写入。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// 页面唯一标识符
    pub id: Uuid,
    /// 所属网站档案ID
    pub website_profile_id: Uuid,
    /// 页面URL
    pub url: String,
    /// 页面类型
    pub page_type: PageType,
    /// 供应商原始页面数据
    pub context: serde_json::Value,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
    /// 更新时间
    pub updated_at: DateTime<FixedOffset>,
}

/// 页面类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    /// 首页
    Home,
    /// 价格页
    Pricing,
    /// 博客页
    Blog,
    /// 关于页
    About,
    /// 联系页
    Contact,
    /// 产品页
    Product,
    /// 其他
    #[default]
    Other,
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PageType::Home => write!(f, "home"),
            PageType::Pricing => write!(f, "pricing"),
            PageType::Blog => write!(f, "blog"),
            PageType::About => write!(f, "about"),
            PageType::Contact => write!(f, "contact"),
            PageType::Product => write!(f, "product"),
            PageType::Other => write!(f, "other"),
        }
    }
}

impl FromStr for PageType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(PageType::Home),
            "pricing" => Ok(PageType::Pricing),
            "blog" => Ok(PageType::Blog),
            "about" => Ok(PageType::About),
            "contact" => Ok(PageType::Contact),
            "product" => Ok(PageType::Product),
            "other" => Ok(PageType::Other),
            _ => Err(()),
        }
    }
}

impl ScrapedPage {
    /// 创建一个新的已抓取页面
    pub fn new(
        website_profile_id: Uuid,
        url: String,
        page_type: PageType,
        context: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            website_profile_id,
            url,
            page_type,
            context,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }
}
