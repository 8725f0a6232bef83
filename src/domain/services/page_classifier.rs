// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::domain::models::scraped_page::PageType;

/// URL路径分类规则，按声明顺序匹配，首个命中者生效
static RULES: Lazy<Vec<(PageType, Regex)>> = Lazy::new(|| {
    vec![
        (
            PageType::Pricing,
            Regex::new(r"(?i)/(pricing|plans|buy|subscribe)").unwrap(),
        ),
        (
            PageType::Blog,
            Regex::new(r"(?i)/(blog|news|articles|post)s?").unwrap(),
        ),
        (
            PageType::About,
            Regex::new(r"(?i)/(about|company|our-story)").unwrap(),
        ),
        (
            PageType::Contact,
            Regex::new(r"(?i)/(contact|contact-us|support|help)").unwrap(),
        ),
        (
            PageType::Product,
            Regex::new(r"(?i)/(product|item|service|store|shop)s?").unwrap(),
        ),
        (PageType::Home, Regex::new(r"^/$").unwrap()),
    ]
});

/// 按URL路径模式对页面分类
///
/// 无法解析的URL或未命中任何规则的路径归入 [`PageType::Other`]。
pub fn classify_url(url: &str) -> PageType {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => return PageType::Other,
    };

    for (page_type, regex) in RULES.iter() {
        if regex.is_match(&path) {
            return *page_type;
        }
    }

    PageType::Other
}
