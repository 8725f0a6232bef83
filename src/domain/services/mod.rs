// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了复杂的
/// 业务规则和领域逻辑，协调多个领域对象来完成业务操作。
///
/// 包含的服务：
/// - 富集流水线（enrichment_service）：种子关键词的扇出查询、合并与排序
/// - 关键词去重器（keyword_deduplicator）：按文本保留首见条目
/// - 关键词工作流（keyword_workflow_service）：面向档案的两级流水线编排与缓存
/// - 分层打分器（keyword_scorer）：难度主导、搜索量决胜的纯函数打分
/// - 页面分类器（page_classifier）：按URL路径模式归类抓取页面
/// - 限速查询器（rate_limited_fetcher）：令牌桶与并发上限约束下的扇出调用
/// - 相关性流水线（relevancy_service）：分批分类与成员对账
/// - 任务生命周期（scrape_job_service）：抓取任务的创建、认领、轮询与终态
pub mod enrichment_service;
pub mod keyword_deduplicator;
pub mod keyword_scorer;
pub mod keyword_workflow_service;
pub mod page_classifier;
pub mod rate_limited_fetcher;
pub mod relevancy_service;
pub mod scrape_job_service;
