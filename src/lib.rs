//! # Interview Prep
//!
//! 一个用于管理面试题的终端客户端
//!
//! ## 架构设计
//!
//! 本系统采用三层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 封装题库后端的 HTTP 调用
//! - `QuestionApi` - 后端能力接口（测试中可替换为内存实现）
//! - `QuestionBankClient` - 基于 reqwest 的真实实现
//!
//! ### ② 会话层（Session）
//! - `session` - 持有界面状态（列表缓存、两份草稿、筛选条件）
//! - 编排四类操作：筛选刷新、创建、生成、删除
//! - 共享错误槽位与加载标志
//!
//! ### ③ 界面层（App）
//! - `app` - 交互循环：读命令 → 执行 → 渲染
//! - `commands` - 控制台命令解析
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod session;

// 重新导出常用类型
pub use app::App;
pub use clients::{QuestionApi, QuestionBankClient};
pub use config::Config;
pub use error::{AppError, Result};
pub use models::{
    Difficulty, GenerateRequest, NewQuestion, Question, QuestionFilters, QuestionType, Stats,
};
pub use session::Session;
