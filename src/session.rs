//! 会话状态层
//!
//! 核心职责：持有界面状态并编排四类操作
//!
//! 状态槽位：
//! 1. 题目列表缓存（每次成功拉取后整体替换）
//! 2. 新题目草稿
//! 3. 生成请求草稿
//! 4. 当前筛选条件
//!
//! 另有共享的错误槽位与加载标志。所有失败都在调用处捕获，
//! 映射为展示文案写入错误槽位；不重试、不做部分失败恢复。

use crate::clients::QuestionApi;
use crate::error::{AppError, Result};
use crate::models::{
    Difficulty, GenerateRequest, NewQuestion, Question, QuestionFilters, QuestionType, Stats,
};
use tracing::{debug, info, warn};

/// 会话状态
///
/// - 只依赖 `QuestionApi` 能力，不持有任何传输细节
/// - 单任务内顺序执行，网络调用之间不会交叠
pub struct Session<C: QuestionApi> {
    client: C,
    /// 题目列表缓存（非权威副本）
    pub questions: Vec<Question>,
    /// 新题目草稿
    pub draft: NewQuestion,
    /// 生成请求草稿
    pub generate_draft: GenerateRequest,
    /// 当前筛选条件
    pub filters: QuestionFilters,
    /// 共享错误槽位
    pub error: Option<String>,
    /// 共享加载标志，包裹每次在途请求
    pub loading: bool,
}

impl<C: QuestionApi> Session<C> {
    /// 创建新的会话
    pub fn new(client: C) -> Self {
        Self {
            client,
            questions: Vec::new(),
            draft: NewQuestion::default(),
            generate_draft: GenerateRequest::default(),
            filters: QuestionFilters::default(),
            error: None,
            loading: false,
        }
    }

    /// 按当前筛选条件重新拉取列表
    ///
    /// 成功：整体替换缓存并清空错误槽位
    /// 失败：只写错误槽位，保留上一次的列表
    pub async fn refresh(&mut self) {
        self.begin_call("拉取题目列表");
        let outcome = self.client.list_questions(&self.filters).await;
        self.end_call();

        match outcome {
            Ok(questions) => {
                info!("✓ 已拉取 {} 道题目", questions.len());
                self.questions = questions;
                self.error = None;
            }
            Err(e) => self.surface(e, "获取题目列表失败"),
        }
    }

    /// 更新筛选条件并刷新列表
    ///
    /// 无论一次改动多少字段，只发出一次列表请求；
    /// 任一字段无法解析时整体不生效，也不发请求
    pub async fn apply_filters(&mut self, assignments: &[(String, String)]) -> Result<()> {
        let mut updated = self.filters.clone();
        for (key, value) in assignments {
            set_filter_field(&mut updated, key, value)?;
        }
        self.filters = updated;
        self.refresh().await;
        Ok(())
    }

    /// 更新新题目草稿字段
    pub fn edit_draft(&mut self, assignments: &[(String, String)]) -> Result<()> {
        for (key, value) in assignments {
            match key.as_str() {
                "job" | "job_title" => self.draft.job_title = value.clone(),
                "type" | "question_type" => {
                    self.draft.question_type = QuestionType::find(value).ok_or_else(|| {
                        AppError::Input(format!("无法解析题目类型: {}", value))
                    })?
                }
                "question" | "text" | "q" => self.draft.question = value.clone(),
                "difficulty" | "level" => {
                    self.draft.difficulty = parse_difficulty(value)?;
                }
                "flagged" | "flag" => self.draft.flagged = parse_bool(value)?,
                other => {
                    return Err(AppError::Input(format!("未知的草稿字段: {}", other)));
                }
            }
        }
        Ok(())
    }

    /// 提交新题目草稿
    ///
    /// 成功：草稿重置为默认值并刷新列表
    /// 失败：保留用户已填写的草稿内容，只写错误槽位
    pub async fn submit_draft(&mut self) -> Result<()> {
        // 必填字段检查（对应录入表单的 required 约束），不发请求
        if self.draft.job_title.trim().is_empty() || self.draft.question.trim().is_empty() {
            return Err(AppError::Input(
                "提交前请先填写 job_title 和 question（add job=... question=...）".to_string(),
            ));
        }

        self.begin_call("创建题目");
        let outcome = self.client.create_question(&self.draft).await;
        self.end_call();

        match outcome {
            Ok(created) => {
                info!("✓ 题目已创建: {}", created.id);
                self.draft = NewQuestion::default();
                self.refresh().await;
            }
            Err(e) => self.surface(e, "创建题目失败"),
        }
        Ok(())
    }

    /// 更新生成请求草稿字段
    ///
    /// 数量限制 1-10 在此处保证（对应数字输入框的 min/max）
    pub fn edit_generate(&mut self, assignments: &[(String, String)]) -> Result<()> {
        for (key, value) in assignments {
            match key.as_str() {
                "job" | "job_title" => self.generate_draft.job_title = value.clone(),
                "technical" | "num_technical" => {
                    self.generate_draft.num_technical = parse_count(value)?
                }
                "behavioral" | "num_behavioral" => {
                    self.generate_draft.num_behavioral = parse_count(value)?
                }
                other => {
                    return Err(AppError::Input(format!("未知的生成字段: {}", other)));
                }
            }
        }
        Ok(())
    }

    /// 提交生成请求
    ///
    /// 成功：把生成的题目追加到列表缓存（不触发整体刷新，
    /// 列表可能暂时偏离服务端状态，直到下一次筛选刷新）
    pub async fn submit_generate(&mut self) -> Result<()> {
        if self.generate_draft.job_title.trim().is_empty() {
            return Err(AppError::Input(
                "生成前请先设置职位（gen job=...）".to_string(),
            ));
        }

        self.begin_call("生成题目");
        let outcome = self.client.generate_questions(&self.generate_draft).await;
        self.end_call();

        match outcome {
            Ok(mut generated) => {
                info!("✓ 已生成 {} 道题目，追加到当前列表", generated.len());
                self.questions.append(&mut generated);
                self.error = None;
            }
            Err(e) => self.surface(e, "生成题目失败"),
        }
        Ok(())
    }

    /// 按ID删除题目，成功后刷新列表
    ///
    /// 删除确认由界面层负责；未确认时不应调用本方法
    pub async fn delete(&mut self, id: &str) {
        self.begin_call("删除题目");
        let outcome = self.client.delete_question(id).await;
        self.end_call();

        match outcome {
            Ok(()) => {
                info!("✓ 已删除题目 {}", id);
                self.refresh().await;
            }
            Err(e) => self.surface(e, "删除题目失败"),
        }
    }

    /// 拉取题库统计信息
    pub async fn fetch_stats(&mut self) -> Option<Stats> {
        self.begin_call("拉取统计信息");
        let outcome = self.client.fetch_stats().await;
        self.end_call();

        match outcome {
            Ok(stats) => Some(stats),
            Err(e) => {
                self.surface(e, "获取统计信息失败");
                None
            }
        }
    }

    // ========== 辅助方法 ==========

    /// 把失败映射为展示文案写入错误槽位
    ///
    /// 优先展示服务端返回的 detail 信息，否则使用本次操作的兜底文案
    fn surface(&mut self, e: AppError, fallback: &str) {
        warn!("⚠️ 调用失败: {}", e);
        self.error = Some(
            e.server_detail()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        );
    }

    fn begin_call(&mut self, operation: &str) {
        self.loading = true;
        debug!("⏳ {} 请求中...", operation);
    }

    fn end_call(&mut self) {
        self.loading = false;
    }
}

/// 更新单个筛选字段，空值表示清除该条件
fn set_filter_field(filters: &mut QuestionFilters, key: &str, value: &str) -> Result<()> {
    match key {
        "job" | "job_title" => filters.job_title = value.to_string(),
        "type" | "question_type" => {
            filters.question_type = if value.is_empty() {
                None
            } else {
                Some(QuestionType::find(value).ok_or_else(|| {
                    AppError::Input(format!("无法解析题目类型: {}", value))
                })?)
            }
        }
        "difficulty" | "level" => filters.difficulty = parse_difficulty(value)?,
        "flagged" | "flag" => filters.flagged = parse_bool(value)?,
        other => {
            return Err(AppError::Input(format!("未知的筛选字段: {}", other)));
        }
    }
    Ok(())
}

/// 解析难度，空值表示未设置
fn parse_difficulty(value: &str) -> Result<Option<Difficulty>> {
    if value.is_empty() {
        return Ok(None);
    }
    Difficulty::find(value)
        .map(Some)
        .ok_or_else(|| AppError::Input(format!("无法解析难度: {}", value)))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        other => Err(AppError::Input(format!("无法解析布尔值: {}", other))),
    }
}

/// 解析生成数量，限制在 1-10
fn parse_count(value: &str) -> Result<u8> {
    let count: u8 = value
        .trim()
        .parse()
        .map_err(|_| AppError::Input(format!("无法解析数量: {}", value)))?;
    if !(1..=10).contains(&count) {
        return Err(AppError::Input(format!(
            "数量必须在 1-10 之间，收到: {}",
            count
        )));
    }
    Ok(count)
}
