pub mod question_bank;

pub use question_bank::QuestionBankClient;

use crate::error::Result;
use crate::models::{GenerateRequest, NewQuestion, Question, QuestionFilters, Stats};

/// 题库后端 API 能力
///
/// 会话层只依赖该能力接口，测试中可用内存实现替换真实 HTTP 客户端。
/// 所有调用都发生在单个任务内，不需要 Send 约束。
#[allow(async_fn_in_trait)]
pub trait QuestionApi {
    /// 按筛选条件拉取题目列表
    async fn list_questions(&self, filters: &QuestionFilters) -> Result<Vec<Question>>;

    /// 创建新题目，返回服务端分配了ID的完整记录
    async fn create_question(&self, draft: &NewQuestion) -> Result<Question>;

    /// 请求服务端生成一批题目
    async fn generate_questions(&self, request: &GenerateRequest) -> Result<Vec<Question>>;

    /// 按ID删除题目
    async fn delete_question(&self, id: &str) -> Result<()>;

    /// 拉取题库统计信息
    async fn fetch_stats(&self) -> Result<Stats>;
}
