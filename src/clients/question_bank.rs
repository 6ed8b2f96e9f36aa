/// 题库 API 客户端
///
/// 封装所有与题库后端相关的 HTTP 调用逻辑
use crate::clients::QuestionApi;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{GenerateRequest, NewQuestion, Question, QuestionFilters, Stats};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// 题库 API 客户端
pub struct QuestionBankClient {
    http: Client,
    base_url: String,
}

impl QuestionBankClient {
    /// 创建新的题库客户端
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_base_url.trim().is_empty() {
            return Err(AppError::Config("API_BASE_URL 不能为空".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 拼接完整的请求地址
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 检查响应状态
    ///
    /// 非 2xx 响应会尝试从响应体中提取服务端的 detail 错误信息
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("detail")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            });

        Err(AppError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

impl QuestionApi for QuestionBankClient {
    /// 拉取题目列表
    ///
    /// # 参数
    /// - `filters`: 当前筛选条件，转换为查询参数
    ///
    /// # 返回
    /// 返回符合条件的题目数组
    async fn list_questions(&self, filters: &QuestionFilters) -> Result<Vec<Question>> {
        let query = filters.to_query();
        debug!("拉取题目列表，筛选参数: {:?}", query);

        let response = self
            .http
            .get(self.url("/questions/"))
            .query(&query)
            .send()
            .await?;

        let questions = Self::check(response).await?.json::<Vec<Question>>().await?;

        debug!("拉取完成，共 {} 道题目", questions.len());

        Ok(questions)
    }

    /// 创建新题目
    ///
    /// # 参数
    /// - `draft`: 题目草稿（不含ID）
    ///
    /// # 返回
    /// 返回服务端创建后的完整记录
    async fn create_question(&self, draft: &NewQuestion) -> Result<Question> {
        debug!("创建题目 Payload: {:?}", draft);

        let response = self
            .http
            .post(self.url("/questions/"))
            .json(draft)
            .send()
            .await?;

        let created = Self::check(response).await?.json::<Question>().await?;

        debug!("创建成功，服务端分配ID: {}", created.id);

        Ok(created)
    }

    /// 请求生成一批题目
    ///
    /// # 参数
    /// - `request`: 生成请求（职位 + 各类型数量）
    ///
    /// # 返回
    /// 返回服务端生成的题目数组
    async fn generate_questions(&self, request: &GenerateRequest) -> Result<Vec<Question>> {
        debug!("生成请求 Payload: {:?}", request);

        let response = self
            .http
            .post(self.url("/questions/generate"))
            .json(request)
            .send()
            .await?;

        let generated = Self::check(response).await?.json::<Vec<Question>>().await?;

        Ok(generated)
    }

    /// 按ID删除题目
    async fn delete_question(&self, id: &str) -> Result<()> {
        debug!("删除题目: {}", id);

        let response = self
            .http
            .delete(self.url(&format!("/questions/{}", id)))
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    /// 拉取题库统计信息
    async fn fetch_stats(&self) -> Result<Stats> {
        let response = self.http.get(self.url("/stats")).send().await?;

        let stats = Self::check(response).await?.json::<Stats>().await?;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = Config {
            api_base_url: "http://localhost:8000/".to_string(),
            ..Config::default()
        };
        let client = QuestionBankClient::new(&config).expect("创建客户端失败");
        assert_eq!(client.url("/questions/"), "http://localhost:8000/questions/");
        assert_eq!(client.url("/questions/q-1"), "http://localhost:8000/questions/q-1");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let config = Config {
            api_base_url: "  ".to_string(),
            ..Config::default()
        };
        assert!(QuestionBankClient::new(&config).is_err());
    }
}
