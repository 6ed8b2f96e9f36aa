use serde::{Deserialize, Serialize};

/// 题目类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 技术题
    Technical,
    /// 行为面试题
    Behavioral,
}

impl QuestionType {
    /// 获取接口使用的标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionType::Technical => "technical",
            QuestionType::Behavioral => "behavioral",
        }
    }

    /// 获取中文显示名称
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::Technical => "技术",
            QuestionType::Behavioral => "行为",
        }
    }

    /// 尝试从字符串解析类型（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "technical" | "tech" | "t" | "技术" => Some(QuestionType::Technical),
            "behavioral" | "behavior" | "b" | "行为" => Some(QuestionType::Behavioral),
            _ => None,
        }
    }

    /// 智能查找类型（忽略大小写）
    pub fn find(s: &str) -> Option<Self> {
        Self::from_str(s.trim().to_lowercase().as_str())
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 难度枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 简单
    Easy,
    /// 中等
    Medium,
    /// 困难
    Hard,
}

impl Difficulty {
    /// 获取接口使用的标准名称
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// 尝试从字符串解析难度（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" | "e" | "简单" => Some(Difficulty::Easy),
            "medium" | "m" | "中等" => Some(Difficulty::Medium),
            "hard" | "h" | "困难" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// 智能查找难度（忽略大小写）
    pub fn find(s: &str) -> Option<Self> {
        Self::from_str(s.trim().to_lowercase().as_str())
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 题目记录
///
/// 服务端是唯一权威数据源，客户端只持有上一次成功拉取的缓存副本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 服务端分配的唯一ID
    pub id: String,
    pub job_title: String,
    pub question_type: QuestionType,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub flagged: bool,
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题目内容以便显示（最多60个字符）
        let preview = if self.question.chars().count() > 60 {
            self.question.chars().take(60).collect::<String>() + "..."
        } else {
            self.question.clone()
        };

        let difficulty = self
            .difficulty
            .map(|d| d.name())
            .unwrap_or("-");
        let flag = if self.flagged { " 🚩" } else { "" };

        write!(
            f,
            "[{}] {} | {}/{}{} | {}",
            self.id, self.job_title, self.question_type.label(), difficulty, flag, preview
        )
    }
}

/// 新题目草稿（未分配ID，提交后由服务端创建）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewQuestion {
    pub job_title: String,
    pub question_type: QuestionType,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    pub flagged: bool,
}

impl Default for NewQuestion {
    fn default() -> Self {
        // 与原始录入表单的默认值保持一致
        Self {
            job_title: String::new(),
            question_type: QuestionType::Technical,
            question: String::new(),
            difficulty: Some(Difficulty::Medium),
            flagged: false,
        }
    }
}

/// 生成请求草稿
///
/// 数量限制（1-10）在输入解析层保证，请求层不做校验
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub job_title: String,
    pub num_technical: u8,
    pub num_behavioral: u8,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            job_title: String::new(),
            num_technical: 1,
            num_behavioral: 1,
        }
    }
}

/// 列表筛选条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionFilters {
    /// 职位名称（子串匹配）
    pub job_title: String,
    pub question_type: Option<QuestionType>,
    pub difficulty: Option<Difficulty>,
    /// 只看标记过的题目
    pub flagged: bool,
}

impl QuestionFilters {
    /// 转换为查询参数，跳过未设置的字段
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.job_title.is_empty() {
            params.push(("job_title", self.job_title.clone()));
        }
        if let Some(question_type) = self.question_type {
            params.push(("question_type", question_type.name().to_string()));
        }
        if let Some(difficulty) = self.difficulty {
            params.push(("difficulty", difficulty.name().to_string()));
        }
        if self.flagged {
            params.push(("flagged", "true".to_string()));
        }
        params
    }

    /// 生成用于展示的筛选条件描述
    pub fn describe(&self) -> String {
        let params = self.to_query();
        if params.is_empty() {
            return "（无）".to_string();
        }
        params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 题库统计信息
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stats {
    pub total_questions: u64,
    #[serde(default)]
    pub most_common_topic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_parses_aliases() {
        assert_eq!(QuestionType::find("Technical"), Some(QuestionType::Technical));
        assert_eq!(QuestionType::find(" b "), Some(QuestionType::Behavioral));
        assert_eq!(QuestionType::find("行为"), Some(QuestionType::Behavioral));
        assert_eq!(QuestionType::find("运维"), None);
    }

    #[test]
    fn difficulty_parses_aliases() {
        assert_eq!(Difficulty::find("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::find("m"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::find("极难"), None);
    }

    #[test]
    fn draft_default_matches_form_default() {
        let draft = NewQuestion::default();
        assert!(draft.job_title.is_empty());
        assert!(draft.question.is_empty());
        assert_eq!(draft.question_type, QuestionType::Technical);
        assert_eq!(draft.difficulty, Some(Difficulty::Medium));
        assert!(!draft.flagged);
    }

    #[test]
    fn empty_filters_produce_no_query_params() {
        assert!(QuestionFilters::default().to_query().is_empty());
    }

    #[test]
    fn filters_skip_unset_fields() {
        let filters = QuestionFilters {
            job_title: "Engineer".to_string(),
            question_type: Some(QuestionType::Technical),
            difficulty: None,
            flagged: true,
        };
        let query = filters.to_query();
        assert_eq!(
            query,
            vec![
                ("job_title", "Engineer".to_string()),
                ("question_type", "technical".to_string()),
                ("flagged", "true".to_string()),
            ]
        );
    }

    #[test]
    fn question_wire_format_round_trips() {
        let json = r#"{
            "id": "q-1",
            "job_title": "Engineer",
            "question_type": "behavioral",
            "question": "Describe a time you solved a conflict in a team.",
            "difficulty": "hard",
            "flagged": true
        }"#;
        let question: Question = serde_json::from_str(json).expect("解析题目失败");
        assert_eq!(question.question_type, QuestionType::Behavioral);
        assert_eq!(question.difficulty, Some(Difficulty::Hard));
        assert!(question.flagged);

        let value = serde_json::to_value(&question).expect("序列化题目失败");
        assert_eq!(value["question_type"], "behavioral");
        assert_eq!(value["difficulty"], "hard");
    }

    #[test]
    fn question_without_difficulty_deserializes() {
        let json = r#"{
            "id": "q-2",
            "job_title": "Engineer",
            "question_type": "technical",
            "question": "What are the benefits of asynchronous programming?"
        }"#;
        let question: Question = serde_json::from_str(json).expect("解析题目失败");
        assert_eq!(question.difficulty, None);
        assert!(!question.flagged);
    }
}
