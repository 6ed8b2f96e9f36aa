use crate::clients::QuestionBankClient;
use crate::commands::{self, Command};
use crate::config::Config;
use crate::session::Session;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use tracing::info;

/// 应用主结构
///
/// 持有会话状态并驱动"读命令 → 执行 → 渲染"的交互循环；
/// 每次网络调用都在循环内等待完成，请求之间不会交叠
pub struct App {
    config: Config,
    session: Session<QuestionBankClient>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config)?;

        log_startup(&config);

        let client = QuestionBankClient::new(&config).context("初始化 API 客户端失败")?;
        let mut session = Session::new(client);

        // 启动时拉取一次列表（对应页面挂载时的首次请求）
        session.refresh().await;

        Ok(Self { config, session })
    }

    /// 运行交互主循环
    pub async fn run(&mut self) -> Result<()> {
        self.render();

        let stdin = io::stdin();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF
                break;
            }

            match commands::parse(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command).await,
                Err(e) => self.session.error = Some(e.to_string()),
            }

            self.render();
        }

        close_log_file(&self.config)?;
        info!("👋 程序退出，日志已保存至: {}", self.config.output_log_file);
        Ok(())
    }

    /// 执行单条命令
    async fn execute(&mut self, command: Command) {
        let result = match command {
            Command::Refresh => {
                self.session.refresh().await;
                Ok(())
            }
            Command::Show => {
                self.render_state();
                Ok(())
            }
            Command::Filter(assignments) => self.session.apply_filters(&assignments).await,
            Command::EditDraft(assignments) => self.session.edit_draft(&assignments),
            Command::Submit => self.session.submit_draft().await,
            Command::EditGenerate(assignments) => self.session.edit_generate(&assignments),
            Command::Generate => self.session.submit_generate().await,
            Command::Delete(id) => {
                if confirm_delete(&id) {
                    self.session.delete(&id).await;
                } else {
                    info!("已取消删除");
                }
                Ok(())
            }
            Command::Stats => {
                if let Some(stats) = self.session.fetch_stats().await {
                    println!(
                        "📊 题库统计: 共 {} 道题目，最常见主题: {}",
                        stats.total_questions,
                        stats.most_common_topic.as_deref().unwrap_or("-")
                    );
                }
                Ok(())
            }
            Command::Help => {
                print_help();
                Ok(())
            }
            // Quit 在主循环中处理
            Command::Quit => Ok(()),
        };

        // 输入类错误与调用失败共用同一个错误槽位
        if let Err(e) = result {
            self.session.error = Some(e.to_string());
        }
    }

    /// 渲染错误横幅、筛选条件与题目列表
    fn render(&self) {
        println!();

        if let Some(error) = &self.session.error {
            println!("❌ 错误: {}", error);
        }

        println!(
            "筛选: {}    共 {} 道题目",
            self.session.filters.describe(),
            self.session.questions.len()
        );

        if self.session.questions.is_empty() {
            println!("（暂无题目，可用 add + submit 新增，或 gen + generate 生成）");
            return;
        }

        for question in &self.session.questions {
            println!("  {}", question);
            if self.config.verbose_logging {
                println!("      {}", question.question);
            }
        }
    }

    /// 渲染完整状态（show 命令）
    fn render_state(&self) {
        let draft = &self.session.draft;
        println!(
            "📝 新题目草稿: job_title={:?} type={} difficulty={} flagged={} question={:?}",
            draft.job_title,
            draft.question_type,
            draft.difficulty.map(|d| d.name()).unwrap_or("-"),
            draft.flagged,
            draft.question
        );

        let generate = &self.session.generate_draft;
        println!(
            "⚙️ 生成请求: job_title={:?} technical={} behavioral={}",
            generate.job_title, generate.num_technical, generate.num_behavioral
        );
    }
}

/// 删除前的阻塞确认
fn confirm_delete(id: &str) -> bool {
    print!("确定要删除题目 {} 吗? (y/N) ", id);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }

    is_affirmative(&answer)
}

/// 判断确认输入是否为肯定回答，其他任何输入都视为取消
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_help() {
    println!("可用命令:");
    println!("  list                    重新拉取题目列表");
    println!("  show                    显示草稿与生成请求的当前内容");
    println!("  filter key=value ...    设置筛选并刷新 (job/type/difficulty/flagged，空值清除)");
    println!("  add key=value ...       编辑新题目草稿 (job/type/question/difficulty/flagged)");
    println!("  submit                  提交草稿");
    println!("  gen key=value ...       编辑生成请求 (job/technical/behavioral，数量 1-10)");
    println!("  generate                发送生成请求，结果追加到列表");
    println!("  delete <id>             删除题目（需确认）");
    println!("  stats                   显示题库统计");
    println!("  quit                    退出");
}

// ========== 日志辅助函数 ==========

fn init_log_file(config: &Config) -> Result<()> {
    let log_header = format!(
        "{}\n面试题管理会话日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(&config.output_log_file, log_header)?;
    Ok(())
}

/// 退出时追加会话结束标记
fn close_log_file(config: &Config) -> Result<()> {
    let log_footer = format!(
        "\n{}\n会话结束 - {}\n{}\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    let mut file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&config.output_log_file)?;
    file.write_all(log_footer.as_bytes())?;
    Ok(())
}

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 面试题管理客户端");
    info!("🌐 后端地址: {}", config.api_base_url);
    info!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers_confirm_deletion() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative("yes"));
        assert!(is_affirmative(" YES \n"));
    }

    #[test]
    fn anything_else_declines_deletion() {
        // 默认取消：空输入（直接回车）与任何非肯定输入都不删除
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yep"));
        assert!(!is_affirmative("q-1"));
        assert!(!is_affirmative("是"));
    }

    #[test]
    fn log_file_records_header_and_footer() {
        let path = std::env::temp_dir().join(format!(
            "interview_prep_session_{}.log",
            std::process::id()
        ));
        let config = Config {
            output_log_file: path.to_string_lossy().into_owned(),
            ..Config::default()
        };

        init_log_file(&config).expect("写入日志头失败");
        close_log_file(&config).expect("写入日志尾失败");

        let content = fs::read_to_string(&path).expect("读取日志失败");
        assert!(content.contains("面试题管理会话日志"));
        assert!(content.contains("会话结束"));

        let _ = fs::remove_file(&path);
    }
}
