/// 控制台命令解析
///
/// 一行输入对应一次界面操作；`key=value` 参数用正则切分，
/// 值允许包含空格（直到下一个 `key=` 为止）
use crate::error::{AppError, Result};
use regex::Regex;

/// 解析后的控制台命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// 重新拉取列表
    Refresh,
    /// 显示当前状态（筛选、草稿、列表）
    Show,
    /// 设置筛选条件并刷新
    Filter(Vec<(String, String)>),
    /// 编辑新题目草稿
    EditDraft(Vec<(String, String)>),
    /// 提交草稿
    Submit,
    /// 编辑生成请求草稿
    EditGenerate(Vec<(String, String)>),
    /// 发送生成请求
    Generate,
    /// 删除指定ID的题目（需确认）
    Delete(String),
    /// 显示题库统计
    Stats,
    /// 显示帮助
    Help,
    /// 退出程序
    Quit,
}

/// 解析一行输入
///
/// 空行返回 `None`；未知命令和缺失参数返回输入错误
pub fn parse(line: &str) -> Result<Option<Command>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match head.to_lowercase().as_str() {
        "list" | "refresh" => Command::Refresh,
        "show" => Command::Show,
        "filter" => Command::Filter(parse_assignments(rest)?),
        "add" | "draft" => Command::EditDraft(parse_assignments(rest)?),
        "submit" => Command::Submit,
        "gen" => Command::EditGenerate(parse_assignments(rest)?),
        "generate" => Command::Generate,
        "delete" | "del" => {
            if rest.is_empty() {
                return Err(AppError::Input("用法: delete <id>".to_string()));
            }
            Command::Delete(rest.to_string())
        }
        "stats" => Command::Stats,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            return Err(AppError::Input(format!(
                "未知命令: {}（输入 help 查看用法）",
                other
            )));
        }
    };

    Ok(Some(command))
}

/// 切分 `key=value` 参数列表
///
/// 每个值延伸到下一个 `key=` 之前，因此值内允许空格；
/// 键统一转为小写
pub fn parse_assignments(input: &str) -> Result<Vec<(String, String)>> {
    let re = Regex::new(r"(?:^|\s)([A-Za-z_][A-Za-z0-9_]*)=")?;

    let keys: Vec<(usize, usize, String)> = re
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let key = caps.get(1)?;
            Some((whole.start(), whole.end(), key.as_str().to_lowercase()))
        })
        .collect();

    if keys.is_empty() {
        return Err(AppError::Input(
            "需要至少一个 key=value 参数".to_string(),
        ));
    }

    // 第一个键之前不允许出现多余内容
    let leading = input[..keys[0].0].trim();
    if !leading.is_empty() {
        return Err(AppError::Input(format!("无法解析参数: {}", leading)));
    }

    let mut assignments = Vec::with_capacity(keys.len());
    for (i, (_, value_start, key)) in keys.iter().enumerate() {
        let value_end = keys.get(i + 1).map(|next| next.0).unwrap_or(input.len());
        let value = input[*value_start..value_end].trim();
        assignments.push((key.clone(), value.to_string()));
    }

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse("list").expect("应当解析成功"), Some(Command::Refresh));
        assert_eq!(parse(" quit ").expect("应当解析成功"), Some(Command::Quit));
        assert_eq!(parse("SUBMIT").expect("应当解析成功"), Some(Command::Submit));
        assert_eq!(parse("").expect("应当解析成功"), None);
        assert_eq!(parse("   \n").expect("应当解析成功"), None);
    }

    #[test]
    fn parses_filter_assignments() {
        let command = parse("filter job=Engineer flagged=true").expect("应当解析成功");
        assert_eq!(
            command,
            Some(Command::Filter(pairs(&[
                ("job", "Engineer"),
                ("flagged", "true"),
            ])))
        );
    }

    #[test]
    fn assignment_values_may_contain_spaces() {
        let command = parse("add question=What is ownership in Rust? job=Engineer")
            .expect("应当解析成功");
        assert_eq!(
            command,
            Some(Command::EditDraft(pairs(&[
                ("question", "What is ownership in Rust?"),
                ("job", "Engineer"),
            ])))
        );
    }

    #[test]
    fn empty_value_clears_a_field() {
        let command = parse("filter type=").expect("应当解析成功");
        assert_eq!(command, Some(Command::Filter(pairs(&[("type", "")]))));
    }

    #[test]
    fn keys_are_lowercased() {
        let command = parse("gen Technical=3").expect("应当解析成功");
        assert_eq!(
            command,
            Some(Command::EditGenerate(pairs(&[("technical", "3")])))
        );
    }

    #[test]
    fn delete_requires_an_id() {
        assert!(parse("delete").is_err());
        assert_eq!(
            parse("delete q-1").expect("应当解析成功"),
            Some(Command::Delete("q-1".to_string()))
        );
    }

    #[test]
    fn unknown_command_is_an_input_error() {
        let err = parse("frobnicate").expect_err("应当解析失败");
        assert!(err.to_string().contains("未知命令"));
    }

    #[test]
    fn stray_text_before_first_key_is_rejected() {
        assert!(parse("filter oops job=Engineer").is_err());
    }
}
