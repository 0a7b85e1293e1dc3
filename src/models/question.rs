use serde::{Deserialize, Serialize};

/// 题目列表中的摘要项
///
/// 后端列表接口可能附带更多字段，这里只保留界面需要的部分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
}

/// 题目示例
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub explanation: String,
}

/// 题目详情，加载后不再修改
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub starter_code: String,
}

impl Question {
    /// 转换为列表摘要
    pub fn summary(&self) -> QuestionSummary {
        QuestionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

// 题目ID可能是字符串也可能是整数
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer question id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

impl std::fmt::Display for QuestionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.id, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_from_backend_json() {
        let json = r#"{
            "id": "two-sum",
            "title": "Two Sum",
            "description": "Add two numbers",
            "examples": [{"input": "1 2", "output": "3", "explanation": "1 + 2 = 3"}],
            "starterCode": "int main() {}",
            "difficulty": "easy"
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.id, "two-sum");
        assert_eq!(question.starter_code, "int main() {}");
        assert_eq!(question.examples.len(), 1);
        assert_eq!(question.examples[0].explanation, "1 + 2 = 3");
    }

    #[test]
    fn test_question_missing_optional_fields() {
        // 后端缺省字段时使用默认值
        let question: Question = serde_json::from_str(r#"{"id": "q1", "title": "Q1"}"#).unwrap();
        assert!(question.examples.is_empty());
        assert_eq!(question.starter_code, "");
    }

    #[test]
    fn test_summary_ignores_extra_fields() {
        let list: Vec<QuestionSummary> =
            serde_json::from_str(r#"[{"id": "a", "title": "A", "tags": ["dp"]}]"#).unwrap();
        assert_eq!(list[0].to_string(), "[a] A");
    }

    #[test]
    fn test_numeric_id() {
        let summary: QuestionSummary = serde_json::from_str(r#"{"id": 7, "title": "Seven"}"#).unwrap();
        assert_eq!(summary.id, "7");
    }
}
