use crate::models::category::GapCategory;
use serde::{Deserialize, Deserializer, Serialize};

/// 一条研究空白
///
/// 由后端产生，收到后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchGap {
    #[serde(deserialize_with = "deserialize_gap_id")]
    pub gap_id: String,
    pub title: String,
    pub description: String,
    pub category: GapCategory,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub papers_referenced: Vec<String>,
}

/// 后端返回的原始结果列表
pub type ResultSet = Vec<ResearchGap>;

/// `POST /analyze` 的响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub research_gaps: ResultSet,
}

impl ResearchGap {
    pub fn has_references(&self) -> bool {
        !self.papers_referenced.is_empty()
    }
}

// gap_id 可能是字符串或整数
fn deserialize_gap_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct GapIdVisitor;

    impl<'de> Visitor<'de> for GapIdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer gap id")
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

    deserializer.deserialize_any(GapIdVisitor)
}

fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let body = r#"{"research_gaps":[{"gap_id":"1","title":"X","description":"Y","category":"theory","papers_referenced":[]}]}"#;
        let response: AnalysisResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.research_gaps.len(), 1);
        let gap = &response.research_gaps[0];
        assert_eq!(gap.gap_id, "1");
        assert_eq!(gap.category, GapCategory::Theory);
        assert!(!gap.has_references());
    }

    #[test]
    fn test_integer_id_and_missing_references() {
        let gap: ResearchGap = serde_json::from_str(
            r#"{"gap_id":7,"title":"T","description":"D","category":"data","papers_referenced":null}"#,
        )
        .unwrap();
        assert_eq!(gap.gap_id, "7");
        assert!(gap.papers_referenced.is_empty());

        let gap: ResearchGap = serde_json::from_str(
            r#"{"gap_id":"g2","title":"T","description":"D","category":"data"}"#,
        )
        .unwrap();
        assert!(gap.papers_referenced.is_empty());
    }

    #[test]
    fn test_missing_research_gaps_is_error() {
        assert!(serde_json::from_str::<AnalysisResponse>(r#"{"detail":"boom"}"#).is_err());
        assert!(serde_json::from_str::<AnalysisResponse>(r#"{"research_gaps":null}"#).is_err());
    }
}
