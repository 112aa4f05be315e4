use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

/// The parts of an `explain` result worth printing next to the raw document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainSummary {
    /// Winning plan stages, outermost first
    pub stages: Vec<String>,
    pub index_name: Option<String>,
    pub n_returned: Option<i64>,
    pub total_keys_examined: Option<i64>,
    pub total_docs_examined: Option<i64>,
    pub execution_time_millis: Option<i64>,
}

impl ExplainSummary {
    pub fn from_explain(explain: &Document) -> Self {
        let mut summary = ExplainSummary::default();

        if let Ok(planner) = explain.get_document("queryPlanner") {
            if let Ok(winning) = planner.get_document("winningPlan") {
                collect_stages(winning, &mut summary.stages, &mut summary.index_name);
            }
        }

        if let Ok(stats) = explain.get_document("executionStats") {
            summary.n_returned = number(stats, "nReturned");
            summary.total_keys_examined = number(stats, "totalKeysExamined");
            summary.total_docs_examined = number(stats, "totalDocsExamined");
            summary.execution_time_millis = number(stats, "executionTimeMillis");
        }

        summary
    }

    pub fn uses_index(&self) -> bool {
        self.stages.iter().any(|s| s == "IXSCAN" || s == "IDHACK")
    }
}

// Newer servers wrap the classic plan tree in `queryPlan`.
fn collect_stages(plan: &Document, stages: &mut Vec<String>, index_name: &mut Option<String>) {
    if let Ok(inner) = plan.get_document("queryPlan") {
        collect_stages(inner, stages, index_name);
        return;
    }

    if let Ok(stage) = plan.get_str("stage") {
        stages.push(stage.to_string());
    }
    if index_name.is_none() {
        if let Ok(name) = plan.get_str("indexName") {
            *index_name = Some(name.to_string());
        }
    }

    if let Ok(input) = plan.get_document("inputStage") {
        collect_stages(input, stages, index_name);
    }
    if let Ok(inputs) = plan.get_array("inputStages") {
        for input in inputs {
            if let Bson::Document(input) = input {
                collect_stages(input, stages, index_name);
            }
        }
    }
}

fn number(doc: &Document, key: &str) -> Option<i64> {
    match doc.get(key)? {
        Bson::Int32(n) => Some(i64::from(*n)),
        Bson::Int64(n) => Some(*n),
        Bson::Double(n) => Some(*n as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_summary_from_index_scan() {
        let explain = doc! {
            "queryPlanner": {
                "winningPlan": {
                    "stage": "FETCH",
                    "inputStage": { "stage": "IXSCAN", "indexName": "title_1" }
                }
            },
            "executionStats": {
                "nReturned": 1,
                "executionTimeMillis": 0,
                "totalKeysExamined": 1,
                "totalDocsExamined": 1_i64,
            }
        };

        let summary = ExplainSummary::from_explain(&explain);
        assert_eq!(summary.stages, vec!["FETCH", "IXSCAN"]);
        assert_eq!(summary.index_name.as_deref(), Some("title_1"));
        assert_eq!(summary.n_returned, Some(1));
        assert_eq!(summary.total_docs_examined, Some(1));
        assert!(summary.uses_index());
    }

    #[test]
    fn test_summary_unwraps_query_plan() {
        let explain = doc! {
            "queryPlanner": {
                "winningPlan": {
                    "queryPlan": { "stage": "COLLSCAN" },
                    "slotBasedPlan": { "stages": "..." }
                }
            }
        };

        let summary = ExplainSummary::from_explain(&explain);
        assert_eq!(summary.stages, vec!["COLLSCAN"]);
        assert!(!summary.uses_index());
        assert_eq!(summary.n_returned, None);
    }

    #[test]
    fn test_summary_walks_multiple_inputs() {
        let explain = doc! {
            "queryPlanner": {
                "winningPlan": {
                    "stage": "OR",
                    "inputStages": [
                        { "stage": "IXSCAN", "indexName": "author_1_published_year_-1" },
                        { "stage": "IXSCAN", "indexName": "title_1" }
                    ]
                }
            }
        };

        let summary = ExplainSummary::from_explain(&explain);
        assert_eq!(summary.stages, vec!["OR", "IXSCAN", "IXSCAN"]);
        assert_eq!(summary.index_name.as_deref(), Some("author_1_published_year_-1"));
    }
}
