use super::domain::{RequirementsError, ScholarshipCategory, ScholarshipStatus, StudentStatus};
use super::rulebook::RenewalRulebook;
use serde::{Deserialize, Serialize};

/// One resolution request. Labels are passed exactly as authored; both
/// front ends populate their selections from the same tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementsQuery {
    pub status: String,
    pub scenario: String,
    #[serde(default)]
    pub selected_options: Vec<String>,
    #[serde(default)]
    pub scholarship: Option<String>,
    #[serde(default)]
    pub scholarship_status: Option<String>,
}

impl RenewalRulebook {
    /// Resolve the ordered document list for a query.
    ///
    /// Concatenation order: common documents, the matched scenario's
    /// documents, any selected optional rows (status-level before
    /// scenario-level, in table order), scholarship documents, scholarship
    /// status documents. Unknown statuses and scenarios are hard errors;
    /// an unknown scholarship selector instead contributes a placeholder
    /// line so the omission is visible to the reader of the list.
    pub fn requirements(
        &self,
        query: &RequirementsQuery,
    ) -> Result<Vec<String>, RequirementsError> {
        let status = StudentStatus::from_label(&query.status)
            .ok_or_else(|| RequirementsError::UnknownStatus(query.status.clone()))?;

        let scenarios = self.scenarios_for(status);
        let scenario = scenarios
            .iter()
            .find(|scenario| scenario.label == query.scenario)
            .ok_or_else(|| RequirementsError::UnknownScenario {
                status,
                label: query.scenario.clone(),
                valid: scenarios.iter().map(|scenario| scenario.label).collect(),
            })?;

        let mut documents: Vec<String> = self
            .common_requirements()
            .iter()
            .map(|item| item.to_string())
            .collect();
        documents.extend(scenario.requirements.iter().map(|item| item.to_string()));

        let optional_rows = self
            .status_options_for(status)
            .iter()
            .chain(self.scenario_options_for(status, scenario.label));
        for option in optional_rows {
            if query
                .selected_options
                .iter()
                .any(|chosen| chosen == option.label)
            {
                documents.extend(option.requirements.iter().map(|item| item.to_string()));
            }
        }

        if let Some(key) = query.scholarship.as_deref().filter(|key| !key.is_empty()) {
            match ScholarshipCategory::from_label(key) {
                Some(category) => documents.extend(
                    self.scholarship_requirements(category)
                        .iter()
                        .map(|item| item.to_string()),
                ),
                None => documents.push(format!("奨学金区分 '{key}' は登録されていません。")),
            }
        }

        if let Some(key) = query
            .scholarship_status
            .as_deref()
            .filter(|key| !key.is_empty())
        {
            match ScholarshipStatus::from_label(key) {
                Some(scholarship_status) => documents.extend(
                    self.scholarship_status_requirements(scholarship_status)
                        .iter()
                        .map(|item| item.to_string()),
                ),
                None => documents.push(format!("奨学金状況 '{key}' は登録されていません。")),
            }
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(status: &str, scenario: &str) -> RequirementsQuery {
        RequirementsQuery {
            status: status.to_string(),
            scenario: scenario.to_string(),
            ..RequirementsQuery::default()
        }
    }

    #[test]
    fn empty_scholarship_string_is_treated_as_absent() {
        let rulebook = RenewalRulebook::standard();
        let mut with_empty = query("研究生", "前学期も研究生として在籍");
        with_empty.scholarship = Some(String::new());
        with_empty.scholarship_status = Some(String::new());

        let bare = rulebook
            .requirements(&query("研究生", "前学期も研究生として在籍"))
            .expect("resolves");
        let resolved = rulebook.requirements(&with_empty).expect("resolves");
        assert_eq!(resolved, bare);
    }

    #[test]
    fn unmatched_selected_options_are_ignored() {
        let rulebook = RenewalRulebook::standard();
        let mut with_unknown = query("正規生", "前学期も同じ身分で正規生として在籍");
        with_unknown.selected_options = vec!["未定義の選択肢".to_string()];

        let bare = rulebook
            .requirements(&query("正規生", "前学期も同じ身分で正規生として在籍"))
            .expect("resolves");
        let resolved = rulebook.requirements(&with_unknown).expect("resolves");
        assert_eq!(resolved, bare);
    }

    #[test]
    fn selected_options_follow_table_order_not_selection_order() {
        let rulebook = RenewalRulebook::standard();
        let mut selected = query("研究生", "前学期も研究生として在籍");
        // Reversed relative to the authored table.
        selected.selected_options = vec![
            "大学院進学予定".to_string(),
            "1年以上研究生を続けている".to_string(),
        ];

        let resolved = rulebook.requirements(&selected).expect("resolves");
        let first = resolved
            .iter()
            .position(|item| item == "「外国人研究生について」の書類(所属の支援室に依頼)")
            .expect("first table row present");
        let second = resolved
            .iter()
            .position(|item| item == "合格通知書(コピー)")
            .expect("second table row present");
        assert!(first < second);
    }
}
