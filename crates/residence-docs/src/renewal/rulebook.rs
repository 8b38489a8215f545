use super::domain::{
    RulebookError, Scenario, ScholarshipCategory, ScholarshipStatus, StudentStatus,
};

/// The authored rule tables, constructed once at process start and shared
/// read-only afterwards.
#[derive(Debug)]
pub struct RenewalRulebook {
    common: Vec<&'static str>,
    scenarios: Vec<StatusScenarios>,
    status_options: Vec<StatusScenarios>,
    scenario_options: Vec<ScenarioOptionGroup>,
    scholarships: Vec<(ScholarshipCategory, Vec<&'static str>)>,
    scholarship_statuses: Vec<(ScholarshipStatus, Vec<&'static str>)>,
}

#[derive(Debug)]
struct StatusScenarios {
    status: StudentStatus,
    scenarios: Vec<Scenario>,
}

/// Optional rows that only apply when one specific scenario is selected.
#[derive(Debug)]
pub struct ScenarioOptionGroup {
    pub status: StudentStatus,
    pub scenario_label: &'static str,
    pub options: Vec<Scenario>,
}

impl RenewalRulebook {
    pub fn standard() -> Self {
        Self {
            common: common_rules(),
            scenarios: status_scenarios(),
            status_options: status_optional_rules(),
            scenario_options: scenario_optional_rules(),
            scholarships: scholarship_rules(),
            scholarship_statuses: scholarship_status_rules(),
        }
    }

    /// Documents every application submits, always first in the result.
    pub fn common_requirements(&self) -> &[&'static str] {
        &self.common
    }

    pub fn scenarios_for(&self, status: StudentStatus) -> &[Scenario] {
        self.scenarios
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.scenarios.as_slice())
            .unwrap_or_default()
    }

    /// Optional rows valid for any scenario of the status.
    pub fn status_options_for(&self, status: StudentStatus) -> &[Scenario] {
        self.status_options
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.scenarios.as_slice())
            .unwrap_or_default()
    }

    /// Optional rows tied to one specific scenario of the status.
    pub fn scenario_options_for(&self, status: StudentStatus, scenario_label: &str) -> &[Scenario] {
        self.scenario_options
            .iter()
            .find(|group| group.status == status && group.scenario_label == scenario_label)
            .map(|group| group.options.as_slice())
            .unwrap_or_default()
    }

    pub fn scenario_option_groups(&self) -> &[ScenarioOptionGroup] {
        &self.scenario_options
    }

    pub fn scholarship_requirements(&self, category: ScholarshipCategory) -> &[&'static str] {
        self.scholarships
            .iter()
            .find(|(key, _)| *key == category)
            .map(|(_, requirements)| requirements.as_slice())
            .unwrap_or_default()
    }

    pub fn scholarship_status_requirements(&self, status: ScholarshipStatus) -> &[&'static str] {
        self.scholarship_statuses
            .iter()
            .find(|(key, _)| *key == status)
            .map(|(_, requirements)| requirements.as_slice())
            .unwrap_or_default()
    }

    /// Check the cross-reference invariants the tables must uphold: scenario
    /// labels unique within their status, and every scenario-level option
    /// group pointing at an existing scenario of the same status.
    pub fn verify(&self) -> Result<(), RulebookError> {
        for entry in &self.scenarios {
            for (idx, scenario) in entry.scenarios.iter().enumerate() {
                if entry.scenarios[..idx]
                    .iter()
                    .any(|prior| prior.label == scenario.label)
                {
                    return Err(RulebookError::DuplicateScenarioLabel {
                        status: entry.status,
                        label: scenario.label,
                    });
                }
            }
        }

        for group in &self.scenario_options {
            let known = self.scenarios_for(group.status);
            if !known
                .iter()
                .any(|scenario| scenario.label == group.scenario_label)
            {
                return Err(RulebookError::DanglingScenarioRef {
                    status: group.status,
                    label: group.scenario_label,
                });
            }
        }

        Ok(())
    }
}

fn common_rules() -> Vec<&'static str> {
    vec![
        "在留期間更新許可申請書（申請人等作成用の3枚 + 所属機関等作成用の2枚）",
        "提出書類一覧表、各種類確認書（両方提出必須。2025年1月申請分から提出が必須）",
        "パスポート、在留カード（原本を持参・提示してください）",
        "6,000円分の収入印紙",
    ]
}

fn status_scenarios() -> Vec<StatusScenarios> {
    vec![
        StatusScenarios {
            status: StudentStatus::Regular,
            scenarios: vec![
                Scenario {
                    label: "前学期も同じ身分で正規生として在籍",
                    requirements: vec![
                        "成績証明書（証明書自動発行機で発行）",
                        "在学証明書（証明書自動発行機で発行）",
                    ],
                },
                Scenario {
                    label: "前学期とは異なる身分で正規生として在籍（学部生→修士、修士→博士等）",
                    requirements: vec![
                        "成績証明書（証明書自動発行機で発行）",
                        "在学証明書（証明書自動発行で発行）",
                        "修了証明書（旧所属の支援室で発行）",
                    ],
                },
                Scenario {
                    label: "前学期、研究生として在籍",
                    requirements: vec![
                        "在学証明書（証明書自動発行機で発行）",
                        "外国人研究生証明書(別紙様式５)（旧所属の支援室で発行）",
                    ],
                },
                Scenario {
                    label: "前学期、日本語学校に在籍",
                    requirements: vec![
                        "在籍証明書（証明書自動発行機で発行）",
                        "成績証明書（日本語学校が発行）",
                        "出席・卒業証明書（日本語学校が発行）",
                    ],
                },
                Scenario {
                    label: "前学期、他大学に在籍",
                    requirements: vec![
                        "在籍証明書（証明書自動発行機で発行）",
                        "成績証明書（他大学が発行）",
                        "卒業証明書（他大学が発行）",
                    ],
                },
            ],
        },
        StatusScenarios {
            status: StudentStatus::Research,
            scenarios: vec![
                Scenario {
                    label: "前学期も研究生として在籍",
                    requirements: vec!["外国人研究生証明書(別紙様式５)（所属の支援室で発行）"],
                },
                Scenario {
                    label: "前学期、日本語学校に在籍",
                    requirements: vec![
                        "外国人研究生証明書(別紙様式５)（所属の支援室で発行）",
                        "成績証明書（日本語学校が発行）",
                        "出席・卒業証明書（日本語学校が発行）",
                    ],
                },
                Scenario {
                    label: "前学期、他大学に在籍",
                    requirements: vec![
                        "外国人研究生証明書(別紙様式５)（所属の支援室で発行）",
                        "成績証明書（他大学が発行）",
                        "卒業証明書（他大学が発行）",
                    ],
                },
                Scenario {
                    label: "前学期、3+1特別聴講生(C)として在籍（9月で在留期限が切れる場合）",
                    requirements: vec![
                        "外国人研究生証明書(別紙様式５)（所属の支援室で発行）",
                        "成績証明書（3+1プログラムの成績）",
                    ],
                },
                Scenario {
                    label: "前学期、正規生として在籍",
                    requirements: vec![
                        "外国人研究生証明書(別紙様式５)（所属の支援室で発行）",
                        "成績証明書（旧所属の支援室で発行）",
                        "修了証明書（旧所属の支援室で発行）",
                    ],
                },
            ],
        },
        StatusScenarios {
            status: StudentStatus::SpecialAuditing,
            scenarios: vec![
                Scenario {
                    label: "前学期、他大学に在籍",
                    requirements: vec![
                        "在学証明書（所属の支援室で発行）",
                        "成績証明書（他大学が発行）",
                        "卒業証明書（他大学が発行）",
                    ],
                },
                Scenario {
                    label: "前学期、本学の特別聴講生として在籍",
                    requirements: vec![
                        "在学証明書（所属の支援室で発行）",
                        "成績証明書（所属の支援室で発行）",
                    ],
                },
            ],
        },
    ]
}

fn status_optional_rules() -> Vec<StatusScenarios> {
    vec![
        StatusScenarios {
            status: StudentStatus::Regular,
            scenarios: vec![
                Scenario {
                    label: "標準修業年限を超えて研究する",
                    requirements: vec![
                        "理由書(延長期間・理由を指導教員に記入してもらい、提出)(用紙は所属の支援室・留学交流グループにあります)",
                    ],
                },
                Scenario {
                    label: "これから進学予定",
                    requirements: vec!["合格通知書(コピー)"],
                },
            ],
        },
        StatusScenarios {
            status: StudentStatus::Research,
            scenarios: vec![
                Scenario {
                    label: "1年以上研究生を続けている",
                    requirements: vec!["「外国人研究生について」の書類(所属の支援室に依頼)"],
                },
                Scenario {
                    label: "大学院進学予定",
                    requirements: vec!["合格通知書(コピー)"],
                },
                Scenario {
                    label: "研究継続予定",
                    requirements: vec!["研究継続許可書(コピー)"],
                },
            ],
        },
    ]
}

fn scenario_optional_rules() -> Vec<ScenarioOptionGroup> {
    vec![
        ScenarioOptionGroup {
            status: StudentStatus::Research,
            scenario_label: "前学期、3+1特別聴講生(C)として在籍（9月で在留期限が切れる場合）",
            options: vec![
                Scenario {
                    label: "これから研究生になる方",
                    requirements: vec!["外国人研究生 許可書(コピー)"],
                },
                Scenario {
                    label: "修士に進学する方",
                    requirements: vec!["合格通知書(コピー)"],
                },
            ],
        },
        ScenarioOptionGroup {
            status: StudentStatus::SpecialAuditing,
            scenario_label: "前学期、他大学に在籍",
            options: vec![
                Scenario {
                    label: "日本の大学に１年以上在籍",
                    requirements: vec!["理由書(本学と本人からの両方を１枚に)"],
                },
                Scenario {
                    label: "本学に１年以上在籍",
                    requirements: vec!["理由書(本学と本人からの両方を１枚に)"],
                },
            ],
        },
    ]
}

fn scholarship_rules() -> Vec<(ScholarshipCategory, Vec<&'static str>)> {
    vec![
        (
            ScholarshipCategory::GovernmentSponsored,
            vec!["日本政府奨学金受給証明書（留学交流グループで発行）"],
        ),
        (
            ScholarshipCategory::JapanKoreaScienceEngineering,
            vec!["日韓共同理工系学部留学生奨学金証明書（留学交流グループで発行）"],
        ),
        (
            ScholarshipCategory::PrivateGrant,
            vec!["奨学金証明書（コピー）"],
        ),
        (
            ScholarshipCategory::PrivateLoan,
            vec!["留学生の母国語および日本語で作成された契約書等"],
        ),
    ]
}

fn scholarship_status_rules() -> Vec<(ScholarshipStatus, Vec<&'static str>)> {
    vec![
        (
            ScholarshipStatus::NewlyAwarded,
            vec![
                "奨学金決定通知書（財団等が発行。作成できない場合は大学が発行した証明書）",
                "通帳の写し（奨学金の入金が確認できるページ）",
            ],
        ),
        (
            ScholarshipStatus::CertificateOnFile,
            vec!["通帳の写し（奨学金の入金が確認できるページ）"],
        ),
        (ScholarshipStatus::NotReceiving, vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rulebook_passes_verification() {
        let rulebook = RenewalRulebook::standard();
        rulebook.verify().expect("authored tables are consistent");
    }

    #[test]
    fn every_status_has_authored_scenarios() {
        let rulebook = RenewalRulebook::standard();

        assert_eq!(rulebook.scenarios_for(StudentStatus::Regular).len(), 5);
        assert_eq!(rulebook.scenarios_for(StudentStatus::Research).len(), 5);
        assert_eq!(
            rulebook.scenarios_for(StudentStatus::SpecialAuditing).len(),
            2
        );
        assert_eq!(rulebook.common_requirements().len(), 4);
    }

    #[test]
    fn special_auditing_has_no_status_level_options() {
        let rulebook = RenewalRulebook::standard();
        assert!(rulebook
            .status_options_for(StudentStatus::SpecialAuditing)
            .is_empty());
        assert_eq!(rulebook.status_options_for(StudentStatus::Research).len(), 3);
    }

    #[test]
    fn scenario_option_groups_cover_both_authored_scenarios() {
        let rulebook = RenewalRulebook::standard();

        let research = rulebook.scenario_options_for(
            StudentStatus::Research,
            "前学期、3+1特別聴講生(C)として在籍（9月で在留期限が切れる場合）",
        );
        assert_eq!(research.len(), 2);

        let auditing =
            rulebook.scenario_options_for(StudentStatus::SpecialAuditing, "前学期、他大学に在籍");
        assert_eq!(auditing.len(), 2);
    }

    #[test]
    fn every_scholarship_category_has_documents() {
        let rulebook = RenewalRulebook::standard();
        for category in ScholarshipCategory::ordered() {
            assert!(
                !rulebook.scholarship_requirements(category).is_empty(),
                "category {} should carry documents",
                category.label()
            );
        }
    }

    #[test]
    fn not_receiving_scholarship_status_requires_nothing() {
        let rulebook = RenewalRulebook::standard();
        assert!(rulebook
            .scholarship_status_requirements(ScholarshipStatus::NotReceiving)
            .is_empty());
    }

    #[test]
    fn verify_flags_dangling_scenario_reference() {
        let mut rulebook = RenewalRulebook::standard();
        rulebook.scenario_options.push(ScenarioOptionGroup {
            status: StudentStatus::Regular,
            scenario_label: "存在しないシナリオ",
            options: vec![],
        });

        let err = rulebook.verify().expect_err("dangling reference detected");
        assert_eq!(
            err,
            RulebookError::DanglingScenarioRef {
                status: StudentStatus::Regular,
                label: "存在しないシナリオ",
            }
        );
    }

    #[test]
    fn verify_flags_duplicate_scenario_labels() {
        let mut rulebook = RenewalRulebook::standard();
        rulebook.scenarios[0].scenarios.push(Scenario {
            label: "前学期、他大学に在籍",
            requirements: vec![],
        });

        let err = rulebook.verify().expect_err("duplicate label detected");
        assert_eq!(
            err,
            RulebookError::DuplicateScenarioLabel {
                status: StudentStatus::Regular,
                label: "前学期、他大学に在籍",
            }
        );
    }
}
