use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The student's formal affiliation category. The Japanese label doubles as
/// the lookup key used by both front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Regular,
    Research,
    SpecialAuditing,
}

impl StudentStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Regular, Self::Research, Self::SpecialAuditing]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Regular => "正規生",
            Self::Research => "研究生",
            Self::SpecialAuditing => "特別聴講学生",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == label)
    }
}

/// Funding source category; each adds its own document requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScholarshipCategory {
    GovernmentSponsored,
    JapanKoreaScienceEngineering,
    PrivateGrant,
    PrivateLoan,
}

impl ScholarshipCategory {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::GovernmentSponsored,
            Self::JapanKoreaScienceEngineering,
            Self::PrivateGrant,
            Self::PrivateLoan,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GovernmentSponsored => "国費留学生",
            Self::JapanKoreaScienceEngineering => "日韓共同理工系学部留学生",
            Self::PrivateGrant => "日本政府以外の給付型の奨学金受給学生",
            Self::PrivateLoan => "日本政府以外の貸与型の奨学金受給学生",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.label() == label)
    }
}

/// Recent funding changes since the previous application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScholarshipStatus {
    NewlyAwarded,
    CertificateOnFile,
    NotReceiving,
}

impl ScholarshipStatus {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::NewlyAwarded,
            Self::CertificateOnFile,
            Self::NotReceiving,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NewlyAwarded => "前回申請以降に新たに奨学金を受給",
            Self::CertificateOnFile => "前回申請時に奨学金証明書を提出済み",
            Self::NotReceiving => "前回申請から奨学金を受給していない",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == label)
    }
}

/// A situational variant within a status and the documents it requires.
/// Labels are unique within their owning status; list order is display order.
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub label: &'static str,
    pub requirements: Vec<&'static str>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequirementsError {
    #[error("未対応の身分です: {0}")]
    UnknownStatus(String),
    #[error("シナリオが一致しません: {label}。候補: {candidates}", candidates = .valid.join(", "))]
    UnknownScenario {
        status: StudentStatus,
        label: String,
        valid: Vec<&'static str>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulebookError {
    #[error("duplicate scenario label '{label}' under status '{status_label}'", status_label = .status.label())]
    DuplicateScenarioLabel {
        status: StudentStatus,
        label: &'static str,
    },
    #[error("scenario options under status '{status_label}' reference unknown scenario '{label}'", status_label = .status.label())]
    DanglingScenarioRef {
        status: StudentStatus,
        label: &'static str,
    },
}
