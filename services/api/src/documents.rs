use crate::cli::CliError;
use crate::prompt;
use clap::Args;
use residence_docs::error::AppError;
use residence_docs::renewal::{
    RenewalRulebook, RequirementsError, RequirementsQuery, ScholarshipCategory, ScholarshipStatus,
    StudentStatus,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DocumentsArgs {
    /// Student status label (e.g. 正規生)
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Scenario label exactly as authored for the status
    #[arg(long)]
    pub(crate) scenario: Option<String>,
    /// Optional item label to include (repeatable)
    #[arg(long = "option")]
    pub(crate) options: Vec<String>,
    /// Scholarship category label
    #[arg(long)]
    pub(crate) scholarship: Option<String>,
    /// Scholarship status label
    #[arg(long)]
    pub(crate) scholarship_status: Option<String>,
}

pub(crate) fn run_documents(args: DocumentsArgs) -> Result<(), CliError> {
    let rulebook = RenewalRulebook::standard();
    rulebook.verify().map_err(AppError::from)?;

    let query = build_query(&rulebook, args)?;
    let documents = rulebook.requirements(&query).map_err(AppError::from)?;
    render_documents(&documents);
    Ok(())
}

fn build_query(
    rulebook: &RenewalRulebook,
    args: DocumentsArgs,
) -> Result<RequirementsQuery, CliError> {
    let DocumentsArgs {
        status,
        scenario,
        options,
        scholarship,
        scholarship_status,
    } = args;

    if let (Some(status), Some(scenario)) = (&status, &scenario) {
        return Ok(RequirementsQuery {
            status: status.clone(),
            scenario: scenario.clone(),
            selected_options: options,
            scholarship,
            scholarship_status,
        });
    }

    interactive_query(
        rulebook,
        status,
        options,
        scholarship,
        scholarship_status,
    )
}

/// Walk the user through the same selections the form offers. Flags that were
/// supplied are honored; everything else is prompted for.
fn interactive_query(
    rulebook: &RenewalRulebook,
    status: Option<String>,
    selected_options: Vec<String>,
    scholarship: Option<String>,
    scholarship_status: Option<String>,
) -> Result<RequirementsQuery, CliError> {
    let status_label = match status {
        Some(label) => label,
        None => {
            let labels: Vec<&str> = StudentStatus::ordered()
                .iter()
                .map(|status| status.label())
                .collect();
            prompt::select("身分を選んでください", &labels)?.to_string()
        }
    };
    let parsed = StudentStatus::from_label(&status_label)
        .ok_or_else(|| AppError::from(RequirementsError::UnknownStatus(status_label.clone())))?;

    let scenario_labels: Vec<&str> = rulebook
        .scenarios_for(parsed)
        .iter()
        .map(|scenario| scenario.label)
        .collect();
    let scenario_label = prompt::select("状況を選んでください", &scenario_labels)?.to_string();

    let mut selected = selected_options;
    if selected.is_empty() {
        let rows = rulebook
            .status_options_for(parsed)
            .iter()
            .chain(rulebook.scenario_options_for(parsed, &scenario_label));
        for row in rows {
            if prompt::confirm(&format!("該当しますか: {}", row.label))? {
                selected.push(row.label.to_string());
            }
        }
    }

    let scholarship = match scholarship {
        Some(label) => Some(label),
        None => {
            let labels: Vec<&str> = ScholarshipCategory::ordered()
                .iter()
                .map(|category| category.label())
                .collect();
            prompt::select_optional("奨学金区分を選んでください（任意）", &labels)?
                .map(str::to_string)
        }
    };

    let scholarship_status = match scholarship_status {
        Some(label) => Some(label),
        None => {
            let labels: Vec<&str> = ScholarshipStatus::ordered()
                .iter()
                .map(|status| status.label())
                .collect();
            prompt::select_optional("奨学金の受給状況を選んでください（任意）", &labels)?
                .map(str::to_string)
        }
    };

    Ok(RequirementsQuery {
        status: status_label,
        scenario: scenario_label,
        selected_options: selected,
        scholarship,
        scholarship_status,
    })
}

fn render_documents(documents: &[String]) {
    println!("必要書類:");
    for item in documents {
        println!("- {item}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_supplied_status_and_scenario_skip_the_prompt() {
        let rulebook = RenewalRulebook::standard();
        let args = DocumentsArgs {
            status: Some("研究生".to_string()),
            scenario: Some("前学期も研究生として在籍".to_string()),
            options: vec!["研究継続予定".to_string()],
            scholarship: Some("国費留学生".to_string()),
            scholarship_status: None,
        };

        let query = build_query(&rulebook, args).expect("flags build a query");
        assert_eq!(query.status, "研究生");
        assert_eq!(query.scenario, "前学期も研究生として在籍");
        assert_eq!(query.selected_options, vec!["研究継続予定".to_string()]);
        assert_eq!(query.scholarship.as_deref(), Some("国費留学生"));
        assert!(query.scholarship_status.is_none());
    }
}
