//! The single-page form: rule tables embedded as inline JSON, selection and
//! resolution running client-side in the same concatenation order as
//! [`RenewalRulebook::requirements`].

use residence_docs::renewal::{
    RenewalRulebook, Scenario, ScholarshipCategory, ScholarshipStatus, StudentStatus,
};
use serde::Serialize;

#[derive(Serialize)]
struct StatusEntry<'a> {
    label: &'static str,
    scenarios: &'a [Scenario],
}

#[derive(Serialize)]
struct StatusOptionsEntry<'a> {
    status: &'static str,
    options: &'a [Scenario],
}

#[derive(Serialize)]
struct ScenarioOptionsEntry<'a> {
    status: &'static str,
    scenario: &'static str,
    options: &'a [Scenario],
}

#[derive(Serialize)]
struct LabelledDocuments<'a> {
    label: &'static str,
    requirements: &'a [&'static str],
}

pub(crate) fn render_index(rulebook: &RenewalRulebook) -> Result<String, serde_json::Error> {
    let statuses: Vec<StatusEntry> = StudentStatus::ordered()
        .into_iter()
        .map(|status| StatusEntry {
            label: status.label(),
            scenarios: rulebook.scenarios_for(status),
        })
        .collect();

    let status_options: Vec<StatusOptionsEntry> = StudentStatus::ordered()
        .into_iter()
        .map(|status| StatusOptionsEntry {
            status: status.label(),
            options: rulebook.status_options_for(status),
        })
        .filter(|entry| !entry.options.is_empty())
        .collect();

    let scenario_options: Vec<ScenarioOptionsEntry> = rulebook
        .scenario_option_groups()
        .iter()
        .map(|group| ScenarioOptionsEntry {
            status: group.status.label(),
            scenario: group.scenario_label,
            options: &group.options,
        })
        .collect();

    let scholarships: Vec<LabelledDocuments> = ScholarshipCategory::ordered()
        .into_iter()
        .map(|category| LabelledDocuments {
            label: category.label(),
            requirements: rulebook.scholarship_requirements(category),
        })
        .collect();

    let scholarship_statuses: Vec<LabelledDocuments> = ScholarshipStatus::ordered()
        .into_iter()
        .map(|status| LabelledDocuments {
            label: status.label(),
            requirements: rulebook.scholarship_status_requirements(status),
        })
        .collect();

    Ok(INDEX_HTML
        .replacen(
            "__COMMON__",
            &serde_json::to_string(rulebook.common_requirements())?,
            1,
        )
        .replacen("__STATUSES__", &serde_json::to_string(&statuses)?, 1)
        .replacen(
            "__STATUS_OPTIONS__",
            &serde_json::to_string(&status_options)?,
            1,
        )
        .replacen(
            "__SCENARIO_OPTIONS__",
            &serde_json::to_string(&scenario_options)?,
            1,
        )
        .replacen("__SCHOLARSHIPS__", &serde_json::to_string(&scholarships)?, 1)
        .replacen(
            "__SCHOLARSHIP_STATUSES__",
            &serde_json::to_string(&scholarship_statuses)?,
            1,
        ))
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="ja">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>在留期間更新 必要書類ナビ</title>
  <style>
    :root { color-scheme: light; }
    body { font-family: system-ui, -apple-system, sans-serif; margin: 2rem; line-height: 1.6; }
    h1 { font-size: 1.6rem; margin-bottom: 0.2rem; }
    .card { max-width: 720px; padding: 1.25rem 1.5rem; border: 1px solid #ddd; border-radius: 12px; box-shadow: 0 6px 20px rgba(0,0,0,0.05); }
    label { display: block; font-weight: 600; margin-top: 1rem; margin-bottom: 0.3rem; }
    select { width: 100%; padding: 0.5rem; font-size: 1rem; border-radius: 6px; border: 1px solid #ccc; }
    button { margin-top: 1rem; padding: 0.65rem 1rem; font-size: 1rem; border-radius: 8px; border: 0; background: #0069d9; color: #fff; cursor: pointer; }
    button:disabled { background: #9ab9e8; cursor: not-allowed; }
    ul { padding-left: 1.2rem; }
    .muted { color: #555; }
  </style>
</head>
<body>
  <div class="card">
    <h1>在留期間更新に必要な書類</h1>
    <p class="muted">身分・状況・奨学金区分を選ぶと、提出が必要な書類が表示されます。</p>

    <label for="status">身分</label>
    <select id="status">
      <option value="">選択してください</option>
    </select>

    <label for="scenario">状況</label>
    <select id="scenario" disabled>
      <option value="">身分を先に選んでください</option>
    </select>

    <div id="options" style="margin-top: 0.6rem;"></div>

    <label for="scholarship">奨学金区分（任意）</label>
    <select id="scholarship">
      <option value="">選択なし</option>
    </select>

    <label for="scholarship-status">奨学金の受給状況（任意）</label>
    <select id="scholarship-status">
      <option value="">選択なし</option>
    </select>

    <button id="show" disabled>必要書類を表示</button>

    <div id="results" style="margin-top: 1.4rem;"></div>
  </div>

  <script>
    const commonRequirements = __COMMON__;
    const statusData = __STATUSES__;
    const statusOptionData = __STATUS_OPTIONS__;
    const scenarioOptionData = __SCENARIO_OPTIONS__;
    const scholarshipData = __SCHOLARSHIPS__;
    const scholarshipStatusData = __SCHOLARSHIP_STATUSES__;

    const statusSelect = document.getElementById('status');
    const scenarioSelect = document.getElementById('scenario');
    const scholarshipSelect = document.getElementById('scholarship');
    const scholarshipStatusSelect = document.getElementById('scholarship-status');
    const showButton = document.getElementById('show');
    const results = document.getElementById('results');
    const optionsContainer = document.getElementById('options');

    function findStatus(label) {
      return statusData.find((entry) => entry.label === label);
    }

    function populateSelect(select, entries) {
      entries.forEach((entry) => {
        const option = document.createElement('option');
        option.value = entry.label;
        option.textContent = entry.label;
        select.appendChild(option);
      });
    }

    function currentOptionRows() {
      const status = statusSelect.value;
      if (!status) return [];

      const rows = [];
      const statusGroup = statusOptionData.find((entry) => entry.status === status);
      if (statusGroup) {
        rows.push(...statusGroup.options);
      }

      const scenarioLabel = scenarioSelect.value;
      if (scenarioLabel) {
        const scenarioGroup = scenarioOptionData.find(
          (entry) => entry.status === status && entry.scenario === scenarioLabel
        );
        if (scenarioGroup) {
          rows.push(...scenarioGroup.options);
        }
      }

      const seen = new Set();
      return rows.filter((row) => {
        if (seen.has(row.label)) return false;
        seen.add(row.label);
        return true;
      });
    }

    function renderOptions() {
      optionsContainer.innerHTML = '';
      const rows = currentOptionRows();
      if (!rows.length) return;

      const wrapper = document.createElement('div');
      const description = document.createElement('div');
      description.textContent = '該当する場合はチェックを入れてください';
      description.style.fontWeight = '600';
      description.style.marginBottom = '0.35rem';
      wrapper.appendChild(description);

      rows.forEach((row, idx) => {
        const label = document.createElement('label');
        label.style.fontWeight = '500';
        label.style.display = 'flex';
        label.style.alignItems = 'center';
        label.style.gap = '0.4rem';
        label.style.marginBottom = '0.25rem';

        const checkbox = document.createElement('input');
        checkbox.type = 'checkbox';
        checkbox.id = `option-${idx}`;
        checkbox.dataset.requirements = JSON.stringify(row.requirements || []);
        checkbox.addEventListener('change', showRequirements);

        const text = document.createElement('span');
        text.textContent = row.label;

        label.appendChild(checkbox);
        label.appendChild(text);
        wrapper.appendChild(label);
      });

      optionsContainer.appendChild(wrapper);
    }

    function refreshScenarios() {
      const status = statusSelect.value;
      scenarioSelect.innerHTML = '';
      if (!status) {
        const option = document.createElement('option');
        option.value = '';
        option.textContent = '身分を先に選んでください';
        scenarioSelect.appendChild(option);
        scenarioSelect.disabled = true;
        showButton.disabled = true;
        renderOptions();
        return;
      }

      findStatus(status).scenarios.forEach((scenario) => {
        const option = document.createElement('option');
        option.value = scenario.label;
        option.textContent = scenario.label;
        scenarioSelect.appendChild(option);
      });
      scenarioSelect.disabled = false;
      scenarioSelect.selectedIndex = 0;
      showButton.disabled = !scenarioSelect.value;
      renderOptions();
    }

    function renderRequirements(requirements) {
      results.innerHTML = '';
      if (!requirements.length) {
        const empty = document.createElement('p');
        empty.textContent = '必要な書類はありません。';
        results.appendChild(empty);
        return;
      }

      const list = document.createElement('ul');
      requirements.forEach((item) => {
        const li = document.createElement('li');
        li.textContent = item;
        list.appendChild(li);
      });
      results.appendChild(list);
    }

    function getSelectedOptionalRequirements() {
      const checkboxes = optionsContainer.querySelectorAll(
        'input[type="checkbox"]:checked'
      );
      return Array.from(checkboxes).flatMap((checkbox) => {
        try {
          return JSON.parse(checkbox.dataset.requirements || '[]');
        } catch (err) {
          return [];
        }
      });
    }

    function showRequirements() {
      const status = statusSelect.value;
      const scenarioLabel = scenarioSelect.value;
      if (!status || !scenarioLabel) {
        renderRequirements([]);
        return;
      }

      const entry = findStatus(status);
      const scenario = entry
        ? entry.scenarios.find((item) => item.label === scenarioLabel)
        : null;
      const scholarship = scholarshipData.find(
        (item) => item.label === scholarshipSelect.value
      );
      const scholarshipStatus = scholarshipStatusData.find(
        (item) => item.label === scholarshipStatusSelect.value
      );

      const requirements = [
        ...commonRequirements,
        ...(scenario ? scenario.requirements : []),
        ...getSelectedOptionalRequirements(),
        ...(scholarship ? scholarship.requirements : []),
        ...(scholarshipStatus ? scholarshipStatus.requirements : []),
      ];
      renderRequirements(requirements);
    }

    statusSelect.addEventListener('change', () => {
      refreshScenarios();
      showRequirements();
    });

    scenarioSelect.addEventListener('change', () => {
      showButton.disabled = !scenarioSelect.value;
      renderOptions();
    });

    scholarshipSelect.addEventListener('change', showRequirements);
    scholarshipStatusSelect.addEventListener('change', showRequirements);
    showButton.addEventListener('click', showRequirements);

    populateSelect(statusSelect, statusData);
    populateSelect(scholarshipSelect, scholarshipData);
    populateSelect(scholarshipStatusSelect, scholarshipStatusData);
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_embeds_every_table() {
        let rulebook = RenewalRulebook::standard();
        let html = render_index(&rulebook).expect("page renders");

        for status in StudentStatus::ordered() {
            assert!(html.contains(status.label()));
        }
        for category in ScholarshipCategory::ordered() {
            assert!(html.contains(category.label()));
        }
        for status in ScholarshipStatus::ordered() {
            assert!(html.contains(status.label()));
        }
        assert!(html.contains("6,000円分の収入印紙"));
    }

    #[test]
    fn index_leaves_no_unfilled_placeholders() {
        let rulebook = RenewalRulebook::standard();
        let html = render_index(&rulebook).expect("page renders");
        assert!(!html.contains("__COMMON__"));
        assert!(!html.contains("__STATUSES__"));
        assert!(!html.contains("__STATUS_OPTIONS__"));
        assert!(!html.contains("__SCENARIO_OPTIONS__"));
        assert!(!html.contains("__SCHOLARSHIPS__"));
        assert!(!html.contains("__SCHOLARSHIP_STATUSES__"));
    }

    #[test]
    fn scenario_level_options_serialize_with_their_owning_scenario() {
        let rulebook = RenewalRulebook::standard();
        let html = render_index(&rulebook).expect("page renders");
        assert!(html.contains("これから研究生になる方"));
        assert!(html.contains("日本の大学に１年以上在籍"));
    }
}
