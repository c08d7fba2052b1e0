//! Subcommand implementations
//!
//! Every command resolves its scenario through the data directory, runs the
//! engine and returns the text to print. Nothing here writes to stdout.

use color_eyre::eyre::{Result, bail, eyre};
use jiff::civil::Date;
use serde_json::json;
use tracing::{debug, info};
use wealthcast_core::model::Strategy;
use wealthcast_core::{
    current_allocation, impact_series, recommended_plan, simulate, summarize_debts,
};

use crate::data::{DataDirectory, ScenarioFile};
use crate::report;

/// Overrides applied on top of a scenario before projecting it
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    pub months: Option<usize>,
    pub strategy: Option<Strategy>,
    /// Show one table row every `every` months
    pub every: Option<usize>,
    pub json: bool,
}

/// Write the sample household under `name`.
pub fn init(dir: &DataDirectory, name: &str, force: bool) -> Result<String> {
    if dir.has_scenario(name) && !force {
        bail!("scenario {name:?} already exists (use --force to overwrite)");
    }
    let scenario = ScenarioFile::sample(name)?;
    dir.save_scenario(name, &scenario)?;
    info!(name, "Wrote sample scenario");
    Ok(format!(
        "Wrote scenario {name:?} to {}",
        dir.root().join("scenarios").display()
    ))
}

pub fn list(dir: &DataDirectory) -> Result<String> {
    let names = dir.list_scenarios()?;
    if names.is_empty() {
        return Ok(format!(
            "No scenarios in {} (try `wealthcast init <name>`)",
            dir.root().display()
        ));
    }
    Ok(names.join("\n"))
}

pub fn project(
    dir: &DataDirectory,
    scenario: &str,
    options: &ProjectOptions,
    today: Date,
) -> Result<String> {
    let file = dir.resolve(scenario)?;
    let now = file.reference_date(today);

    let mut config = file.projection;
    if let Some(months) = options.months {
        config = config.with_horizon(months);
    }
    if let Some(strategy) = options.strategy {
        config = config.with_strategy(strategy);
    }
    debug!(
        scenario,
        horizon = config.horizon_months,
        strategy = %config.strategy,
        "Running projection"
    );

    let projection = simulate(&config, now);
    if options.json {
        return Ok(serde_json::to_string_pretty(&projection)?);
    }

    let every = options.every.unwrap_or(if projection.horizon_months() > 36 {
        12
    } else {
        1
    });
    let title = format!("{} [{}]", display_name(&file.name, scenario), config.strategy);
    Ok(report::render_projection(&title, &projection, every))
}

pub fn plan(dir: &DataDirectory, scenario: &str, json: bool) -> Result<String> {
    let config = dir.resolve(scenario)?.projection;
    let plan = recommended_plan(&config);
    let weights = current_allocation(&config.assets, &config.targets);

    if json {
        let value = json!({
            "investmentGoal": config.investment_goal,
            "strategy": config.strategy,
            "plan": plan,
            "currentAllocation": weights,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }
    Ok(report::render_plan(config.investment_goal, &plan, &weights))
}

pub fn debts(
    dir: &DataDirectory,
    scenario: &str,
    schedule: Option<&str>,
    json: bool,
    today: Date,
) -> Result<String> {
    let file = dir.resolve(scenario)?;
    let now = file.reference_date(today);
    let debts = &file.projection.debts;
    let summaries = summarize_debts(debts, now);

    let Some(wanted) = schedule else {
        if json {
            return Ok(serde_json::to_string_pretty(&summaries)?);
        }
        return Ok(report::render_debts(&summaries));
    };

    let (debt, summary) = debts
        .iter()
        .zip(&summaries)
        .find(|(d, _)| d.name.eq_ignore_ascii_case(wanted) || d.id.as_str() == wanted)
        .ok_or_else(|| eyre!("no debt named {wanted:?} in {scenario}"))?;
    let rows = summary.schedule(debt);
    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    Ok(report::render_schedule(summary, &rows, now))
}

pub fn events(
    dir: &DataDirectory,
    scenario: &str,
    months: Option<usize>,
    json: bool,
    today: Date,
) -> Result<String> {
    let file = dir.resolve(scenario)?;
    let now = file.reference_date(today);
    let config = match months {
        Some(months) => file.projection.with_horizon(months),
        None => file.projection,
    };
    let series = impact_series(&config.events, config.effective_horizon(), now);

    if json {
        return Ok(serde_json::to_string_pretty(&series)?);
    }
    Ok(report::render_events(&config.events, &series, now))
}

fn display_name<'a>(name: &'a str, fallback: &'a str) -> &'a str {
    if name.trim().is_empty() { fallback } else { name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use tempfile::TempDir;
    use wealthcast_core::model::Projection;

    const TODAY: Date = date(2026, 10, 19);

    fn data_dir() -> (TempDir, DataDirectory) {
        let temp = TempDir::new().unwrap();
        let dir = DataDirectory::new(temp.path().to_path_buf());
        (temp, dir)
    }

    #[test]
    fn test_init_then_list() {
        let (_temp, dir) = data_dir();
        assert!(list(&dir).unwrap().starts_with("No scenarios"));

        init(&dir, "home", false).unwrap();
        assert_eq!(list(&dir).unwrap(), "home");
        assert!(init(&dir, "home", false).is_err());
        assert!(init(&dir, "home", true).is_ok());
    }

    #[test]
    fn test_project_text_and_json() {
        let (_temp, dir) = data_dir();
        init(&dir, "home", false).unwrap();

        let options = ProjectOptions {
            months: Some(24),
            strategy: Some(Strategy::Dca),
            ..Default::default()
        };
        let text = project(&dir, "home", &options, TODAY).unwrap();
        assert!(text.starts_with("home [dca] (24 months)"));

        let json = project(
            &dir,
            "home",
            &ProjectOptions {
                months: Some(6),
                json: true,
                ..Default::default()
            },
            TODAY,
        )
        .unwrap();
        let projection: Projection = serde_json::from_str(&json).unwrap();
        assert_eq!(projection.series.len(), 7);
        assert_eq!(projection.series[0].month_label, "Oct 2026");
    }

    #[test]
    fn test_plan_and_events() {
        let (_temp, dir) = data_dir();
        init(&dir, "home", false).unwrap();

        let text = plan(&dir, "home", false).unwrap();
        assert!(text.starts_with("Monthly plan for 700.00"));

        let value: serde_json::Value =
            serde_json::from_str(&plan(&dir, "home", true).unwrap()).unwrap();
        assert_eq!(value["strategy"], "smart");
        assert!(value["plan"]["classes"].is_array());

        let series: Vec<f64> =
            serde_json::from_str(&events(&dir, "home", Some(12), true, TODAY).unwrap()).unwrap();
        assert_eq!(series.len(), 13);
        // Bonus and quarterly insurance in March 2027, holidays in July 2027
        assert_eq!(series[2], -180.0);
        assert_eq!(series[5], 2_500.0 - 180.0);
        assert_eq!(series[9], -1_800.0);
    }

    #[test]
    fn test_debts_and_schedule() {
        let (_temp, dir) = data_dir();
        init(&dir, "home", false).unwrap();

        let text = debts(&dir, "home", None, false, TODAY).unwrap();
        assert!(text.contains("Car loan"));

        let table = debts(&dir, "home", Some("car loan"), false, TODAY).unwrap();
        assert!(table.contains("Balance"));

        let err = debts(&dir, "home", Some("boat"), false, TODAY).unwrap_err();
        assert!(err.to_string().contains("boat"));
    }

    #[test]
    fn test_unknown_scenario() {
        let (_temp, dir) = data_dir();
        let err = project(&dir, "missing", &ProjectOptions::default(), TODAY).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
