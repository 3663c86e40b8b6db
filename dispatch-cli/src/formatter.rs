use colored::*;
use dispatch_client::{
    ComponentSelector, Dispatch, DispatchId, EndCriteria, Frequency, RecurrenceRule, Weekday,
};
use serde_json::{Value, json};
use std::fmt::Display;
use std::time::SystemTime;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

pub struct GenericError<T: Display>(pub &'static str, pub T);

/// Footer printed after a listing.
pub struct ListSummary(pub usize);

/// Outcome of a batch operation over several ids.
pub struct BatchSummary {
    pub action: &'static str,
    pub succeeded: Vec<DispatchId>,
    pub failed: Vec<DispatchId>,
}

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<&Dispatch> for FormattedString {
    fn from(dispatch: &Dispatch) -> Self {
        let value = dispatch_to_json(dispatch);
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl<T: Display> From<GenericError<T>> for FormattedString {
    fn from(GenericError(msg, err): GenericError<T>) -> Self {
        FormattedString(format!("{}:\n\n'{}'", msg.red().bold(), err))
    }
}

impl From<ListSummary> for FormattedString {
    fn from(ListSummary(count): ListSummary) -> Self {
        if count == 0 {
            return FormattedString("No dispatches found.".yellow().to_string());
        }
        FormattedString(format!("{} dispatches total.", count.to_string().green()))
    }
}

impl From<&BatchSummary> for FormattedString {
    fn from(summary: &BatchSummary) -> Self {
        let mut out = String::new();
        if !summary.succeeded.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                format!("Dispatches {}:", summary.action).green().bold(),
                join_ids(&summary.succeeded)
            ));
        }
        if !summary.failed.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                "Failed:".red().bold(),
                join_ids(&summary.failed)
            ));
        }
        FormattedString(out.trim_end().to_string())
    }
}

fn join_ids(ids: &[DispatchId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn dispatch_to_json(dispatch: &Dispatch) -> Value {
    json!({
        "id": dispatch.id.0,
        "microgrid_id": dispatch.microgrid_id.0,
        "type": dispatch.dispatch_type,
        "create_time": time(dispatch.create_time),
        "update_time": time(dispatch.update_time),
        "start_time": time(dispatch.start_time),
        "end_time": time(dispatch.end_time()),
        "duration_seconds": dispatch.duration.as_secs(),
        "selector": selector(&dispatch.selector),
        "active": dispatch.active,
        "dry_run": dispatch.dry_run,
        "payload": dispatch.payload,
        "recurrence": recurrence(&dispatch.recurrence),
    })
}

fn time(time: SystemTime) -> String {
    prost_types::Timestamp::from(time).to_string()
}

fn selector(selector: &ComponentSelector) -> Value {
    match selector {
        ComponentSelector::Ids(ids) => json!({ "component_ids": ids }),
        ComponentSelector::Category(category) => json!({ "category": category.as_str() }),
    }
}

fn recurrence(rule: &RecurrenceRule) -> Value {
    let Some(frequency) = rule.frequency else {
        return Value::Null;
    };

    let end_criteria = match rule.end_criteria {
        Some(EndCriteria::Count(count)) => json!({ "count": count }),
        Some(EndCriteria::Until(until)) => json!({ "until": time(until) }),
        None => Value::Null,
    };

    json!({
        "frequency": frequency_name(frequency),
        "interval": rule.interval,
        "end_criteria": end_criteria,
        "byminutes": rule.byminutes,
        "byhours": rule.byhours,
        "byweekdays": rule.byweekdays.iter().copied().map(weekday_name).collect::<Vec<_>>(),
        "bymonthdays": rule.bymonthdays,
        "bymonths": rule.bymonths,
    })
}

fn frequency_name(frequency: Frequency) -> &'static str {
    match frequency {
        Frequency::Minutely => "MINUTELY",
        Frequency::Hourly => "HOURLY",
        Frequency::Daily => "DAILY",
        Frequency::Weekly => "WEEKLY",
        Frequency::Monthly => "MONTHLY",
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "MONDAY",
        Weekday::Tuesday => "TUESDAY",
        Weekday::Wednesday => "WEDNESDAY",
        Weekday::Thursday => "THURSDAY",
        Weekday::Friday => "FRIDAY",
        Weekday::Saturday => "SATURDAY",
        Weekday::Sunday => "SUNDAY",
    }
}
