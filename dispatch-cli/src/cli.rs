//! # CLI
//!
//! This module defines the command-line interface of `dispatch` using `clap`.
//!
//! It is responsible for parsing user input and validating it (selectors, times, durations,
//! id ranges) before anything is sent to the service.
use clap::{Args, Parser, Subcommand};
use dispatch_client::{
    ComponentCategory, ComponentSelector, DispatchId, EndCriteria, Frequency, MicrogridId,
    Payload, SortField, Weekday,
};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

#[derive(Parser)]
#[command(name = "dispatch", version, about = "Frequenz dispatch API CLI")]
pub struct Cli {
    /// Dispatch service address (e.g. grpc://dispatch.example.com:443)
    #[arg(long, env = "DISPATCH_API_URL", default_value = "grpc://localhost:50051")]
    pub url: String,

    /// API key sent with every request
    #[arg(long, env = "DISPATCH_API_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Use a plaintext connection. Also enabled by setting DISPATCH_API_INSECURE=1
    #[arg(long)]
    pub insecure: bool,

    /// PEM file with the root certificate used to validate the server
    #[arg(long, env = "DISPATCH_API_ROOT_CERT")]
    pub root_cert: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the dispatches of a microgrid matching the given filters
    ///
    /// The selector option can be given multiple times.
    List {
        microgrid_id: MicrogridId,

        #[command(flatten)]
        filter: FilterArgs,

        /// Sort by this field (start-time, create-time or update-time)
        #[arg(long, value_parser = parse_sort_field)]
        sort: Option<SortField>,

        /// Sort in descending order
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Number of dispatches requested per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Create a dispatch
    ///
    /// SELECTOR is either a component category (GRID, METER, INVERTER, CONVERTER,
    /// BATTERY, EV_CHARGER, CHP) or a comma separated list of component ids, e.g. "1,2,3".
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// dispatch create 42 DEMAND_RESPONSE "in 1h" 15m BATTERY --payload '{"power": 1000}'
    /// ```
    Create {
        microgrid_id: MicrogridId,

        /// Dispatch type
        #[arg(value_name = "TYPE")]
        dispatch_type: String,

        #[arg(value_parser = parse_time)]
        start_time: SystemTime,

        #[arg(value_parser = parse_duration)]
        duration: Duration,

        #[arg(value_parser = parse_selector)]
        selector: ComponentSelector,

        /// Create the dispatch inactive
        #[arg(long)]
        inactive: bool,

        /// Mark the dispatch as a dry run
        #[arg(short, long)]
        dry_run: bool,

        /// JSON object with the dispatch payload
        #[arg(short, long, value_parser = parse_payload)]
        payload: Option<Payload>,

        #[command(flatten)]
        recurrence: RecurrenceArgs,
    },

    /// Update fields of a dispatch
    Update {
        microgrid_id: MicrogridId,

        dispatch_id: DispatchId,

        #[arg(long, value_parser = parse_time)]
        start_time: Option<SystemTime>,

        #[arg(long, value_parser = parse_duration)]
        duration: Option<Duration>,

        #[arg(long, value_parser = parse_selector)]
        selector: Option<ComponentSelector>,

        #[arg(long)]
        active: Option<bool>,

        #[arg(short, long, value_parser = parse_payload)]
        payload: Option<Payload>,

        #[command(flatten)]
        recurrence: RecurrenceArgs,

        /// Remove the end criteria so the dispatch recurs forever
        #[arg(long, conflicts_with_all = ["count", "until"])]
        no_end: bool,
    },

    /// Print one or more dispatches
    ///
    /// Possible id formats: "1", "1,2,3", "1-3", "1..3"
    Get {
        microgrid_id: MicrogridId,

        #[arg(required = true, value_parser = parse_id_range)]
        ids: Vec<DispatchIds>,
    },

    /// Delete one or more dispatches
    ///
    /// Possible id formats: "1", "1,2,3", "1-3", "1..3"
    Delete {
        microgrid_id: MicrogridId,

        #[arg(required = true, value_parser = parse_id_range)]
        ids: Vec<DispatchIds>,
    },
}

#[derive(Args)]
pub struct FilterArgs {
    /// Only dispatches targeting this selector
    #[arg(short, long = "selector", value_parser = parse_selector)]
    pub selectors: Vec<ComponentSelector>,

    #[arg(long, value_parser = parse_time)]
    pub start_from: Option<SystemTime>,

    #[arg(long, value_parser = parse_time)]
    pub start_to: Option<SystemTime>,

    #[arg(long, value_parser = parse_time)]
    pub end_from: Option<SystemTime>,

    #[arg(long, value_parser = parse_time)]
    pub end_to: Option<SystemTime>,

    #[arg(long)]
    pub active: Option<bool>,

    #[arg(long)]
    pub dry_run: Option<bool>,
}

#[derive(Args)]
pub struct RecurrenceArgs {
    /// Recurrence frequency (minutely, hourly, daily, weekly, monthly)
    #[arg(long, value_parser = parse_frequency)]
    pub frequency: Option<Frequency>,

    /// Recur every INTERVAL periods of the frequency
    #[arg(long)]
    pub interval: Option<u32>,

    /// Stop after this many occurrences
    #[arg(long, conflicts_with = "until")]
    pub count: Option<u32>,

    /// Stop recurring at this time
    #[arg(long, value_parser = parse_time)]
    pub until: Option<SystemTime>,

    #[arg(long = "by-minute", value_delimiter = ',')]
    pub byminutes: Option<Vec<u32>>,

    #[arg(long = "by-hour", value_delimiter = ',')]
    pub byhours: Option<Vec<u32>>,

    /// Weekdays, e.g. "mon,wed,fri"
    #[arg(long = "by-weekday", value_delimiter = ',', value_parser = parse_weekday)]
    pub byweekdays: Option<Vec<Weekday>>,

    #[arg(long = "by-monthday", value_delimiter = ',')]
    pub bymonthdays: Option<Vec<u32>>,

    #[arg(long = "by-month", value_delimiter = ',')]
    pub bymonths: Option<Vec<u32>>,
}

impl RecurrenceArgs {
    pub fn end_criteria(&self) -> Option<EndCriteria> {
        self.count
            .map(EndCriteria::Count)
            .or(self.until.map(EndCriteria::Until))
    }

    /// The end criteria change for an update. `clear` removes it.
    pub fn end_criteria_update(&self, clear: bool) -> Option<Option<EndCriteria>> {
        if clear {
            return Some(None);
        }
        self.end_criteria().map(Some)
    }
}

/// A comma separated list of component ids, or a component category name.
pub fn parse_selector(value: &str) -> Result<ComponentSelector, String> {
    if let Some(category) = ComponentCategory::from_name(value.trim()) {
        return Ok(ComponentSelector::Category(category));
    }

    value
        .split(',')
        .map(|id| id.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map(ComponentSelector::Ids)
        .map_err(|_| {
            format!("Invalid selector '{value}'. Expected a component category or a list of ids")
        })
}

/// `now`, `in <duration>`, `<duration> ago` or an RFC 3339 timestamp.
pub fn parse_time(value: &str) -> Result<SystemTime, String> {
    let value = value.trim();

    if value.eq_ignore_ascii_case("now") {
        return Ok(SystemTime::now());
    }
    if let Some(offset) = value.strip_prefix("in ") {
        return SystemTime::now()
            .checked_add(parse_duration(offset)?)
            .ok_or_else(|| format!("Invalid time '{value}'"));
    }
    if let Some(offset) = value.strip_suffix(" ago") {
        return SystemTime::now()
            .checked_sub(parse_duration(offset)?)
            .ok_or_else(|| format!("Invalid time '{value}'"));
    }

    let timestamp = prost_types::Timestamp::from_str(value)
        .map_err(|e| format!("Invalid time '{value}': {e}"))?;
    SystemTime::try_from(timestamp).map_err(|e| format!("Invalid time '{value}': {e}"))
}

/// Whole seconds, optionally with a unit suffix: `90`, `90s`, `15m`, `2h`, `1d`.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let invalid = || format!("Invalid duration '{value}'. Expected e.g. 90, 15m, 2h or 1d");

    let (digits, unit) = match value.find(|c: char| !c.is_ascii_digit()) {
        Some(index) => value.split_at(index),
        None => (value, "s"),
    };

    let amount = digits.parse::<u64>().map_err(|_| invalid())?;
    let multiplier = match unit.trim() {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return Err(invalid()),
    };

    amount
        .checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(invalid)
}

/// Dispatch ids given as one command-line argument.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchIds(pub Vec<DispatchId>);

/// Flattens the id arguments, dropping repeated ids.
pub fn flatten_ids(ids: Vec<DispatchIds>) -> Vec<DispatchId> {
    let mut flat: Vec<DispatchId> = Vec::new();
    for id in ids.into_iter().flat_map(|DispatchIds(ids)| ids) {
        if !flat.contains(&id) {
            flat.push(id);
        }
    }
    flat
}

/// Longest id range accepted in a single argument.
pub const MAX_ID_RANGE: u64 = 10_000;

/// `1`, `1,2,3`, `1-3` or `1..3` (ranges are inclusive).
pub fn parse_id_range(value: &str) -> Result<DispatchIds, String> {
    let invalid = || format!("Invalid id range '{value}'. Expected e.g. 1, 1,2,3, 1-3 or 1..3");
    let parse_id = |id: &str| id.trim().parse::<u64>().map_err(|_| invalid());

    let range = value.split_once("..").or_else(|| value.split_once('-'));
    let ids: Vec<u64> = match range {
        Some((start, end)) => {
            let (start, end) = (parse_id(start)?, parse_id(end)?);
            if start > end {
                return Err(invalid());
            }
            if end - start >= MAX_ID_RANGE {
                return Err(format!(
                    "Id range '{value}' is too long, at most {MAX_ID_RANGE} ids are allowed"
                ));
            }
            (start..=end).collect()
        }
        None => value.split(',').map(parse_id).collect::<Result<_, _>>()?,
    };

    Ok(DispatchIds(ids.into_iter().map(DispatchId).collect()))
}

fn parse_payload(value: &str) -> Result<Payload, String> {
    match serde_json::from_str(value) {
        Ok(serde_json::Value::Object(payload)) => Ok(payload),
        Ok(_) => Err("Payload must be a JSON object".to_string()),
        Err(e) => Err(format!("Invalid JSON: {e}")),
    }
}

fn parse_sort_field(value: &str) -> Result<SortField, String> {
    match value.to_ascii_lowercase().replace('_', "-").as_str() {
        "start-time" | "start" => Ok(SortField::StartTime),
        "create-time" | "create" => Ok(SortField::CreateTime),
        "update-time" | "update" => Ok(SortField::UpdateTime),
        _ => Err(format!("Unknown sort field '{value}'")),
    }
}

fn parse_frequency(value: &str) -> Result<Frequency, String> {
    match value.to_ascii_lowercase().as_str() {
        "minutely" => Ok(Frequency::Minutely),
        "hourly" => Ok(Frequency::Hourly),
        "daily" => Ok(Frequency::Daily),
        "weekly" => Ok(Frequency::Weekly),
        "monthly" => Ok(Frequency::Monthly),
        _ => Err(format!("Unknown frequency '{value}'")),
    }
}

fn parse_weekday(value: &str) -> Result<Weekday, String> {
    let value = value.trim().to_ascii_lowercase();
    let weekday = match value.get(..3) {
        Some("mon") => Weekday::Monday,
        Some("tue") => Weekday::Tuesday,
        Some("wed") => Weekday::Wednesday,
        Some("thu") => Weekday::Thursday,
        Some("fri") => Weekday::Friday,
        Some("sat") => Weekday::Saturday,
        Some("sun") => Weekday::Sunday,
        _ => return Err(format!("Unknown weekday '{value}'")),
    };
    Ok(weekday)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors() {
        assert_eq!(
            parse_selector("battery"),
            Ok(ComponentSelector::Category(ComponentCategory::Battery))
        );
        assert_eq!(
            parse_selector("EV_CHARGER"),
            Ok(ComponentSelector::Category(ComponentCategory::EvCharger))
        );
        assert_eq!(
            parse_selector("1, 2,3"),
            Ok(ComponentSelector::Ids(vec![1, 2, 3]))
        );
        assert!(parse_selector("1,x").is_err());
        assert!(parse_selector("").is_err());
    }

    #[test]
    fn id_ranges() {
        let ids = |ids: &[u64]| DispatchIds(ids.iter().copied().map(DispatchId).collect());

        assert_eq!(parse_id_range("4"), Ok(ids(&[4])));
        assert_eq!(parse_id_range("1,2,3"), Ok(ids(&[1, 2, 3])));
        assert_eq!(parse_id_range("1-3"), Ok(ids(&[1, 2, 3])));
        assert_eq!(parse_id_range("5..7"), Ok(ids(&[5, 6, 7])));
        assert!(parse_id_range("3-1").is_err());
        assert!(parse_id_range("a-b").is_err());
        assert!(parse_id_range("1,,2").is_err());
    }

    #[test]
    fn id_ranges_are_capped() {
        let last = MAX_ID_RANGE;
        assert_eq!(parse_id_range(&format!("1-{last}")).unwrap().0.len(), 10_000);
        assert!(parse_id_range(&format!("1-{}", last + 1)).is_err());
        assert!(parse_id_range("1..18446744073709551615").is_err());
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration("90"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("15m"), Ok(Duration::from_secs(900)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1d"), Ok(Duration::from_secs(86400)));
        assert!(parse_duration("1w").is_err());
        assert!(parse_duration("m").is_err());
    }

    #[test]
    fn times() {
        let epoch_plus_day = SystemTime::UNIX_EPOCH + Duration::from_secs(86400);
        assert_eq!(parse_time("1970-01-02T00:00:00Z"), Ok(epoch_plus_day));

        let before = SystemTime::now();
        let later = parse_time("in 1h").unwrap();
        assert!(later >= before + Duration::from_secs(3600));
        assert!(parse_time("2 days ago").is_err());
        assert!(parse_time("yesterday").is_err());
    }

    #[test]
    fn huge_relative_times_are_errors() {
        assert!(parse_time("in 18446744073709551615").is_err());
        assert!(parse_time("18446744073709551615 ago").is_err());
    }

    #[test]
    fn end_criteria_prefers_count() {
        let args = RecurrenceArgs {
            frequency: Some(Frequency::Daily),
            interval: None,
            count: Some(3),
            until: None,
            byminutes: None,
            byhours: None,
            byweekdays: None,
            bymonthdays: None,
            bymonths: None,
        };
        assert_eq!(args.end_criteria(), Some(EndCriteria::Count(3)));
        assert_eq!(
            args.end_criteria_update(false),
            Some(Some(EndCriteria::Count(3)))
        );
    }

    #[test]
    fn update_can_clear_end_criteria() {
        let cli = Cli::try_parse_from(["dispatch", "update", "42", "5", "--no-end"]).unwrap();
        match cli.command {
            Commands::Update {
                recurrence, no_end, ..
            } => {
                assert!(no_end);
                assert_eq!(recurrence.end_criteria_update(no_end), Some(None));
            }
            _ => panic!("expected update"),
        }

        assert!(
            Cli::try_parse_from(["dispatch", "update", "42", "5", "--no-end", "--count", "2"])
                .is_err()
        );
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from([
            "dispatch",
            "--insecure",
            "delete",
            "42",
            "1-3",
            "7",
            "2",
        ])
        .unwrap();

        assert!(cli.insecure);
        match cli.command {
            Commands::Delete { microgrid_id, ids } => {
                assert_eq!(microgrid_id, MicrogridId(42));
                assert_eq!(
                    flatten_ids(ids),
                    vec![DispatchId(1), DispatchId(2), DispatchId(3), DispatchId(7)]
                );
            }
            _ => panic!("expected delete"),
        }
    }
}
