//! # Domain Types
//!
//! Client-side representation of dispatches and of the parameters used to query them.
//!
//! Records returned by the service are plain values. "Modifying" a record means building a
//! new one: [`Dispatch::updated`] applies a [`DispatchUpdate`] to a copy and leaves the
//! original untouched.
use serde_json::{Map, Value};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

/// Free-form JSON object attached to a dispatch.
pub type Payload = Map<String, Value>;

/// Identifier of the microgrid that scopes every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MicrogridId(pub u64);

/// Identifier of a dispatch, assigned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DispatchId(pub u64);

impl From<u64> for MicrogridId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u64> for DispatchId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for MicrogridId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl FromStr for DispatchId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for MicrogridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentCategory {
    Grid,
    Meter,
    Inverter,
    Converter,
    Battery,
    EvCharger,
    Chp,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 7] = [
        Self::Grid,
        Self::Meter,
        Self::Inverter,
        Self::Converter,
        Self::Battery,
        Self::EvCharger,
        Self::Chp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "GRID",
            Self::Meter => "METER",
            Self::Inverter => "INVERTER",
            Self::Converter => "CONVERTER",
            Self::Battery => "BATTERY",
            Self::EvCharger => "EV_CHARGER",
            Self::Chp => "CHP",
        }
    }

    /// Parses a category name, case-insensitively (e.g. `battery`, `EV_CHARGER`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
    }
}

/// Selects the components a dispatch applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentSelector {
    Ids(Vec<u64>),
    Category(ComponentCategory),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// When a recurring dispatch stops recurring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCriteria {
    /// After this many occurrences.
    Count(u32),
    /// Not after this point in time.
    Until(SystemTime),
}

/// Recurrence rule of a dispatch. The default value means "does not recur".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Option<Frequency>,
    pub interval: u32,
    pub end_criteria: Option<EndCriteria>,
    pub byminutes: Vec<u32>,
    pub byhours: Vec<u32>,
    pub byweekdays: Vec<Weekday>,
    pub bymonthdays: Vec<u32>,
    pub bymonths: Vec<u32>,
}

impl RecurrenceRule {
    pub fn is_recurring(&self) -> bool {
        self.frequency.is_some()
    }
}

/// A dispatch as stored by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub id: DispatchId,
    pub microgrid_id: MicrogridId,
    pub dispatch_type: String,
    pub create_time: SystemTime,
    pub update_time: SystemTime,
    pub start_time: SystemTime,
    /// Whole seconds on the wire.
    pub duration: Duration,
    pub selector: ComponentSelector,
    pub active: bool,
    pub dry_run: bool,
    pub payload: Payload,
    pub recurrence: RecurrenceRule,
}

impl Dispatch {
    pub fn end_time(&self) -> SystemTime {
        self.start_time + self.duration
    }

    /// Returns a copy of this dispatch with `update` applied.
    ///
    /// `update_time` is left untouched; it is owned by the service.
    pub fn updated(&self, update: &DispatchUpdate) -> Dispatch {
        let mut dispatch = self.clone();

        if let Some(start_time) = update.start_time {
            dispatch.start_time = start_time;
        }
        if let Some(duration) = update.duration {
            dispatch.duration = duration;
        }
        if let Some(selector) = &update.selector {
            dispatch.selector = selector.clone();
        }
        if let Some(active) = update.active {
            dispatch.active = active;
        }
        if let Some(payload) = &update.payload {
            dispatch.payload = payload.clone();
        }

        let recurrence = &update.recurrence;
        let rule = &mut dispatch.recurrence;
        if let Some(frequency) = recurrence.frequency {
            rule.frequency = Some(frequency);
        }
        if let Some(interval) = recurrence.interval {
            rule.interval = interval;
        }
        if let Some(end_criteria) = recurrence.end_criteria {
            rule.end_criteria = end_criteria;
        }
        if let Some(byminutes) = &recurrence.byminutes {
            rule.byminutes = byminutes.clone();
        }
        if let Some(byhours) = &recurrence.byhours {
            rule.byhours = byhours.clone();
        }
        if let Some(byweekdays) = &recurrence.byweekdays {
            rule.byweekdays = byweekdays.clone();
        }
        if let Some(bymonthdays) = &recurrence.bymonthdays {
            rule.bymonthdays = bymonthdays.clone();
        }
        if let Some(bymonths) = &recurrence.bymonths {
            rule.bymonths = bymonths.clone();
        }

        dispatch
    }
}

/// The fields a caller provides to create a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDispatch {
    pub dispatch_type: String,
    pub start_time: SystemTime,
    pub duration: Duration,
    pub selector: ComponentSelector,
    pub active: bool,
    pub dry_run: bool,
    pub payload: Payload,
    pub recurrence: RecurrenceRule,
}

impl NewDispatch {
    /// An active, non dry-run, non-recurring dispatch with an empty payload.
    pub fn new(
        dispatch_type: impl Into<String>,
        start_time: SystemTime,
        duration: Duration,
        selector: ComponentSelector,
    ) -> Self {
        Self {
            dispatch_type: dispatch_type.into(),
            start_time,
            duration,
            selector,
            active: true,
            dry_run: false,
            payload: Payload::new(),
            recurrence: RecurrenceRule::default(),
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_recurrence(mut self, recurrence: RecurrenceRule) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Completes the record with the fields the service assigns.
    pub fn into_dispatch(
        self,
        id: DispatchId,
        microgrid_id: MicrogridId,
        now: SystemTime,
    ) -> Dispatch {
        Dispatch {
            id,
            microgrid_id,
            dispatch_type: self.dispatch_type,
            create_time: now,
            update_time: now,
            start_time: self.start_time,
            duration: self.duration,
            selector: self.selector,
            active: self.active,
            dry_run: self.dry_run,
            payload: self.payload,
            recurrence: self.recurrence,
        }
    }
}

impl From<&Dispatch> for NewDispatch {
    fn from(dispatch: &Dispatch) -> Self {
        Self {
            dispatch_type: dispatch.dispatch_type.clone(),
            start_time: dispatch.start_time,
            duration: dispatch.duration,
            selector: dispatch.selector.clone(),
            active: dispatch.active,
            dry_run: dispatch.dry_run,
            payload: dispatch.payload.clone(),
            recurrence: dispatch.recurrence.clone(),
        }
    }
}

/// Partial update of a recurrence rule. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceUpdate {
    pub frequency: Option<Frequency>,
    pub interval: Option<u32>,
    /// `Some(None)` removes the end criteria, so the rule repeats forever.
    pub end_criteria: Option<Option<EndCriteria>>,
    pub byminutes: Option<Vec<u32>>,
    pub byhours: Option<Vec<u32>>,
    pub byweekdays: Option<Vec<Weekday>>,
    pub bymonthdays: Option<Vec<u32>>,
    pub bymonths: Option<Vec<u32>>,
}

/// Set of field overrides for a dispatch. `None` leaves the field unchanged.
///
/// Only the fields that are set are sent to the service, each one named in the update mask
/// (see [`DispatchUpdate::mask_paths`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchUpdate {
    pub start_time: Option<SystemTime>,
    pub duration: Option<Duration>,
    pub selector: Option<ComponentSelector>,
    pub active: Option<bool>,
    pub payload: Option<Payload>,
    pub recurrence: RecurrenceUpdate,
}

impl DispatchUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_time(mut self, start_time: SystemTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn selector(mut self, selector: ComponentSelector) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.recurrence.frequency = Some(frequency);
        self
    }

    pub fn interval(mut self, interval: u32) -> Self {
        self.recurrence.interval = Some(interval);
        self
    }

    pub fn end_criteria(mut self, end_criteria: EndCriteria) -> Self {
        self.recurrence.end_criteria = Some(Some(end_criteria));
        self
    }

    pub fn clear_end_criteria(mut self) -> Self {
        self.recurrence.end_criteria = Some(None);
        self
    }

    pub fn byminutes(mut self, byminutes: Vec<u32>) -> Self {
        self.recurrence.byminutes = Some(byminutes);
        self
    }

    pub fn byhours(mut self, byhours: Vec<u32>) -> Self {
        self.recurrence.byhours = Some(byhours);
        self
    }

    pub fn byweekdays(mut self, byweekdays: Vec<Weekday>) -> Self {
        self.recurrence.byweekdays = Some(byweekdays);
        self
    }

    pub fn bymonthdays(mut self, bymonthdays: Vec<u32>) -> Self {
        self.recurrence.bymonthdays = Some(bymonthdays);
        self
    }

    pub fn bymonths(mut self, bymonths: Vec<u32>) -> Self {
        self.recurrence.bymonths = Some(bymonths);
        self
    }

    /// The update mask paths for the fields that are set, in wire order.
    pub fn mask_paths(&self) -> Vec<&'static str> {
        let recurrence = &self.recurrence;
        [
            ("start_time", self.start_time.is_some()),
            ("duration", self.duration.is_some()),
            ("selector", self.selector.is_some()),
            ("is_active", self.active.is_some()),
            ("payload", self.payload.is_some()),
            ("recurrence.freq", recurrence.frequency.is_some()),
            ("recurrence.interval", recurrence.interval.is_some()),
            ("recurrence.end_criteria", recurrence.end_criteria.is_some()),
            ("recurrence.byminutes", recurrence.byminutes.is_some()),
            ("recurrence.byhours", recurrence.byhours.is_some()),
            ("recurrence.byweekdays", recurrence.byweekdays.is_some()),
            ("recurrence.bymonthdays", recurrence.bymonthdays.is_some()),
            ("recurrence.bymonths", recurrence.bymonths.is_some()),
        ]
        .into_iter()
        .filter_map(|(path, set)| set.then_some(path))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.mask_paths().is_empty()
    }
}

/// Server-side filters for a listing. The default value matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    /// Matches dispatches whose selector equals any of these.
    pub selectors: Vec<ComponentSelector>,
    /// Inclusive lower bound on the start time.
    pub start_from: Option<SystemTime>,
    /// Exclusive upper bound on the start time.
    pub start_to: Option<SystemTime>,
    /// Inclusive lower bound on the end time (start + duration).
    pub end_from: Option<SystemTime>,
    /// Exclusive upper bound on the end time.
    pub end_to: Option<SystemTime>,
    pub active: Option<bool>,
    pub dry_run: Option<bool>,
}

impl ListFilter {
    pub fn matches(&self, dispatch: &Dispatch) -> bool {
        if !self.selectors.is_empty() && !self.selectors.contains(&dispatch.selector) {
            return false;
        }

        let start = dispatch.start_time;
        let end = dispatch.end_time();
        let in_interval = |value: SystemTime, from: Option<SystemTime>, to: Option<SystemTime>| {
            from.is_none_or(|from| value >= from) && to.is_none_or(|to| value < to)
        };

        in_interval(start, self.start_from, self.start_to)
            && in_interval(end, self.end_from, self.end_to)
            && self.active.is_none_or(|active| dispatch.active == active)
            && self.dry_run.is_none_or(|dry_run| dispatch.dry_run == dry_run)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    StartTime,
    CreateTime,
    UpdateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOptions {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortOptions {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

/// Parameters of one logical listing. Page tokens are only valid for the exact
/// parameters that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub microgrid_id: MicrogridId,
    pub filter: ListFilter,
    pub sort: Option<SortOptions>,
    /// Hint for the number of items per page; the service applies its own default.
    pub page_size: Option<u32>,
}

impl ListParams {
    pub fn new(microgrid_id: MicrogridId) -> Self {
        Self {
            microgrid_id,
            filter: ListFilter::default(),
            sort: None,
            page_size: None,
        }
    }

    pub fn with_filter(mut self, filter: ListFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortOptions) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(start: SystemTime) -> Dispatch {
        NewDispatch::new(
            "DEMO",
            start,
            Duration::from_secs(600),
            ComponentSelector::Category(ComponentCategory::Battery),
        )
        .into_dispatch(DispatchId(1), MicrogridId(7), SystemTime::UNIX_EPOCH)
    }

    #[test]
    fn updated_returns_a_new_value_and_keeps_the_original() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let original = sample(start);

        let update = DispatchUpdate::new()
            .duration(Duration::from_secs(60))
            .active(false)
            .frequency(Frequency::Daily)
            .byhours(vec![6, 18]);

        let updated = original.updated(&update);

        assert_eq!(original.duration, Duration::from_secs(600));
        assert!(original.active);
        assert_eq!(updated.duration, Duration::from_secs(60));
        assert!(!updated.active);
        assert_eq!(updated.recurrence.frequency, Some(Frequency::Daily));
        assert_eq!(updated.recurrence.byhours, vec![6, 18]);
        assert_eq!(updated.start_time, original.start_time);
        assert_ne!(updated, original);
    }

    #[test]
    fn empty_update_changes_nothing() {
        let original = sample(SystemTime::UNIX_EPOCH);
        let update = DispatchUpdate::new();

        assert!(update.is_empty());
        assert_eq!(original.updated(&update), original);
    }

    #[test]
    fn mask_paths_follow_wire_names() {
        let update = DispatchUpdate::new()
            .active(true)
            .start_time(SystemTime::UNIX_EPOCH)
            .interval(2)
            .bymonths(vec![1]);

        assert_eq!(
            update.mask_paths(),
            vec![
                "start_time",
                "is_active",
                "recurrence.interval",
                "recurrence.bymonths"
            ]
        );
    }

    #[test]
    fn cleared_end_criteria_makes_the_rule_unbounded() {
        let mut original = sample(SystemTime::UNIX_EPOCH);
        original.recurrence.frequency = Some(Frequency::Daily);
        original.recurrence.end_criteria = Some(EndCriteria::Count(3));

        let update = DispatchUpdate::new().clear_end_criteria();
        let updated = original.updated(&update);

        assert!(!update.is_empty());
        assert_eq!(update.mask_paths(), vec!["recurrence.end_criteria"]);
        assert_eq!(updated.recurrence.end_criteria, None);
        assert_eq!(updated.recurrence.frequency, Some(Frequency::Daily));
        assert_eq!(original.recurrence.end_criteria, Some(EndCriteria::Count(3)));
    }

    #[test]
    fn filter_bounds_are_inclusive_then_exclusive() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let dispatch = sample(start);

        let from_start = ListFilter {
            start_from: Some(start),
            ..Default::default()
        };
        let to_start = ListFilter {
            start_to: Some(start),
            ..Default::default()
        };
        let end_window = ListFilter {
            end_from: Some(start + Duration::from_secs(600)),
            end_to: Some(start + Duration::from_secs(601)),
            ..Default::default()
        };

        assert!(from_start.matches(&dispatch));
        assert!(!to_start.matches(&dispatch));
        assert!(end_window.matches(&dispatch));
    }

    #[test]
    fn filter_selectors_match_any() {
        let dispatch = sample(SystemTime::UNIX_EPOCH);

        let filter = ListFilter {
            selectors: vec![
                ComponentSelector::Ids(vec![1, 2]),
                ComponentSelector::Category(ComponentCategory::Battery),
            ],
            ..Default::default()
        };
        let other = ListFilter {
            selectors: vec![ComponentSelector::Category(ComponentCategory::Meter)],
            active: Some(true),
            ..Default::default()
        };

        assert!(filter.matches(&dispatch));
        assert!(!other.matches(&dispatch));
    }

    #[test]
    fn category_names_parse_case_insensitively() {
        assert_eq!(
            ComponentCategory::from_name("ev_charger"),
            Some(ComponentCategory::EvCharger)
        );
        assert_eq!(ComponentCategory::from_name("solar"), None);
    }
}
