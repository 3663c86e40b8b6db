use dispatch_client::{
    ComponentCategory, ComponentSelector, Dispatch, DispatchId, EndCriteria, Frequency,
    MicrogridId, NewDispatch, Payload, RecurrenceRule, Weekday,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use std::time::{Duration, SystemTime};

const DAY: u64 = 24 * 60 * 60;

const DISPATCH_TYPES: [&str; 4] = ["DEMAND_RESPONSE", "EV_CHARGING", "PEAK_SHAVING", "TEST"];

const FREQUENCIES: [Frequency; 5] = [
    Frequency::Minutely,
    Frequency::Hourly,
    Frequency::Daily,
    Frequency::Weekly,
    Frequency::Monthly,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// Seeded generator of random dispatches.
///
/// Times are whole seconds relative to the moment of generation, so they survive the wire
/// unchanged. Generated ids increase monotonically, starting at 1.
#[derive(Debug, Clone)]
pub struct DispatchSampler {
    rng: StdRng,
    last_id: u64,
}

impl DispatchSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            last_id: 0,
        }
    }

    /// A complete random dispatch belonging to `microgrid_id`.
    pub fn generate(&mut self, microgrid_id: MicrogridId) -> Dispatch {
        self.last_id += 1;

        let now = now_in_seconds();
        let create_time = now - Duration::from_secs(self.rng.gen_range(DAY..30 * DAY));
        let update_time = create_time + Duration::from_secs(self.rng.gen_range(0..DAY));

        let mut dispatch = self.new_dispatch().into_dispatch(
            DispatchId(self.last_id),
            microgrid_id,
            create_time,
        );
        dispatch.update_time = update_time;
        dispatch.start_time = now + Duration::from_secs(self.rng.gen_range(0..60 * DAY))
            - Duration::from_secs(30 * DAY);
        dispatch
    }

    pub fn generate_many(&mut self, microgrid_id: MicrogridId, count: usize) -> Vec<Dispatch> {
        (0..count).map(|_| self.generate(microgrid_id)).collect()
    }

    /// Random creation parameters with a start time in the future.
    pub fn new_dispatch(&mut self) -> NewDispatch {
        let dispatch_type = DISPATCH_TYPES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or("TEST");
        let start_time =
            now_in_seconds() + Duration::from_secs(self.rng.gen_range(60 * 60..30 * DAY));
        let duration = Duration::from_secs(self.rng.gen_range(1..=DAY));

        let recurrence = if self.rng.gen_bool(0.5) {
            self.recurrence_rule()
        } else {
            RecurrenceRule::default()
        };

        NewDispatch::new(dispatch_type, start_time, duration, self.selector())
            .with_active(self.rng.gen_bool(0.5))
            .with_dry_run(self.rng.gen_bool(0.5))
            .with_payload(self.payload())
            .with_recurrence(recurrence)
    }

    pub fn selector(&mut self) -> ComponentSelector {
        if self.rng.gen_bool(0.5) {
            let count = self.rng.gen_range(1..=4);
            ComponentSelector::Ids((0..count).map(|_| self.rng.gen_range(1..1000)).collect())
        } else {
            let category = ComponentCategory::ALL
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(ComponentCategory::Battery);
            ComponentSelector::Category(category)
        }
    }

    /// A recurring rule with a random frequency and random filters.
    pub fn recurrence_rule(&mut self) -> RecurrenceRule {
        let end_criteria = match self.rng.gen_range(0..3) {
            0 => None,
            1 => Some(EndCriteria::Count(self.rng.gen_range(1..=100))),
            _ => Some(EndCriteria::Until(
                now_in_seconds() + Duration::from_secs(self.rng.gen_range(DAY..365 * DAY)),
            )),
        };

        let weekday_count = self.rng_len(3);
        RecurrenceRule {
            frequency: FREQUENCIES.choose(&mut self.rng).copied(),
            interval: self.rng.gen_range(1..=10),
            end_criteria,
            byminutes: self.sample_values(0..60, 3),
            byhours: self.sample_values(0..24, 3),
            byweekdays: WEEKDAYS
                .choose_multiple(&mut self.rng, weekday_count)
                .copied()
                .collect(),
            bymonthdays: self.sample_values(1..32, 3),
            bymonths: self.sample_values(1..13, 2),
        }
    }

    fn payload(&mut self) -> Payload {
        let mut payload = Payload::new();
        if self.rng.gen_bool(0.5) {
            payload.insert(
                "target_power_w".to_string(),
                Value::from(self.rng.gen_range(-50_000i64..50_000)),
            );
        }
        if self.rng.gen_bool(0.5) {
            payload.insert("note".to_string(), Value::from("generated"));
        }
        payload
    }

    fn rng_len(&mut self, max: usize) -> usize {
        self.rng.gen_range(0..=max)
    }

    fn sample_values(&mut self, range: std::ops::Range<u32>, max: usize) -> Vec<u32> {
        let len = self.rng_len(max);
        let mut values: Vec<u32> = (0..len).map(|_| self.rng.gen_range(range.clone())).collect();
        values.sort_unstable();
        values.dedup();
        values
    }
}

fn now_in_seconds() -> SystemTime {
    let since_epoch = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    SystemTime::UNIX_EPOCH + Duration::from_secs(since_epoch.as_secs())
}
