//! # Request/Response Mapping
//!
//! Pure translation functions between the domain types in [`crate::types`] and the
//! protobuf messages in [`crate::proto`]. Nothing in here performs I/O.
//!
//! Decoding fails with a [`MappingError`] when a message lacks a field required to build a
//! valid value, or carries a value outside the range the domain type accepts.
//!
//! Both directions are public: the client encodes requests and decodes responses, while
//! the fake service in `dispatch-testing` decodes requests and encodes responses.
use crate::pagination::{Continuation, Page, PageToken};
use crate::proto::common::v1 as common_pb;
use crate::proto::dispatch::v1 as pb;
use crate::types::{
    ComponentCategory, ComponentSelector, Dispatch, DispatchId, DispatchUpdate, EndCriteria,
    Frequency, ListFilter, ListParams, MicrogridId, NewDispatch, Payload, RecurrenceRule,
    RecurrenceUpdate, SortField, SortOptions, SortOrder, Weekday,
};
use pb::component_selector::Selector;
use pb::recurrence_rule::end_criteria::CountOrUntil;
use prost_types::value::Kind;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum MappingError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),
    #[error("Unknown value {value} for enum field '{field}'")]
    UnknownEnumValue { field: &'static str, value: i32 },
    #[error("Invalid timestamp in field '{0}'")]
    InvalidTimestamp(&'static str),
    #[error("Value out of range for field '{0}'")]
    OutOfRange(&'static str),
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Unsupported update mask path '{0}'")]
    UnknownMaskPath(String),
}

/// Builds the wire request for one page of a listing.
pub fn list_request(
    params: &ListParams,
    page_token: Option<&str>,
) -> pb::ListMicrogridDispatchesRequest {
    let pagination_params = (params.page_size.is_some() || page_token.is_some()).then(|| {
        common_pb::PaginationParams {
            page_size: params.page_size,
            page_token: page_token.map(str::to_string),
        }
    });

    pb::ListMicrogridDispatchesRequest {
        microgrid_id: params.microgrid_id.0,
        filter: filter_to_pb(&params.filter),
        sort_options: params.sort.map(sort_to_pb),
        pagination_params,
    }
}

pub fn create_request(
    microgrid_id: MicrogridId,
    new: &NewDispatch,
) -> Result<pb::CreateMicrogridDispatchRequest, MappingError> {
    Ok(pb::CreateMicrogridDispatchRequest {
        microgrid_id: microgrid_id.0,
        r#type: new.dispatch_type.clone(),
        start_time: Some(new.start_time.into()),
        duration: duration_to_pb(new.duration, "duration")?,
        selector: Some(selector_to_pb(&new.selector)),
        is_active: new.active,
        is_dry_run: new.dry_run,
        payload: Some(payload_to_pb(&new.payload)),
        recurrence: Some(recurrence_to_pb(&new.recurrence)),
    })
}

pub fn update_request(
    microgrid_id: MicrogridId,
    dispatch_id: DispatchId,
    update: &DispatchUpdate,
) -> Result<pb::UpdateMicrogridDispatchRequest, MappingError> {
    let recurrence = &update.recurrence;
    let recurrence_pb = (*recurrence != RecurrenceUpdate::default()).then(|| {
        pb::RecurrenceRuleUpdate {
            freq: recurrence.frequency.map(|f| frequency_to_pb(f) as i32),
            interval: recurrence.interval,
            end_criteria: recurrence.end_criteria.flatten().map(end_criteria_to_pb),
            byminutes: recurrence.byminutes.clone().unwrap_or_default(),
            byhours: recurrence.byhours.clone().unwrap_or_default(),
            byweekdays: recurrence
                .byweekdays
                .iter()
                .flatten()
                .map(|day| weekday_to_pb(*day) as i32)
                .collect(),
            bymonthdays: recurrence.bymonthdays.clone().unwrap_or_default(),
            bymonths: recurrence.bymonths.clone().unwrap_or_default(),
        }
    });

    let update_pb = pb::DispatchUpdate {
        start_time: update.start_time.map(Into::into),
        duration: update
            .duration
            .map(|duration| duration_to_pb(duration, "duration"))
            .transpose()?,
        selector: update.selector.as_ref().map(selector_to_pb),
        is_active: update.active,
        payload: update.payload.as_ref().map(payload_to_pb),
        recurrence: recurrence_pb,
    };

    Ok(pb::UpdateMicrogridDispatchRequest {
        microgrid_id: microgrid_id.0,
        dispatch_id: dispatch_id.0,
        update_mask: Some(prost_types::FieldMask {
            paths: update
                .mask_paths()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }),
        update: Some(update_pb),
    })
}

/// Decodes one list response into a [`Page`].
///
/// An absent or empty `next_page_token` marks the last page. The issued token is bound to
/// `params`.
pub fn page_from_response(
    response: pb::ListMicrogridDispatchesResponse,
    params: &Arc<ListParams>,
) -> Result<Page, MappingError> {
    let items = response
        .dispatches
        .into_iter()
        .map(dispatch_from_pb)
        .collect::<Result<Vec<_>, _>>()?;

    let continuation = match response
        .pagination_info
        .and_then(|info| info.next_page_token)
        .filter(|token| !token.is_empty())
    {
        Some(token) => Continuation::Next(PageToken::new(token, Arc::clone(params))),
        None => Continuation::End,
    };

    Ok(Page {
        items,
        continuation,
    })
}

/// Extracts the dispatch carried by a create/update/get response.
pub fn required_dispatch(dispatch: Option<pb::Dispatch>) -> Result<Dispatch, MappingError> {
    dispatch_from_pb(dispatch.ok_or(MappingError::MissingField("dispatch"))?)
}

pub fn dispatch_from_pb(dispatch: pb::Dispatch) -> Result<Dispatch, MappingError> {
    Ok(Dispatch {
        id: DispatchId(dispatch.id),
        microgrid_id: MicrogridId(dispatch.microgrid_id),
        dispatch_type: dispatch.r#type,
        create_time: required_time(dispatch.create_time, "create_time")?,
        update_time: required_time(dispatch.update_time, "update_time")?,
        start_time: required_time(dispatch.start_time, "start_time")?,
        duration: Duration::from_secs(dispatch.duration.into()),
        selector: selector_from_pb(dispatch.selector)?,
        active: dispatch.is_active,
        dry_run: dispatch.is_dry_run,
        payload: dispatch
            .payload
            .map(|payload| payload_from_pb(&payload))
            .transpose()?
            .unwrap_or_default(),
        recurrence: dispatch
            .recurrence
            .map(recurrence_from_pb)
            .transpose()?
            .unwrap_or_default(),
    })
}

pub fn dispatch_to_pb(dispatch: &Dispatch) -> Result<pb::Dispatch, MappingError> {
    Ok(pb::Dispatch {
        id: dispatch.id.0,
        microgrid_id: dispatch.microgrid_id.0,
        r#type: dispatch.dispatch_type.clone(),
        create_time: Some(dispatch.create_time.into()),
        update_time: Some(dispatch.update_time.into()),
        start_time: Some(dispatch.start_time.into()),
        duration: duration_to_pb(dispatch.duration, "duration")?,
        selector: Some(selector_to_pb(&dispatch.selector)),
        is_active: dispatch.active,
        is_dry_run: dispatch.dry_run,
        payload: Some(payload_to_pb(&dispatch.payload)),
        recurrence: Some(recurrence_to_pb(&dispatch.recurrence)),
    })
}

/// Decodes the listing parameters of a list request, ignoring its page token.
pub fn list_params_from_pb(
    request: &pb::ListMicrogridDispatchesRequest,
) -> Result<ListParams, MappingError> {
    Ok(ListParams {
        microgrid_id: MicrogridId(request.microgrid_id),
        filter: request
            .filter
            .clone()
            .map(filter_from_pb)
            .transpose()?
            .unwrap_or_default(),
        sort: request
            .sort_options
            .clone()
            .map(sort_from_pb)
            .transpose()?
            .flatten(),
        page_size: request
            .pagination_params
            .as_ref()
            .and_then(|params| params.page_size),
    })
}

pub fn new_dispatch_from_pb(
    request: pb::CreateMicrogridDispatchRequest,
) -> Result<(MicrogridId, NewDispatch), MappingError> {
    let new = NewDispatch {
        dispatch_type: request.r#type,
        start_time: required_time(request.start_time, "start_time")?,
        duration: Duration::from_secs(request.duration.into()),
        selector: selector_from_pb(request.selector)?,
        active: request.is_active,
        dry_run: request.is_dry_run,
        payload: request
            .payload
            .map(|payload| payload_from_pb(&payload))
            .transpose()?
            .unwrap_or_default(),
        recurrence: request
            .recurrence
            .map(recurrence_from_pb)
            .transpose()?
            .unwrap_or_default(),
    };

    Ok((MicrogridId(request.microgrid_id), new))
}

/// Decodes a partial update, taking only the fields named by the mask.
pub fn dispatch_update_from_pb(
    update: Option<pb::DispatchUpdate>,
    mask: Option<prost_types::FieldMask>,
) -> Result<DispatchUpdate, MappingError> {
    let update = update.unwrap_or_default();
    let recurrence = update.recurrence.unwrap_or_default();
    let mut result = DispatchUpdate::default();

    for path in mask.map(|mask| mask.paths).unwrap_or_default() {
        match path.as_str() {
            "start_time" => {
                let start_time = required_time(update.start_time.clone(), "start_time")?;
                result.start_time = Some(start_time);
            }
            "duration" => {
                let seconds = update.duration.ok_or(MappingError::MissingField("duration"))?;
                result.duration = Some(Duration::from_secs(seconds.into()));
            }
            "selector" => result.selector = Some(selector_from_pb(update.selector.clone())?),
            "is_active" => {
                let active = update
                    .is_active
                    .ok_or(MappingError::MissingField("is_active"))?;
                result.active = Some(active);
            }
            "payload" => {
                result.payload = Some(
                    update
                        .payload
                        .as_ref()
                        .map(payload_from_pb)
                        .transpose()?
                        .unwrap_or_default(),
                );
            }
            "recurrence.freq" => {
                let freq = recurrence
                    .freq
                    .ok_or(MappingError::MissingField("recurrence.freq"))?;
                result.recurrence.frequency = frequency_from_pb(freq)?;
            }
            "recurrence.interval" => result.recurrence.interval = recurrence.interval,
            "recurrence.end_criteria" => {
                result.recurrence.end_criteria = Some(
                    recurrence
                        .end_criteria
                        .clone()
                        .map(end_criteria_from_pb)
                        .transpose()?
                        .flatten(),
                );
            }
            "recurrence.byminutes" => {
                result.recurrence.byminutes = Some(recurrence.byminutes.clone());
            }
            "recurrence.byhours" => result.recurrence.byhours = Some(recurrence.byhours.clone()),
            "recurrence.byweekdays" => {
                result.recurrence.byweekdays = Some(weekdays_from_pb(&recurrence.byweekdays)?);
            }
            "recurrence.bymonthdays" => {
                result.recurrence.bymonthdays = Some(recurrence.bymonthdays.clone());
            }
            "recurrence.bymonths" => {
                result.recurrence.bymonths = Some(recurrence.bymonths.clone());
            }
            other => return Err(MappingError::UnknownMaskPath(other.to_string())),
        }
    }

    Ok(result)
}

fn required_time(
    timestamp: Option<prost_types::Timestamp>,
    field: &'static str,
) -> Result<SystemTime, MappingError> {
    let timestamp = timestamp.ok_or(MappingError::MissingField(field))?;
    SystemTime::try_from(timestamp).map_err(|_| MappingError::InvalidTimestamp(field))
}

fn duration_to_pb(duration: Duration, field: &'static str) -> Result<u32, MappingError> {
    u32::try_from(duration.as_secs()).map_err(|_| MappingError::OutOfRange(field))
}

fn selector_to_pb(selector: &ComponentSelector) -> pb::ComponentSelector {
    let selector = match selector {
        ComponentSelector::Ids(ids) => Selector::ComponentIds(pb::ComponentIds {
            component_ids: ids.clone(),
        }),
        ComponentSelector::Category(category) => {
            Selector::ComponentCategory(category_to_pb(*category) as i32)
        }
    };
    pb::ComponentSelector {
        selector: Some(selector),
    }
}

fn selector_from_pb(
    selector: Option<pb::ComponentSelector>,
) -> Result<ComponentSelector, MappingError> {
    match selector.and_then(|selector| selector.selector) {
        Some(Selector::ComponentIds(ids)) => Ok(ComponentSelector::Ids(ids.component_ids)),
        Some(Selector::ComponentCategory(value)) => {
            Ok(ComponentSelector::Category(category_from_pb(value)?))
        }
        None => Err(MappingError::MissingField("selector")),
    }
}

fn category_to_pb(category: ComponentCategory) -> common_pb::ComponentCategory {
    match category {
        ComponentCategory::Grid => common_pb::ComponentCategory::Grid,
        ComponentCategory::Meter => common_pb::ComponentCategory::Meter,
        ComponentCategory::Inverter => common_pb::ComponentCategory::Inverter,
        ComponentCategory::Converter => common_pb::ComponentCategory::Converter,
        ComponentCategory::Battery => common_pb::ComponentCategory::Battery,
        ComponentCategory::EvCharger => common_pb::ComponentCategory::EvCharger,
        ComponentCategory::Chp => common_pb::ComponentCategory::Chp,
    }
}

fn category_from_pb(value: i32) -> Result<ComponentCategory, MappingError> {
    let unknown = MappingError::UnknownEnumValue {
        field: "component_category",
        value,
    };
    match common_pb::ComponentCategory::try_from(value).map_err(|_| unknown.clone())? {
        common_pb::ComponentCategory::Grid => Ok(ComponentCategory::Grid),
        common_pb::ComponentCategory::Meter => Ok(ComponentCategory::Meter),
        common_pb::ComponentCategory::Inverter => Ok(ComponentCategory::Inverter),
        common_pb::ComponentCategory::Converter => Ok(ComponentCategory::Converter),
        common_pb::ComponentCategory::Battery => Ok(ComponentCategory::Battery),
        common_pb::ComponentCategory::EvCharger => Ok(ComponentCategory::EvCharger),
        common_pb::ComponentCategory::Chp => Ok(ComponentCategory::Chp),
        common_pb::ComponentCategory::Unspecified => Err(unknown),
    }
}

fn recurrence_to_pb(rule: &RecurrenceRule) -> pb::RecurrenceRule {
    pb::RecurrenceRule {
        freq: rule
            .frequency
            .map(frequency_to_pb)
            .unwrap_or(pb::recurrence_rule::Frequency::Unspecified) as i32,
        interval: rule.interval,
        end_criteria: rule.end_criteria.map(end_criteria_to_pb),
        byminutes: rule.byminutes.clone(),
        byhours: rule.byhours.clone(),
        byweekdays: rule
            .byweekdays
            .iter()
            .map(|day| weekday_to_pb(*day) as i32)
            .collect(),
        bymonthdays: rule.bymonthdays.clone(),
        bymonths: rule.bymonths.clone(),
    }
}

fn recurrence_from_pb(rule: pb::RecurrenceRule) -> Result<RecurrenceRule, MappingError> {
    Ok(RecurrenceRule {
        frequency: frequency_from_pb(rule.freq)?,
        interval: rule.interval,
        end_criteria: rule
            .end_criteria
            .map(end_criteria_from_pb)
            .transpose()?
            .flatten(),
        byminutes: rule.byminutes,
        byhours: rule.byhours,
        byweekdays: weekdays_from_pb(&rule.byweekdays)?,
        bymonthdays: rule.bymonthdays,
        bymonths: rule.bymonths,
    })
}

fn frequency_to_pb(frequency: Frequency) -> pb::recurrence_rule::Frequency {
    use pb::recurrence_rule::Frequency as Pb;
    match frequency {
        Frequency::Minutely => Pb::Minutely,
        Frequency::Hourly => Pb::Hourly,
        Frequency::Daily => Pb::Daily,
        Frequency::Weekly => Pb::Weekly,
        Frequency::Monthly => Pb::Monthly,
    }
}

/// `FREQUENCY_UNSPECIFIED` means the dispatch does not recur.
fn frequency_from_pb(value: i32) -> Result<Option<Frequency>, MappingError> {
    use pb::recurrence_rule::Frequency as Pb;
    let frequency = Pb::try_from(value).map_err(|_| MappingError::UnknownEnumValue {
        field: "recurrence.freq",
        value,
    })?;
    Ok(match frequency {
        Pb::Unspecified => None,
        Pb::Minutely => Some(Frequency::Minutely),
        Pb::Hourly => Some(Frequency::Hourly),
        Pb::Daily => Some(Frequency::Daily),
        Pb::Weekly => Some(Frequency::Weekly),
        Pb::Monthly => Some(Frequency::Monthly),
    })
}

fn weekday_to_pb(weekday: Weekday) -> pb::recurrence_rule::Weekday {
    use pb::recurrence_rule::Weekday as Pb;
    match weekday {
        Weekday::Monday => Pb::Monday,
        Weekday::Tuesday => Pb::Tuesday,
        Weekday::Wednesday => Pb::Wednesday,
        Weekday::Thursday => Pb::Thursday,
        Weekday::Friday => Pb::Friday,
        Weekday::Saturday => Pb::Saturday,
        Weekday::Sunday => Pb::Sunday,
    }
}

fn weekdays_from_pb(values: &[i32]) -> Result<Vec<Weekday>, MappingError> {
    use pb::recurrence_rule::Weekday as Pb;
    values
        .iter()
        .map(|&value| {
            let unknown = MappingError::UnknownEnumValue {
                field: "recurrence.byweekdays",
                value,
            };
            match Pb::try_from(value).map_err(|_| unknown.clone())? {
                Pb::Monday => Ok(Weekday::Monday),
                Pb::Tuesday => Ok(Weekday::Tuesday),
                Pb::Wednesday => Ok(Weekday::Wednesday),
                Pb::Thursday => Ok(Weekday::Thursday),
                Pb::Friday => Ok(Weekday::Friday),
                Pb::Saturday => Ok(Weekday::Saturday),
                Pb::Sunday => Ok(Weekday::Sunday),
                Pb::Unspecified => Err(unknown),
            }
        })
        .collect()
}

fn end_criteria_to_pb(criteria: EndCriteria) -> pb::recurrence_rule::EndCriteria {
    let count_or_until = match criteria {
        EndCriteria::Count(count) => CountOrUntil::Count(count),
        EndCriteria::Until(until) => CountOrUntil::Until(until.into()),
    };
    pb::recurrence_rule::EndCriteria {
        count_or_until: Some(count_or_until),
    }
}

fn end_criteria_from_pb(
    criteria: pb::recurrence_rule::EndCriteria,
) -> Result<Option<EndCriteria>, MappingError> {
    match criteria.count_or_until {
        Some(CountOrUntil::Count(count)) => Ok(Some(EndCriteria::Count(count))),
        Some(CountOrUntil::Until(until)) => Ok(Some(EndCriteria::Until(required_time(
            Some(until),
            "recurrence.end_criteria.until",
        )?))),
        None => Ok(None),
    }
}

fn filter_to_pb(filter: &ListFilter) -> Option<pb::DispatchFilter> {
    if *filter == ListFilter::default() {
        return None;
    }

    let interval = |from: Option<SystemTime>, to: Option<SystemTime>| {
        (from.is_some() || to.is_some()).then(|| pb::TimeIntervalFilter {
            from: from.map(Into::into),
            to: to.map(Into::into),
        })
    };

    Some(pb::DispatchFilter {
        selectors: filter.selectors.iter().map(selector_to_pb).collect(),
        start_time_interval: interval(filter.start_from, filter.start_to),
        end_time_interval: interval(filter.end_from, filter.end_to),
        is_active: filter.active,
        is_dry_run: filter.dry_run,
    })
}

fn filter_from_pb(filter: pb::DispatchFilter) -> Result<ListFilter, MappingError> {
    let bound = |timestamp: Option<prost_types::Timestamp>, field: &'static str| {
        timestamp
            .map(|timestamp| required_time(Some(timestamp), field))
            .transpose()
    };
    let start = filter.start_time_interval.unwrap_or_default();
    let end = filter.end_time_interval.unwrap_or_default();

    Ok(ListFilter {
        selectors: filter
            .selectors
            .into_iter()
            .map(|selector| selector_from_pb(Some(selector)))
            .collect::<Result<_, _>>()?,
        start_from: bound(start.from, "filter.start_time_interval.from")?,
        start_to: bound(start.to, "filter.start_time_interval.to")?,
        end_from: bound(end.from, "filter.end_time_interval.from")?,
        end_to: bound(end.to, "filter.end_time_interval.to")?,
        active: filter.is_active,
        dry_run: filter.is_dry_run,
    })
}

fn sort_to_pb(sort: SortOptions) -> pb::SortOptions {
    use pb::sort_options::{SortField as PbField, SortOrder as PbOrder};
    let field = match sort.field {
        SortField::StartTime => PbField::StartTime,
        SortField::CreateTime => PbField::CreateTime,
        SortField::UpdateTime => PbField::UpdateTime,
    };
    let order = match sort.order {
        SortOrder::Ascending => PbOrder::Ascending,
        SortOrder::Descending => PbOrder::Descending,
    };
    pb::SortOptions {
        sort_field: field as i32,
        sort_order: order as i32,
    }
}

/// An unspecified sort field means "service order".
fn sort_from_pb(sort: pb::SortOptions) -> Result<Option<SortOptions>, MappingError> {
    use pb::sort_options::{SortField as PbField, SortOrder as PbOrder};
    let field = match PbField::try_from(sort.sort_field) {
        Ok(PbField::Unspecified) => return Ok(None),
        Ok(PbField::StartTime) => SortField::StartTime,
        Ok(PbField::CreateTime) => SortField::CreateTime,
        Ok(PbField::UpdateTime) => SortField::UpdateTime,
        Err(_) => {
            return Err(MappingError::UnknownEnumValue {
                field: "sort_options.sort_field",
                value: sort.sort_field,
            });
        }
    };
    let order = match PbOrder::try_from(sort.sort_order) {
        Ok(PbOrder::Unspecified | PbOrder::Ascending) => SortOrder::Ascending,
        Ok(PbOrder::Descending) => SortOrder::Descending,
        Err(_) => {
            return Err(MappingError::UnknownEnumValue {
                field: "sort_options.sort_order",
                value: sort.sort_order,
            });
        }
    };
    Ok(Some(SortOptions { field, order }))
}

pub fn payload_to_pb(payload: &Payload) -> prost_types::Struct {
    prost_types::Struct {
        fields: payload
            .iter()
            .map(|(key, value)| (key.clone(), json_to_value(value)))
            .collect(),
    }
}

/// Numbers travel as doubles; integral values come back as JSON integers.
pub fn payload_from_pb(payload: &prost_types::Struct) -> Result<Payload, MappingError> {
    payload
        .fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), value_to_json(value)?)))
        .collect()
}

fn json_to_value(value: &serde_json::Value) -> prost_types::Value {
    use serde_json::Value as Json;
    let kind = match value {
        Json::Null => Kind::NullValue(prost_types::NullValue::NullValue as i32),
        Json::Bool(b) => Kind::BoolValue(*b),
        // Every serde_json number has a f64 approximation.
        Json::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or_default()),
        Json::String(s) => Kind::StringValue(s.clone()),
        Json::Array(items) => Kind::ListValue(prost_types::ListValue {
            values: items.iter().map(json_to_value).collect(),
        }),
        Json::Object(map) => Kind::StructValue(payload_to_pb(map)),
    };
    prost_types::Value { kind: Some(kind) }
}

fn value_to_json(value: &prost_types::Value) -> Result<serde_json::Value, MappingError> {
    use serde_json::Value as Json;
    Ok(match &value.kind {
        None | Some(Kind::NullValue(_)) => Json::Null,
        Some(Kind::BoolValue(b)) => Json::Bool(*b),
        Some(Kind::NumberValue(n)) => number_to_json(*n)?,
        Some(Kind::StringValue(s)) => Json::String(s.clone()),
        Some(Kind::ListValue(list)) => Json::Array(
            list.values
                .iter()
                .map(value_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Some(Kind::StructValue(map)) => Json::Object(payload_from_pb(map)?),
    })
}

fn number_to_json(n: f64) -> Result<serde_json::Value, MappingError> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    if n.fract() == 0.0 && n.abs() <= MAX_EXACT {
        return Ok(serde_json::Value::from(n as i64));
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .ok_or_else(|| MappingError::InvalidPayload(format!("non-finite number {n}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn sample() -> Dispatch {
        let payload = json!({"target": 1500, "ratio": 0.25, "tags": ["a", null], "nested": {"ok": true}});
        NewDispatch::new(
            "EV_CHARGING",
            at(10_000),
            Duration::from_secs(900),
            ComponentSelector::Ids(vec![4, 5]),
        )
        .with_payload(payload.as_object().cloned().unwrap_or_default())
        .with_recurrence(RecurrenceRule {
            frequency: Some(Frequency::Weekly),
            interval: 2,
            end_criteria: Some(EndCriteria::Until(at(50_000))),
            byweekdays: vec![Weekday::Monday, Weekday::Friday],
            ..Default::default()
        })
        .into_dispatch(DispatchId(3), MicrogridId(11), at(5_000))
    }

    #[test]
    fn dispatch_survives_the_wire() {
        let dispatch = sample();
        let pb = dispatch_to_pb(&dispatch).unwrap();

        assert_eq!(pb.duration, 900);
        assert_eq!(dispatch_from_pb(pb).unwrap(), dispatch);
    }

    #[test]
    fn missing_start_time_is_a_mapping_error() {
        let mut pb = dispatch_to_pb(&sample()).unwrap();
        pb.start_time = None;

        assert_eq!(
            dispatch_from_pb(pb),
            Err(MappingError::MissingField("start_time"))
        );
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut pb = dispatch_to_pb(&sample()).unwrap();
        pb.selector = Some(pb::ComponentSelector {
            selector: Some(Selector::ComponentCategory(42)),
        });

        assert_eq!(
            dispatch_from_pb(pb),
            Err(MappingError::UnknownEnumValue {
                field: "component_category",
                value: 42
            })
        );
    }

    #[test]
    fn oversized_duration_is_out_of_range() {
        let new = NewDispatch::new(
            "X",
            at(0),
            Duration::from_secs(u64::from(u32::MAX) + 1),
            ComponentSelector::Ids(vec![]),
        );

        assert_eq!(
            create_request(MicrogridId(1), &new),
            Err(MappingError::OutOfRange("duration"))
        );
    }

    #[test]
    fn last_page_is_detected_from_empty_or_absent_token() {
        let params = Arc::new(ListParams::new(MicrogridId(1)));

        let absent = pb::ListMicrogridDispatchesResponse {
            dispatches: vec![],
            pagination_info: None,
        };
        let empty = pb::ListMicrogridDispatchesResponse {
            dispatches: vec![],
            pagination_info: Some(common_pb::PaginationInfo {
                total_items: 0,
                next_page_token: Some(String::new()),
            }),
        };
        let more = pb::ListMicrogridDispatchesResponse {
            dispatches: vec![dispatch_to_pb(&sample()).unwrap()],
            pagination_info: Some(common_pb::PaginationInfo {
                total_items: 2,
                next_page_token: Some("next".to_string()),
            }),
        };

        assert!(matches!(
            page_from_response(absent, &params).unwrap().continuation,
            Continuation::End
        ));
        assert!(matches!(
            page_from_response(empty, &params).unwrap().continuation,
            Continuation::End
        ));

        let page = page_from_response(more, &params).unwrap();
        assert_eq!(page.items.len(), 1);
        match page.continuation {
            Continuation::Next(token) => {
                assert_eq!(token.value(), "next");
                assert_eq!(token.params(), &*params);
            }
            Continuation::End => panic!("expected a next page token"),
        }
    }

    #[test]
    fn list_request_carries_filters_and_pagination() {
        let params = ListParams::new(MicrogridId(9))
            .with_filter(ListFilter {
                start_from: Some(at(100)),
                active: Some(true),
                ..Default::default()
            })
            .with_sort(SortOptions::new(SortField::CreateTime, SortOrder::Descending))
            .with_page_size(25);

        let request = list_request(&params, Some("abc"));
        let pagination = request.pagination_params.clone().unwrap();
        assert_eq!(pagination.page_size, Some(25));
        assert_eq!(pagination.page_token.as_deref(), Some("abc"));
        assert_eq!(list_params_from_pb(&request).unwrap(), params);

        let plain = list_request(&ListParams::new(MicrogridId(9)), None);
        assert!(plain.filter.is_none());
        assert!(plain.pagination_params.is_none());
    }

    #[test]
    fn update_request_round_trips_through_the_mask() {
        let update = DispatchUpdate::new()
            .duration(Duration::from_secs(30))
            .active(false)
            .frequency(Frequency::Hourly)
            .end_criteria(EndCriteria::Count(4))
            .byweekdays(vec![Weekday::Sunday]);

        let request = update_request(MicrogridId(1), DispatchId(2), &update).unwrap();
        assert_eq!(
            request.update_mask.as_ref().unwrap().paths,
            vec![
                "duration",
                "is_active",
                "recurrence.freq",
                "recurrence.end_criteria",
                "recurrence.byweekdays"
            ]
        );

        let decoded = dispatch_update_from_pb(request.update, request.update_mask).unwrap();
        assert_eq!(decoded, update);
    }

    #[test]
    fn cleared_end_criteria_is_sent_as_a_masked_empty_field() {
        let update = DispatchUpdate::new().clear_end_criteria();

        let request = update_request(MicrogridId(1), DispatchId(2), &update).unwrap();
        assert_eq!(
            request.update_mask.as_ref().unwrap().paths,
            vec!["recurrence.end_criteria"]
        );
        let recurrence = request
            .update
            .as_ref()
            .and_then(|update| update.recurrence.as_ref())
            .unwrap();
        assert!(recurrence.end_criteria.is_none());

        let decoded = dispatch_update_from_pb(request.update, request.update_mask).unwrap();
        assert_eq!(decoded.recurrence.end_criteria, Some(None));
    }

    #[test]
    fn unknown_mask_path_is_rejected() {
        let mask = prost_types::FieldMask {
            paths: vec!["type".to_string()],
        };

        assert_eq!(
            dispatch_update_from_pb(None, Some(mask)),
            Err(MappingError::UnknownMaskPath("type".to_string()))
        );
    }

    #[test]
    fn payload_numbers_keep_their_json_shape() {
        let payload = json!({"int": 3, "negative": -7, "float": 1.5, "big": 1e300});
        let map = payload.as_object().cloned().unwrap();

        let decoded = payload_from_pb(&payload_to_pb(&map)).unwrap();

        assert_eq!(decoded["int"], json!(3));
        assert_eq!(decoded["negative"], json!(-7));
        assert_eq!(decoded["float"], json!(1.5));
        assert_eq!(decoded["big"], json!(1e300));
    }

    #[test]
    fn non_finite_payload_number_is_rejected() {
        let mut fields = std::collections::BTreeMap::new();
        fields.insert(
            "nan".to_string(),
            prost_types::Value {
                kind: Some(Kind::NumberValue(f64::NAN)),
            },
        );

        assert!(matches!(
            payload_from_pb(&prost_types::Struct { fields }),
            Err(MappingError::InvalidPayload(_))
        ));
    }
}
