//! The DNS record resource: state/domain converters and CRUD handlers.

use std::collections::BTreeMap;

use ns1_client::{Answer, Filter, Meta, MetaError, Ns1Client, Record, Region};

use crate::error::{ResourceError, ResourceResult};
use crate::state::{AnswerState, FilterState, RecordState, RecordType, RegionState};

/// Separator used when joining aggregated validation errors.
pub const META_ERROR_SEPARATOR: &str = ",";

/// Build the domain record described by `state`.
///
/// Answers come from `short_answers` and `answers`, tokenized by record
/// type (TXT/SPF answers are a single rdata token, everything else splits
/// on whitespace). Metadata on answers, regions and the record itself is
/// parsed and validated; failures are collected across *all* of them and
/// reported as one combined [`ResourceError::Validation`], joined with
/// [`META_ERROR_SEPARATOR`].
///
/// # Errors
///
/// - a record with a non-empty `link` and any answers fails immediately
///   with "cannot have both link and answers in a record";
/// - any metadata failure yields the combined validation error.
pub fn record_from_state(state: &RecordState) -> ResourceResult<Record> {
    record_from_state_with_separator(state, META_ERROR_SEPARATOR)
}

/// [`record_from_state`] with a custom separator for the combined
/// validation message.
pub fn record_from_state_with_separator(
    state: &RecordState,
    separator: &str,
) -> ResourceResult<Record> {
    let mut record = Record::new(&state.zone, &state.domain, state.record_type.as_str());
    record.id = state.id.clone();

    let mut problems: Vec<String> = Vec::new();

    for text in &state.short_answers {
        record.add_answer(answer_from_text(text, state.record_type));
    }

    for answer_state in &state.answers {
        let mut answer = answer_from_text(&answer_state.answer, state.record_type);
        if let Some(ref region) = answer_state.region
            && !region.is_empty()
        {
            answer.region = Some(region.clone());
        }
        if !answer_state.meta.is_empty() {
            match parse_meta(&answer_state.meta) {
                Ok(meta) => answer.meta = Some(meta),
                Err(errs) => collect("found error/s in answer metadata", &errs, &mut problems),
            }
        }
        record.add_answer(answer);
    }

    if let Some(ttl) = state.ttl {
        record.ttl = Some(ttl);
    }

    if let Some(ref link) = state.link
        && !link.is_empty()
    {
        if !record.answers.is_empty() {
            return Err(ResourceError::Validation(
                "cannot have both link and answers in a record".to_string(),
            ));
        }
        record.link_to(link);
    }

    if !state.meta.is_empty() {
        match parse_meta(&state.meta) {
            Ok(meta) => record.meta = Some(meta),
            Err(errs) => collect("found error/s in record metadata", &errs, &mut problems),
        }
    }

    record.use_client_subnet = Some(state.use_client_subnet);

    for filter_state in &state.filters {
        record.filters.push(Filter {
            filter_type: filter_state.filter.clone(),
            disabled: filter_state.disabled,
            config: filter_state.config.clone(),
        });
    }

    for region_state in &state.regions {
        let mut region = Region::default();
        if !region_state.meta.is_empty() {
            match parse_meta(&region_state.meta) {
                Ok(meta) => region.meta = meta,
                Err(errs) => {
                    collect("found error/s in region/group metadata", &errs, &mut problems);
                }
            }
        }
        record.regions.insert(region_state.name.clone(), region);
    }

    if !problems.is_empty() {
        return Err(ResourceError::Validation(problems.join(separator)));
    }

    Ok(record)
}

/// Write a domain record back into `state`.
///
/// Regions land in sorted name order (the domain model keys them by name
/// in a `BTreeMap`), so repeated reads produce identical state regardless
/// of the order the server sent them in. `short_answers` is configuration
/// input only; after a read-back the full `answers` list is canonical, so
/// `short_answers` is cleared to keep the next forward conversion from
/// emitting each answer twice.
///
/// # Errors
///
/// [`ResourceError::InvalidRecordType`] when the server reports a record
/// type this layer does not model.
pub fn record_to_state(record: &Record, state: &mut RecordState) -> ResourceResult<()> {
    state.id = record.id.clone();
    state.zone = record.zone.clone();
    state.domain = record.domain.clone();
    state.record_type = record.record_type.parse()?;
    state.ttl = record.ttl;
    state.link = if record.link.is_empty() {
        None
    } else {
        Some(record.link.clone())
    };
    state.meta = record
        .meta
        .as_ref()
        .map(Meta::to_string_map)
        .unwrap_or_default();
    if let Some(use_client_subnet) = record.use_client_subnet {
        state.use_client_subnet = use_client_subnet;
    }

    state.filters = record
        .filters
        .iter()
        .map(|f| FilterState {
            filter: f.filter_type.clone(),
            disabled: f.disabled,
            config: f.config.clone(),
        })
        .collect();

    state.answers = record.answers.iter().map(answer_to_state).collect();
    state.short_answers.clear();

    state.regions = record
        .regions
        .iter()
        .map(|(name, region)| RegionState {
            name: name.clone(),
            meta: region.meta.to_string_map(),
        })
        .collect();

    Ok(())
}

fn answer_from_text(text: &str, record_type: RecordType) -> Answer {
    if record_type.is_text() {
        Answer::txt(text)
    } else {
        Answer::new(text.split_whitespace().map(ToString::to_string).collect())
    }
}

fn answer_to_state(answer: &Answer) -> AnswerState {
    AnswerState {
        answer: answer.rdata.join(" "),
        region: answer.region.clone().filter(|r| !r.is_empty()),
        meta: answer
            .meta
            .as_ref()
            .map(Meta::to_string_map)
            .unwrap_or_default(),
    }
}

/// Parse a flat string map into [`Meta`] and validate it, collecting both
/// parse and validation failures.
fn parse_meta(map: &BTreeMap<String, String>) -> Result<Meta, Vec<MetaError>> {
    let meta = Meta::from_string_map(map)?;
    let errs = meta.validate();
    if errs.is_empty() { Ok(meta) } else { Err(errs) }
}

fn collect(context: &str, errs: &[MetaError], problems: &mut Vec<String>) {
    problems.push(context.to_string());
    problems.extend(errs.iter().map(ToString::to_string));
}

/// Create the record described by `state` and write the server's response
/// back into it.
pub async fn record_create(client: &Ns1Client, state: &mut RecordState) -> ResourceResult<()> {
    let record = record_from_state(state)?;
    log::debug!("creating record {}/{}", record.domain, record.record_type);
    let created = client.create_record(&record).await?;
    record_to_state(&created, state)
}

/// Fetch the record identified by `state`'s (zone, domain, type) triplet
/// and write it into `state`.
pub async fn record_read(client: &Ns1Client, state: &mut RecordState) -> ResourceResult<()> {
    let record = client
        .get_record(&state.zone, &state.domain, state.record_type.as_str())
        .await?;
    record_to_state(&record, state)
}

/// Push `state` to the server as an update and write the response back.
pub async fn record_update(client: &Ns1Client, state: &mut RecordState) -> ResourceResult<()> {
    let record = record_from_state(state)?;
    log::debug!("updating record {}/{}", record.domain, record.record_type);
    let updated = client.update_record(&record).await?;
    record_to_state(&updated, state)
}

/// Delete the record identified by `state`. The computed id is cleared
/// even when the delete fails, matching destroy semantics: the instance
/// is gone from the caller's perspective either way.
pub async fn record_delete(client: &Ns1Client, state: &mut RecordState) -> ResourceResult<()> {
    let result = client
        .delete_record(&state.zone, &state.domain, state.record_type.as_str())
        .await;
    state.id.clear();
    result.map_err(Into::into)
}
