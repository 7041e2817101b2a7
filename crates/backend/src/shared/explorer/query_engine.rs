//! Filter -> search -> sort pipeline over an in-memory dataset.
//!
//! `execute` is a pure function of its inputs, except for the random sort
//! which shuffles with the caller's RNG. Results are dataset positions, so
//! records that are equal by value keep distinct original positions.

use std::collections::BTreeSet;

use contracts::shared::explorer::{
    DetailEntry, DetailView, FieldEntry, FilterControl, FilterValues, ListItem, QueryRequest,
    QueryResponse, Role, RoleMapping, SortChoice, SortDirection, SortOption, ViewSelection,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use thiserror::Error;

use super::catalog::FieldCatalog;
use super::normalize::{normalize, SortKey};
use super::role_mapping::sort_paths;
use super::value_access::{get_by_path, string_form};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid sort choice: {0}")]
    InvalidSortChoice(String),

    #[error("Record not found at position {0}")]
    RecordNotFound(usize),
}

/// Everything the pipeline reads from the session
#[derive(Debug, Clone, Copy)]
pub struct QueryContext<'a> {
    pub dataset: &'a [Value],
    pub catalog: &'a FieldCatalog,
    pub mapping: &'a RoleMapping,
    pub selection: &'a ViewSelection,
}

/// Per-run user input
#[derive(Debug, Clone, Copy)]
pub struct QueryInput<'a> {
    pub search_text: &'a str,
    pub filter_values: &'a FilterValues,
    pub sort: Option<&'a SortChoice>,
}

/// Parse the wire form of a sort choice; empty means unset
pub fn parse_sort(raw: Option<&str>) -> Result<Option<SortChoice>, QueryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<SortChoice>()
            .map(Some)
            .map_err(QueryError::InvalidSortChoice),
    }
}

/// Run the pipeline and return matching dataset positions in result order
pub fn execute<R: Rng + ?Sized>(ctx: &QueryContext, input: &QueryInput, rng: &mut R) -> Vec<usize> {
    let positions: Vec<usize> = (0..ctx.dataset.len()).collect();
    let positions = apply_filters(ctx, input.filter_values, positions);
    let mut positions = apply_search(ctx, input.search_text, positions);
    if let Some(sort) = input.sort {
        apply_sort(ctx, sort, &mut positions, rng);
    }
    positions
}

/// Same as `execute`, resolved to records
pub fn execute_records<'a, R: Rng + ?Sized>(
    ctx: &QueryContext<'a>,
    input: &QueryInput,
    rng: &mut R,
) -> Vec<&'a Value> {
    let dataset = ctx.dataset;
    execute(ctx, input, rng)
        .into_iter()
        .map(|position| &dataset[position])
        .collect()
}

/// Parse a request, execute it and project the result to list cards
pub fn run<R: Rng + ?Sized>(
    ctx: &QueryContext,
    request: &QueryRequest,
    rng: &mut R,
) -> Result<QueryResponse, QueryError> {
    let sort = parse_sort(request.sort.as_deref())?;
    let input = QueryInput {
        search_text: &request.search_text,
        filter_values: &request.filter_values,
        sort: sort.as_ref(),
    };
    let positions = execute(ctx, &input, rng);

    Ok(QueryResponse {
        total: positions.len(),
        items: positions
            .into_iter()
            .map(|position| list_item(ctx, position))
            .collect(),
    })
}

/// Filter stage: exact string-form equality per active filter role, combined with AND
fn apply_filters(
    ctx: &QueryContext,
    filter_values: &FilterValues,
    positions: Vec<usize>,
) -> Vec<usize> {
    let active: Vec<(&str, &str)> = Role::FILTERS
        .into_iter()
        .filter_map(|role| {
            let path = ctx.mapping.get(role).filter(|p| ctx.catalog.contains(p))?;
            let value = filter_values.get(&role).filter(|v| !v.is_empty())?;
            Some((path, value.as_str()))
        })
        .collect();

    if active.is_empty() {
        return positions;
    }

    positions
        .into_iter()
        .filter(|&position| {
            let record = &ctx.dataset[position];
            active.iter().all(|(path, expected)| {
                string_form(get_by_path(record, path)).as_deref() == Some(*expected)
            })
        })
        .collect()
}

/// Search stage: case-insensitive substring over the list view fields
fn apply_search(ctx: &QueryContext, search_text: &str, positions: Vec<usize>) -> Vec<usize> {
    if search_text.is_empty() {
        return positions;
    }
    let needle = search_text.to_lowercase();
    let fields = &ctx.selection.list_fields;

    positions
        .into_iter()
        .filter(|&position| {
            let record = &ctx.dataset[position];
            fields.iter().any(|path| {
                string_form(get_by_path(record, path))
                    .map(|text| text.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .collect()
}

/// Sort stage: exactly one of field, original-order or random
fn apply_sort<R: Rng + ?Sized>(
    ctx: &QueryContext,
    sort: &SortChoice,
    positions: &mut Vec<usize>,
    rng: &mut R,
) {
    match sort {
        SortChoice::Field { path, direction } => {
            if !sort_paths(ctx.mapping).contains(&path.as_str()) || !ctx.catalog.contains(path) {
                tracing::warn!("Sort field '{}' is not mapped to a sort role, order kept", path);
                return;
            }
            let mut keyed: Vec<(SortKey, usize)> = positions
                .iter()
                .map(|&position| (normalize(get_by_path(&ctx.dataset[position], path)), position))
                .collect();
            match direction {
                SortDirection::Asc => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
                SortDirection::Desc => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
            }
            *positions = keyed.into_iter().map(|(_, position)| position).collect();
        }
        SortChoice::Original { direction } => match direction {
            SortDirection::Asc => positions.sort_unstable(),
            SortDirection::Desc => positions.sort_unstable_by(|a, b| b.cmp(a)),
        },
        SortChoice::Random => positions.shuffle(rng),
    }
}

/// Distinct string forms of the present values at `path`, sorted
pub fn unique_values(dataset: &[Value], path: &str) -> Vec<String> {
    dataset
        .iter()
        .filter_map(|record| string_form(get_by_path(record, path)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One dropdown per mapped filter role
pub fn filter_controls(ctx: &QueryContext) -> Vec<FilterControl> {
    Role::FILTERS
        .into_iter()
        .filter_map(|role| {
            let path = ctx.mapping.get(role).filter(|p| ctx.catalog.contains(p))?;
            Some(FilterControl {
                role,
                path: path.to_string(),
                values: unique_values(ctx.dataset, path),
            })
        })
        .collect()
}

/// Sort dropdown: mapped sort fields (desc, then asc), then original order and random
pub fn sort_options(mapping: &RoleMapping, catalog: &FieldCatalog) -> Vec<SortOption> {
    let mut options = Vec::new();

    for path in sort_paths(mapping) {
        if !catalog.contains(path) {
            continue;
        }
        for direction in [SortDirection::Desc, SortDirection::Asc] {
            let choice = SortChoice::Field {
                path: path.to_string(),
                direction,
            };
            options.push(SortOption {
                value: choice.to_string(),
                label: format!("{} ({})", path, direction.label()),
            });
        }
    }

    for direction in [SortDirection::Asc, SortDirection::Desc] {
        options.push(SortOption {
            value: SortChoice::Original { direction }.to_string(),
            label: format!("original order ({})", direction.label()),
        });
    }
    options.push(SortOption {
        value: SortChoice::Random.to_string(),
        label: "random".to_string(),
    });
    options
}

/// List card: list view fields in order, absent values kept as `None`
pub fn list_item(ctx: &QueryContext, position: usize) -> ListItem {
    let record = &ctx.dataset[position];
    ListItem {
        position,
        fields: ctx
            .selection
            .list_fields
            .iter()
            .map(|path| FieldEntry {
                path: path.clone(),
                value: get_by_path(record, path).cloned(),
            })
            .collect(),
    }
}

/// Detail view: detail fields in order, absent values omitted
pub fn detail_view(ctx: &QueryContext, position: usize) -> Result<DetailView, QueryError> {
    let record = ctx
        .dataset
        .get(position)
        .ok_or(QueryError::RecordNotFound(position))?;

    let entries = ctx
        .selection
        .detail_fields
        .iter()
        .filter_map(|path| {
            get_by_path(record, path).map(|value| DetailEntry {
                path: path.clone(),
                value: value.clone(),
            })
        })
        .collect();

    Ok(DetailView { position, entries })
}
