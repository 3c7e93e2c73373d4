use super::MergeFailure;
use crate::model::{HeadsignTable, TripVariant};
use itertools::Itertools;

/// rewrites the headsign of every variant of `route_id`/`direction_id` to its canonical label.
///
/// all labels are resolved before any variant is touched, so on failure the variants keep
/// their observed labels. returns the number of rewritten variants.
pub fn merge_headsigns(
    route_id: &str,
    direction_id: &str,
    table: &HeadsignTable,
    variants: &mut [TripVariant],
) -> Result<usize, MergeFailure> {
    let uncovered: Vec<String> = members(route_id, direction_id, variants)
        .filter(|v| table.resolve(&v.headsign_label).is_none())
        .map(|v| v.headsign_label.clone())
        .unique()
        .sorted()
        .collect();
    if !uncovered.is_empty() {
        return Err(MergeFailure {
            route_id: route_id.to_string(),
            direction_id: direction_id.to_string(),
            labels: uncovered,
        });
    }

    let mut rewritten = 0;
    for variant in variants
        .iter_mut()
        .filter(|v| v.route_id == route_id && v.direction_id == direction_id)
    {
        if let Some(canonical) = table.resolve(&variant.headsign_label) {
            if canonical != variant.headsign_label {
                variant.headsign_label = canonical.to_string();
                rewritten += 1;
            }
        }
    }
    Ok(rewritten)
}

/// merging for directions without reference data. with a table this is [`merge_headsigns`];
/// without one, a direction carrying more than one distinct label cannot be merged.
pub fn merge_observed_headsigns(
    route_id: &str,
    direction_id: &str,
    table: Option<&HeadsignTable>,
    variants: &mut [TripVariant],
) -> Result<usize, MergeFailure> {
    if let Some(t) = table {
        return merge_headsigns(route_id, direction_id, t, variants);
    }
    let labels: Vec<String> = members(route_id, direction_id, variants)
        .map(|v| v.headsign_label.clone())
        .unique()
        .sorted()
        .collect();
    if labels.len() > 1 {
        Err(MergeFailure {
            route_id: route_id.to_string(),
            direction_id: direction_id.to_string(),
            labels,
        })
    } else {
        Ok(0)
    }
}

fn members<'a>(
    route_id: &'a str,
    direction_id: &'a str,
    variants: &'a [TripVariant],
) -> impl Iterator<Item = &'a TripVariant> + 'a {
    variants
        .iter()
        .filter(move |v| v.route_id == route_id && v.direction_id == direction_id)
}
