//! Target resolution: filter a fleet snapshot down to exactly one instance.

use tokio_util::sync::CancellationToken;
use tracing::info;

use fleetsh_core::{Error, FilterDimension, Instance, Result, SelectionCriteria};

use crate::prompt::Prompter;

/// Build the disambiguation label for one candidate.
///
/// `region: id private-ip name`, with a parenthesized role token when the
/// instance reports one, and a parenthesized group suffix only when the
/// candidate set spans more than one process group.
fn candidate_label(instance: &Instance, multiple_groups: bool) -> String {
    let mut label = format!(
        "{}: {} {} {}",
        instance.region, instance.id, instance.private_ip, instance.name
    );

    if let Some(role) = instance.role() {
        label.push_str(&format!(" ({role})"));
    }

    if multiple_groups {
        label.push_str(&format!(" ({})", instance.process_group()));
    }

    label
}

/// Whether the candidates span more than one process group.
fn spans_multiple_groups(candidates: &[&Instance]) -> bool {
    let mut groups: Vec<&str> = candidates.iter().map(|i| i.process_group()).collect();
    groups.sort_unstable();
    groups.dedup();
    groups.len() > 1
}

/// Resolve the fleet snapshot down to exactly one instance.
///
/// Hard filters (region, then process group) are applied in order, each
/// failing with [`Error::NoMatch`] naming the dimension that emptied the
/// candidate set. After the filters, an explicit instance id takes priority
/// over everything else and is mutually exclusive with `interactive`.
/// Without an explicit id, interactive mode presents a one-of-N choice
/// (raced against `cancel`) and non-interactive mode picks the first
/// candidate in snapshot order, noting when a choice was made on the
/// operator's behalf.
///
/// Deterministic for a fixed snapshot order; the only side effects are
/// operator-facing informational notes.
pub async fn resolve_instance(
    snapshot: &[Instance],
    app: &str,
    criteria: &SelectionCriteria,
    interactive: bool,
    prompter: &dyn Prompter,
    cancel: &CancellationToken,
) -> Result<Instance> {
    if snapshot.is_empty() {
        return Err(Error::NoMatch {
            app: app.to_string(),
            dimension: FilterDimension::Fleet,
        });
    }

    let mut candidates: Vec<&Instance> = snapshot.iter().collect();

    if let Some(region) = &criteria.region {
        candidates.retain(|i| &i.region == region);
        if candidates.is_empty() {
            return Err(Error::NoMatch {
                app: app.to_string(),
                dimension: FilterDimension::Region(region.clone()),
            });
        }
    }

    if let Some(group) = &criteria.process_group {
        candidates.retain(|i| i.process_group() == group);
        if candidates.is_empty() {
            return Err(Error::NoMatch {
                app: app.to_string(),
                dimension: FilterDimension::ProcessGroup(group.clone()),
            });
        }
    }

    if criteria.instance_id.is_some() && interactive {
        return Err(Error::ConflictingSelection);
    }

    if let Some(id) = &criteria.instance_id {
        return match candidates.iter().find(|i| &i.id == id) {
            Some(instance) => Ok((*instance).clone()),
            None => Err(Error::NotFound {
                name: format!("instance {id}"),
                instance: format!("the {app} fleet"),
            }),
        };
    }

    if interactive {
        let selected = if candidates.len() > 1 {
            let multiple_groups = spans_multiple_groups(&candidates);
            let labels: Vec<String> = candidates
                .iter()
                .map(|i| candidate_label(i, multiple_groups))
                .collect();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                selected = prompter.select_one("Select instance:", &labels) => selected?,
            }
        } else {
            info!(
                "Only one instance available, selecting {} in region {}",
                candidates[0].id, candidates[0].region
            );
            0
        };
        return Ok(candidates[selected].clone());
    }

    let selected = candidates[0];
    if candidates.len() > 1 {
        info!(
            "No instance specified, using {} in region {}",
            selected.id, selected.region
        );
    }
    Ok(selected.clone())
}
