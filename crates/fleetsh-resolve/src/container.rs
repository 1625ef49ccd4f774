//! Container resolution within an already-resolved instance.

use tokio_util::sync::CancellationToken;
use tracing::info;

use fleetsh_core::{Error, Instance, Result};

use crate::prompt::Prompter;

/// Pick the sub-container to attach to, or `None` for the whole instance.
///
/// Decided from already-fetched instance metadata; network state never
/// enters into it. The only suspension point is the interactive prompt,
/// which is raced against `cancel`. The returned name is always one of the
/// instance's declared containers.
pub async fn resolve_container(
    instance: &Instance,
    requested: Option<&str>,
    interactive: bool,
    prompter: &dyn Prompter,
    cancel: &CancellationToken,
) -> Result<Option<String>> {
    let containers = &instance.containers;

    match containers.len() {
        0 => match requested {
            None => Ok(None),
            Some(name) => Err(Error::NotFound {
                name: format!("container named {name}"),
                instance: instance.id.to_string(),
            }),
        },
        1 => {
            let sole = &containers[0].name;
            match requested {
                None => Ok(Some(sole.clone())),
                Some(name) if name == sole => Ok(Some(sole.clone())),
                Some(name) => Err(Error::NotFound {
                    name: format!("container named {name}"),
                    instance: instance.id.to_string(),
                }),
            }
        }
        _ => {
            let names: Vec<String> = containers.iter().map(|c| c.name.clone()).collect();
            match requested {
                Some(name) => {
                    if names.iter().any(|n| n == name) {
                        Ok(Some(name.to_string()))
                    } else {
                        Err(Error::NotFound {
                            name: format!("container named {name}"),
                            instance: instance.id.to_string(),
                        })
                    }
                }
                None if interactive => {
                    let selected = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(Error::Cancelled),
                        selected = prompter.select_one("Select container:", &names) => selected?,
                    };
                    Ok(Some(names[selected].clone()))
                }
                None => {
                    info!("No container specified, using {}", names[0]);
                    Ok(Some(names[0].clone()))
                }
            }
        }
    }
}
