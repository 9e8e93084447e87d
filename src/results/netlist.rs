//! Map the compiler's symbolic entity names to biological part names
//!
//! Everything in the Cello output refers to gates by their Verilog-derived
//! symbol (`$54`, `a`, `out`), which is not readable by humans. The output
//! netlist carries the assigned device for each symbol.

use crate::error::{CelloError, Result};
use crate::relaxed::RawDocument;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Entity key to human-readable part name, e.g. `$54 -> PhlF`
pub type PartNameMap = BTreeMap<String, String>;

/// Resolve `keys` against the netlist's `nodes` sequence.
///
/// Keys without a node are left out of the result. When several nodes share
/// a name the first one wins and the rest are logged.
pub fn resolve_part_names<'a>(
    netlist: &RawDocument,
    keys: impl IntoIterator<Item = &'a str>,
    origin: &str,
) -> Result<PartNameMap> {
    let nodes = netlist
        .get("nodes")
        .and_then(|n| n.as_array())
        .ok_or_else(|| CelloError::malformed(origin, None, "netlist has no `nodes` sequence"))?;

    let wanted: HashSet<&str> = keys.into_iter().collect();
    let mut names = PartNameMap::new();

    for node in nodes {
        let Some(name) = node.get("name").and_then(|n| n.as_str()) else {
            continue;
        };
        if !wanted.contains(name) {
            continue;
        }

        let device = node
            .get("deviceName")
            .and_then(|d| d.as_str())
            .ok_or_else(|| {
                CelloError::malformed(
                    origin,
                    None,
                    format!("netlist node `{}` has no `deviceName`", name),
                )
            })?;

        match names.entry(name.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(device.to_string());
            }
            Entry::Occupied(first) => {
                warn!(
                    "Netlist names `{}` more than once; keeping `{}`, ignoring `{}`",
                    name,
                    first.get(),
                    device
                );
            }
        }
    }

    Ok(names)
}

/// Part name to entity key
pub fn invert(names: &PartNameMap) -> BTreeMap<String, String> {
    names.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
}
