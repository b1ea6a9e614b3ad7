//! Human-readable dumps of the derived structure.

use std::fmt;

use crate::engine::LayoutEngine;

/// Formats an engine's adjacency chains for logs and test failures.
///
/// One line per family, items in key order with `|` marking each spacer and
/// `#` the chain boundaries:
///
/// ```text
/// columns: # 0 | 1 | 2 #
/// bands:   # -2 | -1 | 1 | 2 #
/// points:  # 0/emitter/0 | 0/emitter/1 #  # 1/collector/0 #
/// ```
pub struct AdjacencyDebug<'a>(pub &'a LayoutEngine);

impl fmt::Display for AdjacencyDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "columns: ")?;
        write_chains(
            f,
            self.0.columns().spacer_flanks().map(|(a, b)| {
                (a.map(|k| k.to_string()), b.map(|k| k.to_string()))
            }),
        )?;
        write!(f, "\nbands:   ")?;
        write_chains(
            f,
            self.0.bands().spacer_flanks().map(|(a, b)| {
                (a.map(|k| k.to_string()), b.map(|k| k.to_string()))
            }),
        )?;
        write!(f, "\npoints:  ")?;
        write_chains(
            f,
            self.0.points().spacer_flanks().map(|(a, b)| {
                (a.map(|k| k.to_string()), b.map(|k| k.to_string()))
            }),
        )
    }
}

/// Renders spacer flank pairs as chains.
///
/// Each spacer shows one separator; an absent flank is a chain boundary.
/// Consecutive chains are space-separated.
fn write_chains(
    f: &mut fmt::Formatter<'_>,
    flanks: impl Iterator<Item = (Option<String>, Option<String>)>,
) -> fmt::Result {
    let mut first = true;
    for (below, above) in flanks {
        match (below, above) {
            (None, Some(item)) => {
                if !first {
                    write!(f, "  ")?;
                }
                write!(f, "# {item}")?;
            }
            (Some(_), Some(item)) => write!(f, " | {item}")?,
            (Some(_), None) => write!(f, " #")?,
            // Stale spacers between a removal and the next link.
            (None, None) => {
                if !first {
                    write!(f, "  ")?;
                }
                write!(f, "# #")?;
            }
        }
        first = false;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::AnchorLog;
    use crate::keys::{PointKey, Role};

    #[test]
    fn renders_all_three_families() {
        let mut engine = LayoutEngine::new();
        for index in [0, 1, 2] {
            engine.add_column(index).unwrap();
        }
        for altitude in [-1, 1] {
            engine.add_band(altitude, 0).unwrap();
        }
        engine.add_point(PointKey::new(0, Role::Emitter, 0)).unwrap();
        engine.add_point(PointKey::new(1, Role::Collector, 0)).unwrap();
        engine.link(&mut AnchorLog::new());

        let rendered = AdjacencyDebug(&engine).to_string();
        assert!(rendered.contains("columns: # 0 | 1 | 2 #"));
        assert!(rendered.contains("bands:   # -1 | 1 #"));
        assert!(rendered.contains("# 0/emitter/0 #  # 1/collector/0 #"));
    }
}
