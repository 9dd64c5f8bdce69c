//! Pipeline counters.
//!
//! # Metrics
//! - `srcset_configs_forwarded_total` (counter): accumulations that passed validation
//! - `srcset_configs_dropped_total` (counter): accumulations dropped as incomplete or malformed
//! - `srcset_probes_created_total` (counter): probes bound to a configuration
//! - `srcset_probes_superseded_total` (counter): pending probes abandoned for a newer one
//! - `srcset_changes_total` (counter): change notifications raised
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the host installs a recorder if it wants one
//! - Without a recorder every call is a no-op

use metrics::counter;

pub fn record_config_forwarded() {
    counter!("srcset_configs_forwarded_total").increment(1);
}

pub fn record_config_dropped() {
    counter!("srcset_configs_dropped_total").increment(1);
}

pub fn record_probe_created() {
    counter!("srcset_probes_created_total").increment(1);
}

pub fn record_probe_superseded() {
    counter!("srcset_probes_superseded_total").increment(1);
}

pub fn record_change() {
    counter!("srcset_changes_total").increment(1);
}
