//! `lysync endpoints` - list the known entity endpoints.

use lysync_client::ENDPOINTS;
use lysync_record::EntityMapping;

/// Prints the endpoint table, marking kinds with a shipped field mapping.
pub fn run() {
    for (kind, path) in ENDPOINTS {
        let mapped = if EntityMapping::for_kind(kind).is_some() {
            " (mapped)"
        } else {
            ""
        };
        println!("{kind:<16} {path}{mapped}");
    }
}
