//! The DNS zone data source.

use ns1_client::{Ns1Client, Zone};

use crate::error::ResourceResult;
use crate::state::{SecondaryState, ZoneState};

/// Write a zone into `state`.
///
/// `primary` and `additional_primaries` are only populated when the zone
/// is an enabled secondary; `secondaries` only when the zone is an enabled
/// primary. A zone acting in neither role leaves all three empty.
pub fn zone_to_state(zone: &Zone, state: &mut ZoneState) {
    state.id = zone.id.clone();
    state.zone = zone.zone.clone();
    state.ttl = zone.ttl;
    state.refresh = zone.refresh;
    state.retry = zone.retry;
    state.expiry = zone.expiry;
    state.nx_ttl = zone.nx_ttl;
    state.link = zone.link.clone();
    state.hostmaster = zone.hostmaster.clone();
    state.dns_servers = zone.dns_servers.join(",");
    state.networks = zone.networks.clone();

    state.primary.clear();
    state.additional_primaries.clear();
    if let Some(ref secondary) = zone.secondary
        && secondary.enabled
    {
        state.primary = secondary.primary_ip.clone();
        state.additional_primaries = secondary.other_ips.clone();
    }

    state.secondaries.clear();
    if let Some(ref primary) = zone.primary
        && primary.enabled
    {
        state.secondaries = primary
            .secondaries
            .iter()
            .map(|s| SecondaryState {
                ip: s.ip.clone(),
                notify: s.notify,
                port: s.port,
                network_ids: s.networks.clone(),
            })
            .collect();
    }
}

/// Fetch the zone named in `state` and write it back.
pub async fn zone_read(client: &Ns1Client, state: &mut ZoneState) -> ResourceResult<()> {
    let zone = client.get_zone(&state.zone).await?;
    zone_to_state(&zone, state);
    Ok(())
}
