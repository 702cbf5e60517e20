//! Per-request readiness resolution.

use serde::Serialize;

use crate::config::schema::ProviderConfig;
use crate::providers::probe::Prober;

/// Which provider family will serve this request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChosenProvider {
    /// The Ogmios + Kupo indexer pair.
    Kupmios,
    /// The Dolos REST fallback.
    DolosRest,
}

/// Readiness of the configured providers, computed fresh per request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessVerdict {
    pub ready: bool,
    pub ogmios_reachable: bool,
    pub kupo_reachable: bool,
    pub dolos_grpc_reachable: bool,
    pub dolos_rest_reachable: bool,
    pub dolos_rest_healthy: bool,
    pub chosen_provider: Option<ChosenProvider>,
}

impl ReadinessVerdict {
    /// Combine probe results into a verdict.
    ///
    /// The dual-indexer path is an all-or-nothing pair and is preferred;
    /// the fallback stands alone behind its health flag. The gRPC and
    /// REST base reachability bits are reported but decide nothing.
    pub fn from_probes(
        ogmios_reachable: bool,
        kupo_reachable: bool,
        dolos_grpc_reachable: bool,
        dolos_rest_reachable: bool,
        dolos_rest_healthy: bool,
    ) -> Self {
        let chosen_provider = if ogmios_reachable && kupo_reachable {
            Some(ChosenProvider::Kupmios)
        } else if dolos_rest_healthy {
            Some(ChosenProvider::DolosRest)
        } else {
            None
        };

        Self {
            ready: chosen_provider.is_some(),
            ogmios_reachable,
            kupo_reachable,
            dolos_grpc_reachable,
            dolos_rest_reachable,
            dolos_rest_healthy,
            chosen_provider,
        }
    }
}

/// Probe every configured endpoint concurrently and resolve readiness.
pub async fn resolve(prober: &Prober, providers: &ProviderConfig) -> ReadinessVerdict {
    let dolos_rest_health_url = providers.dolos_rest_health_url();
    let (ogmios, kupo, dolos_grpc, dolos_rest, dolos_health) = tokio::join!(
        prober.ping(&providers.ogmios_url),
        prober.ping(&providers.kupo_url),
        prober.ping(&providers.dolos_grpc_url),
        prober.ping(&providers.dolos_rest_url),
        prober.health(&dolos_rest_health_url),
    );

    let verdict = ReadinessVerdict::from_probes(ogmios, kupo, dolos_grpc, dolos_rest, dolos_health);
    tracing::debug!(
        ready = verdict.ready,
        ogmios = verdict.ogmios_reachable,
        kupo = verdict.kupo_reachable,
        dolos_rest_healthy = verdict.dolos_rest_healthy,
        "readiness resolved"
    );
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dual_indexer_pair_is_all_or_nothing() {
        let verdict = ReadinessVerdict::from_probes(true, true, false, false, false);
        assert!(verdict.ready);
        assert_eq!(verdict.chosen_provider, Some(ChosenProvider::Kupmios));

        let verdict = ReadinessVerdict::from_probes(true, false, false, false, false);
        assert!(!verdict.ready);
        assert_eq!(verdict.chosen_provider, None);

        let verdict = ReadinessVerdict::from_probes(false, true, false, false, false);
        assert!(!verdict.ready);
    }

    #[test]
    fn test_fallback_stands_alone() {
        let verdict = ReadinessVerdict::from_probes(false, false, false, true, true);
        assert!(verdict.ready);
        assert_eq!(verdict.chosen_provider, Some(ChosenProvider::DolosRest));
    }

    #[test]
    fn test_indexers_preferred_over_fallback() {
        let verdict = ReadinessVerdict::from_probes(true, true, true, true, true);
        assert_eq!(verdict.chosen_provider, Some(ChosenProvider::Kupmios));
    }

    #[test]
    fn test_rest_reachability_alone_is_not_health() {
        // Base URL answering does not make the fallback usable.
        let verdict = ReadinessVerdict::from_probes(false, false, true, true, false);
        assert!(!verdict.ready);
        assert_eq!(verdict.chosen_provider, None);
    }

    #[test]
    fn test_all_down() {
        let verdict = ReadinessVerdict::from_probes(false, false, false, false, false);
        assert!(!verdict.ready);
    }

    #[test]
    fn test_serializes_camel_case() {
        let verdict = ReadinessVerdict::from_probes(true, true, false, false, false);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["ogmiosReachable"], true);
        assert_eq!(json["chosenProvider"], "kupmios");
    }
}
