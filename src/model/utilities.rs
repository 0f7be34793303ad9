use futures::future::join_all;

use super::metrics::MetricSample;
use super::traits::MetricCollector;

/// Collects metrics from multiple collectors concurrently.
///
/// A failing collector is logged and contributes nothing; the others still
/// return their samples. Errors that point at a configuration or programming
/// defect are logged at error level, everything else at warn.
///
/// # Arguments
/// * `collectors` - Metric collectors to run
///
/// # Returns
/// The samples of every collector that succeeded, in collector order
pub async fn batch_collect_metrics(collectors: &[&dyn MetricCollector]) -> Vec<MetricSample> {
    let results = join_all(collectors.iter().map(|collector| collector.collect())).await;

    collectors
        .iter()
        .zip(results)
        .filter_map(|(collector, res)| match res {
            Ok(samples) => {
                tracing::debug!(
                    collector = collector.name(),
                    count = samples.len(),
                    "Collection succeeded"
                );
                Some(samples)
            }
            Err(e) if e.is_defect() => {
                tracing::error!(
                    collector = collector.name(),
                    error = ?e,
                    "Collection failed, check credentials and console configuration"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    collector = collector.name(),
                    error = ?e,
                    "Collection failed, family omitted from this scrape"
                );
                None
            }
        })
        .flatten()
        .collect()
}
