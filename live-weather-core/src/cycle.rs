use std::sync::Arc;

use tokio::task::JoinSet;

use crate::{Batch, City, FetchError, WeatherProvider, WeatherSnapshot};

/// Fetch every city concurrently and merge the results into one batch.
///
/// All-or-nothing: the first failing request fails the cycle and the
/// remaining requests are aborted. The batch keeps the order of `cities`,
/// not the order in which responses arrived.
pub async fn run_cycle(
    provider: Arc<dyn WeatherProvider>,
    cities: &[City],
) -> Result<Batch, FetchError> {
    if cities.is_empty() {
        return Err(FetchError::EmptyCityList);
    }

    let mut tasks = JoinSet::new();
    for (idx, city) in cities.iter().cloned().enumerate() {
        let provider = Arc::clone(&provider);
        tasks.spawn(async move { (idx, provider.current(&city).await) });
    }

    let mut slots: Vec<Option<WeatherSnapshot>> = vec![None; cities.len()];
    while let Some(joined) = tasks.join_next().await {
        let (idx, result) = joined.map_err(|e| FetchError::Task(e.to_string()))?;
        // Returning here drops the JoinSet, which aborts whatever is still running.
        slots[idx] = Some(result?);
    }

    let snapshots: Vec<WeatherSnapshot> = slots.into_iter().flatten().collect();
    if snapshots.len() != cities.len() {
        return Err(FetchError::Task("a fetch task finished without a result".into()));
    }

    for s in snapshots.iter() {
        tracing::info!(
            city = %s.city,
            "{}°C, wind {} km/h, humidity {}%, rain {}mm, snow {}mm, precip {}mm",
            s.temperature_c,
            s.wind_speed_kmh,
            s.humidity_pct,
            s.rain_mm,
            s.snowfall_mm,
            s.precipitation_mm,
        );
    }

    Ok(Batch::new(snapshots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::snapshot;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Answers after a per-city delay; fails for the city named `fail`.
    #[derive(Debug)]
    struct Scripted {
        delays_ms: Vec<(&'static str, u64)>,
        fail: Option<&'static str>,
    }

    #[async_trait]
    impl WeatherProvider for Scripted {
        async fn current(&self, city: &City) -> Result<WeatherSnapshot, FetchError> {
            let delay = self
                .delays_ms
                .iter()
                .find(|(name, _)| *name == city.name)
                .map(|(_, ms)| *ms)
                .unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(delay)).await;

            if self.fail == Some(city.name.as_str()) {
                return Err(FetchError::Timeout { city: city.name.clone() });
            }
            Ok(snapshot(&city.name, 20.0, 0))
        }
    }

    fn cities() -> Vec<City> {
        vec![City::new("A", 1.0, 1.0), City::new("B", 2.0, 2.0), City::new("C", 3.0, 3.0)]
    }

    #[tokio::test]
    async fn empty_city_list_fails() {
        let provider = Arc::new(Scripted { delays_ms: vec![], fail: None });
        let err = run_cycle(provider, &[]).await.unwrap_err();
        assert!(matches!(err, FetchError::EmptyCityList));
    }

    #[tokio::test]
    async fn batch_keeps_city_order_not_completion_order() {
        let provider =
            Arc::new(Scripted { delays_ms: vec![("A", 60), ("B", 30), ("C", 0)], fail: None });

        let batch = run_cycle(provider, &cities()).await.unwrap();
        assert_eq!(batch.cities().collect::<Vec<_>>(), ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn one_failure_fails_the_whole_cycle() {
        let provider = Arc::new(Scripted { delays_ms: vec![], fail: Some("B") });

        let err = run_cycle(provider, &cities()).await.unwrap_err();
        assert_eq!(err.city(), Some("B"));
    }

    #[tokio::test]
    async fn failure_does_not_wait_for_slow_requests() {
        let provider =
            Arc::new(Scripted { delays_ms: vec![("A", 5_000), ("C", 5_000)], fail: Some("B") });

        let started = std::time::Instant::now();
        assert!(run_cycle(provider, &cities()).await.is_err());
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
