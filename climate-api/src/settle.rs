//! Concurrent, independent fetches.

use climate_core::error::ApiError;
use futures::future::join_all;
use std::future::Future;

/// Runs every fetch concurrently and returns one outcome per fetch, in input
/// order. A failing fetch never cancels or fails its siblings.
///
/// Errors are handed back untouched and not logged here; whoever turns an
/// outcome into a panel state reports it.
pub async fn settle_all<K, T, F>(tasks: Vec<(K, F)>) -> Vec<(K, Result<T, ApiError>)>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let (keys, futures): (Vec<K>, Vec<F>) = tasks.into_iter().unzip();
    let results = join_all(futures).await;
    keys.into_iter().zip(results).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{ready, BoxFuture, FutureExt};

    fn ok(n: u32) -> BoxFuture<'static, Result<u32, ApiError>> {
        ready(Ok(n)).boxed()
    }

    fn fail(path: &str) -> BoxFuture<'static, Result<u32, ApiError>> {
        ready(Err(ApiError::Transport {
            path: path.to_string(),
            reason: "connection refused".to_string(),
        }))
        .boxed()
    }

    #[test]
    fn test_one_failure_does_not_block_the_others() {
        let outcomes = block_on(settle_all(vec![
            ("temperature", ok(1)),
            ("boxplot", fail("/api/temperature-boxplot")),
            ("map", ok(3)),
        ]));
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0], ("temperature", Ok(1)));
        assert!(outcomes[1].1.is_err());
        assert_eq!(outcomes[1].0, "boxplot");
        assert_eq!(outcomes[2], ("map", Ok(3)));
    }

    #[test]
    fn test_errors_come_back_as_issued() {
        let outcomes = block_on(settle_all(vec![
            ("a", fail("/api/co2-trend")),
            ("b", fail("/api/precip-map")),
        ]));
        let paths: Vec<&str> = outcomes
            .iter()
            .map(|(_, r)| r.as_ref().unwrap_err().path())
            .collect();
        assert_eq!(paths, vec!["/api/co2-trend", "/api/precip-map"]);
        assert_eq!(
            outcomes[0].1,
            Err(ApiError::Transport {
                path: "/api/co2-trend".to_string(),
                reason: "connection refused".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_input() {
        let outcomes: Vec<((), Result<u32, ApiError>)> =
            block_on(settle_all(Vec::<((), BoxFuture<'static, Result<u32, ApiError>>)>::new()));
        assert!(outcomes.is_empty());
    }
}
