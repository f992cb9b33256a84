//! Architecture Verification Suite
//!
//! The catalogue is shared by concurrent request handlers, so everything
//! reachable from the router state must be thread-safe.

#[cfg(test)]
mod architecture_tests {
    use std::sync::Arc;
    use std::thread;

    use financial_formulas::engine::QueryEngine;
    use financial_formulas::server::AppState;
    use financial_formulas::{Catalogue, RawQuery};

    #[test]
    fn test_shared_state_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<Catalogue>();
        assert_send_sync::<QueryEngine>();
        assert_send_sync::<AppState>();
    }

    #[test]
    fn test_concurrent_queries_are_independent() {
        let engine = QueryEngine::new(Arc::new(Catalogue::standard().unwrap()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = engine.clone();
                thread::spawn(move || {
                    let query = RawQuery::new("CalcAssets", [Some(f64::from(i)), Some(1.0)]);
                    (i, engine.respond(&query))
                })
            })
            .collect();

        for handle in handles {
            let (i, result) = handle.join().unwrap();
            assert_eq!(result, (i + 1).to_string());
        }
    }
}
