use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use casebrief::application::services::RetryPolicy;

#[test]
fn given_default_policy_when_computing_backoff_then_schedule_is_clamped_between_four_and_ten() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts(), 3);
    assert_eq!(policy.backoff(1), Duration::from_secs(4));
    assert_eq!(policy.backoff(2), Duration::from_secs(4));
    assert_eq!(policy.backoff(3), Duration::from_secs(4));
    assert_eq!(policy.backoff(4), Duration::from_secs(8));
    assert_eq!(policy.backoff(5), Duration::from_secs(10));
    assert_eq!(policy.backoff(40), Duration::from_secs(10));
}

#[test]
fn given_zero_attempts_when_building_policy_then_one_attempt_is_kept() {
    let policy = RetryPolicy::new(0, 1.0, Duration::ZERO, Duration::ZERO);

    assert_eq!(policy.max_attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn given_call_failing_twice_when_running_then_third_result_is_used() {
    let policy = RetryPolicy::default();
    let attempts = AtomicU32::new(0);

    let result = policy
        .run("test", || {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move { if n < 3 { Err(format!("fail {n}")) } else { Ok(n) } }
        })
        .await;

    assert_eq!(result.expect("third attempt succeeds"), 3);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn given_call_always_failing_when_running_then_exactly_three_attempts_occur() {
    let policy = RetryPolicy::default();
    let attempts = AtomicU32::new(0);

    let result: Result<(), _> = policy
        .run("test", || {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Err(format!("fail {n}")) }
        })
        .await;

    let error = result.expect_err("budget exhausted");
    assert_eq!(error.attempts, 3);
    assert_eq!(error.last_error, "fail 3");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn given_failing_call_when_running_then_waits_backoff_between_attempts() {
    let policy = RetryPolicy::default();
    let start = tokio::time::Instant::now();

    let _: Result<(), _> = policy.run("test", || async { Err("nope") }).await;

    // Two waits of 4s each; no wait after the final attempt.
    assert_eq!(start.elapsed(), Duration::from_secs(8));
}

#[tokio::test]
async fn given_no_retry_policy_when_call_fails_then_single_attempt_is_made() {
    let attempts = AtomicU32::new(0);

    let result: Result<(), _> = RetryPolicy::no_retry()
        .run("test", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err("nope") }
        })
        .await;

    assert_eq!(result.expect_err("fails").attempts, 1);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}
