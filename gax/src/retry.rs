use crate::status::{Code, Status};
use std::future::Future;
use std::time::{Duration, Instant};

use tokio::select;

use crate::cancel::CancellationToken;

/// Converts a concrete error type into a [`Status`] reference, when possible.
///
/// Every policy in this module is generic over the caller's error type so
/// that a single retry loop can drive both the bulk mutator and the row
/// reader without either one depending on the other's error enum.
pub trait TryAs<T> {
    fn try_as(&self) -> Result<&T, ()>;
}

impl TryAs<Status> for Status {
    fn try_as(&self) -> Result<&Status, ()> {
        Ok(self)
    }
}

/// Decides, after a failed attempt, whether another attempt is permitted.
///
/// Cloned once at the start of every operation so that concurrent
/// operations never share attempt state.
pub trait RetryPolicy<E>: Clone {
    /// Called exactly once per failed attempt, after the attempt completes
    /// and before backoff is computed.
    fn allow_retry(&mut self, error: &E) -> bool;
}

/// Bounds the number of attempts at N failures.
#[derive(Clone, Debug)]
pub struct LimitedCount {
    pub max_attempts: usize,
    attempts: usize,
}

impl LimitedCount {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts, attempts: 0 }
    }
}

impl<E> RetryPolicy<E> for LimitedCount {
    fn allow_retry(&mut self, _error: &E) -> bool {
        self.attempts += 1;
        self.attempts < self.max_attempts
    }
}

/// Bounds retries to a wall-clock deadline measured from the first attempt.
#[derive(Clone, Debug)]
pub struct LimitedTime {
    pub timeout: Duration,
    started: Option<Instant>,
}

impl LimitedTime {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout, started: None }
    }
}

impl<E> RetryPolicy<E> for LimitedTime {
    fn allow_retry(&mut self, _error: &E) -> bool {
        let start = *self.started.get_or_insert_with(Instant::now);
        start.elapsed() < self.timeout
    }
}

/// Restricts a wrapped retry-bound policy to a specific set of gRPC codes,
/// treating every other code as permanent.
#[derive(Clone)]
pub struct CodeFiltered<P> {
    pub codes: Vec<Code>,
    pub inner: P,
}

impl<P> CodeFiltered<P> {
    pub fn new(codes: Vec<Code>, inner: P) -> Self {
        Self { codes, inner }
    }
}

impl<E, P> RetryPolicy<E> for CodeFiltered<P>
where
    E: TryAs<Status>,
    P: RetryPolicy<E>,
{
    fn allow_retry(&mut self, error: &E) -> bool {
        let code = match error.try_as() {
            Ok(s) => s.code(),
            Err(_) => return false,
        };
        if !self.codes.iter().any(|c| *c == code) {
            return false;
        }
        self.inner.allow_retry(error)
    }
}

/// Default set of gRPC codes considered transient by the library.
pub fn default_retryable_codes() -> Vec<Code> {
    vec![Code::Unavailable, Code::Unknown, Code::Aborted, Code::DeadlineExceeded]
}

/// Computes the delay before the next attempt, given the status that caused
/// the failure. Cloned at operation start, mutated across the attempt loop.
pub trait BackoffPolicy<E>: Clone {
    fn next_backoff(&mut self, error: &E) -> Duration;
}

/// Exponential backoff with jitter, capped at `max`.
///
/// The wait time between retries is a random value between 0 and the
/// "retry envelope". The envelope starts at `initial` and grows by
/// `multiplier` every attempt, capped at `max`.
#[derive(Clone, Debug)]
pub struct ExponentialBackoff {
    pub initial: Duration,
    pub max: Duration,
    pub multiplier: f64,
    cur: Duration,
}

impl ExponentialBackoff {
    pub fn new(initial: Duration, max: Duration, multiplier: f64) -> Self {
        Self { initial, max, multiplier, cur: Duration::from_nanos(0) }
    }

    fn duration(&mut self) -> Duration {
        if self.cur.as_nanos() == 0 {
            self.cur = self.initial;
        }
        let cur_val = self.cur.as_nanos().max(1);
        let jitter_nanos = (rand::random::<u64>() as u128) % cur_val;
        let d = Duration::from_nanos(jitter_nanos as u64 + 1);
        let next = (self.cur.as_nanos() as f64 * self.multiplier) as u128;
        self.cur = Duration::from_nanos(next.min(u64::MAX as u128) as u64);
        if self.cur > self.max {
            self.cur = self.max;
        }
        d
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(250), Duration::from_millis(32_000), 1.30)
    }
}

impl<E> BackoffPolicy<E> for ExponentialBackoff {
    fn next_backoff(&mut self, _error: &E) -> Duration {
        self.duration()
    }
}

/// Attaches call-scoped state (deadlines, routing metadata) to a request
/// before every attempt. Implemented per-operation in the client crate.
pub trait MetadataPolicy<Req> {
    fn setup(&self, request: &mut Req);
}

/// Drives the universal attempt loop shared by unary and streaming RPCs:
/// invoke `a`, and on failure consult `retry` before sleeping for `backoff`
/// and trying again.
pub async fn invoke<R, E, A, RP, BP>(
    cancel: Option<CancellationToken>,
    mut retry: RP,
    mut backoff: BP,
    mut a: impl FnMut() -> A,
) -> Result<R, E>
where
    E: TryAs<Status> + From<Status>,
    A: Future<Output = Result<R, E>>,
    RP: RetryPolicy<E>,
    BP: BackoffPolicy<E>,
{
    let fn_loop = async {
        loop {
            let result = a().await;
            let err = match result {
                Ok(v) => return Ok(v),
                Err(e) => e,
            };
            if !retry.allow_retry(&err) {
                return Err(err);
            }
            let delay = backoff.next_backoff(&err);
            tokio::time::sleep(delay).await;
        }
    };

    match cancel {
        Some(cancel) => {
            select! {
                _ = cancel.cancelled() => Err(Status::from(tonic::Status::cancelled("client cancel")).into()),
                v = fn_loop => v,
            }
        }
        None => fn_loop.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limited_count_stops_after_n_failures() {
        let mut p = LimitedCount::new(3);
        assert!(RetryPolicy::<()>::allow_retry(&mut p, &()));
        assert!(RetryPolicy::<()>::allow_retry(&mut p, &()));
        assert!(!RetryPolicy::<()>::allow_retry(&mut p, &()));
    }

    #[test]
    fn limited_time_stops_after_deadline() {
        let mut p = LimitedTime::new(Duration::from_millis(0));
        assert!(RetryPolicy::<()>::allow_retry(&mut p, &()));
        std::thread::sleep(Duration::from_millis(5));
        assert!(!RetryPolicy::<()>::allow_retry(&mut p, &()));
    }

    #[test]
    fn exponential_backoff_never_exceeds_max() {
        let mut b = ExponentialBackoff::new(Duration::from_millis(1), Duration::from_millis(10), 4.0);
        for _ in 0..20 {
            let d = BackoffPolicy::<()>::next_backoff(&mut b, &());
            assert!(d <= Duration::from_millis(10));
        }
    }

    fn status(code: Code) -> Status {
        let tonic_code = match code {
            Code::Unavailable => tonic::Code::Unavailable,
            Code::InvalidArgument => tonic::Code::InvalidArgument,
            _ => tonic::Code::Unknown,
        };
        Status::new(tonic::Status::new(tonic_code, "x"))
    }

    #[test]
    fn code_filtered_allows_a_listed_code_when_the_inner_policy_allows() {
        let mut p = CodeFiltered::new(vec![Code::Unavailable], LimitedCount::new(3));
        assert!(p.allow_retry(&status(Code::Unavailable)));
    }

    #[test]
    fn code_filtered_rejects_a_code_not_in_the_list() {
        let mut p = CodeFiltered::new(vec![Code::Unavailable], LimitedCount::new(3));
        assert!(!p.allow_retry(&status(Code::InvalidArgument)));
    }

    #[test]
    fn code_filtered_defers_to_the_inner_policy_once_exhausted() {
        let mut p = CodeFiltered::new(vec![Code::Unavailable], LimitedCount::new(2));
        assert!(p.allow_retry(&status(Code::Unavailable)));
        assert!(!p.allow_retry(&status(Code::Unavailable)));
    }

    /// An error that cannot be classified as a `Status` at all must never be
    /// treated as retryable, regardless of the configured code list.
    struct Opaque;

    impl TryAs<Status> for Opaque {
        fn try_as(&self) -> Result<&Status, ()> {
            Err(())
        }
    }

    #[test]
    fn code_filtered_rejects_an_error_that_cannot_be_classified() {
        let mut p = CodeFiltered::new(vec![Code::Unavailable], LimitedCount::new(3));
        assert!(!p.allow_retry(&Opaque));
    }
}
