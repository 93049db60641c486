//! Background fetch worker for interactive front-ends.
//!
//! The UI never blocks on the network. It sends `FetchRequest` messages to a
//! single worker thread and polls for `FetchResponse` messages. Every request
//! carries a sequence number; only the response to the newest request is
//! handed back, so a slow older fetch can never overwrite a newer selection.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::app::pipeline::{BundleRequest, build_bundle};
use crate::data::ObservationSource;
use crate::domain::MergedBundle;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub seq: u64,
    pub request: BundleRequest,
}

#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub seq: u64,
    pub result: Result<MergedBundle, AppError>,
}

pub struct FetchWorker {
    requests: Option<Sender<FetchRequest>>,
    responses: Receiver<FetchResponse>,
    latest_seq: u64,
}

impl FetchWorker {
    pub fn spawn<S>(source: S) -> Self
    where
        S: ObservationSource + Send + Sync + 'static,
    {
        let (req_tx, req_rx) = mpsc::channel::<FetchRequest>();
        let (resp_tx, resp_rx) = mpsc::channel::<FetchResponse>();

        // Detached: the thread exits once the request channel closes and any
        // in-flight fetch returns. Nothing waits on it.
        thread::spawn(move || worker_loop(source, req_rx, resp_tx));

        Self {
            requests: Some(req_tx),
            responses: resp_rx,
            latest_seq: 0,
        }
    }

    /// Queue a request; it supersedes every earlier one. Returns its sequence number.
    pub fn submit(&mut self, request: BundleRequest) -> Result<u64, AppError> {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.requests
            .as_ref()
            .ok_or_else(|| AppError::provider("Fetch worker has shut down."))?
            .send(FetchRequest { seq, request })
            .map_err(|_| AppError::provider("Fetch worker has shut down."))?;
        Ok(seq)
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Non-blocking: the response to the newest request, if it has arrived.
    pub fn poll(&mut self) -> Option<FetchResponse> {
        let mut newest = None;
        loop {
            match self.responses.try_recv() {
                Ok(resp) => {
                    if resp.seq == self.latest_seq {
                        newest = Some(resp);
                    } else {
                        tracing::debug!(seq = resp.seq, latest = self.latest_seq, "dropping stale response");
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return newest,
            }
        }
    }

    /// Blocking variant of `poll` with an upper bound on the wait.
    pub fn wait(&mut self, timeout: Duration) -> Option<FetchResponse> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.responses.recv_timeout(remaining) {
                Ok(resp) if resp.seq == self.latest_seq => return Some(resp),
                Ok(resp) => {
                    tracing::debug!(seq = resp.seq, latest = self.latest_seq, "dropping stale response");
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop. An in-flight fetch
        // finishes on its own and its response is discarded.
        self.requests.take();
    }
}

fn worker_loop<S: ObservationSource + Sync>(
    source: S,
    requests: Receiver<FetchRequest>,
    responses: Sender<FetchResponse>,
) {
    while let Ok(mut next) = requests.recv() {
        // Coalesce: anything queued behind this request supersedes it.
        while let Ok(newer) = requests.try_recv() {
            next = newer;
        }
        tracing::info!(seq = next.seq, series = next.request.series.len(), "fetching bundle");
        let result = build_bundle(&source, &next.request);
        if let Err(err) = &result {
            tracing::warn!(seq = next.seq, error = %err, "bundle fetch failed");
        }
        if responses.send(FetchResponse { seq: next.seq, result }).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use crate::app::pipeline::tests::sample_source;
    use crate::data::RawSeries;
    use crate::domain::SeriesSpec;

    /// Source whose every fetch takes `delay`.
    struct SlowSource {
        delay: Duration,
    }

    impl ObservationSource for SlowSource {
        fn fetch_series(&self, _id: &str, _observation_start: &str) -> Result<RawSeries, AppError> {
            thread::sleep(self.delay);
            Ok(RawSeries {
                meta: None,
                observations: Vec::new(),
            })
        }
    }

    fn request(id: &str) -> BundleRequest {
        BundleRequest {
            series: vec![SeriesSpec::plain(id)],
            observation_start: "1950-01-01".into(),
        }
    }

    #[test]
    fn newest_request_wins() {
        let mut worker = FetchWorker::spawn(sample_source());
        worker.submit(request("GDP")).unwrap();
        let last = worker.submit(request("UNRATE")).unwrap();

        let resp = worker.wait(Duration::from_secs(5)).expect("response");
        assert_eq!(resp.seq, last);
        let bundle = resp.result.unwrap();
        assert_eq!(bundle.series[0].id, "UNRATE");
        assert!(worker.poll().is_none());
    }

    #[test]
    fn errors_travel_as_responses() {
        let mut worker = FetchWorker::spawn(sample_source());
        worker.submit(request("MISSING")).unwrap();
        let resp = worker.wait(Duration::from_secs(5)).expect("response");
        assert!(resp.result.is_err());
    }

    #[test]
    fn drop_does_not_wait_for_in_flight_fetch() {
        let mut worker = FetchWorker::spawn(SlowSource {
            delay: Duration::from_secs(3),
        });
        worker.submit(request("GDP")).unwrap();
        thread::sleep(Duration::from_millis(100));

        let started = Instant::now();
        drop(worker);
        assert!(started.elapsed() < Duration::from_secs(1), "drop blocked for {:?}", started.elapsed());
    }
}
