//! Binds the reconciler to the terminal: the watch loop plus the one-shot
//! subcommands.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tokio::time::{Duration, interval};

use parkdeck_api::SessionApi;
use parkdeck_core::{AsyncData, LicensePlate, SessionFilter, VehicleMetadata};
use parkdeck_engine::{DEFAULT_DELAYED_AFTER, SessionFeed, poll_tick};

use crate::cli::{CompleteOpts, CreateOpts, LsOpts, WatchOpts};
use crate::render;

/// `parkdeck watch` entry point.
pub async fn run_watch<A: SessionApi>(api: &A, opts: &WatchOpts) -> anyhow::Result<()> {
    let filter = SessionFilter::active_only(opts.active_only);
    let feed = Arc::new(Mutex::new(SessionFeed::new(filter.clone())));

    // The watch surface has no runtime filter toggle; the sender is parked
    // here so the loop stays wired for surfaces that do have one.
    let (_filter_tx, filter_rx) = watch::channel(filter);

    watch_loop(
        api,
        &feed,
        Duration::from_secs(opts.interval),
        Duration::from_secs(opts.delayed_after),
        filter_rx,
    )
    .await;
    Ok(())
}

/// Poll on the interval, refetch immediately on filter changes (re-arming
/// the interval), tear down on Ctrl-C. The interval is owned by this frame,
/// so every exit path drops it; a response in flight at teardown is dropped
/// with the loop scope.
async fn watch_loop<A: SessionApi>(
    api: &A,
    feed: &Arc<Mutex<SessionFeed>>,
    poll_every: Duration,
    delayed_after: Duration,
    mut filter_rx: watch::Receiver<SessionFilter>,
) {
    // First tick fires immediately: that is the fetch-on-mount.
    let mut ticker = interval(poll_every);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                poll_tick(api, feed, delayed_after).await;
            }
            changed = filter_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let filter = filter_rx.borrow_and_update().clone();
                if feed.lock().await.set_filter(filter) {
                    ticker.reset();
                    poll_tick(api, feed, delayed_after).await;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("watch stopped");
                break;
            }
        }

        render_screen(feed).await;
    }
}

async fn render_screen(feed: &Arc<Mutex<SessionFeed>>) {
    let (view, last_updated) = {
        let st = feed.lock().await;
        (st.merged(), st.last_updated())
    };

    // Clear screen + cursor home
    print!("\x1b[2J\x1b[H");
    println!("{}", render::render_view(&view, last_updated, Utc::now()));
    println!("\nparkdeck watch \u{2014} Ctrl-C to quit");
}

/// `parkdeck ls`: one poll, one table.
pub async fn run_ls<A: SessionApi>(api: &A, opts: &LsOpts) -> anyhow::Result<()> {
    let feed = Arc::new(Mutex::new(SessionFeed::new(SessionFilter::active_only(
        opts.active_only,
    ))));

    poll_tick(api, &feed, DEFAULT_DELAYED_AFTER).await;

    let st = feed.lock().await;
    let view = st.merged();
    if let AsyncData::Failed(error) = &view {
        anyhow::bail!("list failed: {error}");
    }
    println!("{}", render::render_view(&view, st.last_updated(), Utc::now()));
    Ok(())
}

/// `parkdeck create`: start a session and print the assigned id.
pub async fn run_create<A: SessionApi>(api: &A, opts: &CreateOpts) -> anyhow::Result<()> {
    let metadata = VehicleMetadata {
        color: opts.color.clone(),
        make: opts.make.clone(),
        model: opts.model.clone(),
        license_plate: LicensePlate {
            state: opts.state.clone(),
            number: opts.plate.clone(),
        },
    };

    let record = api.create(&metadata).await?;
    println!(
        "created session {} at {}",
        record.id,
        record.time_in().to_rfc3339()
    );
    Ok(())
}

/// `parkdeck complete`: finalize a session and print the time out.
pub async fn run_complete<A: SessionApi>(api: &A, opts: &CompleteOpts) -> anyhow::Result<()> {
    let record = api.complete(&opts.id).await?;
    match record.time_out() {
        Some(time_out) => println!("completed session {} at {}", record.id, time_out.to_rfc3339()),
        None => println!("completed session {}", record.id),
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use parkdeck_core::{ApiError, ParkingSession, SessionRecord};
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    /// List-only fake: pops scripted responses, records seen filters.
    struct FakeListApi {
        responses: StdMutex<VecDeque<Result<Vec<SessionRecord>, ApiError>>>,
        seen_filters: StdMutex<Vec<SessionFilter>>,
    }

    impl FakeListApi {
        fn new(responses: Vec<Result<Vec<SessionRecord>, ApiError>>) -> Self {
            Self {
                responses: StdMutex::new(responses.into()),
                seen_filters: StdMutex::new(Vec::new()),
            }
        }
    }

    impl SessionApi for FakeListApi {
        async fn list(&self, filter: &SessionFilter) -> Result<Vec<SessionRecord>, ApiError> {
            self.seen_filters.lock().unwrap().push(filter.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn create(&self, _metadata: &VehicleMetadata) -> Result<SessionRecord, ApiError> {
            Err(ApiError::Network("not scripted".into()))
        }

        async fn complete(&self, _id: &str) -> Result<SessionRecord, ApiError> {
            Err(ApiError::Network("not scripted".into()))
        }
    }

    fn record(id: &str) -> SessionRecord {
        SessionRecord {
            id: id.to_string(),
            session: ParkingSession::start(Utc::now()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn watch_loop_fetches_on_mount_and_on_interval() {
        let api = FakeListApi::new(vec![Ok(vec![record("a")]), Ok(vec![record("b")])]);
        let feed = Arc::new(Mutex::new(SessionFeed::default()));
        let (filter_tx, filter_rx) = watch::channel(SessionFilter::default());

        let loop_fut = watch_loop(
            &api,
            &feed,
            Duration::from_secs(10),
            Duration::from_secs(1),
            filter_rx,
        );

        // Run the loop long enough for the mount fetch plus one interval tick.
        tokio::select! {
            () = loop_fut => unreachable!("loop only exits on teardown"),
            () = tokio::time::sleep(Duration::from_secs(15)) => {}
        }
        drop(filter_tx);

        assert_eq!(api.seen_filters.lock().unwrap().len(), 2);
        let st = feed.lock().await;
        assert_eq!(
            st.sessions().value().map(|v| v[0].id.clone()),
            Some("b".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn filter_change_triggers_immediate_refetch() {
        let api = FakeListApi::new(vec![Ok(Vec::new()), Ok(vec![record("active")])]);
        let feed = Arc::new(Mutex::new(SessionFeed::default()));
        let (filter_tx, filter_rx) = watch::channel(SessionFilter::default());

        let loop_fut = watch_loop(
            &api,
            &feed,
            Duration::from_secs(60),
            Duration::from_secs(1),
            filter_rx,
        );
        tokio::pin!(loop_fut);

        // Mount fetch only; the 60s interval is nowhere near due.
        tokio::select! {
            () = &mut loop_fut => unreachable!(),
            () = tokio::time::sleep(Duration::from_secs(2)) => {}
        }
        assert_eq!(api.seen_filters.lock().unwrap().len(), 1);

        filter_tx
            .send(SessionFilter::active_only(true))
            .expect("receiver alive");
        tokio::select! {
            () = &mut loop_fut => unreachable!(),
            () = tokio::time::sleep(Duration::from_secs(2)) => {}
        }

        let seen = api.seen_filters.lock().unwrap();
        assert_eq!(seen.len(), 2, "filter change refetches without a tick");
        assert_eq!(seen[1].active, Some(true));
    }

    #[tokio::test]
    async fn run_ls_fails_on_failed_poll() {
        let api = FakeListApi::new(vec![Err(ApiError::Network("down".into()))]);
        let result = run_ls(&api, &LsOpts { active_only: false }).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_ls_succeeds_on_empty_collection() {
        let api = FakeListApi::new(vec![Ok(Vec::new())]);
        let result = run_ls(&api, &LsOpts { active_only: true }).await;
        assert!(result.is_ok());
        assert_eq!(
            api.seen_filters.lock().unwrap()[0].active,
            Some(true),
            "active filter forwarded to the endpoint"
        );
    }
}
