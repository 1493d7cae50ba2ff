//! Background reminder loop.
//!
//! The loop lives on its own thread and only ever blocks in two places: the
//! countdown (a `recv_timeout` on the control channel, so `stop()` wakes it
//! at once) and the prompt itself. Everything the user decides is published
//! as a [`ReminderEvent`]; nothing UI related runs on the background thread.

use crate::errors::{AppError, AppResult};
use crate::reminder::prompt::{Prompt, PromptResponse, Reminder};
use crate::reminder::{MAX_INTERVAL, ReminderEvent, ReminderSettings, ReminderState};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Upper bound on how long `stop()` waits for the background thread.
pub const STOP_JOIN_TIMEOUT: Duration = Duration::from_secs(1);

enum Control {
    Stop,
    ForcePrompt,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Shared {
    settings: Mutex<ReminderSettings>,
    state: Mutex<ReminderState>,
    /// Held for the whole of `Prompt::ask`. Shared by every loop this
    /// scheduler ever spawned, so a detached loop still blocked in a prompt
    /// keeps a newer one from asking at the same time.
    prompt_gate: Mutex<()>,
}

/// While alive, the background loop does not start a new prompt; one that
/// falls due waits and is shown once the hold is released.
pub struct PromptHold<'a> {
    _gate: MutexGuard<'a, ()>,
}

/// Handle on one running background loop.
struct Worker {
    control: Sender<Control>,
    cancelled: Arc<AtomicBool>,
    done: Receiver<()>,
    handle: JoinHandle<()>,
}

pub struct ReminderScheduler {
    shared: Arc<Shared>,
    prompt: Arc<dyn Prompt>,
    events_tx: Sender<ReminderEvent>,
    events_rx: Receiver<ReminderEvent>,
    worker: Option<Worker>,
}

impl ReminderScheduler {
    pub fn new<P: Prompt + 'static>(settings: ReminderSettings, prompt: P) -> AppResult<Self> {
        settings.validate()?;
        let (events_tx, events_rx) = unbounded();
        Ok(Self {
            shared: Arc::new(Shared {
                settings: Mutex::new(settings),
                state: Mutex::new(ReminderState::Stopped),
                prompt_gate: Mutex::new(()),
            }),
            prompt: Arc::new(prompt),
            events_tx,
            events_rx,
            worker: None,
        })
    }

    /// Receiver for scheduler notifications. Every clone sees each event once
    /// across all clones, so a front-end normally keeps a single one.
    pub fn events(&self) -> Receiver<ReminderEvent> {
        self.events_rx.clone()
    }

    pub fn state(&self) -> ReminderState {
        *lock(&self.shared.state)
    }

    pub fn settings(&self) -> ReminderSettings {
        *lock(&self.shared.settings)
    }

    /// Replace the cadence. The countdown in progress keeps its deadline;
    /// the new values apply from the next one.
    pub fn set_settings(&self, settings: ReminderSettings) -> AppResult<()> {
        settings.validate()?;
        *lock(&self.shared.settings) = settings;
        debug!(?settings, "reminder settings updated");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished() && !w.cancelled.load(Ordering::SeqCst))
    }

    /// Start the countdown. Calling it while running does nothing.
    pub fn start(&mut self) -> AppResult<()> {
        if self.is_running() {
            return Ok(());
        }
        self.worker = None;

        let (control_tx, control_rx) = unbounded();
        let (done_tx, done_rx) = bounded::<()>(0);
        let cancelled = Arc::new(AtomicBool::new(false));

        *lock(&self.shared.state) = ReminderState::Waiting;

        let ctx = LoopCtx {
            shared: Arc::clone(&self.shared),
            prompt: Arc::clone(&self.prompt),
            events: self.events_tx.clone(),
            control: control_rx,
            cancelled: Arc::clone(&cancelled),
            _done: done_tx,
        };

        let handle = thread::Builder::new()
            .name("rlogcheck-reminder".into())
            .spawn(move || ctx.run())
            .map_err(|e| {
                *lock(&self.shared.state) = ReminderState::Stopped;
                AppError::Io(e)
            })?;

        info!(settings = ?self.settings(), "reminder scheduler started");
        self.worker = Some(Worker {
            control: control_tx,
            cancelled,
            done: done_rx,
            handle,
        });
        Ok(())
    }

    /// Stop the loop from any state. Waits at most [`STOP_JOIN_TIMEOUT`];
    /// a prompt still on screen after that is abandoned and its answer
    /// ignored. Calling it when stopped does nothing.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        {
            let mut state = lock(&self.shared.state);
            worker.cancelled.store(true, Ordering::SeqCst);
            *state = ReminderState::Stopped;
        }
        let _ = worker.control.send(Control::Stop);

        match worker.done.recv_timeout(STOP_JOIN_TIMEOUT) {
            Err(RecvTimeoutError::Timeout) => {
                warn!("reminder thread busy in a prompt; detaching it");
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if worker.handle.join().is_err() {
                    warn!("reminder thread panicked");
                }
            }
        }

        let _ = self.events_tx.send(ReminderEvent::Stopped);
        info!("reminder scheduler stopped");
    }

    /// Keep prompts off the terminal while the foreground uses it.
    pub fn hold_prompts(&self) -> PromptHold<'_> {
        PromptHold {
            _gate: lock(&self.shared.prompt_gate),
        }
    }

    /// Ask right now, without waiting for the countdown.
    ///
    /// Proceed and dismiss leave the running countdown untouched; snooze
    /// replaces it with a snooze countdown. Returns `false` when the
    /// scheduler is not running.
    pub fn force_prompt(&self) -> bool {
        match &self.worker {
            Some(w) if self.is_running() => w.control.send(Control::ForcePrompt).is_ok(),
            _ => false,
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// `from + wait`, saturating instead of panicking on overflow.
fn deadline_after(from: Instant, wait: Duration) -> Instant {
    from.checked_add(wait)
        .or_else(|| from.checked_add(MAX_INTERVAL))
        .unwrap_or(from)
}

enum Asked {
    Answered(PromptResponse),
    Failed(String),
    Cancelled,
}

struct LoopCtx {
    shared: Arc<Shared>,
    prompt: Arc<dyn Prompt>,
    events: Sender<ReminderEvent>,
    control: Receiver<Control>,
    cancelled: Arc<AtomicBool>,
    // Dropped when the loop returns; `stop()` waits for the disconnect.
    _done: Sender<()>,
}

impl LoopCtx {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn settings(&self) -> ReminderSettings {
        *lock(&self.shared.settings)
    }

    /// Publish a state unless this loop has been stopped meanwhile.
    fn set_state(&self, s: ReminderState) -> bool {
        let mut state = lock(&self.shared.state);
        if self.is_cancelled() {
            return false;
        }
        *state = s;
        true
    }

    fn emit(&self, ev: ReminderEvent) {
        if !self.is_cancelled() {
            let _ = self.events.send(ev);
        }
    }

    fn ask(&self) -> Asked {
        let result = {
            let _gate = lock(&self.shared.prompt_gate);
            if !self.set_state(ReminderState::Prompting) {
                return Asked::Cancelled;
            }
            self.emit(ReminderEvent::Prompted);

            let reminder = Reminder::new(self.settings().snooze_interval);
            self.prompt.ask(&reminder)
        };

        if self.is_cancelled() {
            debug!("discarding prompt answer received after stop");
            return Asked::Cancelled;
        }

        match result {
            Ok(resp) => Asked::Answered(resp),
            Err(e) => Asked::Failed(e.to_string()),
        }
    }

    fn run(self) {
        let mut phase = ReminderState::Waiting;
        let mut deadline = deadline_after(Instant::now(), self.settings().interval);

        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            let forced = match self.control.recv_timeout(timeout) {
                Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                Ok(Control::ForcePrompt) => true,
                Err(RecvTimeoutError::Timeout) => false,
            };
            if self.is_cancelled() {
                break;
            }

            let asked = self.ask();
            let settings = self.settings();
            let now = Instant::now();

            match asked {
                Asked::Cancelled => break,
                Asked::Answered(PromptResponse::Snooze) => {
                    debug!(snooze = ?settings.snooze_interval, "reminder snoozed");
                    self.emit(ReminderEvent::Snoozed);
                    phase = ReminderState::Snoozed;
                    deadline = deadline_after(now, settings.snooze_interval);
                }
                Asked::Answered(resp) => {
                    if resp == PromptResponse::Proceed {
                        self.emit(ReminderEvent::LogCheck);
                    } else {
                        self.emit(ReminderEvent::Dismissed);
                    }
                    if !forced {
                        phase = ReminderState::Waiting;
                        deadline = deadline_after(now, settings.interval);
                    }
                }
                Asked::Failed(msg) => {
                    warn!(error = %msg, "could not present reminder; keeping cadence");
                    self.emit(ReminderEvent::PromptFailed(msg));
                    if !forced {
                        phase = ReminderState::Waiting;
                        deadline = deadline_after(now, settings.interval);
                    }
                }
            }

            if !self.set_state(phase) {
                break;
            }
        }

        debug!("reminder loop exited");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Answers from a script (then Dismiss forever) and reports each ask.
    struct Scripted {
        script: Mutex<VecDeque<AppResult<PromptResponse>>>,
        asked: Sender<Instant>,
        delay: Duration,
    }

    fn scripted(
        answers: Vec<AppResult<PromptResponse>>,
        delay: Duration,
    ) -> (Scripted, Receiver<Instant>) {
        let (tx, rx) = unbounded();
        (
            Scripted {
                script: Mutex::new(answers.into()),
                asked: tx,
                delay,
            },
            rx,
        )
    }

    impl Prompt for Scripted {
        fn ask(&self, _: &Reminder) -> AppResult<PromptResponse> {
            let _ = self.asked.send(Instant::now());
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            lock(&self.script)
                .pop_front()
                .unwrap_or(Ok(PromptResponse::Dismiss))
        }
    }

    fn wait_for(rx: &Receiver<ReminderEvent>, wanted: &ReminderEvent, within: Duration) -> bool {
        let deadline = Instant::now() + within;
        while let Ok(ev) = rx.recv_deadline(deadline) {
            if &ev == wanted {
                return true;
            }
        }
        false
    }

    #[test]
    fn starts_stopped_and_rejects_bad_settings() {
        let (p, _) = scripted(vec![], Duration::ZERO);
        let bad = ReminderSettings::new(ms(10), ms(10));
        assert!(ReminderScheduler::new(bad, p).is_err());

        let (p, _) = scripted(vec![], Duration::ZERO);
        let s = ReminderScheduler::new(ReminderSettings::new(ms(100), ms(10)), p).unwrap();
        assert_eq!(s.state(), ReminderState::Stopped);
        assert!(!s.is_running());
        assert!(!s.force_prompt());
    }

    #[test]
    fn start_twice_runs_a_single_countdown() {
        let (p, asked) = scripted(vec![], Duration::ZERO);
        let mut s = ReminderScheduler::new(ReminderSettings::new(ms(150), ms(20)), p).unwrap();

        s.start().unwrap();
        s.start().unwrap();
        assert!(s.is_running());
        assert_eq!(s.state(), ReminderState::Waiting);

        thread::sleep(ms(400));
        s.stop();

        let n = asked.try_iter().count();
        assert!((1..=3).contains(&n), "expected one cadence, got {n} prompts");
    }

    #[test]
    fn snooze_reasks_after_the_short_interval() {
        let (p, asked) = scripted(
            vec![Ok(PromptResponse::Snooze), Ok(PromptResponse::Dismiss)],
            Duration::ZERO,
        );
        let mut s = ReminderScheduler::new(ReminderSettings::new(ms(300), ms(30)), p).unwrap();
        let events = s.events();
        s.start().unwrap();

        let t0 = asked.recv_timeout(ms(2000)).unwrap();
        let t1 = asked.recv_timeout(ms(2000)).unwrap();
        let t2 = asked.recv_timeout(ms(2000)).unwrap();
        s.stop();

        assert!(t1 - t0 < ms(200), "snooze re-ask took {:?}", t1 - t0);
        assert!(t2 - t1 >= ms(250), "dismiss re-ask took {:?}", t2 - t1);

        let seen: Vec<ReminderEvent> = events.try_iter().collect();
        assert!(seen.contains(&ReminderEvent::Snoozed));
        assert!(seen.contains(&ReminderEvent::Dismissed));
        assert!(!seen.contains(&ReminderEvent::LogCheck));
    }

    #[test]
    fn proceed_publishes_log_check_and_restarts_full_interval() {
        let (p, asked) = scripted(vec![Ok(PromptResponse::Proceed)], Duration::ZERO);
        let mut s = ReminderScheduler::new(ReminderSettings::new(ms(200), ms(20)), p).unwrap();
        let events = s.events();
        s.start().unwrap();

        assert!(wait_for(&events, &ReminderEvent::LogCheck, ms(2000)));
        let t0 = asked.recv_timeout(ms(100)).unwrap();
        let t1 = asked.recv_timeout(ms(2000)).unwrap();
        s.stop();

        assert!(t1 - t0 >= ms(180), "re-ask after proceed took {:?}", t1 - t0);
    }

    #[test]
    fn stop_interrupts_a_long_wait_promptly() {
        let (p, asked) = scripted(vec![], Duration::ZERO);
        let mut s =
            ReminderScheduler::new(ReminderSettings::new(Duration::from_secs(3600), ms(500)), p)
                .unwrap();
        let events = s.events();
        s.start().unwrap();
        thread::sleep(ms(20));

        let began = Instant::now();
        s.stop();
        assert!(began.elapsed() < ms(500));
        assert_eq!(s.state(), ReminderState::Stopped);
        assert!(!s.is_running());
        assert!(asked.try_recv().is_err());
        assert!(wait_for(&events, &ReminderEvent::Stopped, ms(100)));

        // idempotent
        s.stop();
        assert_eq!(s.state(), ReminderState::Stopped);
    }

    #[test]
    fn stop_during_prompt_discards_the_answer() {
        let (p, _asked) = scripted(vec![Ok(PromptResponse::Proceed)], ms(300));
        let mut s = ReminderScheduler::new(ReminderSettings::new(ms(20), ms(10)), p).unwrap();
        let events = s.events();
        s.start().unwrap();

        assert!(wait_for(&events, &ReminderEvent::Prompted, ms(2000)));
        assert_eq!(s.state(), ReminderState::Prompting);

        let began = Instant::now();
        s.stop();
        assert!(began.elapsed() <= STOP_JOIN_TIMEOUT + ms(200));
        assert_eq!(s.state(), ReminderState::Stopped);

        thread::sleep(ms(400));
        let late: Vec<ReminderEvent> = events.try_iter().collect();
        assert!(!late.contains(&ReminderEvent::LogCheck), "got {late:?}");
        assert_eq!(s.state(), ReminderState::Stopped);
    }

    #[test]
    fn presentation_failure_keeps_the_cadence() {
        let (p, asked) = scripted(
            vec![Err(AppError::Presentation("no display".into()))],
            Duration::ZERO,
        );
        let mut s = ReminderScheduler::new(ReminderSettings::new(ms(60), ms(10)), p).unwrap();
        let events = s.events();
        s.start().unwrap();

        assert!(wait_for(
            &events,
            &ReminderEvent::PromptFailed("Cannot present reminder: no display".into()),
            ms(2000)
        ));
        asked.recv_timeout(ms(100)).unwrap();
        asked.recv_timeout(ms(2000)).unwrap();
        assert!(s.is_running());
        s.stop();
    }

    #[test]
    fn force_prompt_asks_now_and_keeps_the_countdown() {
        let (p, asked) = scripted(vec![Ok(PromptResponse::Proceed)], Duration::ZERO);
        let mut s =
            ReminderScheduler::new(ReminderSettings::new(Duration::from_secs(3600), ms(50)), p)
                .unwrap();
        let events = s.events();
        s.start().unwrap();

        assert!(s.force_prompt());
        assert!(wait_for(&events, &ReminderEvent::LogCheck, ms(2000)));
        asked.recv_timeout(ms(100)).unwrap();

        thread::sleep(ms(50));
        assert_eq!(s.state(), ReminderState::Waiting);
        assert!(asked.try_recv().is_err());
        s.stop();
    }

    #[test]
    fn scheduler_can_be_restarted_after_stop() {
        let (p, asked) = scripted(vec![], Duration::ZERO);
        let mut s = ReminderScheduler::new(ReminderSettings::new(ms(50), ms(10)), p).unwrap();

        s.start().unwrap();
        s.stop();
        assert!(asked.try_recv().is_err());

        s.start().unwrap();
        assert!(s.is_running());
        asked.recv_timeout(ms(2000)).unwrap();
        s.stop();
        assert!(!s.is_running());
    }

    #[test]
    fn settings_change_applies_to_the_next_countdown() {
        let (p, asked) = scripted(vec![], Duration::ZERO);
        let mut s = ReminderScheduler::new(ReminderSettings::new(ms(100), ms(10)), p).unwrap();
        assert!(s.set_settings(ReminderSettings::new(ms(10), ms(20))).is_err());

        s.start().unwrap();
        s.set_settings(ReminderSettings::new(ms(400), ms(10))).unwrap();

        let t0 = asked.recv_timeout(ms(2000)).unwrap();
        let t1 = asked.recv_timeout(ms(2000)).unwrap();
        s.stop();
        assert!(t1 - t0 >= ms(350), "second countdown took {:?}", t1 - t0);
    }

    #[derive(Default)]
    struct OverlapStats {
        active: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    /// Sleeps in every ask and records the highest number of overlapping asks.
    struct Overlap {
        stats: Arc<OverlapStats>,
        delay: Duration,
    }

    impl Prompt for Overlap {
        fn ask(&self, _: &Reminder) -> AppResult<PromptResponse> {
            let now_active = self.stats.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.stats.peak.fetch_max(now_active, Ordering::SeqCst);
            self.stats.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(self.delay);
            self.stats.active.fetch_sub(1, Ordering::SeqCst);
            Ok(PromptResponse::Dismiss)
        }
    }

    #[test]
    fn restart_waits_for_an_abandoned_prompt() {
        let stats = Arc::new(OverlapStats::default());
        let prompt = Overlap {
            stats: Arc::clone(&stats),
            delay: ms(1500),
        };
        let mut s = ReminderScheduler::new(ReminderSettings::new(ms(20), ms(10)), prompt).unwrap();
        let events = s.events();
        s.start().unwrap();
        assert!(wait_for(&events, &ReminderEvent::Prompted, ms(2000)));

        // The first prompt outlives the stop timeout and gets detached.
        s.stop();
        s.start().unwrap();
        thread::sleep(ms(200));
        assert_eq!(stats.active.load(Ordering::SeqCst), 1);

        // Once the old prompt returns the new loop may ask.
        assert!(wait_for(&events, &ReminderEvent::Prompted, ms(3000)));
        s.stop();
        thread::sleep(ms(1600));

        assert_eq!(stats.peak.load(Ordering::SeqCst), 1);
        assert!(stats.calls.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn held_prompts_wait_for_release() {
        let (p, asked) = scripted(vec![], Duration::ZERO);
        let mut s = ReminderScheduler::new(ReminderSettings::new(ms(100), ms(10)), p).unwrap();

        s.start().unwrap();
        let hold = s.hold_prompts();
        thread::sleep(ms(300));
        assert!(asked.try_recv().is_err());
        assert_eq!(s.state(), ReminderState::Waiting);

        drop(hold);
        asked.recv_timeout(ms(2000)).unwrap();
        s.stop();
    }

    #[test]
    fn huge_intervals_are_rejected_and_deadlines_saturate() {
        let (p, _) = scripted(vec![], Duration::ZERO);
        let huge = ReminderSettings::new(Duration::from_secs(u64::MAX), ms(10));
        assert!(ReminderScheduler::new(huge, p).is_err());

        let (p, _) = scripted(vec![], Duration::ZERO);
        let s = ReminderScheduler::new(ReminderSettings::new(ms(100), ms(10)), p).unwrap();
        assert!(s.set_settings(huge).is_err());

        let from = Instant::now();
        assert!(deadline_after(from, Duration::MAX) >= from);
    }
}
