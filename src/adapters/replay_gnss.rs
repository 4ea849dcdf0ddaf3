//! Scripted positioning adapter.
//!
//! Stands in for the GNSS receiver on the host: a background thread plays
//! a fixed list of fixes, driving events and raw sentences into the
//! inbound queue, one item per interval.  This is the same path the vendor
//! fix/event/sentence callbacks take on the device.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{info, warn};

use crate::app::ports::PositioningPort;
use crate::classify::DrivingEvent;
use crate::config::GnssConfig;
use crate::error::InitError;
use crate::events::InboundQueue;

/// One scripted positioning callback.
#[derive(Debug, Clone, PartialEq)]
pub enum GnssItem {
    Fix { lat: f64, lng: f64 },
    Driving(i32),
    Sentence(String),
}

impl GnssItem {
    fn push(&self, queue: &InboundQueue) -> bool {
        match self {
            Self::Fix { lat, lng } => queue.push_fix(*lat, *lng),
            Self::Driving(code) => queue.push_driving_event(*code),
            Self::Sentence(line) => queue.push_sentence(line),
        }
    }
}

pub struct ReplayGnss {
    script: Vec<GnssItem>,
    interval: Duration,
    started: bool,
    worker: Option<JoinHandle<()>>,
}

impl ReplayGnss {
    pub fn new(script: Vec<GnssItem>, interval: Duration) -> Self {
        Self {
            script,
            interval,
            started: false,
            worker: None,
        }
    }

    /// A short trip that leaves from outside the fence at (`lat`, `lng`),
    /// parks near its center and drives away again.
    pub fn round_trip(lat: f64, lng: f64) -> Vec<GnssItem> {
        let far = 0.05;
        vec![
            GnssItem::Driving(DrivingEvent::FirstFix.code()),
            GnssItem::Sentence("$GPRMC,083559.00,A,2837.21,N,07712.70,E,0.004,77.52,091202,,,A*57".into()),
            GnssItem::Fix { lat: lat + far, lng },
            GnssItem::Driving(DrivingEvent::MotionStart.code()),
            GnssItem::Fix { lat: lat + far / 2.0, lng },
            GnssItem::Driving(DrivingEvent::Overspeed.code()),
            GnssItem::Driving(DrivingEvent::SpeedNormal.code()),
            GnssItem::Fix { lat: lat + 0.000_09, lng },
            GnssItem::Driving(DrivingEvent::HarshBrake.code()),
            GnssItem::Driving(DrivingEvent::MotionStop.code()),
            GnssItem::Fix { lat, lng },
            GnssItem::Driving(DrivingEvent::MotionStart.code()),
            GnssItem::Driving(DrivingEvent::HarshTurn.code()),
            GnssItem::Fix { lat, lng: lng + far },
            GnssItem::Driving(DrivingEvent::SignalLost.code()),
            GnssItem::Driving(DrivingEvent::SignalLocked.code()),
        ]
    }

    /// Wait for the script to finish.  Returns immediately if never started.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("GNSS replay thread panicked");
            }
        }
    }
}

impl PositioningPort for ReplayGnss {
    fn start(&mut self, config: &GnssConfig, queue: &'static InboundQueue) -> Result<(), InitError> {
        if self.started {
            return Err(InitError::AlreadyStarted);
        }
        if config.port.is_empty() {
            return Err(InitError::PortUnavailable("gnss"));
        }
        if config.baud == 0 {
            return Err(InitError::Rejected("gnss baud rate"));
        }
        info!(
            "GNSS replay on {} @ {} baud ({} item(s), speed limit {} km/h)",
            config.port,
            config.baud,
            self.script.len(),
            config.thresholds.speed_limit_kmh
        );

        let script = self.script.clone();
        let interval = self.interval;
        let worker = thread::Builder::new()
            .name("gnss-replay".into())
            .spawn(move || {
                for item in &script {
                    thread::sleep(interval);
                    item.push(queue);
                }
                info!("GNSS replay finished");
            })
            .map_err(|_| InitError::Rejected("gnss worker thread"))?;
        self.worker = Some(worker);
        self.started = true;
        Ok(())
    }
}
